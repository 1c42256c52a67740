//! CLI argument validation tests.
//!
//! These tests verify that the CLI properly validates arguments and provides
//! helpful error messages without requiring network access.

use predicates::prelude::*;

use super::helpers::{exa_rates_cmd, MARKET};

#[test]
fn test_help_output() {
    exa_rates_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("exa-rates"))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("apy"))
        .stdout(predicate::str::contains("fixed"));
}

#[test]
fn test_history_help_output() {
    exa_rates_cmd()
        .args(["history", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--interval"))
        .stdout(predicate::str::contains("--no-round"));
}

#[test]
fn test_invalid_command() {
    exa_rates_cmd()
        .arg("invalid_command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_history_missing_market() {
    exa_rates_cmd()
        .arg("history")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_missing_api_url() {
    exa_rates_cmd()
        .args(["history", MARKET])
        .assert()
        .failure()
        .stderr(predicate::str::contains("EXA_INDEXER_URL"));
}

#[test]
fn test_invalid_market_address() {
    exa_rates_cmd()
        .args(["--api-url", "http://127.0.0.1:9", "history", "0xnot-an-address"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid address format"));
}

#[test]
fn test_invalid_rate_type() {
    exa_rates_cmd()
        .args(["history", MARKET, "--type", "lend"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_invalid_format() {
    exa_rates_cmd()
        .args(["--format", "xml", "history", MARKET])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
