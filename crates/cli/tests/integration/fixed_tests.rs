//! Integration tests for the fixed rate command.

use predicates::prelude::*;
use serde_json::json;

use super::helpers::{exa_rates_cmd_with_mock, mock_graphql_json, start_mock_server, MARKET};

const YEAR: u64 = 31_536_000;

fn borrows() -> serde_json::Value {
    json!({
        "data": {
            "borrowAtMaturities": [
                { "timestamp": 0, "maturity": YEAR, "assets": "300", "fee": "6" },
                { "timestamp": 0, "maturity": YEAR, "assets": "100", "fee": "6" }
            ]
        }
    })
}

#[tokio::test]
async fn test_fixed_table_output() {
    let server = start_mock_server().await;
    mock_graphql_json(&server, borrows()).await;

    exa_rates_cmd_with_mock(&server)
        .args(["fixed", MARKET, "--type", "borrow", "--since", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains(YEAR.to_string()))
        .stdout(predicate::str::contains("3.00%"))
        .stdout(predicate::str::contains("Average APR: 3.00%"));
}

#[tokio::test]
async fn test_fixed_json_output() {
    let server = start_mock_server().await;
    mock_graphql_json(&server, borrows()).await;

    let output = exa_rates_cmd_with_mock(&server)
        .args(["fixed", MARKET, "--type", "borrow", "--since", "0", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["type"], "borrow");
    assert_eq!(json["since"], 0);
    assert_eq!(json["maturities"][0]["maturity"], YEAR);
    assert_eq!(json["maturities"][0]["volume"], "400");
}

#[tokio::test]
async fn test_fixed_no_operations() {
    let server = start_mock_server().await;
    mock_graphql_json(&server, json!({ "data": { "depositAtMaturities": [] } })).await;

    exa_rates_cmd_with_mock(&server)
        .args(["fixed", MARKET, "--since", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No fixed operations found."));
}
