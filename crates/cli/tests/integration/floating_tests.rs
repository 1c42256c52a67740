//! Integration tests for floating rate commands.

use predicates::prelude::*;

use super::helpers::{
    deposit_growth_response, exa_rates_cmd_with_mock, mock_graphql_error, mock_graphql_json,
    start_mock_server, DAY, MARKET, NOW,
};

const END: u64 = NOW - NOW % DAY;
const START: u64 = END - DAY;

#[tokio::test]
async fn test_history_table_output() {
    let server = start_mock_server().await;
    mock_graphql_json(&server, deposit_growth_response(&[START, END], &[1_000, 1_001])).await;

    exa_rates_cmd_with_mock(&server)
        .args(["history", MARKET, "--count", "1", "--now", &NOW.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("36.50%"))
        .stdout(predicate::str::contains(END.to_string()))
        .stdout(predicate::str::contains("Utilization"));
}

#[tokio::test]
async fn test_history_json_output() {
    let server = start_mock_server().await;
    let ticks = [END - 2 * DAY, END - DAY, END];
    mock_graphql_json(&server, deposit_growth_response(&ticks, &[1_000, 1_000, 1_001])).await;

    let output = exa_rates_cmd_with_mock(&server)
        .args([
            "history",
            MARKET,
            "--count",
            "2",
            "--now",
            &NOW.to_string(),
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let points: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let points = points.as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["date"], END - DAY);
    assert_eq!(points[0]["apr"], 0.0);
    assert_eq!(points[1]["date"], END);
    assert!((points[1]["apr"].as_f64().unwrap() - 0.365).abs() < 1e-12);
}

#[tokio::test]
async fn test_history_below_threshold_is_not_available() {
    let server = start_mock_server().await;
    mock_graphql_json(&server, deposit_growth_response(&[START, END], &[1_000, 1_000])).await;

    exa_rates_cmd_with_mock(&server)
        .args(["history", MARKET, "--count", "1", "--now", &NOW.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("N/A"));
}

#[tokio::test]
async fn test_apy_detail_output() {
    let server = start_mock_server().await;
    mock_graphql_json(&server, deposit_growth_response(&[NOW - DAY, NOW], &[1_000, 1_001])).await;

    exa_rates_cmd_with_mock(&server)
        .args(["apy", MARKET, "--window", &DAY.to_string(), "--now", &NOW.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains(MARKET))
        .stdout(predicate::str::contains("Floating Rate"))
        .stdout(predicate::str::contains("36.50%"));
}

#[tokio::test]
async fn test_apy_several_markets_json() {
    let server = start_mock_server().await;
    mock_graphql_json(&server, deposit_growth_response(&[NOW - DAY, NOW], &[1_000, 1_001])).await;

    let output = exa_rates_cmd_with_mock(&server)
        .args([
            "--format",
            "json",
            "apy",
            MARKET,
            "0x81c9a7b55a4df39a9b7b5f781ec0e53539694873",
            "--window",
            &DAY.to_string(),
            "--now",
            &NOW.to_string(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["market"], MARKET);
    assert_eq!(rows[1]["type"], "deposit");
    assert_eq!(rows[1]["date"], NOW);
}

#[tokio::test]
async fn test_min_apr_threshold() {
    let server = start_mock_server().await;
    mock_graphql_json(&server, deposit_growth_response(&[START, END], &[1_000, 1_001])).await;

    exa_rates_cmd_with_mock(&server)
        .args([
            "--min-apr",
            "1",
            "history",
            MARKET,
            "--count",
            "1",
            "--now",
            &NOW.to_string(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("N/A"))
        .stdout(predicate::str::contains("36.50%").not());
}

#[tokio::test]
async fn test_graphql_error_fails() {
    let server = start_mock_server().await;
    mock_graphql_error(&server, "indexing_error").await;

    exa_rates_cmd_with_mock(&server)
        .args(["history", MARKET, "--now", &NOW.to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("indexing_error"));
}
