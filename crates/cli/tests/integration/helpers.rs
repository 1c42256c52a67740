//! Test helper utilities for CLI integration tests.

#![allow(deprecated)] // Command::cargo_bin deprecation

use assert_cmd::Command;
use serde_json::{json, Map, Value};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const MARKET: &str = "0xc4d4500326981eacd020e20a81b1c479c161c7ef";
pub const DAY: u64 = 86_400;
pub const NOW: u64 = 1_700_000_000;

/// Start a mock GraphQL server.
pub async fn start_mock_server() -> MockServer {
    MockServer::start().await
}

/// Create a CLI command pointing to a mock server.
pub fn exa_rates_cmd_with_mock(mock: &MockServer) -> Command {
    let mut cmd = Command::cargo_bin("exa-rates").unwrap();
    cmd.env("EXA_INDEXER_URL", mock.uri());
    cmd
}

/// Create a CLI command without mock server (for validation tests).
pub fn exa_rates_cmd() -> Command {
    let mut cmd = Command::cargo_bin("exa-rates").unwrap();
    cmd.env_remove("EXA_INDEXER_URL");
    cmd
}

/// `n` whole tokens as an 18-decimal BigInt string.
pub fn wad(n: u64) -> String {
    format!("{}{}", n, "0".repeat(18))
}

/// Snapshot query response with a floating pool of `assets[i]` at
/// `timestamps[i]` over 1000 shares, and nothing else indexed.
pub fn deposit_growth_response(timestamps: &[u64], assets: &[u64]) -> Value {
    let entities = [
        "floatingDebtUpdates",
        "interestRateModelSets",
        "accumulatorAccruals",
        "earningsAccumulatorSmoothFactorSets",
        "treasurySets",
    ];
    let interval = 86_400 * 7 * 4;

    let mut data = Map::new();
    for (&t, &a) in timestamps.iter().zip(assets) {
        data.insert(
            format!("marketUpdates_{}", t),
            json!([{
                "timestamp": t,
                "floatingDepositShares": wad(1_000),
                "floatingAssets": wad(a),
                "floatingBorrowShares": "0",
                "floatingDebt": "0",
                "earningsAccumulator": "0",
                "floatingBackupBorrowed": null
            }]),
        );
        for entity in entities {
            data.insert(format!("{}_{}", entity, t), json!([]));
        }
        let first = t - t % interval + interval;
        for i in 0..3 {
            data.insert(
                format!("fixedEarningsUpdates_{}_{}", t, first + i * interval),
                json!([]),
            );
        }
    }
    json!({ "data": data })
}

/// Mock a GraphQL POST request with a JSON response.
pub async fn mock_graphql_json(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mock a GraphQL error response.
pub async fn mock_graphql_error(server: &MockServer, error_message: &str) {
    let body = format!(
        r#"{{"errors":[{{"message":"{}"}}],"data":null}}"#,
        error_message
    );
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}
