//! Test helper utilities for API crate integration tests.

use alloy_primitives::U256;
use exa_rates_api::queries::snapshot::maturities;
use exa_rates_api::ClientConfig;
use exa_rates_sim::WAD;
use serde_json::{json, Map, Value};
use url::Url;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Market used throughout the tests.
pub const MARKET: &str = "0xc4d4500326981eacd020e20a81b1c479c161c7ef";

pub const DAY: u64 = 86_400;

/// Entities selected once per timestamp by the snapshot query.
pub const SNAPSHOT_ENTITIES: [&str; 6] = [
    "marketUpdates",
    "floatingDebtUpdates",
    "interestRateModelSets",
    "accumulatorAccruals",
    "earningsAccumulatorSmoothFactorSets",
    "treasurySets",
];

/// Start a mock GraphQL server.
pub async fn start_mock_server() -> MockServer {
    MockServer::start().await
}

/// Create a ClientConfig pointing to a mock server.
pub fn client_config_with_mock(mock: &MockServer) -> ClientConfig {
    ClientConfig::new(Url::parse(&mock.uri()).unwrap())
}

/// `n` whole tokens as an 18-decimal BigInt string.
pub fn wad(n: u64) -> String {
    (U256::from(n) * WAD).to_string()
}

/// A `marketUpdates` entry.
pub fn market_update(
    timestamp: u64,
    deposit_shares: u64,
    assets: u64,
    borrow_shares: u64,
    debt: u64,
) -> Value {
    json!({
        "timestamp": timestamp,
        "floatingDepositShares": wad(deposit_shares),
        "floatingAssets": wad(assets),
        "floatingBorrowShares": wad(borrow_shares),
        "floatingDebt": wad(debt),
        "earningsAccumulator": "0",
        "floatingBackupBorrowed": null
    })
}

/// Legacy curve with `A = 0.0372`, `B = -0.018`, `Umax = 1.1`.
pub fn legacy_model() -> Value {
    json!({
        "floatingCurveA": "37200000000000000",
        "floatingCurveB": "-18000000000000000",
        "floatingMaxUtilization": "1100000000000000000",
        "naturalUtilization": null,
        "sigmoidSpeed": null,
        "growthSpeed": null,
        "maxRate": null
    })
}

/// Response data of a snapshot query, every selection empty until set.
pub struct SnapshotResponse {
    data: Map<String, Value>,
}

impl SnapshotResponse {
    pub fn new(timestamps: &[u64], max_future_pools: u8) -> Self {
        let mut data = Map::new();
        for &t in timestamps {
            for entity in SNAPSHOT_ENTITIES {
                data.insert(format!("{}_{}", entity, t), json!([]));
            }
            for maturity in maturities(t, max_future_pools) {
                data.insert(format!("fixedEarningsUpdates_{}_{}", t, maturity), json!([]));
            }
        }
        Self { data }
    }

    /// Sets the latest `entity` at `timestamp`.
    pub fn with(mut self, entity: &str, timestamp: u64, value: Value) -> Self {
        self.data
            .insert(format!("{}_{}", entity, timestamp), json!([value]));
        self
    }

    pub fn with_fixed(mut self, timestamp: u64, maturity: u64, value: Value) -> Self {
        self.data.insert(
            format!("fixedEarningsUpdates_{}_{}", timestamp, maturity),
            json!([value]),
        );
        self
    }

    pub fn body(&self) -> Value {
        json!({ "data": self.data })
    }
}

/// Mock a GraphQL POST request with a JSON response.
pub async fn mock_graphql_json(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mock a GraphQL error response with a single error message.
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

/// Mock a GraphQL response with multiple errors.
pub async fn mock_graphql_errors(server: &MockServer, error_messages: &[&str]) {
    let errors: Vec<String> = error_messages
        .iter()
        .map(|msg| format!(r#"{{"message":"{}"}}"#, msg))
        .collect();
    let body = format!(r#"{{"errors":[{}],"data":null}}"#, errors.join(","));
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Mock an HTTP error response.
pub async fn mock_http_error(server: &MockServer, status_code: u16) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(status_code).set_body_string("Internal Server Error"))
        .mount(server)
        .await;
}

/// Mock a response with null data (no errors but no data).
pub async fn mock_null_data(server: &MockServer) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":null}"#))
        .mount(server)
        .await;
}
