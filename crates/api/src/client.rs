//! Indexer client: executes snapshot and maturity queries.

use std::time::Duration;

use alloy_primitives::Address;
use exa_rates_sim::{MarketSnapshot, MaturityOperation, RateType, MIN_APR_VALUE};
use graphql_client::Response;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ApiError, Result};
use crate::queries::{MaturityQuery, QueryRequest, ResponseData, SnapshotQuery};
use crate::types::scalars::parse_address;

/// Default number of future fixed pools a market keeps open.
pub const DEFAULT_MAX_FUTURE_POOLS: u8 = 3;

/// Configuration for the indexer client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// GraphQL API URL.
    pub api_url: Url,
    /// Whole-request timeout, none by default.
    pub request_timeout_secs: Option<u64>,
    /// Fixed pools considered when accruing total assets.
    pub max_future_pools: u8,
    /// Rates below this are reported as not available.
    pub min_apr: f64,
}

impl ClientConfig {
    /// Create a new configuration for the given endpoint.
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            request_timeout_secs: None,
            max_future_pools: DEFAULT_MAX_FUTURE_POOLS,
            min_apr: MIN_APR_VALUE,
        }
    }

    /// Set a custom API URL.
    pub fn with_api_url(mut self, url: Url) -> Self {
        self.api_url = url;
        self
    }

    /// Set a request timeout in seconds.
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Set the number of future fixed pools.
    pub fn with_max_future_pools(mut self, max_future_pools: u8) -> Self {
        self.max_future_pools = max_future_pools;
        self
    }

    /// Set the display threshold for rates.
    pub fn with_min_apr(mut self, min_apr: f64) -> Self {
        self.min_apr = min_apr;
        self
    }
}

/// Parse a market address given as a hex string.
pub fn parse_market(market: &str) -> Result<Address> {
    parse_address(market).ok_or_else(|| ApiError::InvalidAddress(market.to_string()))
}

/// Client for the protocol's event indexer.
#[derive(Debug, Clone)]
pub struct IndexerClient {
    http_client: Client,
    config: ClientConfig,
}

impl IndexerClient {
    /// Create a new client with default settings for `api_url`.
    pub fn new(api_url: Url) -> Self {
        Self {
            http_client: Client::new(),
            config: ClientConfig::new(api_url),
        }
    }

    /// Create a new client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http_client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a GraphQL query.
    async fn execute(&self, request: &QueryRequest) -> Result<ResponseData> {
        debug!(
            operation = %request.operation_name,
            query_len = request.query.len(),
            "executing indexer query"
        );

        let response = self
            .http_client
            .post(self.config.api_url.as_str())
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        let response_body: Response<ResponseData> = response.json().await?;

        if let Some(errors) = response_body.errors {
            if !errors.is_empty() {
                warn!(
                    operation = %request.operation_name,
                    count = errors.len(),
                    "indexer returned errors"
                );
                return Err(ApiError::GraphQL(
                    errors
                        .iter()
                        .map(|e| e.message.clone())
                        .collect::<Vec<_>>()
                        .join("; "),
                ));
            }
        }

        response_body
            .data
            .ok_or_else(|| ApiError::Parse("No data in response".to_string()))
    }

    /// Market snapshots at each timestamp, fetched in one request.
    pub async fn fetch_snapshots(
        &self,
        market: &Address,
        timestamps: &[u64],
        max_future_pools: u8,
    ) -> Result<Vec<MarketSnapshot>> {
        if timestamps.is_empty() {
            return Ok(Vec::new());
        }

        let query = SnapshotQuery::new(timestamps.to_vec(), max_future_pools);
        debug!(
            %market,
            timestamps = timestamps.len(),
            aliases = query.alias_count(),
            "fetching market snapshots"
        );

        let data = self.execute(&query.build(market)).await?;
        query.parse(data)
    }

    /// Snapshots bracketing `[start, end]`.
    pub async fn fetch_window(
        &self,
        market: &Address,
        start: u64,
        end: u64,
    ) -> Result<(MarketSnapshot, MarketSnapshot)> {
        if end <= start {
            return Err(ApiError::InvalidWindow {
                reason: format!("end {} is not after start {}", end, start),
            });
        }

        let snapshots = self
            .fetch_snapshots(market, &[start, end], self.config.max_future_pools)
            .await?;
        let mut snapshots = snapshots.into_iter();
        match (snapshots.next(), snapshots.next()) {
            (Some(initial), Some(last)) => Ok((initial, last)),
            _ => Err(ApiError::Parse("Incomplete snapshot window".to_string())),
        }
    }

    /// Fixed deposits or borrows made at or after `since`.
    pub async fn fetch_maturity_operations(
        &self,
        market: &Address,
        rate_type: RateType,
        since: u64,
    ) -> Result<Vec<MaturityOperation>> {
        let query = MaturityQuery::new(rate_type, since);
        let data = self.execute(&query.build(market)).await?;
        let operations = query.parse(data)?;
        debug!(%market, %rate_type, count = operations.len(), "fetched maturity operations");
        Ok(operations)
    }
}
