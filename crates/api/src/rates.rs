//! Rate time series built from indexed snapshots.

use std::time::{SystemTime, UNIX_EPOCH};

use alloy_primitives::Address;
use exa_rates_sim::math::wad_to_f64;
use exa_rates_sim::{average_apr, maturity_rates, window_rate, MaturityRate, RateType};
use futures::future::try_join_all;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::client::{parse_market, IndexerClient, DEFAULT_MAX_FUTURE_POOLS};
use crate::error::{ApiError, Result};

/// Default spacing between ticks: one day.
pub const DEFAULT_INTERVAL: u64 = 86_400;

/// One point of a rate series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatePoint {
    /// End of the window the rate was measured over (unix seconds)
    pub date: u64,
    pub apr: f64,
    pub apy: f64,
    /// Floating utilization at the end of the window
    pub utilization: f64,
}

/// Options for [`RateClient::query_rate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateQueryOptions {
    pub max_future_pools: u8,
    /// Align ticks to multiples of `interval`.
    pub round_ticks: bool,
    /// Seconds between ticks.
    pub interval: u64,
    /// Seconds to shift the series back from now.
    pub offset: u64,
    /// Number of points.
    pub count: u32,
    /// Current time override; the system clock when unset.
    pub now: Option<u64>,
}

impl Default for RateQueryOptions {
    fn default() -> Self {
        Self {
            max_future_pools: DEFAULT_MAX_FUTURE_POOLS,
            round_ticks: true,
            interval: DEFAULT_INTERVAL,
            offset: 0,
            count: 1,
            now: None,
        }
    }
}

impl RateQueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_future_pools(mut self, max_future_pools: u8) -> Self {
        self.max_future_pools = max_future_pools;
        self
    }

    pub fn with_round_ticks(mut self, round_ticks: bool) -> Self {
        self.round_ticks = round_ticks;
        self
    }

    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_now(mut self, now: u64) -> Self {
        self.now = Some(now);
        self
    }

    /// The `count + 1` tick timestamps, oldest first.
    ///
    /// The last tick is `now - offset`, rounded down to a multiple of
    /// `interval` when `round_ticks` is set.
    pub fn ticks(&self) -> Result<Vec<u64>> {
        if self.interval == 0 {
            return Err(ApiError::InvalidWindow {
                reason: "interval must be positive".to_string(),
            });
        }
        if self.count == 0 {
            return Err(ApiError::InvalidWindow {
                reason: "count must be positive".to_string(),
            });
        }

        let now = self.now.unwrap_or_else(unix_now);
        let last = now.checked_sub(self.offset).ok_or_else(|| ApiError::InvalidWindow {
            reason: format!("offset {} is before the epoch", self.offset),
        })?;
        let last = if self.round_ticks {
            last - last % self.interval
        } else {
            last
        };

        let span = self
            .interval
            .checked_mul(u64::from(self.count))
            .ok_or_else(|| ApiError::InvalidWindow {
                reason: format!(
                    "{} intervals of {} seconds overflow",
                    self.count, self.interval
                ),
            })?;
        let first = last.checked_sub(span).ok_or_else(|| ApiError::InvalidWindow {
            reason: format!("series of {} seconds starts before the epoch", span),
        })?;

        Ok((0..=u64::from(self.count))
            .map(|i| first + i * self.interval)
            .collect())
    }
}

/// Current unix time in seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Fixed rates of one side of a market.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedRates {
    /// Volume-weighted rate per maturity, ascending
    pub maturities: Vec<MaturityRate>,
    /// Volume-weighted rate across all maturities
    pub average_apr: Option<f64>,
}

/// Derives floating and fixed rates for markets.
#[derive(Debug, Clone)]
pub struct RateClient {
    indexer: IndexerClient,
}

impl RateClient {
    pub fn new(indexer: IndexerClient) -> Self {
        Self { indexer }
    }

    pub fn indexer(&self) -> &IndexerClient {
        &self.indexer
    }

    /// Rate series for one side of a market.
    ///
    /// Every point is an independent two-snapshot computation over one
    /// interval, with all snapshots fetched in a single request.
    pub async fn query_rate(
        &self,
        market: &Address,
        rate_type: RateType,
        options: &RateQueryOptions,
    ) -> Result<Vec<RatePoint>> {
        let ticks = options.ticks()?;
        let snapshots = self
            .indexer
            .fetch_snapshots(market, &ticks, options.max_future_pools)
            .await?;

        let points = snapshots
            .windows(2)
            .map(|pair| -> Result<RatePoint> {
                let (initial, last) = (&pair[0], &pair[1]);
                let rate = window_rate(
                    initial,
                    last,
                    rate_type,
                    initial.timestamp,
                    last.timestamp,
                    options.max_future_pools,
                )?;
                Ok(RatePoint {
                    date: last.timestamp,
                    apr: rate.apr,
                    apy: rate.apy,
                    utilization: wad_to_f64(last.market.utilization()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(%market, %rate_type, points = points.len(), "built rate series");
        Ok(points)
    }

    /// Rate over the trailing `window` seconds, accrued up to now.
    pub async fn floating_rate(
        &self,
        market: &Address,
        rate_type: RateType,
        window: u64,
    ) -> Result<RatePoint> {
        self.floating_rate_at(market, rate_type, window, unix_now())
            .await
    }

    /// [`Self::floating_rate`] as seen at `now`.
    pub async fn floating_rate_at(
        &self,
        market: &Address,
        rate_type: RateType,
        window: u64,
        now: u64,
    ) -> Result<RatePoint> {
        let options = RateQueryOptions::new()
            .with_max_future_pools(self.indexer.config().max_future_pools)
            .with_round_ticks(false)
            .with_interval(window)
            .with_count(1)
            .with_now(now);

        self.query_rate(market, rate_type, &options)
            .await?
            .pop()
            .ok_or_else(|| ApiError::Parse("Empty rate series".to_string()))
    }

    /// [`Self::floating_rate_at`] for several markets, queried concurrently.
    pub async fn floating_rates(
        &self,
        markets: &[Address],
        rate_type: RateType,
        window: u64,
        now: u64,
    ) -> Result<Vec<RatePoint>> {
        try_join_all(
            markets
                .iter()
                .map(|market| self.floating_rate_at(market, rate_type, window, now)),
        )
        .await
    }

    /// Volume-weighted fixed rates from operations made since `since`.
    pub async fn fixed_rates(
        &self,
        market: &Address,
        rate_type: RateType,
        since: u64,
    ) -> Result<FixedRates> {
        let operations = self
            .indexer
            .fetch_maturity_operations(market, rate_type, since)
            .await?;
        Ok(FixedRates {
            maturities: maturity_rates(&operations),
            average_apr: average_apr(&operations),
        })
    }
}

/// One-shot rate series against `endpoint` for a market given as hex.
pub async fn query_rate(
    endpoint: Url,
    market: &str,
    rate_type: RateType,
    options: &RateQueryOptions,
) -> Result<Vec<RatePoint>> {
    let market = parse_market(market)?;
    RateClient::new(IndexerClient::new(endpoint))
        .query_rate(&market, rate_type, options)
        .await
}
