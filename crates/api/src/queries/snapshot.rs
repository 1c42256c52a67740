//! Batched market snapshot query.
//!
//! For every timestamp the query selects the latest event of each kind at or
//! before it, plus the latest earnings update of each fixed pool that is
//! active at that timestamp.

use alloy_primitives::Address;
use exa_rates_sim::{MarketSnapshot, FIXED_INTERVAL};

use super::{latest_selection, take_latest, QueryRequest, ResponseData};
use crate::error::Result;
use crate::types::entities::{
    accumulator_state, AccumulatorAccrual, FixedEarningsUpdate, FloatingDebtUpdate,
    InterestRateModelSet, MarketUpdate, SmoothFactorSet, TreasurySet,
};
use crate::types::scalars::format_address;

const OPERATION_NAME: &str = "MarketSnapshots";

const MARKET_UPDATE_FIELDS: &str = "timestamp floatingDepositShares floatingAssets \
    floatingBorrowShares floatingDebt earningsAccumulator floatingBackupBorrowed";
const FLOATING_DEBT_FIELDS: &str = "timestamp utilization";
const INTEREST_RATE_MODEL_FIELDS: &str = "floatingCurveA floatingCurveB \
    floatingMaxUtilization naturalUtilization sigmoidSpeed growthSpeed maxRate";
const ACCUMULATOR_ACCRUAL_FIELDS: &str = "timestamp";
const SMOOTH_FACTOR_FIELDS: &str = "earningsAccumulatorSmoothFactor";
const TREASURY_FIELDS: &str = "treasuryFeeRate";
const FIXED_EARNINGS_FIELDS: &str = "timestamp maturity unassignedEarnings";

/// Maturities of the fixed pools open at `timestamp`.
///
/// Pools mature on `FIXED_INTERVAL` boundaries; the first one is the next
/// boundary strictly after `timestamp`. Maturities past `u64::MAX` are dropped.
pub fn maturities(timestamp: u64, max_future_pools: u8) -> Vec<u64> {
    let current = timestamp - timestamp % FIXED_INTERVAL;
    (1..=u64::from(max_future_pools))
        .map_while(|i| {
            i.checked_mul(FIXED_INTERVAL)
                .and_then(|offset| current.checked_add(offset))
        })
        .collect()
}

fn alias(entity: &str, timestamp: u64) -> String {
    format!("{}_{}", entity, timestamp)
}

fn fixed_alias(timestamp: u64, maturity: u64) -> String {
    format!("fixedEarningsUpdates_{}_{}", timestamp, maturity)
}

/// Snapshot query for one market at several timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotQuery {
    timestamps: Vec<u64>,
    max_future_pools: u8,
}

impl SnapshotQuery {
    pub fn new(timestamps: Vec<u64>, max_future_pools: u8) -> Self {
        Self {
            timestamps,
            max_future_pools,
        }
    }

    pub fn timestamps(&self) -> &[u64] {
        &self.timestamps
    }

    /// Number of aliased selections the query carries.
    pub fn alias_count(&self) -> usize {
        self.timestamps
            .iter()
            .map(|&t| 6 + maturities(t, self.max_future_pools).len())
            .sum()
    }

    /// Builds the GraphQL request for `market`.
    pub fn build(&self, market: &Address) -> QueryRequest {
        let mut query = format!("query {}($market: Bytes!) {{\n", OPERATION_NAME);

        for &t in &self.timestamps {
            let filter = format!("market: $market, timestamp_lte: {}", t);
            let entities = [
                ("marketUpdates", MARKET_UPDATE_FIELDS),
                ("floatingDebtUpdates", FLOATING_DEBT_FIELDS),
                ("interestRateModelSets", INTEREST_RATE_MODEL_FIELDS),
                ("accumulatorAccruals", ACCUMULATOR_ACCRUAL_FIELDS),
                ("earningsAccumulatorSmoothFactorSets", SMOOTH_FACTOR_FIELDS),
                ("treasurySets", TREASURY_FIELDS),
            ];
            for (entity, fields) in entities {
                query.push_str(&latest_selection(&alias(entity, t), entity, &filter, fields));
            }

            for maturity in maturities(t, self.max_future_pools) {
                let filter = format!("{}, maturity: {}", filter, maturity);
                query.push_str(&latest_selection(
                    &fixed_alias(t, maturity),
                    "fixedEarningsUpdates",
                    &filter,
                    FIXED_EARNINGS_FIELDS,
                ));
            }
        }
        query.push('}');

        QueryRequest {
            query,
            variables: serde_json::json!({ "market": format_address(market) }),
            operation_name: OPERATION_NAME.to_string(),
        }
    }

    /// Assembles one snapshot per timestamp, in request order.
    ///
    /// Entities with no event before a timestamp fall back to zero values.
    pub fn parse(&self, mut data: ResponseData) -> Result<Vec<MarketSnapshot>> {
        self.timestamps
            .iter()
            .map(|&t| self.parse_one(&mut data, t))
            .collect()
    }

    fn parse_one(&self, data: &mut ResponseData, timestamp: u64) -> Result<MarketSnapshot> {
        let market: Option<MarketUpdate> = take_latest(data, &alias("marketUpdates", timestamp))?;
        let floating_debt: Option<FloatingDebtUpdate> =
            take_latest(data, &alias("floatingDebtUpdates", timestamp))?;
        let irm: Option<InterestRateModelSet> =
            take_latest(data, &alias("interestRateModelSets", timestamp))?;
        let accrual: Option<AccumulatorAccrual> =
            take_latest(data, &alias("accumulatorAccruals", timestamp))?;
        let smooth_factor: Option<SmoothFactorSet> =
            take_latest(data, &alias("earningsAccumulatorSmoothFactorSets", timestamp))?;
        let treasury: Option<TreasurySet> = take_latest(data, &alias("treasurySets", timestamp))?;

        let mut fixed_pools = Vec::new();
        for maturity in maturities(timestamp, self.max_future_pools) {
            let update: Option<FixedEarningsUpdate> =
                take_latest(data, &fixed_alias(timestamp, maturity))?;
            if let Some(update) = update {
                fixed_pools.push(update.into());
            }
        }

        Ok(MarketSnapshot {
            timestamp,
            market: market.map(Into::into).unwrap_or_default(),
            floating_debt: floating_debt.map(Into::into).unwrap_or_default(),
            interest_rate_model: irm.map(Into::into).unwrap_or_default(),
            accumulator: accumulator_state(accrual, smooth_factor),
            treasury_fee_rate: treasury.map(|t| t.treasury_fee_rate).unwrap_or_default(),
            fixed_pools,
        })
    }
}
