//! Indexed entities returned by the snapshot and maturity queries.
//!
//! Field names follow the indexer schema. Each entity converts into the
//! matching `exa_rates_sim` type.

use alloy_primitives::U256;
use exa_rates_sim::{
    AccumulatorState, CurveParameters, FixedPool, FloatingDebtState, InterestRateModel,
    MarketState, MaturityOperation,
};
use serde::Deserialize;

use super::scalars::{
    deserialize_bigint, deserialize_optional_bigint, deserialize_signed_bigint,
    deserialize_timestamp,
};

/// `marketUpdates` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketUpdate {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: u64,
    #[serde(deserialize_with = "deserialize_bigint")]
    pub floating_deposit_shares: U256,
    #[serde(deserialize_with = "deserialize_bigint")]
    pub floating_assets: U256,
    #[serde(deserialize_with = "deserialize_bigint")]
    pub floating_borrow_shares: U256,
    #[serde(deserialize_with = "deserialize_bigint")]
    pub floating_debt: U256,
    #[serde(deserialize_with = "deserialize_bigint")]
    pub earnings_accumulator: U256,
    #[serde(default, deserialize_with = "deserialize_optional_bigint")]
    pub floating_backup_borrowed: Option<U256>,
}

impl From<MarketUpdate> for MarketState {
    fn from(update: MarketUpdate) -> Self {
        MarketState {
            timestamp: update.timestamp,
            floating_deposit_shares: update.floating_deposit_shares,
            floating_assets: update.floating_assets,
            floating_borrow_shares: update.floating_borrow_shares,
            floating_debt: update.floating_debt,
            earnings_accumulator: update.earnings_accumulator,
            floating_backup_borrowed: update.floating_backup_borrowed.unwrap_or_default(),
        }
    }
}

/// `floatingDebtUpdates` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FloatingDebtUpdate {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: u64,
    #[serde(deserialize_with = "deserialize_bigint")]
    pub utilization: U256,
}

impl From<FloatingDebtUpdate> for FloatingDebtState {
    fn from(update: FloatingDebtUpdate) -> Self {
        FloatingDebtState {
            timestamp: update.timestamp,
            utilization: update.utilization,
        }
    }
}

/// `interestRateModelSets` entry.
///
/// The sigmoid fields are absent for legacy models.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestRateModelSet {
    #[serde(deserialize_with = "deserialize_bigint")]
    pub floating_curve_a: U256,
    #[serde(deserialize_with = "deserialize_signed_bigint")]
    pub floating_curve_b: i128,
    #[serde(deserialize_with = "deserialize_bigint")]
    pub floating_max_utilization: U256,
    #[serde(default, deserialize_with = "deserialize_optional_bigint")]
    pub natural_utilization: Option<U256>,
    #[serde(default, deserialize_with = "deserialize_optional_bigint")]
    pub sigmoid_speed: Option<U256>,
    #[serde(default, deserialize_with = "deserialize_optional_bigint")]
    pub growth_speed: Option<U256>,
    #[serde(default, deserialize_with = "deserialize_optional_bigint")]
    pub max_rate: Option<U256>,
}

impl From<InterestRateModelSet> for InterestRateModel {
    fn from(set: InterestRateModelSet) -> Self {
        InterestRateModel::from_parameters(
            CurveParameters {
                curve_a: set.floating_curve_a,
                curve_b: set.floating_curve_b,
                max_utilization: set.floating_max_utilization,
            },
            set.natural_utilization.unwrap_or_default(),
            set.sigmoid_speed.unwrap_or_default(),
            set.growth_speed.unwrap_or_default(),
            set.max_rate.unwrap_or_default(),
        )
    }
}

/// `accumulatorAccruals` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccumulatorAccrual {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: u64,
}

/// `earningsAccumulatorSmoothFactorSets` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmoothFactorSet {
    #[serde(deserialize_with = "deserialize_bigint")]
    pub earnings_accumulator_smooth_factor: U256,
}

/// Builds the accumulator settings from the latest accrual and smooth factor.
pub fn accumulator_state(
    accrual: Option<AccumulatorAccrual>,
    smooth_factor: Option<SmoothFactorSet>,
) -> AccumulatorState {
    AccumulatorState {
        accumulator_accrual: accrual.map(|a| a.timestamp).unwrap_or_default(),
        smooth_factor: smooth_factor
            .map(|s| s.earnings_accumulator_smooth_factor)
            .unwrap_or_default(),
    }
}

/// `treasurySets` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasurySet {
    #[serde(deserialize_with = "deserialize_bigint")]
    pub treasury_fee_rate: U256,
}

/// `fixedEarningsUpdates` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedEarningsUpdate {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: u64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub maturity: u64,
    #[serde(deserialize_with = "deserialize_bigint")]
    pub unassigned_earnings: U256,
}

impl From<FixedEarningsUpdate> for FixedPool {
    fn from(update: FixedEarningsUpdate) -> Self {
        FixedPool {
            timestamp: update.timestamp,
            maturity: update.maturity,
            unassigned_earnings: update.unassigned_earnings,
        }
    }
}

/// `depositAtMaturities` / `borrowAtMaturities` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MaturityEvent {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: u64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub maturity: u64,
    #[serde(deserialize_with = "deserialize_bigint")]
    pub assets: U256,
    #[serde(deserialize_with = "deserialize_bigint")]
    pub fee: U256,
}

impl From<MaturityEvent> for MaturityOperation {
    fn from(event: MaturityEvent) -> Self {
        MaturityOperation {
            timestamp: event.timestamp,
            maturity: event.maturity,
            assets: event.assets,
            fee: event.fee,
        }
    }
}
