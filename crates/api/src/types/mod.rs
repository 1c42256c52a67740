//! Wire types for the indexer API.

pub mod entities;
pub mod scalars;

pub use entities::{
    accumulator_state, AccumulatorAccrual, FixedEarningsUpdate, FloatingDebtUpdate,
    InterestRateModelSet, MarketUpdate, MaturityEvent, SmoothFactorSet, TreasurySet,
};
