//! Floating Pool Rate Engine
//!
//! This crate replays a lending market's interim accrual off-chain and derives
//! floating and fixed rates from indexed state, entirely in WAD fixed-point
//! arithmetic.
//!
//! # Overview
//!
//! - Evaluate the legacy and sigmoid floating interest rate curves
//! - Accrue floating debt, fixed pool earnings and the earnings accumulator
//!   to any timestamp after a snapshot was indexed
//! - Turn the share price growth between two snapshots into an APR and APY
//! - Compute volume-weighted fixed rates per maturity
//!
//! # Example
//!
//! ```rust
//! use exa_rates_sim::{
//!     format_rate, window_rate, MarketSnapshot, MarketState, RateType, MIN_APR_VALUE, WAD,
//! };
//! use alloy_primitives::U256;
//!
//! let snapshot = |timestamp: u64, assets: u64| MarketSnapshot {
//!     timestamp,
//!     market: MarketState {
//!         floating_deposit_shares: U256::from(1_000) * WAD,
//!         floating_assets: U256::from(assets) * WAD,
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//!
//! let start = 1_700_000_000;
//! let end = start + 86_400;
//! let (initial, last) = (snapshot(start, 1_000), snapshot(end, 1_001));
//! let rate = window_rate(&initial, &last, RateType::Deposit, start, end, 3).unwrap();
//!
//! assert_eq!(format_rate(rate.apr, MIN_APR_VALUE), "36.50%");
//! ```

pub mod error;
pub mod fixed;
pub mod irm;
pub mod market;
pub mod math;
pub mod rates;

// Re-export commonly used types
pub use error::SimError;

// Math exports
pub use math::{FIXED_INTERVAL, SECONDS_PER_YEAR, WAD};

// IRM exports
pub use irm::{CurveParameters, InterestRateModel, SigmoidParameters, PRECISION_THRESHOLD};

// Market exports
pub use market::{
    floating_utilization, global_utilization, total_assets, total_floating_borrow_assets,
    AccumulatorState, FixedPool, FloatingDebtState, MarketSnapshot, MarketState,
};

// Rate exports
pub use rates::{
    annualize, format_rate, share_growth, share_value, window_rate, AnnualizedRate, RateType,
    MIN_APR_VALUE, NOT_AVAILABLE,
};

// Fixed pool exports
pub use fixed::{average_apr, maturity_rates, MaturityOperation, MaturityRate};
