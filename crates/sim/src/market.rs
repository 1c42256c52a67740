//! Floating pool accrual replication.
//!
//! The protocol only writes `floatingAssets` and `floatingDebt` to storage when a
//! transaction touches the market. Between transactions a market keeps earning:
//! borrowers accrue interest, fixed pools release their unassigned earnings and
//! the earnings accumulator drips into the pool. This module replays those
//! interim accruals off-chain so that a snapshot read from the indexer can be
//! valued at any later timestamp, matching what a transaction mined at that
//! timestamp would realize.
//!
//! # Key Operations
//!
//! - [`total_floating_borrow_assets`] - floating debt including unaccrued interest
//! - [`total_assets`] - assets backing floating deposit shares
//! - [`MarketSnapshot`] - bundles every input of both functions for one point in time
//!
//! # Example
//!
//! ```rust
//! use exa_rates_sim::{MarketSnapshot, MarketState, RateType, WAD};
//! use alloy_primitives::U256;
//!
//! let snapshot = MarketSnapshot {
//!     timestamp: 1_700_000_000,
//!     market: MarketState {
//!         floating_deposit_shares: U256::from(1_000) * WAD,
//!         floating_assets: U256::from(1_000) * WAD,
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//!
//! let assets = snapshot.total_assets(1_700_000_000, 3).unwrap();
//! assert_eq!(assets, U256::from(1_000) * WAD);
//! assert_eq!(snapshot.share_value(RateType::Deposit, 1_700_000_000, 3).unwrap(), WAD);
//! ```

use alloy_primitives::U256;

use crate::error::SimError;
use crate::irm::InterestRateModel;
use crate::math::{
    mul_div_down, mul_div_up, w_div_down, w_mul_down, zero_floor_sub, FIXED_INTERVAL,
    SECONDS_PER_YEAR, WAD,
};
use crate::rates::{share_value, RateType};

/// Floating pool state as written by the last market update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarketState {
    /// Timestamp of the update that produced this state
    pub timestamp: u64,
    pub floating_deposit_shares: U256,
    pub floating_assets: U256,
    pub floating_borrow_shares: U256,
    pub floating_debt: U256,
    pub earnings_accumulator: U256,
    /// Fixed pool borrows backed by floating liquidity (zero when not indexed)
    pub floating_backup_borrowed: U256,
}

impl MarketState {
    /// Floating utilization (WAD-scaled)
    ///
    /// Utilization = floatingDebt / floatingAssets
    pub fn utilization(&self) -> U256 {
        floating_utilization(self.floating_assets, self.floating_debt)
    }

    /// Global utilization (WAD-scaled), counting backup borrows as debt
    pub fn global_utilization(&self) -> U256 {
        global_utilization(
            self.floating_assets,
            self.floating_debt,
            self.floating_backup_borrowed,
        )
    }
}

/// Utilization recorded at the last floating debt update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloatingDebtState {
    pub timestamp: u64,
    pub utilization: U256,
}

/// Unassigned earnings of one fixed-rate maturity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedPool {
    /// Last accrual of the pool
    pub timestamp: u64,
    pub maturity: u64,
    pub unassigned_earnings: U256,
}

impl FixedPool {
    /// Earnings released to the floating pool between the pool's last accrual and `timestamp`.
    ///
    /// Earnings vest linearly until maturity. Once `timestamp` reaches the
    /// maturity the whole unassigned amount counts as realized.
    pub fn earnings_at(&self, timestamp: u64) -> U256 {
        if timestamp >= self.maturity {
            return self.unassigned_earnings;
        }

        let elapsed = timestamp.saturating_sub(self.timestamp);
        let remaining = self.maturity - self.timestamp.min(timestamp);
        mul_div_down(
            self.unassigned_earnings,
            U256::from(elapsed),
            U256::from(remaining),
        )
    }
}

/// Earnings accumulator distribution settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccumulatorState {
    /// Timestamp of the last accumulator accrual
    pub accumulator_accrual: u64,
    /// Smoothing factor (WAD)
    pub smooth_factor: U256,
}

impl AccumulatorState {
    /// Portion of `earnings_accumulator` distributed by `timestamp`.
    ///
    /// `accumulator * elapsed / (elapsed + smooth_factor * max_future_pools * FIXED_INTERVAL)`
    pub fn accrued_earnings(
        &self,
        earnings_accumulator: U256,
        timestamp: u64,
        max_future_pools: u8,
    ) -> U256 {
        let elapsed = U256::from(timestamp.saturating_sub(self.accumulator_accrual));
        if elapsed.is_zero() {
            return U256::ZERO;
        }

        let horizon = U256::from(u64::from(max_future_pools) * FIXED_INTERVAL);
        let smoothing = w_mul_down(self.smooth_factor, horizon);
        mul_div_down(earnings_accumulator, elapsed, elapsed + smoothing)
    }
}

/// Everything indexed about a market at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarketSnapshot {
    /// Timestamp the snapshot was taken at
    pub timestamp: u64,
    pub market: MarketState,
    pub floating_debt: FloatingDebtState,
    pub interest_rate_model: InterestRateModel,
    pub accumulator: AccumulatorState,
    /// Treasury fee rate (WAD)
    pub treasury_fee_rate: U256,
    pub fixed_pools: Vec<FixedPool>,
}

impl MarketSnapshot {
    /// See [`total_floating_borrow_assets`].
    pub fn total_floating_borrow_assets(&self, timestamp: u64) -> Result<U256, SimError> {
        total_floating_borrow_assets(
            timestamp,
            &self.market,
            &self.floating_debt,
            &self.interest_rate_model,
        )
    }

    /// See [`total_assets`].
    pub fn total_assets(&self, timestamp: u64, max_future_pools: u8) -> Result<U256, SimError> {
        total_assets(
            timestamp,
            &self.market,
            &self.accumulator,
            &self.fixed_pools,
            &self.floating_debt,
            &self.interest_rate_model,
            self.treasury_fee_rate,
            max_future_pools,
        )
    }

    /// Shares outstanding on the given side of the floating pool.
    pub fn shares(&self, rate_type: RateType) -> U256 {
        match rate_type {
            RateType::Deposit => self.market.floating_deposit_shares,
            RateType::Borrow => self.market.floating_borrow_shares,
        }
    }

    /// Assets backing the given side's shares, accrued to `timestamp`.
    pub fn assets(
        &self,
        rate_type: RateType,
        timestamp: u64,
        max_future_pools: u8,
    ) -> Result<U256, SimError> {
        match rate_type {
            RateType::Deposit => self.total_assets(timestamp, max_future_pools),
            RateType::Borrow => self.total_floating_borrow_assets(timestamp),
        }
    }

    /// Value of one share (WAD) at `timestamp`; 1.0 when no shares exist.
    pub fn share_value(
        &self,
        rate_type: RateType,
        timestamp: u64,
        max_future_pools: u8,
    ) -> Result<U256, SimError> {
        let assets = self.assets(rate_type, timestamp, max_future_pools)?;
        Ok(share_value(self.shares(rate_type), assets))
    }
}

/// Floating utilization: `debt / assets`, zero for an empty pool.
pub fn floating_utilization(floating_assets: U256, floating_debt: U256) -> U256 {
    if floating_assets.is_zero() {
        return U256::ZERO;
    }
    w_div_down(floating_debt, floating_assets)
}

/// Global utilization: `(debt + backup borrowed) / assets`, rounded up.
pub fn global_utilization(
    floating_assets: U256,
    floating_debt: U256,
    floating_backup_borrowed: U256,
) -> U256 {
    if floating_assets.is_zero() {
        return U256::ZERO;
    }
    mul_div_up(floating_debt + floating_backup_borrowed, WAD, floating_assets)
}

/// Floating debt plus the interest accrued since the last debt update.
///
/// The rate is evaluated once for the whole period (the curve average between
/// the recorded and the current utilization) and applied linearly:
///
/// ```text
/// debt + debt * (rate * elapsed / SECONDS_PER_YEAR)
/// ```
pub fn total_floating_borrow_assets(
    timestamp: u64,
    market: &MarketState,
    floating_debt: &FloatingDebtState,
    interest_rate_model: &InterestRateModel,
) -> Result<U256, SimError> {
    let elapsed = timestamp.saturating_sub(floating_debt.timestamp);
    if elapsed == 0 || market.floating_debt.is_zero() {
        return Ok(market.floating_debt);
    }

    let rate = interest_rate_model.floating_rate(
        floating_debt.utilization,
        market.utilization(),
        market.global_utilization(),
    )?;

    let period_rate = mul_div_down(rate, U256::from(elapsed), U256::from(SECONDS_PER_YEAR));
    Ok(market.floating_debt + w_mul_down(market.floating_debt, period_rate))
}

/// Assets backing the floating deposit shares at `timestamp`.
///
/// Sum of:
/// - the stored `floating_assets`
/// - fixed pool earnings released since each pool's last accrual
/// - the distributed part of the earnings accumulator
/// - unaccrued floating borrow interest, net of the treasury fee
#[expect(clippy::too_many_arguments)]
pub fn total_assets(
    timestamp: u64,
    market: &MarketState,
    accumulator: &AccumulatorState,
    fixed_pools: &[FixedPool],
    floating_debt: &FloatingDebtState,
    interest_rate_model: &InterestRateModel,
    treasury_fee_rate: U256,
    max_future_pools: u8,
) -> Result<U256, SimError> {
    let fixed_earnings = fixed_pools
        .iter()
        .fold(U256::ZERO, |acc, pool| acc + pool.earnings_at(timestamp));

    let accumulated = accumulator.accrued_earnings(
        market.earnings_accumulator,
        timestamp,
        max_future_pools,
    );

    let borrow_assets =
        total_floating_borrow_assets(timestamp, market, floating_debt, interest_rate_model)?;
    let interest = zero_floor_sub(borrow_assets, market.floating_debt);
    let depositor_share = zero_floor_sub(WAD, treasury_fee_rate);
    let depositor_interest = w_mul_down(interest, depositor_share);

    Ok(market.floating_assets + fixed_earnings + accumulated + depositor_interest)
}
