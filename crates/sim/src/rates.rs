//! Share-price growth and annualization.
//!
//! A floating pool's rate over a window is read off its share price: the value
//! of one share at the end of the window divided by its value at the start.
//! Both share values are WAD-scaled integers; floating point only appears in
//! [`annualize`], once the growth ratio is final.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;

use crate::error::SimError;
use crate::market::MarketSnapshot;
use crate::math::{signed_wad_to_f64, w_div_down, SECONDS_PER_YEAR, WAD};

/// Rates below this value are displayed as [`NOT_AVAILABLE`].
pub const MIN_APR_VALUE: f64 = 0.0001;

/// Display value for rates too small to be meaningful.
pub const NOT_AVAILABLE: &str = "N/A";

/// Side of the floating pool a rate is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateType {
    /// Share price of floating deposits
    #[default]
    Deposit,
    /// Share price of floating borrows
    Borrow,
}

impl fmt::Display for RateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateType::Deposit => write!(f, "deposit"),
            RateType::Borrow => write!(f, "borrow"),
        }
    }
}

impl FromStr for RateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deposit" | "supply" => Ok(RateType::Deposit),
            "borrow" => Ok(RateType::Borrow),
            _ => Err(format!("Unknown rate type: {}", s)),
        }
    }
}

/// Annualized rate over a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnualizedRate {
    /// Simple annualization: `(growth - 1) * periods`
    pub apr: f64,
    /// Compounded annualization: `growth ^ periods - 1`
    pub apy: f64,
}

/// Value of one share (WAD); 1.0 when no shares are outstanding.
pub fn share_value(shares: U256, assets: U256) -> U256 {
    if shares.is_zero() {
        return WAD;
    }
    w_div_down(assets, shares)
}

/// Share price growth between two states (WAD).
///
/// A pool without shares (or without assets) at the start bootstraps its
/// share price to 1.0.
pub fn share_growth(
    initial_shares: U256,
    initial_assets: U256,
    final_shares: U256,
    final_assets: U256,
) -> U256 {
    let mut denominator = share_value(initial_shares, initial_assets);
    if denominator.is_zero() {
        denominator = WAD;
    }
    w_div_down(share_value(final_shares, final_assets), denominator)
}

/// Annualizes a WAD growth ratio observed over `[start, end]`.
pub fn annualize(growth: U256, start: u64, end: u64) -> Result<AnnualizedRate, SimError> {
    if end <= start {
        return Err(SimError::InvalidInterval { start, end });
    }

    let periods = SECONDS_PER_YEAR as f64 / (end - start) as f64;
    let change = if growth >= WAD {
        signed_wad_to_f64((growth - WAD).saturating_to::<i128>())
    } else {
        -signed_wad_to_f64((WAD - growth).saturating_to::<i128>())
    };

    let apr = change * periods;
    let apy = if change <= -1.0 {
        -1.0
    } else {
        (periods * change.ln_1p()).exp_m1()
    };

    Ok(AnnualizedRate { apr, apy })
}

/// Rate of `rate_type` shares between two snapshots.
///
/// The initial snapshot is valued at `start` and the final one at `end`, each
/// accrued with [`MarketSnapshot::share_value`].
pub fn window_rate(
    initial: &MarketSnapshot,
    last: &MarketSnapshot,
    rate_type: RateType,
    start: u64,
    end: u64,
    max_future_pools: u8,
) -> Result<AnnualizedRate, SimError> {
    let initial_assets = initial.assets(rate_type, start, max_future_pools)?;
    let final_assets = last.assets(rate_type, end, max_future_pools)?;
    let growth = share_growth(
        initial.shares(rate_type),
        initial_assets,
        last.shares(rate_type),
        final_assets,
    );
    annualize(growth, start, end)
}

/// Formats a rate as a two-decimal percentage, or [`NOT_AVAILABLE`] when it
/// is below `min_apr` (or not finite).
pub fn format_rate(rate: f64, min_apr: f64) -> String {
    if !rate.is_finite() || rate < min_apr {
        return NOT_AVAILABLE.to_string();
    }
    format!("{:.2}%", rate * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{FloatingDebtState, MarketState};

    fn wad(n: u64) -> U256 {
        U256::from(n) * WAD
    }

    #[test]
    fn test_share_value_without_shares() {
        assert_eq!(share_value(U256::ZERO, wad(100)), WAD);
        assert_eq!(share_value(wad(100), wad(150)), wad(3) / U256::from(2));
    }

    #[test]
    fn test_share_growth_bootstraps_empty_pool() {
        // no shares at the start: denominator is exactly 1.0
        let growth = share_growth(U256::ZERO, U256::ZERO, wad(100), wad(101));
        assert_eq!(growth, U256::from(1_010_000_000_000_000_000u64));

        // shares without assets must not divide by zero either
        let growth = share_growth(wad(100), U256::ZERO, wad(100), wad(100));
        assert_eq!(growth, WAD);
    }

    #[test]
    fn test_annualize_no_growth() {
        let rate = annualize(WAD, 0, 86_400).unwrap();
        assert_eq!(rate.apr, 0.0);
        assert_eq!(rate.apy, 0.0);
    }

    #[test]
    fn test_annualize_positive_growth() {
        let growth = U256::from(1_010_000_000_000_000_000u64);
        let rate = annualize(growth, 0, 3_600).unwrap();

        let periods = 31_536_000.0 / 3_600.0;
        assert!((rate.apr - 0.01 * periods).abs() < 1e-9);
        assert!((rate.apy - (1.01f64.powf(periods) - 1.0)).abs() / rate.apy < 1e-9);
    }

    #[test]
    fn test_annualize_negative_growth() {
        let growth = U256::from(999_000_000_000_000_000u64);
        let rate = annualize(growth, 0, 31_536_000).unwrap();
        assert!((rate.apr + 0.001).abs() < 1e-12);
        assert!((rate.apy + 0.001).abs() < 1e-12);

        let wiped = annualize(U256::ZERO, 0, 86_400).unwrap();
        assert_eq!(wiped.apy, -1.0);
    }

    #[test]
    fn test_annualize_invalid_window() {
        assert_eq!(
            annualize(WAD, 100, 100),
            Err(SimError::InvalidInterval { start: 100, end: 100 })
        );
        assert!(annualize(WAD, 200, 100).is_err());
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.0523, MIN_APR_VALUE), "5.23%");
        assert_eq!(format_rate(87.6, MIN_APR_VALUE), "8760.00%");
        assert_eq!(format_rate(0.000_05, MIN_APR_VALUE), NOT_AVAILABLE);
        assert_eq!(format_rate(-0.2, MIN_APR_VALUE), NOT_AVAILABLE);
        assert_eq!(format_rate(f64::NAN, MIN_APR_VALUE), NOT_AVAILABLE);
    }

    #[test]
    fn test_rate_type_parse() {
        assert_eq!("deposit".parse::<RateType>().unwrap(), RateType::Deposit);
        assert_eq!("BORROW".parse::<RateType>().unwrap(), RateType::Borrow);
        assert!("lend".parse::<RateType>().is_err());
        assert_eq!(RateType::Borrow.to_string(), "borrow");
    }

    fn snapshot(timestamp: u64, floating_assets: U256) -> MarketSnapshot {
        MarketSnapshot {
            timestamp,
            market: MarketState {
                timestamp,
                floating_deposit_shares: wad(1_000),
                floating_assets,
                floating_borrow_shares: wad(500),
                floating_debt: wad(500),
                ..Default::default()
            },
            floating_debt: FloatingDebtState {
                timestamp,
                utilization: WAD / U256::from(2),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_window_rate_identical_snapshots_is_zero() {
        let initial = snapshot(0, wad(1_000));
        let rate = window_rate(&initial, &initial, RateType::Deposit, 0, 86_400, 3).unwrap();
        assert_eq!(rate.apr, 0.0);
        assert_eq!(rate.apy, 0.0);
    }

    #[test]
    fn test_window_rate_one_percent_in_an_hour() {
        let start = 1_700_000_000;
        let end = start + 3_600;
        let initial = snapshot(start, wad(1_000));
        let last = snapshot(end, wad(1_010));

        let rate = window_rate(&initial, &last, RateType::Deposit, start, end, 3).unwrap();

        // (1010 / 1000 - 1) * 31536000 / 3600
        let expected_apr = (1_010.0 / 1_000.0 - 1.0) * (31_536_000.0 / 3_600.0);
        assert!((rate.apr - expected_apr).abs() < 1e-9);
        assert!(rate.apr.is_finite() && rate.apr > 0.0);
        assert!(rate.apy > rate.apr);
    }

    #[test]
    fn test_window_rate_borrow_side_accrues() {
        let start = 1_700_000_000;
        let end = start + 86_400;
        let mut initial = snapshot(start, wad(1_000));
        initial.interest_rate_model =
            crate::irm::InterestRateModel::Legacy(crate::irm::CurveParameters {
                curve_a: U256::from(37_200_000_000_000_000u64),
                curve_b: 0,
                max_utilization: U256::from(1_100_000_000_000_000_000u64),
            });

        // final snapshot still carries the start's debt update
        let last = initial.clone();
        let rate = window_rate(&initial, &last, RateType::Borrow, start, end, 3).unwrap();

        let expected = 0.0372 / (1.1 - 0.5);
        assert!((rate.apr - expected).abs() < 1e-6);
    }
}
