//! Floating interest rate curves.
//!
//! Markets are priced by one of two curve families, selected per market:
//!
//! ## Legacy curve
//!
//! ```text
//! rate(u) = A / (U_max - u) + B
//! ```
//!
//! Debt accrues between two utilization readings (the one recorded at the last
//! debt update and the current one), so the rate applied is the time-average of
//! the curve over `[u0, u1]`:
//!
//! ```text
//! avg = A * ln((U_max - u0) / (U_max - u1)) / (u1 - u0) + B
//! ```
//!
//! When `u1 - u0` is below [`PRECISION_THRESHOLD`] the logarithm carries no
//! useful precision and the instantaneous rate at `u0` is used instead.
//!
//! ## Sigmoid curve
//!
//! The newer model keeps the legacy base rate but scales it by a factor driven
//! by the market's global utilization (floating debt plus backup borrows):
//!
//! ```text
//! sigmoid = 1 / (1 + e^(-speed_s * (ln(uG / (1 - uG)) - ln(uN / (1 - uN)))))
//! rate    = min(base * e^(-speed_g * ln(1 - sigmoid * uG)), max_rate)
//! ```
//!
//! A global utilization of 100% or more prices at `max_rate` directly.
//!
//! ## Utilization at the curve maximum
//!
//! The curve has a pole at `U_max`. Utilization readings at or above it are
//! clamped one wei below the pole, so the rate stays finite (and very large)
//! instead of dividing by zero.

use alloy_primitives::U256;

use crate::error::SimError;
use crate::math::{
    add_signed, exp_wad, ln_wad, max, min, mul_div_down, to_signed, w_div_down, w_mul_down,
    w_mul_up, zero_floor_sub, WAD, WAD_I128,
};

/// Minimum utilization delta for the logarithmic average (dust threshold).
pub const PRECISION_THRESHOLD: U256 = U256::from_limbs([2_500_000_000, 0, 0, 0]);

/// Parameters shared by both curve families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CurveParameters {
    /// Curve numerator `A` (WAD)
    pub curve_a: U256,
    /// Curve offset `B` (signed WAD)
    pub curve_b: i128,
    /// Utilization at which the curve diverges (WAD)
    pub max_utilization: U256,
}

/// Parameters of the sigmoid curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigmoidParameters {
    pub curve: CurveParameters,
    /// Global utilization at the sigmoid's midpoint (WAD)
    pub natural_utilization: U256,
    /// Steepness of the sigmoid (WAD)
    pub sigmoid_speed: U256,
    /// Growth exponent applied to the base rate (WAD)
    pub growth_speed: U256,
    /// Rate ceiling (WAD, annualized)
    pub max_rate: U256,
}

/// A market's interest rate model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestRateModel {
    Legacy(CurveParameters),
    Sigmoid(SigmoidParameters),
}

impl Default for InterestRateModel {
    fn default() -> Self {
        InterestRateModel::Legacy(CurveParameters::default())
    }
}

impl InterestRateModel {
    /// Builds the model from raw indexed parameters.
    ///
    /// Indexed models without a natural utilization are legacy curves; the
    /// sigmoid-only fields are ignored for them.
    pub fn from_parameters(
        curve: CurveParameters,
        natural_utilization: U256,
        sigmoid_speed: U256,
        growth_speed: U256,
        max_rate: U256,
    ) -> Self {
        if natural_utilization.is_zero() {
            InterestRateModel::Legacy(curve)
        } else {
            InterestRateModel::Sigmoid(SigmoidParameters {
                curve,
                natural_utilization,
                sigmoid_speed,
                growth_speed,
                max_rate,
            })
        }
    }

    pub fn curve(&self) -> &CurveParameters {
        match self {
            InterestRateModel::Legacy(curve) => curve,
            InterestRateModel::Sigmoid(params) => &params.curve,
        }
    }

    /// Annualized floating borrow rate (WAD) to apply over an accrual period.
    ///
    /// * `recorded_utilization` - utilization stored at the last debt update
    /// * `utilization` - current floating utilization
    /// * `global_utilization` - current global utilization, only read by the sigmoid curve
    pub fn floating_rate(
        &self,
        recorded_utilization: U256,
        utilization: U256,
        global_utilization: U256,
    ) -> Result<U256, SimError> {
        match self {
            InterestRateModel::Legacy(curve) => {
                legacy_rate(curve, recorded_utilization, utilization)
            }
            InterestRateModel::Sigmoid(params) => {
                sigmoid_rate(params, utilization, global_utilization)
            }
        }
    }
}

/// Distance from `utilization` to the curve's pole, never below one wei.
fn distance_to_max(curve: &CurveParameters, utilization: U256) -> U256 {
    max(zero_floor_sub(curve.max_utilization, utilization), U256::from(1))
}

/// Instantaneous legacy rate at `utilization`.
pub fn instant_rate(curve: &CurveParameters, utilization: U256) -> U256 {
    let alpha = distance_to_max(curve, utilization);
    add_signed(w_div_down(curve.curve_a, alpha), curve.curve_b)
}

/// Time-averaged legacy rate between two utilization readings.
pub fn legacy_rate(
    curve: &CurveParameters,
    utilization_before: U256,
    utilization_after: U256,
) -> Result<U256, SimError> {
    let u0 = min(utilization_before, utilization_after);
    let u1 = max(utilization_before, utilization_after);

    let alpha = distance_to_max(curve, u0);
    let beta = distance_to_max(curve, u1);
    let delta = alpha - beta;

    if delta < PRECISION_THRESHOLD {
        return Ok(add_signed(w_div_down(curve.curve_a, alpha), curve.curve_b));
    }

    let ln = ln_wad(w_div_down(alpha, beta))?;
    let average = mul_div_down(curve.curve_a, U256::from(ln.unsigned_abs()), delta);
    Ok(add_signed(average, curve.curve_b))
}

/// Sigmoid rate at the current floating and global utilizations.
pub fn sigmoid_rate(
    params: &SigmoidParameters,
    utilization: U256,
    global_utilization: U256,
) -> Result<U256, SimError> {
    if global_utilization >= WAD {
        return Ok(params.max_rate);
    }

    // floating utilization never exceeds global utilization on-chain
    let utilization = min(utilization, global_utilization);
    let base = instant_rate(&params.curve, utilization);
    if global_utilization.is_zero() {
        return Ok(min(base, params.max_rate));
    }

    let natural = min(params.natural_utilization, WAD - U256::from(1));
    let aux = ln_wad(w_div_down(natural, WAD - natural))?;
    let odds = ln_wad(w_div_down(global_utilization, WAD - global_utilization))?;

    let sigmoid_exponent = to_signed(params.sigmoid_speed).saturating_mul(aux - odds) / WAD_I128;
    let sigmoid = w_div_down(WAD, WAD + exp_wad(sigmoid_exponent));

    let remaining = max(WAD - w_mul_down(sigmoid, global_utilization), U256::from(1));
    let growth_exponent = -(to_signed(params.growth_speed).saturating_mul(ln_wad(remaining)?)
        / WAD_I128);

    let rate = w_mul_up(base, exp_wad(growth_exponent));
    Ok(min(rate, params.max_rate))
}
