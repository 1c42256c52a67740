//! WAD fixed-point helpers.
//!
//! Every on-chain quantity handled by this crate is an unsigned integer scaled by
//! [`WAD`] (10^18). Multiplications and divisions go through the helpers in this
//! module so that the rounding direction is always explicit, mirroring the
//! protocol's own `FixedPointMathLib` usage.
//!
//! Logarithms and exponentials work on signed `i128` values at WAD scale, which
//! comfortably covers every argument the interest rate curves produce.

use alloy_primitives::U256;

use crate::error::SimError;

/// 1.0 in fixed-point (10^18).
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// [`WAD`] as a signed integer.
pub const WAD_I128: i128 = 1_000_000_000_000_000_000;

/// Seconds in a 365 day year, the protocol's annualization base.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Distance between two consecutive fixed pool maturities (4 weeks).
pub const FIXED_INTERVAL: u64 = 86_400 * 7 * 4;

/// ln(2) scaled by WAD
pub const LN_2_INT: i128 = 693_147_180_559_945_309;

/// ln(1e-18) scaled by WAD (negative)
pub const LN_WEI_INT: i128 = -41_446_531_673_892_822_312;

/// Upper bound for [`exp_wad`] to avoid overflow
pub const EXP_UPPER_BOUND: i128 = 93_859_467_695_000_404_319;

/// `exp_wad(EXP_UPPER_BOUND - 1)`, returned for every exponent at or above the bound
pub const EXP_UPPER_VALUE: U256 = U256::from_limbs([0, 0, 0x392E_E8E9_21C9_1280, 9]);

/// `x * y / d` rounded down. `d` must be non-zero.
pub fn mul_div_down(x: U256, y: U256, d: U256) -> U256 {
    x * y / d
}

/// `x * y / d` rounded up. `d` must be non-zero.
pub fn mul_div_up(x: U256, y: U256, d: U256) -> U256 {
    (x * y + (d - U256::from(1))) / d
}

/// `x * y / WAD` rounded down.
pub fn w_mul_down(x: U256, y: U256) -> U256 {
    mul_div_down(x, y, WAD)
}

/// `x * y / WAD` rounded up.
pub fn w_mul_up(x: U256, y: U256) -> U256 {
    mul_div_up(x, y, WAD)
}

/// `x * WAD / y` rounded down. `y` must be non-zero.
pub fn w_div_down(x: U256, y: U256) -> U256 {
    mul_div_down(x, WAD, y)
}

/// `max(x - y, 0)`
pub fn zero_floor_sub(x: U256, y: U256) -> U256 {
    x.saturating_sub(y)
}

pub fn min(a: U256, b: U256) -> U256 {
    if a < b {
        a
    } else {
        b
    }
}

pub fn max(a: U256, b: U256) -> U256 {
    if a > b {
        a
    } else {
        b
    }
}

/// Adds a signed WAD value to an unsigned one, flooring the result at zero.
pub fn add_signed(x: U256, delta: i128) -> U256 {
    let magnitude = U256::from(delta.unsigned_abs());
    if delta >= 0 {
        x + magnitude
    } else {
        x.saturating_sub(magnitude)
    }
}

/// Converts a WAD-scaled unsigned value to a signed one, saturating at `i128::MAX`.
pub fn to_signed(x: U256) -> i128 {
    x.saturating_to::<i128>()
}

/// Natural logarithm of a WAD-scaled value, returned at WAD scale.
///
/// The argument is normalized to `y * 2^k` with `y` in `[1, 2)`, then
/// `ln(y) = 2 * atanh((y - 1) / (y + 1))` is summed until the series term
/// vanishes. The atanh argument stays below 1/3 so the series converges by at
/// least a factor of 9 per term. The series runs at 36 decimals and is
/// rounded back to WAD scale once.
pub fn ln_wad(x: U256) -> Result<i128, SimError> {
    if x.is_zero() {
        return Err(SimError::LogOfZero);
    }

    let shift = x.bit_len() as i128 - WAD.bit_len() as i128;
    let mut k = shift;
    let mut y = if shift >= 0 {
        x >> (shift as usize)
    } else {
        x << ((-shift) as usize)
    };

    let two_wad = WAD << 1;
    while y < WAD {
        y <<= 1;
        k -= 1;
    }
    while y >= two_wad {
        y >>= 1;
        k += 1;
    }

    let precision = WAD * WAD;
    let z = (y - WAD) * precision / (y + WAD);
    let z_squared = z * z / precision;

    let mut sum = U256::ZERO;
    let mut term = z;
    let mut n = 1u64;
    while !term.is_zero() {
        sum += term / U256::from(n);
        term = term * z_squared / precision;
        n += 2;
    }
    let series: U256 = ((sum << 1) + (WAD >> 1)) / WAD;

    Ok(k * LN_2_INT + series.saturating_to::<i128>())
}

/// `e^x` for a WAD-scaled signed exponent.
///
/// Uses the decomposition `e^x = 2^q * e^r` where `x = q * ln(2) + r` and
/// `|r| <= ln(2) / 2`, evaluating `e^r` with its Taylor series.
pub fn exp_wad(x: i128) -> U256 {
    // exp(x) < 1e-18 rounds to zero
    if x < LN_WEI_INT {
        return U256::ZERO;
    }

    if x >= EXP_UPPER_BOUND {
        return EXP_UPPER_VALUE;
    }

    let rounding_adjustment = if x < 0 { -(LN_2_INT / 2) } else { LN_2_INT / 2 };
    let q = (x + rounding_adjustment) / LN_2_INT;
    let r = x - q * LN_2_INT;

    let mut exp_r = WAD_I128;
    let mut term = WAD_I128;
    let mut n = 1i128;
    while term != 0 {
        term = term * r / WAD_I128 / n;
        exp_r += term;
        n += 1;
    }

    let exp_r = U256::from(exp_r.unsigned_abs());
    if q >= 0 {
        exp_r << (q as usize)
    } else {
        exp_r >> ((-q) as usize)
    }
}

/// Converts a WAD-scaled value to `f64`.
pub fn wad_to_f64(x: U256) -> f64 {
    let integer = (x / WAD).saturating_to::<u128>() as f64;
    let fraction = (x % WAD).saturating_to::<u64>() as f64 / 1e18;
    integer + fraction
}

/// Converts a signed WAD-scaled value to `f64`.
pub fn signed_wad_to_f64(x: i128) -> f64 {
    let integer = (x / WAD_I128) as f64;
    let fraction = (x % WAD_I128) as f64 / 1e18;
    integer + fraction
}
