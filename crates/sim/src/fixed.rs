//! Fixed-rate pool yields.
//!
//! A fixed deposit (or borrow) at a maturity locks a fee for the time left until
//! that maturity. The rate of a single operation is the fee over the principal,
//! annualized by the time to maturity; a pool's rate is the volume-weighted
//! average of its operations.

use std::collections::BTreeMap;

use alloy_primitives::U256;

use crate::math::{mul_div_down, w_div_down, wad_to_f64, SECONDS_PER_YEAR};

/// A deposit or borrow at a fixed maturity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaturityOperation {
    pub timestamp: u64,
    pub maturity: u64,
    /// Principal
    pub assets: U256,
    /// Fee earned (deposit) or paid (borrow)
    pub fee: U256,
}

impl MaturityOperation {
    /// Annualized rate of the operation (WAD), `None` for empty or matured operations.
    pub fn rate(&self) -> Option<U256> {
        if self.assets.is_zero() || self.maturity <= self.timestamp {
            return None;
        }

        let fee_rate = w_div_down(self.fee, self.assets);
        Some(mul_div_down(
            fee_rate,
            U256::from(SECONDS_PER_YEAR),
            U256::from(self.maturity - self.timestamp),
        ))
    }

    pub fn apr(&self) -> Option<f64> {
        self.rate().map(wad_to_f64)
    }
}

/// Volume-weighted rate of one maturity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaturityRate {
    pub maturity: u64,
    pub apr: f64,
    /// Principal of the operations contributing to the rate
    pub volume: U256,
}

/// Weighted sum of rates and the volume behind it.
#[derive(Default)]
struct Weighted {
    rate_volume: U256,
    volume: U256,
}

impl Weighted {
    fn add(&mut self, operation: &MaturityOperation) {
        if let Some(rate) = operation.rate() {
            self.rate_volume += rate * operation.assets;
            self.volume += operation.assets;
        }
    }

    fn average(&self) -> Option<U256> {
        if self.volume.is_zero() {
            return None;
        }
        Some(self.rate_volume / self.volume)
    }
}

/// Volume-weighted APR per maturity, in ascending maturity order.
///
/// Maturities where no operation carries a rate are left out.
pub fn maturity_rates(operations: &[MaturityOperation]) -> Vec<MaturityRate> {
    let mut pools: BTreeMap<u64, Weighted> = BTreeMap::new();
    for operation in operations {
        pools.entry(operation.maturity).or_default().add(operation);
    }

    pools
        .into_iter()
        .filter_map(|(maturity, weighted)| {
            weighted.average().map(|rate| MaturityRate {
                maturity,
                apr: wad_to_f64(rate),
                volume: weighted.volume,
            })
        })
        .collect()
}

/// Volume-weighted APR across every operation, regardless of maturity.
pub fn average_apr(operations: &[MaturityOperation]) -> Option<f64> {
    let mut weighted = Weighted::default();
    for operation in operations {
        weighted.add(operation);
    }
    weighted.average().map(wad_to_f64)
}
