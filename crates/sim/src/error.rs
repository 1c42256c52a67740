//! Error types for the rate engine.

use thiserror::Error;

/// Errors that can occur while replicating accrual or deriving rates
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Logarithm of zero requested
    #[error("Logarithm of zero is undefined")]
    LogOfZero,

    /// Rate window does not move forward in time
    #[error("Invalid rate window: end {end} is not after start {start}")]
    InvalidInterval { start: u64, end: u64 },
}
