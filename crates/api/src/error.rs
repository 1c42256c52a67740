//! Error types for the indexer client.

use exa_rates_sim::SimError;
use thiserror::Error;

/// Errors that can occur when fetching state or deriving rates.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL error: {0}")]
    GraphQL(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid address format.
    #[error("Invalid address format: {0}")]
    InvalidAddress(String),

    /// Requested time window is empty or starts before the epoch.
    #[error("Invalid time window: {reason}")]
    InvalidWindow { reason: String },

    /// Rate derivation failed.
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimError),
}

impl ApiError {
    /// Whether repeating the same request may succeed.
    ///
    /// Only transport failures qualify: connection errors, timeouts and 5xx
    /// responses. The client itself never retries; this is a hint for pollers.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Request(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status().is_some_and(|status| status.is_server_error())
            }
            _ => false,
        }
    }
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
