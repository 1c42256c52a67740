//! Command implementations.

pub mod apy;
pub mod fixed;
pub mod history;

use anyhow::{anyhow, Result};
use exa_rates_api::ClientConfig;

pub use apy::run_apy;
pub use fixed::run_fixed;
pub use history::run_history;

/// Build the client configuration from the global flags.
pub fn client_config(
    api_url: Option<&str>,
    timeout: Option<u64>,
    min_apr: f64,
) -> Result<ClientConfig> {
    let url = api_url
        .ok_or_else(|| anyhow!("No indexer endpoint: pass --api-url or set EXA_INDEXER_URL"))?;
    let config = ClientConfig::new(url.parse()?).with_min_apr(min_apr);
    if let Some(secs) = timeout {
        Ok(config.with_request_timeout_secs(secs))
    } else {
        Ok(config)
    }
}
