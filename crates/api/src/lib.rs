//! Floating and Fixed Rate API Library
//!
//! This crate fetches a lending market's indexed state from a GraphQL indexer
//! and turns it into annualized rates, using `exa-rates-sim` to replay the
//! accrual between indexed events.
//!
//! # Example
//!
//! ```no_run
//! use exa_rates_api::{parse_market, IndexerClient, RateClient, RateQueryOptions};
//! use exa_rates_sim::{format_rate, RateType, MIN_APR_VALUE};
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), exa_rates_api::ApiError> {
//!     let url = Url::parse("http://localhost:8000/subgraphs/name/exactly").unwrap();
//!     let client = RateClient::new(IndexerClient::new(url));
//!     let market = parse_market("0xc4d4500326981eacd020e20a81b1c479c161c7ef")?;
//!
//!     // Daily deposit rates over the last week
//!     let options = RateQueryOptions::new().with_count(7);
//!     for point in client.query_rate(&market, RateType::Deposit, &options).await? {
//!         println!("{}: {}", point.date, format_rate(point.apy, MIN_APR_VALUE));
//!     }
//!
//!     // Borrow rate over the last hour, accrued up to now
//!     let current = client.floating_rate(&market, RateType::Borrow, 3_600).await?;
//!     println!("borrow APY: {}", format_rate(current.apy, MIN_APR_VALUE));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! All errors are unified through [`ApiError`], which wraps transport, GraphQL
//! and simulation failures. Use [`ApiError::is_retryable()`] to decide whether
//! polling again may help; the client never retries on its own.

pub mod client;
pub mod error;
pub mod queries;
pub mod rates;
pub mod types;

// Re-export main types at crate root
pub use client::{parse_market, ClientConfig, IndexerClient, DEFAULT_MAX_FUTURE_POOLS};
pub use error::{ApiError, Result};
pub use queries::{MaturityQuery, QueryRequest, SnapshotQuery};
pub use rates::{
    query_rate, unix_now, FixedRates, RateClient, RatePoint, RateQueryOptions, DEFAULT_INTERVAL,
};
