//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use exa_rates_api::{DEFAULT_INTERVAL, DEFAULT_MAX_FUTURE_POOLS};
use exa_rates_sim::{RateType, MIN_APR_VALUE};

/// Exa Rates CLI - Floating and fixed pool rates from indexed market state
#[derive(Parser, Debug)]
#[command(name = "exa-rates")]
#[command(about = "CLI tool for querying lending pool rates", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// GraphQL endpoint of the market indexer
    #[arg(long, global = true, env = "EXA_INDEXER_URL")]
    pub api_url: Option<String>,

    /// Rates below this fraction are shown as N/A
    #[arg(long, global = true, default_value_t = MIN_APR_VALUE)]
    pub min_apr: f64,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Floating rate time series for a market
    History(HistoryArgs),
    /// Current floating rate for one or more markets
    Apy(ApyArgs),
    /// Fixed rates per maturity from recent operations
    Fixed(FixedArgs),
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Market address
    pub market: String,

    /// Side of the pool
    #[arg(long = "type", default_value = "deposit")]
    pub rate_type: RateTypeArg,

    /// Seconds between points
    #[arg(long, default_value_t = DEFAULT_INTERVAL)]
    pub interval: u64,

    /// Number of points
    #[arg(short = 'n', long, default_value_t = 7)]
    pub count: u32,

    /// Seconds to shift the series back from now
    #[arg(long, default_value_t = 0)]
    pub offset: u64,

    /// Do not align points to multiples of the interval
    #[arg(long)]
    pub no_round: bool,

    /// Future fixed pools the market keeps open
    #[arg(long, default_value_t = DEFAULT_MAX_FUTURE_POOLS)]
    pub max_future_pools: u8,

    /// Evaluate as of this unix timestamp instead of now
    #[arg(long)]
    pub now: Option<u64>,
}

#[derive(Args, Debug)]
pub struct ApyArgs {
    /// Market addresses
    #[arg(required = true)]
    pub markets: Vec<String>,

    /// Side of the pool
    #[arg(long = "type", default_value = "deposit")]
    pub rate_type: RateTypeArg,

    /// Trailing window in seconds
    #[arg(long, default_value_t = 3_600)]
    pub window: u64,

    /// Future fixed pools the market keeps open
    #[arg(long, default_value_t = DEFAULT_MAX_FUTURE_POOLS)]
    pub max_future_pools: u8,

    /// Evaluate as of this unix timestamp instead of now
    #[arg(long)]
    pub now: Option<u64>,
}

#[derive(Args, Debug)]
pub struct FixedArgs {
    /// Market address
    pub market: String,

    /// Side of the pool
    #[arg(long = "type", default_value = "deposit")]
    pub rate_type: RateTypeArg,

    /// Only count operations at or after this unix timestamp
    /// (default: one fixed interval ago)
    #[arg(long)]
    pub since: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RateTypeArg {
    #[default]
    #[value(alias = "supply")]
    Deposit,
    Borrow,
}

impl From<RateTypeArg> for RateType {
    fn from(arg: RateTypeArg) -> Self {
        match arg {
            RateTypeArg::Deposit => RateType::Deposit,
            RateTypeArg::Borrow => RateType::Borrow,
        }
    }
}
