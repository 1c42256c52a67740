//! Exa Rates CLI - Query floating and fixed lending pool rates.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{client_config, run_apy, run_fixed, run_history};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = client_config(cli.api_url.as_deref(), cli.timeout, cli.min_apr)?;

    match cli.command {
        Commands::History(args) => {
            run_history(&args, cli.format, config).await?;
        }
        Commands::Apy(args) => {
            run_apy(&args, cli.format, config).await?;
        }
        Commands::Fixed(args) => {
            run_fixed(&args, cli.format, config).await?;
        }
    }

    Ok(())
}
