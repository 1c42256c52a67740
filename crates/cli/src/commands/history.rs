//! Floating rate history command.

use anyhow::Result;
use exa_rates_api::{parse_market, ClientConfig, IndexerClient, RateClient, RateQueryOptions};
use exa_rates_sim::RateType;
use tracing::info;

use crate::cli::{HistoryArgs, OutputFormat};
use crate::output::format_history_table;

pub async fn run_history(
    args: &HistoryArgs,
    format: OutputFormat,
    config: ClientConfig,
) -> Result<()> {
    let market = parse_market(&args.market)?;
    let rate_type = RateType::from(args.rate_type);
    let min_apr = config.min_apr;

    let client = RateClient::new(IndexerClient::with_config(
        config.with_max_future_pools(args.max_future_pools),
    )?);

    let mut options = RateQueryOptions::new()
        .with_max_future_pools(args.max_future_pools)
        .with_round_ticks(!args.no_round)
        .with_interval(args.interval)
        .with_offset(args.offset)
        .with_count(args.count);
    if let Some(now) = args.now {
        options = options.with_now(now);
    }

    info!(%market, %rate_type, count = args.count, "querying rate history");
    let points = client.query_rate(&market, rate_type, &options).await?;

    match format {
        OutputFormat::Table => {
            println!("{}", format_history_table(&points, min_apr));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&points)?;
            println!("{}", json);
        }
    }

    Ok(())
}
