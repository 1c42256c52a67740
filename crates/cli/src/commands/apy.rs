//! Current floating rate command.

use anyhow::Result;
use exa_rates_api::{parse_market, unix_now, ClientConfig, IndexerClient, RateClient};
use exa_rates_sim::RateType;
use serde_json::json;

use crate::cli::{ApyArgs, OutputFormat};
use crate::output::{format_rate_detail, format_rates_table};

pub async fn run_apy(args: &ApyArgs, format: OutputFormat, config: ClientConfig) -> Result<()> {
    let markets = args
        .markets
        .iter()
        .map(|market| parse_market(market))
        .collect::<Result<Vec<_>, _>>()?;
    let rate_type = RateType::from(args.rate_type);
    let min_apr = config.min_apr;
    let now = args.now.unwrap_or_else(unix_now);

    let client = RateClient::new(IndexerClient::with_config(
        config.with_max_future_pools(args.max_future_pools),
    )?);
    let points = client
        .floating_rates(&markets, rate_type, args.window, now)
        .await?;

    match format {
        OutputFormat::Table => {
            if let ([market], [point]) = (markets.as_slice(), points.as_slice()) {
                println!(
                    "{}",
                    format_rate_detail(market, rate_type, args.window, point, min_apr)
                );
            } else {
                println!("{}", format_rates_table(&markets, &points, min_apr));
            }
        }
        OutputFormat::Json => {
            let rows: Vec<_> = markets
                .iter()
                .zip(&points)
                .map(|(market, point)| {
                    json!({
                        "market": market.to_string().to_lowercase(),
                        "type": rate_type.to_string(),
                        "window": args.window,
                        "date": point.date,
                        "apr": point.apr,
                        "apy": point.apy,
                        "utilization": point.utilization,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }

    Ok(())
}
