//! Fixed rate command.

use anyhow::Result;
use exa_rates_api::{parse_market, unix_now, ClientConfig, IndexerClient, RateClient};
use exa_rates_sim::{RateType, FIXED_INTERVAL};
use serde_json::json;

use crate::cli::{FixedArgs, OutputFormat};
use crate::output::format_fixed_table;

pub async fn run_fixed(
    args: &FixedArgs,
    format: OutputFormat,
    config: ClientConfig,
) -> Result<()> {
    let market = parse_market(&args.market)?;
    let rate_type = RateType::from(args.rate_type);
    let min_apr = config.min_apr;
    let since = args
        .since
        .unwrap_or_else(|| unix_now().saturating_sub(FIXED_INTERVAL));

    let client = RateClient::new(IndexerClient::with_config(config)?);
    let rates = client.fixed_rates(&market, rate_type, since).await?;

    match format {
        OutputFormat::Table => {
            println!("{}", format_fixed_table(&rates, min_apr));
        }
        OutputFormat::Json => {
            let maturities: Vec<_> = rates
                .maturities
                .iter()
                .map(|rate| {
                    json!({
                        "maturity": rate.maturity,
                        "apr": rate.apr,
                        "volume": rate.volume.to_string(),
                    })
                })
                .collect();
            let json = json!({
                "market": market.to_string().to_lowercase(),
                "type": rate_type.to_string(),
                "since": since,
                "averageApr": rates.average_apr,
                "maturities": maturities,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}
