//! Table formatting for rate series and market lists.

use alloy_primitives::Address;
use exa_rates_api::{FixedRates, RatePoint};
use exa_rates_sim::format_rate;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Date")]
    date: u64,
    #[tabled(rename = "APR")]
    apr: String,
    #[tabled(rename = "APY")]
    apy: String,
    #[tabled(rename = "Utilization")]
    utilization: String,
}

#[derive(Tabled)]
struct MarketRateRow {
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "APR")]
    apr: String,
    #[tabled(rename = "APY")]
    apy: String,
    #[tabled(rename = "Utilization")]
    utilization: String,
}

#[derive(Tabled)]
struct MaturityRow {
    #[tabled(rename = "Maturity")]
    maturity: u64,
    #[tabled(rename = "APR")]
    apr: String,
    #[tabled(rename = "Volume")]
    volume: String,
}

fn truncate_address(addr: &str) -> String {
    if addr.len() > 10 {
        format!("{}...{}", &addr[..6], &addr[addr.len() - 4..])
    } else {
        addr.to_string()
    }
}

pub(crate) fn format_utilization(utilization: f64) -> String {
    format!("{:.2}%", utilization * 100.0)
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()));

    table.to_string()
}

pub fn format_history_table(points: &[RatePoint], min_apr: f64) -> String {
    if points.is_empty() {
        return "No rates found.".to_string();
    }

    let rows: Vec<HistoryRow> = points
        .iter()
        .map(|p| HistoryRow {
            date: p.date,
            apr: format_rate(p.apr, min_apr),
            apy: format_rate(p.apy, min_apr),
            utilization: format_utilization(p.utilization),
        })
        .collect();

    render(rows)
}

pub fn format_rates_table(markets: &[Address], points: &[RatePoint], min_apr: f64) -> String {
    if points.is_empty() {
        return "No rates found.".to_string();
    }

    let rows: Vec<MarketRateRow> = markets
        .iter()
        .zip(points)
        .map(|(market, p)| MarketRateRow {
            market: truncate_address(&market.to_string().to_lowercase()),
            apr: format_rate(p.apr, min_apr),
            apy: format_rate(p.apy, min_apr),
            utilization: format_utilization(p.utilization),
        })
        .collect();

    render(rows)
}

pub fn format_fixed_table(rates: &FixedRates, min_apr: f64) -> String {
    if rates.maturities.is_empty() {
        return "No fixed operations found.".to_string();
    }

    let rows: Vec<MaturityRow> = rates
        .maturities
        .iter()
        .map(|r| MaturityRow {
            maturity: r.maturity,
            apr: format_rate(r.apr, min_apr),
            volume: r.volume.to_string(),
        })
        .collect();

    let average = rates
        .average_apr
        .map(|apr| format_rate(apr, min_apr))
        .unwrap_or_else(|| "-".to_string());

    format!("{}\nAverage APR: {}", render(rows), average)
}
