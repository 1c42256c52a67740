//! Detailed output formatting for a single market rate.

use alloy_primitives::Address;
use colored::Colorize;
use exa_rates_api::RatePoint;
use exa_rates_sim::{format_rate, RateType};

use super::table::format_utilization;

pub fn format_rate_detail(
    market: &Address,
    rate_type: RateType,
    window: u64,
    point: &RatePoint,
    min_apr: f64,
) -> String {
    let mut output = String::new();

    // Header
    output.push_str(&format!("{}\n", "=".repeat(60)));
    output.push_str(&format!("{}\n", market.to_string().to_lowercase().bold()));
    output.push_str(&format!("{}\n\n", "=".repeat(60)));

    output.push_str(&format!("{}\n", "Floating Rate".cyan().bold()));
    output.push_str(&format!("  Type:        {}\n", rate_type));
    output.push_str(&format!("  Window:      {} seconds\n", window));
    output.push_str(&format!("  As of:       {}\n", point.date));
    output.push_str(&format!("  APR:         {}\n", format_rate(point.apr, min_apr)));
    output.push_str(&format!("  APY:         {}\n", format_rate(point.apy, min_apr)));
    output.push_str(&format!("  Utilization: {}\n", format_utilization(point.utilization)));

    output
}
