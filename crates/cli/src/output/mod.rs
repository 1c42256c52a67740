//! Output formatting for CLI results.

pub mod detail;
pub mod table;

pub use detail::format_rate_detail;
pub use table::{format_fixed_table, format_history_table, format_rates_table};
