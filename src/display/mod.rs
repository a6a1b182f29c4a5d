//! Display formatting for terminal output
//!
//! List views are rendered as tables; detail and report views are plain
//! aligned text.

pub mod analytics;
pub mod bank_account;
pub mod budget;
pub mod category;
pub mod import;
pub mod test_result;
pub mod transaction;

pub use analytics::{format_analytics_summary, format_health_report, format_insights};
pub use bank_account::format_bank_account_list;
pub use budget::{format_budget_details, format_budget_list};
pub use category::format_category_list;
pub use import::{format_import_outcome, format_import_preview};
pub use test_result::format_test_results;
pub use transaction::{format_transaction_details, format_transaction_list, format_transaction_stats};

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::currency::format_indian;
use crate::models::Money;

/// Rupee amount with Indian grouping and paise (`₹12,34,567.89`)
pub(crate) fn money(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    format!("{}₹{}", sign, format_indian(amount.abs()))
}

/// Render rows as a table, or `empty` when there are none
pub(crate) fn render_table<T: Tabled>(rows: Vec<T>, empty: &str) -> String {
    if rows.is_empty() {
        return format!("{}\n", empty);
    }
    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Cut a string to `max_len` characters, marking the cut with "..."
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
