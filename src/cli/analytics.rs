//! Analytics dashboard command

use std::io::Write;

use crate::backend::Backend;
use crate::display::{format_analytics_summary, format_health_report, format_insights};
use crate::error::FinanceResult;
use crate::export::export_analytics_json;
use crate::services::analytics::{self, financial_health, insights};
use crate::storage::Storage;

use super::date_filter;

/// Print totals, health score and insights, or the raw JSON snapshot
pub fn handle_analytics_command(
    storage: &Storage,
    from: Option<&str>,
    to: Option<&str>,
    json: bool,
) -> FinanceResult<()> {
    let session = storage.require_session("view analytics")?;
    let filter = date_filter(from, to)?;
    let transactions = storage.list_transactions(&session, &filter)?;
    let data = analytics::calculate(&transactions);

    if json {
        let mut stdout = std::io::stdout().lock();
        export_analytics_json(&data, &mut stdout)?;
        stdout.flush()?;
        return Ok(());
    }

    print!("{}", format_analytics_summary(&data));
    println!();
    print!("{}", format_health_report(&financial_health(&data)));
    println!();
    print!("{}", format_insights(&insights(&data)));
    Ok(())
}
