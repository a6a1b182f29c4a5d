//! CLI command handlers
//!
//! This module bridges the clap argument parsing with the service layer.
//! Handlers print their results; the binary only dispatches.

pub mod analytics;
pub mod bank_account;
pub mod budget;
pub mod category;
pub mod currency;
pub mod export;
pub mod import;
pub mod session;
pub mod test_result;
pub mod transaction;

pub use analytics::handle_analytics_command;
pub use bank_account::{handle_bank_command, BankCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use currency::{handle_currency_command, CurrencyCommands};
pub use export::{handle_export_command, ExportCommands};
pub use import::{handle_import_command, handle_template_command};
pub use session::{handle_config_command, handle_login, handle_logout, handle_whoami};
pub use test_result::{handle_test_command, TestCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;

use crate::backend::TransactionFilter;
use crate::error::{FinanceError, FinanceResult};
use crate::models::Money;
use crate::validation::{normalize_date, validate_amount};

/// Parse a date argument in any format the importer accepts
pub(crate) fn parse_date_arg(input: &str) -> FinanceResult<NaiveDate> {
    normalize_date(input).ok_or_else(|| {
        FinanceError::Validation(format!(
            "Invalid date '{}'. Use YYYY-MM-DD or DD/MM/YYYY",
            input
        ))
    })
}

/// Parse a strictly positive amount (transactions, budget limits)
pub(crate) fn parse_amount_arg(input: &str) -> FinanceResult<Money> {
    validate_amount(input).map_err(|e| FinanceError::Validation(format!("{}: {}", e, input)))
}

/// Parse any amount, including zero and negatives (balances, spent)
pub(crate) fn parse_money_arg(input: &str) -> FinanceResult<Money> {
    Money::parse(input).map_err(|e| FinanceError::Validation(e.to_string()))
}

/// Build a date filter from optional `--from` / `--to` arguments
pub(crate) fn date_filter(
    from: Option<&str>,
    to: Option<&str>,
) -> FinanceResult<TransactionFilter> {
    let mut filter = TransactionFilter::new();
    if let Some(from) = from {
        filter = filter.since(parse_date_arg(from)?);
    }
    if let Some(to) = to {
        filter = filter.until(parse_date_arg(to)?);
    }
    Ok(filter)
}

/// Write to `path`, or to stdout when no path is given
pub(crate) fn open_output(path: Option<&Path>) -> FinanceResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                FinanceError::Io(format!("Failed to create {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(parse_date_arg("15/01/2024").unwrap().to_string(), "2024-01-15");
        assert!(parse_date_arg("yesterday").unwrap_err().is_validation());
    }

    #[test]
    fn test_amount_args() {
        assert_eq!(parse_amount_arg("45.5").unwrap(), Money::from_minor(4550));
        assert!(parse_amount_arg("0").is_err());
        assert_eq!(parse_money_arg("0").unwrap(), Money::zero());
        assert_eq!(parse_money_arg("-12.30").unwrap(), Money::from_minor(-1230));
    }

    #[test]
    fn test_date_filter() {
        let filter = date_filter(Some("2024-01-01"), None).unwrap();
        assert!(filter.start_date.is_some());
        assert!(filter.end_date.is_none());
        assert!(date_filter(None, Some("bad")).is_err());
    }
}
