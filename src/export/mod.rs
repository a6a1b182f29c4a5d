//! Export module for student-finance
//!
//! Provides data export in two formats:
//! - CSV: transactions, analytics and self-test results (spreadsheet-compatible)
//! - JSON: transactions with an optional summary, and analytics snapshots

pub mod csv;
pub mod json;

pub use csv::{
    escape_csv, export_analytics_csv, export_test_results_csv, export_transactions_csv,
};
pub use json::{export_analytics_json, export_transactions_json, TransactionExport};

use std::fmt;
use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::backend::TransactionFilter;
use crate::error::FinanceResult;
use crate::models::Transaction;
use crate::services::analytics::AnalyticsData;

/// Output format for exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// What to export and how
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Inclusive date range
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// Only these categories (empty = all)
    pub categories: Vec<String>,
    pub include_metadata: bool,
}

impl ExportOptions {
    pub fn filter(&self) -> TransactionFilter {
        let mut filter = TransactionFilter::new();
        if let Some((start, end)) = self.date_range {
            filter = filter.date_range(start, end);
        }
        filter.categories = self.categories.clone();
        filter
    }
}

/// Filter `transactions` per `options` and write them in the chosen format
pub fn export_transactions<W: Write>(
    transactions: &[Transaction],
    options: &ExportOptions,
    exported_at: DateTime<Utc>,
    writer: &mut W,
) -> FinanceResult<usize> {
    let selected = options.filter().apply(transactions);

    match options.format {
        ExportFormat::Csv => {
            export_transactions_csv(&selected, options.include_metadata, exported_at, writer)?
        }
        ExportFormat::Json => {
            export_transactions_json(&selected, options.include_metadata, exported_at, writer)?
        }
    }

    info!(count = selected.len(), format = %options.format, "transactions exported");
    Ok(selected.len())
}

pub fn export_analytics<W: Write>(
    analytics: &AnalyticsData,
    format: ExportFormat,
    writer: &mut W,
) -> FinanceResult<()> {
    match format {
        ExportFormat::Csv => export_analytics_csv(analytics, writer),
        ExportFormat::Json => export_analytics_json(analytics, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType, UserId};

    fn txn(category: &str, day: u32) -> Transaction {
        Transaction::new(
            UserId::new(),
            Money::from_minor(1000),
            category,
            "entry",
            TransactionType::Expense,
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        )
    }

    #[test]
    fn test_export_filters_by_date_and_category() {
        let list = vec![txn("Food", 1), txn("Rent", 10), txn("Food", 15), txn("Food", 31)];
        let options = ExportOptions {
            format: ExportFormat::Csv,
            date_range: Some((
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            )),
            categories: vec!["Food".into()],
            include_metadata: false,
        };

        let mut buf = Vec::new();
        let count = export_transactions(&list, &options, Utc::now(), &mut buf).unwrap();
        assert_eq!(count, 2);

        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out.lines().count(), 3);
        assert!(!out.contains("Rent"));
    }

    #[test]
    fn test_export_json_format() {
        let options = ExportOptions {
            format: ExportFormat::Json,
            ..Default::default()
        };
        let mut buf = Vec::new();
        export_transactions(&[txn("Food", 2)], &options, Utc::now(), &mut buf).unwrap();

        let parsed: TransactionExport = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed.count, 1);
        assert_eq!(parsed.transactions[0].category, "Food");
    }
}
