//! CSV export
//!
//! Transactions, analytics and self-test results as spreadsheet-friendly
//! CSV text.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{TestResult, TestStatus, Transaction};
use crate::services::analytics::AnalyticsData;
use crate::services::transaction::{balance, total_expenses, total_income};

fn export_err(e: std::io::Error) -> FinanceError {
    FinanceError::Export(e.to_string())
}

/// Escape a CSV field, quoting only when needed
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        quote_csv(s)
    } else {
        s.to_string()
    }
}

/// Always quote a field, doubling embedded quotes
pub fn quote_csv(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// `D/M/YYYY`, the `en-IN` short date
pub fn format_indian_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Write transactions as CSV
///
/// Descriptions are always quoted. With `include_metadata` each row also
/// carries the ID and creation time, and a summary block follows the rows.
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    include_metadata: bool,
    exported_at: DateTime<Utc>,
    writer: &mut W,
) -> FinanceResult<()> {
    let header = if include_metadata {
        "Date,Description,Category,Amount,Type,ID,Created At"
    } else {
        "Date,Description,Category,Amount,Type"
    };
    writeln!(writer, "{}", header).map_err(export_err)?;

    for txn in transactions {
        write!(
            writer,
            "{},{},{},{:.2},{}",
            format_indian_date(txn.date),
            quote_csv(&txn.description),
            escape_csv(&txn.category),
            txn.amount.as_major(),
            txn.kind
        )
        .map_err(export_err)?;

        if include_metadata {
            write!(
                writer,
                ",{},{}",
                txn.id.as_uuid(),
                iso_timestamp(txn.created_at)
            )
            .map_err(export_err)?;
        }
        writeln!(writer).map_err(export_err)?;
    }

    if include_metadata {
        writeln!(writer).map_err(export_err)?;
        writeln!(writer, "Summary").map_err(export_err)?;
        writeln!(writer, "Total Income,{:.2}", total_income(transactions).as_major())
            .map_err(export_err)?;
        writeln!(
            writer,
            "Total Expenses,{:.2}",
            total_expenses(transactions).as_major()
        )
        .map_err(export_err)?;
        writeln!(writer, "Net Balance,{:.2}", balance(transactions).as_major())
            .map_err(export_err)?;
        writeln!(writer, "Total Transactions,{}", transactions.len()).map_err(export_err)?;
        writeln!(writer, "Export Date,{}", iso_timestamp(exported_at)).map_err(export_err)?;
    }

    Ok(())
}

/// Write the headline metrics followed by the category breakdown
pub fn export_analytics_csv<W: Write>(analytics: &AnalyticsData, writer: &mut W) -> FinanceResult<()> {
    writeln!(writer, "Metric,Value").map_err(export_err)?;

    let money_rows = [
        ("Total Income", analytics.total_income),
        ("Total Expenses", analytics.total_expenses),
        ("Balance", analytics.balance),
    ];
    for (name, value) in money_rows {
        writeln!(writer, "{},{:.2}", name, value.as_major()).map_err(export_err)?;
    }
    writeln!(writer, "Transaction Count,{}", analytics.transaction_count).map_err(export_err)?;
    writeln!(
        writer,
        "Average Expense,{:.2}",
        analytics.average_expense.as_major()
    )
    .map_err(export_err)?;
    writeln!(
        writer,
        "Average Income,{:.2}",
        analytics.average_income.as_major()
    )
    .map_err(export_err)?;

    writeln!(writer).map_err(export_err)?;
    writeln!(writer, "Top Categories").map_err(export_err)?;
    writeln!(writer, "Category,Amount,Count,Percentage").map_err(export_err)?;
    for category in &analytics.top_categories {
        writeln!(
            writer,
            "{},{:.2},{},{:.2}%",
            escape_csv(&category.category),
            category.amount.as_major(),
            category.count,
            category.percentage
        )
        .map_err(export_err)?;
    }

    Ok(())
}

/// Write self-test results, optionally followed by pass/fail totals
///
/// Commas inside error messages become `;` so each result stays on one
/// row of five cells.
pub fn export_test_results_csv<W: Write>(
    results: &[TestResult],
    include_details: bool,
    writer: &mut W,
) -> FinanceResult<()> {
    writeln!(
        writer,
        "Test Name,Status,Duration (ms),Coverage (%),Error Message"
    )
    .map_err(export_err)?;

    for result in results {
        let error = result
            .error
            .as_deref()
            .map(|e| e.replace(',', ";"))
            .unwrap_or_default();
        writeln!(
            writer,
            "{},{},{},{},{}",
            escape_csv(&result.name),
            result.status,
            result.duration_ms.unwrap_or(0),
            result.coverage.unwrap_or(0.0),
            error
        )
        .map_err(export_err)?;
    }

    if include_details && !results.is_empty() {
        let passed = results
            .iter()
            .filter(|r| r.status == TestStatus::Passed)
            .count();
        let failed = results
            .iter()
            .filter(|r| r.status == TestStatus::Failed)
            .count();
        let total = results.len();

        writeln!(writer).map_err(export_err)?;
        writeln!(writer, "Test Summary").map_err(export_err)?;
        writeln!(writer, "Total Tests,{}", total).map_err(export_err)?;
        writeln!(writer, "Passed,{}", passed).map_err(export_err)?;
        writeln!(writer, "Failed,{}", failed).map_err(export_err)?;
        writeln!(
            writer,
            "Success Rate,{:.2}%",
            passed as f64 / total as f64 * 100.0
        )
        .map_err(export_err)?;
    }

    Ok(())
}

/// Distinct category names in order of first appearance
pub(crate) fn distinct_categories(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = HashSet::new();
    transactions
        .iter()
        .filter(|t| seen.insert(t.category.as_str()))
        .map(|t| t.category.clone())
        .collect()
}
