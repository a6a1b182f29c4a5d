//! JSON export

use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::models::money::as_major;
use crate::models::{Money, Transaction, TransactionType};
use crate::services::analytics::AnalyticsData;
use crate::services::transaction::{balance, total_expenses, total_income};

use super::csv::distinct_categories;

/// A transaction as it appears in an export file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedTransaction {
    pub id: String,
    #[serde(with = "as_major")]
    pub amount: Money,
    pub category: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<&Transaction> for ExportedTransaction {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id.as_uuid().to_string(),
            amount: txn.amount,
            category: txn.category.clone(),
            description: txn.description.clone(),
            kind: txn.kind,
            date: txn.date,
            created_at: txn.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    #[serde(with = "as_major")]
    pub total_income: Money,
    #[serde(with = "as_major")]
    pub total_expenses: Money,
    #[serde(with = "as_major")]
    pub net_balance: Money,
    pub categories: Vec<String>,
    pub date_range: DateRange,
}

impl ExportSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        Self {
            total_income: total_income(transactions),
            total_expenses: total_expenses(transactions),
            net_balance: balance(transactions),
            categories: distinct_categories(transactions),
            date_range: DateRange {
                earliest: transactions.iter().map(|t| t.date).min(),
                latest: transactions.iter().map(|t| t.date).max(),
            },
        }
    }
}

/// Top-level document of a JSON transaction export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionExport {
    pub transactions: Vec<ExportedTransaction>,
    pub export_date: DateTime<Utc>,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<ExportSummary>,
}

impl TransactionExport {
    pub fn new(
        transactions: &[Transaction],
        include_metadata: bool,
        exported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            transactions: transactions.iter().map(ExportedTransaction::from).collect(),
            export_date: exported_at,
            count: transactions.len(),
            summary: include_metadata.then(|| ExportSummary::from_transactions(transactions)),
        }
    }
}

/// Write transactions as pretty-printed JSON
pub fn export_transactions_json<W: Write>(
    transactions: &[Transaction],
    include_metadata: bool,
    exported_at: DateTime<Utc>,
    writer: &mut W,
) -> FinanceResult<()> {
    let export = TransactionExport::new(transactions, include_metadata, exported_at);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| FinanceError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| FinanceError::Export(e.to_string()))?;
    Ok(())
}

/// Write an analytics snapshot as pretty-printed JSON
pub fn export_analytics_json<W: Write>(analytics: &AnalyticsData, writer: &mut W) -> FinanceResult<()> {
    serde_json::to_writer_pretty(&mut *writer, analytics)
        .map_err(|e| FinanceError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| FinanceError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;
    use chrono::TimeZone;

    fn txn(amount: i64, category: &str, kind: TransactionType, day: u32) -> Transaction {
        Transaction::new(
            UserId::new(),
            Money::from_minor(amount),
            category,
            "entry",
            kind,
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        )
    }

    fn exported_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_json_without_metadata() {
        let list = vec![txn(4550, "Food", TransactionType::Expense, 3)];
        let mut buf = Vec::new();
        export_transactions_json(&list, false, exported_at(), &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["transactions"][0]["amount"], 45.5);
        assert_eq!(value["transactions"][0]["type"], "expense");
        assert_eq!(value["transactions"][0]["date"], "2024-01-03");
        assert!(value.get("summary").is_none());
        assert!(value["exportDate"].as_str().unwrap().starts_with("2024-03-01"));
    }

    #[test]
    fn test_json_summary() {
        let list = vec![
            txn(100000, "Allowance", TransactionType::Income, 10),
            txn(25000, "Food", TransactionType::Expense, 2),
            txn(5000, "Food", TransactionType::Expense, 20),
        ];
        let export = TransactionExport::new(&list, true, exported_at());
        let summary = export.summary.unwrap();

        assert_eq!(summary.total_income, Money::from_minor(100000));
        assert_eq!(summary.net_balance, Money::from_minor(70000));
        assert_eq!(summary.categories, vec!["Allowance", "Food"]);
        assert_eq!(summary.date_range.earliest.unwrap().to_string(), "2024-01-02");
        assert_eq!(summary.date_range.latest.unwrap().to_string(), "2024-01-20");
    }

    #[test]
    fn test_empty_summary_has_no_dates() {
        let export = TransactionExport::new(&[], true, exported_at());
        let summary = export.summary.unwrap();
        assert!(summary.date_range.earliest.is_none());
        assert_eq!(export.count, 0);
    }
}
