//! Transaction display formatting

use tabled::Tabled;

use crate::models::Transaction;
use crate::services::transaction::TransactionStats;

use super::{money, render_table, truncate};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(txn: &Transaction) -> Self {
        let sign = if txn.is_expense() { "-" } else { "+" };
        Self {
            id: txn.id.to_string(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            description: truncate(&txn.description, 30),
            category: txn.category.clone(),
            kind: txn.kind.to_string(),
            amount: format!("{}{}", sign, money(txn.amount)),
        }
    }
}

/// Format transactions as a table, newest first as given
pub fn format_transaction_list(transactions: &[Transaction]) -> String {
    render_table(
        transactions.iter().map(TransactionRow::from).collect(),
        "No transactions found.",
    )
}

pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Amount:      {}\n", money(txn.amount)));
    output.push_str(&format!("Category:    {}\n", txn.category));
    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }
    output.push_str(&format!(
        "Created:     {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M")
    ));

    output
}

pub fn format_transaction_stats(stats: &TransactionStats) -> String {
    let mut output = String::new();

    output.push_str("Transaction Summary\n");
    output.push_str(&format!("{}\n", "=".repeat(36)));
    output.push_str(&format!("Transactions:     {}\n", stats.total_transactions));
    output.push_str(&format!("Categories:       {}\n", stats.category_count));
    output.push_str(&format!("Total income:     {}\n", money(stats.total_income)));
    output.push_str(&format!("Total expenses:   {}\n", money(stats.total_expenses)));
    output.push_str(&format!("Balance:          {}\n", money(stats.balance)));
    output.push_str(&format!("Average expense:  {}\n", money(stats.average_expense)));
    output.push_str(&format!("Largest expense:  {}\n", money(stats.largest_expense)));
    output.push_str(&format!("Largest income:   {}\n", money(stats.largest_income)));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType, UserId};
    use chrono::NaiveDate;

    fn coffee() -> Transaction {
        Transaction::new(
            UserId::new(),
            Money::from_minor(4500),
            "Food",
            "Coffee with friends",
            TransactionType::Expense,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    #[test]
    fn test_format_transaction_list() {
        let formatted = format_transaction_list(&[coffee()]);
        assert!(formatted.contains("2024-01-15"));
        assert!(formatted.contains("Coffee with friends"));
        assert!(formatted.contains("-₹45.00"));
        assert!(formatted.contains("Category"));
    }

    #[test]
    fn test_format_empty_list() {
        assert!(format_transaction_list(&[]).contains("No transactions found"));
    }

    #[test]
    fn test_format_transaction_details() {
        let formatted = format_transaction_details(&coffee());
        assert!(formatted.contains("Food"));
        assert!(formatted.contains("expense"));
        assert!(formatted.contains("Coffee with friends"));
    }

    #[test]
    fn test_format_stats() {
        let stats = TransactionStats::from_transactions(&[coffee()]);
        let formatted = format_transaction_stats(&stats);
        assert!(formatted.contains("Transactions:     1"));
        assert!(formatted.contains("Total expenses:   ₹45.00"));
    }
}
