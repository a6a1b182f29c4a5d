//! Transaction model
//!
//! A single income or expense entry owned by one user.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, TransactionId, UserId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl TransactionType {
    /// Parse `income` / `expense`, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Owner; transactions are never shared
    pub user_id: UserId,

    /// Always positive; direction is carried by `kind`
    pub amount: Money,

    pub category_id: Option<CategoryId>,

    /// Category name, stored for display even when `category_id` is set
    pub category: String,

    #[serde(default)]
    pub description: String,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub date: NaiveDate,

    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction with a fresh ID
    pub fn new(
        user_id: UserId,
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
        kind: TransactionType,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            user_id,
            amount,
            category_id: None,
            category: category.into(),
            description: description.into(),
            kind,
            date,
            created_at: Utc::now(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Check the storage-level invariants (positive amount)
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

/// A persistence request: everything but the generated identity
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: Money,
    pub category_id: Option<CategoryId>,
    pub category: String,
    pub description: String,
    pub kind: TransactionType,
    pub date: NaiveDate,
}

impl NewTransaction {
    /// Materialize the request into a transaction owned by `user_id`
    pub fn into_transaction(self, user_id: UserId) -> Transaction {
        let mut txn = Transaction::new(
            user_id,
            self.amount,
            self.category,
            self.description,
            self.kind,
            self.date,
        );
        txn.category_id = self.category_id;
        txn
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Amount must be greater than 0"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
