//! Transaction service
//!
//! Aggregation over transaction lists (totals, balance, per-category
//! grouping, dashboard stats), draft validation, and the add/list/delete
//! flows that go through a [`Backend`].

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use tracing::info;

use crate::backend::{Backend, Session, TransactionFilter};
use crate::error::{FinanceError, FinanceResult};
use crate::models::category::MAX_CATEGORY_LEN;
use crate::models::currency::format_inr;
use crate::models::{Money, NewTransaction, Transaction, TransactionId, TransactionType, UserId};
use crate::validation::MAX_DESCRIPTION_LEN;

/// Sum of all income amounts
pub fn total_income(transactions: &[Transaction]) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum()
}

/// Sum of all expense amounts
pub fn total_expenses(transactions: &[Transaction]) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum()
}

/// Income minus expenses; zero for an empty list
pub fn balance(transactions: &[Transaction]) -> Money {
    total_income(transactions) - total_expenses(transactions)
}

/// Group transactions by category name, keeping their relative order
pub fn by_category(transactions: &[Transaction]) -> BTreeMap<String, Vec<Transaction>> {
    let mut groups: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
    for txn in transactions {
        groups
            .entry(txn.category.clone())
            .or_default()
            .push(txn.clone());
    }
    groups
}

/// Format an amount the way the dashboard shows it (`₹1,23,457`)
pub fn format_currency(amount: Money) -> String {
    format_inr(amount)
}

/// Dashboard statistics for a set of transactions
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionStats {
    pub total_transactions: usize,
    pub total_income: Money,
    pub total_expenses: Money,
    pub balance: Money,
    pub average_expense: Money,
    pub largest_expense: Money,
    pub largest_income: Money,
    pub category_count: usize,
}

impl TransactionStats {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let expenses: Vec<Money> = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .collect();
        let largest_income = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .max()
            .unwrap_or_default();

        let total_expenses: Money = expenses.iter().sum();
        let average_expense = if expenses.is_empty() {
            Money::zero()
        } else {
            Money::from_major(total_expenses.as_major() / expenses.len() as f64)
        };

        let categories: HashSet<&str> = transactions.iter().map(|t| t.category.as_str()).collect();

        Self {
            total_transactions: transactions.len(),
            total_income: total_income(transactions),
            total_expenses,
            balance: balance(transactions),
            average_expense,
            largest_expense: expenses.iter().copied().max().unwrap_or_default(),
            largest_income,
            category_count: categories.len(),
        }
    }
}

/// A transaction as entered, before it is known to be valid
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    pub amount: Option<Money>,
    pub category: String,
    pub description: String,
    pub kind: Option<TransactionType>,
    pub date: Option<NaiveDate>,
}

impl TransactionDraft {
    /// Every rule the draft violates, in a fixed order; empty when valid
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.amount.is_some_and(|a| a.is_positive()) {
            errors.push("Amount must be greater than 0".to_string());
        }

        let category = self.category.trim();
        if category.is_empty() {
            errors.push("Category is required".to_string());
        } else if category.chars().count() > MAX_CATEGORY_LEN {
            errors.push(format!(
                "Category must be less than {} characters",
                MAX_CATEGORY_LEN
            ));
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.push("Description is required".to_string());
        } else if description.chars().count() > MAX_DESCRIPTION_LEN {
            errors.push(format!(
                "Description must be less than {} characters",
                MAX_DESCRIPTION_LEN
            ));
        }

        if self.kind.is_none() {
            errors.push("Type must be income or expense".to_string());
        }

        if self.date.is_none() {
            errors.push("Date is required".to_string());
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Build a persistence request with trimmed text fields
    pub fn into_new_transaction(self) -> FinanceResult<NewTransaction> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(FinanceError::Validation(errors.join("; ")));
        }

        match (self.amount, self.kind, self.date) {
            (Some(amount), Some(kind), Some(date)) => Ok(NewTransaction {
                amount,
                category_id: None,
                category: self.category.trim().to_string(),
                description: self.description.trim().to_string(),
                kind,
                date,
            }),
            _ => Err(FinanceError::Validation("Incomplete transaction".into())),
        }
    }

    /// Build a transaction with a fresh ID owned by `user_id`
    pub fn create(self, user_id: UserId) -> FinanceResult<Transaction> {
        Ok(self.into_new_transaction()?.into_transaction(user_id))
    }
}

/// Service for transaction management
pub struct TransactionService<'a, B: Backend> {
    backend: &'a B,
}

impl<'a, B: Backend> TransactionService<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Validate and persist a draft, creating its category on first use
    pub fn add(&self, session: &Session, draft: TransactionDraft) -> FinanceResult<Transaction> {
        let mut record = draft.into_new_transaction()?;

        let category_id = self
            .backend
            .create_category(session, &record.category, record.kind)?;
        record.category_id = Some(category_id);

        let txn = self.backend.insert_transaction(session, record)?;
        info!(id = %txn.id, amount = %txn.amount, "transaction added");
        Ok(txn)
    }

    pub fn list(
        &self,
        session: &Session,
        filter: &TransactionFilter,
    ) -> FinanceResult<Vec<Transaction>> {
        self.backend.list_transactions(session, filter)
    }

    /// Find one of the user's transactions by full or short ID
    pub fn find(&self, session: &Session, identifier: &str) -> FinanceResult<Transaction> {
        self.backend
            .list_transactions(session, &TransactionFilter::default())?
            .into_iter()
            .find(|t| t.id.matches(identifier))
            .ok_or_else(|| FinanceError::transaction_not_found(identifier))
    }

    pub fn delete(&self, session: &Session, id: TransactionId) -> FinanceResult<()> {
        if self.backend.delete_transaction(session, id)? {
            info!(id = %id, "transaction deleted");
            Ok(())
        } else {
            Err(FinanceError::transaction_not_found(id.to_string()))
        }
    }

    pub fn stats(
        &self,
        session: &Session,
        filter: &TransactionFilter,
    ) -> FinanceResult<TransactionStats> {
        let transactions = self.backend.list_transactions(session, filter)?;
        Ok(TransactionStats::from_transactions(&transactions))
    }
}
