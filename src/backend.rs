//! Persistence boundary
//!
//! Every read or write of user data goes through [`Backend`]. Each call takes
//! the caller's [`Session`] explicitly and returns a [`FinanceResult`], so
//! services never consult ambient auth state or trust loosely-shaped
//! responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FinanceResult;
use crate::models::{
    BankAccount, BankAccountId, Budget, BudgetId, Category, CategoryId, NewTransaction,
    TestResult, Transaction, TransactionId, TransactionType, UserId,
};

/// An authenticated user as seen by the services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Session {
    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            token: None,
        }
    }

    /// Start a fresh session for `email` with a newly minted user ID
    pub fn sign_in(email: impl Into<String>) -> Self {
        Self::new(UserId::new(), email)
    }
}

/// Options for filtering transaction listings
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Inclusive start date
    pub start_date: Option<NaiveDate>,
    /// Inclusive end date
    pub end_date: Option<NaiveDate>,
    /// Only these category names (empty = all)
    pub categories: Vec<String>,
    pub kind: Option<TransactionType>,
    /// Maximum number of transactions to return (newest first)
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn since(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn until(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn category(mut self, name: impl Into<String>) -> Self {
        self.categories.push(name.into());
        self
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a transaction passes every predicate except `limit`
    pub fn matches(&self, txn: &Transaction) -> bool {
        if self.start_date.is_some_and(|start| txn.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| txn.date > end) {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&txn.category) {
            return false;
        }
        if self.kind.is_some_and(|kind| txn.kind != kind) {
            return false;
        }
        true
    }

    /// Filter an in-memory list, then apply the limit
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        let mut filtered: Vec<Transaction> = transactions
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect();
        if let Some(limit) = self.limit {
            filtered.truncate(limit);
        }
        filtered
    }
}

/// The hosted database as the services see it
///
/// Implementations scope every table by `session.user_id`: a user can never
/// read or modify another user's rows.
pub trait Backend {
    /// Look up a category by exact name for the session's user
    fn find_category(&self, session: &Session, name: &str) -> FinanceResult<Option<CategoryId>>;

    /// Create a category, or return the existing one with the same name
    ///
    /// Idempotent: calling twice with the same name yields the same ID.
    fn create_category(
        &self,
        session: &Session,
        name: &str,
        kind: TransactionType,
    ) -> FinanceResult<CategoryId>;

    fn list_categories(&self, session: &Session) -> FinanceResult<Vec<Category>>;

    fn insert_transaction(
        &self,
        session: &Session,
        record: NewTransaction,
    ) -> FinanceResult<Transaction>;

    /// List transactions newest first, filtered
    fn list_transactions(
        &self,
        session: &Session,
        filter: &TransactionFilter,
    ) -> FinanceResult<Vec<Transaction>>;

    /// Delete a transaction; `Ok(false)` when no such transaction exists
    fn delete_transaction(&self, session: &Session, id: TransactionId) -> FinanceResult<bool>;

    fn list_budgets(&self, session: &Session) -> FinanceResult<Vec<Budget>>;

    fn upsert_budget(&self, session: &Session, budget: Budget) -> FinanceResult<Budget>;

    fn delete_budget(&self, session: &Session, id: BudgetId) -> FinanceResult<bool>;

    /// List bank accounts, primary account first
    fn list_bank_accounts(&self, session: &Session) -> FinanceResult<Vec<BankAccount>>;

    fn upsert_bank_account(
        &self,
        session: &Session,
        account: BankAccount,
    ) -> FinanceResult<BankAccount>;

    fn delete_bank_account(&self, session: &Session, id: BankAccountId) -> FinanceResult<bool>;

    fn record_test_result(&self, session: &Session, result: TestResult) -> FinanceResult<()>;

    fn list_test_results(&self, session: &Session) -> FinanceResult<Vec<TestResult>>;
}
