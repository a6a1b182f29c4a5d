//! Local JSON-file store
//!
//! One JSON file per table under the data directory, each loaded into an
//! `RwLock`-guarded map. [`Storage`] implements [`Backend`]: every mutating
//! call updates the map and rewrites that table's file atomically.

pub mod bank_accounts;
pub mod budgets;
pub mod categories;
pub mod file_io;
pub mod test_results;
pub mod transactions;

pub use bank_accounts::BankAccountRepository;
pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use test_results::TestResultRepository;
pub use transactions::TransactionRepository;

use std::fmt::Display;

use crate::backend::{Backend, Session, TransactionFilter};
use crate::config::paths::FinancePaths;
use crate::config::settings::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    BankAccount, BankAccountId, Budget, BudgetId, Category, CategoryId, NewTransaction,
    TestResult, Transaction, TransactionId, TransactionType,
};

pub(crate) fn lock_error<E: Display>(e: E) -> FinanceError {
    FinanceError::Storage(format!("Failed to acquire lock: {}", e))
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FinancePaths,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    pub budgets: BudgetRepository,
    pub bank_accounts: BankAccountRepository,
    pub test_results: TestResultRepository,
}

impl Storage {
    /// Create a storage instance without loading any data
    pub fn new(paths: FinancePaths) -> FinanceResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            bank_accounts: BankAccountRepository::new(paths.bank_accounts_file()),
            test_results: TestResultRepository::new(paths.test_results_file()),
            paths,
        })
    }

    /// Create a storage instance and load every table
    pub fn open(paths: FinancePaths) -> FinanceResult<Self> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &FinancePaths {
        &self.paths
    }

    pub fn load_all(&self) -> FinanceResult<()> {
        self.transactions.load()?;
        self.categories.load()?;
        self.budgets.load()?;
        self.bank_accounts.load()?;
        self.test_results.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> FinanceResult<()> {
        self.transactions.save()?;
        self.categories.save()?;
        self.budgets.save()?;
        self.bank_accounts.save()?;
        self.test_results.save()?;
        Ok(())
    }

    /// The signed-in user, if any
    pub fn current_session(&self) -> FinanceResult<Option<Session>> {
        Ok(Settings::load_or_create(&self.paths)?.session)
    }

    /// The signed-in user, or `NotAuthenticated` naming what was attempted
    pub fn require_session(&self, action: &'static str) -> FinanceResult<Session> {
        self.current_session()?
            .ok_or(FinanceError::NotAuthenticated(action))
    }
}

impl Backend for Storage {
    fn find_category(&self, session: &Session, name: &str) -> FinanceResult<Option<CategoryId>> {
        Ok(self
            .categories
            .find_by_name(session.user_id, name)?
            .map(|c| c.id))
    }

    fn create_category(
        &self,
        session: &Session,
        name: &str,
        kind: TransactionType,
    ) -> FinanceResult<CategoryId> {
        let (category, created) = self.categories.get_or_create(session.user_id, name, kind)?;
        if created {
            self.categories.save()?;
        }
        Ok(category.id)
    }

    fn list_categories(&self, session: &Session) -> FinanceResult<Vec<Category>> {
        self.categories.list_for_user(session.user_id)
    }

    fn insert_transaction(
        &self,
        session: &Session,
        record: NewTransaction,
    ) -> FinanceResult<Transaction> {
        let txn = record.into_transaction(session.user_id);
        txn.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.transactions.insert(txn.clone())?;
        self.transactions.save()?;
        Ok(txn)
    }

    fn list_transactions(
        &self,
        session: &Session,
        filter: &TransactionFilter,
    ) -> FinanceResult<Vec<Transaction>> {
        self.transactions.list_for_user(session.user_id, filter)
    }

    fn delete_transaction(&self, session: &Session, id: TransactionId) -> FinanceResult<bool> {
        let deleted = self.transactions.delete(session.user_id, id)?;
        if deleted {
            self.transactions.save()?;
        }
        Ok(deleted)
    }

    fn list_budgets(&self, session: &Session) -> FinanceResult<Vec<Budget>> {
        self.budgets.list_for_user(session.user_id)
    }

    fn upsert_budget(&self, session: &Session, mut budget: Budget) -> FinanceResult<Budget> {
        budget.user_id = session.user_id;
        budget
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.budgets.upsert(budget.clone())?;
        self.budgets.save()?;
        Ok(budget)
    }

    fn delete_budget(&self, session: &Session, id: BudgetId) -> FinanceResult<bool> {
        let deleted = self.budgets.delete(session.user_id, id)?;
        if deleted {
            self.budgets.save()?;
        }
        Ok(deleted)
    }

    fn list_bank_accounts(&self, session: &Session) -> FinanceResult<Vec<BankAccount>> {
        self.bank_accounts.list_for_user(session.user_id)
    }

    fn upsert_bank_account(
        &self,
        session: &Session,
        mut account: BankAccount,
    ) -> FinanceResult<BankAccount> {
        account.user_id = session.user_id;
        account.validate().map_err(FinanceError::Validation)?;

        self.bank_accounts.upsert(account.clone())?;
        self.bank_accounts.save()?;
        Ok(account)
    }

    fn delete_bank_account(&self, session: &Session, id: BankAccountId) -> FinanceResult<bool> {
        let deleted = self.bank_accounts.delete(session.user_id, id)?;
        if deleted {
            self.bank_accounts.save()?;
        }
        Ok(deleted)
    }

    fn record_test_result(&self, session: &Session, mut result: TestResult) -> FinanceResult<()> {
        result.user_id = session.user_id;
        self.test_results.append(result)?;
        self.test_results.save()
    }

    fn list_test_results(&self, session: &Session) -> FinanceResult<Vec<TestResult>> {
        self.test_results.list_for_user(session.user_id)
    }
}
