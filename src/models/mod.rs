//! Core data models for student-finance
//!
//! Transactions, categories, budgets, bank accounts and the supporting
//! money/currency/ID types.

pub mod bank_account;
pub mod budget;
pub mod category;
pub mod currency;
pub mod ids;
pub mod money;
pub mod test_result;
pub mod transaction;

pub use bank_account::{BankAccount, BankAccountType};
pub use budget::{Budget, BudgetPeriod, BudgetStatus};
pub use category::Category;
pub use currency::{Currency, CURRENCIES};
pub use ids::{BankAccountId, BudgetId, CategoryId, TransactionId, UserId};
pub use money::Money;
pub use test_result::{TestResult, TestStatus};
pub use transaction::{NewTransaction, Transaction, TransactionType};
