//! Service layer for student-finance
//!
//! Services sit between the CLI and the [`Backend`](crate::backend::Backend):
//! they validate input, derive computed views and orchestrate multi-step
//! operations such as a CSV import.

pub mod analytics;
pub mod bank_account;
pub mod budget;
pub mod import;
pub mod transaction;

pub use analytics::{AnalyticsData, FinancialHealth, HealthLevel};
pub use bank_account::BankAccountService;
pub use budget::BudgetService;
pub use import::{ImportOutcome, ImportPreview, ImportService, ImportedRow, RowStatus};
pub use transaction::{TransactionDraft, TransactionService, TransactionStats};
