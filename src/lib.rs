//! student-finance - personal finance tracking for students
//!
//! Records income and expenses per user, imports bank-style CSV files,
//! computes spending analytics and a financial health score, and exports
//! transactions and reports as CSV or JSON. Budgets and bank accounts are
//! kept alongside.
//!
//! # Architecture
//!
//! - `config`: path resolution and user settings (including the session)
//! - `error`: error types
//! - `models`: transactions, categories, budgets, bank accounts, money
//! - `validation`: input checks shared by the CLI and the importer
//! - `backend`: the persistence trait every service talks to
//! - `storage`: JSON file implementation of the backend
//! - `services`: business logic (import, analytics, budgets...)
//! - `export`: CSV and JSON writers
//! - `display`: terminal formatting
//! - `cli`: command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use student_finance::config::paths::FinancePaths;
//! use student_finance::storage::Storage;
//!
//! let storage = Storage::open(FinancePaths::new()?)?;
//! let session = storage.require_session("view transactions")?;
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;
pub mod validation;

pub use backend::{Backend, Session, TransactionFilter};
pub use error::{FinanceError, FinanceResult};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber (stderr, `RUST_LOG` aware)
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("student_finance=info"));

        // A subscriber installed by an embedding application wins
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
