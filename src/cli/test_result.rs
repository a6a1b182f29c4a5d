//! Self-test result commands

use clap::Subcommand;

use crate::backend::Backend;
use crate::display::format_test_results;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{TestResult, TestStatus};
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum TestCommands {
    /// Record the outcome of a test run
    Record {
        name: String,
        /// passed, failed, running or pending
        #[arg(short, long)]
        status: String,
        /// Duration in milliseconds
        #[arg(short, long)]
        duration: Option<u64>,
        /// Coverage percentage
        #[arg(short, long)]
        coverage: Option<f64>,
        /// Error message for failures
        #[arg(short, long)]
        error: Option<String>,
    },

    /// List recorded results, newest first
    List,
}

pub fn handle_test_command(storage: &Storage, cmd: TestCommands) -> FinanceResult<()> {
    let session = storage.require_session("record test results")?;

    match cmd {
        TestCommands::Record {
            name,
            status,
            duration,
            coverage,
            error,
        } => {
            let status = TestStatus::parse(&status).ok_or_else(|| {
                FinanceError::Validation(format!("Invalid test status: {}", status))
            })?;
            let mut result = TestResult::new(session.user_id, name.trim(), status);
            result.duration_ms = duration;
            result.coverage = coverage;
            result.error = error;

            storage.record_test_result(&session, result)?;
            println!("Recorded {} as {}", name.trim(), status);
        }

        TestCommands::List => {
            let results = storage.list_test_results(&session)?;
            print!("{}", format_test_results(&results));
        }
    }

    Ok(())
}
