//! Export CLI commands

use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use tracing::info;

use crate::backend::{Backend, TransactionFilter};
use crate::error::FinanceResult;
use crate::export::{
    export_analytics, export_test_results_csv, export_transactions, ExportFormat, ExportOptions,
};
use crate::services::analytics;
use crate::storage::Storage;

use super::{date_filter, open_output};

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export transactions
    Transactions {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Start date (inclusive)
        #[arg(long)]
        from: Option<String>,
        /// End date (inclusive)
        #[arg(long)]
        to: Option<String>,
        /// Only these categories (repeatable)
        #[arg(short, long)]
        category: Vec<String>,
        /// Add IDs, creation times and a summary
        #[arg(short, long)]
        metadata: bool,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the analytics snapshot
    Analytics {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export recorded self-test results as CSV
    Tests {
        /// Append a pass/fail summary
        #[arg(short, long)]
        details: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> FinanceResult<()> {
    let session = storage.require_session("export data")?;

    match cmd {
        ExportCommands::Transactions {
            format,
            from,
            to,
            category,
            metadata,
            output,
        } => {
            let range = date_filter(from.as_deref(), to.as_deref())?;
            let transactions =
                storage.list_transactions(&session, &TransactionFilter::default())?;

            let options = ExportOptions {
                format,
                categories: category,
                include_metadata: metadata,
                ..Default::default()
            };
            // --from and --to may be given alone, so narrow by date here
            let selected: Vec<_> = transactions
                .into_iter()
                .filter(|t| range.matches(t))
                .collect();

            let mut writer = open_output(output.as_deref())?;
            let count = export_transactions(&selected, &options, Utc::now(), &mut writer)?;
            writer.flush()?;

            if let Some(path) = output {
                println!("Exported {} transactions to {}", count, path.display());
            }
        }

        ExportCommands::Analytics {
            format,
            from,
            to,
            output,
        } => {
            let filter = date_filter(from.as_deref(), to.as_deref())?;
            let transactions = storage.list_transactions(&session, &filter)?;
            let data = analytics::calculate(&transactions);

            let mut writer = open_output(output.as_deref())?;
            export_analytics(&data, format, &mut writer)?;
            writer.flush()?;
            info!(format = %format, "analytics exported");

            if let Some(path) = output {
                println!("Exported analytics to {}", path.display());
            }
        }

        ExportCommands::Tests { details, output } => {
            let results = storage.list_test_results(&session)?;

            let mut writer = open_output(output.as_deref())?;
            export_test_results_csv(&results, details, &mut writer)?;
            writer.flush()?;
            info!(count = results.len(), "test results exported");

            if let Some(path) = output {
                println!("Exported {} test results to {}", results.len(), path.display());
            }
        }
    }

    Ok(())
}
