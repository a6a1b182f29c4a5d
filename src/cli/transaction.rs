//! Transaction CLI commands

use chrono::Local;
use clap::Subcommand;

use crate::display::{format_transaction_details, format_transaction_list, format_transaction_stats};
use crate::error::FinanceResult;
use crate::models::TransactionType;
use crate::services::{TransactionDraft, TransactionService};
use crate::storage::Storage;

use super::{date_filter, parse_amount_arg, parse_date_arg};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an income or expense
    Add {
        /// Amount in rupees (e.g. "45" or "45.50")
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// Category name; created on first use
        #[arg(short, long)]
        category: String,
        /// What the money was for
        #[arg(short, long)]
        description: String,
        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
        /// Date (YYYY-MM-DD or DD/MM/YYYY), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// List transactions, newest first
    List {
        /// Start date (inclusive)
        #[arg(long)]
        from: Option<String>,
        /// End date (inclusive)
        #[arg(long)]
        to: Option<String>,
        /// Only these categories
        #[arg(short, long)]
        category: Vec<String>,
        /// Only income or only expense
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show one transaction
    Show {
        /// Transaction ID (full or short form)
        id: String,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID (full or short form)
        id: String,
    },

    /// Totals and averages
    Stats {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
}

pub fn handle_transaction_command(storage: &Storage, cmd: TransactionCommands) -> FinanceResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            description,
            kind,
            date,
        } => {
            let session = storage.require_session("add transactions")?;
            let date = match date {
                Some(d) => parse_date_arg(&d)?,
                None => Local::now().date_naive(),
            };
            let draft = TransactionDraft {
                amount: Some(parse_amount_arg(&amount)?),
                category,
                description,
                kind: TransactionType::parse(&kind),
                date: Some(date),
            };

            let txn = service.add(&session, draft)?;
            println!("Added {} {} ({})", txn.kind, txn.amount, txn.id);
        }

        TransactionCommands::List {
            from,
            to,
            category,
            kind,
            limit,
        } => {
            let session = storage.require_session("view transactions")?;
            let mut filter = date_filter(from.as_deref(), to.as_deref())?.limit(limit);
            filter.categories = category;
            filter.kind = kind.as_deref().and_then(TransactionType::parse);

            let transactions = service.list(&session, &filter)?;
            print!("{}", format_transaction_list(&transactions));
        }

        TransactionCommands::Show { id } => {
            let session = storage.require_session("view transactions")?;
            let txn = service.find(&session, &id)?;
            print!("{}", format_transaction_details(&txn));
        }

        TransactionCommands::Delete { id } => {
            let session = storage.require_session("delete transactions")?;
            let txn = service.find(&session, &id)?;
            service.delete(&session, txn.id)?;
            println!("Deleted transaction {}", txn.id);
        }

        TransactionCommands::Stats { from, to } => {
            let session = storage.require_session("view transactions")?;
            let filter = date_filter(from.as_deref(), to.as_deref())?;
            let stats = service.stats(&session, &filter)?;
            print!("{}", format_transaction_stats(&stats));
        }
    }

    Ok(())
}
