//! Bank account CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_bank_account_list;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{BankAccountType, Money};
use crate::services::bank_account::{BankAccountUpdate, CreateBankAccountInput};
use crate::services::BankAccountService;
use crate::storage::Storage;

use super::parse_money_arg;

/// Bank account subcommands
#[derive(Subcommand)]
pub enum BankCommands {
    /// Add a bank account
    Add {
        bank_name: String,
        account_number: String,
        /// savings, current or student
        #[arg(short = 't', long = "type", default_value = "savings")]
        account_type: String,
        #[arg(short, long, allow_negative_numbers = true)]
        balance: Option<String>,
        /// ISO code; defaults to the preferred currency
        #[arg(long)]
        currency: Option<String>,
        /// Make this the primary account
        #[arg(long)]
        primary: bool,
    },

    /// List accounts, primary first
    List,

    /// Change an account
    Edit {
        /// Account ID or last four digits
        account: String,
        #[arg(long)]
        bank_name: Option<String>,
        #[arg(long)]
        number: Option<String>,
        #[arg(short = 't', long = "type")]
        account_type: Option<String>,
        #[arg(short, long, allow_negative_numbers = true)]
        balance: Option<String>,
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        primary: bool,
    },

    /// Delete an account
    Delete {
        /// Account ID or last four digits
        account: String,
    },
}

fn parse_account_type(input: &str) -> FinanceResult<BankAccountType> {
    BankAccountType::parse(input).ok_or_else(|| {
        FinanceError::Validation(format!(
            "Invalid account type '{}'. Use savings, current or student",
            input
        ))
    })
}

pub fn handle_bank_command(storage: &Storage, cmd: BankCommands) -> FinanceResult<()> {
    let session = storage.require_session("manage bank accounts")?;
    let service = BankAccountService::new(storage);

    match cmd {
        BankCommands::Add {
            bank_name,
            account_number,
            account_type,
            balance,
            currency,
            primary,
        } => {
            let currency = match currency {
                Some(c) => c,
                None => Settings::load_or_create(storage.paths())?.preferred_currency,
            };
            let account = service.create(
                &session,
                CreateBankAccountInput {
                    bank_name,
                    account_type: parse_account_type(&account_type)?,
                    account_number,
                    balance: balance
                        .as_deref()
                        .map(parse_money_arg)
                        .transpose()?
                        .unwrap_or_else(Money::zero),
                    currency,
                    is_primary: primary,
                },
            )?;
            println!(
                "Added {} {} ({})",
                account.bank_name,
                account.masked_number(),
                account.id
            );
        }

        BankCommands::List => {
            let accounts = service.list(&session)?;
            print!("{}", format_bank_account_list(&accounts));
        }

        BankCommands::Edit {
            account,
            bank_name,
            number,
            account_type,
            balance,
            currency,
            primary,
        } => {
            let update = BankAccountUpdate {
                bank_name,
                account_type: account_type.as_deref().map(parse_account_type).transpose()?,
                account_number: number,
                balance: balance.as_deref().map(parse_money_arg).transpose()?,
                currency,
                is_primary: primary.then_some(true),
            };
            let account = service.update(&session, &account, update)?;
            println!("Updated {} {}", account.bank_name, account.masked_number());
        }

        BankCommands::Delete { account } => {
            let account = service.delete(&session, &account)?;
            println!("Deleted {} {}", account.bank_name, account.masked_number());
        }
    }

    Ok(())
}
