//! Currency conversion commands

use clap::Subcommand;

use crate::error::{FinanceError, FinanceResult};
use crate::models::currency::{convert, find_currency, format_indian};
use crate::models::CURRENCIES;

use super::parse_money_arg;

#[derive(Subcommand)]
pub enum CurrencyCommands {
    /// Convert an amount between currencies
    Convert {
        #[arg(allow_negative_numbers = true)]
        amount: String,
        from: String,
        to: String,
    },

    /// List supported currencies and their rates
    List,
}

pub fn handle_currency_command(cmd: CurrencyCommands) -> FinanceResult<()> {
    match cmd {
        CurrencyCommands::Convert { amount, from, to } => {
            let amount = parse_money_arg(&amount)?;
            let converted =
                convert(amount, &from, &to).map_err(|e| FinanceError::Validation(e.to_string()))?;

            // convert() already resolved both codes
            let symbol = |code: &str| find_currency(code).map(|c| c.symbol).unwrap_or("");
            println!(
                "{}{} = {}{}",
                symbol(&from),
                format_indian(amount),
                symbol(&to),
                format_indian(converted)
            );
        }

        CurrencyCommands::List => {
            println!("{:<5} {:<20} {:<6} {:>10}", "Code", "Name", "Symbol", "Per USD");
            println!("{}", "-".repeat(44));
            for c in CURRENCIES {
                println!("{:<5} {:<20} {:<6} {:>10.2}", c.code, c.name, c.symbol, c.rate);
            }
        }
    }

    Ok(())
}
