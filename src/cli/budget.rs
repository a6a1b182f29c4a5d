//! Budget CLI commands

use clap::Subcommand;

use crate::display::{format_budget_details, format_budget_list};
use crate::error::{FinanceError, FinanceResult};
use crate::models::BudgetPeriod;
use crate::services::budget::{BudgetUpdate, CreateBudgetInput};
use crate::services::BudgetService;
use crate::storage::Storage;

use super::{parse_amount_arg, parse_money_arg};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a spending limit for a category
    Add {
        category: String,
        /// Limit amount
        amount: String,
        /// weekly, monthly or yearly
        #[arg(short, long, default_value = "monthly")]
        period: String,
    },

    /// List budgets with usage
    List,

    /// Show one budget
    Show {
        /// Budget ID or category name
        budget: String,
    },

    /// Change a budget
    Edit {
        /// Budget ID or category name
        budget: String,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Record the amount spent so far
    Spent {
        /// Budget ID or category name
        budget: String,
        #[arg(allow_negative_numbers = true)]
        amount: String,
    },

    /// Delete a budget
    Delete {
        /// Budget ID or category name
        budget: String,
    },
}

fn parse_period(input: &str) -> FinanceResult<BudgetPeriod> {
    BudgetPeriod::parse(input).ok_or_else(|| {
        FinanceError::Validation(format!(
            "Invalid period '{}'. Use weekly, monthly or yearly",
            input
        ))
    })
}

pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> FinanceResult<()> {
    let session = storage.require_session("manage budgets")?;
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Add {
            category,
            amount,
            period,
        } => {
            let budget = service.create(
                &session,
                CreateBudgetInput {
                    category,
                    amount: parse_amount_arg(&amount)?,
                    period: parse_period(&period)?,
                },
            )?;
            println!(
                "Created {} budget for {}: {} ({})",
                budget.period, budget.category, budget.amount, budget.id
            );
        }

        BudgetCommands::List => {
            let budgets = service.list(&session)?;
            print!("{}", format_budget_list(&budgets));
        }

        BudgetCommands::Show { budget } => {
            let budget = service.find(&session, &budget)?;
            print!("{}", format_budget_details(&budget));
        }

        BudgetCommands::Edit {
            budget,
            category,
            amount,
            period,
        } => {
            let update = BudgetUpdate {
                category,
                amount: amount.as_deref().map(parse_amount_arg).transpose()?,
                period: period.as_deref().map(parse_period).transpose()?,
                spent: None,
            };
            let budget = service.update(&session, &budget, update)?;
            println!("Updated budget {}", budget.id);
            print!("{}", format_budget_details(&budget));
        }

        BudgetCommands::Spent { budget, amount } => {
            let budget = service.set_spent(&session, &budget, parse_money_arg(&amount)?)?;
            print!("{}", format_budget_details(&budget));
        }

        BudgetCommands::Delete { budget } => {
            let budget = service.delete(&session, &budget)?;
            println!("Deleted budget for {}", budget.category);
        }
    }

    Ok(())
}
