use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use student_finance::cli::{
    handle_analytics_command, handle_bank_command, handle_budget_command, handle_category_command,
    handle_config_command, handle_currency_command, handle_export_command, handle_import_command,
    handle_login, handle_logout, handle_template_command, handle_test_command,
    handle_transaction_command, handle_whoami, BankCommands, BudgetCommands, CategoryCommands,
    CurrencyCommands, ExportCommands, TestCommands, TransactionCommands,
};
use student_finance::config::paths::FinancePaths;
use student_finance::storage::Storage;

#[derive(Parser)]
#[command(
    name = "finance",
    version,
    about = "Personal finance tracker for students",
    long_about = "Track income and expenses, import bank CSV files, set budgets \
                  and see where your money goes, from the command line."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with an email address
    Login { email: String },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show configuration, or set the preferred currency
    Config {
        #[arg(long)]
        currency: Option<String>,
    },

    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Import transactions from a CSV file
    Import {
        file: PathBuf,
        /// Only show the preview
        #[arg(long)]
        dry_run: bool,
    },

    /// Print or save a sample import CSV
    Template {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export data as CSV or JSON
    #[command(subcommand)]
    Export(ExportCommands),

    /// Spending analytics, health score and insights
    Analytics {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        /// Print the raw analytics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Bank account management commands
    #[command(subcommand)]
    Bank(BankCommands),

    /// Category commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Currency conversion
    #[command(subcommand)]
    Currency(CurrencyCommands),

    /// Self-test result tracking
    #[command(subcommand)]
    Test(TestCommands),
}

fn main() -> Result<()> {
    student_finance::init_tracing();
    let cli = Cli::parse();

    let paths = FinancePaths::new()?;

    let Some(command) = cli.command else {
        println!("student-finance - track your money from the command line");
        println!();
        println!("Run 'finance --help' for usage information.");
        println!("Run 'finance login <email>' to get started.");
        return Ok(());
    };

    // Settings-only commands never touch the data files
    let open_storage = || Storage::open(paths.clone());

    match command {
        Commands::Login { email } => handle_login(&paths, &email)?,
        Commands::Logout => handle_logout(&paths)?,
        Commands::Whoami => handle_whoami(&paths)?,
        Commands::Config { currency } => handle_config_command(&paths, currency.as_deref())?,
        Commands::Template { output } => handle_template_command(output.as_deref())?,
        Commands::Currency(cmd) => handle_currency_command(cmd)?,
        Commands::Txn(cmd) => handle_transaction_command(&open_storage()?, cmd)?,
        Commands::Import { file, dry_run } => {
            handle_import_command(&open_storage()?, &file, dry_run)?
        }
        Commands::Export(cmd) => handle_export_command(&open_storage()?, cmd)?,
        Commands::Analytics { from, to, json } => handle_analytics_command(
            &open_storage()?,
            from.as_deref(),
            to.as_deref(),
            json,
        )?,
        Commands::Budget(cmd) => handle_budget_command(&open_storage()?, cmd)?,
        Commands::Bank(cmd) => handle_bank_command(&open_storage()?, cmd)?,
        Commands::Category(cmd) => handle_category_command(&open_storage()?, cmd)?,
        Commands::Test(cmd) => handle_test_command(&open_storage()?, cmd)?,
    }

    Ok(())
}
