//! Category CLI commands

use clap::Subcommand;

use crate::backend::Backend;
use crate::display::format_category_list;
use crate::error::FinanceResult;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List your categories
    List,
}

pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> FinanceResult<()> {
    let session = storage.require_session("view categories")?;

    match cmd {
        CategoryCommands::List => {
            let categories = storage.list_categories(&session)?;
            print!("{}", format_category_list(&categories));
        }
    }

    Ok(())
}
