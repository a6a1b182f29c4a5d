//! CLI command handlers for CSV import and the import template

use std::path::Path;

use chrono::Local;

use crate::display::{format_import_outcome, format_import_preview};
use crate::error::{FinanceError, FinanceResult};
use crate::services::import::template;
use crate::services::ImportService;
use crate::storage::Storage;

/// Preview a CSV file, then import its eligible rows unless `dry_run`
pub fn handle_import_command(storage: &Storage, file: &Path, dry_run: bool) -> FinanceResult<()> {
    let session = storage.require_session("import transactions")?;

    if !file.exists() {
        return Err(FinanceError::Io(format!("File not found: {}", file.display())));
    }

    let service = ImportService::new(storage);
    let preview = service.preview_file(file)?;

    println!("Import Preview: {}", file.display());
    print!("{}", format_import_preview(&preview));
    println!();

    if dry_run {
        println!("Dry run: nothing was imported.");
        return Ok(());
    }

    let outcome = service.confirm(&session, &preview)?;
    print!("{}", format_import_outcome(&outcome));
    Ok(())
}

/// Write the sample CSV to `output`, or print it
pub fn handle_template_command(output: Option<&Path>) -> FinanceResult<()> {
    let text = template(Local::now().date_naive());

    match output {
        Some(path) => {
            std::fs::write(path, text).map_err(|e| {
                FinanceError::Io(format!("Failed to write {}: {}", path.display(), e))
            })?;
            println!("Template written to {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}
