//! Sign-in, sign-out and settings commands

use tracing::info;

use crate::config::paths::FinancePaths;
use crate::config::settings::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::currency::find_currency;
use crate::validation::validate_email;

pub fn handle_login(paths: &FinancePaths, email: &str) -> FinanceResult<()> {
    if !validate_email(email.trim()) {
        return Err(FinanceError::Validation(format!(
            "Invalid email address: {}",
            email
        )));
    }

    let mut settings = Settings::load_or_create(paths)?;
    let session = settings.sign_in(email);
    settings.save(paths)?;

    info!(user = %session.user_id, "signed in");
    println!("Signed in as {}", session.email);
    Ok(())
}

pub fn handle_logout(paths: &FinancePaths) -> FinanceResult<()> {
    let mut settings = Settings::load_or_create(paths)?;
    match settings.sign_out() {
        Some(session) => {
            settings.save(paths)?;
            println!("Signed out {}", session.email);
        }
        None => println!("Not signed in."),
    }
    Ok(())
}

pub fn handle_whoami(paths: &FinancePaths) -> FinanceResult<()> {
    let settings = Settings::load_or_create(paths)?;
    match settings.session {
        Some(session) => println!("{} ({})", session.email, session.user_id),
        None => println!("Not signed in."),
    }
    Ok(())
}

/// Show settings, or change the preferred currency
pub fn handle_config_command(paths: &FinancePaths, currency: Option<&str>) -> FinanceResult<()> {
    let mut settings = Settings::load_or_create(paths)?;

    if let Some(code) = currency {
        let currency = find_currency(code).ok_or_else(|| {
            FinanceError::Validation(format!("Unknown currency: {}", code))
        })?;
        settings.preferred_currency = currency.code.to_string();
        settings.save(paths)?;
        println!("Preferred currency set to {} ({})", currency.code, currency.name);
        return Ok(());
    }

    println!("student-finance configuration");
    println!("=============================");
    println!("Config file:    {}", paths.settings_file().display());
    println!("Data directory: {}", paths.data_dir().display());
    println!();
    println!("Currency:       {}", settings.preferred_currency);
    println!("Date format:    {}", settings.date_format);
    match &settings.session {
        Some(session) => println!("Signed in as:   {}", session.email),
        None => println!("Signed in as:   (nobody)"),
    }
    Ok(())
}
