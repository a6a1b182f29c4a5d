//! User settings for student-finance
//!
//! Holds the preferred currency, date format and the active session (the
//! local stand-in for the hosted auth service's "current user").

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::paths::FinancePaths;
use crate::backend::Session;
use crate::error::FinanceError;
use crate::models::UserId;

/// User settings persisted to `config.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// ISO 4217 code used for display and conversion
    #[serde(default = "default_currency")]
    pub preferred_currency: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Signed-in user, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,

    /// Emails that have signed in on this machine, so signing in again
    /// reopens the same data
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub known_users: BTreeMap<String, UserId>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            preferred_currency: default_currency(),
            date_format: default_date_format(),
            session: None,
            known_users: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinancePaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FinanceError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinanceError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Start a session for `email`, reusing its user ID if seen before
    pub fn sign_in(&mut self, email: &str) -> Session {
        let email = email.trim().to_lowercase();
        let user_id = *self
            .known_users
            .entry(email.clone())
            .or_insert_with(UserId::new);
        let session = Session::new(user_id, email);
        self.session = Some(session.clone());
        session
    }

    /// Clear the active session; returns it if there was one
    pub fn sign_out(&mut self) -> Option<Session> {
        self.session.take()
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinancePaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FinanceError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
