//! Custom error types for student-finance
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// Failures that stop a CSV import before any row is produced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Fewer than a header line and one data line remained after dropping blanks
    #[error("CSV file must have a header row and at least one data row")]
    EmptyFile,

    /// One or more required columns had no matching header cell
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Could not read CSV: {0}")]
    Malformed(String),
}

/// The main error type for student-finance operations
#[derive(Error, Debug)]
pub enum FinanceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Bad user input (amount, date, category, description...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Failure reported by the persistence backend
    #[error("Backend error: {0}")]
    Backend(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// No active session
    #[error("You must be logged in to {0}")]
    NotAuthenticated(&'static str),

    /// Import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FinanceError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for bank accounts
    pub fn bank_account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Bank account",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for FinanceError {
    fn from(err: csv::Error) -> Self {
        Self::Io(format!("CSV error: {}", err))
    }
}

/// Result type alias for student-finance operations
pub type FinanceResult<T> = Result<T, FinanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FinanceError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = FinanceError::budget_not_found("Food");
        assert_eq!(err.to_string(), "Budget not found: Food");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_missing_columns_lists_every_field() {
        let err: FinanceError =
            ImportError::MissingColumns(vec!["amount".into(), "type".into()]).into();
        assert_eq!(
            err.to_string(),
            "Import error: Missing required columns: amount, type"
        );
    }

    #[test]
    fn test_not_authenticated() {
        let err = FinanceError::NotAuthenticated("import transactions");
        assert_eq!(
            err.to_string(),
            "You must be logged in to import transactions"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FinanceError = io_err.into();
        assert!(matches!(err, FinanceError::Io(_)));
    }
}
