//! Category model
//!
//! Categories are per-user labels, created implicitly the first time a
//! transaction or budget names them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, UserId};
use super::transaction::TransactionType;

/// Maximum category name length
pub const MAX_CATEGORY_LEN: usize = 50;

/// A user-scoped category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub user_id: UserId,
    pub name: String,

    /// Type of the transaction that first created this category
    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(user_id: UserId, name: impl Into<String>, kind: TransactionType) -> Self {
        Self {
            id: CategoryId::new(),
            user_id,
            name: name.into(),
            kind,
            created_at: Utc::now(),
        }
    }

    /// Whether this category is the one called `name` for `user_id`
    pub fn is_named(&self, user_id: UserId, name: &str) -> bool {
        self.user_id == user_id && self.name == name
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.chars().count() > MAX_CATEGORY_LEN {
            return Err(CategoryValidationError::NameTooLong(self.name.chars().count()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category is required"),
            Self::NameTooLong(len) => write!(
                f,
                "Category must be less than {} characters (got {})",
                MAX_CATEGORY_LEN, len
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_named_scopes_by_owner() {
        let owner = UserId::new();
        let other = UserId::new();
        let cat = Category::new(owner, "Food", TransactionType::Expense);

        assert!(cat.is_named(owner, "Food"));
        assert!(!cat.is_named(other, "Food"));
        assert!(!cat.is_named(owner, "food"));
    }

    #[test]
    fn test_validation() {
        let owner = UserId::new();
        assert!(Category::new(owner, "Rent", TransactionType::Expense)
            .validate()
            .is_ok());
        assert_eq!(
            Category::new(owner, "  ", TransactionType::Expense).validate(),
            Err(CategoryValidationError::EmptyName)
        );
        assert!(matches!(
            Category::new(owner, "x".repeat(51), TransactionType::Expense).validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));
    }
}
