//! Budget model
//!
//! A spending limit for one category over a weekly, monthly or yearly period.
//! `spent` is edited by hand; nothing ties it to recorded transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::MAX_CATEGORY_LEN;
use super::ids::{BudgetId, UserId};
use super::money::Money;

/// Budget period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

/// How close a budget is to its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// Under 80% used
    Good,
    /// 80% or more used
    Warning,
    /// 100% or more used
    Exceeded,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "good"),
            Self::Warning => write!(f, "warning"),
            Self::Exceeded => write!(f, "exceeded"),
        }
    }
}

/// A per-category spending budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub user_id: UserId,
    pub category: String,
    pub amount: Money,
    #[serde(default)]
    pub spent: Money,
    pub period: BudgetPeriod,
    pub created_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(
        user_id: UserId,
        category: impl Into<String>,
        amount: Money,
        period: BudgetPeriod,
    ) -> Self {
        Self {
            id: BudgetId::new(),
            user_id,
            category: category.into(),
            amount,
            spent: Money::zero(),
            period,
            created_at: Utc::now(),
        }
    }

    /// Percentage of the budget already spent
    pub fn percent_used(&self) -> f64 {
        if self.amount.is_zero() {
            return 0.0;
        }
        self.spent.minor() as f64 / self.amount.minor() as f64 * 100.0
    }

    pub fn remaining(&self) -> Money {
        self.amount - self.spent
    }

    pub fn status(&self) -> BudgetStatus {
        let pct = self.percent_used();
        if pct >= 100.0 {
            BudgetStatus::Exceeded
        } else if pct >= 80.0 {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Good
        }
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.category.trim().is_empty() {
            return Err(BudgetValidationError::MissingCategory);
        }
        if self.category.chars().count() > MAX_CATEGORY_LEN {
            return Err(BudgetValidationError::CategoryTooLong);
        }
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount);
        }
        if self.spent.is_negative() {
            return Err(BudgetValidationError::NegativeSpent);
        }
        Ok(())
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    MissingCategory,
    CategoryTooLong,
    NonPositiveAmount,
    NegativeSpent,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCategory => write!(f, "Category is required"),
            Self::CategoryTooLong => write!(
                f,
                "Category must be less than {} characters",
                MAX_CATEGORY_LEN
            ),
            Self::NonPositiveAmount => write!(f, "Budget amount must be greater than 0"),
            Self::NegativeSpent => write!(f, "Spent amount cannot be negative"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
