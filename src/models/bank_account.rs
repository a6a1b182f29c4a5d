//! Bank account model
//!
//! Bookkeeping record of a bank account: the balance is entered by the user,
//! not derived from transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BankAccountId, UserId};
use super::money::Money;

/// Kind of bank account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BankAccountType {
    #[default]
    Savings,
    Current,
    Student,
}

impl BankAccountType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "savings" => Some(Self::Savings),
            "current" => Some(Self::Current),
            "student" => Some(Self::Student),
            _ => None,
        }
    }
}

impl fmt::Display for BankAccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Savings => write!(f, "Savings Account"),
            Self::Current => write!(f, "Current Account"),
            Self::Student => write!(f, "Student Account"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: BankAccountId,
    pub user_id: UserId,
    pub bank_name: String,
    pub account_type: BankAccountType,
    pub account_number: String,
    #[serde(default)]
    pub balance: Money,
    pub currency: String,
    #[serde(default)]
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

impl BankAccount {
    pub fn new(
        user_id: UserId,
        bank_name: impl Into<String>,
        account_type: BankAccountType,
        account_number: impl Into<String>,
    ) -> Self {
        Self {
            id: BankAccountId::new(),
            user_id,
            bank_name: bank_name.into(),
            account_type,
            account_number: account_number.into(),
            balance: Money::zero(),
            currency: "INR".to_string(),
            is_primary: false,
            created_at: Utc::now(),
        }
    }

    /// Account number with everything but the last four characters starred out
    pub fn masked_number(&self) -> String {
        mask_account_number(&self.account_number)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.bank_name.trim().is_empty() {
            return Err("Bank name is required".into());
        }
        if self.account_number.trim().is_empty() {
            return Err("Account number is required".into());
        }
        if self.currency.len() != 3 {
            return Err("Currency must be 3 characters".into());
        }
        Ok(())
    }
}

/// Mask an account number, keeping only the last four characters visible
pub fn mask_account_number(account_number: &str) -> String {
    let chars: Vec<char> = account_number.chars().collect();
    if chars.len() <= 4 {
        return account_number.to_string();
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}
