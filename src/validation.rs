//! Input validation utilities
//!
//! Pure checks on amounts, dates and email addresses, plus the sanitizers
//! applied to free-text fields before display.

use chrono::NaiveDate;
use std::fmt;

use crate::models::Money;

/// Largest amount accepted from user input (1 crore)
pub const MAX_AMOUNT: Money = Money::from_minor(10_000_000 * 100);

/// Maximum description length
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Date layouts accepted by the importer, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    InvalidNumber,
    NotPositive,
    TooLarge,
}

impl fmt::Display for AmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber => write!(f, "Invalid number format"),
            Self::NotPositive => write!(f, "Amount must be greater than 0"),
            Self::TooLarge => write!(f, "Amount is too large"),
        }
    }
}

impl std::error::Error for AmountError {}

/// Validate a user-entered amount
///
/// Non-numeric input, anything that rounds to zero or below, and amounts
/// above [`MAX_AMOUNT`] are rejected.
pub fn validate_amount(input: &str) -> Result<Money, AmountError> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| AmountError::InvalidNumber)?;

    if !value.is_finite() {
        return Err(AmountError::InvalidNumber);
    }

    let amount = Money::from_major(value);
    if !amount.is_positive() {
        return Err(AmountError::NotPositive);
    }
    if amount > MAX_AMOUNT {
        return Err(AmountError::TooLarge);
    }

    Ok(amount)
}

fn parse_with_formats(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse a date the way the importer does
///
/// The value is tried as-is, then with `-` swapped for `/`, then with `/`
/// swapped for `-`, against `YYYY-MM-DD`, `YYYY/MM/DD`, `DD/MM/YYYY` and
/// `DD-MM-YYYY`. The result is a calendar date, so rendering it always
/// gives the zero-padded canonical `YYYY-MM-DD` form.
pub fn normalize_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    [
        input.to_string(),
        input.replace('-', "/"),
        input.replace('/', "-"),
    ]
    .iter()
    .find_map(|candidate| parse_with_formats(candidate))
}

/// Whether the importer accepts `input` as a date
pub fn is_valid_import_date(input: &str) -> bool {
    normalize_date(input).is_some()
}

/// Check the `local@domain.tld` shape with no whitespace
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Trim and strip characters that could open markup
pub fn sanitize_input(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\'' | '&'))
        .collect()
}

pub fn escape_html(unsafe_text: &str) -> String {
    let mut out = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
