//! Currency table and locale-aware formatting
//!
//! Rates are fixed constants expressed per US dollar. Conversion is a
//! convenience for display, not an accounting-grade FX service.

use std::fmt;

use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    /// Units of this currency per 1 USD
    pub rate: f64,
}

pub const CURRENCIES: &[Currency] = &[
    Currency { code: "INR", name: "Indian Rupee", symbol: "₹", rate: 83.12 },
    Currency { code: "USD", name: "US Dollar", symbol: "$", rate: 1.0 },
    Currency { code: "EUR", name: "Euro", symbol: "€", rate: 0.85 },
    Currency { code: "GBP", name: "British Pound", symbol: "£", rate: 0.73 },
    Currency { code: "CAD", name: "Canadian Dollar", symbol: "C$", rate: 1.25 },
    Currency { code: "AUD", name: "Australian Dollar", symbol: "A$", rate: 1.35 },
    Currency { code: "JPY", name: "Japanese Yen", symbol: "¥", rate: 110.0 },
    Currency { code: "CHF", name: "Swiss Franc", symbol: "CHF", rate: 0.92 },
    Currency { code: "CNY", name: "Chinese Yuan", symbol: "¥", rate: 6.45 },
    Currency { code: "BRL", name: "Brazilian Real", symbol: "R$", rate: 5.2 },
];

/// Look up a currency by ISO code, ignoring case
pub fn find_currency(code: &str) -> Option<&'static Currency> {
    let code = code.trim();
    CURRENCIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCurrency(pub String);

impl fmt::Display for UnknownCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown currency: {}", self.0)
    }
}

impl std::error::Error for UnknownCurrency {}

/// Convert `amount` between two currencies through USD
pub fn convert(amount: Money, from: &str, to: &str) -> Result<Money, UnknownCurrency> {
    let from = find_currency(from).ok_or_else(|| UnknownCurrency(from.to_string()))?;
    let to = find_currency(to).ok_or_else(|| UnknownCurrency(to.to_string()))?;

    let usd = amount.as_major() / from.rate;
    Ok(Money::from_major(usd * to.rate))
}

/// Group an integer's digits the Indian way: last three, then pairs
fn group_indian(mut digits: String) -> String {
    if digits.len() <= 3 {
        return digits;
    }
    let last_three = digits.split_off(digits.len() - 3);
    let mut groups: Vec<String> = Vec::new();
    while digits.len() > 2 {
        groups.insert(0, digits.split_off(digits.len() - 2));
    }
    if !digits.is_empty() {
        groups.insert(0, digits);
    }
    groups.push(last_three);
    groups.join(",")
}

/// Format with Indian digit grouping and two decimals (e.g. `12,34,567.89`)
pub fn format_indian(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    let abs = amount.abs();
    format!(
        "{}{}.{:02}",
        sign,
        group_indian(abs.whole().to_string()),
        abs.fraction()
    )
}

/// `en-IN` INR currency format without fraction digits (e.g. `₹1,23,457`)
pub fn format_inr(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    let rounded = (amount.minor().abs() + 50) / 100;
    format!("{}₹{}", sign, group_indian(rounded.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_currency() {
        assert_eq!(find_currency("inr").unwrap().symbol, "₹");
        assert!(find_currency("XYZ").is_none());
    }

    #[test]
    fn test_convert_via_usd() {
        let inr = convert(Money::from_minor(100), "USD", "INR").unwrap();
        assert_eq!(inr, Money::from_minor(8312));

        let usd = convert(Money::from_minor(8312), "INR", "USD").unwrap();
        assert_eq!(usd, Money::from_minor(100));

        assert!(convert(Money::from_minor(100), "USD", "ABC").is_err());
    }

    #[test]
    fn test_format_indian() {
        assert_eq!(format_indian(Money::from_minor(123456789)), "12,34,567.89");
        assert_eq!(format_indian(Money::from_minor(99900)), "999.00");
        assert_eq!(format_indian(Money::from_minor(100000)), "1,000.00");
        assert_eq!(format_indian(Money::from_minor(-1000000)), "-10,000.00");
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(Money::from_minor(12345678)), "₹1,23,457");
        assert_eq!(format_inr(Money::from_minor(4500)), "₹45");
        assert_eq!(format_inr(Money::zero()), "₹0");
        assert_eq!(format_inr(Money::from_minor(-250050)), "-₹2,501");
    }
}
