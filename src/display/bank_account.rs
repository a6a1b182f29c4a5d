//! Bank account display formatting

use tabled::Tabled;

use crate::models::BankAccount;
use crate::services::bank_account::total_balance;

use super::{money, render_table};

#[derive(Tabled)]
struct BankAccountRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Bank")]
    bank: String,
    #[tabled(rename = "Type")]
    account_type: String,
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "")]
    primary: &'static str,
}

/// Account numbers are always masked
pub fn format_bank_account_list(accounts: &[BankAccount]) -> String {
    if accounts.is_empty() {
        return "No bank accounts found.\n".to_string();
    }

    let rows = accounts
        .iter()
        .map(|a| BankAccountRow {
            id: a.id.to_string(),
            bank: a.bank_name.clone(),
            account_type: a.account_type.to_string(),
            number: a.masked_number(),
            balance: format!("{} {:.2}", a.currency, a.balance.as_major()),
            primary: if a.is_primary { "primary" } else { "" },
        })
        .collect();

    let mut output = render_table(rows, "");
    output.push_str(&format!("\nTotal balance: {}\n", money(total_balance(accounts))));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BankAccountType, Money, UserId};

    #[test]
    fn test_numbers_are_masked() {
        let mut account = BankAccount::new(
            UserId::new(),
            "State Bank",
            BankAccountType::Savings,
            "123456789012",
        );
        account.balance = Money::from_minor(1_250_000);
        account.is_primary = true;

        let formatted = format_bank_account_list(&[account]);
        assert!(formatted.contains("********9012"));
        assert!(!formatted.contains("123456789012"));
        assert!(formatted.contains("INR 12500.00"));
        assert!(formatted.contains("primary"));
        assert!(formatted.contains("Total balance: ₹12,500.00"));
    }

    #[test]
    fn test_empty() {
        assert!(format_bank_account_list(&[]).contains("No bank accounts"));
    }
}
