//! Bank account service

use tracing::info;

use crate::backend::{Backend, Session};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{BankAccount, BankAccountType, Money};

/// Service for bank account bookkeeping
pub struct BankAccountService<'a, B: Backend> {
    backend: &'a B,
}

#[derive(Debug, Clone)]
pub struct CreateBankAccountInput {
    pub bank_name: String,
    pub account_type: BankAccountType,
    pub account_number: String,
    pub balance: Money,
    pub currency: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BankAccountUpdate {
    pub bank_name: Option<String>,
    pub account_type: Option<BankAccountType>,
    pub account_number: Option<String>,
    pub balance: Option<Money>,
    pub currency: Option<String>,
    pub is_primary: Option<bool>,
}

/// Sum of balances across accounts
///
/// Balances are added as-is; accounts in other currencies are not converted.
pub fn total_balance(accounts: &[BankAccount]) -> Money {
    accounts.iter().map(|a| a.balance).sum()
}

impl<'a, B: Backend> BankAccountService<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub fn create(
        &self,
        session: &Session,
        input: CreateBankAccountInput,
    ) -> FinanceResult<BankAccount> {
        let mut account = BankAccount::new(
            session.user_id,
            input.bank_name.trim(),
            input.account_type,
            input.account_number.trim(),
        );
        account.balance = input.balance;
        account.currency = input.currency.trim().to_uppercase();
        account.is_primary = input.is_primary;

        account.validate().map_err(FinanceError::Validation)?;

        let account = self.backend.upsert_bank_account(session, account)?;
        info!(bank = %account.bank_name, number = %account.masked_number(), "bank account added");
        Ok(account)
    }

    /// The user's accounts, primary first
    pub fn list(&self, session: &Session) -> FinanceResult<Vec<BankAccount>> {
        self.backend.list_bank_accounts(session)
    }

    /// Find an account by ID (full or short) or by its last four digits
    pub fn find(&self, session: &Session, identifier: &str) -> FinanceResult<BankAccount> {
        let accounts = self.backend.list_bank_accounts(session)?;
        let identifier = identifier.trim();

        accounts
            .iter()
            .find(|a| a.id.matches(identifier))
            .or_else(|| {
                accounts.iter().find(|a| {
                    identifier.len() >= 4 && a.account_number.ends_with(identifier)
                })
            })
            .cloned()
            .ok_or_else(|| FinanceError::bank_account_not_found(identifier))
    }

    pub fn update(
        &self,
        session: &Session,
        identifier: &str,
        update: BankAccountUpdate,
    ) -> FinanceResult<BankAccount> {
        let mut account = self.find(session, identifier)?;

        if let Some(bank_name) = update.bank_name {
            account.bank_name = bank_name.trim().to_string();
        }
        if let Some(account_type) = update.account_type {
            account.account_type = account_type;
        }
        if let Some(number) = update.account_number {
            account.account_number = number.trim().to_string();
        }
        if let Some(balance) = update.balance {
            account.balance = balance;
        }
        if let Some(currency) = update.currency {
            account.currency = currency.trim().to_uppercase();
        }
        if let Some(is_primary) = update.is_primary {
            account.is_primary = is_primary;
        }

        account.validate().map_err(FinanceError::Validation)?;
        self.backend.upsert_bank_account(session, account)
    }

    pub fn delete(&self, session: &Session, identifier: &str) -> FinanceResult<BankAccount> {
        let account = self.find(session, identifier)?;
        if !self.backend.delete_bank_account(session, account.id)? {
            return Err(FinanceError::bank_account_not_found(identifier));
        }
        info!(bank = %account.bank_name, "bank account deleted");
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancePaths;
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn input(bank: &str, number: &str, balance: i64, primary: bool) -> CreateBankAccountInput {
        CreateBankAccountInput {
            bank_name: bank.into(),
            account_type: BankAccountType::Savings,
            account_number: number.into(),
            balance: Money::from_minor(balance),
            currency: "inr".into(),
            is_primary: primary,
        }
    }

    #[test]
    fn test_create_list_primary_first() {
        let (_temp_dir, storage) = create_test_storage();
        let session = Session::sign_in("asha@college.edu");
        let service = BankAccountService::new(&storage);

        service
            .create(&session, input("SBI", "111122223333", 1_000_000, true))
            .unwrap();
        let hdfc = service
            .create(&session, input("HDFC", "444455556666", 250_000, true))
            .unwrap();
        service
            .create(&session, input("ICICI", "777788889999", 50_000, false))
            .unwrap();

        let list = service.list(&session).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].id, hdfc.id);
        assert_eq!(list.iter().filter(|a| a.is_primary).count(), 1);
        assert_eq!(list[0].currency, "INR");
        assert_eq!(total_balance(&list), Money::from_minor(1_300_000));
    }

    #[test]
    fn test_find_by_last_digits_and_update() {
        let (_temp_dir, storage) = create_test_storage();
        let session = Session::sign_in("asha@college.edu");
        let service = BankAccountService::new(&storage);
        service
            .create(&session, input("SBI", "111122223333", 0, false))
            .unwrap();

        let updated = service
            .update(
                &session,
                "3333",
                BankAccountUpdate {
                    balance: Some(Money::from_minor(99_900)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.balance, Money::from_minor(99_900));
        assert_eq!(updated.masked_number(), "********3333");
    }

    #[test]
    fn test_validation_and_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let session = Session::sign_in("asha@college.edu");
        let service = BankAccountService::new(&storage);

        let err = service.create(&session, input("  ", "1234", 0, false)).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Bank name is required");

        let account = service
            .create(&session, input("SBI", "12345678", 0, false))
            .unwrap();
        service.delete(&session, &account.id.to_string()).unwrap();
        assert!(service.list(&session).unwrap().is_empty());
    }
}
