//! Bank account repository backed by bank_accounts.json
//!
//! At most one account per user carries `is_primary`; storing a primary
//! account clears the flag on that user's other accounts.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::{BankAccount, BankAccountId, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BankAccountData {
    accounts: Vec<BankAccount>,
}

/// Primary first, then newest first
fn primary_first(list: &mut [BankAccount]) {
    list.sort_by(|a, b| {
        b.is_primary
            .cmp(&a.is_primary)
            .then(b.created_at.cmp(&a.created_at))
    });
}

pub struct BankAccountRepository {
    path: PathBuf,
    data: RwLock<HashMap<BankAccountId, BankAccount>>,
}

impl BankAccountRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: BankAccountData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;

        data.clear();
        for account in file_data.accounts {
            data.insert(account.id, account);
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut accounts: Vec<_> = data.values().cloned().collect();
        primary_first(&mut accounts);

        write_json_atomic(&self.path, &BankAccountData { accounts })
    }

    pub fn get(&self, id: BankAccountId) -> Result<Option<BankAccount>, FinanceError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    pub fn list_for_user(&self, user_id: UserId) -> Result<Vec<BankAccount>, FinanceError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut list: Vec<_> = data
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        primary_first(&mut list);
        Ok(list)
    }

    pub fn upsert(&self, account: BankAccount) -> Result<(), FinanceError> {
        let mut data = self.data.write().map_err(lock_error)?;

        if let Some(existing) = data.get(&account.id) {
            if existing.user_id != account.user_id {
                return Err(FinanceError::bank_account_not_found(account.id.to_string()));
            }
        }

        if account.is_primary {
            for other in data
                .values_mut()
                .filter(|a| a.user_id == account.user_id && a.id != account.id)
            {
                other.is_primary = false;
            }
        }

        data.insert(account.id, account);
        Ok(())
    }

    pub fn delete(&self, user_id: UserId, id: BankAccountId) -> Result<bool, FinanceError> {
        let mut data = self.data.write().map_err(lock_error)?;

        match data.get(&id) {
            Some(account) if account.user_id == user_id => Ok(data.remove(&id).is_some()),
            _ => Ok(false),
        }
    }
}
