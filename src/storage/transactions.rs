//! Transaction repository backed by transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::backend::TransactionFilter;
use crate::error::FinanceError;
use crate::models::{Transaction, TransactionId, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Newest first: by date, then by creation time
fn newest_first(list: &mut [Transaction]) {
    list.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then(b.created_at.cmp(&a.created_at))
    });
}

pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: TransactionData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;

        data.clear();
        for txn in file_data.transactions {
            data.insert(txn.id, txn);
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        newest_first(&mut transactions);

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, FinanceError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// A user's transactions, newest first, with `filter` applied
    pub fn list_for_user(
        &self,
        user_id: UserId,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, FinanceError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut owned: Vec<_> = data
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut owned);

        Ok(filter.apply(&owned))
    }

    pub fn insert(&self, txn: Transaction) -> Result<(), FinanceError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Remove a transaction if it exists and belongs to `user_id`
    pub fn delete(&self, user_id: UserId, id: TransactionId) -> Result<bool, FinanceError> {
        let mut data = self.data.write().map_err(lock_error)?;

        match data.get(&id) {
            Some(txn) if txn.user_id == user_id => Ok(data.remove(&id).is_some()),
            _ => Ok(false),
        }
    }

    pub fn count(&self) -> Result<usize, FinanceError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        (temp_dir, TransactionRepository::new(path))
    }

    fn txn(user: UserId, day: u32) -> Transaction {
        Transaction::new(
            user,
            Money::from_minor(1500),
            "Food",
            "Lunch",
            TransactionType::Expense,
            NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
        )
    }

    #[test]
    fn test_list_is_scoped_and_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        let asha = UserId::new();
        let ravi = UserId::new();

        repo.insert(txn(asha, 3)).unwrap();
        repo.insert(txn(asha, 9)).unwrap();
        repo.insert(txn(ravi, 5)).unwrap();

        let list = repo
            .list_for_user(asha, &TransactionFilter::default())
            .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].date.to_string(), "2024-02-09");
        assert_eq!(list[1].date.to_string(), "2024-02-03");
    }

    #[test]
    fn test_delete_requires_owner() {
        let (_temp_dir, repo) = create_test_repo();
        let asha = UserId::new();
        let t = txn(asha, 1);
        let id = t.id;
        repo.insert(t).unwrap();

        assert!(!repo.delete(UserId::new(), id).unwrap());
        assert!(repo.delete(asha, id).unwrap());
        assert!(repo.get(id).unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let (temp_dir, repo) = create_test_repo();
        let asha = UserId::new();
        repo.insert(txn(asha, 1)).unwrap();
        repo.insert(txn(asha, 2)).unwrap();
        repo.save().unwrap();

        let reloaded = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 2);
    }
}
