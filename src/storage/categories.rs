//! Category repository backed by categories.json
//!
//! Categories are looked up by exact name within one user's set. Creation
//! goes through [`CategoryRepository::get_or_create`], which does the lookup
//! and the insert under a single write lock.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::FinanceError;
use crate::models::{Category, CategoryId, TransactionType, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    categories: Vec<Category>,
}

pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: CategoryData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;

        data.clear();
        for category in file_data.categories {
            data.insert(category.id, category);
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut categories: Vec<_> = data.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.created_at.cmp(&b.created_at)));

        write_json_atomic(&self.path, &CategoryData { categories })
    }

    pub fn find_by_name(
        &self,
        user_id: UserId,
        name: &str,
    ) -> Result<Option<Category>, FinanceError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.values().find(|c| c.is_named(user_id, name)).cloned())
    }

    /// Return the user's category called `name`, creating it if absent
    ///
    /// The boolean is `true` when a new category was inserted.
    pub fn get_or_create(
        &self,
        user_id: UserId,
        name: &str,
        kind: TransactionType,
    ) -> Result<(Category, bool), FinanceError> {
        let mut data = self.data.write().map_err(lock_error)?;

        if let Some(existing) = data.values().find(|c| c.is_named(user_id, name)) {
            return Ok((existing.clone(), false));
        }

        let category = Category::new(user_id, name, kind);
        category
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        debug!(category = %category.name, kind = %kind, "creating category");
        data.insert(category.id, category.clone());
        Ok((category, true))
    }

    /// A user's categories sorted by name
    pub fn list_for_user(&self, user_id: UserId) -> Result<Vec<Category>, FinanceError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut list: Vec<_> = data
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, CategoryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categories.json");
        (temp_dir, CategoryRepository::new(path))
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();

        let (first, created) = repo
            .get_or_create(user, "Food", TransactionType::Expense)
            .unwrap();
        assert!(created);

        let (second, created) = repo
            .get_or_create(user, "Food", TransactionType::Expense)
            .unwrap();
        assert!(!created);
        assert_eq!(first.id, second.id);
        assert_eq!(repo.list_for_user(user).unwrap().len(), 1);
    }

    #[test]
    fn test_names_are_scoped_per_user_and_case_sensitive() {
        let (_temp_dir, repo) = create_test_repo();
        let asha = UserId::new();
        let ravi = UserId::new();

        let (a, _) = repo
            .get_or_create(asha, "Food", TransactionType::Expense)
            .unwrap();
        let (b, _) = repo
            .get_or_create(ravi, "Food", TransactionType::Expense)
            .unwrap();
        let (c, _) = repo
            .get_or_create(asha, "food", TransactionType::Expense)
            .unwrap();

        assert_ne!(a.id, b.id);
        assert_ne!(a.id, c.id);
        assert!(repo.find_by_name(ravi, "food").unwrap().is_none());
    }

    #[test]
    fn test_rejects_overlong_name() {
        let (_temp_dir, repo) = create_test_repo();
        let name = "x".repeat(51);
        let err = repo
            .get_or_create(UserId::new(), &name, TransactionType::Expense)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_save_and_load() {
        let (temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        repo.get_or_create(user, "Rent", TransactionType::Expense)
            .unwrap();
        repo.save().unwrap();

        let reloaded = CategoryRepository::new(temp_dir.path().join("categories.json"));
        reloaded.load().unwrap();
        assert!(reloaded.find_by_name(user, "Rent").unwrap().is_some());
    }
}
