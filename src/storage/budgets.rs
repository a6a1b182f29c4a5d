//! Budget repository backed by budgets.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::{Budget, BudgetId, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    budgets: Vec<Budget>,
}

pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<HashMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: BudgetData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;

        data.clear();
        for budget in file_data.budgets {
            data.insert(budget.id, budget);
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut budgets: Vec<_> = data.values().cloned().collect();
        budgets.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        write_json_atomic(&self.path, &BudgetData { budgets })
    }

    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, FinanceError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// A user's budgets, most recently created first
    pub fn list_for_user(&self, user_id: UserId) -> Result<Vec<Budget>, FinanceError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut list: Vec<_> = data
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    /// Insert or replace a budget owned by `budget.user_id`
    ///
    /// Replacing a budget that belongs to someone else is reported as not found.
    pub fn upsert(&self, budget: Budget) -> Result<(), FinanceError> {
        let mut data = self.data.write().map_err(lock_error)?;

        if let Some(existing) = data.get(&budget.id) {
            if existing.user_id != budget.user_id {
                return Err(FinanceError::budget_not_found(budget.id.to_string()));
            }
        }

        data.insert(budget.id, budget);
        Ok(())
    }

    pub fn delete(&self, user_id: UserId, id: BudgetId) -> Result<bool, FinanceError> {
        let mut data = self.data.write().map_err(lock_error)?;

        match data.get(&id) {
            Some(budget) if budget.user_id == user_id => Ok(data.remove(&id).is_some()),
            _ => Ok(false),
        }
    }
}
