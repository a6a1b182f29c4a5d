//! Budget service
//!
//! Per-category spending limits. `spent` is entered by hand and is not
//! derived from transactions.

use tracing::info;

use crate::backend::{Backend, Session};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Budget, BudgetPeriod, BudgetStatus, Money};

/// Service for budget management
pub struct BudgetService<'a, B: Backend> {
    backend: &'a B,
}

/// Input for creating a new budget
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    pub category: String,
    pub amount: Money,
    pub period: BudgetPeriod,
}

/// Fields that may be changed on an existing budget
#[derive(Debug, Clone, Default)]
pub struct BudgetUpdate {
    pub category: Option<String>,
    pub amount: Option<Money>,
    pub period: Option<BudgetPeriod>,
    pub spent: Option<Money>,
}

/// Totals across a set of budgets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BudgetTotals {
    pub budgeted: Money,
    pub spent: Money,
    pub remaining: Money,
    pub exceeded: usize,
    pub warning: usize,
}

impl BudgetTotals {
    pub fn from_budgets(budgets: &[Budget]) -> Self {
        let budgeted: Money = budgets.iter().map(|b| b.amount).sum();
        let spent: Money = budgets.iter().map(|b| b.spent).sum();
        let with_status =
            |status: BudgetStatus| budgets.iter().filter(|b| b.status() == status).count();

        Self {
            budgeted,
            spent,
            remaining: budgeted - spent,
            exceeded: with_status(BudgetStatus::Exceeded),
            warning: with_status(BudgetStatus::Warning),
        }
    }
}

impl<'a, B: Backend> BudgetService<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub fn create(&self, session: &Session, input: CreateBudgetInput) -> FinanceResult<Budget> {
        let budget = Budget::new(
            session.user_id,
            input.category.trim(),
            input.amount,
            input.period,
        );
        budget
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let budget = self.backend.upsert_budget(session, budget)?;
        info!(category = %budget.category, amount = %budget.amount, "budget created");
        Ok(budget)
    }

    pub fn list(&self, session: &Session) -> FinanceResult<Vec<Budget>> {
        self.backend.list_budgets(session)
    }

    /// Find a budget by ID (full or short) or by category name
    pub fn find(&self, session: &Session, identifier: &str) -> FinanceResult<Budget> {
        let budgets = self.backend.list_budgets(session)?;
        let identifier = identifier.trim();

        budgets
            .iter()
            .find(|b| b.id.matches(identifier))
            .or_else(|| {
                budgets
                    .iter()
                    .find(|b| b.category.eq_ignore_ascii_case(identifier))
            })
            .cloned()
            .ok_or_else(|| FinanceError::budget_not_found(identifier))
    }

    pub fn update(
        &self,
        session: &Session,
        identifier: &str,
        update: BudgetUpdate,
    ) -> FinanceResult<Budget> {
        let mut budget = self.find(session, identifier)?;

        if let Some(category) = update.category {
            budget.category = category.trim().to_string();
        }
        if let Some(amount) = update.amount {
            budget.amount = amount;
        }
        if let Some(period) = update.period {
            budget.period = period;
        }
        if let Some(spent) = update.spent {
            budget.spent = spent;
        }

        budget
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.backend.upsert_budget(session, budget)
    }

    /// Record how much has been spent against a budget
    pub fn set_spent(&self, session: &Session, identifier: &str, spent: Money) -> FinanceResult<Budget> {
        self.update(
            session,
            identifier,
            BudgetUpdate {
                spent: Some(spent),
                ..Default::default()
            },
        )
    }

    pub fn delete(&self, session: &Session, identifier: &str) -> FinanceResult<Budget> {
        let budget = self.find(session, identifier)?;
        if !self.backend.delete_budget(session, budget.id)? {
            return Err(FinanceError::budget_not_found(identifier));
        }
        info!(category = %budget.category, "budget deleted");
        Ok(budget)
    }
}
