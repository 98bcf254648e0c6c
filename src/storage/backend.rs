//! Per-user document collections
//!
//! A [`DocumentBackend`] stores each user's expenses, incomes and budget
//! goal. Lists come back ordered by date ascending. Writes are upserts keyed
//! by record id.

use crate::error::FinanceResult;
use crate::models::{BudgetGoal, ExpenseId, ExpenseRecord, IncomeId, IncomeRecord};
use crate::services::session::UserId;

/// Remote storage for one or more users' documents
pub trait DocumentBackend {
    /// All of a user's expenses, by due date ascending
    fn list_expenses(&self, user: &UserId) -> FinanceResult<Vec<ExpenseRecord>>;

    /// All of a user's incomes, by date ascending
    fn list_incomes(&self, user: &UserId) -> FinanceResult<Vec<IncomeRecord>>;

    fn put_expense(&self, user: &UserId, expense: &ExpenseRecord) -> FinanceResult<()>;

    /// Deleting an unknown id is not an error
    fn delete_expense(&self, user: &UserId, id: ExpenseId) -> FinanceResult<()>;

    fn put_income(&self, user: &UserId, income: &IncomeRecord) -> FinanceResult<()>;

    fn delete_income(&self, user: &UserId, id: IncomeId) -> FinanceResult<()>;

    fn load_preferences(&self, user: &UserId) -> FinanceResult<Option<BudgetGoal>>;

    fn save_preferences(&self, user: &UserId, goal: &BudgetGoal) -> FinanceResult<()>;

    /// Device-local copy, written when the remote refuses a preference write
    fn load_local_preferences(&self, user: &UserId) -> FinanceResult<Option<BudgetGoal>>;

    fn save_local_preferences(&self, user: &UserId, goal: &BudgetGoal) -> FinanceResult<()>;

    /// Drop the device-local copy once the remote holds the current goal
    fn clear_local_preferences(&self, user: &UserId) -> FinanceResult<()>;
}

pub(crate) fn sort_expenses(expenses: &mut [ExpenseRecord]) {
    expenses.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| a.description.cmp(&b.description))
    });
}

pub(crate) fn sort_incomes(incomes: &mut [IncomeRecord]) {
    incomes.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.description.cmp(&b.description))
    });
}

pub(crate) fn upsert_expense(expenses: &mut Vec<ExpenseRecord>, expense: &ExpenseRecord) {
    match expenses.iter_mut().find(|e| e.id == expense.id) {
        Some(existing) => *existing = expense.clone(),
        None => expenses.push(expense.clone()),
    }
}

pub(crate) fn upsert_income(incomes: &mut Vec<IncomeRecord>, income: &IncomeRecord) {
    match incomes.iter_mut().find(|i| i.id == income.id) {
        Some(existing) => *existing = income.clone(),
        None => incomes.push(income.clone()),
    }
}
