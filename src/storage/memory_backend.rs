//! In-memory document backend
//!
//! Holds demo data and stands in for the remote store in tests. Writes can
//! be made to fail to exercise the error paths.

use std::collections::HashMap;
use std::sync::RwLock;

use super::backend::{sort_expenses, sort_incomes, upsert_expense, upsert_income, DocumentBackend};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{BudgetGoal, ExpenseId, ExpenseRecord, IncomeId, IncomeRecord};
use crate::services::session::UserId;
use crate::store::RecordSet;

/// How remote writes fail while a failure mode is set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    PermissionDenied,
    Remote,
}

impl FailureMode {
    fn to_error(self, operation: &str) -> FinanceError {
        match self {
            Self::PermissionDenied => {
                FinanceError::PermissionDenied(format!("{} refused by backend", operation))
            }
            Self::Remote => FinanceError::Remote(format!("{} failed: backend unreachable", operation)),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct UserDocuments {
    expenses: Vec<ExpenseRecord>,
    incomes: Vec<IncomeRecord>,
    preferences: Option<BudgetGoal>,
    local_preferences: Option<BudgetGoal>,
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    users: RwLock<HashMap<UserId, UserDocuments>>,
    failure: RwLock<Option<FailureMode>>,
    writes: RwLock<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with one user's records
    pub fn with_records(user: &UserId, records: RecordSet) -> Self {
        let backend = Self::new();
        if let Ok(mut users) = backend.users.write() {
            users.insert(
                user.clone(),
                UserDocuments {
                    expenses: records.expenses,
                    incomes: records.incomes,
                    ..Default::default()
                },
            );
        }
        backend
    }

    /// Make every subsequent remote write fail, or clear with `None`
    pub fn set_failure(&self, mode: Option<FailureMode>) -> FinanceResult<()> {
        let mut failure = self.failure.write().map_err(|e| {
            FinanceError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *failure = mode;
        Ok(())
    }

    /// Number of remote writes that succeeded
    pub fn write_count(&self) -> usize {
        self.writes.read().map(|w| *w).unwrap_or(0)
    }

    fn check_failure(&self, operation: &str) -> FinanceResult<()> {
        let failure = self.failure.read().map_err(|e| {
            FinanceError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        match *failure {
            Some(mode) => Err(mode.to_error(operation)),
            None => Ok(()),
        }
    }

    fn read_user<T>(&self, user: &UserId, f: impl FnOnce(Option<&UserDocuments>) -> T) -> FinanceResult<T> {
        let users = self.users.read().map_err(|e| {
            FinanceError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(f(users.get(user)))
    }

    fn write_user(
        &self,
        user: &UserId,
        operation: &str,
        f: impl FnOnce(&mut UserDocuments),
    ) -> FinanceResult<()> {
        self.check_failure(operation)?;
        self.write_user_unchecked(user, f)?;
        let mut writes = self.writes.write().map_err(|e| {
            FinanceError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *writes += 1;
        Ok(())
    }

    fn write_user_unchecked(&self, user: &UserId, f: impl FnOnce(&mut UserDocuments)) -> FinanceResult<()> {
        let mut users = self.users.write().map_err(|e| {
            FinanceError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        f(users.entry(user.clone()).or_default());
        Ok(())
    }
}

impl DocumentBackend for MemoryBackend {
    fn list_expenses(&self, user: &UserId) -> FinanceResult<Vec<ExpenseRecord>> {
        let mut expenses =
            self.read_user(user, |docs| docs.map(|d| d.expenses.clone()).unwrap_or_default())?;
        sort_expenses(&mut expenses);
        Ok(expenses)
    }

    fn list_incomes(&self, user: &UserId) -> FinanceResult<Vec<IncomeRecord>> {
        let mut incomes =
            self.read_user(user, |docs| docs.map(|d| d.incomes.clone()).unwrap_or_default())?;
        sort_incomes(&mut incomes);
        Ok(incomes)
    }

    fn put_expense(&self, user: &UserId, expense: &ExpenseRecord) -> FinanceResult<()> {
        self.write_user(user, "Saving expense", |docs| {
            upsert_expense(&mut docs.expenses, expense)
        })
    }

    fn delete_expense(&self, user: &UserId, id: ExpenseId) -> FinanceResult<()> {
        self.write_user(user, "Deleting expense", |docs| {
            docs.expenses.retain(|e| e.id != id)
        })
    }

    fn put_income(&self, user: &UserId, income: &IncomeRecord) -> FinanceResult<()> {
        self.write_user(user, "Saving income", |docs| {
            upsert_income(&mut docs.incomes, income)
        })
    }

    fn delete_income(&self, user: &UserId, id: IncomeId) -> FinanceResult<()> {
        self.write_user(user, "Deleting income", |docs| {
            docs.incomes.retain(|i| i.id != id)
        })
    }

    fn load_preferences(&self, user: &UserId) -> FinanceResult<Option<BudgetGoal>> {
        self.read_user(user, |docs| docs.and_then(|d| d.preferences))
    }

    fn save_preferences(&self, user: &UserId, goal: &BudgetGoal) -> FinanceResult<()> {
        self.write_user(user, "Saving preferences", |docs| {
            docs.preferences = Some(*goal)
        })
    }

    fn load_local_preferences(&self, user: &UserId) -> FinanceResult<Option<BudgetGoal>> {
        self.read_user(user, |docs| docs.and_then(|d| d.local_preferences))
    }

    fn save_local_preferences(&self, user: &UserId, goal: &BudgetGoal) -> FinanceResult<()> {
        self.write_user_unchecked(user, |docs| docs.local_preferences = Some(*goal))
    }

    fn clear_local_preferences(&self, user: &UserId) -> FinanceResult<()> {
        self.write_user_unchecked(user, |docs| docs.local_preferences = None)
    }
}
