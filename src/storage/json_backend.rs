//! JSON file document backend
//!
//! Layout under the base directory:
//!
//! ```text
//! data/users/<user>/expenses.json
//! data/users/<user>/incomes.json
//! data/users/<user>/preferences.json
//! local/<user>/preferences.json
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::backend::{sort_expenses, sort_incomes, upsert_expense, upsert_income, DocumentBackend};
use super::file_io::{read_json, read_json_optional, write_json_atomic};
use crate::config::paths::DashboardPaths;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{BudgetGoal, ExpenseId, ExpenseRecord, IncomeId, IncomeRecord};
use crate::services::session::UserId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ExpenseData {
    expenses: Vec<ExpenseRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct IncomeData {
    incomes: Vec<IncomeRecord>,
}

/// Stores each collection as one JSON document
pub struct JsonFileBackend {
    paths: DashboardPaths,
}

impl JsonFileBackend {
    pub fn new(paths: DashboardPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &DashboardPaths {
        &self.paths
    }

    fn expenses_file(&self, user: &UserId) -> PathBuf {
        self.paths.user_dir(user).join("expenses.json")
    }

    fn incomes_file(&self, user: &UserId) -> PathBuf {
        self.paths.user_dir(user).join("incomes.json")
    }

    fn preferences_file(&self, user: &UserId) -> PathBuf {
        self.paths.user_dir(user).join("preferences.json")
    }

    fn local_preferences_file(&self, user: &UserId) -> PathBuf {
        self.paths.local_dir(user).join("preferences.json")
    }

    fn save_expenses(&self, user: &UserId, mut expenses: Vec<ExpenseRecord>) -> FinanceResult<()> {
        sort_expenses(&mut expenses);
        write_json_atomic(self.expenses_file(user), &ExpenseData { expenses })
    }

    fn save_incomes(&self, user: &UserId, mut incomes: Vec<IncomeRecord>) -> FinanceResult<()> {
        sort_incomes(&mut incomes);
        write_json_atomic(self.incomes_file(user), &IncomeData { incomes })
    }
}

impl DocumentBackend for JsonFileBackend {
    fn list_expenses(&self, user: &UserId) -> FinanceResult<Vec<ExpenseRecord>> {
        let data: ExpenseData = read_json(self.expenses_file(user))?;
        let mut expenses = data.expenses;
        sort_expenses(&mut expenses);
        Ok(expenses)
    }

    fn list_incomes(&self, user: &UserId) -> FinanceResult<Vec<IncomeRecord>> {
        let data: IncomeData = read_json(self.incomes_file(user))?;
        let mut incomes = data.incomes;
        sort_incomes(&mut incomes);
        Ok(incomes)
    }

    fn put_expense(&self, user: &UserId, expense: &ExpenseRecord) -> FinanceResult<()> {
        expense
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;
        let mut expenses = self.list_expenses(user)?;
        upsert_expense(&mut expenses, expense);
        self.save_expenses(user, expenses)
    }

    fn delete_expense(&self, user: &UserId, id: ExpenseId) -> FinanceResult<()> {
        let mut expenses = self.list_expenses(user)?;
        let before = expenses.len();
        expenses.retain(|e| e.id != id);
        if expenses.len() == before {
            return Ok(());
        }
        self.save_expenses(user, expenses)
    }

    fn put_income(&self, user: &UserId, income: &IncomeRecord) -> FinanceResult<()> {
        income
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;
        let mut incomes = self.list_incomes(user)?;
        upsert_income(&mut incomes, income);
        self.save_incomes(user, incomes)
    }

    fn delete_income(&self, user: &UserId, id: IncomeId) -> FinanceResult<()> {
        let mut incomes = self.list_incomes(user)?;
        let before = incomes.len();
        incomes.retain(|i| i.id != id);
        if incomes.len() == before {
            return Ok(());
        }
        self.save_incomes(user, incomes)
    }

    fn load_preferences(&self, user: &UserId) -> FinanceResult<Option<BudgetGoal>> {
        read_json_optional(self.preferences_file(user))
    }

    fn save_preferences(&self, user: &UserId, goal: &BudgetGoal) -> FinanceResult<()> {
        write_json_atomic(self.preferences_file(user), goal)
    }

    fn load_local_preferences(&self, user: &UserId) -> FinanceResult<Option<BudgetGoal>> {
        read_json_optional(self.local_preferences_file(user))
    }

    fn save_local_preferences(&self, user: &UserId, goal: &BudgetGoal) -> FinanceResult<()> {
        write_json_atomic(self.local_preferences_file(user), goal)
    }

    fn clear_local_preferences(&self, user: &UserId) -> FinanceResult<()> {
        let path = self.local_preferences_file(user);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, NewExpense, NewIncome, YearMonth};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (TempDir, JsonFileBackend, UserId) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashboardPaths::with_base_dir(temp_dir.path().to_path_buf());
        (temp_dir, JsonFileBackend::new(paths), UserId::parse("alice").unwrap())
    }

    fn expense(description: &str, due: NaiveDate) -> ExpenseRecord {
        ExpenseRecord::from_new(NewExpense::new(
            description,
            Money::from_units(10),
            Category::other(),
            due,
        ))
    }

    #[test]
    fn test_empty_user_has_no_records() {
        let (_dir, backend, user) = setup();
        assert!(backend.list_expenses(&user).unwrap().is_empty());
        assert!(backend.list_incomes(&user).unwrap().is_empty());
        assert!(backend.load_preferences(&user).unwrap().is_none());
    }

    #[test]
    fn test_expenses_listed_by_due_date() {
        let (_dir, backend, user) = setup();
        let late = expense("Late", date(2025, 3, 1));
        let early = expense("Early", date(2025, 1, 1));
        backend.put_expense(&user, &late).unwrap();
        backend.put_expense(&user, &early).unwrap();

        let listed = backend.list_expenses(&user).unwrap();
        assert_eq!(listed, vec![early, late]);
    }

    #[test]
    fn test_put_is_upsert() {
        let (_dir, backend, user) = setup();
        let mut record = expense("Rent", date(2025, 1, 1));
        backend.put_expense(&user, &record).unwrap();
        record.amount = Money::from_units(900);
        backend.put_expense(&user, &record).unwrap();

        let listed = backend.list_expenses(&user).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].amount, Money::from_units(900));
    }

    #[test]
    fn test_delete() {
        let (_dir, backend, user) = setup();
        let record = expense("Rent", date(2025, 1, 1));
        backend.put_expense(&user, &record).unwrap();
        backend.delete_expense(&user, record.id).unwrap();
        backend.delete_expense(&user, record.id).unwrap();
        assert!(backend.list_expenses(&user).unwrap().is_empty());
    }

    #[test]
    fn test_users_are_isolated() {
        let (_dir, backend, alice) = setup();
        let bob = UserId::parse("bob").unwrap();
        let income = IncomeRecord::from_new(NewIncome::new(
            "Salary",
            Money::from_units(1000),
            date(2025, 1, 5),
        ));
        backend.put_income(&alice, &income).unwrap();

        assert_eq!(backend.list_incomes(&alice).unwrap().len(), 1);
        assert!(backend.list_incomes(&bob).unwrap().is_empty());
    }

    #[test]
    fn test_preferences_remote_and_local() {
        let (_dir, backend, user) = setup();
        let goal = BudgetGoal {
            general_percent: 80,
            monthly_percent: 60,
            reference_month: YearMonth::new(2025, 2).unwrap(),
        };

        backend.save_local_preferences(&user, &goal).unwrap();
        assert_eq!(backend.load_local_preferences(&user).unwrap(), Some(goal));
        assert!(backend.load_preferences(&user).unwrap().is_none());

        backend.save_preferences(&user, &goal).unwrap();
        backend.clear_local_preferences(&user).unwrap();
        assert_eq!(backend.load_preferences(&user).unwrap(), Some(goal));
        assert!(backend.load_local_preferences(&user).unwrap().is_none());
    }

    #[test]
    fn test_put_rejects_invalid_record() {
        let (_dir, backend, user) = setup();
        let mut record = expense("Rent", date(2025, 1, 1));
        record.description = String::new();
        assert!(matches!(
            backend.put_expense(&user, &record),
            Err(FinanceError::Validation(_))
        ));
    }
}
