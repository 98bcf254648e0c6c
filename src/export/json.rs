//! JSON export
//!
//! Full dump of one user's records and budget goal with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{BudgetGoal, ExpenseRecord, IncomeRecord, Money};
use crate::store::RecordSet;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub user: String,
    pub goal: BudgetGoal,
    pub expenses: Vec<ExpenseRecord>,
    pub incomes: Vec<IncomeRecord>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub income_count: usize,
    pub total_expense: Money,
    pub total_income: Money,
    pub earliest_due: Option<String>,
    pub latest_due: Option<String>,
}

impl RecordsExport {
    pub fn new(user: &str, records: &RecordSet, goal: BudgetGoal) -> Self {
        let metadata = ExportMetadata {
            expense_count: records.expenses.len(),
            income_count: records.incomes.len(),
            total_expense: records.expenses.iter().map(|e| e.amount).sum(),
            total_income: records.incomes.iter().map(|i| i.amount).sum(),
            earliest_due: records
                .expenses
                .iter()
                .map(|e| e.due_date)
                .min()
                .map(|d| d.to_string()),
            latest_due: records
                .expenses
                .iter()
                .map(|e| e.due_date)
                .max()
                .map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            user: user.to_string(),
            goal,
            expenses: records.expenses.clone(),
            incomes: records.incomes.clone(),
            metadata,
        }
    }
}

/// Write the user's records as pretty-printed JSON
pub fn write_records_json<W: Write>(
    user: &str,
    records: &RecordSet,
    goal: BudgetGoal,
    writer: W,
) -> FinanceResult<()> {
    let export = RecordsExport::new(user, records, goal);
    serde_json::to_writer_pretty(writer, &export)
        .map_err(|e| FinanceError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, NewExpense, NewIncome, YearMonth};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_export_round_trips_records() {
        let records = RecordSet::new(
            vec![
                ExpenseRecord::from_new(NewExpense::new(
                    "Rent",
                    Money::from_units(800),
                    Category::find("housing").unwrap(),
                    date(2025, 1, 1),
                )),
                ExpenseRecord::from_new(NewExpense::new(
                    "Gym",
                    Money::from_units(40),
                    Category::find("health").unwrap(),
                    date(2025, 1, 20),
                )),
            ],
            vec![IncomeRecord::from_new(NewIncome::new(
                "Salary",
                Money::from_units(1000),
                date(2025, 1, 5),
            ))],
        );
        let goal = BudgetGoal::for_month(YearMonth::new(2025, 1).unwrap());

        let mut buffer = Vec::new();
        write_records_json("alice", &records, goal, &mut buffer).unwrap();
        let parsed: RecordsExport = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(parsed.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(parsed.user, "alice");
        assert_eq!(parsed.expenses, records.expenses);
        assert_eq!(parsed.goal, goal);
        assert_eq!(parsed.metadata.total_expense, Money::from_units(840));
        assert_eq!(parsed.metadata.earliest_due.as_deref(), Some("2025-01-01"));
        assert_eq!(parsed.metadata.latest_due.as_deref(), Some("2025-01-20"));
    }
}
