//! CLI command handlers
//!
//! Bridges clap argument parsing with the dashboard service.

pub mod budget;
pub mod expense;
pub mod export;
pub mod income;
pub mod layout;
pub mod report;

pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportArgs, ExportFormat, ExportRecords};
pub use income::{handle_income_command, IncomeCommands};
pub use layout::{handle_layout_command, LayoutCommands};
pub use report::{handle_report_command, ReportCommands};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, Money};

/// Parse a non-negative amount such as "12.50" or "$1,5"
pub(crate) fn parse_amount(raw: &str) -> FinanceResult<Money> {
    let amount = Money::parse(raw)
        .map_err(|e| FinanceError::Validation(format!("Invalid amount: {}", e)))?;
    if amount.is_negative() {
        return Err(FinanceError::Validation(format!(
            "Amount cannot be negative: {}",
            raw
        )));
    }
    Ok(amount)
}

/// Look up a built-in category by id or name
pub(crate) fn parse_category(raw: &str) -> FinanceResult<Category> {
    Category::find(raw).ok_or_else(|| FinanceError::category_not_found(raw))
}
