//! Core data models for findash
//!
//! Expense and income records, the category reference set, money and month
//! value types, and the user-editable preferences.

pub mod category;
pub mod expense;
pub mod ids;
pub mod income;
pub mod layout;
pub mod money;
pub mod month;
pub mod preferences;

pub use category::Category;
pub use expense::{ExpensePatch, ExpenseRecord, NewExpense, Priority, RecordValidationError};
pub use ids::{ExpenseId, IncomeId};
pub use income::{IncomePatch, IncomeRecord, NewIncome};
pub use layout::{DashboardLayout, Widget, WidgetSlot};
pub use money::Money;
pub use month::YearMonth;
pub use preferences::BudgetGoal;
