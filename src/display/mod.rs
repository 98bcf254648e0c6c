//! Display formatting for terminal output
//!
//! Record tables, dashboard widgets and the small helpers they share.

pub mod dashboard;
pub mod records;
pub mod report;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::models::Money;

pub use dashboard::{format_dashboard, format_widget};
pub use records::{
    format_category_table, format_expense_details, format_expense_table, format_income_details,
    format_income_table,
};

/// How money and dates are written, and what "today" is
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub currency_symbol: String,
    pub date_format: String,
    pub today: NaiveDate,
}

impl DisplayOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            currency_symbol: "$".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            today,
        }
    }

    pub fn from_settings(settings: &Settings, today: NaiveDate) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
            today,
        }
    }

    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    pub fn date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }
}
