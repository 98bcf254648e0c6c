//! Budget goal preferences
//!
//! A goal is a share of income the user intends not to exceed in expenses,
//! tracked over all time ("general") and over one reference month.

use serde::{Deserialize, Serialize};

use super::month::YearMonth;

/// User-editable spending goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetGoal {
    /// Share of all-time income, 0-100
    #[serde(default = "default_percent")]
    pub general_percent: u8,

    /// Share of the reference month's income, 0-100
    #[serde(default = "default_percent")]
    pub monthly_percent: u8,

    #[serde(default = "YearMonth::current")]
    pub reference_month: YearMonth,
}

fn default_percent() -> u8 {
    100
}

impl Default for BudgetGoal {
    fn default() -> Self {
        Self {
            general_percent: default_percent(),
            monthly_percent: default_percent(),
            reference_month: YearMonth::current(),
        }
    }
}

impl BudgetGoal {
    /// Default goal anchored to a specific month
    pub fn for_month(reference_month: YearMonth) -> Self {
        Self {
            reference_month,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.general_percent > 100 {
            return Err(format!(
                "General goal must be between 0 and 100, got {}",
                self.general_percent
            ));
        }
        if self.monthly_percent > 100 {
            return Err(format!(
                "Monthly goal must be between 0 and 100, got {}",
                self.monthly_percent
            ));
        }
        Ok(())
    }
}
