//! Expense records
//!
//! An expense is a bill with a due date. It is either pending or paid, and
//! `paid_date` is present exactly when it is paid.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use super::ids::ExpenseId;
use super::money::Money;

/// Priority of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "h" => Ok(Self::High),
            "medium" | "m" => Ok(Self::Medium),
            "low" | "l" => Ok(Self::Low),
            other => Err(format!("Unknown priority: {}", other)),
        }
    }
}

/// Validation errors for expenses and incomes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    EmptyDescription,
    NegativeAmount,
    PaidDateMismatch,
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::NegativeAmount => write!(f, "Amount cannot be negative"),
            Self::PaidDateMismatch => write!(f, "Paid date must be set exactly when paid"),
        }
    }
}

impl std::error::Error for RecordValidationError {}

/// A single outflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub description: String,
    pub amount: Money,
    pub category: Category,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
}

impl ExpenseRecord {
    /// Materialize a new expense with a fresh id
    pub fn from_new(new: NewExpense) -> Self {
        let paid_date = if new.paid {
            Some(new.paid_date.unwrap_or(new.due_date))
        } else {
            None
        };
        Self {
            id: ExpenseId::new(),
            description: new.description,
            amount: new.amount,
            category: new.category,
            due_date: new.due_date,
            priority: new.priority,
            paid: new.paid,
            paid_date,
        }
    }

    pub fn mark_paid(&mut self, on: NaiveDate) {
        self.paid = true;
        self.paid_date = Some(on);
    }

    pub fn mark_pending(&mut self) {
        self.paid = false;
        self.paid_date = None;
    }

    /// Unpaid and due strictly before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.paid && self.due_date < today
    }

    /// Unpaid and due within `[today, today + days]`
    pub fn is_due_soon(&self, today: NaiveDate, days: i64) -> bool {
        !self.paid && self.due_date >= today && self.due_date <= due_horizon(today, days)
    }

    /// Merge a partial update. Paid state changes keep `paid_date` consistent.
    pub fn apply(&mut self, patch: ExpensePatch) {
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        match patch.paid {
            Some(true) => {
                let on = patch.paid_date.or(self.paid_date).unwrap_or(self.due_date);
                self.mark_paid(on);
            }
            Some(false) => self.mark_pending(),
            None => {
                if self.paid {
                    if let Some(on) = patch.paid_date {
                        self.paid_date = Some(on);
                    }
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.description.trim().is_empty() {
            return Err(RecordValidationError::EmptyDescription);
        }
        if self.amount.is_negative() {
            return Err(RecordValidationError::NegativeAmount);
        }
        if self.paid != self.paid_date.is_some() {
            return Err(RecordValidationError::PaidDateMismatch);
        }
        Ok(())
    }
}

/// Expense fields supplied by the caller; the store assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub description: String,
    pub amount: Money,
    pub category: Category,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub paid: bool,
    pub paid_date: Option<NaiveDate>,
}

impl NewExpense {
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        category: Category,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            category,
            due_date,
            priority: Priority::default(),
            paid: false,
            paid_date: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn paid_on(mut self, on: NaiveDate) -> Self {
        self.paid = true;
        self.paid_date = Some(on);
        self
    }
}

/// Partial update for an expense
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub category: Option<Category>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub paid: Option<bool>,
    pub paid_date: Option<NaiveDate>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Last day of a `days`-long due-soon window, saturating at the calendar's end
pub fn due_horizon(today: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days.max(0))
        .and_then(|window| today.checked_add_signed(window))
        .unwrap_or(NaiveDate::MAX)
}
