//! Budget goal tracking
//!
//! Computes how much of the spending goal has been consumed for two
//! verticals, all-time ("general") and the reference month, and raises one
//! notification each time a vertical enters the warn or exceeded state.

use serde::Serialize;
use std::fmt;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{BudgetGoal, Money, YearMonth};
use crate::notify::Notifier;
use crate::reports::{expense_in_month, income_in_month};
use crate::store::RecordSet;

/// Percent used at which a vertical starts warning
pub const DEFAULT_WARN_THRESHOLD: u8 = 75;

/// `percent`% of `income_base`, rounded to the cent
///
/// Zero income gives a zero budget, which makes the goal inapplicable.
pub fn budget_amount(percent: u8, income_base: Money) -> Money {
    if income_base.is_zero() {
        return Money::zero();
    }
    income_base.apply_percent(percent)
}

/// Share of the budget consumed, rounded to a whole percent; 0 without a budget
pub fn percent_used(budget: Money, expense_total: Money) -> i64 {
    if budget.is_zero() {
        return 0;
    }
    (expense_total.cents() as f64 / budget.cents() as f64 * 100.0).round() as i64
}

/// Classification of a vertical
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertState {
    Ok,
    Warn,
    Exceeded,
}

impl AlertState {
    pub fn classify(percent_used: i64, warn_threshold: u8) -> Self {
        if percent_used >= 100 {
            Self::Exceeded
        } else if percent_used >= i64::from(warn_threshold) {
            Self::Warn
        } else {
            Self::Ok
        }
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Warn => write!(f, "warn"),
            Self::Exceeded => write!(f, "exceeded"),
        }
    }
}

/// The two independently tracked goals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetVertical {
    General,
    Monthly,
}

/// Computed figures for one vertical
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerticalStatus {
    pub vertical: BudgetVertical,
    pub goal_percent: u8,
    pub income_base: Money,
    pub budget: Money,
    pub expense_total: Money,
    pub percent_used: i64,
    pub state: AlertState,
}

impl VerticalStatus {
    pub fn compute(
        vertical: BudgetVertical,
        goal_percent: u8,
        income_base: Money,
        expense_total: Money,
        warn_threshold: u8,
    ) -> Self {
        let budget = budget_amount(goal_percent, income_base);
        let used = percent_used(budget, expense_total);
        Self {
            vertical,
            goal_percent,
            income_base,
            budget,
            expense_total,
            percent_used: used,
            state: AlertState::classify(used, warn_threshold),
        }
    }

    /// False when there is no income to budget against
    pub fn is_applicable(&self) -> bool {
        !self.budget.is_zero()
    }

    /// Budget left before the goal is reached (negative when over)
    pub fn remaining(&self) -> Money {
        self.budget - self.expense_total
    }
}

/// Both verticals for one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    pub reference_month: YearMonth,
    pub general: VerticalStatus,
    pub monthly: VerticalStatus,
}

impl BudgetStatus {
    /// Compute both verticals
    ///
    /// The general base is all income ever recorded, with no time bound.
    pub fn compute(records: &RecordSet, goal: &BudgetGoal, warn_threshold: u8) -> Self {
        let all_income: Money = records.incomes.iter().map(|i| i.amount).sum();
        let all_expense: Money = records.expenses.iter().map(|e| e.amount).sum();
        let month = goal.reference_month;

        Self {
            reference_month: month,
            general: VerticalStatus::compute(
                BudgetVertical::General,
                goal.general_percent,
                all_income,
                all_expense,
                warn_threshold,
            ),
            monthly: VerticalStatus::compute(
                BudgetVertical::Monthly,
                goal.monthly_percent,
                income_in_month(&records.incomes, month),
                expense_in_month(&records.expenses, month),
                warn_threshold,
            ),
        }
    }
}

/// Remembers the last state per vertical so each transition notifies once
#[derive(Debug, Clone)]
pub struct BudgetTracker {
    warn_threshold: u8,
    currency_symbol: String,
    last_general: Option<AlertState>,
    last_monthly: Option<AlertState>,
}

impl Default for BudgetTracker {
    fn default() -> Self {
        Self::new(DEFAULT_WARN_THRESHOLD)
    }
}

impl BudgetTracker {
    pub fn new(warn_threshold: u8) -> Self {
        Self {
            warn_threshold,
            currency_symbol: "$".to_string(),
            last_general: None,
            last_monthly: None,
        }
    }

    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn warn_threshold(&self) -> u8 {
        self.warn_threshold
    }

    pub fn last_state(&self, vertical: BudgetVertical) -> Option<AlertState> {
        match vertical {
            BudgetVertical::General => self.last_general,
            BudgetVertical::Monthly => self.last_monthly,
        }
    }

    /// Forget recorded states, e.g. when a different user signs in
    pub fn reset(&mut self) {
        self.last_general = None;
        self.last_monthly = None;
    }

    /// Record a new state; returns it if entering it should notify
    pub fn observe(&mut self, vertical: BudgetVertical, state: AlertState) -> Option<AlertState> {
        let slot = match vertical {
            BudgetVertical::General => &mut self.last_general,
            BudgetVertical::Monthly => &mut self.last_monthly,
        };
        let previous = slot.replace(state);
        if previous == Some(state) {
            return None;
        }
        match state {
            AlertState::Warn | AlertState::Exceeded => Some(state),
            AlertState::Ok => None,
        }
    }

    /// Recompute both verticals and notify on transitions
    pub fn evaluate(
        &mut self,
        records: &RecordSet,
        goal: &BudgetGoal,
        notifier: &dyn Notifier,
    ) -> FinanceResult<BudgetStatus> {
        goal.validate().map_err(FinanceError::Validation)?;
        if !(1..=99).contains(&self.warn_threshold) {
            return Err(FinanceError::Config(format!(
                "Warn threshold must be between 1 and 99, got {}",
                self.warn_threshold
            )));
        }

        let status = BudgetStatus::compute(records, goal, self.warn_threshold);
        for vertical in [status.general, status.monthly] {
            if let Some(entered) = self.observe(vertical.vertical, vertical.state) {
                tracing::info!(
                    vertical = ?vertical.vertical,
                    state = %entered,
                    percent_used = vertical.percent_used,
                    "budget state changed"
                );
                self.dispatch(&vertical, status.reference_month, notifier);
            }
        }
        Ok(status)
    }

    fn dispatch(&self, status: &VerticalStatus, month: YearMonth, notifier: &dyn Notifier) {
        let scope = match status.vertical {
            BudgetVertical::General => "your overall budget".to_string(),
            BudgetVertical::Monthly => format!("your budget for {}", month.label()),
        };
        let figures = format!(
            "{} of {}",
            status.expense_total.format_with_symbol(&self.currency_symbol),
            status.budget.format_with_symbol(&self.currency_symbol)
        );

        match status.state {
            AlertState::Warn => notifier.warning(
                "Budget warning",
                &format!(
                    "You have used {}% of {} ({}).",
                    status.percent_used, scope, figures
                ),
            ),
            AlertState::Exceeded => notifier.error(
                "Budget exceeded",
                &format!(
                    "You have used {}% of {} ({}).",
                    status.percent_used, scope, figures
                ),
            ),
            AlertState::Ok => {}
        }
    }
}
