//! Budget goal preferences store

use std::rc::Rc;

use super::observable::{Store, Subscription};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{BudgetGoal, YearMonth};

/// Observable holder for the user's [`BudgetGoal`]
#[derive(Clone, Default)]
pub struct PreferenceStore {
    inner: Store<BudgetGoal>,
}

impl PreferenceStore {
    pub fn new(goal: BudgetGoal) -> Self {
        Self {
            inner: Store::new(goal),
        }
    }

    pub fn goal(&self) -> BudgetGoal {
        *self.inner.get()
    }

    pub fn subscribe(&self, callback: impl FnMut(&Rc<BudgetGoal>) + 'static) -> Subscription {
        self.inner.subscribe(callback)
    }

    /// Replace the goal after validating it
    pub fn set(&self, goal: BudgetGoal) -> FinanceResult<()> {
        goal.validate().map_err(FinanceError::Validation)?;
        self.inner.set(goal);
        Ok(())
    }

    pub fn set_general_percent(&self, percent: u8) -> FinanceResult<BudgetGoal> {
        let goal = BudgetGoal {
            general_percent: percent,
            ..self.goal()
        };
        self.set(goal)?;
        Ok(goal)
    }

    pub fn set_monthly_percent(&self, percent: u8) -> FinanceResult<BudgetGoal> {
        let goal = BudgetGoal {
            monthly_percent: percent,
            ..self.goal()
        };
        self.set(goal)?;
        Ok(goal)
    }

    pub fn set_reference_month(&self, month: YearMonth) -> FinanceResult<BudgetGoal> {
        let goal = BudgetGoal {
            reference_month: month,
            ..self.goal()
        };
        self.set(goal)?;
        Ok(goal)
    }
}
