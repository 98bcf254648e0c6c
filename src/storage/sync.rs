//! Write-behind queue
//!
//! Local stores change immediately; the matching backend writes are queued
//! as [`PendingWrite`] commands and applied in order by [`WriteBehind::flush`].
//! A failed write is reported and dropped. Local state is never rolled back.

use std::collections::VecDeque;
use std::fmt;

use super::backend::DocumentBackend;
use super::preferences::save_preferences;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{BudgetGoal, ExpenseId, ExpenseRecord, IncomeId, IncomeRecord};
use crate::notify::Notifier;
use crate::services::session::{Session, UserId};

/// A backend write waiting to be applied
#[derive(Debug, Clone, PartialEq)]
pub enum PendingWrite {
    PutExpense(ExpenseRecord),
    DeleteExpense(ExpenseId),
    PutIncome(IncomeRecord),
    DeleteIncome(IncomeId),
    SavePreferences(BudgetGoal),
}

impl PendingWrite {
    fn apply(
        &self,
        backend: &dyn DocumentBackend,
        user: &UserId,
        notifier: &dyn Notifier,
    ) -> FinanceResult<()> {
        match self {
            Self::PutExpense(expense) => backend.put_expense(user, expense),
            Self::DeleteExpense(id) => backend.delete_expense(user, *id),
            Self::PutIncome(income) => backend.put_income(user, income),
            Self::DeleteIncome(id) => backend.delete_income(user, *id),
            Self::SavePreferences(goal) => save_preferences(backend, user, goal, notifier).map(|_| ()),
        }
    }
}

impl fmt::Display for PendingWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PutExpense(e) => write!(f, "save expense {} ({})", e.id, e.description),
            Self::DeleteExpense(id) => write!(f, "delete expense {}", id),
            Self::PutIncome(i) => write!(f, "save income {} ({})", i.id, i.description),
            Self::DeleteIncome(id) => write!(f, "delete income {}", id),
            Self::SavePreferences(_) => write!(f, "save budget goal"),
        }
    }
}

/// Outcome of one flush
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    pub applied: usize,
    pub failed: usize,
}

impl FlushReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Ordered queue of pending backend writes
#[derive(Debug, Default)]
pub struct WriteBehind {
    queue: VecDeque<PendingWrite>,
}

impl WriteBehind {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, write: PendingWrite) {
        tracing::debug!(write = %write, pending = self.queue.len() + 1, "queued write");
        self.queue.push_back(write);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = &PendingWrite> {
        self.queue.iter()
    }

    /// Apply every queued write in order
    ///
    /// Returns `Unauthenticated` without touching the backend or the queue
    /// when nobody is signed in.
    pub fn flush(
        &mut self,
        backend: &dyn DocumentBackend,
        session: &Session,
        notifier: &dyn Notifier,
    ) -> FinanceResult<FlushReport> {
        let user = session.require_user()?;
        let mut report = FlushReport::default();

        while let Some(write) = self.queue.pop_front() {
            match write.apply(backend, user, notifier) {
                Ok(()) => report.applied += 1,
                Err(err) => {
                    tracing::warn!(write = %write, error = %err, "backend write failed");
                    notifier.error("Sync failed", &failure_message(&write, &err));
                    report.failed += 1;
                }
            }
        }

        tracing::debug!(applied = report.applied, failed = report.failed, "flushed writes");
        Ok(report)
    }
}

fn failure_message(write: &PendingWrite, err: &FinanceError) -> String {
    match err {
        FinanceError::Unauthenticated => format!("Could not {}: you are not signed in.", write),
        FinanceError::PermissionDenied(_) => {
            format!("Could not {}: you do not have permission.", write)
        }
        other => format!("Could not {}: {}", write, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, NewExpense, NewIncome, YearMonth};
    use crate::notify::{MemoryNotifier, NotificationKind};
    use crate::storage::memory_backend::{FailureMode, MemoryBackend};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn alice() -> Session {
        Session::signed_in(UserId::parse("alice").unwrap())
    }

    fn rent() -> ExpenseRecord {
        ExpenseRecord::from_new(NewExpense::new(
            "Rent",
            Money::from_units(800),
            Category::find("housing").unwrap(),
            date(2025, 1, 1),
        ))
    }

    #[test]
    fn test_flush_applies_in_order() {
        let backend = MemoryBackend::new();
        let notifier = MemoryNotifier::new();
        let session = alice();
        let mut queue = WriteBehind::new();
        let record = rent();

        queue.enqueue(PendingWrite::PutExpense(record.clone()));
        queue.enqueue(PendingWrite::DeleteExpense(record.id));
        queue.enqueue(PendingWrite::PutIncome(IncomeRecord::from_new(NewIncome::new(
            "Salary",
            Money::from_units(1000),
            date(2025, 1, 5),
        ))));

        let report = queue.flush(&backend, &session, &notifier).unwrap();

        assert_eq!(report, FlushReport { applied: 3, failed: 0 });
        assert!(queue.is_empty());
        let user = session.require_user().unwrap();
        assert!(backend.list_expenses(user).unwrap().is_empty());
        assert_eq!(backend.list_incomes(user).unwrap().len(), 1);
    }

    #[test]
    fn test_unauthenticated_flush_does_no_io() {
        let backend = MemoryBackend::new();
        let notifier = MemoryNotifier::new();
        let mut queue = WriteBehind::new();
        queue.enqueue(PendingWrite::PutExpense(rent()));

        let result = queue.flush(&backend, &Session::signed_out(), &notifier);

        assert!(matches!(result, Err(FinanceError::Unauthenticated)));
        assert_eq!(queue.len(), 1);
        assert_eq!(backend.write_count(), 0);
        assert!(notifier.delivered().is_empty());
    }

    #[test]
    fn test_failures_are_reported_and_dropped() {
        let backend = MemoryBackend::new();
        backend.set_failure(Some(FailureMode::Remote)).unwrap();
        let notifier = MemoryNotifier::new();
        let mut queue = WriteBehind::new();
        queue.enqueue(PendingWrite::PutExpense(rent()));
        queue.enqueue(PendingWrite::PutExpense(rent()));

        let report = queue.flush(&backend, &alice(), &notifier).unwrap();

        assert_eq!(report, FlushReport { applied: 0, failed: 2 });
        assert!(!report.is_clean());
        assert!(queue.is_empty());
        assert_eq!(notifier.count(NotificationKind::Error), 2);
        assert_eq!(notifier.delivered()[0].title, "Sync failed");
    }

    #[test]
    fn test_permission_denied_message() {
        let backend = MemoryBackend::new();
        backend.set_failure(Some(FailureMode::PermissionDenied)).unwrap();
        let notifier = MemoryNotifier::new();
        let mut queue = WriteBehind::new();
        queue.enqueue(PendingWrite::DeleteExpense(ExpenseId::new()));

        queue.flush(&backend, &alice(), &notifier).unwrap();

        assert!(notifier.delivered()[0].message.contains("do not have permission"));
    }

    #[test]
    fn test_refused_preferences_count_as_applied() {
        let backend = MemoryBackend::new();
        backend.set_failure(Some(FailureMode::PermissionDenied)).unwrap();
        let notifier = MemoryNotifier::new();
        let mut queue = WriteBehind::new();
        queue.enqueue(PendingWrite::SavePreferences(BudgetGoal::for_month(
            YearMonth::new(2025, 1).unwrap(),
        )));

        let report = queue.flush(&backend, &alice(), &notifier).unwrap();

        assert_eq!(report.applied, 1);
        assert_eq!(notifier.count(NotificationKind::Warning), 1);
        assert_eq!(notifier.count(NotificationKind::Error), 0);
    }
}
