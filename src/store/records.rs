//! In-memory record store
//!
//! Holds the signed-in user's expenses and incomes. Every mutation publishes
//! the complete new record set; observers recompute from scratch.

use std::rc::Rc;

use chrono::NaiveDate;

use super::observable::{Store, Subscription};
use crate::models::{
    ExpenseId, ExpensePatch, ExpenseRecord, IncomeId, IncomePatch, IncomeRecord, NewExpense,
    NewIncome,
};

/// Snapshot of all records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub expenses: Vec<ExpenseRecord>,
    pub incomes: Vec<IncomeRecord>,
}

impl RecordSet {
    pub fn new(expenses: Vec<ExpenseRecord>, incomes: Vec<IncomeRecord>) -> Self {
        Self { expenses, incomes }
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.incomes.is_empty()
    }

    pub fn expense(&self, id: ExpenseId) -> Option<&ExpenseRecord> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn income(&self, id: IncomeId) -> Option<&IncomeRecord> {
        self.incomes.iter().find(|i| i.id == id)
    }

    /// Resolve a user-typed handle to a single expense id
    pub fn resolve_expense(&self, handle: &str) -> Option<ExpenseId> {
        let mut matches = self.expenses.iter().filter(|e| e.id.matches(handle));
        match (matches.next(), matches.next()) {
            (Some(found), None) => Some(found.id),
            _ => None,
        }
    }

    /// Resolve a user-typed handle to a single income id
    pub fn resolve_income(&self, handle: &str) -> Option<IncomeId> {
        let mut matches = self.incomes.iter().filter(|i| i.id.matches(handle));
        match (matches.next(), matches.next()) {
            (Some(found), None) => Some(found.id),
            _ => None,
        }
    }
}

/// Observable store of the user's records
#[derive(Clone, Default)]
pub struct RecordStore {
    inner: Store<RecordSet>,
}

impl RecordStore {
    pub fn new(records: RecordSet) -> Self {
        Self {
            inner: Store::new(records),
        }
    }

    pub fn snapshot(&self) -> Rc<RecordSet> {
        self.inner.get()
    }

    pub fn subscribe(&self, callback: impl FnMut(&Rc<RecordSet>) + 'static) -> Subscription {
        self.inner.subscribe(callback)
    }

    /// Replace everything, e.g. after loading from the backend
    pub fn replace_all(&self, records: RecordSet) {
        self.inner.set(records);
    }

    fn mutate(&self, f: impl FnOnce(&mut RecordSet)) {
        let mut next = (*self.inner.get()).clone();
        f(&mut next);
        self.inner.set(next);
    }

    /// Append a new expense and return it with its generated id
    pub fn add_expense(&self, new: NewExpense) -> ExpenseRecord {
        let record = ExpenseRecord::from_new(new);
        tracing::debug!(id = %record.id, "adding expense");
        let added = record.clone();
        self.mutate(|set| set.expenses.push(record));
        added
    }

    /// Merge fields into an expense; returns the updated record if found
    pub fn update_expense(&self, id: ExpenseId, patch: ExpensePatch) -> Option<ExpenseRecord> {
        let mut updated = None;
        self.mutate(|set| {
            if let Some(expense) = set.expenses.iter_mut().find(|e| e.id == id) {
                expense.apply(patch);
                updated = Some(expense.clone());
            }
        });
        tracing::debug!(id = %id, found = updated.is_some(), "updated expense");
        updated
    }

    /// Remove an expense; returns the removed record if found
    pub fn remove_expense(&self, id: ExpenseId) -> Option<ExpenseRecord> {
        let mut removed = None;
        self.mutate(|set| {
            if let Some(pos) = set.expenses.iter().position(|e| e.id == id) {
                removed = Some(set.expenses.remove(pos));
            }
        });
        tracing::debug!(id = %id, found = removed.is_some(), "removed expense");
        removed
    }

    pub fn mark_paid(&self, id: ExpenseId, on: NaiveDate) -> Option<ExpenseRecord> {
        self.update_expense(
            id,
            ExpensePatch {
                paid: Some(true),
                paid_date: Some(on),
                ..Default::default()
            },
        )
    }

    pub fn mark_pending(&self, id: ExpenseId) -> Option<ExpenseRecord> {
        self.update_expense(
            id,
            ExpensePatch {
                paid: Some(false),
                ..Default::default()
            },
        )
    }

    pub fn add_income(&self, new: NewIncome) -> IncomeRecord {
        let record = IncomeRecord::from_new(new);
        tracing::debug!(id = %record.id, "adding income");
        let added = record.clone();
        self.mutate(|set| set.incomes.push(record));
        added
    }

    pub fn update_income(&self, id: IncomeId, patch: IncomePatch) -> Option<IncomeRecord> {
        let mut updated = None;
        self.mutate(|set| {
            if let Some(income) = set.incomes.iter_mut().find(|i| i.id == id) {
                income.apply(patch);
                updated = Some(income.clone());
            }
        });
        tracing::debug!(id = %id, found = updated.is_some(), "updated income");
        updated
    }

    pub fn remove_income(&self, id: IncomeId) -> Option<IncomeRecord> {
        let mut removed = None;
        self.mutate(|set| {
            if let Some(pos) = set.incomes.iter().position(|i| i.id == id) {
                removed = Some(set.incomes.remove(pos));
            }
        });
        tracing::debug!(id = %id, found = removed.is_some(), "removed income");
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};
    use std::cell::Cell;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn water_bill() -> NewExpense {
        NewExpense::new(
            "Water",
            Money::from_units(60),
            Category::find("utilities").unwrap(),
            date(2025, 1, 12),
        )
    }

    #[test]
    fn test_add_generates_unique_ids() {
        let store = RecordStore::default();
        let a = store.add_expense(water_bill());
        let b = store.add_expense(water_bill());
        assert_ne!(a.id, b.id);
        assert_eq!(store.snapshot().expenses.len(), 2);
    }

    #[test]
    fn test_every_mutation_notifies() {
        let store = RecordStore::default();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let _sub = store.subscribe(move |_| counter.set(counter.get() + 1));

        let expense = store.add_expense(water_bill());
        store.mark_paid(expense.id, date(2025, 1, 10));
        store.update_expense(ExpenseId::new(), ExpensePatch::default());
        store.remove_expense(expense.id);

        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let store = RecordStore::default();
        store.add_expense(water_bill());
        let before = store.snapshot();

        let result = store.update_expense(
            ExpenseId::new(),
            ExpensePatch {
                amount: Some(Money::from_units(1)),
                ..Default::default()
            },
        );

        assert!(result.is_none());
        assert_eq!(*store.snapshot(), *before);
    }

    #[test]
    fn test_mark_paid_then_pending_round_trip() {
        let store = RecordStore::default();
        let original = store.add_expense(water_bill());

        let paid = store.mark_paid(original.id, date(2025, 1, 11)).unwrap();
        assert!(paid.paid);
        assert_eq!(paid.paid_date, Some(date(2025, 1, 11)));

        let pending = store.mark_pending(original.id).unwrap();
        assert_eq!(pending, original);
    }

    #[test]
    fn test_income_crud() {
        let store = RecordStore::default();
        let income = store.add_income(NewIncome::new(
            "Salary",
            Money::from_units(1000),
            date(2025, 1, 5),
        ));

        let updated = store
            .update_income(
                income.id,
                IncomePatch {
                    source: Some("employer".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.source, "employer");

        assert!(store.remove_income(income.id).is_some());
        assert!(store.remove_income(income.id).is_none());
        assert!(store.snapshot().incomes.is_empty());
    }

    #[test]
    fn test_resolve_handles() {
        let store = RecordStore::default();
        let expense = store.add_expense(water_bill());
        let set = store.snapshot();

        assert_eq!(set.resolve_expense(&expense.id.to_string()), Some(expense.id));
        assert_eq!(set.resolve_expense("exp-zzzzzzzz"), None);
        assert_eq!(set.resolve_income(&expense.id.to_string()), None);
    }
}
