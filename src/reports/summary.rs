//! Dashboard summary
//!
//! Totals and status counts over the current record set, plus the list of
//! bills that need attention.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::expense::due_horizon;
use crate::models::{ExpenseRecord, IncomeRecord, Money};

/// Default look-ahead window for "due soon"
pub const DUE_SOON_DAYS: i64 = 7;

/// Headline numbers for the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_income: Money,
    pub total_expense: Money,
    /// Always `total_income - total_expense`
    pub projected_balance: Money,
    pub count_paid: usize,
    pub count_pending: usize,
    pub count_overdue: usize,
    pub count_due_soon: usize,
}

/// Summary with the default seven-day due-soon window
pub fn compute_summary(
    expenses: &[ExpenseRecord],
    incomes: &[IncomeRecord],
    today: NaiveDate,
) -> DashboardSummary {
    compute_summary_with_window(expenses, incomes, today, DUE_SOON_DAYS)
}

/// Summary with an explicit due-soon window
///
/// An unpaid expense due exactly `today` is due soon, not overdue.
pub fn compute_summary_with_window(
    expenses: &[ExpenseRecord],
    incomes: &[IncomeRecord],
    today: NaiveDate,
    due_soon_days: i64,
) -> DashboardSummary {
    let total_income: Money = incomes.iter().map(|i| i.amount).sum();
    let total_expense: Money = expenses.iter().map(|e| e.amount).sum();

    let count_paid = expenses.iter().filter(|e| e.paid).count();
    let count_overdue = expenses.iter().filter(|e| e.is_overdue(today)).count();
    let count_due_soon = expenses
        .iter()
        .filter(|e| e.is_due_soon(today, due_soon_days))
        .count();

    DashboardSummary {
        total_income,
        total_expense,
        projected_balance: total_income - total_expense,
        count_paid,
        count_pending: expenses.len() - count_paid,
        count_overdue,
        count_due_soon,
    }
}

/// Why an expense is listed as upcoming
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DueStatus {
    Overdue,
    DueSoon,
}

/// An unpaid bill that is overdue or due within the window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingExpense {
    pub expense: ExpenseRecord,
    pub status: DueStatus,
    /// Negative when overdue
    pub days_until_due: i64,
}

/// Unpaid expenses due on or before `today + days`, overdue first, then by due date
pub fn upcoming_expenses(
    expenses: &[ExpenseRecord],
    today: NaiveDate,
    days: i64,
) -> Vec<UpcomingExpense> {
    let horizon = due_horizon(today, days);
    let mut upcoming: Vec<UpcomingExpense> = expenses
        .iter()
        .filter(|e| !e.paid && e.due_date <= horizon)
        .map(|e| UpcomingExpense {
            expense: e.clone(),
            status: if e.is_overdue(today) {
                DueStatus::Overdue
            } else {
                DueStatus::DueSoon
            },
            days_until_due: (e.due_date - today).num_days(),
        })
        .collect();

    upcoming.sort_by(|a, b| {
        a.status
            .cmp(&b.status)
            .then(a.expense.due_date.cmp(&b.expense.due_date))
            .then(a.expense.priority.cmp(&b.expense.priority))
    });
    upcoming
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, NewExpense, NewIncome};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(units: i64, due: NaiveDate) -> ExpenseRecord {
        ExpenseRecord::from_new(NewExpense::new(
            "Bill",
            Money::from_units(units),
            Category::other(),
            due,
        ))
    }

    fn income(units: i64, on: NaiveDate) -> IncomeRecord {
        IncomeRecord::from_new(NewIncome::new("Pay", Money::from_units(units), on))
    }

    #[test]
    fn test_empty_records_yield_zero_summary() {
        let summary = compute_summary(&[], &[], date(2025, 1, 1));
        assert_eq!(summary, DashboardSummary::default());
    }

    #[test]
    fn test_projected_balance_example() {
        let incomes = vec![income(1000, date(2025, 1, 5))];
        let expenses = vec![
            expense(300, date(2025, 1, 10)),
            expense(900, date(2025, 1, 20)),
        ];
        let summary = compute_summary(&expenses, &incomes, date(2025, 1, 8));

        assert_eq!(summary.total_income, Money::from_units(1000));
        assert_eq!(summary.total_expense, Money::from_units(1200));
        assert_eq!(summary.projected_balance, Money::from_units(-200));
        assert_eq!(summary.count_pending, 2);
        assert_eq!(summary.count_due_soon, 1);
        assert_eq!(summary.count_overdue, 0);
    }

    #[test]
    fn test_due_today_is_due_soon_not_overdue() {
        let today = date(2025, 3, 15);
        let summary = compute_summary(&[expense(10, today)], &[], today);
        assert_eq!(summary.count_overdue, 0);
        assert_eq!(summary.count_due_soon, 1);
    }

    #[test]
    fn test_window_edges() {
        let today = date(2025, 3, 15);
        let expenses = vec![
            expense(10, date(2025, 3, 14)),
            expense(10, date(2025, 3, 22)),
            expense(10, date(2025, 3, 23)),
        ];
        let summary = compute_summary(&expenses, &[], today);
        assert_eq!(summary.count_overdue, 1);
        assert_eq!(summary.count_due_soon, 1);
    }

    #[test]
    fn test_paid_expenses_counted_separately() {
        let today = date(2025, 3, 15);
        let mut paid = expense(50, date(2025, 3, 1));
        paid.mark_paid(date(2025, 3, 1));
        let summary = compute_summary(&[paid, expense(20, date(2025, 3, 1))], &[], today);

        assert_eq!(summary.count_paid, 1);
        assert_eq!(summary.count_pending, 1);
        assert_eq!(summary.count_overdue, 1);
        assert_eq!(summary.total_expense, Money::from_units(70));
    }

    #[test]
    fn test_balance_identity_over_mixed_sets() {
        let today = date(2025, 6, 1);
        for n in 0..6 {
            let expenses: Vec<_> = (0..n).map(|i| expense(17 * i + 3, today)).collect();
            let incomes: Vec<_> = (0..n / 2).map(|i| income(41 * i + 9, today)).collect();
            let s = compute_summary(&expenses, &incomes, today);
            assert_eq!(s.total_income - s.total_expense, s.projected_balance);
        }
    }

    #[test]
    fn test_upcoming_orders_overdue_first() {
        let today = date(2025, 3, 15);
        let expenses = vec![
            expense(10, date(2025, 3, 18)),
            expense(10, date(2025, 3, 10)),
            expense(10, date(2025, 3, 30)),
            expense(10, date(2025, 3, 15)),
        ];
        let upcoming = upcoming_expenses(&expenses, today, 7);

        assert_eq!(upcoming.len(), 3);
        assert_eq!(upcoming[0].status, DueStatus::Overdue);
        assert_eq!(upcoming[0].days_until_due, -5);
        assert_eq!(upcoming[1].expense.due_date, today);
        assert_eq!(upcoming[2].expense.due_date, date(2025, 3, 18));
    }

    #[test]
    fn test_oversized_window_does_not_overflow() {
        let today = date(2025, 1, 8);
        let expenses = vec![expense(10, date(2025, 1, 20)), expense(10, date(2030, 6, 1))];

        let summary = compute_summary_with_window(&expenses, &[], today, 1_000_000_000);
        assert_eq!(summary.count_due_soon, 2);
        assert_eq!(upcoming_expenses(&expenses, today, i64::MAX).len(), 2);

        let summary = compute_summary_with_window(&expenses, &[], NaiveDate::MAX, 7);
        assert_eq!(summary.count_overdue, 2);
        assert_eq!(upcoming_expenses(&expenses, NaiveDate::MAX, 7).len(), 2);
    }
}
