//! Demo data
//!
//! A plausible household month laid out around a given day, used by
//! `findash --demo` and as fixture data in tests.

use chrono::{Duration, NaiveDate};

use crate::models::{
    Category, ExpenseRecord, IncomeRecord, Money, NewExpense, NewIncome, Priority, YearMonth,
};
use crate::store::RecordSet;

fn category(id: &str) -> Category {
    Category::find(id).unwrap_or_else(Category::other)
}

/// Day `day` of `month`, clamped to the month's last day
fn day_of(month: YearMonth, day: u32) -> NaiveDate {
    let last = month.last_day();
    month
        .first_day()
        .checked_add_signed(Duration::days(i64::from(day.saturating_sub(1))))
        .filter(|d| *d <= last)
        .unwrap_or(last)
}

/// `today` moved by `days`, clamped to the calendar's range
fn shift(today: NaiveDate, days: i64) -> NaiveDate {
    today
        .checked_add_signed(Duration::days(days))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Demo expenses and incomes for the current and two previous months
///
/// Relative to `today`: one bill overdue, two due within the week, the
/// rest either paid or further out.
pub fn demo_records(today: NaiveDate) -> RecordSet {
    let current = YearMonth::from_date(today);
    let previous = current.prev();
    let before = previous.prev();

    let mut expenses = Vec::new();
    let mut incomes = Vec::new();

    for month in [before, previous] {
        incomes.push(IncomeRecord::from_new(
            NewIncome::new("Salary", Money::from_units(4200), day_of(month, 5)).with_source("salary"),
        ));
        for (description, units, cat, day) in [
            ("Rent", 1500, "housing", 1),
            ("Groceries", 520, "food", 12),
            ("Electricity", 95, "utilities", 18),
            ("Bus pass", 60, "transport", 3),
        ] {
            let due = day_of(month, day);
            expenses.push(ExpenseRecord::from_new(
                NewExpense::new(description, Money::from_units(units), category(cat), due)
                    .paid_on(due),
            ));
        }
    }
    incomes.push(IncomeRecord::from_new(
        NewIncome::new("Design gig", Money::from_cents(65_000), day_of(previous, 21))
            .with_source("freelance"),
    ));

    incomes.push(IncomeRecord::from_new(
        NewIncome::new("Salary", Money::from_units(4200), day_of(current, 5)).with_source("salary"),
    ));

    let rent_due = day_of(current, 1);
    expenses.push(ExpenseRecord::from_new(
        NewExpense::new("Rent", Money::from_units(1500), category("housing"), rent_due)
            .with_priority(Priority::High)
            .paid_on(rent_due),
    ));
    expenses.push(ExpenseRecord::from_new(
        NewExpense::new(
            "Internet",
            Money::from_cents(5_999),
            category("utilities"),
            shift(today, -2),
        )
        .with_priority(Priority::High),
    ));
    expenses.push(ExpenseRecord::from_new(NewExpense::new(
        "Groceries",
        Money::from_cents(18_450),
        category("food"),
        today,
    )));
    expenses.push(ExpenseRecord::from_new(
        NewExpense::new(
            "Dentist",
            Money::from_units(120),
            category("health"),
            shift(today, 4),
        )
        .with_priority(Priority::Low),
    ));
    expenses.push(ExpenseRecord::from_new(NewExpense::new(
        "Online course",
        Money::from_units(89),
        category("education"),
        shift(today, 15),
    )));
    expenses.push(ExpenseRecord::from_new(
        NewExpense::new(
            "Concert tickets",
            Money::from_units(140),
            category("leisure"),
            shift(today, 25),
        )
        .with_priority(Priority::Low),
    ));

    RecordSet::new(expenses, incomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::compute_summary;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_demo_records_are_valid() {
        let set = demo_records(date(2025, 3, 15));
        assert!(set.expenses.iter().all(|e| e.validate().is_ok()));
        assert!(set.incomes.iter().all(|i| i.validate().is_ok()));
    }

    #[test]
    fn test_demo_statuses_relative_to_today() {
        let today = date(2025, 3, 15);
        let summary = compute_summary(&demo_records(today).expenses, &[], today);

        assert_eq!(summary.count_overdue, 1);
        assert_eq!(summary.count_due_soon, 2);
        assert_eq!(summary.count_paid, 9);
    }

    #[test]
    fn test_day_of_clamps_to_month_end() {
        let feb = YearMonth::new(2025, 2).unwrap();
        assert_eq!(day_of(feb, 31), date(2025, 2, 28));
        assert_eq!(day_of(feb, 1), date(2025, 2, 1));
    }

    #[test]
    fn test_early_in_month() {
        let today = date(2025, 1, 1);
        let set = demo_records(today);
        assert!(set.incomes.iter().any(|i| i.date == date(2024, 11, 5)));
        assert_eq!(compute_summary(&set.expenses, &[], today).count_overdue, 1);
    }

    #[test]
    fn test_calendar_end_does_not_overflow() {
        let set = demo_records(NaiveDate::MAX);
        assert!(set.expenses.iter().any(|e| e.due_date == NaiveDate::MAX));
        assert_eq!(set.incomes.len(), 3);
    }
}
