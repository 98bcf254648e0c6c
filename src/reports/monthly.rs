//! Monthly series and period comparison
//!
//! Expenses are bucketed by the month of their due date, incomes by the
//! month of their date. Series are most-recent-first.

use serde::Serialize;

use crate::models::{ExpenseRecord, IncomeRecord, Money, YearMonth};

/// Income, expense and balance for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyTotals {
    pub month: YearMonth,
    pub income: Money,
    pub expense: Money,
    pub balance: Money,
}

/// Totals for `months_back` consecutive months ending at `current`
///
/// Months without records are present with zero totals.
pub fn compute_monthly_series(
    expenses: &[ExpenseRecord],
    incomes: &[IncomeRecord],
    months_back: usize,
    current: YearMonth,
) -> Vec<MonthlyTotals> {
    current
        .trailing(months_back)
        .into_iter()
        .map(|month| {
            let income = income_in_month(incomes, month);
            let expense = expense_in_month(expenses, month);
            MonthlyTotals {
                month,
                income,
                expense,
                balance: income - expense,
            }
        })
        .collect()
}

/// Income expected in one month
pub fn income_in_month(incomes: &[IncomeRecord], month: YearMonth) -> Money {
    incomes
        .iter()
        .filter(|i| month.contains(i.date))
        .map(|i| i.amount)
        .sum()
}

/// Expenses due in one month
pub fn expense_in_month(expenses: &[ExpenseRecord], month: YearMonth) -> Money {
    expenses
        .iter()
        .filter(|e| month.contains(e.due_date))
        .map(|e| e.amount)
        .sum()
}

/// Relative change from `previous` to `current`, in percent
///
/// `None` when there is nothing to compare against.
pub fn percent_change(current: Money, previous: Money) -> Option<f64> {
    if previous.is_zero() {
        None
    } else {
        Some((current - previous).cents() as f64 / previous.cents() as f64 * 100.0)
    }
}

/// Summed totals over a window of months
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PeriodTotals {
    pub income: Money,
    pub expense: Money,
    pub balance: Money,
}

impl PeriodTotals {
    fn from_months(months: &[MonthlyTotals]) -> Self {
        let income: Money = months.iter().map(|m| m.income).sum();
        let expense: Money = months.iter().map(|m| m.expense).sum();
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }
}

/// Last `months` months against the `months` before them
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodComparison {
    pub months: usize,
    pub current: PeriodTotals,
    /// `None` when the series does not reach back far enough
    pub previous: Option<PeriodTotals>,
    pub income_change: Option<f64>,
    pub expense_change: Option<f64>,
}

/// Compare the first `months` entries of a most-recent-first series with the next `months`
pub fn compare_periods(series: &[MonthlyTotals], months: usize) -> PeriodComparison {
    let current_end = months.min(series.len());
    let current = PeriodTotals::from_months(&series[..current_end]);

    let previous = if months > 0 && series.len() >= months * 2 {
        Some(PeriodTotals::from_months(&series[months..months * 2]))
    } else {
        None
    };

    PeriodComparison {
        months,
        current,
        previous,
        income_change: previous.and_then(|p| percent_change(current.income, p.income)),
        expense_change: previous.and_then(|p| percent_change(current.expense, p.expense)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, NewExpense, NewIncome};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
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
    fn test_series_buckets_and_order() {
        let expenses = vec![
            expense(100, date(2025, 3, 2)),
            expense(50, date(2025, 3, 30)),
            expense(70, date(2025, 1, 15)),
            expense(999, date(2024, 6, 1)),
        ];
        let incomes = vec![income(500, date(2025, 3, 1)), income(400, date(2025, 2, 1))];

        let series = compute_monthly_series(&expenses, &incomes, 3, ym(2025, 3));

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].month, ym(2025, 3));
        assert_eq!(series[0].expense, Money::from_units(150));
        assert_eq!(series[0].income, Money::from_units(500));
        assert_eq!(series[0].balance, Money::from_units(350));
        assert_eq!(series[1].month, ym(2025, 2));
        assert_eq!(series[1].expense, Money::zero());
        assert_eq!(series[2].expense, Money::from_units(70));
        assert_eq!(series[2].balance, Money::from_units(-70));
    }

    #[test]
    fn test_series_on_empty_input() {
        let series = compute_monthly_series(&[], &[], 2, ym(2025, 1));
        assert_eq!(series.len(), 2);
        assert!(series.iter().all(|m| m.income.is_zero() && m.expense.is_zero()));
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(
            percent_change(Money::from_units(150), Money::from_units(100)),
            Some(50.0)
        );
        assert_eq!(
            percent_change(Money::from_units(50), Money::from_units(100)),
            Some(-50.0)
        );
        assert_eq!(percent_change(Money::from_units(50), Money::zero()), None);
    }

    #[test]
    fn test_compare_periods() {
        let expenses = vec![
            expense(300, date(2025, 4, 1)),
            expense(100, date(2025, 3, 1)),
            expense(100, date(2025, 2, 1)),
            expense(100, date(2025, 1, 1)),
        ];
        let series = compute_monthly_series(&expenses, &[], 4, ym(2025, 4));
        let cmp = compare_periods(&series, 2);

        assert_eq!(cmp.current.expense, Money::from_units(400));
        assert_eq!(cmp.previous.unwrap().expense, Money::from_units(200));
        assert_eq!(cmp.expense_change, Some(100.0));
        assert_eq!(cmp.income_change, None);
    }

    #[test]
    fn test_compare_periods_with_short_series() {
        let series = compute_monthly_series(&[], &[], 3, ym(2025, 4));
        let cmp = compare_periods(&series, 2);
        assert!(cmp.previous.is_none());
        assert!(cmp.expense_change.is_none());
    }

    #[test]
    fn test_month_totals() {
        let march = ym(2025, 3);
        let incomes = vec![income(10, date(2025, 3, 5)), income(5, date(2025, 4, 5))];
        let expenses = vec![expense(3, date(2025, 3, 31))];
        assert_eq!(income_in_month(&incomes, march), Money::from_units(10));
        assert_eq!(expense_in_month(&expenses, march), Money::from_units(3));
    }
}
