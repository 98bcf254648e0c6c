//! Spending by category
//!
//! Groups expenses by category and ranks the groups by amount.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Category, ExpenseRecord, Money, YearMonth};

/// One category's share of spending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category: Category,
    pub amount: Money,
    /// Share of the total of all groups, 0-100
    pub percent: f64,
    pub count: usize,
}

/// Group expenses by category id, largest amount first
///
/// Ties are ordered by category name so output is stable.
pub fn compute_category_breakdown(expenses: &[ExpenseRecord]) -> Vec<CategoryBreakdown> {
    let mut groups: HashMap<&str, CategoryBreakdown> = HashMap::new();

    for expense in expenses {
        let entry = groups
            .entry(expense.category.id.as_str())
            .or_insert_with(|| CategoryBreakdown {
                category: expense.category.clone(),
                amount: Money::zero(),
                percent: 0.0,
                count: 0,
            });
        entry.amount += expense.amount;
        entry.count += 1;
    }

    let total: Money = groups.values().map(|g| g.amount).sum();
    let mut rows: Vec<CategoryBreakdown> = groups
        .into_values()
        .map(|mut row| {
            row.percent = row.amount.percent_of(total);
            row
        })
        .collect();

    rows.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.name.cmp(&b.category.name))
    });
    rows
}

/// The biggest spending category over a set of months
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCategory {
    pub name: String,
    pub amount: Money,
    /// Share of the period's expense total, 0-100
    pub percent: f64,
}

/// Highest-spending category (by name) among expenses due in `months`
///
/// Returns `None` when no expense falls in the period.
pub fn top_category_for_period(
    expenses: &[ExpenseRecord],
    months: &[YearMonth],
) -> Option<TopCategory> {
    let in_period: Vec<&ExpenseRecord> = expenses
        .iter()
        .filter(|e| months.contains(&YearMonth::from_date(e.due_date)))
        .collect();

    let period_total: Money = in_period.iter().map(|e| e.amount).sum();

    let mut by_name: HashMap<&str, Money> = HashMap::new();
    for expense in &in_period {
        *by_name.entry(expense.category.name.as_str()).or_default() += expense.amount;
    }

    by_name
        .into_iter()
        .max_by(|(name_a, a), (name_b, b)| a.cmp(b).then_with(|| name_b.cmp(name_a)))
        .map(|(name, amount)| TopCategory {
            name: name.to_string(),
            amount,
            percent: amount.percent_of(period_total),
        })
}
