//! Record tables
//!
//! Expenses, incomes and categories rendered as terminal tables.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::truncate;
use super::DisplayOptions;
use crate::models::{Category, ExpenseRecord, IncomeRecord};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct IncomeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Icon")]
    icon: String,
}

fn expense_status(expense: &ExpenseRecord, options: &DisplayOptions) -> String {
    match expense.paid_date {
        Some(on) if expense.paid => format!("paid {}", options.date(on)),
        _ if expense.is_overdue(options.today) => "OVERDUE".to_string(),
        _ => "pending".to_string(),
    }
}

/// Format expenses as a table
pub fn format_expense_table(expenses: &[ExpenseRecord], options: &DisplayOptions) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        due: options.date(e.due_date),
        description: truncate(&e.description, 30),
        category: e.category.name.clone(),
        priority: e.priority.to_string(),
        amount: options.money(e.amount),
        status: expense_status(e, options),
    });

    Table::new(rows).with(Style::sharp()).to_string()
}

/// Format incomes as a table
pub fn format_income_table(incomes: &[IncomeRecord], options: &DisplayOptions) -> String {
    if incomes.is_empty() {
        return "No incomes found.".to_string();
    }

    let rows = incomes.iter().map(|i| IncomeRow {
        id: i.id.to_string(),
        date: options.date(i.date),
        description: truncate(&i.description, 30),
        source: i.source.clone(),
        amount: options.money(i.amount),
    });

    Table::new(rows).with(Style::sharp()).to_string()
}

pub fn format_category_table(categories: &[Category]) -> String {
    let rows = categories.iter().map(|c| CategoryRow {
        id: c.id.clone(),
        name: c.name.clone(),
        color: c.color.clone(),
        icon: c.icon.clone().unwrap_or_default(),
    });

    Table::new(rows).with(Style::sharp()).to_string()
}

/// Multi-line detail view of one expense
pub fn format_expense_details(expense: &ExpenseRecord, options: &DisplayOptions) -> String {
    let mut output = String::new();
    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Description: {}\n", expense.description));
    output.push_str(&format!("Amount:      {}\n", options.money(expense.amount)));
    output.push_str(&format!("Category:    {}\n", expense.category.name));
    output.push_str(&format!("Due:         {}\n", options.date(expense.due_date)));
    output.push_str(&format!("Priority:    {}\n", expense.priority));
    output.push_str(&format!("Status:      {}\n", expense_status(expense, options)));
    output
}

pub fn format_income_details(income: &IncomeRecord, options: &DisplayOptions) -> String {
    let mut output = String::new();
    output.push_str(&format!("Income:      {}\n", income.id));
    output.push_str(&format!("Description: {}\n", income.description));
    output.push_str(&format!("Amount:      {}\n", options.money(income.amount)));
    output.push_str(&format!("Date:        {}\n", options.date(income.date)));
    if !income.source.is_empty() {
        output.push_str(&format!("Source:      {}\n", income.source));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewExpense, NewIncome};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn options() -> DisplayOptions {
        DisplayOptions::new(date(2025, 1, 15))
    }

    #[test]
    fn test_empty_tables() {
        assert_eq!(format_expense_table(&[], &options()), "No expenses found.");
        assert_eq!(format_income_table(&[], &options()), "No incomes found.");
    }

    #[test]
    fn test_expense_table_statuses() {
        let overdue = ExpenseRecord::from_new(NewExpense::new(
            "Water",
            Money::from_cents(4_250),
            Category::find("utilities").unwrap(),
            date(2025, 1, 10),
        ));
        let paid = ExpenseRecord::from_new(
            NewExpense::new("Rent", Money::from_units(900), Category::find("housing").unwrap(), date(2025, 1, 1))
                .paid_on(date(2025, 1, 2)),
        );

        let table = format_expense_table(&[overdue.clone(), paid], &options());

        assert!(table.contains("Water"));
        assert!(table.contains("$42.50"));
        assert!(table.contains("OVERDUE"));
        assert!(table.contains("paid 2025-01-02"));
        assert!(table.contains(&overdue.id.to_string()));
    }

    #[test]
    fn test_income_details() {
        let income = IncomeRecord::from_new(
            NewIncome::new("Salary", Money::from_units(1000), date(2025, 1, 5)).with_source("employer"),
        );
        let details = format_income_details(&income, &options());
        assert!(details.contains("Amount:      $1000.00"));
        assert!(details.contains("Source:      employer"));
    }

    #[test]
    fn test_category_table_lists_defaults() {
        let table = format_category_table(&Category::defaults());
        assert!(table.contains("housing"));
        assert!(table.contains("#9c755f"));
    }
}
