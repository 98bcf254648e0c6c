//! CSV export
//!
//! One row per record, spreadsheet-compatible. Amounts are plain decimals
//! without a currency symbol.

use std::io::Write;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{ExpenseRecord, IncomeRecord, Money};

fn amount(money: Money) -> String {
    format!("{:.2}", money.as_units_f64())
}

/// Write expenses to CSV
pub fn write_expenses_csv<W: Write>(expenses: &[ExpenseRecord], writer: W) -> FinanceResult<()> {
    let mut out = ::csv::Writer::from_writer(writer);
    out.write_record([
        "ID",
        "Description",
        "Category",
        "Amount",
        "Due Date",
        "Priority",
        "Status",
        "Paid Date",
    ])?;

    for expense in expenses {
        out.write_record([
            expense.id.as_uuid().to_string(),
            expense.description.clone(),
            expense.category.name.clone(),
            amount(expense.amount),
            expense.due_date.to_string(),
            expense.priority.to_string(),
            if expense.paid { "Paid" } else { "Pending" }.to_string(),
            expense.paid_date.map(|d| d.to_string()).unwrap_or_default(),
        ])?;
    }

    out.flush()
        .map_err(|e| FinanceError::Export(e.to_string()))?;
    Ok(())
}

/// Write incomes to CSV
pub fn write_incomes_csv<W: Write>(incomes: &[IncomeRecord], writer: W) -> FinanceResult<()> {
    let mut out = ::csv::Writer::from_writer(writer);
    out.write_record(["ID", "Description", "Source", "Amount", "Date"])?;

    for income in incomes {
        out.write_record([
            income.id.as_uuid().to_string(),
            income.description.clone(),
            income.source.clone(),
            amount(income.amount),
            income.date.to_string(),
        ])?;
    }

    out.flush()
        .map_err(|e| FinanceError::Export(e.to_string()))?;
    Ok(())
}
