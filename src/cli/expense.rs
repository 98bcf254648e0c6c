//! Expense CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{parse_amount, parse_category};
use crate::display::{format_expense_details, format_expense_table, DisplayOptions};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{ExpensePatch, ExpenseRecord, NewExpense, Priority};
use crate::services::Dashboard;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the expense is for
        description: String,
        /// Amount (e.g., "120" or "120.50")
        amount: String,
        /// Category id or name (see `findash categories`)
        #[arg(short, long, default_value = "other")]
        category: String,
        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: NaiveDate,
        /// high, medium or low
        #[arg(short, long, default_value = "medium")]
        priority: Priority,
        /// Record it as already paid today
        #[arg(long)]
        paid: bool,
    },

    /// List expenses
    #[command(alias = "ls")]
    List {
        /// Only unpaid expenses
        #[arg(long, conflicts_with = "paid")]
        pending: bool,
        /// Only paid expenses
        #[arg(long)]
        paid: bool,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show one expense
    Show {
        /// Expense id (e.g., exp-1a2b3c4d)
        id: String,
    },

    /// Mark an expense as paid
    Pay {
        id: String,
        /// Payment date (defaults to today)
        #[arg(long)]
        on: Option<NaiveDate>,
    },

    /// Mark an expense as not paid
    Unpay { id: String },

    /// Change fields of an expense
    Edit {
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        due: Option<NaiveDate>,
        #[arg(short, long)]
        priority: Option<Priority>,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Remove { id: String },
}

/// Handle an expense command
pub fn handle_expense_command(
    dashboard: &mut Dashboard,
    options: &DisplayOptions,
    cmd: ExpenseCommands,
) -> FinanceResult<()> {
    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            category,
            due,
            priority,
            paid,
        } => {
            let mut new = NewExpense::new(description, parse_amount(&amount)?, parse_category(&category)?, due)
                .with_priority(priority);
            if paid {
                new = new.paid_on(options.today);
            }
            let expense = dashboard.add_expense(new)?;
            println!(
                "Added expense {}: {} {} due {}",
                expense.id,
                expense.description,
                options.money(expense.amount),
                options.date(expense.due_date)
            );
        }

        ExpenseCommands::List {
            pending,
            paid,
            category,
        } => {
            let category = category.as_deref().map(parse_category).transpose()?;
            let records = dashboard.records();
            let mut expenses: Vec<ExpenseRecord> = records
                .expenses
                .iter()
                .filter(|e| !pending || !e.paid)
                .filter(|e| !paid || e.paid)
                .filter(|e| category.as_ref().map_or(true, |c| e.category.id == c.id))
                .cloned()
                .collect();
            expenses.sort_by(|a, b| a.due_date.cmp(&b.due_date));
            println!("{}", format_expense_table(&expenses, options));
        }

        ExpenseCommands::Show { id } => {
            let id = dashboard.resolve_expense(&id)?;
            let records = dashboard.records();
            let expense = records
                .expense(id)
                .ok_or_else(|| FinanceError::expense_not_found(id.to_string()))?;
            print!("{}", format_expense_details(expense, options));
        }

        ExpenseCommands::Pay { id, on } => {
            let id = dashboard.resolve_expense(&id)?;
            let expense = dashboard.mark_paid(id, on)?;
            println!(
                "Marked {} ({}) as paid on {}",
                expense.id,
                expense.description,
                expense
                    .paid_date
                    .map(|d| options.date(d))
                    .unwrap_or_default()
            );
        }

        ExpenseCommands::Unpay { id } => {
            let id = dashboard.resolve_expense(&id)?;
            let expense = dashboard.mark_pending(id)?;
            println!("Marked {} ({}) as pending", expense.id, expense.description);
        }

        ExpenseCommands::Edit {
            id,
            description,
            amount,
            category,
            due,
            priority,
        } => {
            let id = dashboard.resolve_expense(&id)?;
            let patch = ExpensePatch {
                description,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                category: category.as_deref().map(parse_category).transpose()?,
                due_date: due,
                priority,
                ..Default::default()
            };
            if patch.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }
            let expense = dashboard.update_expense(id, patch)?;
            println!("Updated expense {}", expense.id);
            print!("{}", format_expense_details(&expense, options));
        }

        ExpenseCommands::Remove { id } => {
            let id = dashboard.resolve_expense(&id)?;
            let expense = dashboard.remove_expense(id)?;
            println!("Removed expense {} ({})", expense.id, expense.description);
        }
    }

    Ok(())
}
