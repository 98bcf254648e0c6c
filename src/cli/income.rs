//! Income CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::parse_amount;
use crate::display::{format_income_details, format_income_table, DisplayOptions};
use crate::error::FinanceResult;
use crate::models::{IncomePatch, IncomeRecord, NewIncome, YearMonth};
use crate::services::Dashboard;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record income
    Add {
        description: String,
        /// Amount (e.g., "5000" or "5000.00")
        amount: String,
        /// Date received or expected (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Free-form label such as "salary"
        #[arg(short, long, default_value = "")]
        source: String,
    },

    /// List incomes
    #[command(alias = "ls")]
    List {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<YearMonth>,
    },

    /// Change fields of an income entry
    Edit {
        /// Income id (e.g., inc-1a2b3c4d)
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        date: Option<NaiveDate>,
        #[arg(short, long)]
        source: Option<String>,
    },

    /// Delete an income entry
    #[command(alias = "rm")]
    Remove { id: String },
}

/// Handle an income command
pub fn handle_income_command(
    dashboard: &mut Dashboard,
    options: &DisplayOptions,
    cmd: IncomeCommands,
) -> FinanceResult<()> {
    match cmd {
        IncomeCommands::Add {
            description,
            amount,
            date,
            source,
        } => {
            let new = NewIncome::new(description, parse_amount(&amount)?, date.unwrap_or(options.today))
                .with_source(source);
            let income = dashboard.add_income(new)?;
            println!(
                "Added income {}: {} {} on {}",
                income.id,
                income.description,
                options.money(income.amount),
                options.date(income.date)
            );
        }

        IncomeCommands::List { month } => {
            let records = dashboard.records();
            let mut incomes: Vec<IncomeRecord> = records
                .incomes
                .iter()
                .filter(|i| month.map_or(true, |m| m.contains(i.date)))
                .cloned()
                .collect();
            incomes.sort_by(|a, b| a.date.cmp(&b.date));
            println!("{}", format_income_table(&incomes, options));
        }

        IncomeCommands::Edit {
            id,
            description,
            amount,
            date,
            source,
        } => {
            let id = dashboard.resolve_income(&id)?;
            let patch = IncomePatch {
                description,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                date,
                source,
            };
            if patch.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }
            let income = dashboard.update_income(id, patch)?;
            println!("Updated income {}", income.id);
            print!("{}", format_income_details(&income, options));
        }

        IncomeCommands::Remove { id } => {
            let id = dashboard.resolve_income(&id)?;
            let income = dashboard.remove_income(id)?;
            println!("Removed income {} ({})", income.id, income.description);
        }
    }

    Ok(())
}
