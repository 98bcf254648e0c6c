//! Budget goal CLI commands

use clap::Subcommand;

use crate::display::dashboard::format_budget;
use crate::display::report::section_header;
use crate::display::DisplayOptions;
use crate::error::{FinanceError, FinanceResult};
use crate::models::YearMonth;
use crate::services::Dashboard;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show usage of the overall and monthly goals
    Show,

    /// Change the budget goal
    Set {
        /// Share of all-time income (0-100)
        #[arg(short, long)]
        general: Option<u8>,

        /// Share of the reference month's income (0-100)
        #[arg(short, long)]
        monthly: Option<u8>,

        /// Reference month for the monthly goal (YYYY-MM)
        #[arg(long)]
        month: Option<YearMonth>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    dashboard: &mut Dashboard,
    options: &DisplayOptions,
    cmd: BudgetCommands,
) -> FinanceResult<()> {
    match cmd {
        BudgetCommands::Show => {
            let goal = dashboard.goal();
            print!("{}", section_header("Budget goals"));
            println!(
                "Overall goal: {}% of income, monthly goal: {}% for {}",
                goal.general_percent,
                goal.monthly_percent,
                goal.reference_month.label()
            );
            println!();
            print!("{}", format_budget(dashboard.views().budget.as_ref(), options));
        }

        BudgetCommands::Set {
            general,
            monthly,
            month,
        } => {
            if general.is_none() && monthly.is_none() && month.is_none() {
                return Err(FinanceError::Validation(
                    "Nothing to change: pass --general, --monthly or --month".into(),
                ));
            }

            let mut goal = dashboard.goal();
            if let Some(percent) = general {
                goal.general_percent = percent;
            }
            if let Some(percent) = monthly {
                goal.monthly_percent = percent;
            }
            if let Some(month) = month {
                goal.reference_month = month;
            }

            let goal = dashboard.set_goal(goal)?;
            println!(
                "Budget goal set: {}% overall, {}% for {}",
                goal.general_percent,
                goal.monthly_percent,
                goal.reference_month.label()
            );
        }
    }

    Ok(())
}
