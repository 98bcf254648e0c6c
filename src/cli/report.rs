//! Report CLI commands
//!
//! Read-only views over the signed-in user's records.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::dashboard::{
    format_breakdown, format_comparison, format_summary, format_top_category, format_trend,
    format_upcoming,
};
use crate::display::report::section_header;
use crate::display::{format_dashboard, DisplayOptions};
use crate::error::FinanceResult;
use crate::models::{ExpenseRecord, YearMonth};
use crate::reports::{
    compare_periods, compute_category_breakdown, compute_monthly_series, top_category_for_period,
    upcoming_expenses,
};
use crate::services::Dashboard;

/// Report commands, exposed at the top level
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Totals, projected balance and bill status counts
    Summary,

    /// Spending by category
    Breakdown {
        /// Only expenses due in this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<YearMonth>,
    },

    /// Income, expenses and balance per month
    Trend {
        /// Number of months (defaults to the configured trend length)
        #[arg(short, long)]
        months: Option<usize>,
    },

    /// Compare the last N months with the N before
    Compare {
        #[arg(short, long, default_value = "3")]
        months: usize,
    },

    /// Biggest spending category over the last N months
    Top {
        #[arg(short, long, default_value = "1")]
        months: usize,
    },

    /// Overdue bills and bills due soon
    Upcoming {
        /// Look-ahead window in days (defaults to the configured window)
        #[arg(short, long)]
        days: Option<i64>,
    },

    /// Every visible widget in layout order
    Dashboard,
}

/// Handle a report command
pub fn handle_report_command(
    dashboard: &Dashboard,
    settings: &Settings,
    options: &DisplayOptions,
    cmd: ReportCommands,
) -> FinanceResult<()> {
    let records = dashboard.records();
    let current = YearMonth::from_date(options.today);

    match cmd {
        ReportCommands::Summary => {
            print!("{}", section_header("Summary"));
            print!("{}", format_summary(&dashboard.views().summary, options));
        }

        ReportCommands::Breakdown { month } => {
            let rows = match month {
                Some(month) => {
                    let in_month: Vec<ExpenseRecord> = records
                        .expenses
                        .iter()
                        .filter(|e| month.contains(e.due_date))
                        .cloned()
                        .collect();
                    print!("{}", section_header(&format!("Spending by category, {}", month.label())));
                    compute_category_breakdown(&in_month)
                }
                None => {
                    print!("{}", section_header("Spending by category"));
                    compute_category_breakdown(&records.expenses)
                }
            };
            print!("{}", format_breakdown(&rows, options));
        }

        ReportCommands::Trend { months } => {
            let months = months.unwrap_or(settings.trend_months).max(1);
            let series = compute_monthly_series(&records.expenses, &records.incomes, months, current);
            print!("{}", section_header("Monthly trend"));
            print!("{}", format_trend(&series, options));
        }

        ReportCommands::Compare { months } => {
            let months = months.max(1);
            let series =
                compute_monthly_series(&records.expenses, &records.incomes, months * 2, current);
            print!("{}", format_comparison(&compare_periods(&series, months), options));
        }

        ReportCommands::Top { months } => {
            let period = current.trailing(months.max(1));
            let top = top_category_for_period(&records.expenses, &period);
            print!("{}", section_header("Top category"));
            print!("{}", format_top_category(top.as_ref(), options));
        }

        ReportCommands::Upcoming { days } => {
            let days = days.unwrap_or(settings.due_soon_days).max(0);
            let upcoming = upcoming_expenses(&records.expenses, options.today, days);
            print!("{}", section_header("Upcoming bills"));
            print!("{}", format_upcoming(&upcoming, options));
        }

        ReportCommands::Dashboard => {
            print!("{}", format_dashboard(&dashboard.views(), &settings.layout, options));
        }
    }

    Ok(())
}
