//! Derived read-only views over the record set
//!
//! Every function here is pure and total: empty input gives zero-valued
//! output, never an error.

pub mod breakdown;
pub mod monthly;
pub mod summary;

pub use breakdown::{compute_category_breakdown, top_category_for_period, CategoryBreakdown, TopCategory};
pub use monthly::{
    compare_periods, compute_monthly_series, expense_in_month, income_in_month, percent_change,
    MonthlyTotals, PeriodComparison, PeriodTotals,
};
pub use summary::{
    compute_summary, compute_summary_with_window, upcoming_expenses, DashboardSummary, DueStatus,
    UpcomingExpense, DUE_SOON_DAYS,
};
