//! Dashboard widgets
//!
//! One formatter per widget, plus [`format_dashboard`] which renders the
//! visible widgets in layout order.

use super::report::{format_bar, format_change, format_percentage, section_header, truncate};
use super::DisplayOptions;
use crate::models::{DashboardLayout, Widget};
use crate::reports::{
    CategoryBreakdown, DashboardSummary, DueStatus, MonthlyTotals, PeriodComparison, TopCategory,
    UpcomingExpense,
};
use crate::services::budget::{AlertState, BudgetStatus, VerticalStatus};
use crate::services::dashboard::DashboardViews;

const BAR_WIDTH: usize = 20;

pub fn format_summary(summary: &DashboardSummary, options: &DisplayOptions) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Income:            {:>14}\n",
        options.money(summary.total_income)
    ));
    output.push_str(&format!(
        "Expenses:          {:>14}\n",
        options.money(summary.total_expense)
    ));
    output.push_str(&format!(
        "Projected balance: {:>14}\n",
        options.money(summary.projected_balance)
    ));
    output.push_str(&format!(
        "Bills: {} paid, {} pending ({} overdue, {} due soon)\n",
        summary.count_paid, summary.count_pending, summary.count_overdue, summary.count_due_soon
    ));
    output
}

fn state_label(state: AlertState) -> &'static str {
    match state {
        AlertState::Ok => "OK",
        AlertState::Warn => "WARNING",
        AlertState::Exceeded => "EXCEEDED",
    }
}

fn format_vertical(label: &str, vertical: &VerticalStatus, options: &DisplayOptions) -> String {
    if !vertical.is_applicable() {
        return format!("{:<22} no income recorded\n", label);
    }
    let used = vertical.percent_used.max(0) as f64;
    format!(
        "{:<22} {} {:>4}%  {} of {}  [{}]\n",
        label,
        format_bar(used.min(100.0), 100.0, BAR_WIDTH),
        vertical.percent_used,
        options.money(vertical.expense_total),
        options.money(vertical.budget),
        state_label(vertical.state)
    )
}

pub fn format_budget(status: Option<&BudgetStatus>, options: &DisplayOptions) -> String {
    let Some(status) = status else {
        return "Budget status unavailable.\n".to_string();
    };

    let mut output = String::new();
    output.push_str(&format_vertical(
        &format!("Overall ({}% of income)", status.general.goal_percent),
        &status.general,
        options,
    ));
    output.push_str(&format_vertical(
        &format!("{} ({}%)", status.reference_month.label(), status.monthly.goal_percent),
        &status.monthly,
        options,
    ));
    output
}

pub fn format_breakdown(rows: &[CategoryBreakdown], options: &DisplayOptions) -> String {
    if rows.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let max = rows.first().map(|r| r.percent).unwrap_or(0.0);
    let mut output = String::new();
    for row in rows {
        output.push_str(&format!(
            "{:<12} {} {:>12} {:>6}  ({})\n",
            truncate(&row.category.name, 12),
            format_bar(row.percent, max, BAR_WIDTH),
            options.money(row.amount),
            format_percentage(row.percent),
            row.count
        ));
    }
    output
}

pub fn format_trend(series: &[MonthlyTotals], options: &DisplayOptions) -> String {
    if series.is_empty() {
        return "No months to show.\n".to_string();
    }

    let mut output = format!(
        "{:<9} {:>12} {:>12} {:>12}\n",
        "Month", "Income", "Expenses", "Balance"
    );
    // Oldest first reads naturally as a trend.
    for month in series.iter().rev() {
        output.push_str(&format!(
            "{:<9} {:>12} {:>12} {:>12}\n",
            month.month.label(),
            options.money(month.income),
            options.money(month.expense),
            options.money(month.balance)
        ));
    }
    output
}

pub fn format_comparison(comparison: &PeriodComparison, options: &DisplayOptions) -> String {
    let mut output = format!(
        "Last {} month(s) vs the {} before\n",
        comparison.months, comparison.months
    );
    let previous = comparison.previous;
    let prev_money = |m: Option<crate::models::Money>| {
        m.map(|m| options.money(m)).unwrap_or_else(|| "n/a".to_string())
    };
    output.push_str(&format!(
        "Income:   {:>12} vs {:>12}  {}\n",
        options.money(comparison.current.income),
        prev_money(previous.map(|p| p.income)),
        format_change(comparison.income_change)
    ));
    output.push_str(&format!(
        "Expenses: {:>12} vs {:>12}  {}\n",
        options.money(comparison.current.expense),
        prev_money(previous.map(|p| p.expense)),
        format_change(comparison.expense_change)
    ));
    output
}

pub fn format_top_category(top: Option<&TopCategory>, options: &DisplayOptions) -> String {
    match top {
        Some(top) => format!(
            "{}: {} ({} of spending)\n",
            top.name,
            options.money(top.amount),
            format_percentage(top.percent)
        ),
        None => "No expenses in this period.\n".to_string(),
    }
}

pub fn format_upcoming(upcoming: &[UpcomingExpense], options: &DisplayOptions) -> String {
    if upcoming.is_empty() {
        return "Nothing due.\n".to_string();
    }

    let mut output = String::new();
    for item in upcoming {
        let when = match (item.status, item.days_until_due) {
            (DueStatus::Overdue, days) => format!("{} day(s) overdue", -days),
            (DueStatus::DueSoon, 0) => "due today".to_string(),
            (DueStatus::DueSoon, days) => format!("in {} day(s)", days),
        };
        output.push_str(&format!(
            "{:<13} {} {:<24} {:>12}  {}\n",
            item.expense.id.to_string(),
            options.date(item.expense.due_date),
            truncate(&item.expense.description, 24),
            options.money(item.expense.amount),
            when
        ));
    }
    output
}

/// One widget's body
pub fn format_widget(widget: Widget, views: &DashboardViews, options: &DisplayOptions) -> String {
    match widget {
        Widget::Summary => format_summary(&views.summary, options),
        Widget::Budget => format_budget(views.budget.as_ref(), options),
        Widget::Breakdown => format_breakdown(&views.breakdown, options),
        Widget::Trend => {
            let mut output = format_trend(&views.trend, options);
            output.push('\n');
            output.push_str(&format_comparison(&views.comparison, options));
            output
        }
        Widget::TopCategory => format_top_category(views.top_category.as_ref(), options),
        Widget::Upcoming => format_upcoming(&views.upcoming, options),
    }
}

/// Visible widgets, in layout order, each under its title
pub fn format_dashboard(
    views: &DashboardViews,
    layout: &DashboardLayout,
    options: &DisplayOptions,
) -> String {
    let sections: Vec<String> = layout
        .visible_widgets()
        .into_iter()
        .map(|widget| {
            format!(
                "{}{}",
                section_header(widget.title()),
                format_widget(widget, views, options)
            )
        })
        .collect();

    if sections.is_empty() {
        return "All widgets are hidden. Use `findash layout show-widget <widget>`.\n".to_string();
    }
    sections.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetGoal, Category, ExpenseRecord, IncomeRecord, Money, NewExpense, NewIncome, YearMonth};
    use crate::services::budget::DEFAULT_WARN_THRESHOLD;
    use crate::services::DashboardContext;
    use crate::store::RecordSet;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_views() -> DashboardViews {
        let records = RecordSet::new(
            vec![
                ExpenseRecord::from_new(NewExpense::new(
                    "Rent",
                    Money::from_units(300),
                    Category::find("housing").unwrap(),
                    date(2025, 1, 10),
                )),
                ExpenseRecord::from_new(NewExpense::new(
                    "Car repair",
                    Money::from_units(900),
                    Category::find("transport").unwrap(),
                    date(2025, 1, 20),
                )),
            ],
            vec![IncomeRecord::from_new(NewIncome::new(
                "Salary",
                Money::from_units(1000),
                date(2025, 1, 5),
            ))],
        );
        let mut views = DashboardViews::compute(&records, &DashboardContext::new(date(2025, 1, 8)));
        views.budget = Some(BudgetStatus::compute(
            &records,
            &BudgetGoal::for_month(YearMonth::new(2025, 1).unwrap()),
            DEFAULT_WARN_THRESHOLD,
        ));
        views
    }

    #[test]
    fn test_summary_shows_negative_balance() {
        let views = sample_views();
        let text = format_summary(&views.summary, &DisplayOptions::new(views.today));
        assert!(text.contains("-$200.00"));
        assert!(text.contains("0 paid, 2 pending (0 overdue, 1 due soon)"));
    }

    #[test]
    fn test_budget_shows_exceeded() {
        let views = sample_views();
        let text = format_budget(views.budget.as_ref(), &DisplayOptions::new(views.today));
        assert!(text.contains("120%"));
        assert!(text.contains("[EXCEEDED]"));
        assert!(text.contains("Jan 2025 (100%)"));
    }

    #[test]
    fn test_layout_controls_order_and_visibility() {
        let views = sample_views();
        let mut layout = DashboardLayout::default();
        layout.move_widget(Widget::Upcoming, 0);
        layout.set_visible(Widget::Trend, false);

        let text = format_dashboard(&views, &layout, &DisplayOptions::new(views.today));

        let upcoming = text.find("Upcoming bills").unwrap();
        let summary = text.find("Summary").unwrap();
        assert!(upcoming < summary);
        assert!(!text.contains("Monthly trend"));
    }

    #[test]
    fn test_all_hidden() {
        let views = sample_views();
        let mut layout = DashboardLayout::default();
        for widget in Widget::ALL {
            layout.set_visible(widget, false);
        }
        let text = format_dashboard(&views, &layout, &DisplayOptions::new(views.today));
        assert!(text.starts_with("All widgets are hidden"));
    }

    #[test]
    fn test_upcoming_wording() {
        let views = sample_views();
        let text = format_upcoming(&views.upcoming, &DisplayOptions::new(views.today));
        assert!(text.contains("in 2 day(s)"));
        assert!(!text.contains("Car repair"));
    }
}
