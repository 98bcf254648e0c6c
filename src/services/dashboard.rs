//! Dashboard service
//!
//! Owns the record and preference stores and keeps a derived
//! [`DashboardViews`] snapshot current: every change to either store
//! recomputes all views from scratch and re-evaluates the budget goals.
//! Mutations apply locally first; the matching backend writes are queued and
//! applied by [`Dashboard::sync`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::NaiveDate;
use serde::Serialize;

use super::budget::{BudgetStatus, BudgetTracker, DEFAULT_WARN_THRESHOLD};
use super::session::Session;
use crate::config::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    BudgetGoal, ExpenseId, ExpensePatch, ExpenseRecord, IncomeId, IncomePatch, IncomeRecord,
    NewExpense, NewIncome, YearMonth,
};
use crate::notify::Notifier;
use crate::reports::{
    compare_periods, compute_category_breakdown, compute_monthly_series,
    compute_summary_with_window, top_category_for_period, upcoming_expenses, CategoryBreakdown,
    DashboardSummary, MonthlyTotals, PeriodComparison, TopCategory, UpcomingExpense,
    DUE_SOON_DAYS,
};
use crate::storage::{load_preferences, DocumentBackend, FlushReport, PendingWrite, WriteBehind};
use crate::store::{PreferenceStore, RecordSet, RecordStore, Store, Subscription};

/// Inputs to the derived views other than the records themselves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardContext {
    pub today: NaiveDate,
    pub warn_threshold: u8,
    pub due_soon_days: i64,
    /// Months in the trend series; also the width of each comparison window
    pub trend_months: usize,
    pub currency_symbol: String,
}

impl DashboardContext {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            warn_threshold: DEFAULT_WARN_THRESHOLD,
            due_soon_days: DUE_SOON_DAYS,
            trend_months: 6,
            currency_symbol: "$".to_string(),
        }
    }

    pub fn from_settings(settings: &Settings, today: NaiveDate) -> Self {
        Self {
            today,
            warn_threshold: settings.warn_threshold,
            due_soon_days: settings.due_soon_days,
            trend_months: settings.trend_months,
            currency_symbol: settings.currency_symbol.clone(),
        }
    }

    pub fn current_month(&self) -> YearMonth {
        YearMonth::from_date(self.today)
    }
}

/// Every derived view for one snapshot of records and preferences
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViews {
    pub today: NaiveDate,
    pub summary: DashboardSummary,
    pub breakdown: Vec<CategoryBreakdown>,
    /// Most recent month first
    pub trend: Vec<MonthlyTotals>,
    pub comparison: PeriodComparison,
    pub top_category: Option<TopCategory>,
    pub upcoming: Vec<UpcomingExpense>,
    /// `None` when the budget evaluation failed
    pub budget: Option<BudgetStatus>,
}

impl DashboardViews {
    /// Pure views; the budget status is filled in by the tracker
    pub fn compute(records: &RecordSet, context: &DashboardContext) -> Self {
        let current = context.current_month();
        let months = context.trend_months.max(1);
        let series = compute_monthly_series(&records.expenses, &records.incomes, months * 2, current);
        let period: Vec<YearMonth> = current.trailing(months);

        Self {
            today: context.today,
            summary: compute_summary_with_window(
                &records.expenses,
                &records.incomes,
                context.today,
                context.due_soon_days,
            ),
            breakdown: compute_category_breakdown(&records.expenses),
            comparison: compare_periods(&series, months),
            trend: series.into_iter().take(months).collect(),
            top_category: top_category_for_period(&records.expenses, &period),
            upcoming: upcoming_expenses(&records.expenses, context.today, context.due_soon_days),
            budget: None,
        }
    }
}

/// Shared state the store subscribers recompute from
struct Recompute {
    context: RefCell<DashboardContext>,
    tracker: RefCell<BudgetTracker>,
    views: Store<DashboardViews>,
    notifier: Rc<dyn Notifier>,
    /// Set while several stores change together; the caller recomputes once after
    paused: Cell<bool>,
}

impl Recompute {
    fn run(&self, records: &RecordSet, goal: &BudgetGoal) {
        if self.paused.get() {
            return;
        }
        let context = self.context.borrow().clone();
        let mut views = DashboardViews::compute(records, &context);
        views.budget = self.evaluate_budget(records, goal);
        self.views.set(views);
    }

    /// Budget failures never interrupt the view update
    fn evaluate_budget(&self, records: &RecordSet, goal: &BudgetGoal) -> Option<BudgetStatus> {
        let mut tracker = match self.tracker.try_borrow_mut() {
            Ok(tracker) => tracker,
            Err(err) => {
                tracing::warn!(error = %err, "budget tracker busy, skipping evaluation");
                return None;
            }
        };
        match tracker.evaluate(records, goal, self.notifier.as_ref()) {
            Ok(status) => Some(status),
            Err(err) => {
                tracing::warn!(error = %err, "budget evaluation failed");
                None
            }
        }
    }
}

/// The signed-in user's dashboard
pub struct Dashboard {
    session: Session,
    backend: Box<dyn DocumentBackend>,
    notifier: Rc<dyn Notifier>,
    records: RecordStore,
    preferences: PreferenceStore,
    shared: Rc<Recompute>,
    writes: WriteBehind,
    subscriptions: Vec<Subscription>,
}

impl Dashboard {
    pub fn new(
        session: Session,
        backend: Box<dyn DocumentBackend>,
        notifier: Rc<dyn Notifier>,
        context: DashboardContext,
    ) -> Self {
        let records = RecordStore::default();
        let preferences = PreferenceStore::new(BudgetGoal::for_month(context.current_month()));
        let tracker = BudgetTracker::new(context.warn_threshold)
            .with_currency(context.currency_symbol.clone());
        let initial = DashboardViews::compute(&records.snapshot(), &context);

        let shared = Rc::new(Recompute {
            context: RefCell::new(context),
            tracker: RefCell::new(tracker),
            views: Store::new(initial),
            notifier: Rc::clone(&notifier),
            paused: Cell::new(false),
        });

        let on_records = {
            let shared = Rc::clone(&shared);
            let preferences = preferences.clone();
            records.subscribe(move |set| shared.run(set, &preferences.goal()))
        };
        let on_preferences = {
            let shared = Rc::clone(&shared);
            let records = records.clone();
            preferences.subscribe(move |goal| shared.run(&records.snapshot(), goal))
        };

        let dashboard = Self {
            session,
            backend,
            notifier,
            records,
            preferences,
            shared,
            writes: WriteBehind::new(),
            subscriptions: vec![on_records, on_preferences],
        };
        dashboard.refresh();
        dashboard
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn records(&self) -> Rc<RecordSet> {
        self.records.snapshot()
    }

    pub fn goal(&self) -> BudgetGoal {
        self.preferences.goal()
    }

    pub fn views(&self) -> Rc<DashboardViews> {
        self.shared.views.get()
    }

    pub fn context(&self) -> DashboardContext {
        self.shared.context.borrow().clone()
    }

    /// Observe every recomputation of the views
    pub fn subscribe_views(
        &self,
        callback: impl FnMut(&Rc<DashboardViews>) + 'static,
    ) -> Subscription {
        self.shared.views.subscribe(callback)
    }

    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }

    /// Recompute views from the current stores
    pub fn refresh(&self) {
        self.shared.run(&self.records.snapshot(), &self.preferences.goal());
    }

    pub fn set_today(&self, today: NaiveDate) {
        self.shared.context.borrow_mut().today = today;
        self.refresh();
    }

    /// Replace local state with the signed-in user's documents
    ///
    /// Both stores are swapped before anything is recomputed, so the budget
    /// is evaluated once, over the loaded goal and records together.
    pub fn load(&mut self) -> FinanceResult<()> {
        let user = self.session.require_user()?.clone();
        let expenses = self.backend.list_expenses(&user)?;
        let incomes = self.backend.list_incomes(&user)?;
        let goal = load_preferences(self.backend.as_ref(), &user)?
            .unwrap_or_else(|| BudgetGoal::for_month(self.context().current_month()));

        tracing::debug!(
            user = %user,
            expenses = expenses.len(),
            incomes = incomes.len(),
            "loaded documents"
        );

        self.shared.paused.set(true);
        let applied = self.preferences.set(goal);
        if applied.is_ok() {
            self.records.replace_all(RecordSet::new(expenses, incomes));
        }
        self.shared.paused.set(false);
        applied?;

        self.shared.tracker.borrow_mut().reset();
        self.refresh();
        Ok(())
    }

    /// Apply queued backend writes
    pub fn sync(&mut self) -> FinanceResult<FlushReport> {
        self.writes
            .flush(self.backend.as_ref(), &self.session, self.notifier.as_ref())
    }

    /// Resolve a user-typed expense handle
    pub fn resolve_expense(&self, handle: &str) -> FinanceResult<ExpenseId> {
        self.records
            .snapshot()
            .resolve_expense(handle)
            .ok_or_else(|| FinanceError::expense_not_found(handle))
    }

    pub fn resolve_income(&self, handle: &str) -> FinanceResult<IncomeId> {
        self.records
            .snapshot()
            .resolve_income(handle)
            .ok_or_else(|| FinanceError::income_not_found(handle))
    }

    pub fn add_expense(&mut self, new: NewExpense) -> FinanceResult<ExpenseRecord> {
        self.session.require_user()?;
        ExpenseRecord::from_new(new.clone())
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let record = self.records.add_expense(new);
        self.writes.enqueue(PendingWrite::PutExpense(record.clone()));
        Ok(record)
    }

    pub fn update_expense(
        &mut self,
        id: ExpenseId,
        patch: ExpensePatch,
    ) -> FinanceResult<ExpenseRecord> {
        self.session.require_user()?;
        let mut candidate = self
            .records
            .snapshot()
            .expense(id)
            .cloned()
            .ok_or_else(|| FinanceError::expense_not_found(id.to_string()))?;
        candidate.apply(patch.clone());
        candidate
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let record = self
            .records
            .update_expense(id, patch)
            .ok_or_else(|| FinanceError::expense_not_found(id.to_string()))?;
        self.writes.enqueue(PendingWrite::PutExpense(record.clone()));
        Ok(record)
    }

    /// Mark paid on `on`, or today when not given
    pub fn mark_paid(&mut self, id: ExpenseId, on: Option<NaiveDate>) -> FinanceResult<ExpenseRecord> {
        self.session.require_user()?;
        let on = on.unwrap_or(self.context().today);
        let record = self
            .records
            .mark_paid(id, on)
            .ok_or_else(|| FinanceError::expense_not_found(id.to_string()))?;
        self.writes.enqueue(PendingWrite::PutExpense(record.clone()));
        Ok(record)
    }

    pub fn mark_pending(&mut self, id: ExpenseId) -> FinanceResult<ExpenseRecord> {
        self.session.require_user()?;
        let record = self
            .records
            .mark_pending(id)
            .ok_or_else(|| FinanceError::expense_not_found(id.to_string()))?;
        self.writes.enqueue(PendingWrite::PutExpense(record.clone()));
        Ok(record)
    }

    pub fn remove_expense(&mut self, id: ExpenseId) -> FinanceResult<ExpenseRecord> {
        self.session.require_user()?;
        let removed = self
            .records
            .remove_expense(id)
            .ok_or_else(|| FinanceError::expense_not_found(id.to_string()))?;
        self.writes.enqueue(PendingWrite::DeleteExpense(id));
        Ok(removed)
    }

    pub fn add_income(&mut self, new: NewIncome) -> FinanceResult<IncomeRecord> {
        self.session.require_user()?;
        IncomeRecord::from_new(new.clone())
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let record = self.records.add_income(new);
        self.writes.enqueue(PendingWrite::PutIncome(record.clone()));
        Ok(record)
    }

    pub fn update_income(&mut self, id: IncomeId, patch: IncomePatch) -> FinanceResult<IncomeRecord> {
        self.session.require_user()?;
        let mut candidate = self
            .records
            .snapshot()
            .income(id)
            .cloned()
            .ok_or_else(|| FinanceError::income_not_found(id.to_string()))?;
        candidate.apply(patch.clone());
        candidate
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let record = self
            .records
            .update_income(id, patch)
            .ok_or_else(|| FinanceError::income_not_found(id.to_string()))?;
        self.writes.enqueue(PendingWrite::PutIncome(record.clone()));
        Ok(record)
    }

    pub fn remove_income(&mut self, id: IncomeId) -> FinanceResult<IncomeRecord> {
        self.session.require_user()?;
        let removed = self
            .records
            .remove_income(id)
            .ok_or_else(|| FinanceError::income_not_found(id.to_string()))?;
        self.writes.enqueue(PendingWrite::DeleteIncome(id));
        Ok(removed)
    }

    /// Replace the budget goal and queue its persistence
    pub fn set_goal(&mut self, goal: BudgetGoal) -> FinanceResult<BudgetGoal> {
        self.session.require_user()?;
        self.preferences.set(goal)?;
        self.writes.enqueue(PendingWrite::SavePreferences(goal));
        Ok(goal)
    }

    pub fn set_general_percent(&mut self, percent: u8) -> FinanceResult<BudgetGoal> {
        self.set_goal(BudgetGoal {
            general_percent: percent,
            ..self.goal()
        })
    }

    pub fn set_monthly_percent(&mut self, percent: u8) -> FinanceResult<BudgetGoal> {
        self.set_goal(BudgetGoal {
            monthly_percent: percent,
            ..self.goal()
        })
    }

    pub fn set_reference_month(&mut self, month: YearMonth) -> FinanceResult<BudgetGoal> {
        self.set_goal(BudgetGoal {
            reference_month: month,
            ..self.goal()
        })
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        if !self.writes.is_empty() {
            tracing::warn!(pending = self.writes.len(), "dashboard dropped with unsynced writes");
        }
        // Unsubscribe before the stores go away; the two stores reference each other.
        self.subscriptions.clear();
    }
}
