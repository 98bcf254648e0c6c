//! Service layer for findash
//!
//! Business logic on top of the stores and the storage layer: the signed-in
//! session, budget goal tracking, and the dashboard that wires them together.

pub mod budget;
pub mod dashboard;
pub mod session;

pub use budget::{AlertState, BudgetStatus, BudgetTracker, BudgetVertical, VerticalStatus};
pub use dashboard::{Dashboard, DashboardContext, DashboardViews};
pub use session::{Session, UserId};
