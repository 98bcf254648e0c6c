//! findash - personal finance dashboard
//!
//! This library tracks expenses and incomes for a signed-in user, derives
//! summaries and reports from them, and watches two budget goals: an
//! overall share of income and a share of one month's income.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Records, categories, money, months and preferences
//! - `store`: Observable in-memory state
//! - `reports`: Pure derived views (summary, breakdown, trends)
//! - `services`: Session, budget alerts and the dashboard that ties them together
//! - `storage`: Per-user document backends and write-behind sync
//! - `display`, `export`, `cli`: Terminal output and commands
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_dashboard::config::{DashboardPaths, Settings};
//!
//! let paths = DashboardPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod notify;
pub mod reports;
pub mod seed;
pub mod services;
pub mod storage;
pub mod store;

pub use error::{FinanceError, FinanceResult};
