//! Configuration module for findash
//!
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Display and alert preferences

pub mod paths;
pub mod settings;

pub use paths::DashboardPaths;
pub use settings::Settings;
