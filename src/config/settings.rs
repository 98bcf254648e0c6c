//! User settings for findash
//!
//! Display preferences, alert thresholds and the dashboard layout. Budget
//! goals are not stored here; they belong to the user's documents.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::DashboardPaths;
use crate::error::FinanceError;
use crate::models::DashboardLayout;
use crate::services::budget::DEFAULT_WARN_THRESHOLD;

/// Longest accepted due-soon window, in days
pub const MAX_DUE_SOON_DAYS: i64 = 366;

/// User settings for findash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Percent used at which a budget goal starts warning
    #[serde(default = "default_warn_threshold")]
    pub warn_threshold: u8,

    /// Days ahead that count as "due soon"
    #[serde(default = "default_due_soon_days")]
    pub due_soon_days: i64,

    /// Months shown by the trend widget
    #[serde(default = "default_trend_months")]
    pub trend_months: usize,

    /// User signed in when neither `--user` nor `FINDASH_USER` is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,

    /// Log filter used when `FINDASH_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub layout: DashboardLayout,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_warn_threshold() -> u8 {
    DEFAULT_WARN_THRESHOLD
}

fn default_due_soon_days() -> i64 {
    7
}

fn default_trend_months() -> usize {
    6
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            warn_threshold: default_warn_threshold(),
            due_soon_days: default_due_soon_days(),
            trend_months: default_trend_months(),
            default_user: None,
            log_level: default_log_level(),
            layout: DashboardLayout::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &DashboardPaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

        let mut settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| FinanceError::Config(format!("Failed to parse settings file: {}", e)))?;
        settings.layout = settings.layout.normalized();
        settings.validate()?;

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DashboardPaths) -> Result<(), FinanceError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), FinanceError> {
        if !(1..=99).contains(&self.warn_threshold) {
            return Err(FinanceError::Config(format!(
                "warn_threshold must be between 1 and 99, got {}",
                self.warn_threshold
            )));
        }
        if !(0..=MAX_DUE_SOON_DAYS).contains(&self.due_soon_days) {
            return Err(FinanceError::Config(format!(
                "due_soon_days must be between 0 and {}, got {}",
                MAX_DUE_SOON_DAYS, self.due_soon_days
            )));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(FinanceError::Config(format!(
                "date_format is not a valid strftime format: {}",
                self.date_format
            )));
        }
        if !(1..=24).contains(&self.trend_months) {
            return Err(FinanceError::Config(format!(
                "trend_months must be between 1 and 24, got {}",
                self.trend_months
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Widget;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.warn_threshold, 75);
        assert_eq!(settings.due_soon_days, 7);
        assert_eq!(settings.trend_months, 6);
        assert_eq!(settings.currency_symbol, "$");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashboardPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.warn_threshold = 80;
        settings.default_user = Some("alice".into());
        settings.layout.set_visible(Widget::Trend, false);

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.warn_threshold, 75);
        assert_eq!(settings.layout, DashboardLayout::default());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut settings = Settings::default();
        settings.warn_threshold = 100;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.trend_months = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.due_soon_days = -1;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.due_soon_days = 1_000_000_000;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.due_soon_days = MAX_DUE_SOON_DAYS;
        assert!(settings.validate().is_ok());

        let mut settings = Settings::default();
        settings.date_format = "%Q".into();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_rejects_oversized_due_soon_window() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashboardPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"due_soon_days": 1000000000}"#).unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(FinanceError::Config(_))
        ));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashboardPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"warn_threshold": 0}"#).unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(FinanceError::Config(_))
        ));
    }
}
