//! Expense categories
//!
//! Categories form a fixed reference set. Expenses embed a copy of their
//! category so that reports keep working if the set is later renamed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A label used to group expenses for reporting
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// Stable identifier (e.g. "food")
    pub id: String,

    /// Display name
    pub name: String,

    /// Hex color used by charts
    pub color: String,

    /// Optional icon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

const DEFAULTS: &[(&str, &str, &str, Option<&str>)] = &[
    ("housing", "Housing", "#4e79a7", Some("home")),
    ("food", "Food", "#f28e2b", Some("restaurant")),
    ("transport", "Transport", "#e15759", Some("directions_car")),
    ("health", "Health", "#76b7b2", Some("favorite")),
    ("education", "Education", "#59a14f", Some("school")),
    ("leisure", "Leisure", "#edc948", Some("celebration")),
    ("utilities", "Utilities", "#b07aa1", Some("bolt")),
    ("other", "Other", "#9c755f", None),
];

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// The built-in reference set
    pub fn defaults() -> Vec<Category> {
        DEFAULTS
            .iter()
            .map(|(id, name, color, icon)| Category {
                id: (*id).to_string(),
                name: (*name).to_string(),
                color: (*color).to_string(),
                icon: icon.map(str::to_string),
            })
            .collect()
    }

    /// Look up a built-in category by id or (case-insensitive) name
    pub fn find(key: &str) -> Option<Category> {
        let key = key.trim();
        Self::defaults()
            .into_iter()
            .find(|c| c.id == key || c.name.eq_ignore_ascii_case(key))
    }

    /// The catch-all category
    pub fn other() -> Category {
        Self::new("other", "Other", "#9c755f")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
