//! Dashboard layout
//!
//! The dashboard is a column of widgets. Users can reorder and hide them;
//! the layout is stored in the local settings file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A dashboard widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Widget {
    Summary,
    Budget,
    Breakdown,
    Trend,
    TopCategory,
    Upcoming,
}

impl Widget {
    pub const ALL: [Widget; 6] = [
        Widget::Summary,
        Widget::Budget,
        Widget::Breakdown,
        Widget::Trend,
        Widget::TopCategory,
        Widget::Upcoming,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::Budget => "Budget goals",
            Self::Breakdown => "Spending by category",
            Self::Trend => "Monthly trend",
            Self::TopCategory => "Top category",
            Self::Upcoming => "Upcoming bills",
        }
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Summary => "summary",
            Self::Budget => "budget",
            Self::Breakdown => "breakdown",
            Self::Trend => "trend",
            Self::TopCategory => "top-category",
            Self::Upcoming => "upcoming",
        };
        f.write_str(name)
    }
}

impl FromStr for Widget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Widget::ALL
            .into_iter()
            .find(|w| w.to_string() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| format!("Unknown widget: {}", s))
    }
}

/// One position in the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSlot {
    pub widget: Widget,
    pub visible: bool,
}

/// Ordered widget slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardLayout {
    pub widgets: Vec<WidgetSlot>,
}

impl Default for DashboardLayout {
    fn default() -> Self {
        Self {
            widgets: Widget::ALL
                .into_iter()
                .map(|widget| WidgetSlot {
                    widget,
                    visible: true,
                })
                .collect(),
        }
    }
}

impl DashboardLayout {
    /// Re-add any widget missing from a stored layout and drop duplicates
    pub fn normalized(mut self) -> Self {
        let mut seen = Vec::new();
        self.widgets.retain(|slot| {
            if seen.contains(&slot.widget) {
                false
            } else {
                seen.push(slot.widget);
                true
            }
        });
        for widget in Widget::ALL {
            if !seen.contains(&widget) {
                self.widgets.push(WidgetSlot {
                    widget,
                    visible: true,
                });
            }
        }
        self
    }

    pub fn position(&self, widget: Widget) -> Option<usize> {
        self.widgets.iter().position(|slot| slot.widget == widget)
    }

    /// Move a widget to `index`, clamped to the end of the list
    pub fn move_widget(&mut self, widget: Widget, index: usize) {
        if let Some(from) = self.position(widget) {
            let slot = self.widgets.remove(from);
            let to = index.min(self.widgets.len());
            self.widgets.insert(to, slot);
        }
    }

    pub fn set_visible(&mut self, widget: Widget, visible: bool) {
        if let Some(slot) = self.widgets.iter_mut().find(|s| s.widget == widget) {
            slot.visible = visible;
        }
    }

    /// Visible widgets in display order
    pub fn visible_widgets(&self) -> Vec<Widget> {
        self.widgets
            .iter()
            .filter(|slot| slot.visible)
            .map(|slot| slot.widget)
            .collect()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
