//! User-facing notifications
//!
//! Budget alerts and persistence failures are reported through a
//! [`Notifier`]. Delivery is fire-and-forget.

use std::cell::RefCell;
use std::fmt;

use serde::Serialize;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A delivered notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind.label(), self.title, self.message)
    }
}

/// Sink for user-facing notifications
pub trait Notifier {
    fn notify(&self, notification: Notification);

    fn info(&self, title: &str, message: &str) {
        self.notify(Notification::new(NotificationKind::Info, title, message));
    }

    fn success(&self, title: &str, message: &str) {
        self.notify(Notification::new(NotificationKind::Success, title, message));
    }

    fn warning(&self, title: &str, message: &str) {
        self.notify(Notification::new(NotificationKind::Warning, title, message));
    }

    fn error(&self, title: &str, message: &str) {
        self.notify(Notification::new(NotificationKind::Error, title, message));
    }
}

/// Prints notifications to stderr
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        tracing::debug!(kind = notification.kind.label(), title = %notification.title, "notification");
        eprintln!("{}", notification);
    }
}

/// Collects notifications in memory
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    delivered: RefCell<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far
    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered.borrow().clone()
    }

    /// Remove and return everything delivered so far
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.delivered.borrow_mut())
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        self.delivered
            .borrow()
            .iter()
            .filter(|n| n.kind == kind)
            .count()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.delivered.borrow_mut().push(notification);
    }
}
