//! Notifications
//!
//! User-facing messages raised by the store and the admin forms. Delivery (toasts, timers) is
//! left to the host; the log only records and dismisses.

use std::fmt;

use tracing::{info, warn};

/// Notification severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    /// Something was rejected
    Error,

    /// Something succeeded
    #[default]
    Success,

    /// Input was corrected
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Success => f.write_str("success"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// Notification identifier, unique within one log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

/// A recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Identifier used to dismiss it
    pub id: NotificationId,

    /// Message text
    pub message: String,

    /// Severity
    pub severity: Severity,
}

/// Receiver for user-facing messages.
pub trait Notifier {
    /// Raise a message with the given severity.
    fn notify(&mut self, message: String, severity: Severity);
}

/// In-memory notification log.
#[derive(Debug, Default)]
pub struct NotificationLog {
    next_id: u64,
    entries: Vec<Notification>,
}

impl NotificationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a notification and return its id.
    pub fn push(&mut self, message: String, severity: Severity) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;

        match severity {
            Severity::Error | Severity::Warning => {
                warn!(%severity, text = %message, "notification");
            }
            Severity::Success => info!(%severity, text = %message, "notification"),
        }

        self.entries.push(Notification {
            id,
            message,
            severity,
        });

        id
    }

    /// Remove a notification. Returns false if the id is not in the log.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);

        self.entries.len() != before
    }

    /// Iterate notifications, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    /// The most recent notification.
    pub fn latest(&self) -> Option<&Notification> {
        self.entries.last()
    }

    /// Number of notifications in the log.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Notifier for NotificationLog {
    fn notify(&mut self, message: String, severity: Severity) {
        self.push(message, severity);
    }
}
