//! Non-fatal diagnostics.
//!
//! Readers and writers in this crate are lenient: an unterminated DSV quote
//! is absorbed, a mismatched XML end tag is still written. Such events are
//! collected as `Notification` items, tagged with where in the stream they
//! happened, so the caller can find out afterwards what was tolerated.

use std::fmt;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// The construct was skipped because it is outside the supported subset.
    NotSupported,
    /// Non-fatal irregularity in the input (e.g., unterminated quote).
    Warning,
    /// Error that ended the stream.
    Error,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSupported => write!(f, "NotSupported"),
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// Position in the stream a notification refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamLocation {
    /// 1-based DSV row number
    Row(usize),
    /// Byte offset into the XML input
    Byte(u64),
    /// 1-based index of the entity handed to an XML writer
    Entity(usize),
}

impl fmt::Display for StreamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row(row) => write!(f, "row {}", row),
            Self::Byte(offset) => write!(f, "byte {}", offset),
            Self::Entity(index) => write!(f, "entity {}", index),
        }
    }
}

/// A single notification produced during reading or writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub notification_type: NotificationType,
    /// Where it happened, when the producer knows
    pub location: Option<StreamLocation>,
    pub message: String,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(location) => write!(f, "[{}] {}: {}", self.notification_type, location, self.message),
            None => write!(f, "[{}] {}", self.notification_type, self.message),
        }
    }
}

/// Notifications gathered over the lifetime of one reader or writer
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification tied to a position in the stream.
    pub fn notify_at(
        &mut self,
        notification_type: NotificationType,
        location: StreamLocation,
        message: impl Into<String>,
    ) {
        self.items.push(Notification {
            notification_type,
            location: Some(location),
            message: message.into(),
        });
    }

    /// Record a notification with no known position.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        self.items.push(Notification {
            notification_type,
            location: None,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Notifications of one severity, in the order they were raised
    pub fn of_type(&self, nt: NotificationType) -> impl Iterator<Item = &Notification> + '_ {
        self.items.iter().filter(move |n| n.notification_type == nt)
    }

    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
