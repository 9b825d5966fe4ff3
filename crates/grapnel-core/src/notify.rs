//! Notification-sink interface.
//!
//! The pipeline reports delivery progress through a caller-supplied sink
//! rather than emitting UI events itself. Hosts implement
//! [`NotificationSink`] to surface queue positions, successes, and
//! permanent failures however they see fit.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Category of a delivery notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A payload is waiting in an endpoint queue.
    Queued,
    /// A payload was delivered.
    Success,
    /// Delivery gave up permanently.
    Failure,
    /// Informational progress update.
    Info,
}

/// A single progress report handed to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// What happened.
    pub kind: NotificationKind,
    /// Display name of the endpoint this concerns.
    pub endpoint: String,
    /// Human-readable summary.
    pub message: String,
    /// Structured detail (queue depth, attempt counts, error text).
    pub detail: serde_json::Value,
}

/// Receiver for pipeline progress reports.
///
/// Implementations must be cheap and non-blocking; notifications are
/// emitted from async delivery tasks.
pub trait NotificationSink: Send + Sync {
    /// Accept one notification.
    fn notify(&self, notification: Notification);
}

/// Sink that records every notification, for inspection in tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    received: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    ///
    /// # Panics
    /// Panics if a previous caller panicked while holding the lock.
    #[must_use]
    pub fn received(&self) -> Vec<Notification> {
        self.received.lock().expect("sink lock poisoned").clone()
    }

    /// Number of recorded notifications of the given kind.
    ///
    /// # Panics
    /// Panics if a previous caller panicked while holding the lock.
    #[must_use]
    pub fn count(&self, kind: NotificationKind) -> usize {
        self.received
            .lock()
            .expect("sink lock poisoned")
            .iter()
            .filter(|n| n.kind == kind)
            .count()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.received
            .lock()
            .expect("sink lock poisoned")
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        for (kind, message) in [
            (NotificationKind::Queued, "first"),
            (NotificationKind::Success, "second"),
        ] {
            sink.notify(Notification {
                kind,
                endpoint: "Test".to_string(),
                message: message.to_string(),
                detail: serde_json::Value::Null,
            });
        }

        let received = sink.received();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].message, "first");
        assert_eq!(received[1].message, "second");
        assert_eq!(sink.count(NotificationKind::Queued), 1);
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&NotificationKind::Queued).expect("serialize");
        assert_eq!(json, "\"queued\"");
    }
}
