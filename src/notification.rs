//! # Notification Module
//!
//! A transient message (an upload failure, a failed delete) with an explicit
//! expiry timestamp. The owner of the slot supplies the current time and
//! decides when to sweep; nothing here schedules timers.

use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// A message visible until `expires_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: &str, ttl: Duration, now: DateTime<Utc>) -> Self {
        Self {
            message: message.to_string(),
            expires_at: now + ttl,
        }
    }

    /// Expired once `now` reaches the expiry timestamp
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Holds at most one notification; a new post replaces the old one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationSlot {
    current: Option<Notification>,
}

impl NotificationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message` for `ttl`
    pub fn post(&mut self, message: &str, ttl: Duration, now: DateTime<Utc>) {
        warn!("Notification: {}", message);
        self.current = Some(Notification::new(message, ttl, now));
    }

    /// The live notification, if any
    pub fn current(&self, now: DateTime<Utc>) -> Option<&Notification> {
        self.current.as_ref().filter(|n| !n.is_expired(now))
    }

    /// Drop the notification once it has expired; returns whether one was dropped
    pub fn clear_expired(&mut self, now: DateTime<Utc>) -> bool {
        if self.current.as_ref().is_some_and(|n| n.is_expired(now)) {
            debug!("Clearing expired notification");
            self.current = None;
            return true;
        }
        false
    }

    /// Dismiss the notification immediately
    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_expiry() {
        let notification = Notification::new("Upload failed", Duration::seconds(10), at(0));
        assert!(!notification.is_expired(at(9)));
        assert!(notification.is_expired(at(10)));
    }

    #[test]
    fn test_slot_lifecycle() {
        let mut slot = NotificationSlot::new();
        assert!(slot.current(at(0)).is_none());

        slot.post("Delete failed", Duration::seconds(10), at(0));
        assert_eq!(slot.current(at(5)).unwrap().message, "Delete failed");
        assert!(!slot.clear_expired(at(5)));

        assert!(slot.current(at(10)).is_none());
        assert!(slot.clear_expired(at(10)));
        assert_eq!(slot, NotificationSlot::new());
    }

    #[test]
    fn test_new_post_replaces_old() {
        let mut slot = NotificationSlot::new();
        slot.post("first", Duration::seconds(10), at(0));
        slot.post("second", Duration::seconds(10), at(8));

        assert_eq!(slot.current(at(12)).unwrap().message, "second");
        slot.dismiss();
        assert!(slot.current(at(12)).is_none());
    }
}
