//! Notification queue for alert transitions.
//!
//! Every notification carries its own id and is dismissed after a fixed
//! delay by that id.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    /// Unix ms.
    pub created_at: i64,
}

/// Visible notifications, oldest first.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
    ttl: Duration,
    next_id: u64,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(NOTIFICATION_TTL)
    }
}

impl NotificationQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            ttl,
            next_id: 1,
        }
    }

    fn ttl_ms(&self) -> i64 {
        i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX)
    }

    pub fn push(&mut self, message: impl Into<String>, now_ms: i64) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        self.items.push_back(Notification {
            id,
            message: message.into(),
            created_at: now_ms,
        });
        id
    }

    /// Remove every notification older than the TTL. Returns the removed ids.
    pub fn expire(&mut self, now_ms: i64) -> Vec<NotificationId> {
        let ttl_ms = self.ttl_ms();
        let expired: Vec<NotificationId> = self
            .items
            .iter()
            .filter(|n| now_ms.saturating_sub(n.created_at) >= ttl_ms)
            .map(|n| n.id)
            .collect();
        for id in &expired {
            self.dismiss(*id);
        }
        expired
    }

    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        match self.items.iter().position(|n| n.id == id) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    /// When the oldest visible notification expires, if any.
    pub fn next_expiry(&self) -> Option<i64> {
        self.items
            .front()
            .map(|n| n.created_at.saturating_add(self.ttl_ms()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
