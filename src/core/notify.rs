//! Toast notifications raised by the host (save results, errors, timer end).

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a toast stays up unless dismissed
pub const DEFAULT_LIFETIME: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub raised_at: Instant,
}

#[derive(Debug)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
    next_id: u64,
    lifetime: Duration,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(DEFAULT_LIFETIME)
    }
}

impl NotificationQueue {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            next_id: 1,
            lifetime,
        }
    }

    /// Queue a toast raised at `now`; returns its id
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push_back(Notification {
            id,
            kind,
            message: message.into(),
            raised_at: now,
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Drop every toast older than the lifetime; returns how many went
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        let lifetime = self.lifetime;
        self.items
            .retain(|n| now.saturating_duration_since(n.raised_at) < lifetime);
        before - self.items.len()
    }

    /// Newest toast, if any
    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let now = Instant::now();
        let mut queue = NotificationQueue::default();
        let a = queue.push(NotificationKind::Success, "saved", now);
        let b = queue.push(NotificationKind::Error, "failed", now);
        assert_ne!(a, b);
        assert_eq!(queue.latest().map(|n| n.message.as_str()), Some("failed"));

        assert!(queue.dismiss(b));
        assert!(!queue.dismiss(b));
        assert_eq!(queue.iter().map(|n| n.id).collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn test_expire_after_lifetime() {
        let start = Instant::now();
        let mut queue = NotificationQueue::new(Duration::from_millis(100));
        queue.push(NotificationKind::Info, "old", start);
        queue.push(
            NotificationKind::Info,
            "new",
            start + Duration::from_millis(80),
        );

        assert_eq!(queue.expire(start + Duration::from_millis(50)), 0);
        assert_eq!(queue.expire(start + Duration::from_millis(120)), 1);
        assert_eq!(queue.latest().map(|n| n.message.as_str()), Some("new"));
        assert_eq!(queue.expire(start + Duration::from_secs(1)), 1);
        assert!(queue.is_empty());
    }
}
