//! In-process notification stack.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::traits::notifier::{NotificationType, Notifier};

/// Collects notifications by type until they are taken for display.
///
/// Repeated messages of the same type are stored once.
#[derive(Debug, Default)]
pub struct Notifications {
    stack: Mutex<BTreeMap<NotificationType, Vec<String>>>,
}

impl Notifications {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    fn stack(&self) -> MutexGuard<'_, BTreeMap<NotificationType, Vec<String>>> {
        self.stack.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Total number of pending notifications.
    pub fn len(&self) -> usize {
        self.stack().values().map(Vec::len).sum()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain the messages of one type, or `None` if there are none.
    pub fn take(&self, kind: NotificationType) -> Option<Vec<String>> {
        self.stack().remove(&kind).filter(|list| !list.is_empty())
    }

    /// Drain every pending message grouped by type in display order,
    /// or `None` if nothing is pending.
    pub fn take_all(&self) -> Option<BTreeMap<NotificationType, Vec<String>>> {
        let drained = std::mem::take(&mut *self.stack());
        if drained.values().all(Vec::is_empty) {
            None
        } else {
            Some(drained)
        }
    }

    /// Discard everything pending.
    pub fn clear(&self) {
        self.stack().clear();
    }
}

impl Notifier for Notifications {
    fn add(&self, message: &str, kind: NotificationType) {
        let mut stack = self.stack();
        let list = stack.entry(kind).or_default();
        if !list.iter().any(|m| m == message) {
            list.push(message.to_string());
        }
    }
}
