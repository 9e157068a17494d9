//! Short-lived "which race did this chat pick" state for the two-step
//! `/remind` flow.
//!
//! Entries expire after a fixed TTL and expired entries are purged on every
//! insert, so the map stays bounded even for chats that tap a race and never
//! pick an offset.

use std::time::{Duration, Instant};

use dashmap::DashMap;

/// The race a chat picked in step one of the `/remind` flow.
#[derive(Debug, Clone)]
pub struct PendingSelection {
    pub event_id: String,
    pub race_name: String,
    inserted_at: Instant,
}

pub struct SelectionStore {
    entries: DashMap<i64, PendingSelection>,
    ttl: Duration,
}

impl SelectionStore {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn insert(&self, chat_id: i64, event_id: String, race_name: String) {
        self.entries.retain(|_, sel| sel.inserted_at.elapsed() <= self.ttl);
        self.entries.insert(
            chat_id,
            PendingSelection {
                event_id,
                race_name,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Remove and return the chat's selection. `None` when the chat never
    /// picked a race or the selection expired.
    pub fn take(&self, chat_id: i64) -> Option<PendingSelection> {
        let (_, selection) = self.entries.remove(&chat_id)?;
        (selection.inserted_at.elapsed() <= self.ttl).then_some(selection)
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_returns_fresh_selection_once() {
        let store = SelectionStore::default();
        store.insert(1, "2025_5".to_string(), "Miami Grand Prix".to_string());

        let sel = store.take(1).unwrap();
        assert_eq!(sel.event_id, "2025_5");
        assert!(store.take(1).is_none());
    }

    #[test]
    fn newer_selection_replaces_older() {
        let store = SelectionStore::default();
        store.insert(1, "2025_5".to_string(), "Miami".to_string());
        store.insert(1, "2025_6".to_string(), "Imola".to_string());

        assert_eq!(store.take(1).unwrap().event_id, "2025_6");
    }

    #[test]
    fn expired_selection_is_gone() {
        let store = SelectionStore::new(Duration::from_millis(1));
        store.insert(1, "2025_5".to_string(), "Miami".to_string());
        std::thread::sleep(Duration::from_millis(5));

        assert!(store.take(1).is_none());
    }

    #[test]
    fn insert_purges_other_expired_chats() {
        let store = SelectionStore::new(Duration::from_millis(1));
        store.insert(1, "2025_5".to_string(), "Miami".to_string());
        std::thread::sleep(Duration::from_millis(5));
        store.insert(2, "2025_6".to_string(), "Imola".to_string());

        assert!(store.entries.get(&1).is_none());
        assert!(store.entries.get(&2).is_some());
    }
}
