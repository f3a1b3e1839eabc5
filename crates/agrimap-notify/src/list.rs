//! Newest-first notification list and its shared handle.
//!
//! The list is owned by the channel. Readers get clones; the only writers are
//! the stream task (prepend, snapshot install) and the status updater
//! (replace by id). Each writer holds the lock for a single mutation.

use std::sync::{Arc, PoisonError, RwLock};

use agrimap_core::models::Notification;

/// What happened when a streamed record was prepended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrependOutcome {
    /// New id, placed at the head
    Inserted,
    /// Id already present, record replaced in place
    Replaced,
}

/// Ordered notification list with unique ids
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationList {
    items: Vec<Notification>,
}

impl NotificationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Notification] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Install the initial fetch behind anything the stream already delivered.
    ///
    /// Streamed records are newer than the snapshot, so they stay at the head.
    /// Snapshot records whose id is already present are skipped. Returns the
    /// number of records added.
    pub fn install_snapshot(&mut self, snapshot: Vec<Notification>) -> usize {
        let before = self.items.len();
        for notification in snapshot {
            if !self.contains(&notification.id) {
                self.items.push(notification);
            }
        }
        self.items.len() - before
    }

    /// Put a streamed record at the head.
    ///
    /// A record whose id is already listed replaces the existing entry where
    /// it stands instead of being added a second time.
    pub fn prepend(&mut self, notification: Notification) -> PrependOutcome {
        match self.items.iter_mut().find(|n| n.id == notification.id) {
            Some(existing) => {
                *existing = notification;
                PrependOutcome::Replaced
            }
            None => {
                self.items.insert(0, notification);
                PrependOutcome::Inserted
            }
        }
    }

    /// Replace the entry with `id`, keeping its position. Returns false if absent.
    pub fn replace(&mut self, id: &str, notification: Notification) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(existing) => {
                *existing = notification;
                true
            }
            None => false,
        }
    }
}

/// Cloneable handle to the channel's list
#[derive(Debug, Clone, Default)]
pub struct SharedNotifications {
    inner: Arc<RwLock<NotificationList>>,
}

impl SharedNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current records, newest first
    pub fn snapshot(&self) -> Vec<Notification> {
        self.read(|list| list.as_slice().to_vec())
    }

    pub fn len(&self) -> usize {
        self.read(NotificationList::len)
    }

    pub fn is_empty(&self) -> bool {
        self.read(NotificationList::is_empty)
    }

    pub fn get(&self, id: &str) -> Option<Notification> {
        self.read(|list| list.get(id).cloned())
    }

    pub fn read<R>(&self, f: impl FnOnce(&NotificationList) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut NotificationList) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrimap_core::models::NotificationStatus;
    use chrono::{TimeZone, Utc};

    fn notification(id: &str) -> Notification {
        Notification {
            id: id.to_string(),
            farmer_name: format!("Farmer {}", id),
            farmer_id: format!("FARM-{}", id),
            village: "Shivapur".to_string(),
            location_details: "East plot".to_string(),
            preferred_date: Utc.with_ymd_and_hms(2024, 6, 12, 0, 0, 0).unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
            status: NotificationStatus::Pending,
        }
    }

    fn ids(list: &NotificationList) -> Vec<&str> {
        list.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_prepend_is_newest_first() {
        let mut list = NotificationList::new();
        list.prepend(notification("a"));
        list.prepend(notification("b"));
        list.prepend(notification("c"));
        assert_eq!(ids(&list), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_prepend_duplicate_replaces_in_place() {
        let mut list = NotificationList::new();
        list.prepend(notification("a"));
        list.prepend(notification("b"));

        let mut again = notification("a");
        again.status = NotificationStatus::Scheduled;
        assert_eq!(list.prepend(again), PrependOutcome::Replaced);

        assert_eq!(ids(&list), vec!["b", "a"]);
        assert_eq!(list.get("a").unwrap().status, NotificationStatus::Scheduled);
    }

    #[test]
    fn test_snapshot_goes_behind_streamed_records() {
        let mut list = NotificationList::new();
        list.prepend(notification("live"));

        let added = list.install_snapshot(vec![
            notification("old-1"),
            notification("live"),
            notification("old-2"),
        ]);

        assert_eq!(added, 2);
        assert_eq!(ids(&list), vec!["live", "old-1", "old-2"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut list = NotificationList::new();
        list.install_snapshot(vec![notification("a"), notification("b"), notification("c")]);

        let mut updated = notification("b");
        updated.status = NotificationStatus::Approved;
        assert!(list.replace("b", updated));
        assert!(!list.replace("zzz", notification("zzz")));

        assert_eq!(ids(&list), vec!["a", "b", "c"]);
        assert_eq!(list.get("b").unwrap().status, NotificationStatus::Approved);
    }

    #[test]
    fn test_shared_handle_sees_writes() {
        let shared = SharedNotifications::new();
        let reader = shared.clone();

        shared.write(|list| list.prepend(notification("x")));

        assert_eq!(reader.len(), 1);
        assert_eq!(reader.get("x").unwrap().farmer_name, "Farmer x");
        assert!(reader.get("y").is_none());
    }
}
