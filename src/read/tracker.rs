//! The read set and its persistence.

use tracing::{debug, warn};

use super::storage::Storage;

/// Storage key holding the JSON array of read item ids
pub const READ_DOCUMENTS_KEY: &str = "readDocuments";

/// Tracks which items the reader has opened
///
/// Owns its storage backend. Storage failures are logged and never reach
/// the caller: the in-memory set is always authoritative for [`is_read`].
///
/// [`is_read`]: ReadTracker::is_read
#[derive(Debug)]
pub struct ReadTracker<S: Storage> {
    storage: S,
    read: Vec<String>,
}

impl<S: Storage> ReadTracker<S> {
    /// Restore the read set from storage
    ///
    /// A missing entry, an unreadable backend or malformed JSON all start
    /// from an empty set.
    pub fn open(storage: S) -> Self {
        let read = match storage.load(READ_DOCUMENTS_KEY) {
            Ok(Some(raw)) => parse_read_set(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to load read state, starting empty: {}", e);
                Vec::new()
            }
        };

        debug!("Read tracker opened with {} read item(s)", read.len());

        Self { storage, read }
    }

    /// Mark an item as read, persisting the full set if it changed
    ///
    /// Returns `true` if the id was not read before.
    pub fn mark_as_read(&mut self, id: &str) -> bool {
        if self.is_read(id) {
            return false;
        }

        self.read.push(id.to_string());
        debug!("Marked {} as read", id);
        self.persist();
        true
    }

    /// Check whether an item has been read (in-memory only)
    pub fn is_read(&self, id: &str) -> bool {
        self.read.iter().any(|r| r == id)
    }

    /// Read ids in the order they were first marked
    pub fn read_ids(&self) -> &[String] {
        &self.read
    }

    /// Get the number of read items
    pub fn read_count(&self) -> usize {
        self.read.len()
    }

    /// Get the storage backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Release the storage backend
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) {
        let value = match serde_json::to_string(&self.read) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to serialize read state: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.save(READ_DOCUMENTS_KEY, &value) {
            warn!("Failed to persist read state, keeping it in memory only: {}", e);
        }
    }
}

/// Parse a persisted JSON array of ids; anything else is an empty set
fn parse_read_set(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(ids) => {
            let mut read: Vec<String> = Vec::with_capacity(ids.len());
            for id in ids {
                if !read.contains(&id) {
                    read.push(id);
                }
            }
            read
        }
        Err(e) => {
            warn!("Ignoring malformed read state: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::storage::MemoryStorage;

    #[test]
    fn test_fresh_tracker_has_nothing_read() {
        let tracker = ReadTracker::open(MemoryStorage::new());
        assert!(!tracker.is_read("a"));
        assert!(!tracker.is_read(""));
        assert_eq!(tracker.read_count(), 0);
    }

    #[test]
    fn test_mark_as_read_is_idempotent() {
        let mut tracker = ReadTracker::open(MemoryStorage::new());

        assert!(tracker.mark_as_read("a"));
        assert!(!tracker.mark_as_read("a"));
        assert!(!tracker.mark_as_read("a"));

        assert!(tracker.is_read("a"));
        assert_eq!(tracker.read_ids(), ["a"]);
        assert_eq!(tracker.storage().get(READ_DOCUMENTS_KEY), Some(r#"["a"]"#));
    }

    #[test]
    fn test_persisted_order_is_first_marked() {
        let mut tracker = ReadTracker::open(MemoryStorage::new());
        tracker.mark_as_read("a");
        tracker.mark_as_read("b");
        tracker.mark_as_read("a");

        assert_eq!(tracker.storage().get(READ_DOCUMENTS_KEY), Some(r#"["a","b"]"#));
    }

    #[test]
    fn test_restore_from_storage() {
        let storage = MemoryStorage::with_entry(READ_DOCUMENTS_KEY, r#"["a","b"]"#);
        let tracker = ReadTracker::open(storage);

        assert!(tracker.is_read("a"));
        assert!(tracker.is_read("b"));
        assert!(!tracker.is_read("c"));
    }

    #[test]
    fn test_malformed_storage_starts_empty() {
        for raw in ["", "not json", "{\"a\":1}", "[1,2]", "\"a\"", "null"] {
            let tracker = ReadTracker::open(MemoryStorage::with_entry(READ_DOCUMENTS_KEY, raw));
            assert_eq!(tracker.read_count(), 0, "input: {raw:?}");
        }
    }

    #[test]
    fn test_duplicate_persisted_ids_collapse() {
        let tracker =
            ReadTracker::open(MemoryStorage::with_entry(READ_DOCUMENTS_KEY, r#"["a","a","b"]"#));
        assert_eq!(tracker.read_ids(), ["a", "b"]);
    }

    #[test]
    fn test_unavailable_storage_does_not_fail() {
        let mut storage = MemoryStorage::with_entry(READ_DOCUMENTS_KEY, r#"["a"]"#);
        storage.set_unavailable(true);

        let mut tracker = ReadTracker::open(storage);
        assert!(!tracker.is_read("a"));

        assert!(tracker.mark_as_read("b"));
        assert!(tracker.is_read("b"));

        // Persistence is stale, memory is not
        let mut storage = tracker.into_storage();
        storage.set_unavailable(false);
        assert_eq!(storage.get(READ_DOCUMENTS_KEY), Some(r#"["a"]"#));
    }

    #[test]
    fn test_unpersisted_marks_lost_on_reopen() {
        let mut storage = MemoryStorage::new();
        storage.set_unavailable(true);
        let mut tracker = ReadTracker::open(storage);
        tracker.mark_as_read("a");

        let mut storage = tracker.into_storage();
        storage.set_unavailable(false);
        let mut tracker = ReadTracker::open(storage);
        tracker.mark_as_read("b");

        assert_eq!(tracker.storage().get(READ_DOCUMENTS_KEY), Some(r#"["b"]"#));
    }
}
