//! Persistence and re-execution for request history.
//!
//! History lives under the `requestHistory` key of the key-value store as a
//! JSON array ordered newest-first. Appending prepends the new entry and
//! trims the array to `MAX_HISTORY_ENTRIES` before persisting, so the cap
//! holds after every mutation rather than being enforced lazily.

use super::models::{HistoryEntry, HistoryError, MAX_HISTORY_ENTRIES};
use crate::config::LauncherConfig;
use crate::invoker;
use crate::models::ToolResponse;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the history array.
pub const HISTORY_KEY: &str = "requestHistory";

/// Request history backed by the key-value store.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    store: KeyValueStore,
    limit: usize,
}

impl HistoryStore {
    /// Creates a history store with the default entry cap.
    pub fn new(store: KeyValueStore) -> Self {
        Self::with_limit(store, MAX_HISTORY_ENTRIES)
    }

    /// Creates a history store with a custom entry cap, typically the
    /// configured `historyLimit`.
    pub fn with_limit(store: KeyValueStore, limit: usize) -> Self {
        Self { store, limit }
    }

    /// Returns all entries, newest first.
    ///
    /// A missing key is an empty history. A stored value that no longer
    /// deserializes is reported with a warning and treated as empty, so a
    /// corrupt history never blocks executing requests.
    pub fn entries(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        match self.store.get_json::<Vec<HistoryEntry>>(HISTORY_KEY) {
            Ok(Some(entries)) => Ok(entries),
            Ok(None) => Ok(Vec::new()),
            Err(StorageError::Serialization(msg)) => {
                eprintln!("Warning: Stored history is unreadable ({}), treating as empty", msg);
                Ok(Vec::new())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Appends an entry, trimming the history to the cap.
    ///
    /// The new entry becomes the first element; when the history is full the
    /// oldest entries are dropped.
    pub fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut entries = self.entries()?;
        entries.insert(0, entry);
        entries.truncate(self.limit);
        self.store.set_json(HISTORY_KEY, &entries)?;
        Ok(())
    }

    /// Removes all entries.
    pub fn clear(&self) -> Result<(), HistoryError> {
        self.store.remove(HISTORY_KEY)?;
        Ok(())
    }

    /// Number of stored entries.
    pub fn len(&self) -> Result<usize, HistoryError> {
        Ok(self.entries()?.len())
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> Result<bool, HistoryError> {
        Ok(self.entries()?.is_empty())
    }

    /// Re-executes a past entry with its recorded environment and variables.
    ///
    /// The execution goes through the same invoker path as a fresh run and
    /// appends a new entry on success, so a rerun shows up at the top of the
    /// history like any other execution.
    pub fn rerun(
        &self,
        config: &LauncherConfig,
        entry: &HistoryEntry,
    ) -> Result<ToolResponse, HistoryError> {
        let response = invoker::run_request(
            config,
            &entry.request.path,
            entry.environment.as_deref(),
            entry.variables.as_ref(),
        )?;

        self.append(HistoryEntry::new(
            entry.request.clone(),
            response.clone(),
            entry.environment.clone(),
            entry.variables.clone(),
        ))?;

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HttpMethod, Request};
    use proptest::prelude::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn history_in(temp: &TempDir) -> HistoryStore {
        HistoryStore::new(KeyValueStore::open(temp.path().join("storage.json")))
    }

    fn entry(name: &str) -> HistoryEntry {
        let request = Request::new(
            name.to_string(),
            HttpMethod::GET,
            "https://api.example.com/ping".to_string(),
            PathBuf::from(format!("/ws/{}.bru", name)),
            "ws".to_string(),
        );
        let response: ToolResponse = serde_json::from_str(r#"{"status": 200}"#).unwrap();
        HistoryEntry::new(request, response, None, None)
    }

    #[test]
    fn test_empty_history() {
        let temp = TempDir::new().unwrap();
        let history = history_in(&temp);

        assert!(history.entries().unwrap().is_empty());
        assert!(history.is_empty().unwrap());
        assert_eq!(history.len().unwrap(), 0);
    }

    #[test]
    fn test_append_prepends() {
        let temp = TempDir::new().unwrap();
        let history = history_in(&temp);

        history.append(entry("first")).unwrap();
        history.append(entry("second")).unwrap();

        let entries = history.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].request.name, "second");
        assert_eq!(entries[1].request.name, "first");
    }

    #[test]
    fn test_append_drops_oldest_beyond_cap() {
        let temp = TempDir::new().unwrap();
        let history = history_in(&temp);

        for i in 0..MAX_HISTORY_ENTRIES {
            history.append(entry(&format!("req-{}", i))).unwrap();
        }
        assert_eq!(history.len().unwrap(), MAX_HISTORY_ENTRIES);

        history.append(entry("newest")).unwrap();

        let entries = history.entries().unwrap();
        assert_eq!(entries.len(), MAX_HISTORY_ENTRIES);
        assert_eq!(entries[0].request.name, "newest");
        // The oldest entry (req-0) is gone.
        assert!(entries.iter().all(|e| e.request.name != "req-0"));
    }

    #[test]
    fn test_clear() {
        let temp = TempDir::new().unwrap();
        let history = history_in(&temp);

        history.append(entry("one")).unwrap();
        history.clear().unwrap();
        assert!(history.is_empty().unwrap());

        // Clearing an already-empty history is fine.
        history.clear().unwrap();
    }

    #[test]
    fn test_corrupt_history_value_degrades_to_empty() {
        let temp = TempDir::new().unwrap();
        let store = KeyValueStore::open(temp.path().join("storage.json"));
        store.set_string(HISTORY_KEY, "not an array").unwrap();

        let history = HistoryStore::new(store);
        assert!(history.entries().unwrap().is_empty());

        // Appending replaces the corrupt value.
        history.append(entry("fresh")).unwrap();
        assert_eq!(history.len().unwrap(), 1);
    }

    #[test]
    fn test_custom_limit_is_honored() {
        let temp = TempDir::new().unwrap();
        let store = KeyValueStore::open(temp.path().join("storage.json"));
        let history = HistoryStore::with_limit(store, 3);

        for i in 0..5 {
            history.append(entry(&format!("req-{}", i))).unwrap();
        }

        let entries = history.entries().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].request.name, "req-4");
        assert_eq!(entries[2].request.name, "req-2");
    }

    #[test]
    fn test_history_persists_across_instances() {
        let temp = TempDir::new().unwrap();
        history_in(&temp).append(entry("kept")).unwrap();

        let reopened = history_in(&temp);
        let entries = reopened.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].request.name, "kept");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        /// The cap holds for any number of appends, and the retained entries
        /// are always the most recent ones in order.
        #[test]
        fn prop_cap_holds_for_any_append_count(count in 0usize..250) {
            let temp = TempDir::new().unwrap();
            let history = history_in(&temp);

            for i in 0..count {
                history.append(entry(&format!("req-{}", i))).unwrap();
            }

            let entries = history.entries().unwrap();
            prop_assert_eq!(entries.len(), count.min(MAX_HISTORY_ENTRIES));
            for (offset, e) in entries.iter().enumerate() {
                let expected = format!("req-{}", count - 1 - offset);
                prop_assert_eq!(&e.request.name, &expected);
            }
        }
    }
}
