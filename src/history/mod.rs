//! Request history tracking and persistence.
//!
//! Every successful execution is recorded as a `HistoryEntry` and persisted
//! through the key-value store under a single `requestHistory` key, newest
//! first and capped at `MAX_HISTORY_ENTRIES`. Entries carry enough context
//! (request path, environment, variable overrides) to re-execute them later.
//!
//! # Example
//!
//! ```no_run
//! use bruno_launcher::history::HistoryStore;
//! use bruno_launcher::storage::KeyValueStore;
//!
//! let store = KeyValueStore::open_default(None).unwrap();
//! let history = HistoryStore::new(store);
//! for entry in history.entries().unwrap() {
//!     println!("{}", entry.summary());
//! }
//! ```

pub mod models;
pub mod store;

pub use models::{HistoryEntry, HistoryError, MAX_HISTORY_ENTRIES};
pub use store::{HistoryStore, HISTORY_KEY};
