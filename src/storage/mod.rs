//! Persistent key-value storage for the Bruno launcher.
//!
//! The launcher persists small pieces of state (the default environment name,
//! the request history) as a single JSON document on disk. Each key maps to
//! an arbitrary JSON value; callers read and write typed values through
//! serde. Writes rewrite the whole document through a temporary file and an
//! atomic rename, so a crash mid-write never leaves a truncated store.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::schema::home_dir;

/// File name of the storage document inside the data directory.
const STORAGE_FILE: &str = "storage.json";

/// Errors that can occur while reading or writing the store.
#[derive(Debug)]
pub enum StorageError {
    /// IO error while reading or writing the storage file.
    Io(String),

    /// A stored value could not be serialized or deserialized.
    Serialization(String),

    /// No storage location could be determined (no data dir, no home).
    NoStoragePath,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "Storage IO error: {}", msg),
            StorageError::Serialization(msg) => {
                write!(f, "Failed to serialize stored value: {}", msg)
            }
            StorageError::NoStoragePath => {
                write!(f, "Could not determine a storage location (no home directory)")
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// A single-file JSON key-value store.
///
/// The document is read lazily on each access and rewritten in full on each
/// mutation. The store holds only a handful of small keys, so the simplicity
/// wins over caching.
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    path: PathBuf,
}

impl KeyValueStore {
    /// Opens a store backed by the given file path.
    ///
    /// The file does not need to exist; it is created on first write.
    pub fn open(path: PathBuf) -> Self {
        Self { path }
    }

    /// Opens the store at the configured or default data location.
    ///
    /// Uses `dataDir` from the configuration when set, otherwise
    /// `~/.config/bruno-launcher/`.
    ///
    /// # Errors
    ///
    /// `StorageError::NoStoragePath` when neither a configured data dir nor
    /// a home directory is available.
    pub fn open_default(data_dir: Option<&str>) -> Result<Self, StorageError> {
        let dir = match data_dir {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => home_dir()
                .ok_or(StorageError::NoStoragePath)?
                .join(".config")
                .join("bruno-launcher"),
        };
        Ok(Self::open(dir.join(STORAGE_FILE)))
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads a stored string value.
    pub fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        let doc = self.read_document()?;
        Ok(doc
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()))
    }

    /// Stores a string value under the given key.
    pub fn set_string(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut doc = self.read_document()?;
        doc.insert(key.to_string(), Value::String(value.to_string()));
        self.write_document(&doc)
    }

    /// Reads and deserializes a stored value.
    ///
    /// Returns `Ok(None)` when the key is absent. A present value that does
    /// not match `T` is a `Serialization` error, left to the caller to treat
    /// as corruption or as a hard failure.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let doc = self.read_document()?;
        match doc.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Serializes and stores a value under the given key.
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let mut doc = self.read_document()?;
        doc.insert(key.to_string(), serde_json::to_value(value)?);
        self.write_document(&doc)
    }

    /// Removes a key from the store. Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut doc = self.read_document()?;
        if doc.remove(key).is_some() {
            self.write_document(&doc)?;
        }
        Ok(())
    }

    /// Reads the full document, treating a missing file as empty.
    ///
    /// A corrupt document is reported with a warning and replaced by an
    /// empty one rather than wedging every launcher action.
    fn read_document(&self) -> Result<BTreeMap<String, Value>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(doc) => Ok(doc),
            Err(e) => {
                eprintln!(
                    "Warning: Storage file {} is corrupt ({}), starting empty",
                    self.path.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
        }
    }

    /// Rewrites the document atomically via a temp file and rename.
    fn write_document(&self, doc: &BTreeMap<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(doc)?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}
