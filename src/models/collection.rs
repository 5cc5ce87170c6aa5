//! Collection data model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A named grouping of requests in the workspace.
///
/// Collections are identified by name: discovery uses the name as a map key,
/// so two collection directories with the same name collapse to one record
/// (last scan wins). Parent/child nesting is inferred from one level of
/// directory structure and carried as a plain name string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Display name, taken from the collection directory name (or the
    /// `name` field of a `collection.json` when present).
    pub name: String,

    /// Path to the collection directory.
    pub path: PathBuf,

    /// Optional description from the collection's `collection.json`.
    pub description: Option<String>,

    /// Name of the enclosing collection when this directory is nested one
    /// level below another collection, `None` for workspace-root collections.
    pub parent: Option<String>,
}

impl Collection {
    /// Creates a new root-level Collection with the given name and path.
    pub fn new(name: String, path: PathBuf) -> Self {
        Self {
            name,
            path,
            description: None,
            parent: None,
        }
    }

    /// Returns `true` when this collection sits at the workspace root.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_new() {
        let collection = Collection::new("users".to_string(), PathBuf::from("/workspace/users"));
        assert_eq!(collection.name, "users");
        assert_eq!(collection.path, PathBuf::from("/workspace/users"));
        assert!(collection.description.is_none());
        assert!(collection.is_root());
    }

    #[test]
    fn test_collection_with_parent() {
        let mut collection =
            Collection::new("admin".to_string(), PathBuf::from("/workspace/users/admin"));
        collection.parent = Some("users".to_string());
        assert!(!collection.is_root());
        assert_eq!(collection.parent.as_deref(), Some("users"));
    }

    #[test]
    fn test_collection_serialization() {
        let collection = Collection::new("users".to_string(), PathBuf::from("/workspace/users"));
        let json = serde_json::to_string(&collection).unwrap();
        let parsed: Collection = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, collection.name);
        assert_eq!(parsed.parent, None);
    }
}
