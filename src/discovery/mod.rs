//! Workspace discovery for the Bruno launcher.
//!
//! Discovery walks the configured workspace directory, parses every request
//! file and collection manifest it finds, and assembles the browsable view:
//! collections keyed by name, requests keyed by path, and the declared
//! environments. Discovery is read-only and rebuilt from the filesystem on
//! every listing, so external edits show up without any cache invalidation.

use crate::config::LauncherConfig;
use crate::environment::load_environments;
use crate::models::{Collection, Environment, Request};
use crate::parser::{parse_collection_meta, parse_request_file};
use crate::scanner::scan_workspace;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur during workspace discovery.
#[derive(Debug)]
pub enum DiscoveryError {
    /// No workspace path is configured.
    ConfigurationMissing,

    /// The workspace exists (or was just created) but holds no collections.
    WorkspaceEmpty {
        /// The workspace directory that was inspected
        path: PathBuf,
    },

    /// IO error while reading the workspace.
    Io(String),
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::ConfigurationMissing => write!(
                f,
                "No Bruno workspace is configured.\n\n\
                 Set the workspacePath setting to the directory holding your \
                 Bruno collections, then try again."
            ),
            DiscoveryError::WorkspaceEmpty { path } => write!(
                f,
                "No collections found in {}.\n\n\
                 To get started:\n\
                 1. Open the Bruno app and create a collection in this directory, or\n\
                 2. Move an existing collection folder (containing .bru files) here.\n\
                 Then run this command again.",
                path.display()
            ),
            DiscoveryError::Io(msg) => write!(f, "Failed to read the workspace: {}", msg),
        }
    }
}

impl std::error::Error for DiscoveryError {}

impl From<io::Error> for DiscoveryError {
    fn from(err: io::Error) -> Self {
        DiscoveryError::Io(err.to_string())
    }
}

/// The discovered contents of a workspace.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    /// Collections keyed by name, in name order
    pub collections: Vec<Collection>,
    /// All parseable requests, in path order
    pub requests: Vec<Request>,
    /// Environments declared in the workspace manifest
    pub environments: Vec<Environment>,
}

impl Workspace {
    /// Returns the requests belonging to the named collection.
    pub fn requests_in(&self, collection: &str) -> Vec<&Request> {
        self.requests
            .iter()
            .filter(|r| r.collection == collection)
            .collect()
    }

    /// Looks up a collection by name.
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }
}

/// Discovers collections, requests, and environments in the workspace.
///
/// A missing workspace directory is created so the user has a place to put
/// collections, and then reported as `WorkspaceEmpty` with setup guidance.
/// Request files that fail to parse are skipped with a warning; one broken
/// file never hides the rest of the workspace.
///
/// # Arguments
///
/// * `config` - Launcher configuration naming the workspace directory
///
/// # Errors
///
/// `ConfigurationMissing` when no workspace path is set, `WorkspaceEmpty`
/// when the directory holds no collections, `Io` for filesystem failures.
pub fn discover(config: &LauncherConfig) -> Result<Workspace, DiscoveryError> {
    let root = config
        .workspace_dir()
        .ok_or(DiscoveryError::ConfigurationMissing)?;

    if !root.is_dir() {
        fs::create_dir_all(&root)?;
        return Err(DiscoveryError::WorkspaceEmpty { path: root });
    }

    let files = scan_workspace(&root)?;

    let mut requests = Vec::new();
    // Collection directory -> description from collection.json.
    let mut manifests: BTreeMap<PathBuf, Option<String>> = BTreeMap::new();
    let mut request_dirs: Vec<PathBuf> = Vec::new();

    for file in &files {
        match file.file_name().and_then(|n| n.to_str()) {
            Some("collection.json") => {
                let description = match fs::read_to_string(file) {
                    Ok(content) => parse_collection_meta(&content),
                    Err(e) => {
                        eprintln!("Warning: Could not read {}: {}", file.display(), e);
                        None
                    }
                };
                if let Some(dir) = file.parent() {
                    manifests.insert(dir.to_path_buf(), description);
                }
            }
            _ => {
                let content = match fs::read_to_string(file) {
                    Ok(content) => content,
                    Err(e) => {
                        eprintln!("Warning: Could not read {}: {}", file.display(), e);
                        continue;
                    }
                };
                match parse_request_file(&content, file) {
                    Ok(request) => {
                        if let Some(dir) = file.parent() {
                            request_dirs.push(dir.to_path_buf());
                        }
                        requests.push(request);
                    }
                    Err(e) => {
                        eprintln!("Warning: Skipping {}: {}", file.display(), e);
                    }
                }
            }
        }
    }

    let collections = build_collections(&root, &manifests, &request_dirs);

    if collections.is_empty() {
        return Err(DiscoveryError::WorkspaceEmpty { path: root });
    }

    let environments = match load_environments(&root) {
        Ok(environments) => environments,
        Err(e) => {
            eprintln!("Warning: Could not load environments: {}", e);
            Vec::new()
        }
    };

    Ok(Workspace {
        collections,
        requests,
        environments,
    })
}

/// Assembles collection records from manifest directories and request
/// directories.
///
/// Every directory that either carries a `collection.json` or directly
/// contains request files becomes a collection. Collections are keyed by
/// directory name — the same key request records carry — so the
/// collection-to-request join always holds; a later directory with the same
/// name replaces the earlier record. Nesting is carried one level: a
/// collection directory whose parent is also a collection directory records
/// that parent's name.
fn build_collections(
    root: &Path,
    manifests: &BTreeMap<PathBuf, Option<String>>,
    request_dirs: &[PathBuf],
) -> Vec<Collection> {
    let mut dirs: BTreeMap<PathBuf, Option<String>> = manifests.clone();
    for dir in request_dirs {
        dirs.entry(dir.clone()).or_insert(None);
    }

    let mut by_name: BTreeMap<String, Collection> = BTreeMap::new();
    for (dir, description) in &dirs {
        let name = dir_name(dir);
        let parent = dir
            .parent()
            .filter(|p| *p != root && dirs.contains_key(*p))
            .map(|p| dir_name(p));

        let mut collection = Collection::new(name.clone(), dir.clone());
        collection.description = description.clone();
        collection.parent = parent;
        by_name.insert(name, collection);
    }

    by_name.into_values().collect()
}

/// Returns a directory's own name, the identity key shared with request
/// records.
fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| dir.display().to_string())
}
