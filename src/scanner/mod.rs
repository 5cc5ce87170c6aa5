//! Workspace file scanner.
//!
//! Recursively walks the configured workspace directory and collects the
//! candidate files that discovery turns into collection and request records:
//! `.bru` request files and `collection.json` metadata documents.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory reserved for environment definitions; handled by the environment
/// loader, never scanned for requests.
const ENVIRONMENTS_DIR: &str = "environments";

/// Scans the workspace for Bruno files.
///
/// Walks `root` recursively, skipping dot-directories (`.git` and friends)
/// and the `environments` directory. Matching files are returned sorted by
/// path so repeated discovery passes produce records in a stable order.
///
/// # Arguments
///
/// * `root` - The workspace root directory
///
/// # Returns
///
/// All paths under `root` that name a `.bru` file or a `collection.json`.
///
/// # Errors
///
/// Returns the underlying `io::Error` when the root (or a subdirectory) is
/// inaccessible. Callers are expected to create the workspace directory on
/// first use rather than treat this as fatal.
pub fn scan_workspace(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    scan_directory(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        if entry.file_type()?.is_dir() {
            if name.starts_with('.') || name == ENVIRONMENTS_DIR {
                continue;
            }
            scan_directory(&path, files)?;
        } else if is_bruno_file(&name) {
            files.push(path);
        }
    }

    Ok(())
}

/// Checks whether a file name matches the discovery filter.
fn is_bruno_file(name: &str) -> bool {
    !name.starts_with('.') && (name.ends_with(".bru") || name == "collection.json")
}
