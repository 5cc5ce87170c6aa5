//! Environment file loader for the Bruno launcher.
//!
//! Environments live under `<workspace>/environments/`: a manifest file
//! `environments.json` lists the environment names, and each environment
//! stores its variables in a sibling `<name>.json` document.

use crate::models::Environment;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// Errors that can occur during environment loading.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvError {
    /// Failed to parse JSON content.
    ParseError(String),

    /// IO error occurred while reading a file.
    IoError(String),
}

impl std::fmt::Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvError::ParseError(msg) => write!(f, "Failed to parse environment file: {}", msg),
            EnvError::IoError(msg) => write!(f, "IO error while loading environments: {}", msg),
        }
    }
}

impl std::error::Error for EnvError {}

impl From<io::Error> for EnvError {
    fn from(err: io::Error) -> Self {
        EnvError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for EnvError {
    fn from(err: serde_json::Error) -> Self {
        EnvError::ParseError(err.to_string())
    }
}

/// Directory under the workspace root holding environment files.
const ENVIRONMENTS_DIR: &str = "environments";

/// Manifest file listing the available environments.
const MANIFEST_FILE: &str = "environments.json";

/// Shape of the `environments.json` manifest.
#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    environments: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    name: String,
}

/// Loads the environments declared in the workspace.
///
/// A missing `environments/` directory or manifest is the ordinary empty
/// case and yields an empty list. Individually broken environment files are
/// skipped with a warning so one bad file does not hide the rest.
///
/// # Arguments
///
/// * `workspace` - The workspace root directory
///
/// # Returns
///
/// The environments in manifest order.
///
/// # Errors
///
/// Returns `EnvError` only when the manifest itself exists but cannot be
/// read or parsed.
pub fn load_environments(workspace: &Path) -> Result<Vec<Environment>, EnvError> {
    let env_dir = workspace.join(ENVIRONMENTS_DIR);
    let manifest_path = env_dir.join(MANIFEST_FILE);

    if !manifest_path.exists() {
        return Ok(Vec::new());
    }

    let manifest_content = fs::read_to_string(&manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;

    let mut environments = Vec::with_capacity(manifest.environments.len());

    for entry in manifest.environments {
        let var_path = env_dir.join(format!("{}.json", entry.name));
        match load_variable_map(&var_path) {
            Ok(variables) => environments.push(Environment {
                name: entry.name,
                variables,
            }),
            Err(e) => {
                eprintln!("Warning: Skipping environment '{}': {}", entry.name, e);
            }
        }
    }

    Ok(environments)
}

/// Reads one `<name>.json` document as a flat variable map.
///
/// Non-string values are stringified so numeric ports and booleans survive.
fn load_variable_map(path: &Path) -> Result<HashMap<String, String>, EnvError> {
    let content = fs::read_to_string(path)?;
    let raw: serde_json::Value = serde_json::from_str(&content)?;

    let obj = raw
        .as_object()
        .ok_or_else(|| EnvError::ParseError("variable file must be a JSON object".to_string()))?;

    let mut variables = HashMap::with_capacity(obj.len());
    for (key, value) in obj {
        let rendered = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        variables.insert(key.clone(), rendered);
    }

    Ok(variables)
}
