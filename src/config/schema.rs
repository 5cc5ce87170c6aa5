//! Configuration schema for the Bruno launcher.
//!
//! This module defines the configuration structure and validation logic for
//! all user-configurable preferences of the launcher extension.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for the Bruno launcher.
///
/// All preferences can be configured via the host launcher's settings under
/// the "bruno-launcher" key. Missing or invalid settings fall back to
/// sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LauncherConfig {
    /// Root directory containing Bruno collection and request files.
    ///
    /// A leading `~/` is expanded against the user's home directory.
    /// Defaults to "~/.bruno". An empty value means the user has not
    /// configured a workspace yet.
    #[serde(default = "default_workspace_path")]
    pub workspace_path: String,

    /// Name or path of the Bruno CLI binary.
    ///
    /// Defaults to "bru", resolved through PATH. Must be non-empty.
    #[serde(default = "default_binary_path")]
    pub binary_path: String,

    /// Maximum number of executions to keep in history.
    ///
    /// Older entries beyond this limit are dropped on append. Defaults to 100.
    ///
    /// Must be > 0.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Extra directories appended to PATH when spawning the CLI.
    ///
    /// Launcher hosts do not inherit the user's login-shell PATH, so common
    /// install locations are added by default.
    #[serde(default = "default_extra_path_dirs")]
    pub extra_path_dirs: Vec<String>,

    /// Override for the directory holding the launcher's persisted data
    /// (history, default environment). Defaults to a per-user config
    /// directory when unset.
    #[serde(default)]
    pub data_dir: Option<String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            workspace_path: default_workspace_path(),
            binary_path: default_binary_path(),
            history_limit: default_history_limit(),
            extra_path_dirs: default_extra_path_dirs(),
            data_dir: None,
        }
    }
}

impl LauncherConfig {
    /// Validates the configuration and returns errors if any settings are invalid.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive error message.
    pub fn validate(&self) -> Result<(), String> {
        if self.binary_path.trim().is_empty() {
            return Err("binaryPath must not be empty".to_string());
        }

        if self.history_limit == 0 {
            return Err("historyLimit must be greater than 0".to_string());
        }

        // workspace_path may be empty: discovery reports ConfigurationMissing
        // with remediation instructions instead of failing validation here.

        Ok(())
    }

    /// Returns the workspace directory with a leading `~/` expanded.
    ///
    /// # Returns
    ///
    /// `Some(PathBuf)` with the resolved workspace path, or `None` when the
    /// workspace path is unconfigured (empty).
    pub fn workspace_dir(&self) -> Option<PathBuf> {
        let raw = self.workspace_path.trim();
        if raw.is_empty() {
            return None;
        }
        Some(expand_tilde(raw))
    }

    /// Merges this configuration with another, using values from `other`.
    ///
    /// This is useful for applying user settings on top of defaults.
    ///
    /// # Arguments
    ///
    /// * `other` - Configuration to merge with (takes precedence)
    ///
    /// # Returns
    ///
    /// A new `LauncherConfig` with merged values.
    pub fn merge(&self, other: &LauncherConfig) -> Self {
        Self {
            workspace_path: other.workspace_path.clone(),
            binary_path: other.binary_path.clone(),
            history_limit: other.history_limit,
            extra_path_dirs: other.extra_path_dirs.clone(),
            data_dir: other.data_dir.clone(),
        }
    }
}

/// Expands a leading `~/` against the user's home directory.
///
/// Paths without the tilde prefix are returned unchanged. When no home
/// directory can be determined the path is also returned unchanged.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolves the user's home directory from HOME or USERPROFILE.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

// Default value functions for serde

fn default_workspace_path() -> String {
    "~/.bruno".to_string()
}

fn default_binary_path() -> String {
    "bru".to_string()
}

fn default_history_limit() -> usize {
    100
}

fn default_extra_path_dirs() -> Vec<String> {
    vec![
        "/usr/local/bin".to_string(),
        "/opt/homebrew/bin".to_string(),
    ]
}
