//! Installation probe for the Bruno CLI.
//!
//! Before any user action shells out to `bru`, the launcher verifies that the
//! binary exists and answers `--version` with a sane semantic version. The
//! probe result is explicit process-scoped state: a successful probe is
//! cached for the lifetime of the process, any failure is recorded as
//! `Unavailable` and re-probed on the next action, and `reset_probe` returns
//! the cache to `Unchecked`.

use super::error::InvokerError;
use super::invoke_raw;
use crate::config::LauncherConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::RwLock;

/// Result of the installation probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallationStatus {
    /// No probe has run yet (or the cache was reset).
    Unchecked,
    /// The CLI answered the version probe; contains the reported version.
    Available(String),
    /// The most recent probe failed.
    Unavailable,
}

/// Process-scoped probe cache.
static PROBE: Lazy<RwLock<InstallationStatus>> =
    Lazy::new(|| RwLock::new(InstallationStatus::Unchecked));

/// Expected shape of the `--version` output: `major.minor.patch`.
static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("version pattern is valid"));

/// Ensures the Bruno CLI is installed, probing it if necessary.
///
/// Returns the cached version when a previous probe succeeded; otherwise runs
/// `bru --version` and requires the trimmed output to match
/// `major.minor.patch`. Only success is cached: after a failure the next call
/// probes again, so a user who installs the CLI mid-session is picked up
/// without restarting the launcher.
///
/// # Arguments
///
/// * `config` - Launcher configuration naming the binary and PATH extras
///
/// # Returns
///
/// The CLI version string on success.
///
/// # Errors
///
/// `InvokerError::ToolUnavailable` when the binary is missing, exits
/// non-zero, or reports output that is not a semantic version.
pub fn ensure_available(config: &LauncherConfig) -> Result<String, InvokerError> {
    if let Ok(status) = PROBE.read() {
        if let InstallationStatus::Available(version) = &*status {
            return Ok(version.clone());
        }
    }

    match run_probe(config) {
        Ok(version) => {
            set_status(InstallationStatus::Available(version.clone()));
            Ok(version)
        }
        Err(err) => {
            set_status(InstallationStatus::Unavailable);
            Err(err)
        }
    }
}

/// Returns the current probe status without triggering a probe.
pub fn probe_status() -> InstallationStatus {
    PROBE
        .read()
        .map(|s| s.clone())
        .unwrap_or(InstallationStatus::Unchecked)
}

/// Resets the probe cache to `Unchecked`.
///
/// Useful for tests and for settings changes that point at a different binary.
pub fn reset_probe() {
    set_status(InstallationStatus::Unchecked);
}

fn set_status(status: InstallationStatus) {
    if let Ok(mut cached) = PROBE.write() {
        *cached = status;
    }
}

/// Runs `--version` and validates the answer.
fn run_probe(config: &LauncherConfig) -> Result<String, InvokerError> {
    let output = match invoke_raw(config, &["--version".to_string()]) {
        Ok(output) => output,
        Err(InvokerError::ToolUnavailable(detail)) => {
            return Err(InvokerError::ToolUnavailable(detail))
        }
        Err(err) => return Err(InvokerError::ToolUnavailable(err.to_string())),
    };

    let version = output.trim().to_string();
    if VERSION_PATTERN.is_match(&version) {
        Ok(version)
    } else {
        Err(InvokerError::ToolUnavailable(format!(
            "'{} --version' reported unexpected output: '{}'",
            config.binary_path, version
        )))
    }
}
