//! External process invoker for the Bruno CLI.
//!
//! Every operation that leaves this crate goes through one synchronous
//! invocation of the `bru` binary: the command line is built from the
//! configured binary path, a subcommand, and arguments; stdout and stderr are
//! captured; and failures are classified into the `InvokerError` taxonomy.
//! There is no retry, no timeout, and no concurrent-invocation guard — one
//! user action issues at most one invocation and blocks until it resolves.

pub mod error;
pub mod probe;

pub use error::{InvokerError, INSTALLATION_GUIDANCE};
pub use probe::{ensure_available, probe_status, reset_probe, InstallationStatus};

use crate::config::LauncherConfig;
use crate::models::ToolResponse;
use std::collections::HashMap;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs a Bruno CLI subcommand and returns its trimmed stdout.
///
/// Performs the installation probe first; when the probe fails the requested
/// operation is never attempted and the caller receives installation
/// guidance instead.
///
/// A non-zero exit status is always `InvocationFailed` carrying the captured
/// stderr. A zero exit status with non-empty stderr succeeds with a warning,
/// since the CLI writes progress chatter there.
///
/// # Arguments
///
/// * `config` - Launcher configuration naming the binary and PATH extras
/// * `subcommand` - The CLI subcommand, e.g. `run`
/// * `args` - Arguments following the subcommand
///
/// # Returns
///
/// Trimmed standard output on success.
pub fn run_tool(
    config: &LauncherConfig,
    subcommand: &str,
    args: &[String],
) -> Result<String, InvokerError> {
    probe::ensure_available(config)?;

    let mut full_args = Vec::with_capacity(args.len() + 1);
    full_args.push(subcommand.to_string());
    full_args.extend_from_slice(args);

    invoke_raw(config, &full_args)
}

/// Executes a request file through `bru run` and parses the response.
///
/// Builds `run <path> [--env NAME] [--vars JSON]` and decodes the single
/// JSON document the CLI prints on stdout.
///
/// # Arguments
///
/// * `config` - Launcher configuration
/// * `request_path` - Path to the `.bru` file to execute
/// * `environment` - Optional environment name forwarded as `--env`
/// * `variables` - Optional variable overrides forwarded as `--vars` JSON
///
/// # Returns
///
/// The parsed `ToolResponse` on success.
///
/// # Errors
///
/// `MalformedOutput` when stdout is empty or not valid JSON; otherwise the
/// errors of `run_tool`.
pub fn run_request(
    config: &LauncherConfig,
    request_path: &Path,
    environment: Option<&str>,
    variables: Option<&HashMap<String, String>>,
) -> Result<ToolResponse, InvokerError> {
    let mut args = vec![request_path.to_string_lossy().to_string()];

    if let Some(env) = environment {
        args.push("--env".to_string());
        args.push(env.to_string());
    }

    if let Some(vars) = variables {
        if !vars.is_empty() {
            args.push("--vars".to_string());
            args.push(serde_json::to_string(vars)?);
        }
    }

    let stdout = run_tool(config, "run", &args)?;

    if stdout.is_empty() {
        return Err(InvokerError::MalformedOutput(
            "the CLI produced no output".to_string(),
        ));
    }

    let response: ToolResponse = serde_json::from_str(&stdout)?;
    Ok(response)
}

/// Spawns the binary with the given arguments, without the preflight probe.
///
/// This is the single place the crate touches `std::process`; the probe uses
/// it directly to avoid recursing through `run_tool`.
pub(crate) fn invoke_raw(config: &LauncherConfig, args: &[String]) -> Result<String, InvokerError> {
    let output = Command::new(&config.binary_path)
        .args(args)
        .env("PATH", extended_path(config))
        .output()
        .map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                InvokerError::ToolUnavailable(format!(
                    "'{}' was not found on PATH",
                    config.binary_path
                ))
            } else {
                InvokerError::Io(e.to_string())
            }
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if !output.status.success() {
        return Err(InvokerError::InvocationFailed {
            status: output.status.code(),
            stderr,
        });
    }

    if !stderr.is_empty() {
        eprintln!("Warning: {} wrote to stderr: {}", config.binary_path, stderr);
    }

    Ok(stdout)
}

/// Returns PATH extended with the configured extra directories.
///
/// Launcher hosts are not started from a login shell, so common CLI install
/// locations are appended explicitly.
fn extended_path(config: &LauncherConfig) -> OsString {
    let mut paths: Vec<PathBuf> = std::env::var_os("PATH")
        .map(|p| std::env::split_paths(&p).collect())
        .unwrap_or_default();

    for dir in &config.extra_path_dirs {
        let dir = PathBuf::from(dir);
        if !paths.contains(&dir) {
            paths.push(dir);
        }
    }

    std::env::join_paths(paths)
        .unwrap_or_else(|_| std::env::var_os("PATH").unwrap_or_default())
}

/// Test helpers shared by the invoker unit tests.
#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Writes an executable shell script acting as a stand-in CLI binary.
    pub fn fake_binary(dir: &Path, name: &str, script: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, script).unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path).unwrap().permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&path, perms).unwrap();
        }

        path
    }
}
