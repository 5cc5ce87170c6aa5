//! Command handlers for the Bruno launcher.
//!
//! This module is the boundary the host launcher calls into: one function per
//! user-visible command. Each handler orchestrates discovery, invocation, and
//! history, and returns a `CommandOutput` ready for display. Handlers are
//! synchronous; the host runs them off its UI thread.

use crate::config::LauncherConfig;
use crate::discovery::{discover, DiscoveryError};
use crate::history::{HistoryEntry, HistoryError, HistoryStore};
use crate::invoker::{self, InvokerError};
use crate::models::{Request, ToolResponse};
use crate::parser::parse_request_file;
use crate::storage::{KeyValueStore, StorageError};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Storage key holding the user's default environment name.
pub const DEFAULT_ENVIRONMENT_KEY: &str = "defaultEnvironment";

/// Error types for command execution.
#[derive(Debug)]
pub enum CommandError {
    /// Workspace discovery failed.
    Discovery(DiscoveryError),

    /// The Bruno CLI could not be invoked or misbehaved.
    Invocation(InvokerError),

    /// The history store failed.
    History(HistoryError),

    /// The key-value store failed.
    Storage(StorageError),

    /// A request file could not be read or parsed.
    Request(String),

    /// The requested operation is intentionally not supported.
    ///
    /// Creating collections and requests is the Bruno app's job; the
    /// launcher only browses and executes.
    NotSupported(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Discovery(err) => write!(f, "{}", err),
            CommandError::Invocation(err) => write!(f, "{}", err),
            CommandError::History(err) => write!(f, "{}", err),
            CommandError::Storage(err) => write!(f, "{}", err),
            CommandError::Request(msg) => write!(f, "Failed to load request: {}", msg),
            CommandError::NotSupported(what) => write!(
                f,
                "{} is not supported here. Use the Bruno app to make changes, \
                 then run your command again.",
                what
            ),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<DiscoveryError> for CommandError {
    fn from(err: DiscoveryError) -> Self {
        CommandError::Discovery(err)
    }
}

impl From<InvokerError> for CommandError {
    fn from(err: InvokerError) -> Self {
        CommandError::Invocation(err)
    }
}

impl From<HistoryError> for CommandError {
    fn from(err: HistoryError) -> Self {
        CommandError::History(err)
    }
}

impl From<StorageError> for CommandError {
    fn from(err: StorageError) -> Self {
        CommandError::Storage(err)
    }
}

/// Result of a command, ready for the host to display.
#[derive(Debug)]
pub struct CommandOutput {
    /// The body text shown in the detail view.
    pub text: String,

    /// Short label for notifications and list rows.
    pub label: String,

    /// Whether the command's outcome counts as a success.
    pub success: bool,
}

/// Lists the collections and their requests in the workspace.
///
/// # Arguments
///
/// * `config` - Launcher configuration
///
/// # Returns
///
/// One line per collection followed by an indented line per request.
///
/// # Errors
///
/// The discovery errors, each carrying its own remediation text.
pub fn list_collections_command(config: &LauncherConfig) -> Result<CommandOutput, CommandError> {
    let workspace = discover(config)?;

    let mut text = String::new();
    for collection in &workspace.collections {
        match &collection.parent {
            Some(parent) => text.push_str(&format!("{} / {}", parent, collection.name)),
            None => text.push_str(&collection.name),
        }
        if let Some(description) = &collection.description {
            text.push_str(&format!(" - {}", description));
        }
        text.push('\n');

        for request in workspace.requests_in(&collection.name) {
            text.push_str(&format!("  {}\n", request.display_label()));
        }
    }

    let label = format!(
        "{} collections, {} requests",
        workspace.collections.len(),
        workspace.requests.len()
    );

    Ok(CommandOutput {
        text,
        label,
        success: true,
    })
}

/// Executes a request file and records the result in the history.
///
/// The environment precedence is: the explicit `environment` argument, then
/// the stored default environment, then none. Successful executions (any
/// HTTP status, including 4xx/5xx) are appended to the history; invocation
/// failures are not.
///
/// # Arguments
///
/// * `config` - Launcher configuration
/// * `store` - Key-value store holding the default environment
/// * `history` - History store receiving the new entry
/// * `request_path` - Path to the `.bru` file to execute
/// * `environment` - Optional environment name overriding the stored default
/// * `variables` - Optional variable overrides
pub fn run_request_command(
    config: &LauncherConfig,
    store: &KeyValueStore,
    history: &HistoryStore,
    request_path: &Path,
    environment: Option<&str>,
    variables: Option<&HashMap<String, String>>,
) -> Result<CommandOutput, CommandError> {
    let request = load_request(request_path)?;

    let chosen_env = match environment {
        Some(env) => Some(env.to_string()),
        None => store.get_string(DEFAULT_ENVIRONMENT_KEY)?,
    };

    let response = invoker::run_request(
        config,
        request_path,
        chosen_env.as_deref(),
        variables,
    )?;

    history.append(HistoryEntry::new(
        request.clone(),
        response.clone(),
        chosen_env,
        variables.cloned(),
    ))?;

    Ok(render_response(&request, &response))
}

/// Lists the request history, newest first.
pub fn view_history_command(history: &HistoryStore) -> Result<CommandOutput, CommandError> {
    let entries = history.entries()?;

    if entries.is_empty() {
        return Ok(CommandOutput {
            text: "No requests have been run yet.".to_string(),
            label: "History is empty".to_string(),
            success: true,
        });
    }

    let mut text = String::new();
    for entry in &entries {
        text.push_str(&entry.summary());
        text.push('\n');
    }

    Ok(CommandOutput {
        text,
        label: format!("{} history entries", entries.len()),
        success: true,
    })
}

/// Removes all history entries.
pub fn clear_history_command(history: &HistoryStore) -> Result<CommandOutput, CommandError> {
    history.clear()?;
    Ok(CommandOutput {
        text: "Request history cleared.".to_string(),
        label: "History cleared".to_string(),
        success: true,
    })
}

/// Re-executes a history entry by id and records the new run.
///
/// # Errors
///
/// `CommandError::Request` when no entry carries the given id.
pub fn rerun_history_command(
    config: &LauncherConfig,
    history: &HistoryStore,
    entry_id: &str,
) -> Result<CommandOutput, CommandError> {
    let entries = history.entries()?;
    let entry = entries
        .iter()
        .find(|e| e.id == entry_id)
        .ok_or_else(|| CommandError::Request(format!("no history entry with id {}", entry_id)))?;

    let response = history.rerun(config, entry)?;
    Ok(render_response(&entry.request, &response))
}

/// Lists the environments declared in the workspace, marking the default.
pub fn list_environments_command(
    config: &LauncherConfig,
    store: &KeyValueStore,
) -> Result<CommandOutput, CommandError> {
    let workspace = discover(config)?;
    let default = store.get_string(DEFAULT_ENVIRONMENT_KEY)?;

    if workspace.environments.is_empty() {
        return Ok(CommandOutput {
            text: "This workspace declares no environments.".to_string(),
            label: "No environments".to_string(),
            success: true,
        });
    }

    let mut text = String::new();
    for env in &workspace.environments {
        let marker = if default.as_deref() == Some(env.name.as_str()) {
            " (default)"
        } else {
            ""
        };
        text.push_str(&format!(
            "{}{} ({} variables)\n",
            env.name,
            marker,
            env.variables.len()
        ));
    }

    Ok(CommandOutput {
        text,
        label: format!("{} environments", workspace.environments.len()),
        success: true,
    })
}

/// Returns the stored default environment name, if any.
pub fn default_environment(store: &KeyValueStore) -> Result<Option<String>, CommandError> {
    Ok(store.get_string(DEFAULT_ENVIRONMENT_KEY)?)
}

/// Stores the default environment used when a run names none.
pub fn set_default_environment_command(
    store: &KeyValueStore,
    name: &str,
) -> Result<CommandOutput, CommandError> {
    store.set_string(DEFAULT_ENVIRONMENT_KEY, name)?;
    Ok(CommandOutput {
        text: format!("Default environment set to '{}'.", name),
        label: format!("Default: {}", name),
        success: true,
    })
}

/// Creating collections is delegated to the Bruno app.
pub fn create_collection_command() -> Result<CommandOutput, CommandError> {
    Err(CommandError::NotSupported(
        "Creating collections".to_string(),
    ))
}

/// Creating requests is delegated to the Bruno app.
pub fn create_request_command() -> Result<CommandOutput, CommandError> {
    Err(CommandError::NotSupported("Creating requests".to_string()))
}

/// Reads and parses a request file from disk.
fn load_request(path: &Path) -> Result<Request, CommandError> {
    let content =
        fs::read_to_string(path).map_err(|e| CommandError::Request(e.to_string()))?;
    parse_request_file(&content, path).map_err(|e| CommandError::Request(e.to_string()))
}

/// Renders a response into displayable output.
fn render_response(request: &Request, response: &ToolResponse) -> CommandOutput {
    let mut text = format!(
        "{} {}\n{}\n",
        request.method,
        request.url,
        response.status_summary()
    );

    if !response.headers.is_empty() {
        text.push('\n');
        let mut headers: Vec<_> = response.headers.iter().collect();
        headers.sort();
        for (name, value) in headers {
            text.push_str(&format!("{}: {}\n", name, value));
        }
    }

    if !response.body.is_empty() {
        text.push('\n');
        text.push_str(&response.body);
        text.push('\n');
    }

    let success = response.is_success();
    let label = if success {
        format!("{}: {}", request.name, response.status_summary())
    } else {
        format!("{} failed: {}", request.name, response.status_summary())
    };

    CommandOutput {
        text,
        label,
        success,
    }
}
