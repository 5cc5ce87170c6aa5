//! Error types for Bruno CLI invocation.
//!
//! This module defines the errors that can occur when spawning the external
//! `bru` binary and interpreting its output.

use std::fmt;

/// Installation guidance shown when the Bruno CLI cannot be found or probed.
///
/// Rendered verbatim by the host launcher, so it carries the concrete install
/// commands rather than a generic failure message.
pub const INSTALLATION_GUIDANCE: &str = "\
Bruno CLI is required but was not found on your system.

Install it with npm:
    npm install -g @usebruno/cli

Or with Homebrew:
    brew install --cask bruno

Note: the CLI ('bru') is separate from the Bruno desktop application.
Once installed, try your action again.";

/// Errors that can occur while invoking the Bruno CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokerError {
    /// The binary is missing or its version probe failed.
    ///
    /// Contains the probe failure detail; Display appends installation
    /// guidance for the user.
    ToolUnavailable(String),

    /// The binary ran but exited non-zero.
    ///
    /// Contains the exit code (when the process was not killed by a signal)
    /// and the captured stderr text.
    InvocationFailed {
        /// Process exit code, `None` when terminated by a signal
        status: Option<i32>,
        /// Captured standard error output
        stderr: String,
    },

    /// The binary succeeded but printed output that could not be understood.
    ///
    /// Data subcommands must print a single JSON document; empty or non-JSON
    /// stdout lands here.
    MalformedOutput(String),

    /// An OS-level error occurred while spawning or waiting on the process.
    Io(String),
}

impl fmt::Display for InvokerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvokerError::ToolUnavailable(detail) => {
                write!(f, "{}\n\nDetails: {}", INSTALLATION_GUIDANCE, detail)
            }
            InvokerError::InvocationFailed { status, stderr } => {
                let code = status
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "terminated by signal".to_string());
                if stderr.is_empty() {
                    write!(f, "Bruno CLI failed (exit status: {})", code)
                } else {
                    write!(f, "Bruno CLI failed (exit status: {}): {}", code, stderr)
                }
            }
            InvokerError::MalformedOutput(detail) => {
                write!(f, "Unexpected output from Bruno CLI: {}", detail)
            }
            InvokerError::Io(detail) => write!(f, "Failed to run Bruno CLI: {}", detail),
        }
    }
}

impl std::error::Error for InvokerError {}

impl From<std::io::Error> for InvokerError {
    fn from(err: std::io::Error) -> Self {
        InvokerError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for InvokerError {
    fn from(err: serde_json::Error) -> Self {
        InvokerError::MalformedOutput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_unavailable_includes_guidance() {
        let err = InvokerError::ToolUnavailable("'bru' not found on PATH".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("npm install -g @usebruno/cli"));
        assert!(msg.contains("brew install --cask bruno"));
        assert!(msg.contains("'bru' not found on PATH"));
    }

    #[test]
    fn test_invocation_failed_display() {
        let err = InvokerError::InvocationFailed {
            status: Some(2),
            stderr: "request file not found".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("exit status: 2"));
        assert!(msg.contains("request file not found"));
    }

    #[test]
    fn test_invocation_failed_signal() {
        let err = InvokerError::InvocationFailed {
            status: None,
            stderr: String::new(),
        };
        assert!(format!("{}", err).contains("terminated by signal"));
    }

    #[test]
    fn test_malformed_output_display() {
        let err = InvokerError::MalformedOutput("expected value at line 1".to_string());
        assert!(format!("{}", err).contains("Unexpected output"));
    }

    #[test]
    fn test_from_serde_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: InvokerError = serde_err.into();
        assert!(matches!(err, InvokerError::MalformedOutput(_)));
    }
}
