//! Data models for request history.
//!
//! An entry records one successful execution of a request file: the request
//! metadata as parsed at execution time, the response the CLI reported, and
//! the environment and variable overrides that were in effect.

use crate::invoker::InvokerError;
use crate::models::{Request, ToolResponse};
use crate::storage::StorageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Maximum number of entries retained in the history.
///
/// Appending beyond the cap drops the oldest entries.
pub const MAX_HISTORY_ENTRIES: usize = 100;

/// One executed request and its response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique identifier for this entry
    pub id: String,

    /// When the request was executed
    pub timestamp: DateTime<Utc>,

    /// The request as parsed at execution time
    pub request: Request,

    /// The response the CLI reported
    pub response: ToolResponse,

    /// Environment name used for this execution, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    /// Variable overrides passed for this execution, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<HashMap<String, String>>,
}

impl HistoryEntry {
    /// Creates a new entry with a fresh id and the current timestamp.
    pub fn new(
        request: Request,
        response: ToolResponse,
        environment: Option<String>,
        variables: Option<HashMap<String, String>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            request,
            response,
            environment,
            variables,
        }
    }

    /// One-line summary suitable for a list row.
    pub fn summary(&self) -> String {
        format!(
            "{} {} - {} at {}",
            self.request.method,
            self.request.name,
            self.response.status_summary(),
            self.timestamp.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// Errors that can occur while working with the history.
#[derive(Debug)]
pub enum HistoryError {
    /// The underlying key-value store failed.
    Storage(StorageError),

    /// Re-executing an entry failed.
    Invocation(InvokerError),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Storage(err) => write!(f, "History storage error: {}", err),
            HistoryError::Invocation(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for HistoryError {}

impl From<StorageError> for HistoryError {
    fn from(err: StorageError) -> Self {
        HistoryError::Storage(err)
    }
}

impl From<InvokerError> for HistoryError {
    fn from(err: InvokerError) -> Self {
        HistoryError::Invocation(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpMethod;
    use std::path::PathBuf;

    fn sample_request() -> Request {
        Request::new(
            "Get Users".to_string(),
            HttpMethod::GET,
            "https://api.example.com/users".to_string(),
            PathBuf::from("/ws/users/get-users.bru"),
            "users".to_string(),
        )
    }

    fn sample_response() -> ToolResponse {
        serde_json::from_str(r#"{"status": 200, "statusText": "OK"}"#).unwrap()
    }

    #[test]
    fn test_new_entry_has_unique_id() {
        let a = HistoryEntry::new(sample_request(), sample_response(), None, None);
        let b = HistoryEntry::new(sample_request(), sample_response(), None, None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_summary_contains_method_and_status() {
        let entry = HistoryEntry::new(sample_request(), sample_response(), None, None);
        let summary = entry.summary();
        assert!(summary.contains("GET"));
        assert!(summary.contains("Get Users"));
        assert!(summary.contains("200 OK"));
    }

    #[test]
    fn test_serde_round_trip() {
        let entry = HistoryEntry::new(
            sample_request(),
            sample_response(),
            Some("production".to_string()),
            None,
        );

        let json = serde_json::to_string(&entry).unwrap();
        let back: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, entry.id);
        assert_eq!(back.environment, Some("production".to_string()));
        assert!(back.variables.is_none());
    }
}
