//! Response document printed by the Bruno CLI.
//!
//! `bru run` writes a single JSON document to stdout describing the outcome
//! of the executed request. This module models that document; the crate never
//! constructs responses itself.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The result of one request execution as reported by the Bruno CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    /// HTTP status code of the response.
    pub status: u16,

    /// Status reason phrase, e.g. "OK" or "Not Found".
    #[serde(rename = "statusText", default)]
    pub status_text: String,

    /// Response headers as reported by the CLI.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Response body as a string (the CLI pre-serializes JSON bodies).
    #[serde(default)]
    pub body: String,

    /// Total request time in milliseconds.
    #[serde(default)]
    pub time: u64,

    /// Variables captured or resolved during the run, when the CLI reports them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<HashMap<String, String>>,
}

impl ToolResponse {
    /// Checks if the response indicates success (2xx status code).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns a short status summary, e.g. `200 OK (134 ms)`.
    pub fn status_summary(&self) -> String {
        if self.status_text.is_empty() {
            format!("{} ({} ms)", self.status, self.time)
        } else {
            format!("{} {} ({} ms)", self.status, self.status_text, self.time)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "status": 200,
            "statusText": "OK",
            "headers": {"content-type": "application/json"},
            "body": "{\"id\": 1}",
            "time": 134
        }"#
    }

    #[test]
    fn test_deserialize_cli_output() {
        let response: ToolResponse = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.status_text, "OK");
        assert_eq!(
            response.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(response.time, 134);
        assert!(response.variables.is_none());
    }

    #[test]
    fn test_deserialize_minimal_output() {
        // Only the status code is mandatory; everything else defaults.
        let response: ToolResponse = serde_json::from_str(r#"{"status": 404}"#).unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(response.status_text, "");
        assert!(response.headers.is_empty());
        assert!(response.body.is_empty());
    }

    #[test]
    fn test_is_success() {
        let mut response: ToolResponse = serde_json::from_str(sample_json()).unwrap();
        assert!(response.is_success());

        response.status = 301;
        assert!(!response.is_success());

        response.status = 500;
        assert!(!response.is_success());
    }

    #[test]
    fn test_status_summary() {
        let response: ToolResponse = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(response.status_summary(), "200 OK (134 ms)");

        let bare: ToolResponse = serde_json::from_str(r#"{"status": 204}"#).unwrap();
        assert_eq!(bare.status_summary(), "204 (0 ms)");
    }
}
