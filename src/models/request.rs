//! Request data models.
//!
//! This module defines the record for a single named HTTP call discovered in
//! the workspace, along with the HTTP method enum used throughout the crate.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// HTTP request method.
///
/// Covers the verbs the Bruno request format uses for its method blocks and
/// bare request lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP OPTIONS method - describe communication options
    OPTIONS,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::HEAD => "HEAD",
        }
    }

    /// Parses a string into an HttpMethod.
    ///
    /// Matching is case-insensitive because Bruno files spell the verb in
    /// lowercase for method blocks (`get { ... }`) and uppercase for bare
    /// request lines (`GET https://...`).
    ///
    /// # Arguments
    ///
    /// * `s` - A string slice representing the HTTP method
    ///
    /// # Returns
    ///
    /// `Some(HttpMethod)` if the string is a valid HTTP method, `None` otherwise.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            "PATCH" => Some(HttpMethod::PATCH),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            "HEAD" => Some(HttpMethod::HEAD),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single named HTTP call definition discovered in the workspace.
///
/// Requests are identified by their filesystem path: two discovery passes over
/// the same workspace produce records with the same `path`, and execution and
/// history rerun both address the request file by that path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Display name, taken from the file's `meta.name` (or a top-level
    /// `name:` pair), falling back to the file stem.
    pub name: String,

    /// HTTP method declared by the request file.
    pub method: HttpMethod,

    /// Target URL for the request.
    ///
    /// May contain variables in the format `{{variableName}}` that the Bruno
    /// CLI resolves at execution time; such URLs are stored verbatim.
    pub url: String,

    /// Path to the `.bru` file defining this request.
    ///
    /// This is the identity key for requests and the argument handed to
    /// `bru run`.
    pub path: PathBuf,

    /// Name of the collection this request belongs to (its parent directory).
    pub collection: String,

    /// Optional description from the file's metadata or leading comment.
    pub description: Option<String>,
}

impl Request {
    /// Creates a new Request with the given core fields.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name of the request
    /// * `method` - HTTP method
    /// * `url` - Target URL
    /// * `path` - Path to the defining `.bru` file
    /// * `collection` - Owning collection name
    ///
    /// # Returns
    ///
    /// A new `Request` with no description.
    pub fn new(
        name: String,
        method: HttpMethod,
        url: String,
        path: PathBuf,
        collection: String,
    ) -> Self {
        Self {
            name,
            method,
            url,
            path,
            collection,
            description: None,
        }
    }

    /// Returns a one-line label for list rendering, e.g. `GET List Users`.
    pub fn display_label(&self) -> String {
        format!("{} {}", self.method, self.name)
    }
}
