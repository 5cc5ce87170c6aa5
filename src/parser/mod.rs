//! Bruno request file parser.
//!
//! This module parses `.bru` files into structured `Request` records using a
//! small recursive-descent parser instead of substring scraping. The grammar
//! covers the subset of the format the launcher needs:
//!
//! ```text
//! file      := item*
//! item      := comment | block | pair | verb-line | blank
//! comment   := '#' text
//! block     := ident '{' (pair | comment | blank | block)* '}'
//! pair      := key ':' value
//! verb-line := METHOD SP url
//! ```
//!
//! The request name comes from `meta.name` (or a top-level `name:` pair),
//! falling back to the file stem. The method and URL come from a method block
//! such as `get { url: ... }` or from a bare `GET https://...` line. The
//! description comes from `meta.description` or the first `#` comment.

pub mod error;

use crate::models::{HttpMethod, Request};
use error::ParseError;
use std::collections::HashMap;
use std::path::Path;
use url::Url;

/// A `key: value` block parsed out of a `.bru` file.
#[derive(Debug, Clone)]
struct Block {
    /// Block name, e.g. `meta` or `get`
    name: String,
    /// Direct `key: value` pairs of the block (nested blocks are consumed
    /// but their pairs are not lifted into the parent)
    pairs: HashMap<String, String>,
    /// Line number where the block opens (1-based)
    line: usize,
}

/// Intermediate parse result for one `.bru` file.
#[derive(Debug, Default)]
struct ParsedFile {
    blocks: Vec<Block>,
    /// Top-level `key: value` pairs outside any block
    pairs: HashMap<String, String>,
    /// First `#` comment in the file, used as a description fallback
    first_comment: Option<String>,
    /// Bare `METHOD URL` line, when present: (method, url, line)
    verb_line: Option<(String, String, usize)>,
}

/// Parses a `.bru` file into a `Request` record.
///
/// The owning collection is derived from the file's parent directory name,
/// never from file content; files directly under the workspace root therefore
/// belong to a pseudo-collection named after the root directory.
///
/// # Arguments
///
/// * `content` - The full text of the request file
/// * `path` - Path to the file being parsed
///
/// # Returns
///
/// A `Request` on success, or a `ParseError` when the file has no request
/// line, an unknown method, a malformed URL, or an unclosed block.
///
/// # Examples
///
/// ```
/// use bruno_launcher::parser::parse_request_file;
/// use std::path::Path;
///
/// let content = "meta {\n  name: List Users\n}\n\nget {\n  url: https://api.example.com/users\n}\n";
/// let request = parse_request_file(content, Path::new("/ws/users/list-users.bru")).unwrap();
/// assert_eq!(request.name, "List Users");
/// assert_eq!(request.url, "https://api.example.com/users");
/// ```
pub fn parse_request_file(content: &str, path: &Path) -> Result<Request, ParseError> {
    let parsed = parse_items(content)?;

    let (method, url) = extract_request_line(&parsed)?;

    let name = parsed
        .blocks
        .iter()
        .find(|b| b.name == "meta")
        .and_then(|b| b.pairs.get("name").cloned())
        .or_else(|| parsed.pairs.get("name").cloned())
        .unwrap_or_else(|| file_stem(path));

    let description = parsed
        .blocks
        .iter()
        .find(|b| b.name == "meta")
        .and_then(|b| b.pairs.get("description").cloned())
        .or(parsed.first_comment);

    let collection = collection_name(path);

    Ok(Request {
        name,
        method,
        url,
        path: path.to_path_buf(),
        collection,
        description,
    })
}

/// Extracts the description from a `collection.json` document.
///
/// Collection metadata is optional and lenient: malformed JSON or a missing
/// field simply yields `None`. A collection's name always comes from its
/// directory, never from file content, so requests (which record their parent
/// directory name) and collections stay joined on the same key; any `name`
/// field in the document is ignored.
///
/// # Arguments
///
/// * `content` - Raw text of the `collection.json` file
///
/// # Returns
///
/// The description, when present.
pub fn parse_collection_meta(content: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(content).ok()?;
    value
        .get("description")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Walks the file line by line, collecting blocks, pairs, comments, and the
/// bare request line.
fn parse_items(content: &str) -> Result<ParsedFile, ParseError> {
    // Normalize line endings (handle both \r\n and \n)
    let normalized = content.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.lines().collect();

    let mut parsed = ParsedFile::default();
    let mut index = 0;

    while index < lines.len() {
        let line_number = index + 1;
        let trimmed = lines[index].trim();

        if trimmed.is_empty() {
            index += 1;
        } else if let Some(comment) = trimmed.strip_prefix('#') {
            if parsed.first_comment.is_none() {
                let comment = comment.trim();
                if !comment.is_empty() {
                    parsed.first_comment = Some(comment.to_string());
                }
            }
            index += 1;
        } else if let Some(block_name) = block_opening(trimmed) {
            let (block, next) = parse_block(&lines, index, block_name)?;
            parsed.blocks.push(block);
            index = next;
        } else if let Some((method, url)) = verb_line(trimmed) {
            if parsed.verb_line.is_none() {
                parsed.verb_line = Some((method, url, line_number));
            }
            index += 1;
        } else if let Some((key, value)) = key_value_pair(trimmed) {
            parsed.pairs.entry(key).or_insert(value);
            index += 1;
        } else {
            // Unrecognized line shapes are tolerated; the format carries
            // sections (scripts, assertions) this launcher does not model.
            index += 1;
        }
    }

    Ok(parsed)
}

/// Parses one block starting at `open_index`, returning the block and the
/// index of the line following its closing brace.
fn parse_block(
    lines: &[&str],
    open_index: usize,
    name: String,
) -> Result<(Block, usize), ParseError> {
    let open_line = open_index + 1;
    let mut pairs = HashMap::new();
    let mut index = open_index + 1;
    let mut depth = 1;

    while index < lines.len() {
        let trimmed = lines[index].trim();

        if trimmed == "}" {
            depth -= 1;
            index += 1;
            if depth == 0 {
                return Ok((
                    Block {
                        name,
                        pairs,
                        line: open_line,
                    },
                    index,
                ));
            }
        } else if trimmed.ends_with('{') {
            // Nested block: consume it without lifting its pairs.
            depth += 1;
            index += 1;
        } else {
            if depth == 1 {
                if let Some((key, value)) = key_value_pair(trimmed) {
                    pairs.entry(key).or_insert(value);
                }
            }
            index += 1;
        }
    }

    Err(ParseError::UnclosedBlock {
        block: name,
        line: open_line,
    })
}

/// Recognizes a block-opening line like `meta {` or `auth:basic {`, returning
/// the block name.
fn block_opening(line: &str) -> Option<String> {
    let body = line.strip_suffix('{')?.trim();
    if body.is_empty()
        || !body
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == ':')
    {
        return None;
    }
    Some(body.to_string())
}

/// Recognizes a bare `METHOD URL` request line.
fn verb_line(line: &str) -> Option<(String, String)> {
    let mut parts = line.split_whitespace();
    let first = parts.next()?;
    let second = parts.next()?;

    // Only an uppercase leading token is treated as a verb line; this keeps
    // prose lines from being mistaken for requests.
    if first.chars().all(|c| c.is_ascii_uppercase()) && HttpMethod::from_str(first).is_some() {
        Some((first.to_string(), second.to_string()))
    } else {
        None
    }
}

/// Splits a `key: value` pair, returning `None` for lines without a colon.
fn key_value_pair(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

/// Resolves the method and URL from the method block or the bare verb line.
fn extract_request_line(parsed: &ParsedFile) -> Result<(HttpMethod, String), ParseError> {
    // Method blocks take precedence: they are the canonical Bruno shape.
    for block in &parsed.blocks {
        if let Some(method) = HttpMethod::from_str(&block.name) {
            let url = block
                .pairs
                .get("url")
                .cloned()
                .ok_or_else(|| ParseError::MissingUrl {
                    method: block.name.clone(),
                    line: block.line,
                })?;
            validate_url(&url, block.line)?;
            return Ok((method, url));
        }
    }

    if let Some((method, url, line)) = &parsed.verb_line {
        let method = HttpMethod::from_str(method).ok_or_else(|| ParseError::InvalidMethod {
            method: method.clone(),
            line: *line,
        })?;
        validate_url(url, *line)?;
        return Ok((method, url.clone()));
    }

    Err(ParseError::MissingRequestLine)
}

/// Validates a request URL.
///
/// URLs containing `{{variable}}` templates are accepted verbatim since the
/// CLI resolves them at execution time; everything else must parse as an
/// absolute http(s) URL.
fn validate_url(url: &str, line: usize) -> Result<(), ParseError> {
    if url.contains("{{") {
        return Ok(());
    }

    match Url::parse(url) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => Ok(()),
        _ => Err(ParseError::InvalidUrl {
            url: url.to_string(),
            line,
        }),
    }
}

/// Returns the file stem used as a request name fallback.
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Returns the owning collection name for a request file (its parent
/// directory name).
fn collection_name(path: &Path) -> String {
    path.parent()
        .and_then(|p| p.file_name())
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(content: &str) -> Result<Request, ParseError> {
        parse_request_file(content, Path::new("/ws/users/list-users.bru"))
    }

    #[test]
    fn test_parse_method_block_form() {
        let content = r#"meta {
  name: List Users
  seq: 1
}

get {
  url: https://api.example.com/users
}
"#;
        let request = parse(content).unwrap();
        assert_eq!(request.name, "List Users");
        assert_eq!(request.method, HttpMethod::GET);
        assert_eq!(request.url, "https://api.example.com/users");
        assert_eq!(request.collection, "users");
    }

    #[test]
    fn test_parse_bare_request_line_form() {
        let content = "name: List Users\nGET https://api.example.com/users\n";
        let request = parse(content).unwrap();
        assert_eq!(request.name, "List Users");
        assert_eq!(request.method, HttpMethod::GET);
        assert_eq!(request.url, "https://api.example.com/users");
    }

    #[test]
    fn test_name_falls_back_to_file_stem() {
        let content = "get {\n  url: https://api.example.com/users\n}\n";
        let request = parse(content).unwrap();
        assert_eq!(request.name, "list-users");
    }

    #[test]
    fn test_description_from_meta_block() {
        let content = r#"meta {
  name: List Users
  description: Fetches every user
}

get {
  url: https://api.example.com/users
}
"#;
        let request = parse(content).unwrap();
        assert_eq!(request.description.as_deref(), Some("Fetches every user"));
    }

    #[test]
    fn test_description_from_leading_comment() {
        let content = "# Fetches every user\nGET https://api.example.com/users\n";
        let request = parse(content).unwrap();
        assert_eq!(request.description.as_deref(), Some("Fetches every user"));
    }

    #[test]
    fn test_meta_description_wins_over_comment() {
        let content = r#"# comment text
meta {
  description: from meta
}
GET https://api.example.com/users
"#;
        let request = parse(content).unwrap();
        assert_eq!(request.description.as_deref(), Some("from meta"));
    }

    #[test]
    fn test_method_block_takes_precedence_over_verb_line() {
        let content = r#"post {
  url: https://api.example.com/users
}
GET https://api.example.com/other
"#;
        let request = parse(content).unwrap();
        assert_eq!(request.method, HttpMethod::POST);
        assert_eq!(request.url, "https://api.example.com/users");
    }

    #[test]
    fn test_templated_url_accepted() {
        let content = "get {\n  url: {{baseUrl}}/users\n}\n";
        let request = parse(content).unwrap();
        assert_eq!(request.url, "{{baseUrl}}/users");
    }

    #[test]
    fn test_nested_block_pairs_not_lifted() {
        let content = r#"get {
  url: https://api.example.com/users
  params:query {
    limit: 10
  }
}
"#;
        let request = parse(content).unwrap();
        assert_eq!(request.url, "https://api.example.com/users");
    }

    #[test]
    fn test_missing_request_line() {
        let content = "meta {\n  name: Orphan\n}\n";
        assert_eq!(parse(content), Err(ParseError::MissingRequestLine));
    }

    #[test]
    fn test_empty_file_is_missing_request_line() {
        assert_eq!(parse(""), Err(ParseError::MissingRequestLine));
    }

    #[test]
    fn test_method_block_without_url() {
        let content = "get {\n  mode: none\n}\n";
        let err = parse(content).unwrap_err();
        assert!(matches!(err, ParseError::MissingUrl { .. }));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let content = "get {\n  url: not-a-url\n}\n";
        let err = parse(content).unwrap_err();
        assert!(matches!(err, ParseError::InvalidUrl { .. }));
    }

    #[test]
    fn test_unclosed_block() {
        let content = "get {\n  url: https://api.example.com/users\n";
        let err = parse(content).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnclosedBlock {
                block: "get".to_string(),
                line: 1,
            }
        );
    }

    #[test]
    fn test_lowercase_prose_is_not_a_verb_line() {
        // "get lunch" must not be mistaken for a request line.
        let content = "get lunch\npost {\n  url: https://api.example.com/users\n}\n";
        let request = parse(content).unwrap();
        assert_eq!(request.method, HttpMethod::POST);
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "meta {\r\n  name: List Users\r\n}\r\nget {\r\n  url: https://api.example.com/users\r\n}\r\n";
        let request = parse(content).unwrap();
        assert_eq!(request.name, "List Users");
    }

    #[test]
    fn test_collection_from_parent_directory() {
        let content = "GET https://api.example.com/users\n";
        let request =
            parse_request_file(content, &PathBuf::from("/ws/billing/invoices.bru")).unwrap();
        assert_eq!(request.collection, "billing");
        assert_eq!(request.name, "invoices");
    }

    #[test]
    fn test_parse_collection_meta() {
        let description =
            parse_collection_meta(r#"{"name": "Users API", "description": "User endpoints"}"#);
        assert_eq!(description.as_deref(), Some("User endpoints"));
    }

    #[test]
    fn test_parse_collection_meta_malformed_json() {
        assert!(parse_collection_meta("not json at all").is_none());
    }

    #[test]
    fn test_parse_collection_meta_missing_description() {
        assert!(parse_collection_meta(r#"{"version": "1"}"#).is_none());
    }
}
