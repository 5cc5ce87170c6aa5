//! Error types for Bruno request file parsing.
//!
//! This module defines error types that can occur while parsing `.bru` files.

use std::fmt;

/// Errors that can occur during Bruno request file parsing.
///
/// Each error variant includes contextual information to help users locate
/// and fix problems in their request files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A block was opened with `{` but never closed.
    UnclosedBlock {
        /// Name of the block that was left open
        block: String,
        /// Line number where the block starts (1-based)
        line: usize,
    },

    /// Invalid or unsupported HTTP method on a request line or method block.
    InvalidMethod {
        /// The invalid method string that was encountered
        method: String,
        /// Line number in the source file (1-based)
        line: usize,
    },

    /// Invalid URL format.
    InvalidUrl {
        /// The invalid URL string that was encountered
        url: String,
        /// Line number in the source file (1-based)
        line: usize,
    },

    /// A method block is present but carries no `url:` pair.
    MissingUrl {
        /// The method block missing its URL
        method: String,
        /// Line number of the block (1-based)
        line: usize,
    },

    /// The file contains no method block and no bare request line.
    MissingRequestLine,
}

impl ParseError {
    /// Returns the line number associated with this error, when one exists.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::UnclosedBlock { line, .. } => Some(*line),
            ParseError::InvalidMethod { line, .. } => Some(*line),
            ParseError::InvalidUrl { line, .. } => Some(*line),
            ParseError::MissingUrl { line, .. } => Some(*line),
            ParseError::MissingRequestLine => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnclosedBlock { block, line } => {
                write!(f, "Unclosed '{}' block starting at line {}", block, line)
            }
            ParseError::InvalidMethod { method, line } => {
                write!(
                    f,
                    "Invalid HTTP method '{}' at line {}. Expected one of: GET, POST, PUT, DELETE, PATCH, OPTIONS, HEAD",
                    method, line
                )
            }
            ParseError::InvalidUrl { url, line } => {
                write!(
                    f,
                    "Invalid URL '{}' at line {}. URL must be absolute (http:// or https://) or contain {{{{variables}}}}",
                    url, line
                )
            }
            ParseError::MissingUrl { method, line } => {
                write!(
                    f,
                    "Method block '{}' at line {} has no 'url:' entry",
                    method, line
                )
            }
            ParseError::MissingRequestLine => {
                write!(
                    f,
                    "No request found: expected a method block like 'get {{ url: ... }}' or a 'METHOD URL' line"
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}
