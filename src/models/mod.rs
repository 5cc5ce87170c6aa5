//! Core data models for the Bruno launcher.
//!
//! This module contains the flat records produced by workspace discovery and
//! consumed by the command handlers: collections, requests, environments, and
//! the response document printed by the Bruno CLI.

pub mod collection;
pub mod environment;
pub mod request;
pub mod response;

pub use collection::Collection;
pub use environment::Environment;
pub use request::{HttpMethod, Request};
pub use response::ToolResponse;
