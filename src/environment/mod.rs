//! Environment management for the Bruno launcher.
//!
//! Environments come from the workspace's `environments/` directory: a
//! manifest lists the names and each `<name>.json` file holds a flat variable
//! map. The loader is read-only; the default environment choice lives in the
//! key-value store, not here.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use bruno_launcher::environment::load_environments;
//!
//! let workspace = Path::new("/path/to/workspace");
//! for env in load_environments(workspace).unwrap() {
//!     println!("{} ({} variables)", env.name, env.variables.len());
//! }
//! ```

pub mod loader;

pub use loader::{load_environments, EnvError};
