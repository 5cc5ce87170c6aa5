//! Bruno Launcher
//!
//! Core library for a desktop launcher plugin that browses and executes
//! [Bruno](https://www.usebruno.com/) API request collections. The launcher
//! never speaks HTTP itself: execution is delegated to the `bru` CLI, and the
//! library's job is to find request files, understand just enough of their
//! format to render a useful list, shell out for the actual run, and keep a
//! history of what was executed.
//!
//! # Architecture
//!
//! - **models**: Core data structures for collections, requests, responses,
//!   and environments
//! - **config**: Launcher settings (workspace path, binary path, limits)
//! - **scanner**: Walks the workspace directory for request files and
//!   collection manifests
//! - **parser**: Reads the Bruno request file format for listing metadata
//! - **invoker**: Spawns the `bru` CLI, including the installation probe
//! - **discovery**: Assembles collections, requests, and environments into a
//!   browsable workspace view
//! - **environment**: Loads environment variable files from the workspace
//! - **storage**: Persistent key-value state (default environment, history)
//! - **history**: Records executed requests and re-executes past entries
//! - **commands**: The handlers the host launcher calls, one per user action
//!
//! # Typical flow
//!
//! ```no_run
//! use bruno_launcher::commands::{list_collections_command, run_request_command};
//! use bruno_launcher::config::get_config;
//! use bruno_launcher::history::HistoryStore;
//! use bruno_launcher::storage::KeyValueStore;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = get_config();
//! let store = KeyValueStore::open_default(config.data_dir.as_deref())?;
//! let history = HistoryStore::new(store.clone());
//!
//! let listing = list_collections_command(&config)?;
//! println!("{}", listing.text);
//!
//! let result = run_request_command(
//!     &config,
//!     &store,
//!     &history,
//!     Path::new("/home/me/.bruno/users/list-users.bru"),
//!     None,
//!     None,
//! )?;
//! println!("{}", result.text);
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod discovery;
pub mod environment;
pub mod history;
pub mod invoker;
pub mod models;
pub mod parser;
pub mod scanner;
pub mod storage;
