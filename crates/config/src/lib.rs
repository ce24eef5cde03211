//! Configuration management for the uniwork panel.
//!
//! This crate handles loading, validating, and persisting the panel's
//! configuration and its Trello credentials.
//!
//! # Overview
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`credentials`]: API key and token storage and resolution
//! - [`persistence`]: Config file reading and writing, well-known paths
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! 1. Local config (`./uniwork.json5` or `./uniwork.json`)
//! 2. User config (`<config dir>/uniwork/config.json5` or `.json`)
//! 3. Built-in defaults
//!
//! # Credential Resolution
//!
//! Each of the API key and the token is resolved separately:
//!
//! 1. Environment (`UNIWORK_API_KEY`, `UNIWORK_TOKEN`)
//! 2. The credential store (`<config dir>/uniwork/credentials.json`)
//!
//! # Examples
//!
//! ```no_run
//! use uniwork_config::{Config, FileCredentialStore, credentials::resolve_credentials};
//!
//! # fn example() -> uniwork_config::Result<()> {
//! let config = Config::load()?;
//! let store = FileCredentialStore::user_default()?;
//! let credentials = resolve_credentials(&store)?;
//!
//! println!("API at {}, credentials set: {}", config.base_url(), credentials.is_complete());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod credentials;
pub mod error;
pub mod persistence;

pub use config::Config;
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore, StoredCredentials};
pub use error::{ConfigError, Result};
