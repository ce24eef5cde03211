//! Configuration file reading and writing.
//!
//! This module handles loading configuration from files and saving
//! configuration back to files.
//!
//! # File Formats
//!
//! The module supports both JSON5 and JSON formats:
//!
//! - JSON5 (`.json5`): Preferred format with comments and trailing commas
//! - JSON (`.json`): Standard JSON format
//!
//! # File Locations
//!
//! Configuration is searched in the following order:
//!
//! 1. Local: `./uniwork.json5` or `./uniwork.json`
//! 2. User: `<config dir>/uniwork/config.json5` or `<config dir>/uniwork/config.json`
//!
//! Credentials are kept apart from the configuration, in
//! `<config dir>/uniwork/credentials.json`. Log files go to
//! `<data dir>/uniwork/logs/`.

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Configuration file names to search for, in priority order.
const CONFIG_FILE_NAMES: &[&str] = &["uniwork.json5", "uniwork.json"];

/// Application directory name under the platform config and data dirs.
const APP_DIR: &str = "uniwork";

/// Credentials file name inside the user config directory.
const CREDENTIALS_FILE_NAME: &str = "credentials.json";

/// User config file names to search for, in priority order.
const USER_CONFIG_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Finds the configuration file path, local files first.
///
/// Returns `None` when no candidate exists.
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    let local = CONFIG_FILE_NAMES.iter().map(PathBuf::from);
    let user = user_config_dir()
        .ok()
        .into_iter()
        .flat_map(|dir| USER_CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)));

    local.chain(user).find(|path| path.exists())
}

/// Returns the user configuration directory, `~/.config/uniwork/` on Linux.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Returns the default credentials file path.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
///
/// # Examples
///
/// ```no_run
/// use uniwork_config::persistence::credentials_path;
///
/// let path = credentials_path().unwrap();
/// assert!(path.ends_with("uniwork/credentials.json"));
/// ```
pub fn credentials_path() -> Result<PathBuf> {
    Ok(user_config_dir()?.join(CREDENTIALS_FILE_NAME))
}

/// Returns the directory receiving rolling log files.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn log_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR).join("logs"))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Reads and parses a configuration file.
///
/// Supports both JSON5 and JSON formats.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content cannot be
/// parsed into `T`.
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    // json5 is a superset of json
    serde_json5::from_str(&content).map_err(ConfigError::from)
}

/// Writes a value to a file as pretty-printed JSON, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written, or the value
/// cannot be serialized.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.exists()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let content = serde_json::to_string_pretty(config)?;

    std::fs::write(path, content).map_err(|e| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}
