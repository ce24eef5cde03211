//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates the
//! non-secret options of the uniwork panel. Credentials live in their own
//! file, see [`crate::credentials`].

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::persistence::{find_config_file, read_config_file, write_config_file};

/// Root of the public Trello REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.trello.com/1";

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

/// The main configuration struct for the uniwork panel.
///
/// # Examples
///
/// ```
/// use uniwork_config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.api_base_url, "https://api.trello.com/1");
/// assert!(config.log_level.is_none());
///
/// let config = Config {
///     api_base_url: "http://127.0.0.1:8080".to_string(),
///     log_level: Some("debug".to_string()),
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root URL of the REST API, without a trailing slash.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Log filter directive (e.g. `"debug"` or `"uniwork_trello=trace"`).
    ///
    /// Takes precedence over the `UNIWORK_LOG` environment variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            log_level: None,
        }
    }
}

impl Config {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations.
    ///
    /// Searches for configuration files in the following order:
    ///
    /// 1. Local: `./uniwork.json5` or `./uniwork.json`
    /// 2. User: `<config dir>/uniwork/config.json5` or `<config dir>/uniwork/config.json`
    ///
    /// If no configuration file is found, returns a default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read, parsed, or validated.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use uniwork_config::Config;
    ///
    /// # fn example() -> uniwork_config::Result<()> {
    /// let config = Config::load_from("custom-config.json5")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] unless `api_base_url` is an
    /// `http://` or `https://` URL with a host and no whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use uniwork_config::Config;
    ///
    /// let mut config = Config::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.api_base_url = "api.trello.com/1".to_string();
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let url = self.api_base_url.as_str();
        let invalid = |reason| ConfigError::InvalidBaseUrl {
            url: url.to_string(),
            reason,
        };

        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .ok_or_else(|| invalid("scheme must be http or https"))?;
        if url.chars().any(char::is_whitespace) {
            return Err(invalid("must not contain whitespace"));
        }
        if rest.split('/').next().is_none_or(str::is_empty) {
            return Err(invalid("missing host"));
        }
        Ok(())
    }

    /// Returns the base URL with any trailing `/` removed.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}
