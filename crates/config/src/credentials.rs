//! API key and token persistence and resolution.
//!
//! Credentials are stored as two strings under fixed keys in a per-user JSON
//! file:
//!
//! ```json
//! {
//!   "UniWork_ApiKey": "…",
//!   "UniWork_Token": "…"
//! }
//! ```
//!
//! Each field can be overridden from the environment (`UNIWORK_API_KEY`,
//! `UNIWORK_TOKEN`); an empty variable counts as unset.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::persistence::{credentials_path, read_config_file, write_config_file};

/// Environment variable overriding the stored API key.
pub const API_KEY_ENV: &str = "UNIWORK_API_KEY";

/// Environment variable overriding the stored token.
pub const TOKEN_ENV: &str = "UNIWORK_TOKEN";

/// API key and token as persisted. Either may be empty.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    /// The Trello API key.
    #[serde(rename = "UniWork_ApiKey", default)]
    pub api_key: String,

    /// The Trello member token.
    #[serde(rename = "UniWork_Token", default)]
    pub token: String,
}

impl fmt::Debug for StoredCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.is_empty() { "<empty>" } else { "<redacted>" }
        }
        f.debug_struct("StoredCredentials")
            .field("api_key", &redact(&self.api_key))
            .field("token", &redact(&self.token))
            .finish()
    }
}

impl StoredCredentials {
    /// Creates credentials from a key and a token.
    pub fn new(api_key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            token: token.into(),
        }
    }

    /// Returns `true` when both the key and the token are non-blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use uniwork_config::StoredCredentials;
    ///
    /// assert!(StoredCredentials::new("key", "token").is_complete());
    /// assert!(!StoredCredentials::new("key", " ").is_complete());
    /// assert!(!StoredCredentials::default().is_complete());
    /// ```
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.token.trim().is_empty()
    }

    /// Applies per-field overrides from `lookup`, keyed by environment
    /// variable name. Empty values are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use uniwork_config::StoredCredentials;
    /// use uniwork_config::credentials::TOKEN_ENV;
    ///
    /// let stored = StoredCredentials::new("key", "old");
    /// let resolved = stored.with_overrides(|name| {
    ///     (name == TOKEN_ENV).then(|| "fresh".to_string())
    /// });
    /// assert_eq!(resolved, StoredCredentials::new("key", "fresh"));
    /// ```
    #[must_use]
    pub fn with_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |name: &str, stored: String| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(stored)
        };
        Self {
            api_key: pick(API_KEY_ENV, self.api_key),
            token: pick(TOKEN_ENV, self.token),
        }
    }

    /// Applies overrides from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }
}

/// A place credentials are loaded from and saved to.
pub trait CredentialStore: Send + Sync {
    /// Loads the stored credentials; a missing store yields empty ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read or parsed.
    fn load(&self) -> Result<StoredCredentials>;

    /// Replaces the stored credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn save(&self, credentials: &StoredCredentials) -> Result<()>;
}

/// Credentials kept in a JSON file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store backed by `<config dir>/uniwork/credentials.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn user_default() -> Result<Self> {
        Ok(Self::new(credentials_path()?))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<StoredCredentials> {
        if !self.path.exists() {
            return Ok(StoredCredentials::default());
        }
        read_config_file(&self.path)
    }

    fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        write_config_file(&self.path, credentials)?;
        restrict_permissions(&self.path)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).map_err(|source| {
        ConfigError::WriteFile {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

/// Credentials kept in memory, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<StoredCredentials>,
}

impl MemoryCredentialStore {
    /// Creates a store holding `credentials`.
    #[must_use]
    pub fn new(credentials: StoredCredentials) -> Self {
        Self {
            inner: Mutex::new(credentials),
        }
    }

    /// Returns a copy of the held credentials.
    #[must_use]
    pub fn get(&self) -> StoredCredentials {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<StoredCredentials> {
        Ok(self.get())
    }

    fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = credentials.clone();
        Ok(())
    }
}

/// Loads credentials from `store` and applies environment overrides.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn resolve_credentials(store: &dyn CredentialStore) -> Result<StoredCredentials> {
    Ok(store.load()?.with_env_overrides())
}
