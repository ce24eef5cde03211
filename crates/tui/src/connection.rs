//! Credentials and the API client built from them.
//!
//! A [`Connection`] remembers the stored credentials and turns them into a
//! [`Dispatcher`] on demand. Environment overrides apply to the client but
//! are never written back to the credential store.

use std::fmt;
use std::sync::Arc;

use secrecy::SecretString;
use tracing::{info, warn};
use uniwork_config::{CredentialStore, StoredCredentials};
use uniwork_session::Dispatcher;
use uniwork_session::runtime::ResponseSender;
use uniwork_trello::TrelloClient;

type Lookup = fn(&str) -> Option<String>;

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Owns the credential store and builds API clients.
pub struct Connection {
    base_url: String,
    store: Arc<dyn CredentialStore>,
    stored: StoredCredentials,
    responses: ResponseSender,
    lookup: Lookup,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("base_url", &self.base_url)
            .field("stored", &self.stored)
            .finish_non_exhaustive()
    }
}

impl Connection {
    /// Creates a connection, loading whatever `store` holds.
    ///
    /// An unreadable store is logged and treated as empty so the user can
    /// fix it from the settings panel.
    pub fn new(
        base_url: impl Into<String>,
        store: Arc<dyn CredentialStore>,
        responses: ResponseSender,
    ) -> Self {
        let stored = store.load().unwrap_or_else(|err| {
            warn!(error = %err, "failed to load stored credentials");
            StoredCredentials::default()
        });
        Self {
            base_url: base_url.into(),
            store,
            stored,
            responses,
            lookup: env_lookup,
        }
    }

    /// Replaces the environment lookup used for overrides.
    #[must_use]
    pub fn with_lookup(mut self, lookup: Lookup) -> Self {
        self.lookup = lookup;
        self
    }

    /// Returns the credentials as stored, without overrides.
    #[must_use]
    pub fn stored(&self) -> &StoredCredentials {
        &self.stored
    }

    /// Returns the credentials the client will use.
    #[must_use]
    pub fn resolved(&self) -> StoredCredentials {
        self.stored.clone().with_overrides(self.lookup)
    }

    /// Persists new credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written; the in-memory copy
    /// is left unchanged in that case.
    pub fn save(&mut self, credentials: StoredCredentials) -> uniwork_config::Result<()> {
        self.store.save(&credentials)?;
        info!("credentials saved");
        self.stored = credentials;
        Ok(())
    }

    /// Writes the current credentials back to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn flush(&self) -> uniwork_config::Result<()> {
        self.store.save(&self.stored)
    }

    /// Builds a dispatcher for the resolved credentials.
    ///
    /// # Errors
    ///
    /// Returns [`uniwork_trello::Error::MissingCredentials`] when the key or
    /// the token is blank.
    pub fn connect(&self) -> uniwork_trello::Result<Dispatcher> {
        let StoredCredentials { api_key, token } = self.resolved();
        let client = TrelloClient::with_base_url(
            SecretString::from(api_key),
            SecretString::from(token),
            &self.base_url,
        )?;
        Ok(Dispatcher::new(client, self.responses.clone()))
    }
}
