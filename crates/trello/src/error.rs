//! Error types for Trello API operations.
//!
//! This module defines the error types that can occur when talking to the
//! Trello REST API and decoding its responses.

/// Errors that can occur during Trello API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or the response body could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Trello API returned {status}: {}", summarize(.body))]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, as returned.
        body: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("failed to parse {record} payload: {source}")]
    Parse {
        /// The kind of record being decoded (e.g. `"board"`).
        record: &'static str,
        /// The underlying decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// The API key or the token is empty.
    #[error("missing API key or token")]
    MissingCredentials,
}

impl Error {
    /// Returns `true` for network and HTTP status failures.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }
}

/// Keeps error messages to one short line; Trello error bodies are plain text.
fn summarize(body: &str) -> String {
    const MAX: usize = 80;
    let line = body.lines().next().unwrap_or_default().trim();
    if line.is_empty() {
        return "<empty body>".to_string();
    }
    match line.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &line[..cut]),
        None => line.to_string(),
    }
}

/// A specialized Result type for Trello API operations.
pub type Result<T> = std::result::Result<T, Error>;
