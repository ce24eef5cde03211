//! Trello API client implementation.
//!
//! This module provides the [`TrelloClient`] struct, which performs one HTTP
//! call per operation and authenticates every call with the API key and token
//! passed as query parameters.

use reqwest::Request;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};
use uniwork_protocol::{Board, Card, List};

use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::parse::{parse_array, parse_object};

/// Base URL of the public Trello REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";

/// Trello API client.
///
/// Failures are terminal per call: there are no retries and no timeout
/// beyond the transport default.
///
/// # Security
///
/// The key and token are stored as [`SecretString`] so they never show up in
/// debug output or logs.
///
/// # Examples
///
/// ```no_run
/// use secrecy::SecretString;
/// use uniwork_trello::TrelloClient;
///
/// # async fn example() -> uniwork_trello::Result<()> {
/// let client = TrelloClient::new(
///     SecretString::from("my-api-key".to_string()),
///     SecretString::from("my-token".to_string()),
/// )?;
///
/// for board in client.list_boards().await? {
///     println!("{} (closed: {})", board.name, board.closed);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TrelloClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    token: SecretString,
}

impl TrelloClient {
    /// Creates a client for the public Trello API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredentials`] if the key or the token is
    /// empty.
    pub fn new(api_key: SecretString, token: SecretString) -> Result<Self> {
        Self::with_base_url(api_key, token, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom API root (e.g. a local test server).
    ///
    /// A trailing `/` on `base_url` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredentials`] if the key or the token is
    /// empty.
    pub fn with_base_url(
        api_key: SecretString,
        token: SecretString,
        base_url: &str,
    ) -> Result<Self> {
        if api_key.expose_secret().trim().is_empty() || token.expose_secret().trim().is_empty() {
            return Err(Error::MissingCredentials);
        }

        let base_url = base_url.trim_end_matches('/').to_string();
        debug!(%base_url, "creating Trello client");

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            token,
        })
    }

    /// Returns the API root this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the HTTP request for an endpoint, credentials included.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the URL cannot be built.
    pub fn build_request(&self, endpoint: &Endpoint) -> Result<Request> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let request = self
            .http
            .request(endpoint.method(), url)
            .query(&[
                ("key", self.api_key.expose_secret()),
                ("token", self.token.expose_secret()),
            ])
            .query(&endpoint.query())
            .build()?;
        Ok(request)
    }

    /// Performs one call and returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the request cannot be sent or the body
    /// cannot be read, and [`Error::Status`] for a non-success status.
    #[instrument(skip(self), fields(operation = endpoint.name()))]
    pub async fn request(&self, endpoint: &Endpoint) -> Result<String> {
        let request = self.build_request(endpoint)?;
        let response = self.http.execute(request).await.inspect_err(|e| {
            warn!(error = %e, "request failed");
        })?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "Trello API returned an error status");
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(bytes = body.len(), "received response");
        Ok(body)
    }

    /// Fetches the boards of the authenticated member, closed ones included.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an
    /// unexpected payload.
    pub async fn list_boards(&self) -> Result<Vec<Board>> {
        let body = self.request(&Endpoint::Boards).await?;
        parse_array(&body)
    }

    /// Fetches the lists of a board.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an
    /// unexpected payload.
    pub async fn list_lists(&self, board_id: &str) -> Result<Vec<List>> {
        let body = self
            .request(&Endpoint::Lists {
                board_id: board_id.to_string(),
            })
            .await?;
        parse_array(&body)
    }

    /// Fetches the cards of a list.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an
    /// unexpected payload.
    pub async fn list_cards(&self, list_id: &str) -> Result<Vec<Card>> {
        let body = self
            .request(&Endpoint::Cards {
                list_id: list_id.to_string(),
            })
            .await?;
        parse_array(&body)
    }

    /// Reassigns a card to another list. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn move_card(&self, card_id: &str, list_id: &str) -> Result<()> {
        self.request(&Endpoint::MoveCard {
            card_id: card_id.to_string(),
            list_id: list_id.to_string(),
        })
        .await?;
        Ok(())
    }

    /// Creates a card at the end of a list and returns the created record.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an
    /// unexpected payload.
    pub async fn create_card(&self, list_id: &str, name: &str) -> Result<Card> {
        let body = self
            .request(&Endpoint::CreateCard {
                list_id: list_id.to_string(),
                name: name.to_string(),
            })
            .await?;
        parse_object(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    fn client() -> TrelloClient {
        TrelloClient::with_base_url(secret("k3y"), secret("t0ken"), "https://example.test/1/")
            .unwrap()
    }

    #[test]
    fn new_rejects_empty_key() {
        let result = TrelloClient::new(secret(""), secret("token"));
        assert!(matches!(result, Err(Error::MissingCredentials)));
    }

    #[test]
    fn new_rejects_blank_token() {
        let result = TrelloClient::new(secret("key"), secret("   "));
        assert!(matches!(result, Err(Error::MissingCredentials)));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        assert_eq!(client().base_url(), "https://example.test/1");
    }

    #[test]
    fn debug_output_hides_secrets() {
        let debug = format!("{:?}", client());
        assert!(!debug.contains("k3y"));
        assert!(!debug.contains("t0ken"));
    }

    #[test]
    fn boards_request_carries_credentials() {
        let request = client().build_request(&Endpoint::Boards).unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://example.test/1/members/me/boards?key=k3y&token=t0ken"
        );
    }

    #[test]
    fn move_request_is_put_with_id_list() {
        let request = client()
            .build_request(&Endpoint::MoveCard {
                card_id: "c1".into(),
                list_id: "l2".into(),
            })
            .unwrap();
        assert_eq!(request.method(), reqwest::Method::PUT);
        assert_eq!(request.url().path(), "/1/cards/c1");
        assert_eq!(request.url().query(), Some("key=k3y&token=t0ken&idList=l2"));
    }

    #[test]
    fn create_request_encodes_name() {
        let request = client()
            .build_request(&Endpoint::CreateCard {
                list_id: "l1".into(),
                name: "New Card & more".into(),
            })
            .unwrap();
        assert_eq!(request.method(), reqwest::Method::POST);
        let pairs: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("name".to_string(), "New Card & more".to_string())));
        assert!(pairs.contains(&("idList".to_string(), "l1".to_string())));
    }
}
