//! The REST endpoints the panel uses.
//!
//! | Endpoint | Method | Path |
//! |----------|--------|------|
//! | [`Endpoint::Boards`] | `GET` | `/members/me/boards` |
//! | [`Endpoint::Lists`] | `GET` | `/boards/{boardId}/lists` |
//! | [`Endpoint::Cards`] | `GET` | `/lists/{listId}/cards` |
//! | [`Endpoint::MoveCard`] | `PUT` | `/cards/{cardId}?idList={listId}` |
//! | [`Endpoint::CreateCard`] | `POST` | `/cards?idList={listId}&name={name}` |
//!
//! Credentials are not part of an endpoint; the client appends `key` and
//! `token` to every request.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Method;

/// One remote operation, with the identifiers it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Boards of the authenticated member.
    Boards,
    /// Lists of one board.
    Lists {
        /// The board to list.
        board_id: String,
    },
    /// Cards of one list.
    Cards {
        /// The list to read.
        list_id: String,
    },
    /// Reassign a card to another list.
    MoveCard {
        /// The card to move.
        card_id: String,
        /// The destination list.
        list_id: String,
    },
    /// Create a card at the end of a list.
    CreateCard {
        /// The list receiving the card.
        list_id: String,
        /// The new card's name.
        name: String,
    },
}

impl Endpoint {
    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::Boards | Self::Lists { .. } | Self::Cards { .. } => Method::GET,
            Self::MoveCard { .. } => Method::PUT,
            Self::CreateCard { .. } => Method::POST,
        }
    }

    /// Returns the path below the API base URL, with ids percent-encoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use uniwork_trello::Endpoint;
    ///
    /// let endpoint = Endpoint::Lists { board_id: "5f1a".to_string() };
    /// assert_eq!(endpoint.path(), "/boards/5f1a/lists");
    /// ```
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Boards => "/members/me/boards".to_string(),
            Self::Lists { board_id } => format!("/boards/{}/lists", segment(board_id)),
            Self::Cards { list_id } => format!("/lists/{}/cards", segment(list_id)),
            Self::MoveCard { card_id, .. } => format!("/cards/{}", segment(card_id)),
            Self::CreateCard { .. } => "/cards".to_string(),
        }
    }

    /// Returns the operation-specific query parameters.
    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::Boards | Self::Lists { .. } | Self::Cards { .. } => Vec::new(),
            Self::MoveCard { list_id, .. } => vec![("idList", list_id.as_str())],
            Self::CreateCard { list_id, name } => {
                vec![("idList", list_id.as_str()), ("name", name.as_str())]
            }
        }
    }

    /// Returns a short operation name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Boards => "list_boards",
            Self::Lists { .. } => "list_lists",
            Self::Cards { .. } => "list_cards",
            Self::MoveCard { .. } => "move_card",
            Self::CreateCard { .. } => "create_card",
        }
    }
}

/// Encodes an id for use as a single path segment.
fn segment(id: &str) -> String {
    utf8_percent_encode(id, NON_ALPHANUMERIC).to_string()
}
