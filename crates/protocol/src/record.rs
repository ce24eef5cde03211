//! Board, list, and card records as returned by the Trello API.
//!
//! The records only carry the fields the panel needs. Unknown fields in a
//! payload are ignored when decoding.

use serde::{Deserialize, Serialize};

/// Identifier of a board on the remote service.
pub type BoardId = String;

/// Identifier of a list on the remote service.
pub type ListId = String;

/// Identifier of a card on the remote service.
pub type CardId = String;

/// A top-level container of lists.
///
/// Closed (archived) boards are fetched along with open ones but are never
/// displayed.
///
/// # Examples
///
/// ```
/// use uniwork_protocol::Board;
///
/// let board = Board::new("b1", "Work");
/// assert!(board.is_open());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Remote identifier.
    pub id: BoardId,
    /// Display name.
    pub name: String,
    /// Whether the board is archived.
    #[serde(default)]
    pub closed: bool,
}

impl Board {
    /// Creates an open board.
    #[must_use]
    pub fn new(id: impl Into<BoardId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            closed: false,
        }
    }

    /// Creates an archived board.
    #[must_use]
    pub fn closed(id: impl Into<BoardId>, name: impl Into<String>) -> Self {
        Self {
            closed: true,
            ..Self::new(id, name)
        }
    }

    /// Returns `true` if the board is not archived.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.closed
    }
}

/// A named column within a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Remote identifier.
    pub id: ListId,
    /// Display name.
    pub name: String,
}

impl List {
    /// Creates a list record.
    #[must_use]
    pub fn new(id: impl Into<ListId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A single task item, owned by exactly one list.
///
/// On the wire the owning list is carried as `idList`.
///
/// # Examples
///
/// ```
/// use uniwork_protocol::Card;
///
/// let card: Card = serde_json::from_str(r#"{"id":"c1","idList":"l1","name":"Fix bug"}"#).unwrap();
/// assert_eq!(card.list_id, "l1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Remote identifier.
    pub id: CardId,
    /// The list that currently owns this card.
    #[serde(rename = "idList")]
    pub list_id: ListId,
    /// Display name.
    pub name: String,
}

impl Card {
    /// Creates a card record.
    #[must_use]
    pub fn new(id: impl Into<CardId>, list_id: impl Into<ListId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            list_id: list_id.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_closed_defaults_to_false() {
        let board: Board = serde_json::from_str(r#"{"id":"b1","name":"Work"}"#).unwrap();
        assert!(board.is_open());
    }

    #[test]
    fn board_ignores_unknown_fields() {
        let board: Board = serde_json::from_str(
            r#"{"id":"b1","name":"Work","closed":true,"desc":"","prefs":{"background":"blue"}}"#,
        )
        .unwrap();
        assert_eq!(board, Board::closed("b1", "Work"));
    }

    #[test]
    fn card_requires_id_list() {
        let result: Result<Card, _> = serde_json::from_str(r#"{"id":"c1","name":"Fix bug"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn card_serializes_list_id_as_id_list() {
        let json = serde_json::to_string(&Card::new("c1", "l1", "Fix bug")).unwrap();
        assert!(json.contains(r#""idList":"l1""#));
    }
}
