//! Decoding of Trello response bodies into typed records.
//!
//! The list endpoints answer with a bare JSON array, the create endpoint with
//! a single object. Empty bodies (and `null`) decode to an empty list rather
//! than an error; anything else that is not the expected shape is a
//! [`Error::Parse`].

use serde::de::DeserializeOwned;
use uniwork_protocol::{Board, Card, List};

use crate::error::{Error, Result};

/// A record kind with a name used in parse errors.
pub trait Record: DeserializeOwned {
    /// Short name of the record kind, e.g. `"board"`.
    const KIND: &'static str;
}

impl Record for Board {
    const KIND: &'static str = "board";
}

impl Record for List {
    const KIND: &'static str = "list";
}

impl Record for Card {
    const KIND: &'static str = "card";
}

/// Decodes a JSON array payload into records.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the payload is not valid JSON, is not an
/// array, or an element does not have the record's required fields.
///
/// # Examples
///
/// ```
/// use uniwork_protocol::Board;
/// use uniwork_trello::parse::parse_array;
///
/// let boards: Vec<Board> = parse_array(r#"[{"id":"b1","name":"Work","closed":false}]"#).unwrap();
/// assert_eq!(boards[0].name, "Work");
///
/// let none: Vec<Board> = parse_array("").unwrap();
/// assert!(none.is_empty());
/// ```
pub fn parse_array<T: Record>(payload: &str) -> Result<Vec<T>> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str::<Option<Vec<T>>>(payload)
        .map(Option::unwrap_or_default)
        .map_err(|source| Error::Parse {
            record: T::KIND,
            source,
        })
}

/// Decodes a single JSON object payload into a record.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the payload is empty, not valid JSON, or not
/// the record's shape.
pub fn parse_object<T: Record>(payload: &str) -> Result<T> {
    serde_json::from_str(payload.trim()).map_err(|source| Error::Parse {
        record: T::KIND,
        source,
    })
}
