//! Trello REST API integration for the uniwork panel.
//!
//! This crate wraps the five operations the panel needs: list boards, list
//! lists of a board, list cards of a list, move a card to another list, and
//! create a card. Every call is authenticated with an API key and a token
//! passed as query parameters.
//!
//! # Overview
//!
//! - [`client`]: the [`TrelloClient`] performing HTTP calls
//! - [`endpoint`]: method, path, and query of each operation
//! - [`parse`]: decoding of response bodies into protocol records
//! - [`error`]: error types

pub mod client;
pub mod endpoint;
pub mod error;
pub mod parse;

pub use client::{DEFAULT_BASE_URL, TrelloClient};
pub use endpoint::Endpoint;
pub use error::{Error, Result};
