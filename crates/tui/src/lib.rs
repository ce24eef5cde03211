//! Terminal panel for Trello boards.
//!
//! Boards on the left, the selected board's lists as columns on the right.
//! Cards can be dragged between lists with the mouse or picked up with the
//! keyboard, and new cards are added at the bottom of a list.
//!
//! # Overview
//!
//! - [`app`]: main application struct and run loop
//! - [`connection`]: credentials and the Trello client
//! - [`state`]: cursors and focus
//! - [`settings_state`]: credentials form state
//! - [`input`]: single-line text entry
//! - [`layout`]: panel geometry and pointer hit-testing
//! - [`terminal`]: terminal setup, teardown, and panic handling
//! - [`event`]: key and mouse mappings
//! - [`widgets`]: rendering
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use uniwork_config::FileCredentialStore;
//! use uniwork_session::runtime::response_channel;
//! use uniwork_tui::{App, Connection, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (tx, mut rx) = response_channel();
//!     let store = Arc::new(FileCredentialStore::user_default()?);
//!     let connection = Connection::new("https://api.trello.com/1", store, tx);
//!
//!     terminal::install_panic_hook();
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let mut app = App::new(connection);
//!     app.open();
//!     let result = app.run(&mut terminal, &mut rx).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod connection;
pub mod event;
pub mod input;
pub mod layout;
pub mod settings_state;
pub mod state;
pub mod terminal;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

pub use app::App;
pub use connection::Connection;
pub use state::{Focus, ViewState};
