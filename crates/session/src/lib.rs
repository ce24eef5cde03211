//! Session orchestration for the uniwork panel.
//!
//! The [`Session`] owns the store, the board selection, and the drag state.
//! It is driven by user intents and by remote results, and never does I/O
//! itself: intents return [`Command`]s, a [`Dispatcher`] runs them against a
//! [`RemoteApi`], and every [`Response`] goes back through
//! [`Session::apply`].
//!
//! # Overview
//!
//! - [`session`]: the session object, notices, and snapshots
//! - [`command`]: commands, responses, and selection tokens
//! - [`runtime`]: command execution and task dispatch
//!
//! # Examples
//!
//! ```no_run
//! use secrecy::SecretString;
//! use uniwork_session::{Dispatcher, Session, runtime::response_channel};
//! use uniwork_trello::TrelloClient;
//!
//! # async fn example() -> uniwork_trello::Result<()> {
//! let client = TrelloClient::new(
//!     SecretString::from("key".to_string()),
//!     SecretString::from("token".to_string()),
//! )?;
//! let (tx, mut rx) = response_channel();
//! let dispatcher = Dispatcher::new(client, tx);
//!
//! let mut session = Session::new();
//! dispatcher.dispatch(session.open(true));
//! while let Some(response) = rx.recv().await {
//!     dispatcher.dispatch(session.apply(response));
//!     if session.in_flight() == 0 {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod runtime;
pub mod session;

pub use command::{Command, Response, SelectionToken};
pub use runtime::{Dispatcher, RemoteApi};
pub use session::{Notice, Session, Snapshot};
