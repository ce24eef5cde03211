//! Shared protocol types for the uniwork panel.
//!
//! This crate defines the records mirrored from the Trello API, the in-memory
//! store holding them, the selection and drag gesture state, and the UI
//! message type.
//!
//! # Overview
//!
//! - [`record`]: `Board`, `List`, and `Card` records
//! - [`store`]: the `Store` holding boards, lists, and per-list cards
//! - [`gesture`]: board `Selection`, `DragState`, and pointer `Target`s
//! - [`message`]: UI event messages
//!
//! # Examples
//!
//! ```
//! use uniwork_protocol::{Card, List, Store};
//!
//! let mut store = Store::new();
//! store.set_lists(vec![List::new("l1", "Todo")]);
//! store.set_cards("l1", vec![Card::new("c1", "l1", "Fix bug")]);
//! store.add_card(Card::new("c2", "l1", "New Card"));
//!
//! let names: Vec<_> = store.cards("l1").iter().map(|c| c.name.as_str()).collect();
//! assert_eq!(names, ["Fix bug", "New Card"]);
//! ```

pub mod gesture;
pub mod message;
pub mod record;
pub mod store;

// Re-export primary types at crate root for convenience
pub use gesture::{DragState, Pointer, Selection, Target};
pub use message::Message;
pub use record::{Board, BoardId, Card, CardId, List, ListId};
pub use store::Store;
