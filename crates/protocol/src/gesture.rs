//! Board selection and the card drag gesture.
//!
//! The drag gesture is a small state machine driven by discrete pointer
//! events over named [`Target`]s. Whatever binds the panel to real input
//! (terminal mouse, keyboard, a test harness) resolves its own coordinates
//! into targets; nothing here knows about pixels or cells.
//!
//! ```text
//! Idle --press on Card--> Dragging --release (any target, or none)--> Idle
//! ```

use crate::record::{BoardId, Card, CardId, ListId};

/// Which board, if any, is currently selected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing selected yet; only boards are shown.
    #[default]
    NoBoard,
    /// A board is selected and its lists are (being) loaded.
    Board(BoardId),
}

impl Selection {
    /// Returns the selected board id, if any.
    #[must_use]
    pub fn board_id(&self) -> Option<&str> {
        match self {
            Self::NoBoard => None,
            Self::Board(id) => Some(id),
        }
    }

    /// Returns `true` if `board_id` is the selected board.
    #[must_use]
    pub fn is_selected(&self, board_id: &str) -> bool {
        self.board_id() == Some(board_id)
    }
}

/// A screen position reported by the input binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pointer {
    /// Column (x coordinate).
    pub column: u16,
    /// Row (y coordinate).
    pub row: u16,
}

impl Pointer {
    /// Creates a pointer position.
    #[must_use]
    pub const fn new(column: u16, row: u16) -> Self {
        Self { column, row }
    }
}

/// A named region a pointer event can land on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A board entry in the boards column.
    Board(BoardId),
    /// A list column (header or empty space below its cards).
    List(ListId),
    /// A card inside a list column.
    Card {
        /// The list displaying the card.
        list_id: ListId,
        /// The card itself.
        card_id: CardId,
    },
    /// The "add a card" affordance at the bottom of a list column.
    NewCard(ListId),
}

impl Target {
    /// Returns the list a drop on this target lands in, if any.
    ///
    /// Dropping on a card or on the add-card row means dropping on the list
    /// that contains it.
    ///
    /// # Examples
    ///
    /// ```
    /// use uniwork_protocol::Target;
    ///
    /// let target = Target::Card { list_id: "l2".into(), card_id: "c9".into() };
    /// assert_eq!(target.drop_list(), Some("l2"));
    /// assert_eq!(Target::Board("b1".into()).drop_list(), None);
    /// ```
    #[must_use]
    pub fn drop_list(&self) -> Option<&str> {
        match self {
            Self::Board(_) => None,
            Self::List(list_id) | Self::NewCard(list_id) | Self::Card { list_id, .. } => {
                Some(list_id)
            }
        }
    }
}

/// The drag sub-state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    /// No card is being dragged.
    #[default]
    Idle,
    /// A card is held and follows the pointer.
    Dragging {
        /// A copy of the card taken when the drag began.
        card: Card,
        /// The list the card was picked up from.
        source: ListId,
        /// Last known pointer position, if the binding reports one.
        pointer: Option<Pointer>,
    },
}

impl DragState {
    /// Returns `true` while a card is held.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Returns the held card, if any.
    #[must_use]
    pub fn card(&self) -> Option<&Card> {
        match self {
            Self::Idle => None,
            Self::Dragging { card, .. } => Some(card),
        }
    }

    /// Starts dragging `card` out of `source`, replacing any previous drag.
    pub fn begin(&mut self, card: Card, source: impl Into<ListId>, pointer: Option<Pointer>) {
        *self = Self::Dragging {
            card,
            source: source.into(),
            pointer,
        };
    }

    /// Updates the floating card position. Ignored while idle.
    pub fn track(&mut self, position: Pointer) {
        if let Self::Dragging { pointer, .. } = self {
            *pointer = Some(position);
        }
    }

    /// Ends the gesture, returning the held card and its source list.
    ///
    /// Always leaves the state [`DragState::Idle`].
    pub fn release(&mut self) -> Option<(Card, ListId)> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Dragging { card, source, .. } => Some((card, source)),
        }
    }
}
