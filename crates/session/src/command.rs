//! Remote work requested by the session and the results it gets back.
//!
//! Every [`Command`] carries the context it was issued for: a boards
//! generation, or a [`SelectionToken`] naming the selected board and the
//! selection epoch. The matching [`Response`] echoes that context so the
//! session can tell a current result from a stale one.

use uniwork_protocol::{Board, BoardId, Card, CardId, List, ListId};
use uniwork_trello::Result;

/// Identifies one board selection.
///
/// The epoch grows on every selection, so selecting the same board twice
/// still yields two distinct tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectionToken {
    /// The selected board.
    pub board_id: BoardId,
    /// The selection counter at the time of selection.
    pub epoch: u64,
}

/// A remote operation to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch the member's boards.
    FetchBoards {
        /// The boards refresh this fetch belongs to.
        generation: u64,
    },
    /// Fetch the lists of the selected board.
    FetchLists {
        /// The selection this fetch belongs to.
        token: SelectionToken,
    },
    /// Fetch the cards of one list.
    FetchCards {
        /// The selection this fetch belongs to.
        token: SelectionToken,
        /// The list to read.
        list_id: ListId,
    },
    /// Persist a move already applied to the store.
    MoveCard {
        /// The moved card.
        card_id: CardId,
        /// The list it was taken from.
        from: ListId,
        /// The list it was dropped on.
        to: ListId,
        /// Its position in `from` before the move, used to revert.
        index: usize,
    },
    /// Create a card at the end of a list.
    CreateCard {
        /// The selection the list belongs to.
        token: SelectionToken,
        /// The list receiving the card.
        list_id: ListId,
        /// The new card's name.
        name: String,
    },
}

impl Command {
    /// Returns a short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchBoards { .. } => "fetch_boards",
            Self::FetchLists { .. } => "fetch_lists",
            Self::FetchCards { .. } => "fetch_cards",
            Self::MoveCard { .. } => "move_card",
            Self::CreateCard { .. } => "create_card",
        }
    }
}

/// The outcome of a [`Command`], tagged with the command's context.
#[derive(Debug)]
pub enum Response {
    /// Result of [`Command::FetchBoards`].
    Boards {
        /// Echo of the command's generation.
        generation: u64,
        /// The fetched boards.
        result: Result<Vec<Board>>,
    },
    /// Result of [`Command::FetchLists`].
    Lists {
        /// Echo of the command's token.
        token: SelectionToken,
        /// The fetched lists.
        result: Result<Vec<List>>,
    },
    /// Result of [`Command::FetchCards`].
    Cards {
        /// Echo of the command's token.
        token: SelectionToken,
        /// The list that was read.
        list_id: ListId,
        /// The fetched cards.
        result: Result<Vec<Card>>,
    },
    /// Result of [`Command::MoveCard`].
    CardMoved {
        /// The moved card.
        card_id: CardId,
        /// The list it was taken from.
        from: ListId,
        /// The list it was dropped on.
        to: ListId,
        /// Its position in `from` before the move.
        index: usize,
        /// Success or the remote failure.
        result: Result<()>,
    },
    /// Result of [`Command::CreateCard`].
    CardCreated {
        /// Echo of the command's token.
        token: SelectionToken,
        /// The list the card was created in.
        list_id: ListId,
        /// The created card.
        result: Result<Card>,
    },
}

impl Response {
    /// Returns `true` if the remote call failed.
    #[must_use]
    pub fn is_err(&self) -> bool {
        match self {
            Self::Boards { result, .. } => result.is_err(),
            Self::Lists { result, .. } => result.is_err(),
            Self::Cards { result, .. } => result.is_err(),
            Self::CardMoved { result, .. } => result.is_err(),
            Self::CardCreated { result, .. } => result.is_err(),
        }
    }
}
