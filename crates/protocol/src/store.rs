//! In-memory mirror of the remote boards, lists, and cards.
//!
//! The [`Store`] holds the last-fetched boards, the lists of the currently
//! selected board, and one card collection per list. Every mutation is
//! synchronous; the next read sees it.
//!
//! A card id appears in at most one collection at a time. [`Store::add_card`],
//! [`Store::set_cards`], and [`Store::move_card`] all preserve that.

use std::collections::HashMap;

use crate::record::{Board, Card, List, ListId};

/// Last-fetched remote state for one session.
///
/// # Examples
///
/// ```
/// use uniwork_protocol::{Card, List, Store};
///
/// let mut store = Store::new();
/// store.set_lists(vec![List::new("l1", "Todo"), List::new("l2", "Done")]);
/// store.set_cards("l1", vec![Card::new("c1", "l1", "Fix bug")]);
///
/// assert!(store.move_card("c1", "l1", "l2"));
/// assert!(store.cards("l1").is_empty());
/// assert_eq!(store.cards("l2")[0].list_id, "l2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    boards: Vec<Board>,
    lists: Vec<List>,
    cards: HashMap<ListId, Vec<Card>>,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all boards.
    pub fn set_boards(&mut self, boards: Vec<Board>) {
        self.boards = boards;
    }

    /// Returns every fetched board, closed ones included.
    #[must_use]
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Returns the boards that should be displayed, in fetch order.
    ///
    /// # Examples
    ///
    /// ```
    /// use uniwork_protocol::{Board, Store};
    ///
    /// let mut store = Store::new();
    /// store.set_boards(vec![Board::new("b1", "Work"), Board::closed("b2", "Old")]);
    ///
    /// let names: Vec<_> = store.open_boards().map(|b| b.name.as_str()).collect();
    /// assert_eq!(names, ["Work"]);
    /// ```
    pub fn open_boards(&self) -> impl Iterator<Item = &Board> {
        self.boards.iter().filter(|board| board.is_open())
    }

    /// Returns the board with the given id, if it was fetched.
    #[must_use]
    pub fn board(&self, id: &str) -> Option<&Board> {
        self.boards.iter().find(|board| board.id == id)
    }

    /// Replaces the lists of the selected board.
    ///
    /// All card collections are dropped: they belonged to the previous lists.
    pub fn set_lists(&mut self, lists: Vec<List>) {
        self.lists = lists;
        self.cards.clear();
    }

    /// Drops every list and card collection.
    pub fn clear_lists(&mut self) {
        self.lists.clear();
        self.cards.clear();
    }

    /// Returns the lists of the selected board in remote order.
    #[must_use]
    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    /// Returns the list with the given id, if present.
    #[must_use]
    pub fn list(&self, id: &str) -> Option<&List> {
        self.lists.iter().find(|list| list.id == id)
    }

    /// Replaces the card collection of one list.
    ///
    /// Cards in `cards` are removed from any other collection first, so the
    /// remote answer for this list wins over a stale local copy elsewhere.
    pub fn set_cards(&mut self, list_id: impl Into<ListId>, cards: Vec<Card>) {
        let list_id = list_id.into();
        for (other_id, collection) in &mut self.cards {
            if *other_id != list_id {
                collection.retain(|existing| !cards.iter().any(|card| card.id == existing.id));
            }
        }
        self.cards.insert(list_id, cards);
    }

    /// Returns the cards of a list, or an empty slice if none are loaded.
    #[must_use]
    pub fn cards(&self, list_id: &str) -> &[Card] {
        self.cards.get(list_id).map_or(&[], Vec::as_slice)
    }

    /// Returns `true` if a card collection exists for the list.
    #[must_use]
    pub fn has_cards(&self, list_id: &str) -> bool {
        self.cards.contains_key(list_id)
    }

    /// Returns the total number of cards across all collections.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.values().map(Vec::len).sum()
    }

    /// Finds a card in any collection.
    #[must_use]
    pub fn find_card(&self, card_id: &str) -> Option<&Card> {
        self.cards
            .values()
            .flat_map(|collection| collection.iter())
            .find(|card| card.id == card_id)
    }

    /// Returns the index of a card within a list's collection.
    #[must_use]
    pub fn card_position(&self, list_id: &str, card_id: &str) -> Option<usize> {
        self.cards
            .get(list_id)?
            .iter()
            .position(|card| card.id == card_id)
    }

    /// Appends a card to the collection of `card.list_id`.
    ///
    /// The collection is created if absent. A card with the same id in any
    /// collection is removed first.
    ///
    /// # Examples
    ///
    /// ```
    /// use uniwork_protocol::{Card, Store};
    ///
    /// let mut store = Store::new();
    /// store.add_card(Card::new("c1", "l1", "Fix bug"));
    /// store.add_card(Card::new("c2", "l1", "New Card"));
    ///
    /// let ids: Vec<_> = store.cards("l1").iter().map(|c| c.id.as_str()).collect();
    /// assert_eq!(ids, ["c1", "c2"]);
    /// ```
    pub fn add_card(&mut self, card: Card) {
        for collection in self.cards.values_mut() {
            collection.retain(|existing| existing.id != card.id);
        }
        self.cards
            .entry(card.list_id.clone())
            .or_default()
            .push(card);
    }

    /// Moves a card from one list to the end of another.
    ///
    /// Returns `false` without changing anything when `from == to` or when the
    /// card is not in `from` (the local mirror may have drifted from the
    /// remote state).
    pub fn move_card(&mut self, card_id: &str, from: &str, to: &str) -> bool {
        self.relocate(card_id, from, to, None)
    }

    /// Moves a card from one list into another at a given index.
    ///
    /// The index is clamped to the destination length. Same no-op rules as
    /// [`Store::move_card`].
    pub fn move_card_to(&mut self, card_id: &str, from: &str, to: &str, index: usize) -> bool {
        self.relocate(card_id, from, to, Some(index))
    }

    fn relocate(&mut self, card_id: &str, from: &str, to: &str, index: Option<usize>) -> bool {
        if from == to {
            return false;
        }
        let Some(source) = self.cards.get_mut(from) else {
            return false;
        };
        let Some(position) = source.iter().position(|card| card.id == card_id) else {
            return false;
        };

        let mut card = source.remove(position);
        card.list_id = to.to_string();

        let destination = self.cards.entry(to.to_string()).or_default();
        let index = index.map_or(destination.len(), |i| i.min(destination.len()));
        destination.insert(index, card);
        true
    }
}
