//! View state: focus and cursors over the store.
//!
//! The session owns the data; this module only tracks what the keyboard is
//! pointing at. Cursors are indices into the store's current contents and
//! are clamped whenever the store changes underneath them.

use uniwork_protocol::{Board, Card, List, ListId, Store};

use crate::input::TextInput;

/// The current focus area in the UI.
///
/// Determines which column receives arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The boards column.
    #[default]
    Boards,
    /// The lists of the selected board.
    Lists,
}

/// Keyboard focus and cursor positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Current focus area.
    pub focus: Focus,
    /// Index into the open boards.
    pub board_cursor: usize,
    /// Index into the lists of the selected board.
    pub list_cursor: usize,
    /// Index of the highlighted card within the focused list, if any.
    pub card_cursor: Option<usize>,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
}

fn wrap_step(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1) % len
    } else if current == 0 {
        len - 1
    } else {
        (current - 1).min(len - 1)
    }
}

impl ViewState {
    /// Creates a view focused on the boards column.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles the help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Dismisses the help overlay if it is visible.
    ///
    /// Returns `true` if help was visible and has been dismissed.
    #[must_use]
    pub fn dismiss_help(&mut self) -> bool {
        std::mem::take(&mut self.help_visible)
    }

    /// Switches focus between boards and lists.
    ///
    /// Focus only moves to the lists when there is at least one.
    pub fn toggle_focus(&mut self, store: &Store) {
        self.focus = match self.focus {
            Focus::Boards if !store.lists().is_empty() => Focus::Lists,
            Focus::Boards => Focus::Boards,
            Focus::Lists => Focus::Boards,
        };
        self.clamp(store);
    }

    /// Moves the cursor up in the focused column, wrapping around.
    pub fn navigate_up(&mut self, store: &Store) {
        self.step_vertical(store, false);
    }

    /// Moves the cursor down in the focused column, wrapping around.
    pub fn navigate_down(&mut self, store: &Store) {
        self.step_vertical(store, true);
    }

    fn step_vertical(&mut self, store: &Store, forward: bool) {
        match self.focus {
            Focus::Boards => {
                let count = store.open_boards().count();
                self.board_cursor = wrap_step(self.board_cursor, count, forward);
            }
            Focus::Lists => {
                let count = self.focused_cards(store).len();
                self.card_cursor = match (count, self.card_cursor) {
                    (0, _) => None,
                    (_, None) => Some(0),
                    (_, Some(idx)) => Some(wrap_step(idx, count, forward)),
                };
            }
        }
    }

    /// Moves to the list on the left. From the first list, focus returns to
    /// the boards column.
    pub fn navigate_left(&mut self, store: &Store) {
        if self.focus == Focus::Boards {
            return;
        }
        if self.list_cursor == 0 {
            self.focus = Focus::Boards;
        } else {
            self.list_cursor -= 1;
        }
        self.clamp(store);
    }

    /// Moves to the list on the right. From the boards column, focus enters
    /// the first list.
    pub fn navigate_right(&mut self, store: &Store) {
        match self.focus {
            Focus::Boards => self.toggle_focus(store),
            Focus::Lists => {
                if self.list_cursor + 1 < store.lists().len() {
                    self.list_cursor += 1;
                }
                self.clamp(store);
            }
        }
    }

    /// Points the cursor at a card by position.
    pub fn focus_card(&mut self, store: &Store, list_index: usize, card_index: Option<usize>) {
        self.focus = Focus::Lists;
        self.list_cursor = list_index;
        self.card_cursor = card_index;
        self.clamp(store);
    }

    /// Points the cursor at the list with `list_id`, if present.
    pub fn focus_list(&mut self, store: &Store, list_id: &str) {
        if let Some(index) = store.lists().iter().position(|list| list.id == list_id) {
            self.focus_card(store, index, None);
        }
    }

    /// Highlights the last card of the focused list.
    pub fn focus_last_card(&mut self, store: &Store) {
        self.card_cursor = self.focused_cards(store).len().checked_sub(1);
    }

    /// Resets list and card cursors, e.g. after a new board is selected.
    pub fn reset_lists(&mut self) {
        self.list_cursor = 0;
        self.card_cursor = None;
    }

    /// Brings every cursor back in range after the store changed.
    pub fn clamp(&mut self, store: &Store) {
        let boards = store.open_boards().count();
        self.board_cursor = self.board_cursor.min(boards.saturating_sub(1));

        let lists = store.lists().len();
        if lists == 0 {
            self.focus = Focus::Boards;
            self.list_cursor = 0;
            self.card_cursor = None;
            return;
        }
        self.list_cursor = self.list_cursor.min(lists - 1);

        let cards = self.focused_cards(store).len();
        if cards == 0 {
            self.card_cursor = None;
        } else if let Some(idx) = self.card_cursor
            && idx >= cards
        {
            self.card_cursor = Some(cards - 1);
        }
    }

    /// Returns the board under the board cursor.
    #[must_use]
    pub fn focused_board<'a>(&self, store: &'a Store) -> Option<&'a Board> {
        store.open_boards().nth(self.board_cursor)
    }

    /// Returns the list under the list cursor.
    #[must_use]
    pub fn focused_list<'a>(&self, store: &'a Store) -> Option<&'a List> {
        store.lists().get(self.list_cursor)
    }

    /// Returns the cards of the focused list.
    #[must_use]
    pub fn focused_cards<'a>(&self, store: &'a Store) -> &'a [Card] {
        self.focused_list(store)
            .map_or(&[], |list| store.cards(&list.id))
    }

    /// Returns the highlighted card, if any.
    #[must_use]
    pub fn focused_card<'a>(&self, store: &'a Store) -> Option<&'a Card> {
        self.focused_cards(store).get(self.card_cursor?)
    }
}

/// The new-card name prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPrompt {
    /// The list receiving the card.
    pub list_id: ListId,
    /// The list's name, for the prompt title.
    pub list_name: String,
    /// The name typed so far.
    pub input: TextInput,
}

impl CardPrompt {
    /// Opens a prompt for a card in `list`.
    #[must_use]
    pub fn new(list: &List) -> Self {
        Self {
            list_id: list.id.clone(),
            list_name: list.name.clone(),
            input: TextInput::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniwork_protocol::Board;

    fn store() -> Store {
        let mut store = Store::new();
        store.set_boards(vec![
            Board::new("b1", "Work"),
            Board::closed("b2", "Archive"),
            Board::new("b3", "Home"),
        ]);
        store.set_lists(vec![List::new("l1", "Todo"), List::new("l2", "Done")]);
        store.set_cards(
            "l1",
            vec![Card::new("c1", "l1", "One"), Card::new("c2", "l1", "Two")],
        );
        store.set_cards("l2", Vec::new());
        store
    }

    #[test]
    fn new_state_has_correct_defaults() {
        let state = ViewState::new();
        assert_eq!(state.focus, Focus::Boards);
        assert_eq!(state.board_cursor, 0);
        assert_eq!(state.card_cursor, None);
        assert!(!state.help_visible);
    }

    #[test]
    fn board_cursor_skips_closed_boards() {
        let store = store();
        let mut state = ViewState::new();
        state.navigate_down(&store);
        assert_eq!(state.focused_board(&store).map(|b| b.id.as_str()), Some("b3"));
        state.navigate_down(&store);
        assert_eq!(state.focused_board(&store).map(|b| b.id.as_str()), Some("b1"));
        state.navigate_up(&store);
        assert_eq!(state.focused_board(&store).map(|b| b.id.as_str()), Some("b3"));
    }

    #[test]
    fn right_enters_lists_left_returns_to_boards() {
        let store = store();
        let mut state = ViewState::new();
        state.navigate_right(&store);
        assert_eq!(state.focus, Focus::Lists);
        state.navigate_right(&store);
        assert_eq!(state.focused_list(&store).map(|l| l.id.as_str()), Some("l2"));
        state.navigate_right(&store);
        assert_eq!(state.list_cursor, 1);

        state.navigate_left(&store);
        state.navigate_left(&store);
        assert_eq!(state.focus, Focus::Boards);
    }

    #[test]
    fn toggle_focus_requires_lists() {
        let mut state = ViewState::new();
        state.toggle_focus(&Store::new());
        assert_eq!(state.focus, Focus::Boards);

        state.toggle_focus(&store());
        assert_eq!(state.focus, Focus::Lists);
    }

    #[test]
    fn card_navigation_wraps() {
        let store = store();
        let mut state = ViewState::new();
        state.navigate_right(&store);

        state.navigate_down(&store);
        assert_eq!(state.focused_card(&store).map(|c| c.id.as_str()), Some("c1"));
        state.navigate_down(&store);
        state.navigate_down(&store);
        assert_eq!(state.focused_card(&store).map(|c| c.id.as_str()), Some("c1"));
        state.navigate_up(&store);
        assert_eq!(state.focused_card(&store).map(|c| c.id.as_str()), Some("c2"));
    }

    #[test]
    fn empty_list_has_no_card_cursor() {
        let store = store();
        let mut state = ViewState::new();
        state.focus_card(&store, 1, Some(3));
        assert_eq!(state.card_cursor, None);
        state.navigate_down(&store);
        assert_eq!(state.card_cursor, None);
    }

    #[test]
    fn clamp_after_lists_cleared() {
        let mut store = store();
        let mut state = ViewState::new();
        state.focus_card(&store, 1, None);

        store.clear_lists();
        state.clamp(&store);
        assert_eq!(state.focus, Focus::Boards);
        assert_eq!(state.list_cursor, 0);
        assert_eq!(state.focused_list(&store), None);
    }

    #[test]
    fn focus_list_and_last_card() {
        let store = store();
        let mut state = ViewState::new();
        state.focus_list(&store, "l1");
        state.focus_last_card(&store);
        assert_eq!(state.focused_card(&store).map(|c| c.id.as_str()), Some("c2"));

        state.focus_list(&store, "missing");
        assert_eq!(state.list_cursor, 0);
    }

    #[test]
    fn dismiss_help() {
        let mut state = ViewState::new();
        assert!(!state.dismiss_help());
        state.toggle_help();
        assert!(state.dismiss_help());
        assert!(!state.help_visible);
    }
}
