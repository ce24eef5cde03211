//! The panel session: store, selection, and drag state behind one owner.
//!
//! A [`Session`] never performs I/O. Each intent returns the [`Command`]s
//! it needs run; the caller executes them (see [`crate::runtime`]) and feeds
//! each [`Response`] back through [`Session::apply`], which may yield
//! follow-up commands (lists lead to one card fetch per list).
//!
//! Responses issued for a previous selection or boards refresh are
//! discarded. A failed move is reverted.

use std::fmt;

use tracing::{debug, warn};
use uniwork_protocol::{DragState, ListId, Pointer, Selection, Store, Target};
use uniwork_trello::Error;

use crate::command::{Command, Response, SelectionToken};

/// A transient message for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Informational, e.g. a confirmation.
    Info(String),
    /// A failed remote operation.
    Error(String),
}

impl Notice {
    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Info(message) | Self::Error(message) => message,
        }
    }

    /// Returns `true` for error notices.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// A borrowed view of the session handed to observers and renderers.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Boards, lists, and cards.
    pub store: &'a Store,
    /// The selected board.
    pub selection: &'a Selection,
    /// The drag gesture in progress, if any.
    pub drag: &'a DragState,
    /// The current status bar message.
    pub notice: Option<&'a Notice>,
    /// Whether the missing-credentials banner should show.
    pub credentials_missing: bool,
    /// Number of commands issued and not yet answered.
    pub in_flight: usize,
}

type Observer = Box<dyn FnMut(&Snapshot<'_>) + Send>;

/// Owns the panel state and turns user intents and remote results into
/// state changes and commands.
///
/// # Examples
///
/// ```
/// use uniwork_protocol::Board;
/// use uniwork_session::{Command, Response, Session};
///
/// let mut session = Session::new();
/// let commands = session.open(true);
/// assert_eq!(commands, [Command::FetchBoards { generation: 1 }]);
///
/// session.apply(Response::Boards {
///     generation: 1,
///     result: Ok(vec![Board::new("b1", "Work"), Board::closed("b2", "Old")]),
/// });
///
/// let names: Vec<_> = session.store().open_boards().map(|b| b.name.as_str()).collect();
/// assert_eq!(names, ["Work"]);
/// ```
#[derive(Default)]
pub struct Session {
    store: Store,
    selection: Selection,
    drag: DragState,
    epoch: u64,
    generation: u64,
    credentials_missing: bool,
    notice: Option<Notice>,
    in_flight: usize,
    observers: Vec<Observer>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("store", &self.store)
            .field("selection", &self.selection)
            .field("drag", &self.drag)
            .field("epoch", &self.epoch)
            .field("generation", &self.generation)
            .field("credentials_missing", &self.credentials_missing)
            .field("notice", &self.notice)
            .field("in_flight", &self.in_flight)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Session {
    /// Creates an empty session with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback invoked with a fresh snapshot after every state
    /// change.
    pub fn subscribe(&mut self, observer: impl FnMut(&Snapshot<'_>) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Returns a borrowed view of the whole session.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            store: &self.store,
            selection: &self.selection,
            drag: &self.drag,
            notice: self.notice.as_ref(),
            credentials_missing: self.credentials_missing,
            in_flight: self.in_flight,
        }
    }

    /// Returns the store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns the board selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns the drag state.
    #[must_use]
    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// Returns the status bar message, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Returns whether credentials are known to be missing.
    #[must_use]
    pub fn credentials_missing(&self) -> bool {
        self.credentials_missing
    }

    /// Returns the number of unanswered commands.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Returns the token of the current selection, if a board is selected.
    #[must_use]
    pub fn current_token(&self) -> Option<SelectionToken> {
        self.selection.board_id().map(|board_id| SelectionToken {
            board_id: board_id.to_string(),
            epoch: self.epoch,
        })
    }

    /// Opens the panel.
    ///
    /// With credentials, clears the banner and fetches boards. Without,
    /// shows the banner and issues nothing.
    pub fn open(&mut self, has_credentials: bool) -> Vec<Command> {
        if !has_credentials {
            self.report_missing_credentials();
            return Vec::new();
        }
        self.credentials_missing = false;
        self.refresh_boards()
    }

    /// Shows the missing-credentials banner and drops any held card.
    pub fn report_missing_credentials(&mut self) {
        self.credentials_missing = true;
        self.drag.release();
        self.notify();
    }

    /// Sets a transient status bar message.
    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.notify();
    }

    /// Clears the status bar message.
    pub fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.notify();
        }
    }

    /// Starts a boards refresh. The previous boards are cleared right away.
    pub fn refresh_boards(&mut self) -> Vec<Command> {
        if self.credentials_missing {
            debug!("not fetching boards without credentials");
            return Vec::new();
        }
        self.generation += 1;
        self.store.set_boards(Vec::new());
        self.notify();
        self.issue(vec![Command::FetchBoards {
            generation: self.generation,
        }])
    }

    /// Refreshes boards and, if a board is selected, reloads it.
    pub fn refresh(&mut self) -> Vec<Command> {
        let mut commands = self.refresh_boards();
        if commands.is_empty() {
            return commands;
        }
        if let Some(board_id) = self.selection.board_id().map(str::to_string) {
            commands.extend(self.select_board(&board_id));
        }
        commands
    }

    /// Selects a board.
    ///
    /// Lists and cards are cleared immediately, before any fetch completes,
    /// and a drag in progress is cancelled. Reselecting the current board
    /// reloads it.
    pub fn select_board(&mut self, board_id: &str) -> Vec<Command> {
        if self.credentials_missing {
            debug!(board_id, "not selecting a board without credentials");
            return Vec::new();
        }
        self.epoch += 1;
        self.selection = Selection::Board(board_id.to_string());
        self.store.clear_lists();
        self.drag = DragState::Idle;
        self.notify();

        let token = SelectionToken {
            board_id: board_id.to_string(),
            epoch: self.epoch,
        };
        self.issue(vec![Command::FetchLists { token }])
    }

    /// Starts dragging a card out of `list_id`.
    ///
    /// Returns `false` (and stays idle) when the card is not in that list
    /// or when there are no credentials to persist a move with.
    pub fn begin_drag(&mut self, card_id: &str, list_id: &str, pointer: Option<Pointer>) -> bool {
        if self.credentials_missing {
            debug!(card_id, "not dragging without credentials");
            return false;
        }
        let Some(card) = self
            .store
            .cards(list_id)
            .iter()
            .find(|card| card.id == card_id)
            .cloned()
        else {
            debug!(card_id, list_id, "drag started on an unknown card");
            return false;
        };
        self.drag.begin(card, list_id, pointer);
        self.notify();
        true
    }

    /// Makes the floating card follow the pointer.
    pub fn pointer_move(&mut self, pointer: Pointer) {
        if self.drag.is_dragging() {
            self.drag.track(pointer);
            self.notify();
        }
    }

    /// Handles a press: a board is selected, a card starts a drag.
    pub fn pointer_down(&mut self, target: Option<&Target>, pointer: Pointer) -> Vec<Command> {
        match target {
            Some(Target::Board(board_id)) => self.select_board(board_id),
            Some(Target::Card { list_id, card_id }) => {
                self.begin_drag(card_id, list_id, Some(pointer));
                Vec::new()
            }
            Some(Target::List(_) | Target::NewCard(_)) | None => Vec::new(),
        }
    }

    /// Handles a release over `target` (or over nothing).
    pub fn pointer_up(&mut self, target: Option<&Target>) -> Vec<Command> {
        self.drop(target)
    }

    /// Ends the drag gesture.
    ///
    /// The drag state always returns to idle. When the target resolves to a
    /// known list other than the source, the card is moved in the store
    /// right away and a [`Command::MoveCard`] is returned to persist it.
    /// Without credentials nothing moves.
    pub fn drop(&mut self, target: Option<&Target>) -> Vec<Command> {
        let Some((card, source)) = self.drag.release() else {
            return Vec::new();
        };
        if self.credentials_missing {
            debug!(card_id = %card.id, "not moving without credentials");
            self.notify();
            return Vec::new();
        }

        let destination = target
            .and_then(Target::drop_list)
            .filter(|list_id| *list_id != source && self.store.list(list_id).is_some())
            .map(str::to_string);
        let Some(destination) = destination else {
            self.notify();
            return Vec::new();
        };

        let Some(index) = self.store.card_position(&source, &card.id) else {
            debug!(card_id = %card.id, %source, "dragged card no longer in its list");
            self.notify();
            return Vec::new();
        };
        if !self.store.move_card(&card.id, &source, &destination) {
            self.notify();
            return Vec::new();
        }
        self.notify();

        self.issue(vec![Command::MoveCard {
            card_id: card.id,
            from: source,
            to: destination,
            index,
        }])
    }

    /// Abandons a drag without moving anything.
    pub fn cancel_drag(&mut self) {
        if self.drag.release().is_some() {
            self.notify();
        }
    }

    /// Asks for a new card at the end of `list_id`.
    ///
    /// Blank names, unknown lists, missing credentials, and requests with
    /// no board selected are ignored. Nothing is added until the remote call
    /// answers.
    pub fn request_create_card(&mut self, list_id: &str, name: &str) -> Vec<Command> {
        let name = name.trim();
        if name.is_empty() || self.credentials_missing {
            return Vec::new();
        }
        let Some(token) = self.current_token() else {
            return Vec::new();
        };
        if self.store.list(list_id).is_none() {
            debug!(list_id, "create requested for an unknown list");
            return Vec::new();
        }
        self.issue(vec![Command::CreateCard {
            token,
            list_id: list_id.to_string(),
            name: name.to_string(),
        }])
    }

    /// Applies a remote result and returns any follow-up commands.
    pub fn apply(&mut self, response: Response) -> Vec<Command> {
        self.in_flight = self.in_flight.saturating_sub(1);

        let follow_up = match response {
            Response::Boards { generation, result } => {
                if generation != self.generation {
                    debug!(generation, current = self.generation, "discarding stale boards");
                } else {
                    let boards = self.or_empty("load boards", result);
                    self.store.set_boards(boards);
                }
                Vec::new()
            }
            Response::Lists { token, result } => {
                if self.is_stale(&token) {
                    debug!(board_id = %token.board_id, epoch = token.epoch, "discarding stale lists");
                    Vec::new()
                } else {
                    let lists = self.or_empty("load lists", result);
                    let ids: Vec<ListId> = lists.iter().map(|list| list.id.clone()).collect();
                    self.store.set_lists(lists);
                    ids.into_iter()
                        .map(|list_id| Command::FetchCards {
                            token: token.clone(),
                            list_id,
                        })
                        .collect()
                }
            }
            Response::Cards {
                token,
                list_id,
                result,
            } => {
                if self.is_stale(&token) || self.store.list(&list_id).is_none() {
                    debug!(%list_id, epoch = token.epoch, "discarding stale cards");
                } else {
                    let cards = self.or_empty("load cards", result);
                    self.store.set_cards(list_id, cards);
                }
                Vec::new()
            }
            Response::CardMoved {
                card_id,
                from,
                to,
                index,
                result,
            } => {
                match result {
                    Ok(()) => debug!(%card_id, %from, %to, "move persisted"),
                    Err(err) => {
                        self.report("move card", &err);
                        if !self.store.move_card_to(&card_id, &to, &from, index) {
                            debug!(%card_id, "moved card is gone, nothing to revert");
                        }
                    }
                }
                Vec::new()
            }
            Response::CardCreated {
                token,
                list_id,
                result,
            } => {
                match result {
                    Ok(_) if self.is_stale(&token) => {
                        debug!(%list_id, "discarding card created for a previous selection");
                    }
                    Ok(card) => self.store.add_card(card),
                    Err(err) => self.report("create card", &err),
                }
                Vec::new()
            }
        };

        self.notify();
        self.issue(follow_up)
    }

    fn is_stale(&self, token: &SelectionToken) -> bool {
        token.epoch != self.epoch || !self.selection.is_selected(&token.board_id)
    }

    fn or_empty<T>(&mut self, action: &str, result: uniwork_trello::Result<Vec<T>>) -> Vec<T> {
        result.unwrap_or_else(|err| {
            self.report(action, &err);
            Vec::new()
        })
    }

    fn report(&mut self, action: &str, err: &Error) {
        warn!(error = %err, "failed to {action}");
        if matches!(err, Error::MissingCredentials) {
            self.credentials_missing = true;
        }
        self.notice = Some(Notice::Error(format!("Failed to {action}: {err}")));
    }

    /// Counts `commands` as in flight. Nothing is issued without
    /// credentials, since no client exists to answer.
    fn issue(&mut self, commands: Vec<Command>) -> Vec<Command> {
        if self.credentials_missing && !commands.is_empty() {
            debug!(count = commands.len(), "not issuing commands without credentials");
            return Vec::new();
        }
        self.in_flight += commands.len();
        commands
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let mut observers = std::mem::take(&mut self.observers);
        let snapshot = self.snapshot();
        for observer in &mut observers {
            observer(&snapshot);
        }
        self.observers = observers;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use uniwork_protocol::{Board, Card, List};

    fn token(board_id: &str, epoch: u64) -> SelectionToken {
        SelectionToken {
            board_id: board_id.to_string(),
            epoch,
        }
    }

    fn transport_error() -> Error {
        Error::Status {
            status: 500,
            body: "server error".to_string(),
        }
    }

    /// A session with board `b1` selected, lists `l1`, `l2` and cards
    /// `c1`, `c2` in `l1`.
    fn loaded_session() -> Session {
        let mut session = Session::new();
        session.open(true);
        session.apply(Response::Boards {
            generation: 1,
            result: Ok(vec![Board::new("b1", "Work"), Board::new("b2", "Home")]),
        });
        session.select_board("b1");
        session.apply(Response::Lists {
            token: token("b1", 1),
            result: Ok(vec![List::new("l1", "Todo"), List::new("l2", "Done")]),
        });
        session.apply(Response::Cards {
            token: token("b1", 1),
            list_id: "l1".into(),
            result: Ok(vec![
                Card::new("c1", "l1", "Fix bug"),
                Card::new("c2", "l1", "Write docs"),
            ]),
        });
        session.apply(Response::Cards {
            token: token("b1", 1),
            list_id: "l2".into(),
            result: Ok(Vec::new()),
        });
        session
    }

    fn names(session: &Session, list_id: &str) -> Vec<String> {
        session
            .store()
            .cards(list_id)
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }

    #[test]
    fn open_without_credentials_shows_banner() {
        let mut session = Session::new();
        assert!(session.open(false).is_empty());
        assert!(session.credentials_missing());
        assert!(session.refresh_boards().is_empty());
    }

    #[test]
    fn open_with_credentials_clears_banner() {
        let mut session = Session::new();
        session.open(false);
        let commands = session.open(true);
        assert!(!session.credentials_missing());
        assert_eq!(commands, [Command::FetchBoards { generation: 1 }]);
        assert_eq!(session.in_flight(), 1);
    }

    #[test]
    fn boards_display_only_open() {
        let mut session = Session::new();
        session.open(true);
        session.apply(Response::Boards {
            generation: 1,
            result: Ok(vec![Board::new("b1", "Work"), Board::closed("b2", "Old")]),
        });
        let names: Vec<_> = session.store().open_boards().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Work"]);
        assert_eq!(session.in_flight(), 0);
    }

    #[test]
    fn stale_boards_generation_is_discarded() {
        let mut session = Session::new();
        session.open(true);
        session.refresh_boards();
        session.apply(Response::Boards {
            generation: 1,
            result: Ok(vec![Board::new("old", "Old fetch")]),
        });
        assert!(session.store().boards().is_empty());

        session.apply(Response::Boards {
            generation: 2,
            result: Ok(vec![Board::new("b1", "Work")]),
        });
        assert_eq!(session.store().boards().len(), 1);
    }

    #[test]
    fn lists_fan_out_to_card_fetches() {
        let mut session = Session::new();
        session.open(true);
        let commands = session.select_board("b1");
        assert_eq!(
            commands,
            [Command::FetchLists {
                token: token("b1", 1)
            }]
        );

        let follow_up = session.apply(Response::Lists {
            token: token("b1", 1),
            result: Ok(vec![List::new("l1", "Todo"), List::new("l2", "Done")]),
        });
        assert_eq!(
            follow_up,
            [
                Command::FetchCards {
                    token: token("b1", 1),
                    list_id: "l1".into()
                },
                Command::FetchCards {
                    token: token("b1", 1),
                    list_id: "l2".into()
                },
            ]
        );
    }

    #[test]
    fn cards_resolve_per_list_in_any_order() {
        let mut session = Session::new();
        session.open(true);
        session.select_board("b1");
        session.apply(Response::Lists {
            token: token("b1", 1),
            result: Ok(vec![List::new("l1", "Todo"), List::new("l2", "Done")]),
        });
        session.apply(Response::Cards {
            token: token("b1", 1),
            list_id: "l2".into(),
            result: Ok(vec![Card::new("c5", "l2", "Ship")]),
        });
        session.apply(Response::Cards {
            token: token("b1", 1),
            list_id: "l1".into(),
            result: Ok(vec![Card::new("c1", "l1", "Fix bug")]),
        });
        assert_eq!(names(&session, "l1"), ["Fix bug"]);
        assert_eq!(names(&session, "l2"), ["Ship"]);
    }

    #[test]
    fn selecting_another_board_clears_before_fetch_completes() {
        let mut session = loaded_session();
        assert!(session.store().card_count() > 0);

        session.select_board("b2");
        assert!(session.store().lists().is_empty());
        assert_eq!(session.store().card_count(), 0);
        assert!(session.selection().is_selected("b2"));
    }

    #[test]
    fn stale_lists_and_cards_are_discarded() {
        let mut session = Session::new();
        session.open(true);
        session.select_board("b1");
        session.select_board("b2");

        let follow_up = session.apply(Response::Lists {
            token: token("b1", 1),
            result: Ok(vec![List::new("l1", "Todo")]),
        });
        assert!(follow_up.is_empty());
        assert!(session.store().lists().is_empty());

        session.apply(Response::Lists {
            token: token("b2", 2),
            result: Ok(vec![List::new("l9", "Backlog")]),
        });
        session.apply(Response::Cards {
            token: token("b1", 1),
            list_id: "l9".into(),
            result: Ok(vec![Card::new("c1", "l9", "Wrong board")]),
        });
        assert!(session.store().cards("l9").is_empty());
    }

    #[test]
    fn reselecting_same_board_invalidates_previous_fetch() {
        let mut session = Session::new();
        session.open(true);
        session.select_board("b1");
        session.select_board("b1");

        session.apply(Response::Lists {
            token: token("b1", 1),
            result: Ok(vec![List::new("l1", "Todo")]),
        });
        assert!(session.store().lists().is_empty());
    }

    #[test]
    fn failed_fetch_is_empty_and_reported() {
        let mut session = Session::new();
        session.open(true);
        session.select_board("b1");
        let follow_up = session.apply(Response::Lists {
            token: token("b1", 1),
            result: Err(transport_error()),
        });
        assert!(follow_up.is_empty());
        assert!(session.store().lists().is_empty());

        let notice = session.notice().unwrap();
        assert!(notice.is_error());
        assert!(notice.message().starts_with("Failed to load lists"));
        assert!(!session.credentials_missing());
    }

    #[test]
    fn missing_credentials_error_raises_banner() {
        let mut session = Session::new();
        session.open(true);
        session.apply(Response::Boards {
            generation: 1,
            result: Err(Error::MissingCredentials),
        });
        assert!(session.credentials_missing());
    }

    #[test]
    fn drag_and_drop_moves_card_optimistically() {
        let mut session = loaded_session();
        assert!(session.begin_drag("c1", "l1", None));
        assert!(session.drag().is_dragging());

        let commands = session.drop(Some(&Target::List("l2".into())));
        assert_eq!(
            commands,
            [Command::MoveCard {
                card_id: "c1".into(),
                from: "l1".into(),
                to: "l2".into(),
                index: 0,
            }]
        );
        assert!(!session.drag().is_dragging());
        assert_eq!(names(&session, "l1"), ["Write docs"]);
        assert_eq!(names(&session, "l2"), ["Fix bug"]);
        assert_eq!(session.store().cards("l2")[0].list_id, "l2");
    }

    #[test]
    fn drop_on_card_targets_its_list() {
        let mut session = loaded_session();
        session.begin_drag("c2", "l1", None);
        session.apply(Response::Cards {
            token: token("b1", 1),
            list_id: "l2".into(),
            result: Ok(vec![Card::new("c7", "l2", "Release")]),
        });

        let target = Target::Card {
            list_id: "l2".into(),
            card_id: "c7".into(),
        };
        assert_eq!(session.drop(Some(&target)).len(), 1);
        assert_eq!(names(&session, "l2"), ["Release", "Write docs"]);
    }

    #[test]
    fn release_on_nothing_or_source_is_noop() {
        let mut session = loaded_session();
        let before = session.store().clone();

        session.begin_drag("c1", "l1", None);
        assert!(session.drop(None).is_empty());
        assert!(!session.drag().is_dragging());

        session.begin_drag("c1", "l1", None);
        assert!(session.drop(Some(&Target::List("l1".into()))).is_empty());

        session.begin_drag("c1", "l1", None);
        assert!(session.drop(Some(&Target::Board("b2".into()))).is_empty());

        assert_eq!(*session.store(), before);
    }

    #[test]
    fn drop_on_unknown_list_is_noop() {
        let mut session = loaded_session();
        session.begin_drag("c1", "l1", None);
        assert!(session.drop(Some(&Target::List("nope".into()))).is_empty());
        assert_eq!(names(&session, "l1"), ["Fix bug", "Write docs"]);
    }

    #[test]
    fn begin_drag_on_unknown_card_stays_idle() {
        let mut session = loaded_session();
        assert!(!session.begin_drag("c9", "l1", None));
        assert!(!session.begin_drag("c1", "l2", None));
        assert!(!session.drag().is_dragging());
    }

    #[test]
    fn failed_move_reverts_to_original_position() {
        let mut session = loaded_session();
        session.begin_drag("c1", "l1", None);
        let commands = session.drop(Some(&Target::List("l2".into())));
        let Some(Command::MoveCard {
            card_id,
            from,
            to,
            index,
        }) = commands.into_iter().next()
        else {
            panic!("expected a move command");
        };

        session.apply(Response::CardMoved {
            card_id,
            from,
            to,
            index,
            result: Err(transport_error()),
        });
        assert_eq!(names(&session, "l1"), ["Fix bug", "Write docs"]);
        assert!(session.store().cards("l2").is_empty());
        assert_eq!(session.store().cards("l1")[0].list_id, "l1");
        assert!(session.notice().is_some_and(Notice::is_error));
    }

    #[test]
    fn successful_move_keeps_store() {
        let mut session = loaded_session();
        session.begin_drag("c1", "l1", None);
        session.drop(Some(&Target::List("l2".into())));
        session.apply(Response::CardMoved {
            card_id: "c1".into(),
            from: "l1".into(),
            to: "l2".into(),
            index: 0,
            result: Ok(()),
        });
        assert_eq!(names(&session, "l2"), ["Fix bug"]);
        assert!(session.notice().is_none());
    }

    #[test]
    fn pointer_gestures_drive_selection_and_drag() {
        let mut session = loaded_session();
        let card = Target::Card {
            list_id: "l1".into(),
            card_id: "c2".into(),
        };
        assert!(session.pointer_down(Some(&card), Pointer::new(10, 5)).is_empty());
        session.pointer_move(Pointer::new(30, 6));
        assert!(matches!(
            session.drag(),
            DragState::Dragging { pointer: Some(p), .. } if *p == Pointer::new(30, 6)
        ));

        let commands = session.pointer_up(Some(&Target::NewCard("l2".into())));
        assert_eq!(commands.len(), 1);
        assert_eq!(names(&session, "l2"), ["Write docs"]);

        let commands = session.pointer_down(Some(&Target::Board("b2".into())), Pointer::new(1, 1));
        assert_eq!(
            commands,
            [Command::FetchLists {
                token: token("b2", 2)
            }]
        );
    }

    #[test]
    fn lost_credentials_block_card_changes() {
        let mut session = loaded_session();
        session.begin_drag("c1", "l1", None);
        session.report_missing_credentials();
        assert!(!session.drag().is_dragging());

        assert!(!session.begin_drag("c1", "l1", None));
        assert!(session.drop(Some(&Target::List("l2".into()))).is_empty());
        assert!(session.request_create_card("l1", "New").is_empty());
        assert_eq!(names(&session, "l1"), ["Fix bug", "Write docs"]);
        assert!(names(&session, "l2").is_empty());
        assert_eq!(session.in_flight(), 0);
    }

    #[test]
    fn late_lists_without_credentials_fetch_nothing() {
        let mut session = Session::new();
        session.open(true);
        session.apply(Response::Boards {
            generation: 1,
            result: Ok(vec![Board::new("b1", "Work")]),
        });
        session.select_board("b1");
        session.report_missing_credentials();

        let follow_up = session.apply(Response::Lists {
            token: token("b1", 1),
            result: Ok(vec![List::new("l1", "Todo")]),
        });
        assert!(follow_up.is_empty());
        assert_eq!(session.in_flight(), 0);
    }

    #[test]
    fn selecting_board_cancels_drag() {
        let mut session = loaded_session();
        session.begin_drag("c1", "l1", None);
        session.select_board("b2");
        assert!(!session.drag().is_dragging());
    }

    #[test]
    fn cancel_drag_leaves_store() {
        let mut session = loaded_session();
        session.begin_drag("c1", "l1", None);
        session.cancel_drag();
        assert!(!session.drag().is_dragging());
        assert_eq!(names(&session, "l1"), ["Fix bug", "Write docs"]);
    }

    #[test]
    fn create_card_appends_on_success() {
        let mut session = Session::new();
        session.open(true);
        session.select_board("b1");
        session.apply(Response::Lists {
            token: token("b1", 1),
            result: Ok(vec![List::new("l1", "Todo")]),
        });
        session.apply(Response::Cards {
            token: token("b1", 1),
            list_id: "l1".into(),
            result: Ok(vec![Card::new("c1", "l1", "Fix bug")]),
        });

        let commands = session.request_create_card("l1", "  New Card ");
        assert_eq!(
            commands,
            [Command::CreateCard {
                token: token("b1", 1),
                list_id: "l1".into(),
                name: "New Card".into(),
            }]
        );
        assert_eq!(session.store().cards("l1").len(), 1);

        session.apply(Response::CardCreated {
            token: token("b1", 1),
            list_id: "l1".into(),
            result: Ok(Card::new("c2", "l1", "New Card")),
        });
        let ids: Vec<_> = session
            .store()
            .cards("l1")
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, ["c1", "c2"]);
    }

    #[test]
    fn create_card_failure_appends_nothing() {
        let mut session = loaded_session();
        session.request_create_card("l2", "Broken");
        session.apply(Response::CardCreated {
            token: token("b1", 1),
            list_id: "l2".into(),
            result: Err(transport_error()),
        });
        assert!(session.store().cards("l2").is_empty());
        assert!(
            session
                .notice()
                .is_some_and(|n| n.message().starts_with("Failed to create card"))
        );
    }

    #[test]
    fn create_card_ignores_blank_name_and_unknown_list() {
        let mut session = loaded_session();
        assert!(session.request_create_card("l1", "   ").is_empty());
        assert!(session.request_create_card("nope", "Card").is_empty());

        let mut fresh = Session::new();
        fresh.open(true);
        assert!(fresh.request_create_card("l1", "Card").is_empty());
    }

    #[test]
    fn created_card_for_previous_selection_is_discarded() {
        let mut session = loaded_session();
        session.request_create_card("l1", "Late");
        session.select_board("b2");
        session.apply(Response::CardCreated {
            token: token("b1", 1),
            list_id: "l1".into(),
            result: Ok(Card::new("c3", "l1", "Late")),
        });
        assert!(session.store().find_card("c3").is_none());
    }

    #[test]
    fn refresh_reloads_selected_board() {
        let mut session = loaded_session();
        let commands = session.refresh();
        assert_eq!(
            commands,
            [
                Command::FetchBoards { generation: 2 },
                Command::FetchLists {
                    token: token("b1", 2)
                },
            ]
        );
        assert!(session.store().boards().is_empty());
        assert!(session.store().lists().is_empty());
    }

    #[test]
    fn in_flight_tracks_issued_commands() {
        let mut session = Session::new();
        session.open(true);
        session.select_board("b1");
        assert_eq!(session.in_flight(), 2);

        session.apply(Response::Lists {
            token: token("b1", 1),
            result: Ok(vec![List::new("l1", "Todo")]),
        });
        // one lists answer in, one card fetch out
        assert_eq!(session.in_flight(), 2);
    }

    #[test]
    fn observers_see_every_mutation() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut session = Session::new();
        let log = Arc::clone(&seen);
        session.subscribe(move |snapshot| {
            log.lock()
                .unwrap()
                .push(snapshot.store.open_boards().count());
        });

        session.open(true);
        session.apply(Response::Boards {
            generation: 1,
            result: Ok(vec![Board::new("b1", "Work")]),
        });

        let seen = seen.lock().unwrap();
        assert_eq!(seen.first(), Some(&0));
        assert_eq!(seen.last(), Some(&1));
    }

    #[test]
    fn debug_does_not_require_observer_debug() {
        let mut session = Session::new();
        session.subscribe(|_| {});
        assert!(format!("{session:?}").contains("observers: 1"));
    }

    #[test]
    fn clear_notice() {
        let mut session = Session::new();
        session.set_notice(Notice::Info("Saved".into()));
        assert_eq!(session.notice().map(Notice::message), Some("Saved"));
        session.clear_notice();
        assert!(session.notice().is_none());
    }
}
