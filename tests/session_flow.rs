//! End-to-end panel flows: a session driven through a dispatcher against an
//! in-process fake of the remote API.

use std::sync::Mutex;
use std::time::Duration;

use uniwork_protocol::{Board, Card, List, Target};
use uniwork_session::runtime::{ResponseReceiver, response_channel};
use uniwork_session::{Dispatcher, Notice, RemoteApi, Session};
use uniwork_trello::{Error, Result};

/// Board `b1` answers slowly; `b2` has lists `la` and `lb`. Moving the
/// card `stuck` always fails.
#[derive(Default)]
struct FakeTrello {
    moves: Mutex<Vec<(String, String)>>,
}

impl RemoteApi for FakeTrello {
    async fn list_boards(&self) -> Result<Vec<Board>> {
        Ok(vec![
            Board::new("b1", "Slow"),
            Board::new("b2", "Fast"),
            Board::closed("b3", "Archived"),
        ])
    }

    async fn list_lists(&self, board_id: &str) -> Result<Vec<List>> {
        match board_id {
            "b1" => {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok(vec![List::new("l-slow", "Backlog")])
            }
            "b2" => Ok(vec![List::new("la", "Todo"), List::new("lb", "Done")]),
            other => Err(Error::Status {
                status: 404,
                body: format!("no board {other}"),
            }),
        }
    }

    async fn list_cards(&self, list_id: &str) -> Result<Vec<Card>> {
        Ok(match list_id {
            "la" => vec![
                Card::new("c1", "la", "Fix bug"),
                Card::new("stuck", "la", "Stuck"),
            ],
            "l-slow" => vec![Card::new("cs", "l-slow", "Old")],
            _ => Vec::new(),
        })
    }

    async fn move_card(&self, card_id: &str, list_id: &str) -> Result<()> {
        if card_id == "stuck" {
            return Err(Error::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        self.moves
            .lock()
            .unwrap()
            .push((card_id.to_string(), list_id.to_string()));
        Ok(())
    }

    async fn create_card(&self, list_id: &str, name: &str) -> Result<Card> {
        Ok(Card::new(format!("new-{name}"), list_id, name))
    }
}

struct Harness {
    session: Session,
    dispatcher: Dispatcher,
    responses: ResponseReceiver,
}

impl Harness {
    fn new() -> Self {
        let (tx, responses) = response_channel();
        Self {
            session: Session::new(),
            dispatcher: Dispatcher::new(FakeTrello::default(), tx),
            responses,
        }
    }

    fn dispatch(&self, commands: Vec<uniwork_session::Command>) {
        self.dispatcher.dispatch(commands);
    }

    /// Applies responses until nothing is in flight.
    async fn settle(&mut self) {
        let drain = async {
            while self.session.in_flight() > 0 {
                let response = self.responses.recv().await.expect("channel closed");
                let commands = self.session.apply(response);
                self.dispatcher.dispatch(commands);
            }
        };
        tokio::time::timeout(Duration::from_secs(5), drain)
            .await
            .expect("responses did not settle");
    }

    async fn open_board(&mut self, board_id: &str) {
        let commands = self.session.open(true);
        self.dispatch(commands);
        self.settle().await;
        let commands = self.session.select_board(board_id);
        self.dispatch(commands);
        self.settle().await;
    }

    fn card_ids(&self, list_id: &str) -> Vec<&str> {
        self.session
            .store()
            .cards(list_id)
            .iter()
            .map(|card| card.id.as_str())
            .collect()
    }
}

#[tokio::test]
async fn open_loads_open_boards_only() {
    let mut harness = Harness::new();
    let commands = harness.session.open(true);
    harness.dispatch(commands);
    harness.settle().await;

    let names: Vec<_> = harness
        .session
        .store()
        .open_boards()
        .map(|board| board.name.as_str())
        .collect();
    assert_eq!(names, ["Slow", "Fast"]);
}

#[tokio::test]
async fn selecting_a_board_fans_out_to_every_list() {
    let mut harness = Harness::new();
    harness.open_board("b2").await;

    let store = harness.session.store();
    let lists: Vec<_> = store.lists().iter().map(|list| list.id.as_str()).collect();
    assert_eq!(lists, ["la", "lb"]);
    assert!(store.has_cards("la"));
    assert!(store.has_cards("lb"));
    assert_eq!(harness.card_ids("la"), ["c1", "stuck"]);
}

#[tokio::test]
async fn slow_board_is_superseded_by_later_selection() {
    let mut harness = Harness::new();
    let commands = harness.session.open(true);
    harness.dispatch(commands);
    harness.settle().await;

    let slow = harness.session.select_board("b1");
    harness.dispatch(slow);
    let fast = harness.session.select_board("b2");
    harness.dispatch(fast);
    harness.settle().await;

    let store = harness.session.store();
    assert_eq!(harness.session.selection().board_id(), Some("b2"));
    assert!(store.list("l-slow").is_none());
    assert!(store.find_card("cs").is_none());
    assert_eq!(store.lists().len(), 2);
}

#[tokio::test]
async fn drag_between_lists_persists() {
    let mut harness = Harness::new();
    harness.open_board("b2").await;

    assert!(harness.session.begin_drag("c1", "la", None));
    let commands = harness
        .session
        .drop(Some(&Target::Card {
            list_id: "lb".into(),
            card_id: "ignored".into(),
        }));
    assert_eq!(harness.card_ids("lb"), ["c1"]);
    harness.dispatch(commands);
    harness.settle().await;

    assert_eq!(harness.card_ids("la"), ["stuck"]);
    assert_eq!(harness.card_ids("lb"), ["c1"]);
    assert!(harness.session.notice().is_none());
}

#[tokio::test]
async fn failed_move_puts_card_back() {
    let mut harness = Harness::new();
    harness.open_board("b2").await;

    assert!(harness.session.begin_drag("stuck", "la", None));
    let commands = harness.session.drop(Some(&Target::List("lb".into())));
    harness.dispatch(commands);
    harness.settle().await;

    assert_eq!(harness.card_ids("la"), ["c1", "stuck"]);
    assert!(harness.card_ids("lb").is_empty());
    assert!(harness.session.notice().is_some_and(Notice::is_error));
}

#[tokio::test]
async fn created_card_lands_at_the_end() {
    let mut harness = Harness::new();
    harness.open_board("b2").await;

    let commands = harness.session.request_create_card("la", "  Write docs ");
    harness.dispatch(commands);
    harness.settle().await;

    assert_eq!(harness.card_ids("la"), ["c1", "stuck", "new-Write docs"]);
}

#[tokio::test]
async fn missing_credentials_fetch_nothing() {
    let mut harness = Harness::new();
    assert!(harness.session.open(false).is_empty());
    assert!(harness.session.credentials_missing());
    assert!(harness.session.select_board("b2").is_empty());
    harness.settle().await;
    assert!(harness.session.store().boards().is_empty());
}
