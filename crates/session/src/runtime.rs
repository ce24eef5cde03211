//! Execution of session commands against the remote API.
//!
//! [`execute`] runs one [`Command`] to completion. A [`Dispatcher`] spawns
//! each command as its own tokio task and sends the [`Response`] back over
//! an unbounded channel, so the task owning the [`Session`](crate::Session)
//! stays the only writer of panel state.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{Instrument, debug, debug_span};
use uniwork_protocol::{Board, Card, List};
use uniwork_trello::{Result, TrelloClient};

use crate::command::{Command, Response};

/// The five remote operations the session relies on.
pub trait RemoteApi: Send + Sync + 'static {
    /// Lists the member's boards.
    fn list_boards(&self) -> impl Future<Output = Result<Vec<Board>>> + Send;

    /// Lists the lists of a board.
    fn list_lists(&self, board_id: &str) -> impl Future<Output = Result<Vec<List>>> + Send;

    /// Lists the cards of a list.
    fn list_cards(&self, list_id: &str) -> impl Future<Output = Result<Vec<Card>>> + Send;

    /// Reassigns a card to another list.
    fn move_card(&self, card_id: &str, list_id: &str) -> impl Future<Output = Result<()>> + Send;

    /// Creates a card at the end of a list.
    fn create_card(&self, list_id: &str, name: &str) -> impl Future<Output = Result<Card>> + Send;
}

impl RemoteApi for TrelloClient {
    fn list_boards(&self) -> impl Future<Output = Result<Vec<Board>>> + Send {
        TrelloClient::list_boards(self)
    }

    fn list_lists(&self, board_id: &str) -> impl Future<Output = Result<Vec<List>>> + Send {
        TrelloClient::list_lists(self, board_id)
    }

    fn list_cards(&self, list_id: &str) -> impl Future<Output = Result<Vec<Card>>> + Send {
        TrelloClient::list_cards(self, list_id)
    }

    fn move_card(&self, card_id: &str, list_id: &str) -> impl Future<Output = Result<()>> + Send {
        TrelloClient::move_card(self, card_id, list_id)
    }

    fn create_card(&self, list_id: &str, name: &str) -> impl Future<Output = Result<Card>> + Send {
        TrelloClient::create_card(self, list_id, name)
    }
}

/// Runs one command and wraps its outcome with the command's context.
pub async fn execute<A: RemoteApi>(api: &A, command: Command) -> Response {
    match command {
        Command::FetchBoards { generation } => Response::Boards {
            generation,
            result: api.list_boards().await,
        },
        Command::FetchLists { token } => {
            let result = api.list_lists(&token.board_id).await;
            Response::Lists { token, result }
        }
        Command::FetchCards { token, list_id } => {
            let result = api.list_cards(&list_id).await;
            Response::Cards {
                token,
                list_id,
                result,
            }
        }
        Command::MoveCard {
            card_id,
            from,
            to,
            index,
        } => {
            let result = api.move_card(&card_id, &to).await;
            Response::CardMoved {
                card_id,
                from,
                to,
                index,
                result,
            }
        }
        Command::CreateCard {
            token,
            list_id,
            name,
        } => {
            let result = api.create_card(&list_id, &name).await;
            Response::CardCreated {
                token,
                list_id,
                result,
            }
        }
    }
}

/// Sending half of the response channel.
pub type ResponseSender = mpsc::UnboundedSender<Response>;

/// Receiving half of the response channel.
pub type ResponseReceiver = mpsc::UnboundedReceiver<Response>;

/// Creates the channel responses travel back on.
///
/// One channel outlives any number of dispatchers, so the API client can be
/// replaced (e.g. after new credentials) without losing in-flight results.
#[must_use]
pub fn response_channel() -> (ResponseSender, ResponseReceiver) {
    mpsc::unbounded_channel()
}

type BoxedResponse = Pin<Box<dyn Future<Output = Response> + Send>>;
type Runner = Arc<dyn Fn(Command) -> BoxedResponse + Send + Sync>;

/// Spawns commands as independent tasks. In-flight tasks are never
/// cancelled.
#[derive(Clone)]
pub struct Dispatcher {
    run: Runner,
    responses: ResponseSender,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("closed", &self.responses.is_closed())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Creates a dispatcher running commands against `api`.
    pub fn new<A: RemoteApi>(api: A, responses: ResponseSender) -> Self {
        let api = Arc::new(api);
        let run: Runner = Arc::new(move |command: Command| -> BoxedResponse {
            let api = Arc::clone(&api);
            Box::pin(async move { execute(api.as_ref(), command).await })
        });
        Self { run, responses }
    }

    /// Spawns every command. Must be called within a tokio runtime.
    pub fn dispatch(&self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            let span = debug_span!("command", name = command.name());
            let future = (self.run)(command);
            let responses = self.responses.clone();
            tokio::spawn(
                async move {
                    let response = future.await;
                    debug!(failed = response.is_err(), "command finished");
                    if responses.send(response).is_err() {
                        debug!("response dropped, receiver closed");
                    }
                }
                .instrument(span),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::command::SelectionToken;
    use uniwork_trello::Error;

    #[derive(Default)]
    struct FakeApi {
        calls: Mutex<Vec<String>>,
        fail_moves: bool,
    }

    impl FakeApi {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl RemoteApi for FakeApi {
        async fn list_boards(&self) -> Result<Vec<Board>> {
            self.record("boards".into());
            Ok(vec![Board::new("b1", "Work")])
        }

        async fn list_lists(&self, board_id: &str) -> Result<Vec<List>> {
            self.record(format!("lists {board_id}"));
            Ok(vec![List::new("l1", "Todo")])
        }

        async fn list_cards(&self, list_id: &str) -> Result<Vec<Card>> {
            self.record(format!("cards {list_id}"));
            Ok(vec![Card::new("c1", list_id, "Fix bug")])
        }

        async fn move_card(&self, card_id: &str, list_id: &str) -> Result<()> {
            self.record(format!("move {card_id} {list_id}"));
            if self.fail_moves {
                Err(Error::Status {
                    status: 503,
                    body: "unavailable".into(),
                })
            } else {
                Ok(())
            }
        }

        async fn create_card(&self, list_id: &str, name: &str) -> Result<Card> {
            self.record(format!("create {list_id} {name}"));
            Ok(Card::new("c2", list_id, name))
        }
    }

    fn token() -> SelectionToken {
        SelectionToken {
            board_id: "b1".into(),
            epoch: 3,
        }
    }

    #[tokio::test]
    async fn execute_echoes_context() {
        let api = FakeApi::default();

        let response = execute(
            &api,
            Command::FetchCards {
                token: token(),
                list_id: "l1".into(),
            },
        )
        .await;
        match response {
            Response::Cards {
                token: echoed,
                list_id,
                result,
            } => {
                assert_eq!(echoed, token());
                assert_eq!(list_id, "l1");
                assert_eq!(result.unwrap()[0].list_id, "l1");
            }
            other => panic!("unexpected response {other:?}"),
        }
    }

    #[tokio::test]
    async fn execute_move_targets_destination() {
        let api = FakeApi {
            fail_moves: true,
            ..Default::default()
        };
        let response = execute(
            &api,
            Command::MoveCard {
                card_id: "c1".into(),
                from: "l1".into(),
                to: "l2".into(),
                index: 4,
            },
        )
        .await;

        assert!(matches!(
            response,
            Response::CardMoved { index: 4, ref from, result: Err(_), .. } if from == "l1"
        ));
        assert_eq!(*api.calls.lock().unwrap(), ["move c1 l2"]);
    }

    #[tokio::test]
    async fn execute_create_card() {
        let api = FakeApi::default();
        let response = execute(
            &api,
            Command::CreateCard {
                token: token(),
                list_id: "l1".into(),
                name: "New Card".into(),
            },
        )
        .await;
        let Response::CardCreated { result, .. } = response else {
            panic!("unexpected response");
        };
        assert_eq!(result.unwrap(), Card::new("c2", "l1", "New Card"));
    }

    #[tokio::test]
    async fn dispatcher_sends_every_response() {
        let (tx, mut rx) = response_channel();
        let dispatcher = Dispatcher::new(FakeApi::default(), tx);

        dispatcher.dispatch([
            Command::FetchBoards { generation: 1 },
            Command::FetchLists { token: token() },
        ]);

        let mut generations = Vec::new();
        let mut lists = 0;
        for _ in 0..2 {
            match rx.recv().await.unwrap() {
                Response::Boards { generation, .. } => generations.push(generation),
                Response::Lists { .. } => lists += 1,
                other => panic!("unexpected response {other:?}"),
            }
        }
        assert_eq!(generations, [1]);
        assert_eq!(lists, 1);
    }

    #[tokio::test]
    async fn dispatch_after_receiver_dropped_does_not_panic() {
        let (tx, rx) = response_channel();
        drop(rx);
        let dispatcher = Dispatcher::new(FakeApi::default(), tx);
        dispatcher.dispatch([Command::FetchBoards { generation: 1 }]);
        tokio::task::yield_now().await;
        assert!(format!("{dispatcher:?}").contains("closed: true"));
    }
}
