//! End-to-end tests of the client against a local HTTP server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::{Value, json};
use uniwork_protocol::Card;
use uniwork_trello::{Error, TrelloClient};

type Log = Arc<Mutex<Vec<String>>>;
type Reply = Result<Json<Value>, (StatusCode, &'static str)>;

fn check_auth(query: &HashMap<String, String>) -> Result<(), (StatusCode, &'static str)> {
    let key = query.get("key").map(String::as_str);
    let token = query.get("token").map(String::as_str);
    if key == Some("test-key") && token == Some("test-token") {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid key"))
    }
}

async fn boards(Query(query): Query<HashMap<String, String>>) -> Reply {
    check_auth(&query)?;
    Ok(Json(json!([
        {"id": "b1", "name": "Work", "closed": false},
        {"id": "b2", "name": "Archive", "closed": true}
    ])))
}

async fn lists(
    Path(board_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    check_auth(&query)?;
    match board_id.as_str() {
        "b1" => Ok(Json(json!([
            {"id": "l1", "name": "Todo", "closed": false, "pos": 1},
            {"id": "l2", "name": "Done", "closed": false, "pos": 2}
        ]))),
        _ => Err((StatusCode::NOT_FOUND, "The requested resource was not found.")),
    }
}

async fn cards(
    Path(list_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    check_auth(&query)?;
    match list_id.as_str() {
        "l1" => Ok(Json(json!([
            {"id": "c1", "idList": "l1", "name": "Fix bug"},
            {"id": "c2", "idList": "l1", "name": "Write docs"}
        ]))),
        _ => Ok(Json(json!([]))),
    }
}

async fn move_card(
    State(log): State<Log>,
    Path(card_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    check_auth(&query)?;
    let list_id = query.get("idList").cloned().unwrap_or_default();
    log.lock()
        .unwrap()
        .push(format!("PUT {card_id} idList={list_id}"));
    Ok(Json(json!({"id": card_id, "idList": list_id, "name": "Fix bug"})))
}

async fn create_card(
    State(log): State<Log>,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    check_auth(&query)?;
    let list_id = query.get("idList").cloned().unwrap_or_default();
    let name = query.get("name").cloned().unwrap_or_default();
    log.lock()
        .unwrap()
        .push(format!("POST idList={list_id} name={name}"));
    Ok(Json(json!({"id": "c9", "idList": list_id, "name": name})))
}

async fn spawn_server() -> (String, Log) {
    let log = Log::default();
    let router = Router::new()
        .route("/members/me/boards", get(boards))
        .route("/boards/{board_id}/lists", get(lists))
        .route("/lists/{list_id}/cards", get(cards))
        .route("/cards/{card_id}", put(move_card))
        .route("/cards", axum::routing::post(create_card))
        .with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}"), log)
}

fn client(base_url: &str, token: &str) -> TrelloClient {
    TrelloClient::with_base_url(
        SecretString::from("test-key".to_string()),
        SecretString::from(token.to_string()),
        base_url,
    )
    .unwrap()
}

#[tokio::test]
async fn fetches_boards_lists_and_cards() {
    let (base_url, _) = spawn_server().await;
    let client = client(&base_url, "test-token");

    let boards = client.list_boards().await.unwrap();
    assert_eq!(boards.len(), 2);
    assert!(boards[0].is_open());
    assert!(!boards[1].is_open());

    let lists = client.list_lists("b1").await.unwrap();
    let names: Vec<_> = lists.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["Todo", "Done"]);

    let cards = client.list_cards("l1").await.unwrap();
    assert_eq!(cards[0], Card::new("c1", "l1", "Fix bug"));
    assert!(client.list_cards("l2").await.unwrap().is_empty());
}

#[tokio::test]
async fn move_card_sends_put_with_destination() {
    let (base_url, log) = spawn_server().await;
    let client = client(&base_url, "test-token");

    client.move_card("c1", "l2").await.unwrap();
    assert_eq!(*log.lock().unwrap(), ["PUT c1 idList=l2"]);
}

#[tokio::test]
async fn create_card_returns_created_record() {
    let (base_url, log) = spawn_server().await;
    let client = client(&base_url, "test-token");

    let card = client.create_card("l1", "New Card").await.unwrap();
    assert_eq!(card, Card::new("c9", "l1", "New Card"));
    assert_eq!(*log.lock().unwrap(), ["POST idList=l1 name=New Card"]);
}

#[tokio::test]
async fn rejected_token_is_status_error() {
    let (base_url, _) = spawn_server().await;
    let client = client(&base_url, "wrong-token");

    let err = client.list_boards().await.unwrap_err();
    match err {
        Error::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid key");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_board_is_status_error() {
    let (base_url, _) = spawn_server().await;
    let client = client(&base_url, "test-token");

    let err = client.list_lists("missing").await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 404, .. }));
    assert!(err.is_transport());
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(&format!("http://{addr}"), "test-token");
    let err = client.list_boards().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
