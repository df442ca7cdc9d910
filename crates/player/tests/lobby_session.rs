//! End-to-end session against a loopback lobby server.

#![cfg(not(target_arch = "wasm32"))]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_tungstenite::{accept_async, tungstenite::Message};

use vimera_player::{
    BootstrapStrategy, ConnectionBootstrap, EndpointTable, HandlerTable, LobbyClient,
    MatchDefaults, MessageListener, PageLocation,
};

const PAGE_HOST: &str = "localhost:8000";

/// Accepts one connection, records text frames from the client, sends `replies`
/// and closes.
async fn spawn_lobby(replies: Vec<&'static str>) -> (String, oneshot::Receiver<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        let mut received = Vec::new();

        // the bootstrap request, if any, arrives before the client reads anything
        if let Ok(Some(Ok(Message::Text(text)))) =
            tokio::time::timeout(Duration::from_millis(500), ws.next()).await
        {
            received.push(text);
        }

        for reply in replies {
            ws.send(Message::Text(reply.to_string())).await.unwrap();
        }
        let _ = ws.close(None).await;

        while let Some(Ok(frame)) = ws.next().await {
            if let Message::Text(text) = frame {
                received.push(text);
            }
        }

        let _ = tx.send(received);
    });

    (format!("ws://{addr}/"), rx)
}

fn recording_handlers() -> (HandlerTable, Rc<RefCell<Vec<String>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_clone = Rc::clone(&seen);
    let table = HandlerTable::new().fallback(move |message| {
        seen_clone
            .borrow_mut()
            .push(message.message_type().unwrap_or_default().to_string());
    });
    (table, seen)
}

fn client_for(endpoint: &str, page_url: &str, handlers: HandlerTable) -> LobbyClient {
    let page = PageLocation::parse(page_url).unwrap();
    let endpoint = EndpointTable::empty()
        .with_entry(PAGE_HOST, endpoint)
        .unwrap()
        .resolve(page.host())
        .unwrap();
    let bootstrap = ConnectionBootstrap::new(
        BootstrapStrategy::LobbyIntent(MatchDefaults::default()),
        page,
    );
    LobbyClient::new(endpoint, bootstrap, MessageListener::new(handlers))
}

#[tokio::test]
async fn test_join_session_sends_one_request_and_dispatches_replies() {
    let (endpoint, received) = spawn_lobby(vec![
        "not-json",
        r#"{"type": "response", "id": "x", "result": {}}"#,
        r#"{"type": "notification", "scope": "match", "event": "start", "data": {}}"#,
    ])
    .await;
    let (handlers, seen) = recording_handlers();

    client_for(&endpoint, "http://localhost:8000/?join=M1", handlers)
        .run()
        .await
        .unwrap();

    let received = received.await.unwrap();
    assert_eq!(received.len(), 1);
    let request: serde_json::Value = serde_json::from_str(&received[0]).unwrap();
    assert_eq!(request["type"], "request");
    assert_eq!(request["operation"], "join-match");
    assert_eq!(request["params"]["match-id"], "M1");
    assert_eq!(request["params"]["player-name"], "player2");
    assert!(request["id"]
        .as_str()
        .unwrap()
        .starts_with("localhost-8000-"));

    // the malformed frame was dropped; the rest were dispatched in order
    assert_eq!(*seen.borrow(), vec!["response", "notification"]);
}

#[tokio::test]
async fn test_ambiguous_page_sends_nothing_but_keeps_listening() {
    let (endpoint, received) =
        spawn_lobby(vec![r#"{"type": "response", "id": "x", "result": {}}"#]).await;
    let (handlers, seen) = recording_handlers();

    client_for(
        &endpoint,
        "http://localhost:8000/?join=M1&spectate=M2",
        handlers,
    )
    .run()
    .await
    .unwrap();

    assert!(received.await.unwrap().is_empty());
    assert_eq!(*seen.borrow(), vec!["response"]);
}

#[tokio::test]
async fn test_unreachable_lobby_is_an_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (handlers, _seen) = recording_handlers();
    let result = client_for(&format!("ws://{addr}/"), "http://localhost:8000/", handlers)
        .run()
        .await;

    assert!(result.is_err());
}
