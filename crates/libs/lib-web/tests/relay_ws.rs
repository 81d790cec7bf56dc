//! End-to-end relay test over real WebSocket connections.

use futures_util::{SinkExt, StreamExt};
use lib_core::Config;
use lib_web::{create_router, AppState};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

fn test_config() -> Config {
    Config {
        jwt_secret: "test-secret-key-must-be-at-least-32-characters-long!".to_string(),
        jwt_expiration_hours: 24,
        openai_api_key: None,
        ai_model: "test-model".to_string(),
        ai_timeout_secs: 5,
        ai_max_tokens: 500,
        ai_temperature: 0.7,
    }
}

async fn spawn_server() -> (SocketAddr, AppState) {
    let state = AppState::new(test_config());
    let app = create_router(state.clone(), &[]);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, state)
}

async fn connect(addr: SocketAddr) -> Client {
    let (client, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
    client
}

async fn wait_for_connections(state: &AppState, expected: usize) {
    for _ in 0..100 {
        if state.relay.connection_count().await == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("relay never reached {} connections", expected);
}

async fn next_text(client: &mut Client) -> Option<String> {
    match tokio::time::timeout(Duration::from_millis(300), client.next()).await {
        Ok(Some(Ok(msg))) => Some(msg.to_text().unwrap().to_string()),
        _ => None,
    }
}

#[tokio::test]
async fn test_chat_frame_reaches_every_other_client() {
    let (addr, state) = spawn_server().await;
    let mut a = connect(addr).await;
    let mut b = connect(addr).await;
    let mut c = connect(addr).await;
    wait_for_connections(&state, 3).await;

    let frame = r#"{"type":"chat_message","message":{"sessionId":"s1","senderId":"u1","message":"hello"}}"#;
    a.send(Message::text(frame)).await.unwrap();

    assert_eq!(next_text(&mut b).await.as_deref(), Some(frame));
    assert_eq!(next_text(&mut c).await.as_deref(), Some(frame));
    assert_eq!(next_text(&mut a).await, None);
}

#[tokio::test]
async fn test_malformed_frame_is_dropped_without_disconnect() {
    let (addr, state) = spawn_server().await;
    let mut a = connect(addr).await;
    let mut b = connect(addr).await;
    wait_for_connections(&state, 2).await;

    a.send(Message::text("this is not json")).await.unwrap();
    a.send(Message::text(r#"{"type":"typing"}"#)).await.unwrap();
    let frame = r#"{"type":"chat_message","message":{"message":"still here"}}"#;
    a.send(Message::text(frame)).await.unwrap();

    // b's first delivery is the valid chat frame
    assert_eq!(next_text(&mut b).await.as_deref(), Some(frame));
    assert_eq!(state.relay.connection_count().await, 2);
}

#[tokio::test]
async fn test_closed_client_is_unregistered() {
    let (addr, state) = spawn_server().await;
    let mut a = connect(addr).await;
    let mut b = connect(addr).await;
    wait_for_connections(&state, 2).await;

    b.close(None).await.unwrap();
    wait_for_connections(&state, 1).await;

    a.send(Message::text(r#"{"type":"chat_message","message":{}}"#)).await.unwrap();
    assert_eq!(next_text(&mut a).await, None);
}
