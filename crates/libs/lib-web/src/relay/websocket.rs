//! # Relay WebSocket Endpoint
//!
//! `GET /ws` upgrades to a relay connection. Text frames from the client are
//! handed to the [`Relay`]; frames other clients relay are written back out.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::hub::{Relay, RelayEvent, RELAY_BUFFER};

/// Upgrade handler for the relay.
///
/// **Route**: `GET /ws`
///
/// ```javascript
/// const ws = new WebSocket('ws://localhost:5000/ws');
/// ws.send(JSON.stringify({ type: 'chat_message', message: { sessionId, message: 'hi' } }));
/// ```
pub async fn relay_websocket(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    State(relay): State<Arc<Relay>>,
) -> Response {
    let conn_id = Uuid::new_v4();
    let client_ip = headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    debug!(conn_id = %conn_id, client_ip = ?client_ip, "[WS] CONNECT_ATTEMPT conn_id={}", conn_id);

    ws.on_upgrade(move |socket| handle_relay_socket(socket, relay, conn_id, client_ip))
}

async fn handle_relay_socket(
    socket: WebSocket,
    relay: Arc<Relay>,
    conn_id: Uuid,
    client_ip: Option<String>,
) {
    let (mut sender, mut receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::channel::<String>(RELAY_BUFFER);
    let connection_start = Instant::now();
    let messages_sent = Arc::new(AtomicU64::new(0));
    let messages_received = Arc::new(AtomicU64::new(0));

    relay.dispatch(conn_id, RelayEvent::Connected(outbound_tx)).await;
    info!(
        conn_id = %conn_id,
        client_ip = ?client_ip,
        "[WS] CONNECTED conn_id={} ip={:?}",
        conn_id,
        client_ip
    );

    // Frames relayed from other connections
    let sent = Arc::clone(&messages_sent);
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if let Err(e) = sender.send(Message::Text(frame.into())).await {
                warn!(
                    conn_id = %conn_id,
                    error = %e,
                    "[WS] SEND_ERROR conn_id={} error={}",
                    conn_id,
                    e
                );
                break;
            }
            sent.fetch_add(1, Ordering::Relaxed);
        }
    });

    let received = Arc::clone(&messages_received);
    let relay_recv = Arc::clone(&relay);
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    received.fetch_add(1, Ordering::Relaxed);
                    let outcome = relay_recv
                        .dispatch(conn_id, RelayEvent::Message(text.as_str().to_owned()))
                        .await;
                    debug!(conn_id = %conn_id, ?outcome, "[WS] MESSAGE_RECEIVED conn_id={}", conn_id);
                }
                Ok(Message::Binary(data)) => {
                    received.fetch_add(1, Ordering::Relaxed);
                    match String::from_utf8(data.to_vec()) {
                        Ok(text) => {
                            relay_recv.dispatch(conn_id, RelayEvent::Message(text)).await;
                        }
                        Err(_) => warn!(
                            conn_id = %conn_id,
                            size = data.len(),
                            "[WS] BINARY_DROPPED conn_id={} size={} (not UTF-8)",
                            conn_id,
                            data.len()
                        ),
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!(conn_id = %conn_id, "[WS] CLOSE_RECEIVED conn_id={}", conn_id);
                    break;
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
                Err(e) => {
                    error!(
                        conn_id = %conn_id,
                        error = %e,
                        "[WS] RECV_ERROR conn_id={} error={}",
                        conn_id,
                        e
                    );
                    break;
                }
            }
        }
    });

    tokio::select! {
        result = &mut send_task => {
            recv_task.abort();
            if let Err(e) = result {
                error!(conn_id = %conn_id, error = ?e, "[WS] SEND_TASK_ERROR conn_id={}", conn_id);
            }
        }
        result = &mut recv_task => {
            send_task.abort();
            if let Err(e) = result {
                error!(conn_id = %conn_id, error = ?e, "[WS] RECV_TASK_ERROR conn_id={}", conn_id);
            }
        }
    }

    relay.dispatch(conn_id, RelayEvent::Disconnected).await;

    let duration = connection_start.elapsed();
    info!(
        conn_id = %conn_id,
        duration_ms = duration.as_millis(),
        messages_sent = messages_sent.load(Ordering::Relaxed),
        messages_received = messages_received.load(Ordering::Relaxed),
        "[WS] DISCONNECTED conn_id={} duration={:.2}s",
        conn_id,
        duration.as_secs_f64()
    );
}
