//! # Relay Hub
//!
//! Registry of open connections and the single dispatch point for their
//! events. One mutex covers registration, removal and fan-out, so every
//! recipient sees broadcasts in the order the hub received them and a closed
//! connection never receives anything after its removal.
//!
//! Delivery is at-most-once: a recipient whose outbound channel is already
//! gone, or whose queue already holds [`RELAY_BUFFER`] undelivered frames, is
//! skipped without retry.

use std::collections::HashMap;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::frame::{classify, FrameKind};

pub type ConnectionId = Uuid;

/// Frames queued per connection before further frames to it are dropped
pub const RELAY_BUFFER: usize = 256;

/// Outbound half of a connection: frames written here go to the client.
pub type Outbound = mpsc::Sender<String>;

#[derive(Debug)]
pub enum RelayEvent {
    Connected(Outbound),
    Message(String),
    Disconnected,
}

/// What the hub did with one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Registered,
    /// Chat frame delivered to this many other connections
    Relayed(usize),
    /// Well-formed frame of an unhandled type
    Ignored(String),
    /// Malformed frame, logged and discarded
    Dropped,
    Removed,
}

#[derive(Debug, Default)]
pub struct Relay {
    connections: Mutex<HashMap<ConnectionId, Outbound>>,
}

impl Relay {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn dispatch(&self, conn: ConnectionId, event: RelayEvent) -> Dispatch {
        match event {
            RelayEvent::Connected(outbound) => {
                let mut connections = self.connections.lock().await;
                connections.insert(conn, outbound);
                info!("[RELAY] registered conn={} open={}", conn, connections.len());
                Dispatch::Registered
            }
            RelayEvent::Message(payload) => self.on_message(conn, payload).await,
            RelayEvent::Disconnected => {
                let mut connections = self.connections.lock().await;
                connections.remove(&conn);
                info!("[RELAY] removed conn={} open={}", conn, connections.len());
                Dispatch::Removed
            }
        }
    }

    async fn on_message(&self, from: ConnectionId, payload: String) -> Dispatch {
        match classify(&payload) {
            Ok(FrameKind::Chat) => {
                let connections = self.connections.lock().await;
                let mut delivered = 0;
                for (id, outbound) in connections.iter().filter(|(id, _)| **id != from) {
                    match outbound.try_send(payload.clone()) {
                        Ok(()) => delivered += 1,
                        Err(TrySendError::Full(_)) => {
                            warn!("[RELAY] outbound queue full, skipping conn={}", id);
                        }
                        Err(TrySendError::Closed(_)) => {
                            debug!("[RELAY] outbound closed, skipping conn={}", id);
                        }
                    }
                }
                debug!("[RELAY] chat_message from={} delivered={}", from, delivered);
                Dispatch::Relayed(delivered)
            }
            Ok(FrameKind::Other(kind)) => {
                debug!("[RELAY] ignoring frame type={} from={}", kind, from);
                Dispatch::Ignored(kind)
            }
            Err(e) => {
                warn!("[RELAY] dropping malformed frame from={}: {}", from, e);
                Dispatch::Dropped
            }
        }
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::{error::TryRecvError, Receiver};

    async fn connect(relay: &Relay) -> (ConnectionId, Receiver<String>) {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::channel(RELAY_BUFFER);
        assert_eq!(relay.dispatch(id, RelayEvent::Connected(tx)).await, Dispatch::Registered);
        (id, rx)
    }

    const CHAT: &str = r#"{"type":"chat_message","message":{"senderId":"u1","message":"hello"}}"#;

    #[tokio::test]
    async fn test_chat_fans_out_to_others_only() {
        let relay = Relay::new();
        let (a, mut rx_a) = connect(&relay).await;
        let (_b, mut rx_b) = connect(&relay).await;
        let (_c, mut rx_c) = connect(&relay).await;

        let outcome = relay.dispatch(a, RelayEvent::Message(CHAT.to_string())).await;
        assert_eq!(outcome, Dispatch::Relayed(2));

        assert_eq!(rx_b.try_recv().unwrap(), CHAT);
        assert_eq!(rx_c.try_recv().unwrap(), CHAT);
        assert_eq!(rx_a.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn test_malformed_frame_dropped_connection_kept() {
        let relay = Relay::new();
        let (a, _rx_a) = connect(&relay).await;
        let (_b, mut rx_b) = connect(&relay).await;

        let outcome = relay.dispatch(a, RelayEvent::Message("{oops".to_string())).await;
        assert_eq!(outcome, Dispatch::Dropped);
        assert_eq!(rx_b.try_recv(), Err(TryRecvError::Empty));
        assert_eq!(relay.connection_count().await, 2);

        // still usable afterwards
        assert_eq!(
            relay.dispatch(a, RelayEvent::Message(CHAT.to_string())).await,
            Dispatch::Relayed(1)
        );
    }

    #[tokio::test]
    async fn test_other_types_ignored() {
        let relay = Relay::new();
        let (a, _rx_a) = connect(&relay).await;
        let (_b, mut rx_b) = connect(&relay).await;

        let outcome = relay
            .dispatch(a, RelayEvent::Message(r#"{"type":"typing"}"#.to_string()))
            .await;
        assert_eq!(outcome, Dispatch::Ignored("typing".into()));
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_removed_connection_gets_nothing() {
        let relay = Relay::new();
        let (a, _rx_a) = connect(&relay).await;
        let (b, mut rx_b) = connect(&relay).await;

        assert_eq!(relay.dispatch(b, RelayEvent::Disconnected).await, Dispatch::Removed);
        assert_eq!(
            relay.dispatch(a, RelayEvent::Message(CHAT.to_string())).await,
            Dispatch::Relayed(0)
        );
        assert!(rx_b.try_recv().is_err());
        assert_eq!(relay.connection_count().await, 1);
    }

    #[tokio::test]
    async fn test_closed_receiver_is_skipped() {
        let relay = Relay::new();
        let (a, _rx_a) = connect(&relay).await;
        let (_b, rx_b) = connect(&relay).await;
        let (_c, mut rx_c) = connect(&relay).await;
        drop(rx_b);

        assert_eq!(
            relay.dispatch(a, RelayEvent::Message(CHAT.to_string())).await,
            Dispatch::Relayed(1)
        );
        assert_eq!(rx_c.try_recv().unwrap(), CHAT);
    }

    #[tokio::test]
    async fn test_order_preserved_per_recipient() {
        let relay = Relay::new();
        let (a, _rx_a) = connect(&relay).await;
        let (b, mut rx_b) = connect(&relay).await;
        let (_c, mut rx_c) = connect(&relay).await;

        let frames: Vec<String> = (0..5)
            .map(|i| format!(r#"{{"type":"chat_message","seq":{}}}"#, i))
            .collect();
        for (i, frame) in frames.iter().enumerate() {
            let from = if i % 2 == 0 { a } else { b };
            relay.dispatch(from, RelayEvent::Message(frame.clone())).await;
        }

        let mut seen_c = Vec::new();
        while let Ok(frame) = rx_c.try_recv() {
            seen_c.push(frame);
        }
        assert_eq!(seen_c, frames);

        // b only sees what a sent, in order
        let mut seen_b = Vec::new();
        while let Ok(frame) = rx_b.try_recv() {
            seen_b.push(frame);
        }
        assert_eq!(seen_b, vec![frames[0].clone(), frames[2].clone(), frames[4].clone()]);
    }

    #[tokio::test]
    async fn test_stalled_recipient_capped_others_still_served() {
        let relay = Relay::new();
        let (a, _rx_a) = connect(&relay).await;
        let (_stalled, mut rx_stalled) = connect(&relay).await;
        let (_c, mut rx_c) = connect(&relay).await;

        // Fill the stalled queue while c keeps draining
        for _ in 0..RELAY_BUFFER {
            relay.dispatch(a, RelayEvent::Message(CHAT.to_string())).await;
            assert_eq!(rx_c.try_recv().unwrap(), CHAT);
        }

        let outcome = relay.dispatch(a, RelayEvent::Message(CHAT.to_string())).await;
        assert_eq!(outcome, Dispatch::Relayed(1));
        assert_eq!(rx_c.try_recv().unwrap(), CHAT);

        let mut queued = 0;
        while rx_stalled.try_recv().is_ok() {
            queued += 1;
        }
        assert_eq!(queued, RELAY_BUFFER);
        assert_eq!(relay.connection_count().await, 3);
    }
}
