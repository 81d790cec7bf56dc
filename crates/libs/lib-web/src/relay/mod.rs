//! # Real-Time Relay
//!
//! WebSocket fan-out of `chat_message` frames between connected clients.

pub mod frame;
pub mod hub;
pub mod websocket;

pub use frame::{classify, FrameError, FrameKind, CHAT_MESSAGE};
pub use hub::{ConnectionId, Dispatch, Relay, RelayEvent, RELAY_BUFFER};
pub use websocket::relay_websocket;
