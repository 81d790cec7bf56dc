//! # Web Library
//!
//! HTTP boundary, real-time relay and AI gateway of the clinic backend.
//!
//! - **[`handlers`]**: one module per entity group
//! - **[`extract`]**: schema-checked JSON bodies
//! - **[`middleware`]**: auth, request ids, logging, error mapping
//! - **[`relay`]**: WebSocket fan-out of chat frames
//! - **[`ai`]**: completion provider seam and the chat gateway
//! - **[`server`]**: state, router and startup

pub mod ai;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod relay;
pub mod server;

pub use server::{create_router, start_server, AppState, ServerConfig};
