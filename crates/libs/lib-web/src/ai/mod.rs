//! # AI Assistant
//!
//! Completion-provider seam and the chat gateway built on it.

// region: --- Modules
pub mod gateway;
pub mod provider;
// endregion: --- Modules

// region: --- Re-exports
pub use gateway::{AiError, AiGateway, GatewaySettings, HISTORY_LIMIT};
pub use provider::{CompletionProvider, CompletionRequest, DisabledProvider, GenaiProvider, PromptMessage, PromptRole};
// endregion: --- Re-exports
