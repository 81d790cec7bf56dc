//! # Core Library
//!
//! Core models, the in-memory record store, request DTOs, configuration and
//! the application-wide error type.

pub mod config;
pub mod error;
pub mod model;
pub mod dto;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use model::documents::{DocumentStore, MemDocumentStore};
pub use model::store::RecordStore;
