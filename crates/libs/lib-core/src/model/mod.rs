//! # Model Layer
//!
//! Entity definitions, the in-memory [`RecordStore`](store::RecordStore) and
//! the key/document store used for user profiles.

// region: --- Modules
pub mod documents;
pub mod store;
// endregion: --- Modules
