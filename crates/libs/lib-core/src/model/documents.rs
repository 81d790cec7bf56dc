//! # Document Store
//!
//! Narrow key/document contract for the external document database. The
//! application only needs `get` and `set` on `collection/key` paths (user
//! profiles live at `users/{uid}`).
//!
//! [`MemDocumentStore`] is the in-process implementation used by the server
//! and the tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::Result;

/// Collection holding user profile documents.
pub const USERS_COLLECTION: &str = "users";

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document. Missing documents are `Ok(None)`.
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>>;

    /// Create or replace a document.
    async fn set(&self, collection: &str, key: &str, doc: Value) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemDocumentStore {
    docs: RwLock<HashMap<(String, String), Value>>,
}

impl MemDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemDocumentStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>> {
        let docs = self.docs.read().await;
        Ok(docs.get(&(collection.to_string(), key.to_string())).cloned())
    }

    async fn set(&self, collection: &str, key: &str, doc: Value) -> Result<()> {
        tracing::debug!("[DOCS] set {}/{}", collection, key);
        self.docs
            .write()
            .await
            .insert((collection.to_string(), key.to_string()), doc);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemDocumentStore::new();
        store
            .set(USERS_COLLECTION, "uid-1", json!({"name": "Ada", "role": "doctor"}))
            .await
            .unwrap();

        let doc = store.get(USERS_COLLECTION, "uid-1").await.unwrap().unwrap();
        assert_eq!(doc["role"], "doctor");
        assert!(store.get(USERS_COLLECTION, "uid-2").await.unwrap().is_none());
        assert!(store.get("clinics", "uid-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_replaces() {
        let store = MemDocumentStore::new();
        store.set("users", "k", json!({"v": 1})).await.unwrap();
        store.set("users", "k", json!({"v": 2})).await.unwrap();
        assert_eq!(store.get("users", "k").await.unwrap().unwrap()["v"], 2);
    }
}
