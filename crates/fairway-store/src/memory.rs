//! In-memory document store for tests and local development.
//!
//! Mirrors the Postgres implementation's semantics: insertion-ordered ids,
//! one commit per batch call. Commit counters let tests assert the exact
//! batch accounting of the replacer.

use std::collections::{BTreeMap, HashMap};

use tokio::sync::Mutex;

use crate::store::{DocumentId, DocumentStore};
use crate::StoreError;

#[derive(Default)]
struct Inner {
    collections: HashMap<String, BTreeMap<DocumentId, serde_json::Value>>,
    next_id: DocumentId,
    delete_commits: usize,
    insert_commits: usize,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `count` placeholder documents, for clear-path tests.
    pub async fn seed(&self, collection: &str, count: usize) {
        let mut inner = self.inner.lock().await;
        for _ in 0..count {
            inner.next_id += 1;
            let id = inner.next_id;
            inner
                .collections
                .entry(collection.to_string())
                .or_default()
                .insert(id, serde_json::json!({"seed": true}));
        }
    }

    pub async fn len(&self, collection: &str) -> usize {
        let inner = self.inner.lock().await;
        inner.collections.get(collection).map_or(0, BTreeMap::len)
    }

    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }

    /// Returns all documents in `collection` in id order.
    pub async fn documents(&self, collection: &str) -> Vec<serde_json::Value> {
        let inner = self.inner.lock().await;
        inner
            .collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of `delete_batch` commits issued so far.
    pub async fn delete_commits(&self) -> usize {
        self.inner.lock().await.delete_commits
    }

    /// Number of `insert_batch` commits issued so far.
    pub async fn insert_commits(&self) -> usize {
        self.inner.lock().await.insert_commits
    }
}

impl DocumentStore for MemoryStore {
    async fn fetch_page(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Vec<DocumentId>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .collections
            .get(collection)
            .map(|docs| docs.keys().take(limit).copied().collect())
            .unwrap_or_default())
    }

    async fn delete_batch(&self, collection: &str, ids: &[DocumentId]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if let Some(docs) = inner.collections.get_mut(collection) {
            for id in ids {
                docs.remove(id);
            }
        }
        inner.delete_commits += 1;
        Ok(())
    }

    async fn insert_batch(
        &self,
        collection: &str,
        docs: &[serde_json::Value],
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        for doc in docs {
            let id = {
                inner.next_id += 1;
                inner.next_id
            };
            inner
                .collections
                .entry(collection.to_string())
                .or_default()
                .insert(id, doc.clone());
        }
        inner.insert_commits += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seed_and_fetch_page_preserve_id_order() {
        let store = MemoryStore::new();
        store.seed("offers", 5).await;

        let ids = store.fetch_page("offers", 3).await.unwrap();
        assert_eq!(ids.len(), 3);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn insert_assigns_fresh_ids() {
        let store = MemoryStore::new();
        let docs = vec![serde_json::json!({"a": 1}), serde_json::json!({"a": 2})];
        store.insert_batch("offers", &docs).await.unwrap();
        store.insert_batch("offers", &docs).await.unwrap();

        assert_eq!(store.len("offers").await, 4);
        assert_eq!(store.insert_commits().await, 2);
    }

    #[tokio::test]
    async fn delete_batch_removes_documents() {
        let store = MemoryStore::new();
        store.seed("offers", 4).await;
        let ids = store.fetch_page("offers", 2).await.unwrap();
        store.delete_batch("offers", &ids).await.unwrap();

        assert_eq!(store.len("offers").await, 2);
        assert_eq!(store.delete_commits().await, 1);
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = MemoryStore::new();
        store.seed("offers", 2).await;
        store.seed("archive", 1).await;

        assert_eq!(store.len("offers").await, 2);
        assert_eq!(store.len("archive").await, 1);
        assert!(store.is_empty("missing").await);
    }
}
