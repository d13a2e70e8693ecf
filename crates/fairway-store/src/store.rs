use crate::StoreError;

/// Stable document identity assigned by the backend on insert.
pub type DocumentId = i64;

/// A batched document store.
///
/// Callers must keep every batch at or under the backend's batch-size
/// ceiling ([`crate::BATCH_LIMIT`]); implementations commit each call as one
/// atomic unit but make no guarantee across calls.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    /// Returns up to `limit` document ids from `collection`, ordered by the
    /// stable identity key. An empty result means the collection is empty.
    async fn fetch_page(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Vec<DocumentId>, StoreError>;

    /// Deletes the given documents from `collection` in one commit.
    async fn delete_batch(&self, collection: &str, ids: &[DocumentId]) -> Result<(), StoreError>;

    /// Inserts the given documents into `collection` in one commit, assigning
    /// each a fresh identity.
    async fn insert_batch(
        &self,
        collection: &str,
        docs: &[serde_json::Value],
    ) -> Result<(), StoreError>;
}
