//! Full-replace discipline over a batched document store.
//!
//! Each ingestion run clears the target collection and rewrites it from the
//! freshly aggregated records. Neither operation is transactional across
//! batches — a crash mid-run leaves the collection partially cleared or
//! partially written, and a wholesale re-run converges to the correct final
//! state.

use fairway_core::GroupedProduct;

use crate::store::DocumentStore;
use crate::StoreError;

/// Backend batch-size ceiling: the maximum number of documents combined
/// into one delete or write commit.
pub const BATCH_LIMIT: usize = 400;

/// Deletes every document in `collection` in bounded batches.
///
/// Runs fetch-delete-commit cycles of at most [`BATCH_LIMIT`] documents each
/// until a fetch comes back empty, so neither memory use nor call depth
/// grows with collection size. Returns the number of documents deleted.
///
/// # Errors
///
/// Returns [`StoreError`] if a fetch or delete commit fails; documents
/// deleted by earlier cycles stay deleted.
pub async fn clear_collection<S: DocumentStore>(
    store: &S,
    collection: &str,
) -> Result<u64, StoreError> {
    let mut deleted: u64 = 0;
    loop {
        let ids = store.fetch_page(collection, BATCH_LIMIT).await?;
        if ids.is_empty() {
            break;
        }
        store.delete_batch(collection, &ids).await?;
        deleted += ids.len() as u64;
    }
    tracing::info!(collection, deleted, "cleared collection");
    Ok(deleted)
}

/// Accumulating writer that flushes full batches of [`BATCH_LIMIT`] records.
///
/// Lets the orchestrator stream records from several queries through one
/// batch sequence: a batch may span query boundaries. Call
/// [`BatchWriter::finish`] to flush the final partial batch and get the
/// total written.
pub struct BatchWriter<'a, S: DocumentStore> {
    store: &'a S,
    collection: &'a str,
    buffer: Vec<serde_json::Value>,
    written: usize,
}

impl<'a, S: DocumentStore> BatchWriter<'a, S> {
    #[must_use]
    pub fn new(store: &'a S, collection: &'a str) -> Self {
        Self {
            store,
            collection,
            buffer: Vec::new(),
            written: 0,
        }
    }

    /// Buffers one record, flushing when the buffer reaches [`BATCH_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialize`] if the record cannot be serialized,
    /// or a storage error from the flush.
    pub async fn push(&mut self, record: &GroupedProduct) -> Result<(), StoreError> {
        self.buffer.push(serde_json::to_value(record)?);
        if self.buffer.len() >= BATCH_LIMIT {
            self.flush().await?;
        }
        Ok(())
    }

    /// Flushes the remaining partial batch and returns the total record count.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the final commit fails.
    pub async fn finish(mut self) -> Result<usize, StoreError> {
        self.flush().await?;
        Ok(self.written)
    }

    async fn flush(&mut self) -> Result<(), StoreError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        self.store
            .insert_batch(self.collection, &self.buffer)
            .await?;
        self.written += self.buffer.len();
        self.buffer.clear();
        Ok(())
    }
}

/// Writes all records into `collection` in bounded batches, assigning each
/// a fresh document identity. Returns the number of records written.
///
/// # Errors
///
/// Returns [`StoreError`] if serialization or any batch commit fails;
/// batches committed before the failure remain written.
pub async fn write_all<S: DocumentStore>(
    store: &S,
    collection: &str,
    records: &[GroupedProduct],
) -> Result<usize, StoreError> {
    let mut writer = BatchWriter::new(store, collection);
    for record in records {
        writer.push(record).await?;
    }
    writer.finish().await
}
