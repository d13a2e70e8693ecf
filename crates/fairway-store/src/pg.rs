//! Postgres-backed document store.
//!
//! Documents live in a single `documents` table keyed by `(collection, id)`
//! with a `jsonb` payload. The bigserial `id` provides both the stable
//! ordering key for paged reads and the fresh identity assigned on insert.

use sqlx::PgPool;

use crate::store::{DocumentId, DocumentStore};
use crate::StoreError;

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl DocumentStore for PgDocumentStore {
    async fn fetch_page(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Vec<DocumentId>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM documents WHERE collection = $1 ORDER BY id LIMIT $2",
        )
        .bind(collection)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn delete_batch(&self, collection: &str, ids: &[DocumentId]) -> Result<(), StoreError> {
        // A single DELETE statement commits atomically; no explicit
        // transaction needed for one batch.
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = ANY($2)")
            .bind(collection)
            .bind(ids)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn insert_batch(
        &self,
        collection: &str,
        docs: &[serde_json::Value],
    ) -> Result<(), StoreError> {
        // One multi-row INSERT per batch: the jsonb array is unnested
        // server-side so the whole batch commits atomically and each row
        // gets a fresh bigserial id.
        let payload = serde_json::Value::Array(docs.to_vec());
        sqlx::query(
            "INSERT INTO documents (collection, payload) \
             SELECT $1, value FROM jsonb_array_elements($2::jsonb)",
        )
        .bind(collection)
        .bind(payload)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
