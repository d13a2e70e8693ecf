//! Orchestrates a full ingestion run: clear, fetch, aggregate, write.

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use fairway_serp::SerpClient;
use fairway_store::{clear_collection, BatchWriter, DocumentStore, StoreError};

use crate::aggregate::aggregate;

/// Errors that abort an ingestion run.
///
/// Only storage failures are fatal mid-run: a batch that cannot commit
/// leaves nothing sensible to continue with, and the whole run is safe to
/// retry wholesale. Per-query fetch failures are isolated and reported in
/// the [`RunSummary`] instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Totals for one ingestion run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub products: usize,
    pub offers: usize,
    /// Queries whose fetch failed; their contribution is zero.
    pub failed_queries: Vec<String>,
}

impl RunSummary {
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Ingestion complete. Saved {} products containing {} offers.",
            self.products, self.offers
        )
    }
}

/// Runs the full pipeline: clears the collection, then for each query
/// fetches, aggregates, and streams grouped products through one bounded
/// batch sequence.
///
/// Queries run strictly sequentially; a query's fetch failure is logged and
/// recorded in the summary while the remaining queries still execute. A
/// `clear` failure is fatal and aborts before any write.
///
/// # Errors
///
/// Returns [`PipelineError::Store`] if the initial clear or any batch
/// commit fails.
pub async fn run_ingest<S: DocumentStore>(
    client: &SerpClient,
    store: &S,
    collection: &str,
    page_count: u32,
    currency: &str,
    queries: &[String],
) -> Result<RunSummary, PipelineError> {
    clear_collection(store, collection).await?;

    let mut writer = BatchWriter::new(store, collection);
    let mut products: usize = 0;
    let mut offers: usize = 0;
    let mut failed_queries: Vec<String> = Vec::new();

    for query in queries {
        let now = Utc::now();
        let results = match client.fetch_all(query, page_count).await {
            Ok(results) => results,
            Err(e) => {
                tracing::error!(query = %query, error = %e, "query fetch failed — skipping");
                failed_queries.push(query.clone());
                continue;
            }
        };

        let grouped = aggregate(&results, query, currency, now);
        tracing::info!(
            query = %query,
            raw = results.len(),
            products = grouped.len(),
            "aggregated query results"
        );

        for product in &grouped {
            offers += product.offer_count();
            writer.push(product).await?;
            products += 1;
        }
    }

    let written = writer.finish().await?;
    debug_assert_eq!(written, products);

    tracing::info!(products, offers, "ingestion run complete");
    Ok(RunSummary {
        products,
        offers,
        failed_queries,
    })
}
