use axum::{extract::State, Json};
use serde::Serialize;

use fairway_ingest::RunSummary;
use fairway_store::PgDocumentStore;

use super::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub(super) struct IngestResponse {
    products: usize,
    offers: usize,
    failed_queries: Vec<String>,
    message: String,
}

/// Runs the full ingestion pipeline for the configured query list.
///
/// Shared between the HTTP trigger and the cron scheduler.
///
/// # Errors
///
/// Returns an error if the query list cannot be loaded or the pipeline
/// aborts on a storage failure.
pub async fn run_ingest_for_state(state: &AppState) -> anyhow::Result<RunSummary> {
    let queries = fairway_core::load_queries(&state.config.queries_path)?;
    let store = PgDocumentStore::new(state.pool.clone());

    let summary = fairway_ingest::run_ingest(
        &state.client,
        &store,
        &state.config.collection,
        state.config.page_count,
        &state.config.currency,
        &queries.queries,
    )
    .await?;

    Ok(summary)
}

/// `POST /api/v1/runs/ingest` — manual pipeline trigger.
pub(super) async fn trigger_ingest(
    State(state): State<AppState>,
) -> Result<Json<IngestResponse>, ApiError> {
    let summary = run_ingest_for_state(&state).await.map_err(|e| {
        tracing::error!(error = %e, "ingestion run failed");
        ApiError::new("internal_error", format!("ingestion run failed: {e}"))
    })?;

    let message = summary.message();
    Ok(Json(IngestResponse {
        products: summary.products,
        offers: summary.offers,
        failed_queries: summary.failed_queries,
        message,
    }))
}
