//! `fairway-cli ingest` — one manual ingestion run.

use fairway_core::AppConfig;
use fairway_serp::{SearchSettings, SerpClient};
use fairway_store::PgDocumentStore;

/// Runs the pipeline once, using `query_overrides` instead of the configured
/// query list when any are given.
///
/// # Errors
///
/// Returns an error on configuration, connection, or pipeline failure.
pub async fn run(config: &AppConfig, query_overrides: Vec<String>) -> anyhow::Result<()> {
    let queries = if query_overrides.is_empty() {
        fairway_core::load_queries(&config.queries_path)?.queries
    } else {
        query_overrides
    };

    let pool_config = fairway_store::PoolConfig::from_app_config(config);
    let pool = fairway_store::connect_pool(&config.database_url, pool_config).await?;
    fairway_store::run_migrations(&pool).await?;
    let store = PgDocumentStore::new(pool);

    let client = SerpClient::new(
        &config.serpapi_key,
        config.serp_request_timeout_secs,
        SearchSettings {
            country: config.country.clone(),
            language: config.language.clone(),
            page_size: config.page_size,
        },
        config.serp_max_retries,
        config.serp_retry_backoff_base_ms,
    )?;

    tracing::info!(queries = queries.len(), collection = %config.collection, "starting ingestion run");
    let summary = fairway_ingest::run_ingest(
        &client,
        &store,
        &config.collection,
        config.page_count,
        &config.currency,
        &queries,
    )
    .await?;

    if !summary.failed_queries.is_empty() {
        tracing::warn!(
            failed = summary.failed_queries.len(),
            queries = ?summary.failed_queries,
            "some queries failed during ingestion"
        );
    }
    println!("{}", summary.message());
    Ok(())
}
