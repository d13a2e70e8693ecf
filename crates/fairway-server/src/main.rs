mod api;
mod scheduler;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use fairway_serp::{SearchSettings, SerpClient};

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(fairway_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = fairway_store::PoolConfig::from_app_config(&config);
    let pool = fairway_store::connect_pool(&config.database_url, pool_config).await?;
    fairway_store::run_migrations(&pool).await?;

    // One SerpAPI client for the process, passed explicitly to whoever runs
    // the pipeline.
    let client = Arc::new(SerpClient::new(
        &config.serpapi_key,
        config.serp_request_timeout_secs,
        SearchSettings {
            country: config.country.clone(),
            language: config.language.clone(),
            page_size: config.page_size,
        },
        config.serp_max_retries,
        config.serp_retry_backoff_base_ms,
    )?);

    let state = AppState {
        pool,
        config: Arc::clone(&config),
        client,
    };

    let _scheduler = scheduler::build_scheduler(state.clone()).await?;

    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "fairway-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
