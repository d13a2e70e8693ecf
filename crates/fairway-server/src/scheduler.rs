//! Background job scheduler.
//!
//! When `FAIRWAY_SCHEDULE` is set, registers a cron job that runs the full
//! ingestion pipeline. Job failures are logged and never crash the process;
//! the next tick retries wholesale.

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::api::{run_ingest_for_state, AppState};

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process. Dropping it shuts down all scheduled jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the cron expression is invalid, or the scheduler fails to start.
pub async fn build_scheduler(state: AppState) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    if let Some(schedule) = state.config.schedule.clone() {
        tracing::info!(schedule = %schedule, "registering scheduled ingestion job");
        let job = Job::new_async(schedule.as_str(), move |_uuid, _lock| {
            let state = state.clone();
            Box::pin(async move {
                tracing::info!("scheduled ingestion run starting");
                match run_ingest_for_state(&state).await {
                    Ok(summary) => {
                        tracing::info!(
                            products = summary.products,
                            offers = summary.offers,
                            failed_queries = summary.failed_queries.len(),
                            "scheduled ingestion run complete"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "scheduled ingestion run failed");
                    }
                }
            })
        })?;
        scheduler.add(job).await?;
    }

    scheduler.start().await?;
    Ok(scheduler)
}
