use axum::{extract::State, Json};
use serde::Serialize;

use super::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub(super) struct HealthData {
    status: &'static str,
    database: &'static str,
}

pub(super) async fn health(State(state): State<AppState>) -> Result<Json<HealthData>, ApiError> {
    match fairway_store::ping(&state.pool).await {
        Ok(()) => Ok(Json(HealthData {
            status: "ok",
            database: "up",
        })),
        Err(e) => {
            tracing::error!(error = %e, "database ping failed");
            Err(ApiError::new("internal_error", "database unreachable"))
        }
    }
}
