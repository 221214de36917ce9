use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};
use utoipa::ToSchema;

use rollcall_core::{AppError, ErrorBody};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "up")]
    pub store: String,
}

/// Report service health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and store are up", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = ErrorBody)
    ),
    tag = "Health"
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    state.store.ping().await.map_err(|err| {
        error!(error = %err, "Store health check failed");
        AppError::service_unavailable("Store unreachable")
    })?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        store: "up".to_string(),
    }))
}
