//! Liveness and readiness endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use super::AppState;
use crate::error::ApiError;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /api/health: process liveness only; the store is not consulted.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /api/ready: 200 once the store answers a query, 503 otherwise.
#[tracing::instrument(skip(state))]
pub async fn ready(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, ApiError> {
    if !state.store.health_check().await {
        return Err(ApiError::StoreUnavailable);
    }
    Ok(Json(HealthResponse { status: "ready" }))
}
