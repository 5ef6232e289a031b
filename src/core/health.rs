use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Router};

use crate::core::database::DatabaseConnector;

/// Liveness check. Does not touch the store.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Process is running")),
    tag = "health"
)]
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Readiness check.
///
/// Connects if needed and runs `SELECT 1`. Returns 503 when the store is
/// not reachable.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Store reachable"),
        (status = 503, description = "Store unreachable"),
    ),
    tag = "health"
)]
pub async fn readiness(State(connector): State<Arc<DatabaseConnector>>) -> StatusCode {
    match connector.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub fn routes(connector: Arc<DatabaseConnector>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness))
        .with_state(connector)
}
