use axum::Json;
use tracing::debug;

use crate::db::dbstore;
use crate::models::HealthResponse;

const SERVICE: &str = "smartassist-backend";

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    debug!("Health check requested");
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE.to_string(),
        message: "Server is running".to_string(),
    })
}

/// Readiness check endpoint; not ready until the database is up
#[utoipa::path(
    get,
    path = "/api/ready",
    responses(
        (status = 200, description = "Readiness state", body = HealthResponse)
    )
)]
pub async fn ready_check() -> Json<HealthResponse> {
    debug!("Readiness check requested");
    let (status, message) = if dbstore::get_db().is_some() {
        ("ok", "Service is ready")
    } else {
        ("unavailable", "Database not initialized")
    };
    Json(HealthResponse {
        status: status.to_string(),
        service: SERVICE.to_string(),
        message: message.to_string(),
    })
}
