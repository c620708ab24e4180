//! Health check endpoint handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use clinic_persistence::core::Backend;
use tracing::{debug, warn};

use crate::error::RestResult;
use crate::state::AppState;

/// Handler for the ping endpoint.
///
/// # HTTP Request
///
/// `GET /ping`
///
/// # Response
///
/// - `200 OK` - The JSON string `"pong"`
pub async fn ping_handler() -> impl IntoResponse {
    (StatusCode::OK, Json("pong"))
}

/// Handler for the health check endpoint.
///
/// # HTTP Request
///
/// `GET /health`
///
/// # Response
///
/// - `200 OK` - Server is up; reports the backend name
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: Backend,
{
    debug!("Processing health check request");

    let health_response = serde_json::json!({
        "status": "healthy",
        "backend": state.storage().name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    Ok((StatusCode::OK, Json(health_response)).into_response())
}

/// Handler for a liveness probe.
///
/// # HTTP Request
///
/// `GET /_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for a readiness probe.
///
/// Runs the backend health check.
///
/// # HTTP Request
///
/// `GET /_readiness`
///
/// # Response
///
/// - `200 OK` - Storage answers queries
/// - `503 Service Unavailable` - Storage check failed
pub async fn readiness_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: Backend,
{
    debug!("Processing readiness check request");

    let backend_name = state.storage().name();
    match state.storage().health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ready",
                "backend": backend_name,
                "checks": { "storage": "ok" }
            })),
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "unavailable",
                    "backend": backend_name,
                    "checks": { "storage": "failed" }
                })),
            )
                .into_response()
        }
    }
}
