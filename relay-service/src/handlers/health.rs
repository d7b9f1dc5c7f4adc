use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

/// Health check endpoint for Docker/K8s liveness probes.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "relay-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness check: not ready until an inference endpoint is configured.
pub async fn readiness_check(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    if !state.relay.is_configured() {
        tracing::warn!("Readiness check failed: INFERENCE_API_URL not set");
        return Err(AppError::ServiceUnavailable);
    }

    Ok((StatusCode::OK, Json(json!({ "status": "ready" }))))
}
