//! Gateway-style entry point: the request body is a whole invocation event
//! and the response body is the invocation result.

use crate::models::{InvocationEvent, InvocationResult};
use crate::startup::AppState;
use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use service_core::error::AppError;

use super::invocation_context;

pub async fn invoke(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<InvocationResult>, AppError> {
    let event: InvocationEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid invocation event: {}", e)))?;

    let result = state
        .relay
        .handle(&event, &invocation_context(&headers))
        .await;

    Ok(Json(result))
}
