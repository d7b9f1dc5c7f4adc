//! Browser-facing endpoint: the raw request body becomes the event body and
//! the invocation result is written out as a plain HTTP response.

use crate::models::{cors_headers, InvocationEvent, InvocationResult};
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use service_core::error::AppError;

use super::invocation_context;

pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<InvocationResult, AppError> {
    let event = if body.is_empty() {
        InvocationEvent::default()
    } else {
        let text = String::from_utf8(body.to_vec())
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Body is not UTF-8: {}", e)))?;
        InvocationEvent::with_body(text)
    };

    Ok(state
        .relay
        .handle(&event, &invocation_context(&headers))
        .await)
}

/// CORS preflight.
pub async fn preflight() -> impl IntoResponse {
    let mut response = StatusCode::NO_CONTENT.into_response();
    insert_headers(response.headers_mut(), cors_headers());
    response
}

impl IntoResponse for InvocationResult {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (status, self.body).into_response();
        // Bodies are always JSON, headers or not.
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        if let Some(headers) = self.headers {
            insert_headers(response.headers_mut(), headers);
        }

        response
    }
}

fn insert_headers(target: &mut HeaderMap, headers: impl IntoIterator<Item = (String, String)>) {
    for (name, value) in headers {
        match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            (Ok(name), Ok(value)) => {
                target.insert(name, value);
            }
            _ => tracing::warn!("Dropping invalid response header"),
        }
    }
}
