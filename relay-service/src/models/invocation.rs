//! Platform-shaped invocation envelope.

use super::ChatResponse;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inbound trigger. Only `body` is consumed; other gateway fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationEvent {
    #[serde(default)]
    pub body: Option<String>,
}

impl InvocationEvent {
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
        }
    }
}

/// Per-invocation metadata supplied by the host.
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
    /// Correlation id forwarded to the inference endpoint.
    pub request_id: Option<String>,
}

/// Outcome of one invocation, shaped like a gateway proxy response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResult {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    pub body: String,
}

/// Failure body, `success` first.
#[derive(Serialize)]
struct FailureBody<'a> {
    success: bool,
    error: &'a str,
}

/// CORS and content-type headers attached to browser-facing results.
pub fn cors_headers() -> BTreeMap<String, String> {
    [
        ("Content-Type", "application/json"),
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Headers", "*"),
        ("Access-Control-Allow-Methods", "OPTIONS,POST"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl InvocationResult {
    /// 200 result carrying the chat response and CORS headers.
    pub fn success(response: &ChatResponse) -> Result<Self, serde_json::Error> {
        Ok(Self {
            status_code: 200,
            headers: Some(cors_headers()),
            body: serde_json::to_string(response)?,
        })
    }

    /// Failure result with body `{"success": false, "error": ...}`.
    pub fn failure(status_code: u16, error: &str, with_cors: bool) -> Self {
        let body = serde_json::to_string(&FailureBody {
            success: false,
            error,
        })
        .unwrap_or_else(|_| r#"{"success":false}"#.to_string());

        Self {
            status_code,
            headers: with_cors.then(cors_headers),
            body,
        }
    }
}
