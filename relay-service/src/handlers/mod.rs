//! HTTP handlers for the relay service.

pub mod chat;
pub mod health;
pub mod invoke;

use crate::models::InvocationContext;
use axum::http::HeaderMap;
use service_core::observability::extract_request_id;

pub use chat::{chat, preflight};
pub use health::{health_check, readiness_check};
pub use invoke::invoke;

fn invocation_context(headers: &HeaderMap) -> InvocationContext {
    InvocationContext {
        request_id: extract_request_id(headers),
    }
}
