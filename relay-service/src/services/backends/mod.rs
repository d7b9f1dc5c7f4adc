//! Inference backend abstraction and implementations.
//!
//! The relay talks to the model through [`InferenceBackend`] so the HTTP
//! endpoint can be swapped for a canned backend in tests.

pub mod http;
pub mod mock;

use crate::error::RelayError;
use crate::models::{InferenceRequest, InferenceResponse, InvocationContext};
use async_trait::async_trait;

pub use self::http::HttpInferenceBackend;
pub use self::mock::MockInferenceBackend;

/// A text generation endpoint.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Run one generation request. Exactly one remote call per invocation.
    async fn generate(
        &self,
        request: &InferenceRequest,
        context: &InvocationContext,
    ) -> Result<InferenceResponse, RelayError>;
}
