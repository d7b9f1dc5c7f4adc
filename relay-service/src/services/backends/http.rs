//! HTTP inference backend.
//!
//! POSTs the JSON-encoded generation request to the configured URL and
//! decodes `{"generated_text": ...}` from the reply.

use super::InferenceBackend;
use crate::error::RelayError;
use crate::models::{InferenceRequest, InferenceResponse, InvocationContext};
use async_trait::async_trait;
use reqwest::Client;
use service_core::error::AppError;
use service_core::observability::TracedClientExt;
use std::time::Duration;

/// Backend that calls a remote inference endpoint over HTTP.
#[derive(Clone)]
pub struct HttpInferenceBackend {
    endpoint: String,
    client: Client,
}

impl HttpInferenceBackend {
    /// `endpoint` is used as-is; no path is appended.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

#[async_trait]
impl InferenceBackend for HttpInferenceBackend {
    async fn generate(
        &self,
        request: &InferenceRequest,
        context: &InvocationContext,
    ) -> Result<InferenceResponse, RelayError> {
        let payload = serde_json::to_vec(request)?;

        tracing::debug!(
            endpoint = %self.endpoint,
            prompt_len = request.prompt.len(),
            "Sending request to inference endpoint"
        );

        let response = self
            .client
            .traced_post(&self.endpoint)
            .header("Content-Type", "application/json")
            .body(payload)
            .send(context.request_id.as_deref())
            .await
            .map_err(RelayError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.map_err(RelayError::transport)?;
            return Err(RelayError::RemoteHttp {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let body = response.bytes().await.map_err(RelayError::transport)?;
        let reply: InferenceResponse = serde_json::from_slice(&body)?;

        Ok(reply)
    }
}
