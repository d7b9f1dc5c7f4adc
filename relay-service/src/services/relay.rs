//! The relay handler: one invocation in, one invocation result out.

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::models::{
    ChatRequest, ChatResponse, InferenceRequest, InvocationContext, InvocationEvent,
    InvocationResult,
};
use crate::services::backends::{HttpInferenceBackend, InferenceBackend};
use service_core::error::AppError;
use std::sync::Arc;

/// Translates invocation events into inference calls and back.
///
/// Holds no per-invocation state, so one handler serves concurrent
/// invocations.
#[derive(Clone)]
pub struct RelayHandler {
    backend: Option<Arc<dyn InferenceBackend>>,
    cors_on_errors: bool,
}

impl RelayHandler {
    pub fn new(backend: Option<Arc<dyn InferenceBackend>>, cors_on_errors: bool) -> Self {
        Self {
            backend,
            cors_on_errors,
        }
    }

    /// Build the handler from configuration. A missing endpoint URL is not
    /// an error here; each invocation reports it instead.
    pub fn from_config(config: &RelayConfig) -> Result<Self, AppError> {
        let backend = match &config.inference.api_url {
            Some(url) => {
                let backend = HttpInferenceBackend::new(url.clone(), config.inference.timeout())?;
                Some(Arc::new(backend) as Arc<dyn InferenceBackend>)
            }
            None => None,
        };

        Ok(Self::new(backend, config.cors.on_errors))
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Run one invocation. Never fails: every error becomes a result.
    pub async fn handle(
        &self,
        event: &InvocationEvent,
        context: &InvocationContext,
    ) -> InvocationResult {
        let outcome = self
            .relay(event, context)
            .await
            .and_then(|response| InvocationResult::success(&response).map_err(RelayError::from));

        match outcome {
            Ok(result) => result,
            Err(err) => {
                match &err {
                    RelayError::RemoteHttp { status, .. } => tracing::warn!(
                        status = *status,
                        request_id = context.request_id.as_deref().unwrap_or("-"),
                        "Inference endpoint returned an error"
                    ),
                    _ => tracing::error!(
                        kind = err.kind(),
                        error = %err,
                        request_id = context.request_id.as_deref().unwrap_or("-"),
                        "Relay invocation failed"
                    ),
                }
                err.into_result(self.cors_on_errors)
            }
        }
    }

    async fn relay(
        &self,
        event: &InvocationEvent,
        context: &InvocationContext,
    ) -> Result<ChatResponse, RelayError> {
        // Configuration is checked before the event is looked at.
        let backend = self.backend.as_ref().ok_or(RelayError::NotConfigured)?;

        let ChatRequest {
            message,
            mut conversation_history,
        } = ChatRequest::from_event_body(event.body.as_deref())?;

        tracing::debug!(
            prompt_len = message.len(),
            history_len = conversation_history.len(),
            "Relaying invocation"
        );

        let request = InferenceRequest::new(message);
        let reply = backend.generate(&request, context).await?.into_text();

        conversation_history.push_exchange(request.prompt, reply.clone());

        tracing::info!(
            response_len = reply.len(),
            history_len = conversation_history.len(),
            "Inference completed"
        );

        Ok(ChatResponse::new(reply, conversation_history))
    }
}
