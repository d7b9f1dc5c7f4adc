//! Canned inference backend for tests.

use super::InferenceBackend;
use crate::error::RelayError;
use crate::models::{InferenceRequest, InferenceResponse, InvocationContext};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Remote { status: u16, body: String },
    Failure(String),
}

/// Backend that answers every request the same way and records prompts.
#[derive(Debug)]
pub struct MockInferenceBackend {
    reply: MockReply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockInferenceBackend {
    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always reply with `generated_text`.
    pub fn replying(generated_text: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Text(generated_text.into()))
    }

    /// Always fail as if the endpoint returned `status` with `body`.
    pub fn remote_error(status: u16, body: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Remote {
            status,
            body: body.into(),
        })
    }

    /// Always fail as if the call never completed.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Failure(message.into()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl InferenceBackend for MockInferenceBackend {
    async fn generate(
        &self,
        request: &InferenceRequest,
        _context: &InvocationContext,
    ) -> Result<InferenceResponse, RelayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(request.prompt.clone());
        }

        match &self.reply {
            MockReply::Text(text) => Ok(InferenceResponse::text(text.clone())),
            MockReply::Remote { status, body } => Err(RelayError::RemoteHttp {
                status: *status,
                body: body.clone(),
            }),
            MockReply::Failure(message) => Err(RelayError::Unclassified(message.clone())),
        }
    }
}
