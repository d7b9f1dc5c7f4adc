//! Failure kinds of a single relay invocation.

use crate::models::InvocationResult;
use thiserror::Error;

/// Why an invocation did not produce a chat response.
///
/// Every variant is recovered into an [`InvocationResult`]; none escapes
/// to the host.
#[derive(Error, Debug)]
pub enum RelayError {
    /// No inference endpoint configured.
    #[error("INFERENCE_API_URL not set")]
    NotConfigured,

    /// The inference endpoint answered with a non-success status.
    #[error("{body}")]
    RemoteHttp { status: u16, body: String },

    /// Transport, timeout, decode or any other failure.
    #[error("{0}")]
    Unclassified(String),
}

impl RelayError {
    /// Wrap a reqwest failure, keeping its cause chain in the message.
    pub fn transport(err: reqwest::Error) -> Self {
        RelayError::Unclassified(format!("{:#}", anyhow::Error::new(err)))
    }

    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::RemoteHttp { status, .. } => *status,
            RelayError::NotConfigured | RelayError::Unclassified(_) => 500,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::NotConfigured => "configuration",
            RelayError::RemoteHttp { .. } => "remote_http",
            RelayError::Unclassified(_) => "unclassified",
        }
    }

    pub fn into_result(self, with_cors: bool) -> InvocationResult {
        InvocationResult::failure(self.status_code(), &self.to_string(), with_cors)
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Unclassified(err.to_string())
    }
}
