//! Wire types for the remote inference endpoint.

use serde::{Deserialize, Serialize};

/// Maximum number of tokens the endpoint may generate.
pub const MAX_NEW_TOKENS: u32 = 512;
/// Sampling is always enabled.
pub const DO_SAMPLE: bool = true;
pub const TEMPERATURE: f64 = 0.7;
pub const TOP_P: f64 = 0.9;

/// Generation request sent to the inference endpoint.
///
/// Only the prompt varies; the sampling parameters are fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub prompt: String,
    pub max_new_tokens: u32,
    pub do_sample: bool,
    pub temperature: f64,
    pub top_p: f64,
}

impl InferenceRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_new_tokens: MAX_NEW_TOKENS,
            do_sample: DO_SAMPLE,
            temperature: TEMPERATURE,
            top_p: TOP_P,
        }
    }
}

/// Reply from the inference endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceResponse {
    #[serde(default)]
    pub generated_text: Option<String>,
}

impl InferenceResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            generated_text: Some(text.into()),
        }
    }

    /// Generated text; missing or `null` reads as `""`.
    pub fn into_text(self) -> String {
        self.generated_text.unwrap_or_default()
    }
}
