//! Domain models for the relay service.

pub mod conversation;
pub mod inference;
pub mod invocation;

pub use conversation::{ChatRequest, ChatResponse, ChatTurn, ConversationHistory, Role};
pub use inference::{InferenceRequest, InferenceResponse};
pub use invocation::{cors_headers, InvocationContext, InvocationEvent, InvocationResult};
