pub mod backends;
pub mod relay;

pub use backends::{HttpInferenceBackend, InferenceBackend, MockInferenceBackend};
pub use relay::RelayHandler;
