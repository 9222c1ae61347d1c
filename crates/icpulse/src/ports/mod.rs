//! Ports - abstract interfaces implemented by server adapters.

pub mod llm;
pub mod store;

pub use llm::{ChatMessage, CompletionResponse, LlmProvider, MessageRole};
pub use store::MemoStore;
