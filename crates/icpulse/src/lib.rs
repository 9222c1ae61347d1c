//! ICPulse Domain Library
//!
//! Core types shared by the ICPulse bot service:
//!
//! - **Domain** (`domain/`): command invocations (typed argument union),
//!   handler error taxonomy, demo memo entities
//! - **Ports** (`ports/`): abstract interfaces for the LLM provider and the
//!   demo store, so adapters can be swapped in tests
//! - `definition`: the declarative bot schema served to the chat platform
//! - `format`: shared number/byte/timestamp formatting helpers
//! - `http`: outbound call policy (timeout + fixed retry)

pub mod definition;
pub mod domain;
pub mod format;
pub mod http;
pub mod ports;

pub use domain::{ArgValue, CommandArg, CommandContext, HandlerError, Note, Shoutout, Task};
pub use ports::{ChatMessage, CompletionResponse, LlmProvider, MemoStore, MessageRole};
