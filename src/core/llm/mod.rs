//! LLM provider abstraction.
//!
//! One provider trait, one concrete implementation (Google's Generative
//! Language API). The rest of the crate talks to `dyn LLMProvider` and
//! never sees HTTP.

mod google;
mod types;

pub use google::GoogleProvider;
pub use types::{ChatMessage, ChatRequest, ChatResponse, LLMError, LLMProvider, MessageRole, Result};
