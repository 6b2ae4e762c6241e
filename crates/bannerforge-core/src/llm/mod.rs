//! LLM integration for prompt enhancement.
//!
//! Provides a provider abstraction over Chat Completions compatible backends
//! and the enhancer that appends elaborated prompts to a widget's list.

pub(crate) mod enhancer;
pub(crate) mod openai;
pub(crate) mod provider;

pub use enhancer::PromptEnhancer;
pub use openai::OpenAiProvider;
pub use provider::{ChatMessage, CompletionRequest, CompletionResponse, LlmProvider, Role};
