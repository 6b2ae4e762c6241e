//! Completion provider trait and request/response types.
//!
//! Defines the interface a text-completion backend implements so the prompt
//! enhancer can be driven by a real service or a test double.

use crate::error::PipelineError;
use crate::types::Prompt;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One turn in a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// A single-turn completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Ordered messages: system instruction first, then the user turn
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    /// Build the request that asks the model to elaborate a prompt.
    pub fn enhance(system_prompt: &str, prompt: &Prompt) -> Self {
        Self {
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: Role::User,
                    content: format!("Enhance this description: {prompt}"),
                },
            ],
        }
    }
}

/// The response from a completion call.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Completion text, already trimmed and non-empty
    pub text: String,
    /// Model identifier reported by the service
    pub model: String,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Trait that all completion providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the enhancer holds an `Arc<dyn LlmProvider>`).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Run one completion. Implementations make exactly one outbound call.
    async fn complete(&self, request: &CompletionRequest)
        -> Result<CompletionResponse, PipelineError>;

    /// Per-request timeout for this provider.
    fn timeout(&self) -> Duration;
}
