//! Prompt enhancement: one completion call turns a terse idea into a richer
//! image description.

use super::provider::{CompletionRequest, LlmProvider};
use crate::error::{PipelineError, PipelineResult};
use crate::types::{EnhancedPromptList, Prompt};
use std::sync::Arc;

/// Elaborates user prompts through a completion provider.
///
/// No retries: each call makes at most one request and reports its outcome.
pub struct PromptEnhancer {
    provider: Arc<dyn LlmProvider>,
    system_prompt: String,
}

impl PromptEnhancer {
    pub fn new(provider: Box<dyn LlmProvider>, system_prompt: impl Into<String>) -> Self {
        Self {
            provider: Arc::from(provider),
            system_prompt: system_prompt.into(),
        }
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Enhance an already-validated prompt.
    pub async fn enhance_prompt(&self, prompt: &Prompt) -> PipelineResult<Prompt> {
        let request = CompletionRequest::enhance(&self.system_prompt, prompt);
        tracing::debug!(
            "Enhancing prompt via {} ({} chars)",
            self.provider.name(),
            prompt.as_str().len()
        );

        let response = self.provider.complete(&request).await?;
        tracing::debug!(
            "Completion from {} in {}ms",
            response.model,
            response.latency_ms
        );

        Prompt::parse(&response.text).ok_or(PipelineError::EmptyCompletion)
    }

    /// Enhance raw user text. Blank input is a no-op and returns `Ok(None)`.
    pub async fn enhance(&self, raw_prompt: &str) -> PipelineResult<Option<Prompt>> {
        let Some(prompt) = Prompt::parse(raw_prompt) else {
            tracing::debug!("Skipping enhancement of blank prompt");
            return Ok(None);
        };
        self.enhance_prompt(&prompt).await.map(Some)
    }

    /// Enhance raw user text and append the result to `list`.
    ///
    /// Returns `true` when an entry was appended. On error the list is left
    /// untouched.
    pub async fn enhance_into(
        &self,
        raw_prompt: &str,
        list: &mut EnhancedPromptList,
    ) -> PipelineResult<bool> {
        match self.enhance(raw_prompt).await? {
            Some(enhanced) => {
                list.push(enhanced);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
