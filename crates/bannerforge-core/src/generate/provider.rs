//! Image generation trait and request type.

use crate::error::PipelineError;
use crate::types::ImageDescriptor;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Body sent to the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    /// Prompt with the framing hint already appended
    pub prompt: String,
    /// Result page to request
    pub page: u32,
}

/// Trait that all image generation backends implement.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generator name for logging.
    fn name(&self) -> &str;

    /// Request one batch of images and return their URLs in service order.
    ///
    /// An empty list is a valid answer, not an error.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<ImageDescriptor>, PipelineError>;

    /// Per-request timeout for this generator.
    fn timeout(&self) -> Duration;
}
