//! Pipeline orchestration: generate a batch, then crop every image.

use futures_util::future::join_all;
use std::sync::Arc;

use super::crop::CenterCropper;
use crate::config::{GenerationConfig, DEFAULT_FRAMING_HINT};
use crate::error::{CropFailure, PipelineError, PipelineResult};
use crate::generate::{GenerationRequest, ImageGenerator};
use crate::types::{CroppedImage, ImageDescriptor, Prompt};

/// Options for controlling what is sent to the generation service.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Text appended to every prompt
    pub framing_hint: String,
    /// Result page to request
    pub page: u32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            framing_hint: DEFAULT_FRAMING_HINT.to_string(),
            page: 1,
        }
    }
}

impl From<&GenerationConfig> for PipelineOptions {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            framing_hint: config.framing_hint.clone(),
            page: config.page,
        }
    }
}

/// Turns a prompt into an ordered list of cropped banners.
pub struct ImagePipeline {
    generator: Arc<dyn ImageGenerator>,
    cropper: CenterCropper,
    options: PipelineOptions,
}

impl ImagePipeline {
    pub fn new(
        generator: Box<dyn ImageGenerator>,
        cropper: CenterCropper,
        options: PipelineOptions,
    ) -> Self {
        Self {
            generator: Arc::from(generator),
            cropper,
            options,
        }
    }

    /// The cropper used for the fan-out stage.
    pub fn cropper(&self) -> &CenterCropper {
        &self.cropper
    }

    /// Prompt text as sent to the generation service.
    pub fn framed_prompt(&self, prompt: &Prompt) -> String {
        let hint = self.options.framing_hint.trim();
        if hint.is_empty() {
            prompt.to_string()
        } else {
            format!("{prompt} {hint}")
        }
    }

    /// Generate one batch for `prompt` and crop every returned image.
    ///
    /// An empty batch is a success with no images.
    pub async fn generate(&self, prompt: &Prompt) -> PipelineResult<Vec<CroppedImage>> {
        let start = std::time::Instant::now();
        let request = GenerationRequest {
            prompt: self.framed_prompt(prompt),
            page: self.options.page,
        };

        let descriptors = self.generator.generate(&request).await?;
        tracing::debug!(
            "{} returned {} image(s) for page {}",
            self.generator.name(),
            descriptors.len(),
            request.page
        );

        let images = self.crop_all(&descriptors).await?;
        tracing::debug!("Generated {} banner(s) in {:?}", images.len(), start.elapsed());
        Ok(images)
    }

    /// Crop all descriptors concurrently and join.
    ///
    /// Every crop runs to completion. If any failed, the whole batch fails
    /// with `CropFailed` listing each failing URL, and no images are
    /// returned. On success the output order matches `descriptors`.
    pub async fn crop_all(
        &self,
        descriptors: &[ImageDescriptor],
    ) -> PipelineResult<Vec<CroppedImage>> {
        let results = join_all(descriptors.iter().map(|d| self.cropper.crop(d.url()))).await;

        let total = results.len();
        let mut images = Vec::with_capacity(total);
        let mut failures = Vec::new();
        for (descriptor, result) in descriptors.iter().zip(results) {
            match result {
                Ok(image) => images.push(image),
                Err(e) => {
                    tracing::warn!("Crop failed for {}: {e}", descriptor.url());
                    failures.push(CropFailure {
                        url: descriptor.url().to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(images)
        } else {
            Err(PipelineError::CropFailed { failures, total })
        }
    }
}
