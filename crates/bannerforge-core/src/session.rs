//! Widget session: the enhancer and the image pipeline driven through one
//! state machine.
//!
//! Failures never escape a session operation. They are logged with full
//! detail and stored as a short user-facing message in
//! [`PipelineState::Error`]. Every operation takes `&mut self`, so at most
//! one remote call is outstanding per session.

use std::sync::Arc;

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::generate::RapidApiGenerator;
use crate::llm::{OpenAiProvider, PromptEnhancer};
use crate::pipeline::{CenterCropper, CropFrame, HttpImageFetcher, ImagePipeline, PipelineOptions};
use crate::state::{Event, PipelineState, WidgetState};
use crate::types::Prompt;

const ENHANCE_FAILED: &str = "Failed to optimize prompt. Please try again.";
const ENHANCE_EMPTY: &str = "No optimized prompt received from the API.";
const GENERATE_FAILED: &str = "Failed to generate images. Please try again.";

/// User-facing message for a failed enhancement.
pub fn enhance_error_message(error: &PipelineError) -> &'static str {
    match error {
        PipelineError::EmptyCompletion => ENHANCE_EMPTY,
        _ => ENHANCE_FAILED,
    }
}

/// User-facing message for a failed generation cycle.
pub fn generate_error_message(_error: &PipelineError) -> &'static str {
    GENERATE_FAILED
}

/// One prompt-to-banner widget instance.
pub struct Session {
    enhancer: PromptEnhancer,
    pipeline: ImagePipeline,
    state: WidgetState,
}

impl Session {
    pub fn new(enhancer: PromptEnhancer, pipeline: ImagePipeline) -> Self {
        Self {
            enhancer,
            pipeline,
            state: WidgetState::new(),
        }
    }

    /// Build a session wired to the real services described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = OpenAiProvider::from_config(&config.completion, None)?;
        let enhancer = PromptEnhancer::new(Box::new(provider), &config.completion.system_prompt);
        let pipeline = build_pipeline(config)?;
        Ok(Self::new(enhancer, pipeline))
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// Replace the prompt text. Ignored while a call is outstanding.
    pub fn set_prompt(&mut self, text: impl Into<String>) -> bool {
        self.state.apply(Event::PromptEdited(text.into()))
    }

    /// Copy an enhanced prompt into the prompt field.
    pub fn select_prompt(&mut self, index: usize) -> bool {
        self.state.apply(Event::PromptSelected(index))
    }

    pub fn dismiss_error(&mut self) -> bool {
        self.state.apply(Event::ErrorDismissed)
    }

    /// Enhance the current prompt and append the result to the list.
    ///
    /// Blank prompts are a no-op.
    pub async fn enhance(&mut self) -> &PipelineState {
        let Some(prompt) = Prompt::parse(self.state.prompt()) else {
            return self.state.status();
        };
        if !self.state.apply(Event::EnhanceStarted) {
            return self.state.status();
        }

        let event = match self.enhancer.enhance_prompt(&prompt).await {
            Ok(enhanced) => Event::EnhanceSucceeded(enhanced),
            Err(e) => {
                tracing::error!("Error optimizing prompt: {e}");
                Event::EnhanceFailed(enhance_error_message(&e).to_string())
            }
        };
        self.state.apply(event);
        self.state.status()
    }

    /// Run a generation cycle for the current prompt.
    ///
    /// Clears the enhanced list before the request goes out. On failure the
    /// previously generated images stay in place. Blank prompts are a no-op.
    pub async fn generate(&mut self) -> &PipelineState {
        let Some(prompt) = Prompt::parse(self.state.prompt()) else {
            return self.state.status();
        };
        if !self.state.apply(Event::GenerateStarted) {
            return self.state.status();
        }

        let event = match self.pipeline.generate(&prompt).await {
            Ok(images) => {
                tracing::info!("Generated {} banner(s)", images.len());
                Event::GenerateSucceeded(images)
            }
            Err(e) => {
                if let PipelineError::CropFailed { failures, .. } = &e {
                    for failure in failures {
                        tracing::error!("Crop failed for {}: {}", failure.url, failure.message);
                    }
                }
                tracing::error!("Error generating images: {e}");
                Event::GenerateFailed(generate_error_message(&e).to_string())
            }
        };
        self.state.apply(event);
        self.state.status()
    }
}

/// Build the real generation pipeline described by `config`.
pub fn build_pipeline(config: &Config) -> Result<ImagePipeline> {
    let generator = RapidApiGenerator::from_config(&config.generation)?;
    let frame = CropFrame::try_from(&config.crop)?;
    let fetcher = Arc::new(HttpImageFetcher::new(&config.fetch));
    let cropper = CenterCropper::new(fetcher, frame, config.crop.jpeg_quality);
    Ok(ImagePipeline::new(
        Box::new(generator),
        cropper,
        PipelineOptions::from(&config.generation),
    ))
}
