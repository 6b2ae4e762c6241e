//! Widget state and its single update function.
//!
//! Every change to what the presentation layer shows goes through
//! [`WidgetState::apply`], so contradictory combinations (both stages busy,
//! an error while loading) cannot be represented.

use crate::types::{CroppedImage, EnhancedPromptList, Prompt};

/// What the widget is doing right now.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    EnhancingPrompt,
    GeneratingImages,
    /// Last operation failed; the message is ready for display
    Error(String),
}

impl PipelineState {
    /// True while a remote call is outstanding.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::EnhancingPrompt | Self::GeneratingImages)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone)]
pub enum Event {
    /// User edited the prompt text
    PromptEdited(String),
    /// User picked an entry from the enhanced list
    PromptSelected(usize),
    EnhanceStarted,
    EnhanceSucceeded(Prompt),
    EnhanceFailed(String),
    GenerateStarted,
    GenerateSucceeded(Vec<CroppedImage>),
    GenerateFailed(String),
    ErrorDismissed,
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, Default)]
pub struct WidgetState {
    prompt: String,
    enhanced: EnhancedPromptList,
    images: Vec<CroppedImage>,
    status: PipelineState,
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current prompt text, exactly as typed.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn enhanced(&self) -> &EnhancedPromptList {
        &self.enhanced
    }

    pub fn images(&self) -> &[CroppedImage] {
        &self.images
    }

    pub fn status(&self) -> &PipelineState {
        &self.status
    }

    /// Apply one event. Returns `false` when the event is not valid in the
    /// current state and was ignored.
    pub fn apply(&mut self, event: Event) -> bool {
        match event {
            Event::PromptEdited(text) => {
                if self.status.is_busy() {
                    return false;
                }
                self.prompt = text;
            }
            Event::PromptSelected(index) => {
                if self.status.is_busy() {
                    return false;
                }
                let Some(selected) = self.enhanced.get(index) else {
                    return false;
                };
                self.prompt = selected.to_string();
            }
            Event::EnhanceStarted => {
                if self.status.is_busy() {
                    return false;
                }
                self.status = PipelineState::EnhancingPrompt;
            }
            Event::EnhanceSucceeded(prompt) => {
                if self.status != PipelineState::EnhancingPrompt {
                    return false;
                }
                self.enhanced.push(prompt);
                self.status = PipelineState::Idle;
            }
            Event::EnhanceFailed(message) => {
                if self.status != PipelineState::EnhancingPrompt {
                    return false;
                }
                self.status = PipelineState::Error(message);
            }
            Event::GenerateStarted => {
                if self.status.is_busy() {
                    return false;
                }
                // A new cycle invalidates earlier suggestions
                self.enhanced.clear();
                self.status = PipelineState::GeneratingImages;
            }
            Event::GenerateSucceeded(images) => {
                if self.status != PipelineState::GeneratingImages {
                    return false;
                }
                self.images = images;
                self.status = PipelineState::Idle;
            }
            Event::GenerateFailed(message) => {
                if self.status != PipelineState::GeneratingImages {
                    return false;
                }
                self.status = PipelineState::Error(message);
            }
            Event::ErrorDismissed => {
                if self.status.error().is_none() {
                    return false;
                }
                self.status = PipelineState::Idle;
            }
        }
        true
    }
}
