//! Bannerforge Core - prompt enhancement and banner generation library.
//!
//! Bannerforge turns a short idea into wide banner images in two stages:
//!
//! ```text
//! Prompt → Enhance (chat completion) → pick a prompt
//!        → Generate (image service) → fetch + center-crop each URL → JPEG banners
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use bannerforge_core::{Config, Session};
//!
//! #[tokio::main]
//! async fn main() -> bannerforge_core::Result<()> {
//!     let config = Config::load()?;
//!     let mut session = Session::from_config(&config)?;
//!
//!     session.set_prompt("a lighthouse in a storm");
//!     session.enhance().await;
//!     session.select_prompt(0);
//!     session.generate().await;
//!     println!("{} banners", session.state().images().len());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod generate;
pub mod llm;
pub mod output;
pub mod pipeline;
pub mod session;
pub mod state;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenient access
pub use config::Config;
pub use error::{BannerError, ConfigError, CropFailure, PipelineError, PipelineResult, Result};
pub use generate::{ImageGenerator, RapidApiGenerator};
pub use llm::{LlmProvider, OpenAiProvider, PromptEnhancer};
pub use output::{save_images, ImageRecord, OutputFormat, OutputWriter};
pub use pipeline::{CenterCropper, CropFrame, ImagePipeline, PipelineOptions};
pub use session::{build_pipeline, Session};
pub use state::{Event, PipelineState, WidgetState};
pub use types::{CroppedImage, EnhancedPromptList, ImageDescriptor, Prompt};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
