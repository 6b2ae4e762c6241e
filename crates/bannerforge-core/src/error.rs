//! Error types for the Bannerforge prompt and image pipeline.
//!
//! Errors are organized by stage so the presentation layer can turn each one
//! into a single user-facing message while logs keep the full detail
//! (HTTP status, failing URL, decoder message).

use thiserror::Error;

/// Top-level error type for Bannerforge operations.
#[derive(Error, Debug)]
pub enum BannerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// One failed crop inside a fan-out batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropFailure {
    /// Source URL that could not be cropped
    pub url: String,
    /// Why it failed (fetch, decode, encode)
    pub message: String,
}

/// Pipeline errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Completion service answered with a non-2xx status
    #[error("Completion request failed with HTTP {status}: {message}")]
    RequestFailed { status: u16, message: String },

    /// Completion service answered 2xx but carried no usable text
    #[error("Completion response contained no text")]
    EmptyCompletion,

    /// No response at all (connect, DNS, TLS, timeout)
    #[error("Network error: {message}")]
    Network { message: String },

    /// Image generation request failed (HTTP or network)
    #[error("Image generation failed: {message}")]
    GenerationFailed {
        message: String,
        status_code: Option<u16>,
    },

    /// A single source image could not be fetched or decoded
    #[error("Failed to load image {url}: {message}")]
    ImageLoadFailed { url: String, message: String },

    /// At least one crop in a fan-out batch failed; no partial results
    #[error("{} of {total} image crops failed", .failures.len())]
    CropFailed {
        failures: Vec<CropFailure>,
        total: usize,
    },

    /// Crop frame has a zero dimension
    #[error("Invalid crop frame {width}x{height}")]
    InvalidFrame { width: u32, height: u32 },

    /// JPEG encoding of a cropped frame failed
    #[error("Failed to encode cropped image: {message}")]
    Encode { message: String },

    /// A remote service has no API key configured
    #[error("{service} API key not set. {hint}")]
    MissingApiKey {
        service: &'static str,
        hint: String,
    },
}

/// Convenience type alias for Bannerforge results.
pub type Result<T> = std::result::Result<T, BannerError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
