//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default system instruction sent ahead of every enhancement request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an AI that generates image descriptions.";

/// Default orientation/size hint appended to prompts sent for generation.
pub const DEFAULT_FRAMING_HINT: &str =
    "oriented image with height between 400px to 450px and width between 1400px to 1450px.";

/// Text completion (prompt enhancement) service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Chat Completions endpoint URL
    pub endpoint: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name
    pub model: String,

    /// System instruction for the single model turn
    pub system_prompt: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: "${OPENAI_API_KEY}".to_string(),
            model: "gpt-4".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            timeout_ms: 60_000,
        }
    }
}

/// Image generation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Generation endpoint URL
    pub endpoint: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Value sent in the host header alongside the key
    pub host: String,

    /// Result page requested from the service
    pub page: u32,

    /// Text appended to every prompt before generation
    pub framing_hint: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://ai-image-generator3.p.rapidapi.com/generate".to_string(),
            api_key: "${RAPIDAPI_KEY}".to_string(),
            host: "ai-image-generator3.p.rapidapi.com".to_string(),
            page: 1,
            framing_hint: DEFAULT_FRAMING_HINT.to_string(),
            timeout_ms: 120_000,
        }
    }
}

/// Center-crop target frame and encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Output width in pixels
    pub width: u32,

    /// Output height in pixels
    pub height: u32,

    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            width: 1450,
            height: 450,
            jpeg_quality: 92,
        }
    }
}

/// Source image download settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-image download timeout in milliseconds
    pub timeout_ms: u64,

    /// Largest image body accepted, in bytes
    pub max_image_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            max_image_bytes: 50 * 1024 * 1024,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("json" or "jsonl")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,

    /// Directory for saved banners; records carry data URIs when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: false,
            dir: None,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
