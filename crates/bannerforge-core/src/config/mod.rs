//! Configuration management for Bannerforge.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Credentials live in the service sections and may reference
//! environment variables with `${VAR}` syntax.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Bannerforge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prompt enhancement service
    pub completion: CompletionConfig,

    /// Image generation service
    pub generation: GenerationConfig,

    /// Center-crop frame
    pub crop: CropConfig,

    /// Source image downloads
    pub fetch: FetchConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.bannerforge.bannerforge/config.toml
    /// - Linux: ~/.config/bannerforge/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\bannerforge\config\config.toml
    ///
    /// Falls back to ~/.bannerforge/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "bannerforge", "bannerforge")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".bannerforge").join("config.toml")
            })
    }

    /// Resolved output directory (with ~ expansion), if one is configured.
    pub fn output_dir(&self) -> Option<PathBuf> {
        self.output.dir.as_ref().map(|dir| expand_path(dir))
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Expand a leading `~` in a path.
pub fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.into_owned())
}

/// Resolve `${ENV_VAR}` references in config strings.
///
/// Plain values pass through; empty strings and unset variables yield `None`.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
