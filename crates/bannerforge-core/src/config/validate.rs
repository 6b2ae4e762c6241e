//! Configuration validation with range checks.

use crate::error::ConfigError;
use crate::output::OutputFormat;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.crop.width == 0 {
            return Err(ConfigError::ValidationError(
                "crop.width must be > 0".into(),
            ));
        }
        if self.crop.height == 0 {
            return Err(ConfigError::ValidationError(
                "crop.height must be > 0".into(),
            ));
        }
        if !(1..=100).contains(&self.crop.jpeg_quality) {
            return Err(ConfigError::ValidationError(
                "crop.jpeg_quality must be between 1 and 100".into(),
            ));
        }
        if self.generation.page == 0 {
            return Err(ConfigError::ValidationError(
                "generation.page must be >= 1".into(),
            ));
        }
        if self.completion.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "completion.timeout_ms must be > 0".into(),
            ));
        }
        if self.generation.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "generation.timeout_ms must be > 0".into(),
            ));
        }
        if self.fetch.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "fetch.timeout_ms must be > 0".into(),
            ));
        }
        if self.fetch.max_image_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "fetch.max_image_bytes must be > 0".into(),
            ));
        }
        if self.completion.endpoint.trim().is_empty() || self.generation.endpoint.trim().is_empty()
        {
            return Err(ConfigError::ValidationError(
                "completion.endpoint and generation.endpoint must not be empty".into(),
            ));
        }
        if OutputFormat::parse(&self.output.format).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "output.format must be \"json\" or \"jsonl\", got \"{}\"",
                self.output.format
            )));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_crop_width() {
        let mut config = Config::default();
        config.crop.width = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("crop.width"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_quality() {
        let mut config = Config::default();
        config.crop.jpeg_quality = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("jpeg_quality"));

        config.crop.jpeg_quality = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_page_zero() {
        let mut config = Config::default();
        config.generation.page = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("generation.page"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.fetch.timeout_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("fetch.timeout_ms"));
    }

    #[test]
    fn test_validate_rejects_blank_endpoint() {
        let mut config = Config::default();
        config.generation.endpoint = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("endpoint"));
    }

    #[test]
    fn test_validate_rejects_unknown_formats() {
        let mut config = Config::default();
        config.output.format = "yaml".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("output.format"));

        config.output.format = "jsonl".to_string();
        config.logging.format = "compact".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.format"));

        config.logging.format = "json".to_string();
        assert!(config.validate().is_ok());
    }
}
