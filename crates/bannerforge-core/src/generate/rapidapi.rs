//! RapidAPI-hosted image generator ("ai-image-generator3").
//!
//! Authenticates with an API key plus a host header and answers with
//! `results.images`, a list of URLs.

use super::provider::{GenerationRequest, ImageGenerator};
use crate::config::{resolve_env_var, GenerationConfig};
use crate::error::PipelineError;
use crate::types::ImageDescriptor;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::{Duration, Instant};

/// Generator backed by a RapidAPI endpoint.
pub struct RapidApiGenerator {
    api_key: String,
    host: String,
    endpoint: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl RapidApiGenerator {
    pub fn new(api_key: &str, host: &str, endpoint: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            host: host.to_string(),
            endpoint: endpoint.to_string(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Build from the `[generation]` config section, resolving `${ENV_VAR}` keys.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, PipelineError> {
        let api_key =
            resolve_env_var(&config.api_key).ok_or_else(|| PipelineError::MissingApiKey {
                service: "Image generation",
                hint: format!(
                    "Set generation.api_key or the variable it references ({}).",
                    config.api_key
                ),
            })?;
        let mut generator = Self::new(&api_key, &config.host, &config.endpoint);
        generator.timeout = Duration::from_millis(config.timeout_ms);
        Ok(generator)
    }
}

// --- Response types ---

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    results: Option<GenerateResults>,
}

#[derive(Deserialize)]
struct GenerateResults {
    #[serde(default)]
    images: Option<Vec<ImageDescriptor>>,
}

/// Extract image URLs from a response body.
///
/// Missing or null `results`/`images` yield an empty list; a body that is
/// not JSON of that shape is a generation failure.
fn parse_images(body: &str) -> Result<Vec<ImageDescriptor>, PipelineError> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| PipelineError::GenerationFailed {
            message: format!("Failed to parse generation response: {e}"),
            status_code: None,
        })?;

    Ok(parsed
        .results
        .and_then(|r| r.images)
        .unwrap_or_default())
}

#[async_trait]
impl ImageGenerator for RapidApiGenerator {
    fn name(&self) -> &str {
        "rapidapi"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<ImageDescriptor>, PipelineError> {
        let start = Instant::now();

        let resp = self
            .client
            .post(&self.endpoint)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.host)
            .header("Content-Type", "application/json")
            .json(request)
            .timeout(self.timeout())
            .send()
            .await
            .map_err(|e| PipelineError::GenerationFailed {
                message: format!("Generation request failed: {e}"),
                status_code: None,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(PipelineError::GenerationFailed {
                message: format!("HTTP {status}: {text}"),
                status_code: Some(status.as_u16()),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| PipelineError::GenerationFailed {
                message: format!("Failed to read generation body: {e}"),
                status_code: None,
            })?;
        let images = parse_images(&body)?;

        tracing::debug!(
            "{} returned {} image URL(s) in {:?}",
            self.name(),
            images.len(),
            start.elapsed()
        );
        Ok(images)
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}
