//! Source image download.
//!
//! Fetches are anonymous: the client keeps no cookie store and sends no
//! credentials, so the source must allow plain unauthenticated reads.

use async_trait::async_trait;
use futures_util::StreamExt;
use std::time::Duration;

use crate::config::FetchConfig;
use crate::error::PipelineError;

/// Loads the raw bytes behind an image URL.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Download `url`. Every failure is reported as `ImageLoadFailed`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, PipelineError>;
}

/// HTTP(S) fetcher built on `reqwest`.
pub struct HttpImageFetcher {
    client: reqwest::Client,
    timeout: Duration,
    max_bytes: u64,
}

impl HttpImageFetcher {
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: Duration::from_millis(config.timeout_ms),
            max_bytes: config.max_image_bytes,
        }
    }

    fn load_failed(url: &str, message: impl Into<String>) -> PipelineError {
        PipelineError::ImageLoadFailed {
            url: url.to_string(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, PipelineError> {
        let resp = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Self::load_failed(url, e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Self::load_failed(url, format!("HTTP {status}")));
        }

        let declared = resp.content_length();
        if let Some(len) = declared {
            if len > self.max_bytes {
                return Err(Self::load_failed(
                    url,
                    format!("body of {len} bytes exceeds limit of {}", self.max_bytes),
                ));
            }
        }

        // Chunked bodies carry no length up front, so count while streaming
        let mut bytes = Vec::with_capacity(declared.unwrap_or(0) as usize);
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Self::load_failed(url, e.to_string()))?;
            if (bytes.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(Self::load_failed(
                    url,
                    format!("body exceeds limit of {} bytes", self.max_bytes),
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        tracing::trace!("Fetched {} bytes from {url}", bytes.len());
        Ok(bytes)
    }
}
