//! Core data types flowing through the prompt and image pipeline.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A prompt: text that is non-empty once surrounding whitespace is trimmed.
///
/// The stored text is the trimmed form, so two prompts that differ only in
/// padding compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Prompt(String);

impl Prompt {
    /// Parse user text into a prompt. Returns `None` for blank input.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Prompt {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or("prompt must not be blank")
    }
}

impl From<Prompt> for String {
    fn from(prompt: Prompt) -> Self {
        prompt.0
    }
}

/// Append-only list of enhanced prompts, in the order they were produced.
///
/// Only a new generation cycle clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnhancedPromptList(Vec<Prompt>);

impl EnhancedPromptList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a prompt at the end of the list.
    pub fn push(&mut self, prompt: Prompt) {
        self.0.push(prompt);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn get(&self, index: usize) -> Option<&Prompt> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prompt> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Prompt] {
        &self.0
    }
}

/// A remote image URL returned by the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageDescriptor(String);

impl ImageDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

/// A center-cropped, JPEG-encoded banner produced from one [`ImageDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CroppedImage {
    /// URL the source pixels were loaded from
    pub source_url: String,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Encoded JPEG bytes
    pub jpeg: Vec<u8>,
}

impl CroppedImage {
    /// MIME type of the encoded payload.
    pub const MEDIA_TYPE: &'static str = "image/jpeg";

    /// Render the payload as a `data:` URI for direct embedding.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", Self::MEDIA_TYPE, BASE64.encode(&self.jpeg))
    }
}
