//! Output records for generated banners, written as JSON or JSONL.

use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::types::{CroppedImage, Prompt};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Single JSON array
    Json,
    /// One JSON object per line (newline-delimited JSON)
    JsonLines,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// Where a banner's pixels can be found.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImagePayload {
    /// Saved to disk
    Path(PathBuf),
    /// Inline `data:image/jpeg;base64,...`
    DataUri(String),
}

/// One generated banner as reported to the user.
#[derive(Debug, Clone, Serialize)]
pub struct ImageRecord {
    /// Position in the generation batch
    pub index: usize,
    /// Prompt the batch was generated for
    pub prompt: String,
    /// URL the source image was fetched from
    pub source_url: String,
    pub width: u32,
    pub height: u32,
    /// Encoded size in bytes
    pub bytes: usize,
    #[serde(flatten)]
    pub payload: ImagePayload,
}

impl ImageRecord {
    /// Record carrying the image inline as a data URI.
    pub fn inline(index: usize, prompt: &Prompt, image: &CroppedImage) -> Self {
        Self::with_payload(index, prompt, image, ImagePayload::DataUri(image.data_uri()))
    }

    /// Record pointing at a file the image was saved to.
    pub fn saved(index: usize, prompt: &Prompt, image: &CroppedImage, path: PathBuf) -> Self {
        Self::with_payload(index, prompt, image, ImagePayload::Path(path))
    }

    fn with_payload(
        index: usize,
        prompt: &Prompt,
        image: &CroppedImage,
        payload: ImagePayload,
    ) -> Self {
        Self {
            index,
            prompt: prompt.to_string(),
            source_url: image.source_url.clone(),
            width: image.width,
            height: image.height,
            bytes: image.jpeg.len(),
            payload,
        }
    }
}

/// Write each banner to `dir` as `banner-{index}.jpg`, creating the directory.
///
/// Returns the written paths in batch order.
pub fn save_images(dir: &Path, images: &[CroppedImage]) -> io::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    images
        .iter()
        .enumerate()
        .map(|(index, image)| {
            let path = dir.join(format!("banner-{index}.jpg"));
            std::fs::write(&path, &image.jpeg)?;
            tracing::debug!("Saved {} ({} bytes)", path.display(), image.jpeg.len());
            Ok(path)
        })
        .collect()
}

/// A writer that serializes records to JSON or JSONL format.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
}

impl<W: Write> OutputWriter<W> {
    /// `pretty` only affects JSON; JSONL is always one object per line.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
        }
    }

    /// Write a batch: a JSON array, or one line per item for JSONL.
    pub fn write_all<T: Serialize>(&mut self, items: &[T]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut self.writer, items)
                        .map_err(io::Error::other)?;
                } else {
                    serde_json::to_writer(&mut self.writer, items).map_err(io::Error::other)?;
                }
                writeln!(self.writer)?;
            }
            OutputFormat::JsonLines => {
                for item in items {
                    serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
                    writeln!(self.writer)?;
                }
            }
        }
        self.writer.flush()
    }

    /// Consume the writer and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
