//! Image decoding with content-based format detection.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;

use crate::error::PipelineError;

/// Result of decoding a downloaded image.
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected image format
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

/// Decode image bytes fetched from `url`.
///
/// The format is sniffed from the content; URLs from generation services
/// rarely carry a trustworthy extension.
pub fn decode_bytes(bytes: &[u8], url: &str) -> Result<DecodedImage, PipelineError> {
    let load_failed = |message: String| PipelineError::ImageLoadFailed {
        url: url.to_string(),
        message,
    };

    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| load_failed(format!("Cannot detect image format: {e}")))?;
    let format = reader
        .format()
        .ok_or_else(|| load_failed("Unrecognized image format".to_string()))?;
    let image = reader.decode().map_err(|e| load_failed(e.to_string()))?;

    let (width, height) = image.dimensions();
    tracing::trace!(
        "Decoded {url} as {} ({width}x{height})",
        format_to_string(format)
    );
    Ok(DecodedImage {
        image,
        format,
        width,
        height,
    })
}

/// Convert an ImageFormat to a string representation.
pub fn format_to_string(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::Png => "png",
        ImageFormat::WebP => "webp",
        ImageFormat::Gif => "gif",
        ImageFormat::Tiff => "tiff",
        ImageFormat::Bmp => "bmp",
        ImageFormat::Avif => "avif",
        _ => "unknown",
    }
}
