//! Center cropping to a fixed banner frame, with JPEG output.
//!
//! The crop window is centered on the source and clamped so it never starts
//! at a negative offset. When the source is smaller than the frame in a
//! dimension, the copy is clipped to the source extent (never stretched) and
//! the rest of the frame stays black.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use std::sync::Arc;

use super::decode::{decode_bytes, format_to_string};
use super::fetch::ImageFetcher;
use crate::config::CropConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::types::CroppedImage;

/// Output frame size in pixels. Both dimensions are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropFrame {
    width: u32,
    height: u32,
}

impl CropFrame {
    /// The wide banner frame used by default.
    pub const BANNER: CropFrame = CropFrame {
        width: 1450,
        height: 450,
    };

    pub fn new(width: u32, height: u32) -> PipelineResult<Self> {
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidFrame { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl TryFrom<&CropConfig> for CropFrame {
    type Error = PipelineError;

    fn try_from(config: &CropConfig) -> Result<Self, Self::Error> {
        Self::new(config.width, config.height)
    }
}

/// Source rectangle copied into the frame at offset (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    /// Centered window of `frame` size over a `src_width`x`src_height` source.
    ///
    /// Odd margins round down. The region is clipped to the source, so its
    /// size is smaller than the frame when the source is.
    pub fn centered(src_width: u32, src_height: u32, frame: CropFrame) -> Self {
        let x = src_width.saturating_sub(frame.width) / 2;
        let y = src_height.saturating_sub(frame.height) / 2;
        Self {
            x,
            y,
            width: frame.width.min(src_width - x),
            height: frame.height.min(src_height - y),
        }
    }
}

/// Copy the centered region of `image` into a fresh frame-sized canvas.
///
/// Transparent source pixels are composited onto black.
pub fn center_crop(image: &DynamicImage, frame: CropFrame) -> RgbImage {
    let (src_width, src_height) = image.dimensions();
    let region = CropRegion::centered(src_width, src_height, frame);
    let mut canvas = RgbImage::new(frame.width, frame.height);

    let view = image
        .crop_imm(region.x, region.y, region.width, region.height)
        .to_rgba8();
    for (x, y, pixel) in view.enumerate_pixels() {
        let alpha = u16::from(pixel[3]);
        let over_black = |channel: u8| -> u8 { ((u16::from(channel) * alpha) / 255) as u8 };
        canvas.put_pixel(
            x,
            y,
            Rgb([
                over_black(pixel[0]),
                over_black(pixel[1]),
                over_black(pixel[2]),
            ]),
        );
    }

    canvas
}

/// Encode a canvas as baseline JPEG.
pub fn encode_jpeg(canvas: &RgbImage, quality: u8) -> PipelineResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    encoder
        .encode_image(canvas)
        .map_err(|e| PipelineError::Encode {
            message: e.to_string(),
        })?;
    Ok(bytes)
}

/// Loads images by URL and center-crops them to a fixed frame.
#[derive(Clone)]
pub struct CenterCropper {
    fetcher: Arc<dyn ImageFetcher>,
    frame: CropFrame,
    quality: u8,
}

impl CenterCropper {
    pub fn new(fetcher: Arc<dyn ImageFetcher>, frame: CropFrame, quality: u8) -> Self {
        Self {
            fetcher,
            frame,
            quality: quality.clamp(1, 100),
        }
    }

    pub fn frame(&self) -> CropFrame {
        self.frame
    }

    /// Fetch, decode, crop and encode one image.
    ///
    /// Decoding and encoding run on the blocking pool.
    pub async fn crop(&self, url: &str) -> PipelineResult<CroppedImage> {
        let bytes = self.fetcher.fetch(url).await?;

        let source_url = url.to_string();
        let frame = self.frame;
        let quality = self.quality;
        tokio::task::spawn_blocking(move || -> PipelineResult<CroppedImage> {
            let url = source_url;
            let decoded = decode_bytes(&bytes, &url)?;
            let region = CropRegion::centered(decoded.width, decoded.height, frame);
            tracing::trace!(
                "Cropping {url} ({} {}x{}) at {:?}",
                format_to_string(decoded.format),
                decoded.width,
                decoded.height,
                region
            );

            let canvas = center_crop(&decoded.image, frame);
            let jpeg = encode_jpeg(&canvas, quality)?;
            Ok(CroppedImage {
                source_url: url,
                width: frame.width,
                height: frame.height,
                jpeg,
            })
        })
        .await
        .map_err(|e| crop_task_failed(url, e))?
    }
}

/// A crop task that panicked or was cancelled still counts against its URL.
fn crop_task_failed(url: &str, error: tokio::task::JoinError) -> PipelineError {
    PipelineError::ImageLoadFailed {
        url: url.to_string(),
        message: format!("Crop task failed: {error}"),
    }
}
