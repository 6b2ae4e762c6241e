//! Image pipeline components.
//!
//! - **fetch**: Download source images anonymously
//! - **decode**: Sniff the format and decode downloaded bytes
//! - **crop**: Center-crop to the banner frame and encode as JPEG
//! - **processor**: Generate a batch and fan the crops out

pub mod crop;
pub mod decode;
pub mod fetch;
pub mod processor;

// Re-exports for convenient access
pub use crop::{center_crop, encode_jpeg, CenterCropper, CropFrame, CropRegion};
pub use decode::{decode_bytes, DecodedImage};
pub use fetch::{HttpImageFetcher, ImageFetcher};
pub use processor::{ImagePipeline, PipelineOptions};
