//! Image generation backends.

pub(crate) mod provider;
pub(crate) mod rapidapi;

pub use provider::{GenerationRequest, ImageGenerator};
pub use rapidapi::RapidApiGenerator;
