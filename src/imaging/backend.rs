//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations the pipeline
//! needs from pixels: load the logo, render one photo's watermarked
//! variants, and encode a small inline preview.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording `MockBackend` below.

use super::params::{PreviewParams, VariantParams};
use image::RgbaImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Decoded watermark logo, kept in memory for the whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct Logo {
    pub pixels: RgbaImage,
}

impl Logo {
    pub fn dimensions(&self) -> Dimensions {
        self.pixels.dimensions().into()
    }
}

/// Sizes of the files written for one photo.
///
/// The full-resolution output always has the oriented source dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantOutput {
    pub source: Dimensions,
    pub web: Dimensions,
    pub thumbnail: Dimensions,
}

/// JPEG bytes for inline embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JpegPreview {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// The pipeline is single-threaded, so there is no `Sync` bound.
pub trait ImageBackend {
    /// Decode the watermark logo (any alpha is kept).
    fn load_logo(&self, path: &Path) -> Result<Logo, BackendError>;

    /// Decode, orient and watermark a photo, then write its full-resolution,
    /// web and thumbnail outputs.
    fn render_variants(
        &self,
        params: &VariantParams,
        logo: &Logo,
    ) -> Result<VariantOutput, BackendError>;

    /// Downsize an image into a square box and re-encode it as an opaque JPEG.
    fn encode_preview(&self, params: &PreviewParams) -> Result<JpegPreview, BackendError>;
}
