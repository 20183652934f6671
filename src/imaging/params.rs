//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides file names, sizes and qualities) and the
//! [`backend`](super::backend) (which does the pixel work). Swapping the
//! backend for a mock in tests leaves the planning untouched.
//!
//! ## Types
//!
//! - [`Quality`]: lossy encoding quality (1–100, default 90). Clamped on construction.
//! - [`WatermarkSpec`]: logo scale, opacity and margin, as fractions.
//! - [`EncodeTarget`]: an output path plus the quality to write it at.
//! - [`VariantParams`]: everything needed to turn one photo into its three outputs.
//! - [`PreviewParams`]: a small inline JPEG for the HTML and PDF documents.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Logo overlay geometry; placement is always bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatermarkSpec {
    /// Logo width as a fraction of photo width.
    pub scale: f64,
    /// Multiplier applied to the logo's alpha channel.
    pub opacity: f64,
    /// Right/bottom margin as a fraction of photo width/height.
    pub margin: f64,
}

impl Default for WatermarkSpec {
    fn default() -> Self {
        Self {
            scale: 0.10,
            opacity: 0.40,
            margin: 0.02,
        }
    }
}

/// One encoded output file.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeTarget {
    pub path: PathBuf,
    pub quality: Quality,
}

/// Parameters for producing the three variants of one photo.
///
/// The photo is decoded once, oriented and watermarked, then written as:
/// full resolution, web size (longer side capped at `max_web_side`) and a
/// thumbnail fitted into `thumbnail_bounds`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantParams {
    pub source: PathBuf,
    pub full: EncodeTarget,
    pub web: EncodeTarget,
    pub max_web_side: u32,
    pub thumbnail: EncodeTarget,
    pub thumbnail_bounds: (u32, u32),
    pub watermark: WatermarkSpec,
}

/// Parameters for an inline preview (bounded square box, JPEG).
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewParams {
    pub source: PathBuf,
    pub max_side: u32,
    pub quality: Quality,
}
