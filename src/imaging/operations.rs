//! High-level image operations.
//!
//! These functions combine naming and calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend, Logo};
use super::params::{EncodeTarget, PreviewParams, Quality, VariantParams, WatermarkSpec};
use crate::config::PipelineConfig;
use crate::naming;
use crate::scan::OrderedItem;
use base64::Engine;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

pub const FULL_RES_DIR: &str = "photos_full_res_watermarked";
pub const WEB_DIR: &str = "photos_web_optimized_watermarked";
pub const THUMBNAILS_DIR: &str = "thumbnails";

/// The three image output directories under the run's output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    pub full: PathBuf,
    pub web: PathBuf,
    pub thumbnails: PathBuf,
}

impl OutputDirs {
    pub fn under(root: &Path) -> Self {
        Self {
            full: root.join(FULL_RES_DIR),
            web: root.join(WEB_DIR),
            thumbnails: root.join(THUMBNAILS_DIR),
        }
    }

    /// Create all three directories (existing ones are fine).
    pub fn create(&self) -> std::io::Result<()> {
        for dir in [&self.full, &self.web, &self.thumbnails] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

/// Encoder and geometry settings for the per-photo variants.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantConfig {
    pub full_quality: Quality,
    pub web_quality: Quality,
    pub max_web_side: u32,
    pub thumbnail_bounds: (u32, u32),
    pub thumbnail_quality: Quality,
    pub watermark: WatermarkSpec,
}

impl VariantConfig {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            full_quality: Quality::new(config.images.full_quality),
            web_quality: Quality::new(config.images.web_quality),
            max_web_side: config.images.max_web_side,
            thumbnail_bounds: (config.thumbnails.max_width, config.thumbnails.max_height),
            thumbnail_quality: Quality::new(config.thumbnails.quality),
            watermark: WatermarkSpec {
                scale: config.watermark.scale,
                opacity: config.watermark.opacity,
                margin: config.watermark.margin,
            },
        }
    }
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

/// Plan the variants of one photo without executing anything.
///
/// Full and web outputs are `NN_<filename>` in their directories; the
/// thumbnail is `thumb_NN.jpg`.
pub fn plan_variants(item: &OrderedItem, dirs: &OutputDirs, config: &VariantConfig) -> VariantParams {
    let sequenced = naming::sequenced_name(item.index, &item.image.file_name);
    VariantParams {
        source: item.image.path.clone(),
        full: EncodeTarget {
            path: dirs.full.join(&sequenced),
            quality: config.full_quality,
        },
        web: EncodeTarget {
            path: dirs.web.join(&sequenced),
            quality: config.web_quality,
        },
        max_web_side: config.max_web_side,
        thumbnail: EncodeTarget {
            path: dirs.thumbnails.join(naming::thumbnail_name(item.index)),
            quality: config.thumbnail_quality,
        },
        thumbnail_bounds: config.thumbnail_bounds,
        watermark: config.watermark,
    }
}

/// What was written for one photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedVariants {
    pub full_path: PathBuf,
    pub web_path: PathBuf,
    pub thumbnail_path: PathBuf,
    pub source: Dimensions,
    pub web: Dimensions,
    pub thumbnail: Dimensions,
}

/// Watermark one photo and write its three variants.
pub fn create_variants(
    backend: &impl ImageBackend,
    item: &OrderedItem,
    dirs: &OutputDirs,
    config: &VariantConfig,
    logo: &Logo,
) -> Result<GeneratedVariants> {
    let params = plan_variants(item, dirs, config);
    let output = backend.render_variants(&params, logo)?;
    Ok(GeneratedVariants {
        full_path: params.full.path,
        web_path: params.web.path,
        thumbnail_path: params.thumbnail.path,
        source: output.source,
        web: output.web,
        thumbnail: output.thumbnail,
    })
}

/// Base64 of a bounded JPEG preview, for `data:image/jpeg;base64,` URIs.
pub fn preview_base64(
    backend: &impl ImageBackend,
    path: &Path,
    max_side: u32,
    quality: Quality,
) -> Result<String> {
    let preview = backend.encode_preview(&PreviewParams {
        source: path.to_path_buf(),
        max_side,
        quality,
    })?;
    Ok(base64::engine::general_purpose::STANDARD.encode(&preview.bytes))
}
