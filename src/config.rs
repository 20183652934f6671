//! Pipeline configuration module.
//!
//! Handles loading, validating, and merging an optional `brandpack.toml`.
//! Stock defaults reproduce the standard deliverable (Red Canoe palette,
//! quality 95/85, 2560px web images, 600×400 thumbnails, 10% logo at 40%
//! opacity); a user file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [palette]
//! primary = "#8B1E24"       # Header rule, brand name in footers
//! accent = "#2E4A3B"        # Table header background
//! muted = "#4B5563"         # Dates, footers
//! border = "#E5E7EB"        # Table grid
//! stripe = "#F9FAFB"        # Even table rows (HTML)
//!
//! [images]
//! full_quality = 95         # Full-resolution watermarked set
//! web_quality = 85          # Web-optimized set
//! max_web_side = 2560       # Longer side of web images (px)
//!
//! [thumbnails]
//! max_width = 600
//! max_height = 400
//! quality = 85
//!
//! [watermark]
//! scale = 0.10              # Logo width as a fraction of image width
//! opacity = 0.40            # Multiplier applied to the logo alpha channel
//! margin = 0.02             # Distance from the bottom-right corner
//!
//! [embed]
//! thumbnail_size = 150      # Bounding box of inlined HTML thumbnails (px)
//! logo_size = 200           # Bounding box of the inlined HTML logo (px)
//! quality = 80              # JPEG quality of inlined images
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Pipeline configuration loaded from TOML.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Brand colors used by the document renderers.
    pub palette: BrandPalette,
    /// Encoder settings for the two watermarked sets.
    pub images: ImagesConfig,
    /// Thumbnail bounds and quality.
    pub thumbnails: ThumbnailsConfig,
    /// Logo overlay geometry.
    pub watermark: WatermarkConfig,
    /// Inline (base64) image sizes for the HTML documents.
    pub embed: EmbedConfig,
}

impl PipelineConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, quality) in [
            ("images.full_quality", self.images.full_quality),
            ("images.web_quality", self.images.web_quality),
            ("thumbnails.quality", self.thumbnails.quality),
            ("embed.quality", self.embed.quality),
        ] {
            if !(1..=100).contains(&quality) {
                return Err(ConfigError::Validation(format!("{key} must be 1-100")));
            }
        }
        for (key, size) in [
            ("images.max_web_side", self.images.max_web_side),
            ("thumbnails.max_width", self.thumbnails.max_width),
            ("thumbnails.max_height", self.thumbnails.max_height),
            ("embed.thumbnail_size", self.embed.thumbnail_size),
            ("embed.logo_size", self.embed.logo_size),
        ] {
            if size == 0 {
                return Err(ConfigError::Validation(format!("{key} must be non-zero")));
            }
        }
        let wm = &self.watermark;
        if !(wm.scale > 0.0 && wm.scale <= 1.0) {
            return Err(ConfigError::Validation(
                "watermark.scale must be in (0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&wm.opacity) {
            return Err(ConfigError::Validation(
                "watermark.opacity must be 0-1".into(),
            ));
        }
        if !(0.0..0.5).contains(&wm.margin) {
            return Err(ConfigError::Validation(
                "watermark.margin must be in [0, 0.5)".into(),
            ));
        }
        self.palette.validate()
    }
}

/// Brand colors, as `#RRGGBB` hex strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandPalette {
    /// Brand red: header rule and brand name in footers.
    pub primary: String,
    /// Forest green: table header background.
    pub accent: String,
    /// Secondary text: dates and footers.
    pub muted: String,
    /// Table grid lines.
    pub border: String,
    /// Background of even table rows in HTML.
    pub stripe: String,
}

impl Default for BrandPalette {
    fn default() -> Self {
        Self {
            primary: "#8B1E24".to_string(),
            accent: "#2E4A3B".to_string(),
            muted: "#4B5563".to_string(),
            border: "#E5E7EB".to_string(),
            stripe: "#F9FAFB".to_string(),
        }
    }
}

impl BrandPalette {
    fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("primary", &self.primary),
            ("accent", &self.accent),
            ("muted", &self.muted),
            ("border", &self.border),
            ("stripe", &self.stripe),
        ]
    }

    /// Every color must parse as `#RRGGBB`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in self.entries() {
            if parse_hex_color(value).is_none() {
                return Err(ConfigError::Validation(format!(
                    "palette.{key} must be a #RRGGBB color, got {value:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Parse `#RRGGBB` into 8-bit channels.
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Encoder settings for the full-resolution and web-optimized sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// JPEG quality of the full-resolution set.
    pub full_quality: u32,
    /// JPEG quality of the web-optimized set.
    pub web_quality: u32,
    /// Longer side (px) above which web images are scaled down.
    pub max_web_side: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            full_quality: 95,
            web_quality: 85,
            max_web_side: 2560,
        }
    }
}

/// Thumbnail settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub quality: u32,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            max_width: 600,
            max_height: 400,
            quality: 85,
        }
    }
}

/// Logo overlay geometry. Placement is always the bottom-right corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatermarkConfig {
    /// Logo width as a fraction of the photo width.
    pub scale: f64,
    /// Multiplier applied to every logo alpha value.
    pub opacity: f64,
    /// Margin from the right/bottom edge as a fraction of width/height.
    pub margin: f64,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            scale: 0.10,
            opacity: 0.40,
            margin: 0.02,
        }
    }
}

/// Sizes of images inlined as base64 into the HTML documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmbedConfig {
    pub thumbnail_size: u32,
    pub logo_size: u32,
    pub quality: u32,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            thumbnail_size: 150,
            logo_size: 200,
            quality: 80,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(PipelineConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<PipelineConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: PipelineConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the pipeline config.
///
/// `None` yields the validated stock defaults. A given path must exist and
/// contain valid TOML.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig, ConfigError> {
    let overlay = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Some(toml::from_str::<toml::Value>(&content)?)
        }
        None => None,
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# brandpack configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.
#
# Pass the file with: brandpack build --config brandpack.toml ...

# ---------------------------------------------------------------------------
# Brand palette (#RRGGBB)
# ---------------------------------------------------------------------------
[palette]
primary = "#8B1E24"   # Header rule, brand name in footers
accent = "#2E4A3B"    # Table header background
muted = "#4B5563"     # Dates and footer text
border = "#E5E7EB"    # Table grid lines
stripe = "#F9FAFB"    # Even table rows (HTML)

# ---------------------------------------------------------------------------
# Watermarked image sets
# ---------------------------------------------------------------------------
[images]
# JPEG quality (1-100) of photos_full_res_watermarked/
full_quality = 95

# JPEG quality (1-100) of photos_web_optimized_watermarked/
web_quality = 85

# Web images whose longer side exceeds this are scaled down to it.
# The --max-web-width flag overrides this value.
max_web_side = 2560

# ---------------------------------------------------------------------------
# Thumbnails (thumbnails/thumb_NN.jpg)
# ---------------------------------------------------------------------------
[thumbnails]
# Bounding box; aspect ratio is preserved and images are never upscaled.
max_width = 600
max_height = 400
quality = 85

# ---------------------------------------------------------------------------
# Logo watermark (always bottom-right)
# ---------------------------------------------------------------------------
[watermark]
# Logo width as a fraction of the photo width.
scale = 0.10

# Multiplier on the logo alpha channel: transparent stays transparent,
# opaque becomes 40% opaque.
opacity = 0.40

# Distance from the right and bottom edges, as a fraction of width/height.
margin = 0.02

# ---------------------------------------------------------------------------
# Images inlined into the HTML documents (base64 JPEG)
# ---------------------------------------------------------------------------
[embed]
thumbnail_size = 150
logo_size = 200
quality = 80
"##
}
