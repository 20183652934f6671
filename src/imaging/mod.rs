//! Image processing: pure Rust, no external tools.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode + orient** | `image::ImageReader` + EXIF orientation |
//! | **Watermark** | Lanczos3 logo resize, alpha scale, `imageops::overlay` |
//! | **Web / thumbnail** | `resize_exact` with Lanczos3 |
//! | **Inline preview** | bounded resize, flatten onto white, JPEG, base64 |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining naming, calculations and backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend, JpegPreview, Logo, VariantOutput};
pub use calculations::{Placement, fit_longer_side, fit_within, scale_alpha, watermark_placement};
pub use operations::{
    GeneratedVariants, OutputDirs, VariantConfig, create_variants, plan_variants, preview_base64,
};
pub use params::{EncodeTarget, PreviewParams, Quality, VariantParams, WatermarkSpec};
pub use rust_backend::RustBackend;
