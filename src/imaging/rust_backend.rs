//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, WebP) | `image::ImageReader` with content sniffing |
//! | EXIF orientation | `ImageDecoder::orientation` + `DynamicImage::apply_orientation` |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Watermark composite | `image::imageops::overlay` (alpha blend) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (quality) |
//! | Encode → PNG / WebP | `PngEncoder`, `WebPEncoder::new_lossless` |
//!
//! Outputs keep the source extension, so the encoder is chosen from the
//! output path. Quality only applies to JPEG; PNG and WebP are lossless.

use super::backend::{BackendError, ImageBackend, JpegPreview, Logo, VariantOutput};
use super::calculations::{fit_longer_side, fit_within, scale_alpha, watermark_placement};
use super::params::{PreviewParams, Quality, VariantParams, WatermarkSpec};
use image::imageops::{self, FilterType};
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader, Rgb, RgbImage, RgbaImage};
use std::borrow::Cow;
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_failed(path: &Path, e: impl std::fmt::Display) -> BackendError {
    BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
}

/// Decode an image and rotate/flip it so pixels match the EXIF orientation.
///
/// The format is sniffed from the content, so a PNG saved as `.jpg` still
/// decodes. Images without orientation metadata are returned as stored.
fn load_oriented(path: &Path) -> Result<DynamicImage, BackendError> {
    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()
        .map_err(|e| decode_failed(path, e))?;
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let mut img = DynamicImage::from_decoder(decoder).map_err(|e| decode_failed(path, e))?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Composite the logo into the bottom-right corner; returns opaque RGB.
///
/// The photo is never resized. Any source alpha is dropped after compositing.
fn apply_watermark(photo: &DynamicImage, logo: &RgbaImage, spec: &WatermarkSpec) -> RgbImage {
    let mut canvas = photo.to_rgba8();
    let placement = watermark_placement(
        canvas.dimensions(),
        logo.dimensions(),
        spec.scale,
        spec.margin,
    );

    let mut mark = imageops::resize(
        logo,
        placement.width,
        placement.height,
        FilterType::Lanczos3,
    );
    for pixel in mark.pixels_mut() {
        pixel[3] = scale_alpha(pixel[3], spec.opacity);
    }

    imageops::overlay(&mut canvas, &mark, placement.x, placement.y);
    DynamicImage::ImageRgba8(canvas).to_rgb8()
}

/// Blend every pixel over a white background.
fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    let rgba = img.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let p = rgba.get_pixel(x, y);
        let alpha = p[3] as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        Rgb([blend(p[0]), blend(p[1]), blend(p[2])])
    })
}

/// `img` at exactly `width × height`; borrowed when it already is.
fn resize_to(img: &DynamicImage, (width, height): (u32, u32)) -> Cow<'_, DynamicImage> {
    if img.width() == width && img.height() == height {
        Cow::Borrowed(img)
    } else {
        Cow::Owned(img.resize_exact(width, height, FilterType::Lanczos3))
    }
}

fn encode_failed(format: &str, path: &Path, e: impl std::fmt::Display) -> BackendError {
    BackendError::ProcessingFailed(format!(
        "{} encode failed for {}: {}",
        format,
        path.display(),
        e
    ))
}

/// Save an image, choosing the encoder from the output extension.
fn save_image(img: &DynamicImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !matches!(ext.as_str(), "jpg" | "jpeg" | "png" | "webp") {
        return Err(BackendError::ProcessingFailed(format!(
            "Unsupported output format: {}",
            ext
        )));
    }

    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);

    match ext.as_str() {
        "jpg" | "jpeg" => {
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                writer,
                quality.value() as u8,
            );
            img.write_with_encoder(encoder)
                .map_err(|e| encode_failed("JPEG", path, e))
        }
        "png" => img
            .write_with_encoder(image::codecs::png::PngEncoder::new(writer))
            .map_err(|e| encode_failed("PNG", path, e)),
        _ => img
            .write_with_encoder(image::codecs::webp::WebPEncoder::new_lossless(writer))
            .map_err(|e| encode_failed("WebP", path, e)),
    }
}

impl ImageBackend for RustBackend {
    fn load_logo(&self, path: &Path) -> Result<Logo, BackendError> {
        let img = load_oriented(path)?;
        if img.width() == 0 || img.height() == 0 {
            return Err(BackendError::ProcessingFailed(format!(
                "Logo {} has no pixels",
                path.display()
            )));
        }
        Ok(Logo {
            pixels: img.to_rgba8(),
        })
    }

    fn render_variants(
        &self,
        params: &VariantParams,
        logo: &Logo,
    ) -> Result<VariantOutput, BackendError> {
        let photo = load_oriented(&params.source)?;
        let source = (photo.width(), photo.height());
        let marked = DynamicImage::ImageRgb8(apply_watermark(&photo, &logo.pixels, &params.watermark));
        drop(photo);

        save_image(&marked, &params.full.path, params.full.quality)?;

        let web_dims = fit_longer_side(source, params.max_web_side);
        save_image(&resize_to(&marked, web_dims), &params.web.path, params.web.quality)?;

        let thumb_dims = fit_within(source, params.thumbnail_bounds);
        save_image(
            &resize_to(&marked, thumb_dims),
            &params.thumbnail.path,
            params.thumbnail.quality,
        )?;

        Ok(VariantOutput {
            source: source.into(),
            web: web_dims.into(),
            thumbnail: thumb_dims.into(),
        })
    }

    fn encode_preview(&self, params: &PreviewParams) -> Result<JpegPreview, BackendError> {
        let img = load_oriented(&params.source)?;
        let bounds = (params.max_side, params.max_side);
        let small = resize_to(&img, fit_within((img.width(), img.height()), bounds));
        let rgb = DynamicImage::ImageRgb8(flatten_onto_white(&small));

        let mut bytes = Vec::new();
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, params.quality.value() as u8);
        rgb.write_with_encoder(encoder)
            .map_err(|e| encode_failed("JPEG", &params.source, e))?;

        Ok(JpegPreview {
            bytes,
            width: rgb.width(),
            height: rgb.height(),
        })
    }
}
