//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.
//! Truncation (not rounding) is used wherever the deliverable's sizes are
//! defined as `floor(...)`, so outputs are reproducible to the pixel.

/// Where and how large the logo lands on a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Scaled logo width.
    pub width: u32,
    /// Scaled logo height.
    pub height: u32,
    /// Left edge of the logo on the photo (may be negative for oversized logos).
    pub x: i64,
    /// Top edge of the logo on the photo.
    pub y: i64,
}

/// Size and position a logo in the bottom-right corner of a photo.
///
/// - logo width = `floor(photo_width * scale)`, at least 1
/// - logo height keeps the logo's aspect ratio, truncated, at least 1
/// - right margin = `floor(photo_width * margin)`,
///   bottom margin = `floor(photo_height * margin)`
///
/// # Examples
/// ```
/// # use brandpack::imaging::watermark_placement;
/// let p = watermark_placement((4000, 3000), (500, 200), 0.10, 0.02);
/// assert_eq!((p.width, p.height), (400, 160));
/// assert_eq!((p.x, p.y), (4000 - 400 - 80, 3000 - 160 - 60));
/// ```
pub fn watermark_placement(
    photo: (u32, u32),
    logo: (u32, u32),
    scale: f64,
    margin: f64,
) -> Placement {
    let (photo_w, photo_h) = photo;
    let (logo_w, logo_h) = (logo.0.max(1), logo.1.max(1));

    let width = ((photo_w as f64 * scale) as u32).max(1);
    let ratio = width as f64 / logo_w as f64;
    let height = ((logo_h as f64 * ratio) as u32).max(1);

    let margin_x = (photo_w as f64 * margin) as i64;
    let margin_y = (photo_h as f64 * margin) as i64;

    Placement {
        width,
        height,
        x: photo_w as i64 - width as i64 - margin_x,
        y: photo_h as i64 - height as i64 - margin_y,
    }
}

/// Scale an 8-bit alpha value by `opacity`, truncating.
pub fn scale_alpha(alpha: u8, opacity: f64) -> u8 {
    (alpha as f64 * opacity).clamp(0.0, 255.0) as u8
}

/// Cap the longer side of an image at `max_side`.
///
/// Images already within the limit are returned unchanged. Otherwise the
/// longer side becomes `max_side` and the other is scaled proportionally,
/// truncated (never below 1). Square images count as portrait.
///
/// # Examples
/// ```
/// # use brandpack::imaging::fit_longer_side;
/// assert_eq!(fit_longer_side((5000, 3000), 2560), (2560, 1536));
/// assert_eq!(fit_longer_side((2000, 1000), 2560), (2000, 1000));
/// ```
pub fn fit_longer_side(dims: (u32, u32), max_side: u32) -> (u32, u32) {
    let (w, h) = dims;
    if w.max(h) <= max_side {
        return dims;
    }
    let scaled = |other: u32, longer: u32| {
        ((other as u64 * max_side as u64 / longer as u64) as u32).max(1)
    };
    if w > h {
        (max_side, scaled(h, w))
    } else {
        (scaled(w, h), max_side)
    }
}

/// Shrink an image to fit inside `bounds`, preserving aspect ratio.
///
/// Never upscales: an image already inside the box is returned unchanged.
/// Both sides are rounded and kept within `1..=bound`.
pub fn fit_within(dims: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (w, h) = dims;
    let (max_w, max_h) = bounds;
    if w <= max_w && h <= max_h {
        return dims;
    }
    let ratio = (max_w as f64 / w as f64).min(max_h as f64 / h as f64);
    let fit = |side: u32, bound: u32| ((side as f64 * ratio).round() as u32).clamp(1, bound.max(1));
    (fit(w, max_w), fit(h, max_h))
}
