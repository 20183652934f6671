//! Centralized filename conventions.
//!
//! Every display string derived from a photo filename goes through this
//! module, so captions, room labels, and output names stay consistent across
//! the image sets and all three documents.
//!
//! ## Humanized Labels
//!
//! Runs of underscores and hyphens become a single space, the result is
//! trimmed and title-cased:
//! - `Exterior_Front.jpg` → "Exterior Front" (room label)
//! - `master-bedroom__2.jpg` → "Master Bedroom 2"
//! - `IMG_1234.JPG` → "Img 1234"
//!
//! Captions are the same label terminated with a period.
//!
//! ## Output Names
//!
//! - Image variants: `NN_<original filename>` (`01_IMG_1234.jpg`)
//! - Thumbnails: `thumb_NN.jpg`
//! - Documents: property name with spaces replaced by underscores

use std::path::Path;

/// File stem of a base filename (`Kitchen.jpg` → `Kitchen`).
///
/// Falls back to the whole name when there is no stem.
fn file_stem(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
}

/// Title-case a string: a letter following a non-letter is upper-cased,
/// every other letter is lower-cased.
///
/// - `"living room"` → `"Living Room"`
/// - `"IMG 1234"` → `"Img 1234"`
/// - `"o'neil"` → `"O'Neil"`
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_letter = false;
    for c in text.chars() {
        if prev_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_letter = c.is_alphabetic();
    }
    out
}

/// Turn a filename stem into a display label.
///
/// Collapses each run of `_` / `-` into one space, trims, and title-cases.
pub fn humanize(stem: &str) -> String {
    let mut spaced = String::with_capacity(stem.len());
    let mut in_run = false;
    for c in stem.chars() {
        if c == '_' || c == '-' {
            if !in_run {
                spaced.push(' ');
            }
            in_run = true;
        } else {
            spaced.push(c);
            in_run = false;
        }
    }
    title_case(spaced.trim())
}

/// Room/area label for a photo: the humanized stem, no trailing period.
pub fn room_label(file_name: &str) -> String {
    humanize(file_stem(file_name))
}

/// Derive a caption from a filename.
///
/// Same as [`room_label`] but terminated with a period unless one is already
/// present, which makes the function idempotent on finished captions.
pub fn slug_to_caption(file_name: &str) -> String {
    let mut caption = room_label(file_name);
    if !caption.ends_with('.') {
        caption.push('.');
    }
    caption
}

/// Zero-padded sequence prefix (`1` → `01`, `123` → `123`).
pub fn sequence_prefix(index: usize) -> String {
    format!("{:02}", index)
}

/// Output name for a watermarked variant: `NN_<original filename>`.
pub fn sequenced_name(index: usize, file_name: &str) -> String {
    format!("{}_{}", sequence_prefix(index), file_name)
}

/// Output name for a thumbnail: `thumb_NN.jpg`.
pub fn thumbnail_name(index: usize) -> String {
    format!("thumb_{}.jpg", sequence_prefix(index))
}

/// Stem shared by the three documents: property name, spaces → underscores.
pub fn document_stem(property_name: &str) -> String {
    property_name.replace(' ', "_")
}
