//! Document rendering.
//!
//! Three documents are produced from the same ordered [`RenderRow`]s:
//!
//! | Document | Renderer | File |
//! |---|---|---|
//! | Branded PDF table | [`pdf::render_pdf`] | `<Property>_Photo_Order_Branded.pdf` |
//! | Branded HTML table | [`html::render_table_html`] | `<Property>_Photo_Order_Branded.html` |
//! | Caption list | [`html::render_caption_list`] | `<Property>_Clean_Captions_List.html` |
//!
//! Renderers are pure with respect to the filesystem: they read images
//! through the [`ImageBackend`](crate::imaging::ImageBackend) and return
//! bytes or markup. The pipeline performs the only write.
//!
//! Images are embedded best-effort. A thumbnail or logo that cannot be
//! re-encoded is logged at `warn` and replaced by a placeholder; it never
//! fails the document.

pub mod fonts;
pub mod html;
pub mod pdf;

use crate::config::{BrandPalette, EmbedConfig};
use crate::imaging::{ImageBackend, JpegPreview, PreviewParams, Quality, preview_base64};
use crate::naming;
use crate::types::BrandProfile;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything a renderer needs besides the rows.
#[derive(Debug, Clone)]
pub struct DocumentContext<'a> {
    pub brand: &'a BrandProfile,
    pub palette: &'a BrandPalette,
    /// Logo image, embedded in every document header
    pub logo: &'a Path,
    /// Display date, e.g. "March 07, 2025"
    pub generated_on: String,
    pub embed: &'a EmbedConfig,
}

/// Date as shown in document headers (`%B %d, %Y`).
pub fn format_date(date: chrono::NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Today's date in the local timezone, formatted for headers.
pub fn today() -> String {
    format_date(chrono::Local::now().date_naive())
}

/// Output paths of the three documents.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DocumentPaths {
    pub pdf: PathBuf,
    pub table_html: PathBuf,
    pub caption_list: PathBuf,
}

impl DocumentPaths {
    /// Paths under `root`, named after the property (spaces → underscores).
    pub fn under(root: &Path, property: &str) -> Self {
        let stem = naming::document_stem(property);
        Self {
            pdf: root.join(format!("{stem}_Photo_Order_Branded.pdf")),
            table_html: root.join(format!("{stem}_Photo_Order_Branded.html")),
            caption_list: root.join(format!("{stem}_Clean_Captions_List.html")),
        }
    }
}

/// Best-effort JPEG preview; `None` (with a warning) when it cannot be made.
pub(crate) fn try_preview(
    backend: &impl ImageBackend,
    path: &Path,
    max_side: u32,
    quality: Quality,
) -> Option<JpegPreview> {
    backend
        .encode_preview(&PreviewParams {
            source: path.to_path_buf(),
            max_side,
            quality,
        })
        .inspect_err(|e| log::warn!("cannot embed {}: {}", path.display(), e))
        .ok()
}

/// Best-effort base64 preview; `None` (with a warning) when it cannot be made.
pub(crate) fn try_preview_base64(
    backend: &impl ImageBackend,
    path: &Path,
    max_side: u32,
    quality: Quality,
) -> Option<String> {
    preview_base64(backend, path, max_side, quality)
        .inspect_err(|e| log::warn!("cannot embed {}: {}", path.display(), e))
        .ok()
}
