//! End-to-end job orchestration.
//!
//! ```text
//! ZIP ──extract──▶ extracted/ ──collect──▶ photos ──order──▶ 1..n
//!                                                           │
//!           captions.csv ─┐                                 ▼
//!                         ├──▶ RenderRow ◀── watermark + variants (full / web / thumb)
//!        filename slug ───┘        │
//!                                  ▼
//!                  PDF table · HTML table · caption list · manifest.json
//! ```
//!
//! Every stage is sequential: one photo is decoded, watermarked, written in
//! its three variants and dropped before the next one is opened. Progress
//! is reported as [`PipelineEvent`]s through a caller-supplied callback;
//! formatting them is the job of [`crate::output`].
//!
//! Fatal conditions (archive unreadable, no photos, logo unreadable, any
//! photo that fails to decode or write) abort the job before any document
//! is written. An order file or captions CSV that was given but does not
//! exist is skipped with a warning.

use crate::archive::{self, ArchiveError};
use crate::captions::{self, CaptionError, CaptionTable};
use crate::config::{ConfigError, PipelineConfig};
use crate::imaging::{
    BackendError, Dimensions, ImageBackend, OutputDirs, RustBackend, VariantConfig,
    create_variants,
};
use crate::naming;
use crate::render::{self, DocumentContext, DocumentPaths, RenderError};
use crate::scan::{self, OrderedItem, ScanError};
use crate::types::{BrandProfile, RenderRow};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory under the output root that receives the archive contents.
pub const EXTRACTED_DIR: &str = "extracted";

/// Name of the run summary written next to the documents.
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Captions(#[from] CaptionError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Inputs of one build, as given on the command line.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub zip: PathBuf,
    pub logo: PathBuf,
    pub brand: BrandProfile,
    pub outdir: PathBuf,
    pub order_file: Option<PathBuf>,
    pub captions_csv: Option<PathBuf>,
}

/// Progress reported while a build runs.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// Archive unpacked.
    Extracted { entries: usize, root: PathBuf },
    /// Photos collected and ordered.
    Ordered { count: usize, explicit: bool },
    /// One photo watermarked and written in all three variants.
    ImageProcessed {
        index: usize,
        total: usize,
        relative: PathBuf,
        room: String,
        source: Dimensions,
        web: Dimensions,
        thumbnail: Dimensions,
    },
    /// A document or the manifest was written.
    DocumentWritten { label: &'static str, path: PathBuf },
}

/// The planned sequence of a job, without any image work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    /// Files in the archive (directories excluded)
    pub entries: usize,
    /// Whether an order file drove the sequence
    pub explicit: bool,
    pub items: Vec<PlannedItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedItem {
    pub index: usize,
    /// Path inside the archive
    pub relative: PathBuf,
    pub room: String,
    pub caption: String,
}

/// Summary of a finished build, serialized as `manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunManifest {
    pub brand: BrandProfile,
    pub generated_on: String,
    pub items: Vec<ManifestItem>,
    pub documents: DocumentPaths,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestItem {
    pub index: usize,
    pub source: PathBuf,
    pub full: PathBuf,
    pub web: PathBuf,
    pub thumbnail: PathBuf,
    pub dimensions: ItemDimensions,
    pub room: String,
    pub caption: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemDimensions {
    pub source: Dimensions,
    pub web: Dimensions,
    pub thumbnail: Dimensions,
}

/// Read the order file if one was given and exists.
fn load_order(path: Option<&Path>) -> Result<Option<Vec<String>>, ScanError> {
    match path {
        Some(path) if path.is_file() => {
            let names = scan::read_order_file(path)?;
            log::debug!("{} names in order file {}", names.len(), path.display());
            Ok(Some(names))
        }
        Some(path) => {
            log::warn!(
                "order file {} not found; using keyword ranking",
                path.display()
            );
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Read the captions CSV if one was given and exists; otherwise an empty table.
fn load_captions(path: Option<&Path>) -> Result<CaptionTable, CaptionError> {
    match path {
        Some(path) if path.is_file() => captions::load_captions_csv(path),
        Some(path) => {
            log::warn!(
                "captions file {} not found; captions derived from filenames",
                path.display()
            );
            Ok(CaptionTable::default())
        }
        None => Ok(CaptionTable::default()),
    }
}

/// Room label and caption for one photo.
fn describe(item: &OrderedItem, captions: &CaptionTable) -> (String, String) {
    (
        naming::room_label(&item.image.file_name),
        captions.resolve(&item.image.file_name),
    )
}

/// Plan a job from the archive listing alone.
///
/// Applies the same filtering, ordering and caption resolution as a build
/// but extracts and writes nothing.
pub fn plan(
    zip: &Path,
    order_file: Option<&Path>,
    captions_csv: Option<&Path>,
) -> Result<Plan, PipelineError> {
    let entries = archive::list_entries(zip)?;
    let images = scan::images_from_entries(&entries);
    scan::require_images(&images, zip)?;

    let order = load_order(order_file)?;
    let captions = load_captions(captions_csv)?;
    let ordered = scan::order_images(images, order.as_deref());

    let items = ordered
        .iter()
        .map(|item| {
            let (room, caption) = describe(item, &captions);
            PlannedItem {
                index: item.index,
                relative: item.image.relative.clone(),
                room,
                caption,
            }
        })
        .collect();

    Ok(Plan {
        entries: entries.len(),
        explicit: order.is_some(),
        items,
    })
}

/// Run a full build with the pure-Rust image backend, dated today.
pub fn run(
    request: &BuildRequest,
    config: &PipelineConfig,
    report: &mut dyn FnMut(&PipelineEvent),
) -> Result<RunManifest, PipelineError> {
    run_with_backend(&RustBackend::new(), request, config, render::today(), report)
}

/// Run a full build with a specific backend and header date (allows testing with mock).
pub fn run_with_backend(
    backend: &impl ImageBackend,
    request: &BuildRequest,
    config: &PipelineConfig,
    generated_on: String,
    report: &mut dyn FnMut(&PipelineEvent),
) -> Result<RunManifest, PipelineError> {
    config.validate()?;
    let outdir = &request.outdir;
    std::fs::create_dir_all(outdir)?;

    // 1. Extract
    let extraction = archive::extract(&request.zip, &outdir.join(EXTRACTED_DIR))?;
    report(&PipelineEvent::Extracted {
        entries: extraction.entries,
        root: extraction.root.clone(),
    });

    // 2. Collect and order
    let images = scan::collect_images(&extraction.root)?;
    scan::require_images(&images, &extraction.root)?;
    let order = load_order(request.order_file.as_deref())?;
    let ordered = scan::order_images(images, order.as_deref());
    report(&PipelineEvent::Ordered {
        count: ordered.len(),
        explicit: order.is_some(),
    });

    let captions = load_captions(request.captions_csv.as_deref())?;

    // 3. Watermark and write variants
    let logo = backend.load_logo(&request.logo)?;
    let dirs = OutputDirs::under(outdir);
    dirs.create()?;
    let variant_config = VariantConfig::from_config(config);

    let total = ordered.len();
    let mut rows = Vec::with_capacity(total);
    let mut items = Vec::with_capacity(total);
    for item in &ordered {
        let generated = create_variants(backend, item, &dirs, &variant_config, &logo)?;
        let (room, caption) = describe(item, &captions);

        report(&PipelineEvent::ImageProcessed {
            index: item.index,
            total,
            relative: item.image.relative.clone(),
            room: room.clone(),
            source: generated.source,
            web: generated.web,
            thumbnail: generated.thumbnail,
        });

        rows.push(RenderRow {
            index: item.index,
            thumbnail: generated.thumbnail_path.clone(),
            room: room.clone(),
            caption: caption.clone(),
        });
        items.push(ManifestItem {
            index: item.index,
            source: item.image.relative.clone(),
            full: generated.full_path,
            web: generated.web_path,
            thumbnail: generated.thumbnail_path,
            dimensions: ItemDimensions {
                source: generated.source,
                web: generated.web,
                thumbnail: generated.thumbnail,
            },
            room,
            caption,
        });
    }

    // 4. Documents
    let ctx = DocumentContext {
        brand: &request.brand,
        palette: &config.palette,
        logo: &request.logo,
        generated_on: generated_on.clone(),
        embed: &config.embed,
    };
    let documents = DocumentPaths::under(outdir, &request.brand.property);

    let pdf = render::pdf::render_pdf(&rows, &ctx, backend)?;
    std::fs::write(&documents.pdf, pdf)?;
    report(&PipelineEvent::DocumentWritten {
        label: "PDF table",
        path: documents.pdf.clone(),
    });

    let table = render::html::render_table_html(&rows, &ctx, backend);
    std::fs::write(&documents.table_html, table)?;
    report(&PipelineEvent::DocumentWritten {
        label: "HTML table",
        path: documents.table_html.clone(),
    });

    let list = render::html::render_caption_list(&rows, &ctx, backend);
    std::fs::write(&documents.caption_list, list)?;
    report(&PipelineEvent::DocumentWritten {
        label: "Caption list",
        path: documents.caption_list.clone(),
    });

    // 5. Manifest
    let manifest = RunManifest {
        brand: request.brand.clone(),
        generated_on,
        items,
        documents,
    };
    let manifest_path = outdir.join(MANIFEST_FILE);
    std::fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;
    report(&PipelineEvent::DocumentWritten {
        label: "Manifest",
        path: manifest_path,
    });

    Ok(manifest)
}
