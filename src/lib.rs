//! # brandpack
//!
//! Turns a ZIP of property photos into a branded, ready-to-send deliverable:
//! watermarked photos in three sizes plus three documents listing the
//! sequence with room labels and captions.
//!
//! # Architecture: One Sequential Job
//!
//! ```text
//! 1. Extract    photos.zip        →  extracted/
//! 2. Order      extracted/        →  1..n   (order file, else room keywords)
//! 3. Caption    filename          →  caption (CSV table, else humanized name)
//! 4. Transform  photo + logo      →  full-res / web / thumbnail, watermarked
//! 5. Render     ordered rows      →  PDF table, HTML table, caption list
//! ```
//!
//! [`pipeline::run`] drives all five steps and finishes by writing
//! `manifest.json`, a JSON summary of what was produced. `check` runs steps
//! 1–3 against the archive listing only, without writing anything.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`archive`] | ZIP extraction and listing |
//! | [`scan`] | Photo discovery, filtering and tour ordering |
//! | [`captions`] | Caption table loading and per-photo resolution |
//! | [`naming`] | Filename → room label / caption, sequenced output names |
//! | [`imaging`] | Pure-Rust watermarking, resizing and JPEG previews |
//! | [`render`] | PDF (lopdf) and HTML (Maud) documents |
//! | [`pipeline`] | Orchestration, progress events, run manifest |
//! | [`config`] | Optional `brandpack.toml`: palette, qualities, sizes |
//! | [`types`] | Brand profile and render rows shared by all renderers |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Renderers Never Touch the Filesystem
//!
//! The three renderers are functions of `(rows, context, backend)` that
//! return bytes. Images reach them only through the
//! [`ImageBackend`](imaging::ImageBackend) trait, so tests swap in a mock
//! and inspect the output without encoding a single photo.
//!
//! ## Embeds Are Best-Effort, Photos Are Not
//!
//! A photo that cannot be decoded aborts the job: a deliverable with a hole
//! in the sequence is worse than none. A thumbnail or logo that cannot be
//! embedded in a document is replaced by a placeholder and logged.

pub mod archive;
pub mod captions;
pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod scan;
pub mod types;
