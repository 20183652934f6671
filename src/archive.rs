//! ZIP archive extraction.
//!
//! The photo delivery arrives as a single ZIP. Extraction preserves the
//! archive's internal folder structure under the target directory; the
//! collector walks that tree afterwards, so nested folders (`Kitchen/`,
//! `Exterior/`) are fine.
//!
//! A missing or corrupt archive is fatal. Entry names that would land
//! outside the target directory (`../../etc/passwd`) are refused by the
//! `zip` crate's enclosed-name check.

use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Cannot open archive {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid ZIP archive {path}: {source}")]
    Zip {
        path: PathBuf,
        source: zip::result::ZipError,
    },
}

/// What an extraction produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Directory the entries were written to
    pub root: PathBuf,
    /// Number of archive entries (files and directories)
    pub entries: usize,
}

fn open_archive(zip_path: &Path) -> Result<zip::ZipArchive<File>, ArchiveError> {
    let file = File::open(zip_path).map_err(|source| ArchiveError::Open {
        path: zip_path.to_path_buf(),
        source,
    })?;
    zip::ZipArchive::new(file).map_err(|source| ArchiveError::Zip {
        path: zip_path.to_path_buf(),
        source,
    })
}

/// Extract every entry of `zip_path` into `target_dir`.
///
/// Creates `target_dir` if needed. Existing files with the same names are
/// overwritten, so re-running a job over the same output directory works.
pub fn extract(zip_path: &Path, target_dir: &Path) -> Result<Extraction, ArchiveError> {
    let mut archive = open_archive(zip_path)?;
    let entries = archive.len();
    log::debug!(
        "extracting {} entries from {} into {}",
        entries,
        zip_path.display(),
        target_dir.display()
    );
    archive
        .extract(target_dir)
        .map_err(|source| ArchiveError::Zip {
            path: zip_path.to_path_buf(),
            source,
        })?;
    Ok(Extraction {
        root: target_dir.to_path_buf(),
        entries,
    })
}

/// List the relative paths of the files stored in `zip_path`.
///
/// Directory entries and names that escape the archive root are skipped.
/// Nothing is written to disk.
pub fn list_entries(zip_path: &Path) -> Result<Vec<PathBuf>, ArchiveError> {
    let mut archive = open_archive(zip_path)?;
    let mut names = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive.by_index(i).map_err(|source| ArchiveError::Zip {
            path: zip_path.to_path_buf(),
            source,
        })?;
        if entry.is_dir() {
            continue;
        }
        match entry.enclosed_name() {
            Some(name) => names.push(name),
            None => log::warn!("skipping unsafe archive entry {:?}", entry.name()),
        }
    }
    Ok(names)
}
