//! Caption resolution.
//!
//! Each photo gets a caption from one of two sources. The first non-empty
//! value wins:
//!
//! 1. The captions table: a CSV with a `filename,caption` header row, keyed
//!    by base filename (`Kitchen.jpg`, not `Upstairs/Kitchen.jpg`).
//! 2. The filename itself, humanized and period-terminated
//!    (see [`naming::slug_to_caption`]).
//!
//! Resolution never fails. A table that cannot be read is an error at load
//! time, not at lookup time.

use crate::naming;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptionError {
    #[error("Cannot read captions table {path}: {source}")]
    Csv {
        path: std::path::PathBuf,
        source: csv::Error,
    },
}

/// Filename → caption text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptionTable(HashMap<String, String>);

impl CaptionTable {
    /// Number of usable entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Table entry for a base filename, if present and non-empty.
    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.0.get(file_name).map(String::as_str)
    }

    /// Caption for a base filename: table entry, else derived from the name.
    pub fn resolve(&self, file_name: &str) -> String {
        resolve(&[self.get(file_name)]).unwrap_or_else(|| naming::slug_to_caption(file_name))
    }
}

impl FromIterator<(String, String)> for CaptionTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(f, c)| (f.trim().to_string(), c.trim().to_string()))
                .filter(|(f, c)| !f.is_empty() && !c.is_empty())
                .collect(),
        )
    }
}

/// Resolve a caption from prioritized sources: first non-empty (trimmed)
/// value wins.
fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Parse a captions CSV from any reader.
///
/// Columns are found by header name. Rows missing a filename or a caption
/// (short rows included) are skipped, as is every row when the header has
/// no `filename` or `caption` column. Extra columns are ignored. When a
/// filename appears twice the later row wins.
pub fn parse_captions<R: std::io::Read>(reader: R) -> Result<CaptionTable, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let (Some(filename), Some(caption)) = (column("filename"), column("caption")) else {
        log::warn!("captions table has no filename/caption header; ignoring it");
        return Ok(CaptionTable::default());
    };

    let mut pairs = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        pairs.push((field(filename), field(caption)));
    }
    Ok(pairs.into_iter().collect())
}

/// Load the captions table at `path`.
pub fn load_captions_csv(path: &Path) -> Result<CaptionTable, CaptionError> {
    let file = std::fs::File::open(path).map_err(|e| CaptionError::Csv {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    let table = parse_captions(file).map_err(|source| CaptionError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded {} captions from {}", table.len(), path.display());
    Ok(table)
}
