//! Shared types used across pipeline stages.
//!
//! [`BrandProfile`] and [`RenderRow`] are the only data the three document
//! renderers consume, so they live here rather than in any one stage.

use serde::Serialize;
use std::path::PathBuf;

/// Display strings identifying who delivers the package and for which property.
///
/// Immutable once built from the command line; every renderer reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandProfile {
    /// Organization name, e.g. "Red Canoe Lodging"
    pub name: String,
    /// Property the photos belong to, e.g. "The Landmark"
    pub property: String,
    pub email: String,
    pub phone: String,
    pub site: String,
}

impl BrandProfile {
    /// `Brand — Property`, used as document title and header line.
    pub fn title(&self) -> String {
        format!("{} \u{2014} {}", self.name, self.property)
    }

    /// Contact parts in footer order: name, email, phone, site.
    pub fn contact_parts(&self) -> [&str; 4] {
        [&self.name, &self.email, &self.phone, &self.site]
    }

    /// `name • email • phone • site`
    pub fn contact_line(&self) -> String {
        self.contact_parts().join(" \u{2022} ")
    }
}

/// One line of every rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderRow {
    /// 1-based sequence index
    pub index: usize,
    /// Thumbnail written by the transformer (`thumbnails/thumb_NN.jpg`)
    pub thumbnail: PathBuf,
    /// Humanized filename, e.g. "Exterior Front"
    pub room: String,
    pub caption: String,
}
