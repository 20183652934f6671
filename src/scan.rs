//! Image collection and tour ordering.
//!
//! Walks the extracted archive, keeps the photos, and decides the order in
//! which they are numbered. The order matters to guests: a gallery should
//! read like a walk through the property, outside first, then living areas,
//! kitchen, bedrooms, and finally the lake and the neighborhood.
//!
//! ## Filtering
//!
//! A file is a photo when its extension (any case) is one of
//! [`IMAGE_EXTENSIONS`] and its name does not start with `._`. Those are the
//! AppleDouble resource forks macOS adds to ZIPs (they also live under
//! `__MACOSX/`, which the same rule covers).
//!
//! ## Ordering
//!
//! ```text
//! explicit list given:  listed names (list order) ++ rest by (rank, filename)
//! no list:              everything by (rank, filename)
//! ```
//!
//! The rank comes from [`keyword_rank`]; sorting is stable over the baseline
//! lexicographic path order, so ties keep folder order.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("No images found in ZIP (looked in {0})")]
    NoImages(PathBuf),
}

/// File extensions treated as photos (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Filename prefix of macOS metadata files.
const METADATA_PREFIX: &str = "._";

/// Room keywords in tour order. Lower priority sorts first.
const KEYWORD_PRIORITIES: &[(&str, u32)] = &[
    ("exterior", 0),
    ("front", 1),
    ("aerial", 1),
    ("living", 2),
    ("fireplace", 3),
    ("kitchen", 4),
    ("dining", 5),
    ("bedroom", 6),
    ("bath", 7),
    ("deck", 8),
    ("dock", 9),
    ("lake", 10),
    ("twilight", 11),
    ("local", 12),
];

/// Rank of a name that matches no keyword.
pub const UNRANKED: u32 = 50;

/// A photo discovered in the extracted archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Full path on disk
    pub path: PathBuf,
    /// Path relative to the extraction root (`Upstairs/Bedroom.jpg`)
    pub relative: PathBuf,
    /// Base filename (`Bedroom.jpg`)
    pub file_name: String,
}

impl SourceImage {
    fn new(path: PathBuf, relative: PathBuf) -> Option<Self> {
        let file_name = relative.file_name()?.to_string_lossy().into_owned();
        Some(Self {
            path,
            relative,
            file_name,
        })
    }

    /// Tour rank of this photo; folder names count too.
    pub fn rank(&self) -> u32 {
        keyword_rank(&self.relative.to_string_lossy())
    }
}

/// A photo with its final 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedItem {
    pub index: usize,
    pub image: SourceImage,
}

/// Whether a relative path names a photo we process.
pub fn is_image(relative: &Path) -> bool {
    let Some(name) = relative.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };
    if name.starts_with(METADATA_PREFIX) {
        return false;
    }
    let ext = relative
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Priority of a name under the room keyword table.
///
/// The name is lower-cased and every keyword it contains is considered; the
/// smallest priority wins. Names with no keyword get [`UNRANKED`].
///
/// ```
/// # use brandpack::scan::keyword_rank;
/// assert_eq!(keyword_rank("Exterior_Front.jpg"), 0);
/// assert_eq!(keyword_rank("Kitchen.jpg"), 4);
/// assert_eq!(keyword_rank("IMG_1234.jpg"), 50);
/// ```
pub fn keyword_rank(name: &str) -> u32 {
    let lower = name.to_lowercase();
    KEYWORD_PRIORITIES
        .iter()
        .filter(|(keyword, _)| lower.contains(keyword))
        .map(|&(_, priority)| priority)
        .min()
        .unwrap_or(UNRANKED)
}

/// Recursively collect photos under `root`, sorted by path.
pub fn collect_images(root: &Path) -> Result<Vec<SourceImage>, ScanError> {
    let mut images = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| ScanError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();
        if !is_image(&relative) {
            continue;
        }
        if let Some(image) = SourceImage::new(entry.path().to_path_buf(), relative) {
            images.push(image);
        }
    }
    images.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(images)
}

/// Build the photo set from archive entry names, without extracting.
///
/// Paths stay relative; used by the `check` command.
pub fn images_from_entries(entries: &[PathBuf]) -> Vec<SourceImage> {
    let mut images: Vec<SourceImage> = entries
        .iter()
        .filter(|p| is_image(p))
        .filter_map(|p| SourceImage::new(p.clone(), p.clone()))
        .collect();
    images.sort_by(|a, b| a.path.cmp(&b.path));
    images
}

/// Fail with [`ScanError::NoImages`] when nothing survived filtering.
pub fn require_images(images: &[SourceImage], searched: &Path) -> Result<(), ScanError> {
    if images.is_empty() {
        return Err(ScanError::NoImages(searched.to_path_buf()));
    }
    Ok(())
}

fn sort_by_rank(images: &mut [SourceImage]) {
    images.sort_by_cached_key(|img| (img.rank(), img.file_name.clone()));
}

/// Decide the final processing order and assign indices `1..=n`.
///
/// With `explicit`, photos whose base filename matches a listed name come
/// first, in list order; a name matching several photos (same filename in
/// different folders) takes them in baseline order, and a name listed twice
/// is only used once. Everything not listed follows, sorted by
/// `(keyword rank, filename)`. Without a list the whole set is rank-sorted.
///
/// The result is always a permutation of `images`.
pub fn order_images(images: Vec<SourceImage>, explicit: Option<&[String]>) -> Vec<OrderedItem> {
    let ordered = match explicit {
        Some(names) => {
            let mut slots: Vec<Option<SourceImage>> = images.into_iter().map(Some).collect();
            let mut seen = HashSet::new();
            let mut listed = Vec::new();
            for name in names {
                if !seen.insert(name.as_str()) {
                    continue;
                }
                for slot in slots.iter_mut() {
                    if slot.as_ref().is_some_and(|img| &img.file_name == name) {
                        listed.extend(slot.take());
                    }
                }
            }
            let mut remaining: Vec<SourceImage> = slots.into_iter().flatten().collect();
            sort_by_rank(&mut remaining);
            listed.extend(remaining);
            listed
        }
        None => {
            let mut all = images;
            sort_by_rank(&mut all);
            all
        }
    };

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, image)| OrderedItem {
            index: i + 1,
            image,
        })
        .collect()
}

/// Read an order file: one filename per line, highest priority first.
///
/// Lines are trimmed; blank lines are skipped.
pub fn read_order_file(path: &Path) -> Result<Vec<String>, ScanError> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn img(relative: &str) -> SourceImage {
        SourceImage::new(PathBuf::from("/x").join(relative), PathBuf::from(relative)).unwrap()
    }

    fn names(items: &[OrderedItem]) -> Vec<&str> {
        items.iter().map(|i| i.image.file_name.as_str()).collect()
    }

    // =========================================================================
    // keyword_rank
    // =========================================================================

    #[test]
    fn rank_matches_table() {
        assert_eq!(keyword_rank("exterior.jpg"), 0);
        assert_eq!(keyword_rank("Front_Porch.jpg"), 1);
        assert_eq!(keyword_rank("AERIAL.JPG"), 1);
        assert_eq!(keyword_rank("living.jpg"), 2);
        assert_eq!(keyword_rank("bath.jpg"), 7);
        assert_eq!(keyword_rank("local_coffee.jpg"), 12);
    }

    #[test]
    fn rank_takes_minimum_of_matches() {
        // "lake" (10) and "front" (1)
        assert_eq!(keyword_rank("lake_front.jpg"), 1);
        // "kitchen" (4) and "dining" (5)
        assert_eq!(keyword_rank("dining_and_kitchen.jpg"), 4);
    }

    #[test]
    fn rank_unmatched_is_fifty() {
        assert_eq!(keyword_rank("IMG_0001.jpg"), UNRANKED);
        assert_eq!(keyword_rank(""), UNRANKED);
    }

    #[test]
    fn rank_matches_substrings() {
        // "bathroom" contains "bath", "master_bedroom" contains "bedroom"
        assert_eq!(keyword_rank("bathroom_2.jpg"), 7);
        assert_eq!(keyword_rank("master_bedroom.jpg"), 6);
    }

    #[test]
    fn source_rank_counts_folder_names() {
        assert_eq!(img("Kitchen/IMG_1.jpg").rank(), 4);
        assert_eq!(img("misc/IMG_1.jpg").rank(), UNRANKED);
    }

    #[test]
    fn kitchen_never_sorts_before_exterior() {
        let ordered = order_images(
            vec![
                img("a_kitchen.jpg"),
                img("z_exterior.jpg"),
                img("kitchen_exterior_mix.jpg"),
            ],
            None,
        );
        let pos = |n: &str| ordered.iter().position(|i| i.image.file_name == n).unwrap();
        assert!(pos("z_exterior.jpg") < pos("a_kitchen.jpg"));
    }

    // =========================================================================
    // is_image
    // =========================================================================

    #[test]
    fn is_image_accepts_known_extensions_any_case() {
        for name in ["a.jpg", "a.JPG", "a.jpeg", "a.Png", "a.webp"] {
            assert!(is_image(Path::new(name)), "{name}");
        }
    }

    #[test]
    fn is_image_rejects_other_files() {
        for name in ["a.txt", "a.heic", "a.tif", "noext", "a.jpg.bak"] {
            assert!(!is_image(Path::new(name)), "{name}");
        }
    }

    #[test]
    fn is_image_rejects_metadata_prefix() {
        assert!(!is_image(Path::new("._Kitchen.jpg")));
        assert!(!is_image(Path::new("__MACOSX/._Kitchen.jpg")));
    }

    // =========================================================================
    // order_images
    // =========================================================================

    #[test]
    fn order_without_list_sorts_by_rank_then_name() {
        let ordered = order_images(
            vec![
                img("Kitchen.jpg"),
                img("IMG_2.jpg"),
                img("Exterior_Front.jpg"),
                img("IMG_1.jpg"),
                img("Bedroom.jpg"),
            ],
            None,
        );
        assert_eq!(
            names(&ordered),
            vec![
                "Exterior_Front.jpg",
                "Kitchen.jpg",
                "Bedroom.jpg",
                "IMG_1.jpg",
                "IMG_2.jpg"
            ]
        );
    }

    #[test]
    fn order_indices_are_contiguous_from_one() {
        let ordered = order_images(vec![img("b.jpg"), img("a.jpg"), img("c.jpg")], None);
        let indices: Vec<usize> = ordered.iter().map(|i| i.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn order_with_list_puts_listed_first() {
        let list = vec!["Lake.jpg".to_string(), "IMG_9.jpg".to_string()];
        let ordered = order_images(
            vec![
                img("Exterior.jpg"),
                img("IMG_9.jpg"),
                img("Kitchen.jpg"),
                img("Lake.jpg"),
            ],
            Some(&list),
        );
        assert_eq!(
            names(&ordered),
            vec!["Lake.jpg", "IMG_9.jpg", "Exterior.jpg", "Kitchen.jpg"]
        );
    }

    #[test]
    fn order_with_list_ignores_unknown_and_duplicate_names() {
        let list = vec![
            "Dock.jpg".to_string(),
            "missing.jpg".to_string(),
            "Dock.jpg".to_string(),
        ];
        let ordered = order_images(vec![img("Dock.jpg"), img("Deck.jpg")], Some(&list));
        assert_eq!(names(&ordered), vec!["Dock.jpg", "Deck.jpg"]);
    }

    #[test]
    fn order_with_list_takes_every_file_sharing_a_name() {
        let list = vec!["IMG_1.jpg".to_string()];
        let ordered = order_images(
            vec![img("a/IMG_1.jpg"), img("b/IMG_1.jpg"), img("Exterior.jpg")],
            Some(&list),
        );
        let rel: Vec<_> = ordered.iter().map(|i| i.image.relative.clone()).collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("a/IMG_1.jpg"),
                PathBuf::from("b/IMG_1.jpg"),
                PathBuf::from("Exterior.jpg")
            ]
        );
    }

    #[test]
    fn order_is_a_permutation() {
        let input: Vec<SourceImage> = [
            "Twilight.jpg",
            "Kitchen.jpg",
            "x/Kitchen.jpg",
            "Bath.jpg",
            "IMG_3.png",
            "Aerial.webp",
            "Local_Shops.jpg",
        ]
        .iter()
        .map(|n| img(n))
        .collect();
        let list = vec!["Bath.jpg".to_string(), "Kitchen.jpg".to_string()];

        for explicit in [None, Some(list.as_slice())] {
            let ordered = order_images(input.clone(), explicit);
            assert_eq!(ordered.len(), input.len());
            let mut out: Vec<_> = ordered.iter().map(|i| i.image.path.clone()).collect();
            let mut expected: Vec<_> = input.iter().map(|i| i.path.clone()).collect();
            out.sort();
            expected.sort();
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn order_rank_ties_keep_baseline_order() {
        // Same rank and same filename: baseline path order decides
        let ordered = order_images(vec![img("a/Deck.jpg"), img("b/Deck.jpg")], None);
        assert_eq!(ordered[0].image.relative, PathBuf::from("a/Deck.jpg"));
        assert_eq!(ordered[1].image.relative, PathBuf::from("b/Deck.jpg"));
    }

    // =========================================================================
    // collect_images / images_from_entries
    // =========================================================================

    #[test]
    fn collect_filters_and_sorts() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("Upstairs")).unwrap();
        fs::create_dir_all(root.join("__MACOSX")).unwrap();
        for name in [
            "Kitchen.JPG",
            "notes.txt",
            "._Kitchen.JPG",
            "Upstairs/Bedroom.png",
            "__MACOSX/._Bedroom.png",
            "Aerial.webp",
        ] {
            fs::write(root.join(name), b"x").unwrap();
        }

        let images = collect_images(root).unwrap();
        let rel: Vec<_> = images.iter().map(|i| i.relative.clone()).collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("Aerial.webp"),
                PathBuf::from("Kitchen.JPG"),
                PathBuf::from("Upstairs/Bedroom.png"),
            ]
        );
        assert_eq!(images[2].file_name, "Bedroom.png");
        assert_eq!(images[2].path, root.join("Upstairs/Bedroom.png"));
    }

    #[test]
    fn collect_empty_dir_returns_nothing() {
        let tmp = TempDir::new().unwrap();
        let images = collect_images(tmp.path()).unwrap();
        assert!(images.is_empty());
        assert!(matches!(
            require_images(&images, tmp.path()),
            Err(ScanError::NoImages(_))
        ));
    }

    #[test]
    fn collect_missing_root_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = collect_images(&tmp.path().join("nope"));
        assert!(matches!(result, Err(ScanError::Walk { .. })));
    }

    #[test]
    fn images_from_entries_applies_filter() {
        let entries = vec![
            PathBuf::from("b/Kitchen.jpg"),
            PathBuf::from("readme.md"),
            PathBuf::from("._a.jpg"),
            PathBuf::from("a/Deck.jpeg"),
        ];
        let images = images_from_entries(&entries);
        let rel: Vec<_> = images.iter().map(|i| i.relative.clone()).collect();
        assert_eq!(
            rel,
            vec![PathBuf::from("a/Deck.jpeg"), PathBuf::from("b/Kitchen.jpg")]
        );
    }

    // =========================================================================
    // read_order_file
    // =========================================================================

    #[test]
    fn read_order_file_trims_and_skips_blanks() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("order.txt");
        fs::write(&path, "  Lake.jpg \n\n\tKitchen.jpg\r\n   \n").unwrap();
        assert_eq!(
            read_order_file(&path).unwrap(),
            vec!["Lake.jpg".to_string(), "Kitchen.jpg".to_string()]
        );
    }
}
