//! CLI output formatting for the `check` and `build` commands.
//!
//! # Information-First Display
//!
//! Every photo is shown by its sequence index and room label, with the
//! archive path and caption as indented context lines. The output reads as
//! the delivery's photo order while still letting users trace each entry
//! back to a file in the ZIP.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Archive: photos.zip (4 files)
//! Order: keyword ranking
//! 001 Exterior Front
//!     Source: Shoot/Exterior_Front.jpg
//!     Caption: Exterior Front.
//! 002 Kitchen
//!     Source: Shoot/Kitchen.jpg
//!     Caption: Kitchen.
//!
//! 2 photos
//! ```
//!
//! ## Build
//!
//! ```text
//! Extracted 5 entries → output/extracted
//! 2 photos (keyword ranking)
//! 001 Exterior Front
//!     Source: Shoot/Exterior_Front.jpg
//!     5000×3000 → web 2560×1536, thumbnail 600×360
//! PDF table → output/The_Landmark_Photo_Order_Branded.pdf
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::imaging::Dimensions;
use crate::pipeline::{PipelineEvent, Plan, RunManifest};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn dims(d: Dimensions) -> String {
    format!("{}\u{d7}{}", d.width, d.height)
}

fn order_source(explicit: bool) -> &'static str {
    if explicit { "order file" } else { "keyword ranking" }
}

fn photo_count(n: usize) -> String {
    match n {
        1 => "1 photo".to_string(),
        n => format!("{} photos", n),
    }
}

// ============================================================================
// check
// ============================================================================

/// Format the planned sequence of a job.
pub fn format_plan(plan: &Plan, zip: &Path) -> Vec<String> {
    let mut lines = vec![
        format!("Archive: {} ({} files)", zip.display(), plan.entries),
        format!("Order: {}", order_source(plan.explicit)),
    ];
    for item in &plan.items {
        lines.push(format!("{} {}", format_index(item.index), item.room));
        lines.push(format!("    Source: {}", item.relative.display()));
        lines.push(format!("    Caption: {}", item.caption));
    }
    lines.push(String::new());
    lines.push(photo_count(plan.items.len()));
    lines
}

pub fn print_plan(plan: &Plan, zip: &Path) {
    for line in format_plan(plan, zip) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

/// Format a single build progress event as display lines.
pub fn format_pipeline_event(event: &PipelineEvent) -> Vec<String> {
    match event {
        PipelineEvent::Extracted { entries, root } => {
            vec![format!("Extracted {} entries \u{2192} {}", entries, root.display())]
        }
        PipelineEvent::Ordered { count, explicit } => {
            vec![format!("{} ({})", photo_count(*count), order_source(*explicit))]
        }
        PipelineEvent::ImageProcessed {
            index,
            relative,
            room,
            source,
            web,
            thumbnail,
            ..
        } => vec![
            format!("{} {}", format_index(*index), room),
            format!("    Source: {}", relative.display()),
            format!(
                "    {} \u{2192} web {}, thumbnail {}",
                dims(*source),
                dims(*web),
                dims(*thumbnail)
            ),
        ],
        PipelineEvent::DocumentWritten { label, path } => {
            vec![format!("{} \u{2192} {}", label, path.display())]
        }
    }
}

pub fn print_pipeline_event(event: &PipelineEvent) {
    for line in format_pipeline_event(event) {
        println!("{}", line);
    }
}

/// Format the closing summary of a build.
pub fn format_summary(manifest: &RunManifest) -> Vec<String> {
    vec![format!(
        "{} \u{2014} {}: {}, 3 documents, dated {}",
        manifest.brand.name,
        manifest.brand.property,
        photo_count(manifest.items.len()),
        manifest.generated_on
    )]
}

pub fn print_summary(manifest: &RunManifest) {
    for line in format_summary(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PlannedItem;
    use crate::render::DocumentPaths;
    use crate::render::tests::brand;
    use std::path::PathBuf;

    fn plan() -> Plan {
        Plan {
            entries: 4,
            explicit: false,
            items: vec![
                PlannedItem {
                    index: 1,
                    relative: PathBuf::from("Shoot/Exterior_Front.jpg"),
                    room: "Exterior Front".into(),
                    caption: "Exterior Front.".into(),
                },
                PlannedItem {
                    index: 2,
                    relative: PathBuf::from("Shoot/Kitchen.jpg"),
                    room: "Kitchen".into(),
                    caption: "Kitchen.".into(),
                },
            ],
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads_to_three() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn photo_count_singular() {
        assert_eq!(photo_count(1), "1 photo");
        assert_eq!(photo_count(0), "0 photos");
    }

    // =========================================================================
    // check
    // =========================================================================

    #[test]
    fn plan_output_lists_sequence() {
        let lines = format_plan(&plan(), Path::new("photos.zip"));
        assert_eq!(
            lines,
            vec![
                "Archive: photos.zip (4 files)",
                "Order: keyword ranking",
                "001 Exterior Front",
                "    Source: Shoot/Exterior_Front.jpg",
                "    Caption: Exterior Front.",
                "002 Kitchen",
                "    Source: Shoot/Kitchen.jpg",
                "    Caption: Kitchen.",
                "",
                "2 photos",
            ]
        );
    }

    #[test]
    fn plan_output_names_order_file() {
        let mut plan = plan();
        plan.explicit = true;
        let lines = format_plan(&plan, Path::new("photos.zip"));
        assert_eq!(lines[1], "Order: order file");
    }

    // =========================================================================
    // build
    // =========================================================================

    #[test]
    fn image_event_shows_room_source_and_sizes() {
        let lines = format_pipeline_event(&PipelineEvent::ImageProcessed {
            index: 1,
            total: 2,
            relative: PathBuf::from("Shoot/Exterior_Front.jpg"),
            room: "Exterior Front".into(),
            source: (5000, 3000).into(),
            web: (2560, 1536).into(),
            thumbnail: (600, 360).into(),
        });
        assert_eq!(
            lines,
            vec![
                "001 Exterior Front",
                "    Source: Shoot/Exterior_Front.jpg",
                "    5000\u{d7}3000 \u{2192} web 2560\u{d7}1536, thumbnail 600\u{d7}360",
            ]
        );
    }

    #[test]
    fn stage_events_are_single_lines() {
        let extracted = format_pipeline_event(&PipelineEvent::Extracted {
            entries: 5,
            root: PathBuf::from("output/extracted"),
        });
        assert_eq!(extracted, vec!["Extracted 5 entries \u{2192} output/extracted"]);

        let ordered = format_pipeline_event(&PipelineEvent::Ordered {
            count: 1,
            explicit: true,
        });
        assert_eq!(ordered, vec!["1 photo (order file)"]);

        let written = format_pipeline_event(&PipelineEvent::DocumentWritten {
            label: "PDF table",
            path: PathBuf::from("output/The_Landmark_Photo_Order_Branded.pdf"),
        });
        assert_eq!(
            written,
            vec!["PDF table \u{2192} output/The_Landmark_Photo_Order_Branded.pdf"]
        );
    }

    #[test]
    fn summary_names_brand_and_date() {
        let manifest = RunManifest {
            brand: brand(),
            generated_on: "March 07, 2025".into(),
            items: Vec::new(),
            documents: DocumentPaths::under(Path::new("output"), "The Landmark"),
        };
        assert_eq!(
            format_summary(&manifest),
            vec!["Red Canoe Lodging \u{2014} The Landmark: 0 photos, 3 documents, dated March 07, 2025"]
        );
    }
}
