//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every painting leads with its positional index and display title; size,
//! price and links follow as indented context lines. Errors name the
//! collection and end with a retry hint, mirroring the error-plus-retry panel
//! a graphical gallery would show.
//!
//! # Output Format
//!
//! ## Fetch
//!
//! ```text
//! 500 Feathers (2 paintings)
//! 001 Feather #12
//!     12" × 20" — $225
//! 002 Feather #42 (sold)
//!     5" × 10" — $225
//! ```
//!
//! ## Render
//!
//! ```text
//! Gallery → index.html
//! 500 Feathers → feathers/index.html
//!     Feather #12 → feathers/12-snowy-owl.html
//!
//! Generated 3 pages
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use std::path::Path;

use crate::client::FetchError;
use crate::painting::{Painting, SharePayload};
use crate::render::RenderedPage;
use crate::types::Collection;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

fn painting_line(index: usize, painting: &Painting) -> String {
    let sold = if painting.is_available { "" } else { " (sold)" };
    format!("{} {}{}", format_index(index), painting.display_title, sold)
}

// ============================================================================
// Fetch
// ============================================================================

/// Format a loaded collection as a numbered list.
pub fn format_collection(collection: Collection, paintings: &[Painting]) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({} paintings)",
        collection.label(),
        paintings.len()
    )];
    for (i, painting) in paintings.iter().enumerate() {
        lines.push(painting_line(i + 1, painting));
        lines.push(format!("{}{}", indent(1), painting.subtitle()));
    }
    lines
}

pub fn print_collection(collection: Collection, paintings: &[Painting]) {
    for line in format_collection(collection, paintings) {
        println!("{}", line);
    }
}

/// Format a failed fetch with a hint for retrying it.
pub fn format_fetch_error(collection: Collection, error: &FetchError) -> Vec<String> {
    vec![
        format!("Could not load {}", collection.label()),
        format!("{}{}", indent(1), error),
        format!(
            "{}Retry with: painting-gallery fetch {}",
            indent(1),
            collection.web_segment()
        ),
    ]
}

pub fn print_fetch_error(collection: Collection, error: &FetchError) {
    for line in format_fetch_error(collection, error) {
        eprintln!("{}", line);
    }
}

// ============================================================================
// Detail and share
// ============================================================================

/// Format the detail view of a single painting.
pub fn format_detail(painting: &Painting) -> Vec<String> {
    let mut lines = vec![
        format!("{} · {}", painting.collection_label, painting.display_title),
        format!("{}{}", indent(1), painting.subtitle()),
    ];
    if !painting.is_available {
        lines.push(format!("{}Original sold", indent(1)));
    }
    if let Some(desc) = &painting.description {
        let truncated = truncate_desc(desc.trim(), 72);
        if !truncated.is_empty() {
            lines.push(format!("{}{}", indent(1), truncated));
        }
    }
    let image = painting
        .image_url_lg
        .as_ref()
        .map_or("(unavailable)", |u| u.as_str());
    lines.push(format!("{}Image: {}", indent(1), image));
    let web = painting
        .web_url
        .as_ref()
        .map_or("(unavailable)", |u| u.as_str());
    lines.push(format!("{}Web: {}", indent(1), web));
    lines
}

pub fn print_detail(painting: &Painting) {
    for line in format_detail(painting) {
        println!("{}", line);
    }
}

/// Caption on the first line, link on the second.
pub fn format_share(share: &SharePayload) -> Vec<String> {
    vec![share.caption.clone(), share.url.to_string()]
}

pub fn print_share(share: &SharePayload) {
    for line in format_share(share) {
        println!("{}", line);
    }
}

// ============================================================================
// Render
// ============================================================================

/// Format the list of written pages, grouping detail pages under their
/// collection index.
pub fn format_render_output(pages: &[RenderedPage], output_dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    for page in pages {
        let depth = if page.path.file_name().is_some_and(|f| f == "index.html") {
            0
        } else {
            1
        };
        lines.push(format!(
            "{}{} → {}",
            indent(depth),
            page.title,
            page.path.display()
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {} pages in {}",
        pages.len(),
        output_dir.display()
    ));
    lines
}

pub fn print_render_output(pages: &[RenderedPage], output_dir: &Path) {
    for line in format_render_output(pages, output_dir) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetResolver;
    use crate::config::GalleryConfig;
    use crate::test_helpers::*;
    use crate::types::PaintingRecord;
    use std::path::PathBuf;

    fn painting(record: impl Into<PaintingRecord>) -> Painting {
        let config = GalleryConfig::default();
        Painting::from_record(&record.into(), &config, &AssetResolver::new(&config))
    }

    #[test]
    fn truncate_desc_short() {
        assert_eq!(truncate_desc("hello", 10), "hello");
    }

    #[test]
    fn truncate_desc_long() {
        assert_eq!(truncate_desc("hello world", 5), "hello...");
    }

    #[test]
    fn truncate_desc_counts_chars_not_bytes() {
        assert_eq!(truncate_desc("ééééé", 3), "ééé...");
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(123), "123");
    }

    #[test]
    fn collection_lists_paintings_with_context() {
        let mut sold = feather(42, None);
        sold.is_original_available = false;
        let lines = format_collection(
            Collection::Feathers,
            &[painting(feather(12, None)), painting(sold)],
        );
        assert_eq!(lines[0], "500 Feathers (2 paintings)");
        assert_eq!(lines[1], "001 Feather #12");
        assert_eq!(lines[2], "    5\" × 10\" — $225");
        assert_eq!(lines[3], "002 Feather #42 (sold)");
    }

    #[test]
    fn fetch_error_includes_retry_hint() {
        let lines = format_fetch_error(
            Collection::Arrangements,
            &FetchError::Api("bad query".to_string()),
        );
        assert_eq!(lines[0], "Could not load Arrangements");
        assert_eq!(lines[1], "    bad query");
        assert!(lines[2].ends_with("fetch arrangements"));
    }

    #[test]
    fn detail_shows_placeholders_for_missing_urls() {
        let lines = format_detail(&painting(spirit("", "Nameless", "2020")));
        assert_eq!(lines[0], "Mountain Spirits · \"Nameless\"");
        assert!(lines.iter().any(|l| l == "    Web: (unavailable)"));
    }

    #[test]
    fn detail_includes_description() {
        let mut arr = arrangement(3, 2, 1);
        arr.feathers = vec![1, 2];
        let lines = format_detail(&painting(arr));
        assert!(lines.contains(&"    An arrangement of feather numbers 1 and 2".to_string()));
    }

    #[test]
    fn share_is_caption_then_url() {
        let share = painting(feather(42, None)).share_payload().unwrap();
        let lines = format_share(&share);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "https://www.shaynalarsen.art/feathers/42");
    }

    #[test]
    fn render_output_indents_detail_pages() {
        let pages = vec![
            RenderedPage {
                title: "500 Feathers".to_string(),
                path: PathBuf::from("feathers/index.html"),
            },
            RenderedPage {
                title: "Feather #1".to_string(),
                path: PathBuf::from("feathers/1.html"),
            },
        ];
        let lines = format_render_output(&pages, Path::new("out"));
        assert_eq!(lines[0], "500 Feathers → feathers/index.html");
        assert_eq!(lines[1], "    Feather #1 → feathers/1.html");
        assert_eq!(lines.last().unwrap(), "Generated 2 pages in out");
    }
}
