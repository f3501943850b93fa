//! Slugs, padded numbers, and the `NNN-name` website path convention.
//!
//! Feather pages on the public website live at `<number>-<slug>`, e.g.
//! `/feathers/42-red-tailed-hawk`. Unnamed feathers use the bare number.
//! [`parse_url_path`] reverses the convention so a path copied from the
//! website can be used to look a feather up again.

/// Width of zero-padded numbers embedded in CDN filenames.
pub const PADDED_WIDTH: usize = 6;

/// Lowercase `name`, replace every run of non-alphanumeric characters with a
/// single dash, and strip leading/trailing dashes.
///
/// Only ASCII letters and digits survive; everything else becomes a separator.
///
/// - `"Red-Tailed Hawk!!"` → `"red-tailed-hawk"`
/// - `"  Snowy   Owl "` → `"snowy-owl"`
/// - `"!!!"` → `""`
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Zero-pad a catalog number to [`PADDED_WIDTH`] digits.
pub fn pad_number(number: u32) -> String {
    format!("{number:0width$}", width = PADDED_WIDTH)
}

/// Website path for a feather: `"<number>-<slug>"`, or `"<number>"` when the
/// feather has no name (or a name that slugifies to nothing).
pub fn feather_url_path(number: u32, name: Option<&str>) -> String {
    match name.map(slugify) {
        Some(slug) if !slug.is_empty() => format!("{number}-{slug}"),
        _ => number.to_string(),
    }
}

/// Result of parsing a website path like `42-red-tailed-hawk`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPath {
    /// Number prefix if present.
    pub number: Option<u32>,
    /// Remainder after `NNN-`; the full input when there is no number.
    pub slug: String,
}

/// Split a path on the `NNN-name` convention.
///
/// - `"42-red-tailed-hawk"` → number=Some(42), slug="red-tailed-hawk"
/// - `"42"` → number=Some(42), slug=""
/// - `"66a1f0"` → number=None, slug="66a1f0"
pub fn parse_url_path(path: &str) -> ParsedPath {
    let path = path.trim_matches('/');
    if let Some((prefix, rest)) = path.split_once('-') {
        if let Ok(num) = prefix.parse::<u32>() {
            return ParsedPath {
                number: Some(num),
                slug: rest.to_string(),
            };
        }
    }
    if let Ok(num) = path.parse::<u32>() {
        return ParsedPath {
            number: Some(num),
            slug: String::new(),
        };
    }
    ParsedPath {
        number: None,
        slug: path.to_string(),
    }
}
