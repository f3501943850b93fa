//! Catalog record types decoded from the content API.
//!
//! Each endpoint returns a homogeneous list of one record shape. Records are
//! immutable value objects: they are constructed once per fetch response and
//! replaced wholesale by the next fetch. [`PaintingRecord`] closes the three
//! shapes into a single sum type so that display and sharing code can operate
//! on any of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::aspect;
use crate::naming;

/// One of the three painting collections served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum Collection {
    Feathers,
    Arrangements,
    Spirits,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Spirits,
        Collection::Feathers,
        Collection::Arrangements,
    ];

    /// API path appended to the configured API base.
    pub fn endpoint(self) -> &'static str {
        match self {
            Collection::Feathers => "/feathers",
            Collection::Arrangements => "/arrangements",
            Collection::Spirits => "/spirits",
        }
    }

    /// Path segment used on the public website.
    pub fn web_segment(self) -> &'static str {
        match self {
            Collection::Feathers => "feathers",
            Collection::Arrangements => "arrangements",
            Collection::Spirits => "spirits",
        }
    }

    /// Human-facing collection label.
    pub fn label(self) -> &'static str {
        match self {
            Collection::Feathers => "500 Feathers",
            Collection::Arrangements => "Arrangements",
            Collection::Spirits => "Mountain Spirits",
        }
    }

    /// Noun used in share captions ("... beautiful feather painting ...").
    pub fn noun(self) -> &'static str {
        match self {
            Collection::Feathers => "feather",
            Collection::Arrangements => "arrangement",
            Collection::Spirits => "spirit",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.web_segment())
    }
}

// =============================================================================
// Timestamps
// =============================================================================

/// ISO-8601 timestamps with optional fractional seconds.
///
/// An unparseable string is a decode error rather than a silent `None`.
pub(crate) mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, de::Error as _};

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => DateTime::parse_from_rfc3339(&raw)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|e| D::Error::custom(format!("invalid timestamp `{raw}`: {e}"))),
        }
    }
}

// =============================================================================
// Feathers
// =============================================================================

/// A palette entry extracted from a feather painting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatherColor {
    pub population: u64,
    pub rgb: Vec<f64>,
    pub rgb_string: String,
    pub hex: String,
    pub lightness: f64,
    pub hue: f64,
    #[serde(default)]
    pub names: BTreeMap<String, String>,
}

/// A single feather painting, keyed by its catalog number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feather {
    pub number: u32,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_name_generated: bool,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub collection_name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub bird_slug: Option<String>,
    pub height: f64,
    pub width: f64,
    #[serde(default)]
    pub orientation: String,
    #[serde(default)]
    pub paper: String,
    #[serde(default)]
    pub mount: String,
    #[serde(default)]
    pub pigment: Option<String>,
    pub is_print_available: bool,
    pub is_original_available: bool,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub image_width: u32,
    #[serde(default)]
    pub image_height: u32,

    #[serde(default)]
    pub histogram: Option<Vec<f64>>,
    #[serde(default)]
    pub complementary_histogram: Option<Vec<f64>>,
    #[serde(default)]
    pub triad_1_histogram: Option<Vec<f64>>,
    #[serde(default)]
    pub triad_2_histogram: Option<Vec<f64>>,

    #[serde(default)]
    pub dark_color_hex: Option<String>,
    #[serde(default)]
    pub dark_color_rgb: Option<String>,
    #[serde(default)]
    pub light_color_hex: Option<String>,
    #[serde(default)]
    pub light_color_rgb: Option<String>,
    #[serde(default)]
    pub colors: Vec<FeatherColor>,
    #[serde(default)]
    pub symbol_ids: Vec<String>,
    #[serde(default)]
    pub palette_distances: Vec<f64>,

    /// Related feathers, as string-encoded catalog numbers.
    #[serde(default)]
    pub similar_feather_ids: Vec<String>,
    #[serde(default)]
    pub complementary_feather_ids: Vec<String>,
    #[serde(default)]
    pub triad_1_feather_ids: Vec<String>,
    #[serde(default)]
    pub triad_2_feather_ids: Vec<String>,

    /// Stored image filename fragments; may carry a legacy suffix.
    pub image_url_sm: String,
    pub image_url_lg: String,

    #[serde(
        default,
        rename = "createdAt",
        deserialize_with = "timestamp::deserialize_option"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        rename = "updatedAt",
        deserialize_with = "timestamp::deserialize_option"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Feather {
    /// Website path: `"<number>-<slug>"`, or the bare number when unnamed.
    pub fn url_path(&self) -> String {
        naming::feather_url_path(self.number, self.name.as_deref())
    }
}

// =============================================================================
// Arrangements
// =============================================================================

/// Orientation applied to a feather placed in an arrangement cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl Flip {
    pub fn as_str(self) -> &'static str {
        match self {
            Flip::None => "none",
            Flip::Horizontal => "horizontal",
            Flip::Vertical => "vertical",
            Flip::Both => "both",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid flip orientation `{0}` (expected none, horizontal, vertical or both)")]
pub struct InvalidFlip(pub String);

impl FromStr for Flip {
    type Err = InvalidFlip;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Flip::None),
            "horizontal" => Ok(Flip::Horizontal),
            "vertical" => Ok(Flip::Vertical),
            "both" => Ok(Flip::Both),
            other => Err(InvalidFlip(other.to_string())),
        }
    }
}

impl fmt::Display for Flip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A feather reference placed at a grid position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrangementCell {
    pub feather_number: u32,
    pub position: u32,
    pub flip: Flip,
    #[serde(default)]
    pub rotation: i32,
}

/// A composite arrangement of feathers laid out on a `cols × rows` grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrangement {
    /// Opaque external key; the display number stands in when absent.
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub number: u32,
    pub cols: NonZeroU32,
    pub rows: NonZeroU32,
    #[serde(default)]
    pub feathers: Vec<u32>,
    #[serde(default)]
    pub is_composite: bool,
    #[serde(default)]
    pub horizontal_spacing: i32,
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub designer_id: String,
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub has_current_images: bool,
    #[serde(default)]
    pub print_item_ids: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub etsy_mug_listing_id: Option<u64>,
    #[serde(default)]
    pub is_etsy_composite_print_listing: Option<bool>,
    #[serde(default)]
    pub etsy_composite_listing_id: Option<u64>,
    #[serde(default)]
    pub cells: Vec<ArrangementCell>,
    #[serde(
        default,
        rename = "createdAt",
        deserialize_with = "timestamp::deserialize_option"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        rename = "updatedAt",
        deserialize_with = "timestamp::deserialize_option"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Arrangement {
    /// Stable identifier: the external key, or the display number.
    pub fn identifier(&self) -> String {
        match &self.id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => self.number.to_string(),
        }
    }

    /// Best simple-fraction label for the grid shape, e.g. `"2:1"`.
    pub fn aspect_ratio(&self) -> String {
        aspect::normalize(self.cols, self.rows)
    }
}

// =============================================================================
// Mountain spirits
// =============================================================================

/// A mountain-spirit painting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spirit {
    pub id: String,
    pub name: String,
    pub year: String,
    #[serde(default)]
    pub dimensions: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub print_ratio: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub paper: Option<String>,
    #[serde(default)]
    pub mount: Option<String>,
    pub is_original_available: bool,
    #[serde(default)]
    pub statement: Option<String>,
    #[serde(default)]
    pub orientation: String,
    /// Path fragments appended verbatim to the CDN base.
    pub gallery_image_sm: String,
    pub gallery_image_lg: String,
    #[serde(default)]
    pub print_no_sig_file: Option<String>,
    #[serde(default)]
    pub secondary_images: Vec<String>,
    #[serde(default)]
    pub pigment: Option<String>,
    #[serde(default)]
    pub collection_name: String,
    #[serde(default)]
    pub are_prints_available: Option<bool>,
    /// Horizontal position of the signature as a fraction of the width.
    #[serde(default)]
    pub signature_position_horizontal: f64,
}

impl Spirit {
    /// Physical width over height, or `None` for a zero height.
    pub fn aspect_ratio(&self) -> Option<f64> {
        aspect::physical_ratio(self.width, self.height)
    }
}

// =============================================================================
// Unified record
// =============================================================================

/// Any decoded catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintingRecord {
    Feather(Feather),
    Arrangement(Arrangement),
    Spirit(Spirit),
}

impl PaintingRecord {
    pub fn collection(&self) -> Collection {
        match self {
            PaintingRecord::Feather(_) => Collection::Feathers,
            PaintingRecord::Arrangement(_) => Collection::Arrangements,
            PaintingRecord::Spirit(_) => Collection::Spirits,
        }
    }

    /// Display key; also the website path component for spirits and arrangements.
    pub fn identifier(&self) -> String {
        match self {
            PaintingRecord::Feather(f) => f.number.to_string(),
            PaintingRecord::Arrangement(a) => a.identifier(),
            PaintingRecord::Spirit(s) => s.id.clone(),
        }
    }

    /// Catalog number, for the collections that have one.
    pub fn number(&self) -> Option<u32> {
        match self {
            PaintingRecord::Feather(f) => Some(f.number),
            PaintingRecord::Arrangement(a) => Some(a.number),
            PaintingRecord::Spirit(_) => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            PaintingRecord::Feather(f) => f.name.as_deref(),
            PaintingRecord::Arrangement(a) => a.name.as_deref(),
            PaintingRecord::Spirit(s) => Some(&s.name),
        }
    }

    pub fn year(&self) -> Option<&str> {
        match self {
            PaintingRecord::Feather(f) => f.year.as_deref(),
            PaintingRecord::Arrangement(_) => None,
            PaintingRecord::Spirit(s) => Some(&s.year),
        }
    }

    pub fn display_title(&self) -> String {
        match self {
            PaintingRecord::Feather(f) => format!("Feather #{}", f.number),
            PaintingRecord::Arrangement(a) => format!("Arrangement #{}", a.number),
            PaintingRecord::Spirit(s) => format!("\"{}\"", s.name),
        }
    }

    /// Physical size as `W" × H"`.
    ///
    /// Arrangement cells are 5" wide and 10" tall.
    pub fn dimensions(&self) -> String {
        let (w, h) = match self {
            PaintingRecord::Feather(f) => (f.width.trunc() as i64, f.height.trunc() as i64),
            PaintingRecord::Arrangement(a) => {
                (i64::from(a.cols.get()) * 5, i64::from(a.rows.get()) * 10)
            }
            PaintingRecord::Spirit(s) => (i64::from(s.width), i64::from(s.height)),
        };
        format!("{w}\" × {h}\"")
    }

    /// Whether the original is still for sale. Arrangements are always available.
    pub fn is_available(&self) -> bool {
        match self {
            PaintingRecord::Feather(f) => f.is_original_available,
            PaintingRecord::Arrangement(_) => true,
            PaintingRecord::Spirit(s) => s.is_original_available,
        }
    }
}

impl From<Feather> for PaintingRecord {
    fn from(f: Feather) -> Self {
        PaintingRecord::Feather(f)
    }
}

impl From<Arrangement> for PaintingRecord {
    fn from(a: Arrangement) -> Self {
        PaintingRecord::Arrangement(a)
    }
}

impl From<Spirit> for PaintingRecord {
    fn from(s: Spirit) -> Self {
        PaintingRecord::Spirit(s)
    }
}
