//! Shared test utilities for the painting-gallery test suite.
//!
//! Provides minimal valid records for each collection, both as typed values
//! and as raw API JSON, plus an envelope builder for decoder tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut hidden = arrangement(2, 4, 1);
//! hidden.is_active = false;
//!
//! let body = envelope_json(vec![spirit_json("raven-peak")]);
//! ```

use serde_json::{Value, json};
use std::num::NonZeroU32;

use crate::types::{Arrangement, Feather, Spirit};

// =========================================================================
// Typed records
// =========================================================================

/// A 5" × 10" feather with canonical small/large image fragments.
pub fn feather(number: u32, name: Option<&str>) -> Feather {
    let mut feather: Feather = serde_json::from_value(feather_json(number)).unwrap();
    feather.name = name.map(str::to_string);
    feather
}

/// An active arrangement on a `cols × rows` grid with no external id.
///
/// # Panics
/// If `cols` or `rows` is zero.
pub fn arrangement(number: u32, cols: u32, rows: u32) -> Arrangement {
    let mut arr: Arrangement = serde_json::from_value(arrangement_json(number)).unwrap();
    arr.cols = NonZeroU32::new(cols).unwrap();
    arr.rows = NonZeroU32::new(rows).unwrap();
    arr
}

/// An 18" × 24" spirit with a listed price and a gallery image pair.
pub fn spirit(id: &str, name: &str, year: &str) -> Spirit {
    let mut spirit: Spirit = serde_json::from_value(spirit_json(id)).unwrap();
    spirit.name = name.to_string();
    spirit.year = year.to_string();
    spirit
}

// =========================================================================
// Raw API JSON
// =========================================================================

pub fn feather_json(number: u32) -> Value {
    json!({
        "number": number,
        "height": 10.0,
        "width": 5.0,
        "is_print_available": true,
        "is_original_available": true,
        "image_url_sm": format!("f-{number:03}_sm.jpeg"),
        "image_url_lg": format!("f-{number:03}_lg.jpeg"),
        "light_color_rgb": "rgb(233,229,222)",
        "dark_color_rgb": "rgb(61,52,44)",
    })
}

pub fn arrangement_json(number: u32) -> Value {
    json!({
        "number": number,
        "cols": 2,
        "rows": 1,
        "feathers": [number, number + 1],
        "is_active": true,
    })
}

pub fn spirit_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Raven Peak",
        "year": "2023",
        "width": 18,
        "height": 24,
        "price": "$1,800",
        "is_original_available": true,
        "gallery_image_sm": format!("/public/images/spirits/{id}_sm.jpeg"),
        "gallery_image_lg": format!("/public/images/spirits/{id}_lg.jpeg"),
    })
}

/// Wrap records in a successful response envelope.
pub fn envelope_json(records: Vec<Value>) -> String {
    json!({ "success": true, "data": records }).to_string()
}
