//! Palette colors stored as `rgb(r,g,b)` strings.
//!
//! Feathers carry a light and a dark palette color; the gallery paints the
//! light one behind the painting and uses the dark one for its caption.
//! Anything that doesn't parse as three numeric channels falls back to white.

use std::fmt;

/// An sRGB color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        red: 1.0,
        green: 1.0,
        blue: 1.0,
    };

    /// Parse `"rgb(233,229,222)"` (0-255 channels). Whitespace around channels
    /// is ignored.
    pub fn parse(s: &str) -> Option<Rgb> {
        let inner = s.trim().strip_prefix("rgb(")?.strip_suffix(')')?;
        let channels: Vec<f64> = inner
            .split(',')
            .map(|c| c.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .ok()?;
        match channels.as_slice() {
            [r, g, b] => Some(Rgb {
                red: r.clamp(0.0, 255.0) / 255.0,
                green: g.clamp(0.0, 255.0) / 255.0,
                blue: b.clamp(0.0, 255.0) / 255.0,
            }),
            _ => None,
        }
    }

    pub fn parse_or_white(s: Option<&str>) -> Rgb {
        s.and_then(Rgb::parse).unwrap_or(Rgb::WHITE)
    }

    /// `#rrggbb` for use in CSS.
    pub fn to_hex(self) -> String {
        let channel = |v: f64| (v * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.red),
            channel(self.green),
            channel(self.blue)
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
