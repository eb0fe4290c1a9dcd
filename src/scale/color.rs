use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Two-stop color ramp over `[0, 1]`, interpolated per RGB channel.
///
/// Inputs are clamped to the domain; `NaN` maps to the midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    low: RGBColor,
    high: RGBColor,
}

impl ColorScale {
    pub fn new(low: RGBColor, high: RGBColor) -> Self {
        Self { low, high }
    }

    pub fn color(&self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        RGBColor(
            lerp(self.low.0, self.high.0),
            lerp(self.low.1, self.high.1),
            lerp(self.low.2, self.high.2),
        )
    }

    pub fn low(&self) -> RGBColor {
        self.low
    }

    pub fn high(&self) -> RGBColor {
        self.high
    }
}

/// `#rrggbb` representation of a color.
pub fn to_hex(c: RGBColor) -> String {
    format!("#{:02x}{:02x}{:02x}", c.0, c.1, c.2)
}

/// Parse `#rrggbb` or `#rgb` (leading `#` optional).
pub fn parse_hex(s: &str) -> Option<RGBColor> {
    let h = s.trim().trim_start_matches('#');
    if !h.is_ascii() {
        return None;
    }
    let channel = |i: usize, len: usize| u8::from_str_radix(&h[i..i + len], 16).ok();
    match h.len() {
        6 => Some(RGBColor(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
        3 => {
            let r = channel(0, 1)?;
            let g = channel(1, 1)?;
            let b = channel(2, 1)?;
            Some(RGBColor(r * 17, g * 17, b * 17))
        }
        _ => None,
    }
}

/// Config-friendly color that (de)serializes as a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(pub RGBColor);

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        parse_hex(&s)
            .map(HexColor)
            .ok_or_else(|| format!("invalid hex color `{s}`"))
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> Self {
        to_hex(c.0)
    }
}

impl From<HexColor> for RGBColor {
    fn from(c: HexColor) -> Self {
        c.0
    }
}
