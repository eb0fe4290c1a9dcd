//! Chart configuration: dimensions, insets, colors, ticks and transition timing.
//!
//! Every field has a default, so a JSON config file only needs the fields it
//! overrides:
//!
//! ```json
//! { "width": 1400, "transition": { "auto_sort_delay_ms": null } }
//! ```

use crate::event_loop::Millis;
use crate::scale::HexColor;
use anyhow::{Context, Result, ensure};
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Space between the canvas edge and the plotting region, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Insets {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 0.0,
            bottom: 90.0,
            left: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Length of each element's move.
    pub duration_ms: Millis,
    /// Extra start delay per rank in the new order.
    pub stagger_ms: Millis,
    /// One-shot automatic sort after initialisation; `None` disables it.
    pub auto_sort_delay_ms: Option<Millis>,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: 750,
            stagger_ms: 35,
            auto_sort_delay_ms: Some(2000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub insets: Insets,
    /// Fraction of each band left empty between bars, in `[0, 1)`.
    pub band_padding: f64,
    /// Fill for a partisan score of 0 (all Republican).
    pub color_low: HexColor,
    /// Fill for a partisan score of 1 (all Democratic).
    pub color_high: HexColor,
    pub bar_opacity: f64,
    pub value_ticks: usize,
    pub gridline_color: HexColor,
    pub label_color: HexColor,
    pub label_font_px: u32,
    pub transition: TransitionConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1100,
            height: 600,
            insets: Insets::default(),
            band_padding: 0.1,
            color_low: HexColor(RGBColor(0xd9, 0x53, 0x4f)),
            color_high: HexColor(RGBColor(0x02, 0x75, 0xd8)),
            bar_opacity: 0.8,
            value_ticks: 8,
            gridline_color: HexColor(RGBColor(0x29, 0x2b, 0x2c)),
            label_color: HexColor(RGBColor(0x29, 0x2b, 0x2c)),
            label_font_px: 11,
            transition: TransitionConfig::default(),
        }
    }
}

/// Pixel geometry derived from a config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    /// `[left, right]` for the band scale.
    pub band_range: (f64, f64),
    /// `[bottom, top]` for the value scale.
    pub value_range: (f64, f64),
    /// y of the common bar baseline (the bottom inset).
    pub baseline: f64,
}

impl ChartConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let cfg: ChartConfig = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configs that cannot produce a drawable chart.
    pub fn validate(&self) -> Result<()> {
        let l = self.layout();
        ensure!(self.width > 0 && self.height > 0, "chart size must be non-zero");
        ensure!(
            l.band_range.1 > l.band_range.0,
            "left/right insets leave no horizontal room"
        );
        ensure!(
            l.value_range.0 > l.value_range.1,
            "top/bottom insets leave no vertical room"
        );
        ensure!(
            (0.0..1.0).contains(&self.band_padding),
            "band_padding must be in [0, 1), got {}",
            self.band_padding
        );
        ensure!(
            (0.0..=1.0).contains(&self.bar_opacity),
            "bar_opacity must be in [0, 1], got {}",
            self.bar_opacity
        );
        ensure!(self.value_ticks > 0, "value_ticks must be at least 1");
        Ok(())
    }

    pub fn layout(&self) -> Layout {
        let w = self.width as f64;
        let h = self.height as f64;
        let baseline = h - self.insets.bottom;
        Layout {
            width: w,
            height: h,
            band_range: (self.insets.left, w - self.insets.right),
            value_range: (baseline, self.insets.top),
            baseline,
        }
    }
}
