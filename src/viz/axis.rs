//! Value axis (dashed gridlines + currency labels) and category axis (rotated names).
//!
//! The renderer keeps no element state of its own: it looks elements up on the
//! surface by key, so redrawing with a new scale reconfigures whatever is there.

use super::surface::{Anchor, Element, ElementKey, Label, Layer, Rule, Stagger, Surface};
use super::text::{estimate_text_width_px, truncate_to_width};
use crate::format::currency_2sig;
use crate::scale::{BandScale, LinearScale};
use ahash::AHashSet;
use log::warn;
use plotters::style::RGBColor;

/// Distance from the baseline to the first glyph of a category label.
const CATEGORY_LABEL_OFFSET: f64 = 12.0;
/// Lift of value labels above their gridline.
const VALUE_LABEL_LIFT: f64 = 4.0;
const GRID_DASH: (f64, f64) = (2.0, 2.0);

#[derive(Debug, Clone, PartialEq)]
pub struct AxisStyle {
    /// Full chart width; gridlines span `[0, width]`.
    pub width: f64,
    /// y of the category axis.
    pub baseline: f64,
    /// Room below the baseline for rotated labels.
    pub bottom_inset: f64,
    pub tick_count: usize,
    pub grid_color: RGBColor,
    pub label_color: RGBColor,
    pub font_px: u32,
}

/// One value-axis tick after layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTick {
    pub value: f64,
    pub y: f64,
    /// `None` for the lowest tick, which coincides with the baseline.
    pub label: Option<String>,
    pub dashed: bool,
}

/// One category-axis tick after layout.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTick {
    pub name: String,
    pub x: f64,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct AxisRenderer {
    style: AxisStyle,
}

impl AxisRenderer {
    pub fn new(style: AxisStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &AxisStyle {
        &self.style
    }

    pub fn value_ticks(&self, scale: &LinearScale) -> Vec<ValueTick> {
        scale
            .ticks(self.style.tick_count)
            .into_iter()
            .enumerate()
            .map(|(i, value)| ValueTick {
                value,
                y: scale.value(value),
                label: (i > 0).then(|| currency_2sig(value)),
                dashed: i > 0,
            })
            .collect()
    }

    pub fn category_ticks(&self, band: &BandScale) -> Vec<CategoryTick> {
        let max_px = (self.style.bottom_inset - CATEGORY_LABEL_OFFSET).max(0.0) as u32;
        band.domain()
            .iter()
            .filter_map(|name| {
                let x = band.center(name)?;
                let text = if estimate_text_width_px(name, self.style.font_px) > max_px {
                    warn!("category label `{name}` truncated to fit {max_px}px");
                    truncate_to_width(name, self.style.font_px, max_px)
                } else {
                    name.clone()
                };
                Some(CategoryTick {
                    name: name.clone(),
                    x,
                    text,
                })
            })
            .collect()
    }

    /// Draw gridlines and tick labels for `scale`, replacing any previous ticks.
    pub fn draw_value_axis<S: Surface>(&self, surface: &mut S, scale: &LinearScale) {
        let ticks = self.value_ticks(scale);
        let keys: AHashSet<String> = ticks.iter().map(|t| tick_key(t.value)).collect();
        prune(surface, Layer::Grid, &keys);
        prune(surface, Layer::ValueLabels, &keys);

        for t in &ticks {
            let key = tick_key(t.value);
            let rule = Element::Rule(Rule {
                from: (0.0, t.y),
                to: (self.style.width, t.y),
                color: self.style.grid_color,
                dash: t.dashed.then_some(GRID_DASH),
            });
            upsert(surface, ElementKey::new(Layer::Grid, key.clone()), rule);

            let label_key = ElementKey::new(Layer::ValueLabels, key);
            match &t.label {
                Some(text) => {
                    let label = Element::Label(Label {
                        text: text.clone(),
                        x: 0.0,
                        y: t.y - VALUE_LABEL_LIFT,
                        rotated: false,
                        anchor: Anchor::Start,
                        color: self.style.label_color,
                        font_px: self.style.font_px,
                    });
                    upsert(surface, label_key, label);
                }
                None => {
                    if let Some(h) = surface.lookup(&label_key) {
                        surface.remove(h);
                    }
                }
            }
        }
    }

    /// Draw rotated category labels for `band`. With a `stagger`, existing
    /// labels slide to their new slots with the same per-rank delays as bars.
    pub fn draw_category_axis<S: Surface>(
        &self,
        surface: &mut S,
        band: &BandScale,
        stagger: Option<&Stagger>,
    ) {
        let ticks = self.category_ticks(band);
        let keys: AHashSet<String> = ticks.iter().map(|t| t.name.clone()).collect();
        prune(surface, Layer::CategoryLabels, &keys);

        for (rank, t) in ticks.iter().enumerate() {
            let key = ElementKey::new(Layer::CategoryLabels, t.name.clone());
            let existing = surface.lookup(&key);
            match (existing, stagger) {
                (Some(h), Some(st)) => surface.transition_x(h, t.x, st.timing(rank)),
                _ => {
                    let label = Element::Label(Label {
                        text: t.text.clone(),
                        x: t.x,
                        y: self.style.baseline + CATEGORY_LABEL_OFFSET,
                        rotated: true,
                        anchor: Anchor::Start,
                        color: self.style.label_color,
                        font_px: self.style.font_px,
                    });
                    upsert(surface, key, label);
                }
            }
        }
    }
}

fn tick_key(v: f64) -> String {
    format!("{v}")
}

fn upsert<S: Surface>(surface: &mut S, key: ElementKey, element: Element) {
    match surface.lookup(&key) {
        Some(h) => surface.update(h, element),
        None => {
            surface.create(key, element);
        }
    }
}

fn prune<S: Surface>(surface: &mut S, layer: Layer, keep: &AHashSet<String>) {
    for (key, h) in surface.handles_in(layer) {
        if !keep.contains(&key) {
            surface.remove(h);
        }
    }
}
