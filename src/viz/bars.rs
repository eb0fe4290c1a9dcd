//! Bar renderer: one element per record, keyed by category name.

use super::surface::{Bar, Element, ElementHandle, ElementKey, Layer, Stagger, Surface, Tooltip};
use crate::format::currency;
use crate::models::{Dataset, Record};
use crate::scale::{BandScale, ColorScale, LinearScale};
use ahash::{AHashMap, AHashSet};
use log::{debug, warn};

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

/// Keeps a stable `name → element` mapping across renders.
///
/// Retained names are updated in place, so transitions already scheduled on
/// an element stay attached to it. Elements are never recreated just to
/// change geometry.
#[derive(Debug, Clone)]
pub struct BarRenderer {
    handles: AHashMap<String, ElementHandle>,
    baseline: f64,
    opacity: f64,
}

impl BarRenderer {
    pub fn new(baseline: f64, opacity: f64) -> Self {
        Self {
            handles: AHashMap::new(),
            baseline,
            opacity,
        }
    }

    pub fn tooltip(record: &Record) -> Tooltip {
        Tooltip {
            title: record.name.clone(),
            content: format!("Median income: {}", currency(record.median_income)),
        }
    }

    /// Geometry and color for one record; `None` if the band scale does not
    /// know the name.
    pub fn bar(
        &self,
        record: &Record,
        band: &BandScale,
        linear: &LinearScale,
        color: &ColorScale,
    ) -> Option<Bar> {
        let x = band.position(&record.name)?;
        let y = linear.value(record.median_income);
        Some(Bar {
            x,
            y,
            width: band.bandwidth(),
            height: (self.baseline - y).max(0.0),
            fill: color.color(record.partisan_score()),
            opacity: self.opacity,
            tooltip: Self::tooltip(record),
        })
    }

    /// Enter/update/exit pass against `dataset`.
    pub fn render<S: Surface>(
        &mut self,
        surface: &mut S,
        dataset: &Dataset,
        band: &BandScale,
        linear: &LinearScale,
        color: &ColorScale,
    ) -> RenderStats {
        let mut stats = RenderStats::default();
        let live: AHashSet<&str> = dataset.records().iter().map(|r| r.name.as_str()).collect();

        // exit
        let gone: Vec<String> = self
            .handles
            .keys()
            .filter(|k| !live.contains(k.as_str()))
            .cloned()
            .collect();
        for name in gone {
            if let Some(h) = self.handles.remove(&name) {
                surface.remove(h);
                stats.exited += 1;
            }
        }

        for record in dataset {
            let Some(bar) = self.bar(record, band, linear, color) else {
                warn!("no band for `{}`, bar skipped", record.name);
                continue;
            };
            match self.handles.get(&record.name) {
                Some(&h) => {
                    surface.update(h, Element::Bar(bar));
                    stats.updated += 1;
                }
                None => {
                    let key = ElementKey::new(Layer::Bars, record.name.clone());
                    let h = surface.create(key, Element::Bar(bar));
                    self.handles.insert(record.name.clone(), h);
                    stats.entered += 1;
                }
            }
        }
        debug!(
            "bars: {} entered, {} updated, {} exited",
            stats.entered, stats.updated, stats.exited
        );
        stats
    }

    /// Move every bar to its slot in `band`, cascading by rank in `dataset`
    /// order. Targets are resolved now, against this `band` instance.
    pub fn reorder<S: Surface>(
        &self,
        surface: &mut S,
        dataset: &Dataset,
        band: &BandScale,
        stagger: &Stagger,
    ) {
        for (rank, record) in dataset.records().iter().enumerate() {
            let (Some(&h), Some(x)) = (self.handles.get(&record.name), band.position(&record.name))
            else {
                continue;
            };
            surface.transition_x(h, x, stagger.timing(rank));
        }
    }

    pub fn handle(&self, name: &str) -> Option<ElementHandle> {
        self.handles.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }
}
