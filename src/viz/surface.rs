//! Contract with the drawing layer: keyed, positioned, styled elements.
//!
//! Renderers compute geometry, color and text; a [`Surface`] owns the actual
//! visual nodes. [`crate::viz::scene::Scene`] is the in-memory implementation
//! used for SVG export, the GUI and tests.

use crate::event_loop::Millis;
use plotters::style::RGBColor;

/// Opaque handle to an element owned by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(pub u64);

/// Element groups, listed in draw order (later layers paint on top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    Grid,
    Bars,
    ValueLabels,
    CategoryLabels,
}

/// Stable identity of an element: its layer plus a key unique in that layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementKey {
    pub layer: Layer,
    pub key: String,
}

impl ElementKey {
    pub fn new(layer: Layer, key: impl Into<String>) -> Self {
        Self {
            layer,
            key: key.into(),
        }
    }
}

/// `(title, content)` pair consumed by the tooltip widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: RGBColor,
    pub opacity: f64,
    pub tooltip: Tooltip,
}

/// Straight line; `dash` is `(on, off)` lengths in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub color: RGBColor,
    pub dash: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// Text label; `(x, y)` is the start of the baseline. A rotated label runs
/// downwards (90° clockwise) with its glyphs centred on `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub rotated: bool,
    pub anchor: Anchor,
    pub color: RGBColor,
    pub font_px: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Bar(Bar),
    Rule(Rule),
    Label(Label),
}

impl Element {
    /// Horizontal position driven by transitions.
    pub fn x(&self) -> f64 {
        match self {
            Element::Bar(b) => b.x,
            Element::Rule(r) => r.from.0,
            Element::Label(l) => l.x,
        }
    }

    /// Move horizontally; a rule keeps its length.
    pub fn set_x(&mut self, x: f64) {
        match self {
            Element::Bar(b) => b.x = x,
            Element::Rule(r) => {
                let dx = x - r.from.0;
                r.from.0 = x;
                r.to.0 += dx;
            }
            Element::Label(l) => l.x = x,
        }
    }
}

/// Absolute start time and duration of one element's transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub start: Millis,
    pub duration: Millis,
}

/// Cascading timing: rank `i` starts `i * step` after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stagger {
    pub start: Millis,
    pub duration: Millis,
    pub step: Millis,
}

impl Stagger {
    pub fn timing(&self, rank: usize) -> Timing {
        Timing {
            start: self.start + rank as Millis * self.step,
            duration: self.duration,
        }
    }

    /// Time at which the last of `n` ranked elements settles.
    pub fn end(&self, n: usize) -> Millis {
        let last = n.saturating_sub(1) as Millis;
        self.start + last * self.step + self.duration
    }
}

/// Drawing-primitive collaborator.
pub trait Surface {
    fn create(&mut self, key: ElementKey, element: Element) -> ElementHandle;

    /// Replace an element's committed attributes in place; identity is kept.
    fn update(&mut self, handle: ElementHandle, element: Element);

    fn remove(&mut self, handle: ElementHandle);

    fn lookup(&self, key: &ElementKey) -> Option<ElementHandle>;

    /// `(key, handle)` pairs of every element in `layer`.
    fn handles_in(&self, layer: Layer) -> Vec<(String, ElementHandle)>;

    /// Animate the element's x towards `target_x` during `timing`.
    fn transition_x(&mut self, handle: ElementHandle, target_x: f64, timing: Timing);

    /// Called whenever the clock moves.
    fn tick(&mut self, _now: Millis) {}
}
