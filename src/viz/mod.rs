//! Visualization: keyed scene elements, bar/axis renderers and SVG export.
//!
//! - [`surface`]: the drawing contract (`Surface`, `Element`, keys, timing)
//! - [`scene`]: in-memory `Surface` with time-sampled x transitions
//! - [`bars`] / [`axis`]: compute geometry, color and text from scales
//! - [`svg`]: rasterize a frame through plotters' SVG backend

pub mod axis;
pub mod bars;
pub mod scene;
pub mod surface;
pub mod svg;
pub mod text;

pub use axis::{AxisRenderer, AxisStyle, CategoryTick, ValueTick};
pub use bars::{BarRenderer, RenderStats};
pub use scene::{Frame, FrameItem, Scene, ease_cubic_in_out};
pub use surface::{
    Anchor, Bar, Element, ElementHandle, ElementKey, Label, Layer, Rule, Stagger, Surface, Timing,
    Tooltip,
};
pub use svg::{render_svg, render_svg_string};
