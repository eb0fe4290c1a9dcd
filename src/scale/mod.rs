//! Scale engine: pure mappings from data domains to pixel geometry and color.
//!
//! - [`BandScale`]: category name → left edge + shared bandwidth
//! - [`LinearScale`]: income → y pixel (inverted range), plus nice ticks
//! - [`ColorScale`]: partisan score in `[0, 1]` → interpolated RGB

pub mod band;
pub mod color;
pub mod linear;

pub use band::BandScale;
pub use color::{ColorScale, HexColor, parse_hex, to_hex};
pub use linear::{LinearScale, nice_ticks};
