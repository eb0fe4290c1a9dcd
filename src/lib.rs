//! partisan_bars
//!
//! An animated, sortable bar chart of median household income per state,
//! with each bar colored by the partisan balance of the state's House
//! delegation. Pairs with the `partisan-bars` CLI and the `partisan-bars-gui`
//! live view.
//!
//! ### Features
//! - Band / linear / color scales with nice currency ticks
//! - Keyed enter/update/exit rendering onto a pluggable drawing surface
//! - Sort toggle (alphabetical ↔ by income) with a staggered animation
//! - One-shot automatic sort after start-up, cancelled by the first toggle
//! - SVG export of any animation frame, data table and summary statistics
//!
//! ### Example
//! ```no_run
//! use partisan_bars::{Chart, ChartConfig, storage};
//!
//! let data = storage::load_dataset("data/states.json")?;
//! let mut chart = Chart::new(data, ChartConfig::default())?;
//! chart.advance(3_000)?; // auto-sort fires at 2 s, animation settles
//! chart.write_svg("sorted.svg")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod chart;
pub mod config;
pub mod error;
pub mod event_loop;
pub mod format;
pub mod models;
pub mod scale;
pub mod sort;
pub mod stats;
pub mod storage;
pub mod table;
pub mod viz;

pub use chart::Chart;
pub use config::ChartConfig;
pub use error::{DatasetError, ScaleError};
pub use models::{Dataset, Record, SortOrder, partisan_score};
pub use sort::AutoTrigger;
