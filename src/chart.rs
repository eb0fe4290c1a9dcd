//! The chart driver: wires dataset, scales, renderers, sort controller and
//! event loop together and exposes the user-facing operations.
//!
//! ```
//! use partisan_bars::{Chart, ChartConfig, Dataset, Record};
//!
//! let ds = Dataset::new(vec![
//!     Record::new("A", 50_000.0, 10, 4),
//!     Record::new("B", 70_000.0, 3, 9),
//! ])?;
//! let mut chart = Chart::new(ds, ChartConfig::default())?;
//! chart.toggle(true)?;
//! chart.advance(1_000)?;
//! assert_eq!(chart.dataset().names(), ["B", "A"]);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::config::{ChartConfig, Layout};
use crate::event_loop::{EventLoop, Millis};
use crate::models::{Dataset, SortOrder};
use crate::scale::{BandScale, ColorScale, LinearScale};
use crate::sort::{AutoTrigger, ChartEvent, SortTargets, SortTransitionController};
use crate::viz::{AxisRenderer, AxisStyle, BarRenderer, Frame, RenderStats, Scene, Surface};
use anyhow::{Context, Result};
use std::path::Path;
use std::rc::Rc;

pub struct Chart<S: Surface = Scene> {
    config: ChartConfig,
    layout: Layout,
    surface: S,
    events: EventLoop<ChartEvent>,
    controller: SortTransitionController,
    bars: BarRenderer,
    axis: AxisRenderer,
    linear: LinearScale,
    color: ColorScale,
    now: Millis,
}

impl Chart<Scene> {
    /// Chart drawing into an in-memory [`Scene`].
    pub fn new(dataset: Dataset, config: ChartConfig) -> Result<Self> {
        let scene = Scene::new(config.width, config.height);
        Self::with_surface(dataset, config, scene)
    }

    /// Snapshot at the current time.
    pub fn frame(&self) -> Frame {
        self.surface.frame(self.now)
    }

    /// Whether bars or labels are still moving.
    pub fn is_animating(&self) -> bool {
        self.surface.is_animating(self.now)
    }

    pub fn write_svg<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        crate::viz::render_svg(&self.frame(), path)
            .with_context(|| format!("writing {}", path.display()))
    }

    pub fn svg_string(&self) -> Result<String> {
        crate::viz::render_svg_string(&self.frame())
    }
}

impl<S: Surface> Chart<S> {
    /// Build scales, draw axes and bars at t = 0, arm the auto-sort.
    pub fn with_surface(dataset: Dataset, config: ChartConfig, mut surface: S) -> Result<Self> {
        config.validate()?;
        let layout = config.layout();

        let band = BandScale::new(dataset.names(), layout.band_range, config.band_padding)
            .context("building band scale")?;
        let linear = LinearScale::from_zero(dataset.max_income(), layout.value_range);
        let color = ColorScale::new(config.color_low.into(), config.color_high.into());

        let axis = AxisRenderer::new(AxisStyle {
            width: layout.width,
            baseline: layout.baseline,
            bottom_inset: config.insets.bottom,
            tick_count: config.value_ticks,
            grid_color: config.gridline_color.into(),
            label_color: config.label_color.into(),
            font_px: config.label_font_px,
        });
        axis.draw_value_axis(&mut surface, &linear);
        axis.draw_category_axis(&mut surface, &band, None);

        let mut bars = BarRenderer::new(layout.baseline, config.bar_opacity);
        bars.render(&mut surface, &dataset, &band, &linear, &color);

        let mut events = EventLoop::new();
        let mut controller = SortTransitionController::new(dataset, band, config.transition);
        controller.arm(&mut events);

        Ok(Self {
            config,
            layout,
            surface,
            events,
            controller,
            bars,
            axis,
            linear,
            color,
            now: 0,
        })
    }

    /// Change event of the sort toggle.
    pub fn toggle(&mut self, checked: bool) -> Result<()> {
        self.controller.on_toggle(
            checked,
            self.now,
            SortTargets {
                surface: &mut self.surface,
                bars: &self.bars,
                axis: &self.axis,
            },
        )?;
        Ok(())
    }

    pub fn advance(&mut self, ms: Millis) -> Result<()> {
        self.advance_to(self.now.saturating_add(ms))
    }

    /// Move the clock to `t`, firing due timers on the way.
    pub fn advance_to(&mut self, t: Millis) -> Result<()> {
        while let Some((at, event)) = self.events.pop_due(t) {
            self.now = at;
            self.surface.tick(at);
            match event {
                ChartEvent::AutoSort => {
                    self.controller.on_auto_trigger(
                        at,
                        SortTargets {
                            surface: &mut self.surface,
                            bars: &self.bars,
                            axis: &self.axis,
                        },
                    )?;
                }
            }
        }
        self.events.advance_clock(t);
        self.now = self.now.max(t);
        self.surface.tick(self.now);
        Ok(())
    }

    /// Full enter/update/exit pass with the current scales.
    pub fn rerender(&mut self) -> RenderStats {
        let band = self.controller.band();
        self.bars.render(
            &mut self.surface,
            self.controller.dataset(),
            &band,
            &self.linear,
            &self.color,
        )
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn dataset(&self) -> &Dataset {
        self.controller.dataset()
    }

    pub fn order(&self) -> Option<SortOrder> {
        self.controller.order()
    }

    pub fn is_checked(&self) -> bool {
        self.controller.checked()
    }

    pub fn auto_trigger(&self) -> AutoTrigger {
        self.controller.auto_trigger()
    }

    pub fn sorts_executed(&self) -> usize {
        self.controller.sorts_executed()
    }

    pub fn band(&self) -> Rc<BandScale> {
        self.controller.band()
    }

    pub fn linear(&self) -> &LinearScale {
        &self.linear
    }

    pub fn color(&self) -> &ColorScale {
        &self.color
    }

    pub fn bars(&self) -> &BarRenderer {
        &self.bars
    }

    pub fn axis(&self) -> &AxisRenderer {
        &self.axis
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Timer events still pending (the auto-sort, until it fires or is cancelled).
    pub fn pending_events(&self) -> usize {
        self.events.pending()
    }
}
