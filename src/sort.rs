//! Sort-transition state machine.
//!
//! The controller is the only writer of the dataset order and of the active
//! band scale. A sort runs in three steps, in this order:
//!
//! 1. the dataset is reordered in place;
//! 2. a *new* [`BandScale`] is derived from the new name order (the previous
//!    instance is left untouched for anything still referring to it);
//! 3. bars and category labels get x transitions whose start is delayed by
//!    `rank * stagger`, rank being the position in the new order.
//!
//! Two triggers exist. A one-shot auto-sort is armed at start-up; the first
//! user toggle cancels it through its [`CancellationToken`], so it can never
//! fire afterwards. A toggle after the auto-sort fired is handled normally.
//!
//! Transitions already in flight are not cancelled by a new sort. Both sets of
//! delayed moves stay scheduled, and for each element the most recently
//! scheduled move wins from the moment it starts (see [`crate::viz::scene`]).

use crate::config::TransitionConfig;
use crate::error::ScaleError;
use crate::event_loop::{CancellationToken, EventLoop, Millis};
use crate::models::{Dataset, SortOrder};
use crate::scale::BandScale;
use crate::viz::{AxisRenderer, BarRenderer, Stagger, Surface};
use log::{debug, info};
use std::rc::Rc;

/// Timer events owned by the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartEvent {
    AutoSort,
}

/// Life cycle of the one-shot automatic sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoTrigger {
    /// Not configured.
    Disabled,
    Scheduled,
    Fired,
    Cancelled,
}

/// What a sort writes to: the surface and the two renderers.
pub struct SortTargets<'a, S: Surface> {
    pub surface: &'a mut S,
    pub bars: &'a BarRenderer,
    pub axis: &'a AxisRenderer,
}

#[derive(Debug)]
pub struct SortTransitionController {
    dataset: Dataset,
    /// `None` until the first sort: records are in load order.
    order: Option<SortOrder>,
    checked: bool,
    auto: AutoTrigger,
    token: CancellationToken,
    band: Rc<BandScale>,
    timing: TransitionConfig,
    sorts: usize,
}

impl SortTransitionController {
    pub fn new(dataset: Dataset, band: BandScale, timing: TransitionConfig) -> Self {
        Self {
            dataset,
            order: None,
            checked: false,
            auto: AutoTrigger::Disabled,
            token: CancellationToken::new(),
            band: Rc::new(band),
            timing,
            sorts: 0,
        }
    }

    /// Schedule the automatic sort, if a delay is configured.
    pub fn arm(&mut self, events: &mut EventLoop<ChartEvent>) {
        if let Some(delay) = self.timing.auto_sort_delay_ms {
            events.schedule(delay, ChartEvent::AutoSort, Some(self.token.clone()));
            self.auto = AutoTrigger::Scheduled;
            debug!("auto-sort armed for +{delay} ms");
        }
    }

    /// The auto-sort timer fired: act as if the toggle was switched on.
    /// Returns `false` if the trigger was no longer pending.
    pub fn on_auto_trigger<S: Surface>(
        &mut self,
        now: Millis,
        targets: SortTargets<'_, S>,
    ) -> Result<bool, ScaleError> {
        if self.auto != AutoTrigger::Scheduled || self.token.is_cancelled() {
            return Ok(false);
        }
        self.auto = AutoTrigger::Fired;
        self.checked = true;
        info!("auto-sort fired at {now} ms");
        self.execute(SortOrder::DescendingByValue, now, targets)?;
        Ok(true)
    }

    /// User changed the toggle.
    pub fn on_toggle<S: Surface>(
        &mut self,
        checked: bool,
        now: Millis,
        targets: SortTargets<'_, S>,
    ) -> Result<(), ScaleError> {
        if self.auto == AutoTrigger::Scheduled && self.token.cancel() {
            self.auto = AutoTrigger::Cancelled;
            info!("auto-sort cancelled by user toggle at {now} ms");
        }
        self.checked = checked;
        self.execute(SortOrder::from_checked(checked), now, targets)
    }

    fn execute<S: Surface>(
        &mut self,
        order: SortOrder,
        now: Millis,
        targets: SortTargets<'_, S>,
    ) -> Result<(), ScaleError> {
        self.dataset.sort(order);
        let band = Rc::new(self.band.with_domain(self.dataset.names())?);

        let stagger = Stagger {
            start: now,
            duration: self.timing.duration_ms,
            step: self.timing.stagger_ms,
        };
        let SortTargets {
            surface,
            bars,
            axis,
        } = targets;
        bars.reorder(&mut *surface, &self.dataset, &band, &stagger);
        axis.draw_category_axis(&mut *surface, &band, Some(&stagger));

        self.band = band;
        self.order = Some(order);
        self.sorts += 1;
        info!(
            "sorted {:?} at {now} ms; settles at {} ms",
            order,
            stagger.end(self.dataset.len())
        );
        Ok(())
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn order(&self) -> Option<SortOrder> {
        self.order
    }

    /// Current toggle state (set by the user or by the auto-sort).
    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn auto_trigger(&self) -> AutoTrigger {
        self.auto
    }

    /// The band scale of the latest sort (or the initial one).
    pub fn band(&self) -> Rc<BandScale> {
        Rc::clone(&self.band)
    }

    /// Number of sorts executed so far.
    pub fn sorts_executed(&self) -> usize {
        self.sorts
    }
}
