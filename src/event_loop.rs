//! Single-threaded, virtual-time event loop.
//!
//! Nothing here sleeps: callers move the clock forward and drain the events
//! that became due. Delayed work that may be called off carries a
//! [`CancellationToken`], checked right before the event is handed out.

use log::debug;
use std::cell::Cell;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::rc::Rc;

/// Virtual time in milliseconds since the chart was initialised.
pub type Millis = u64;

/// Shared, clonable cancel flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` only for the call that actually cancelled.
    pub fn cancel(&self) -> bool {
        !self.0.replace(true)
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Debug)]
struct Pending<E> {
    due: Millis,
    seq: u64,
    token: Option<CancellationToken>,
    event: E,
}

impl<E> PartialEq for Pending<E> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<E> Eq for Pending<E> {}

impl<E> PartialOrd for Pending<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Pending<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Timer queue ordered by due time, then scheduling order.
#[derive(Debug)]
pub struct EventLoop<E> {
    now: Millis,
    seq: u64,
    queue: BinaryHeap<Reverse<Pending<E>>>,
}

impl<E> Default for EventLoop<E> {
    fn default() -> Self {
        Self {
            now: 0,
            seq: 0,
            queue: BinaryHeap::new(),
        }
    }
}

impl<E> EventLoop<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Queue `event` to become due `delay` ms from now.
    pub fn schedule(&mut self, delay: Millis, event: E, token: Option<CancellationToken>) {
        let due = self.now.saturating_add(delay);
        self.seq += 1;
        debug!("scheduled event #{} due at {due} ms", self.seq);
        self.queue.push(Reverse(Pending {
            due,
            seq: self.seq,
            token,
            event,
        }));
    }

    /// Pop the next event due at or before `until`, moving the clock to its
    /// due time. Cancelled events are discarded. Returns `None` once nothing
    /// else is due; the clock is then left untouched (see [`EventLoop::advance_clock`]).
    pub fn pop_due(&mut self, until: Millis) -> Option<(Millis, E)> {
        while let Some(Reverse(head)) = self.queue.peek() {
            if head.due > until {
                return None;
            }
            let Reverse(p) = self.queue.pop()?;
            if p.token.as_ref().is_some_and(CancellationToken::is_cancelled) {
                debug!("dropping cancelled event #{}", p.seq);
                continue;
            }
            self.now = self.now.max(p.due);
            return Some((p.due, p.event));
        }
        None
    }

    /// Move the clock forward (never backwards).
    pub fn advance_clock(&mut self, to: Millis) {
        self.now = self.now.max(to);
    }

    /// Number of queued events that are not cancelled.
    pub fn pending(&self) -> usize {
        self.queue
            .iter()
            .filter(|Reverse(p)| !p.token.as_ref().is_some_and(CancellationToken::is_cancelled))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_come_out_in_due_then_schedule_order() {
        let mut ev = EventLoop::new();
        ev.schedule(20, "late", None);
        ev.schedule(10, "a", None);
        ev.schedule(10, "b", None);
        assert_eq!(ev.pop_due(5), None);
        assert_eq!(ev.pop_due(100), Some((10, "a")));
        assert_eq!(ev.pop_due(100), Some((10, "b")));
        assert_eq!(ev.pop_due(100), Some((20, "late")));
        assert_eq!(ev.now(), 20);
    }

    #[test]
    fn cancelled_event_never_fires() {
        let mut ev = EventLoop::new();
        let token = CancellationToken::new();
        ev.schedule(10, 1, Some(token.clone()));
        assert_eq!(ev.pending(), 1);
        assert!(token.cancel());
        assert!(!token.cancel());
        assert_eq!(ev.pending(), 0);
        assert_eq!(ev.pop_due(1000), None);
    }
}
