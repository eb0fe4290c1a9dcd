//! In-memory retained scene with timed x-transitions on the virtual clock.
//!
//! Each element stores its committed attributes plus the x-tweens scheduled on
//! it. The x shown at time `t` comes from the most recently *scheduled* tween
//! that has started by `t`; earlier-scheduled tweens are superseded from that
//! moment on, even if they would still be running. A tween interpolates from
//! the value the element showed at its own start instant; that value is
//! captured once the clock reaches the start, so later in-place updates of the
//! element do not disturb a running tween.
//!
//! Overlapping sorts are not serialized: this last-write-wins rule is the only
//! arbitration between them.

use super::surface::{Element, ElementHandle, ElementKey, Layer, Surface, Timing};
use crate::event_loop::Millis;
use ahash::AHashMap;
use log::debug;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct Tween {
    seq: u64,
    start: Millis,
    duration: Millis,
    /// x at `start`, captured once the clock reaches it.
    from: Option<f64>,
    to: f64,
}

impl Tween {
    fn end(&self) -> Millis {
        self.start + self.duration
    }
}

#[derive(Debug, Clone)]
struct Node {
    key: ElementKey,
    element: Element,
    tweens: Vec<Tween>,
}

/// One drawable element resolved at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameItem {
    pub key: ElementKey,
    pub element: Element,
}

/// Snapshot of the scene at `time`, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub time: Millis,
    pub width: u32,
    pub height: u32,
    pub items: Vec<FrameItem>,
}

impl Frame {
    /// Items of one layer, in creation order.
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &FrameItem> {
        self.items.iter().filter(move |i| i.key.layer == layer)
    }

    pub fn find(&self, layer: Layer, key: &str) -> Option<&Element> {
        self.items
            .iter()
            .find(|i| i.key.layer == layer && i.key.key == key)
            .map(|i| &i.element)
    }
}

/// d3's default transition easing.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let u = t - 2.0;
        (u * u * u + 2.0) / 2.0
    }
}

/// x of an element at `t`, considering only tweens scheduled before `below`.
fn sample_x(base: f64, tweens: &[Tween], t: Millis, below: u64) -> f64 {
    let effective = tweens
        .iter()
        .filter(|tw| tw.seq < below && tw.start <= t)
        .max_by_key(|tw| tw.seq);
    let Some(tw) = effective else {
        return base;
    };
    if t >= tw.end() {
        return tw.to;
    }
    let from = tw
        .from
        .unwrap_or_else(|| sample_x(base, tweens, tw.start, tw.seq));
    let p = (t - tw.start) as f64 / tw.duration as f64;
    from + (tw.to - from) * ease_cubic_in_out(p)
}

impl Node {
    /// Pin the start value of every tween that has begun by `now`.
    fn capture_starts(&mut self, now: Millis) {
        let base = self.element.x();
        for i in 0..self.tweens.len() {
            let tw = &self.tweens[i];
            if tw.from.is_some() || tw.start > now {
                continue;
            }
            let from = sample_x(base, &self.tweens, tw.start, tw.seq);
            self.tweens[i].from = Some(from);
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    width: u32,
    height: u32,
    next_handle: u64,
    next_seq: u64,
    now: Millis,
    nodes: BTreeMap<ElementHandle, Node>,
    index: AHashMap<ElementKey, ElementHandle>,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            next_handle: 0,
            next_seq: 0,
            now: 0,
            nodes: BTreeMap::new(),
            index: AHashMap::new(),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Committed attributes (without in-flight transitions).
    pub fn element(&self, handle: ElementHandle) -> Option<&Element> {
        self.nodes.get(&handle).map(|n| &n.element)
    }

    pub fn key_of(&self, handle: ElementHandle) -> Option<&ElementKey> {
        self.nodes.get(&handle).map(|n| &n.key)
    }

    /// Horizontal position of an element at time `t`.
    pub fn x_at(&self, handle: ElementHandle, t: Millis) -> Option<f64> {
        let node = self.nodes.get(&handle)?;
        Some(sample_x(node.element.x(), &node.tweens, t, u64::MAX))
    }

    /// Whether any element still moves at or after `t`.
    pub fn is_animating(&self, t: Millis) -> bool {
        self.nodes
            .values()
            .any(|n| n.tweens.iter().any(|tw| tw.end() > t))
    }

    /// Latest time at which a scheduled tween ends, if any remain.
    pub fn settles_at(&self) -> Option<Millis> {
        self.nodes
            .values()
            .flat_map(|n| n.tweens.iter().map(Tween::end))
            .max()
    }

    /// Resolve every element at time `t`, ordered by layer then creation.
    pub fn frame(&self, t: Millis) -> Frame {
        let mut items: Vec<(Layer, ElementHandle, FrameItem)> = self
            .nodes
            .iter()
            .map(|(h, n)| {
                let mut element = n.element.clone();
                if !n.tweens.is_empty() {
                    element.set_x(sample_x(n.element.x(), &n.tweens, t, u64::MAX));
                }
                (
                    n.key.layer,
                    *h,
                    FrameItem {
                        key: n.key.clone(),
                        element,
                    },
                )
            })
            .collect();
        items.sort_by_key(|(layer, h, _)| (*layer, *h));
        Frame {
            time: t,
            width: self.width,
            height: self.height,
            items: items.into_iter().map(|(_, _, item)| item).collect(),
        }
    }

    /// Frame at the scene's current time.
    pub fn current_frame(&self) -> Frame {
        self.frame(self.now)
    }

    pub fn now(&self) -> Millis {
        self.now
    }
}

impl Surface for Scene {
    fn create(&mut self, key: ElementKey, element: Element) -> ElementHandle {
        if let Some(old) = self.index.get(&key).copied() {
            debug!("replacing element {:?}", key);
            self.remove(old);
        }
        self.next_handle += 1;
        let handle = ElementHandle(self.next_handle);
        self.index.insert(key.clone(), handle);
        self.nodes.insert(
            handle,
            Node {
                key,
                element,
                tweens: Vec::new(),
            },
        );
        handle
    }

    fn update(&mut self, handle: ElementHandle, element: Element) {
        match self.nodes.get_mut(&handle) {
            Some(node) => {
                node.capture_starts(self.now);
                node.element = element;
            }
            None => debug!("update of unknown element {:?}", handle),
        }
    }

    fn remove(&mut self, handle: ElementHandle) {
        if let Some(node) = self.nodes.remove(&handle) {
            self.index.remove(&node.key);
        }
    }

    fn lookup(&self, key: &ElementKey) -> Option<ElementHandle> {
        self.index.get(key).copied()
    }

    fn handles_in(&self, layer: Layer) -> Vec<(String, ElementHandle)> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.key.layer == layer)
            .map(|(h, n)| (n.key.key.clone(), *h))
            .collect()
    }

    fn transition_x(&mut self, handle: ElementHandle, target_x: f64, timing: Timing) {
        let Some(node) = self.nodes.get_mut(&handle) else {
            debug!("transition on unknown element {:?}", handle);
            return;
        };
        self.next_seq += 1;
        node.tweens.push(Tween {
            seq: self.next_seq,
            start: timing.start,
            duration: timing.duration,
            from: None,
            to: target_x,
        });
    }

    /// Fold finished tweens into the committed x.
    fn tick(&mut self, now: Millis) {
        self.now = self.now.max(now);
        for node in self.nodes.values_mut() {
            node.capture_starts(now);
            let effective = node
                .tweens
                .iter()
                .filter(|tw| tw.start <= now)
                .max_by_key(|tw| tw.seq)
                .cloned();
            if let Some(tw) = effective
                && now >= tw.end()
            {
                node.element.set_x(tw.to);
                node.tweens.retain(|t| t.seq > tw.seq);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::surface::{Anchor, Label};
    use plotters::style::RGBColor;

    fn label(x: f64) -> Element {
        Element::Label(Label {
            text: "A".into(),
            x,
            y: 0.0,
            rotated: false,
            anchor: Anchor::Start,
            color: RGBColor(0, 0, 0),
            font_px: 11,
        })
    }

    #[test]
    fn tween_interpolates_then_commits() {
        let mut s = Scene::new(100, 100);
        let h = s.create(ElementKey::new(Layer::CategoryLabels, "A"), label(0.0));
        s.transition_x(
            h,
            100.0,
            Timing {
                start: 10,
                duration: 100,
            },
        );
        assert_eq!(s.x_at(h, 0), Some(0.0));
        assert_eq!(s.x_at(h, 60), Some(50.0));
        assert_eq!(s.x_at(h, 110), Some(100.0));
        s.tick(200);
        assert_eq!(s.element(h).map(Element::x), Some(100.0));
        assert!(!s.is_animating(200));
    }

    #[test]
    fn later_scheduled_tween_supersedes_running_one() {
        let mut s = Scene::new(100, 100);
        let h = s.create(ElementKey::new(Layer::Bars, "A"), label(0.0));
        s.transition_x(h, 100.0, Timing { start: 0, duration: 100 });
        s.transition_x(h, -100.0, Timing { start: 50, duration: 100 });
        // second tween starts from where the first had got to
        let at_start = s.x_at(h, 50).unwrap();
        assert!((at_start - 50.0).abs() < 1e-9);
        assert_eq!(s.x_at(h, 150), Some(-100.0));
        assert_eq!(s.x_at(h, 1_000), Some(-100.0));
    }

    #[test]
    fn update_during_tween_keeps_its_course() {
        let mut s = Scene::new(100, 100);
        let h = s.create(ElementKey::new(Layer::Bars, "A"), label(0.0));
        s.transition_x(h, 100.0, Timing { start: 0, duration: 100 });
        s.tick(50);
        s.update(h, label(100.0));
        assert_eq!(s.x_at(h, 50), Some(50.0));
        s.tick(100);
        assert_eq!(s.element(h).map(Element::x), Some(100.0));
    }

    #[test]
    fn older_tween_starting_later_is_ignored() {
        let mut s = Scene::new(100, 100);
        let h = s.create(ElementKey::new(Layer::Bars, "A"), label(0.0));
        s.transition_x(h, 100.0, Timing { start: 300, duration: 100 });
        s.transition_x(h, 40.0, Timing { start: 0, duration: 100 });
        assert_eq!(s.x_at(h, 350), Some(40.0));
        s.tick(500);
        assert_eq!(s.element(h).map(Element::x), Some(40.0));
    }
}
