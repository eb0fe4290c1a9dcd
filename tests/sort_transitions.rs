use partisan_bars::config::TransitionConfig;
use partisan_bars::viz::{Element, ElementHandle, ElementKey, Layer, Scene, Surface, Timing};
use partisan_bars::{AutoTrigger, Chart, ChartConfig, Dataset, Record, SortOrder, storage};

fn two() -> Dataset {
    Dataset::new(vec![
        Record::new("A", 50_000.0, 10, 4),
        Record::new("B", 70_000.0, 3, 9),
    ])
    .unwrap()
}

fn states() -> Dataset {
    storage::parse_json(include_str!("../data/states.json")).unwrap()
}

fn bar_x(chart: &Chart, name: &str) -> f64 {
    match chart.frame().find(Layer::Bars, name) {
        Some(Element::Bar(b)) => b.x,
        other => panic!("no bar for {name}: {other:?}"),
    }
}

fn label_x(chart: &Chart, name: &str) -> f64 {
    match chart.frame().find(Layer::CategoryLabels, name) {
        Some(Element::Label(l)) => l.x,
        other => panic!("no label for {name}: {other:?}"),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

/// Scene wrapper that records every transition request.
#[derive(Debug)]
struct Recorder {
    scene: Scene,
    moves: Vec<(ElementHandle, f64, Timing)>,
}

impl Recorder {
    fn new() -> Self {
        Self {
            scene: Scene::new(1100, 600),
            moves: Vec::new(),
        }
    }
}

impl Surface for Recorder {
    fn create(&mut self, key: ElementKey, element: Element) -> ElementHandle {
        self.scene.create(key, element)
    }
    fn update(&mut self, handle: ElementHandle, element: Element) {
        self.scene.update(handle, element)
    }
    fn remove(&mut self, handle: ElementHandle) {
        self.scene.remove(handle)
    }
    fn lookup(&self, key: &ElementKey) -> Option<ElementHandle> {
        self.scene.lookup(key)
    }
    fn handles_in(&self, layer: Layer) -> Vec<(String, ElementHandle)> {
        self.scene.handles_in(layer)
    }
    fn transition_x(&mut self, handle: ElementHandle, target_x: f64, timing: Timing) {
        self.moves.push((handle, target_x, timing));
        self.scene.transition_x(handle, target_x, timing)
    }
    fn tick(&mut self, now: u64) {
        self.scene.tick(now)
    }
}

#[test]
fn toggle_on_sorts_by_income_and_moves_bars() {
    let mut chart = Chart::new(two(), ChartConfig::default()).unwrap();
    // band range [40, 1100], two slots of 530 with 10% padding
    assert!(close(bar_x(&chart, "A"), 66.5));
    assert!(close(bar_x(&chart, "B"), 596.5));

    chart.toggle(true).unwrap();
    assert_eq!(chart.dataset().names(), ["B", "A"]);
    assert_eq!(chart.band().domain(), ["B", "A"]);
    assert_eq!(chart.order(), Some(SortOrder::DescendingByValue));

    chart.advance(1_000).unwrap();
    assert!(close(bar_x(&chart, "B"), 66.5));
    assert!(close(bar_x(&chart, "A"), 596.5));
    assert!(!chart.is_animating());
}

#[test]
fn bars_are_colored_by_partisan_score() {
    let chart = Chart::new(two(), ChartConfig::default()).unwrap();
    let frame = chart.frame();
    let low = chart.color().low();
    let high = chart.color().high();
    let dist = |a: plotters::style::RGBColor, b: plotters::style::RGBColor| {
        (a.0 as i32 - b.0 as i32).abs()
            + (a.1 as i32 - b.1 as i32).abs()
            + (a.2 as i32 - b.2 as i32).abs()
    };
    let Some(Element::Bar(a)) = frame.find(Layer::Bars, "A") else {
        panic!("missing A");
    };
    let Some(Element::Bar(b)) = frame.find(Layer::Bars, "B") else {
        panic!("missing B");
    };
    // A: 10 of 14 Democratic, B: 3 of 12
    assert!(dist(a.fill, high) < dist(a.fill, low));
    assert!(dist(b.fill, low) < dist(b.fill, high));
    assert_eq!(a.tooltip.title, "A");
    assert_eq!(a.tooltip.content, "Median income: $50,000");
}

#[test]
fn auto_sort_fires_after_two_seconds() {
    let mut chart = Chart::new(two(), ChartConfig::default()).unwrap();
    assert_eq!(chart.auto_trigger(), AutoTrigger::Scheduled);
    assert_eq!(chart.pending_events(), 1);

    chart.advance(1_999).unwrap();
    assert_eq!(chart.sorts_executed(), 0);
    assert_eq!(chart.order(), None);
    assert!(!chart.is_checked());

    chart.advance(1).unwrap();
    assert_eq!(chart.now(), 2_000);
    assert_eq!(chart.auto_trigger(), AutoTrigger::Fired);
    assert!(chart.is_checked());
    assert_eq!(chart.dataset().names(), ["B", "A"]);
    // transitions start now, so nothing has moved yet
    assert!(close(bar_x(&chart, "B"), 596.5));
    assert!(chart.is_animating());

    // last rank starts 35 ms later and runs 750 ms
    chart.advance_to(2_000 + 35 + 750).unwrap();
    assert!(close(bar_x(&chart, "A"), 596.5));
    assert!(close(bar_x(&chart, "B"), 66.5));
    assert!(!chart.is_animating());
    assert_eq!(chart.pending_events(), 0);
}

#[test]
fn early_toggle_cancels_the_auto_sort() {
    let mut chart = Chart::new(two(), ChartConfig::default()).unwrap();
    chart.advance(500).unwrap();
    chart.toggle(false).unwrap();
    assert_eq!(chart.auto_trigger(), AutoTrigger::Cancelled);
    assert_eq!(chart.pending_events(), 0);

    chart.advance(10_000).unwrap();
    assert_eq!(chart.sorts_executed(), 1);
    assert_eq!(chart.order(), Some(SortOrder::AscendingByName));
    assert_eq!(chart.dataset().names(), ["A", "B"]);
    assert!(!chart.is_checked());
}

#[test]
fn toggle_after_auto_sort_is_handled_normally() {
    let mut chart = Chart::new(two(), ChartConfig::default()).unwrap();
    chart.advance(3_000).unwrap();
    assert_eq!(chart.auto_trigger(), AutoTrigger::Fired);
    chart.toggle(false).unwrap();
    assert_eq!(chart.auto_trigger(), AutoTrigger::Fired);
    chart.advance(1_000).unwrap();
    assert_eq!(chart.dataset().names(), ["A", "B"]);
    assert!(close(bar_x(&chart, "A"), 66.5));
    assert_eq!(chart.sorts_executed(), 2);
}

#[test]
fn disabled_auto_sort_never_fires() {
    let config = ChartConfig {
        transition: TransitionConfig {
            auto_sort_delay_ms: None,
            ..TransitionConfig::default()
        },
        ..ChartConfig::default()
    };
    let mut chart = Chart::new(two(), config).unwrap();
    assert_eq!(chart.auto_trigger(), AutoTrigger::Disabled);
    chart.advance(60_000).unwrap();
    assert_eq!(chart.sorts_executed(), 0);
    assert_eq!(chart.dataset().names(), ["A", "B"]);
}

#[test]
fn ascending_sort_of_sorted_data_does_not_move_anything() {
    let mut chart = Chart::new(two(), ChartConfig::default()).unwrap();
    let before = chart.frame().items;
    chart.toggle(false).unwrap();
    for step in [0, 100, 300, 800] {
        chart.advance_to(step).unwrap();
        assert!(close(bar_x(&chart, "A"), 66.5));
        assert!(close(bar_x(&chart, "B"), 596.5));
    }
    assert_eq!(chart.frame().items, before);
}

#[test]
fn descending_sort_of_states() {
    let mut chart = Chart::new(states(), ChartConfig::default()).unwrap();
    chart.toggle(true).unwrap();
    let incomes: Vec<f64> = chart
        .dataset()
        .records()
        .iter()
        .map(|r| r.median_income)
        .collect();
    assert!(incomes.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(chart.dataset().names()[0], "Maryland");
    assert_eq!(chart.band().domain(), chart.dataset().names().as_slice());

    chart.advance(5_000).unwrap();
    let band = chart.band();
    for name in chart.dataset().names() {
        assert!(close(bar_x(&chart, &name), band.position(&name).unwrap()));
        assert!(close(label_x(&chart, &name), band.center(&name).unwrap()));
    }
}

#[test]
fn stagger_delays_each_rank_by_35ms() {
    let mut chart = Chart::with_surface(two(), ChartConfig::default(), Recorder::new()).unwrap();
    chart.advance(300).unwrap();
    chart.toggle(true).unwrap();

    let moves = &chart.surface().moves;
    let band = chart.band();
    for (rank, name) in chart.dataset().names().iter().enumerate() {
        let expected = Timing {
            start: 300 + 35 * rank as u64,
            duration: 750,
        };
        let bar = chart.bars().handle(name).unwrap();
        let label = chart
            .surface()
            .lookup(&ElementKey::new(Layer::CategoryLabels, name.clone()))
            .unwrap();
        assert!(moves.contains(&(bar, band.position(name).unwrap(), expected)));
        assert!(moves.contains(&(label, band.center(name).unwrap(), expected)));
    }
    assert_eq!(moves.len(), 4);
}

#[test]
fn sorting_keeps_element_identity() {
    let mut chart = Chart::new(states(), ChartConfig::default()).unwrap();
    let names = chart.dataset().names();
    let before: Vec<_> = names.iter().map(|n| chart.bars().handle(n)).collect();
    let count = chart.surface().len();

    chart.toggle(true).unwrap();
    chart.advance(100).unwrap();
    chart.toggle(false).unwrap();
    chart.advance(5_000).unwrap();

    let after: Vec<_> = names.iter().map(|n| chart.bars().handle(n)).collect();
    assert_eq!(before, after);
    assert_eq!(chart.surface().len(), count);

    let stats = chart.rerender();
    assert_eq!((stats.entered, stats.updated, stats.exited), (0, 50, 0));
}

#[test]
fn previous_band_scale_is_not_mutated() {
    let mut chart = Chart::new(two(), ChartConfig::default()).unwrap();
    let old = chart.band();
    chart.toggle(true).unwrap();
    assert_eq!(old.domain(), ["A", "B"]);
    assert!(close(old.position("A").unwrap(), 66.5));
    assert_eq!(chart.band().domain(), ["B", "A"]);
}

#[test]
fn overlapping_sorts_settle_on_the_latest_order() {
    let mut chart = Chart::new(two(), ChartConfig::default()).unwrap();
    chart.toggle(true).unwrap();
    chart.advance(100).unwrap();
    let mid = bar_x(&chart, "B");
    assert!(mid < 596.5 && mid > 66.5);

    chart.toggle(false).unwrap();
    // B's second move is delayed by its rank, so it keeps its current course for now
    assert!(close(bar_x(&chart, "B"), mid));
    chart.advance(2_000).unwrap();
    assert!(close(bar_x(&chart, "A"), 66.5));
    assert!(close(bar_x(&chart, "B"), 596.5));
    assert_eq!(chart.auto_trigger(), AutoTrigger::Cancelled);
}

#[test]
fn bars_and_labels_move_together() {
    let mut chart = Chart::new(two(), ChartConfig::default()).unwrap();
    let half_band = chart.band().bandwidth() / 2.0;
    chart.toggle(true).unwrap();
    for t in [0, 200, 400, 600, 900] {
        chart.advance_to(t).unwrap();
        for name in ["A", "B"] {
            assert!(close(label_x(&chart, name), bar_x(&chart, name) + half_band));
        }
    }
}

#[test]
fn rerender_mid_animation_keeps_bars_moving() {
    let mut chart = Chart::new(two(), ChartConfig::default()).unwrap();
    chart.toggle(true).unwrap();
    chart.advance(300).unwrap();
    let before = bar_x(&chart, "B");
    assert!(before < 596.5 && before > 66.5);

    let stats = chart.rerender();
    assert_eq!((stats.entered, stats.updated, stats.exited), (0, 2, 0));
    assert!(close(bar_x(&chart, "B"), before));

    chart.advance(100).unwrap();
    let later = bar_x(&chart, "B");
    assert!(later < before && later > 66.5);

    chart.advance(1_000).unwrap();
    assert!(close(bar_x(&chart, "B"), 66.5));
    assert!(close(bar_x(&chart, "A"), 596.5));
}

#[test]
fn sorting_by_name_twice_is_idempotent() {
    let unsorted = Dataset::new(vec![
        Record::new("C", 40_000.0, 1, 1),
        Record::new("A", 50_000.0, 10, 4),
        Record::new("B", 70_000.0, 3, 9),
    ])
    .unwrap();
    let mut chart = Chart::new(unsorted, ChartConfig::default()).unwrap();

    chart.toggle(false).unwrap();
    let names = chart.dataset().names();
    let domain = chart.band().domain().to_vec();
    assert_eq!(names, ["A", "B", "C"]);
    assert_eq!(domain, names);

    chart.advance(50).unwrap();
    chart.toggle(false).unwrap();
    assert_eq!(chart.dataset().names(), names);
    assert_eq!(chart.band().domain(), domain.as_slice());
    assert_eq!(chart.order(), Some(SortOrder::AscendingByName));

    chart.advance(2_000).unwrap();
    let band = chart.band();
    for name in &names {
        assert!(close(bar_x(&chart, name), band.position(name).unwrap()));
    }
}
