// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_slider` crate.
//!
//! These drive the public API end to end: configuration and validation, the
//! scale properties, both collision modes, and full drag sessions against a
//! recording host.

use kurbo::{Point, Rect};
use understory_slider::{
    ConfigError, Diagnostic, Domain, DragOutcome, Handle, ListenerRegistry, Mode, Orientation,
    PointerEvent, PointerKind, Recorder, Resolution, Scales, Slider, SliderConfig, SliderHost,
    UpdateSink, ValueSet, compute_range, resolve,
};

/// Host that records listener registrations and every value set it receives.
#[derive(Debug)]
struct Host<K> {
    rail: Rect,
    listeners: Vec<(bool, PointerKind)>,
    recorder: Recorder<K>,
}

impl<K> Host<K> {
    fn new(rail: Rect) -> Self {
        Self {
            rail,
            listeners: Vec::new(),
            recorder: Recorder::new(),
        }
    }

    fn subscribed(&self) -> usize {
        self.listeners.iter().filter(|(on, _)| *on).count()
    }

    fn unsubscribed(&self) -> usize {
        self.listeners.iter().filter(|(on, _)| !*on).count()
    }
}

impl<K: Clone> UpdateSink<K> for Host<K> {
    fn on_update(&mut self, values: &ValueSet<K>) {
        self.recorder.on_update(values);
    }

    fn on_change(&mut self, values: &ValueSet<K>) {
        self.recorder.on_change(values);
    }
}

impl<K> ListenerRegistry for Host<K> {
    fn subscribe(&mut self, kind: PointerKind) {
        self.listeners.push((true, kind));
    }

    fn unsubscribe(&mut self, kind: PointerKind) {
        self.listeners.push((false, kind));
    }
}

impl<K: Clone> SliderHost<K> for Host<K> {
    fn rail_bounds(&self) -> Rect {
        self.rail
    }
}

const RAIL: Rect = Rect::new(0.0, 0.0, 400.0, 8.0);

fn mouse(x: f64) -> PointerEvent {
    PointerEvent::mouse(Point::new(x, 4.0))
}

fn touch(x: f64) -> PointerEvent {
    PointerEvent::touch([Point::new(x, 4.0)])
}

/// Domain `[100, 500]`, step 5, on a 400px rail.
fn build(mode: Mode, reversed: bool, values: &[f64]) -> Slider<usize, Host<usize>> {
    let config = SliderConfig::new([100.0, 500.0], mode)
        .with_step(5.0)
        .with_reversed(reversed)
        .with_indexed_values(values.iter().copied());
    Slider::new(config, Host::new(RAIL)).unwrap()
}

fn values<K>(set: &ValueSet<K>) -> Vec<f64> {
    set.values().collect()
}

fn keys<K: Copy>(set: &ValueSet<K>) -> Vec<K> {
    set.keys().copied().collect()
}

// Construction scenarios.

#[test]
fn on_grid_defaults_are_taken_as_given() {
    let slider = build(Mode::Swap, true, &[450.0, 400.0, 300.0, 150.0]);
    assert!(slider.diagnostics().is_empty());
    assert_eq!(values(slider.values()), [450.0, 400.0, 300.0, 150.0]);
    assert_eq!(keys(slider.values()), [0, 1, 2, 3]);

    // Forward sliders hold the same values in ascending order.
    let slider = build(Mode::Swap, false, &[450.0, 400.0, 300.0, 150.0]);
    assert!(slider.diagnostics().is_empty());
    assert_eq!(values(slider.values()), [150.0, 300.0, 400.0, 450.0]);
    assert_eq!(keys(slider.values()), [3, 2, 1, 0]);
}

#[test]
fn off_grid_default_is_corrected() {
    let slider = build(Mode::Push, true, &[452.0, 400.0]);
    assert_eq!(values(slider.values()), [450.0, 400.0]);
    assert_eq!(
        slider.diagnostics(),
        [Diagnostic::OffGrid {
            key: 0,
            given: 452.0,
            corrected: 450.0
        }]
    );
}

#[test]
fn duplicate_key_keeps_first_occurrence() {
    let config = SliderConfig::new([100.0, 500.0], Mode::Push)
        .with_step(5.0)
        .with_values([Handle::new("a", 200.0), Handle::new("a", 250.0)]);
    let slider = Slider::new(config, Host::new(RAIL)).unwrap();
    assert_eq!(slider.values().handles(), [Handle::new("a", 200.0)]);
    assert_eq!(
        slider.diagnostics(),
        [Diagnostic::DuplicateKey {
            key: "a",
            value: 250.0
        }]
    );
    assert_eq!(
        slider.diagnostics()[0].to_string(),
        "duplicate key \"a\" (value 250) skipped; keys must be unique"
    );
}

#[test]
fn empty_domain_fails_construction() {
    let config = SliderConfig::new([10.0, 10.0], Mode::Push).with_indexed_values([10.0]);
    let err = Slider::new(config, Host::new(RAIL)).unwrap_err();
    assert_eq!(
        err,
        ConfigError::EmptyDomain {
            min: 10.0,
            max: 10.0
        }
    );

    // Reversing does not relax the requirement.
    let config = SliderConfig::<usize>::new([10.0, 0.0], Mode::Push).with_reversed(true);
    assert!(matches!(
        Slider::new(config, Host::new(RAIL)),
        Err(ConfigError::EmptyDomain { .. })
    ));
}

#[test]
fn other_configuration_errors() {
    assert_eq!(Mode::try_from(0), Err(ConfigError::InvalidMode(0)));

    let config = SliderConfig::<usize>::new([0.0, 10.0], Mode::Push).with_step(3.0);
    assert!(matches!(
        Slider::new(config, Host::new(RAIL)),
        Err(ConfigError::RangeMismatch { .. })
    ));

    let config = SliderConfig::<usize>::new([0.0, 1e6], Mode::Push).with_step(1.0);
    assert!(matches!(
        Slider::new(config, Host::new(RAIL)),
        Err(ConfigError::TooManySteps { .. })
    ));
}

// Scale properties.

#[test]
fn computed_ranges_are_strictly_monotonic_with_exact_ends() {
    let cases = [
        (100.0, 500.0, 5.0),
        (0.0, 1.0, 0.1),
        (-1.0, 1.0, 0.05),
        (0.0, 10_000.0, 1.0),
        (2.5, 3.0, 0.125),
    ];
    for (min, max, step) in cases {
        let domain = Domain::new(min, max).unwrap();
        for reversed in [false, true] {
            let range = compute_range(domain, step, reversed).unwrap();
            let (start, end) = if reversed { (max, min) } else { (min, max) };
            assert_eq!(range.first(), Some(&start));
            assert_eq!(range.last(), Some(&end));
            if reversed {
                assert!(range.windows(2).all(|w| w[0] > w[1]));
            } else {
                assert!(range.windows(2).all(|w| w[0] < w[1]));
            }

            let scales = Scales::new(domain, step, reversed).unwrap();
            for &value in &range {
                assert_eq!(scales.value_to_step(value), value);
            }
        }
    }
}

#[test]
fn pixel_to_percent_round_trip_stays_within_a_pixel() {
    let domain = Domain::new(0.0, 100.0).unwrap();
    for reversed in [false, true] {
        let mut scales = Scales::new(domain, 0.1, reversed).unwrap();
        let (start, end) = (50.0, 450.0);
        scales.set_pixel_extent(start..end);

        let mut p = start;
        while p < end {
            let value = scales.pixel_to_step(p).unwrap();
            let percent = scales.value_to_percent(scales.value_to_step(value));
            let back = start + percent / 100.0 * (end - start);
            assert!((back - p).abs() <= 1.0, "{p} came back as {back}");
            p += 0.25;
        }
    }
}

// Collision resolution.

fn pair() -> ValueSet<usize> {
    build(Mode::Push, false, &[150.0, 300.0]).values().clone()
}

fn scales() -> Scales {
    Scales::new(Domain::new(100.0, 500.0).unwrap(), 5.0, false).unwrap()
}

#[test]
fn push_carries_the_neighbour() {
    let next = resolve(Mode::Push, &scales(), &pair(), &0, 310.0)
        .into_changed()
        .unwrap();
    assert_eq!(values(&next), [310.0, 310.0]);
    assert_eq!(keys(&next), [0, 1]);
}

#[test]
fn swap_exchanges_slots() {
    let next = resolve(Mode::Swap, &scales(), &pair(), &0, 310.0)
        .into_changed()
        .unwrap();
    assert_eq!(values(&next), [300.0, 310.0]);
    assert_eq!(keys(&next), [1, 0]);
}

#[test]
fn resolving_twice_is_unchanged() {
    for mode in [Mode::Push, Mode::Swap] {
        let once = resolve(mode, &scales(), &pair(), &0, 312.0)
            .into_changed()
            .unwrap();
        assert_eq!(
            resolve(mode, &scales(), &once, &0, 312.0),
            Resolution::Unchanged
        );
    }
}

/// Deterministic pseudo-random proposals across and beyond the domain.
fn proposals() -> impl Iterator<Item = f64> {
    let mut state = 0x2545_f491_u32;
    (0..400).map(move |_| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        f64::from(state % 600) + 0.3
    })
}

#[test]
fn push_never_inverts_order() {
    for reversed in [false, true] {
        let scales = Scales::new(Domain::new(100.0, 500.0).unwrap(), 5.0, reversed).unwrap();
        let mut set = build(Mode::Push, reversed, &[150.0, 250.0, 350.0, 450.0])
            .values()
            .clone();
        let original_keys = keys(&set);

        for (i, proposed) in proposals().enumerate() {
            let active = i % 4;
            if let Resolution::Changed(next) = resolve(Mode::Push, &scales, &set, &active, proposed)
            {
                set = next;
            }
            assert!(set.is_sorted());
            assert_eq!(keys(&set), original_keys);
        }
    }
}

#[test]
fn swap_preserves_the_value_multiset() {
    let scales = scales();
    let mut set = build(Mode::Swap, false, &[150.0, 250.0, 350.0, 450.0])
        .values()
        .clone();

    for (i, proposed) in proposals().enumerate() {
        let active = i % 4;
        let old = set.get(&active).unwrap().value;
        let mut expected = values(&set);
        let slot = expected.iter().position(|v| *v == old).unwrap();
        expected[slot] = scales.value_to_step(proposed);
        expected.sort_by(f64::total_cmp);

        if let Resolution::Changed(next) = resolve(Mode::Swap, &scales, &set, &active, proposed) {
            set = next;
        }
        assert_eq!(values(&set), expected);
        assert!(set.is_sorted());
    }
}

// Drag sessions.

#[test]
fn push_drag_end_to_end() {
    let mut slider = build(Mode::Push, false, &[150.0, 300.0]);
    assert_eq!(slider.pointer_down(&0, &mouse(50.0)), DragOutcome::Started);
    assert_eq!(slider.pointer_move(&mouse(210.0)), DragOutcome::Updated);
    assert_eq!(slider.pointer_up(&mouse(210.0)), DragOutcome::Committed);

    let rec = &slider.host().recorder;
    assert_eq!(rec.updates.len(), 1);
    assert_eq!(values(rec.last_commit().unwrap()), [310.0, 310.0]);
}

#[test]
fn swap_drag_end_to_end() {
    let mut slider = build(Mode::Swap, false, &[150.0, 300.0]);
    assert_eq!(slider.pointer_down(&0, &touch(50.0)), DragOutcome::Started);
    assert_eq!(slider.pointer_move(&touch(210.0)), DragOutcome::Updated);
    assert_eq!(
        slider.pointer_up(&PointerEvent::touch([])),
        DragOutcome::Committed
    );

    let committed = slider.host().recorder.last_commit().unwrap();
    assert_eq!(
        committed.handles(),
        [Handle::new(1, 300.0), Handle::new(0, 310.0)]
    );
}

#[test]
fn every_subscription_is_paired() {
    let mut slider = build(Mode::Push, false, &[150.0, 300.0]);
    for (key, event) in [(0, mouse(50.0)), (1, touch(200.0)), (0, mouse(60.0))] {
        assert_eq!(slider.pointer_down(&key, &event), DragOutcome::Started);
        assert_eq!(slider.host().subscribed(), slider.host().unsubscribed() + 1);
        let up = match event.kind() {
            PointerKind::Mouse => mouse(0.0),
            PointerKind::Touch => PointerEvent::touch([]),
        };
        assert_eq!(slider.pointer_up(&up), DragOutcome::Committed);
        assert_eq!(slider.host().subscribed(), slider.host().unsubscribed());
    }
    assert_eq!(slider.host().recorder.commits.len(), 3);
}

#[test]
fn jitter_inside_one_step_sends_no_updates() {
    let mut slider = build(Mode::Push, false, &[150.0, 300.0]);
    assert_eq!(slider.pointer_down(&0, &mouse(50.0)), DragOutcome::Started);
    // 210px lands in the bucket [207.4, 212.3) for 310.
    for x in [208.0, 209.0, 210.0, 211.0, 212.0] {
        slider.pointer_move(&mouse(x));
    }
    assert_eq!(slider.host().recorder.updates.len(), 1);
}

#[test]
fn reversed_rail_maps_left_to_max() {
    let mut slider = build(Mode::Push, true, &[450.0, 150.0]);
    assert_eq!(slider.percent_of(&0), Some(12.5));

    assert_eq!(slider.pointer_down(&1, &mouse(350.0)), DragOutcome::Started);
    assert_eq!(slider.pointer_move(&mouse(0.0)), DragOutcome::Updated);
    assert_eq!(slider.pointer_up(&mouse(0.0)), DragOutcome::Committed);

    // Dragging the low handle all the way left pushes the high one to max.
    assert_eq!(values(slider.values()), [500.0, 500.0]);
    assert_eq!(keys(slider.values()), [0, 1]);
}

#[test]
fn vertical_slider_follows_y() {
    let config = SliderConfig::new([0.0, 100.0], Mode::Swap)
        .with_step(10.0)
        .with_orientation(Orientation::Vertical)
        .with_indexed_values([0.0, 50.0]);
    let mut slider = Slider::new(config, Host::new(Rect::new(0.0, 100.0, 8.0, 210.0))).unwrap();

    assert_eq!(slider.pointer_down(&0, &mouse(0.0)), DragOutcome::Started);
    // 205 - 100 = 105px into a 110px rail: the last of eleven buckets.
    let event = PointerEvent::mouse(Point::new(1_000.0, 205.0));
    assert_eq!(slider.pointer_move(&event), DragOutcome::Updated);
    assert_eq!(slider.values().get(&0), Some(&Handle::new(0, 100.0)));
}

#[test]
fn dropping_mid_drag_unsubscribes() {
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct Shared(Rc<RefCell<Vec<PointerKind>>>);

    impl UpdateSink<usize> for Shared {}

    impl ListenerRegistry for Shared {
        fn subscribe(&mut self, kind: PointerKind) {
            self.0.borrow_mut().push(kind);
        }

        fn unsubscribe(&mut self, kind: PointerKind) {
            self.0.borrow_mut().retain(|k| *k != kind);
        }
    }

    impl SliderHost<usize> for Shared {
        fn rail_bounds(&self) -> Rect {
            RAIL
        }
    }

    let listeners = Rc::new(RefCell::new(Vec::new()));
    let config = SliderConfig::new([0.0, 1.0], Mode::Swap).with_indexed_values([0.5]);
    let mut slider = Slider::new(config, Shared(Rc::clone(&listeners))).unwrap();
    assert_eq!(slider.pointer_down(&0, &touch(200.0)), DragOutcome::Started);
    assert_eq!(*listeners.borrow(), [PointerKind::Touch]);

    drop(slider);
    assert!(listeners.borrow().is_empty());
}

#[test]
fn tracks_follow_the_values() {
    let slider = build(Mode::Push, true, &[450.0, 150.0]);
    let tracks = slider.values().tracks(slider.domain(), true, true);
    let ends: Vec<(f64, f64)> = tracks
        .iter()
        .map(|t| (t.source.value(), t.target.value()))
        .collect();
    assert_eq!(ends, [(500.0, 450.0), (450.0, 150.0), (150.0, 100.0)]);
}

#[test]
fn ticks_cover_the_domain() {
    let slider = build(Mode::Push, false, &[]);
    let ticks = slider.scales().ticks(15);
    assert_eq!(ticks.first(), Some(&100.0));
    assert_eq!(ticks.last(), Some(&500.0));
}
