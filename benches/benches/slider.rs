// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Rect};
use understory_slider::{
    Domain, Handle, ListenerRegistry, Mode, PointerEvent, PointerKind, Scales, Slider,
    SliderConfig, SliderHost, UpdateSink, ValueSet, compute_range, resolve, validate_defaults,
};

const RAIL: Rect = Rect::new(0.0, 0.0, 1_000.0, 10.0);

#[derive(Debug, Default)]
struct Host {
    updates: usize,
}

impl UpdateSink<u32> for Host {
    fn on_update(&mut self, _values: &ValueSet<u32>) {
        self.updates += 1;
    }
}

impl ListenerRegistry for Host {
    fn subscribe(&mut self, _kind: PointerKind) {}
    fn unsubscribe(&mut self, _kind: PointerKind) {}
}

impl SliderHost<u32> for Host {
    fn rail_bounds(&self) -> Rect {
        RAIL
    }
}

fn handles(count: u32, max: f64) -> Vec<Handle<u32>> {
    let spacing = max / f64::from(count + 1);
    (0..count)
        .map(|k| Handle::new(k, (f64::from(k + 1) * spacing).round()))
        .collect()
}

fn bench_compute_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("slider/compute_range");

    // Decimal steps go through the precision cleanup on every value.
    for (max, step) in [(100.0, 1.0), (1_000.0, 0.1), (10_000.0, 1.0)] {
        let domain = Domain::new(0.0, max).unwrap();
        let len = compute_range(domain, step, false).unwrap().len();
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &step, |b, &step| {
            b.iter(|| black_box(compute_range(domain, step, false)));
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("slider/resolve");
    let scales = Scales::new(Domain::new(0.0, 10_000.0).unwrap(), 1.0, false).unwrap();

    // Worst case for push: the first handle is dragged past every other one.
    for count in [2_u32, 16, 256] {
        let (set, _) = validate_defaults(handles(count, 10_000.0), &scales);
        group.throughput(Throughput::Elements(u64::from(count)));

        for mode in [Mode::Push, Mode::Swap] {
            let id = BenchmarkId::new(format!("{mode:?}"), count);
            group.bench_with_input(id, &set, |b, set| {
                b.iter(|| black_box(resolve(mode, &scales, set, &0, 9_999.0)));
            });
        }
    }

    group.finish();
}

fn bench_drag_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("slider/drag_sweep");

    // One move per pixel across the whole rail, then release.
    for count in [2_u32, 16] {
        group.throughput(Throughput::Elements(1_000));
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter_batched(
                || {
                    let config = SliderConfig::new([0.0, 1_000.0], Mode::Swap)
                        .with_step(1.0)
                        .with_values(handles(count, 1_000.0));
                    Slider::new(config, Host::default()).unwrap()
                },
                |mut slider| {
                    slider.pointer_down(&0, &PointerEvent::mouse(Point::new(0.0, 5.0)));
                    for x in 0..1_000 {
                        let event = PointerEvent::mouse(Point::new(f64::from(x), 5.0));
                        slider.pointer_move(&event);
                    }
                    slider.pointer_up(&PointerEvent::mouse(Point::new(1_000.0, 5.0)));
                    black_box(slider.host().updates);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute_range, bench_resolve, bench_drag_sweep);
criterion_main!(benches);
