// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use timegrid_slots::{GridSpace, SlotGrids};
use timegrid_view::SlotAxis;

fn bench_grid_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("slots/build");

    // Whole day at decreasing granularity; the selection grid dominates.
    for granularity in [60_u32, 15, 5, 1] {
        let slots = 24 * 60 / granularity;
        group.throughput(Throughput::Elements(u64::from(slots)));
        group.bench_with_input(
            BenchmarkId::from_parameter(granularity),
            &granularity,
            |b, &granularity| {
                b.iter(|| {
                    let grids = SlotGrids::from_hours(0, 24, 60, Some(granularity));
                    black_box(grids)
                });
            },
        );
    }
    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let Ok(grids) = SlotGrids::from_hours(0, 24, 30, Some(5)) else {
        return;
    };
    let len = grids.len(GridSpace::Selection);
    let mut group = c.benchmark_group("slots/convert");
    group.throughput(Throughput::Elements(len as u64));
    group.bench_function("selection_to_display", |b| {
        b.iter(|| {
            let mut sum = 0;
            for index in 0..len {
                sum += grids.convert(black_box(index), GridSpace::Selection, GridSpace::Display);
            }
            sum
        });
    });
    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let Ok(grids) = SlotGrids::from_hours(0, 24, 60, Some(5)) else {
        return;
    };
    let axis = SlotAxis::for_grid(&grids, GridSpace::Selection, 80.0);
    let extent = axis.content_extent();
    c.bench_function("slots/hit_test_1k", |b| {
        b.iter(|| {
            let mut hits = 0;
            for i in 0..1_000 {
                let y = extent * f64::from(i) / 1_000.0;
                if axis.slot_at(black_box(y)).is_some() {
                    hits += 1;
                }
            }
            hits
        });
    });
}

criterion_group!(benches, bench_grid_build, bench_convert, bench_hit_test);
criterion_main!(benches);
