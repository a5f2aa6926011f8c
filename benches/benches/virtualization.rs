// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use timegrid_virtual::{ColumnVirtualizer, RowVirtualizer};

fn bench_row_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("virtual/rows_scroll");
    for len in [96_usize, 288, 1_440] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            let mut rows = RowVirtualizer::new(len, 20.0_f64, 800.0);
            let max = rows.max_scroll_offset();
            b.iter(|| {
                let mut realized = 0;
                for step in 0..100 {
                    rows.set_scroll_offset(max * f64::from(step) / 100.0);
                    realized += rows.window().len();
                }
                black_box(realized)
            });
        });
    }
    group.finish();
}

fn bench_column_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("virtual/columns_scroll");
    for count in [8_usize, 50, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut columns = ColumnVirtualizer::new(count, 120.0_f64, 1_024.0);
            let max = (columns.content_width() - 1_024.0).max(0.0);
            b.iter(|| {
                let mut realized = 0;
                for step in 0..100 {
                    columns.set_scroll_x(max * f64::from(step) / 100.0);
                    realized += columns.window().window.len();
                }
                black_box(realized)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_row_scroll, bench_column_scroll);
criterion_main!(benches);
