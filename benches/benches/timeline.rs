// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::NaiveDate;
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use timegrid::{
    GestureEvent, GesturePhase, NoopHandler, Resource, Timeline, TimelineConfig, TimelineEvent,
};

fn timeline() -> Option<Timeline<NoopHandler>> {
    let config = TimelineConfig::from_toml(
        "[grid]\nstart_hour = 6\nend_hour = 22\nselection_granularity = 5\n",
    )
    .ok()?;
    let date = NaiveDate::from_ymd_opt(2025, 3, 14)?;
    let resources = (0..50)
        .map(|i| Resource::new(format!("r{i}"), format!("Resource {i}")))
        .collect();
    let mut timeline = Timeline::new(config, date, resources, NoopHandler);
    timeline.resize(Size::new(1_024.0, 768.0));
    Some(timeline)
}

fn pan(phase: GesturePhase, y: f64) -> TimelineEvent {
    TimelineEvent::Gesture(GestureEvent::Pan {
        column: 3,
        phase,
        position: Some(Point::new(10.0, y)),
    })
}

fn bench_drag(c: &mut Criterion) {
    c.bench_function("timeline/drag_200_samples", |b| {
        b.iter_batched(
            timeline,
            |timeline| {
                let Some(mut timeline) = timeline else {
                    return;
                };
                timeline.dispatch(pan(GesturePhase::Began, 10.0), 0);
                for step in 0..200 {
                    timeline.dispatch(pan(GesturePhase::Changed, 10.0 + f64::from(step) * 3.0), 0);
                }
                timeline.dispatch(pan(GesturePhase::Ended, 610.0), 0);
                black_box(timeline.highlighted_range().is_some());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_drag);
criterion_main!(benches);
