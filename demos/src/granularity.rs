// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drags the same pixel range at several selection granularities and prints
//! the wall-clock range each one reports.
//!
//! Run with `RUST_LOG=debug` to watch the selection machine.

use std::error::Error;

use chrono::NaiveDate;
use kurbo::{Point, Size};
use timegrid::{
    GestureEvent, GesturePhase, REPORT_SPACE, Resource, Timeline, TimelineConfig, TimelineError,
    TimelineEvent, TimelineHandler,
};

#[derive(Default)]
struct LastSelection(Option<(String, usize, usize)>);

impl TimelineHandler for LastSelection {
    fn on_time_slot_select(&mut self, resource_id: &str, start_slot: usize, end_slot: usize) {
        self.0 = Some((resource_id.to_owned(), start_slot, end_slot));
    }

    fn on_error(&mut self, error: &TimelineError) {
        log::error!("{error}");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let date = NaiveDate::from_ymd_opt(2025, 3, 14).ok_or("bad date")?;
    for granularity in [None, Some(30), Some(15), Some(5)] {
        let mut toml = String::from("[grid]\nstart_hour = 9\nend_hour = 17\n");
        if let Some(minutes) = granularity {
            toml.push_str(&format!("selection_granularity = {minutes}\n"));
        }
        let config = TimelineConfig::from_toml(&toml)?;
        let resources = vec![Resource::new("room-a", "Room A"), Resource::new("room-b", "Room B")];
        let mut timeline = Timeline::new(config, date, resources, LastSelection::default());
        timeline.resize(Size::new(480.0, 640.0));

        for (phase, y) in [
            (GesturePhase::Began, 20.0),
            (GesturePhase::Changed, 50.0),
            (GesturePhase::Changed, 80.0),
            (GesturePhase::Ended, 80.0),
        ] {
            let pan = GestureEvent::Pan {
                column: 0,
                phase,
                position: Some(Point::new(24.0, y)),
            };
            timeline.dispatch(TimelineEvent::Gesture(pan), 0);
        }

        let label = granularity.map_or_else(|| "display".to_owned(), |m| format!("{m} min"));
        let (Some((resource, start, end)), Some(grids)) =
            (timeline.handler().0.clone(), timeline.grids())
        else {
            println!("{label:>8}: nothing selected");
            continue;
        };
        let (Some(first), Some(last)) = (grids.slot(REPORT_SPACE, start), grids.slot(REPORT_SPACE, end))
        else {
            continue;
        };
        println!("{label:>8}: {resource} slots {start}..={end} ({first} to {last})");
    }
    Ok(())
}
