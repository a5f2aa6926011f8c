// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prints the time column, working hours and event lanes of one resource.

use std::error::Error;

use chrono::NaiveDate;
use timegrid::layout::TimedEvent;
use timegrid::{NoopHandler, Resource, Timeline, TimelineConfig};

const EVENTS: &str = r#"
[[event]]
id = "1"
resource_id = "alice"
start = "2025-03-14T09:00:00"
end = "2025-03-14T10:00:00"
title = "Haircut"
status = "confirmed"

[[event]]
id = "2"
resource_id = "alice"
start = "2025-03-14T09:30:00"
end = "2025-03-14T11:00:00"
title = "Colour"
status = "reserved"

[[event]]
id = "3"
resource_id = "alice"
start = "2025-03-14T13:00:00"
end = "2025-03-14T13:10:00"
title = "Consultation"
"#;

#[derive(serde::Deserialize)]
struct Events {
    event: Vec<TimedEvent>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let date = NaiveDate::from_ymd_opt(2025, 3, 14).ok_or("bad date")?;
    let config = TimelineConfig::from_toml(
        "[grid]\nstart_hour = 8\nend_hour = 15\ntime_slot_interval = 30\nformat_24h = false\n",
    )?;
    let alice = Resource::new("alice", "Alice").with_working_hours(date, ["09:00-12:00", "13:00-15:00"]);
    let timeline = Timeline::new(config, date, vec![alice], NoopHandler);

    let working = timeline.working_slots("alice")?;
    let rows = timeline.grids().map_or(0, |grids| grids.display_slots().len());
    for index in 0..rows {
        let label = timeline.time_label(index).unwrap_or_default();
        let marker = if working.is_working(index) { "#" } else { "." };
        println!("{label:>9} {marker}");
    }

    let events: Events = toml::from_str(EVENTS)?;
    for placed in timeline.layout_events(&events.event) {
        let event = &events.event[placed.index];
        println!(
            "{:<13} top {:>6.1} height {:>5.1} lane {}/{}",
            event.title,
            placed.top,
            placed.height,
            placed.lane + 1,
            placed.lanes
        );
    }
    Ok(())
}
