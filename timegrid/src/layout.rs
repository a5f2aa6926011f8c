// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement of timed events and of the now indicator.
//!
//! Events are positioned from their wall-clock times relative to the
//! timeline's date, clipped to the visible hour range and stretched to a
//! minimum height. Events that overlap in time share their column in
//! side-by-side lanes.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use kurbo::Rect;
use serde::Deserialize;
use timegrid_slots::{HourRange, MINUTES_PER_HOUR};
use timegrid_view::hour_to_pixel;

/// Booking state of an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Confirmed booking.
    Confirmed,
    /// Held but not confirmed.
    Reserved,
    /// Cancelled by the client.
    CancelledByClient,
    /// Cancelled by the business.
    CancelledByBusiness,
    /// Took place.
    Completed,
}

impl EventStatus {
    /// Returns `true` for either kind of cancellation.
    #[must_use]
    pub fn is_cancelled(self) -> bool {
        matches!(self, Self::CancelledByClient | Self::CancelledByBusiness)
    }
}

/// An event shown in a resource column.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TimedEvent {
    /// Event identifier.
    pub id: String,
    /// Resource (column) the event belongs to.
    pub resource_id: String,
    /// Start time.
    pub start: NaiveDateTime,
    /// End time.
    pub end: NaiveDateTime,
    /// Title shown on the event.
    pub title: String,
    /// Booking state.
    #[serde(default)]
    pub status: Option<EventStatus>,
    /// Client name.
    #[serde(default)]
    pub client: Option<String>,
    /// Booked service.
    #[serde(default)]
    pub service: Option<String>,
}

/// Where one event sits inside its column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventBox {
    /// Index of the event in the slice passed to [`layout_column`].
    pub index: usize,
    /// Offset from the top of the first slot.
    pub top: f64,
    /// Height, at least the minimum event height.
    pub height: f64,
    /// Lane inside the overlap cluster, from the left.
    pub lane: usize,
    /// Number of lanes in the overlap cluster.
    pub lanes: usize,
}

impl EventBox {
    /// Left edge as a fraction of the column width.
    #[must_use]
    pub fn left_fraction(&self) -> f64 {
        self.lane as f64 / self.lanes as f64
    }

    /// Width as a fraction of the column width.
    #[must_use]
    pub fn width_fraction(&self) -> f64 {
        1.0 / self.lanes as f64
    }

    /// Rectangle of the event in a column starting at `column_x`.
    #[must_use]
    pub fn rect(&self, column_x: f64, column_width: f64) -> Rect {
        let x0 = column_x + column_width * self.left_fraction();
        Rect::new(
            x0,
            self.top,
            x0 + column_width * self.width_fraction(),
            self.top + self.height,
        )
    }
}

fn minutes_into_day(date: NaiveDate, at: NaiveDateTime) -> i64 {
    (at - date.and_time(NaiveTime::MIN)).num_minutes()
}

/// Top offset and height of an event on `date`.
///
/// Returns `None` when the event ends before it starts or lies entirely
/// outside `range`.
#[must_use]
pub fn event_span(
    date: NaiveDate,
    event: &TimedEvent,
    range: HourRange,
    hour_height: f64,
    min_height: f64,
) -> Option<(f64, f64)> {
    if event.end < event.start {
        return None;
    }
    let first = i64::from(range.start_minutes());
    let last = i64::from(range.end_hour() * MINUTES_PER_HOUR);
    let start = minutes_into_day(date, event.start).max(first);
    let end = minutes_into_day(date, event.end).min(last);
    if start >= last || end < start {
        return None;
    }
    let minutes = f64::from(MINUTES_PER_HOUR);
    let top = (start - first) as f64 * hour_height / minutes;
    let height = ((end - start) as f64 * hour_height / minutes).max(min_height);
    Some((top, height))
}

/// Lays out the events of one column.
///
/// Events are grouped into clusters of transitively overlapping events; each
/// event takes the leftmost lane that is free at its start. Boxes come back
/// ordered by start time.
#[must_use]
pub fn layout_column(
    date: NaiveDate,
    events: &[TimedEvent],
    range: HourRange,
    hour_height: f64,
    min_height: f64,
) -> Vec<EventBox> {
    let mut order: Vec<usize> = (0..events.len()).collect();
    order.sort_by_key(|&i| (events[i].start, events[i].end));

    let mut boxes = Vec::with_capacity(events.len());
    let mut cluster_start = 0;
    let mut cluster_end: Option<NaiveDateTime> = None;
    let mut lane_ends: Vec<NaiveDateTime> = Vec::new();

    for index in order {
        let event = &events[index];
        let Some((top, height)) = event_span(date, event, range, hour_height, min_height) else {
            continue;
        };
        if cluster_end.is_some_and(|end| event.start >= end) {
            close_cluster(&mut boxes[cluster_start..], lane_ends.len());
            cluster_start = boxes.len();
            lane_ends.clear();
        }
        let lane = match lane_ends.iter().position(|&end| end <= event.start) {
            Some(lane) => {
                lane_ends[lane] = event.end;
                lane
            }
            None => {
                lane_ends.push(event.end);
                lane_ends.len() - 1
            }
        };
        cluster_end = Some(cluster_end.map_or(event.end, |end| end.max(event.end)));
        boxes.push(EventBox {
            index,
            top,
            height,
            lane,
            lanes: 1,
        });
    }
    close_cluster(&mut boxes[cluster_start..], lane_ends.len());
    boxes
}

fn close_cluster(cluster: &mut [EventBox], lanes: usize) {
    for event in cluster {
        event.lanes = lanes.max(1);
    }
}

/// Offset of the now indicator, or `None` when `now` is not on `date` or lies
/// outside `range`.
///
/// The end hour itself is still shown, at the bottom edge of the grid.
#[must_use]
pub fn now_indicator_offset(
    date: NaiveDate,
    now: NaiveDateTime,
    range: HourRange,
    hour_height: f64,
) -> Option<f64> {
    if now.date() != date {
        return None;
    }
    let hour = f64::from(now.hour())
        + f64::from(now.minute()) / 60.0
        + f64::from(now.second()) / 3600.0;
    if hour < f64::from(range.start_hour()) || hour > f64::from(range.end_hour()) {
        return None;
    }
    Some(hour_to_pixel(hour, range.start_hour(), hour_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        date().and_hms_opt(h, m, 0).unwrap()
    }

    fn event(id: &str, start: (u32, u32), end: (u32, u32)) -> TimedEvent {
        TimedEvent {
            id: id.into(),
            resource_id: "a".into(),
            start: at(start.0, start.1),
            end: at(end.0, end.1),
            title: id.into(),
            status: None,
            client: None,
            service: None,
        }
    }

    fn range() -> HourRange {
        HourRange::new(8, 18).unwrap()
    }

    #[test]
    fn span_follows_hour_height() {
        let e = event("a", (9, 30), (11, 0));
        assert_eq!(event_span(date(), &e, range(), 80.0, 40.0), Some((120.0, 120.0)));
    }

    #[test]
    fn short_events_get_min_height() {
        let e = event("a", (9, 0), (9, 10));
        assert_eq!(event_span(date(), &e, range(), 60.0, 40.0), Some((60.0, 40.0)));
    }

    #[test]
    fn spans_are_clipped_to_the_range() {
        let early = event("a", (7, 0), (9, 0));
        assert_eq!(event_span(date(), &early, range(), 80.0, 0.0), Some((0.0, 80.0)));
        let outside = event("b", (19, 0), (20, 0));
        assert_eq!(event_span(date(), &outside, range(), 80.0, 40.0), None);
        let inverted = event("c", (10, 0), (9, 0));
        assert_eq!(event_span(date(), &inverted, range(), 80.0, 40.0), None);
    }

    #[test]
    fn overlapping_events_share_lanes() {
        let events = [
            event("a", (9, 0), (10, 0)),
            event("b", (9, 30), (11, 0)),
            event("c", (10, 0), (10, 30)),
            event("d", (12, 0), (13, 0)),
        ];
        let boxes = layout_column(date(), &events, range(), 80.0, 40.0);
        let lanes: Vec<_> = boxes.iter().map(|b| (b.index, b.lane, b.lanes)).collect();
        // `c` reuses the lane `a` freed at 10:00.
        assert_eq!(lanes, [(0, 0, 2), (1, 1, 2), (2, 0, 2), (3, 0, 1)]);

        let rect = boxes[1].rect(100.0, 120.0);
        assert_eq!((rect.x0, rect.x1), (160.0, 220.0));
    }

    #[test]
    fn now_indicator_only_today_and_in_range() {
        let now = at(12, 30);
        assert_eq!(now_indicator_offset(date(), now, range(), 80.0), Some(360.0));
        let tomorrow = date().succ_opt().unwrap();
        assert_eq!(now_indicator_offset(tomorrow, now, range(), 80.0), None);
        assert_eq!(now_indicator_offset(date(), at(18, 0), range(), 80.0), Some(800.0));
        assert_eq!(now_indicator_offset(date(), at(18, 1), range(), 80.0), None);
        assert_eq!(now_indicator_offset(date(), at(7, 59), range(), 80.0), None);
    }

    #[test]
    fn status_deserializes_snake_case() {
        #[derive(Deserialize)]
        struct Holder {
            status: EventStatus,
        }
        let holder: Holder = toml::from_str("status = \"cancelled_by_client\"").unwrap();
        assert!(holder.status.is_cancelled());
    }
}
