// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests for `Timeline`: gestures in, selections and errors out.

use chrono::{NaiveDate, NaiveDateTime};
use kurbo::{Point, Size, Vec2};
use proptest::prelude::*;
use timegrid::layout::TimedEvent;
use timegrid::{
    GestureEvent, GesturePhase, GridSpace, HapticPattern, KeyCommand, Resource, SelectionPhase,
    Timeline, TimelineConfig, TimelineError, TimelineEvent, TimelineHandler,
};

#[derive(Debug, Default)]
struct Recorder {
    selections: Vec<(String, usize, usize)>,
    errors: Vec<String>,
    haptics: Vec<HapticPattern>,
}

impl TimelineHandler for Recorder {
    fn on_time_slot_select(&mut self, resource_id: &str, start_slot: usize, end_slot: usize) {
        self.selections
            .push((resource_id.to_owned(), start_slot, end_slot));
    }

    fn on_error(&mut self, error: &TimelineError) {
        self.errors.push(error.to_string());
    }

    fn on_haptic(&mut self, pattern: HapticPattern) {
        self.haptics.push(pattern);
    }
}

const SCENARIO: &str = "[grid]
start_hour = 9
end_hour = 17
time_slot_interval = 60
selection_granularity = 15
hour_height = 80.0
";

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

fn resources(count: usize) -> Vec<Resource> {
    (0..count)
        .map(|i| Resource::new(format!("r{i}"), format!("Resource {i}")))
        .collect()
}

fn timeline_with(toml: &str, count: usize) -> Timeline<Recorder> {
    let config = TimelineConfig::from_toml(toml).unwrap();
    let mut timeline = Timeline::new(config, date(), resources(count), Recorder::default());
    timeline.resize(Size::new(400.0, 300.0));
    timeline
}

fn pan(column: usize, phase: GesturePhase, y: f64) -> TimelineEvent {
    TimelineEvent::Gesture(GestureEvent::Pan {
        column,
        phase,
        position: Some(Point::new(10.0, y)),
    })
}

fn drag(timeline: &mut Timeline<Recorder>, column: usize, from: f64, to: f64, now_ms: u64) {
    timeline.dispatch(pan(column, GesturePhase::Began, from), now_ms);
    timeline.dispatch(pan(column, GesturePhase::Changed, to), now_ms);
    timeline.dispatch(pan(column, GesturePhase::Ended, to), now_ms);
}

fn pinch(phase: GesturePhase, scale: f64, span: (f64, f64)) -> TimelineEvent {
    TimelineEvent::Gesture(GestureEvent::Pinch {
        phase,
        scale,
        span: Some(Vec2::new(span.0, span.1)),
    })
}

fn tap(column: usize, y: f64) -> TimelineEvent {
    TimelineEvent::Gesture(GestureEvent::Tap {
        column,
        position: Point::new(5.0, y),
    })
}

/// Commits a vertical pinch of `scale` starting at `now_ms`.
fn zoom_vertically(timeline: &mut Timeline<Recorder>, scale: f64, now_ms: u64) {
    timeline.dispatch(pinch(GesturePhase::Began, 1.0, (100.0, 100.0)), now_ms);
    timeline.dispatch(pinch(GesturePhase::Changed, scale, (100.0, 100.0 * scale)), now_ms);
    timeline.dispatch(pinch(GesturePhase::Ended, scale, (100.0, 100.0 * scale)), now_ms);
}

fn at(h: u32, m: u32) -> NaiveDateTime {
    date().and_hms_opt(h, m, 0).unwrap()
}

fn timed_event(id: &str, start: NaiveDateTime, end: NaiveDateTime) -> TimedEvent {
    TimedEvent {
        id: id.into(),
        resource_id: "r0".into(),
        start,
        end,
        title: id.into(),
        status: None,
        client: None,
        service: None,
    }
}

fn whole_day(interval: u32) -> String {
    format!(
        "[grid]\nstart_hour = 0\nend_hour = 24\ntime_slot_interval = {interval}\n\
         [selection]\nsingle_tap = true\n"
    )
}

#[test]
fn nine_to_five_quarter_hour_scenario() {
    let mut timeline = timeline_with(SCENARIO, 2);
    let grids = timeline.grids().unwrap();
    assert_eq!(grids.len(GridSpace::Display), 8);
    assert_eq!(grids.len(GridSpace::Selection), 32);
    assert_eq!(timeline.selection_axis().unwrap().slot_height(), 20.0);

    drag(&mut timeline, 0, 20.0, 80.0, 1_000);

    assert_eq!(timeline.handler().selections, [("r0".to_owned(), 1, 4)]);
    let grids = timeline.grids().unwrap();
    let start = grids.slot(GridSpace::Selection, 1).unwrap();
    let end = grids.slot(GridSpace::Selection, 4).unwrap();
    assert_eq!((start.hours, start.minutes), (9, 15));
    assert_eq!((end.hours, end.minutes), (10, 0));
    assert_eq!(
        timeline.handler().haptics,
        [
            HapticPattern::Medium,
            HapticPattern::Selection,
            HapticPattern::Success
        ]
    );
}

#[test]
fn committed_selection_clears_after_the_delay() {
    let mut timeline = timeline_with(SCENARIO, 2);
    drag(&mut timeline, 1, 20.0, 80.0, 1_000);

    assert_eq!(timeline.selection_phase(), SelectionPhase::Retained);
    assert_eq!(timeline.highlighted_range(), Some(("r1", 1, 4)));
    assert_eq!(timeline.next_deadline(), Some(1_200));

    assert!(!timeline.tick(1_199));
    assert!(timeline.tick(1_200));
    assert_eq!(timeline.selection_phase(), SelectionPhase::Idle);
}

#[test]
fn retained_selection_without_auto_clear() {
    let toml = format!("{SCENARIO}[selection]\nclear_after_drag = false\n");
    let mut timeline = timeline_with(&toml, 2);
    drag(&mut timeline, 0, 20.0, 80.0, 0);

    assert_eq!(timeline.next_deadline(), None);
    timeline.process(60_000);
    assert_eq!(timeline.selection_phase(), SelectionPhase::Retained);

    timeline.clear_selection();
    assert_eq!(timeline.selection_phase(), SelectionPhase::Idle);
}

#[test]
fn selection_rect_tracks_the_highlight() {
    let mut timeline = timeline_with(SCENARIO, 3);
    timeline.dispatch(pan(2, GesturePhase::Began, 45.0), 0);
    timeline.dispatch(pan(2, GesturePhase::Changed, 5.0), 0);

    let rect = timeline.selection_rect().unwrap();
    assert_eq!((rect.x0, rect.x1), (240.0, 360.0));
    assert_eq!((rect.y0, rect.y1), (0.0, 60.0));
}

#[test]
fn vertical_pinch_zooms_hour_height() {
    let mut timeline = timeline_with(SCENARIO, 2);
    timeline.dispatch(pinch(GesturePhase::Began, 1.0, (100.0, 100.0)), 0);
    timeline.dispatch(pinch(GesturePhase::Changed, 1.5, (100.0, 160.0)), 0);
    assert_eq!(timeline.hour_height(), 120.0);
    // Live hit-testing follows the live zoom.
    assert_eq!(timeline.selection_axis().unwrap().slot_height(), 30.0);

    timeline.dispatch(pinch(GesturePhase::Ended, 1.5, (100.0, 160.0)), 10);
    assert_eq!(timeline.hour_height(), 120.0);
    assert_eq!(timeline.visible_rows().content_extent, 8.0 * 120.0);
    assert_eq!(timeline.handler().haptics, [HapticPattern::Light]);

    // Scales are clamped to the vertical maximum.
    timeline.dispatch(pinch(GesturePhase::Began, 1.0, (100.0, 100.0)), 100);
    timeline.dispatch(pinch(GesturePhase::Changed, 10.0, (100.0, 1000.0)), 100);
    timeline.dispatch(pinch(GesturePhase::Ended, 10.0, (100.0, 1000.0)), 100);
    assert_eq!(timeline.hour_height(), 200.0);

    timeline.reset_zoom();
    assert_eq!(timeline.hour_height(), 80.0);
}

#[test]
fn event_min_height_follows_the_vertical_zoom() {
    let mut timeline = timeline_with(SCENARIO, 2);
    let short = [timed_event("short", at(9, 0), at(9, 10))];
    assert_eq!(timeline.layout_events(&short)[0].height, 40.0);

    timeline.dispatch(pinch(GesturePhase::Began, 1.0, (100.0, 100.0)), 0);
    timeline.dispatch(pinch(GesturePhase::Changed, 1.5, (100.0, 150.0)), 0);
    // The live scale applies before the pinch ends.
    assert_eq!(timeline.event_min_height(), 60.0);
    timeline.dispatch(pinch(GesturePhase::Ended, 1.5, (100.0, 150.0)), 0);
    assert_eq!(timeline.layout_events(&short)[0].height, 60.0);

    timeline.reset_zoom();
    zoom_vertically(&mut timeline, 2.0, 100);
    assert_eq!(timeline.hour_height(), 160.0);
    let boxes = timeline.layout_events(&short);
    assert_eq!(boxes[0].height, 80.0);

    timeline.reset_zoom();
    assert_eq!(timeline.layout_events(&short)[0].height, 40.0);
}

#[test]
fn tap_on_the_first_hour_boundary_reports_one_oclock() {
    for interval in [15, 30, 60] {
        for scale in [1.0, 0.751] {
            let mut timeline = timeline_with(&whole_day(interval), 2);
            if scale != 1.0 {
                zoom_vertically(&mut timeline, scale, 0);
            }
            assert!((timeline.hour_height() - 80.0 * scale).abs() < 1e-9);

            let y = timeline.hour_height();
            timeline.dispatch(tap(0, y), 1_000);

            let expected = (60 / interval) as usize;
            assert_eq!(
                timeline.handler().selections,
                [("r0".to_owned(), expected, expected)],
                "interval {interval} at scale {scale}"
            );
            let slot = timeline
                .grids()
                .unwrap()
                .slot(GridSpace::Selection, expected)
                .unwrap();
            assert_eq!((slot.hours, slot.minutes), (1, 0));
        }
    }
}

#[test]
fn drag_from_the_first_hour_boundary_starts_at_one_oclock() {
    for interval in [15, 30, 60] {
        for scale in [1.0, 0.751] {
            let mut timeline = timeline_with(&whole_day(interval), 2);
            if scale != 1.0 {
                zoom_vertically(&mut timeline, scale, 0);
            }
            let y = timeline.hour_height();
            drag(&mut timeline, 1, y, y, 1_000);

            let expected = (60 / interval) as usize;
            assert_eq!(
                timeline.handler().selections,
                [("r1".to_owned(), expected, expected)],
                "interval {interval} at scale {scale}"
            );
        }
    }
}

#[test]
fn horizontal_pinch_needs_more_than_one_resource() {
    let mut timeline = timeline_with(SCENARIO, 2);
    timeline.dispatch(pinch(GesturePhase::Began, 1.0, (100.0, 100.0)), 0);
    timeline.dispatch(pinch(GesturePhase::Changed, 1.5, (160.0, 100.0)), 0);
    timeline.dispatch(pinch(GesturePhase::Ended, 1.5, (160.0, 100.0)), 0);
    assert_eq!(timeline.column_width(), 180.0);
    assert_eq!(timeline.hour_height(), 80.0);

    let mut single = timeline_with(SCENARIO, 1);
    single.dispatch(pinch(GesturePhase::Began, 1.0, (100.0, 100.0)), 0);
    single.dispatch(pinch(GesturePhase::Changed, 1.5, (160.0, 100.0)), 0);
    single.dispatch(pinch(GesturePhase::Ended, 1.5, (160.0, 100.0)), 0);
    assert_eq!(single.column_width(), 120.0);
    assert_eq!(single.hour_height(), 120.0);
}

#[test]
fn pinch_fails_while_dragging() {
    let mut timeline = timeline_with(SCENARIO, 2);
    timeline.dispatch(pan(0, GesturePhase::Began, 20.0), 0);
    timeline.dispatch(pinch(GesturePhase::Began, 1.0, (100.0, 100.0)), 0);
    timeline.dispatch(pinch(GesturePhase::Changed, 2.0, (100.0, 200.0)), 0);
    assert_eq!(timeline.hour_height(), 80.0);

    timeline.dispatch(pan(0, GesturePhase::Changed, 80.0), 0);
    timeline.dispatch(pan(0, GesturePhase::Ended, 80.0), 0);
    assert_eq!(timeline.handler().selections, [("r0".to_owned(), 1, 4)]);
}

#[test]
fn clearing_a_drag_ignores_the_rest_of_the_pan() {
    let mut timeline = timeline_with(SCENARIO, 2);
    timeline.dispatch(pan(0, GesturePhase::Began, 20.0), 0);
    timeline.dispatch(TimelineEvent::ClearDragSelection, 0);
    assert_eq!(timeline.selection_phase(), SelectionPhase::Idle);

    timeline.dispatch(pan(0, GesturePhase::Changed, 80.0), 0);
    timeline.dispatch(pan(0, GesturePhase::Ended, 80.0), 0);
    assert!(timeline.handler().selections.is_empty());
}

#[test]
fn single_tap_commits_one_slot() {
    let toml = format!("{SCENARIO}[selection]\nsingle_tap = true\n");
    let mut timeline = timeline_with(&toml, 2);
    timeline.dispatch(
        TimelineEvent::Gesture(GestureEvent::Tap {
            column: 1,
            position: Point::new(5.0, 90.0),
        }),
        0,
    );
    assert_eq!(timeline.handler().selections, [("r1".to_owned(), 4, 4)]);
}

#[test]
fn tap_without_single_tap_only_presses() {
    let mut timeline = timeline_with(SCENARIO, 2);
    timeline.dispatch(
        TimelineEvent::Gesture(GestureEvent::Tap {
            column: 0,
            position: Point::new(5.0, 90.0),
        }),
        0,
    );
    assert_eq!(timeline.selection_phase(), SelectionPhase::Pressed);
    assert!(timeline.handler().selections.is_empty());
}

#[test]
fn keyboard_selection_covers_whole_display_slots() {
    let mut timeline = timeline_with(SCENARIO, 2);
    for key in [
        KeyCommand::Right,
        KeyCommand::Down,
        KeyCommand::Activate,
        KeyCommand::Down,
        KeyCommand::Activate,
    ] {
        timeline.push(TimelineEvent::Key(key));
    }
    assert_eq!(timeline.pending(), 5);
    assert_eq!(timeline.process(0), 5);

    // 10:00 through 11:45.
    assert_eq!(timeline.handler().selections, [("r1".to_owned(), 4, 11)]);
}

#[test]
fn invalid_config_makes_the_timeline_inert() {
    let mut config = TimelineConfig::default();
    config.grid.start_hour = 18;
    config.grid.end_hour = 8;
    let mut timeline = Timeline::new(config, date(), resources(2), Recorder::default());
    assert!(timeline.is_inert());
    assert_eq!(timeline.handler().errors.len(), 1);

    drag(&mut timeline, 0, 20.0, 80.0, 0);
    assert!(timeline.handler().selections.is_empty());
    assert_eq!(timeline.visible_rows().len(), 0);

    timeline.set_config(TimelineConfig::from_toml(SCENARIO).unwrap());
    assert!(!timeline.is_inert());
    timeline.resize(Size::new(400.0, 300.0));
    drag(&mut timeline, 0, 20.0, 80.0, 0);
    assert_eq!(timeline.handler().selections.len(), 1);
}

#[test]
fn resource_problems_are_reported() {
    let mut duplicated = resources(2);
    duplicated.push(Resource::new("r0", "Again"));
    let timeline = Timeline::new(
        TimelineConfig::default(),
        date(),
        duplicated,
        Recorder::default(),
    );
    assert_eq!(timeline.handler().errors, ["duplicate resource id 'r0'"]);
    assert_eq!(timeline.resource_position("r0"), Some(0));

    let empty = Timeline::new(TimelineConfig::default(), date(), Vec::new(), Recorder::default());
    assert_eq!(empty.handler().errors, ["timeline has no resources"]);
}

#[test]
fn scroll_to_time_is_clamped_to_content() {
    let mut timeline = timeline_with(SCENARIO, 2);
    // 8 hours of 80px in a 300px viewport.
    assert_eq!(timeline.scroll_to_time(10.5), Some(120.0));
    assert_eq!(timeline.scroll_to_time(16.5), Some(340.0));
    assert_eq!(timeline.scroll_to_time(7.0), Some(0.0));

    let window = timeline.visible_rows();
    assert_eq!(window.start, 0);
    assert_eq!(window.end, 8);
}

#[test]
fn scroll_to_resource_moves_the_column_window() {
    let mut timeline = timeline_with(SCENARIO, 12);
    assert!(timeline.visible_columns().is_virtualized);

    assert_eq!(timeline.scroll_to_resource("r5").unwrap(), 600.0);
    let columns = timeline.visible_columns();
    assert_eq!(columns.start(), 3);
    assert_eq!(columns.offset_left(), 360.0);

    // 12 columns of 120px in a 400px viewport end at 1040.
    assert_eq!(timeline.scroll_to_resource("r11").unwrap(), 1040.0);

    assert!(timeline.scroll_to_resource("nope").is_err());
    assert_eq!(timeline.handler().errors, ["unknown resource 'nope'"]);
}

#[test]
fn pages_follow_the_horizontal_scroll() {
    let mut timeline = timeline_with(SCENARIO, 5);
    // Two 120px columns per page, 600px of content in a 400px viewport.
    assert_eq!(timeline.page_count(), 3);
    assert_eq!(timeline.current_page(), 0);
    assert_eq!(timeline.scroll_progress(), 0.0);

    assert_eq!(timeline.scroll_to_page(1), Some(200.0));
    assert_eq!(timeline.current_page(), 1);
    assert_eq!(timeline.scroll_progress(), 1.0);

    assert_eq!(timeline.scroll_to_page(3), None);
    assert_eq!(timeline.scroll_offset().0, 200.0);

    timeline.dispatch(TimelineEvent::ScrollToPage(0), 0);
    assert_eq!(timeline.scroll_offset().0, 0.0);

    timeline.scroll_to(Some(100.0), None);
    assert_eq!(timeline.scroll_progress(), 0.5);
}

#[test]
fn many_events_are_clipped_to_the_visible_rows() {
    let timeline = timeline_with("[grid]\nstart_hour = 0\nend_hour = 24\n", 2);
    // One 10 minute event every 20 minutes from midnight.
    let events: Vec<_> = (0..60_u32)
        .map(|i| {
            let start = at(i / 3, (i % 3) * 20);
            let end = start + chrono::TimeDelta::minutes(10);
            timed_event(&format!("e{i}"), start, end)
        })
        .collect();

    // 300px viewport over 80px rows, plus five rows of overscan: 00:00 to 10:00.
    let visible = timeline.visible_events(&events);
    assert_eq!(visible.len(), 30);
    assert!(visible.iter().all(|b| b.top < 800.0));

    // Few events are laid out in full.
    assert_eq!(timeline.visible_events(&events[..15]).len(), 15);
    assert_eq!(timeline.visible_events(&events[30..45]).len(), 15);
}

#[test]
fn few_resources_are_not_virtualized() {
    let timeline = timeline_with(SCENARIO, 8);
    let columns = timeline.visible_columns();
    assert!(!columns.is_virtualized);
    assert_eq!(columns.visible_slice(timeline.resources()).len(), 8);
}

#[test]
fn teardown_cancels_timers_and_queue() {
    let mut timeline = timeline_with(SCENARIO, 2);
    drag(&mut timeline, 0, 20.0, 80.0, 0);
    timeline.push(TimelineEvent::ResetZoom);
    timeline.teardown();
    assert_eq!(timeline.next_deadline(), None);
    assert_eq!(timeline.pending(), 0);
}

#[test]
fn time_labels_follow_the_clock_format() {
    let timeline = timeline_with(SCENARIO, 1);
    assert_eq!(timeline.time_label(0).as_deref(), Some("09:00"));
    assert_eq!(timeline.time_label(8), None);
}

proptest! {
    #[test]
    fn taps_on_hour_boundaries_report_the_hour(
        hour in 0_u32..24,
        interval in prop::sample::select(vec![5_u32, 10, 15, 20, 30, 60]),
        scale in 0.75_f64..2.5,
    ) {
        let mut timeline = timeline_with(&whole_day(interval), 2);
        zoom_vertically(&mut timeline, scale, 0);
        let y = f64::from(hour) * timeline.hour_height();
        timeline.dispatch(tap(0, y), 1_000);

        let selections = &timeline.handler().selections;
        prop_assert_eq!(selections.len(), 1);
        let slot = timeline
            .grids()
            .unwrap()
            .slot(GridSpace::Selection, selections[0].1)
            .unwrap();
        prop_assert_eq!((slot.hours, slot.minutes), (hour, 0));
    }
}
