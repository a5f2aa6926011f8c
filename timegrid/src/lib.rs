// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timegrid: a headless resource timeline.
//!
//! A resource timeline shows one day as a grid: time runs down, resources
//! (rooms, people, machines) run across. Users select a range of time on one
//! resource by dragging or tapping, and pinch to zoom either axis.
//!
//! This crate ties the lower-level `timegrid_*` crates together behind one
//! controller, [`Timeline`]:
//!
//! - [`TimelineConfig`] is the serde/TOML configuration, validated into slot
//!   grids and zoom limits.
//! - [`TimelineEvent`]s (gestures, keys, scrolls, resizes and imperative
//!   commands) are queued and applied in order.
//! - Results reach the host through [`TimelineHandler`].
//! - [`layout`] places events and the now indicator.
//!
//! Rendering, theming and platform gesture recognition stay with the host.
//!
//! ## Minimal example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use kurbo::{Point, Size};
//! use timegrid::{
//!     GestureEvent, GesturePhase, Resource, Timeline, TimelineConfig, TimelineError,
//!     TimelineEvent, TimelineHandler,
//! };
//!
//! #[derive(Default)]
//! struct Selections(Vec<(String, usize, usize)>);
//!
//! impl TimelineHandler for Selections {
//!     fn on_time_slot_select(&mut self, resource_id: &str, start: usize, end: usize) {
//!         self.0.push((resource_id.to_owned(), start, end));
//!     }
//!
//!     fn on_error(&mut self, error: &TimelineError) {
//!         panic!("{error}");
//!     }
//! }
//!
//! let config = TimelineConfig::from_toml(
//!     "[grid]\nstart_hour = 9\nend_hour = 17\nselection_granularity = 15\n",
//! )
//! .unwrap();
//! let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
//! let resources = vec![Resource::new("a", "Room A"), Resource::new("b", "Room B")];
//! let mut timeline = Timeline::new(config, date, resources, Selections::default());
//! timeline.resize(Size::new(400.0, 600.0));
//!
//! // 80px hours, 20px selection slots: drag from 10:15 to 11:00 on room B.
//! for (phase, y) in [
//!     (GesturePhase::Began, 105.0),
//!     (GesturePhase::Changed, 165.0),
//!     (GesturePhase::Ended, 165.0),
//! ] {
//!     let pan = GestureEvent::Pan { column: 1, phase, position: Some(Point::new(10.0, y)) };
//!     timeline.dispatch(TimelineEvent::Gesture(pan), 0);
//! }
//!
//! assert_eq!(timeline.handler().0, [("b".to_owned(), 5, 8)]);
//! ```

mod config;
mod error;
mod event;
mod handler;
mod keyboard;
pub mod layout;
mod resource;
mod timeline;

pub use config::{GridConfig, LayoutConfig, SelectionConfig, TimelineConfig, ZoomConfig};
pub use error::TimelineError;
pub use event::TimelineEvent;
pub use handler::{HapticPattern, NoopHandler, TimelineHandler};
pub use keyboard::{
    FocusCell, KeyCommand, KeyOutcome, KeyboardNavigator, display_range_to_selection,
};
pub use resource::Resource;
pub use timeline::Timeline;

pub use timegrid_gesture::{GestureEvent, GesturePhase};
pub use timegrid_selection::{REPORT_SPACE, SelectionPhase};
pub use timegrid_slots::{GridSpace, SlotGrids, TimeSlot, WorkingSlots};
pub use timegrid_view::{ZoomAxis, ZoomDebugInfo};
