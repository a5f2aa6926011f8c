// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timegrid View: slot geometry and pinch zoom for resource timelines.
//!
//! This crate maps between pixel offsets and slot indices and owns the zoom
//! state of both timeline axes. It focuses on:
//! - Hit-testing a vertical pixel offset into a slot index ([`SlotAxis`]).
//! - Placing slots, hours and slot ranges back into pixel space.
//! - Per-axis zoom with a live (uncommitted) scale during a pinch and a
//!   committed scale afterwards ([`ZoomController`]).
//!
//! It does **not** render anything or recognize gestures. Callers are expected
//! to:
//! - Build a fresh [`SlotAxis`] whenever the hour height (and with it the slot
//!   height) changes, so hit-testing always matches what is drawn.
//! - Feed recognized pinch scales into [`ZoomController::update_live`] and
//!   commit them when the gesture ends.
//!
//! ## Minimal example
//!
//! ```rust
//! use timegrid_slots::{GridSpace, SlotGrids};
//! use timegrid_view::{SlotAxis, ZoomAxis, ZoomController, ZoomLimits};
//!
//! let grids = SlotGrids::from_hours(9, 17, 60, Some(15)).unwrap();
//! let mut zoom = ZoomController::new(80.0, 120.0, ZoomLimits::VERTICAL, ZoomLimits::HORIZONTAL);
//!
//! // 80px per hour -> 20px per selection slot.
//! let axis = SlotAxis::for_grid(&grids, GridSpace::Selection, zoom.hour_height());
//! assert_eq!(axis.slot_at(45.0), Some(2));
//!
//! // Pinch to double the hour height; hit-testing follows the live scale.
//! zoom.begin(ZoomAxis::Vertical);
//! zoom.update_live(2.0);
//! let axis = SlotAxis::for_grid(&grids, GridSpace::Selection, zoom.hour_height());
//! assert_eq!(axis.slot_at(45.0), Some(1));
//! zoom.commit();
//! assert_eq!(zoom.axis(ZoomAxis::Vertical).current_scale(), 2.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod axis;
mod zoom;

pub use axis::{SlotAxis, hour_to_pixel, pixel_to_slot_index, slot_index_to_pixel, slot_span_rect};
pub use zoom::{AxisZoom, ZoomAxis, ZoomController, ZoomDebugInfo, ZoomLimits};
