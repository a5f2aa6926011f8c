// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timegrid Gesture: pan, tap and pinch arbitration for time grids.
//!
//! Platform gesture recognizers decide *that* a pan, tap or pinch happened.
//! This crate decides what it *means* for a time grid: which slot a pointer is
//! over, whether a pinch zooms the hour height or the column width, and which
//! gesture wins when they overlap. It produces [`GestureAction`]s and leaves
//! applying them to the owner of the selection and zoom state.
//!
//! Rules:
//! - Pans drive drag selections; taps press or commit a single slot.
//! - Drags and pinches are mutually exclusive (see [`Recognition`]).
//! - A pinch picks its axis once, after its scale leaves a small dead zone.
//! - Live zoom updates are throttled.
//! - Pan samples with a missing, non-finite or zero `y` are dropped without
//!   ending the pan.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use timegrid_gesture::{GestureAction, GestureAdapter, GestureEvent, GesturePhase};
//! use timegrid_view::SlotAxis;
//!
//! let axis = SlotAxis::new(20.0, 32);
//! let mut adapter = GestureAdapter::default();
//!
//! let actions = adapter.handle(
//!     GestureEvent::Pan {
//!         column: 0,
//!         phase: GesturePhase::Began,
//!         position: Some(Point::new(12.0, 65.0)),
//!     },
//!     &axis,
//!     0,
//! );
//! assert_eq!(actions.as_slice(), &[GestureAction::StartDrag { column: 0, slot: 3 }]);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod adapter;
mod event;

pub use adapter::{
    DEFAULT_DIRECTION_THRESHOLD, DEFAULT_ZOOM_THROTTLE_MS, GestureActions, GestureAdapter,
    GestureConfig, LONG_PRESS_MS, PAN_MIN_DISTANCE, Recognition, TAP_MAX_DURATION_MS,
    classify_direction,
};
pub use event::{GestureAction, GestureEvent, GesturePhase};
