// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};
use timegrid_view::ZoomAxis;

/// Lifecycle phase of a continuous gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// The platform recognizer activated the gesture.
    Began,
    /// A new sample for an active gesture.
    Changed,
    /// The gesture finished normally.
    Ended,
    /// The gesture was interrupted.
    Cancelled,
}

/// An already-recognized gesture sample.
///
/// Positions are in the coordinate space of the column content: `y == 0` is
/// the top of the first slot, independent of vertical scrolling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// One-finger pan, delivered after the long-press activation.
    Pan {
        /// Column the pan started in.
        column: usize,
        /// Phase of the pan.
        phase: GesturePhase,
        /// Pointer position; platforms occasionally deliver samples without one.
        position: Option<Point>,
    },
    /// A completed tap.
    Tap {
        /// Column that was tapped.
        column: usize,
        /// Tap position.
        position: Point,
    },
    /// Two-finger pinch.
    Pinch {
        /// Phase of the pinch.
        phase: GesturePhase,
        /// Scale relative to the start of the gesture (`1.0` at `Began`).
        scale: f64,
        /// Vector between the two pointers, when the platform reports it.
        span: Option<Vec2>,
    },
}

/// What the owner of the selection and zoom state should do in response to a
/// gesture sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureAction {
    /// Start a drag selection.
    StartDrag {
        /// Column of the drag.
        column: usize,
        /// Selection-grid slot under the pointer.
        slot: usize,
    },
    /// Move the end of the drag selection.
    UpdateDrag {
        /// Selection-grid slot under the pointer.
        slot: usize,
    },
    /// Commit the drag selection.
    CompleteDrag,
    /// Abandon the drag selection.
    CancelDrag,
    /// Press a slot without committing it.
    Press {
        /// Column that was tapped.
        column: usize,
        /// Selection-grid slot under the tap.
        slot: usize,
    },
    /// Commit a single slot.
    Tap {
        /// Column that was tapped.
        column: usize,
        /// Selection-grid slot under the tap.
        slot: usize,
    },
    /// Start a live zoom on `axis`.
    BeginZoom {
        /// Axis chosen for the whole pinch.
        axis: ZoomAxis,
    },
    /// Update the live zoom with a raw pinch scale.
    LiveZoom {
        /// Scale relative to the start of the pinch.
        raw_scale: f64,
    },
    /// Commit the live zoom.
    CommitZoom,
    /// Drop the live zoom.
    CancelZoom,
}
