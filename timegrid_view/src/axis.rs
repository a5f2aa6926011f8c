// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertical slot geometry.
//!
//! There is exactly one pixel-to-index function, [`pixel_to_slot_index`]. Tap
//! hit-testing and drag sampling both go through it (usually via
//! [`SlotAxis::slot_at`]), parameterized only by the current zoom-scaled slot
//! height and the slot count.

use core::ops::Range;

use kurbo::Rect;
use timegrid_slots::{GridSpace, SlotGrids};

/// Relative tolerance for snapping a hit-test quotient to a slot boundary.
const SNAP_EPSILON: f64 = 1e-9;

/// Maps a vertical pixel offset to a slot index.
///
/// Computes `clamp(floor(y / slot_height), 0, slot_count - 1)`. Offsets above
/// the first slot map to slot 0 and offsets past the content map to the last
/// slot.
///
/// A quotient within rounding noise of an integer snaps to that integer, so
/// the top of every slot, as returned by [`slot_index_to_pixel`], maps back to
/// its own index at any slot height.
///
/// Returns `None` when there are no slots, when `slot_height` is not a positive
/// finite number, or when `y` is not finite.
#[must_use]
pub fn pixel_to_slot_index(y: f64, slot_height: f64, slot_count: usize) -> Option<usize> {
    if slot_count == 0 || !y.is_finite() || !slot_height.is_finite() || slot_height <= 0.0 {
        return None;
    }
    let quotient = y / slot_height;
    let nearest = libm::round(quotient);
    let raw = if libm::fabs(quotient - nearest) <= SNAP_EPSILON * libm::fabs(nearest).max(1.0) {
        nearest
    } else {
        libm::floor(quotient)
    };
    if raw <= 0.0 {
        return Some(0);
    }
    let last = slot_count - 1;
    if raw >= last as f64 {
        return Some(last);
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "raw is a non-negative integer below slot_count"
    )]
    let index = raw as usize;
    Some(index)
}

/// Top pixel offset of the slot at `index`.
#[must_use]
pub fn slot_index_to_pixel(index: usize, slot_height: f64) -> f64 {
    index as f64 * slot_height
}

/// Pixel offset of a (fractional) hour of day relative to the first hour shown.
///
/// Hours before `start_hour` produce negative offsets; callers decide whether
/// to clamp.
#[must_use]
pub fn hour_to_pixel(hour: f64, start_hour: u32, hour_height: f64) -> f64 {
    (hour - f64::from(start_hour)) * hour_height
}

/// Rectangle covering the inclusive slot range `start..=end`.
///
/// `x` is the horizontal extent of the column. The bounds may be passed in
/// either order.
#[must_use]
pub fn slot_span_rect(start: usize, end: usize, slot_height: f64, x: Range<f64>) -> Rect {
    let (first, last) = if start <= end { (start, end) } else { (end, start) };
    let top = slot_index_to_pixel(first, slot_height);
    let bottom = slot_index_to_pixel(last + 1, slot_height);
    Rect::new(x.start, top, x.end, bottom)
}

/// One vertical grid axis at a fixed slot height.
///
/// This is a cheap value; build a new one whenever the hour height changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotAxis {
    slot_height: f64,
    slot_count: usize,
}

impl SlotAxis {
    /// Creates an axis with the given slot height and slot count.
    #[must_use]
    pub fn new(slot_height: f64, slot_count: usize) -> Self {
        Self {
            slot_height,
            slot_count,
        }
    }

    /// Creates the axis of one grid of `grids` at `hour_height` pixels per hour.
    #[must_use]
    pub fn for_grid(grids: &SlotGrids, space: GridSpace, hour_height: f64) -> Self {
        Self::new(grids.slot_height(space, hour_height), grids.len(space))
    }

    /// Pixel height of one slot.
    #[must_use]
    pub fn slot_height(&self) -> f64 {
        self.slot_height
    }

    /// Number of slots on the axis.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Total pixel extent of all slots.
    #[must_use]
    pub fn content_extent(&self) -> f64 {
        slot_index_to_pixel(self.slot_count, self.slot_height)
    }

    /// Hit-tests a vertical offset. See [`pixel_to_slot_index`].
    #[must_use]
    pub fn slot_at(&self, y: f64) -> Option<usize> {
        pixel_to_slot_index(y, self.slot_height, self.slot_count)
    }

    /// Top pixel offset of the slot at `index`.
    #[must_use]
    pub fn slot_top(&self, index: usize) -> f64 {
        slot_index_to_pixel(index, self.slot_height)
    }

    /// Rectangle covering `start..=end` within the column spanning `x`.
    #[must_use]
    pub fn span_rect(&self, start: usize, end: usize, x: Range<f64>) -> Rect {
        slot_span_rect(start, end, self.slot_height, x)
    }
}
