// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertical virtualization of time-slot rows.

use crate::{Scalar, ScrollAlign, VirtualWindow};

/// Rows realized beyond each edge of the viewport by default.
pub const DEFAULT_OVERSCAN: usize = 5;

/// Virtualizer for a column of equally tall slot rows.
///
/// The window is derived from scratch on every query; there is no cached state
/// that could drift from the inputs.
#[derive(Clone, Debug)]
pub struct RowVirtualizer<S: Scalar> {
    len: usize,
    row_extent: S,
    viewport_extent: S,
    scroll_offset: S,
    overscan: usize,
}

impl<S: Scalar> RowVirtualizer<S> {
    /// Creates a virtualizer scrolled to the top with [`DEFAULT_OVERSCAN`].
    #[must_use]
    pub fn new(len: usize, row_extent: S, viewport_extent: S) -> Self {
        Self {
            len,
            row_extent,
            viewport_extent,
            scroll_offset: S::zero(),
            overscan: DEFAULT_OVERSCAN,
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sets the number of rows and re-clamps the scroll offset.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
    }

    /// Extent of one row.
    #[must_use]
    pub fn row_extent(&self) -> S {
        self.row_extent
    }

    /// Sets the extent of one row (for example after a zoom) and re-clamps the
    /// scroll offset.
    pub fn set_row_extent(&mut self, extent: S) {
        self.row_extent = extent;
        self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
    }

    /// Extent of the viewport.
    #[must_use]
    pub fn viewport_extent(&self) -> S {
        self.viewport_extent
    }

    /// Sets the extent of the viewport and re-clamps the scroll offset.
    pub fn set_viewport_extent(&mut self, extent: S) {
        self.viewport_extent = extent;
        self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
    }

    /// Rows realized beyond each viewport edge.
    #[must_use]
    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Sets the overscan in rows.
    pub fn set_overscan(&mut self, overscan: usize) {
        self.overscan = overscan;
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll_offset(&self) -> S {
        self.scroll_offset
    }

    /// Sets the scroll offset, clamped to `0..=max_scroll_offset()`.
    pub fn set_scroll_offset(&mut self, offset: S) {
        self.scroll_offset = self.clamp_scroll_offset(offset);
    }

    /// Extent of all rows.
    #[must_use]
    pub fn content_extent(&self) -> S {
        S::from_usize(self.len) * self.row_extent.clamp_non_negative()
    }

    /// Largest scroll offset that still fills the viewport.
    #[must_use]
    pub fn max_scroll_offset(&self) -> S {
        (self.content_extent() - self.viewport_extent.clamp_non_negative()).clamp_non_negative()
    }

    /// Clamps `offset` into `0..=max_scroll_offset()`.
    #[must_use]
    pub fn clamp_scroll_offset(&self, offset: S) -> S {
        offset.clamp_non_negative().min(self.max_scroll_offset())
    }

    /// Rows to realize for the current scroll offset and viewport.
    ///
    /// The visible rows are `floor(scroll / h)` through
    /// `ceil((scroll + viewport) / h)`, widened by the overscan on both sides
    /// and clamped to the row range.
    #[must_use]
    pub fn window(&self) -> VirtualWindow<S> {
        if self.len == 0 || !self.row_extent.is_positive_finite() {
            return VirtualWindow::empty();
        }
        let h = self.row_extent;
        let last_index = self.len - 1;
        let first = (self.scroll_offset / h).floor_to_usize().min(last_index);
        let last = ((self.scroll_offset + self.viewport_extent.clamp_non_negative()) / h)
            .ceil_to_usize()
            .min(last_index);
        let start = first.saturating_sub(self.overscan);
        let end = last.saturating_add(self.overscan).min(last_index) + 1;
        VirtualWindow::fixed(start, end, self.len, h)
    }

    /// Scroll offset that brings row `index` into view with `align`.
    ///
    /// The result is clamped to the valid scroll range; out-of-range indices
    /// target the last row.
    #[must_use]
    pub fn offset_for_index(&self, index: usize, align: ScrollAlign) -> S {
        if self.len == 0 {
            return S::zero();
        }
        let index = index.min(self.len - 1);
        let item_start = S::from_usize(index) * self.row_extent;
        let target = align.target(
            item_start,
            self.row_extent,
            self.viewport_extent,
            self.scroll_offset,
        );
        self.clamp_scroll_offset(target)
    }

    /// Scrolls to row `index` and returns the new scroll offset.
    pub fn scroll_to_index(&mut self, index: usize, align: ScrollAlign) -> S {
        self.scroll_offset = self.offset_for_index(index, align);
        self.scroll_offset
    }
}
