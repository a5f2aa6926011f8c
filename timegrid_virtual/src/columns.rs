// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal virtualization of resource columns.
//!
//! Small column counts take a fast path: every column is realized, offsets are
//! zero and the caller's slice is returned as is. Above the threshold only the
//! columns under the viewport (plus a buffer on each side) are realized.

use crate::{Scalar, VirtualWindow};

/// Column counts at or below this render without virtualization.
pub const DEFAULT_COLUMN_THRESHOLD: usize = 8;

/// Columns realized beyond each edge of the viewport by default.
pub const DEFAULT_COLUMN_BUFFER: usize = 2;

/// Columns to realize for one horizontal scroll position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnWindow<S: Scalar> {
    /// Realized columns and the spacer widths around them.
    pub window: VirtualWindow<S>,
    /// `false` on the fast path, where every column is realized.
    pub is_virtualized: bool,
}

impl<S: Scalar> ColumnWindow<S> {
    /// First realized column.
    #[must_use]
    pub fn start(&self) -> usize {
        self.window.start
    }

    /// One past the last realized column.
    #[must_use]
    pub fn end(&self) -> usize {
        self.window.end
    }

    /// Width of the spacer left of the realized columns.
    #[must_use]
    pub fn offset_left(&self) -> S {
        self.window.leading_offset
    }

    /// Width of the spacer right of the realized columns.
    #[must_use]
    pub fn offset_right(&self) -> S {
        self.window.trailing_offset
    }

    /// The realized part of `items`.
    ///
    /// On the fast path this is `items` itself.
    #[must_use]
    pub fn visible_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        if !self.is_virtualized {
            return items;
        }
        let end = self.window.end.min(items.len());
        let start = self.window.start.min(end);
        &items[start..end]
    }
}

/// Virtualizer for a row of equally wide resource columns.
#[derive(Clone, Debug)]
pub struct ColumnVirtualizer<S: Scalar> {
    count: usize,
    column_width: S,
    viewport_width: S,
    scroll_x: S,
    threshold: usize,
    buffer: usize,
}

impl<S: Scalar> ColumnVirtualizer<S> {
    /// Creates a virtualizer scrolled to the left edge with the default
    /// threshold and buffer.
    #[must_use]
    pub fn new(count: usize, column_width: S, viewport_width: S) -> Self {
        Self {
            count,
            column_width,
            viewport_width,
            scroll_x: S::zero(),
            threshold: DEFAULT_COLUMN_THRESHOLD,
            buffer: DEFAULT_COLUMN_BUFFER,
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Sets the number of columns.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
    }

    /// Width of one column.
    #[must_use]
    pub fn column_width(&self) -> S {
        self.column_width
    }

    /// Sets the width of one column (for example after a zoom).
    pub fn set_column_width(&mut self, width: S) {
        self.column_width = width;
    }

    /// Sets the viewport width.
    pub fn set_viewport_width(&mut self, width: S) {
        self.viewport_width = width;
    }

    /// Current horizontal scroll offset.
    #[must_use]
    pub fn scroll_x(&self) -> S {
        self.scroll_x
    }

    /// Sets the horizontal scroll offset. Negative offsets clamp to zero.
    pub fn set_scroll_x(&mut self, scroll_x: S) {
        self.scroll_x = scroll_x.clamp_non_negative();
    }

    /// Sets the column count above which virtualization kicks in.
    pub fn set_threshold(&mut self, threshold: usize) {
        self.threshold = threshold;
    }

    /// Sets the number of buffer columns on each side.
    pub fn set_buffer(&mut self, buffer: usize) {
        self.buffer = buffer;
    }

    /// Returns `true` if the column count is above the threshold.
    #[must_use]
    pub fn is_virtualized(&self) -> bool {
        self.count > self.threshold
    }

    /// Total width of all columns.
    #[must_use]
    pub fn content_width(&self) -> S {
        S::from_usize(self.count) * self.column_width.clamp_non_negative()
    }

    /// Horizontal scroll offset that puts column `index` at the left edge.
    #[must_use]
    pub fn offset_for_index(&self, index: usize) -> S {
        S::from_usize(index) * self.column_width.clamp_non_negative()
    }

    /// Columns to realize for the current scroll offset and viewport.
    ///
    /// - `start = max(0, floor(scroll_x / w) - buffer)`
    /// - `end = min(count, start + ceil(viewport / w) + 2 * buffer + 1)`
    #[must_use]
    pub fn window(&self) -> ColumnWindow<S> {
        let w = self.column_width;
        if !self.is_virtualized() || !w.is_positive_finite() {
            return ColumnWindow {
                window: VirtualWindow {
                    start: 0,
                    end: self.count,
                    leading_offset: S::zero(),
                    trailing_offset: S::zero(),
                    content_extent: self.content_width(),
                },
                is_virtualized: false,
            };
        }
        let last_index = self.count - 1;
        let first_visible = (self.scroll_x / w).floor_to_usize();
        let start = first_visible.saturating_sub(self.buffer).min(last_index);
        let span = (self.viewport_width / w).ceil_to_usize();
        let last = start
            .saturating_add(span)
            .saturating_add(self.buffer.saturating_mul(2))
            .min(last_index);
        ColumnWindow {
            window: VirtualWindow::fixed(start, last + 1, self.count, w),
            is_virtualized: true,
        }
    }
}
