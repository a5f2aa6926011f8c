// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::Scalar;

/// Result of a virtualization pass over a strip of fixed-extent items.
///
/// Items `start..end` are realized. `leading_offset` and `trailing_offset` are
/// the spacer extents that stand in for the unrealized items before and after
/// them, so `leading_offset + realized extent + trailing_offset` always equals
/// `content_extent`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VirtualWindow<S: Scalar> {
    /// First realized index.
    pub start: usize,
    /// One past the last realized index.
    pub end: usize,
    /// Extent of the items before `start`.
    pub leading_offset: S,
    /// Extent of the items at or after `end`.
    pub trailing_offset: S,
    /// Extent of the whole strip.
    pub content_extent: S,
}

impl<S: Scalar> VirtualWindow<S> {
    /// A window realizing nothing over an empty strip.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            start: 0,
            end: 0,
            leading_offset: S::zero(),
            trailing_offset: S::zero(),
            content_extent: S::zero(),
        }
    }

    /// Builds the window realizing `start..end` out of `len` items of `extent`.
    pub(crate) fn fixed(start: usize, end: usize, len: usize, extent: S) -> Self {
        Self {
            start,
            end,
            leading_offset: S::from_usize(start) * extent,
            trailing_offset: S::from_usize(len - end) * extent,
            content_extent: S::from_usize(len) * extent,
        }
    }

    /// Realized indices as a range.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of realized items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if nothing is realized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `index` is realized.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

/// Where a target item should land when scrolling to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollAlign {
    /// Align the item's start with the viewport start.
    #[default]
    Start,
    /// Center the item in the viewport.
    Center,
    /// Align the item's end with the viewport end.
    End,
    /// Scroll as little as possible to bring the item fully into view.
    Nearest,
}

impl ScrollAlign {
    /// Scroll offset that places the item at `item_start..item_start+extent`.
    pub(crate) fn target<S: Scalar>(self, item_start: S, extent: S, viewport: S, current: S) -> S {
        match self {
            Self::Start => item_start,
            Self::Center => item_start + extent.half() - viewport.half(),
            Self::End => item_start + extent - viewport,
            Self::Nearest => {
                let item_end = item_start + extent;
                if item_start < current {
                    item_start
                } else if item_end > current + viewport {
                    item_end - viewport
                } else {
                    current
                }
            }
        }
    }
}
