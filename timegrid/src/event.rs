// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use timegrid_gesture::GestureEvent;

use crate::KeyCommand;

/// Input to a [`Timeline`](crate::Timeline).
///
/// Events are queued and applied in order by
/// [`Timeline::process`](crate::Timeline::process), so a state change caused
/// by one event is visible to the next.
#[derive(Clone, Debug, PartialEq)]
pub enum TimelineEvent {
    /// A recognized gesture sample.
    Gesture(GestureEvent),
    /// A navigation key.
    Key(KeyCommand),
    /// New viewport size.
    Resize(Size),
    /// The host scrolled the content. `None` keeps an axis unchanged.
    Scroll {
        /// Horizontal offset.
        x: Option<f64>,
        /// Vertical offset.
        y: Option<f64>,
    },
    /// Clear any selection, committed or not.
    ClearSelection,
    /// Abandon a drag in progress.
    ClearDragSelection,
    /// Return both zoom axes to scale `1`.
    ResetZoom,
    /// Scroll a resource to the left edge.
    ScrollToResource(String),
    /// Scroll a (fractional) hour of day to the top edge.
    ScrollToTime(f64),
    /// Scroll to the first column of a page.
    ScrollToPage(usize),
}
