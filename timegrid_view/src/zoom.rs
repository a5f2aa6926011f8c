// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-axis pinch zoom.
//!
//! Each axis keeps a natural extent (hour height or column width), the last
//! committed scale and, only while a pinch is in progress, a live scale. The
//! effective extent is `base_extent * scale` where `scale` is the live value
//! when present and the committed value otherwise.
//!
//! ## Usage
//!
//! 1) Call [`ZoomController::begin`] once the pinch direction is known.
//! 2) Feed raw pinch scales (relative to the start of the gesture) into
//!    [`ZoomController::update_live`].
//! 3) Call [`ZoomController::commit`] when the gesture ends, or
//!    [`ZoomController::cancel_live`] when it is cancelled.

/// One of the two zoomable timeline axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZoomAxis {
    /// Hour height (time runs top to bottom).
    Vertical,
    /// Resource column width.
    Horizontal,
}

/// Inclusive scale bounds for one axis.
///
/// Invariant: `0 < min <= max`, both finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
    min: f64,
    max: f64,
}

impl ZoomLimits {
    /// Default limits for the vertical axis.
    pub const VERTICAL: Self = Self { min: 0.75, max: 2.5 };
    /// Default limits for the horizontal axis.
    pub const HORIZONTAL: Self = Self { min: 1.1, max: 2.5 };

    /// Creates limits, returning `None` unless `0 < min <= max` and both are
    /// finite.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Option<Self> {
        if min.is_finite() && max.is_finite() && min > 0.0 && min <= max {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Smallest allowed scale.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest allowed scale.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamps `scale` into the limits.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

/// Zoom state of a single axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisZoom {
    base_extent: f64,
    current: f64,
    live: Option<f64>,
    limits: ZoomLimits,
}

impl AxisZoom {
    /// Creates an axis at scale `1` over `base_extent` pixels.
    #[must_use]
    pub fn new(base_extent: f64, limits: ZoomLimits) -> Self {
        Self {
            base_extent,
            current: 1.0,
            live: None,
            limits,
        }
    }

    /// Natural (unscaled) extent.
    #[must_use]
    pub fn base_extent(&self) -> f64 {
        self.base_extent
    }

    /// Last committed scale.
    #[must_use]
    pub fn current_scale(&self) -> f64 {
        self.current
    }

    /// Live scale of an in-progress pinch, if any.
    #[must_use]
    pub fn live_scale(&self) -> Option<f64> {
        self.live
    }

    /// Scale used for rendering and hit-testing right now.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.live.unwrap_or(self.current)
    }

    /// Effective extent: `base_extent * scale()`.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.base_extent * self.scale()
    }

    /// Configured limits.
    #[must_use]
    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Replaces the limits and clamps a live scale into them.
    ///
    /// The committed scale is left alone so that a reset value of `1` survives
    /// limits that exclude it until the next pinch.
    pub fn set_limits(&mut self, limits: ZoomLimits) {
        self.limits = limits;
        if let Some(live) = self.live {
            self.live = Some(limits.clamp(live));
        }
    }

    /// Records a structural change of the natural extent.
    ///
    /// The committed scale returns to `1` and any live pinch is dropped.
    pub fn set_base_extent(&mut self, extent: f64) {
        self.base_extent = extent;
        self.current = 1.0;
        self.live = None;
    }

    /// Applies a raw pinch scale on top of the committed scale.
    ///
    /// Raw scales that are not positive and finite are ignored and return
    /// `None`; otherwise returns the new (clamped) live scale.
    pub fn update_live(&mut self, raw_scale: f64) -> Option<f64> {
        if !raw_scale.is_finite() || raw_scale <= 0.0 {
            return None;
        }
        let live = self.limits.clamp(self.current * raw_scale);
        self.live = Some(live);
        Some(live)
    }

    /// Promotes the live scale to the committed scale.
    ///
    /// Returns the committed scale, or `None` if no pinch was live.
    pub fn commit(&mut self) -> Option<f64> {
        let live = self.live.take()?;
        self.current = self.limits.clamp(live);
        Some(self.current)
    }

    /// Drops a live pinch without committing it.
    pub fn cancel_live(&mut self) {
        self.live = None;
    }

    /// Returns to scale `1` and drops any live pinch.
    pub fn reset(&mut self) {
        self.current = 1.0;
        self.live = None;
    }
}

/// Zoom state for both timeline axes.
///
/// At most one axis is live at a time.
#[derive(Clone, Debug)]
pub struct ZoomController {
    vertical: AxisZoom,
    horizontal: AxisZoom,
    horizontal_enabled: bool,
    active: Option<ZoomAxis>,
}

impl ZoomController {
    /// Creates a controller with both axes at scale `1`.
    ///
    /// - `hour_height` is the natural height of one hour in pixels.
    /// - `column_width` is the natural width of one resource column.
    #[must_use]
    pub fn new(
        hour_height: f64,
        column_width: f64,
        vertical: ZoomLimits,
        horizontal: ZoomLimits,
    ) -> Self {
        Self {
            vertical: AxisZoom::new(hour_height, vertical),
            horizontal: AxisZoom::new(column_width, horizontal),
            horizontal_enabled: true,
            active: None,
        }
    }

    /// State of one axis.
    #[must_use]
    pub fn axis(&self, axis: ZoomAxis) -> &AxisZoom {
        match axis {
            ZoomAxis::Vertical => &self.vertical,
            ZoomAxis::Horizontal => &self.horizontal,
        }
    }

    fn axis_mut(&mut self, axis: ZoomAxis) -> &mut AxisZoom {
        match axis {
            ZoomAxis::Vertical => &mut self.vertical,
            ZoomAxis::Horizontal => &mut self.horizontal,
        }
    }

    /// Effective hour height.
    #[must_use]
    pub fn hour_height(&self) -> f64 {
        self.vertical.extent()
    }

    /// Effective column width.
    #[must_use]
    pub fn column_width(&self) -> f64 {
        self.horizontal.extent()
    }

    /// Returns `true` if horizontal pinches are honored.
    #[must_use]
    pub fn horizontal_enabled(&self) -> bool {
        self.horizontal_enabled
    }

    /// Enables or disables horizontal zoom.
    ///
    /// Disabling it while a horizontal pinch is live drops that pinch.
    pub fn set_horizontal_enabled(&mut self, enabled: bool) {
        self.horizontal_enabled = enabled;
        if !enabled && self.active == Some(ZoomAxis::Horizontal) {
            self.horizontal.cancel_live();
            self.active = None;
        }
    }

    /// Axis of the pinch in progress, if any.
    #[must_use]
    pub fn active_axis(&self) -> Option<ZoomAxis> {
        self.active
    }

    /// Returns `true` while a pinch is live.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.active.is_some()
    }

    /// Starts a pinch on `axis` and returns the axis actually used.
    ///
    /// Horizontal requests fall back to vertical when horizontal zoom is
    /// disabled. A pinch already in progress is dropped.
    pub fn begin(&mut self, axis: ZoomAxis) -> ZoomAxis {
        self.cancel_live();
        let axis = if axis == ZoomAxis::Horizontal && !self.horizontal_enabled {
            ZoomAxis::Vertical
        } else {
            axis
        };
        self.active = Some(axis);
        log::debug!("zoom began on {axis:?}");
        axis
    }

    /// Updates the live scale of the active axis.
    ///
    /// Returns the new live scale, or `None` if no pinch is active or the raw
    /// scale was rejected.
    pub fn update_live(&mut self, raw_scale: f64) -> Option<f64> {
        let Some(axis) = self.active else {
            log::trace!("zoom update without an active pinch");
            return None;
        };
        self.axis_mut(axis).update_live(raw_scale)
    }

    /// Commits the live scale of the active axis.
    ///
    /// Returns the axis and its new committed scale. Ending a pinch that never
    /// produced a live scale keeps the previous scale and returns `None`.
    pub fn commit(&mut self) -> Option<(ZoomAxis, f64)> {
        let axis = self.active.take()?;
        let scale = self.axis_mut(axis).commit()?;
        log::debug!("zoom committed on {axis:?} at {scale}");
        Some((axis, scale))
    }

    /// Drops the live pinch, if any, without committing.
    pub fn cancel_live(&mut self) {
        if let Some(axis) = self.active.take() {
            self.axis_mut(axis).cancel_live();
        }
    }

    /// Returns both axes to scale `1` and drops any live pinch.
    pub fn reset_zoom(&mut self) {
        self.active = None;
        self.vertical.reset();
        self.horizontal.reset();
    }

    /// Records a new natural extent for `axis`; see [`AxisZoom::set_base_extent`].
    pub fn set_base_extent(&mut self, axis: ZoomAxis, extent: f64) {
        if self.active == Some(axis) {
            self.active = None;
        }
        self.axis_mut(axis).set_base_extent(extent);
    }

    /// Replaces the limits of `axis`.
    pub fn set_limits(&mut self, axis: ZoomAxis, limits: ZoomLimits) {
        self.axis_mut(axis).set_limits(limits);
    }

    /// Snapshot of the zoom state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ZoomDebugInfo {
        ZoomDebugInfo {
            vertical: self.vertical,
            horizontal: self.horizontal,
            hour_height: self.hour_height(),
            column_width: self.column_width(),
            horizontal_enabled: self.horizontal_enabled,
            active: self.active,
        }
    }
}

/// Debug snapshot of a [`ZoomController`].
#[derive(Clone, Copy, Debug)]
pub struct ZoomDebugInfo {
    /// Vertical axis state.
    pub vertical: AxisZoom,
    /// Horizontal axis state.
    pub horizontal: AxisZoom,
    /// Effective hour height.
    pub hour_height: f64,
    /// Effective column width.
    pub column_width: f64,
    /// Whether horizontal pinches are honored.
    pub horizontal_enabled: bool,
    /// Axis of the live pinch, if any.
    pub active: Option<ZoomAxis>,
}
