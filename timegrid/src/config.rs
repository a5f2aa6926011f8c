// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timeline configuration, loadable from TOML.
//!
//! Every field has a default, so an empty document is a valid configuration:
//!
//! ```toml
//! [grid]
//! start_hour = 9
//! end_hour = 17
//! time_slot_interval = 60
//! selection_granularity = 15
//!
//! [selection]
//! clear_after_drag = true
//!
//! [zoom]
//! vertical_max = 3.0
//! ```

use std::path::Path;

use serde::Deserialize;
use timegrid_gesture::{DEFAULT_DIRECTION_THRESHOLD, DEFAULT_ZOOM_THROTTLE_MS, GestureConfig};
use timegrid_selection::DEFAULT_AUTO_CLEAR_MS;
use timegrid_slots::{ClockFormat, SlotGrids};
use timegrid_view::ZoomLimits;
use timegrid_virtual::{DEFAULT_COLUMN_BUFFER, DEFAULT_COLUMN_THRESHOLD, DEFAULT_OVERSCAN};

use crate::TimelineError;

/// Complete configuration of a [`Timeline`](crate::Timeline).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Hour range, intervals and sizes.
    pub grid: GridConfig,
    /// Selection behavior.
    pub selection: SelectionConfig,
    /// Pinch zoom limits and pacing.
    pub zoom: ZoomConfig,
    /// Column sizing and virtualization.
    pub layout: LayoutConfig,
}

/// The time axis.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// First hour shown.
    pub start_hour: u32,
    /// Hour the grid ends at (exclusive, at most 24).
    pub end_hour: u32,
    /// Display interval in minutes.
    pub time_slot_interval: u32,
    /// Drag precision in minutes; defaults to the display interval.
    pub selection_granularity: Option<u32>,
    /// Natural height of one hour in pixels.
    pub hour_height: f64,
    /// Minimum height of a laid out event.
    pub event_min_height: f64,
    /// Show a marker at the current time when the date is today.
    pub show_now_indicator: bool,
    /// Label the time column with a 24 hour clock.
    pub format_24h: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start_hour: 0,
            end_hour: 24,
            time_slot_interval: 60,
            selection_granularity: None,
            hour_height: 80.0,
            event_min_height: 40.0,
            show_now_indicator: false,
            format_24h: true,
        }
    }
}

/// Selection behavior.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Pans produce drag selections.
    pub drag_enabled: bool,
    /// A single tap commits a one-slot selection.
    pub single_tap: bool,
    /// Committed selections clear themselves after `auto_clear_ms`.
    pub clear_after_drag: bool,
    /// Delay before a committed selection is cleared.
    pub auto_clear_ms: u64,
    /// Ask the host for haptic feedback.
    pub haptics: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            drag_enabled: true,
            single_tap: false,
            clear_after_drag: true,
            auto_clear_ms: DEFAULT_AUTO_CLEAR_MS,
            haptics: true,
        }
    }
}

/// Pinch zoom.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Smallest hour-height scale.
    pub vertical_min: f64,
    /// Largest hour-height scale.
    pub vertical_max: f64,
    /// Smallest column-width scale.
    pub horizontal_min: f64,
    /// Largest column-width scale.
    pub horizontal_max: f64,
    /// Allow pinches to widen columns.
    pub horizontal_enabled: bool,
    /// Minimum spacing of live zoom updates.
    pub throttle_ms: u64,
    /// Dead zone a pinch scale must leave before its axis is chosen.
    pub direction_threshold: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            vertical_min: ZoomLimits::VERTICAL.min(),
            vertical_max: ZoomLimits::VERTICAL.max(),
            horizontal_min: ZoomLimits::HORIZONTAL.min(),
            horizontal_max: ZoomLimits::HORIZONTAL.max(),
            horizontal_enabled: true,
            throttle_ms: DEFAULT_ZOOM_THROTTLE_MS,
            direction_threshold: DEFAULT_DIRECTION_THRESHOLD,
        }
    }
}

/// Columns and virtualization.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Natural width of one resource column.
    pub column_width: f64,
    /// Resource count above which columns are virtualized.
    pub column_threshold: usize,
    /// Columns rendered beyond each viewport edge.
    pub column_buffer: usize,
    /// Rows rendered beyond each viewport edge.
    pub row_overscan: usize,
    /// Columns per page for paged horizontal scrolling.
    pub resources_per_page: usize,
    /// Event count above which only events near the viewport are laid out.
    pub event_threshold: usize,
    /// Lower event threshold used when there are many columns.
    pub event_threshold_many_columns: usize,
    /// Resource count above which the lower event threshold applies.
    pub many_columns: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_width: 120.0,
            column_threshold: DEFAULT_COLUMN_THRESHOLD,
            column_buffer: DEFAULT_COLUMN_BUFFER,
            row_overscan: DEFAULT_OVERSCAN,
            resources_per_page: 2,
            event_threshold: 50,
            event_threshold_many_columns: 20,
            many_columns: 4,
        }
    }
}

impl LayoutConfig {
    /// Returns `true` if `event_count` events over `resource_count` columns
    /// should be clipped to the visible rows.
    #[must_use]
    pub fn virtualizes_events(&self, event_count: usize, resource_count: usize) -> bool {
        event_count > self.event_threshold
            || (event_count > self.event_threshold_many_columns
                && resource_count > self.many_columns)
    }
}

impl TimelineConfig {
    /// Loads a configuration file, falling back to defaults when it does not
    /// exist.
    pub fn load(path: &Path) -> Result<Self, TimelineError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no timeline config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(TimelineError::Io(e)),
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(toml_str: &str) -> Result<Self, TimelineError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every setting that could leave the timeline in a broken state.
    pub fn validate(&self) -> Result<(), TimelineError> {
        self.grids()?;
        self.vertical_limits()?;
        self.horizontal_limits()?;
        positive_extent("hour height", self.grid.hour_height)?;
        positive_extent("column width", self.layout.column_width)?;
        if self.layout.resources_per_page == 0 {
            return Err(TimelineError::InvalidExtent {
                what: "resources per page",
                value: 0.0,
            });
        }
        if !self.grid.event_min_height.is_finite() || self.grid.event_min_height < 0.0 {
            return Err(TimelineError::InvalidExtent {
                what: "event minimum height",
                value: self.grid.event_min_height,
            });
        }
        Ok(())
    }

    /// Builds the display and selection grids.
    pub fn grids(&self) -> Result<SlotGrids, TimelineError> {
        Ok(SlotGrids::from_hours(
            self.grid.start_hour,
            self.grid.end_hour,
            self.grid.time_slot_interval,
            self.grid.selection_granularity,
        )?)
    }

    /// Hour-height zoom limits.
    pub fn vertical_limits(&self) -> Result<ZoomLimits, TimelineError> {
        zoom_limits(self.zoom.vertical_min, self.zoom.vertical_max)
    }

    /// Column-width zoom limits.
    pub fn horizontal_limits(&self) -> Result<ZoomLimits, TimelineError> {
        zoom_limits(self.zoom.horizontal_min, self.zoom.horizontal_max)
    }

    /// Clock convention for the time column.
    #[must_use]
    pub fn clock_format(&self) -> ClockFormat {
        if self.grid.format_24h {
            ClockFormat::H24
        } else {
            ClockFormat::H12
        }
    }

    /// Gesture settings derived from this configuration.
    #[must_use]
    pub fn gesture_config(&self) -> GestureConfig {
        GestureConfig {
            drag_enabled: self.selection.drag_enabled,
            single_tap_enabled: self.selection.single_tap,
            horizontal_zoom_enabled: self.zoom.horizontal_enabled,
            zoom_throttle_ms: self.zoom.throttle_ms,
            direction_threshold: self.zoom.direction_threshold,
        }
    }
}

fn zoom_limits(min: f64, max: f64) -> Result<ZoomLimits, TimelineError> {
    ZoomLimits::new(min, max).ok_or(TimelineError::InvalidZoomLimits { min, max })
}

fn positive_extent(what: &'static str, value: f64) -> Result<(), TimelineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TimelineError::InvalidExtent { what, value })
    }
}
