// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use timegrid_slots::GridError;

/// Errors reported by a [`Timeline`](crate::Timeline) and its configuration.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    /// `start_hour >= end_hour`, or `end_hour > 24`.
    #[error("invalid hour range {start_hour}..{end_hour}")]
    InvalidHourRange {
        /// Configured first hour.
        start_hour: u32,
        /// Configured end hour.
        end_hour: u32,
    },
    /// A display interval or selection granularity of zero minutes.
    #[error("slot intervals must be at least one minute")]
    InvalidInterval,
    /// Zoom limits that are non-finite, non-positive or inverted.
    #[error("invalid zoom limits {min}..{max}")]
    InvalidZoomLimits {
        /// Configured minimum scale.
        min: f64,
        /// Configured maximum scale.
        max: f64,
    },
    /// A hour height or column width that is not a positive finite number.
    #[error("invalid {what}: {value}")]
    InvalidExtent {
        /// Which setting was rejected.
        what: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The timeline has no resources to select on.
    #[error("timeline has no resources")]
    EmptyResources,
    /// A resource id that is not part of the timeline.
    #[error("unknown resource '{0}'")]
    UnknownResource(String),
    /// Two resources share an id.
    #[error("duplicate resource id '{0}'")]
    DuplicateResource(String),
    /// I/O error while reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed configuration TOML.
    #[error("parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl From<GridError> for TimelineError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::InvalidHourRange {
                start_hour,
                end_hour,
            } => Self::InvalidHourRange {
                start_hour,
                end_hour,
            },
            GridError::ZeroInterval => Self::InvalidInterval,
        }
    }
}

impl TimelineError {
    /// Returns `true` for errors that come from configuration rather than from
    /// a single call.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidHourRange { .. }
                | Self::InvalidInterval
                | Self::InvalidZoomLimits { .. }
                | Self::InvalidExtent { .. }
                | Self::ConfigParse(_)
                | Self::Io(_)
        )
    }
}
