// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::String;

/// Clock convention for slot labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClockFormat {
    /// `00:00` through `23:59`.
    #[default]
    H24,
    /// `12:00 AM` through `11:59 PM`.
    H12,
}

/// Formats a wall-clock time for the time column.
///
/// - 24h: `HH:MM`, or `HH:00` when `show_minutes` is false.
/// - 12h: `h:MM AM`/`PM`; whole hours (and `show_minutes == false`) render as
///   `h:00`. Midnight and noon are `12`.
#[must_use]
pub fn format_slot_label(hours: u32, minutes: u32, format: ClockFormat, show_minutes: bool) -> String {
    match format {
        ClockFormat::H24 => {
            if show_minutes {
                format!("{hours:02}:{minutes:02}")
            } else {
                format!("{hours:02}:00")
            }
        }
        ClockFormat::H12 => {
            let display_hour = match hours {
                0 => 12,
                h if h > 12 => h - 12,
                h => h,
            };
            let period = if hours >= 12 { "PM" } else { "AM" };
            if show_minutes && minutes > 0 {
                format!("{display_hour}:{minutes:02} {period}")
            } else {
                format!("{display_hour}:00 {period}")
            }
        }
    }
}
