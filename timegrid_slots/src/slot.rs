// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt;

/// Minutes in one hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// A validated `[start_hour, end_hour)` range within a single day.
///
/// Invariant: `start_hour < end_hour <= 24`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourRange {
    start_hour: u32,
    end_hour: u32,
}

impl HourRange {
    /// Creates a range, returning `None` unless `start_hour < end_hour <= 24`.
    #[must_use]
    pub const fn new(start_hour: u32, end_hour: u32) -> Option<Self> {
        if start_hour < end_hour && end_hour <= 24 {
            Some(Self {
                start_hour,
                end_hour,
            })
        } else {
            None
        }
    }

    /// First hour shown.
    #[must_use]
    pub const fn start_hour(&self) -> u32 {
        self.start_hour
    }

    /// Hour at which the timeline ends (exclusive).
    #[must_use]
    pub const fn end_hour(&self) -> u32 {
        self.end_hour
    }

    /// Minutes since midnight of the first slot.
    #[must_use]
    pub const fn start_minutes(&self) -> u32 {
        self.start_hour * MINUTES_PER_HOUR
    }

    /// Length of the range in minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> u32 {
        (self.end_hour - self.start_hour) * MINUTES_PER_HOUR
    }

    /// Number of slots an interval produces over this range.
    ///
    /// Rounds up, so a trailing partial interval still gets a (complete) slot.
    #[must_use]
    pub const fn slot_count(&self, interval_minutes: u32) -> usize {
        if interval_minutes == 0 {
            return 0;
        }
        self.duration_minutes().div_ceil(interval_minutes) as usize
    }
}

/// One cell of a time grid.
///
/// `index` is 0-based and contiguous within the grid that produced the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSlot {
    /// Hour of day, `0..=23` (or `24` for a truncated slot past midnight).
    pub hours: u32,
    /// Minute within the hour, `0..60`.
    pub minutes: u32,
    /// Position of the slot in its grid.
    pub index: usize,
}

impl TimeSlot {
    /// Minutes since midnight.
    #[must_use]
    pub const fn total_minutes(&self) -> u32 {
        self.hours * MINUTES_PER_HOUR + self.minutes
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

/// Generates the slots for `[start_hour, end_hour)` at `interval_minutes`.
///
/// Slot `i` starts at `start_hour * 60 + i * interval_minutes` minutes after
/// midnight. Invalid input (an empty or inverted range, an end past 24, or a
/// zero interval) yields an empty grid; callers that need to report the problem
/// should validate with [`HourRange::new`] first.
#[must_use]
pub fn generate_slots(start_hour: u32, end_hour: u32, interval_minutes: u32) -> Vec<TimeSlot> {
    let Some(range) = HourRange::new(start_hour, end_hour) else {
        return Vec::new();
    };
    let count = range.slot_count(interval_minutes);
    (0..count)
        .map(|index| {
            let total = range.start_minutes() + index as u32 * interval_minutes;
            TimeSlot {
                hours: total / MINUTES_PER_HOUR,
                minutes: total % MINUTES_PER_HOUR,
                index,
            }
        })
        .collect()
}

/// Pixel height of one slot given the (zoom-scaled) height of an hour.
///
/// This is a derived value; recompute it whenever `hour_height` changes.
#[must_use]
pub fn slot_height(hour_height: f64, interval_minutes: u32) -> f64 {
    if interval_minutes == 0 {
        return 0.0;
    }
    hour_height / (f64::from(MINUTES_PER_HOUR) / f64::from(interval_minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_range_rejects_inverted_and_out_of_day() {
        assert!(HourRange::new(9, 9).is_none());
        assert!(HourRange::new(10, 9).is_none());
        assert!(HourRange::new(0, 25).is_none());
        assert!(HourRange::new(0, 24).is_some());
    }

    #[test]
    fn truncated_grid_rounds_up() {
        // 2 hours at 45 minutes: 0, 45, 90 -> the last slot ends at 135 > 120.
        let slots = generate_slots(8, 10, 45);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[2].hours, 9);
        assert_eq!(slots[2].minutes, 30);
    }

    #[test]
    fn zero_interval_is_empty() {
        assert!(generate_slots(8, 10, 0).is_empty());
        assert_eq!(slot_height(80.0, 0), 0.0);
    }

    #[test]
    fn slot_height_tracks_hour_height() {
        assert_eq!(slot_height(80.0, 15), 20.0);
        assert_eq!(slot_height(160.0, 60), 160.0);
        assert_eq!(slot_height(120.0, 30), 60.0);
        assert_eq!(slot_height(40.0, 120), 80.0);
    }

    #[test]
    fn display_pads_to_two_digits() {
        let slot = TimeSlot {
            hours: 7,
            minutes: 5,
            index: 0,
        };
        assert_eq!(alloc::format!("{slot}"), "07:05");
    }
}
