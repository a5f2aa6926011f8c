// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Working-hours annotation over the display grid.
//!
//! Resources may declare the hours they are available as `"HH:MM-HH:MM"`
//! strings. [`WorkingSlots::from_ranges`] turns those into one flag per display
//! slot plus the merged runs of working slots. The result is an annotation for
//! renderers; it never affects what can be selected.

use alloc::vec;
use alloc::vec::Vec;

use crate::grids::{GridSpace, SlotGrids};
use crate::slot::MINUTES_PER_HOUR;

/// An inclusive run of slot indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotRange {
    /// First slot of the run.
    pub start: usize,
    /// Last slot of the run (inclusive).
    pub end: usize,
}

impl SlotRange {
    /// Returns `true` if `index` lies inside the run.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

/// Per-slot availability of one resource on one day.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkingSlots {
    /// One flag per display slot.
    pub is_working: Vec<bool>,
    /// Sorted, non-overlapping runs of working slots.
    pub ranges: Vec<SlotRange>,
}

impl WorkingSlots {
    /// All slots marked as not working.
    #[must_use]
    pub fn none(slot_count: usize) -> Self {
        Self {
            is_working: vec![false; slot_count],
            ranges: Vec::new(),
        }
    }

    /// Parses `"HH:MM-HH:MM"` ranges against the display grid.
    ///
    /// A slot counts as working when it starts inside a range; the range end is
    /// exclusive. Ranges are clamped to the grid and malformed entries are
    /// skipped.
    pub fn from_ranges<S: AsRef<str>>(ranges: &[S], grids: &SlotGrids) -> Self {
        let slot_count = grids.len(GridSpace::Display);
        let interval = i64::from(grids.interval(GridSpace::Display));
        let origin = i64::from(grids.range().start_minutes());
        let mut is_working = vec![false; slot_count];

        for raw in ranges {
            let raw = raw.as_ref();
            let Some((start, end)) = parse_range(raw) else {
                log::warn!("skipping malformed working-hours range {raw:?}");
                continue;
            };
            if end <= start || slot_count == 0 {
                continue;
            }
            // First slot starting at or after `start`, last slot starting before `end`.
            let first = (i64::from(start) - origin + interval - 1).div_euclid(interval);
            let last = (i64::from(end) - origin - 1).div_euclid(interval);
            let first = first.max(0);
            let last = last.min(slot_count as i64 - 1);
            for index in first..=last {
                is_working[index as usize] = true;
            }
        }

        let ranges = runs(&is_working);
        Self { is_working, ranges }
    }

    /// Returns `true` if the display slot at `index` is a working slot.
    ///
    /// Out-of-range indices are treated as not working.
    #[must_use]
    pub fn is_working(&self, index: usize) -> bool {
        self.is_working.get(index).copied().unwrap_or(false)
    }

    /// Returns `true` if any slot is marked as working.
    #[must_use]
    pub fn has_working_slots(&self) -> bool {
        !self.ranges.is_empty()
    }
}

/// Parses `"HH:MM"` into minutes since midnight.
///
/// Accepts `24:00` as the end of the day.
#[must_use]
pub fn parse_clock_time(text: &str) -> Option<u32> {
    let (hours, minutes) = text.trim().split_once(':')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    if minutes >= MINUTES_PER_HOUR || hours > 24 || (hours == 24 && minutes != 0) {
        return None;
    }
    Some(hours * MINUTES_PER_HOUR + minutes)
}

fn parse_range(text: &str) -> Option<(u32, u32)> {
    let (start, end) = text.split_once('-')?;
    Some((parse_clock_time(start)?, parse_clock_time(end)?))
}

fn runs(flags: &[bool]) -> Vec<SlotRange> {
    let mut out = Vec::new();
    let mut open: Option<usize> = None;
    for (index, &working) in flags.iter().enumerate() {
        match (working, open) {
            (true, None) => open = Some(index),
            (false, Some(start)) => {
                out.push(SlotRange {
                    start,
                    end: index - 1,
                });
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        out.push(SlotRange {
            start,
            end: flags.len() - 1,
        });
    }
    out
}
