// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display and selection grids plus the conversion between their index spaces.

use alloc::vec::Vec;
use core::fmt;

use crate::slot::{HourRange, TimeSlot, generate_slots, slot_height};

/// Names one of the two index spaces of a [`SlotGrids`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridSpace {
    /// Indices into the display grid (rendering resolution).
    Display,
    /// Indices into the selection grid (drag resolution).
    Selection,
}

/// Reasons a pair of grids cannot be built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridError {
    /// `start_hour >= end_hour`, or `end_hour > 24`.
    InvalidHourRange {
        /// Requested first hour.
        start_hour: u32,
        /// Requested end hour.
        end_hour: u32,
    },
    /// An interval (display or selection) of zero minutes.
    ZeroInterval,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHourRange {
                start_hour,
                end_hour,
            } => write!(
                f,
                "invalid hour range {start_hour}..{end_hour}: start must be before end and end at most 24"
            ),
            Self::ZeroInterval => f.write_str("slot interval must be at least one minute"),
        }
    }
}

impl core::error::Error for GridError {}

/// The display grid and the selection grid for one timeline configuration.
///
/// Both grids cover the same [`HourRange`]. When no selection granularity is
/// given, the selection grid is generated at the display interval and compares
/// equal to the display grid element for element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotGrids {
    range: HourRange,
    display_interval: u32,
    selection_granularity: u32,
    display: Vec<TimeSlot>,
    selection: Vec<TimeSlot>,
}

impl SlotGrids {
    /// Builds both grids.
    ///
    /// `selection_granularity` defaults to `display_interval`.
    pub fn new(
        range: HourRange,
        display_interval: u32,
        selection_granularity: Option<u32>,
    ) -> Result<Self, GridError> {
        let selection_granularity = selection_granularity.unwrap_or(display_interval);
        if display_interval == 0 || selection_granularity == 0 {
            return Err(GridError::ZeroInterval);
        }
        let display = generate_slots(range.start_hour(), range.end_hour(), display_interval);
        let selection = if selection_granularity == display_interval {
            display.clone()
        } else {
            generate_slots(range.start_hour(), range.end_hour(), selection_granularity)
        };
        Ok(Self {
            range,
            display_interval,
            selection_granularity,
            display,
            selection,
        })
    }

    /// Validates raw hours before building the grids.
    pub fn from_hours(
        start_hour: u32,
        end_hour: u32,
        display_interval: u32,
        selection_granularity: Option<u32>,
    ) -> Result<Self, GridError> {
        let range = HourRange::new(start_hour, end_hour).ok_or(GridError::InvalidHourRange {
            start_hour,
            end_hour,
        })?;
        Self::new(range, display_interval, selection_granularity)
    }

    /// The hour range both grids cover.
    #[must_use]
    pub fn range(&self) -> HourRange {
        self.range
    }

    /// Interval, in minutes, of the grid behind `space`.
    #[must_use]
    pub fn interval(&self, space: GridSpace) -> u32 {
        match space {
            GridSpace::Display => self.display_interval,
            GridSpace::Selection => self.selection_granularity,
        }
    }

    /// Slots of the grid behind `space`.
    #[must_use]
    pub fn slots(&self, space: GridSpace) -> &[TimeSlot] {
        match space {
            GridSpace::Display => &self.display,
            GridSpace::Selection => &self.selection,
        }
    }

    /// Display grid (rendering resolution).
    #[must_use]
    pub fn display_slots(&self) -> &[TimeSlot] {
        &self.display
    }

    /// Selection grid (drag resolution).
    #[must_use]
    pub fn selection_slots(&self) -> &[TimeSlot] {
        &self.selection
    }

    /// Number of slots in the grid behind `space`.
    #[must_use]
    pub fn len(&self, space: GridSpace) -> usize {
        self.slots(space).len()
    }

    /// Returns `true` if the two grids share an interval.
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        self.display_interval == self.selection_granularity
    }

    /// Pixel height of one slot of `space` for the current hour height.
    #[must_use]
    pub fn slot_height(&self, space: GridSpace, hour_height: f64) -> f64 {
        slot_height(hour_height, self.interval(space))
    }

    /// Total pixel height of the grid for the current hour height.
    ///
    /// Uses the display grid so a truncated last slot is fully included.
    #[must_use]
    pub fn content_height(&self, hour_height: f64) -> f64 {
        self.display.len() as f64 * self.slot_height(GridSpace::Display, hour_height)
    }

    /// Looks up a slot by index.
    #[must_use]
    pub fn slot(&self, space: GridSpace, index: usize) -> Option<TimeSlot> {
        self.slots(space).get(index).copied()
    }

    /// Index in `space` of the slot containing `minutes` since midnight.
    ///
    /// Returns `None` when the time falls before the range start.
    #[must_use]
    pub fn index_at_minutes(&self, space: GridSpace, minutes: u32) -> Option<usize> {
        let offset = minutes.checked_sub(self.range.start_minutes())?;
        Some((offset / self.interval(space)) as usize)
    }

    /// Moves `index` from the `from` index space into the `to` index space.
    ///
    /// The index is resolved to a wall-clock time through the `from` grid and
    /// re-encoded as `floor((minutes - start) / interval(to))`. An index with no
    /// slot in `from` is returned unchanged.
    #[must_use]
    pub fn convert(&self, index: usize, from: GridSpace, to: GridSpace) -> usize {
        if from == to {
            return index;
        }
        let Some(slot) = self.slot(from, index) else {
            log::debug!("no {from:?} slot at index {index}; keeping the raw index");
            return index;
        };
        self.index_at_minutes(to, slot.total_minutes()).unwrap_or(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_granularity_copies_display_grid() {
        let grids = SlotGrids::from_hours(8, 18, 30, None).unwrap();
        assert!(grids.is_uniform());
        assert_eq!(grids.display_slots(), grids.selection_slots());
        assert_eq!(
            grids.slot_height(GridSpace::Display, 80.0),
            grids.slot_height(GridSpace::Selection, 80.0)
        );
    }

    #[test]
    fn equal_granularity_is_structurally_equal() {
        let grids = SlotGrids::from_hours(10, 12, 30, Some(30)).unwrap();
        assert_eq!(grids.display_slots(), grids.selection_slots());
    }

    #[test]
    fn rejects_zero_intervals_and_bad_ranges() {
        assert_eq!(
            SlotGrids::from_hours(8, 18, 0, None),
            Err(GridError::ZeroInterval)
        );
        assert_eq!(
            SlotGrids::from_hours(8, 18, 30, Some(0)),
            Err(GridError::ZeroInterval)
        );
        assert_eq!(
            SlotGrids::from_hours(18, 8, 30, None),
            Err(GridError::InvalidHourRange {
                start_hour: 18,
                end_hour: 8
            })
        );
    }

    #[test]
    fn convert_selection_to_display_floors() {
        let grids = SlotGrids::from_hours(9, 17, 60, Some(15)).unwrap();
        assert_eq!(grids.convert(0, GridSpace::Selection, GridSpace::Display), 0);
        assert_eq!(grids.convert(3, GridSpace::Selection, GridSpace::Display), 0);
        assert_eq!(grids.convert(4, GridSpace::Selection, GridSpace::Display), 1);
        assert_eq!(grids.convert(31, GridSpace::Selection, GridSpace::Display), 7);
    }

    #[test]
    fn convert_display_to_selection_lands_on_first_sub_slot() {
        let grids = SlotGrids::from_hours(9, 17, 60, Some(15)).unwrap();
        assert_eq!(grids.convert(2, GridSpace::Display, GridSpace::Selection), 8);
    }

    #[test]
    fn convert_within_a_space_is_identity() {
        let grids = SlotGrids::from_hours(7, 18, 60, Some(15)).unwrap();
        for index in 0..grids.len(GridSpace::Selection) {
            assert_eq!(
                grids.convert(index, GridSpace::Selection, GridSpace::Selection),
                index
            );
        }
    }

    #[test]
    fn out_of_range_index_falls_back_to_raw() {
        let grids = SlotGrids::from_hours(9, 17, 60, Some(15)).unwrap();
        assert_eq!(
            grids.convert(500, GridSpace::Selection, GridSpace::Display),
            500
        );
    }

    #[test]
    fn content_height_covers_truncated_slot() {
        let grids = SlotGrids::from_hours(8, 10, 45, None).unwrap();
        assert_eq!(grids.content_height(60.0), 3.0 * 45.0);
    }
}
