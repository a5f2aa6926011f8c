// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timegrid Slots: discrete time grids for resource timelines.
//!
//! A resource timeline shows a day (or part of one) as a vertical strip of
//! equally sized cells. This crate derives those cells from an hour range and an
//! interval and keeps two grids side by side:
//!
//! - the **display grid**, generated at the rendering interval, used for labels
//!   and cell backgrounds, and
//! - the **selection grid**, generated at the (optionally finer) selection
//!   granularity, used for drag precision.
//!
//! The two grids are independent index spaces. [`GridSpace`] names them, and
//! [`SlotGrids::convert`] is the one function that moves an index from one space
//! to the other. Call sites should never redo the arithmetic themselves.
//!
//! ## Minimal example
//!
//! ```rust
//! use timegrid_slots::{GridSpace, HourRange, SlotGrids};
//!
//! // 09:00-17:00, hourly labels, 15 minute drag precision.
//! let range = HourRange::new(9, 17).unwrap();
//! let grids = SlotGrids::new(range, 60, Some(15)).unwrap();
//!
//! assert_eq!(grids.display_slots().len(), 8);
//! assert_eq!(grids.selection_slots().len(), 32);
//!
//! // With an 80px hour, a selection cell is 20px tall.
//! assert_eq!(grids.slot_height(GridSpace::Selection, 80.0), 20.0);
//!
//! // Selection slot 5 (10:15) lives in display slot 1 (10:00).
//! assert_eq!(grids.convert(5, GridSpace::Selection, GridSpace::Display), 1);
//! ```
//!
//! ## Truncation
//!
//! When an interval does not evenly divide the hour range, the grid is rounded
//! up: the final slot starts before the end hour but its nominal end may run
//! past it. Generation never fails on such input.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod grids;
mod label;
mod slot;
mod working_hours;

pub use grids::{GridError, GridSpace, SlotGrids};
pub use label::{ClockFormat, format_slot_label};
pub use slot::{HourRange, MINUTES_PER_HOUR, TimeSlot, generate_slots, slot_height};
pub use working_hours::{SlotRange, WorkingSlots, parse_clock_time};
