// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timegrid Selection: the drag/tap selection state machine.
//!
//! A resource timeline has at most one active range selection. It belongs to
//! one resource (column) and spans a contiguous run of selection-grid slots.
//! [`SelectionMachine`] tracks that range through its phases:
//!
//! - **Idle**: nothing selected.
//! - **Pressed**: a single slot was pressed (a tap that did not commit).
//! - **Dragging**: a drag is in progress; the end slot follows the pointer.
//! - **Retained**: a committed range that stays highlighted, either until the
//!   caller clears it or until the auto-clear timer fires.
//!
//! Committing (via [`SelectionMachine::complete_drag`] or
//! [`SelectionMachine::commit_tap`]) yields a [`CommittedSelection`] for the
//! host's selection callback. Committed indices are always expressed in
//! [`REPORT_SPACE`].
//!
//! The machine also carries a revision counter in the style of a selection
//! container: it bumps only when the visible selection actually changes. The
//! auto-clear timer remembers the revision it was scheduled for and is ignored
//! when the selection changed in the meantime.
//!
//! ## Minimal example
//!
//! ```rust
//! use timegrid_selection::{SelectionMachine, SelectionPhase};
//! use timegrid_slots::SlotGrids;
//!
//! let grids = SlotGrids::from_hours(9, 17, 60, Some(15)).unwrap();
//! let mut selection = SelectionMachine::new();
//!
//! selection.start_drag("room-a", 6);
//! selection.update_drag(2);
//! let committed = selection.complete_drag(&grids, 1_000).unwrap();
//!
//! // Normalized and reported in the selection granularity.
//! assert_eq!((committed.start_slot, committed.end_slot), (2, 6));
//!
//! // The range stays highlighted until the auto-clear delay elapses.
//! assert_eq!(selection.phase(), SelectionPhase::Retained);
//! selection.tick(1_000 + selection.auto_clear_delay_ms());
//! assert_eq!(selection.phase(), SelectionPhase::Idle);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod machine;

pub use machine::{
    CommittedSelection, DEFAULT_AUTO_CLEAR_MS, DragSelection, REPORT_SPACE, SelectionMachine,
    SelectionPhase,
};
