// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard navigation over `(resource, display slot)` cells.
//!
//! Arrow keys move a focus cursor. The first activation (Enter or Space)
//! anchors a range at the focused cell, the second completes it on the focused
//! resource. Escape drops the anchor.

use timegrid_slots::{GridSpace, SlotGrids};

/// Keys the timeline reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    /// Previous slot.
    Up,
    /// Next slot.
    Down,
    /// Previous resource.
    Left,
    /// Next resource.
    Right,
    /// Enter or Space.
    Activate,
    /// Escape.
    Escape,
}

/// A focused cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FocusCell {
    /// Resource (column) index.
    pub resource: usize,
    /// Display slot index.
    pub slot: usize,
}

/// What a key did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Nothing changed.
    Ignored,
    /// The focus moved.
    Moved(FocusCell),
    /// A range was anchored at the focused cell.
    Anchored(FocusCell),
    /// A display-slot range was completed, inclusive, on `resource`.
    Completed {
        /// Resource the range belongs to.
        resource: usize,
        /// First display slot.
        start_slot: usize,
        /// Last display slot.
        end_slot: usize,
    },
    /// The anchor was dropped.
    Cancelled,
}

/// Focus cursor and pending anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyboardNavigator {
    focus: FocusCell,
    anchor: Option<FocusCell>,
}

impl KeyboardNavigator {
    /// A navigator focused on the first cell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The focused cell.
    #[must_use]
    pub fn focus(&self) -> FocusCell {
        self.focus
    }

    /// The anchored cell, if a range is being built.
    #[must_use]
    pub fn anchor(&self) -> Option<FocusCell> {
        self.anchor
    }

    /// Moves the focus, clamped to the grid.
    pub fn focus_cell(&mut self, cell: FocusCell, resources: usize, slots: usize) {
        self.focus = FocusCell {
            resource: cell.resource.min(resources.saturating_sub(1)),
            slot: cell.slot.min(slots.saturating_sub(1)),
        };
    }

    /// Drops the anchor.
    pub fn clear(&mut self) {
        self.anchor = None;
    }

    /// Returns `true` if `cell` lies in the range between the anchor and the
    /// focus.
    #[must_use]
    pub fn is_in_selection(&self, cell: FocusCell) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };
        let lo = anchor.slot.min(self.focus.slot);
        let hi = anchor.slot.max(self.focus.slot);
        anchor.resource == cell.resource && (lo..=hi).contains(&cell.slot)
    }

    /// Applies one key to a grid of `resources` columns and `slots` rows.
    pub fn handle(&mut self, key: KeyCommand, resources: usize, slots: usize) -> KeyOutcome {
        if resources == 0 || slots == 0 {
            return KeyOutcome::Ignored;
        }
        let before = self.focus;
        match key {
            KeyCommand::Up => self.focus.slot = self.focus.slot.saturating_sub(1),
            KeyCommand::Down => self.focus.slot = (self.focus.slot + 1).min(slots - 1),
            KeyCommand::Left => self.focus.resource = self.focus.resource.saturating_sub(1),
            KeyCommand::Right => self.focus.resource = (self.focus.resource + 1).min(resources - 1),
            KeyCommand::Activate => return self.activate(),
            KeyCommand::Escape => {
                return if self.anchor.take().is_some() {
                    KeyOutcome::Cancelled
                } else {
                    KeyOutcome::Ignored
                };
            }
        }
        if self.focus == before {
            KeyOutcome::Ignored
        } else {
            KeyOutcome::Moved(self.focus)
        }
    }

    fn activate(&mut self) -> KeyOutcome {
        match self.anchor.take() {
            Some(anchor) => KeyOutcome::Completed {
                resource: self.focus.resource,
                start_slot: anchor.slot.min(self.focus.slot),
                end_slot: anchor.slot.max(self.focus.slot),
            },
            None => {
                self.anchor = Some(self.focus);
                KeyOutcome::Anchored(self.focus)
            }
        }
    }
}

/// Selection-grid slots covered by the inclusive display range
/// `start..=end`.
///
/// The end is the last selection slot that starts inside display slot `end`.
#[must_use]
pub fn display_range_to_selection(grids: &SlotGrids, start: usize, end: usize) -> (usize, usize) {
    let first = grids.convert(start, GridSpace::Display, GridSpace::Selection);
    let last_selection = grids.len(GridSpace::Selection).saturating_sub(1);
    let last = match grids.slot(GridSpace::Display, end) {
        Some(slot) => {
            let next = slot.total_minutes() + grids.interval(GridSpace::Display);
            grids
                .index_at_minutes(GridSpace::Selection, next)
                .map_or(last_selection, |i| i.saturating_sub(1))
                .min(last_selection)
        }
        None => last_selection,
    };
    (first, last.max(first))
}
