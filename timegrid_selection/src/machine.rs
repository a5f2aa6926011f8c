// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;

use timegrid_slots::{GridSpace, SlotGrids};
use timegrid_timing::{TimerId, TimerQueue};

/// Index space of every committed selection.
///
/// Committed slot indices count selection-granularity slots from the start of
/// the range. Hosts recover wall-clock times by looking the indices up in the
/// selection grid, or equivalently as `start + index * granularity` minutes.
pub const REPORT_SPACE: GridSpace = GridSpace::Selection;

/// Delay before a committed selection is cleared when auto-clear is on.
pub const DEFAULT_AUTO_CLEAR_MS: u64 = 200;

/// Phase of a [`SelectionMachine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectionPhase {
    /// Nothing is selected.
    Idle,
    /// A single slot is pressed.
    Pressed,
    /// A drag is in progress.
    Dragging,
    /// A committed selection is still highlighted.
    Retained,
}

/// The range under an active or retained drag, in selection-grid indices.
///
/// `start_slot` is where the drag began and `end_slot` follows the pointer, so
/// `end_slot < start_slot` is normal while dragging upwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSelection<R> {
    /// Resource (column) the drag belongs to.
    pub resource: R,
    /// Slot where the drag started.
    pub start_slot: usize,
    /// Slot under the pointer.
    pub end_slot: usize,
}

impl<R> DragSelection<R> {
    /// `(min, max)` of the two slots.
    #[must_use]
    pub fn normalized(&self) -> (usize, usize) {
        if self.start_slot <= self.end_slot {
            (self.start_slot, self.end_slot)
        } else {
            (self.end_slot, self.start_slot)
        }
    }

    /// Returns `true` if `slot` lies within the (normalized) range.
    #[must_use]
    pub fn contains(&self, slot: usize) -> bool {
        let (start, end) = self.normalized();
        (start..=end).contains(&slot)
    }
}

/// A selection handed to the host's selection callback.
///
/// `start_slot <= end_slot`, both in [`REPORT_SPACE`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommittedSelection<R> {
    /// Resource the range belongs to.
    pub resource: R,
    /// First slot of the range.
    pub start_slot: usize,
    /// Last slot of the range (inclusive).
    pub end_slot: usize,
}

/// Single-range selection state machine for a time grid.
#[derive(Clone, Debug)]
pub struct SelectionMachine<R> {
    phase: SelectionPhase,
    pressed: Option<(R, usize)>,
    drag: Option<DragSelection<R>>,
    clear_after_commit: bool,
    auto_clear_delay_ms: u64,
    timers: TimerQueue<u64>,
    pending_clear: Option<TimerId>,
    revision: u64,
}

impl<R> Default for SelectionMachine<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> SelectionMachine<R> {
    /// Creates an idle machine that clears committed selections after
    /// [`DEFAULT_AUTO_CLEAR_MS`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: SelectionPhase::Idle,
            pressed: None,
            drag: None,
            clear_after_commit: true,
            auto_clear_delay_ms: DEFAULT_AUTO_CLEAR_MS,
            timers: TimerQueue::new(),
            pending_clear: None,
            revision: 0,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase == SelectionPhase::Dragging
    }

    /// The active or retained drag range, if any.
    #[must_use]
    pub fn drag(&self) -> Option<&DragSelection<R>> {
        self.drag.as_ref()
    }

    /// The pressed slot, if the machine is [`SelectionPhase::Pressed`].
    #[must_use]
    pub fn pressed_slot(&self) -> Option<(&R, usize)> {
        self.pressed.as_ref().map(|(resource, slot)| (resource, *slot))
    }

    /// Normalized range to highlight, in selection-grid indices.
    ///
    /// Covers both an in-progress drag and a retained selection.
    #[must_use]
    pub fn highlighted_range(&self) -> Option<(&R, usize, usize)> {
        let drag = self.drag.as_ref()?;
        let (start, end) = drag.normalized();
        Some((&drag.resource, start, end))
    }

    /// Revision counter; bumps whenever the visible selection changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` if committed selections are cleared after a delay.
    #[must_use]
    pub fn clear_after_commit(&self) -> bool {
        self.clear_after_commit
    }

    /// Chooses between auto-clearing and retaining committed selections.
    ///
    /// Does not affect a clear that is already scheduled.
    pub fn set_clear_after_commit(&mut self, clear: bool) {
        self.clear_after_commit = clear;
    }

    /// Delay between a commit and its auto-clear.
    #[must_use]
    pub fn auto_clear_delay_ms(&self) -> u64 {
        self.auto_clear_delay_ms
    }

    /// Sets the delay between a commit and its auto-clear.
    pub fn set_auto_clear_delay_ms(&mut self, delay_ms: u64) {
        self.auto_clear_delay_ms = delay_ms;
    }

    /// Deadline of the pending auto-clear, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Fires a due auto-clear.
    ///
    /// Returns `true` if the selection was cleared. A timer scheduled for an
    /// older revision is discarded without touching the selection.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let mut cleared = false;
        while let Some((id, scheduled_revision)) = self.timers.pop_due(now_ms) {
            if self.pending_clear == Some(id) {
                self.pending_clear = None;
            }
            if scheduled_revision != self.revision {
                log::trace!("discarding stale auto-clear for revision {scheduled_revision}");
                continue;
            }
            log::debug!("auto-clearing committed selection");
            self.reset_state();
            cleared = true;
        }
        cleared
    }

    /// Abandons a drag in progress (for example when the pan is cancelled).
    ///
    /// Returns `true` if a drag was abandoned.
    pub fn cancel_drag(&mut self) -> bool {
        if self.phase != SelectionPhase::Dragging {
            return false;
        }
        log::debug!("drag cancelled");
        self.reset_state();
        true
    }

    /// Clears everything and cancels a pending auto-clear.
    pub fn clear(&mut self) {
        self.cancel_pending_clear();
        if self.phase == SelectionPhase::Idle {
            return;
        }
        self.reset_state();
    }

    /// Cancels all timers; used on teardown.
    pub fn cancel_timers(&mut self) {
        self.timers.clear();
        self.pending_clear = None;
    }

    fn reset_state(&mut self) {
        self.phase = SelectionPhase::Idle;
        self.pressed = None;
        self.drag = None;
        self.bump_revision();
    }

    fn cancel_pending_clear(&mut self) {
        if let Some(id) = self.pending_clear.take() {
            self.timers.cancel(id);
        }
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<R> SelectionMachine<R>
where
    R: Clone + PartialEq + Debug,
{
    /// Presses a single slot without committing it.
    ///
    /// Replaces any pressed slot or retained selection. Ignored while dragging.
    pub fn press(&mut self, resource: R, slot: usize) -> bool {
        if self.phase == SelectionPhase::Dragging {
            log::trace!("press ignored while dragging");
            return false;
        }
        if self.phase == SelectionPhase::Pressed
            && self.pressed.as_ref() == Some(&(resource.clone(), slot))
        {
            return false;
        }
        self.cancel_pending_clear();
        log::debug!("pressed {resource:?} slot {slot}");
        self.phase = SelectionPhase::Pressed;
        self.drag = None;
        self.pressed = Some((resource, slot));
        self.bump_revision();
        true
    }

    /// Starts a drag at `slot` of `resource`.
    ///
    /// Valid from Idle, Pressed and Retained; any other selection is
    /// abandoned and a pending auto-clear is cancelled. Returns `false` (and
    /// changes nothing) while another drag is in progress.
    pub fn start_drag(&mut self, resource: R, slot: usize) -> bool {
        if self.phase == SelectionPhase::Dragging {
            log::trace!("start_drag ignored: a drag is already in progress");
            return false;
        }
        self.cancel_pending_clear();
        log::debug!("drag started on {resource:?} at slot {slot}");
        self.phase = SelectionPhase::Dragging;
        self.pressed = None;
        self.drag = Some(DragSelection {
            resource,
            start_slot: slot,
            end_slot: slot,
        });
        self.bump_revision();
        true
    }

    /// Moves the end of the active drag to `end_slot`.
    ///
    /// Returns `true` if the range changed. Ignored outside of a drag.
    pub fn update_drag(&mut self, end_slot: usize) -> bool {
        if self.phase != SelectionPhase::Dragging {
            return false;
        }
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        if drag.end_slot == end_slot {
            return false;
        }
        drag.end_slot = end_slot;
        self.bump_revision();
        true
    }

    /// Commits the active drag.
    ///
    /// The range is normalized to `(min, max)` and moved into [`REPORT_SPACE`].
    /// Afterwards the selection is retained and, when auto-clear is on, a clear
    /// is scheduled `auto_clear_delay_ms` after `now_ms`.
    pub fn complete_drag(&mut self, grids: &SlotGrids, now_ms: u64) -> Option<CommittedSelection<R>> {
        if self.phase != SelectionPhase::Dragging {
            log::trace!("complete_drag ignored in {:?}", self.phase);
            return None;
        }
        let drag = self.drag.as_ref()?;
        let (start, end) = drag.normalized();
        let committed = CommittedSelection {
            resource: drag.resource.clone(),
            start_slot: grids.convert(start, GridSpace::Selection, REPORT_SPACE),
            end_slot: grids.convert(end, GridSpace::Selection, REPORT_SPACE),
        };
        log::debug!(
            "drag committed on {:?}: {}..={}",
            committed.resource,
            committed.start_slot,
            committed.end_slot
        );
        self.retain(now_ms);
        Some(committed)
    }

    /// Commits a single tapped slot.
    ///
    /// The slot is a selection-grid index and is reported as is, with
    /// `start_slot == end_slot`. Ignored while dragging.
    pub fn commit_tap(&mut self, resource: R, slot: usize, now_ms: u64) -> Option<CommittedSelection<R>> {
        if self.phase == SelectionPhase::Dragging {
            log::trace!("tap ignored while dragging");
            return None;
        }
        self.cancel_pending_clear();
        self.pressed = None;
        self.drag = Some(DragSelection {
            resource: resource.clone(),
            start_slot: slot,
            end_slot: slot,
        });
        self.bump_revision();
        log::debug!("tap committed on {resource:?} at slot {slot}");
        self.retain(now_ms);
        Some(CommittedSelection {
            resource,
            start_slot: slot,
            end_slot: slot,
        })
    }

    fn retain(&mut self, now_ms: u64) {
        self.phase = SelectionPhase::Retained;
        if self.clear_after_commit {
            let deadline = now_ms.saturating_add(self.auto_clear_delay_ms);
            self.pending_clear = Some(self.timers.schedule(deadline, self.revision));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grids() -> SlotGrids {
        SlotGrids::from_hours(9, 17, 60, Some(15)).unwrap()
    }

    #[test]
    fn drag_normalizes_on_commit() {
        let mut machine = SelectionMachine::new();
        assert!(machine.start_drag("a", 10));
        assert!(machine.update_drag(3));
        // Unordered while dragging.
        assert_eq!(machine.drag().unwrap().start_slot, 10);
        assert_eq!(machine.drag().unwrap().end_slot, 3);

        let committed = machine.complete_drag(&grids(), 0).unwrap();
        assert_eq!(
            committed,
            CommittedSelection {
                resource: "a",
                start_slot: 3,
                end_slot: 10
            }
        );
    }

    #[test]
    fn update_outside_drag_is_ignored() {
        let mut machine = SelectionMachine::<&str>::new();
        assert!(!machine.update_drag(4));
        assert_eq!(machine.phase(), SelectionPhase::Idle);
        assert_eq!(machine.complete_drag(&grids(), 0), None);
    }

    #[test]
    fn start_on_other_resource_abandons_retained() {
        let mut machine = SelectionMachine::new();
        machine.set_clear_after_commit(false);
        machine.start_drag("a", 1);
        machine.complete_drag(&grids(), 0);
        assert_eq!(machine.phase(), SelectionPhase::Retained);

        machine.start_drag("b", 7);
        assert_eq!(machine.highlighted_range(), Some((&"b", 7, 7)));
    }

    #[test]
    fn second_start_during_drag_is_rejected() {
        let mut machine = SelectionMachine::new();
        machine.start_drag("a", 1);
        assert!(!machine.start_drag("b", 2));
        assert_eq!(machine.drag().unwrap().resource, "a");
    }

    #[test]
    fn stale_auto_clear_does_not_clear_new_selection() {
        let mut machine = SelectionMachine::new();
        machine.start_drag("a", 1);
        machine.complete_drag(&grids(), 1_000);

        // A new drag starts before the timer fires.
        machine.start_drag("a", 5);
        assert!(!machine.tick(1_000 + DEFAULT_AUTO_CLEAR_MS));
        assert_eq!(machine.phase(), SelectionPhase::Dragging);
    }

    #[test]
    fn auto_clear_fires_after_delay() {
        let mut machine = SelectionMachine::new();
        machine.start_drag("a", 1);
        machine.complete_drag(&grids(), 1_000);
        assert!(!machine.tick(1_199));
        assert_eq!(machine.phase(), SelectionPhase::Retained);
        assert!(machine.tick(1_200));
        assert_eq!(machine.phase(), SelectionPhase::Idle);
        assert_eq!(machine.highlighted_range(), None);
    }

    #[test]
    fn retained_selection_survives_without_auto_clear() {
        let mut machine = SelectionMachine::new();
        machine.set_clear_after_commit(false);
        machine.start_drag("a", 1);
        machine.complete_drag(&grids(), 0);
        assert_eq!(machine.next_deadline(), None);
        assert!(!machine.tick(u64::MAX));
        assert_eq!(machine.phase(), SelectionPhase::Retained);
        machine.clear();
        assert_eq!(machine.phase(), SelectionPhase::Idle);
    }

    #[test]
    fn tap_commits_single_slot() {
        let mut machine = SelectionMachine::new();
        machine.press("a", 4);
        assert_eq!(machine.pressed_slot(), Some((&"a", 4)));
        let committed = machine.commit_tap("a", 4, 0).unwrap();
        assert_eq!((committed.start_slot, committed.end_slot), (4, 4));
        assert_eq!(machine.pressed_slot(), None);
    }

    #[test]
    fn revision_bumps_only_on_change() {
        let mut machine = SelectionMachine::new();
        machine.clear();
        assert_eq!(machine.revision(), 0);
        machine.start_drag("a", 2);
        let after_start = machine.revision();
        assert!(!machine.update_drag(2));
        assert_eq!(machine.revision(), after_start);
        machine.update_drag(3);
        assert_eq!(machine.revision(), after_start + 1);
    }

    #[test]
    fn cancel_drag_returns_to_idle() {
        let mut machine = SelectionMachine::new();
        machine.start_drag("a", 2);
        assert!(machine.cancel_drag());
        assert_eq!(machine.phase(), SelectionPhase::Idle);
        assert!(!machine.cancel_drag());
    }
}
