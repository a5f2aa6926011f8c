// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::TimelineError;

/// Kinds of haptic feedback a host may play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HapticPattern {
    /// Light impact.
    Light,
    /// Medium impact; played when a drag selection starts.
    Medium,
    /// Heavy impact.
    Heavy,
    /// Success notification; played when a selection is committed.
    Success,
    /// Warning notification.
    Warning,
    /// Error notification.
    Error,
    /// Selection tick; played when a drag crosses into a new slot.
    Selection,
}

/// Callbacks from a [`Timeline`](crate::Timeline) to its host.
///
/// Slot indices passed to [`on_time_slot_select`](Self::on_time_slot_select)
/// are selection-grid indices (see [`REPORT_SPACE`](crate::REPORT_SPACE)),
/// inclusive at both ends.
pub trait TimelineHandler {
    /// A range was committed on `resource_id`.
    fn on_time_slot_select(&mut self, resource_id: &str, start_slot: usize, end_slot: usize);

    /// Something went wrong. The timeline keeps running.
    fn on_error(&mut self, error: &TimelineError);

    /// Haptic feedback request. Only sent when haptics are enabled.
    fn on_haptic(&mut self, pattern: HapticPattern) {
        let _ = pattern;
    }
}

/// A handler that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHandler;

impl TimelineHandler for NoopHandler {
    fn on_time_slot_select(&mut self, _resource_id: &str, _start_slot: usize, _end_slot: usize) {}

    fn on_error(&mut self, error: &TimelineError) {
        log::debug!("unhandled timeline error: {error}");
    }
}
