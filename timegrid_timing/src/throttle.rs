// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Admits at most one event per `interval_ms`.
///
/// The first event is always admitted. Later events are admitted once at
/// least `interval_ms` have passed since the last admitted one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Throttle {
    interval_ms: u64,
    last: Option<u64>,
}

impl Throttle {
    /// Creates a throttle; an interval of `0` admits everything.
    #[must_use]
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last: None,
        }
    }

    /// Minimum spacing between admitted events.
    #[must_use]
    pub const fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Returns `true` and records `now_ms` if an event may pass.
    ///
    /// A clock that went backwards admits the event and restarts the window.
    pub fn admit(&mut self, now_ms: u64) -> bool {
        let admitted = match self.last {
            None => true,
            Some(last) if now_ms < last => true,
            Some(last) => now_ms - last >= self.interval_ms,
        };
        if admitted {
            self.last = Some(now_ms);
        }
        admitted
    }

    /// Forgets the last admitted event so the next one passes.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
