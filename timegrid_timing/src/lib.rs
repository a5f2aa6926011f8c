// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timegrid Timing: host-clocked time primitives.
//!
//! Nothing in this crate reads a clock. Hosts pass a monotonic timestamp in
//! milliseconds into every call, which keeps the primitives deterministic and
//! easy to test.
//!
//! - [`Throttle`] admits at most one event per interval.
//! - [`TimerQueue`] holds cancellable one-shot deadlines with a payload; hosts
//!   drain due timers with [`TimerQueue::pop_due`] whenever their clock ticks.
//!
//! ## Minimal example
//!
//! ```rust
//! use timegrid_timing::{Throttle, TimerQueue};
//!
//! let mut throttle = Throttle::new(33);
//! assert!(throttle.admit(1_000));
//! assert!(!throttle.admit(1_010));
//! assert!(throttle.admit(1_033));
//!
//! let mut timers = TimerQueue::new();
//! let id = timers.schedule(1_200, "clear");
//! assert_eq!(timers.next_deadline(), Some(1_200));
//! assert_eq!(timers.pop_due(1_100), None);
//! assert_eq!(timers.pop_due(1_200), Some((id, "clear")));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod queue;
mod throttle;

pub use queue::{TimerId, TimerQueue};
pub use throttle::Throttle;
