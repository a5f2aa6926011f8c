// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timegrid Virtual: virtualization windows for timeline grids.
//!
//! A resource timeline can have hundreds of slot rows and dozens of resource
//! columns. This crate decides which of them are realized:
//!
//! - [`RowVirtualizer`] windows the slot rows of a column, with an overscan of
//!   [`DEFAULT_OVERSCAN`] rows on each side, and computes scroll targets via
//!   [`ScrollAlign`].
//! - [`ColumnVirtualizer`] windows resource columns once their count exceeds
//!   [`DEFAULT_COLUMN_THRESHOLD`]; below it, a fast path realizes everything.
//!
//! Both return a [`VirtualWindow`]: a `[start, end)` index range plus the spacer
//! extents standing in for the unrealized items. Windows are recomputed from
//! scratch on every call.
//!
//! ## Minimal example
//!
//! ```rust
//! use timegrid_virtual::{ColumnVirtualizer, RowVirtualizer, ScrollAlign};
//!
//! // 96 quarter-hour rows of 20px in a 400px viewport.
//! let mut rows = RowVirtualizer::new(96, 20.0_f64, 400.0);
//! rows.scroll_to_index(40, ScrollAlign::Start);
//! let window = rows.window();
//! assert!(window.contains(40));
//! assert_eq!(window.leading_offset, window.start as f64 * 20.0);
//!
//! // Four columns: no virtualization.
//! let columns = ColumnVirtualizer::new(4, 120.0_f64, 300.0);
//! assert!(!columns.window().is_virtualized);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod columns;
mod rows;
mod scalar;
mod window;

pub use columns::{
    ColumnVirtualizer, ColumnWindow, DEFAULT_COLUMN_BUFFER, DEFAULT_COLUMN_THRESHOLD,
};
pub use rows::{DEFAULT_OVERSCAN, RowVirtualizer};
pub use scalar::Scalar;
pub use window::{ScrollAlign, VirtualWindow};
