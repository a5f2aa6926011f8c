// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use timegrid_slots::{GridSpace, SlotGrids, WorkingSlots};

/// One column of the timeline.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Resource {
    /// Stable identifier reported in selections.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Working hours per date, as `"HH:MM-HH:MM"` ranges.
    #[serde(default)]
    pub working_hours: BTreeMap<NaiveDate, Vec<String>>,
}

impl Resource {
    /// A resource without working hours.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            working_hours: BTreeMap::new(),
        }
    }

    /// Adds working hours for `date`.
    #[must_use]
    pub fn with_working_hours<S: Into<String>>(
        mut self,
        date: NaiveDate,
        ranges: impl IntoIterator<Item = S>,
    ) -> Self {
        self.working_hours
            .insert(date, ranges.into_iter().map(Into::into).collect());
        self
    }

    /// Working-hours annotation of the display grid on `date`.
    ///
    /// A date without an entry has no working slots.
    #[must_use]
    pub fn working_slots(&self, date: NaiveDate, grids: &SlotGrids) -> WorkingSlots {
        match self.working_hours.get(&date) {
            Some(ranges) => WorkingSlots::from_ranges(ranges.as_slice(), grids),
            None => WorkingSlots::none(grids.len(GridSpace::Display)),
        }
    }
}
