//! Period lists per day color.

use std::collections::HashMap;

use crate::color::ColorTag;
use crate::period::PeriodSlot;

/// Schedules keyed by the tag of the sheet they were read from.
///
/// Only tags present here are real schedules. Days with any other tag get a
/// single all-day label event.
#[derive(Debug, Clone, Default)]
pub struct ScheduleTable {
    schedules: HashMap<ColorTag, Vec<PeriodSlot>>,
}

impl ScheduleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the schedule for a tag. Slot order is kept.
    pub fn insert(&mut self, tag: ColorTag, slots: Vec<PeriodSlot>) {
        self.schedules.insert(tag, slots);
    }

    pub fn get(&self, tag: &ColorTag) -> Option<&[PeriodSlot]> {
        self.schedules.get(tag).map(Vec::as_slice)
    }

    pub fn contains(&self, tag: &ColorTag) -> bool {
        self.schedules.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Tags with a schedule, sorted by their sheet spelling.
    pub fn tags(&self) -> Vec<&ColorTag> {
        let mut tags: Vec<_> = self.schedules.keys().collect();
        tags.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        tags
    }
}
