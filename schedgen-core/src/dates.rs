//! The date table: which color each school day is.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::color::ColorTag;
use crate::error::{SchedGenError, SchedGenResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColor {
    pub date: NaiveDate,
    pub tag: ColorTag,
}

impl DayColor {
    pub fn new(date: NaiveDate, tag: ColorTag) -> Self {
        DayColor { date, tag }
    }
}

/// Days in sheet order. Each date appears at most once.
#[derive(Debug, Clone, Default)]
pub struct DateTable {
    days: Vec<DayColor>,
}

/// Answer to "what color is it?" for a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhatColor {
    /// School has not started yet
    DaysUntilSchool(i64),
    Today(ColorTag),
    DateNotFound,
}

impl DateTable {
    /// Build a table, rejecting repeated dates.
    pub fn new(days: Vec<DayColor>) -> SchedGenResult<Self> {
        let mut seen = HashSet::new();
        for day in &days {
            if !seen.insert(day.date) {
                return Err(SchedGenError::DuplicateDate(day.date));
            }
        }
        Ok(DateTable { days })
    }

    pub fn days(&self) -> &[DayColor] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayColor> {
        self.days.iter().find(|d| d.date == date)
    }

    /// The first row marks the first day of school.
    pub fn what_color(&self, today: NaiveDate) -> WhatColor {
        let Some(first) = self.days.first() else {
            return WhatColor::DateNotFound;
        };

        if first.date > today {
            return WhatColor::DaysUntilSchool((first.date - today).num_days());
        }

        match self.get(today) {
            Some(day) => WhatColor::Today(day.tag.clone()),
            None => WhatColor::DateNotFound,
        }
    }
}
