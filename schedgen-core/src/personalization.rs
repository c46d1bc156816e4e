//! User-chosen class titles and locations.
//!
//! The personalization sheet is a fixed block of rows: seven core periods,
//! family group, then the accelerated term slots. Rows are addressed through
//! [`PersonalizationKey`] instead of raw offsets.

use std::collections::HashMap;

use crate::period::PeriodId;

/// Number of numbered core periods in the base block.
pub const CORE_PERIODS: u8 = 7;
/// Number of accelerated term slots after the base block.
pub const ACCELERATED_SLOTS: u8 = 6;
/// Rows in the base block (core periods + family group).
pub const BASE_BLOCK_ROWS: usize = CORE_PERIODS as usize + 1;
/// Rows in a complete personalization sheet.
pub const TABLE_ROWS: usize = BASE_BLOCK_ROWS + ACCELERATED_SLOTS as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PersonalizationKey {
    Core(u8),
    FamilyGroup,
    AcceleratedTerm(u8),
}

impl PersonalizationKey {
    /// Row of this key in the personalization sheet (0-based).
    pub fn position(self) -> usize {
        match self {
            PersonalizationKey::Core(n) => usize::from(n) - 1,
            PersonalizationKey::FamilyGroup => BASE_BLOCK_ROWS - 1,
            PersonalizationKey::AcceleratedTerm(n) => BASE_BLOCK_ROWS + usize::from(n) - 1,
        }
    }

    /// Inverse of [`position`](Self::position).
    pub fn from_position(position: usize) -> Option<Self> {
        let core = usize::from(CORE_PERIODS);
        match position {
            p if p < core => Some(PersonalizationKey::Core(p as u8 + 1)),
            p if p == core => Some(PersonalizationKey::FamilyGroup),
            p if p < TABLE_ROWS => Some(PersonalizationKey::AcceleratedTerm(
                (p - BASE_BLOCK_ROWS) as u8 + 1,
            )),
            _ => None,
        }
    }

    /// Key used to personalize a period of a regular or accelerated term
    /// schedule. Returns `None` when no row exists for the period.
    pub fn for_period(period: &PeriodId, accelerated: bool) -> Option<Self> {
        match (period, accelerated) {
            (PeriodId::Core(n), false) if (1..=CORE_PERIODS).contains(n) => {
                Some(PersonalizationKey::Core(*n))
            }
            (PeriodId::FamilyGroup, false) => Some(PersonalizationKey::FamilyGroup),
            (PeriodId::Core(n), true) if (1..=ACCELERATED_SLOTS).contains(n) => {
                Some(PersonalizationKey::AcceleratedTerm(*n))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalizationEntry {
    pub title: String,
    pub location: String,
}

impl PersonalizationEntry {
    pub fn new(title: impl Into<String>, location: impl Into<String>) -> Self {
        PersonalizationEntry {
            title: title.into(),
            location: location.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Personalization {
    entries: HashMap<PersonalizationKey, PersonalizationEntry>,
}

impl Personalization {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from sheet rows in canonical order. Rows past the known block
    /// are ignored.
    pub fn from_rows(rows: impl IntoIterator<Item = PersonalizationEntry>) -> Self {
        let entries = rows
            .into_iter()
            .enumerate()
            .filter_map(|(i, entry)| Some((PersonalizationKey::from_position(i)?, entry)))
            .collect();
        Personalization { entries }
    }

    pub fn insert(&mut self, key: PersonalizationKey, entry: PersonalizationEntry) {
        self.entries.insert(key, entry);
    }

    pub fn get(&self, key: PersonalizationKey) -> Option<&PersonalizationEntry> {
        self.entries.get(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Custom title for a period, or `""` when none was set.
    pub fn resolve_title(&self, period: &PeriodId, accelerated: bool) -> &str {
        PersonalizationKey::for_period(period, accelerated)
            .and_then(|key| self.get(key))
            .map(|entry| entry.title.trim())
            .unwrap_or("")
    }

    /// Custom location for a period, or `""` when none was set.
    /// Accelerated term slots have no locations.
    pub fn resolve_location(&self, period: &PeriodId) -> &str {
        PersonalizationKey::for_period(period, false)
            .and_then(|key| self.get(key))
            .map(|entry| entry.location.trim())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_table() -> Personalization {
        Personalization::from_rows(
            (0..TABLE_ROWS).map(|i| PersonalizationEntry::new(format!("title {i}"), format!("room {i}"))),
        )
    }

    #[test]
    fn test_positions_match_sheet_layout() {
        assert_eq!(PersonalizationKey::FamilyGroup.position(), 7);
        assert_eq!(PersonalizationKey::Core(3).position(), 2);
        assert_eq!(PersonalizationKey::AcceleratedTerm(2).position(), 9);

        for position in 0..TABLE_ROWS {
            let key = PersonalizationKey::from_position(position).unwrap();
            assert_eq!(key.position(), position);
        }
        assert_eq!(PersonalizationKey::from_position(TABLE_ROWS), None);
    }

    #[test]
    fn test_resolve_title_by_block() {
        let table = full_table();

        assert_eq!(table.resolve_title(&PeriodId::Core(3), false), "title 2");
        assert_eq!(table.resolve_title(&PeriodId::FamilyGroup, false), "title 7");
        assert_eq!(table.resolve_title(&PeriodId::Core(2), true), "title 9");
    }

    #[test]
    fn test_unresolvable_periods_are_empty() {
        let table = full_table();

        assert_eq!(table.resolve_title(&PeriodId::Core(8), false), "");
        assert_eq!(table.resolve_title(&PeriodId::Core(7), true), "");
        assert_eq!(table.resolve_title(&PeriodId::FamilyGroup, true), "");
        assert_eq!(table.resolve_title(&PeriodId::Label("Lunch".into()), false), "");
        assert_eq!(Personalization::new().resolve_title(&PeriodId::Core(1), false), "");
    }

    #[test]
    fn test_location_only_from_base_block() {
        let table = full_table();

        assert_eq!(table.resolve_location(&PeriodId::Core(1)), "room 0");
        assert_eq!(table.resolve_location(&PeriodId::FamilyGroup), "room 7");
        assert_eq!(table.resolve_location(&PeriodId::Label("Lunch".into())), "");
    }

    #[test]
    fn test_extra_rows_are_ignored() {
        let table = Personalization::from_rows(
            (0..TABLE_ROWS + 3).map(|i| PersonalizationEntry::new(i.to_string(), "")),
        );
        assert_eq!(table.len(), TABLE_ROWS);
    }
}
