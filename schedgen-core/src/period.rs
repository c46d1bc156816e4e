//! Class periods within a day's schedule.

use std::fmt;

use chrono::NaiveTime;

/// Identifier in the first column of a schedule sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PeriodId {
    /// Numbered class period ("1" in the sheet, "Core 1" on the calendar)
    Core(u8),
    FamilyGroup,
    /// Anything else ("Lunch", "Assembly", ...) is shown as written
    Label(String),
}

impl PeriodId {
    /// Parse an identifier given as text.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        match raw.parse::<u8>() {
            Ok(n) if n > 0 => return PeriodId::Core(n),
            _ => {}
        }

        if raw.eq_ignore_ascii_case("family group") {
            return PeriodId::FamilyGroup;
        }

        PeriodId::Label(raw.to_string())
    }

    /// Parse an identifier stored as a number cell.
    pub fn from_number(n: f64) -> Option<Self> {
        if n.fract() == 0.0 && n >= 1.0 && n <= f64::from(u8::MAX) {
            Some(PeriodId::Core(n as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for PeriodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodId::Core(n) => write!(f, "Core {}", n),
            PeriodId::FamilyGroup => write!(f, "Family Group"),
            PeriodId::Label(label) => write!(f, "{}", label),
        }
    }
}

/// One row of a schedule sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodSlot {
    pub period: PeriodId,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl PeriodSlot {
    pub fn new(period: PeriodId, start: NaiveTime, end: NaiveTime) -> Self {
        PeriodSlot { period, start, end }
    }
}
