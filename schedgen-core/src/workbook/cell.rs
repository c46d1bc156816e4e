//! Cell values and their interpretation as dates, times and periods.

use calamine::{ExcelDateTime, ExcelDateTimeType};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::period::PeriodId;

/// Text formats accepted for date cells typed as text.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];

/// Text formats accepted for time cells typed as text.
const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M:%S %p", "%I:%M%p"];

/// A single spreadsheet value.
///
/// Cells the spreadsheet formats as dates or times arrive already converted.
/// Plain numbers read as dates or times are taken as serials in the 1900
/// date system.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    /// Time of day or duration cell
    Time(NaiveTime),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    pub fn date(date: NaiveDate) -> Self {
        Cell::DateTime(NaiveDateTime::from(date))
    }

    pub fn time(time: NaiveTime) -> Self {
        Cell::Time(time)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Trimmed text of the cell. Whole numbers render without a fraction.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Cell::Number(n) if n.fract() == 0.0 => Some(format!("{}", *n as i64)),
            Cell::Number(n) => Some(n.to_string()),
            Cell::Bool(b) => Some(b.to_string()),
            Cell::DateTime(dt) => Some(dt.to_string()),
            Cell::Time(t) => Some(t.format("%H:%M").to_string()),
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::DateTime(dt) => Some(dt.date()),
            Cell::Number(n) if *n >= 1.0 => serial_datetime(*n).map(|dt| dt.date()),
            Cell::Text(s) => parse_date_text(s.trim()),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            Cell::Time(t) => Some(*t),
            Cell::DateTime(dt) => Some(dt.time()),
            Cell::Number(n) if *n >= 0.0 => serial_datetime(*n).map(|dt| dt.time()),
            Cell::Text(s) => parse_time_text(s.trim()),
            _ => None,
        }
    }

    pub fn as_period(&self) -> Option<PeriodId> {
        match self {
            Cell::Number(n) => PeriodId::from_number(*n),
            _ => self.as_text().map(|s| PeriodId::parse(&s)),
        }
    }
}

fn serial_datetime(serial: f64) -> Option<NaiveDateTime> {
    ExcelDateTime::new(serial, ExcelDateTimeType::DateTime, false).as_datetime()
}

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| s.parse::<NaiveDateTime>().ok().map(|dt| dt.date()))
}

fn parse_time_text(s: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .or_else(|| s.parse::<NaiveDateTime>().ok().map(|dt| dt.time()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_serial_numbers() {
        // 43164 is 2018-03-05 in spreadsheet serial form
        assert_eq!(Cell::Number(43164.0).as_date(), Some(date(2018, 3, 5)));
        assert_eq!(Cell::Number(43164.75).as_date(), Some(date(2018, 3, 5)));
        assert_eq!(Cell::Number(43164.75).as_time(), Some(time(18, 0)));
        assert_eq!(Cell::Number(1.0 + 1.0 / 3.0).as_time(), Some(time(8, 0)));
    }

    #[test]
    fn test_typed_cells() {
        assert_eq!(Cell::date(date(2018, 3, 5)).as_date(), Some(date(2018, 3, 5)));
        assert_eq!(Cell::time(time(8, 55)).as_time(), Some(time(8, 55)));
        assert_eq!(Cell::time(time(8, 55)).as_date(), None);
    }

    #[test]
    fn test_text_dates() {
        assert_eq!(Cell::text("2018-03-05").as_date(), Some(date(2018, 3, 5)));
        assert_eq!(Cell::text("3/5/2018").as_date(), Some(date(2018, 3, 5)));
        assert_eq!(Cell::text("2018-03-05T00:00:00").as_date(), Some(date(2018, 3, 5)));
        assert_eq!(Cell::text("Date").as_date(), None);
        assert_eq!(Cell::Empty.as_date(), None);
    }

    #[test]
    fn test_text_times() {
        assert_eq!(Cell::text("8:00").as_time(), Some(time(8, 0)));
        assert_eq!(Cell::text("13:45:00").as_time(), Some(time(13, 45)));
        assert_eq!(Cell::text("1:45 PM").as_time(), Some(time(13, 45)));
        assert_eq!(Cell::text("soon").as_time(), None);
    }

    #[test]
    fn test_periods_from_cells() {
        assert_eq!(Cell::Number(2.0).as_period(), Some(PeriodId::Core(2)));
        assert_eq!(Cell::text("2").as_period(), Some(PeriodId::Core(2)));
        assert_eq!(Cell::text("Family Group").as_period(), Some(PeriodId::FamilyGroup));
        assert_eq!(Cell::text("   ").as_period(), None);
    }
}
