//! Calendar events as seen by the reconciler.
//!
//! Backends convert their native representation into these types. The
//! reconciler only ever creates and deletes events, it never edits one.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::color::DisplayColor;

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub uid: String,
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    pub color: Option<DisplayColor>,
    pub reminders: Vec<Reminder>,
}

/// A popup reminder, `minutes` before the event starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reminder {
    pub minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTime {
    /// All-day (DTSTART;VALUE=DATE)
    Date(NaiveDate),
    DateTimeUtc(DateTime<Utc>),
    /// Local time without a timezone
    DateTimeFloating(NaiveDateTime),
    /// Local time in a named timezone (DTSTART;TZID=...)
    DateTimeZoned { datetime: NaiveDateTime, tzid: String },
}

impl Event {
    /// A new timed event with a fresh uid.
    pub fn timed(summary: impl Into<String>, start: EventTime, end: EventTime) -> Self {
        Event {
            uid: format!("{}@schedgen", uuid::Uuid::new_v4()),
            summary: summary.into(),
            description: None,
            location: None,
            start,
            end,
            color: None,
            reminders: Vec::new(),
        }
    }

    /// A new event covering the whole of `date`.
    pub fn all_day(summary: impl Into<String>, date: NaiveDate) -> Self {
        let end = date.checked_add_signed(Duration::days(1)).unwrap_or(date);
        Self::timed(summary, EventTime::Date(date), EventTime::Date(end))
    }

    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    pub fn with_color(mut self, color: Option<DisplayColor>) -> Self {
        self.color = color;
        self
    }

    pub fn with_reminders(mut self, reminders: Vec<Reminder>) -> Self {
        self.reminders = reminders;
        self
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self.start, EventTime::Date(_))
    }

    /// Calendar day the event starts on.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }
}

impl EventTime {
    pub fn date(&self) -> NaiveDate {
        match self {
            EventTime::Date(d) => *d,
            EventTime::DateTimeUtc(dt) => dt.date_naive(),
            EventTime::DateTimeFloating(dt) => dt.date(),
            EventTime::DateTimeZoned { datetime, .. } => datetime.date(),
        }
    }

    /// Sort key within a day: all-day first, then by wall-clock time.
    pub fn sort_key(&self) -> NaiveDateTime {
        match self {
            EventTime::Date(d) => NaiveDateTime::from(*d),
            EventTime::DateTimeUtc(dt) => dt.naive_utc(),
            EventTime::DateTimeFloating(dt) => *dt,
            EventTime::DateTimeZoned { datetime, .. } => *datetime,
        }
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTime::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            EventTime::DateTimeUtc(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M UTC")),
            EventTime::DateTimeFloating(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
            EventTime::DateTimeZoned { datetime, tzid } => {
                write!(f, "{} {}", datetime.format("%Y-%m-%d %H:%M"), tzid)
            }
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary)
    }
}
