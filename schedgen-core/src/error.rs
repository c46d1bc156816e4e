//! Error types for schedgen.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while loading schedules or updating a calendar.
#[derive(Error, Debug)]
pub enum SchedGenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sheet '{0}' not found in workbook")]
    SheetNotFound(String),

    #[error("Invalid cell in sheet '{sheet}' row {row}: {reason}")]
    InvalidCell {
        sheet: String,
        row: u32,
        reason: String,
    },

    #[error("Date {0} appears more than once in the date table")]
    DuplicateDate(NaiveDate),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("Calendar error: {0}")]
    Calendar(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for schedgen operations.
pub type SchedGenResult<T> = Result<T, SchedGenError>;
