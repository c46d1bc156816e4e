//! Core types for schedgen.
//!
//! This crate turns a color-day schedule workbook into calendar events:
//! - `workbook` reads the spreadsheet and builds the date, schedule and
//!   personalization tables
//! - `reconcile` decides per day whether the calendar already matches
//! - `run` drives a whole generation run against a `calendar::Calendar`

pub mod calendar;
pub mod color;
pub mod config;
pub mod dates;
pub mod error;
pub mod event;
pub mod ics;
pub mod metadata;
pub mod period;
pub mod personalization;
pub mod reconcile;
pub mod run;
pub mod schedule;
pub mod workbook;

/// Version recorded in the run metadata of generated calendars.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
