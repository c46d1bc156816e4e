//! ICS file generation and parsing.
//!
//! Local calendars store one event per .ics file (RFC 5545). Event colors
//! use the RFC 7986 `COLOR` property.

mod generate;
mod parse;

pub use generate::generate_ics;
pub use parse::parse_event;
