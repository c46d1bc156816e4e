//! Calendar collaborators.
//!
//! The reconciler only needs to list a day's events, create and delete
//! events, and keep a small description string for run metadata. Anything
//! that can do that is a [`Calendar`]; a [`CalendarStore`] finds, creates
//! and deletes calendars by name.

pub mod config;
mod local;
mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::error::SchedGenResult;
use crate::event::Event;

pub use local::{LocalCalendar, LocalStore};
pub use memory::{CalendarOp, MemoryCalendar, MemoryStore};

/// Display color given to calendars this tool creates.
pub const CALENDAR_COLOR: &str = "#29527A";

#[async_trait]
pub trait Calendar: Send + Sync {
    fn name(&self) -> &str;

    /// Events starting on `date`, ordered by start time.
    async fn events_for_day(&self, date: NaiveDate) -> SchedGenResult<Vec<Event>>;

    async fn create_event(&mut self, event: &Event) -> SchedGenResult<()>;

    async fn delete_event(&mut self, event: &Event) -> SchedGenResult<()>;

    async fn description(&self) -> SchedGenResult<Option<String>>;

    async fn set_description(&mut self, description: &str) -> SchedGenResult<()>;
}

#[async_trait]
pub trait CalendarStore: Send + Sync {
    type Calendar: Calendar;

    async fn find(&self, name: &str) -> SchedGenResult<Option<Self::Calendar>>;

    async fn create(&mut self, name: &str, timezone: Tz) -> SchedGenResult<Self::Calendar>;

    /// Returns false when no calendar has that name.
    async fn delete(&mut self, name: &str) -> SchedGenResult<bool>;
}
