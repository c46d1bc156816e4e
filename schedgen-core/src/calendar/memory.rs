//! In-memory calendars that record every call made against them.

use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::calendar::{Calendar, CalendarStore};
use crate::error::{SchedGenError, SchedGenResult};
use crate::event::Event;

/// A call made against a [`MemoryCalendar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarOp {
    Read(NaiveDate),
    /// Summary of the created event
    Create(String),
    /// Summary of the deleted event
    Delete(String),
    SetDescription(String),
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCalendar {
    name: String,
    timezone: Option<Tz>,
    events: Vec<Event>,
    description: Option<String>,
    reject_description_writes: bool,
    ops: std::sync::Arc<std::sync::Mutex<Vec<CalendarOp>>>,
}

impl MemoryCalendar {
    pub fn new(name: impl Into<String>) -> Self {
        MemoryCalendar {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Make every `set_description` call fail.
    pub fn reject_description_writes(mut self) -> Self {
        self.reject_description_writes = true;
        self
    }

    pub fn timezone(&self) -> Option<Tz> {
        self.timezone
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Calls made so far, oldest first.
    pub fn ops(&self) -> Vec<CalendarOp> {
        self.ops.lock().map(|ops| ops.clone()).unwrap_or_default()
    }

    pub fn clear_ops(&self) {
        if let Ok(mut ops) = self.ops.lock() {
            ops.clear();
        }
    }

    /// Number of create and delete calls so far.
    pub fn writes(&self) -> usize {
        self.ops()
            .iter()
            .filter(|op| matches!(op, CalendarOp::Create(_) | CalendarOp::Delete(_)))
            .count()
    }

    fn record(&self, op: CalendarOp) {
        if let Ok(mut ops) = self.ops.lock() {
            ops.push(op);
        }
    }
}

#[async_trait]
impl Calendar for MemoryCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    async fn events_for_day(&self, date: NaiveDate) -> SchedGenResult<Vec<Event>> {
        self.record(CalendarOp::Read(date));

        let mut events: Vec<Event> = self
            .events
            .iter()
            .filter(|e| e.date() == date)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.start.sort_key());
        Ok(events)
    }

    async fn create_event(&mut self, event: &Event) -> SchedGenResult<()> {
        self.record(CalendarOp::Create(event.summary.clone()));
        self.events.push(event.clone());
        Ok(())
    }

    async fn delete_event(&mut self, event: &Event) -> SchedGenResult<()> {
        self.record(CalendarOp::Delete(event.summary.clone()));

        let index = self
            .events
            .iter()
            .position(|e| e.uid == event.uid)
            .ok_or_else(|| SchedGenError::Calendar(format!("Event '{}' not found", event.uid)))?;
        self.events.remove(index);
        Ok(())
    }

    async fn description(&self) -> SchedGenResult<Option<String>> {
        Ok(self.description.clone())
    }

    async fn set_description(&mut self, description: &str) -> SchedGenResult<()> {
        self.record(CalendarOp::SetDescription(description.to_string()));

        if self.reject_description_writes {
            return Err(SchedGenError::Calendar(format!(
                "Calendar '{}' does not accept description changes",
                self.name
            )));
        }
        self.description = Some(description.to_string());
        Ok(())
    }
}

/// Calendars held in memory, looked up by name.
///
/// `find` hands out clones. Clones share their op log with the stored
/// calendar but not their events.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    calendars: Vec<MemoryCalendar>,
    read_only_descriptions: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calendar(mut self, calendar: MemoryCalendar) -> Self {
        self.calendars.push(calendar);
        self
    }

    /// Calendars created from now on refuse description writes.
    pub fn reject_description_writes(mut self) -> Self {
        self.read_only_descriptions = true;
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.calendars.iter().map(|c| c.name.as_str()).collect()
    }
}

#[async_trait]
impl CalendarStore for MemoryStore {
    type Calendar = MemoryCalendar;

    async fn find(&self, name: &str) -> SchedGenResult<Option<MemoryCalendar>> {
        Ok(self.calendars.iter().find(|c| c.name == name).cloned())
    }

    async fn create(&mut self, name: &str, timezone: Tz) -> SchedGenResult<MemoryCalendar> {
        let mut calendar = MemoryCalendar::new(name);
        calendar.timezone = Some(timezone);
        calendar.reject_description_writes = self.read_only_descriptions;
        self.calendars.push(calendar.clone());
        Ok(calendar)
    }

    async fn delete(&mut self, name: &str) -> SchedGenResult<bool> {
        let before = self.calendars.len();
        self.calendars.retain(|c| c.name != name);
        Ok(self.calendars.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_records_calls_in_order() {
        let mut calendar = MemoryCalendar::new("Cal");
        let event = Event::all_day("No School", date(2018, 3, 6));

        calendar.events_for_day(date(2018, 3, 6)).await.unwrap();
        calendar.create_event(&event).await.unwrap();
        calendar.delete_event(&event).await.unwrap();

        assert_eq!(
            calendar.ops(),
            vec![
                CalendarOp::Read(date(2018, 3, 6)),
                CalendarOp::Create("No School".into()),
                CalendarOp::Delete("No School".into()),
            ]
        );
        assert_eq!(calendar.writes(), 2);
        assert!(calendar.events().is_empty());
    }

    #[tokio::test]
    async fn test_rejecting_description_writes() {
        let mut calendar = MemoryCalendar::new("Cal")
            .with_description("old")
            .reject_description_writes();

        assert!(calendar.set_description("new").await.is_err());
        assert_eq!(calendar.description().await.unwrap().as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn test_store_create_and_delete() {
        let mut store = MemoryStore::new();
        store.create("Cal", chrono_tz::America::New_York).await.unwrap();

        let found = store.find("Cal").await.unwrap().unwrap();
        assert_eq!(found.timezone(), Some(chrono_tz::America::New_York));
        assert!(store.delete("Cal").await.unwrap());
        assert!(store.names().is_empty());
    }
}
