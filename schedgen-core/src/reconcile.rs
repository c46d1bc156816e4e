//! Per-day reconciliation.
//!
//! For every day the reconciler either leaves the calendar alone or deletes
//! all of the day's events and recreates them from the tables. Events are
//! never edited in place. Planning is pure ([`plan_day`]); applying the plan
//! is the only part that talks to the calendar ([`reconcile_day`]).

use std::time::Duration;

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::calendar::Calendar;
use crate::color::resolve_display_color;
use crate::dates::DayColor;
use crate::error::SchedGenResult;
use crate::event::{Event, EventTime, Reminder};
use crate::period::PeriodSlot;
use crate::workbook::Tables;

/// Popup reminders added to every class period, in minutes before start.
pub const REMINDER_MINUTES: [i64; 2] = [3, 0];

/// Pause after each create or delete unless configured otherwise.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(1000);

/// Everything a run needs besides the calendar itself.
#[derive(Debug, Clone, Copy)]
pub struct RunContext<'a> {
    pub today: NaiveDate,
    pub reminders: bool,
    pub throttle: Duration,
    pub timezone: Tz,
    pub tables: &'a Tables,
}

impl<'a> RunContext<'a> {
    pub fn new(today: NaiveDate, tables: &'a Tables) -> Self {
        RunContext {
            today,
            reminders: true,
            throttle: DEFAULT_THROTTLE,
            timezone: chrono_tz::America::New_York,
            tables,
        }
    }

    pub fn with_reminders(mut self, reminders: bool) -> Self {
        self.reminders = reminders;
        self
    }

    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    async fn pause(&self) {
        if !self.throttle.is_zero() {
            tokio::time::sleep(self.throttle).await;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepReason {
    /// A non-schedule day already has its single marker event
    LabelPresent,
    /// Event count and color already match the schedule
    ScheduleMatches,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DayPlan {
    Keep(KeepReason),
    /// Delete everything on the day, then create these events in order
    Rebuild(Vec<Event>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOutcome {
    /// Before today; never touched
    Past,
    Unchanged,
    Rebuilt { deleted: usize, created: usize },
}

/// Decide what a day should look like given the events already on it.
pub fn plan_day(ctx: &RunContext<'_>, day: &DayColor, existing: &[Event]) -> DayPlan {
    let color = resolve_display_color(&day.tag);

    let Some(slots) = ctx.tables.schedules.get(&day.tag) else {
        if existing.len() == 1 {
            return DayPlan::Keep(KeepReason::LabelPresent);
        }
        let marker = Event::all_day(day.tag.as_str(), day.date).with_color(color);
        return DayPlan::Rebuild(vec![marker]);
    };

    // A leftover all-day marker never counts as a class period
    let color_matches = existing.first().is_none_or(|e| e.color == color);
    let all_timed = !existing.iter().any(Event::is_all_day);
    if existing.len() == slots.len()
        && color_matches
        && all_timed
        && !day.tag.forces_regeneration()
    {
        return DayPlan::Keep(KeepReason::ScheduleMatches);
    }

    DayPlan::Rebuild(
        slots
            .iter()
            .map(|slot| period_event(ctx, day, slot))
            .collect(),
    )
}

fn period_event(ctx: &RunContext<'_>, day: &DayColor, slot: &PeriodSlot) -> Event {
    let personalization = &ctx.tables.personalization;
    let accelerated = day.tag.is_accelerated_term();

    let title = personalization.resolve_title(&slot.period, accelerated);
    let summary = if title.is_empty() {
        slot.period.to_string()
    } else {
        format!("{}: {}", slot.period, title)
    };

    let location = match personalization.resolve_location(&slot.period) {
        "" => None,
        _ if accelerated => None,
        location => Some(location.to_string()),
    };

    let at = |time| EventTime::DateTimeZoned {
        datetime: day.date.and_time(time),
        tzid: ctx.timezone.name().to_string(),
    };

    let reminders = if ctx.reminders {
        REMINDER_MINUTES.iter().map(|&minutes| Reminder { minutes }).collect()
    } else {
        Vec::new()
    };

    Event::timed(summary, at(slot.start), at(slot.end))
        .with_location(location)
        .with_color(resolve_display_color(&day.tag))
        .with_reminders(reminders)
}

/// Bring one day of the calendar in line with the tables.
///
/// Days before `ctx.today` are skipped without reading the calendar.
/// Otherwise every existing event of the day is deleted before the new ones
/// are created, pausing for `ctx.throttle` after each call.
pub async fn reconcile_day<C: Calendar + ?Sized>(
    ctx: &RunContext<'_>,
    calendar: &mut C,
    day: &DayColor,
) -> SchedGenResult<DayOutcome> {
    if day.date < ctx.today {
        return Ok(DayOutcome::Past);
    }

    let existing = calendar.events_for_day(day.date).await?;

    let events = match plan_day(ctx, day, &existing) {
        DayPlan::Keep(reason) => {
            tracing::debug!(date = %day.date, tag = %day.tag, ?reason, "day unchanged");
            return Ok(DayOutcome::Unchanged);
        }
        DayPlan::Rebuild(events) => events,
    };

    for event in &existing {
        calendar.delete_event(event).await?;
        ctx.pause().await;
    }

    for event in &events {
        calendar.create_event(event).await?;
        ctx.pause().await;
    }

    tracing::info!(
        date = %day.date,
        tag = %day.tag,
        deleted = existing.len(),
        created = events.len(),
        "rebuilt day"
    );

    Ok(DayOutcome::Rebuilt {
        deleted: existing.len(),
        created: events.len(),
    })
}
