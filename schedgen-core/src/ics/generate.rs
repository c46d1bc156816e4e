//! ICS file generation.

use crate::error::{SchedGenError, SchedGenResult};
use crate::event::{Event, EventTime};
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger, ValueType};

/// Generate .ics content for a single event
pub fn generate_ics(event: &Event) -> SchedGenResult<String> {
    if event.summary.is_empty() {
        return Err(SchedGenError::IcsGenerate(format!(
            "event {} has no summary",
            event.uid
        )));
    }

    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.summary(&event.summary);

    // DTSTAMP is required by RFC 5545
    let dtstamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    ics_event.add_property("DTSTAMP", &dtstamp);

    add_datetime_property(&mut ics_event, "DTSTART", &event.start);
    add_datetime_property(&mut ics_event, "DTEND", &event.end);

    if let Some(ref desc) = event.description {
        ics_event.description(desc);
    }

    if let Some(ref loc) = event.location {
        ics_event.location(loc);
    }

    if let Some(color) = event.color {
        ics_event.add_property("COLOR", color.token());
    }

    for reminder in &event.reminders {
        let trigger = Trigger::before_start(chrono::Duration::minutes(reminder.minutes));
        let alarm = Alarm::display("Reminder", trigger);
        ics_event.alarm(alarm);
    }

    let ics_event = ics_event.done();
    cal.push(ics_event);
    let cal = cal.done();

    Ok(strip_ics_bloat(&cal.to_string()))
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with SCHEDGEN
/// - Remove CALSCALE:GREGORIAN (it's the default)
/// - Remove DTSTAMP and UID inside VALARM sections (not required by RFC 5545)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_valarm = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:SCHEDGEN\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        if line == "BEGIN:VALARM" {
            in_valarm = true;
        } else if line == "END:VALARM" {
            in_valarm = false;
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Add a datetime property with proper formatting based on EventTime variant
fn add_datetime_property(ics_event: &mut icalendar::Event, name: &str, time: &EventTime) {
    match time {
        EventTime::Date(d) => {
            let mut prop = Property::new(name, d.format("%Y%m%d").to_string());
            prop.append_parameter(ValueType::Date);
            ics_event.append_property(prop);
        }
        EventTime::DateTimeUtc(dt) => {
            ics_event.add_property(name, dt.format("%Y%m%dT%H%M%SZ").to_string());
        }
        EventTime::DateTimeFloating(dt) => {
            ics_event.add_property(name, dt.format("%Y%m%dT%H%M%S").to_string());
        }
        EventTime::DateTimeZoned { datetime, tzid } => {
            let mut prop = Property::new(name, datetime.format("%Y%m%dT%H%M%S").to_string());
            prop.add_parameter("TZID", tzid);
            ics_event.append_property(prop);
        }
    }
}
