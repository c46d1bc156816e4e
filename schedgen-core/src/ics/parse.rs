//! ICS file parsing using the icalendar crate's parser.

use crate::color::DisplayColor;
use crate::event::{Event, EventTime, Reminder};
use icalendar::{
    DatePerhapsTime,
    parser::{read_calendar, unfold},
};

/// Parse ICS content into an Event struct
pub fn parse_event(content: &str) -> Option<Event> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).ok()?;
    let vevent = calendar.components.iter().find(|c| c.name == "VEVENT")?;

    // Required fields
    let uid = vevent.find_prop("UID")?.val.to_string();
    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_else(|| "(No title)".to_string());
    let start = to_event_time(DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?);
    let end = to_event_time(DatePerhapsTime::try_from(vevent.find_prop("DTEND")?).ok()?);

    let description = vevent.find_prop("DESCRIPTION").map(|p| p.val.to_string());
    let location = vevent.find_prop("LOCATION").map(|p| p.val.to_string());
    let color = vevent
        .find_prop("COLOR")
        .and_then(|p| DisplayColor::from_token(p.val.as_ref()));

    // Reminders from VALARM components
    let reminders: Vec<Reminder> = vevent
        .components
        .iter()
        .filter(|c| c.name == "VALARM")
        .filter_map(|alarm| {
            let trigger = alarm.find_prop("TRIGGER")?.val.as_ref();
            let minutes = parse_trigger_minutes(trigger)?;
            Some(Reminder { minutes })
        })
        .collect();

    Some(Event {
        uid,
        summary,
        description,
        location,
        start,
        end,
        color,
        reminders,
    })
}

/// Convert icalendar's DatePerhapsTime to our EventTime, preserving timezone info
fn to_event_time(dpt: DatePerhapsTime) -> EventTime {
    match dpt {
        DatePerhapsTime::Date(d) => EventTime::Date(d),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            icalendar::CalendarDateTime::Utc(dt) => EventTime::DateTimeUtc(dt),
            icalendar::CalendarDateTime::Floating(naive) => EventTime::DateTimeFloating(naive),
            icalendar::CalendarDateTime::WithTimezone { date_time, tzid } => {
                EventTime::DateTimeZoned {
                    datetime: date_time,
                    tzid,
                }
            }
        },
    }
}

/// Parse TRIGGER value to minutes before event (-PT30M, -P1D, etc.)
fn parse_trigger_minutes(value: &str) -> Option<i64> {
    let is_before = value.starts_with('-');
    let duration_str = value.trim_start_matches(['-', '+']);

    let duration = iso8601::duration(duration_str).ok()?;
    let std_duration: std::time::Duration = duration.into();
    let minutes = (std_duration.as_secs() / 60) as i64;

    Some(if is_before { minutes } else { -minutes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ics::generate_ics;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_generated_event_keeps_schedule_fields() {
        let day = NaiveDate::from_ymd_opt(2018, 3, 5).unwrap();
        let event = Event::timed(
            "Core 1: Algebra",
            EventTime::DateTimeZoned {
                datetime: day.and_hms_opt(8, 0, 0).unwrap(),
                tzid: "America/New_York".to_string(),
            },
            EventTime::DateTimeZoned {
                datetime: day.and_hms_opt(8, 50, 0).unwrap(),
                tzid: "America/New_York".to_string(),
            },
        )
        .with_location(Some("Room 101".to_string()))
        .with_color(Some(DisplayColor::Blue))
        .with_reminders(vec![Reminder { minutes: 3 }]);

        let ics = generate_ics(&event).unwrap();
        let parsed = parse_event(&ics).expect("Should parse generated ICS");

        assert_eq!(parsed.uid, event.uid);
        assert_eq!(parsed.summary, "Core 1: Algebra");
        assert_eq!(parsed.location.as_deref(), Some("Room 101"));
        assert_eq!(parsed.color, Some(DisplayColor::Blue));
        assert_eq!(parsed.start, event.start);
        assert_eq!(parsed.reminders, vec![Reminder { minutes: 3 }]);
    }

    #[test]
    fn test_parse_foreign_event_without_color() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:TEST\r\n\
BEGIN:VEVENT\r\n\
UID:field-trip-1\r\n\
SUMMARY:Field Trip\r\n\
DTSTART;VALUE=DATE:20180305\r\n\
DTEND;VALUE=DATE:20180306\r\n\
COLOR:hotpink\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let event = parse_event(ics).expect("Should parse");

        assert!(event.is_all_day());
        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2018, 3, 5).unwrap());
        assert_eq!(event.color, None);
        assert!(event.reminders.is_empty());
    }

    #[test]
    fn test_parse_trigger_minutes() {
        assert_eq!(parse_trigger_minutes("-PT30M"), Some(30));
        assert_eq!(parse_trigger_minutes("-P1D"), Some(1440));
        assert_eq!(parse_trigger_minutes("PT5M"), Some(-5));
    }

    #[test]
    fn test_parse_rejects_missing_uid() {
        let ics = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nSUMMARY:x\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
        assert!(parse_event(ics).is_none());
    }
}
