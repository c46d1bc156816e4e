use anyhow::{Result, anyhow};
use chrono::{Days, NaiveDate};
use owo_colors::OwoColorize;
use schedgen_core::calendar::{Calendar, CalendarStore};
use schedgen_core::config::SchedGenConfig;

use crate::commands::today_in;
use crate::render::Render;

pub async fn run(
    config: &SchedGenConfig,
    calendar_name: &str,
    from: Option<NaiveDate>,
    days: u32,
) -> Result<()> {
    let today = today_in(config.tz()?);
    let from = from.unwrap_or(today);

    let calendar = config
        .store()
        .find(calendar_name)
        .await?
        .ok_or_else(|| anyhow!("Calendar '{}' not found", calendar_name))?;

    for offset in 0..days {
        let Some(date) = from.checked_add_days(Days::new(u64::from(offset))) else {
            break;
        };

        if offset > 0 {
            println!();
        }
        println!("{}", format_date_label(date, today).bold());

        let events = calendar.events_for_day(date).await?;
        if events.is_empty() {
            println!("  {}", "No events".dimmed());
        }
        for event in &events {
            println!("{}", event.render());
        }
    }

    Ok(())
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}
