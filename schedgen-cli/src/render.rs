//! TUI rendering traits for schedgen types.
//!
//! Extension traits that add colored terminal rendering to schedgen-core
//! types using owo_colors.

use owo_colors::OwoColorize;
use schedgen_core::color::{ColorTag, DisplayColor, resolve_display_color};
use schedgen_core::dates::{DayColor, WhatColor};
use schedgen_core::event::{Event, EventTime};
use schedgen_core::reconcile::DayOutcome;
use schedgen_core::run::RunSummary;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Paint text in the terminal color closest to a calendar color.
fn paint(color: Option<DisplayColor>, text: &str) -> String {
    match color {
        Some(DisplayColor::PaleRed) => text.bright_red().to_string(),
        Some(DisplayColor::Green) => text.green().to_string(),
        Some(DisplayColor::Blue) => text.blue().to_string(),
        Some(DisplayColor::Red) => text.red().to_string(),
        Some(DisplayColor::Mauve) => text.magenta().to_string(),
        Some(DisplayColor::Yellow) => text.yellow().to_string(),
        Some(DisplayColor::Orange) => text.truecolor(255, 165, 0).to_string(),
        Some(DisplayColor::Cyan) => text.cyan().to_string(),
        None => text.to_string(),
    }
}

impl Render for ColorTag {
    fn render(&self) -> String {
        paint(resolve_display_color(self), self.as_str()).bold().to_string()
    }
}

impl Render for (&DayColor, &DayOutcome) {
    fn render(&self) -> String {
        let (day, outcome) = *self;
        let date = day.date.format("%a %b %-d").to_string();

        match outcome {
            DayOutcome::Past => format!("  {} {}", date.dimmed(), day.tag.render()),
            DayOutcome::Unchanged => {
                format!("  {} {} {}", date, day.tag.render(), "unchanged".dimmed())
            }
            DayOutcome::Rebuilt { deleted, created } => format!(
                "  {} {} {} {}",
                date,
                day.tag.render(),
                format!("+{created}").green(),
                format!("-{deleted}").red()
            ),
        }
    }
}

impl Render for RunSummary {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        if self.rebuilt == 0 {
            lines.push("Calendar already up to date".green().to_string());
        } else {
            lines.push(format!(
                "Updated {} {}: {} created, {} deleted",
                self.rebuilt,
                pluralize("day", self.rebuilt),
                self.created.to_string().green(),
                self.deleted.to_string().red()
            ));
        }

        lines.push(
            format!(
                "{} unchanged, {} in the past",
                self.unchanged, self.past
            )
            .dimmed()
            .to_string(),
        );

        if !self.metadata_saved {
            lines.push(
                "Could not record this run in the calendar; the next run won't know it happened"
                    .yellow()
                    .to_string(),
            );
        }

        lines.join("\n")
    }
}

impl Render for WhatColor {
    fn render(&self) -> String {
        match self {
            WhatColor::DaysUntilSchool(n) => {
                format!("{} {} until school starts", n.bold(), pluralize("day", *n as usize))
            }
            WhatColor::Today(tag) => format!("It's a {} day", tag.render()),
            WhatColor::DateNotFound => "No school on this date".dimmed().to_string(),
        }
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let time = format_time(&self.start);
        let mut line = format!("  {} {}", time.dimmed(), paint(self.color, &self.summary));

        if let Some(location) = &self.location {
            line.push_str(&format!(" {}", format!("@ {location}").dimmed()));
        }

        line
    }
}

/// Format the time portion of an event (e.g. "08:00" or "all-day")
fn format_time(time: &EventTime) -> String {
    match time {
        EventTime::Date(_) => "all-day".to_string(),
        EventTime::DateTimeUtc(dt) => format!("{:>7}", dt.format("%H:%M")),
        EventTime::DateTimeFloating(dt) => format!("{:>7}", dt.format("%H:%M")),
        EventTime::DateTimeZoned { datetime, .. } => format!("{:>7}", datetime.format("%H:%M")),
    }
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
