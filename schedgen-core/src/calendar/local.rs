//! Calendars stored as directories of .ics files.
//!
//! Layout:
//!
//! ```text
//! <calendar_dir>/
//!   bmsa-schedule/
//!     .schedgen/config.toml
//!     2018-03-05T0800__core-1-algebra.ics
//!     2018-03-06__no-school.ics
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::calendar::config::CalendarConfig;
use crate::calendar::{CALENDAR_COLOR, Calendar, CalendarStore};
use crate::error::{SchedGenError, SchedGenResult};
use crate::event::{Event, EventTime};
use crate::ics::{generate_ics, parse_event};

/// Maximum length of the human-readable part of a file or directory name.
const MAX_SLUG_LEN: usize = 50;

fn slugify(s: &str) -> String {
    let slug: String = slug::slugify(s).chars().take(MAX_SLUG_LEN).collect();
    slug.trim_end_matches('-').to_string()
}

/// Pick `base`, or `base-2`, `base-3`, ... when `taken` says it exists.
fn unique_name(base: &str, taken: impl Fn(&str) -> bool) -> SchedGenResult<String> {
    if !taken(base) {
        return Ok(base.to_string());
    }

    for n in 2..=100 {
        let suffixed = format!("{}-{}", base, n);
        if !taken(&suffixed) {
            return Ok(suffixed);
        }
    }

    Err(SchedGenError::Calendar(format!(
        "Too many name collisions for '{}'",
        base
    )))
}

/// Root directory holding one subdirectory per calendar.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalStore { root: root.into() }
    }

    /// Discover calendars by scanning the root for subdirectories
    /// with .schedgen/config.toml files.
    pub fn calendars(&self) -> Vec<LocalCalendar> {
        let Ok(entries) = std::fs::read_dir(&self.root) else {
            return Vec::new();
        };

        let mut calendars: Vec<LocalCalendar> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir() && CalendarConfig::path(path).exists())
            .filter_map(|path| LocalCalendar::load(path).ok())
            .collect();

        calendars.sort_by(|a, b| a.path.cmp(&b.path));
        calendars
    }
}

#[async_trait]
impl CalendarStore for LocalStore {
    type Calendar = LocalCalendar;

    async fn find(&self, name: &str) -> SchedGenResult<Option<LocalCalendar>> {
        Ok(self.calendars().into_iter().find(|c| c.config.name == name))
    }

    async fn create(&mut self, name: &str, timezone: Tz) -> SchedGenResult<LocalCalendar> {
        let base = match slugify(name) {
            s if s.is_empty() => "calendar".to_string(),
            s => s,
        };
        let dir_name = unique_name(&base, |candidate| self.root.join(candidate).exists())?;
        let path = self.root.join(dir_name);

        let config = CalendarConfig {
            name: name.to_string(),
            timezone: Some(timezone.name().to_string()),
            color: Some(CALENDAR_COLOR.to_string()),
            description: None,
        };
        config.save(&path)?;

        tracing::info!(calendar = name, path = %path.display(), "created calendar");

        Ok(LocalCalendar { path, config })
    }

    async fn delete(&mut self, name: &str) -> SchedGenResult<bool> {
        let Some(calendar) = self.find(name).await? else {
            return Ok(false);
        };

        std::fs::remove_dir_all(&calendar.path)?;
        tracing::info!(calendar = name, path = %calendar.path.display(), "deleted calendar");
        Ok(true)
    }
}

#[derive(Debug, Clone)]
pub struct LocalCalendar {
    path: PathBuf,
    config: CalendarConfig,
}

impl LocalCalendar {
    pub fn load(path: PathBuf) -> SchedGenResult<Self> {
        let config = CalendarConfig::load(&path)?;
        Ok(LocalCalendar { path, config })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn timezone(&self) -> Option<&str> {
        self.config.timezone.as_deref()
    }

    /// Event files whose name says they start on `date`, with their events.
    fn day_files(&self, date: NaiveDate) -> SchedGenResult<Vec<(PathBuf, Event)>> {
        let prefix = date.format("%Y-%m-%d").to_string();
        let entries = match std::fs::read_dir(&self.path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SchedGenError::CalendarNotFound(self.config.name.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut files: Vec<(PathBuf, Event)> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|e| e == "ics"))
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix))
            })
            .filter_map(|path| match read_event(&path) {
                Ok(event) => Some((path, event)),
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "skipping event file");
                    None
                }
            })
            .filter(|(_, event)| event.date() == date)
            .collect();

        files.sort_by(|(a_path, a), (b_path, b)| {
            a.start
                .sort_key()
                .cmp(&b.start.sort_key())
                .then_with(|| a_path.cmp(b_path))
        });

        Ok(files)
    }

    /// Generate the base file name for an event.
    /// Timed events: `YYYY-MM-DDTHHMM__slug`
    /// All-day events: `YYYY-MM-DD__slug`
    fn base_name_for(event: &Event) -> String {
        let slug = match slugify(&event.summary) {
            s if s.is_empty() => "event".to_string(),
            s => s,
        };

        let date = match &event.start {
            EventTime::Date(d) => d.format("%Y-%m-%d").to_string(),
            EventTime::DateTimeUtc(dt) => dt.format("%Y-%m-%dT%H%M").to_string(),
            EventTime::DateTimeFloating(dt) => dt.format("%Y-%m-%dT%H%M").to_string(),
            EventTime::DateTimeZoned { datetime, .. } => {
                datetime.format("%Y-%m-%dT%H%M").to_string()
            }
        };

        format!("{}__{}", date, slug)
    }
}

fn read_event(path: &Path) -> SchedGenResult<Event> {
    let content = std::fs::read_to_string(path)?;
    parse_event(&content).ok_or_else(|| {
        SchedGenError::IcsParse(format!("Failed to parse event from {}", path.display()))
    })
}

#[async_trait]
impl Calendar for LocalCalendar {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn events_for_day(&self, date: NaiveDate) -> SchedGenResult<Vec<Event>> {
        Ok(self
            .day_files(date)?
            .into_iter()
            .map(|(_, event)| event)
            .collect())
    }

    async fn create_event(&mut self, event: &Event) -> SchedGenResult<()> {
        let base = Self::base_name_for(event);
        let name = unique_name(&base, |candidate| {
            self.path.join(format!("{}.ics", candidate)).exists()
        })?;
        let path = self.path.join(format!("{}.ics", name));

        std::fs::write(&path, generate_ics(event)?)?;
        tracing::debug!(path = %path.display(), "wrote event");
        Ok(())
    }

    async fn delete_event(&mut self, event: &Event) -> SchedGenResult<()> {
        let (path, _) = self
            .day_files(event.date())?
            .into_iter()
            .find(|(_, e)| e.uid == event.uid)
            .ok_or_else(|| {
                SchedGenError::Calendar(format!(
                    "Event '{}' ({}) not found in {}",
                    event.summary, event.uid, self.config.name
                ))
            })?;

        std::fs::remove_file(&path)?;
        tracing::debug!(path = %path.display(), "removed event");
        Ok(())
    }

    async fn description(&self) -> SchedGenResult<Option<String>> {
        Ok(self.config.description.clone())
    }

    async fn set_description(&mut self, description: &str) -> SchedGenResult<()> {
        let mut config = self.config.clone();
        config.description = Some(description.to_string());
        config.save(&self.path)?;
        self.config = config;
        Ok(())
    }
}
