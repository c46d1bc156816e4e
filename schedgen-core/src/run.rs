//! A whole generation run: open the calendar, check whether today's run
//! already happened, reconcile every day, record the run.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::calendar::{Calendar, CalendarStore};
use crate::dates::DayColor;
use crate::error::SchedGenResult;
use crate::metadata::RunMetadata;
use crate::reconcile::{DayOutcome, RunContext, reconcile_day};

/// Whether a run should go ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunGate {
    /// Not run yet today
    Proceed,
    /// Already run today, but the user asked to run again
    AlreadyDone,
    UserDeclined,
}

impl RunGate {
    pub fn should_run(self) -> bool {
        !matches!(self, RunGate::UserDeclined)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub past: usize,
    pub unchanged: usize,
    pub rebuilt: usize,
    pub created: usize,
    pub deleted: usize,
    /// False when the calendar refused the metadata update
    pub metadata_saved: bool,
}

impl RunSummary {
    fn record(&mut self, outcome: &DayOutcome) {
        match *outcome {
            DayOutcome::Past => self.past += 1,
            DayOutcome::Unchanged => self.unchanged += 1,
            DayOutcome::Rebuilt { deleted, created } => {
                self.rebuilt += 1;
                self.deleted += deleted;
                self.created += created;
            }
        }
    }
}

pub struct Generator<C> {
    calendar: C,
    metadata: Option<RunMetadata>,
    created: bool,
}

impl<C: Calendar> Generator<C> {
    /// Find the calendar by name, creating it in `timezone` if missing.
    pub async fn open<S>(store: &mut S, name: &str, timezone: Tz) -> SchedGenResult<Self>
    where
        S: CalendarStore<Calendar = C>,
    {
        if let Some(calendar) = store.find(name).await? {
            return Self::attach(calendar).await;
        }

        let mut calendar = store.create(name, timezone).await?;
        let metadata = RunMetadata::current(None);
        let written = match metadata.encode() {
            Ok(text) => calendar.set_description(&text).await,
            Err(e) => Err(e),
        };

        let metadata = match written {
            Ok(()) => Some(metadata),
            Err(e) => {
                tracing::warn!(calendar = name, "Could not write initial run metadata: {e}");
                None
            }
        };

        Ok(Generator {
            calendar,
            metadata,
            created: true,
        })
    }

    /// Use an existing calendar. Unreadable metadata counts as no prior run.
    pub async fn attach(calendar: C) -> SchedGenResult<Self> {
        let metadata = calendar
            .description()
            .await?
            .and_then(|text| RunMetadata::decode(&text));

        if metadata.is_none() {
            tracing::debug!(calendar = calendar.name(), "no run metadata found");
        }

        Ok(Generator {
            calendar,
            metadata,
            created: false,
        })
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    pub fn metadata(&self) -> Option<&RunMetadata> {
        self.metadata.as_ref()
    }

    /// True when `open` had to create the calendar.
    pub fn was_created(&self) -> bool {
        self.created
    }

    /// Check whether a run already happened on `today`. `confirm` is only
    /// asked when it did.
    pub fn gate<E>(
        &self,
        today: NaiveDate,
        confirm: impl FnOnce() -> Result<bool, E>,
    ) -> Result<RunGate, E> {
        let ran_today = self.metadata.as_ref().is_some_and(|m| m.updated_on(today));

        if !ran_today {
            return Ok(RunGate::Proceed);
        }

        Ok(if confirm()? {
            RunGate::AlreadyDone
        } else {
            RunGate::UserDeclined
        })
    }

    /// Reconcile every day of the date table in order, then record the run.
    ///
    /// `on_day` sees each day's outcome as soon as it is known. Failing to
    /// save the metadata is logged and reported in the summary, not returned.
    pub async fn run(
        &mut self,
        ctx: &RunContext<'_>,
        mut on_day: impl FnMut(&DayColor, &DayOutcome),
    ) -> SchedGenResult<RunSummary> {
        let mut summary = RunSummary::default();

        for day in ctx.tables.dates.days() {
            let outcome = reconcile_day(ctx, &mut self.calendar, day).await?;
            summary.record(&outcome);
            on_day(day, &outcome);
        }

        let metadata = RunMetadata::current(Some(ctx.today));
        summary.metadata_saved = match self.save_metadata(&metadata).await {
            Ok(()) => {
                self.metadata = Some(metadata);
                true
            }
            Err(e) => {
                tracing::warn!(calendar = self.calendar.name(), error = %e, "could not save run metadata");
                false
            }
        };

        tracing::info!(
            calendar = self.calendar.name(),
            rebuilt = summary.rebuilt,
            created = summary.created,
            deleted = summary.deleted,
            "run complete"
        );

        Ok(summary)
    }

    async fn save_metadata(&mut self, metadata: &RunMetadata) -> SchedGenResult<()> {
        let text = metadata.encode()?;
        self.calendar.set_description(&text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{CalendarOp, MemoryCalendar, MemoryStore};
    use crate::color::{ColorTag, DisplayColor};
    use crate::dates::DateTable;
    use crate::event::EventTime;
    use crate::period::{PeriodId, PeriodSlot};
    use crate::personalization::{Personalization, PersonalizationEntry, PersonalizationKey};
    use crate::schedule::ScheduleTable;
    use crate::workbook::Tables;
    use chrono::NaiveTime;
    use std::convert::Infallible;
    use std::time::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn tables() -> Tables {
        let mut schedules = ScheduleTable::new();
        schedules.insert(
            ColorTag::Blue,
            vec![
                PeriodSlot::new(PeriodId::Core(1), time(8, 0), time(8, 50)),
                PeriodSlot::new(PeriodId::Core(2), time(8, 55), time(9, 45)),
            ],
        );

        let mut personalization = Personalization::new();
        personalization.insert(
            PersonalizationKey::Core(1),
            PersonalizationEntry::new("Algebra", "Room 101"),
        );

        Tables {
            dates: DateTable::new(vec![
                DayColor::new(date(2018, 3, 2), ColorTag::Blue),
                DayColor::new(date(2018, 3, 5), ColorTag::Blue),
                DayColor::new(date(2018, 3, 6), ColorTag::parse("No School")),
            ])
            .unwrap(),
            schedules,
            personalization,
        }
    }

    fn ctx(tables: &Tables) -> RunContext<'_> {
        RunContext::new(date(2018, 3, 5), tables).with_throttle(Duration::ZERO)
    }

    fn never_asked() -> Result<bool, Infallible> {
        panic!("confirmation should not be requested")
    }

    #[tokio::test]
    async fn test_open_creates_calendar_with_initial_metadata() {
        let mut store = MemoryStore::new();
        let generator = Generator::open(&mut store, "BMSA Schedule", chrono_tz::America::New_York)
            .await
            .unwrap();

        assert!(generator.was_created());
        assert_eq!(generator.metadata(), Some(&RunMetadata::current(None)));
        assert_eq!(generator.calendar().timezone(), Some(chrono_tz::America::New_York));
        assert_eq!(store.names(), vec!["BMSA Schedule"]);
    }

    #[tokio::test]
    async fn test_open_survives_unwritable_description() {
        let mut store = MemoryStore::new().reject_description_writes();
        let generator = Generator::open(&mut store, "Cal", chrono_tz::UTC).await.unwrap();

        assert!(generator.was_created());
        assert_eq!(generator.metadata(), None);
        assert_eq!(store.names(), vec!["Cal"]);
    }

    #[tokio::test]
    async fn test_open_reads_existing_metadata() {
        let calendar = MemoryCalendar::new("Cal")
            .with_description(r#"<schedgen version="0.1.0" updated="2018-03-01"/>"#);
        let mut store = MemoryStore::new().with_calendar(calendar);

        let generator = Generator::open(&mut store, "Cal", chrono_tz::UTC).await.unwrap();

        assert!(!generator.was_created());
        assert_eq!(
            generator.metadata().and_then(|m| m.updated),
            Some(date(2018, 3, 1))
        );
    }

    #[tokio::test]
    async fn test_end_to_end_day() {
        let tables = tables();
        let calendar = MemoryCalendar::new("Cal");
        let mut generator = Generator::attach(calendar).await.unwrap();

        let mut seen = Vec::new();
        let summary = generator
            .run(&ctx(&tables), |day, outcome| seen.push((day.date, *outcome)))
            .await
            .unwrap();

        assert_eq!(
            seen,
            vec![
                (date(2018, 3, 2), DayOutcome::Past),
                (date(2018, 3, 5), DayOutcome::Rebuilt { deleted: 0, created: 2 }),
                (date(2018, 3, 6), DayOutcome::Rebuilt { deleted: 0, created: 1 }),
            ]
        );
        assert_eq!(
            summary,
            RunSummary {
                past: 1,
                unchanged: 0,
                rebuilt: 2,
                created: 3,
                deleted: 0,
                metadata_saved: true,
            }
        );

        let monday: Vec<_> = generator
            .calendar()
            .events()
            .iter()
            .filter(|e| e.date() == date(2018, 3, 5))
            .collect();
        assert_eq!(monday[0].summary, "Core 1: Algebra");
        assert_eq!(monday[0].location.as_deref(), Some("Room 101"));
        assert_eq!(monday[0].color, Some(DisplayColor::Blue));
        assert_eq!(
            monday[0].start,
            EventTime::DateTimeZoned {
                datetime: date(2018, 3, 5).and_time(time(8, 0)),
                tzid: "America/New_York".to_string(),
            }
        );
        assert_eq!(monday[1].summary, "Core 2");
        assert_eq!(monday[1].location, None);
        assert_eq!(monday[1].color, Some(DisplayColor::Blue));

        assert_eq!(
            generator.metadata().and_then(|m| m.updated),
            Some(date(2018, 3, 5))
        );
    }

    #[tokio::test]
    async fn test_rerun_is_idempotent() {
        let tables = tables();
        let calendar = MemoryCalendar::new("Cal");
        let log = calendar.clone();
        let mut generator = Generator::attach(calendar).await.unwrap();

        generator.run(&ctx(&tables), |_, _| {}).await.unwrap();
        log.clear_ops();
        let summary = generator.run(&ctx(&tables), |_, _| {}).await.unwrap();

        assert_eq!(summary.unchanged, 2);
        assert_eq!(summary.rebuilt, 0);
        assert_eq!(log.writes(), 0);
        assert!(!log.ops().contains(&CalendarOp::Read(date(2018, 3, 2))));
    }

    #[tokio::test]
    async fn test_metadata_failure_does_not_fail_run() {
        let tables = tables();
        let calendar = MemoryCalendar::new("Cal").reject_description_writes();
        let mut generator = Generator::attach(calendar).await.unwrap();

        let summary = generator.run(&ctx(&tables), |_, _| {}).await.unwrap();

        assert!(!summary.metadata_saved);
        assert_eq!(summary.created, 3);
        assert_eq!(generator.metadata(), None);
    }

    #[tokio::test]
    async fn test_gate_proceeds_without_asking() {
        let calendar = MemoryCalendar::new("Cal")
            .with_description(r#"<schedgen version="0.2.0" updated="2018-03-04"/>"#);
        let generator = Generator::attach(calendar).await.unwrap();

        assert_eq!(
            generator.gate(date(2018, 3, 5), never_asked),
            Ok(RunGate::Proceed)
        );

        let fresh = Generator::attach(MemoryCalendar::new("Cal")).await.unwrap();
        assert_eq!(fresh.gate(date(2018, 3, 5), never_asked), Ok(RunGate::Proceed));
    }

    #[tokio::test]
    async fn test_gate_asks_when_already_run_today() {
        let calendar = MemoryCalendar::new("Cal")
            .with_description(r#"<schedgen version="0.2.0" updated="2018-03-05"/>"#);
        let generator = Generator::attach(calendar).await.unwrap();
        let today = date(2018, 3, 5);

        let accepted = generator.gate(today, || Ok::<_, Infallible>(true)).unwrap();
        let declined = generator.gate(today, || Ok::<_, Infallible>(false)).unwrap();

        assert_eq!(accepted, RunGate::AlreadyDone);
        assert!(accepted.should_run());
        assert_eq!(declined, RunGate::UserDeclined);
        assert!(!declined.should_run());
    }

    #[tokio::test]
    async fn test_gate_propagates_prompt_errors() {
        let calendar = MemoryCalendar::new("Cal")
            .with_description(r#"<schedgen version="0.2.0" updated="2018-03-05"/>"#);
        let generator = Generator::attach(calendar).await.unwrap();

        let result = generator.gate(date(2018, 3, 5), || Err("no terminal"));
        assert_eq!(result, Err("no terminal"));
    }
}
