use std::path::Path;

use anyhow::{Context, Result};
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use schedgen_core::calendar::Calendar;
use schedgen_core::config::SchedGenConfig;
use schedgen_core::reconcile::{DayOutcome, RunContext};
use schedgen_core::run::{Generator, RunGate};
use schedgen_core::workbook::{Tables, Workbook};

use crate::commands::today_in;
use crate::render::Render;
use crate::utils::tui;

pub async fn run(
    config: &SchedGenConfig,
    workbook: &Path,
    calendar_name: &str,
    reminders: bool,
    force: bool,
    verbose: bool,
) -> Result<()> {
    let tz = config.tz()?;
    let today = today_in(tz);
    tracing::debug!(workbook = %workbook.display(), calendar = calendar_name, %today, "starting run");

    let spinner = tui::create_spinner(format!("Reading {}", workbook.display()));
    let tables = Workbook::open(workbook).and_then(|book| Tables::load(&book, &config.sheets));
    spinner.finish_and_clear();
    let tables = tables.with_context(|| format!("Could not load {}", workbook.display()))?;

    let mut store = config.store();
    let mut generator = Generator::open(&mut store, calendar_name, tz)
        .await
        .with_context(|| format!("Could not open calendar '{}'", calendar_name))?;

    if generator.was_created() {
        println!("Created calendar {}", calendar_name.bold());
    }

    let gate = if force {
        RunGate::Proceed
    } else {
        generator.gate(today, || {
            Confirm::new()
                .with_prompt(format!(
                    "{} was already updated today. Run again?",
                    generator.calendar().name()
                ))
                .default(false)
                .interact()
        })?
    };

    if !gate.should_run() {
        println!("{}", "Nothing to do".dimmed());
        return Ok(());
    }

    let ctx = RunContext::new(today, &tables)
        .with_reminders(reminders)
        .with_throttle(config.throttle())
        .with_timezone(tz);

    let progress = tui::create_day_progress(
        format!("Updating {}", calendar_name),
        tables.dates.len() as u64,
    );

    let summary = generator
        .run(&ctx, |day, outcome| {
            // Quiet runs only list the days that changed
            if verbose || matches!(outcome, DayOutcome::Rebuilt { .. }) {
                progress.println((day, outcome).render());
            }
            progress.inc(1);
        })
        .await;

    progress.finish_and_clear();
    let summary = summary.context("Run stopped before finishing; run again to resume")?;

    println!("{}", summary.render());

    Ok(())
}
