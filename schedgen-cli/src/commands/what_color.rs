use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use schedgen_core::config::SchedGenConfig;
use schedgen_core::workbook::{Workbook, tables};

use crate::commands::today_in;
use crate::render::Render;

pub fn run(config: &SchedGenConfig, workbook: &Path, date: Option<NaiveDate>) -> Result<()> {
    let date = match date {
        Some(date) => date,
        None => today_in(config.tz()?),
    };

    let dates = Workbook::open(workbook)
        .and_then(|book| tables::load_dates(&book, &config.sheets))
        .with_context(|| format!("Could not load {}", workbook.display()))?;

    println!("{}", dates.what_color(date).render());

    Ok(())
}
