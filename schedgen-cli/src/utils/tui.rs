use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICKS: &[&str] = &["-", "\\", "|", "/"];

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(TICKS)
            .template("{msg} {spinner}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Spinner with a day counter, for walking the date table.
pub fn create_day_progress(message: String, days: u64) -> ProgressBar {
    let progress = ProgressBar::new(days);
    progress.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(TICKS)
            .template("{msg} {spinner} {pos}/{len} days")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.set_message(message);
    progress.enable_steady_tick(Duration::from_millis(80));
    progress
}
