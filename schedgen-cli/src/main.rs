mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use schedgen_core::config::SchedGenConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schedgen", version)]
#[command(about = "Fill a calendar with your class schedule from a color-day workbook")]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update the schedule calendar from the workbook
    Generate {
        /// Schedule workbook (.xlsx or .ods)
        #[arg(short, long)]
        workbook: Option<PathBuf>,

        /// Calendar to fill (defaults to calendar_name from the config)
        #[arg(short, long)]
        calendar: Option<String>,

        /// Don't add reminders to class periods
        #[arg(long)]
        no_reminders: bool,

        /// Run even if the calendar was already updated today
        #[arg(short, long)]
        force: bool,
    },
    /// Delete the schedule calendar and all its events
    Delete {
        #[arg(short, long)]
        calendar: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Show which color day it is
    WhatColor {
        #[arg(short, long)]
        workbook: Option<PathBuf>,

        /// Day to look up (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// List the events in the schedule calendar
    Events {
        #[arg(short, long)]
        calendar: Option<String>,

        /// First day to show (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Number of days to show
        #[arg(long, default_value_t = 1)]
        days: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = SchedGenConfig::load().context("Could not load configuration")?;

    match cli.command {
        Commands::Generate {
            workbook,
            calendar,
            no_reminders,
            force,
        } => {
            let workbook = resolve_workbook(&config, workbook)?;
            let calendar = calendar.unwrap_or_else(|| config.calendar_name.clone());
            commands::generate::run(
                &config,
                &workbook,
                &calendar,
                !no_reminders,
                force,
                cli.verbose > 0,
            )
            .await
        }
        Commands::Delete { calendar, force } => {
            let calendar = calendar.unwrap_or_else(|| config.calendar_name.clone());
            commands::delete::run(&config, &calendar, force).await
        }
        Commands::WhatColor { workbook, date } => {
            let workbook = resolve_workbook(&config, workbook)?;
            commands::what_color::run(&config, &workbook, date)
        }
        Commands::Events {
            calendar,
            date,
            days,
        } => {
            let calendar = calendar.unwrap_or_else(|| config.calendar_name.clone());
            commands::events::run(&config, &calendar, date, days).await
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_workbook(config: &SchedGenConfig, workbook: Option<PathBuf>) -> Result<PathBuf> {
    match workbook.or_else(|| config.workbook_path()) {
        Some(path) => Ok(path),
        None => anyhow::bail!(
            "No workbook given.\n\n\
            Pass one with:\n  \
            schedgen generate --workbook <path>\n\n\
            or set `workbook` in {}",
            SchedGenConfig::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "the config file".to_string())
        ),
    }
}
