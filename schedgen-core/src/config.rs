//! Global schedgen configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::calendar::LocalStore;
use crate::error::{SchedGenError, SchedGenResult};
use crate::workbook::SheetLayout;

static DEFAULT_CALENDAR_DIR: &str = "~/calendar";
static DEFAULT_CALENDAR_NAME: &str = "BMSA Schedule";
static DEFAULT_TIMEZONE: &str = "America/New_York";
const DEFAULT_THROTTLE_MS: u64 = 1000;

fn default_calendar_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CALENDAR_DIR)
}

fn default_calendar_name() -> String {
    DEFAULT_CALENDAR_NAME.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_throttle_ms() -> u64 {
    DEFAULT_THROTTLE_MS
}

/// Global configuration at ~/.config/schedgen/config.toml
///
/// Calendar-specific settings (name, timezone, run metadata) live in each
/// calendar's .schedgen/config.toml instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedGenConfig {
    #[serde(default = "default_calendar_dir")]
    pub calendar_dir: PathBuf,

    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,

    /// Schedule workbook used when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workbook: Option<PathBuf>,

    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Pause after each event created or deleted
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,

    #[serde(default)]
    pub sheets: SheetLayout,
}

impl Default for SchedGenConfig {
    fn default() -> Self {
        SchedGenConfig {
            calendar_dir: default_calendar_dir(),
            calendar_name: default_calendar_name(),
            workbook: None,
            timezone: default_timezone(),
            throttle_ms: default_throttle_ms(),
            sheets: SheetLayout::default(),
        }
    }
}

impl SchedGenConfig {
    /// Load the global config, writing a commented default file first if
    /// there is none.
    pub fn load() -> SchedGenResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> SchedGenResult<Self> {
        let config: SchedGenConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| SchedGenError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SchedGenError::Config(e.to_string()))?;

        config.tz()?;
        Ok(config)
    }

    pub fn config_path() -> SchedGenResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SchedGenError::Config("Could not determine config directory".into()))?
            .join("schedgen");

        Ok(config_dir.join("config.toml"))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> SchedGenResult<()> {
        let contents = format!(
            "\
# schedgen configuration

# Where calendars are stored:
# calendar_dir = \"{}\"

# Calendar that `schedgen generate` fills:
# calendar_name = \"{}\"

# Schedule workbook (.xlsx or .ods) used when --workbook is not given:
# workbook = \"~/Documents/schedule.xlsx\"

# Timezone of the class times in the workbook:
# timezone = \"{}\"

# Pause after each event created or deleted, in milliseconds:
# throttle_ms = {}

# Sheet names in the workbook:
# [sheets]
# dates = \"Dates\"
# personalization = \"Personal Schedule\"
# non_schedule = [\"Calculating\", \"Date Not Found\", \"Days Til School\", \"PD\", \"No School\", \"Past Dates\"]
",
            DEFAULT_CALENDAR_DIR, DEFAULT_CALENDAR_NAME, DEFAULT_TIMEZONE, DEFAULT_THROTTLE_MS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SchedGenError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| SchedGenError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        expand(&self.calendar_dir)
    }

    pub fn workbook_path(&self) -> Option<PathBuf> {
        self.workbook.as_deref().map(expand)
    }

    pub fn store(&self) -> LocalStore {
        LocalStore::new(self.data_path())
    }

    pub fn tz(&self) -> SchedGenResult<Tz> {
        self.timezone.parse::<Tz>().map_err(|e| {
            SchedGenError::Config(format!("Invalid timezone '{}': {e}", self.timezone))
        })
    }

    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
