//! Per-calendar local configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SchedGenError, SchedGenResult};

/// Configuration stored in each calendar's .schedgen/config.toml
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct CalendarConfig {
    pub name: String,

    #[serde(default)]
    pub timezone: Option<String>,

    /// Hex display color of the calendar itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CalendarConfig {
    pub fn path(calendar_dir: &Path) -> std::path::PathBuf {
        calendar_dir.join(".schedgen/config.toml")
    }

    /// Load config from .schedgen/config.toml
    pub fn load(calendar_dir: &Path) -> SchedGenResult<Self> {
        let path = Self::path(calendar_dir);
        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|e| {
            SchedGenError::Config(format!("Invalid calendar config {}: {e}", path.display()))
        })
    }

    /// Save config to .schedgen/config.toml
    pub fn save(&self, calendar_dir: &Path) -> SchedGenResult<()> {
        let dir = calendar_dir.join(".schedgen");
        std::fs::create_dir_all(&dir)?;

        let content =
            toml::to_string_pretty(self).map_err(|e| SchedGenError::Config(e.to_string()))?;

        std::fs::write(dir.join("config.toml"), content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalendarConfig {
            name: "BMSA Schedule".to_string(),
            timezone: Some("America/New_York".to_string()),
            color: None,
            description: Some("<schedgen version=\"0.2.0\"/>".to_string()),
        };

        config.save(dir.path()).unwrap();
        let loaded = CalendarConfig::load(dir.path()).unwrap();

        assert_eq!(loaded.name, "BMSA Schedule");
        assert_eq!(loaded.timezone.as_deref(), Some("America/New_York"));
        assert_eq!(loaded.description, config.description);
        assert_eq!(loaded.color, None);
    }

    #[test]
    fn test_load_missing_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CalendarConfig::load(dir.path()).is_err());
    }
}
