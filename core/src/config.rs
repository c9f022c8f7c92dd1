use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::metrics::MetricInputs;
use crate::model::rating::RatingThresholds;

const DATA_DIR_NAME: &str = ".oee-dashboard";
const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_EXPORT_FILE: &str = "oee_log.csv";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// File name (or path) the CSV export is written to.
    pub export_file: PathBuf,
    /// Inputs a new session starts with.
    pub defaults: MetricInputs,
    pub thresholds: RatingThresholds,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            export_file: PathBuf::from(DEFAULT_EXPORT_FILE),
            defaults: MetricInputs::default(),
            thresholds: RatingThresholds::default(),
        }
    }
}

impl DashboardConfig {
    /// Loads `~/.oee-dashboard/config.toml`, falling back to defaults when
    /// the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&data_dir()?.join(CONFIG_FILE_NAME))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// `~/.oee-dashboard`, holding the optional config file and the TUI log.
pub fn data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(Error::NoHomeDir)?;
    Ok(home_dir.join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(DashboardConfig::parse("").unwrap(), DashboardConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let content = r#"
export_file = "shift_a.csv"

[defaults]
planned_production_time = 420.0
total_units = 500

[thresholds]
good = 0.9
"#;
        let config = DashboardConfig::parse(content).unwrap();

        assert_eq!(config.export_file, PathBuf::from("shift_a.csv"));
        assert_eq!(config.defaults.planned_production_time, 420.0);
        assert_eq!(config.defaults.total_units, 500);
        // Untouched fields keep their defaults.
        assert_eq!(config.defaults.downtime, 60.0);
        assert_eq!(config.defaults.good_units, 780);
        assert_eq!(config.thresholds.fair, 0.6);
        assert_eq!(config.thresholds.good, 0.9);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[defaults]\ntotal_units = \"many\"\n").unwrap();

        assert!(matches!(
            DashboardConfig::load_from(&path),
            Err(Error::Config { .. })
        ));
    }
}
