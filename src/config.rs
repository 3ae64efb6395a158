use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::session::controller::DEFAULT_DURATION_SECS;
use crate::session::question::DrillMode;

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_timed_duration_secs")]
    pub timed_duration_secs: u64,
    #[serde(default)]
    pub default_mode: DrillMode,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_timed_duration_secs() -> u64 {
    DEFAULT_DURATION_SECS
}
fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_tick_rate_ms() -> u64 {
    250
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timed_duration_secs: default_timed_duration_secs(),
            default_mode: DrillMode::default(),
            theme: default_theme(),
            tick_rate_ms: default_tick_rate_ms(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("drillmaster")
            .join("config.toml")
    }

    pub fn default_log_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("drillmaster")
            .join("drillmaster.log")
    }

    /// Clamp numeric settings into usable ranges and reset unknown log levels.
    /// Call after deserialization; hand-edited files can hold anything.
    pub fn normalize(&mut self) {
        self.timed_duration_secs = self.timed_duration_secs.clamp(10, 3600);
        self.tick_rate_ms = self.tick_rate_ms.clamp(50, 1000);
        let level = self.log_level.trim().to_ascii_lowercase();
        self.log_level = if LOG_LEVELS.contains(&level.as_str()) {
            level
        } else {
            default_log_level()
        };
        // The mixed drill only exists as the timed challenge.
        if self.default_mode == DrillMode::Mixed {
            self.default_mode = DrillMode::Square;
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        match self.log_level.as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.timed_duration_secs, 60);
        assert_eq!(config.default_mode, DrillMode::Square);
        assert_eq!(config.tick_rate_ms, 250);
    }

    #[test]
    fn test_config_partial_file_keeps_defaults() {
        let toml_str = r#"
timed_duration_secs = 90
default_mode = "cube"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.timed_duration_secs, 90);
        assert_eq!(config.default_mode, DrillMode::Cube);
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_unknown_mode_fails_to_parse() {
        assert!(toml::from_str::<Config>("default_mode = \"division\"").is_err());
    }

    #[test]
    fn test_normalize_clamps_ranges() {
        let mut config = Config {
            timed_duration_secs: 1,
            tick_rate_ms: 10_000,
            ..Config::default()
        };
        config.normalize();
        assert_eq!(config.timed_duration_secs, 10);
        assert_eq!(config.tick_rate_ms, 1000);
    }

    #[test]
    fn test_normalize_log_level() {
        let mut config = Config {
            log_level: " DEBUG ".to_string(),
            ..Config::default()
        };
        config.normalize();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.level_filter(), LevelFilter::Debug);

        config.log_level = "verbose".to_string();
        config.normalize();
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_normalize_rejects_mixed_default_mode() {
        let mut config = Config {
            default_mode: DrillMode::Mixed,
            ..Config::default()
        };
        config.normalize();
        assert_eq!(config.default_mode, DrillMode::Square);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            timed_duration_secs: 120,
            default_mode: DrillMode::Percentage,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timed_duration_secs = \"soon\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
