//! Tracker configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use gamespace_overlay::PositionerConfig;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Movement before a touch counts as a drag
    pub touch_slop_dp: f32,
    pub long_press_timeout_ms: u64,
    /// Gap kept between the overlay and the system bars
    pub safe_margin_dp: f32,
    /// Distance below the status bar before the first drag
    pub initial_offset_dp: f32,
    /// Poll rate when the host can't push foreground changes
    pub foreground_poll_interval_ms: u64,
    /// Fallback when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("gamespace.db"),
            touch_slop_dp: 8.0,
            long_press_timeout_ms: 400,
            safe_margin_dp: 4.0,
            initial_offset_dp: 8.0,
            foreground_poll_interval_ms: 500,
            log_filter: "info".to_string(),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("GameSpace"))
            .unwrap_or_else(|| PathBuf::from(".gamespace"))
    }

    /// Read a JSON config file; a missing file gives the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.foreground_poll_interval_ms == 0 {
            return Err(CoreError::Config(
                "foreground_poll_interval_ms must be positive".to_string(),
            ));
        }
        if self.touch_slop_dp < 0.0 || self.safe_margin_dp < 0.0 {
            return Err(CoreError::Config(
                "touch_slop_dp and safe_margin_dp must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn positioner(&self) -> PositionerConfig {
        PositionerConfig {
            touch_slop_dp: self.touch_slop_dp,
            long_press_timeout: Duration::from_millis(self.long_press_timeout_ms),
            safe_margin_dp: self.safe_margin_dp,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.foreground_poll_interval_ms)
    }

    /// Install the subscriber with `log_filter` as the `RUST_LOG` fallback
    pub fn init_logging(&self) {
        crate::init_logging_with(&self.log_filter);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Simple dirs implementation for the data directory
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(any(target_os = "linux", target_os = "android"))]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(
            target_os = "windows",
            target_os = "macos",
            target_os = "linux",
            target_os = "android"
        )))]
        {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new(PathBuf::from("/data"));
        assert_eq!(config.database_path, PathBuf::from("/data/gamespace.db"));
        assert_eq!(config.long_press_timeout_ms, 400);
        assert_eq!(config.positioner(), PositionerConfig::default());
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"long_press_timeout_ms": 600, "log_filter": "debug"}"#)
                .unwrap();
        assert_eq!(config.long_press_timeout_ms, 600);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.safe_margin_dp, 4.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("gamespace-config-{}", std::process::id()));
        let path = dir.join("config.json");

        assert_eq!(Config::load(&path).unwrap(), Config::default());

        let mut config = Config::new(dir.clone());
        config.foreground_poll_interval_ms = 250;
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let mut config = Config::default();
        config.foreground_poll_interval_ms = 0;
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_init_logging_uses_filter() {
        let config = Config {
            log_filter: "gamespace=debug".to_string(),
            ..Config::new(PathBuf::from("/tmp/gs"))
        };
        config.init_logging();
        // Second install is a no-op
        config.init_logging();
    }
}
