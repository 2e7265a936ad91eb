// src/config/config_load.rs
//
// loading config.toml

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use super::config_types::*;
use crate::animation::shake::{validate_number_of_times, validate_total_duration};
use crate::error::ShakeError;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid shake defaults: {0}")]
    Invalid(#[from] ShakeError),

    #[error("invalid speech_duration {0}: must be a finite, non-negative number of seconds")]
    SpeechDuration(f32),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub style: StyleConfig,
    pub osc: OscConfig,
    pub shake: ShakeConfig,
    pub accessibility: AccessibilityConfig,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        // First try to load from the executable's directory
        if let Some(exe_config) = Self::load_from_exe_dir() {
            return exe_config;
        }

        // Fallback to loading from the current working directory
        Self::load_from_path(Path::new(CONFIG_FILE))
    }

    fn load_from_exe_dir() -> Option<Result<Self, ConfigError>> {
        let exe_path = std::env::current_exe().ok()?;
        let config_path = exe_path.parent()?.join(CONFIG_FILE);

        if config_path.exists() {
            Some(Self::load_from_path(&config_path))
        } else {
            None
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "loading config");
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_number_of_times(self.shake.number_of_times)?;
        validate_total_duration(self.shake.total_duration)?;
        let speech_duration = self.accessibility.speech_duration;
        if Duration::try_from_secs_f32(speech_duration).is_err() {
            warn!(speech_duration, "rejecting speech duration");
            return Err(ConfigError::SpeechDuration(speech_duration));
        }
        Ok(())
    }

    pub fn announcement_delay(&self) -> Duration {
        Duration::from_millis(self.accessibility.announcement_delay_ms)
    }

    pub fn speech_duration(&self) -> Duration {
        // fields are public, so a bad value can still arrive after validation
        Duration::try_from_secs_f32(self.accessibility.speech_duration).unwrap_or(Duration::ZERO)
    }
}
