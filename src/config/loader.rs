use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::types::{Config, UpstreamMode};

const APP_DIR: &str = "divergence-meter";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/divergence-meter/config.toml` on Linux, or the
    /// platform equivalent via `dirs::config_dir()`. Falls back to the
    /// current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join(APP_DIR).join("config.toml")
    }

    /// Default log file location: the state dir where the platform has one,
    /// else the cache dir.
    pub fn log_path() -> PathBuf {
        let base = dirs::state_dir()
            .or_else(dirs::cache_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        base.join(APP_DIR).join("meter.log")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from(&path)
    }

    /// Loads an explicit config file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Both meter periods are non-zero
    /// - The Steins;Gate chance is a probability
    /// - The UI tick is non-zero
    /// - TCP mode has an address to connect to
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.meter.shuffle_period_ms == 0 {
            return Err(invalid("meter.shuffle_period_ms must be greater than 0"));
        }
        if self.meter.lock_period_ms == 0 {
            return Err(invalid("meter.lock_period_ms must be greater than 0"));
        }

        let chance = self.simulator.steins_gate_chance;
        if !(0.0..=1.0).contains(&chance) {
            return Err(ConfigError::ValidationError {
                message: format!("simulator.steins_gate_chance must be within [0, 1], got {chance}"),
            });
        }

        if self.ui.tick_ms == 0 {
            return Err(invalid("ui.tick_ms must be greater than 0"));
        }

        if self.upstream.mode == UpstreamMode::Tcp && self.upstream.address.trim().is_empty() {
            return Err(invalid("upstream.address is required in tcp mode"));
        }

        Ok(())
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError {
        message: message.to_string(),
    }
}
