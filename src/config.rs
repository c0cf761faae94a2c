//! Engine configuration file support.
//!
//! This module provides utilities for reading engine configuration from
//! TOML configuration files. Every setting has a default, so an empty
//! document (or no file at all) yields a fully working configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::services::boundary::DEFAULT_RING_STEPS;
use crate::services::severity::SeverityPalette;
use crate::services::simulator::SimulatorConfig;

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Engine configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub engine: EngineSettings,
    /// Severity color table override
    #[serde(default)]
    pub severity_colors: SeverityPalette,
}

/// Core engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Milliseconds between live-update ticks
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,
    /// Segments per zone boundary ring
    #[serde(default = "default_circle_resolution_steps")]
    pub circle_resolution_steps: u32,
    /// Inclusive [min, max] bounds for the per-tick counter delta
    #[serde(default = "default_random_delta_range")]
    pub random_delta_range: (i64, i64),
    /// Deterministic simulator seed; omit for OS entropy
    #[serde(default)]
    pub random_seed: Option<u64>,
}

fn default_update_interval_ms() -> u64 {
    30_000
}

fn default_circle_resolution_steps() -> u32 {
    DEFAULT_RING_STEPS
}

fn default_random_delta_range() -> (i64, i64) {
    (-1, 2)
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            update_interval_ms: default_update_interval_ms(),
            circle_resolution_steps: default_circle_resolution_steps(),
            random_delta_range: default_random_delta_range(),
            random_seed: None,
        }
    }
}

impl EngineConfig {
    /// Load engine configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(EngineConfig)` if read, parsed, and validated successfully
    /// * `Err(ConfigError)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load engine configuration from the default location.
    ///
    /// Searches for `healthmap.toml` in:
    /// 1. Current directory
    /// 2. `config/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = vec![
            PathBuf::from("healthmap.toml"),
            PathBuf::from("config/healthmap.toml"),
            PathBuf::from("../healthmap.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::Invalid(
            "No healthmap.toml found in standard locations".to_string(),
        ))
    }

    /// Check value ranges. The file loaders call this automatically;
    /// hand-built configurations should call it before use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.update_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "update_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.engine.circle_resolution_steps < 3 {
            return Err(ConfigError::Invalid(format!(
                "circle_resolution_steps must be at least 3, got {}",
                self.engine.circle_resolution_steps
            )));
        }
        let (min, max) = self.engine.random_delta_range;
        if min > max {
            return Err(ConfigError::Invalid(format!(
                "random_delta_range minimum {} exceeds maximum {}",
                min, max
            )));
        }
        Ok(())
    }

    /// Simulator settings derived from this configuration.
    pub fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig {
            interval: Duration::from_millis(self.engine.update_interval_ms),
            delta_range: self.engine.random_delta_range,
            seed: self.engine.random_seed,
        }
    }
}
