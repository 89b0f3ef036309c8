//! Configuration management for videopanel
//!
//! This module handles loading and managing application configuration
//! from config files and environment variables. The theme preference is
//! deliberately absent: it always starts dark and is never stored.

use crate::utils::error::{IntoPanelError, PanelError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resource played when nothing else is configured
pub const DEFAULT_SOURCE_URL: &str =
    "https://astucepro.s3.amazonaws.com/Introduction_01/Initiation+%C3%A0+l+intelligence+artificielle_06/ai.mp4";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Media resource configuration
    pub source: SourceConfig,

    /// Playback behaviour
    pub playback: PlaybackConfig,

    /// General application settings
    pub general: GeneralConfig,
}

/// Media resource configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// URL of the media resource
    pub url: String,
}

/// Playback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Volume level at activation (0.0 - 1.0)
    pub initial_volume: f32,

    /// Rewind to the start when the surface reports end of media
    pub rewind_on_end: bool,

    /// How often the terminal host ticks the surface, in milliseconds
    pub tick_interval_ms: u64,

    /// Length of the resource played by the simulated surface, in seconds
    pub simulated_duration: f64,
}

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            rewind_on_end: false,
            tick_interval_ms: 250,
            simulated_duration: 120.0,
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from various sources
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. Default values
    /// 2. System config file (/etc/videopanel/config.toml on Linux)
    /// 3. User config file (~/.config/videopanel/config.toml on Linux)
    /// 4. Environment variables (VIDEOPANEL_* prefix)
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(system_path) = Self::system_config_path() {
            if system_path.exists() {
                config = Self::from_file(&system_path)?;
            }
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                config = Self::from_file(&user_path)?;
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Read a configuration file; missing keys fall back to defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .config_err(&format!("Failed to read config file {}", path.display()))?;

        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to user config file
    pub fn save(&self) -> Result<()> {
        let path = Self::user_config_path()
            .ok_or_else(|| PanelError::Config("Cannot determine user config path".to_string()))?;

        self.save_to(&path)
    }

    /// Write configuration to the given path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).config_err("Failed to create config directory")?;
        }

        let toml = toml::to_string_pretty(self).config_err("Failed to serialize config")?;
        std::fs::write(path, toml).config_err("Failed to write config file")?;

        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("VIDEOPANEL_SOURCE_URL") {
            self.source.url = url;
        }

        if let Ok(volume) = std::env::var("VIDEOPANEL_VOLUME") {
            self.playback.initial_volume = volume
                .parse()
                .map_err(|_| PanelError::Config("Invalid VIDEOPANEL_VOLUME".to_string()))?;
        }

        if let Ok(log_level) = std::env::var("VIDEOPANEL_LOG_LEVEL") {
            self.general.log_level = log_level;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.source.url.trim().is_empty() {
            return Err(PanelError::Config("Source URL must not be empty".to_string()));
        }

        if !(0.0..=1.0).contains(&self.playback.initial_volume) {
            return Err(PanelError::Config(
                "Initial volume must be between 0.0 and 1.0".to_string(),
            ));
        }

        if self.playback.tick_interval_ms == 0 {
            return Err(PanelError::Config("Tick interval must be non-zero".to_string()));
        }

        if !self.playback.simulated_duration.is_finite() || self.playback.simulated_duration <= 0.0 {
            return Err(PanelError::Config(
                "Simulated duration must be a positive number of seconds".to_string(),
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.general.log_level.as_str()) {
            return Err(PanelError::Config(format!(
                "Invalid log level '{}', must be one of: {:?}",
                self.general.log_level, valid_log_levels
            )));
        }

        Ok(())
    }

    /// Get system config file path
    fn system_config_path() -> Option<PathBuf> {
        if cfg!(target_os = "linux") {
            Some(PathBuf::from("/etc/videopanel/config.toml"))
        } else if cfg!(target_os = "windows") {
            std::env::var("PROGRAMDATA")
                .ok()
                .map(|p| PathBuf::from(p).join("videopanel").join("config.toml"))
        } else if cfg!(target_os = "macos") {
            Some(PathBuf::from("/Library/Application Support/videopanel/config.toml"))
        } else {
            None
        }
    }

    /// Get user config file path
    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("videopanel").join("config.toml"))
    }
}
