//! Utility module for videopanel
//!
//! This module provides common utilities used throughout the crate:
//! - Error handling with custom error types
//! - Configuration management
//! - Time readout formatting

pub mod config;
pub mod error;

// Re-export commonly used items
pub use config::{Config, GeneralConfig, PlaybackConfig, SourceConfig};
pub use error::{PanelError, Result};

/// Initialize the application configuration
///
/// Loads configuration from:
/// 1. Default values
/// 2. System configuration file
/// 3. User configuration file
/// 4. Environment variables
pub fn load_config() -> Result<Config> {
    Config::load()
}

/// Format a playback position for the time readout
///
/// Returns "MM:SS" with both fields zero-padded. Minutes are not rolled over
/// into hours, so one hour reads "60:00". Negative or non-finite input reads
/// as "00:00".
pub fn format_time(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    // floor(t / 60) == floor(t) / 60 for t >= 0, without the float rounding
    let whole = seconds.floor() as u64;

    format!("{:02}:{:02}", whole / 60, whole % 60)
}
