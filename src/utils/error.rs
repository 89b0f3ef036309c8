//! Error types for videopanel
//!
//! Playback commands never fail (they no-op without a surface), so these
//! errors cover the layers around the controller: configuration, command
//! parsing and lifecycle misuse. We use thiserror for the library error type
//! and anyhow in the binary.

use thiserror::Error;

/// Main error type for videopanel
#[derive(Error, Debug)]
pub enum PanelError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("File error: {0}")]
    FileIO(#[from] std::io::Error),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not valid in the controller's current lifecycle state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl From<toml::de::Error> for PanelError {
    fn from(err: toml::de::Error) -> Self {
        PanelError::Config(format!("TOML parse error: {}", err))
    }
}

/// Convenience type alias for Results in videopanel
pub type Result<T> = std::result::Result<T, PanelError>;

/// Extension trait for converting other errors to PanelError
pub trait IntoPanelError<T> {
    /// Convert this error into a PanelError with the given context
    fn config_err(self, context: &str) -> Result<T>;
    fn input_err(self, context: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> IntoPanelError<T> for std::result::Result<T, E> {
    fn config_err(self, context: &str) -> Result<T> {
        self.map_err(|e| PanelError::Config(format!("{}: {}", context, e)))
    }

    fn input_err(self, context: &str) -> Result<T> {
        self.map_err(|e| PanelError::InvalidInput(format!("{}: {}", context, e)))
    }
}
