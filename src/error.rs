//! Custom error types for the titlebar widget

use thiserror::Error;

/// Main error type for titlebar operations
#[derive(Error, Debug)]
pub enum TitlebarError {
    #[error("Invalid color {0:?}: expected exactly six hex digits, optionally prefixed with '#'")]
    InvalidColor(String),

    #[error("Invalid lighten percentage {0}: expected a value in [-1, 1]")]
    InvalidPercent(f64),

    #[error("Invalid shortcut {0:?}")]
    InvalidShortcut(String),

    #[error("Failed to register shortcut {accelerator}: {reason}")]
    ShortcutRegistration { accelerator: String, reason: String },

    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for TitlebarError {
    fn from(e: toml::de::Error) -> Self {
        TitlebarError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for TitlebarError {
    fn from(e: toml::ser::Error) -> Self {
        TitlebarError::Serialization(e.to_string())
    }
}

/// Result type alias for titlebar operations
pub type TitlebarResult<T> = Result<T, TitlebarError>;
