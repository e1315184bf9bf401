//! Error types for settings loading and validation.
//!
//! The simulation itself is total over its inputs; only configuration
//! crossing the storage boundary can fail.

use std::fmt;

/// Errors that can occur while loading or validating [`crate::Settings`].
#[derive(Debug)]
pub enum SettingsError {
    /// Settings JSON could not be parsed or serialized.
    Json(serde_json::Error),
    /// Settings file could not be read or written.
    Io(std::io::Error),
    /// Color string is not `#rrggbb`.
    InvalidColor(String),
    /// A numeric field is out of its allowed range.
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Json(e) => write!(f, "Failed to parse settings: {}", e),
            SettingsError::Io(e) => write!(f, "Failed to access settings file: {}", e),
            SettingsError::InvalidColor(s) => {
                write!(f, "Invalid color {:?}, expected #rrggbb", s)
            }
            SettingsError::InvalidValue { field, reason } => {
                write!(f, "Invalid setting `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Json(e) => Some(e),
            SettingsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}
