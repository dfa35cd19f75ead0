//! Error types for the outer surfaces (tuning files, high-score storage).
//!
//! The simulation itself never fails: degenerate input is absorbed there.

use std::fmt;

/// Tuning could not be loaded or is out of range
#[derive(Debug)]
pub enum ConfigError {
    /// Malformed JSON or wrong field types
    Parse(serde_json::Error),
    /// A field parsed but its value is unusable
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "failed to parse tuning: {e}"),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid tuning field `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// High score could not be read from or written to its backing store
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Format(serde_json::Error),
    /// Browser storage is missing or refused the operation
    Unavailable,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "high score I/O error: {e}"),
            StoreError::Format(e) => write!(f, "high score file is malformed: {e}"),
            StoreError::Unavailable => write!(f, "high score storage unavailable"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Format(e) => Some(e),
            StoreError::Unavailable => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Format(e)
    }
}
