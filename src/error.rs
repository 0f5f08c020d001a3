//! Error types
//!
//! Only configuration loading and opening the serial device surface errors to
//! callers. Line-level serial failures are swallowed by the input source.

use std::path::PathBuf;

/// Failure loading or validating a `GameConfig`
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for `GameConfig`
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values parsed but break a tuning constraint
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Failure connecting to the joystick device
#[derive(thiserror::Error, Debug)]
pub enum SerialError {
    #[error("could not open serial device {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why an inbound joystick line was discarded
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("expected 4 fields, got {0}")]
    FieldCount(usize),

    #[error("field is not an integer: {0:?}")]
    BadInteger(String),

    #[error("line is not valid UTF-8")]
    Decode,
}
