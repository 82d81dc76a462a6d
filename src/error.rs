use crate::prelude::*;

use std::process::ExitCode;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClockError {
    InvalidPeriod,
    Io,
    ConfigError(String),
    TimeSource(String),
}

impl std::fmt::Display for ClockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockError::InvalidPeriod => write!(f, "Tick period must be greater than zero"),
            ClockError::Io => write!(f, "I/O error"),
            ClockError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ClockError::TimeSource(msg) => write!(f, "Time source error: {}", msg),
        }
    }
}

impl std::error::Error for ClockError {}

impl From<std::io::Error> for ClockError {
    fn from(err: std::io::Error) -> Self {
        error!("IoError: {}", err);
        ClockError::Io
    }
}

impl From<time::error::IndeterminateOffset> for ClockError {
    fn from(err: time::error::IndeterminateOffset) -> Self {
        ClockError::TimeSource(err.to_string())
    }
}

impl From<ClockError> for ExitCode {
    fn from(value: ClockError) -> Self {
        match value {
            ClockError::InvalidPeriod => ExitCode::from(2),
            ClockError::ConfigError(_) => ExitCode::from(3),
            ClockError::Io => ExitCode::from(6),
            ClockError::TimeSource(_) => ExitCode::from(7),
        }
    }
}
