// ---------------------------------------------------------------------------
// ConfigError / StepError: typed failures of the drivetrain contract
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors raised while building a [`crate::simulator::Simulator`] from a
/// [`crate::config::DrivetrainConfig`].
///
/// A config that fails validation must never produce a simulator; callers get
/// this error instead of a partially constructed instance.
#[derive(Debug)]
pub enum ConfigError {
    /// The gear table needs neutral plus at least one forward gear.
    TooFewGears { found: usize },
    /// A rate, ratio, radius or shift factor was zero or negative.
    NonPositive { field: &'static str, value: f32 },
    /// A field was NaN or infinite.
    NonFinite { field: &'static str },
    /// `min_rpm` must be strictly below `max_rpm`.
    InvertedRpmBounds { min: f32, max: f32 },
    /// The JSON document could not be parsed into a config.
    Parse(String),
    /// The config file could not be read.
    Io(std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TooFewGears { found } => write!(
                f,
                "Gear table needs neutral and at least one gear, found {found} entries"
            ),
            ConfigError::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            ConfigError::NonFinite { field } => write!(f, "{field} must be a finite number"),
            ConfigError::InvertedRpmBounds { min, max } => {
                write!(f, "min_rpm ({min}) must be below max_rpm ({max})")
            }
            ConfigError::Parse(msg) => write!(f, "Config parse error: {msg}"),
            ConfigError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// Errors raised by [`crate::simulator::Simulator::step`].
///
/// Rejected gear changes are not errors; they are reported through
/// [`crate::simulator::StepReport`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepError {
    /// `dt` was negative, NaN or infinite. The state is left untouched.
    InvalidArgument { dt: f32 },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::InvalidArgument { dt } => {
                write!(f, "Invalid time step: dt must be finite and >= 0, got {dt}")
            }
        }
    }
}

impl std::error::Error for StepError {}
