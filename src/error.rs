//! Typed error enums for every subsystem.
//!
//! None of these ever escape the control loop: sensor failures degrade to a
//! 0 °C reading, log failures are swallowed, and actuator writes are
//! fire-and-forget.  They exist so that each failure is named at the point
//! it is logged, and so that startup code can propagate them through
//! `anyhow`.

use core::fmt;

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The thermal zone file is missing or could not be read.
    Unavailable,
    /// The file was read but did not start with an integer.
    Malformed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "temperature source unavailable"),
            Self::Malformed => write!(f, "temperature source malformed"),
        }
    }
}

impl std::error::Error for SensorError {}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// The PWM channel could not be exported or configured.
    ExportFailed,
    /// Duty-cycle write failed.
    PwmWriteFailed,
    /// Requested duty exceeds the channel's maximum.
    DutyOutOfRange,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExportFailed => write!(f, "PWM export failed"),
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::DutyOutOfRange => write!(f, "duty cycle out of range"),
        }
    }
}

impl std::error::Error for ActuatorError {}

impl embedded_hal::pwm::Error for ActuatorError {
    fn kind(&self) -> embedded_hal::pwm::ErrorKind {
        embedded_hal::pwm::ErrorKind::Other
    }
}

// ---------------------------------------------------------------------------
// Activity log errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogError {
    /// The log file could not be opened, read or written.
    Unavailable,
    /// The temporary file for a rotation could not be created or written.
    /// The original log is left untouched.
    RotationFailed,
    /// The rotated copy could not be moved over the original.
    ReplaceFailed,
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "log file unavailable"),
            Self::RotationFailed => write!(f, "could not create rotation file"),
            Self::ReplaceFailed => write!(f, "could not replace log with rotated copy"),
        }
    }
}

impl std::error::Error for LogError {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ConfigError {
    /// No config file at the given path.
    NotFound,
    /// The file exists but is not valid JSON for [`SystemConfig`](crate::config::SystemConfig).
    Corrupted,
    /// A field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error while reading the file.
    IoError,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
