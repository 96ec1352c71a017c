//! CPU temperature from a Linux thermal zone file.
//!
//! The file holds a single integer, millidegrees on most kernels but plain
//! degrees on some vendor BSPs.  Anything `>= 1000` is divided by 1000.
//! This is a heuristic, not a unit check: a genuine 1000 °C would be read
//! as 1 °C, which no SBC survives anyway.
//!
//! ## Failure policy
//!
//! A missing or unreadable file reads as 0 °C, which drives the fan Off.
//! The controller never sees an error.  Availability changes are logged
//! once each way so operators can tell a cold board from a dead sensor.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::control::hysteresis::Celsius;
use crate::error::SensorError;

/// Readings at or above this are treated as millidegrees.
const MILLI_THRESHOLD: i64 = 1000;

pub struct TemperatureSensor {
    path: PathBuf,
    available: bool,
}

impl TemperatureSensor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            available: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and normalize. 0 on any failure.
    pub fn read(&mut self) -> Celsius {
        match self.try_read() {
            Ok(celsius) => {
                if !self.available {
                    info!("Temperature source {} recovered", self.path.display());
                    self.available = true;
                }
                celsius
            }
            Err(e) => {
                if self.available {
                    warn!(
                        "Temperature source {}: {} (reading as 0\u{00b0}C)",
                        self.path.display(),
                        e
                    );
                    self.available = false;
                }
                0
            }
        }
    }

    /// Read and normalize, reporting failure.
    pub fn try_read(&self) -> Result<Celsius, SensorError> {
        let text = std::fs::read_to_string(&self.path).map_err(|_| SensorError::Unavailable)?;
        let raw = parse_leading_int(&text).ok_or(SensorError::Malformed)?;
        Ok(normalize(raw))
    }
}

/// Unit heuristic: `>= 1000` is millidegrees.
pub fn normalize(raw: i64) -> Celsius {
    let degrees = if raw >= MILLI_THRESHOLD { raw / 1000 } else { raw };
    degrees.clamp(i64::from(Celsius::MIN), i64::from(Celsius::MAX)) as Celsius
}

/// Parse the integer prefix of the first whitespace-delimited token.
///
/// `"45123\n"` and `"45123abc"` both give 45123; a token with no leading
/// digits gives `None`.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let token = text.split_whitespace().next()?;
    let (sign, digits) = match token.as_bytes().first()? {
        b'-' => (-1, &token[1..]),
        b'+' => (1, &token[1..]),
        _ => (1, token),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|v| sign * v)
}
