//! System configuration parameters
//!
//! All tunable parameters for the fan controller.  Defaults mirror the
//! values the controller has always shipped with; a JSON file can override
//! them at startup.  Nothing is reloaded at runtime.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::control::hysteresis::{Celsius, FanState};
use crate::error::ConfigError;

/// Optional startup override location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/tempfan.json";

/// Band boundaries for the three fan states.
///
/// `temp < low` is Off, `low..=high` is Slow, `temp > high` is Fast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    low: Celsius,
    high: Celsius,
}

impl Thresholds {
    /// Build a threshold pair. `low` must be strictly below `high`.
    pub fn new(low: Celsius, high: Celsius) -> Result<Self, ConfigError> {
        if low >= high {
            return Err(ConfigError::ValidationFailed(
                "thresholds.low must be < thresholds.high",
            ));
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> Celsius {
        self.low
    }

    pub fn high(&self) -> Celsius {
        self.high
    }

    /// Map a temperature onto its band. Both boundaries land in `Slow`.
    pub fn classify(&self, temp: Celsius) -> FanState {
        if temp < self.low {
            FanState::Off
        } else if temp > self.high {
            FanState::Fast
        } else {
            FanState::Slow
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { low: 55, high: 68 }
    }
}

/// PWM output parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PwmConfig {
    /// `/sys/class/pwm/pwmchip<chip>`
    pub chip: u32,
    /// Channel number under the chip.
    pub channel: u32,
    /// PWM period in nanoseconds.
    pub period_ns: u32,
    /// Top of the normalized duty range (100%).
    pub range: u16,
    /// Normalized duty for the Slow state (50%).
    pub mid: u16,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            chip: 0,
            channel: 0,
            period_ns: 1_000_000, // 1 kHz
            range: 1023,
            // Raspberry Pi fans tend to stall at 512, try ~750 there.
            mid: 512,
        }
    }
}

impl PwmConfig {
    /// Normalized duty for a fan state: 0%, `mid`, 100%.
    pub fn level_for(&self, state: FanState) -> u16 {
        match state {
            FanState::Off => 0,
            FanState::Slow => self.mid,
            FanState::Fast => self.range,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Control ---
    pub thresholds: Thresholds,
    /// Minimum change (°C) from the last acted-upon reading before the
    /// bands are re-evaluated.
    pub diff_temp_c: Celsius,

    // --- Timing ---
    /// Seconds between temperature reads.
    pub read_interval_secs: u64,
    /// Seconds between "still running" heartbeat lines.
    pub alive_interval_secs: u64,

    // --- Activity log ---
    /// Maximum number of lines retained in the activity log.
    pub max_log_lines: usize,
    pub log_path: PathBuf,

    // --- Hardware ---
    /// Thermal zone file yielding degrees or millidegrees.
    pub temp_path: PathBuf,
    pub pwm: PwmConfig,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            diff_temp_c: 2,

            read_interval_secs: 5,
            alive_interval_secs: 600, // 10 min

            max_log_lines: 1000,
            log_path: PathBuf::from("/var/log/tempfan.log"),

            temp_path: PathBuf::from("/sys/class/thermal/thermal_zone0/temp"),
            pwm: PwmConfig::default(),
        }
    }
}

impl SystemConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::IoError,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }

    /// Range-check every field. Rejects rather than clamps.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Deserialization bypasses `Thresholds::new`.
        Thresholds::new(self.thresholds.low, self.thresholds.high)?;
        if self.diff_temp_c < 0 {
            return Err(ConfigError::ValidationFailed("diff_temp_c must be >= 0"));
        }
        if self.read_interval_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "read_interval_secs must be > 0",
            ));
        }
        if self.alive_interval_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "alive_interval_secs must be > 0",
            ));
        }
        if self.max_log_lines == 0 {
            return Err(ConfigError::ValidationFailed("max_log_lines must be > 0"));
        }
        if self.pwm.range == 0 || self.pwm.mid > self.pwm.range {
            return Err(ConfigError::ValidationFailed(
                "pwm.mid must be within 0..=pwm.range and range > 0",
            ));
        }
        if self.pwm.period_ns == 0 {
            return Err(ConfigError::ValidationFailed("pwm.period_ns must be > 0"));
        }
        Ok(())
    }
}
