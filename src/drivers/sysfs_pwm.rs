//! Linux sysfs PWM channel (`/sys/class/pwm/pwmchipN/pwmM`).
//!
//! Implements `embedded_hal::pwm::SetDutyCycle` so the fan driver stays
//! board-agnostic.  Duty is written in nanoseconds of the configured
//! period.

use std::fs;
use std::path::{Path, PathBuf};

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use log::info;

use crate::error::ActuatorError;

pub const SYSFS_PWM_ROOT: &str = "/sys/class/pwm";

pub struct SysfsPwm {
    dir: PathBuf,
    period_ns: u32,
    max_duty: u16,
}

impl SysfsPwm {
    /// Export (if needed), set the period, start at 0% and enable.
    pub fn open(
        root: &Path,
        chip: u32,
        channel: u32,
        period_ns: u32,
        max_duty: u16,
    ) -> Result<Self, ActuatorError> {
        let chip_dir = root.join(format!("pwmchip{chip}"));
        let dir = chip_dir.join(format!("pwm{channel}"));

        if !dir.exists() {
            fs::write(chip_dir.join("export"), channel.to_string())
                .map_err(|_| ActuatorError::ExportFailed)?;
            if !dir.exists() {
                return Err(ActuatorError::ExportFailed);
            }
        }

        // Duty must never exceed the period, so zero it first.
        for (attr, value) in [
            ("duty_cycle", "0".to_owned()),
            ("period", period_ns.to_string()),
            ("enable", "1".to_owned()),
        ] {
            fs::write(dir.join(attr), value).map_err(|_| ActuatorError::ExportFailed)?;
        }

        info!(
            "SysfsPwm: {} enabled, period {} ns",
            dir.display(),
            period_ns
        );
        Ok(Self {
            dir,
            period_ns,
            max_duty: max_duty.max(1),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ErrorType for SysfsPwm {
    type Error = ActuatorError;
}

impl SetDutyCycle for SysfsPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), ActuatorError> {
        if duty > self.max_duty {
            return Err(ActuatorError::DutyOutOfRange);
        }
        let ns = u64::from(self.period_ns) * u64::from(duty) / u64::from(self.max_duty);
        fs::write(self.dir.join("duty_cycle"), ns.to_string())
            .map_err(|_| ActuatorError::PwmWriteFailed)
    }
}
