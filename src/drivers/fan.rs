//! Cooling fan driver.
//!
//! Maps a [`DutyLevel`] in the controller's normalized range (0–1023 by
//! default) onto any `embedded-hal` PWM channel, whatever its native
//! resolution.
//!
//! ## Failure policy
//!
//! Writes are fire-and-forget.  A failed write is logged and the previous
//! output stays in effect; the next transition tries again.

use embedded_hal::pwm::{Error as _, SetDutyCycle};
use log::{debug, warn};

use crate::config::PwmConfig;
use crate::control::hysteresis::FanState;

/// A duty cycle as `value / range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DutyLevel {
    value: u16,
    range: u16,
}

impl DutyLevel {
    /// `value` is clamped to `range`; a zero range is treated as 1.
    pub fn new(value: u16, range: u16) -> Self {
        let range = range.max(1);
        Self {
            value: value.min(range),
            range,
        }
    }

    /// The configured set-point for a fan state.
    pub fn for_state(state: FanState, pwm: &PwmConfig) -> Self {
        Self::new(pwm.level_for(state), pwm.range)
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    pub fn range(&self) -> u16 {
        self.range
    }
}

pub struct FanDriver<P> {
    pwm: P,
    current: Option<DutyLevel>,
}

impl<P: SetDutyCycle> FanDriver<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm, current: None }
    }

    pub fn set(&mut self, level: DutyLevel) {
        match self.pwm.set_duty_cycle_fraction(level.value, level.range) {
            Ok(()) => {
                debug!("Fan: duty {}/{}", level.value, level.range);
                self.current = Some(level);
            }
            Err(e) => warn!("Fan: PWM write failed ({:?}: {:?})", e.kind(), e),
        }
    }

    /// Last level successfully written, `None` before the first write.
    pub fn current(&self) -> Option<DutyLevel> {
        self.current
    }

    pub fn pwm(&self) -> &P {
        &self.pwm
    }
}
