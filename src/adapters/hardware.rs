//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`TemperatureSensor`] and the [`FanDriver`], exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  This is the only module
//! that touches the thermal zone and the PWM channel.

use embedded_hal::pwm::SetDutyCycle;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::control::hysteresis::Celsius;
use crate::drivers::fan::{DutyLevel, FanDriver};
use crate::sensors::temperature::TemperatureSensor;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P> {
    sensor: TemperatureSensor,
    fan: FanDriver<P>,
}

impl<P: SetDutyCycle> HardwareAdapter<P> {
    pub fn new(sensor: TemperatureSensor, fan: FanDriver<P>) -> Self {
        Self { sensor, fan }
    }

    pub fn fan(&self) -> &FanDriver<P> {
        &self.fan
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P: SetDutyCycle> SensorPort for HardwareAdapter<P> {
    fn read_temperature(&mut self) -> Celsius {
        self.sensor.read()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P: SetDutyCycle> ActuatorPort for HardwareAdapter<P> {
    fn set_duty(&mut self, level: DutyLevel) {
        self.fan.set(level);
    }
}
