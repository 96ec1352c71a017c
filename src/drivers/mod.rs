//! Actuator drivers.

pub mod fan;
pub mod sysfs_pwm;
