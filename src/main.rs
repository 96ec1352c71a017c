//! Tempfan — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  HardwareAdapter            LogEventSink     SystemClock     │
//! │  (thermal zone + sysfs PWM) (EventSink)      (TimePort)      │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ─────────────────       │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │ ControlLoop: Hysteresis · BoundedLog (activity log)│      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use tempfan::adapters::hardware::HardwareAdapter;
use tempfan::adapters::log_sink::LogEventSink;
use tempfan::adapters::time::SystemClock;
use tempfan::app::service::ControlLoop;
use tempfan::config::{DEFAULT_CONFIG_PATH, SystemConfig};
use tempfan::drivers::fan::FanDriver;
use tempfan::drivers::sysfs_pwm::{SYSFS_PWM_ROOT, SysfsPwm};
use tempfan::error::ConfigError;
use tempfan::sensors::temperature::TemperatureSensor;

fn main() -> Result<()> {
    // ── 1. Logger ─────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("tempfan v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config (file override or built-in defaults) ────────
    let config = match SystemConfig::load(Path::new(DEFAULT_CONFIG_PATH)) {
        Ok(cfg) => {
            info!("Config loaded from {}", DEFAULT_CONFIG_PATH);
            cfg
        }
        Err(ConfigError::NotFound) => SystemConfig::default(),
        Err(e) => {
            warn!("{}: {}, using defaults", DEFAULT_CONFIG_PATH, e);
            SystemConfig::default()
        }
    };

    // ── 3. Hardware ───────────────────────────────────────────
    let pwm = SysfsPwm::open(
        Path::new(SYSFS_PWM_ROOT),
        config.pwm.chip,
        config.pwm.channel,
        config.pwm.period_ns,
        config.pwm.range,
    )
    .with_context(|| {
        format!(
            "opening PWM pwmchip{}/pwm{}",
            config.pwm.chip, config.pwm.channel
        )
    })?;
    let sensor = TemperatureSensor::new(config.temp_path.clone());
    info!("Temperature source {}", sensor.path().display());
    let mut hw = HardwareAdapter::new(sensor, FanDriver::new(pwm));

    // ── 4. Control loop ───────────────────────────────────────
    let mut sink = LogEventSink::new();
    let mut control = ControlLoop::new(&config, SystemClock::new());
    control.start(&mut sink);

    info!(
        "Activity log at {} (max {} lines)",
        control.log().path().display(),
        control.log().max_lines()
    );
    control.run(&mut hw, &mut sink)
}
