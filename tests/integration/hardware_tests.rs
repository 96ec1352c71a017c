//! ControlLoop driving the real HardwareAdapter over a fake thermal zone
//! and a recording PWM channel.

use std::fs;

use tempfan::adapters::hardware::HardwareAdapter;
use tempfan::app::service::ControlLoop;
use tempfan::config::SystemConfig;
use tempfan::control::hysteresis::FanState;
use tempfan::drivers::fan::FanDriver;
use tempfan::sensors::temperature::TemperatureSensor;

use crate::mock_hw::{MockPwm, RecordingSink, SimClock, T0};

fn setup(dir: &std::path::Path) -> (SystemConfig, HardwareAdapter<MockPwm>) {
    let config = SystemConfig {
        log_path: dir.join("tempfan.log"),
        temp_path: dir.join("temp"),
        ..SystemConfig::default()
    };
    let hw = HardwareAdapter::new(
        TemperatureSensor::new(config.temp_path.clone()),
        FanDriver::new(MockPwm::default()),
    );
    (config, hw)
}

#[test]
fn millidegree_zone_drives_fan() {
    let dir = tempfile::tempdir().unwrap();
    let (config, mut hw) = setup(dir.path());
    let clock = SimClock::at(T0);
    let mut control = ControlLoop::new(&config, &clock);
    let mut sink = RecordingSink::new();

    fs::write(&config.temp_path, "61250\n").unwrap();
    control.cycle(&mut hw, &mut sink);
    assert_eq!(control.state(), FanState::Slow);

    fs::write(&config.temp_path, "72000\n").unwrap();
    control.cycle(&mut hw, &mut sink);
    assert_eq!(control.state(), FanState::Fast);

    assert_eq!(hw.fan().pwm().writes, [512, 1023]);
}

#[test]
fn missing_sensor_reads_as_cold() {
    let dir = tempfile::tempdir().unwrap();
    let (config, mut hw) = setup(dir.path());
    let clock = SimClock::at(T0);
    let mut control = ControlLoop::new(&config, &clock);
    let mut sink = RecordingSink::new();

    fs::write(&config.temp_path, "75000").unwrap();
    control.cycle(&mut hw, &mut sink);
    assert_eq!(control.state(), FanState::Fast);

    // Sensor disappears: 0 °C, fan switched off.
    fs::remove_file(&config.temp_path).unwrap();
    control.cycle(&mut hw, &mut sink);
    assert_eq!(control.state(), FanState::Off);
    assert_eq!(hw.fan().pwm().writes, [1023, 0]);
    assert!(
        fs::read_to_string(&config.log_path)
            .unwrap()
            .contains("Temperature low (0\u{00b0}C), fan off")
    );
}
