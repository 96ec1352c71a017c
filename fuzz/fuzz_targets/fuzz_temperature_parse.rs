//! Fuzz target: thermal zone parsing
//!
//! Feeds arbitrary text to `parse_leading_int` and `normalize`, and the
//! raw bytes through a real `TemperatureSensor` file read.  Verifies:
//! - No panics or overflow on any input
//! - A parsed value is the integer prefix of the first token
//! - `read` falls back to 0 exactly when `try_read` fails
//!
//! cargo fuzz run fuzz_temperature_parse

#![no_main]

use std::fs;

use libfuzzer_sys::fuzz_target;
use tempfan::sensors::temperature::{normalize, parse_leading_int, TemperatureSensor};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = core::str::from_utf8(data) {
        if let Some(raw) = parse_leading_int(text) {
            let token = text.split_whitespace().next().expect("parsed a token");
            let unsigned = token.strip_prefix(['-', '+']).unwrap_or(token);
            let digits: String = unsigned.chars().take_while(char::is_ascii_digit).collect();
            assert_eq!(digits.parse::<u64>().ok(), Some(raw.unsigned_abs()));
            assert_eq!(raw < 0, token.starts_with('-') && raw != 0);

            let celsius = normalize(raw);
            if raw < 1000 {
                assert_eq!(i64::from(celsius), raw.max(i64::from(i32::MIN)));
            } else {
                assert!(i64::from(celsius) <= raw / 1000);
            }
        }
    }

    let dir = tempfile::tempdir().expect("scratch dir");
    let path = dir.path().join("temp");
    fs::write(&path, data).expect("seed zone");

    let mut sensor = TemperatureSensor::new(&path);
    let reading = sensor.try_read();
    let celsius = sensor.read();
    match reading {
        Ok(expected) => assert_eq!(celsius, expected),
        Err(_) => assert_eq!(celsius, 0),
    }
});
