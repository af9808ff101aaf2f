//! Common test fixtures for integration tests
//!
//! This module provides:
//! - Mode tables modelled on real EV3/NXT sensors
//! - A recording driver stub for the device capability
//! - Raw sample builders

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use msensor_core::{
    constants::RAW_DATA_SIZE,
    DataFormat, ModeInfo, SensorDriver, SensorError, SensorResult,
};

/// EV3 ultrasonic sensor: distance in cm/in (s16, one decimal) and a
/// presence flag (s8).
pub fn ultrasonic_modes() -> Vec<ModeInfo> {
    vec![
        ModeInfo::new("US-DIST-CM", DataFormat::S16)
            .unwrap()
            .with_decimals(1)
            .with_units("cm")
            .unwrap()
            .with_raw_range(0.0, 2550.0)
            .with_si_range(0.0, 255.0),
        ModeInfo::new("US-DIST-IN", DataFormat::S16)
            .unwrap()
            .with_decimals(1)
            .with_units("in")
            .unwrap()
            .with_raw_range(0.0, 1000.0)
            .with_si_range(0.0, 100.0),
        ModeInfo::new("US-LISTEN", DataFormat::S8)
            .unwrap()
            .with_raw_range(0.0, 1.0),
    ]
}

/// EV3 color sensor: reflected light (s8 percent) and raw RGB (3 x s16).
pub fn color_modes() -> Vec<ModeInfo> {
    vec![
        ModeInfo::new("COL-REFLECT", DataFormat::S8)
            .unwrap()
            .with_raw_range(0.0, 100.0)
            .with_si_range(0.0, 100.0)
            .with_units("pct")
            .unwrap(),
        ModeInfo::new("RGB-RAW", DataFormat::S16)
            .unwrap()
            .with_data_sets(3)
            .unwrap()
            .with_si_range(0.0, 1020.0),
    ]
}

/// Temperature probe reporting IEEE floats with two decimals.
pub fn temperature_modes() -> Vec<ModeInfo> {
    vec![
        ModeInfo::new("TEMP-C", DataFormat::Float)
            .unwrap()
            .with_decimals(2)
            .with_units("C")
            .unwrap()
            .with_si_range(-55.0, 128.0),
        ModeInfo::new("TEMP-F", DataFormat::Float)
            .unwrap()
            .with_decimals(1)
            .with_units("F")
            .unwrap()
            .with_si_range(-67.0, 262.4),
    ]
}

/// What the driver was asked to do
#[derive(Debug, Default)]
pub struct DriverLog {
    pub modes_set: Vec<usize>,
    pub writes: Vec<(usize, Vec<u8>)>,
}

/// Driver stub that records calls and can be told to fail
#[derive(Debug, Clone, Default)]
pub struct RecordingDriver {
    pub log: Arc<Mutex<DriverLog>>,
    pub fail_with: Option<i32>,
}

impl RecordingDriver {
    pub fn failing(code: i32) -> Self {
        Self {
            fail_with: Some(code),
            ..Self::default()
        }
    }
}

impl SensorDriver for RecordingDriver {
    fn set_mode(&mut self, mode: usize) -> SensorResult<()> {
        if let Some(code) = self.fail_with {
            return Err(SensorError::Driver { code });
        }
        self.log.lock().unwrap().modes_set.push(mode);
        Ok(())
    }

    fn write_data(&mut self, data: &[u8], offset: usize) -> SensorResult<usize> {
        if let Some(code) = self.fail_with {
            return Err(SensorError::Driver { code });
        }
        self.log.lock().unwrap().writes.push((offset, data.to_vec()));
        Ok(data.len())
    }
}

/// Raw buffer filled with one repeated byte
pub fn filled(byte: u8) -> [u8; RAW_DATA_SIZE] {
    [byte; RAW_DATA_SIZE]
}

/// Little endian s16 sample
pub fn s16_sample(values: &[i16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Little endian float sample
pub fn float_sample(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}
