//! Measurement Sensor Device
//!
//! ## Overview
//!
//! A [`SensorDevice`] ties together the immutable mode table of a sensor, the
//! raw data buffer its driver fills, and the driver capability used to switch
//! the hardware between modes. It answers every consumer-facing read (values,
//! bounds, units, format) by borrowing the buffer and running the decoder.
//!
//! ## Consistency
//!
//! The active mode and the raw buffer are mutated by the producer side (the
//! driver's receive path) while consumers read values. A value decoded with
//! one mode's format against another mode's buffer layout is garbage, so both
//! live behind a single `RwLock`:
//!
//! ```text
//!  producer                         consumers
//!  publish_sample(mode, bytes) ──┐  ┌── value(i)
//!  select_mode(name)  ───────────┤  ├── values()
//!                            write│  │read
//!                           ┌─────▼──▼─────┐
//!                           │ mode │ raw[] │
//!                           └──────────────┘
//! ```
//!
//! - a read observes one `(mode, raw)` pair for the whole decode
//! - a sample and its mode are replaced together, never partially
//! - a mode switch clears the buffer so stale bytes from the previous layout
//!   are never decoded with the new format
//!
//! ## Example
//!
//! ```rust
//! use msensor_core::device::{SensorDevice, SensorDriver};
//! use msensor_core::{DataFormat, ModeInfo, SensorResult};
//!
//! struct Port;
//!
//! impl SensorDriver for Port {
//!     fn set_mode(&mut self, _mode: usize) -> SensorResult<()> {
//!         Ok(())
//!     }
//!
//!     fn write_data(&mut self, data: &[u8], _offset: usize) -> SensorResult<usize> {
//!         Ok(data.len())
//!     }
//! }
//!
//! let modes = [
//!     ModeInfo::new("COL-REFLECT", DataFormat::S8)?,
//!     ModeInfo::new("RGB-RAW", DataFormat::S16)?.with_data_sets(3)?,
//! ];
//! let sensor = SensorDevice::new(29, &modes, Port)?;
//!
//! sensor.select_mode("RGB-RAW")?;
//! sensor.publish_sample(1, &[10, 0, 20, 0, 30, 0])?;
//! assert_eq!(sensor.value(2)?, 30);
//! # Ok::<(), msensor_core::SensorError>(())
//! ```

use std::fmt;
use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use heapless::Vec;

use crate::{
    constants::{MAX_MODES, RAW_DATA_SIZE},
    decoder::{decode_value, decode_values, Values},
    errors::{SensorError, SensorResult},
    mode::{DataFormat, ModeInfo},
};

/// Capability supplied by the hardware driver
pub trait SensorDriver {
    /// Switch the hardware to mode `mode` (index into the device's mode table).
    fn set_mode(&mut self, mode: usize) -> SensorResult<()>;

    /// Write `data` to the sensor at `offset`. Returns the number of bytes
    /// accepted. Meaning of the bytes is driver-defined.
    fn write_data(&mut self, data: &[u8], offset: usize) -> SensorResult<usize>;
}

/// Active mode and the sample produced in it
#[derive(Debug, Clone, Copy)]
struct RawState {
    mode: usize,
    raw: [u8; RAW_DATA_SIZE],
}

/// Measurement sensor device
pub struct SensorDevice<D> {
    type_id: u32,
    modes: Vec<ModeInfo, MAX_MODES>,
    state: RwLock<RawState>,
    driver: Mutex<D>,
}

impl<D: SensorDriver> SensorDevice<D> {
    /// Create a device in mode 0 with a zeroed raw buffer.
    ///
    /// The mode table must be non-empty, hold at most `MAX_MODES` modes and
    /// have unique names. Every descriptor must pass [`ModeInfo::validate`].
    pub fn new(type_id: u32, modes: &[ModeInfo], driver: D) -> SensorResult<Self> {
        if modes.is_empty() {
            return Err(SensorError::InvalidArgument { reason: "no modes" });
        }
        for mode in modes {
            mode.validate()?;
        }
        let table: Vec<ModeInfo, MAX_MODES> = Vec::from_slice(modes)
            .map_err(|_| SensorError::InvalidArgument { reason: "too many modes" })?;

        for (i, mode) in table.iter().enumerate() {
            if table[..i].iter().any(|other| other.name() == mode.name()) {
                return Err(SensorError::InvalidArgument { reason: "duplicate mode name" });
            }
        }

        Ok(Self {
            type_id,
            modes: table,
            state: RwLock::new(RawState { mode: 0, raw: [0; RAW_DATA_SIZE] }),
            driver: Mutex::new(driver),
        })
    }

    // Lock poisoning is ignored: the state is plain bytes and an index,
    // replaced whole under the lock, so it is never left half-written.
    fn read_state(&self) -> RwLockReadGuard<'_, RawState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, RawState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sensor type identifier
    pub fn type_id(&self) -> u32 {
        self.type_id
    }

    /// All modes, indexed by mode id
    pub fn modes(&self) -> &[ModeInfo] {
        &self.modes
    }

    /// Index of the active mode
    pub fn mode(&self) -> usize {
        self.read_state().mode
    }

    /// Descriptor of the active mode
    pub fn mode_info(&self) -> &ModeInfo {
        &self.modes[self.mode()]
    }

    /// All mode names with the active one in brackets, e.g. `"A [B] C"`
    pub fn mode_listing(&self) -> ModeListing<'_> {
        ModeListing {
            modes: &self.modes,
            active: self.mode(),
        }
    }

    /// Switch to the mode named `name`.
    ///
    /// A single trailing newline on `name` is ignored, so text written by
    /// shell tools matches. The driver is asked first; if it fails, its
    /// error is returned unchanged and the device state is untouched.
    pub fn select_mode(&self, name: &str) -> SensorResult<()> {
        let name = name.strip_suffix('\n').unwrap_or(name);
        let Some(index) = self.modes.iter().position(|m| m.name() == name) else {
            log_warn!("unknown mode '{}'", name);
            return Err(SensorError::UnknownMode);
        };
        self.set_mode(index)
    }

    /// Switch to mode `index`.
    pub fn set_mode(&self, index: usize) -> SensorResult<()> {
        if index >= self.modes.len() {
            return Err(SensorError::UnknownMode);
        }

        let mut state = self.write_state();
        {
            let mut driver = self.driver.lock().unwrap_or_else(PoisonError::into_inner);
            if let Err(err) = driver.set_mode(index) {
                log_warn!("driver rejected mode {}: {}", index, err);
                return Err(err);
            }
        }
        state.mode = index;
        state.raw = [0; RAW_DATA_SIZE];

        log_debug!("mode set to {} ({})", index, self.modes[index].name());
        Ok(())
    }

    /// Producer side: replace the active mode and its sample in one step.
    ///
    /// Bytes of the raw buffer past `data` are zeroed.
    pub fn publish_sample(&self, mode: usize, data: &[u8]) -> SensorResult<()> {
        if mode >= self.modes.len() {
            return Err(SensorError::UnknownMode);
        }
        let raw = fill_raw(data)?;

        let mut state = self.write_state();
        *state = RawState { mode, raw };
        Ok(())
    }

    /// Producer side: replace the sample of the current mode.
    pub fn set_raw_data(&self, data: &[u8]) -> SensorResult<()> {
        let raw = fill_raw(data)?;
        self.write_state().raw = raw;
        Ok(())
    }

    /// Decode value `index` of the current sample
    pub fn value(&self, index: usize) -> SensorResult<i32> {
        let state = self.read_state();
        decode_value(&self.modes[state.mode], &state.raw, index)
    }

    /// Decode every value of the current sample
    pub fn values(&self) -> SensorResult<Values> {
        let state = self.read_state();
        decode_values(&self.modes[state.mode], &state.raw)
    }

    /// Minimum raw value of the active mode (fixed point)
    pub fn raw_min(&self) -> i32 {
        self.mode_info().raw_min()
    }

    /// Maximum raw value of the active mode (fixed point)
    pub fn raw_max(&self) -> i32 {
        self.mode_info().raw_max()
    }

    /// Minimum percent value of the active mode (fixed point)
    pub fn pct_min(&self) -> i32 {
        self.mode_info().pct_min()
    }

    /// Maximum percent value of the active mode (fixed point)
    pub fn pct_max(&self) -> i32 {
        self.mode_info().pct_max()
    }

    /// Minimum SI value of the active mode (fixed point)
    pub fn si_min(&self) -> i32 {
        self.mode_info().si_min()
    }

    /// Maximum SI value of the active mode (fixed point)
    pub fn si_max(&self) -> i32 {
        self.mode_info().si_max()
    }

    /// SI unit label of the active mode
    pub fn si_units(&self) -> &str {
        self.mode_info().units()
    }

    /// Decimal places of the active mode
    pub fn decimals(&self) -> u32 {
        self.mode_info().decimals()
    }

    /// Number of values per sample in the active mode
    pub fn num_values(&self) -> usize {
        self.mode_info().data_sets()
    }

    /// Wire format of the active mode
    pub fn bin_data_format(&self) -> DataFormat {
        self.mode_info().format()
    }

    /// Copy raw buffer bytes starting at `offset` into `out`.
    ///
    /// Returns the number of bytes copied; 0 once `offset` reaches the end
    /// of the buffer.
    pub fn read_bin_data(&self, offset: usize, out: &mut [u8]) -> usize {
        if offset >= RAW_DATA_SIZE || out.is_empty() {
            return 0;
        }
        let len = out.len().min(RAW_DATA_SIZE - offset);
        let state = self.read_state();
        out[..len].copy_from_slice(&state.raw[offset..offset + len]);
        len
    }

    /// Hand `data` to the driver for writing at `offset`
    pub fn write_bin_data(&self, offset: usize, data: &[u8]) -> SensorResult<usize> {
        let mut driver = self.driver.lock().unwrap_or_else(PoisonError::into_inner);
        driver.write_data(data, offset)
    }
}

impl<D> fmt::Debug for SensorDevice<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensorDevice")
            .field("type_id", &self.type_id)
            .field("modes", &self.modes.len())
            .finish_non_exhaustive()
    }
}

fn fill_raw(data: &[u8]) -> SensorResult<[u8; RAW_DATA_SIZE]> {
    let mut raw = [0; RAW_DATA_SIZE];
    raw.get_mut(..data.len())
        .ok_or(SensorError::InvalidArgument { reason: "sample larger than raw buffer" })?
        .copy_from_slice(data);
    Ok(raw)
}

/// Display helper listing mode names, active mode bracketed
#[derive(Debug, Clone, Copy)]
pub struct ModeListing<'a> {
    modes: &'a [ModeInfo],
    active: usize,
}

impl fmt::Display for ModeListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mode) in self.modes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if i == self.active {
                write!(f, "[{}]", mode.name())?;
            } else {
                f.write_str(mode.name())?;
            }
        }
        Ok(())
    }
}
