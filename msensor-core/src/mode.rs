//! Sensor Mode Descriptors
//!
//! A sensor exposes several modes (distance, reflected light, raw count...).
//! Each mode declares how many values it produces per sample, how each value
//! is encoded in the raw buffer, and the physical scale of those values.
//!
//! ```text
//! Mode "COL-RGB": format = s16, data_sets = 3
//!
//! raw buffer:  ┌──────┬──────┬──────┬───────────────────┐
//!              │ red  │ green│ blue │      unused       │
//!              └──────┴──────┴──────┴───────────────────┘
//!               0..2   2..4   4..6    6..RAW_DATA_SIZE
//! ```
//!
//! Descriptors are validated once at construction and are immutable
//! afterwards, so the decoder can rely on `data_sets * width` never exceeding
//! the raw buffer size.
//!
//! ```rust
//! use msensor_core::mode::{DataFormat, ModeInfo};
//!
//! let mode = ModeInfo::new("US-DIST-CM", DataFormat::Float)?
//!     .with_decimals(1)
//!     .with_units("cm")?
//!     .with_si_range(0.0, 255.0);
//!
//! assert_eq!(mode.si_max(), 2550);
//! # Ok::<(), msensor_core::SensorError>(())
//! ```

use core::fmt;

use heapless::String;

use crate::{
    codec::{float_to_fixed, Float32Bits},
    constants::{MAX_VALUES, MODE_NAME_SIZE, RAW_DATA_SIZE, UNITS_SIZE},
    errors::{SensorError, SensorResult},
};

/// Wire format of each value in the raw buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DataFormat {
    /// Signed 8-bit integer
    S8 = 0,
    /// Signed 16-bit integer
    S16 = 1,
    /// Signed 32-bit integer
    S32 = 2,
    /// IEEE-754 single precision float
    Float = 3,
}

impl DataFormat {
    /// Bytes per value
    pub const fn width(self) -> usize {
        match self {
            Self::S8 => 1,
            Self::S16 => 2,
            Self::S32 | Self::Float => 4,
        }
    }

    /// Name reported by the `bin_data_format` attribute
    pub const fn name(self) -> &'static str {
        match self {
            Self::S8 => "s8",
            Self::S16 => "s16",
            Self::S32 => "s32",
            Self::Float => "float",
        }
    }
}

impl TryFrom<u8> for DataFormat {
    type Error = SensorError;

    fn try_from(code: u8) -> SensorResult<Self> {
        match code {
            0 => Ok(Self::S8),
            1 => Ok(Self::S16),
            2 => Ok(Self::S32),
            3 => Ok(Self::Float),
            _ => Err(SensorError::UnsupportedFormat { code }),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static description of one sensor mode.
///
/// The six range bounds are stored as float bit patterns, exactly as the
/// sensor reports them, and converted to fixed point with this mode's
/// `decimals` on every query.
///
/// Deserialized descriptors go through the same checks as the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ModeInfoFields"))]
pub struct ModeInfo {
    name: String<MODE_NAME_SIZE>,
    format: DataFormat,
    data_sets: u8,
    decimals: u8,
    raw_min: Float32Bits,
    raw_max: Float32Bits,
    pct_min: Float32Bits,
    pct_max: Float32Bits,
    si_min: Float32Bits,
    si_max: Float32Bits,
    units: String<UNITS_SIZE>,
}

impl ModeInfo {
    /// Create a mode with one data set and the default ranges
    /// (raw 0..1023, percent 0..100, SI 0..1).
    pub fn new(name: &str, format: DataFormat) -> SensorResult<Self> {
        if name.is_empty() {
            return Err(SensorError::InvalidModeInfo { reason: "empty mode name" });
        }
        let name: String<MODE_NAME_SIZE> = String::try_from(name)
            .map_err(|_| SensorError::InvalidModeInfo { reason: "mode name too long" })?;

        Ok(Self {
            name,
            format,
            data_sets: 1,
            decimals: 0,
            raw_min: Float32Bits::ZERO,
            raw_max: Float32Bits::from_f32(1023.0),
            pct_min: Float32Bits::ZERO,
            pct_max: Float32Bits::from_f32(100.0),
            si_min: Float32Bits::ZERO,
            si_max: Float32Bits::from_f32(1.0),
            units: String::new(),
        })
    }

    /// Set the number of values per sample.
    ///
    /// Must be `1..=MAX_VALUES` and the whole sample must fit in the raw
    /// buffer.
    pub fn with_data_sets(mut self, data_sets: u8) -> SensorResult<Self> {
        check_data_sets(self.format, data_sets)?;
        self.data_sets = data_sets;
        Ok(self)
    }

    /// Re-run the construction checks: non-empty name, data set count in
    /// `1..=MAX_VALUES`, sample within the raw buffer.
    pub fn validate(&self) -> SensorResult<()> {
        if self.name.is_empty() {
            return Err(SensorError::InvalidModeInfo { reason: "empty mode name" });
        }
        check_data_sets(self.format, self.data_sets)
    }

    /// Set the decimal-place count
    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    /// Set the SI unit label
    pub fn with_units(mut self, units: &str) -> SensorResult<Self> {
        self.units = String::try_from(units)
            .map_err(|_| SensorError::InvalidModeInfo { reason: "units too long" })?;
        Ok(self)
    }

    /// Set the raw value range
    pub fn with_raw_range(mut self, min: f32, max: f32) -> Self {
        self.raw_min = Float32Bits::from_f32(min);
        self.raw_max = Float32Bits::from_f32(max);
        self
    }

    /// Set the percent range
    pub fn with_pct_range(mut self, min: f32, max: f32) -> Self {
        self.pct_min = Float32Bits::from_f32(min);
        self.pct_max = Float32Bits::from_f32(max);
        self
    }

    /// Set the SI range
    pub fn with_si_range(mut self, min: f32, max: f32) -> Self {
        self.si_min = Float32Bits::from_f32(min);
        self.si_max = Float32Bits::from_f32(max);
        self
    }

    /// Set all six bounds from raw bit patterns, as reported by the sensor
    pub fn with_range_bits(
        mut self,
        raw: (Float32Bits, Float32Bits),
        pct: (Float32Bits, Float32Bits),
        si: (Float32Bits, Float32Bits),
    ) -> Self {
        (self.raw_min, self.raw_max) = raw;
        (self.pct_min, self.pct_max) = pct;
        (self.si_min, self.si_max) = si;
        self
    }

    /// Mode name, unique within a device
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wire format of each value
    pub fn format(&self) -> DataFormat {
        self.format
    }

    /// Number of values per sample
    pub fn data_sets(&self) -> usize {
        usize::from(self.data_sets)
    }

    /// Decimal places of the fixed-point values
    pub fn decimals(&self) -> u32 {
        u32::from(self.decimals)
    }

    /// SI unit label
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Bytes of raw buffer used by one sample
    pub fn raw_size(&self) -> usize {
        self.data_sets() * self.format.width()
    }

    fn bound(&self, bits: Float32Bits) -> i32 {
        float_to_fixed(bits, self.decimals())
    }

    /// Minimum raw value (fixed point)
    pub fn raw_min(&self) -> i32 {
        self.bound(self.raw_min)
    }

    /// Maximum raw value (fixed point)
    pub fn raw_max(&self) -> i32 {
        self.bound(self.raw_max)
    }

    /// Minimum percent value (fixed point)
    pub fn pct_min(&self) -> i32 {
        self.bound(self.pct_min)
    }

    /// Maximum percent value (fixed point)
    pub fn pct_max(&self) -> i32 {
        self.bound(self.pct_max)
    }

    /// Minimum SI value (fixed point)
    pub fn si_min(&self) -> i32 {
        self.bound(self.si_min)
    }

    /// Maximum SI value (fixed point)
    pub fn si_max(&self) -> i32 {
        self.bound(self.si_max)
    }
}

fn check_data_sets(format: DataFormat, data_sets: u8) -> SensorResult<()> {
    let count = usize::from(data_sets);
    if count == 0 || count > MAX_VALUES {
        return Err(SensorError::InvalidModeInfo { reason: "data set count out of range" });
    }
    if count * format.width() > RAW_DATA_SIZE {
        return Err(SensorError::InvalidModeInfo { reason: "sample larger than raw buffer" });
    }
    Ok(())
}

/// Unchecked field layout of [`ModeInfo`] as it appears on the wire
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ModeInfoFields {
    name: String<MODE_NAME_SIZE>,
    format: DataFormat,
    data_sets: u8,
    decimals: u8,
    raw_min: Float32Bits,
    raw_max: Float32Bits,
    pct_min: Float32Bits,
    pct_max: Float32Bits,
    si_min: Float32Bits,
    si_max: Float32Bits,
    units: String<UNITS_SIZE>,
}

#[cfg(feature = "serde")]
impl TryFrom<ModeInfoFields> for ModeInfo {
    type Error = SensorError;

    fn try_from(fields: ModeInfoFields) -> SensorResult<Self> {
        let mode = Self {
            name: fields.name,
            format: fields.format,
            data_sets: fields.data_sets,
            decimals: fields.decimals,
            raw_min: fields.raw_min,
            raw_max: fields.raw_max,
            pct_min: fields.pct_min,
            pct_max: fields.pct_max,
            si_min: fields.si_min,
            si_max: fields.si_max,
            units: fields.units,
        };
        mode.validate()?;
        Ok(mode)
    }
}
