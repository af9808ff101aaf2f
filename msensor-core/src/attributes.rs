//! Textual Attribute View
//!
//! Exposes a [`SensorDevice`] as a set of named text attributes, one value
//! per attribute followed by a newline, the way the sensor class presents
//! itself to user space:
//!
//! | Attribute         | Content                                   | Access |
//! |-------------------|-------------------------------------------|--------|
//! | `type_id`         | sensor type identifier                    | read   |
//! | `mode`            | mode names, active one bracketed          | read/write |
//! | `raw_min` .. `si_max` | range bounds, fixed point              | read   |
//! | `si_units`        | SI unit label                             | read   |
//! | `dp`              | decimal places                            | read   |
//! | `num_values`      | values per sample                         | read   |
//! | `bin_data_format` | `s8`, `s16`, `s32` or `float`             | read   |
//! | `value0`..`value7`| decoded values                            | read   |
//!
//! ```rust
//! # use msensor_core::device::{SensorDevice, SensorDriver};
//! # use msensor_core::{DataFormat, ModeInfo, SensorResult};
//! # struct Port;
//! # impl SensorDriver for Port {
//! #     fn set_mode(&mut self, _: usize) -> SensorResult<()> { Ok(()) }
//! #     fn write_data(&mut self, d: &[u8], _: usize) -> SensorResult<usize> { Ok(d.len()) }
//! # }
//! use msensor_core::attributes::{show, Attribute};
//!
//! let modes = [ModeInfo::new("TOUCH", DataFormat::S8)?];
//! let sensor = SensorDevice::new(16, &modes, Port)?;
//! sensor.set_raw_data(&[1])?;
//!
//! let mut text = String::new();
//! show(&sensor, Attribute::from_name("value0")?, &mut text)?;
//! assert_eq!(text, "1\n");
//! # Ok::<(), msensor_core::SensorError>(())
//! ```

use std::fmt::Write;

use crate::{
    constants::MAX_VALUES,
    device::{SensorDevice, SensorDriver},
    errors::{SensorError, SensorResult},
};

/// Named attribute of a sensor device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// `type_id`
    TypeId,
    /// `mode`
    Mode,
    /// `raw_min`
    RawMin,
    /// `raw_max`
    RawMax,
    /// `pct_min`
    PctMin,
    /// `pct_max`
    PctMax,
    /// `si_min`
    SiMin,
    /// `si_max`
    SiMax,
    /// `si_units`
    SiUnits,
    /// `dp`
    Decimals,
    /// `num_values`
    NumValues,
    /// `bin_data_format`
    BinDataFormat,
    /// `value<n>`, `n < MAX_VALUES`
    Value(usize),
}

const VALUE_PREFIX: &str = "value";

const VALUE_NAMES: [&str; MAX_VALUES] = [
    "value0", "value1", "value2", "value3", "value4", "value5", "value6", "value7",
];

impl Attribute {
    /// Every attribute a device exposes
    pub fn all() -> impl Iterator<Item = Attribute> {
        [
            Self::TypeId,
            Self::Mode,
            Self::RawMin,
            Self::RawMax,
            Self::PctMin,
            Self::PctMax,
            Self::SiMin,
            Self::SiMax,
            Self::SiUnits,
            Self::Decimals,
            Self::NumValues,
            Self::BinDataFormat,
        ]
        .into_iter()
        .chain((0..MAX_VALUES).map(Self::Value))
    }

    /// Look up an attribute by name
    pub fn from_name(name: &str) -> SensorResult<Self> {
        let attr = match name {
            "type_id" => Self::TypeId,
            "mode" => Self::Mode,
            "raw_min" => Self::RawMin,
            "raw_max" => Self::RawMax,
            "pct_min" => Self::PctMin,
            "pct_max" => Self::PctMax,
            "si_min" => Self::SiMin,
            "si_max" => Self::SiMax,
            "si_units" => Self::SiUnits,
            "dp" => Self::Decimals,
            "num_values" => Self::NumValues,
            "bin_data_format" => Self::BinDataFormat,
            _ => {
                let index = name
                    .strip_prefix(VALUE_PREFIX)
                    .and_then(|digits| digits.parse::<usize>().ok())
                    .filter(|&index| index < MAX_VALUES)
                    .ok_or(SensorError::UnknownAttribute)?;
                Self::Value(index)
            }
        };
        Ok(attr)
    }

    /// Attribute name
    pub fn name(&self) -> &'static str {
        match self {
            Self::TypeId => "type_id",
            Self::Mode => "mode",
            Self::RawMin => "raw_min",
            Self::RawMax => "raw_max",
            Self::PctMin => "pct_min",
            Self::PctMax => "pct_max",
            Self::SiMin => "si_min",
            Self::SiMax => "si_max",
            Self::SiUnits => "si_units",
            Self::Decimals => "dp",
            Self::NumValues => "num_values",
            Self::BinDataFormat => "bin_data_format",
            Self::Value(index) => VALUE_NAMES.get(*index).copied().unwrap_or(VALUE_PREFIX),
        }
    }

    /// Only `mode` accepts writes
    pub fn is_writable(&self) -> bool {
        matches!(self, Self::Mode)
    }
}

/// Render `attr` of `device` into `out`, newline terminated.
pub fn show<D: SensorDriver>(
    device: &SensorDevice<D>,
    attr: Attribute,
    out: &mut impl Write,
) -> SensorResult<()> {
    let written = match attr {
        Attribute::TypeId => writeln!(out, "{}", device.type_id()),
        Attribute::Mode => writeln!(out, "{}", device.mode_listing()),
        Attribute::RawMin => writeln!(out, "{}", device.raw_min()),
        Attribute::RawMax => writeln!(out, "{}", device.raw_max()),
        Attribute::PctMin => writeln!(out, "{}", device.pct_min()),
        Attribute::PctMax => writeln!(out, "{}", device.pct_max()),
        Attribute::SiMin => writeln!(out, "{}", device.si_min()),
        Attribute::SiMax => writeln!(out, "{}", device.si_max()),
        Attribute::SiUnits => writeln!(out, "{}", device.si_units()),
        Attribute::Decimals => writeln!(out, "{}", device.decimals()),
        Attribute::NumValues => writeln!(out, "{}", device.num_values()),
        Attribute::BinDataFormat => writeln!(out, "{}", device.bin_data_format()),
        Attribute::Value(index) => writeln!(out, "{}", device.value(index)?),
    };
    written.map_err(|_| SensorError::InvalidArgument { reason: "output buffer full" })
}

/// Write `input` to `attr` of `device`. Returns the number of bytes consumed.
pub fn store<D: SensorDriver>(
    device: &SensorDevice<D>,
    attr: Attribute,
    input: &str,
) -> SensorResult<usize> {
    match attr {
        Attribute::Mode => {
            device.select_mode(input)?;
            Ok(input.len())
        }
        _ => Err(SensorError::UnknownAttribute),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{DataFormat, ModeInfo};

    struct Port;

    impl SensorDriver for Port {
        fn set_mode(&mut self, _mode: usize) -> SensorResult<()> {
            Ok(())
        }

        fn write_data(&mut self, data: &[u8], _offset: usize) -> SensorResult<usize> {
            Ok(data.len())
        }
    }

    fn device() -> SensorDevice<Port> {
        let modes = [
            ModeInfo::new("TEMP", DataFormat::Float)
                .unwrap()
                .with_decimals(1)
                .with_units("C")
                .unwrap()
                .with_si_range(-55.0, 128.0),
            ModeInfo::new("RGB", DataFormat::S16)
                .unwrap()
                .with_data_sets(3)
                .unwrap(),
        ];
        SensorDevice::new(99, &modes, Port).unwrap()
    }

    fn render(device: &SensorDevice<Port>, name: &str) -> SensorResult<String> {
        let mut out = String::new();
        show(device, Attribute::from_name(name)?, &mut out)?;
        Ok(out)
    }

    #[test]
    fn names_round_trip() {
        for attr in Attribute::all() {
            assert_eq!(Attribute::from_name(attr.name()), Ok(attr));
        }
        assert_eq!(Attribute::all().count(), 12 + MAX_VALUES);
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(Attribute::from_name("value8"), Err(SensorError::UnknownAttribute));
        assert_eq!(Attribute::from_name("value"), Err(SensorError::UnknownAttribute));
        assert_eq!(Attribute::from_name("valuex"), Err(SensorError::UnknownAttribute));
        assert_eq!(Attribute::from_name("units"), Err(SensorError::UnknownAttribute));
    }

    #[test]
    fn renders_scalar_attributes() {
        let dev = device();
        assert_eq!(render(&dev, "type_id").unwrap(), "99\n");
        assert_eq!(render(&dev, "mode").unwrap(), "[TEMP] RGB\n");
        assert_eq!(render(&dev, "si_min").unwrap(), "-550\n");
        assert_eq!(render(&dev, "si_max").unwrap(), "1280\n");
        assert_eq!(render(&dev, "si_units").unwrap(), "C\n");
        assert_eq!(render(&dev, "dp").unwrap(), "1\n");
        assert_eq!(render(&dev, "num_values").unwrap(), "1\n");
        assert_eq!(render(&dev, "bin_data_format").unwrap(), "float\n");
    }

    #[test]
    fn renders_values() {
        let dev = device();
        dev.set_raw_data(&21.5f32.to_le_bytes()).unwrap();
        assert_eq!(render(&dev, "value0").unwrap(), "215\n");
        assert_eq!(
            render(&dev, "value1"),
            Err(SensorError::IndexOutOfRange { index: 1, count: 1 })
        );
    }

    #[test]
    fn store_mode() {
        let dev = device();
        assert_eq!(store(&dev, Attribute::Mode, "RGB\n"), Ok(4));
        assert_eq!(render(&dev, "mode").unwrap(), "TEMP [RGB]\n");
        assert_eq!(render(&dev, "bin_data_format").unwrap(), "s16\n");
        assert_eq!(store(&dev, Attribute::Mode, "IR"), Err(SensorError::UnknownMode));
        assert_eq!(store(&dev, Attribute::Decimals, "2"), Err(SensorError::UnknownAttribute));
    }

    #[test]
    fn only_mode_is_writable() {
        assert!(Attribute::Mode.is_writable());
        assert!(Attribute::all().filter(|a| a.is_writable()).eq([Attribute::Mode]));
    }
}
