//! Constants for msensor Core
//!
//! Sizes, limits and bit layouts used throughout the crate, with the
//! source of each value next to its definition.
//!
//! ## Organization
//!
//! - **Buffers**: raw data buffer, name and unit lengths, table capacities
//! - **Float**: IEEE-754 single precision field layout
//!
//! The wire byte order is also configured here so the decoder never depends
//! on the byte order of the machine it runs on.

/// Buffer sizes and fixed capacities.
pub mod buffers;

/// IEEE-754 single precision layout.
pub mod float;

pub use buffers::{
    RAW_DATA_SIZE, MODE_NAME_SIZE, UNITS_SIZE, MAX_VALUES, MAX_MODES,
    DEVICE_NAME_SIZE, MAX_REGISTERED_SENSORS,
};

/// Byte order of multi-byte values in the raw buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteOrder {
    /// Least significant byte first
    Little,
    /// Most significant byte first
    Big,
}

/// Byte order of the producing hardware.
///
/// The EV3 (ARM9, little endian) and all its UART/I2C sensors write values
/// least significant byte first.
pub const RAW_BYTE_ORDER: ByteOrder = ByteOrder::Little;
