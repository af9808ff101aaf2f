//! Error Types for Sensor Decoding and Device Operations
//!
//! ## Design Philosophy
//!
//! The error system follows the same constraints as the rest of the crate:
//!
//! 1. **Small Size**: Variants carry only a few integers or a `&'static str`,
//!    so errors can be returned from the read path without cost.
//!
//! 2. **No Heap Allocation**: No `String` payloads. Reasons are static.
//!
//! 3. **Copy Semantics**: Errors implement `Copy` so a driver error can be
//!    surfaced unchanged through several layers.
//!
//! ## Error Categories
//!
//! ### Decoding
//! - `IndexOutOfRange`: requested data set is past the mode's declared count
//! - `UnsupportedFormat`: unknown wire format code
//! - `BufferTooShort`: the raw buffer cannot hold the requested value
//!
//! ### Mode Handling
//! - `UnknownMode`: no mode with the given name
//! - `InvalidModeInfo`: a mode descriptor failed validation at construction
//!
//! ### Device Layer
//! - `Driver`: error returned by the hardware driver, passed through untouched
//! - `InvalidArgument`, `UnknownAttribute`
//! - `RegistryFull`, `AlreadyRegistered`, `NotRegistered`
//!
//! ## OS Error Codes
//!
//! The device layer reports failures to its consumers as negative errno
//! values. [`SensorError::errno`] performs that translation:
//!
//! ```rust
//! use msensor_core::errors::{SensorError, ENXIO};
//!
//! let err = SensorError::IndexOutOfRange { index: 8, count: 2 };
//! assert_eq!(err.errno(), -ENXIO);
//! ```

use thiserror_no_std::Error;

/// No such device or address
pub const ENXIO: i32 = 6;
/// No such device
pub const ENODEV: i32 = 19;
/// File exists
pub const EEXIST: i32 = 17;
/// Invalid argument
pub const EINVAL: i32 = 22;
/// No space left on device
pub const ENOSPC: i32 = 28;

/// Result type for sensor operations
pub type SensorResult<T> = Result<T, SensorError>;

/// Sensor errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Data set index is not below the mode's data set count
    #[error("Value index {index} out of range (mode has {count} values)")]
    IndexOutOfRange {
        /// Requested data set index
        index: usize,
        /// Number of data sets in the active mode
        count: usize,
    },

    /// No mode matches the requested name
    #[error("Unknown mode")]
    UnknownMode,

    /// Wire format code is not one of s8, s16, s32, float
    #[error("Unsupported data format code {code}")]
    UnsupportedFormat {
        /// The rejected format code
        code: u8,
    },

    /// Raw buffer is shorter than the mode layout requires
    #[error("Raw buffer too short: need {required} bytes, have {available}")]
    BufferTooShort {
        /// Bytes needed to decode the requested value
        required: usize,
        /// Bytes actually available
        available: usize,
    },

    /// Mode descriptor rejected at construction
    #[error("Invalid mode info: {reason}")]
    InvalidModeInfo {
        /// Which descriptor check failed
        reason: &'static str,
    },

    /// Argument rejected by the device layer
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Which argument check failed
        reason: &'static str,
    },

    /// Attribute name not recognised, or attribute not writable
    #[error("Unknown attribute")]
    UnknownAttribute,

    /// Class registry has no free slot
    #[error("Sensor registry full")]
    RegistryFull,

    /// A device with the same name is already registered
    #[error("Sensor already registered")]
    AlreadyRegistered,

    /// Device id does not refer to a registered sensor
    #[error("Sensor not registered")]
    NotRegistered,

    /// Error reported by the hardware driver (negative errno)
    #[error("Driver error {code}")]
    Driver {
        /// Driver status code, passed through unchanged
        code: i32,
    },
}

impl SensorError {
    /// Translate into the negative OS error code reported to device consumers.
    pub fn errno(&self) -> i32 {
        match self {
            Self::IndexOutOfRange { .. }
            | Self::UnsupportedFormat { .. }
            | Self::BufferTooShort { .. } => -ENXIO,
            Self::UnknownMode
            | Self::InvalidModeInfo { .. }
            | Self::InvalidArgument { .. }
            | Self::UnknownAttribute => -EINVAL,
            Self::RegistryFull => -ENOSPC,
            Self::AlreadyRegistered => -EEXIST,
            Self::NotRegistered => -ENODEV,
            Self::Driver { code } => *code,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::IndexOutOfRange { index, count } =>
                defmt::write!(fmt, "Value index {} out of range ({})", index, count),
            Self::UnknownMode =>
                defmt::write!(fmt, "Unknown mode"),
            Self::UnsupportedFormat { code } =>
                defmt::write!(fmt, "Unsupported format {}", code),
            Self::BufferTooShort { required, available } =>
                defmt::write!(fmt, "Need {} bytes, have {}", required, available),
            Self::InvalidModeInfo { reason } =>
                defmt::write!(fmt, "Invalid mode info: {}", reason),
            Self::InvalidArgument { reason } =>
                defmt::write!(fmt, "Invalid argument: {}", reason),
            Self::UnknownAttribute =>
                defmt::write!(fmt, "Unknown attribute"),
            Self::RegistryFull =>
                defmt::write!(fmt, "Registry full"),
            Self::AlreadyRegistered =>
                defmt::write!(fmt, "Already registered"),
            Self::NotRegistered =>
                defmt::write!(fmt, "Not registered"),
            Self::Driver { code } =>
                defmt::write!(fmt, "Driver error {}", code),
        }
    }
}
