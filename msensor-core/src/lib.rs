//! Core of the measurement sensor class
//!
//! Turns raw sensor telemetry into integers a consumer can read. A sensor
//! has several modes; each mode declares how its values are packed in a
//! shared raw buffer (s8, s16, s32 or IEEE-754 float), how many values a
//! sample holds, and how many decimal places the reported integers carry.
//!
//! Key constraints:
//! - Integer-only consumers: floats are reported as fixed point
//! - No heap allocation in the decode path
//! - Decoding never reads outside the active mode's sample
//!
//! ```
//! use msensor_core::{decode_value, float_to_fixed, DataFormat, Float32Bits, ModeInfo};
//!
//! // 10.5 with one decimal place
//! assert_eq!(float_to_fixed(Float32Bits::from_f32(10.5), 1), 105);
//!
//! let mode = ModeInfo::new("US-DIST-CM", DataFormat::Float)?.with_decimals(1);
//! assert_eq!(decode_value(&mode, &10.5f32.to_le_bytes(), 0)?, 105);
//! # Ok::<(), msensor_core::SensorError>(())
//! ```
//!
//! With the `std` feature (default) the crate also provides a reference
//! [`device::SensorDevice`] that keeps mode changes and sample writes
//! consistent with concurrent readers, a textual [`attributes`] view, and the
//! [`class::SensorClass`] registry.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod class;
pub mod codec;
pub mod constants;
pub mod decoder;
pub mod errors;
pub mod mode;

#[cfg(feature = "std")]
pub mod attributes;
#[cfg(feature = "std")]
pub mod device;

// Public API
pub use codec::{fixed_to_float, float_to_fixed, Float32Bits};
pub use decoder::{decode_value, decode_value_with_order, decode_values, Values};
pub use errors::{SensorError, SensorResult};
pub use mode::{DataFormat, ModeInfo};

#[cfg(feature = "std")]
pub use device::{SensorDevice, SensorDriver};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
