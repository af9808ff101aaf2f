//! IEEE-754 / Fixed-Point Codec
//!
//! ## Motivation
//!
//! Some sensors (UART sensors in particular) send 32-bit IEEE-754 floats.
//! Consumers of the sensor class only deal in integers, so every float is
//! reported as a fixed-point integer scaled by `10^decimals`, where
//! `decimals` comes from the active mode.
//!
//! ```text
//! float 10.5, decimals = 1  ──float_to_fixed──▶  105
//! 105, decimals = 1         ──fixed_to_float──▶  0x4128_0000 (10.5)
//! ```
//!
//! Both directions work on the raw bit pattern with integer arithmetic only,
//! so they behave identically on targets without an FPU.
//!
//! ## Special Values
//!
//! | Input                 | `float_to_fixed` |
//! |-----------------------|------------------|
//! | ±0, denormals         | `0`              |
//! | +∞, NaN (sign clear)  | `i32::MAX`       |
//! | -∞, NaN (sign set)    | `i32::MIN`       |
//! | magnitude > `i32`     | saturates by sign |
//!
//! ## Rounding
//!
//! When the scaled mantissa is shifted right, half of the discarded
//! remainder is added before truncating. This is *not* round-to-nearest:
//! it rounds away from zero only when the discarded fraction is at least
//! about two thirds (`0.5` becomes `0`, `0.7` becomes `1`). Sensor readings
//! have always been reported this way, so the behavior is kept exactly.
//! Do not reuse it as a general rounding primitive.
//!
//! ## Round Trips
//!
//! `fixed_to_float` divides with truncation and is not an exact inverse.
//! A round trip through both functions is stable to within one unit of the
//! last decimal place, not bit-for-bit.
//!
//! ```rust
//! use msensor_core::codec::{float_to_fixed, fixed_to_float, Float32Bits};
//!
//! let bits = Float32Bits::from_f32(-273.15);
//! let fixed = float_to_fixed(bits, 2);
//! assert_eq!(fixed, -27315);
//!
//! let back = fixed_to_float(fixed, 2).to_f32();
//! assert!((back - -273.15).abs() < 0.01);
//! ```

use core::fmt;

use crate::constants::float::{
    BINARY_POINT, EXPONENT_BIAS, EXPONENT_MASK, EXPONENT_SPECIAL, IMPLICIT_BIT,
    MANTISSA_BITS, MANTISSA_MASK, SIGN_MASK,
};

/// Raw IEEE-754 single precision bit pattern.
///
/// Kept opaque at the boundary: sensors hand over bit patterns, and only the
/// codec looks inside them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Float32Bits(u32);

impl Float32Bits {
    /// `+0.0`
    pub const ZERO: Self = Self(0);

    /// Wrap a raw bit pattern.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Bit pattern of a native float.
    pub fn from_f32(value: f32) -> Self {
        Self(value.to_bits())
    }

    /// Raw bit pattern.
    pub const fn to_bits(self) -> u32 {
        self.0
    }

    /// Reinterpret as a native float.
    pub fn to_f32(self) -> f32 {
        f32::from_bits(self.0)
    }

    /// Sign bit set
    pub const fn is_negative(self) -> bool {
        self.0 & SIGN_MASK != 0
    }

    /// Biased 8-bit exponent field.
    pub const fn exponent(self) -> u32 {
        (self.0 & EXPONENT_MASK) >> MANTISSA_BITS
    }

    /// Stored 23-bit mantissa field (without the implicit bit).
    pub const fn mantissa(self) -> u32 {
        self.0 & MANTISSA_MASK
    }
}

impl From<f32> for Float32Bits {
    fn from(value: f32) -> Self {
        Self::from_f32(value)
    }
}

impl fmt::Debug for Float32Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Float32Bits({:#010x})", self.0)
    }
}

/// `10^decimals`, or `None` when it does not fit in 64 bits.
fn pow10(decimals: u32) -> Option<u64> {
    10u64.checked_pow(decimals)
}

/// Saturated result for a value too large to represent.
fn saturate(negative: bool) -> i32 {
    if negative {
        i32::MIN
    } else {
        i32::MAX
    }
}

/// Shift right by `shift`, first adding half of the bits about to be
/// discarded.
fn shift_right_rounded(value: u64, shift: u32) -> u64 {
    // value < 2^64, so value * 1.5 >> 127 is always zero
    if shift >= 127 {
        return 0;
    }
    let wide = u128::from(value);
    let remainder = wide & ((1u128 << shift) - 1);
    let rounded = (wide + (remainder >> 1)) >> shift;
    u64::try_from(rounded).unwrap_or(u64::MAX)
}

/// Apply the sign to a magnitude, saturating to the `i32` range.
fn apply_sign(magnitude: u64, negative: bool) -> i32 {
    if negative {
        i64::try_from(magnitude)
            .ok()
            .and_then(|m| i32::try_from(-m).ok())
            .unwrap_or(i32::MIN)
    } else {
        i32::try_from(magnitude).unwrap_or(i32::MAX)
    }
}

/// Convert an IEEE-754 float bit pattern to a fixed-point integer with
/// `decimals` decimal places.
///
/// See the module documentation for the special-value and rounding rules.
pub fn float_to_fixed(bits: Float32Bits, decimals: u32) -> i32 {
    let negative = bits.is_negative();
    let exponent = bits.exponent();

    // zero and denormals
    if exponent == 0 {
        return 0;
    }
    // infinity and NaN
    if exponent == EXPONENT_SPECIAL {
        return saturate(negative);
    }

    let significand = u64::from(bits.mantissa() | IMPLICIT_BIT);
    let Some(scaled) = pow10(decimals).and_then(|p| significand.checked_mul(p)) else {
        return saturate(negative);
    };

    let magnitude = if exponent < BINARY_POINT {
        shift_right_rounded(scaled, BINARY_POINT - exponent)
    } else {
        let shift = exponent - BINARY_POINT;
        if scaled.leading_zeros() < shift {
            return saturate(negative);
        }
        scaled << shift
    };

    apply_sign(magnitude, negative)
}

/// Convert a fixed-point integer with `decimals` decimal places back to an
/// IEEE-754 float bit pattern.
///
/// Lossy: the decimal scale is removed with truncating division. Values that
/// truncate to nothing (for example `1` with 10 decimals) become `+0.0`.
pub fn fixed_to_float(value: i32, decimals: u32) -> Float32Bits {
    if value == 0 {
        return Float32Bits::ZERO;
    }

    let negative = value < 0;
    let Some(divisor) = pow10(decimals) else {
        return Float32Bits::ZERO;
    };

    // |i32| < 2^32, so the shifted value stays below 2^55
    let mut mantissa = (u64::from(value.unsigned_abs()) << MANTISSA_BITS) / divisor;
    if mantissa == 0 {
        return Float32Bits::ZERO;
    }

    let mut exponent = EXPONENT_BIAS;
    let implicit = u64::from(IMPLICIT_BIT);
    while mantissa >= implicit << 1 {
        mantissa >>= 1;
        exponent += 1;
    }
    while mantissa < implicit {
        mantissa <<= 1;
        exponent -= 1;
    }

    // normalized: exponent in 104..=158, mantissa in [2^23, 2^24)
    let fraction = (mantissa - implicit) as u32;
    let sign = if negative { SIGN_MASK } else { 0 };

    Float32Bits(sign | (exponent as u32) << MANTISSA_BITS | fraction)
}
