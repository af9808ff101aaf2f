//! IEEE-754 Single Precision Layout
//!
//! ```text
//!  31  30      23 22                    0
//! ┌───┬──────────┬───────────────────────┐
//! │ s │ exponent │       mantissa        │
//! └───┴──────────┴───────────────────────┘
//! ```

/// Sign bit mask.
pub const SIGN_MASK: u32 = 0x8000_0000;

/// Biased exponent mask.
pub const EXPONENT_MASK: u32 = 0x7F80_0000;

/// Stored mantissa mask (implicit leading bit excluded).
pub const MANTISSA_MASK: u32 = 0x007F_FFFF;

/// Number of stored mantissa bits.
pub const MANTISSA_BITS: u32 = 23;

/// Implicit leading mantissa bit of a normal number.
pub const IMPLICIT_BIT: u32 = 1 << MANTISSA_BITS;

/// Exponent bias.
pub const EXPONENT_BIAS: i32 = 127;

/// Biased exponent reserved for infinity and NaN.
pub const EXPONENT_SPECIAL: u32 = 0xFF;

/// Biased exponent at which the 24-bit mantissa is an integer
/// (bias + mantissa bits). Smaller exponents shift right, larger shift left.
pub const BINARY_POINT: u32 = 150;
