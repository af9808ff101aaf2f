//! Mode-Indexed Raw Value Decoder
//!
//! Extracts the Nth value of a sample from the raw buffer, according to the
//! wire format of a mode:
//!
//! ```text
//! format  width  value N lives at        result
//! s8      1      buffer[N]               sign extended
//! s16     2      buffer[2N .. 2N+2]      sign extended
//! s32     4      buffer[4N .. 4N+4]      as is
//! float   4      buffer[4N .. 4N+4]      float_to_fixed(bits, decimals)
//! ```
//!
//! Bytes are always assembled explicitly in the configured byte order
//! ([`RAW_BYTE_ORDER`]); the buffer is never reinterpreted in place.
//!
//! ```rust
//! use msensor_core::{decode_value, DataFormat, ModeInfo};
//!
//! let mode = ModeInfo::new("RGB", DataFormat::S16)?.with_data_sets(2)?;
//! let raw = [0x01, 0x00, 0xFF, 0xFF];
//!
//! assert_eq!(decode_value(&mode, &raw, 0)?, 1);
//! assert_eq!(decode_value(&mode, &raw, 1)?, -1);
//! # Ok::<(), msensor_core::SensorError>(())
//! ```

use heapless::Vec;

use crate::{
    codec::{float_to_fixed, Float32Bits},
    constants::{ByteOrder, MAX_VALUES, RAW_BYTE_ORDER},
    errors::{SensorError, SensorResult},
    mode::{DataFormat, ModeInfo},
};

/// Decoded values of one sample
pub type Values = Vec<i32, MAX_VALUES>;

/// Decode value `index` of `mode` from `buffer` using the hardware byte order.
pub fn decode_value(mode: &ModeInfo, buffer: &[u8], index: usize) -> SensorResult<i32> {
    decode_value_with_order(mode, buffer, index, RAW_BYTE_ORDER)
}

/// Decode value `index` of `mode` from `buffer` with an explicit byte order.
///
/// Fails with [`SensorError::IndexOutOfRange`] when `index` is not below the
/// mode's data set count, and with [`SensorError::BufferTooShort`] rather
/// than reading past the end of `buffer`.
pub fn decode_value_with_order(
    mode: &ModeInfo,
    buffer: &[u8],
    index: usize,
    order: ByteOrder,
) -> SensorResult<i32> {
    let count = mode.data_sets();
    if index >= count {
        return Err(SensorError::IndexOutOfRange { index, count });
    }

    let format = mode.format();
    let width = format.width();
    let start = index * width;
    let bytes = buffer
        .get(start..start + width)
        .ok_or(SensorError::BufferTooShort {
            required: start + width,
            available: buffer.len(),
        })?;

    let value = match format {
        DataFormat::S8 => i32::from(i8::from_le_bytes([bytes[0]])),
        DataFormat::S16 => i32::from(read_i16(bytes, order)),
        DataFormat::S32 => read_i32(bytes, order),
        DataFormat::Float => {
            let bits = Float32Bits::from_bits(read_u32(bytes, order));
            float_to_fixed(bits, mode.decimals())
        }
    };

    Ok(value)
}

/// Decode every value of one sample.
pub fn decode_values(mode: &ModeInfo, buffer: &[u8]) -> SensorResult<Values> {
    let mut values = Values::new();
    for index in 0..mode.data_sets() {
        let value = decode_value(mode, buffer, index)?;
        // data_sets <= MAX_VALUES is enforced by ModeInfo
        values
            .push(value)
            .map_err(|_| SensorError::IndexOutOfRange { index, count: MAX_VALUES })?;
    }
    Ok(values)
}

fn read_i16(bytes: &[u8], order: ByteOrder) -> i16 {
    let raw = [bytes[0], bytes[1]];
    match order {
        ByteOrder::Little => i16::from_le_bytes(raw),
        ByteOrder::Big => i16::from_be_bytes(raw),
    }
}

fn read_u32(bytes: &[u8], order: ByteOrder) -> u32 {
    let raw = [bytes[0], bytes[1], bytes[2], bytes[3]];
    match order {
        ByteOrder::Little => u32::from_le_bytes(raw),
        ByteOrder::Big => u32::from_be_bytes(raw),
    }
}

fn read_i32(bytes: &[u8], order: ByteOrder) -> i32 {
    read_u32(bytes, order) as i32
}
