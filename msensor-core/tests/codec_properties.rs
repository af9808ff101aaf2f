//! Property-based tests for the fixed-point codec and decoder.
//!
//! These tests use proptest to generate float bit patterns, fixed-point
//! values and raw buffers, and verify invariants that must hold for all of
//! them.
//!
//! Run with: cargo test -p msensor-core --test codec_properties

use msensor_core::{
    constants::RAW_DATA_SIZE, decode_value, fixed_to_float, float_to_fixed, DataFormat,
    Float32Bits, ModeInfo, SensorError,
};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Any finite float, drawn from the full bit pattern space
fn arb_finite_f32() -> impl Strategy<Value = f32> {
    any::<u32>()
        .prop_map(f32::from_bits)
        .prop_filter("finite", |f| f.is_finite())
}

/// Decimal counts sensor modes use in practice
fn arb_decimals() -> impl Strategy<Value = u32> {
    0u32..4
}

fn arb_format() -> impl Strategy<Value = DataFormat> {
    prop_oneof![
        Just(DataFormat::S8),
        Just(DataFormat::S16),
        Just(DataFormat::S32),
        Just(DataFormat::Float),
    ]
}

fn fixed(value: f32, decimals: u32) -> i32 {
    float_to_fixed(Float32Bits::from_f32(value), decimals)
}

// =============================================================================
// Codec
// =============================================================================

proptest! {
    #[test]
    fn float_to_fixed_is_monotonic(
        a in arb_finite_f32(),
        b in arb_finite_f32(),
        dp in arb_decimals(),
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(fixed(lo, dp) <= fixed(hi, dp), "{lo} -> {}, {hi} -> {}", fixed(lo, dp), fixed(hi, dp));
    }

    #[test]
    fn float_to_fixed_is_monotonic_between_neighbours(
        value in -1.0e6f32..1.0e6f32,
        dp in arb_decimals(),
    ) {
        let next = f32::from_bits(if value >= 0.0 { value.to_bits() + 1 } else { value.to_bits() - 1 });
        prop_assert!(fixed(value, dp) <= fixed(next, dp));
    }

    #[test]
    fn float_round_trip_is_stable(
        value in -1.0e5f32..1.0e5f32,
        dp in arb_decimals(),
    ) {
        let back = fixed_to_float(fixed(value, dp), dp).to_f32();
        let tolerance = 10f32.powi(-(dp as i32)) + value.abs() * 1.0e-6;
        prop_assert!((back - value).abs() <= tolerance, "{value} dp={dp} came back as {back}");
    }

    #[test]
    fn fixed_round_trip_within_one_unit(
        value in -1_000_000i32..1_000_000,
        dp in arb_decimals(),
    ) {
        let back = float_to_fixed(fixed_to_float(value, dp), dp);
        prop_assert!((back - value).abs() <= 1, "{value} dp={dp} came back as {back}");
    }

    #[test]
    fn fixed_to_float_keeps_sign(value in any::<i32>(), dp in arb_decimals()) {
        let bits = fixed_to_float(value, dp);
        if value < 0 {
            prop_assert!(bits.is_negative() || bits == Float32Bits::ZERO);
        } else {
            prop_assert!(!bits.is_negative());
        }
    }

    #[test]
    fn codec_is_total(bits in any::<u32>(), value in any::<i32>(), dp in 0u32..40) {
        let _ = float_to_fixed(Float32Bits::from_bits(bits), dp);
        let _ = fixed_to_float(value, dp);
    }
}

// =============================================================================
// Decoder
// =============================================================================

proptest! {
    #[test]
    fn decode_respects_data_set_count(
        format in arb_format(),
        data_sets in 1u8..=8,
        index in 0usize..16,
        raw in prop::collection::vec(any::<u8>(), RAW_DATA_SIZE),
    ) {
        prop_assume!(usize::from(data_sets) * format.width() <= RAW_DATA_SIZE);
        let mode = ModeInfo::new("PROP", format).unwrap().with_data_sets(data_sets).unwrap();

        let result = decode_value(&mode, &raw, index);
        if index < usize::from(data_sets) {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(
                result,
                Err(SensorError::IndexOutOfRange { index, count: usize::from(data_sets) })
            );
        }
    }

    #[test]
    fn decode_only_depends_on_sample_bytes(
        format in arb_format(),
        raw in prop::collection::vec(any::<u8>(), RAW_DATA_SIZE),
        noise in any::<u8>(),
    ) {
        let mode = ModeInfo::new("PROP", format).unwrap().with_data_sets(2).unwrap();
        let mut changed = raw.clone();
        for byte in &mut changed[mode.raw_size()..] {
            *byte ^= noise;
        }
        for index in 0..2 {
            prop_assert_eq!(decode_value(&mode, &raw, index), decode_value(&mode, &changed, index));
        }
    }

    #[test]
    fn decode_never_panics_on_short_buffers(
        format in arb_format(),
        raw in prop::collection::vec(any::<u8>(), 0..8),
        index in 0usize..2,
    ) {
        let mode = ModeInfo::new("PROP", format).unwrap().with_data_sets(2).unwrap();
        let needed = (index + 1) * format.width();
        let result = decode_value(&mode, &raw, index);
        if raw.len() < needed {
            let is_short = matches!(result, Err(SensorError::BufferTooShort { .. }));
            prop_assert!(is_short);
        } else {
            prop_assert!(result.is_ok());
        }
    }
}

// =============================================================================
// Reference values
// =============================================================================

#[test]
fn representative_round_trips() {
    for value in [1.0f32, 3.14, -273.15, 0.001] {
        let back = fixed_to_float(fixed(value, 2), 2).to_f32();
        assert!((back - value).abs() <= 0.01, "{value} came back as {back}");
    }
}

#[test]
fn special_values_for_all_decimals() {
    for dp in 0..8 {
        assert_eq!(float_to_fixed(Float32Bits::from_bits(0x0000_0000), dp), 0);
        assert_eq!(float_to_fixed(Float32Bits::from_bits(0x8000_0000), dp), 0);
        assert_eq!(float_to_fixed(Float32Bits::from_bits(0x7F80_0000), dp), i32::MAX);
        assert_eq!(float_to_fixed(Float32Bits::from_bits(0xFF80_0000), dp), i32::MIN);
    }
}
