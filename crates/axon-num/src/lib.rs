//! Fixed-point numeric convention shared by every axon datapath stage.
//!
//! This crate has **no dependencies** — it is a pure model of the number
//! format the silicon would use: signed Q4.4 storage (4 integer bits, 4
//! fractional bits, 8-bit two's complement, scale factor 16) and the
//! accumulator widths each stage needs to make true overflow impossible.
//!
//! # Domains
//!
//! Datapath arithmetic happens on **raw quantized integers**; the scale factor
//! is bookkeeping, never applied inside the pipeline:
//!
//! | Value | Storage | Scale |
//! |-------|---------|-------|
//! | Pixel sample | `i16` holding 0..=255 | 1 |
//! | Weight / bias | [`Q44`] (`i8`) | 16 |
//! | Convolution accumulator | [`ConvAccum`] (`i32`) | 16 |
//! | Dense accumulator / class score | [`Score`] (`i64`) | mixed (see below) |
//!
//! A dense product is (scale 16) × (scale 16) = scale 256 while the dense bias
//! is added raw at scale 16, matching the reference datapath exactly. Scores
//! stay mutually comparable because every class is computed in the same
//! domain, so the argmax decision is unaffected.
//!
//! # Width proofs
//!
//! - Convolution: 9 · 255 · 128 + 128 = 293,888 < 2^19 — `i32` cannot
//!   overflow.
//! - Dense: 676 · 293,888 · 128 < 2^35 — `i64` cannot overflow. Saturation is
//!   therefore never needed at these widths; a narrower port would have to
//!   saturate instead of wrap, which this implementation does not do.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

/// Number of fractional bits in the Q4.4 format.
pub const FRAC_BITS: u32 = 4;

/// Total storage bits (sign included).
pub const TOTAL_BITS: u32 = 8;

/// Scale factor: a stored integer `q` represents the real value `q / 16`.
pub const SCALE: i32 = 1 << FRAC_BITS;

/// Convolution-domain accumulator. Wide enough for 9 products plus bias.
pub type ConvAccum = i32;

/// Dense-domain accumulator and class score. Wide enough for a 676-term
/// running sum of convolution-domain activations times Q4.4 weights.
pub type Score = i64;

/// A signed Q4.4 fixed-point value: 4 integer bits, 4 fractional bits,
/// stored as `i8`. Representable range [-8.0, 7.9375] in steps of 0.0625.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Q44(i8);

impl Q44 {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Raw 1.0 (stored integer 16).
    pub const ONE: Self = Self(16);

    /// Most negative representable value (-8.0).
    pub const MIN: Self = Self(i8::MIN);

    /// Most positive representable value (7.9375).
    pub const MAX: Self = Self(i8::MAX);

    /// Wrap a raw stored integer.
    pub const fn from_raw(raw: i8) -> Self {
        Self(raw)
    }

    /// The raw stored integer.
    pub const fn raw(self) -> i8 {
        self.0
    }

    /// Quantize a float: multiply by the scale, round to nearest, and
    /// saturate to the representable range. This is exactly what the offline
    /// quantization tool does when it emits a weight table.
    pub fn from_f32(value: f32) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let scaled = (value * SCALE as f32).round() as i32;
        #[allow(clippy::cast_possible_truncation)]
        Self(scaled.clamp(i32::from(i8::MIN), i32::from(i8::MAX)) as i8)
    }

    /// The real value this fixed-point integer represents.
    pub fn to_f32(self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        {
            f32::from(self.0) / SCALE as f32
        }
    }
}

impl std::fmt::Display for Q44 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.to_f32())
    }
}

/// Render a raw score (mixed-scale dense domain) as an approximate real
/// value, dividing out the product scale 256.
pub fn score_to_f32(score: Score) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    {
        score as f32 / (SCALE * SCALE) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_sixteen() {
        assert_eq!(SCALE, 16);
    }

    #[test]
    fn quantize_exact_values() {
        assert_eq!(Q44::from_f32(0.0).raw(), 0);
        assert_eq!(Q44::from_f32(1.0).raw(), 16);
        assert_eq!(Q44::from_f32(0.5).raw(), 8);
        assert_eq!(Q44::from_f32(-0.0625).raw(), -1);
        assert_eq!(Q44::from_f32(-8.0).raw(), -128);
        assert_eq!(Q44::from_f32(7.9375).raw(), 127);
    }

    #[test]
    fn quantize_saturates_out_of_range() {
        assert_eq!(Q44::from_f32(10.0), Q44::MAX);
        assert_eq!(Q44::from_f32(-10.0), Q44::MIN);
    }

    #[test]
    fn quantize_rounds_to_nearest() {
        // 0.03 * 16 = 0.48 -> 0; 0.04 * 16 = 0.64 -> 1
        assert_eq!(Q44::from_f32(0.03).raw(), 0);
        assert_eq!(Q44::from_f32(0.04).raw(), 1);
    }

    #[test]
    fn roundtrip_representable_values() {
        for raw in i8::MIN..=i8::MAX {
            let q = Q44::from_raw(raw);
            assert_eq!(Q44::from_f32(q.to_f32()), q);
        }
    }

    #[test]
    fn range_endpoints() {
        assert!((Q44::MIN.to_f32() - (-8.0)).abs() < f32::EPSILON);
        assert!((Q44::MAX.to_f32() - 7.9375).abs() < f32::EPSILON);
    }
}
