//! Convolution unit
//!
//! One unit computes the 9-tap dot product of a window against one filter's
//! weights plus the filter bias. Four instances run in parallel, one per
//! output filter, all consuming the same broadcast window.

use axon_models::{WeightTable, KERNEL_TAPS};
use axon_num::ConvAccum;

use crate::window::Window;

/// One filter's multiply-accumulate unit.
///
/// `conv_out = Σ window[i]·weight[i] + bias`, summed as a fixed pairwise
/// adder tree so the result is bit-reproducible, with the bias sign-extended
/// into the accumulator width. `i32` holds the worst case
/// (9·255·128 + 128) with room to spare, so no rounding or saturation
/// happens here.
#[derive(Debug, Clone)]
pub struct ConvUnit {
    weights: [i8; KERNEL_TAPS],
    bias: i8,
}

impl ConvUnit {
    /// Create a unit from one filter's taps and bias.
    pub fn new(weights: [i8; KERNEL_TAPS], bias: i8) -> Self {
        Self { weights, bias }
    }

    /// Create the unit for filter `filter` of a weight table.
    pub fn from_table(table: &WeightTable, filter: usize) -> Self {
        Self::new(*table.conv_filter(filter), table.conv_bias(filter))
    }

    /// Compute `conv_out` for one window.
    pub fn apply(&self, window: &Window) -> ConvAccum {
        let mut p = [0i32; KERNEL_TAPS];
        for i in 0..KERNEL_TAPS {
            p[i] = i32::from(window[i]) * i32::from(self.weights[i]);
        }
        // Pairwise reduction: ((p0+p1)+(p2+p3)) + ((p4+p5)+(p6+p7)), then p8.
        let s0 = p[0] + p[1];
        let s1 = p[2] + p[3];
        let s2 = p[4] + p[5];
        let s3 = p[6] + p[7];
        (s0 + s1) + (s2 + s3) + p[8] + i32::from(self.bias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_window_closed_form() {
        // 9·V·W + B with V=10, W=1, B=5
        let unit = ConvUnit::new([1; KERNEL_TAPS], 5);
        assert_eq!(unit.apply(&[10; KERNEL_TAPS]), 95);
    }

    #[test]
    fn identity_kernel_reproduces_center() {
        let mut weights = [0i8; KERNEL_TAPS];
        weights[4] = 1;
        let unit = ConvUnit::new(weights, 0);
        let mut window = [3i16; KERNEL_TAPS];
        window[4] = 100;
        assert_eq!(unit.apply(&window), 100);
    }

    #[test]
    fn bias_is_sign_extended() {
        let unit = ConvUnit::new([0; KERNEL_TAPS], -128);
        assert_eq!(unit.apply(&[255; KERNEL_TAPS]), -128);
    }

    #[test]
    fn worst_case_magnitude_fits() {
        let unit = ConvUnit::new([-128; KERNEL_TAPS], -128);
        assert_eq!(unit.apply(&[255; KERNEL_TAPS]), -(9 * 255 * 128) - 128);
    }

    #[test]
    fn mixed_signs() {
        let unit = ConvUnit::new([1, -1, 2, -2, 0, 0, 3, -3, 1], 7);
        let window = [10, 10, 5, 5, 99, 99, 2, 2, 4];
        // 10-10+10-10+0+0+6-6+4+7
        assert_eq!(unit.apply(&window), 11);
    }
}
