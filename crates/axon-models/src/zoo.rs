//! Synthetic weight tables
//!
//! Hand-computable tables used by tests, demos, and golden regression runs.
//! None of these come from training; they exist because their outputs can be
//! predicted exactly by hand.

use crate::arch::{ArchConfig, CLASSES, FILTERS, KERNEL_TAPS};
use crate::error::Result;
use crate::table::WeightTable;

/// Every weight and bias zero. All scores come out zero; argmax picks class 0.
pub fn zeroed(arch: ArchConfig) -> WeightTable {
    let n = arch.feature_len();
    WeightTable::from_parts(
        arch,
        [[0; KERNEL_TAPS]; FILTERS],
        [0; FILTERS],
        vec![0; CLASSES * n],
        [0; CLASSES],
    )
    .expect("zeroed table is always well-formed")
}

/// Identity kernels: raw weight 1 at the centre tap, 0 elsewhere, zero bias.
/// Each convolution output equals the window's centre pixel value.
pub fn center_tap(arch: ArchConfig) -> WeightTable {
    let mut filter = [0i8; KERNEL_TAPS];
    filter[KERNEL_TAPS / 2] = 1;
    let n = arch.feature_len();
    WeightTable::from_parts(
        arch,
        [filter; FILTERS],
        [0; FILTERS],
        vec![0; CLASSES * n],
        [0; CLASSES],
    )
    .expect("center-tap table is always well-formed")
}

/// Biases only: all weights zero.
///
/// For an all-zero image with negative convolution biases, ReLU clamps every
/// activation to zero and the class scores equal the dense biases exactly —
/// the golden end-to-end regression configuration.
///
/// # Errors
///
/// Never fails for a valid `arch`; kept fallible for API symmetry with
/// [`WeightTable::from_parts`].
pub fn bias_only(
    arch: ArchConfig,
    conv_biases: [i8; FILTERS],
    dense_biases: [i8; CLASSES],
) -> Result<WeightTable> {
    let n = arch.feature_len();
    WeightTable::from_parts(
        arch,
        [[0; KERNEL_TAPS]; FILTERS],
        conv_biases,
        vec![0; CLASSES * n],
        dense_biases,
    )
}

/// Uniform table: every conv tap `conv_w`, every conv bias `conv_b`, every
/// dense weight `dense_w`, every dense bias `dense_b`.
pub fn uniform(arch: ArchConfig, conv_w: i8, conv_b: i8, dense_w: i8, dense_b: i8) -> WeightTable {
    let n = arch.feature_len();
    WeightTable::from_parts(
        arch,
        [[conv_w; KERNEL_TAPS]; FILTERS],
        [conv_b; FILTERS],
        vec![dense_w; CLASSES * n],
        [dense_b; CLASSES],
    )
    .expect("uniform table is always well-formed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_tap_has_single_live_weight() {
        let table = center_tap(ArchConfig::mnist());
        for f in 0..FILTERS {
            let filter = table.conv_filter(f);
            assert_eq!(filter[4], 1);
            assert_eq!(filter.iter().map(|&w| i32::from(w)).sum::<i32>(), 1);
            assert_eq!(table.conv_bias(f), 0);
        }
    }

    #[test]
    fn bias_only_keeps_weights_zero() {
        let table = bias_only(
            ArchConfig::mnist(),
            [-8; FILTERS],
            [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
        )
        .unwrap();
        assert!(table.conv_filter(0).iter().all(|&w| w == 0));
        assert!(table.dense_row(5).iter().all(|&w| w == 0));
        assert_eq!(table.dense_bias(7), 7);
    }
}
