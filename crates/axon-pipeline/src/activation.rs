//! ReLU activation
//!
//! Stateless, zero-latency: fused into the same step as the convolution
//! output that feeds it.

use axon_num::ConvAccum;

/// `f(x) = max(x, 0)`.
#[inline]
pub fn relu(x: ConvAccum) -> ConvAccum {
    x.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_negatives_to_zero() {
        assert_eq!(relu(-1), 0);
        assert_eq!(relu(i32::MIN), 0);
    }

    #[test]
    fn identity_on_non_negatives() {
        for x in [0, 1, 95, i32::MAX] {
            assert_eq!(relu(x), x);
        }
    }

    #[test]
    fn idempotent() {
        for x in [-100, -1, 0, 1, 12345] {
            assert_eq!(relu(relu(x)), relu(x));
            assert!(relu(x) >= 0);
        }
    }
}
