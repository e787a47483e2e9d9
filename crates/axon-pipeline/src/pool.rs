//! 2×2 stride-2 max pooling
//!
//! Reduces one filter's H′×W′ activation map, delivered row-major one value
//! per step, to the element-wise maxima of its non-overlapping 2×2 blocks.
//! Stateful: nothing can be emitted until one full row of the block pair has
//! been buffered.
//!
//! The state machine is an explicit enum with exhaustive transitions. The
//! completeness contract is strict: exactly H′×W′ valid inputs produce
//! exactly (H′/2)×(W′/2) outputs and return the unit to [`PoolState::Idle`] —
//! the unit can never stall with a well-formed input stream, and the
//! transition back to `Idle` is regression-tested.

use axon_models::{ArchConfig, POOL};
use axon_num::ConvAccum;

/// Pooling state machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// No row buffered; the next input starts a new map.
    Idle,
    /// Accumulating the first row of a row pair.
    Buffering,
    /// Second row of the pair arriving; one maximum emitted per column pair.
    Reducing,
}

/// Max-pooling unit for one filter lane.
#[derive(Debug)]
pub struct PoolUnit {
    map_height: usize,
    map_width: usize,
    state: PoolState,
    row: usize,
    col: usize,
    /// Running max of the current column pair within the current row.
    pair_hold: ConvAccum,
    /// Per-column-pair maxima of the buffered first row.
    row_max: Vec<ConvAccum>,
    map_outputs: usize,
}

impl PoolUnit {
    /// Create a unit for one post-convolution map geometry.
    pub fn new(arch: &ArchConfig) -> Self {
        Self {
            map_height: arch.map_height(),
            map_width: arch.map_width(),
            state: PoolState::Idle,
            row: 0,
            col: 0,
            pair_hold: 0,
            row_max: vec![0; arch.map_width() / POOL],
            map_outputs: 0,
        }
    }

    /// Consume one activation value; returns a block maximum when one of the
    /// map's 2×2 blocks completes.
    ///
    /// After the H′-th row the unit returns to `Idle` on its own; a further
    /// input starts the next map.
    pub fn push(&mut self, value: ConvAccum) -> Option<ConvAccum> {
        if self.state == PoolState::Idle {
            self.state = PoolState::Buffering;
            self.row = 0;
            self.col = 0;
            self.map_outputs = 0;
        }

        let out = match self.state {
            PoolState::Buffering => {
                if self.col % POOL == 0 {
                    self.pair_hold = value;
                } else {
                    self.row_max[self.col / POOL] = self.pair_hold.max(value);
                }
                None
            }
            PoolState::Reducing => {
                if self.col % POOL == 0 {
                    self.pair_hold = value;
                    None
                } else {
                    Some(self.row_max[self.col / POOL].max(self.pair_hold.max(value)))
                }
            }
            PoolState::Idle => unreachable!("idle state exits before processing"),
        };

        if out.is_some() {
            self.map_outputs += 1;
        }

        self.col += 1;
        if self.col == self.map_width {
            self.col = 0;
            self.row += 1;
            self.state = if self.row == self.map_height {
                PoolState::Idle
            } else if self.row % POOL == 1 {
                PoolState::Reducing
            } else {
                PoolState::Buffering
            };
        }
        out
    }

    /// Current state machine phase.
    pub fn state(&self) -> PoolState {
        self.state
    }

    /// Outputs emitted for the current (or just-completed) map.
    pub fn map_outputs(&self) -> usize {
        self.map_outputs
    }

    /// Hard reset for a new image.
    pub fn reset(&mut self) {
        self.state = PoolState::Idle;
        self.row = 0;
        self.col = 0;
        self.pair_hold = 0;
        self.map_outputs = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_for(h: usize, w: usize) -> PoolUnit {
        // Map H'xW' comes from an (H'+2)x(W'+2) image.
        PoolUnit::new(&ArchConfig::new(h + 2, w + 2).unwrap())
    }

    fn drive(unit: &mut PoolUnit, values: impl IntoIterator<Item = ConvAccum>) -> Vec<ConvAccum> {
        values.into_iter().filter_map(|v| unit.push(v)).collect()
    }

    #[test]
    fn monotonic_map_yields_bottom_right_elements() {
        // value = row*W' + col: each 2x2 block's max is its bottom-right.
        let mut unit = unit_for(4, 4);
        let out = drive(&mut unit, 0..16);
        assert_eq!(out, vec![5, 7, 13, 15]);
        assert_eq!(unit.state(), PoolState::Idle);
    }

    #[test]
    fn completeness_minimal_map() {
        let mut unit = unit_for(2, 2);
        let out = drive(&mut unit, [9, 2, 3, 4]);
        assert_eq!(out, vec![9]);
        assert_eq!(unit.state(), PoolState::Idle);
    }

    #[test]
    fn completeness_mnist_map_no_hang() {
        // Exactly 26x26 = 676 samples must yield exactly 169 outputs and
        // leave the unit idle. This is the reference design's hang case.
        let mut unit = unit_for(26, 26);
        let out = drive(&mut unit, std::iter::repeat(1).take(676));
        assert_eq!(out.len(), 169);
        assert_eq!(unit.map_outputs(), 169);
        assert_eq!(unit.state(), PoolState::Idle);
    }

    #[test]
    fn max_is_position_independent() {
        let mut unit = unit_for(2, 4);
        // Blocks: [7,1,2,3] -> 7 (top-left), [0,5,1,5] -> 5 (tied).
        let out = drive(&mut unit, [7, 1, 0, 5, 2, 3, 1, 5]);
        assert_eq!(out, vec![7, 5]);
    }

    #[test]
    fn back_to_back_maps() {
        let mut unit = unit_for(2, 2);
        assert_eq!(drive(&mut unit, [1, 2, 3, 4]), vec![4]);
        // Next map starts without an explicit reset.
        assert_eq!(drive(&mut unit, [8, 6, 7, 5]), vec![8]);
        assert_eq!(unit.state(), PoolState::Idle);
    }

    #[test]
    fn negative_activations_pool_correctly() {
        let mut unit = unit_for(2, 2);
        assert_eq!(drive(&mut unit, [-4, -9, -2, -7]), vec![-2]);
    }

    #[test]
    fn state_sequence_for_one_row_pair() {
        let mut unit = unit_for(2, 2);
        assert_eq!(unit.state(), PoolState::Idle);
        unit.push(0);
        assert_eq!(unit.state(), PoolState::Buffering);
        unit.push(0);
        assert_eq!(unit.state(), PoolState::Reducing);
        unit.push(0);
        assert_eq!(unit.state(), PoolState::Reducing);
        unit.push(0);
        assert_eq!(unit.state(), PoolState::Idle);
    }
}
