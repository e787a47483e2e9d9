//! Feature aggregator
//!
//! Collects the pooled outputs of all four filter lanes into one flat
//! feature vector in channel-major order:
//!
//! ```text
//! index = filter · (pooled_h · pooled_w) + row · pooled_w + col
//! ```
//!
//! Each lane appends row-major, so position determines the slot and every
//! slot is written exactly once per image. The aggregator never signals
//! ready early: release is gated on every lane holding its full pooled map,
//! and an unevenly filled vector is reported as a desynchronization instead
//! of being assumed away.

use axon_models::{ArchConfig, FILTERS};
use axon_num::ConvAccum;

use crate::error::{PipelineError, Result};

/// Per-lane pooled-map collector with an explicit completion barrier.
#[derive(Debug)]
pub struct FeatureAggregator {
    pooled_len: usize,
    lanes: [Vec<ConvAccum>; FILTERS],
}

impl FeatureAggregator {
    /// Create an aggregator for one architecture.
    pub fn new(arch: &ArchConfig) -> Self {
        let pooled_len = arch.pooled_len();
        Self {
            pooled_len,
            lanes: std::array::from_fn(|_| Vec::with_capacity(pooled_len)),
        }
    }

    /// Append one pooled value to a lane's map.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::LaneOverflow`] if the lane's map is already
    /// full — a write past the last slot would double-write on wraparound,
    /// so it is rejected outright.
    pub fn push(&mut self, lane: usize, value: ConvAccum) -> Result<()> {
        if self.lanes[lane].len() == self.pooled_len {
            return Err(PipelineError::LaneOverflow { lane });
        }
        self.lanes[lane].push(value);
        Ok(())
    }

    /// Whether every lane has delivered its full pooled map.
    pub fn ready(&self) -> bool {
        self.lanes.iter().all(|lane| lane.len() == self.pooled_len)
    }

    /// Pooled values a lane has delivered so far.
    pub fn lane_fill(&self, lane: usize) -> usize {
        self.lanes[lane].len()
    }

    /// Release the completed feature vector and clear the lanes for the
    /// next image.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::LaneDesync`] naming the first lane whose
    /// fill differs from the expected map size.
    pub fn take_features(&mut self) -> Result<Vec<ConvAccum>> {
        for (lane, buf) in self.lanes.iter().enumerate() {
            if buf.len() != self.pooled_len {
                return Err(PipelineError::LaneDesync {
                    lane,
                    expected: self.pooled_len,
                    got: buf.len(),
                });
            }
        }
        let mut features = Vec::with_capacity(FILTERS * self.pooled_len);
        for lane in &mut self.lanes {
            features.append(lane);
        }
        Ok(features)
    }

    /// Hard reset for a new image.
    pub fn reset(&mut self) {
        for lane in &mut self.lanes {
            lane.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> FeatureAggregator {
        // 4x4 image -> 2x2 map -> 1x1 pooled map per lane.
        FeatureAggregator::new(&ArchConfig::new(4, 4).unwrap())
    }

    #[test]
    fn channel_major_order() {
        let mut agg = small();
        for lane in 0..FILTERS {
            agg.push(lane, (lane * 10) as ConvAccum).unwrap();
        }
        assert!(agg.ready());
        assert_eq!(agg.take_features().unwrap(), vec![0, 10, 20, 30]);
    }

    #[test]
    fn not_ready_until_all_lanes_full() {
        let mut agg = small();
        agg.push(0, 1).unwrap();
        agg.push(1, 1).unwrap();
        agg.push(2, 1).unwrap();
        assert!(!agg.ready());
        agg.push(3, 1).unwrap();
        assert!(agg.ready());
    }

    #[test]
    fn overflow_rejected() {
        let mut agg = small();
        agg.push(2, 5).unwrap();
        assert_eq!(
            agg.push(2, 5).unwrap_err(),
            PipelineError::LaneOverflow { lane: 2 }
        );
    }

    #[test]
    fn desync_reported_with_lane_and_counts() {
        let mut agg = small();
        agg.push(0, 1).unwrap();
        let err = agg.take_features().unwrap_err();
        assert_eq!(
            err,
            PipelineError::LaneDesync {
                lane: 1,
                expected: 1,
                got: 0
            }
        );
    }

    #[test]
    fn release_clears_lanes() {
        let mut agg = small();
        for lane in 0..FILTERS {
            agg.push(lane, 7).unwrap();
        }
        agg.take_features().unwrap();
        assert!(!agg.ready());
        assert_eq!(agg.lane_fill(0), 0);
    }
}
