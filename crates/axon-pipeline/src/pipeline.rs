//! Pipeline integration
//!
//! Drives every stage in lock-step: one [`CnnPipeline::push_pixel`] call is
//! one global step. The four filter lanes share the broadcast window and
//! advance together; the aggregator's barrier and the per-step validity
//! check turn any lane drift into a named error instead of a silent
//! misclassification.
//!
//! A "start new image" is an explicit [`CnnPipeline::reset`] (or
//! [`CnnPipeline::infer_image`], which resets first): every counter and
//! accumulator clears, and any in-flight inference is abandoned with no
//! partial-result contract. Feeding pixels past the end of an image without
//! a reset is rejected, never tolerated.

use axon_models::{ArchConfig, WeightTable, CLASSES, FILTERS};
use axon_num::Score;

use crate::activation::relu;
use crate::aggregate::FeatureAggregator;
use crate::argmax::argmax;
use crate::conv::ConvUnit;
use crate::dense::DenseClassifier;
use crate::error::{PipelineError, Result};
use crate::pool::PoolUnit;
use crate::window::WindowGen;

/// One completed classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    /// Raw class scores, one per class.
    pub scores: [Score; CLASSES],
    /// Predicted class: argmax of the scores, lowest index on ties.
    pub class: u8,
}

/// The full streaming CNN datapath for one weight table.
#[derive(Debug)]
pub struct CnnPipeline {
    arch: ArchConfig,
    window: WindowGen,
    conv: [ConvUnit; FILTERS],
    pools: [PoolUnit; FILTERS],
    aggregator: FeatureAggregator,
    dense: DenseClassifier,
}

impl CnnPipeline {
    /// Build a pipeline around a validated weight table.
    ///
    /// The table was shape-checked at load time, so construction cannot
    /// fail; the pipeline copies the parameters it needs and does not hold
    /// the table itself.
    pub fn new(table: &WeightTable) -> Self {
        let arch = *table.arch();
        tracing::info!(
            "pipeline: {}x{} image, {} windows, N={}",
            arch.height(),
            arch.width(),
            arch.window_count(),
            arch.feature_len()
        );
        Self {
            arch,
            window: WindowGen::new(&arch),
            conv: std::array::from_fn(|f| ConvUnit::from_table(table, f)),
            pools: std::array::from_fn(|_| PoolUnit::new(&arch)),
            aggregator: FeatureAggregator::new(&arch),
            dense: DenseClassifier::from_table(table),
        }
    }

    /// Hot-swap the weight table between runs. Acts as a hard reset; never
    /// call mid-inference expecting the old run to survive.
    pub fn load_table(&mut self, table: &WeightTable) {
        *self = Self::new(table);
    }

    /// The configured geometry.
    pub fn arch(&self) -> &ArchConfig {
        &self.arch
    }

    /// Advance the whole pipeline by one step with one pixel sample.
    ///
    /// Returns `Ok(Some(_))` on the step that completes the image's
    /// classification, `Ok(None)` on every other step.
    ///
    /// # Errors
    ///
    /// Propagates stream-overrun, lane, and dense-layer protocol errors;
    /// all of them are fail-stop and require a [`Self::reset`].
    pub fn push_pixel(&mut self, pixel: u8) -> Result<Option<Inference>> {
        let Some(window) = self.window.push(pixel)? else {
            return Ok(None);
        };

        // All four lanes consume the broadcast window in the same step.
        let mut valid = [false; FILTERS];
        for lane in 0..FILTERS {
            let activation = relu(self.conv[lane].apply(&window));
            if let Some(pooled) = self.pools[lane].push(activation) {
                self.aggregator.push(lane, pooled)?;
                valid[lane] = true;
            }
        }
        // Lanes process identical sample positions; mixed validity in one
        // step means a lane has drifted.
        if valid.iter().any(|&v| v != valid[0]) {
            let lane = valid.iter().position(|&v| v != valid[0]).unwrap_or(0);
            return Err(PipelineError::LaneDesync {
                lane,
                expected: self.aggregator.lane_fill(0),
                got: self.aggregator.lane_fill(lane),
            });
        }

        if !self.aggregator.ready() {
            return Ok(None);
        }

        let features = self.aggregator.take_features()?;
        tracing::debug!("features ready: {} values", features.len());
        self.dense.start(features)?;
        let scores = *self.dense.run()?;
        let class = argmax(&scores);
        tracing::debug!("scores ready, predicted class {class}");
        #[allow(clippy::cast_possible_truncation)]
        Ok(Some(Inference {
            scores,
            class: class as u8,
        }))
    }

    /// Classify one complete image.
    ///
    /// Resets the pipeline, streams all H×W samples, and returns the
    /// inference the last sample completes.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::ImageSizeMismatch`] for a wrong-length
    /// image, and [`PipelineError::Stalled`] if a well-formed stream fails
    /// to produce a classification (a liveness defect, not a recoverable
    /// condition).
    pub fn infer_image(&mut self, pixels: &[u8]) -> Result<Inference> {
        let expected = self.arch.pixel_count();
        if pixels.len() != expected {
            return Err(PipelineError::ImageSizeMismatch {
                expected,
                got: pixels.len(),
            });
        }
        self.reset();
        let mut result = None;
        for &pixel in pixels {
            if let Some(inference) = self.push_pixel(pixel)? {
                result = Some(inference);
            }
        }
        result.ok_or(PipelineError::Stalled { stage: "pipeline" })
    }

    /// Hard reset of every stage: counters, row buffers, pooled maps,
    /// accumulators. Any in-flight inference is abandoned.
    pub fn reset(&mut self) {
        self.window.reset();
        for pool in &mut self.pools {
            pool.reset();
        }
        self.aggregator.reset();
        self.dense.reset();
    }
}
