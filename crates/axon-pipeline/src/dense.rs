//! Dense classification layer
//!
//! Computes, for each of the 10 classes, the dot product of the full feature
//! vector against that class's weight row plus bias.
//!
//! Accumulation order: **parallel across classes, serial across features** —
//! one feature index per [`DenseClassifier::step`], ten MACs per step, N
//! steps followed by one bias step. The serialized feature axis matches a
//! single-read-port weight memory delivering one feature column per step;
//! the ten parallel accumulators match the adder bank the parallel sketch
//! implies.
//!
//! Accumulators are `i64`: 676 · (9·255·128+128) · 128 is far below 2^63, so
//! overflow is impossible under representable inputs and no saturation path
//! exists.

use axon_models::{WeightTable, CLASSES};
use axon_num::{ConvAccum, Score};

use crate::error::{PipelineError, Result};

/// Dense-layer state machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensePhase {
    /// Waiting for a start signal.
    Idle,
    /// Accumulating one feature index per step.
    Accumulate,
    /// Adding each class's sign-extended bias.
    AddBias,
    /// Scores stable until the next start signal.
    Done,
}

/// 10-class dense classifier.
#[derive(Debug)]
pub struct DenseClassifier {
    /// Class-major weight rows: row `c` at `c*n .. (c+1)*n`.
    weights: Vec<i8>,
    biases: [i8; CLASSES],
    n: usize,
    phase: DensePhase,
    idx: usize,
    acc: [Score; CLASSES],
    features: Vec<ConvAccum>,
}

impl DenseClassifier {
    /// Create a classifier for feature length `n`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::FeatureLengthMismatch`] if `weights` does
    /// not hold exactly `CLASSES × n` values.
    pub fn new(n: usize, weights: Vec<i8>, biases: [i8; CLASSES]) -> Result<Self> {
        if weights.len() != CLASSES * n {
            return Err(PipelineError::FeatureLengthMismatch {
                expected: CLASSES * n,
                got: weights.len(),
            });
        }
        Ok(Self {
            weights,
            biases,
            n,
            phase: DensePhase::Idle,
            idx: 0,
            acc: [0; CLASSES],
            features: Vec::new(),
        })
    }

    /// Create the classifier from a validated weight table.
    pub fn from_table(table: &WeightTable) -> Self {
        let n = table.arch().feature_len();
        let mut weights = Vec::with_capacity(CLASSES * n);
        let mut biases = [0i8; CLASSES];
        for (class, bias) in biases.iter_mut().enumerate() {
            weights.extend_from_slice(table.dense_row(class));
            *bias = table.dense_bias(class);
        }
        Self::new(n, weights, biases).expect("table rows validated at load time")
    }

    /// Start signal: accept a complete feature vector and reset every class
    /// accumulator. Reasserting start mid-computation is a hard reset; any
    /// in-flight scores are abandoned.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::FeatureLengthMismatch`] unless the vector
    /// length equals the configured N exactly.
    pub fn start(&mut self, features: Vec<ConvAccum>) -> Result<()> {
        if features.len() != self.n {
            return Err(PipelineError::FeatureLengthMismatch {
                expected: self.n,
                got: features.len(),
            });
        }
        self.features = features;
        self.acc = [0; CLASSES];
        self.idx = 0;
        self.phase = DensePhase::Accumulate;
        Ok(())
    }

    /// Advance the state machine by one step; returns the new phase.
    pub fn step(&mut self) -> DensePhase {
        match self.phase {
            DensePhase::Idle | DensePhase::Done => {}
            DensePhase::Accumulate => {
                let feature = Score::from(self.features[self.idx]);
                for (class, acc) in self.acc.iter_mut().enumerate() {
                    let weight = Score::from(self.weights[class * self.n + self.idx]);
                    *acc += feature * weight;
                }
                self.idx += 1;
                if self.idx == self.n {
                    self.phase = DensePhase::AddBias;
                }
            }
            DensePhase::AddBias => {
                for (class, acc) in self.acc.iter_mut().enumerate() {
                    *acc += Score::from(self.biases[class]);
                }
                self.phase = DensePhase::Done;
            }
        }
        self.phase
    }

    /// Run the machine to completion: N accumulate steps plus the bias step.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NotStarted`] if no start signal was given.
    pub fn run(&mut self) -> Result<&[Score; CLASSES]> {
        if self.phase == DensePhase::Idle {
            return Err(PipelineError::NotStarted);
        }
        while self.phase != DensePhase::Done {
            self.step();
        }
        Ok(&self.acc)
    }

    /// The class scores, available only once the machine reaches `Done`.
    pub fn scores(&self) -> Option<&[Score; CLASSES]> {
        (self.phase == DensePhase::Done).then_some(&self.acc)
    }

    /// Current phase.
    pub fn phase(&self) -> DensePhase {
        self.phase
    }

    /// Configured feature-vector length N.
    pub fn feature_len(&self) -> usize {
        self.n
    }

    /// Hard reset to `Idle`, discarding any scores.
    pub fn reset(&mut self) {
        self.phase = DensePhase::Idle;
        self.idx = 0;
        self.acc = [0; CLASSES];
        self.features.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(features: &[ConvAccum], weights: &[i8], biases: &[i8; CLASSES]) -> Vec<Score> {
        let n = features.len();
        (0..CLASSES)
            .map(|c| {
                features
                    .iter()
                    .enumerate()
                    .map(|(i, &f)| Score::from(f) * Score::from(weights[c * n + i]))
                    .sum::<Score>()
                    + Score::from(biases[c])
            })
            .collect()
    }

    #[test]
    fn matches_brute_force_reference() {
        let n = 7;
        let weights: Vec<i8> = (0..CLASSES * n).map(|i| (i as i8).wrapping_mul(13)).collect();
        let biases: [i8; CLASSES] = [3, -3, 5, -5, 7, -7, 11, -11, 0, 127];
        let features: Vec<ConvAccum> = vec![0, 1, -2, 300, 5, 80, 1000];

        let mut dense = DenseClassifier::new(n, weights.clone(), biases).unwrap();
        dense.start(features.clone()).unwrap();
        let scores = dense.run().unwrap();
        assert_eq!(scores.as_slice(), brute_force(&features, &weights, &biases));
    }

    #[test]
    fn phase_sequence_takes_n_plus_one_steps() {
        let n = 4;
        let mut dense = DenseClassifier::new(n, vec![1; CLASSES * n], [0; CLASSES]).unwrap();
        assert_eq!(dense.phase(), DensePhase::Idle);
        dense.start(vec![2; n]).unwrap();
        for _ in 0..n - 1 {
            assert_eq!(dense.step(), DensePhase::Accumulate);
        }
        assert_eq!(dense.step(), DensePhase::AddBias);
        assert_eq!(dense.step(), DensePhase::Done);
        assert_eq!(dense.scores().unwrap(), &[8; CLASSES]);
    }

    #[test]
    fn length_mismatch_rejected() {
        let mut dense = DenseClassifier::new(4, vec![0; CLASSES * 4], [0; CLASSES]).unwrap();
        assert_eq!(
            dense.start(vec![0; 5]).unwrap_err(),
            PipelineError::FeatureLengthMismatch {
                expected: 4,
                got: 5
            }
        );
    }

    #[test]
    fn run_without_start_rejected() {
        let mut dense = DenseClassifier::new(2, vec![0; CLASSES * 2], [0; CLASSES]).unwrap();
        assert_eq!(dense.run().unwrap_err(), PipelineError::NotStarted);
    }

    #[test]
    fn restart_abandons_in_flight_scores() {
        let n = 3;
        let mut dense = DenseClassifier::new(n, vec![1; CLASSES * n], [0; CLASSES]).unwrap();
        dense.start(vec![100; n]).unwrap();
        dense.step();
        // New start mid-accumulation: previous partial sums must vanish.
        dense.start(vec![1; n]).unwrap();
        let scores = dense.run().unwrap();
        assert_eq!(scores, &[3; CLASSES]);
    }

    #[test]
    fn bias_sign_extends() {
        let n = 1;
        let mut dense = DenseClassifier::new(n, vec![0; CLASSES], [-128; CLASSES]).unwrap();
        dense.start(vec![0]).unwrap();
        assert_eq!(dense.run().unwrap(), &[-128; CLASSES]);
    }

    #[test]
    fn scores_held_until_restart() {
        let n = 2;
        let mut dense = DenseClassifier::new(n, vec![1; CLASSES * n], [1; CLASSES]).unwrap();
        dense.start(vec![5, 5]).unwrap();
        dense.run().unwrap();
        // Stepping in Done must not disturb the scores.
        dense.step();
        dense.step();
        assert_eq!(dense.scores().unwrap(), &[11; CLASSES]);
    }
}
