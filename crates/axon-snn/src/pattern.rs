//! Pattern-recognition spiking network
//!
//! 4-8-3 topology classifying 2x2 binary pixel patterns. Each input line
//! drives two dedicated hidden detector neurons; each output neuron sums the
//! hidden detectors of the pixels belonging to its pattern. Winner-take-all
//! is enforced two ways: the output threshold is reachable only when all of
//! a pattern's detectors volley together, and an output spike applies
//! lateral inhibition to the other output neurons, suppressing runners-up
//! before they can accumulate.
//!
//! Synapse weights use the quantized unsigned 4-bit export format (0..=15);
//! inhibition and the optional per-output teaching bias are signed currents
//! outside the weight table.

use crate::encoder::RateEncoder;
use crate::error::{Result, SnnError};
use crate::neuron::{LifConfig, Neuron};

/// Binary input lines (2x2 pixel patterns).
pub const INPUT_LINES: usize = 4;

/// Hidden detector neurons, two per input line.
pub const HIDDEN_NEURONS: usize = 8;

/// Output neurons, one per pattern class.
pub const OUTPUT_NEURONS: usize = 3;

/// Largest representable quantized synapse weight.
pub const WEIGHT_MAX: u8 = 15;

/// Hidden-layer firing threshold.
pub const HIDDEN_THRESHOLD: i32 = 15;

/// Output-layer firing threshold.
pub const OUTPUT_THRESHOLD: i32 = 48;

/// Per-step leak for every neuron. Sized so sub-pattern input (fewer than
/// three asserted lines) decays faster than it accumulates and the network
/// stays silent, while a full pattern still fires every other volley.
pub const LEAK: i32 = 2;

/// Inhibitory current an output spike applies to the other outputs.
pub const LATERAL_INHIBITION: i32 = 40;

/// Rate-encoder period for the input lines.
pub const ENCODE_PERIOD: u32 = 4;

/// Steps evaluated per classification.
pub const EVAL_STEPS: u32 = 200;

/// The "L" pattern, class 0.
pub const PATTERN_L: [bool; INPUT_LINES] = [true, false, true, true];

/// The "T" pattern, class 1.
pub const PATTERN_T: [bool; INPUT_LINES] = [true, true, false, true];

/// The "cross" pattern, class 2.
pub const PATTERN_CROSS: [bool; INPUT_LINES] = [false, true, true, true];

/// Quantized synapse tables for the 4-8-3 network.
#[derive(Debug, Clone)]
pub struct PatternWeights {
    /// `input_hidden[h][i]`: weight from input line `i` to hidden neuron `h`.
    pub input_hidden: [[u8; INPUT_LINES]; HIDDEN_NEURONS],
    /// `hidden_output[o][h]`: weight from hidden neuron `h` to output `o`.
    pub hidden_output: [[u8; HIDDEN_NEURONS]; OUTPUT_NEURONS],
}

impl PatternWeights {
    /// The built-in feature-detector table: hidden neurons `2i` and `2i+1`
    /// detect input line `i` at full weight, and each output collects the
    /// detectors of its pattern's pixels.
    pub fn builtin() -> Self {
        let mut input_hidden = [[0u8; INPUT_LINES]; HIDDEN_NEURONS];
        for (h, row) in input_hidden.iter_mut().enumerate() {
            row[h / 2] = WEIGHT_MAX;
        }
        let patterns = [PATTERN_L, PATTERN_T, PATTERN_CROSS];
        let mut hidden_output = [[0u8; HIDDEN_NEURONS]; OUTPUT_NEURONS];
        for (o, row) in hidden_output.iter_mut().enumerate() {
            for (h, w) in row.iter_mut().enumerate() {
                if patterns[o][h / 2] {
                    *w = 6;
                }
            }
        }
        Self {
            input_hidden,
            hidden_output,
        }
    }

    fn validate(&self) -> Result<()> {
        let check = |row: usize, col: usize, value: u8| {
            if value > WEIGHT_MAX {
                Err(SnnError::WeightOutOfRange {
                    row,
                    col,
                    value,
                    max: WEIGHT_MAX,
                })
            } else {
                Ok(())
            }
        };
        for (h, row) in self.input_hidden.iter().enumerate() {
            for (i, &w) in row.iter().enumerate() {
                check(h, i, w)?;
            }
        }
        for (o, row) in self.hidden_output.iter().enumerate() {
            for (h, &w) in row.iter().enumerate() {
                check(o, h, w)?;
            }
        }
        Ok(())
    }
}

/// The 4-8-3 pattern classifier.
#[derive(Debug)]
pub struct PatternNetwork {
    weights: PatternWeights,
    teaching_bias: [i32; OUTPUT_NEURONS],
    encoders: [RateEncoder; INPUT_LINES],
    hidden: [Neuron; HIDDEN_NEURONS],
    outputs: [Neuron; OUTPUT_NEURONS],
}

impl Default for PatternNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternNetwork {
    /// Create the network with the built-in weight table.
    pub fn new() -> Self {
        Self::with_weights(PatternWeights::builtin()).expect("builtin table is in range")
    }

    /// Create the network with an externally generated weight table.
    ///
    /// # Errors
    ///
    /// Returns [`SnnError::WeightOutOfRange`] if any synapse weight exceeds
    /// the quantized 4-bit range.
    pub fn with_weights(weights: PatternWeights) -> Result<Self> {
        weights.validate()?;
        let hidden_lif = LifConfig {
            threshold: HIDDEN_THRESHOLD,
            leak: LEAK,
        };
        let output_lif = LifConfig {
            threshold: OUTPUT_THRESHOLD,
            leak: LEAK,
        };
        Ok(Self {
            weights,
            teaching_bias: [0; OUTPUT_NEURONS],
            encoders: std::array::from_fn(|_| RateEncoder::new(ENCODE_PERIOD)),
            hidden: std::array::from_fn(|_| Neuron::new(hidden_lif)),
            outputs: std::array::from_fn(|_| Neuron::new(output_lif)),
        })
    }

    /// Set the per-output teaching currents, injected every step.
    pub fn set_teaching_bias(&mut self, bias: [i32; OUTPUT_NEURONS]) {
        self.teaching_bias = bias;
    }

    /// Advance the whole network one step with the four level inputs.
    /// Returns the output spike flags for this step.
    pub fn step(&mut self, inputs: [bool; INPUT_LINES]) -> [bool; OUTPUT_NEURONS] {
        let mut input_spikes = [false; INPUT_LINES];
        for (i, enc) in self.encoders.iter_mut().enumerate() {
            input_spikes[i] = enc.step(inputs[i]);
        }

        let mut hidden_spikes = [false; HIDDEN_NEURONS];
        for (h, neuron) in self.hidden.iter_mut().enumerate() {
            let current: i32 = self.weights.input_hidden[h]
                .iter()
                .zip(&input_spikes)
                .map(|(&w, &s)| i32::from(s) * i32::from(w))
                .sum();
            hidden_spikes[h] = neuron.step(current);
        }

        let mut output_spikes = [false; OUTPUT_NEURONS];
        for (o, neuron) in self.outputs.iter_mut().enumerate() {
            let current: i32 = self.weights.hidden_output[o]
                .iter()
                .zip(&hidden_spikes)
                .map(|(&w, &s)| i32::from(s) * i32::from(w))
                .sum();
            output_spikes[o] = neuron.step(current + self.teaching_bias[o]);
        }

        // Winner-take-all: each spiking output suppresses the others.
        for o in 0..OUTPUT_NEURONS {
            if output_spikes[o] {
                tracing::trace!(output = o, "pattern output spike");
                for (other, neuron) in self.outputs.iter_mut().enumerate() {
                    if other != o && !output_spikes[other] {
                        neuron.inhibit(LATERAL_INHIBITION);
                    }
                }
            }
        }
        output_spikes
    }

    /// Hold the inputs for `steps` steps and count each output's spikes.
    pub fn run(&mut self, inputs: [bool; INPUT_LINES], steps: u32) -> [u32; OUTPUT_NEURONS] {
        self.reset();
        let mut counts = [0u32; OUTPUT_NEURONS];
        for _ in 0..steps {
            let spikes = self.step(inputs);
            for (count, &spiked) in counts.iter_mut().zip(&spikes) {
                *count += u32::from(spiked);
            }
        }
        counts
    }

    /// Classify a pattern: the output with the most spikes over the
    /// evaluation window wins, lowest index on ties.
    pub fn classify(&mut self, inputs: [bool; INPUT_LINES]) -> usize {
        let counts = self.run(inputs, EVAL_STEPS);
        tracing::debug!(?counts, "pattern spike counts");
        let mut winner = 0;
        for (o, &count) in counts.iter().enumerate().skip(1) {
            if count > counts[winner] {
                winner = o;
            }
        }
        winner
    }

    /// Return every neuron and encoder to rest. Teaching bias is retained.
    pub fn reset(&mut self) {
        for enc in &mut self.encoders {
            enc.reset();
        }
        for n in &mut self.hidden {
            n.reset();
        }
        for n in &mut self.outputs {
            n.reset();
        }
    }
}
