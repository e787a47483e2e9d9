//! XOR spiking network
//!
//! Fixed 2-2-1 topology. Each hidden neuron detects one exclusive
//! half-term ("A and not B", "B and not A"): its own input line excites it
//! (+20) and the opposite line inhibits it (-20), so simultaneous input
//! spikes cancel and the (1,1) case stays silent. Both hidden neurons
//! excite the single output neuron.
//!
//! Evaluation is layered within one step: encoders first, then the hidden
//! layer, then the output layer, so a hidden spike reaches the output in
//! the same step it is emitted.

use crate::encoder::RateEncoder;
use crate::neuron::{LifConfig, Neuron};

/// Firing threshold shared by every neuron in the network.
pub const THRESHOLD: i32 = 15;

/// Per-step leak shared by every neuron.
pub const LEAK: i32 = 1;

/// Excitatory input-to-hidden weight (own input line).
pub const W_EXCITE: i32 = 20;

/// Inhibitory input-to-hidden weight (opposite input line).
pub const W_INHIBIT: i32 = -20;

/// Hidden-to-output weight.
pub const W_HIDDEN_OUTPUT: i32 = 15;

/// Rate-encoder period for both input lines.
pub const ENCODE_PERIOD: u32 = 4;

/// Steps evaluated per truth-table decision.
pub const EVAL_STEPS: u32 = 64;

/// The 2-2-1 XOR network.
#[derive(Debug)]
pub struct XorNetwork {
    encoders: [RateEncoder; 2],
    hidden: [Neuron; 2],
    output: Neuron,
}

impl Default for XorNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl XorNetwork {
    /// Create the network at rest.
    pub fn new() -> Self {
        let lif = LifConfig {
            threshold: THRESHOLD,
            leak: LEAK,
        };
        Self {
            encoders: [RateEncoder::new(ENCODE_PERIOD), RateEncoder::new(ENCODE_PERIOD)],
            hidden: [Neuron::new(lif), Neuron::new(lif)],
            output: Neuron::new(lif),
        }
    }

    /// Advance the whole network one step with the two level inputs.
    /// Returns `true` on the steps the output neuron fires.
    pub fn step(&mut self, a: bool, b: bool) -> bool {
        let spike_a = self.encoders[0].step(a);
        let spike_b = self.encoders[1].step(b);

        let current = |own: bool, other: bool| {
            i32::from(own) * W_EXCITE + i32::from(other) * W_INHIBIT
        };
        let h0 = self.hidden[0].step(current(spike_a, spike_b));
        let h1 = self.hidden[1].step(current(spike_b, spike_a));

        let out_current = (i32::from(h0) + i32::from(h1)) * W_HIDDEN_OUTPUT;
        let fired = self.output.step(out_current);
        if fired {
            tracing::trace!("xor output spike");
        }
        fired
    }

    /// Hold the inputs for `steps` steps and count output spikes.
    pub fn run(&mut self, a: bool, b: bool, steps: u32) -> u32 {
        self.reset();
        (0..steps).map(|_| u32::from(self.step(a, b))).sum()
    }

    /// Truth-table decision: any output activity within the evaluation
    /// window means "true".
    pub fn eval(&mut self, a: bool, b: bool) -> bool {
        self.run(a, b, EVAL_STEPS) > 0
    }

    /// Return every neuron and encoder to rest.
    pub fn reset(&mut self) {
        for enc in &mut self.encoders {
            enc.reset();
        }
        for n in &mut self.hidden {
            n.reset();
        }
        self.output.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truth_table() {
        let mut net = XorNetwork::new();
        assert!(!net.eval(false, false));
        assert!(net.eval(true, false));
        assert!(net.eval(false, true));
        assert!(!net.eval(true, true));
    }

    #[test]
    fn asymmetric_case_spike_timing() {
        // Input spikes land at t=0,4,8,..; the excited hidden neuron fires
        // one step later (t=1,5,..), and the output needs two hidden spikes
        // to cross threshold, firing first at t=6 and then every 8 steps.
        let mut net = XorNetwork::new();
        let spike_steps: Vec<u32> = (0..24u32).filter(|_| net.step(true, false)).collect();
        assert_eq!(spike_steps, [6, 14, 22]);
    }

    #[test]
    fn symmetric_inputs_cancel() {
        let mut net = XorNetwork::new();
        for _ in 0..EVAL_STEPS {
            assert!(!net.step(true, true));
        }
        assert_eq!(net.hidden[0].potential(), 0);
        assert_eq!(net.hidden[1].potential(), 0);
    }

    #[test]
    fn eval_window_spike_count() {
        let mut net = XorNetwork::new();
        assert_eq!(net.run(true, false, EVAL_STEPS), 8);
        assert_eq!(net.run(false, true, EVAL_STEPS), 8);
        assert_eq!(net.run(true, true, EVAL_STEPS), 0);
    }
}
