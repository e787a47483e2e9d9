//! Leaky integrate-and-fire neuron
//!
//! The membrane potential is a register: the threshold check uses the value
//! latched at the end of the previous step, so a large input current fires
//! the neuron on the step *after* it arrives, never the same step. Per step:
//!
//! 1. if `V >= threshold`, emit a spike and reset `V` to 0
//! 2. `V = max(0, V + current - leak)`
//!
//! The potential is clamped at 0 on underflow; there is no refractory
//! period.

/// Static parameters of one neuron.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifConfig {
    /// Firing threshold; a spike is emitted once the potential reaches it.
    pub threshold: i32,
    /// Per-step decay subtracted from the potential.
    pub leak: i32,
}

/// One leaky integrate-and-fire neuron.
#[derive(Debug, Clone)]
pub struct Neuron {
    config: LifConfig,
    potential: i32,
}

impl Neuron {
    /// Create a neuron at resting potential.
    pub fn new(config: LifConfig) -> Self {
        Self {
            config,
            potential: 0,
        }
    }

    /// Advance one step with the summed synaptic current (weights may be
    /// negative). Returns `true` on the steps the neuron fires.
    pub fn step(&mut self, current: i32) -> bool {
        let spiked = self.potential >= self.config.threshold;
        if spiked {
            self.potential = 0;
        }
        self.potential = (self.potential + current - self.config.leak).max(0);
        spiked
    }

    /// Lateral inhibition applied between steps: pull the potential down by
    /// `strength`, clamped at 0.
    pub fn inhibit(&mut self, strength: i32) {
        self.potential = (self.potential - strength).max(0);
    }

    /// Current membrane potential.
    pub fn potential(&self) -> i32 {
        self.potential
    }

    /// Return to resting potential.
    pub fn reset(&mut self) {
        self.potential = 0;
    }
}
