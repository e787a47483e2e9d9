//! Periodic rate encoder
//!
//! Converts a level input (a switch or binary pixel) into a spike train:
//! while the input is asserted the encoder spikes on the first step and then
//! once every `period` steps; while deasserted it is silent and its phase
//! resets, so reasserting always spikes immediately.

/// One input line's rate encoder.
#[derive(Debug, Clone)]
pub struct RateEncoder {
    period: u32,
    phase: u32,
}

impl RateEncoder {
    /// Create an encoder spiking once per `period` steps while asserted.
    /// A period of 0 is treated as 1 (a spike every step).
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            phase: 0,
        }
    }

    /// Advance one step; returns `true` on spike steps.
    pub fn step(&mut self, active: bool) -> bool {
        if !active {
            self.phase = 0;
            return false;
        }
        let spike = self.phase == 0;
        self.phase = (self.phase + 1) % self.period;
        spike
    }

    /// Reset the phase so the next asserted step spikes.
    pub fn reset(&mut self) {
        self.phase = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spikes_on_first_step_then_every_period() {
        let mut enc = RateEncoder::new(3);
        let train: Vec<bool> = (0..9).map(|_| enc.step(true)).collect();
        assert_eq!(
            train,
            [true, false, false, true, false, false, true, false, false]
        );
    }

    #[test]
    fn silent_while_deasserted() {
        let mut enc = RateEncoder::new(4);
        for _ in 0..10 {
            assert!(!enc.step(false));
        }
    }

    #[test]
    fn deassert_resets_phase() {
        let mut enc = RateEncoder::new(4);
        assert!(enc.step(true));
        assert!(!enc.step(true));
        enc.step(false);
        // Reasserting spikes immediately, not mid-period.
        assert!(enc.step(true));
    }

    #[test]
    fn period_one_spikes_every_step() {
        let mut enc = RateEncoder::new(1);
        for _ in 0..5 {
            assert!(enc.step(true));
        }
    }

    #[test]
    fn zero_period_clamped() {
        let mut enc = RateEncoder::new(0);
        assert!(enc.step(true));
        assert!(enc.step(true));
    }
}
