#![deny(unsafe_code)]

//! Spiking-network secondary cores.
//!
//! Two small fixed-topology networks built from leaky integrate-and-fire
//! neurons, driven by the same global-step discipline as the CNN datapath:
//! one call advances every encoder and neuron together, layered
//! input → hidden → output within the step.
//!
//! - [`XorNetwork`]: 2-2-1 network computing XOR over two switch inputs.
//! - [`PatternNetwork`]: 4-8-3 winner-take-all classifier for 2x2 binary
//!   pixel patterns, with quantized 4-bit synapse weights and an optional
//!   per-output teaching current.
//!
//! # Example
//!
//! ```
//! use axon_snn::XorNetwork;
//!
//! let mut net = XorNetwork::new();
//! assert!(net.eval(true, false));
//! assert!(!net.eval(true, true));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod encoder;
mod error;
pub mod neuron;
pub mod pattern;
pub mod xor;

pub use encoder::RateEncoder;
pub use error::{Result, SnnError};
pub use neuron::{LifConfig, Neuron};
pub use pattern::{PatternNetwork, PatternWeights};
pub use xor::XorNetwork;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::{LifConfig, Neuron, PatternNetwork, RateEncoder, Result, SnnError, XorNetwork};
}
