//! Spiking-network error types

use thiserror::Error;

/// Errors raised while configuring a spiking network.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnnError {
    /// A synapse weight exceeds the quantized range.
    #[error("weight out of range at [{row}][{col}]: {value} exceeds {max}")]
    WeightOutOfRange {
        /// Destination neuron index.
        row: usize,
        /// Source neuron index.
        col: usize,
        /// Offending weight value.
        value: u8,
        /// Largest representable quantized weight.
        max: u8,
    },

    /// A network parameter is unusable.
    #[error("invalid network config: {reason}")]
    InvalidConfig {
        /// What was wrong.
        reason: String,
    },
}

impl SnnError {
    /// Convenience constructor for [`SnnError::InvalidConfig`].
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SnnError>;
