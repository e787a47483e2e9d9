//! Error types for the streaming pipeline
//!
//! Everything here is a protocol or sequencing violation per the error
//! taxonomy: detectable, fail-stop, never silently tolerated. Configuration
//! errors (weight shape, geometry) are rejected earlier, by `axon-models`.

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while driving the pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// More pixels pushed than the image holds, without an intervening reset
    #[error("pixel stream overrun: image already consumed all {capacity} samples")]
    StreamOverrun {
        /// Samples per image for the configured geometry
        capacity: usize,
    },

    /// Whole image handed over with the wrong sample count
    #[error("image size mismatch: expected {expected} samples, got {got}")]
    ImageSizeMismatch {
        /// Samples per image for the configured geometry
        expected: usize,
        /// Samples actually provided
        got: usize,
    },

    /// A filter lane produced more pooled values than its map holds
    #[error("pooled map overflow on filter lane {lane}")]
    LaneOverflow {
        /// Offending filter lane
        lane: usize,
    },

    /// Filter lanes disagree on how far they have progressed
    #[error("filter lane {lane} desynchronized: {got} pooled values, lane 0 has {expected}")]
    LaneDesync {
        /// Offending filter lane
        lane: usize,
        /// Pooled values produced by lane 0
        expected: usize,
        /// Pooled values produced by the offending lane
        got: usize,
    },

    /// Feature vector handed to the dense layer with the wrong length
    #[error("feature length mismatch: expected {expected}, got {got}")]
    FeatureLengthMismatch {
        /// Configured feature-vector length N
        expected: usize,
        /// Length actually provided
        got: usize,
    },

    /// Dense classifier driven without a start signal
    #[error("dense classifier run before start")]
    NotStarted,

    /// A stage failed to reach completion for a well-formed input stream
    #[error("liveness failure: {stage} did not complete")]
    Stalled {
        /// Stage that failed to complete
        stage: &'static str,
    },
}
