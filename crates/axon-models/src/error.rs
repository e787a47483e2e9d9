//! Error types for weight-table operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for weight-table operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while building or loading a weight table.
///
/// Every variant is a configuration error in the sense of the error taxonomy:
/// fatal, detected before any inference runs, never silently tolerated.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Weight blob has the wrong total length for the configured architecture
    #[error("weight count mismatch: expected {expected}, got {got}")]
    WeightCountMismatch {
        /// Number of Q4.4 values the architecture requires
        expected: usize,
        /// Number of values actually provided
        got: usize,
    },

    /// Image geometry the pipeline cannot process
    #[error("invalid architecture: {reason}")]
    InvalidArch {
        /// Reason for rejection
        reason: String,
    },

    /// One table section has the wrong length
    #[error("bad {section} length: expected {expected}, got {got}")]
    SectionMismatch {
        /// Which table section was malformed
        section: &'static str,
        /// Expected value count
        expected: usize,
        /// Provided value count
        got: usize,
    },

    /// Weight file not found or unreadable
    #[error("weight file not found: {}", path.display())]
    FileNotFound {
        /// Path that was attempted
        path: PathBuf,
    },

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error
        #[from]
        source: std::io::Error,
    },
}

impl ModelError {
    /// Create an invalid-architecture error
    pub fn invalid_arch(reason: impl Into<String>) -> Self {
        Self::InvalidArch {
            reason: reason.into(),
        }
    }
}
