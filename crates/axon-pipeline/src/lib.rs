#![deny(unsafe_code)]

//! Streaming fixed-point CNN inference datapath.
//!
//! A row-major stream of 8-bit pixel samples flows through:
//!
//! ```text
//! pixels → SlidingWindow → {Conv ×4 lanes} → {ReLU ×4} → {MaxPool ×4}
//!        → FeatureAggregator → DenseClassifier → Argmax
//! ```
//!
//! The pipeline is structurally parallel but temporally synchronous: one call
//! to [`CnnPipeline::push_pixel`] is one global step, and every stage advances
//! inside it. Per-step validity maps to `Option` returns; protocol and
//! configuration violations are `Err` and fail-stop — a wrong classification
//! delivered silently is the worst outcome for this datapath, so nothing is
//! ever truncated, wrapped, or guessed.
//!
//! Arithmetic is raw-integer Q4.4 throughout; see `axon-num` for the domain
//! and width conventions.
//!
//! # Example
//!
//! ```
//! use axon_models::{zoo, ArchConfig};
//! use axon_pipeline::CnnPipeline;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let arch = ArchConfig::mnist();
//! let table = zoo::bias_only(arch, [-8; 4], [0, 0, 0, 0, 0, 5, 0, 0, 0, 0])?;
//! let mut pipeline = CnnPipeline::new(&table);
//! let inference = pipeline.infer_image(&vec![0u8; arch.pixel_count()])?;
//! assert_eq!(inference.class, 5);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod activation;
mod aggregate;
mod argmax;
mod conv;
mod dense;
mod error;
mod pipeline;
mod pool;
mod window;

pub use activation::relu;
pub use aggregate::FeatureAggregator;
pub use argmax::argmax;
pub use conv::ConvUnit;
pub use dense::{DenseClassifier, DensePhase};
pub use error::{PipelineError, Result};
pub use pipeline::{CnnPipeline, Inference};
pub use pool::{PoolState, PoolUnit};
pub use window::{Window, WindowGen};

/// Commonly used types.
pub mod prelude {
    pub use crate::{CnnPipeline, Inference, PipelineError, Result};
}
