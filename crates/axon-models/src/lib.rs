#![deny(unsafe_code)]

//! Weight-table model for the axon streaming CNN core.
//!
//! The core consumes an immutable weight table produced by an offline
//! quantization tool. The table is a flat list of signed 8-bit Q4.4 values
//! (scale 16, range [-8.0, 7.9375]) in this order:
//!
//! 1. Convolution weights — 4 filters × 9 taps, filter-major then row-major
//! 2. Convolution biases — 4 values
//! 3. Dense weights — 10 classes × N features, class-major
//! 4. Dense biases — 10 values
//!
//! N is derived from the image geometry: `4 · ((H−2)/2) · ((W−2)/2)`, which
//! is 676 for the reference 28×28 configuration.
//!
//! Any count mismatch is a fatal configuration error at load time — the
//! loader never truncates or pads.
//!
//! # Example
//!
//! ```
//! use axon_models::{ArchConfig, WeightTable};
//!
//! # fn main() -> axon_models::Result<()> {
//! let arch = ArchConfig::new(28, 28)?;
//! let blob = vec![0u8; WeightTable::expected_len(&arch)];
//! let table = WeightTable::from_bytes(arch, blob)?;
//! assert_eq!(table.arch().feature_len(), 676);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod arch;
mod error;
mod table;
pub mod zoo;

pub use arch::{ArchConfig, CLASSES, FILTERS, KERNEL, KERNEL_TAPS, POOL};
pub use error::{ModelError, Result};
pub use table::WeightTable;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::{ArchConfig, ModelError, Result, WeightTable};
}
