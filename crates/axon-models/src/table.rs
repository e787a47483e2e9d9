//! Weight-table parsing and packing
//!
//! The table is loaded once at start-up and is read-only for the life of an
//! inference run. Layout (all values signed 8-bit Q4.4):
//!
//! ```text
//! [ conv weights: FILTERS × 9, filter-major ]
//! [ conv biases:  FILTERS                   ]
//! [ dense weights: CLASSES × N, class-major ]
//! [ dense biases: CLASSES                   ]
//! ```

use std::path::Path;

use bytes::Bytes;

use crate::arch::{ArchConfig, CLASSES, FILTERS, KERNEL_TAPS};
use crate::error::{ModelError, Result};
use axon_num::Q44;

/// An immutable, validated weight table.
///
/// Holds every learned parameter of the network as raw Q4.4 integers. Cheap
/// to share by reference; nothing mutates it during inference.
#[derive(Debug, Clone)]
pub struct WeightTable {
    arch: ArchConfig,
    conv_weights: [[i8; KERNEL_TAPS]; FILTERS],
    conv_biases: [i8; FILTERS],
    /// Class-major: row `c` occupies `c*N .. (c+1)*N`.
    dense_weights: Vec<i8>,
    dense_biases: [i8; CLASSES],
}

impl WeightTable {
    /// Total Q4.4 value count a blob must contain for `arch`.
    pub fn expected_len(arch: &ArchConfig) -> usize {
        FILTERS * KERNEL_TAPS + FILTERS + CLASSES * arch.feature_len() + CLASSES
    }

    /// Parse a flat weight blob.
    ///
    /// Each byte is reinterpreted as a signed Q4.4 value. The blob length is
    /// validated against the architecture before anything is read.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::WeightCountMismatch`] if the blob length does
    /// not exactly match [`Self::expected_len`].
    pub fn from_bytes(arch: ArchConfig, blob: impl Into<Bytes>) -> Result<Self> {
        let blob: Bytes = blob.into();
        let expected = Self::expected_len(&arch);
        if blob.len() != expected {
            return Err(ModelError::WeightCountMismatch {
                expected,
                got: blob.len(),
            });
        }

        #[allow(clippy::cast_possible_wrap)]
        let values: Vec<i8> = blob.iter().map(|&b| b as i8).collect();
        let table = Self::from_values(arch, &values)?;
        tracing::debug!(
            "loaded weight table: {} values for {}x{} (N={})",
            expected,
            arch.height(),
            arch.width(),
            arch.feature_len()
        );
        Ok(table)
    }

    /// Parse a flat list of raw Q4.4 values in blob order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::WeightCountMismatch`] on a length mismatch.
    pub fn from_values(arch: ArchConfig, values: &[i8]) -> Result<Self> {
        let expected = Self::expected_len(&arch);
        if values.len() != expected {
            return Err(ModelError::WeightCountMismatch {
                expected,
                got: values.len(),
            });
        }
        let n = arch.feature_len();

        let mut conv_weights = [[0i8; KERNEL_TAPS]; FILTERS];
        let mut offset = 0;
        for filter in &mut conv_weights {
            filter.copy_from_slice(&values[offset..offset + KERNEL_TAPS]);
            offset += KERNEL_TAPS;
        }

        let mut conv_biases = [0i8; FILTERS];
        conv_biases.copy_from_slice(&values[offset..offset + FILTERS]);
        offset += FILTERS;

        let dense_weights = values[offset..offset + CLASSES * n].to_vec();
        offset += CLASSES * n;

        let mut dense_biases = [0i8; CLASSES];
        dense_biases.copy_from_slice(&values[offset..offset + CLASSES]);

        Ok(Self {
            arch,
            conv_weights,
            conv_biases,
            dense_weights,
            dense_biases,
        })
    }

    /// Assemble a table from its four sections.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::SectionMismatch`] if the dense weight section
    /// does not hold exactly `CLASSES × N` values.
    pub fn from_parts(
        arch: ArchConfig,
        conv_weights: [[i8; KERNEL_TAPS]; FILTERS],
        conv_biases: [i8; FILTERS],
        dense_weights: Vec<i8>,
        dense_biases: [i8; CLASSES],
    ) -> Result<Self> {
        let expected = CLASSES * arch.feature_len();
        if dense_weights.len() != expected {
            return Err(ModelError::SectionMismatch {
                section: "dense weights",
                expected,
                got: dense_weights.len(),
            });
        }
        Ok(Self {
            arch,
            conv_weights,
            conv_biases,
            dense_weights,
            dense_biases,
        })
    }

    /// Quantize a table from floating-point parameters, exactly as the
    /// offline tool does: scale by 16, round to nearest, saturate to i8.
    ///
    /// Slice lengths: `conv_weights` FILTERS×9, `conv_biases` FILTERS,
    /// `dense_weights` CLASSES×N class-major, `dense_biases` CLASSES.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::SectionMismatch`] naming the first section with
    /// the wrong length.
    pub fn quantize_from_f32(
        arch: ArchConfig,
        conv_weights: &[f32],
        conv_biases: &[f32],
        dense_weights: &[f32],
        dense_biases: &[f32],
    ) -> Result<Self> {
        let n = arch.feature_len();
        check_section("conv weights", FILTERS * KERNEL_TAPS, conv_weights.len())?;
        check_section("conv biases", FILTERS, conv_biases.len())?;
        check_section("dense weights", CLASSES * n, dense_weights.len())?;
        check_section("dense biases", CLASSES, dense_biases.len())?;

        let quant = |v: &f32| Q44::from_f32(*v).raw();
        let mut conv_w = [[0i8; KERNEL_TAPS]; FILTERS];
        for (f, filter) in conv_w.iter_mut().enumerate() {
            for (i, tap) in filter.iter_mut().enumerate() {
                *tap = quant(&conv_weights[f * KERNEL_TAPS + i]);
            }
        }
        let mut conv_b = [0i8; FILTERS];
        for (f, b) in conv_b.iter_mut().enumerate() {
            *b = quant(&conv_biases[f]);
        }
        let dense_w: Vec<i8> = dense_weights.iter().map(quant).collect();
        let mut dense_b = [0i8; CLASSES];
        for (c, b) in dense_b.iter_mut().enumerate() {
            *b = quant(&dense_biases[c]);
        }

        Self::from_parts(arch, conv_w, conv_b, dense_w, dense_b)
    }

    /// Load a table from a flat binary file.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::FileNotFound`] for a missing file, and the
    /// parse errors of [`Self::from_bytes`] otherwise.
    pub fn from_file(arch: ArchConfig, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ModelError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let blob = std::fs::read(path)?;
        Self::from_bytes(arch, blob)
    }

    /// Serialize back to the flat blob format.
    pub fn to_bytes(&self) -> Bytes {
        let mut out = Vec::with_capacity(Self::expected_len(&self.arch));
        #[allow(clippy::cast_sign_loss)]
        {
            for filter in &self.conv_weights {
                out.extend(filter.iter().map(|&w| w as u8));
            }
            out.extend(self.conv_biases.iter().map(|&b| b as u8));
            out.extend(self.dense_weights.iter().map(|&w| w as u8));
            out.extend(self.dense_biases.iter().map(|&b| b as u8));
        }
        Bytes::from(out)
    }

    /// The architecture this table was validated against.
    pub fn arch(&self) -> &ArchConfig {
        &self.arch
    }

    /// The 9 taps of one filter, row-major.
    pub fn conv_filter(&self, filter: usize) -> &[i8; KERNEL_TAPS] {
        &self.conv_weights[filter]
    }

    /// One filter's bias.
    pub fn conv_bias(&self, filter: usize) -> i8 {
        self.conv_biases[filter]
    }

    /// One class's dense weight row (length N, feature-index order).
    pub fn dense_row(&self, class: usize) -> &[i8] {
        let n = self.arch.feature_len();
        &self.dense_weights[class * n..(class + 1) * n]
    }

    /// One class's dense bias.
    pub fn dense_bias(&self, class: usize) -> i8 {
        self.dense_biases[class]
    }
}

fn check_section(section: &'static str, expected: usize, got: usize) -> Result<()> {
    if expected == got {
        Ok(())
    } else {
        Err(ModelError::SectionMismatch {
            section,
            expected,
            got,
        })
    }
}
