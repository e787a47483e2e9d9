//! Architecture configuration
//!
//! Every dimension of the CNN except the image size is an architecture
//! constant: one 3×3 convolution with 4 filters, 2×2 stride-2 max pooling,
//! and a 10-class dense layer. [`ArchConfig`] validates the image geometry
//! and derives the map, pooled, and feature-vector dimensions from it.

use crate::error::{ModelError, Result};

/// Convolution kernel side length.
pub const KERNEL: usize = 3;

/// Taps per convolution filter (`KERNEL`²).
pub const KERNEL_TAPS: usize = KERNEL * KERNEL;

/// Number of convolution filters (parallel lanes).
pub const FILTERS: usize = 4;

/// Pooling block side length (2×2, stride 2).
pub const POOL: usize = 2;

/// Number of output classes.
pub const CLASSES: usize = 10;

/// Validated image geometry plus the dimensions derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchConfig {
    height: usize,
    width: usize,
}

impl ArchConfig {
    /// Validate an image geometry.
    ///
    /// The post-convolution map is (H−2)×(W−2); both of those must be even
    /// and non-zero so the 2×2 pooling covers the map exactly, which means
    /// H and W must be even and at least 4.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArch`] for geometries the pipeline
    /// cannot process.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        if height < KERNEL + 1 || width < KERNEL + 1 {
            return Err(ModelError::invalid_arch(format!(
                "image {height}x{width} too small: need at least {0}x{0}",
                KERNEL + 1
            )));
        }
        if (height - KERNEL + 1) % POOL != 0 || (width - KERNEL + 1) % POOL != 0 {
            return Err(ModelError::invalid_arch(format!(
                "post-conv map {}x{} is not divisible by the {POOL}x{POOL} pooling grid",
                height - KERNEL + 1,
                width - KERNEL + 1
            )));
        }
        Ok(Self { height, width })
    }

    /// The reference configuration: 28×28 digit images.
    pub fn mnist() -> Self {
        Self {
            height: 28,
            width: 28,
        }
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total pixel samples per image.
    pub fn pixel_count(&self) -> usize {
        self.height * self.width
    }

    /// Post-convolution map height (H−2).
    pub fn map_height(&self) -> usize {
        self.height - KERNEL + 1
    }

    /// Post-convolution map width (W−2).
    pub fn map_width(&self) -> usize {
        self.width - KERNEL + 1
    }

    /// Valid sliding windows per image: `map_height · map_width`.
    pub fn window_count(&self) -> usize {
        self.map_height() * self.map_width()
    }

    /// Pooled map height ((H−2)/2).
    pub fn pooled_height(&self) -> usize {
        self.map_height() / POOL
    }

    /// Pooled map width ((W−2)/2).
    pub fn pooled_width(&self) -> usize {
        self.map_width() / POOL
    }

    /// Pooled values per filter lane.
    pub fn pooled_len(&self) -> usize {
        self.pooled_height() * self.pooled_width()
    }

    /// Feature-vector length N: `FILTERS · pooled_len`.
    pub fn feature_len(&self) -> usize {
        FILTERS * self.pooled_len()
    }
}

impl Default for ArchConfig {
    fn default() -> Self {
        Self::mnist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mnist_dimensions() {
        let arch = ArchConfig::mnist();
        assert_eq!(arch.pixel_count(), 784);
        assert_eq!(arch.map_height(), 26);
        assert_eq!(arch.map_width(), 26);
        assert_eq!(arch.window_count(), 676);
        assert_eq!(arch.pooled_len(), 169);
        assert_eq!(arch.feature_len(), 676);
    }

    #[test]
    fn small_even_geometry_accepted() {
        let arch = ArchConfig::new(8, 8).unwrap();
        assert_eq!(arch.map_width(), 6);
        assert_eq!(arch.pooled_len(), 9);
        assert_eq!(arch.feature_len(), 36);
    }

    #[test]
    fn odd_map_rejected() {
        // 7x7 image -> 5x5 map, not poolable
        assert!(ArchConfig::new(7, 7).is_err());
    }

    #[test]
    fn too_small_rejected() {
        assert!(ArchConfig::new(3, 28).is_err());
        assert!(ArchConfig::new(28, 2).is_err());
    }
}
