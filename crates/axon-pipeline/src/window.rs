//! Sliding-window generator
//!
//! Converts a row-major stream of single-channel pixel samples into 3×3
//! neighborhoods. No padding: a window is emitted only once the stream has
//! reached row ≥ 2 and column ≥ 2, so an H×W image yields exactly
//! (H−2)×(W−2) windows, the first one on the (2·W+2)-th sample.

use axon_models::{ArchConfig, KERNEL, KERNEL_TAPS};

use crate::error::{PipelineError, Result};

/// A 3×3 neighborhood in row-major order. Values are pixel samples widened
/// to `i16` (0..=255).
pub type Window = [i16; KERNEL_TAPS];

/// Streaming 3×3 window generator.
///
/// Internal state is a ring of three row buffers: the two fully buffered
/// prior rows plus the row currently arriving. The ring index is the row
/// number modulo 3, so a row buffer is only overwritten once its contents
/// can no longer appear in any window.
#[derive(Debug)]
pub struct WindowGen {
    height: usize,
    width: usize,
    rows: [Vec<i16>; KERNEL],
    pos: usize,
    emitted: usize,
}

impl WindowGen {
    /// Create a generator for one image geometry.
    pub fn new(arch: &ArchConfig) -> Self {
        let width = arch.width();
        Self {
            height: arch.height(),
            width,
            rows: [vec![0; width], vec![0; width], vec![0; width]],
            pos: 0,
            emitted: 0,
        }
    }

    /// Consume one pixel sample; returns the window it completes, if any.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::StreamOverrun`] if the image's H×W samples
    /// have already been consumed — feeding a longer stream without a reset
    /// is a precondition violation, rejected rather than tolerated.
    pub fn push(&mut self, pixel: u8) -> Result<Option<Window>> {
        let capacity = self.height * self.width;
        if self.pos >= capacity {
            return Err(PipelineError::StreamOverrun { capacity });
        }
        let row = self.pos / self.width;
        let col = self.pos % self.width;
        self.rows[row % KERNEL][col] = i16::from(pixel);
        self.pos += 1;

        if row < KERNEL - 1 || col < KERNEL - 1 {
            return Ok(None);
        }

        let mut window = [0i16; KERNEL_TAPS];
        for k in 0..KERNEL {
            let src = &self.rows[(row - (KERNEL - 1) + k) % KERNEL];
            window[k * KERNEL..(k + 1) * KERNEL]
                .copy_from_slice(&src[col - (KERNEL - 1)..=col]);
        }
        self.emitted += 1;
        Ok(Some(window))
    }

    /// Windows emitted since the last reset.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Whether all H×W samples of the current image have been consumed.
    pub fn is_complete(&self) -> bool {
        self.pos == self.height * self.width
    }

    /// Valid windows one full image produces: (H−2)·(W−2).
    pub fn expected_windows(&self) -> usize {
        (self.height - KERNEL + 1) * (self.width - KERNEL + 1)
    }

    /// Hard reset for a new image.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.emitted = 0;
    }
}
