//! Displacement field storage
//!
//! The field is a pair of equally sized row-major buffers, `current` and
//! `previous`, indexed by `y * cols + x`. The time-stepper writes the next
//! state into `previous` and swaps, so both buffers stay owned and no
//! indirection is needed in the inner loop.

use serde::{Deserialize, Serialize};

/// Largest grid accepted, in cells
pub const MAX_CELLS: usize = 1 << 26;

/// Grid dimensions derived from a pixel surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Number of columns
    pub cols: usize,
    /// Number of rows
    pub rows: usize,
    /// Pixels per cell
    pub cell_size: f32,
}

impl GridGeometry {
    /// Compute grid dimensions for a pixel surface
    ///
    /// # Arguments
    /// * `pixel_width` - Surface width in pixels
    /// * `pixel_height` - Surface height in pixels
    /// * `cell_size` - Pixels per cell, strictly positive
    ///
    /// # Returns
    /// `cols = ceil(width / cell_size)` and `rows = ceil(height / cell_size)`,
    /// or `None` when any input is non-finite, a dimension is negative, the
    /// cell size is not strictly positive, or the grid would exceed
    /// [`MAX_CELLS`].
    #[must_use]
    pub fn from_pixels(pixel_width: f32, pixel_height: f32, cell_size: f32) -> Option<Self> {
        let valid = pixel_width.is_finite()
            && pixel_height.is_finite()
            && cell_size.is_finite()
            && pixel_width >= 0.0
            && pixel_height >= 0.0
            && cell_size > 0.0;
        if !valid {
            return None;
        }

        // Ratios can overflow to infinity for tiny cells; `as` would saturate
        let cols = (pixel_width / cell_size).ceil();
        let rows = (pixel_height / cell_size).ceil();
        if !(cols <= MAX_CELLS as f32 && rows <= MAX_CELLS as f32) {
            return None;
        }
        let (cols, rows) = (cols as usize, rows as usize);
        cols.checked_mul(rows)
            .filter(|&count| count <= MAX_CELLS)
            .map(|_| Self {
                cols,
                rows,
                cell_size,
            })
    }

    /// A zero-sized grid with unit cells
    pub fn empty() -> Self {
        Self {
            cols: 0,
            rows: 0,
            cell_size: 1.0,
        }
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Whether the grid has at least one cell not on the outer ring
    #[inline]
    pub fn has_interior(&self) -> bool {
        self.cols >= 3 && self.rows >= 3
    }
}

/// Double-buffered displacement field
///
/// Both buffers always hold `cols * rows` cells. Hosts get slices only, so
/// the lengths cannot change from outside the crate.
#[derive(Debug, Clone)]
pub struct WaveField {
    pub(crate) cols: usize,
    pub(crate) rows: usize,
    /// Displacement at the end of the last completed step
    pub(crate) current: Vec<f32>,
    /// Displacement one sub-step earlier
    pub(crate) previous: Vec<f32>,
}

impl WaveField {
    /// Create a zero-filled field
    pub fn new(cols: usize, rows: usize) -> Self {
        let size = cols * rows;
        Self {
            cols,
            rows,
            current: vec![0.0; size],
            previous: vec![0.0; size],
        }
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Displacement at the end of the last completed step
    #[inline]
    pub fn current(&self) -> &[f32] {
        &self.current
    }

    /// Displacement one sub-step earlier
    #[inline]
    pub fn previous(&self) -> &[f32] {
        &self.previous
    }

    /// Writable view of `current`, fixed length
    #[inline]
    pub fn current_mut(&mut self) -> &mut [f32] {
        &mut self.current
    }

    /// Writable view of `previous`, fixed length
    #[inline]
    pub fn previous_mut(&mut self) -> &mut [f32] {
        &mut self.previous
    }

    /// Linear index of `(x, y)`; callers check bounds
    #[inline(always)]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.cols + x
    }

    /// Linear index of `(x, y)` when inside the grid
    #[inline]
    pub fn checked_index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.cols && y < self.rows).then(|| self.index(x, y))
    }

    /// Zero both buffers
    pub fn clear(&mut self) {
        self.current.fill(0.0);
        self.previous.fill(0.0);
    }

    /// Number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Whether the field has no cells
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Promote the buffer holding the freshly computed state
    ///
    /// After a sweep has written the next state into `previous`, this makes it
    /// `current` and leaves the pre-update state in `previous`.
    #[inline]
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.previous);
    }

    /// Sum of squared displacements
    pub fn total_energy(&self) -> f32 {
        self.current.iter().map(|v| v * v).sum()
    }

    /// Largest absolute displacement
    pub fn max_amplitude(&self) -> f32 {
        self.current.iter().map(|v| v.abs()).fold(0.0, f32::max)
    }
}
