//! Explicit finite-difference wave update
//!
//! Implements the leapfrog discretisation of `∂²u/∂t² = c²∇²u`:
//! ```text
//! u[n+1] = (2·u[n] - u[n-1] + c²·Δt²·∇²u[n]) · damping
//! ```
//! with the 4-neighbour Laplacian on unit spacing. The next state is written
//! into the `previous` buffer and the caller swaps.

use crate::grid::{ObstacleMask, WaveField, BLOCKED};
use rayon::prelude::*;

/// Absolute bound applied to every updated cell
pub const FIELD_CLAMP: f32 = 50.0;

/// Grids with at least this many cells sweep rows in parallel
const PARALLEL_THRESHOLD_CELLS: usize = 256 * 256;

/// Run one sub-step over all interior cells
///
/// Blocked cells are written as zero. Values are clamped to
/// `[-FIELD_CLAMP, FIELD_CLAMP]`. Edge cells of the output are left for the
/// boundary pass.
///
/// Returns `false` if any unclamped update was non-finite.
pub fn step_wave_cpu(
    field: &mut WaveField,
    mask: &ObstacleMask,
    coefficient: f32,
    damping: f32,
) -> bool {
    let cols = field.cols;
    let rows = field.rows;
    if cols < 3 || rows < 3 {
        return true;
    }

    let current = &field.current;
    let mask = mask.as_slice();
    let interior = &mut field.previous[cols..(rows - 1) * cols];

    if cols * rows >= PARALLEL_THRESHOLD_CELLS {
        interior
            .par_chunks_mut(cols)
            .enumerate()
            .map(|(offset, row)| {
                update_row(offset + 1, row, current, mask, cols, coefficient, damping)
            })
            .reduce(|| true, |a, b| a && b)
    } else {
        interior
            .chunks_mut(cols)
            .enumerate()
            .fold(true, |finite, (offset, row)| {
                update_row(offset + 1, row, current, mask, cols, coefficient, damping) && finite
            })
    }
}

#[inline]
fn update_row(
    y: usize,
    out: &mut [f32],
    current: &[f32],
    mask: &[u8],
    cols: usize,
    coefficient: f32,
    damping: f32,
) -> bool {
    let row_start = y * cols;
    let mut finite = true;

    for x in 1..cols - 1 {
        let idx = row_start + x;
        if mask[idx] == BLOCKED {
            out[x] = 0.0;
            continue;
        }

        let u = current[idx];
        let laplacian = current[idx - 1] + current[idx + 1] + current[idx - cols]
            + current[idx + cols]
            - 4.0 * u;
        let next = (2.0 * u - out[x] + coefficient * laplacian) * damping;

        finite &= next.is_finite();
        out[x] = next.clamp(-FIELD_CLAMP, FIELD_CLAMP);
    }

    finite
}

/// Force blocked cells to zero in both buffers
pub fn zero_blocked(field: &mut WaveField, mask: &ObstacleMask) {
    let mask = mask.as_slice();
    for (idx, &cell) in mask.iter().enumerate() {
        if cell == BLOCKED {
            field.current[idx] = 0.0;
            field.previous[idx] = 0.0;
        }
    }
}
