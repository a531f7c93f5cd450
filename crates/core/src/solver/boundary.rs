//! Edge treatment after each sweep
//!
//! Reflective edges mirror the adjacent interior row/column outward
//! (Neumann-like). Absorbing edges are held at zero (Dirichlet). Blocked
//! edge cells are zero in both modes.

use crate::grid::BLOCKED;
use serde::{Deserialize, Serialize};

/// Boundary condition applied on the outer ring of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryMode {
    /// Copy the neighbouring interior value outward
    Reflective,
    /// Hold edge cells at zero
    #[default]
    Absorbing,
}

impl BoundaryMode {
    /// Mode selected by the `reflective_boundaries` flag
    pub fn from_reflective(reflective: bool) -> Self {
        if reflective {
            Self::Reflective
        } else {
            Self::Absorbing
        }
    }
}

/// Apply `mode` to the edges of `current`
///
/// Grids without an interior have every cell on the edge and are zeroed.
pub fn apply_boundary(
    current: &mut [f32],
    mask: &[u8],
    cols: usize,
    rows: usize,
    mode: BoundaryMode,
) {
    if cols < 3 || rows < 3 {
        current.fill(0.0);
        return;
    }

    let last_row = (rows - 1) * cols;
    match mode {
        BoundaryMode::Reflective => {
            for x in 0..cols {
                current[x] = current[cols + x];
                current[last_row + x] = current[last_row - cols + x];
            }
            for y in 0..rows {
                let row = y * cols;
                current[row] = current[row + 1];
                current[row + cols - 1] = current[row + cols - 2];
            }
        }
        BoundaryMode::Absorbing => {
            current[..cols].fill(0.0);
            current[last_row..].fill(0.0);
            for y in 1..rows - 1 {
                let row = y * cols;
                current[row] = 0.0;
                current[row + cols - 1] = 0.0;
            }
        }
    }

    if mode == BoundaryMode::Reflective {
        for idx in edge_indices(cols, rows) {
            if mask[idx] == BLOCKED {
                current[idx] = 0.0;
            }
        }
    }
}

/// Indices of the outer ring, each visited once
fn edge_indices(cols: usize, rows: usize) -> impl Iterator<Item = usize> {
    let last_row = (rows - 1) * cols;
    (0..cols)
        .chain(last_row..last_row + cols)
        .chain((1..rows - 1).flat_map(move |y| [y * cols, y * cols + cols - 1]))
}
