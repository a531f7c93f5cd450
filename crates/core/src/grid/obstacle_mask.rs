//! Obstacle mask rasterised from wall geometry
//!
//! The mask is derived state: one byte per cell, `1` where a wall blocks the
//! cell and `0` where it is open. It is rebuilt lazily from the wall list
//! whenever a wall is added or removed, and is never read while stale.

use crate::core_types::{Vec2, Wall};
use tracing::debug;

/// Distance (grid units) within which a cell centre counts as on a wall
pub const WALL_TOLERANCE: f32 = 0.7;

/// Blocked-cell flag
pub const BLOCKED: u8 = 1;

/// Open-cell flag
pub const OPEN: u8 = 0;

/// Per-cell blocked flags plus a dirty marker
#[derive(Debug, Clone)]
pub struct ObstacleMask {
    cells: Vec<u8>,
    cols: usize,
    rows: usize,
    dirty: bool,
}

impl ObstacleMask {
    /// Create an all-open mask that will be rebuilt on first refresh
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cells: vec![OPEN; cols * rows],
            cols,
            rows,
            dirty: true,
        }
    }

    /// Flag the mask for rebuild
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether a rebuild is pending
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rebuild from `walls` if dirty
    ///
    /// Returns `true` if a rebuild happened.
    pub fn refresh(&mut self, walls: &[Wall]) -> bool {
        if !self.dirty {
            return false;
        }
        rasterize_walls(walls, self.cols, self.rows, &mut self.cells);
        self.dirty = false;
        debug!(
            "Obstacle mask rebuilt: {} walls, {} blocked cells",
            walls.len(),
            self.blocked_count()
        );
        true
    }

    /// Raw mask bytes (row-major)
    ///
    /// Callers that need a consistent view go through
    /// `WaveSimulation::obstacle_mask`, which refreshes first.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    /// Whether the cell at `idx` is blocked
    #[inline(always)]
    pub fn is_blocked(&self, idx: usize) -> bool {
        self.cells[idx] == BLOCKED
    }

    /// Number of blocked cells
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == BLOCKED).count()
    }

    /// Reset to all-open and mark dirty
    pub fn clear(&mut self) {
        self.cells.fill(OPEN);
        self.dirty = true;
    }
}

/// Rasterise walls into `out` (`cols * rows` bytes)
///
/// A cell is blocked when its centre lies within [`WALL_TOLERANCE`] of some
/// wall and its projection onto that wall does not fall inside a slit.
/// Degenerate walls contribute nothing.
pub fn rasterize_walls(walls: &[Wall], cols: usize, rows: usize, out: &mut [u8]) {
    out.fill(OPEN);

    for wall in walls.iter().filter(|w| !w.is_degenerate()) {
        // Only scan the wall's bounding box, padded by the tolerance
        let min_x = wall.start.x.min(wall.end.x) - WALL_TOLERANCE;
        let max_x = wall.start.x.max(wall.end.x) + WALL_TOLERANCE;
        let min_y = wall.start.y.min(wall.end.y) - WALL_TOLERANCE;
        let max_y = wall.start.y.max(wall.end.y) + WALL_TOLERANCE;
        let Some((x0, x1)) = cell_span(min_x, max_x, cols) else {
            continue;
        };
        let Some((y0, y1)) = cell_span(min_y, max_y, rows) else {
            continue;
        };

        for y in y0..=y1 {
            for x in x0..=x1 {
                let idx = y * cols + x;
                if out[idx] == BLOCKED {
                    continue;
                }
                let Some((t, dist)) = wall.project(Vec2::new(x as f32, y as f32)) else {
                    continue;
                };
                if dist <= WALL_TOLERANCE && !wall.is_open_at(t) {
                    out[idx] = BLOCKED;
                }
            }
        }
    }
}

/// Inclusive cell range covering `[lo, hi]`, clipped to `0..len`
fn cell_span(lo: f32, hi: f32, len: usize) -> Option<(usize, usize)> {
    if len == 0 || hi < 0.0 || lo > (len - 1) as f32 {
        return None;
    }
    let start = lo.max(0.0).ceil() as usize;
    let end = (hi.floor() as usize).min(len - 1);
    (start <= end).then_some((start, end))
}
