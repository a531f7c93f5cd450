//! Read-only sampling of the field for renderers and probes
//!
//! All coordinates are in pixels and are mapped to cells by floor division by
//! the cell size. Anything outside the grid reads as zero.

use super::WaveSimulation;

impl WaveSimulation {
    /// Cell containing a pixel position, if inside the grid
    pub fn cell_at(&self, pixel_x: f32, pixel_y: f32) -> Option<usize> {
        let cell_size = self.cell_size();
        let gx = (pixel_x / cell_size).floor();
        let gy = (pixel_y / cell_size).floor();
        if !(gx >= 0.0 && gy >= 0.0) {
            return None;
        }
        self.field().checked_index(gx as usize, gy as usize)
    }

    /// Displacement at a pixel position, `0.0` outside the grid
    pub fn value_at(&self, pixel_x: f32, pixel_y: f32) -> f32 {
        self.cell_at(pixel_x, pixel_y)
            .map_or(0.0, |idx| self.field().current()[idx])
    }

    /// Held peak energy at a pixel position, `0.0` outside the grid
    ///
    /// Stays zero until the energy trail has been enabled for at least one step.
    pub fn energy_at(&self, pixel_x: f32, pixel_y: f32) -> f32 {
        self.cell_at(pixel_x, pixel_y)
            .map_or(0.0, |idx| self.energy_map()[idx])
    }

    /// Sample `num_samples` evenly spaced points from `(x1, y1)` to `(x2, y2)` inclusive
    ///
    /// A single sample reads the start point.
    pub fn sample_line(&self, x1: f32, y1: f32, x2: f32, y2: f32, num_samples: usize) -> Vec<f32> {
        let mut out = Vec::with_capacity(num_samples);
        self.sample_line_into(x1, y1, x2, y2, num_samples, &mut out);
        out
    }

    /// Like [`Self::sample_line`], reusing `out` as the result buffer
    pub fn sample_line_into(
        &self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        num_samples: usize,
        out: &mut Vec<f32>,
    ) {
        out.clear();
        let span = num_samples.saturating_sub(1).max(1) as f32;
        out.extend((0..num_samples).map(|i| {
            let t = i as f32 / span;
            self.value_at(x1 + (x2 - x1) * t, y1 + (y2 - y1) * t)
        }));
    }
}
