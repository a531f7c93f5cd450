//! Decaying peak-hold energy map
//!
//! Each cell follows `energy = max(energy * decay, |u|)`, which leaves a long
//! exposure trail of where waves have recently been strong. The map is only
//! updated while the trail is enabled and is left untouched otherwise.

/// Per-step decay of the held peak
pub const ENERGY_DECAY: f32 = 0.997;

/// Peak-hold accumulator parallel to the displacement field
#[derive(Debug, Clone)]
pub struct EnergyMap {
    values: Vec<f32>,
}

impl EnergyMap {
    /// Create a zeroed map with `len` cells
    pub fn new(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    /// Fold the current field into the map
    ///
    /// NaN displacements never replace a held value (`f32::max` ignores NaN).
    /// Infinite values are held like any other peak.
    pub fn accumulate(&mut self, current: &[f32], decay: f32) {
        for (energy, &u) in self.values.iter_mut().zip(current) {
            *energy = (*energy * decay).max(u.abs());
        }
    }

    /// Held values (row-major)
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Value at a linear index
    #[inline]
    pub fn get(&self, idx: usize) -> f32 {
        self.values[idx]
    }

    /// Zero the map
    pub fn clear(&mut self) {
        self.values.fill(0.0);
    }
}
