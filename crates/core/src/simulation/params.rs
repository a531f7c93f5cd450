//! Runtime simulation parameters

use crate::solver::BoundaryMode;
use serde::{Deserialize, Serialize};

/// Parameters read at the start of every step
///
/// All fields are free-standing and may be changed between steps; nothing in
/// the engine depends on their history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveParams {
    /// Propagation speed in cells per time unit
    pub wave_speed: f32,
    /// Multiplicative damping per sub-step, in `(0, 1]`
    pub damping: f32,
    /// Visible time increment per step
    pub dt: f32,
    /// Mirror (true) or zero (false) the outer ring
    pub reflective_boundaries: bool,
    /// Accumulate the peak-hold energy map
    pub energy_trail_enabled: bool,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            wave_speed: 0.5,
            damping: 0.999,
            dt: 1.0,
            reflective_boundaries: false,
            energy_trail_enabled: false,
        }
    }
}

impl WaveParams {
    /// Set the wave speed
    pub fn with_wave_speed(mut self, wave_speed: f32) -> Self {
        self.wave_speed = wave_speed;
        self
    }

    /// Set the damping factor, clamped to `[0, 1]`
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping.clamp(0.0, 1.0);
        self
    }

    /// Set the visible time increment
    pub fn with_dt(mut self, dt: f32) -> Self {
        self.dt = dt;
        self
    }

    /// Select reflective or absorbing edges
    pub fn with_reflective_boundaries(mut self, reflective: bool) -> Self {
        self.reflective_boundaries = reflective;
        self
    }

    /// Enable or disable the energy trail
    pub fn with_energy_trail(mut self, enabled: bool) -> Self {
        self.energy_trail_enabled = enabled;
        self
    }

    /// Boundary mode implied by `reflective_boundaries`
    pub fn boundary_mode(&self) -> BoundaryMode {
        BoundaryMode::from_reflective(self.reflective_boundaries)
    }
}
