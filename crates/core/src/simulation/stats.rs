//! Per-step statistics snapshot

use serde::{Deserialize, Serialize};

/// Snapshot of engine state for overlays and logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Completed steps
    pub steps: u64,
    /// Stability-guard resets so far
    pub resets: u64,
    /// Sub-steps planned for the current parameters
    pub sub_steps: usize,
    /// Sum of squared displacements
    pub total_energy: f32,
    /// Largest absolute displacement
    pub max_amplitude: f32,
    /// Registered sources
    pub source_count: usize,
    /// Registered walls
    pub wall_count: usize,
}
