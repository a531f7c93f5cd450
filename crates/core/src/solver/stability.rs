//! Numerical-corruption recovery
//!
//! After every step the guard samples every [`GUARD_SAMPLE_STRIDE`]th cell
//! plus the last cell of both buffers. Together with the finiteness flag the
//! sweep reports, any non-finite value triggers a hard reset of the field.
//! Sources, walls and the energy map are preserved.

use crate::grid::WaveField;

/// Spacing of sampled cells
pub const GUARD_SAMPLE_STRIDE: usize = 16;

/// Detects blow-up and zeroes the field
#[derive(Debug, Clone, Default)]
pub struct StabilityGuard {
    resets: u64,
    last_reset: bool,
}

impl StabilityGuard {
    /// Create a guard with no recorded resets
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the field and reset it if corrupted
    ///
    /// `sweep_finite` is the flag returned by the wave sweeps of this step.
    /// Returns `true` if a reset was performed.
    pub fn check(&mut self, field: &mut WaveField, sweep_finite: bool) -> bool {
        let corrupted = !sweep_finite
            || !sampled_finite(&field.current)
            || !sampled_finite(&field.previous);
        self.last_reset = corrupted;
        if corrupted {
            field.clear();
            self.resets += 1;
        }
        corrupted
    }

    /// Whether the most recent check reset the field
    #[inline]
    pub fn last_reset(&self) -> bool {
        self.last_reset
    }

    /// Total resets performed
    #[inline]
    pub fn resets(&self) -> u64 {
        self.resets
    }
}

/// Sparse finiteness scan: every stride-th value plus the last
fn sampled_finite(values: &[f32]) -> bool {
    let strided = values
        .iter()
        .step_by(GUARD_SAMPLE_STRIDE)
        .all(|v| v.is_finite());
    strided && values.last().is_none_or(|v| v.is_finite())
}
