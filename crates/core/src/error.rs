//! Error type for callers that want explicit failure reporting
//!
//! Steady-state stepping never fails; these variants surface only through the
//! opt-in `try_new` and `step_checked` entry points.

use thiserror::Error;

/// Errors reported by the checked simulation entry points
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Construction parameters that cannot describe a grid
    #[error(
        "invalid grid geometry: {pixel_width}x{pixel_height} px with cell size {cell_size}"
    )]
    InvalidGeometry {
        /// Requested width in pixels
        pixel_width: f32,
        /// Requested height in pixels
        pixel_height: f32,
        /// Requested cell size in pixels
        cell_size: f32,
    },

    /// The stability guard reset the field during this step
    #[error("field reset after non-finite values at step {step}")]
    StabilityReset {
        /// Step counter after the step that reset
        step: u64,
    },
}
