//! Time-stepping building blocks
//!
//! Each stage of a visible step lives in its own module and operates on the
//! grid buffers directly:
//!
//! 1. [`cfl`] plans the number of sub-steps for the current parameters
//! 2. [`injection`] advances orbits and adds source emission (or impulses)
//! 3. [`wave_equation`] sweeps the discrete wave operator
//! 4. [`boundary`] applies the edge condition after each sweep
//! 5. [`energy`] folds the field into the peak-hold map
//! 6. [`stability`] scans for non-finite values and resets on corruption
//!
//! The [`crate::simulation::WaveSimulation`] engine drives them in order.

pub mod boundary;
pub mod cfl;
pub mod energy;
pub mod injection;
pub mod stability;
pub mod wave_equation;

pub use boundary::{apply_boundary, BoundaryMode};
pub use cfl::{sub_step_count, SubStepPlan, CFL_LIMIT, MAX_SUB_STEPS};
pub use energy::{EnergyMap, ENERGY_DECAY};
pub use injection::{advance_orbits, deposit_gaussian, emit_sources, DOPPLER_COEFFICIENT};
pub use stability::{StabilityGuard, GUARD_SAMPLE_STRIDE};
pub use wave_equation::{step_wave_cpu, zero_blocked, FIELD_CLAMP};
