//! Wave Simulation Core Library
//!
//! A real-time 2D scalar wave-field simulator for interactive exploration.
//! Integrates the wave equation on a rectangular grid with point emitters
//! (stationary, moving, or orbiting) and line obstacles with optional slits.
//!
//! ## Engine
//!
//! - Explicit leapfrog finite-difference scheme with automatic CFL sub-stepping
//! - Lazily rebuilt obstacle mask from wall geometry
//! - Reflective (mirror) or absorbing (zero) edges
//! - First-order Doppler shift for moving sources, one-shot Gaussian impulses
//! - Decaying peak-hold energy map for long-exposure trails
//! - Stability guard that resets the field on numerical corruption
//!
//! ```rust
//! use wave_sim_core::WaveSimulation;
//!
//! let mut sim = WaveSimulation::new(400.0, 300.0, 4.0);
//! sim.add_source(200.0, 150.0, 0.2, 5.0);
//! for t in 0..10 {
//!     sim.step(t as f32);
//! }
//! assert!(sim.value_at(200.0, 150.0).is_finite());
//! ```

// Core types and utilities
pub mod core_types;

pub mod error;
pub mod grid;
pub mod simulation;
pub mod solver;

// Re-export core types
pub use core_types::{Orbit, Slit, Source, SourceMotion, Vec2, Wall};
pub use core_types::{DEFAULT_AMPLITUDE, DEFAULT_FREQUENCY};

// Re-export engine types
pub use error::SimulationError;
pub use grid::{GridGeometry, ObstacleMask, WaveField};
pub use simulation::{SimulationStats, WaveParams, WaveSimulation};
pub use solver::BoundaryMode;
