//! Vector type alias for 2D grid positions and velocities.

use nalgebra::Vector2;

/// 2D vector type for positions, velocities, and orbit centres.
///
/// This is a simple alias for `nalgebra::Vector2<f32>`. All simulation-side
/// positions are expressed in grid units (cells), never pixels.
pub type Vec2 = Vector2<f32>;
