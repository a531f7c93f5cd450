//! Grid state: displacement buffers and the obstacle mask

pub mod obstacle_mask;
pub mod wave_field;

pub use obstacle_mask::{rasterize_walls, ObstacleMask, BLOCKED, OPEN, WALL_TOLERANCE};
pub use wave_field::{GridGeometry, WaveField, MAX_CELLS};
