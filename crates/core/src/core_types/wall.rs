//! Line obstacles with optional open slits
//!
//! Walls are segments in grid units. A slit is a parametric interval along
//! the segment (`0.0` at the first endpoint, `1.0` at the second) where the
//! wall is open.

use super::vec2::Vec2;
use serde::{Deserialize, Serialize};

/// Open interval along a wall, as fractions of the segment length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slit {
    /// Start fraction (0..1)
    pub start: f32,
    /// End fraction (0..1), greater than `start`
    pub end: f32,
}

impl Slit {
    /// Create a slit; the bounds are reordered if given backwards
    pub fn new(start: f32, end: f32) -> Self {
        if end < start {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    /// Whether parametric position `t` falls inside the slit
    #[inline]
    pub fn contains(&self, t: f32) -> bool {
        t >= self.start && t <= self.end
    }
}

/// A wall segment from `start` to `end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// First endpoint in grid units
    pub start: Vec2,
    /// Second endpoint in grid units
    pub end: Vec2,
    /// Open intervals along the segment
    pub slits: Vec<Slit>,
}

impl Wall {
    /// Create a solid wall
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            slits: Vec::new(),
        }
    }

    /// Create a wall with open slits
    pub fn with_slits(start: Vec2, end: Vec2, slits: Vec<Slit>) -> Self {
        Self { start, end, slits }
    }

    /// Squared segment length
    #[inline]
    pub fn length_squared(&self) -> f32 {
        (self.end - self.start).norm_squared()
    }

    /// Zero-length (or non-finite) walls block nothing
    pub fn is_degenerate(&self) -> bool {
        let len_sq = self.length_squared();
        !(len_sq.is_finite() && len_sq > 0.0)
    }

    /// Project a point onto the segment
    ///
    /// Returns `(t, distance)` where `t` is the clamped parametric position and
    /// `distance` the Euclidean distance to the closest point. Returns `None`
    /// for degenerate walls.
    pub fn project(&self, point: Vec2) -> Option<(f32, f32)> {
        if self.is_degenerate() {
            return None;
        }
        let dir = self.end - self.start;
        let t = ((point - self.start).dot(&dir) / self.length_squared()).clamp(0.0, 1.0);
        let closest = self.start + dir * t;
        Some((t, (point - closest).norm()))
    }

    /// Whether parametric position `t` lies in any slit
    pub fn is_open_at(&self, t: f32) -> bool {
        self.slits.iter().any(|slit| slit.contains(t))
    }
}
