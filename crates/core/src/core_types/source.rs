//! Point emitters driven by the time-stepper
//!
//! A source owns a continuous grid-space position and a motion model. The
//! motion model is a tagged variant so the per-step dispatch in the stepper
//! is exhaustive: stationary emitters never move, linear emitters advance by
//! `velocity * dt`, orbital emitters advance their angle and derive a velocity
//! from the displacement so the Doppler term tracks the actual motion.

use super::vec2::Vec2;
use serde::{Deserialize, Serialize};

/// Default emission frequency (radians per time unit)
pub const DEFAULT_FREQUENCY: f32 = 0.1;

/// Default emission amplitude
pub const DEFAULT_AMPLITUDE: f32 = 5.0;

/// Scale applied to the per-step orbital displacement to obtain a velocity
pub const ORBIT_VELOCITY_SCALE: f32 = 0.1;

/// Circular path followed by an orbital source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    /// Orbit centre in grid units
    pub center: Vec2,
    /// Orbit radius in grid units
    pub radius: f32,
    /// Angle advance per step (radians)
    pub speed: f32,
    /// Current angle (radians)
    pub angle: f32,
    /// Velocity derived from the last angular advance
    pub velocity: Vec2,
}

impl Orbit {
    /// Point on the orbit at the current angle
    pub fn position(&self) -> Vec2 {
        self.center + Vec2::new(self.angle.cos(), self.angle.sin()) * self.radius
    }
}

/// How a source moves between steps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SourceMotion {
    /// Fixed position
    Stationary,
    /// Constant velocity in grid units per time unit
    Linear {
        /// Velocity applied as `position += velocity * dt`
        velocity: Vec2,
    },
    /// Circular orbit around a fixed centre
    Orbital(Orbit),
}

/// A point emitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Continuous position in grid units
    pub position: Vec2,
    /// Angular frequency of the emitted sine (radians per time unit)
    pub frequency: f32,
    /// Peak displacement added per step
    pub amplitude: f32,
    /// Phase offset (radians)
    pub phase: f32,
    /// Inactive sources are kept in the registry but emit nothing
    pub active: bool,
    /// Motion model
    pub motion: SourceMotion,
}

impl Source {
    /// Create an active, stationary source with zero phase
    pub fn stationary(position: Vec2, frequency: f32, amplitude: f32) -> Self {
        Self {
            position,
            frequency,
            amplitude,
            phase: 0.0,
            active: true,
            motion: SourceMotion::Stationary,
        }
    }

    /// Create an active source moving with constant velocity
    pub fn linear(position: Vec2, velocity: Vec2, frequency: f32, amplitude: f32) -> Self {
        Self {
            motion: SourceMotion::Linear { velocity },
            ..Self::stationary(position, frequency, amplitude)
        }
    }

    /// Create an active source on a circular orbit
    ///
    /// The initial position is `center + radius * (cos, sin)(start_angle)`.
    pub fn orbital(
        center: Vec2,
        radius: f32,
        speed: f32,
        start_angle: f32,
        frequency: f32,
        amplitude: f32,
    ) -> Self {
        let orbit = Orbit {
            center,
            radius,
            speed,
            angle: start_angle,
            velocity: Vec2::zeros(),
        };
        Self {
            motion: SourceMotion::Orbital(orbit),
            ..Self::stationary(orbit.position(), frequency, amplitude)
        }
    }

    /// Instantaneous velocity in grid units per time unit
    pub fn velocity(&self) -> Vec2 {
        match self.motion {
            SourceMotion::Stationary => Vec2::zeros(),
            SourceMotion::Linear { velocity } => velocity,
            SourceMotion::Orbital(orbit) => orbit.velocity,
        }
    }

    /// Advance an orbital source by one angular step
    ///
    /// Commits the new position and records `0.1 * (new - old)` as the
    /// source velocity. Other motion kinds are left untouched.
    pub fn advance_orbit(&mut self) {
        if let SourceMotion::Orbital(orbit) = &mut self.motion {
            orbit.angle += orbit.speed;
            let next = orbit.position();
            orbit.velocity = (next - self.position) * ORBIT_VELOCITY_SCALE;
            self.position = next;
        }
    }

    /// Advance a linear source by `velocity * dt`
    pub fn advance_linear(&mut self, dt: f32) {
        if let SourceMotion::Linear { velocity } = self.motion {
            self.position += velocity * dt;
        }
    }

    /// Nearest grid cell to the continuous position, if inside `cols x rows`
    pub fn cell(&self, cols: usize, rows: usize) -> Option<(usize, usize)> {
        let x = self.position.x.round();
        let y = self.position.y.round();
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < cols && y < rows).then_some((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_orbital_initial_position() {
        let source = Source::orbital(
            Vec2::new(10.0, 10.0),
            4.0,
            0.1,
            std::f32::consts::FRAC_PI_2,
            0.2,
            1.0,
        );
        assert_relative_eq!(source.position.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(source.position.y, 14.0, epsilon = 1e-5);
        assert_eq!(source.velocity(), Vec2::zeros());
    }

    #[test]
    fn test_orbit_advance_derives_velocity() {
        let mut source = Source::orbital(Vec2::new(0.0, 0.0), 10.0, 0.5, 0.0, 0.2, 1.0);
        let before = source.position;
        source.advance_orbit();
        let after = source.position;

        assert_relative_eq!(after.x, 10.0 * 0.5_f32.cos(), epsilon = 1e-5);
        assert_relative_eq!(after.y, 10.0 * 0.5_f32.sin(), epsilon = 1e-5);

        let expected = (after - before) * ORBIT_VELOCITY_SCALE;
        assert_relative_eq!(source.velocity().x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(source.velocity().y, expected.y, epsilon = 1e-6);
    }

    #[test]
    fn test_linear_advance() {
        let mut source = Source::linear(Vec2::new(1.0, 2.0), Vec2::new(0.5, -1.0), 0.1, 1.0);
        source.advance_linear(2.0);
        assert_relative_eq!(source.position.x, 2.0);
        assert_relative_eq!(source.position.y, 0.0);

        // Orbit stepping leaves linear sources alone
        source.advance_orbit();
        assert_relative_eq!(source.position.x, 2.0);
    }

    #[test]
    fn test_stationary_never_moves() {
        let mut source = Source::stationary(Vec2::new(3.0, 3.0), 0.1, 1.0);
        source.advance_linear(10.0);
        source.advance_orbit();
        assert_eq!(source.position, Vec2::new(3.0, 3.0));
        assert!(source.active);
        assert_eq!(source.phase, 0.0);
    }

    #[test]
    fn test_cell_rounding_and_bounds() {
        let source = Source::stationary(Vec2::new(2.6, 3.4), 0.1, 1.0);
        assert_eq!(source.cell(10, 10), Some((3, 3)));
        assert_eq!(source.cell(3, 10), None);

        let outside = Source::stationary(Vec2::new(-5.0, 1.0), 0.1, 1.0);
        assert_eq!(outside.cell(10, 10), None);

        let nan = Source::stationary(Vec2::new(f32::NAN, 1.0), 0.1, 1.0);
        assert_eq!(nan.cell(10, 10), None);
    }
}
