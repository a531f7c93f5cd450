//! CFL sub-step planning
//!
//! The explicit 2D scheme is stable for `c * dt / dx <= 1/sqrt(2)`. Rather
//! than bounding the wave speed, each visible step is split into enough
//! sub-steps that the per-sub-step Courant number stays under [`CFL_LIMIT`].
//! Grid spacing is normalised to one cell.

use tracing::debug;

/// Courant number targeted per sub-step (margin below `1/sqrt(2)`)
pub const CFL_LIMIT: f32 = 0.5;

/// Upper bound on sub-steps per visible step
pub const MAX_SUB_STEPS: usize = 4096;

/// Number of sub-steps needed for `wave_speed` and `dt`
///
/// Returns `max(1, ceil(|wave_speed * dt| / CFL_LIMIT))`, capped at
/// [`MAX_SUB_STEPS`]. Non-finite ratios plan a single sub-step.
pub fn sub_step_count(wave_speed: f32, dt: f32) -> usize {
    let ratio = (wave_speed * dt).abs();
    if !ratio.is_finite() {
        return 1;
    }
    let steps = (ratio / CFL_LIMIT).ceil();
    if steps >= MAX_SUB_STEPS as f32 {
        MAX_SUB_STEPS
    } else {
        (steps as usize).max(1)
    }
}

/// Per-step integration plan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubStepPlan {
    /// Number of sweeps this step
    pub sub_steps: usize,
    /// Time increment per sweep
    pub sub_dt: f32,
    /// Laplacian coefficient `wave_speed² * sub_dt²`
    pub coefficient: f32,
}

impl SubStepPlan {
    /// Plan a step for the given parameters
    ///
    /// A non-finite wave speed or time step yields a zero coefficient, so the
    /// field only damps until the parameters are fixed.
    pub fn new(wave_speed: f32, dt: f32) -> Self {
        let sub_steps = sub_step_count(wave_speed, dt);
        let sub_dt = dt / sub_steps as f32;
        let coefficient = wave_speed * wave_speed * sub_dt * sub_dt;
        if coefficient.is_finite() {
            Self {
                sub_steps,
                sub_dt,
                coefficient,
            }
        } else {
            debug!(
                "Non-finite wave parameters (speed={}, dt={}), propagation disabled",
                wave_speed, dt
            );
            Self {
                sub_steps,
                sub_dt: 0.0,
                coefficient: 0.0,
            }
        }
    }

    /// Courant number of a single sub-step
    pub fn courant_number(&self) -> f32 {
        self.coefficient.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sub_step_counts() {
        assert_eq!(sub_step_count(0.5, 1.0), 1);
        assert_eq!(sub_step_count(1.5, 1.0), 3);
        assert_eq!(sub_step_count(5.0, 1.0), 10);
        assert_eq!(sub_step_count(0.7, 1.0), 2);
        assert_eq!(sub_step_count(10.0, 1.0), 20);
    }

    #[test]
    fn test_zero_and_negative_speed() {
        assert_eq!(sub_step_count(0.0, 1.0), 1);
        assert_eq!(sub_step_count(-1.5, 1.0), 3);
    }

    #[test]
    fn test_pathological_inputs() {
        assert_eq!(sub_step_count(f32::INFINITY, 1.0), 1);
        assert_eq!(sub_step_count(f32::NAN, 1.0), 1);
        assert_eq!(sub_step_count(1.0e9, 1.0), MAX_SUB_STEPS);
    }

    #[test]
    fn test_plan_keeps_courant_under_limit() {
        for speed in [0.1_f32, 0.5, 0.9, 1.5, 3.3, 5.0, 10.0] {
            let plan = SubStepPlan::new(speed, 1.0);
            assert!(
                plan.courant_number() <= CFL_LIMIT + 1e-6,
                "speed {} gave courant {}",
                speed,
                plan.courant_number()
            );
        }
    }

    #[test]
    fn test_plan_coefficient() {
        let plan = SubStepPlan::new(1.5, 1.0);
        assert_eq!(plan.sub_steps, 3);
        assert_relative_eq!(plan.sub_dt, 1.0 / 3.0);
        assert_relative_eq!(plan.coefficient, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_plan_non_finite_speed_disables_propagation() {
        let plan = SubStepPlan::new(f32::INFINITY, 1.0);
        assert_eq!(plan.sub_steps, 1);
        assert_eq!(plan.coefficient, 0.0);
    }
}
