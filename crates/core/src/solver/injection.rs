//! Energy injection: continuous emitters and one-shot impulses

use crate::core_types::{Source, Vec2};
use crate::grid::WaveField;

/// Frequency shift per unit of horizontal source velocity
pub const DOPPLER_COEFFICIENT: f32 = 0.001;

/// Advance every orbital source one angular step
pub fn advance_orbits(sources: &mut [Source]) {
    for source in sources {
        source.advance_orbit();
    }
}

/// Add each active source's emission to its nearest cell, then move linear sources
///
/// The emitted value is `amplitude * sin(time * f_eff + phase)` with
/// `f_eff = frequency + vx * DOPPLER_COEFFICIENT`. Sources whose nearest cell
/// is off-grid emit nothing but still move.
pub fn emit_sources(sources: &mut [Source], field: &mut WaveField, time: f32, dt: f32) {
    for source in sources.iter_mut() {
        if source.active {
            if let Some((x, y)) = source.cell(field.cols, field.rows) {
                let f_eff = source.frequency + source.velocity().x * DOPPLER_COEFFICIENT;
                let idx = field.index(x, y);
                field.current[idx] += source.amplitude * (time * f_eff + source.phase).sin();
            }
        }
        source.advance_linear(dt);
    }
}

/// Deposit a Gaussian bump into `current`
///
/// `center` and `radius` are in grid units. The standard deviation is
/// `0.5 * radius`; only interior cells within `radius` of the centre are
/// touched. A zero radius deposits the full amplitude at the centre cell when
/// the centre lies exactly on it.
pub fn deposit_gaussian(field: &mut WaveField, center: Vec2, radius: f32, amplitude: f32) {
    let (cols, rows) = (field.cols, field.rows);
    let finite = center.x.is_finite() && center.y.is_finite() && radius.is_finite();
    if cols < 3 || rows < 3 || !finite || radius < 0.0 {
        return;
    }

    let Some((x0, x1)) = interior_span(center.x - radius, center.x + radius, cols) else {
        return;
    };
    let Some((y0, y1)) = interior_span(center.y - radius, center.y + radius, rows) else {
        return;
    };

    let sigma = 0.5 * radius;
    let two_sigma_sq = 2.0 * sigma * sigma;
    let radius_sq = radius * radius;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 - center.x;
            let dy = y as f32 - center.y;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq > radius_sq {
                continue;
            }
            let weight = if two_sigma_sq > 0.0 {
                (-dist_sq / two_sigma_sq).exp()
            } else {
                1.0
            };
            let idx = field.index(x, y);
            field.current[idx] += amplitude * weight;
        }
    }
}

/// Inclusive interior cell range (`1..=len-2`) covering `[lo, hi]`
fn interior_span(lo: f32, hi: f32, len: usize) -> Option<(usize, usize)> {
    let max = (len - 2) as f32;
    if hi < 1.0 || lo > max {
        return None;
    }
    let start = lo.max(1.0).ceil() as usize;
    let end = hi.min(max).floor() as usize;
    (start <= end).then_some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_emission_uses_sine_of_phase() {
        let mut field = WaveField::new(10, 10);
        let mut sources = vec![Source::stationary(Vec2::new(4.2, 5.6), 0.5, 2.0)];
        emit_sources(&mut sources, &mut field, 1.0, 1.0);

        let idx = field.index(4, 6);
        assert_relative_eq!(field.current[idx], 2.0 * 0.5_f32.sin());
    }

    #[test]
    fn test_inactive_and_offgrid_sources_emit_nothing() {
        let mut field = WaveField::new(10, 10);
        let mut inactive = Source::stationary(Vec2::new(5.0, 5.0), 0.5, 2.0);
        inactive.active = false;
        let mut sources = vec![inactive, Source::stationary(Vec2::new(500.0, -3.0), 0.5, 2.0)];
        emit_sources(&mut sources, &mut field, 1.0, 1.0);
        assert!(field.current.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_doppler_shift_from_horizontal_velocity() {
        let mut field = WaveField::new(40, 10);
        let mut sources = vec![Source::linear(Vec2::new(5.0, 5.0), Vec2::new(10.0, 3.0), 0.2, 1.0)];
        emit_sources(&mut sources, &mut field, 2.0, 1.0);

        let f_eff = 0.2 + 10.0 * DOPPLER_COEFFICIENT;
        assert_relative_eq!(field.current[field.index(5, 5)], (2.0 * f_eff).sin());
        // Position advances after emission
        assert_relative_eq!(sources[0].position.x, 15.0);
        assert_relative_eq!(sources[0].position.y, 8.0);
    }

    #[test]
    fn test_gaussian_peak_and_falloff() {
        let mut field = WaveField::new(21, 21);
        deposit_gaussian(&mut field, Vec2::new(10.0, 10.0), 4.0, 3.0);

        let centre = field.current[field.index(10, 10)];
        assert_relative_eq!(centre, 3.0);
        // sigma = 2: one sigma out is exp(-0.5)
        assert_relative_eq!(
            field.current[field.index(12, 10)],
            3.0 * (-0.5_f32).exp(),
            epsilon = 1e-5
        );
        // Outside the radius nothing is touched
        assert_eq!(field.current[field.index(15, 10)], 0.0);
        // Circular symmetry
        assert_relative_eq!(
            field.current[field.index(10, 7)],
            field.current[field.index(13, 10)],
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_gaussian_skips_boundary_ring() {
        let mut field = WaveField::new(8, 8);
        deposit_gaussian(&mut field, Vec2::new(0.0, 0.0), 3.0, 1.0);
        for x in 0..8 {
            assert_eq!(field.current[field.index(x, 0)], 0.0);
            assert_eq!(field.current[field.index(0, x)], 0.0);
        }
        assert!(field.current[field.index(1, 1)] > 0.0);
    }

    #[test]
    fn test_gaussian_degenerate_inputs() {
        let mut field = WaveField::new(8, 8);
        deposit_gaussian(&mut field, Vec2::new(100.0, 100.0), 3.0, 1.0);
        deposit_gaussian(&mut field, Vec2::new(4.0, 4.0), -1.0, 1.0);
        deposit_gaussian(&mut field, Vec2::new(f32::NAN, 4.0), 2.0, 1.0);
        assert!(field.current.iter().all(|&v| v == 0.0));

        deposit_gaussian(&mut field, Vec2::new(4.0, 4.0), 0.0, 1.5);
        assert_eq!(field.current[field.index(4, 4)], 1.5);
    }
}
