//! Integration tests for the query surface, corruption recovery and
//! degenerate inputs.

use wave_sim_core::{Vec2, Wall, WaveParams, WaveSimulation};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn active_sim() -> WaveSimulation {
    let mut sim = WaveSimulation::new(200.0, 160.0, 2.0)
        .with_params(WaveParams::default().with_wave_speed(1.0).with_energy_trail(true));
    sim.add_source(100.0, 80.0, 0.25, 5.0);
    for t in 0..60 {
        sim.step(t as f32);
    }
    sim
}

#[test]
fn test_sample_line_returns_requested_length() {
    let sim = active_sim();
    for n in [0, 1, 2, 3, 64, 257] {
        assert_eq!(sim.sample_line(0.0, 0.0, 199.0, 159.0, n).len(), n);
    }
}

#[test]
fn test_sample_line_fully_outside_is_zero() {
    let sim = active_sim();
    let samples = sim.sample_line(-500.0, -20.0, -1.0, 900.0, 40);
    assert_eq!(samples.len(), 40);
    assert!(samples.iter().all(|&v| v == 0.0));
}

#[test]
fn test_sample_line_matches_point_queries() {
    let sim = active_sim();
    let (x1, y1, x2, y2) = (20.0, 30.0, 180.0, 130.0);
    let n = 33;
    let samples = sim.sample_line(x1, y1, x2, y2, n);
    for (i, &sample) in samples.iter().enumerate() {
        let t = i as f32 / (n - 1) as f32;
        let expected = sim.value_at(x1 + (x2 - x1) * t, y1 + (y2 - y1) * t);
        assert_eq!(sample, expected, "sample {}", i);
    }
    assert_eq!(samples[0], sim.value_at(x1, y1));
    assert_eq!(samples[n - 1], sim.value_at(x2, y2));
    assert!(samples.iter().any(|&v| v != 0.0));
}

#[test]
fn test_sample_line_partially_outside() {
    let sim = active_sim();
    let samples = sim.sample_line(-100.0, 80.0, 100.0, 80.0, 21);
    // The first half lies left of the grid
    assert!(samples[..10].iter().all(|&v| v == 0.0));
    assert_eq!(samples[20], sim.value_at(100.0, 80.0));
}

#[test]
fn test_energy_query_tracks_peaks() {
    let sim = active_sim();
    let energy = sim.energy_at(100.0, 80.0);
    assert!(energy > 0.0);
    assert!(energy >= sim.value_at(100.0, 80.0).abs());
    assert_eq!(sim.energy_at(-1.0, 0.0), 0.0);
    assert_eq!(sim.energy_at(200.0, 0.0), 0.0);
}

#[test]
fn test_nan_injection_recovers_in_one_step() {
    let mut sim = active_sim();
    let idx = sim.index(37, 41);
    sim.field_mut().current_mut()[idx] = f32::NAN;
    sim.step(60.0);

    assert!(sim.last_reset());
    assert!(sim.field().current().iter().all(|v| v.is_finite()));
    assert!(sim.field().previous().iter().all(|v| v.is_finite()));
    // Registries survive the reset
    assert_eq!(sim.sources().len(), 1);
}

#[test]
fn test_infinity_injection_recovers_in_one_step() {
    let mut sim = active_sim();
    let idx = sim.index(50, 40);
    sim.field_mut().current_mut()[idx] = f32::INFINITY;
    sim.step(60.0);

    assert!(sim.field().current().iter().all(|v| v.is_finite()));
    assert_eq!(sim.get_stats().resets, 1);

    // Stepping resumes normally afterwards
    for t in 61..100 {
        sim.step(t as f32);
    }
    assert!(!sim.last_reset());
    assert!(sim.total_energy() > 0.0);
}

#[test]
fn test_empty_grid_accepts_everything() {
    let mut sim = WaveSimulation::new(0.0, 0.0, 4.0);
    assert_eq!(sim.cols(), 0);
    sim.add_default_source(1.0, 1.0);
    sim.add_orbital_source(0.0, 0.0, 5.0, 0.1, 0.2, 1.0, 0.0);
    sim.add_wall(Wall::new(Vec2::new(0.0, 0.0), Vec2::new(3.0, 3.0)));
    sim.apply_impulse(0.0, 0.0, 8.0, 2.0);
    for t in 0..5 {
        sim.step(t as f32);
    }
    assert_eq!(sim.value_at(0.0, 0.0), 0.0);
    assert_eq!(sim.sample_line(0.0, 0.0, 10.0, 10.0, 4), vec![0.0; 4]);
    assert!(sim.obstacle_mask().is_empty());
}

#[test]
fn test_single_cell_grid() {
    let mut sim = WaveSimulation::new(1.0, 1.0, 1.0)
        .with_params(WaveParams::default().with_reflective_boundaries(true));
    sim.add_source(0.0, 0.0, 1.0, 10.0);
    for t in 0..20 {
        sim.step(t as f32);
    }
    assert_eq!(sim.value_at(0.0, 0.0), 0.0);
}

#[test]
fn test_degenerate_wall_and_offgrid_source() {
    let mut sim = WaveSimulation::new(80.0, 80.0, 1.0);
    sim.add_wall(Wall::new(Vec2::new(40.0, 40.0), Vec2::new(40.0, 40.0)));
    sim.add_source(1.0e6, -3.0e5, 0.3, 5.0);
    sim.add_source(40.0, 40.0, 0.3, 5.0);
    for t in 0..20 {
        sim.step(t as f32);
    }
    assert!(sim.obstacle_mask().iter().all(|&c| c == 0));
    assert!(sim.total_energy() > 0.0);
    assert!(sim.field().current().iter().all(|v| v.is_finite()));
}

#[test]
fn test_invalid_construction_is_safe() {
    for (w, h, c) in [
        (f32::NAN, 10.0, 1.0),
        (10.0, -5.0, 1.0),
        (10.0, 10.0, -2.0),
        (10.0, 10.0, 0.0),
        (f32::INFINITY, 10.0, 1.0),
        (1.0e20, 10.0, 1.0),
        (10.0, 10.0, 1.0e-30),
        (1.0e5, 1.0e5, 1.0),
    ] {
        let mut sim = WaveSimulation::new(w, h, c);
        assert_eq!(sim.cols() * sim.rows(), 0);
        sim.add_default_source(3.0, 3.0);
        sim.apply_impulse(3.0, 3.0, 2.0, 1.0);
        sim.step(0.0);
        assert_eq!(sim.value_at(3.0, 3.0), 0.0);
        assert!(WaveSimulation::try_new(w, h, c).is_err());
    }
}

#[test]
fn test_host_writes_keep_buffer_lengths() {
    let mut sim = WaveSimulation::new(40.0, 30.0, 1.0);
    let len = sim.cols() * sim.rows();
    let centre = sim.index(20, 15);

    let field = sim.field_mut();
    field.previous_mut().fill(0.25);
    field.current_mut()[centre] = 2.0;
    sim.step(0.0);

    assert_eq!(sim.field().current().len(), len);
    assert_eq!(sim.field().previous().len(), len);
    assert!(!sim.last_reset());
    assert_ne!(sim.value_at(20.0, 15.0), 0.0);
}

#[test]
fn test_linear_source_advances_each_step() {
    let emit = |velocity: Vec2| {
        let mut sim = WaveSimulation::new(100.0, 100.0, 1.0);
        sim.add_moving_source(50.0, 50.0, velocity, 0.2, 5.0);
        sim.step(40.0);
        sim.sources()[0].position
    };

    let still = emit(Vec2::zeros());
    let moving = emit(Vec2::new(1.0, 0.0));
    assert_eq!(still, Vec2::new(50.0, 50.0));
    assert_eq!(moving, Vec2::new(51.0, 50.0));
}
