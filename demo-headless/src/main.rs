use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wave_sim_core::{Slit, WaveParams, WaveSimulation};

/// Headless wave simulation driver
#[derive(Parser, Debug)]
#[command(name = "wave-sim-demo")]
#[command(about = "2D wave-field simulation demo", long_about = None)]
struct Args {
    /// Canvas width in pixels
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// Cell size in pixels
    #[arg(short, long, default_value_t = 4.0)]
    cell_size: f32,

    /// Wave speed in grid units per time unit
    #[arg(short, long, default_value_t = 0.5)]
    wave_speed: f32,

    /// Per-sub-step damping factor (0-1)
    #[arg(short, long, default_value_t = 0.999)]
    damping: f32,

    /// Number of visible steps to run
    #[arg(short = 'n', long, default_value_t = 600)]
    steps: u32,

    /// Number of randomly placed stationary sources
    #[arg(short, long, default_value_t = 2)]
    sources: u32,

    /// Seed for source placement
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Add a source orbiting the canvas centre
    #[arg(short, long)]
    orbital: bool,

    /// Add a vertical wall with a central slit at two thirds of the width
    #[arg(long)]
    slit_wall: bool,

    /// Mirror waves at the edges instead of absorbing them
    #[arg(short, long)]
    reflective: bool,

    /// Accumulate the peak-hold energy map
    #[arg(short, long)]
    energy_trail: bool,

    /// Report interval in steps
    #[arg(long, default_value_t = 100)]
    report_interval: u32,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    println!("=== Wave Simulation Demo ===\n");

    let params = WaveParams::default()
        .with_wave_speed(args.wave_speed)
        .with_damping(args.damping)
        .with_reflective_boundaries(args.reflective)
        .with_energy_trail(args.energy_trail);
    let mut sim = WaveSimulation::new(args.width, args.height, args.cell_size).with_params(params);

    println!(
        "Grid: {}x{} cells ({:.0}x{:.0} px, cell {:.1} px)",
        sim.cols(),
        sim.rows(),
        args.width,
        args.height,
        sim.cell_size()
    );
    println!(
        "Wave speed: {:.2}, Damping: {:.4}, Sub-steps: {}, Edges: {}",
        sim.params.wave_speed,
        sim.params.damping,
        sim.sub_steps(),
        if args.reflective { "reflective" } else { "absorbing" }
    );

    // Keep random sources to the left so a slit wall has something to diffract
    let mut rng = StdRng::seed_from_u64(args.seed);
    let x_limit = if args.slit_wall { args.width * 0.6 } else { args.width };
    for _ in 0..args.sources {
        let x = rng.random_range(0.0..x_limit.max(1.0));
        let y = rng.random_range(0.0..args.height.max(1.0));
        let frequency = rng.random_range(0.05..0.3);
        sim.add_source(x, y, frequency, 5.0);
    }

    if args.orbital {
        let radius = args.width.min(args.height) * 0.2;
        sim.add_orbital_source(args.width * 0.5, args.height * 0.5, radius, 0.02, 0.15, 5.0, 0.0);
    }

    if args.slit_wall {
        let x = args.width * (2.0 / 3.0);
        sim.add_wall_pixels(x, 0.0, x, args.height, vec![Slit::new(0.45, 0.55)]);
    }

    info!(
        "Configured {} sources and {} walls",
        sim.sources().len(),
        sim.walls().len()
    );

    println!("\nRunning simulation...\n");
    println!("  Step | Total Energy | Max Amplitude | Resets");
    println!("-------|--------------|---------------|-------");

    let interval = args.report_interval.max(1);
    for step in 0..args.steps {
        sim.step(step as f32);

        if (step + 1) % interval == 0 {
            let stats = sim.get_stats();
            println!(
                "{:6} | {:12.3} | {:13.3} | {:6}",
                stats.steps, stats.total_energy, stats.max_amplitude, stats.resets
            );
        }
    }

    let stats = sim.get_stats();
    println!("\n=== Simulation Complete ===");
    println!("Steps: {}", stats.steps);
    println!("Total energy: {:.3}", stats.total_energy);
    println!("Max amplitude: {:.3}", stats.max_amplitude);
    println!("Stability resets: {}", stats.resets);
    if args.energy_trail {
        let peak = sim.energy_map().iter().copied().fold(0.0_f32, f32::max);
        println!("Peak held energy: {:.3}", peak);
    }
}
