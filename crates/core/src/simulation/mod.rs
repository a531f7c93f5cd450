//! Wave simulation engine
//!
//! `WaveSimulation` owns every piece of mutable state: the displacement
//! buffers, the obstacle mask, the energy map and the source and wall
//! registries. Hosts mutate it between steps and read it back through the
//! query surface in [`queries`].
//!
//! # Step order
//!
//! ```text
//! plan sub-steps → refresh mask → advance orbits → emit sources
//!   → N × (sweep → swap → boundary) → energy trail → stability guard
//! ```

mod params;
pub mod queries;
mod stats;

pub use params::WaveParams;
pub use stats::SimulationStats;

use crate::core_types::{
    Slit, Source, SourceMotion, Vec2, Wall, DEFAULT_AMPLITUDE, DEFAULT_FREQUENCY,
};
use crate::error::SimulationError;
use crate::grid::{GridGeometry, ObstacleMask, WaveField};
use crate::solver::{
    advance_orbits, apply_boundary, deposit_gaussian, emit_sources, step_wave_cpu, zero_blocked,
    EnergyMap, StabilityGuard, SubStepPlan, ENERGY_DECAY,
};
use tracing::{debug, info, trace, warn};

/// Real-time 2D wave-field simulator
pub struct WaveSimulation {
    /// Parameters read at the start of each step
    pub params: WaveParams,

    geometry: GridGeometry,
    field: WaveField,
    mask: ObstacleMask,
    energy: EnergyMap,

    sources: Vec<Source>,
    walls: Vec<Wall>,

    guard: StabilityGuard,
    steps: u64,
    last_sub_steps: usize,
}

impl WaveSimulation {
    /// Create a simulation covering `pixel_width x pixel_height` pixels
    ///
    /// # Arguments
    /// * `pixel_width` - Canvas width in pixels
    /// * `pixel_height` - Canvas height in pixels
    /// * `cell_size` - Pixels per grid cell
    ///
    /// # Returns
    /// A simulation with zeroed fields, no sources and no walls. Inputs that
    /// [`GridGeometry::from_pixels`] rejects produce a zero-sized grid on
    /// which every operation is a no-op.
    #[must_use]
    pub fn new(pixel_width: f32, pixel_height: f32, cell_size: f32) -> Self {
        let geometry = match GridGeometry::from_pixels(pixel_width, pixel_height, cell_size) {
            Some(geometry) => geometry,
            None => {
                warn!(
                    "Invalid grid geometry {}x{} px, cell size {}; using an empty grid",
                    pixel_width, pixel_height, cell_size
                );
                GridGeometry::empty()
            }
        };
        Self::from_geometry(geometry)
    }

    /// Create a simulation, rejecting invalid geometry instead of degrading
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidGeometry`] when any dimension is
    /// negative or non-finite, the cell size is not strictly positive, or the
    /// grid would exceed [`crate::grid::MAX_CELLS`].
    pub fn try_new(
        pixel_width: f32,
        pixel_height: f32,
        cell_size: f32,
    ) -> Result<Self, SimulationError> {
        GridGeometry::from_pixels(pixel_width, pixel_height, cell_size)
            .map(Self::from_geometry)
            .ok_or(SimulationError::InvalidGeometry {
                pixel_width,
                pixel_height,
                cell_size,
            })
    }

    /// Create a simulation from precomputed grid geometry
    pub fn from_geometry(geometry: GridGeometry) -> Self {
        let GridGeometry { cols, rows, cell_size } = geometry;
        info!(
            "Wave simulation initialized: {}x{} grid, cell_size={:.2}px",
            cols, rows, cell_size
        );

        Self {
            params: WaveParams::default(),
            geometry,
            field: WaveField::new(cols, rows),
            mask: ObstacleMask::new(cols, rows),
            energy: EnergyMap::new(cols * rows),
            sources: Vec::new(),
            walls: Vec::new(),
            guard: StabilityGuard::new(),
            steps: 0,
            last_sub_steps: 0,
        }
    }

    /// Replace the parameters
    pub fn with_params(mut self, params: WaveParams) -> Self {
        self.params = params;
        self
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Zero every per-cell array and empty both registries
    pub fn clear(&mut self) {
        self.field.clear();
        self.energy.clear();
        self.mask.clear();
        self.sources.clear();
        self.walls.clear();
        info!("Wave simulation cleared");
    }

    /// Linear index of cell `(x, y)`; callers check bounds
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        self.field.index(x, y)
    }

    // ------------------------------------------------------------------
    // Sources
    // ------------------------------------------------------------------

    /// Add a stationary source at a pixel position with default frequency and amplitude
    pub fn add_default_source(&mut self, pixel_x: f32, pixel_y: f32) -> usize {
        self.add_source(pixel_x, pixel_y, DEFAULT_FREQUENCY, DEFAULT_AMPLITUDE)
    }

    /// Add a stationary source at a pixel position
    ///
    /// Returns the index of the new source.
    pub fn add_source(
        &mut self,
        pixel_x: f32,
        pixel_y: f32,
        frequency: f32,
        amplitude: f32,
    ) -> usize {
        let position = self.to_grid(pixel_x, pixel_y);
        self.push_source(Source::stationary(position, frequency, amplitude))
    }

    /// Add a source moving with constant velocity (grid units per time unit)
    pub fn add_moving_source(
        &mut self,
        pixel_x: f32,
        pixel_y: f32,
        velocity: Vec2,
        frequency: f32,
        amplitude: f32,
    ) -> usize {
        let position = self.to_grid(pixel_x, pixel_y);
        self.push_source(Source::linear(position, velocity, frequency, amplitude))
    }

    /// Add a source orbiting a pixel-space centre
    ///
    /// `angular_speed` is the angle advance per step in radians.
    #[allow(clippy::too_many_arguments)]
    pub fn add_orbital_source(
        &mut self,
        center_pixel_x: f32,
        center_pixel_y: f32,
        radius_pixels: f32,
        angular_speed: f32,
        frequency: f32,
        amplitude: f32,
        start_angle: f32,
    ) -> usize {
        let center = self.to_grid(center_pixel_x, center_pixel_y);
        let radius = radius_pixels / self.geometry.cell_size;
        self.push_source(Source::orbital(
            center,
            radius,
            angular_speed,
            start_angle,
            frequency,
            amplitude,
        ))
    }

    /// Append a prebuilt source (grid-unit position)
    pub fn push_source(&mut self, source: Source) -> usize {
        self.sources.push(source);
        self.sources.len() - 1
    }

    /// Move a source to a pixel position
    ///
    /// Orbital sources have their orbit centre moved instead. Returns `false`
    /// for an out-of-range index.
    pub fn move_source(&mut self, index: usize, pixel_x: f32, pixel_y: f32) -> bool {
        let target = self.to_grid(pixel_x, pixel_y);
        let Some(source) = self.sources.get_mut(index) else {
            return false;
        };
        if let SourceMotion::Orbital(orbit) = &mut source.motion {
            orbit.center = target;
            source.position = orbit.position();
        } else {
            source.position = target;
        }
        true
    }

    /// Enable or disable emission of a source
    pub fn set_source_active(&mut self, index: usize, active: bool) -> bool {
        match self.sources.get_mut(index) {
            Some(source) => {
                source.active = active;
                true
            }
            None => false,
        }
    }

    /// Remove a source, shifting later indices down
    pub fn remove_source(&mut self, index: usize) -> Option<Source> {
        (index < self.sources.len()).then(|| self.sources.remove(index))
    }

    /// Inject a one-shot Gaussian bump centred on a pixel position
    ///
    /// The bump has standard deviation `0.5 * radius` in grid units and covers
    /// interior cells within `radius` of the centre. It is not registered.
    pub fn apply_impulse(
        &mut self,
        pixel_x: f32,
        pixel_y: f32,
        radius_pixels: f32,
        amplitude: f32,
    ) {
        let center = self.to_grid(pixel_x, pixel_y);
        let radius = radius_pixels / self.geometry.cell_size;
        deposit_gaussian(&mut self.field, center, radius, amplitude);
    }

    // ------------------------------------------------------------------
    // Walls
    // ------------------------------------------------------------------

    /// Add a wall given in grid units
    pub fn add_wall(&mut self, wall: Wall) -> usize {
        self.walls.push(wall);
        self.mask.mark_dirty();
        self.walls.len() - 1
    }

    /// Add a wall given in pixel coordinates
    pub fn add_wall_pixels(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        slits: Vec<Slit>,
    ) -> usize {
        let start = self.to_grid(x1, y1);
        let end = self.to_grid(x2, y2);
        self.add_wall(Wall::with_slits(start, end, slits))
    }

    /// Remove a wall, shifting later indices down
    pub fn remove_wall(&mut self, index: usize) -> Option<Wall> {
        if index >= self.walls.len() {
            return None;
        }
        self.mask.mark_dirty();
        Some(self.walls.remove(index))
    }

    // ------------------------------------------------------------------
    // Stepping
    // ------------------------------------------------------------------

    /// Advance the simulation by one visible step
    ///
    /// `time` is an opaque, monotonically increasing counter used only in the
    /// emission phase term. Numerical corruption is recovered silently; see
    /// [`Self::last_reset`].
    pub fn step(&mut self, time: f32) {
        let params = self.params;
        let plan = SubStepPlan::new(params.wave_speed, params.dt);
        if plan.sub_steps != self.last_sub_steps {
            debug!(
                "Sub-step plan: {} sub-steps, courant={:.3}",
                plan.sub_steps,
                plan.courant_number()
            );
            self.last_sub_steps = plan.sub_steps;
        }
        trace!("Step {}: t={:.2}, sub_steps={}", self.steps, time, plan.sub_steps);

        self.mask.refresh(&self.walls);

        advance_orbits(&mut self.sources);
        emit_sources(&mut self.sources, &mut self.field, time, params.dt);
        zero_blocked(&mut self.field, &self.mask);

        let (cols, rows) = (self.geometry.cols, self.geometry.rows);
        let mode = params.boundary_mode();
        let mut sweep_finite = true;
        for _ in 0..plan.sub_steps {
            sweep_finite &=
                step_wave_cpu(&mut self.field, &self.mask, plan.coefficient, params.damping);
            self.field.swap();
            apply_boundary(&mut self.field.current, self.mask.as_slice(), cols, rows, mode);
        }

        if params.energy_trail_enabled {
            self.energy.accumulate(&self.field.current, ENERGY_DECAY);
        }

        self.steps += 1;
        if self.guard.check(&mut self.field, sweep_finite) {
            warn!(
                "Non-finite field values detected at step {}; field reset ({} resets total)",
                self.steps,
                self.guard.resets()
            );
        }
    }

    /// Advance one step and report a stability reset as an error
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::StabilityReset`] if the guard zeroed the
    /// field during this step. The step has still completed.
    pub fn step_checked(&mut self, time: f32) -> Result<(), SimulationError> {
        self.step(time);
        if self.guard.last_reset() {
            Err(SimulationError::StabilityReset { step: self.steps })
        } else {
            Ok(())
        }
    }

    /// Whether the stability guard reset the field during the last step
    pub fn last_reset(&self) -> bool {
        self.guard.last_reset()
    }

    /// Sub-steps the next step will run with the current parameters
    pub fn sub_steps(&self) -> usize {
        SubStepPlan::new(self.params.wave_speed, self.params.dt).sub_steps
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.geometry.cols
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.geometry.rows
    }

    /// Pixels per cell
    pub fn cell_size(&self) -> f32 {
        self.geometry.cell_size
    }

    /// Grid geometry
    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// Displacement buffers, valid until the next step
    pub fn field(&self) -> &WaveField {
        &self.field
    }

    /// Mutable displacement buffers
    ///
    /// Only fixed-length slices are handed out, so buffer sizes always match
    /// the grid. Writes are picked up by the next step like any other state.
    pub fn field_mut(&mut self) -> &mut WaveField {
        &mut self.field
    }

    /// Peak-hold energy values (row-major)
    pub fn energy_map(&self) -> &[f32] {
        self.energy.as_slice()
    }

    /// Obstacle mask, rebuilt first if walls changed
    pub fn obstacle_mask(&mut self) -> &[u8] {
        self.mask.refresh(&self.walls);
        self.mask.as_slice()
    }

    /// Registered sources
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Mutable sources, for dragging and retuning between steps
    pub fn sources_mut(&mut self) -> &mut [Source] {
        &mut self.sources
    }

    /// Registered walls
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Sum of squared displacements
    pub fn total_energy(&self) -> f32 {
        self.field.total_energy()
    }

    /// Largest absolute displacement
    pub fn max_amplitude(&self) -> f32 {
        self.field.max_amplitude()
    }

    /// Current statistics snapshot
    pub fn get_stats(&self) -> SimulationStats {
        SimulationStats {
            steps: self.steps,
            resets: self.guard.resets(),
            sub_steps: self.sub_steps(),
            total_energy: self.total_energy(),
            max_amplitude: self.max_amplitude(),
            source_count: self.sources.len(),
            wall_count: self.walls.len(),
        }
    }

    #[inline]
    fn to_grid(&self, pixel_x: f32, pixel_y: f32) -> Vec2 {
        Vec2::new(pixel_x, pixel_y) / self.geometry.cell_size
    }
}
