//! Simulation driver - owns every component and runs one tick at a time.

use crate::compute::{Drift, Kernel, LatticeState, ParameterRandomizer};
use crate::render::{ColorMapper, TrailCompositor};
use crate::schema::{ConfigError, SimulationConfig, SimulationParams};

/// Salt mixed into the configured seed for the drift RNG.
const DRIFT_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// A running simulation.
///
/// Each tick performs step, color-map and blend on the caller's thread.
/// Randomization is driven by the caller through [`Simulation::maybe_randomize`].
pub struct Simulation {
    config: SimulationConfig,
    params: SimulationParams,
    kernel: Kernel,
    lattice: LatticeState,
    randomizer: ParameterRandomizer,
    drift: Option<Drift>,
    mapper: ColorMapper,
    compositor: TrailCompositor,
    /// Last un-blended RGB frame.
    frame: Vec<u8>,
    /// Number of parameter changes since construction.
    epoch: u64,
    /// Caller-supplied seconds since the current epoch began.
    epoch_time: f32,
    ticks: u64,
}

impl Simulation {
    /// Create a simulation from configuration and seed the first epoch.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let width = config.width;
        let height = config.height;
        let params = config.params;

        let randomizer = match config.rng_seed {
            Some(seed) => ParameterRandomizer::new(seed),
            None => ParameterRandomizer::from_entropy(),
        }
        .with_ranges(config.ranges.clone());

        let drift = config.drift.clone().map(|drift| match config.rng_seed {
            Some(seed) => Drift::new(drift, seed ^ DRIFT_SEED_SALT),
            None => Drift::from_entropy(drift),
        });

        let mut lattice = LatticeState::new(width, height);
        lattice.reseed(params.seed_radius);

        log::info!(
            "simulation {}x{}: R={}, m={}, s={}, dt={}, rad={}",
            width,
            height,
            params.kernel_radius,
            params.growth_center,
            params.growth_width,
            params.dt,
            params.seed_radius
        );

        Ok(Self {
            kernel: Kernel::build(params.kernel_radius),
            mapper: ColorMapper::new(config.palette.clone()),
            compositor: TrailCompositor::new(width, height),
            frame: vec![0; width * height * 3],
            config,
            params,
            lattice,
            randomizer,
            drift,
            epoch: 0,
            epoch_time: 0.0,
            ticks: 0,
        })
    }

    /// Advance one tick: step, drift, color-map, blend.
    pub fn tick(&mut self) {
        self.lattice.step(&self.kernel, &self.params.growth(), self.params.dt);

        if let Some(drift) = &mut self.drift {
            drift.maybe_apply(&mut self.lattice);
        }

        self.mapper.render(self.lattice.values(), &mut self.frame);
        self.compositor.blend(&self.frame, self.config.trail_decay);
        self.ticks += 1;
    }

    /// Run several ticks.
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Randomize if `elapsed` pushes the epoch past the configured interval,
    /// then tick. Returns true when a new epoch started.
    pub fn update(&mut self, elapsed: f32) -> bool {
        let randomized = self.maybe_randomize(elapsed);
        self.tick();
        randomized
    }

    /// Account `elapsed` seconds against the epoch timer and randomize once
    /// the interval is reached. Negative or non-finite input counts as zero.
    pub fn maybe_randomize(&mut self, elapsed: f32) -> bool {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.epoch_time += elapsed;
        }
        if self.epoch_time >= self.config.randomize_interval {
            self.randomize();
            true
        } else {
            false
        }
    }

    /// Draw a new parameter set and start a new epoch.
    pub fn randomize(&mut self) -> SimulationParams {
        let params = self.randomizer.randomize();
        self.apply_params(params);
        params
    }

    /// Replace the parameters wholesale and start a new epoch.
    ///
    /// The kernel is rebuilt when the radius changed; the lattice is
    /// reseeded and the trail cleared in every case. A radius larger than
    /// the grid is clamped to [`SimulationConfig::max_kernel_radius`].
    pub fn apply_params(&mut self, mut params: SimulationParams) {
        let max_radius = self.config.max_kernel_radius();
        if params.kernel_radius > max_radius {
            log::warn!(
                "kernel radius {} exceeds the grid, clamping to {}",
                params.kernel_radius,
                max_radius
            );
            params.kernel_radius = max_radius;
        }
        if params.kernel_radius != self.kernel.radius {
            log::debug!(
                "rebuilding kernel: radius {} -> {}",
                self.kernel.radius,
                params.kernel_radius
            );
            self.kernel = Kernel::build(params.kernel_radius);
        }
        self.params = params;
        self.epoch += 1;
        self.epoch_time = 0.0;
        self.reset();

        log::info!(
            "epoch {} parameters: R={}, m={}, s={}, dt={}, rad={}",
            self.epoch,
            params.kernel_radius,
            params.growth_center,
            params.growth_width,
            params.dt,
            params.seed_radius
        );
    }

    /// Reseed the lattice with the current parameters and clear the trail.
    pub fn reset(&mut self) {
        self.lattice.reseed(self.params.seed_radius);
        self.compositor.clear();
        self.frame.fill(0);
    }

    /// Raw activation lattice.
    pub fn lattice(&self) -> &LatticeState {
        &self.lattice
    }

    /// Blended RGB output, `width * height * 3` bytes.
    pub fn trail(&self) -> &[u8] {
        self.compositor.buffer()
    }

    /// Most recent un-blended RGB frame.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn epoch_time(&self) -> f32 {
        self.epoch_time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    pub fn height(&self) -> usize {
        self.config.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::{ACTIVATION_CAP, SimulationStats};
    use crate::schema::DriftConfig;

    fn test_config() -> SimulationConfig {
        SimulationConfig {
            width: 48,
            height: 32,
            params: SimulationParams {
                kernel_radius: 6.0,
                growth_center: 0.15,
                growth_width: 0.025,
                dt: 0.1,
                seed_radius: 6.0,
            },
            rng_seed: Some(1234),
            ..Default::default()
        }
    }

    fn reference_params(growth_width: f32) -> SimulationParams {
        SimulationParams {
            kernel_radius: 14.0,
            growth_center: 0.14,
            growth_width,
            dt: 0.08,
            seed_radius: 10.0,
        }
    }

    #[test]
    fn test_simulation_creation() {
        let sim = Simulation::new(test_config()).unwrap();
        assert_eq!(sim.trail().len(), 48 * 32 * 3);
        assert_eq!(sim.kernel().size, 13);
        assert_eq!(sim.epoch(), 0);
        assert!(sim.lattice().total_activation() > 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig {
            height: 0,
            ..test_config()
        };
        assert!(matches!(
            Simulation::new(config),
            Err(ConfigError::InvalidDimensions)
        ));
    }

    #[test]
    fn test_oversized_kernel_radius_rejected() {
        let mut config = test_config();
        config.params.kernel_radius = 1e5;
        assert!(matches!(
            Simulation::new(config),
            Err(ConfigError::InvalidKernelRadius { .. })
        ));
    }

    #[test]
    fn test_apply_params_clamps_kernel_radius() {
        let mut sim = Simulation::new(test_config()).unwrap();
        sim.apply_params(SimulationParams {
            kernel_radius: 1e5,
            ..test_config().params
        });

        // 48x32 grid: radius capped at the shorter side
        assert_eq!(sim.params().kernel_radius, 32.0);
        assert_eq!(sim.kernel().size, 65);
        sim.tick();
        assert!(sim.lattice().values().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_tick_produces_frame_and_trail() {
        let mut sim = Simulation::new(test_config()).unwrap();
        sim.tick();

        assert_eq!(sim.ticks(), 1);
        assert_eq!(sim.lattice().steps(), 1);
        assert!(sim.frame().iter().any(|&c| c > 0));
        assert!(sim.trail().iter().any(|&c| c > 0));

        // Trail holds a tenth of the first frame
        for (&t, &f) in sim.trail().iter().zip(sim.frame()) {
            assert!(t <= f);
        }
    }

    #[test]
    fn test_randomize_resets_epoch() {
        let mut sim = Simulation::new(test_config()).unwrap();
        sim.run(5);
        assert!(!sim.trail().iter().all(|&c| c == 0));

        let params = sim.randomize();

        // Trail cleared and lattice equal to a fresh reseed
        assert!(sim.trail().iter().all(|&c| c == 0));
        let mut fresh = LatticeState::new(48, 32);
        fresh.reseed(params.seed_radius);
        assert_eq!(sim.lattice().values(), fresh.values());
        assert_eq!(sim.lattice().steps(), 0);

        assert_eq!(sim.epoch(), 1);
        assert_eq!(sim.params(), &params);
        assert_eq!(sim.kernel(), &Kernel::build(params.kernel_radius));
    }

    #[test]
    fn test_randomized_params_within_ranges() {
        let mut sim = Simulation::new(test_config()).unwrap();
        let ranges = sim.config().ranges.clone();
        for _ in 0..10 {
            let p = sim.randomize();
            assert!(p.kernel_radius >= ranges.kernel_radius.0);
            assert!(p.kernel_radius <= ranges.kernel_radius.1);
            assert!(p.seed_radius >= ranges.seed_radius.0);
            assert!(p.seed_radius <= ranges.seed_radius.1);
        }
    }

    #[test]
    fn test_same_seed_same_epochs() {
        let mut a = Simulation::new(test_config()).unwrap();
        let mut b = Simulation::new(test_config()).unwrap();
        for _ in 0..3 {
            assert_eq!(a.randomize(), b.randomize());
        }
    }

    #[test]
    fn test_maybe_randomize_interval() {
        let config = SimulationConfig {
            randomize_interval: 1.0,
            ..test_config()
        };
        let mut sim = Simulation::new(config).unwrap();

        assert!(!sim.maybe_randomize(0.4));
        assert!(!sim.maybe_randomize(0.4));
        assert!(!sim.maybe_randomize(f32::NAN));
        assert!(!sim.maybe_randomize(-5.0));
        assert!(sim.maybe_randomize(0.25));
        assert_eq!(sim.epoch(), 1);
        assert_eq!(sim.epoch_time(), 0.0);

        assert!(!sim.maybe_randomize(0.5));
        assert_eq!(sim.epoch(), 1);
    }

    #[test]
    fn test_update_randomizes_then_ticks() {
        let config = SimulationConfig {
            randomize_interval: 0.05,
            ..test_config()
        };
        let mut sim = Simulation::new(config).unwrap();

        assert!(!sim.update(0.03));
        assert!(sim.update(0.03));
        // The new epoch already took its first step
        assert_eq!(sim.lattice().steps(), 1);
        assert_eq!(sim.ticks(), 2);
    }

    #[test]
    fn test_apply_same_radius_keeps_kernel() {
        let mut sim = Simulation::new(test_config()).unwrap();
        let kernel = sim.kernel().clone();
        let params = SimulationParams {
            seed_radius: 4.0,
            ..*sim.params()
        };
        sim.apply_params(params);
        assert_eq!(sim.kernel(), &kernel);
        assert_eq!(sim.epoch(), 1);
    }

    #[test]
    fn test_reset_matches_fresh_seed() {
        let mut sim = Simulation::new(test_config()).unwrap();
        sim.run(4);
        sim.reset();

        let mut fresh = LatticeState::new(48, 32);
        fresh.reseed(6.0);
        assert_eq!(sim.lattice().values(), fresh.values());
        assert!(sim.trail().iter().all(|&c| c == 0));
        assert!(sim.frame().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_activation_clamped_over_ticks() {
        let mut sim = Simulation::new(test_config()).unwrap();
        sim.run(30);
        for &v in sim.lattice().values() {
            assert!((0.0..=ACTIVATION_CAP).contains(&v));
        }
    }

    #[test]
    fn test_drift_enabled_simulation_runs() {
        let config = SimulationConfig {
            drift: Some(DriftConfig {
                interval_steps: 2,
                rotation_degrees: 2.0,
            }),
            ..test_config()
        };
        let mut sim = Simulation::new(config).unwrap();
        sim.run(10);
        assert_eq!(sim.lattice().steps(), 10);
        for &v in sim.lattice().values() {
            assert!((0.0..=ACTIVATION_CAP).contains(&v));
        }
    }

    #[test]
    fn test_reference_parameters_flare_then_dissolve() {
        // m = 0.14, s = 0.016: the seed disk is active for the first steps,
        // never saturates, and has died out well before step 50.
        let (width, height) = (64, 64);
        let saturated = ACTIVATION_CAP * (width * height) as f32;
        let params = reference_params(0.016);
        let kernel = Kernel::build(params.kernel_radius);
        let growth = params.growth();

        let mut lattice = LatticeState::new(width, height);
        lattice.reseed(params.seed_radius);

        for _ in 0..10 {
            lattice.step(&kernel, &growth, params.dt);
            let total = lattice.total_activation();
            assert!(total > 0.0 && total < saturated, "total {}", total);
        }

        lattice.run(&kernel, &growth, params.dt, 40);
        let stats = SimulationStats::from_lattice(&lattice);
        assert!(stats.is_extinct(), "{:?}", stats);
    }

    #[test]
    fn test_wide_growth_stays_alive() {
        // Same setup with s at the top of the randomizer range: after 50
        // steps the pattern is neither dead nor saturated.
        let (width, height) = (64, 64);
        let saturated = ACTIVATION_CAP * (width * height) as f32;
        let params = reference_params(0.025);
        let kernel = Kernel::build(params.kernel_radius);

        let mut lattice = LatticeState::new(width, height);
        lattice.reseed(params.seed_radius);
        lattice.run(&kernel, &params.growth(), params.dt, 50);

        let total = lattice.total_activation();
        assert!(total > 0.0, "pattern died out");
        assert!(total < saturated, "pattern saturated: {}", total);
        assert!(total > 100.0 && total < 0.5 * saturated, "total {}", total);
    }

    #[test]
    fn test_end_to_end_simulation_output() {
        let config = SimulationConfig {
            width: 64,
            height: 64,
            params: reference_params(0.025),
            rng_seed: Some(9),
            ..Default::default()
        };
        let mut sim = Simulation::new(config).unwrap();
        for _ in 0..50 {
            sim.update(1.0 / 60.0);
        }

        assert_eq!(sim.epoch(), 0);
        assert!(sim.trail().iter().any(|&c| c > 0));
        let active = sim.lattice().values().iter().filter(|&&v| v > 0.0).count();
        let lit = sim
            .frame()
            .chunks_exact(3)
            .filter(|px| px.iter().any(|&c| c > 0))
            .count();
        // Only active cells are lit; some gradient colors are black
        assert!(lit <= active);
        assert!(lit > 0);
    }
}
