//! Configuration types for Lenia Trails simulation parameters.

use serde::{Deserialize, Serialize};

use super::{Palette, PaletteError};

fn default_randomize_interval() -> f32 {
    90.0
}

fn default_trail_decay() -> f32 {
    0.9
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Parameters for the first epoch.
    pub params: SimulationParams,
    /// Sampling ranges used when an epoch is randomized.
    #[serde(default)]
    pub ranges: ParamRanges,
    /// Seconds of caller-supplied time between randomizations.
    #[serde(default = "default_randomize_interval")]
    pub randomize_interval: f32,
    /// Fraction of the previous trail kept on each blend (0.0-1.0).
    #[serde(default = "default_trail_decay")]
    pub trail_decay: f32,
    /// Color gradient for activations.
    #[serde(default)]
    pub palette: Palette,
    /// Optional periodic shift/rotation of the lattice.
    #[serde(default)]
    pub drift: Option<DriftConfig>,
    /// Fixed RNG seed. `None` draws one from the OS.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 113,
            height: 64,
            params: SimulationParams::default(),
            ranges: ParamRanges::default(),
            randomize_interval: default_randomize_interval(),
            trail_decay: default_trail_decay(),
            palette: Palette::default(),
            drift: None,
            rng_seed: None,
        }
    }
}

/// The complete parameter set for one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Kernel radius in cells.
    pub kernel_radius: f32,
    /// Growth function: optimal neighborhood aggregate (m).
    pub growth_center: f32,
    /// Growth function: width of the positive region (s).
    pub growth_width: f32,
    /// Time step size.
    pub dt: f32,
    /// Radius of the initial disk placed at the grid center.
    pub seed_radius: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            kernel_radius: 14.0,
            growth_center: 0.14,
            growth_width: 0.016,
            dt: 0.08,
            seed_radius: 20.0,
        }
    }
}

impl SimulationParams {
    /// Growth parameters for this epoch.
    #[inline]
    pub fn growth(&self) -> GrowthParams {
        GrowthParams {
            mu: self.growth_center,
            sigma: self.growth_width,
        }
    }
}

/// Growth function peak location and spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthParams {
    /// Center (m).
    pub mu: f32,
    /// Width (s).
    pub sigma: f32,
}

/// Inclusive uniform sampling ranges for epoch randomization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamRanges {
    pub kernel_radius: (f32, f32),
    pub growth_center: (f32, f32),
    pub growth_width: (f32, f32),
    pub dt: (f32, f32),
    pub seed_radius: (f32, f32),
}

impl Default for ParamRanges {
    fn default() -> Self {
        Self {
            kernel_radius: (10.0, 18.0),
            growth_center: (0.10, 0.20),
            growth_width: (0.010, 0.025),
            dt: (0.05, 0.10),
            seed_radius: (15.0, 25.0),
        }
    }
}

impl ParamRanges {
    /// Check that every range is finite and ordered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ranges = [
            ("kernel_radius", self.kernel_radius),
            ("growth_center", self.growth_center),
            ("growth_width", self.growth_width),
            ("dt", self.dt),
            ("seed_radius", self.seed_radius),
        ];
        for (field, (lo, hi)) in ranges {
            if !lo.is_finite() || !hi.is_finite() || lo > hi {
                return Err(ConfigError::InvalidRange { field });
            }
        }
        Ok(())
    }
}

/// Periodic whole-lattice perturbation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftConfig {
    /// Apply one move every this many steps.
    pub interval_steps: u64,
    /// Rotation angle for the two rotate moves, in degrees.
    pub rotation_degrees: f32,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            interval_steps: 20,
            rotation_degrees: 2.0,
        }
    }
}

impl SimulationConfig {
    /// Total number of cells.
    #[inline]
    pub fn grid_size(&self) -> usize {
        self.width * self.height
    }

    /// Largest kernel radius the grid can hold.
    #[inline]
    pub fn max_kernel_radius(&self) -> f32 {
        self.width.min(self.height) as f32
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if !(self.params.dt.is_finite() && self.params.dt > 0.0) {
            return Err(ConfigError::InvalidTimeStep);
        }
        if !(self.randomize_interval.is_finite() && self.randomize_interval > 0.0) {
            return Err(ConfigError::InvalidInterval);
        }
        if !(0.0..=1.0).contains(&self.trail_decay) {
            return Err(ConfigError::InvalidTrailDecay(self.trail_decay));
        }
        self.ranges.validate()?;
        let max = self.max_kernel_radius();
        for radius in [self.params.kernel_radius, self.ranges.kernel_radius.1] {
            if !(radius.is_finite() && radius <= max) {
                return Err(ConfigError::InvalidKernelRadius { radius, max });
            }
        }
        self.palette.validate()?;
        if let Some(drift) = &self.drift {
            if drift.interval_steps == 0 {
                return Err(ConfigError::InvalidDriftInterval);
            }
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid dimensions (width, height) must be non-zero")]
    InvalidDimensions,
    #[error("Time step must be positive")]
    InvalidTimeStep,
    #[error("Randomize interval must be positive")]
    InvalidInterval,
    #[error("Trail decay {0} is outside [0, 1]")]
    InvalidTrailDecay(f32),
    #[error("Range for {field} must be finite with min <= max")]
    InvalidRange { field: &'static str },
    #[error("Kernel radius {radius} must be finite and at most {max}")]
    InvalidKernelRadius { radius: f32, max: f32 },
    #[error("Drift interval must be non-zero")]
    InvalidDriftInterval,
    #[error(transparent)]
    Palette(#[from] PaletteError),
}
