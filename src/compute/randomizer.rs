//! Epoch parameter randomization.

use rand::prelude::*;

use crate::schema::{ParamRanges, SimulationParams};

/// Uniform random in inclusive bounds.
fn uniform<R: Rng + ?Sized>(rng: &mut R, bounds: (f32, f32)) -> f32 {
    if bounds.0 >= bounds.1 {
        return bounds.0;
    }
    rng.gen_range(bounds.0..=bounds.1)
}

impl ParamRanges {
    /// Draw every parameter independently and uniformly from these ranges.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SimulationParams {
        SimulationParams {
            kernel_radius: uniform(rng, self.kernel_radius),
            growth_center: uniform(rng, self.growth_center),
            growth_width: uniform(rng, self.growth_width),
            dt: uniform(rng, self.dt),
            seed_radius: uniform(rng, self.seed_radius),
        }
    }
}

/// Random number generator wrapper for epoch parameters.
pub struct ParameterRandomizer {
    rng: StdRng,
    ranges: ParamRanges,
}

impl ParameterRandomizer {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ranges: ParamRanges::default(),
        }
    }

    /// Create with random seed.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            ranges: ParamRanges::default(),
        }
    }

    /// Replace the sampling ranges.
    pub fn with_ranges(mut self, ranges: ParamRanges) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn ranges(&self) -> &ParamRanges {
        &self.ranges
    }

    /// Draw a fresh parameter set.
    pub fn randomize(&mut self) -> SimulationParams {
        self.ranges.sample(&mut self.rng)
    }
}
