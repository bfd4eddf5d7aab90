//! Periodic drift: whole-lattice shifts and small rotations.
//!
//! Every `interval_steps` steps one of six moves is chosen uniformly: a
//! one-cell shift in any of the four directions, or a rotation about the
//! grid center by plus or minus `rotation_degrees`. All moves wrap toroidally.

use rand::prelude::*;

use crate::schema::DriftConfig;

use super::LatticeState;

/// A single drift move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftMove {
    Up,
    Down,
    Left,
    Right,
    RotateCounterClockwise,
    RotateClockwise,
}

impl DriftMove {
    pub const ALL: [DriftMove; 6] = [
        DriftMove::Up,
        DriftMove::Down,
        DriftMove::Left,
        DriftMove::Right,
        DriftMove::RotateCounterClockwise,
        DriftMove::RotateClockwise,
    ];

    /// Apply this move to the lattice.
    pub fn apply(self, lattice: &mut LatticeState, rotation_degrees: f32) {
        match self {
            DriftMove::Up => lattice.remap(|x, y| (x, y + 1)),
            DriftMove::Down => lattice.remap(|x, y| (x, y - 1)),
            DriftMove::Left => lattice.remap(|x, y| (x + 1, y)),
            DriftMove::Right => lattice.remap(|x, y| (x - 1, y)),
            DriftMove::RotateCounterClockwise => rotate(lattice, rotation_degrees.to_radians()),
            DriftMove::RotateClockwise => rotate(lattice, -rotation_degrees.to_radians()),
        }
    }
}

/// Rotate the lattice by `angle` radians about its center (nearest-neighbor).
pub fn rotate(lattice: &mut LatticeState, angle: f32) {
    let (sin_a, cos_a) = angle.sin_cos();
    let cx = lattice.width() as f32 / 2.0;
    let cy = lattice.height() as f32 / 2.0;

    lattice.remap(|x, y| {
        let rx = x as f32 - cx;
        let ry = y as f32 - cy;
        let src_x = rx * cos_a + ry * sin_a + cx;
        let src_y = -rx * sin_a + ry * cos_a + cy;
        (src_x.round() as i64, src_y.round() as i64)
    });
}

/// Drift scheduler with its own random source.
pub struct Drift {
    config: DriftConfig,
    rng: StdRng,
}

impl Drift {
    /// Create from seed.
    pub fn new(config: DriftConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn from_entropy(config: DriftConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    /// Apply a random move if the lattice has just completed an interval.
    pub fn maybe_apply(&mut self, lattice: &mut LatticeState) -> Option<DriftMove> {
        let interval = self.config.interval_steps;
        let steps = lattice.steps();
        if interval == 0 || steps == 0 || steps % interval != 0 {
            return None;
        }

        let mv = DriftMove::ALL[self.rng.gen_range(0..DriftMove::ALL.len())];
        log::trace!("drift at step {steps}: {mv:?}");
        mv.apply(lattice, self.config.rotation_degrees);
        Some(mv)
    }
}
