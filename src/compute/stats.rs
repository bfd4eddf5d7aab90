//! Lattice statistics for monitoring.

use serde::{Deserialize, Serialize};

use super::{ACTIVATION_CAP, LatticeState};

/// Activations above this count as active cells.
const ACTIVE_THRESHOLD: f32 = 1e-6;

/// Simulation statistics for monitoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub total_activation: f32,
    pub max_value: f32,
    pub min_value: f32,
    pub mean_value: f32,
    pub active_cells: usize,
}

impl SimulationStats {
    /// Compute statistics from a lattice.
    pub fn from_lattice(lattice: &LatticeState) -> Self {
        let mut total_activation = 0.0f32;
        let mut max_value = f32::NEG_INFINITY;
        let mut min_value = f32::INFINITY;
        let mut active_cells = 0usize;

        let values = lattice.values();
        for &v in values {
            total_activation += v;
            max_value = max_value.max(v);
            min_value = min_value.min(v);
            if v > ACTIVE_THRESHOLD {
                active_cells += 1;
            }
        }

        if values.is_empty() {
            return Self {
                total_activation: 0.0,
                max_value: 0.0,
                min_value: 0.0,
                mean_value: 0.0,
                active_cells: 0,
            };
        }

        Self {
            total_activation,
            max_value,
            min_value,
            mean_value: total_activation / values.len() as f32,
            active_cells,
        }
    }

    /// True when no cell is active.
    pub fn is_extinct(&self) -> bool {
        self.active_cells == 0
    }

    /// Fraction of the maximum possible total activation.
    pub fn saturation(&self, cells: usize) -> f32 {
        if cells == 0 {
            return 0.0;
        }
        self.total_activation / (ACTIVATION_CAP * cells as f32)
    }
}
