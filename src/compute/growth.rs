//! Growth function for Lenia Trails.
//!
//! The growth function determines how a cell reacts to its neighborhood aggregate.

use crate::schema::GrowthParams;

/// Smallest width used by the growth function.
const MIN_SIGMA: f32 = f32::EPSILON;

#[inline]
fn effective_sigma(sigma: f32) -> f32 {
    if sigma.is_nan() || sigma <= 0.0 {
        MIN_SIGMA
    } else {
        sigma
    }
}

/// Compute growth function: G(n; m, s) = 2 * max(1 - (n - m)^2 / (9 s^2), 0)^4 - 1
///
/// Output range: [-1, 1]
/// - Returns 1.0 when n == m
/// - Returns -1.0 once |n - m| >= 3s
#[inline]
pub fn growth(n: f32, mu: f32, sigma: f32) -> f32 {
    let sigma = effective_sigma(sigma);
    let diff = n - mu;
    let frac = diff * diff / (9.0 * sigma * sigma);
    let inner = (1.0 - frac).max(0.0);
    2.0 * inner.powi(4) - 1.0
}

impl GrowthParams {
    /// Evaluate the growth function at `n`.
    #[inline]
    pub fn apply(&self, n: f32) -> f32 {
        growth(n, self.mu, self.sigma)
    }
}

/// Growth function applied to an entire grid of aggregates, in place.
pub fn growth_grid_inplace(grid: &mut [f32], params: &GrowthParams) {
    for v in grid.iter_mut() {
        *v = params.apply(*v);
    }
}
