//! Lattice state and the toroidal convolution step.
//!
//! The lattice owns two activation grids. A step reads the live grid and
//! writes the idle one, then flips which grid is live; nothing is copied.
//!
//! # Complexity
//!
//! Direct convolution is O(N * K^2) per step where N is the cell count and
//! K is the kernel diameter.

use crate::schema::GrowthParams;

use super::{Kernel, growth_grid_inplace};

/// Upper bound for every activation value.
pub const ACTIVATION_CAP: f32 = 0.95;

/// Activation written inside the seed disk by [`LatticeState::reseed`].
pub const SEED_ACTIVATION: f32 = 0.8;

/// Wrap coordinate to periodic boundary.
#[inline]
pub(crate) fn wrap_coord(coord: i64, size: usize) -> usize {
    coord.rem_euclid(size as i64) as usize
}

/// Clamp an activation into `[0, ACTIVATION_CAP]`, mapping NaN to zero.
#[inline]
fn clamp_activation(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, ACTIVATION_CAP)
    }
}

/// Perform direct 2D convolution with periodic boundary conditions into
/// a pre-allocated buffer.
///
/// `output[y][x] = sum over (kx, ky) of kernel[ky + R][kx + R] * input[(y + ky) mod H][(x + kx) mod W]`
pub fn convolve_into(
    input: &[f32],
    kernel: &Kernel,
    width: usize,
    height: usize,
    output: &mut [f32],
) {
    let k_size = kernel.size;
    let k_half = kernel.half_size() as i64;
    let k_data = &kernel.data;

    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;

            for ky in 0..k_size {
                // Source row with periodic wrapping
                let row = wrap_coord(y as i64 + ky as i64 - k_half, height) * width;
                let k_row = &k_data[ky * k_size..(ky + 1) * k_size];

                for (kx, &k_val) in k_row.iter().enumerate() {
                    if k_val == 0.0 {
                        continue;
                    }
                    let sx = wrap_coord(x as i64 + kx as i64 - k_half, width);
                    sum += input[row + sx] * k_val;
                }
            }

            output[y * width + x] = sum;
        }
    }
}

/// Perform direct 2D convolution with periodic boundary conditions.
pub fn convolve(input: &[f32], kernel: &Kernel, width: usize, height: usize) -> Vec<f32> {
    let mut output = vec![0.0f32; width * height];
    convolve_into(input, kernel, width, height, &mut output);
    output
}

/// Double-buffered activation lattice on a torus.
#[derive(Debug, Clone)]
pub struct LatticeState {
    buffers: [Vec<f32>; 2],
    /// Index of the live buffer in `buffers`.
    live: usize,
    width: usize,
    height: usize,
    /// Steps taken since the last reseed.
    steps: u64,
}

impl LatticeState {
    /// Create an all-zero lattice.
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            buffers: [vec![0.0; size], vec![0.0; size]],
            live: 0,
            width,
            height,
            steps: 0,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Steps taken since the last reseed.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// The live activation grid, row-major.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.buffers[self.live]
    }

    /// Get value at (x, y).
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values()[y * self.width + x]
    }

    /// Set value at (x, y), clamped into the activation range.
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        let idx = y * self.width + x;
        self.buffers[self.live][idx] = clamp_activation(value);
    }

    /// Sum of all activations.
    pub fn total_activation(&self) -> f32 {
        self.values().iter().sum()
    }

    /// Zero both grids and place a disk of [`SEED_ACTIVATION`] at the center.
    ///
    /// A cell is inside the disk when its distance from `(W/2, H/2)` is
    /// strictly less than `seed_radius`.
    pub fn reseed(&mut self, seed_radius: f32) {
        for buffer in &mut self.buffers {
            buffer.fill(0.0);
        }
        self.live = 0;
        self.steps = 0;

        let cx = self.width as f32 / 2.0;
        let cy = self.height as f32 / 2.0;
        let width = self.width;

        for (idx, cell) in self.buffers[0].iter_mut().enumerate() {
            let dx = (idx % width) as f32 - cx;
            let dy = (idx / width) as f32 - cy;
            if (dx * dx + dy * dy).sqrt() < seed_radius {
                *cell = SEED_ACTIVATION;
            }
        }
    }

    /// Split into the live grid (read) and the idle grid (write).
    fn split_buffers(&mut self) -> (&[f32], &mut [f32]) {
        let [a, b] = &mut self.buffers;
        if self.live == 0 {
            (a.as_slice(), b.as_mut_slice())
        } else {
            (b.as_slice(), a.as_mut_slice())
        }
    }

    /// Perform one simulation step.
    ///
    /// The idle grid first receives the convolution, then the growth
    /// response of every aggregate, and finally
    /// `clamp(current + dt * growth, 0, cap)`.
    pub fn step(&mut self, kernel: &Kernel, growth: &GrowthParams, dt: f32) {
        let width = self.width;
        let height = self.height;
        let (current, next) = self.split_buffers();

        convolve_into(current, kernel, width, height, next);
        growth_grid_inplace(next, growth);

        for (n, &c) in next.iter_mut().zip(current.iter()) {
            *n = clamp_activation(c + dt * *n);
        }

        self.live ^= 1;
        self.steps += 1;
    }

    /// Run several steps with fixed parameters.
    pub fn run(&mut self, kernel: &Kernel, growth: &GrowthParams, dt: f32, steps: u64) {
        for _ in 0..steps {
            self.step(kernel, growth, dt);
        }
    }

    /// Rebuild the grid by sampling: each cell `(x, y)` takes the current
    /// value at `source(x, y)`. Coordinates are wrapped onto the torus.
    pub fn remap<F>(&mut self, source: F)
    where
        F: Fn(i64, i64) -> (i64, i64),
    {
        let width = self.width;
        let height = self.height;
        let (current, next) = self.split_buffers();

        for y in 0..height {
            for x in 0..width {
                let (sx, sy) = source(x as i64, y as i64);
                let sx = wrap_coord(sx, width);
                let sy = wrap_coord(sy, height);
                next[y * width + x] = current[sy * width + sx];
            }
        }

        self.live ^= 1;
    }
}
