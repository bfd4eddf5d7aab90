//! Kernel generation for Lenia Trails.
//!
//! A kernel is a single smooth radial bump: `(4r(1 - r))^4` of the distance
//! normalized by the kernel radius, zero outside the radius.

/// Precomputed kernel grid ready for convolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// 2D kernel values, row-major.
    pub data: Vec<f32>,
    /// Kernel size (diameter), always odd.
    pub size: usize,
    /// Radius the kernel was derived from.
    pub radius: f32,
}

/// Errors constructing a kernel from raw weights.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    #[error("Kernel size {0} must be odd")]
    EvenSize(usize),
    #[error("Kernel of size {size} needs {expected} weights, got {actual}")]
    WeightCount {
        size: usize,
        expected: usize,
        actual: usize,
    },
}

/// Radial bump profile for a normalized distance in [0, 1].
#[inline]
fn bump(rr: f32) -> f32 {
    let b = (4.0 * rr * (1.0 - rr)).max(0.0);
    b.powi(4)
}

impl Kernel {
    /// Build a normalized kernel for `radius`.
    ///
    /// The kernel side is `2 * floor(radius) + 1`. Weights sum to 1 unless
    /// every weight is zero (radius <= 1), in which case the kernel is left
    /// all zero and convolution with it produces no neighborhood signal.
    pub fn build(radius: f32) -> Self {
        let half = if radius.is_finite() && radius > 0.0 {
            radius.floor() as usize
        } else {
            0
        };
        let size = half * 2 + 1;
        let center = half as f32;

        let mut data = vec![0.0f32; size * size];
        let mut sum = 0.0f64;

        if half > 0 {
            for y in 0..size {
                for x in 0..size {
                    let dx = x as f32 - center;
                    let dy = y as f32 - center;
                    let rr = (dx * dx + dy * dy).sqrt() / radius;

                    if rr > 1.0 {
                        continue;
                    }

                    let value = bump(rr);
                    data[y * size + x] = value;
                    sum += value as f64;
                }
            }
        }

        if sum > 0.0 {
            for v in &mut data {
                *v = (*v as f64 / sum) as f32;
            }
        } else {
            log::warn!("kernel radius {radius} has no support, leaving weights at zero");
        }

        Self { data, size, radius }
    }

    /// Build a kernel from explicit row-major weights.
    pub fn from_weights(size: usize, data: Vec<f32>) -> Result<Self, KernelError> {
        if size % 2 == 0 {
            return Err(KernelError::EvenSize(size));
        }
        let expected = size * size;
        if data.len() != expected {
            return Err(KernelError::WeightCount {
                size,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            size,
            radius: (size / 2) as f32,
        })
    }

    /// Integer half-width `R`.
    #[inline]
    pub fn half_size(&self) -> usize {
        self.size / 2
    }

    /// Get kernel value at (x, y) position.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.size + x]
    }

    /// Weight at offset (dx, dy) from the center, zero outside the kernel.
    pub fn weight_at(&self, dx: i32, dy: i32) -> f32 {
        let half = self.half_size() as i32;
        if dx.abs() > half || dy.abs() > half {
            return 0.0;
        }
        self.get((dx + half) as usize, (dy + half) as usize)
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// True when every weight is zero.
    pub fn is_degenerate(&self) -> bool {
        self.data.iter().all(|&w| w == 0.0)
    }
}
