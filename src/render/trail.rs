//! Persistent RGB trail buffer with exponential blending.

/// Owns the displayed RGB buffer and blends new frames into it.
#[derive(Debug, Clone)]
pub struct TrailCompositor {
    buffer: Vec<u8>,
    width: usize,
    height: usize,
}

impl TrailCompositor {
    /// Create an all-black trail of `width * height` RGB pixels.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buffer: vec![0; width * height * 3],
            width,
            height,
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

    /// The blended RGB buffer, 3 bytes per pixel, row-major.
    #[inline]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Blend `frame` into the trail: `trail = decay * trail + (1 - decay) * frame`.
    ///
    /// `decay` is clamped to [0, 1]; NaN keeps the trail unchanged.
    pub fn blend(&mut self, frame: &[u8], decay: f32) {
        let decay = if decay.is_nan() {
            1.0
        } else {
            decay.clamp(0.0, 1.0)
        };
        let fresh = 1.0 - decay;

        for (t, &c) in self.buffer.iter_mut().zip(frame) {
            let blended = decay * *t as f32 + fresh * c as f32;
            *t = blended.clamp(0.0, 255.0) as u8;
        }
    }

    /// Reset every channel to zero.
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// True when every channel is zero.
    pub fn is_clear(&self) -> bool {
        self.buffer.iter().all(|&c| c == 0)
    }
}
