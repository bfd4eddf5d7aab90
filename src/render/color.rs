//! Activation to color mapping through a piecewise-linear gradient.

use crate::schema::{Palette, Rgb};

/// Color for cells with no activation.
pub const BACKGROUND: Rgb = [0, 0, 0];

/// Interpolate one channel, staying within the two endpoint values.
#[inline]
fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    let (a, b) = (a as f32, b as f32);
    let value = a + t * (b - a);
    value.clamp(a.min(b), a.max(b)) as u8
}

impl Palette {
    /// Sample the gradient at `value`.
    ///
    /// Values at or beyond the end stops take the end colors; values between
    /// two stops interpolate linearly, with channels truncated to integers.
    pub fn sample(&self, value: f32) -> Rgb {
        let stops = self.stops();
        let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
            return BACKGROUND;
        };

        if value <= first.position {
            return first.color();
        }
        if value >= last.position {
            return last.color();
        }

        for pair in stops.windows(2) {
            let (left, right) = (&pair[0], &pair[1]);
            if value <= right.position {
                let t = ((value - left.position) / (right.position - left.position)).clamp(0.0, 1.0);
                return [
                    lerp_channel(left.r, right.r, t),
                    lerp_channel(left.g, right.g, t),
                    lerp_channel(left.b, right.b, t),
                ];
            }
        }

        last.color()
    }
}

/// Maps activations to RGB using a [`Palette`].
#[derive(Debug, Clone, Default)]
pub struct ColorMapper {
    palette: Palette,
}

impl ColorMapper {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Color for an activation. Zero (and anything not positive) is always
    /// the black background, whatever the gradient starts with.
    #[inline]
    pub fn map(&self, value: f32) -> Rgb {
        if value > 0.0 {
            self.palette.sample(value)
        } else {
            BACKGROUND
        }
    }

    /// Fill an RGB byte frame (3 bytes per cell) from activations.
    pub fn render(&self, values: &[f32], frame: &mut [u8]) {
        for (pixel, &v) in frame.chunks_exact_mut(3).zip(values) {
            pixel.copy_from_slice(&self.map(v));
        }
    }
}
