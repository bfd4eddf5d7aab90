//! Color gradient definitions.

use serde::{Deserialize, Serialize};

/// An RGB triple.
pub type Rgb = [u8; 3];

/// A single gradient stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position along the gradient (0.0-1.0).
    pub position: f32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorStop {
    pub const fn new(position: f32, r: u8, g: u8, b: u8) -> Self {
        Self { position, r, g, b }
    }

    #[inline]
    pub fn color(&self) -> Rgb {
        [self.r, self.g, self.b]
    }
}

/// Ordered sequence of color stops with strictly increasing positions.
///
/// Deserialization goes through [`Palette::new`], so a loaded palette is
/// always valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColorStop>", into = "Vec<ColorStop>")]
pub struct Palette {
    stops: Vec<ColorStop>,
}

impl Palette {
    /// Create a palette, validating stop order.
    pub fn new(stops: Vec<ColorStop>) -> Result<Self, PaletteError> {
        let palette = Self { stops };
        palette.validate()?;
        Ok(palette)
    }

    /// The 18-color spectrum palette.
    pub fn spectrum() -> Self {
        Self {
            stops: vec![
                ColorStop::new(0.0000, 0xFF, 0x00, 0x00),
                ColorStop::new(0.0588, 0xFF, 0x00, 0x80),
                ColorStop::new(0.1176, 0xFF, 0x80, 0x80),
                ColorStop::new(0.1764, 0xFF, 0x80, 0x00),
                ColorStop::new(0.2352, 0x00, 0xFF, 0x80),
                ColorStop::new(0.2941, 0x80, 0xFF, 0x80),
                ColorStop::new(0.3529, 0x00, 0xFF, 0x00),
                ColorStop::new(0.4117, 0x00, 0xFF, 0xFF),
                ColorStop::new(0.4705, 0x80, 0x00, 0xFF),
                ColorStop::new(0.5294, 0xFF, 0x80, 0xFF),
                ColorStop::new(0.5882, 0x00, 0x00, 0x00),
                ColorStop::new(0.6470, 0x00, 0x80, 0xFF),
                ColorStop::new(0.7058, 0x80, 0x80, 0xFF),
                ColorStop::new(0.7647, 0xFF, 0x00, 0xFF),
                ColorStop::new(0.8235, 0x80, 0xFF, 0x00),
                ColorStop::new(0.8823, 0x80, 0xFF, 0xFF),
                ColorStop::new(0.9411, 0x00, 0x00, 0x00),
                ColorStop::new(1.0000, 0x00, 0x00, 0x00),
            ],
        }
    }

    /// Stops in ascending position order. Never empty.
    #[inline]
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Check stop count, range and ordering.
    pub fn validate(&self) -> Result<(), PaletteError> {
        if self.stops.is_empty() {
            return Err(PaletteError::Empty);
        }
        for (index, stop) in self.stops.iter().enumerate() {
            if !(0.0..=1.0).contains(&stop.position) {
                return Err(PaletteError::PositionOutOfRange {
                    index,
                    position: stop.position,
                });
            }
        }
        for (index, pair) in self.stops.windows(2).enumerate() {
            if pair[1].position <= pair[0].position {
                return Err(PaletteError::NotIncreasing { index: index + 1 });
            }
        }
        Ok(())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::spectrum()
    }
}

impl TryFrom<Vec<ColorStop>> for Palette {
    type Error = PaletteError;

    fn try_from(stops: Vec<ColorStop>) -> Result<Self, Self::Error> {
        Self::new(stops)
    }
}

impl From<Palette> for Vec<ColorStop> {
    fn from(palette: Palette) -> Self {
        palette.stops
    }
}

/// Palette validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaletteError {
    #[error("Palette must contain at least one color stop")]
    Empty,
    #[error("Color stop {index} has position {position} outside [0, 1]")]
    PositionOutOfRange { index: usize, position: f32 },
    #[error("Color stop {index} does not increase in position")]
    NotIncreasing { index: usize },
}
