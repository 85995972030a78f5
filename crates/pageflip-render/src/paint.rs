#![forbid(unsafe_code)]

//! Colors and paints for fold drawing.

use kurbo::Point;
use smallvec::SmallVec;

/// Straight-alpha RGBA color with 8-bit channels and a fractional alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `[0, 1]`.
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0.0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Opaque color from `0xRRGGBB`.
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Same color with alpha replaced, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) },
            ..self
        }
    }
}

/// One stop of a gradient; `offset` is in `[0, 1]` along the gradient line.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

impl ColorStop {
    #[must_use]
    pub const fn new(offset: f64, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Horizontal or arbitrary linear gradient between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: SmallVec<[ColorStop; 4]>,
}

impl LinearGradient {
    #[must_use]
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            stops: SmallVec::new(),
        }
    }

    /// Append a stop (builder pattern).
    #[must_use]
    pub fn with_stop(mut self, offset: f64, color: Rgba) -> Self {
        self.stops.push(ColorStop::new(offset, color));
        self
    }

    /// Append several stops at once.
    #[must_use]
    pub fn with_stops(mut self, stops: &[ColorStop]) -> Self {
        self.stops.extend_from_slice(stops);
        self
    }
}

/// Fill or stroke source.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Self::Solid(color)
    }
}

impl From<LinearGradient> for Paint {
    fn from(gradient: LinearGradient) -> Self {
        Self::Linear(gradient)
    }
}
