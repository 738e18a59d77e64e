//! Strongly-typed numeric primitives for box-envelope.
//!
//! - Physical measurements are `Length` (millimetres), never raw `f64`
//! - Conversion to drawing units only via `Scaler`
//! - Drawing-space points are `glam::DVec2`

use std::fmt;
use std::ops::Mul;

use glam::DVec2;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
    /// Value overflows once converted to drawing units
    TooLarge,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
            NumericError::TooLarge => write!(f, "value is too large to draw"),
        }
    }
}

impl std::error::Error for NumericError {}

fn check_positive(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else if val == 0.0 {
        Err(NumericError::Zero)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Length in millimetres (the physical unit of every input)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Length(pub f64);

impl Length {
    /// Create a Length from millimetres (const-friendly, unchecked).
    /// Use `try_positive` for user-provided values.
    #[inline]
    pub const fn mm(val: f64) -> Length {
        Length(val)
    }

    /// Create a strictly positive, finite Length
    #[inline]
    pub fn try_positive(val: f64) -> Result<Length, NumericError> {
        check_positive(val).map(Length)
    }

    /// Get the raw value in millimetres
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Length { Length(self.0 * rhs) }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Convert millimetres → drawing units (px).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scaler {
    px_per_mm: f64,
}

impl Scaler {
    /// Create a new Scaler (unchecked).
    /// Use `try_new` for user-provided values.
    pub const fn new(px_per_mm: f64) -> Self { Scaler { px_per_mm } }

    /// Create a Scaler with validation (rejects NaN, infinite, zero, negative)
    pub fn try_new(px_per_mm: f64) -> Result<Self, NumericError> {
        check_positive(px_per_mm).map(Scaler::new)
    }

    /// Pixels per millimetre
    #[inline]
    pub fn factor(&self) -> f64 { self.px_per_mm }

    /// Convert a length in millimetres to raw f64 pixels.
    #[inline]
    pub fn px(&self, l: Length) -> f64 { l.0 * self.px_per_mm }

    /// Convert a pixel distance back to millimetres.
    #[inline]
    pub fn mm(&self, px: f64) -> Length { Length(px / self.px_per_mm) }
}

/// Width, height and depth of the box being wrapped
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxDimensions {
    pub width: Length,
    pub height: Length,
    pub depth: Length,
}

impl BoxDimensions {
    /// Build dimensions from raw millimetre values, unchecked.
    ///
    /// Validation happens in the assembler so that every entry point
    /// reports the same diagnostic.
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        BoxDimensions {
            width: Length::mm(width),
            height: Length::mm(height),
            depth: Length::mm(depth),
        }
    }

    /// Named fields in reporting order
    pub fn fields(&self) -> [(&'static str, Length); 3] {
        [("width", self.width), ("height", self.height), ("depth", self.depth)]
    }
}

impl fmt::Display for BoxDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w:{} h:{} d:{}", self.width, self.height, self.depth)
    }
}

/// Stroke colour, kept as written on the command line
#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    Named(String),
    Rgb(u8, u8, u8),
}

impl Color {
    pub fn named(name: &str) -> Self {
        Color::Named(name.to_string())
    }
}

impl std::str::FromStr for Color {
    type Err = String;

    /// Accepts `#rrggbb`, `#rgb` or a bare colour keyword.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(format!("invalid hex colour: {s}"));
            }
            let digit = |range: std::ops::Range<usize>, repeat: bool| {
                u8::from_str_radix(&hex[range], 16)
                    .map(|v| if repeat { v * 17 } else { v })
                    .map_err(|_| format!("invalid hex colour: {s}"))
            };
            return match hex.len() {
                6 => Ok(Color::Rgb(digit(0..2, false)?, digit(2..4, false)?, digit(4..6, false)?)),
                3 => Ok(Color::Rgb(digit(0..1, true)?, digit(1..2, true)?, digit(2..3, true)?)),
                _ => Err(format!("invalid hex colour: {s}")),
            };
        }
        if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Color::Named(s.to_ascii_lowercase()))
        } else {
            Err(format!("unrecognised colour: {s}"))
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(s) => write!(f, "{}", s),
            Color::Rgb(r, g, b) => write!(f, "rgb({},{},{})", r, g, b),
        }
    }
}

/// Axis-aligned bounding box in drawing units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: DVec2::splat(f64::MAX),
            max: DVec2::splat(f64::MIN),
        }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Expand to include every point of a sequence
    pub fn expand_points(&mut self, points: &[DVec2]) {
        for &p in points {
            self.expand_point(p);
        }
    }

    /// Expand to include another box
    pub fn expand_bbox(&mut self, other: &BBox) {
        if !other.is_empty() {
            self.expand_point(other.min);
            self.expand_point(other.max);
        }
    }

    /// Size as a vector (width, height)
    pub fn size(&self) -> DVec2 { self.max - self.min }

    /// Get the center point
    pub fn center(&self) -> DVec2 { (self.min + self.max) / 2.0 }

    /// True when `other` lies inside this box without touching its edges
    pub fn strictly_contains(&self, other: &BBox) -> bool {
        other.min.x > self.min.x
            && other.min.y > self.min.y
            && other.max.x < self.max.x
            && other.max.y < self.max.y
    }
}

/// Rectangle given by its top-left corner and size (y grows downwards)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub origin: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(origin: DVec2, size: DVec2) -> Self {
        Rect { origin, size }
    }

    pub fn bbox(&self) -> BBox {
        let mut bb = BBox::new();
        bb.expand_point(self.origin);
        bb.expand_point(self.origin + self.size);
        bb
    }

    pub fn center(&self) -> DVec2 {
        self.origin + self.size / 2.0
    }
}
