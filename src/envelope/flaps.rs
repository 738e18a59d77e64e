//! Flap outlines in their canonical orientation.
//!
//! A flap starts at the local origin on the fold edge and grows towards +y
//! (top/bottom family) or +x (left/right family). The apex reaches half way
//! across the box plus the overlap, so opposite flaps meet and overlap.

use glam::{DVec2, dvec2};

use super::defaults;

/// Number of points in every flap outline
pub const FLAP_POINTS: usize = 5;

/// Proportions of one flap family, relative to the inner rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlapShape {
    /// Fraction of the inner height the apex extends past the box midline
    pub overlap: f64,
    /// Fraction of the inner width the shoulders sit in from the corners
    pub inset: f64,
}

impl FlapShape {
    pub const TOP_BOTTOM: FlapShape = FlapShape {
        overlap: defaults::TOP_BOTTOM_OVERLAP,
        inset: defaults::TOP_BOTTOM_INSET,
    };

    pub const LEFT_RIGHT: FlapShape = FlapShape {
        overlap: defaults::LEFT_RIGHT_OVERLAP,
        inset: defaults::LEFT_RIGHT_INSET,
    };
}

/// Flap folding over the top or bottom edge.
///
/// Runs from `(0, 0)` to `(inner_width, 0)` with the apex at the horizontal
/// midpoint.
pub fn top_bottom_flap(inner_width: f64, inner_height: f64, shape: FlapShape) -> Vec<DVec2> {
    let rise = shape.overlap * inner_height;
    let inset = shape.inset * inner_width;
    vec![
        dvec2(0.0, 0.0),
        dvec2(inset, rise),
        dvec2(inner_width / 2.0, inner_height / 2.0 + rise),
        dvec2(inner_width - inset, rise),
        dvec2(inner_width, 0.0),
    ]
}

/// Flap folding over the left or right edge.
///
/// Runs from `(0, 0)` to `(0, inner_height)` with the apex at the vertical
/// midpoint.
pub fn left_right_flap(inner_width: f64, inner_height: f64, shape: FlapShape) -> Vec<DVec2> {
    let rise = shape.overlap * inner_height;
    let inset = shape.inset * inner_width;
    vec![
        dvec2(0.0, 0.0),
        dvec2(rise, inset),
        dvec2(rise + inner_width / 2.0, inner_height / 2.0),
        dvec2(rise, inner_height - inset),
        dvec2(0.0, inner_height),
    ]
}
