//! Point sequence transforms.
//!
//! Both transforms return a fresh sequence and leave their input untouched,
//! so a flap template can be placed any number of times.

use glam::DVec2;

/// Shift every point by `offset`.
pub fn translate(points: &[DVec2], offset: DVec2) -> Vec<DVec2> {
    points.iter().map(|&p| p + offset).collect()
}

/// Negate x when `flip_x`, y when `flip_y` (both: 180° rotation about the origin).
pub fn mirror(points: &[DVec2], flip_x: bool, flip_y: bool) -> Vec<DVec2> {
    let sign = DVec2::new(
        if flip_x { -1.0 } else { 1.0 },
        if flip_y { -1.0 } else { 1.0 },
    );
    points.iter().map(|&p| p * sign).collect()
}
