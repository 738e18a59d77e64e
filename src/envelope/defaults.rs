//! Default tuning constants (physical values in millimetres)

use crate::types::Length;

/// 96 dpi expressed per millimetre
pub const PX_PER_MM: f64 = 3.7795275590551;

/// Top/bottom flaps: 5 mm overlap on a 75 mm reference box
pub const TOP_BOTTOM_OVERLAP: f64 = 5.0 / 75.0;
/// Top/bottom flaps: 2 mm shoulder inset on a 75 mm reference box
pub const TOP_BOTTOM_INSET: f64 = 2.0 / 75.0;
/// Left/right flaps: 5 mm overlap on a 50 mm reference box
pub const LEFT_RIGHT_OVERLAP: f64 = 5.0 / 50.0;
/// Left/right flaps run the full edge height
pub const LEFT_RIGHT_INSET: f64 = 0.0;

pub const TAB_WIDTH: Length = Length::mm(10.0);
pub const TAB_OFFSET: Length = Length::mm(3.0);

pub const CUT_COLOR: &str = "red";
pub const PERFORATION_COLOR: &str = "green";
/// Stroke width in drawing units
pub const STROKE_WIDTH: f64 = 1.0;
/// Dash pattern for perforation lines, in drawing units
pub const PERFORATION_DASH: [f64; 2] = [6.0, 3.0];

pub const OUTPUT_FILE: &str = "envelope.svg";
