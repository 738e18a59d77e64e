//! Geometry configuration passed into the assembler

use super::defaults;
use super::flaps::FlapShape;
use crate::errors::{EnvelopeError, Result};
use crate::types::Scaler;

/// Immutable settings for one envelope construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeConfig {
    /// Millimetres → drawing units
    pub scale: Scaler,
    pub top_bottom: FlapShape,
    pub left_right: FlapShape,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            scale: Scaler::new(defaults::PX_PER_MM),
            top_bottom: FlapShape::TOP_BOTTOM,
            left_right: FlapShape::LEFT_RIGHT,
        }
    }
}

impl EnvelopeConfig {
    /// Replace the scale factor, validating it first.
    pub fn with_scale(self, px_per_mm: f64) -> Result<Self> {
        let scale = Scaler::try_new(px_per_mm)
            .map_err(|reason| EnvelopeError::InvalidScale { value: px_per_mm, reason })?;
        Ok(Self { scale, ..self })
    }
}
