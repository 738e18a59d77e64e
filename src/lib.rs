//! Flat papercraft envelopes for rectangular boxes.
//!
//! Given a box's width, height and depth in millimetres, this crate builds
//! the cut contour of an envelope that folds around it: four flaps around
//! the box footprint, joined at the corners by plain folds or interlocking
//! tabs. The result goes to a [`sink::DrawingSink`]; [`sink::svg::SvgFile`]
//! writes it as SVG with cut lines and perforation lines kept apart.
//!
//! ```
//! use box_envelope::{BoxDimensions, CornerStyle, envelope_svg};
//!
//! let svg = envelope_svg(&BoxDimensions::new(100.0, 60.0, 20.0), &CornerStyle::tabbed()).unwrap();
//! assert!(svg.contains("class=\"cut\""));
//! ```

pub mod envelope;
pub mod errors;
pub mod log;
pub mod sink;
pub mod types;

use std::path::Path;

pub use envelope::{CornerStyle, Envelope, EnvelopeConfig, assemble};
pub use errors::{EnvelopeError, Result};
pub use sink::svg::{SvgFile, SvgOptions};
pub use sink::{Drawing, DrawingSink, StrokeClass};
pub use types::{BoxDimensions, Length};

/// Render an envelope with the default configuration to an SVG string.
pub fn envelope_svg(dimensions: &BoxDimensions, corner_style: &CornerStyle) -> Result<String> {
    let mut drawing = Drawing::new();
    assemble(dimensions, corner_style, &EnvelopeConfig::default(), &mut drawing)?;
    Ok(sink::svg::render_svg(&drawing, &SvgOptions::default()))
}

/// Build an envelope and write it to `path` as SVG.
///
/// Nothing is written when the dimensions are rejected.
pub fn write_envelope(
    path: impl AsRef<Path>,
    dimensions: &BoxDimensions,
    corner_style: &CornerStyle,
    config: &EnvelopeConfig,
    options: SvgOptions,
) -> Result<Envelope> {
    let mut file = SvgFile::new(path.as_ref(), SvgOptions { scale: config.scale, ..options });
    let envelope = assemble(dimensions, corner_style, config, &mut file)?;
    file.save()?;
    crate::log::info!(path = %path.as_ref().display(), %dimensions, "envelope written");
    Ok(envelope)
}
