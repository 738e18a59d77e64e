//! Error types with rich diagnostics using miette

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::types::{Length, NumericError};

// ============================================================================
// Geometry Errors
// ============================================================================

/// Everything that can stop an envelope from being generated
#[derive(Error, Diagnostic, Debug)]
pub enum EnvelopeError {
    #[error("invalid box {name}: {value} mm ({reason})")]
    #[diagnostic(
        code(box_envelope::geometry::invalid_dimension),
        help("width, height and depth must be finite, greater than zero and small enough to draw")
    )]
    InvalidDimension {
        name: &'static str,
        value: f64,
        reason: NumericError,
    },

    #[error("tab of {tab_width} mm (offset {tab_offset} mm) does not fit a {depth} mm deep corner")]
    #[diagnostic(
        code(box_envelope::geometry::invalid_tab),
        help("tabs need a width below the depth and an offset below half the depth")
    )]
    InvalidTab {
        tab_width: Length,
        tab_offset: Length,
        depth: Length,
    },

    #[error("invalid tab {name}: {value} mm ({reason})")]
    #[diagnostic(code(box_envelope::geometry::invalid_tab_size))]
    InvalidTabSize {
        name: &'static str,
        value: f64,
        reason: NumericError,
    },

    #[error("invalid scale factor: {value} ({reason})")]
    #[diagnostic(code(box_envelope::config::invalid_scale))]
    InvalidScale { value: f64, reason: NumericError },

    // ========================================================================
    // Sink Errors
    // ========================================================================
    #[error("could not write drawing to {}", path.display())]
    #[diagnostic(
        code(box_envelope::sink::io),
        help("check that the directory exists and is writable")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("drawing was already saved")]
    #[diagnostic(code(box_envelope::sink::already_saved))]
    AlreadySaved,
}

pub type Result<T, E = EnvelopeError> = std::result::Result<T, E>;
