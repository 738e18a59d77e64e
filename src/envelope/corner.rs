//! Corner connectors joining adjacent flaps.
//!
//! Every corner is described by a [`CornerFrame`]: the inner-rectangle
//! corner `C`, the unit direction of the cut edge arriving at it and the
//! unit direction of the edge leaving it. The incoming flap ends at
//! `C - depth * incoming`, the outgoing flap starts at `C + depth * outgoing`,
//! and the square between them is waste.

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use super::defaults;
use crate::errors::{EnvelopeError, Result};
use crate::sink::{DrawingSink, StrokeClass};
use crate::types::{Length, Scaler};

/// Screen-space unit directions (y grows downwards)
pub const RIGHT: DVec2 = DVec2::new(1.0, 0.0);
pub const LEFT: DVec2 = DVec2::new(-1.0, 0.0);
pub const DOWN: DVec2 = DVec2::new(0.0, 1.0);
pub const UP: DVec2 = DVec2::new(0.0, -1.0);

/// Position and orientation of one corner of the cut contour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerFrame {
    /// Inner-rectangle corner (the plain fold point)
    pub corner: DVec2,
    /// Direction of the edge arriving at `corner`
    pub incoming: DVec2,
    /// Direction of the edge leaving `corner`
    pub outgoing: DVec2,
    /// Depth border in drawing units
    pub depth: f64,
}

impl CornerFrame {
    /// The four corners of an inner rectangle, clockwise from top-right.
    pub fn clockwise(inner_origin: DVec2, inner_size: DVec2, depth: f64) -> [CornerFrame; 4] {
        let frame = |corner, incoming, outgoing| CornerFrame { corner, incoming, outgoing, depth };
        [
            frame(inner_origin + DVec2::new(inner_size.x, 0.0), DOWN, RIGHT),
            frame(inner_origin + inner_size, LEFT, DOWN),
            frame(inner_origin + DVec2::new(0.0, inner_size.y), UP, LEFT),
            frame(inner_origin, RIGHT, UP),
        ]
    }

    /// Last point of the flap arriving at this corner
    pub fn flap_end(&self) -> DVec2 {
        self.corner - self.incoming * self.depth
    }

    /// First point of the flap leaving this corner
    pub fn flap_start(&self) -> DVec2 {
        self.corner + self.outgoing * self.depth
    }
}

/// Contour points for one corner plus an optional fold guide
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub points: Vec<DVec2>,
    pub fold: Option<(DVec2, DVec2)>,
}

#[enum_dispatch]
pub trait Connector {
    /// Reject settings that cannot fit a corner square of `depth`
    fn validate(&self, depth: Length) -> Result<()>;

    /// Points inserted between the two flaps meeting at `frame`
    fn connect(&self, frame: &CornerFrame, scaler: &Scaler) -> Connection;
}

/// Single fold point at the corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlainCorner;

impl Connector for PlainCorner {
    fn validate(&self, _depth: Length) -> Result<()> {
        Ok(())
    }

    fn connect(&self, frame: &CornerFrame, _scaler: &Scaler) -> Connection {
        Connection { points: vec![frame.corner], fold: None }
    }
}

/// Interlocking tab hanging off the incoming wall into the corner square
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabbedCorner {
    /// How far the tab projects past its fold line
    pub width: Length,
    /// Inset from both adjacent flap edges
    pub offset: Length,
}

impl Default for TabbedCorner {
    fn default() -> Self {
        Self { width: defaults::TAB_WIDTH, offset: defaults::TAB_OFFSET }
    }
}

impl Connector for TabbedCorner {
    fn validate(&self, depth: Length) -> Result<()> {
        for (name, value) in [("width", self.width), ("offset", self.offset)] {
            Length::try_positive(value.raw()).map_err(|reason| EnvelopeError::InvalidTabSize {
                name,
                value: value.raw(),
                reason,
            })?;
        }
        if self.width >= depth || self.offset * 2.0 >= depth {
            return Err(EnvelopeError::InvalidTab {
                tab_width: self.width,
                tab_offset: self.offset,
                depth,
            });
        }
        Ok(())
    }

    fn connect(&self, frame: &CornerFrame, scaler: &Scaler) -> Connection {
        let width = scaler.px(self.width);
        let offset = scaler.px(self.offset);
        let fold_start = frame.flap_end();
        let reach = frame.outgoing * width;

        Connection {
            points: vec![
                fold_start + frame.incoming * offset + reach,
                frame.corner - frame.incoming * offset + reach,
                frame.corner,
            ],
            fold: Some((fold_start, frame.corner)),
        }
    }
}

/// How the four corners are built
#[enum_dispatch(Connector)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CornerStyle {
    Plain(PlainCorner),
    Tabbed(TabbedCorner),
}

impl Default for CornerStyle {
    fn default() -> Self {
        CornerStyle::Plain(PlainCorner)
    }
}

impl CornerStyle {
    /// Tabs with the default width and offset
    pub fn tabbed() -> Self {
        CornerStyle::Tabbed(TabbedCorner::default())
    }

    pub fn is_tabbed(&self) -> bool {
        matches!(self, CornerStyle::Tabbed(_))
    }
}

/// Build one corner, sending its fold guide (if any) straight to the sink.
pub fn emit_corner<S: DrawingSink + ?Sized>(
    style: &CornerStyle,
    frame: &CornerFrame,
    scaler: &Scaler,
    sink: &mut S,
) -> Connection {
    let connection = style.connect(frame, scaler);
    if let Some((start, end)) = connection.fold {
        sink.add_line(start, end, StrokeClass::Perforation);
    }
    connection
}
