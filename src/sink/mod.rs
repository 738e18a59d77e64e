//! Drawing sinks: where the assembled geometry goes.
//!
//! The geometry code only talks to [`DrawingSink`]. [`Drawing`] keeps the
//! elements in memory; [`svg::SvgFile`] renders them and writes a file.

pub mod svg;

use glam::DVec2;

use crate::errors::Result;
use crate::types::{BBox, Rect};

/// Line class of an emitted element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrokeClass {
    /// Cut through the material
    Cut,
    /// Fold or perforation guide
    Perforation,
}

impl StrokeClass {
    /// CSS class name used in the SVG output
    pub fn as_str(self) -> &'static str {
        match self {
            StrokeClass::Cut => "cut",
            StrokeClass::Perforation => "perforation",
        }
    }
}

/// Capability for accepting vector primitives and persisting them
pub trait DrawingSink {
    fn add_rectangle(&mut self, origin: DVec2, size: DVec2, stroke: StrokeClass);

    fn add_line(&mut self, start: DVec2, end: DVec2, stroke: StrokeClass);

    fn add_path(&mut self, points: &[DVec2], stroke: StrokeClass);

    /// Persist everything added so far
    fn save(&mut self) -> Result<()>;
}

/// One primitive of a drawing
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Rect { rect: Rect, stroke: StrokeClass },
    Line { start: DVec2, end: DVec2, stroke: StrokeClass },
    Path { points: Vec<DVec2>, stroke: StrokeClass },
}

impl Element {
    pub fn stroke(&self) -> StrokeClass {
        match self {
            Element::Rect { stroke, .. }
            | Element::Line { stroke, .. }
            | Element::Path { stroke, .. } => *stroke,
        }
    }

    pub fn bbox(&self) -> BBox {
        match self {
            Element::Rect { rect, .. } => rect.bbox(),
            Element::Line { start, end, .. } => {
                let mut bb = BBox::new();
                bb.expand_point(*start);
                bb.expand_point(*end);
                bb
            }
            Element::Path { points, .. } => {
                let mut bb = BBox::new();
                bb.expand_points(points);
                bb
            }
        }
    }
}

/// In-memory drawing, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drawing {
    elements: Vec<Element>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.elements.iter().filter_map(|e| match e {
            Element::Rect { rect, .. } => Some(rect),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.elements.iter().filter_map(|e| match e {
            Element::Line { start, end, .. } => Some((*start, *end)),
            _ => None,
        })
    }

    pub fn paths(&self) -> impl Iterator<Item = &[DVec2]> {
        self.elements.iter().filter_map(|e| match e {
            Element::Path { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }

    /// Bounding box of every element
    pub fn bounds(&self) -> BBox {
        let mut bb = BBox::new();
        for element in &self.elements {
            bb.expand_bbox(&element.bbox());
        }
        bb
    }
}

impl DrawingSink for Drawing {
    fn add_rectangle(&mut self, origin: DVec2, size: DVec2, stroke: StrokeClass) {
        self.elements.push(Element::Rect { rect: Rect::new(origin, size), stroke });
    }

    fn add_line(&mut self, start: DVec2, end: DVec2, stroke: StrokeClass) {
        self.elements.push(Element::Line { start, end, stroke });
    }

    fn add_path(&mut self, points: &[DVec2], stroke: StrokeClass) {
        self.elements.push(Element::Path { points: points.to_vec(), stroke });
    }

    /// Nothing to persist; the elements stay available for inspection.
    fn save(&mut self) -> Result<()> {
        Ok(())
    }
}
