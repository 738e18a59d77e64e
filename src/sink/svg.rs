//! SVG generation and the file-backed sink

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use glam::DVec2;
use tempfile::NamedTempFile;

use super::{Drawing, DrawingSink, Element, StrokeClass};
use crate::envelope::defaults;
use crate::errors::{EnvelopeError, Result};
use crate::types::{BBox, Color, Scaler};

/// Presentation settings for SVG output
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    pub cut_color: Color,
    pub perforation_color: Color,
    /// Stroke width in drawing units
    pub stroke_width: f64,
    /// Dash pattern for perforation strokes; `None` draws them solid
    pub perforation_dash: Option<[f64; 2]>,
    /// Used to express the document size in millimetres
    pub scale: Scaler,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            cut_color: Color::named(defaults::CUT_COLOR),
            perforation_color: Color::named(defaults::PERFORATION_COLOR),
            stroke_width: defaults::STROKE_WIDTH,
            perforation_dash: Some(defaults::PERFORATION_DASH),
            scale: Scaler::new(defaults::PX_PER_MM),
        }
    }
}

impl SvgOptions {
    fn color(&self, stroke: StrokeClass) -> &Color {
        match stroke {
            StrokeClass::Cut => &self.cut_color,
            StrokeClass::Perforation => &self.perforation_color,
        }
    }

    fn stroke_attrs(&self, stroke: StrokeClass) -> String {
        let mut attrs = format!(
            r#"class="{}" fill="none" stroke="{}" stroke-width="{}""#,
            stroke.as_str(),
            self.color(stroke),
            fmt_num(self.stroke_width)
        );
        if let (StrokeClass::Perforation, Some([on, off])) = (stroke, self.perforation_dash) {
            let _ = write!(attrs, r#" stroke-dasharray="{} {}""#, fmt_num(on), fmt_num(off));
        }
        attrs
    }
}

/// `d` attribute for a polyline; closed sequences end with `Z`.
pub fn path_data(points: &[DVec2]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{} {} {}", cmd, fmt_num(p.x), fmt_num(p.y));
    }
    if points.len() > 2 && points.first() == points.last() {
        d.push_str(" Z");
    }
    d
}

/// Render a drawing as a standalone SVG document.
///
/// The `viewBox` covers every element plus one stroke width of margin, so
/// flaps reaching past the outer rectangle stay visible.
pub fn render_svg(drawing: &Drawing, options: &SvgOptions) -> String {
    let mut bounds = drawing.bounds();
    if bounds.is_empty() {
        bounds = BBox { min: DVec2::ZERO, max: DVec2::ZERO };
    }
    let margin = DVec2::splat(options.stroke_width);
    let min = bounds.min - margin;
    let size = bounds.size() + margin * 2.0;

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}mm" height="{}mm" viewBox="{} {} {} {}">"#,
        fmt_num(options.scale.mm(size.x).raw()),
        fmt_num(options.scale.mm(size.y).raw()),
        fmt_num(min.x),
        fmt_num(min.y),
        fmt_num(size.x),
        fmt_num(size.y),
    );

    for element in drawing.elements() {
        let attrs = options.stroke_attrs(element.stroke());
        let _ = match element {
            Element::Rect { rect, .. } => writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
                fmt_num(rect.origin.x),
                fmt_num(rect.origin.y),
                fmt_num(rect.size.x),
                fmt_num(rect.size.y),
                attrs
            ),
            Element::Line { start, end, .. } => writeln!(
                out,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
                fmt_num(start.x),
                fmt_num(start.y),
                fmt_num(end.x),
                fmt_num(end.y),
                attrs
            ),
            Element::Path { points, .. } => {
                writeln!(out, r#"  <path d="{}" {}/>"#, path_data(points), attrs)
            }
        };
    }

    out.push_str("</svg>\n");
    out
}

/// Sink that renders to SVG and writes it to `path` on [`DrawingSink::save`].
///
/// The document is rendered in memory and written to a temporary file in
/// the target directory, which is then renamed over `path`.
#[derive(Debug)]
pub struct SvgFile {
    path: PathBuf,
    drawing: Drawing,
    options: SvgOptions,
    saved: bool,
}

impl SvgFile {
    pub fn new(path: impl Into<PathBuf>, options: SvgOptions) -> Self {
        Self {
            path: path.into(),
            drawing: Drawing::new(),
            options,
            saved: false,
        }
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    fn io_error(&self, source: std::io::Error) -> EnvelopeError {
        EnvelopeError::Io { path: self.path.clone(), source }
    }
}

impl DrawingSink for SvgFile {
    fn add_rectangle(&mut self, origin: DVec2, size: DVec2, stroke: StrokeClass) {
        self.drawing.add_rectangle(origin, size, stroke);
    }

    fn add_line(&mut self, start: DVec2, end: DVec2, stroke: StrokeClass) {
        self.drawing.add_line(start, end, stroke);
    }

    fn add_path(&mut self, points: &[DVec2], stroke: StrokeClass) {
        self.drawing.add_path(points, stroke);
    }

    fn save(&mut self) -> Result<()> {
        if self.saved {
            return Err(EnvelopeError::AlreadySaved);
        }
        let document = render_svg(&self.drawing, &self.options);

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(document.as_bytes()).map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        crate::log::debug!(path = %self.path.display(), bytes = document.len(), "wrote svg");
        self.saved = true;
        Ok(())
    }
}

/// Format a coordinate to at most 3 decimal places, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn fmt_num_trims_and_rounds() {
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(37.5), "37.5");
        assert_eq!(fmt_num(72.99999999999999), "73");
        assert_eq!(fmt_num(2.0 / 3.0), "0.667");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(10.0), "10");
        assert_eq!(fmt_num(-7.5), "-7.5");
        assert_eq!(fmt_num(1500000.0), "1500000");
    }

    #[test]
    fn fmt_num_keeps_precision_on_large_patterns() {
        assert_eq!(fmt_num(1234.5678), "1234.568");
        assert_eq!(fmt_num(98765.4321), "98765.432");
    }

    #[test]
    fn path_data_closes_repeated_start() {
        let open = [dvec2(0.0, 0.0), dvec2(1.0, 0.0), dvec2(1.0, 1.0)];
        assert_eq!(path_data(&open), "M 0 0 L 1 0 L 1 1");

        let closed = [dvec2(0.0, 0.0), dvec2(1.0, 0.0), dvec2(1.0, 1.0), dvec2(0.0, 0.0)];
        assert_eq!(path_data(&closed), "M 0 0 L 1 0 L 1 1 L 0 0 Z");
        assert_eq!(path_data(&[]), "");
    }

    #[test]
    fn render_uses_stroke_classes() {
        let mut d = Drawing::new();
        d.add_rectangle(dvec2(0.0, 0.0), dvec2(10.0, 20.0), StrokeClass::Perforation);
        d.add_path(&[dvec2(0.0, 0.0), dvec2(5.0, -5.0), dvec2(10.0, 0.0)], StrokeClass::Cut);

        let svg = render_svg(&d, &SvgOptions::default());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(
            r#"<rect x="0" y="0" width="10" height="20" class="perforation" fill="none" stroke="green" stroke-width="1" stroke-dasharray="6 3"/>"#
        ));
        assert!(svg.contains(
            r#"<path d="M 0 0 L 5 -5 L 10 0" class="cut" fill="none" stroke="red" stroke-width="1"/>"#
        ));
        assert!(svg.contains(r#"viewBox="-1 -6 12 27""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn render_solid_perforation_without_dash() {
        let mut d = Drawing::new();
        d.add_line(dvec2(0.0, 0.0), dvec2(1.0, 1.0), StrokeClass::Perforation);
        let options = SvgOptions { perforation_dash: None, ..SvgOptions::default() };
        assert!(!render_svg(&d, &options).contains("stroke-dasharray"));
    }

    #[test]
    fn document_size_is_in_millimetres() {
        let mut d = Drawing::new();
        d.add_rectangle(dvec2(1.0, 1.0), dvec2(38.0, 18.0), StrokeClass::Perforation);
        let options = SvgOptions { scale: Scaler::new(2.0), ..SvgOptions::default() };
        // bounds 38x18 plus 1px margin on each side = 40x20 px = 20x10 mm
        assert!(render_svg(&d, &options).contains(r#"width="20mm" height="10mm""#));
    }

    #[test]
    fn svg_file_saves_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        let mut sink = SvgFile::new(&path, SvgOptions::default());
        sink.add_line(dvec2(0.0, 0.0), dvec2(4.0, 0.0), StrokeClass::Perforation);
        sink.save().unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_svg(sink.drawing(), &SvgOptions::default()));
        assert!(matches!(sink.save(), Err(EnvelopeError::AlreadySaved)));
    }

    #[test]
    fn svg_file_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.svg");
        let mut sink = SvgFile::new(&path, SvgOptions::default());
        let err = sink.save().unwrap_err();
        assert!(matches!(err, EnvelopeError::Io { .. }));
        assert!(!path.exists());
    }
}
