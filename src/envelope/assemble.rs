//! Envelope assembly: validates the box, places the four flaps around the
//! footprint and stitches them into one closed cut contour.

use glam::{DVec2, dvec2};

use super::config::EnvelopeConfig;
use super::corner::{Connector, CornerFrame, CornerStyle, emit_corner};
use super::flaps::{FLAP_POINTS, left_right_flap, top_bottom_flap};
use super::transform::{mirror, translate};
use crate::errors::{EnvelopeError, Result};
use crate::sink::{DrawingSink, StrokeClass};
use crate::types::{BBox, BoxDimensions, Length, NumericError, Rect};

/// Sides of the box, in contour order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const CLOCKWISE: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];
}

/// Box measurements converted to drawing units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Footprint width and height
    pub inner: DVec2,
    pub depth: f64,
    /// Footprint plus the depth border on every side
    pub total: DVec2,
}

impl Layout {
    pub fn new(dimensions: &BoxDimensions, config: &EnvelopeConfig) -> Self {
        let scale = config.scale;
        let inner = dvec2(scale.px(dimensions.width), scale.px(dimensions.height));
        let depth = scale.px(dimensions.depth);
        Layout { inner, depth, total: inner + DVec2::splat(2.0 * depth) }
    }

    pub fn outer_rect(&self) -> Rect {
        Rect::new(DVec2::ZERO, self.total)
    }

    /// Footprint, centred in the outer rectangle
    pub fn inner_rect(&self) -> Rect {
        Rect::new((self.total - self.inner) / 2.0, self.inner)
    }

    /// Farthest any flap apex reaches past the outer rectangle
    pub fn flap_reach(&self, config: &EnvelopeConfig) -> f64 {
        let DVec2 { x: w, y: h } = self.inner;
        let top_bottom = h / 2.0 + config.top_bottom.overlap * h;
        let left_right = w / 2.0 + config.left_right.overlap * h;
        top_bottom.max(left_right)
    }

    /// Flap outline for `side`, placed so its base runs along the outer
    /// rectangle edge between the depth-extended footprint corners and its
    /// apex points away from the box.
    pub fn place_flap(&self, side: Side, config: &EnvelopeConfig) -> Vec<DVec2> {
        let DVec2 { x: w, y: h } = self.inner;
        let d = self.depth;
        match side {
            Side::Top => {
                let flap = top_bottom_flap(w, h, config.top_bottom);
                translate(&mirror(&flap, false, true), dvec2(d, 0.0))
            }
            Side::Right => {
                let flap = left_right_flap(w, h, config.left_right);
                translate(&flap, dvec2(self.total.x, d))
            }
            Side::Bottom => {
                let flap = top_bottom_flap(w, h, config.top_bottom);
                translate(&mirror(&flap, true, false), dvec2(d + w, self.total.y))
            }
            Side::Left => {
                let flap = left_right_flap(w, h, config.left_right);
                translate(&mirror(&flap, true, true), dvec2(0.0, d + h))
            }
        }
    }
}

/// Geometry produced by one assembly run
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub dimensions: BoxDimensions,
    pub corner_style: CornerStyle,
    pub layout: Layout,
    pub outer: Rect,
    pub inner: Rect,
    /// Placed flap outlines in contour order (top, right, bottom, left)
    pub flaps: [Vec<DVec2>; 4],
    /// Tab fold guides, empty for plain corners
    pub fold_lines: Vec<(DVec2, DVec2)>,
    /// Closed cut contour; the last point repeats the first
    pub contour: Vec<DVec2>,
}

impl Envelope {
    /// Bounding box of everything sent to the sink
    pub fn bounds(&self) -> BBox {
        let mut bb = self.outer.bbox();
        bb.expand_points(&self.contour);
        bb
    }

    /// Contour length for the chosen corner style, closing point included
    pub fn expected_contour_len(corner_style: &CornerStyle) -> usize {
        let per_corner = if corner_style.is_tabbed() { 3 } else { 1 };
        4 * FLAP_POINTS + 4 * per_corner + 1
    }
}

/// Reject measurements that are non-finite, non-positive, or too large to
/// survive conversion to drawing units, before any geometry is built.
pub fn validate(
    dimensions: &BoxDimensions,
    corner_style: &CornerStyle,
    config: &EnvelopeConfig,
) -> Result<()> {
    for (name, value) in dimensions.fields() {
        Length::try_positive(value.raw()).map_err(|reason| EnvelopeError::InvalidDimension {
            name,
            value: value.raw(),
            reason,
        })?;
    }

    let layout = Layout::new(dimensions, config);
    let span = layout.total + DVec2::splat(2.0 * layout.flap_reach(config));
    if !span.is_finite() {
        let (name, value) = dimensions
            .fields()
            .into_iter()
            .max_by(|a, b| a.1.raw().total_cmp(&b.1.raw()))
            .unwrap_or(("width", dimensions.width));
        return Err(EnvelopeError::InvalidDimension {
            name,
            value: value.raw(),
            reason: NumericError::TooLarge,
        });
    }

    corner_style.validate(dimensions.depth)
}

/// Build the envelope for `dimensions` and send it to `sink`.
///
/// Emits, in order: the outer and inner perforation rectangles, one fold
/// guide per tabbed corner, and the closed cut contour. Nothing is emitted
/// when validation fails. The sink is not saved.
pub fn assemble<S: DrawingSink + ?Sized>(
    dimensions: &BoxDimensions,
    corner_style: &CornerStyle,
    config: &EnvelopeConfig,
    sink: &mut S,
) -> Result<Envelope> {
    validate(dimensions, corner_style, config)?;

    let layout = Layout::new(dimensions, config);
    let outer = layout.outer_rect();
    let inner = layout.inner_rect();
    crate::log::debug!(?layout, tabbed = corner_style.is_tabbed(), "assembling envelope");

    sink.add_rectangle(outer.origin, outer.size, StrokeClass::Perforation);
    sink.add_rectangle(inner.origin, inner.size, StrokeClass::Perforation);

    let flaps = Side::CLOCKWISE.map(|side| layout.place_flap(side, config));
    let frames = CornerFrame::clockwise(inner.origin, inner.size, layout.depth);

    let mut contour = Vec::with_capacity(Envelope::expected_contour_len(corner_style));
    let mut fold_lines = Vec::new();
    for (flap, frame) in flaps.iter().zip(frames.iter()) {
        contour.extend_from_slice(flap);
        let connection = emit_corner(corner_style, frame, &config.scale, &mut *sink);
        contour.extend(connection.points);
        fold_lines.extend(connection.fold);
    }
    if let Some(&first) = contour.first() {
        contour.push(first);
    }
    crate::log::trace!(points = contour.len(), folds = fold_lines.len(), "contour closed");

    sink.add_path(&contour, StrokeClass::Cut);

    Ok(Envelope {
        dimensions: *dimensions,
        corner_style: *corner_style,
        layout,
        outer,
        inner,
        flaps,
        fold_lines,
        contour,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::corner::TabbedCorner;
    use crate::sink::Drawing;

    const EPS: f64 = 1e-9;

    fn unit_config() -> EnvelopeConfig {
        EnvelopeConfig::default().with_scale(1.0).unwrap()
    }

    fn build(w: f64, h: f64, d: f64, style: CornerStyle) -> (Envelope, Drawing) {
        let mut sink = Drawing::new();
        let env = assemble(&BoxDimensions::new(w, h, d), &style, &unit_config(), &mut sink)
            .expect("valid box");
        (env, sink)
    }

    #[test]
    fn layout_centres_the_footprint() {
        let layout = Layout::new(&BoxDimensions::new(100.0, 60.0, 20.0), &unit_config());
        assert_eq!(layout.total, dvec2(140.0, 100.0));
        assert_eq!(layout.inner_rect(), Rect::new(dvec2(20.0, 20.0), dvec2(100.0, 60.0)));
        assert_eq!(layout.outer_rect().center(), layout.inner_rect().center());
    }

    #[test]
    fn flap_bases_land_on_extended_corners() {
        let config = unit_config();
        let layout = Layout::new(&BoxDimensions::new(100.0, 60.0, 20.0), &config);
        let ends = |side| {
            let f = layout.place_flap(side, &config);
            (f[0], f[FLAP_POINTS - 1])
        };
        assert_eq!(ends(Side::Top), (dvec2(20.0, 0.0), dvec2(120.0, 0.0)));
        assert_eq!(ends(Side::Right), (dvec2(140.0, 20.0), dvec2(140.0, 80.0)));
        assert_eq!(ends(Side::Bottom), (dvec2(120.0, 100.0), dvec2(20.0, 100.0)));
        assert_eq!(ends(Side::Left), (dvec2(0.0, 80.0), dvec2(0.0, 20.0)));
    }

    #[test]
    fn apexes_point_away_from_the_box() {
        let config = unit_config();
        let layout = Layout::new(&BoxDimensions::new(100.0, 60.0, 20.0), &config);
        assert!(layout.place_flap(Side::Top, &config)[2].y < 0.0);
        assert!(layout.place_flap(Side::Right, &config)[2].x > layout.total.x);
        assert!(layout.place_flap(Side::Bottom, &config)[2].y > layout.total.y);
        assert!(layout.place_flap(Side::Left, &config)[2].x < 0.0);
    }

    #[test]
    fn plain_contour_is_closed_with_fixed_length() {
        let (env, sink) = build(100.0, 60.0, 20.0, CornerStyle::default());
        assert_eq!(env.contour.len(), 25);
        assert_eq!(env.contour.first(), env.contour.last());
        assert!(env.fold_lines.is_empty());
        assert_eq!(sink.rects().count(), 2);
        assert_eq!(sink.lines().count(), 0);
        assert_eq!(sink.paths().count(), 1);
    }

    #[test]
    fn tabbed_contour_adds_two_points_per_corner() {
        let (plain, _) = build(100.0, 60.0, 20.0, CornerStyle::default());
        let (tabbed, sink) = build(100.0, 60.0, 20.0, CornerStyle::tabbed());
        assert_eq!(tabbed.contour.len(), plain.contour.len() + 8);
        assert_eq!(tabbed.contour.len(), Envelope::expected_contour_len(&CornerStyle::tabbed()));
        assert_eq!(sink.lines().count(), 4);
        assert_eq!(tabbed.flaps, plain.flaps);
    }

    #[test]
    fn contour_visits_each_junction_once() {
        let (env, _) = build(80.0, 50.0, 15.0, CornerStyle::default());
        let frames = CornerFrame::clockwise(env.inner.origin, env.inner.size, env.layout.depth);
        let open = &env.contour[..env.contour.len() - 1];
        for frame in frames {
            for junction in [frame.flap_end(), frame.corner, frame.flap_start()] {
                let hits = open.iter().filter(|p| p.abs_diff_eq(junction, EPS)).count();
                assert_eq!(hits, 1, "junction {junction} visited {hits} times");
            }
        }
    }

    #[test]
    fn rectangles_are_concentric_and_nested() {
        let (env, _) = build(30.0, 90.0, 5.0, CornerStyle::default());
        assert!(env.outer.center().abs_diff_eq(env.inner.center(), EPS));
        assert!(env.outer.bbox().strictly_contains(&env.inner.bbox()));
    }

    #[test]
    fn cube_apexes_follow_their_own_overlap_ratio() {
        let (env, _) = build(75.0, 75.0, 75.0, CornerStyle::default());
        let [top, right, ..] = &env.flaps;
        // past the half-way line of the box, measured from the fold edge
        let top_overhang = -top[2].y - 75.0 / 2.0;
        let right_overhang = right[2].x - env.layout.total.x - 75.0 / 2.0;
        assert!((top_overhang - 5.0).abs() < EPS);
        assert!((right_overhang - 7.5).abs() < EPS);
        assert!((right_overhang / top_overhang - 75.0 / 50.0).abs() < EPS);
    }

    #[test]
    fn invalid_dimensions_emit_nothing() {
        for (w, h, d, name) in [
            (0.0, 60.0, 20.0, "width"),
            (100.0, -1.0, 20.0, "height"),
            (100.0, 60.0, f64::NAN, "depth"),
        ] {
            let mut sink = Drawing::new();
            let err = assemble(&BoxDimensions::new(w, h, d), &CornerStyle::default(), &unit_config(), &mut sink)
                .unwrap_err();
            match err {
                EnvelopeError::InvalidDimension { name: got, .. } => assert_eq!(got, name),
                other => panic!("unexpected error {other:?}"),
            }
            assert!(sink.is_empty());
        }
    }

    #[test]
    fn dimensions_overflowing_drawing_units_emit_nothing() {
        for (w, h, d, name) in [
            (1e308, 60.0, 20.0, "width"),
            (100.0, f64::MAX, 20.0, "height"),
            (100.0, 60.0, 1e308, "depth"),
        ] {
            let mut sink = Drawing::new();
            let err = assemble(
                &BoxDimensions::new(w, h, d),
                &CornerStyle::default(),
                &EnvelopeConfig::default(),
                &mut sink,
            )
            .unwrap_err();
            match err {
                EnvelopeError::InvalidDimension { name: got, reason, .. } => {
                    assert_eq!(got, name);
                    assert_eq!(reason, NumericError::TooLarge);
                }
                other => panic!("unexpected error {other:?}"),
            }
            assert!(sink.is_empty());
        }
    }

    #[test]
    fn large_but_drawable_box_stays_finite() {
        let (env, _) = build(1e300, 2e300, 5e299, CornerStyle::default());
        let bounds = env.bounds();
        assert!(bounds.min.is_finite() && bounds.max.is_finite() && bounds.size().is_finite());
        assert!(env.contour.iter().all(|p| p.is_finite()));
    }

    /// Segments `p` and `q` cross or touch anywhere, endpoints included
    fn segments_touch(p: (DVec2, DVec2), q: (DVec2, DVec2)) -> bool {
        let orient = |a: DVec2, b: DVec2, c: DVec2| (b - a).perp_dot(c - a);
        let on_segment = |a: DVec2, b: DVec2, c: DVec2| {
            orient(a, b, c) == 0.0 && c.cmpge(a.min(b)).all() && c.cmple(a.max(b)).all()
        };
        let (d1, d2) = (orient(q.0, q.1, p.0), orient(q.0, q.1, p.1));
        let (d3, d4) = (orient(p.0, p.1, q.0), orient(p.0, p.1, q.1));
        if d1 * d2 < 0.0 && d3 * d4 < 0.0 {
            return true;
        }
        on_segment(q.0, q.1, p.0)
            || on_segment(q.0, q.1, p.1)
            || on_segment(p.0, p.1, q.0)
            || on_segment(p.0, p.1, q.1)
    }

    #[test]
    fn contour_never_crosses_itself() {
        let boxes = [
            (250.0, 40.0, 12.5),
            (40.0, 140.0, 25.0),
            (75.0, 75.0, 20.0),
            (60.0, 60.0, 60.0),
            (30.0, 60.0, 40.0),
        ];
        for (w, h, d) in boxes {
            for style in [CornerStyle::default(), CornerStyle::tabbed()] {
                let (env, _) = build(w, h, d, style);
                let segments: Vec<_> = env.contour.windows(2).map(|s| (s[0], s[1])).collect();
                let n = segments.len();
                for i in 0..n {
                    // neighbours share an endpoint, including the closing pair
                    for j in i + 2..n {
                        if i == 0 && j == n - 1 {
                            continue;
                        }
                        assert!(
                            !segments_touch(segments[i], segments[j]),
                            "{w}x{h}x{d} tabbed={}: segment {i} meets segment {j}",
                            style.is_tabbed()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn oversized_tab_is_rejected_before_drawing() {
        let mut sink = Drawing::new();
        let style = CornerStyle::Tabbed(TabbedCorner { width: Length(25.0), offset: Length(3.0) });
        let err = assemble(&BoxDimensions::new(100.0, 60.0, 20.0), &style, &unit_config(), &mut sink)
            .unwrap_err();
        assert!(matches!(err, EnvelopeError::InvalidTab { .. }));
        assert!(sink.is_empty());
    }

    #[test]
    fn bounds_include_flaps_outside_outer_rect() {
        let (env, _) = build(100.0, 60.0, 20.0, CornerStyle::default());
        let bounds = env.bounds();
        assert!(bounds.min.x < 0.0 && bounds.min.y < 0.0);
        assert!(bounds.max.x > env.outer.size.x && bounds.max.y > env.outer.size.y);
    }
}
