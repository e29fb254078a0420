use crate::geometry::Polynomial;
use crate::math::GeometricOperations;

use super::index::SplineHandleIndex;
use super::location::NormalizedSplineLocation;
use super::SplineType;

/// Four consecutive handles of a spline plus progress within the segment
/// they define.
///
/// The curve runs from `handles[1]` to `handles[2]`; the outer handles only
/// contribute to the tangents.
#[derive(Debug, Clone, Copy)]
pub struct CatmullRomSegment<'a, P> {
    /// The window `P0, P1, P2, P3`.
    pub handles: [&'a P; 4],
    /// Index of `P0` in the full handle sequence.
    pub start: SplineHandleIndex,
    /// Progress from `P1` towards `P2`, in `[0, 1]`.
    pub overshoot: f64,
}

impl<'a, P> CatmullRomSegment<'a, P> {
    /// Locates the window containing `location` within `handles`.
    ///
    /// `handles` includes both margin handles. Locations up to `tolerance`
    /// past the end clamp to the last segment with overshoot `1`; negative
    /// locations and locations further out return `None`, as do handle
    /// sequences shorter than four.
    #[must_use]
    pub fn at(handles: &'a [P], location: NormalizedSplineLocation, tolerance: f64) -> Option<Self> {
        if handles.len() < 4 {
            return None;
        }
        let segment_count = handles.len() - 3;
        #[allow(clippy::cast_precision_loss)]
        let end = segment_count as f64;
        let value = location.value();
        if !(0.0..=end + tolerance).contains(&value) {
            return None;
        }
        let (segment, overshoot) = location.as_segment_index(segment_count);
        let i = segment.value();
        Some(Self {
            handles: [&handles[i], &handles[i + 1], &handles[i + 2], &handles[i + 3]],
            start: segment.window_start(),
            overshoot,
        })
    }
}

/// Per-end tangent weights that keep time velocity continuous when segment
/// durations differ.
///
/// `start` is `D_cur / (D_prev + D_cur)` and `end` is
/// `D_cur / (D_cur + D_next)`. `None` means the neighbouring duration is
/// unknown (a margin gap) and the plain spatial tangent is used.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TemporalWeights {
    pub start: Option<f64>,
    pub end: Option<f64>,
}

/// Builds the cubic that interpolates `P1 → P2` of a four-handle window.
///
/// Tangents come from the non-uniform finite difference over knot gaps
/// `dtᵢ = |Pᵢ₊₁ - Pᵢ|^α`. Gaps shorter than `epsilon` borrow a neighbouring
/// gap. When `P1` and `P2` coincide the segment collapses to a constant
/// polynomial, so its velocity and acceleration are zero.
#[must_use]
pub fn catmull_rom_polynomial<O: GeometricOperations>(
    ops: &O,
    window: [&O::Pos; 4],
    spline_type: SplineType,
    weights: TemporalWeights,
    epsilon: f64,
) -> Polynomial<O> {
    let [p0, p1, p2, p3] = window;

    if ops.distance(p1, p2) < epsilon {
        return Polynomial::cubic(p1.clone(), ops.zero(), ops.zero(), ops.zero(), ops.clone());
    }

    let [dt0, dt1, dt2] = knot_gaps(ops, window, spline_type.alpha(), epsilon);

    let d10 = ops.sub(p1, p0);
    let d20 = ops.sub(p2, p0);
    let d21 = ops.sub(p2, p1);
    let d31 = ops.sub(p3, p1);
    let d32 = ops.sub(p3, p2);

    // Knot-space tangents at P1 and P2.
    let t1 = ops.add_diffs(
        &ops.sub_diffs(&ops.div(&d10, dt0), &ops.div(&d20, dt0 + dt1)),
        &ops.div(&d21, dt1),
    );
    let t2 = ops.add_diffs(
        &ops.sub_diffs(&ops.div(&d21, dt1), &ops.div(&d31, dt1 + dt2)),
        &ops.div(&d32, dt2),
    );

    let scale1 = weights.start.map_or(dt1, |w| (dt0 + dt1) * w);
    let scale2 = weights.end.map_or(dt1, |w| (dt1 + dt2) * w);
    let m1 = ops.mul(&t1, scale1);
    let m2 = ops.mul(&t2, scale2);

    // Hermite to power basis.
    let c = ops.sub_diffs(
        &ops.sub_diffs(&ops.mul(&d21, 3.0), &ops.mul(&m1, 2.0)),
        &m2,
    );
    let d = ops.add_diffs(&ops.mul(&d21, -2.0), &ops.add_diffs(&m1, &m2));
    Polynomial::cubic(p1.clone(), m1, c, d, ops.clone())
}

fn knot_gaps<O: GeometricOperations>(ops: &O, window: [&O::Pos; 4], alpha: f64, epsilon: f64) -> [f64; 3] {
    if alpha <= 0.0 {
        return [1.0; 3];
    }
    let [p0, p1, p2, p3] = window;
    let raw = [ops.distance(p0, p1), ops.distance(p1, p2), ops.distance(p2, p3)];
    let gap = |d: f64| (d >= epsilon).then(|| d.powf(alpha));
    let [g0, g1, g2] = raw.map(gap);

    let middle = g1.or(g0).or(g2).unwrap_or(1.0);
    [g0.unwrap_or(middle), middle, g2.unwrap_or(middle)]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Euclidean2, Point2, Vector2};
    use approx::assert_relative_eq;

    fn window() -> [Point2; 4] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(3.0, 1.0),
        ]
    }

    fn build(pts: &[Point2; 4], ty: SplineType) -> Polynomial<Euclidean2> {
        catmull_rom_polynomial(
            &Euclidean2::default(),
            [&pts[0], &pts[1], &pts[2], &pts[3]],
            ty,
            TemporalWeights::default(),
            1e-6,
        )
    }

    #[test]
    fn interpolates_inner_handles_for_every_type() {
        let pts = window();
        for ty in [SplineType::Uniform, SplineType::Centripetal, SplineType::Chordal] {
            let poly = build(&pts, ty);
            assert_relative_eq!(poly.evaluate(0.0), pts[1], epsilon = 1e-12);
            assert_relative_eq!(poly.evaluate(1.0), pts[2], epsilon = 1e-12);
        }
    }

    #[test]
    fn uniform_tangent_is_symmetric_difference() {
        let pts = window();
        let poly = build(&pts, SplineType::Uniform);
        assert_relative_eq!(poly.evaluate_derivative(0.0), (pts[2] - pts[0]) / 2.0);
        assert_relative_eq!(poly.evaluate_derivative(1.0), (pts[3] - pts[1]) / 2.0);
    }

    #[test]
    fn evenly_spaced_collinear_handles_give_a_line() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 0.0),
        ];
        let poly = build(&pts, SplineType::Centripetal);
        assert_relative_eq!(poly.evaluate(0.25), Point2::new(1.25, 0.0), epsilon = 1e-12);
        assert_relative_eq!(poly.evaluate_second_derivative(0.5), Vector2::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn coincident_outer_handle_borrows_neighbour_gap() {
        let pts = [
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(3.0, 1.0),
        ];
        let poly = build(&pts, SplineType::Centripetal);
        let v = poly.evaluate_derivative(0.0);
        assert!(v.x.is_finite() && v.y.is_finite());
        assert_relative_eq!(poly.evaluate(1.0), pts[2], epsilon = 1e-12);
    }

    #[test]
    fn coincident_inner_handles_collapse_to_a_point() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(3.0, 1.0),
        ];
        let poly = build(&pts, SplineType::Chordal);
        assert_relative_eq!(poly.evaluate(0.5), pts[1]);
        assert_relative_eq!(poly.evaluate_derivative(0.5), Vector2::zeros());
        assert_relative_eq!(poly.arc_length(), 0.0);
    }

    #[test]
    fn equal_duration_weights_match_spatial_tangents_on_uniform_knots() {
        let pts = window();
        let plain = build(&pts, SplineType::Uniform);
        let weighted = catmull_rom_polynomial(
            &Euclidean2::default(),
            [&pts[0], &pts[1], &pts[2], &pts[3]],
            SplineType::Uniform,
            TemporalWeights {
                start: Some(0.5),
                end: Some(0.5),
            },
            1e-6,
        );
        for &t in &[0.0, 0.5, 1.0] {
            assert_relative_eq!(
                plain.evaluate_derivative(t),
                weighted.evaluate_derivative(t),
                epsilon = 1e-12
            );
        }
    }

    fn crosses(a: Point2, b: Point2, c: Point2, d: Point2) -> bool {
        let orient = |p: Point2, q: Point2, r: Point2| (q - p).perp(&(r - p));
        let (o1, o2) = (orient(a, b, c), orient(a, b, d));
        let (o3, o4) = (orient(c, d, a), orient(c, d, b));
        o1 * o2 < 0.0 && o3 * o4 < 0.0
    }

    #[test]
    fn centripetal_segments_never_self_intersect() {
        let windows = [
            [
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(1.1, 1.0),
                Point2::new(2.0, 0.0),
            ],
            [
                Point2::new(2.0, 0.0),
                Point2::new(0.0, 0.0),
                Point2::new(0.1, 0.05),
                Point2::new(-2.0, 0.0),
            ],
            [
                Point2::new(0.0, 5.0),
                Point2::new(0.0, 0.0),
                Point2::new(0.2, 0.0),
                Point2::new(0.2, 5.0),
            ],
        ];
        for pts in &windows {
            let poly = build(pts, SplineType::Centripetal);
            let path: Vec<_> = (0..=200).map(|i| poly.evaluate(f64::from(i) / 200.0)).collect();
            for i in 0..path.len() - 1 {
                for j in i + 2..path.len() - 1 {
                    assert!(
                        !crosses(path[i], path[i + 1], path[j], path[j + 1]),
                        "loop between samples {i} and {j}"
                    );
                }
            }
        }
    }

    #[test]
    fn window_lookup_clamps_within_tolerance() {
        let pts = [0.0_f64, 1.0, 2.0, 3.0, 4.0];
        let seg = CatmullRomSegment::at(&pts, NormalizedSplineLocation(2.005), 0.01).unwrap();
        assert_eq!(seg.start, SplineHandleIndex(1));
        assert_relative_eq!(seg.overshoot, 1.0);
        assert_relative_eq!(*seg.handles[3], 4.0);
        assert!(CatmullRomSegment::at(&pts, NormalizedSplineLocation(2.02), 0.01).is_none());
        assert!(CatmullRomSegment::at(&pts, NormalizedSplineLocation(-0.001), 0.01).is_none());
    }
}
