//! Arc-length resampling of raw airfoil surface tables.

use crate::math::Point2;

/// Evaluates a polyline at normalized arc-length parameter `u` in `[0, 1]`.
///
/// Degenerate polylines (fewer than 2 points or zero total length) return
/// the first point, or the origin when empty.
#[must_use]
pub fn point_at_arc_length(poly: &[Point2], u: f64) -> Point2 {
    let Some(&first) = poly.first() else {
        return Point2::origin();
    };
    if poly.len() < 2 {
        return first;
    }

    let mut total = 0.0;
    for pair in poly.windows(2) {
        total += (pair[1] - pair[0]).norm();
    }
    if total <= 0.0 {
        return first;
    }

    let target = u.clamp(0.0, 1.0) * total;
    let mut walked = 0.0;
    for pair in poly.windows(2) {
        let seg = (pair[1] - pair[0]).norm();
        if walked + seg >= target {
            if seg <= 0.0 {
                return pair[0];
            }
            let f = (target - walked) / seg;
            return pair[0] + (pair[1] - pair[0]) * f;
        }
        walked += seg;
    }

    poly[poly.len() - 1]
}

/// Resamples raw upper/lower surface tables onto the standard odd-count
/// point layout (TE -> upper -> LE -> lower -> TE) with `x^1.5` spacing.
///
/// Both input curves must run leading edge to trailing edge.
#[must_use]
pub fn resample_surfaces(upper: &[Point2], lower: &[Point2], num_points: usize) -> Vec<Point2> {
    let half = num_points / 2;
    let mut pnts = vec![Point2::origin(); num_points];

    for i in 0..=half {
        #[allow(clippy::cast_precision_loss)]
        let f = i as f64 / half as f64;
        let u = f * f.sqrt();

        pnts[half - i] = point_at_arc_length(upper, u);
        pnts[half + i] = point_at_arc_length(lower, u);
    }

    pnts[0] = Point2::new(1.0, 0.0);
    pnts[num_points - 1] = Point2::new(1.0, 0.0);
    pnts[half] = Point2::new(0.0, 0.0);

    pnts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_length_midpoint_of_straight_segment() {
        let poly = [Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)];
        let p = point_at_arc_length(&poly, 0.5);
        assert!((p.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn arc_length_respects_uneven_segments() {
        // First segment is 3 long, second is 1: u=0.75 lands at the knot.
        let poly = [
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(4.0, 0.0),
        ];
        let p = point_at_arc_length(&poly, 0.75);
        assert!((p.x - 3.0).abs() < 1e-12, "x={}", p.x);
    }

    #[test]
    fn empty_polyline_returns_origin() {
        let p = point_at_arc_length(&[], 0.3);
        assert!(p.x.abs() < 1e-12 && p.y.abs() < 1e-12);
    }

    #[test]
    fn resampled_layout_has_fixed_endpoints() {
        let upper = [
            Point2::new(0.0, 0.0),
            Point2::new(0.5, 0.06),
            Point2::new(1.0, 0.0),
        ];
        let lower = [
            Point2::new(0.0, 0.0),
            Point2::new(0.5, -0.06),
            Point2::new(1.0, 0.0),
        ];
        let pnts = resample_surfaces(&upper, &lower, 23);
        assert_eq!(pnts.len(), 23);
        assert!((pnts[0].x - 1.0).abs() < 1e-12);
        assert!((pnts[22].x - 1.0).abs() < 1e-12);
        assert!(pnts[11].x.abs() < 1e-12);
        // Upper half has non-negative z, lower half non-positive.
        assert!(pnts[5].y >= 0.0);
        assert!(pnts[17].y <= 0.0);
    }
}
