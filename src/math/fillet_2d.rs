//! Tangent-arc fillet construction in a 2D joint plane.
//!
//! Two straight edges meet at a joint vertex. The fillet is the circular
//! arc tangent to both edges at equal distances from the vertex, replacing
//! the corner with a smooth transition. The plane's abscissa is the
//! spanwise coordinate; the ordinate is either height (dihedral line) or
//! chordwise offset (sweep lines).

use super::intersect_2d::line_line_point_2d;
use super::{Point2, Vector2, ANGLE_TOLERANCE};

/// A circular arc tangent to two edges meeting at a joint vertex.
///
/// The arc runs from the tangency point on the inbound (root-side) edge to
/// the tangency point on the outbound (tip-side) edge, sweeping the signed
/// turn angle between the two edge directions.
#[derive(Debug, Clone, Copy)]
pub struct TangentArc {
    /// Arc center (the fillet pivot point).
    pub pivot: Point2,
    /// Arc radius.
    pub radius: f64,
    /// Angle from pivot to the root-side tangency point.
    pub start_angle: f64,
    /// Signed sweep from the root-side to the tip-side tangency point.
    pub sweep: f64,
    /// Distance from the vertex to each tangency point, along each edge.
    pub tangent_len: f64,
}

impl TangentArc {
    /// Constructs the fillet arc for two edges meeting at `vertex`.
    ///
    /// `dir_in` is the unit travel direction of the root-side edge into the
    /// vertex; `dir_out` the unit travel direction of the tip-side edge out
    /// of it. `tangent_len` is the distance from the vertex to the tangency
    /// point on each edge.
    ///
    /// Returns `None` when the edges are collinear (zero turn angle, no
    /// fillet needed), when either direction is degenerate, or when the
    /// tangent length is non-positive.
    #[must_use]
    pub fn from_corner(
        vertex: Point2,
        dir_in: Vector2,
        dir_out: Vector2,
        tangent_len: f64,
    ) -> Option<Self> {
        if tangent_len <= 0.0 {
            return None;
        }
        let len_in = dir_in.norm();
        let len_out = dir_out.norm();
        if len_in < ANGLE_TOLERANCE || len_out < ANGLE_TOLERANCE {
            return None;
        }
        let da = dir_in / len_in;
        let db = dir_out / len_out;

        let turn = (da.x * db.y - da.y * db.x).atan2(da.dot(&db));
        if turn.abs() < ANGLE_TOLERANCE {
            return None;
        }

        let tangency_in = vertex - da * tangent_len;

        // The center sits on the intersection of the edge orthogonal at the
        // tangency point with the center line through the vertex (which is
        // orthogonal to the bisector of the two travel directions).
        let ortho_in = Vector2::new(-da.y, da.x);
        let center_line = db - da;
        let pivot = line_line_point_2d(&tangency_in, &ortho_in, &vertex, &center_line)?;

        let radius = (tangency_in - pivot).norm();
        let start_angle = (tangency_in.y - pivot.y).atan2(tangency_in.x - pivot.x);

        Some(Self {
            pivot,
            radius,
            start_angle,
            sweep: turn,
            tangent_len,
        })
    }

    /// Evaluates the arc at fraction `f` in `[0, 1]` of its sweep.
    #[must_use]
    pub fn point_at(&self, f: f64) -> Point2 {
        let angle = self.start_angle + self.sweep * f;
        Point2::new(
            self.pivot.x + self.radius * angle.cos(),
            self.pivot.y + self.radius * angle.sin(),
        )
    }

    /// Fraction of the sweep at which the arc crosses the given abscissa.
    ///
    /// The arc's abscissa is monotone between its tangency points whenever
    /// both edge directions advance in +x, so at most one crossing exists.
    /// Returns 0.5 if the abscissa never crosses (already clamped corner).
    #[must_use]
    pub fn split_at_abscissa(&self, x: f64) -> f64 {
        if self.radius < f64::EPSILON {
            return 0.5;
        }
        let c = ((x - self.pivot.x) / self.radius).clamp(-1.0, 1.0);
        let base = c.acos();
        for candidate in [base, -base] {
            for wind in [-std::f64::consts::TAU, 0.0, std::f64::consts::TAU] {
                let f = (candidate + wind - self.start_angle) / self.sweep;
                if (-1e-9..=1.0 + 1e-9).contains(&f) {
                    return f.clamp(0.0, 1.0);
                }
            }
        }
        0.5
    }

    /// Abscissa advance between sweep fractions `f0` and `f1`.
    #[must_use]
    pub fn abscissa_span(&self, f0: f64, f1: f64) -> f64 {
        self.point_at(f1).x - self.point_at(f0).x
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const TOL: f64 = 1e-9;

    #[test]
    fn right_angle_corner_unit_tangent() {
        // Horizontal edge into the origin, vertical edge out of it.
        let arc = TangentArc::from_corner(
            Point2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 1.0),
            1.0,
        )
        .unwrap();

        assert!((arc.radius - 1.0).abs() < TOL, "radius={}", arc.radius);
        assert!((arc.pivot.x + 1.0).abs() < TOL, "pivot.x={}", arc.pivot.x);
        assert!((arc.pivot.y - 1.0).abs() < TOL, "pivot.y={}", arc.pivot.y);
        assert!((arc.sweep - FRAC_PI_2).abs() < TOL, "sweep={}", arc.sweep);

        let start = arc.point_at(0.0);
        assert!((start.x + 1.0).abs() < TOL && start.y.abs() < TOL);
        let end = arc.point_at(1.0);
        assert!(end.x.abs() < TOL && (end.y - 1.0).abs() < TOL);
    }

    #[test]
    fn collinear_edges_produce_no_arc() {
        let arc = TangentArc::from_corner(
            Point2::new(5.0, 2.0),
            Vector2::new(1.0, 0.5),
            Vector2::new(2.0, 1.0),
            1.0,
        );
        assert!(arc.is_none());
    }

    #[test]
    fn zero_direction_produces_no_arc() {
        let arc = TangentArc::from_corner(
            Point2::new(0.0, 0.0),
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            1.0,
        );
        assert!(arc.is_none());
    }

    #[test]
    fn shallow_turn_radius_matches_closed_form() {
        // r = tangent_len / tan(|turn| / 2)
        let turn = 20.0_f64.to_radians();
        let arc = TangentArc::from_corner(
            Point2::new(10.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(turn.cos(), turn.sin()),
            2.0,
        )
        .unwrap();

        let expected = 2.0 / (turn / 2.0).tan();
        assert!(
            (arc.radius - expected).abs() < 1e-6,
            "radius={} expected={expected}",
            arc.radius
        );
        assert!((arc.sweep - turn).abs() < TOL);
    }

    #[test]
    fn split_at_vertex_abscissa_is_interior() {
        let turn = 30.0_f64.to_radians();
        let arc = TangentArc::from_corner(
            Point2::new(10.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(turn.cos(), turn.sin()),
            2.0,
        )
        .unwrap();

        let f = arc.split_at_abscissa(10.0);
        assert!(f > 0.0 && f < 1.0, "split fraction f={f}");
        let p = arc.point_at(f);
        assert!((p.x - 10.0).abs() < 1e-9, "crossing abscissa={}", p.x);
    }

    #[test]
    fn tangency_points_are_equidistant_from_pivot() {
        let turn = -25.0_f64.to_radians();
        let arc = TangentArc::from_corner(
            Point2::new(4.0, 1.0),
            Vector2::new(1.0, 0.2).normalize(),
            Vector2::new(turn.cos(), turn.sin()),
            1.5,
        )
        .unwrap();

        let d0 = (arc.point_at(0.0) - arc.pivot).norm();
        let d1 = (arc.point_at(1.0) - arc.pivot).norm();
        assert!((d0 - arc.radius).abs() < TOL);
        assert!((d1 - arc.radius).abs() < TOL);
    }
}
