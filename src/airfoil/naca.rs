//! Closed-form parametric airfoil families.
//!
//! Point sequences run trailing edge -> upper surface -> leading edge ->
//! lower surface -> trailing edge. The count is always odd so the leading
//! edge sits at the exact middle index.

use crate::math::Point2;

/// Forward-difference step used to estimate the camber-line slope.
const SLOPE_STEP: f64 = 1e-5;

/// Four-series half-thickness distribution at chord fraction `x`, scaled
/// from the canonical 20% thick section to `thickness`.
#[must_use]
pub fn half_thickness(x: f64, thickness: f64) -> f64 {
    let xx = x * x;
    (thickness / 0.20)
        * (0.2969 * x.sqrt() - 0.1260 * x - 0.3516 * xx + 0.2843 * x * xx - 0.1015 * xx * xx)
}

/// Piecewise-parabolic camber line height at chord fraction `x`.
fn camber_height(x: f64, camber: f64, camber_loc: f64) -> f64 {
    if x < camber_loc {
        (camber / (camber_loc * camber_loc)) * (2.0 * camber_loc * x - x * x)
    } else {
        (camber / ((1.0 - camber_loc) * (1.0 - camber_loc)))
            * (1.0 - 2.0 * camber_loc + 2.0 * camber_loc * x - x * x)
    }
}

/// Camber line height and local slope angle at chord fraction `x`.
///
/// Zero or degenerate camber parameters collapse to the uncambered line.
#[must_use]
pub fn camber_line(x: f64, camber: f64, camber_loc: f64) -> (f64, f64) {
    if camber <= 0.0 || camber_loc <= 0.0 || camber_loc >= 1.0 {
        return (0.0, 0.0);
    }
    let zc = camber_height(x, camber, camber_loc);
    let zo = camber_height(x + SLOPE_STEP, camber, camber_loc);
    let theta = ((zo - zc) / SLOPE_STEP).atan();
    (zc, theta)
}

/// Generates a four-series section.
///
/// The thickness distribution is rotated normal to the camber line, the
/// standard construction for this family.
#[must_use]
pub fn four_series(num_points: usize, camber: f64, camber_loc: f64, thickness: f64) -> Vec<Point2> {
    let half = num_points / 2;
    let mut pnts = vec![Point2::origin(); num_points];

    for i in 1..half {
        #[allow(clippy::cast_precision_loss)]
        let f = i as f64 / half as f64;
        // x^1.5 spacing concentrates samples near the leading edge.
        let x = f * f.sqrt();

        let zt = half_thickness(x, thickness);
        let (zc, theta) = camber_line(x, camber, camber_loc);

        let xu = x - zt * theta.sin();
        let zu = zc + zt * theta.cos();
        pnts[half - i] = Point2::new(xu, zu);

        let xl = x + zt * theta.sin();
        let zl = zc - zt * theta.cos();
        pnts[half + i] = Point2::new(xl, zl);
    }

    pnts[0] = Point2::new(1.0, 0.0);
    pnts[num_points - 1] = Point2::new(1.0, 0.0);
    pnts[half] = Point2::new(0.0, 0.0);

    pnts
}

/// Generates a biconvex section: parabolic arcs top and bottom.
#[must_use]
pub fn biconvex(num_points: usize, thickness: f64) -> Vec<Point2> {
    let half = num_points / 2;
    let mut pnts = vec![Point2::origin(); num_points];

    for i in 1..half {
        #[allow(clippy::cast_precision_loss)]
        let x = i as f64 / half as f64;
        let zu = 2.0 * thickness * x * (1.0 - x);
        pnts[half - i] = Point2::new(x, zu);
        pnts[half + i] = Point2::new(x, -zu);
    }

    pnts[0] = Point2::new(1.0, 0.0);
    pnts[num_points - 1] = Point2::new(1.0, 0.0);
    pnts[half] = Point2::new(0.0, 0.0);

    pnts
}

/// Generates a wedge section: linear ramps to an apex at `thickness_loc`.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn wedge(num_points: usize, thickness: f64, thickness_loc: f64) -> Vec<Point2> {
    let half = num_points / 2;
    let mut pnts = vec![Point2::origin(); num_points];

    let mut apex = (half as f64 * thickness_loc) as usize + 1;
    if apex >= half {
        apex = half - 1;
    }

    // Front ramp up to the apex.
    let front_slope = 0.5 * thickness / thickness_loc;
    for i in 1..apex {
        let x = i as f64 / apex as f64 * thickness_loc;
        let zu = front_slope * x;
        pnts[half - i] = Point2::new(x, zu);
        pnts[half + i] = Point2::new(x, -zu);
    }

    // Back ramp down to the trailing edge.
    let back_slope = -0.5 * thickness / (1.0 - thickness_loc);
    for i in apex..half {
        let x = (i - apex) as f64 / (half - apex) as f64 * (1.0 - thickness_loc) + thickness_loc;
        let zu = back_slope * x - back_slope;
        pnts[half - i] = Point2::new(x, zu);
        pnts[half + i] = Point2::new(x, -zu);
    }

    pnts[0] = Point2::new(1.0, 0.0);
    pnts[num_points - 1] = Point2::new(1.0, 0.0);
    pnts[half] = Point2::new(0.0, 0.0);

    pnts
}
