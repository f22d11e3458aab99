//! Discrete airfoil point-file import.
//!
//! Parses Selig-style coordinate files: a name line followed by `x z`
//! pairs tracing the section from the trailing edge over the upper
//! surface to the leading edge and back along the lower surface. The
//! points are classified into upper and lower curves around the
//! minimum-x (leading-edge) point.

use crate::error::AirfoilError;
use crate::math::Point2;

/// Raw upper/lower curves split out of an imported point file.
///
/// Both curves run leading edge to trailing edge and share a single
/// trailing-edge point (the midpoint of the file's two nearest endpoints).
#[derive(Debug, Clone)]
pub struct RawSurfaces {
    pub upper: Vec<Point2>,
    pub lower: Vec<Point2>,
}

/// Parses a Selig-format coordinate file into classified surfaces.
///
/// Coordinate lines must satisfy `x` in `[0, 1]` and `z` in `[-1, 1]`;
/// reading stops at the first line that does not. The first line is
/// treated as the section name and skipped.
///
/// # Errors
///
/// Returns an error when fewer than 5 points parse, or when either
/// surface ends up with fewer than 3 points.
pub fn parse_selig(text: &str) -> Result<RawSurfaces, AirfoilError> {
    let mut coords: Vec<Point2> = Vec::new();

    for line in text.lines().skip(1) {
        let mut it = line.split_whitespace();
        let x = it.next().and_then(|s| s.parse::<f64>().ok());
        let z = it.next().and_then(|s| s.parse::<f64>().ok());
        match (x, z) {
            (Some(x), Some(z)) if (0.0..=1.0).contains(&x) && (-1.0..=1.0).contains(&z) => {
                coords.push(Point2::new(x, z));
            }
            _ => {
                if coords.is_empty() {
                    continue;
                }
                break;
            }
        }
    }

    if coords.len() < 5 {
        return Err(AirfoilError::NoUsableData);
    }

    classify(&coords)
}

/// Splits an ordered TE-upper-LE-lower-TE trace at the minimum-x point.
fn classify(coords: &[Point2]) -> Result<RawSurfaces, AirfoilError> {
    let mut le_index = 0;
    let mut smallest = f64::INFINITY;
    for (i, p) in coords.iter().enumerate() {
        if p.x < smallest {
            smallest = p.x;
            le_index = i;
        }
    }

    let num_upper = le_index + 1;
    let num_lower = coords.len() - le_index;
    if num_upper < 3 {
        return Err(AirfoilError::TooFewPoints {
            side: "upper",
            count: num_upper,
        });
    }
    if num_lower < 3 {
        return Err(AirfoilError::TooFewPoints {
            side: "lower",
            count: num_lower,
        });
    }

    // Upper surface runs TE -> LE in the file; reverse to LE -> TE.
    let mut upper: Vec<Point2> = coords[..=le_index].iter().rev().copied().collect();
    let mut lower: Vec<Point2> = coords[le_index..].to_vec();

    // Close the trailing edge at the midpoint of the two file endpoints.
    let te = Point2::from((upper[num_upper - 1].coords + lower[num_lower - 1].coords) * 0.5);
    upper[num_upper - 1] = te;
    lower[num_lower - 1] = te;

    Ok(RawSurfaces { upper, lower })
}

/// Maximum thickness of a raw surface pair, sampled chordwise.
#[must_use]
pub fn max_thickness(surfaces: &RawSurfaces) -> f64 {
    use super::resample::point_at_arc_length;

    let mut max = 0.0_f64;
    const SAMPLES: usize = 50;
    for i in 0..=SAMPLES {
        #[allow(clippy::cast_precision_loss)]
        let u = i as f64 / SAMPLES as f64;
        let up = point_at_arc_length(&surfaces.upper, u);
        let lo = point_at_arc_length(&surfaces.lower, u);
        max = max.max(up.y - lo.y);
    }
    max
}

/// Leading-edge radius estimate from the circle through the three points
/// nearest the leading edge.
#[must_use]
pub fn leading_edge_radius(surfaces: &RawSurfaces) -> f64 {
    if surfaces.upper.len() < 2 || surfaces.lower.len() < 2 {
        return 0.0;
    }
    circumradius(surfaces.lower[1], surfaces.upper[0], surfaces.upper[1])
}

fn circumradius(a: Point2, b: Point2, c: Point2) -> f64 {
    let ab = (b - a).norm();
    let bc = (c - b).norm();
    let ca = (a - c).norm();
    let area2 = ((b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)).abs();
    if area2 < 1e-14 {
        return 0.0;
    }
    ab * bc * ca / (2.0 * area2)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_file() -> String {
        let mut text = String::from("TEST FOIL\n");
        // Upper surface TE -> LE.
        for &(x, z) in &[(1.0, 0.001), (0.5, 0.06), (0.25, 0.05), (0.0, 0.0)] {
            text.push_str(&format!("{x} {z}\n"));
        }
        // Lower surface LE -> TE (leading-edge point not repeated).
        for &(x, z) in &[(0.25, -0.05), (0.5, -0.06), (1.0, -0.001)] {
            text.push_str(&format!("{x} {z}\n"));
        }
        text
    }

    #[test]
    fn splits_at_leading_edge() {
        let raw = parse_selig(&sample_file()).unwrap();
        assert_eq!(raw.upper.len(), 4);
        assert_eq!(raw.lower.len(), 4);
        assert!(raw.upper[0].x.abs() < 1e-12, "upper starts at LE");
        assert!(raw.lower[0].x.abs() < 1e-12, "lower starts at LE");
    }

    #[test]
    fn trailing_edge_closed_at_midpoint() {
        let raw = parse_selig(&sample_file()).unwrap();
        let u_te = raw.upper[raw.upper.len() - 1];
        let l_te = raw.lower[raw.lower.len() - 1];
        assert!((u_te - l_te).norm() < 1e-12, "TE not closed");
        assert!(u_te.y.abs() < 1e-12, "midpoint of +-0.001");
    }

    #[test]
    fn too_few_points_fails() {
        let text = "NAME\n1.0 0.0\n0.5 0.1\n0.0 0.0\n";
        assert!(parse_selig(text).is_err());
    }

    #[test]
    fn one_sided_data_fails() {
        // All points on the upper surface; lower side has < 3 points.
        let text = "NAME\n1.0 0.01\n0.75 0.04\n0.5 0.06\n0.25 0.05\n0.0 0.0\n";
        let err = parse_selig(text).unwrap_err();
        assert!(matches!(err, AirfoilError::TooFewPoints { side: "lower", .. }));
    }

    #[test]
    fn stops_at_malformed_line() {
        let mut text = sample_file();
        text.push_str("not a coordinate\n0.9 0.2\n");
        let raw = parse_selig(&text).unwrap();
        assert_eq!(raw.upper.len() + raw.lower.len(), 8);
    }

    #[test]
    fn thickness_estimate() {
        let raw = parse_selig(&sample_file()).unwrap();
        let t = max_thickness(&raw);
        assert!(t > 0.1 && t < 0.14, "t={t}");
    }
}
