//! Stringer row assembly for the external curve-fit collaborator.
//!
//! A stringer is the spanwise row of surface points sharing one sample
//! index across every station. The core hands each row, together with
//! per-station tangency flags, to the collaborator that owns the cubic
//! curve fit; surface evaluation then happens on the collaborator's side.

use crate::loft::{CapKind, Station};
use crate::math::Point3;
use crate::wing::WingPlan;
use crate::Result;

/// Per-station continuity request for the curve fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TangencyFlag {
    /// Break the tangent at this station (default).
    Sharp,
    /// Let the fit run smoothly through this station.
    Smooth,
    /// Free tangent on the outboard side only (station before a rounded
    /// cap).
    OneSided,
    /// Mirrored end condition at a rounded cap.
    MirroredEnd,
}

/// External cubic-curve collaborator.
///
/// The core produces ordered point rows and flags; fitting and evaluation
/// are the collaborator's concern.
pub trait CurveFit {
    type Handle;

    /// Fits a curve through `points` honoring the per-point `flags`.
    fn build_curve(&mut self, points: &[Point3], flags: &[TangencyFlag], tension: f64)
        -> Self::Handle;

    /// Evaluates a fitted curve at parameter `u` in `[0, 1]`.
    fn evaluate(&self, handle: &Self::Handle, u: f64) -> Point3;
}

/// One spanwise stringer: the station points at a fixed sample index.
#[derive(Debug, Clone)]
pub struct StringerRow {
    pub points: Vec<Point3>,
    pub flags: Vec<TangencyFlag>,
}

/// Assembles every stringer row for the given station sequence.
///
/// Flags: `Sharp` by default, `Smooth` at stations whose source section
/// requests smooth blending, and `OneSided` / `MirroredEnd` at the last
/// mainline station and a rounded tip cap.
///
/// # Errors
///
/// Returns an error when a station references a missing airfoil.
pub fn stringer_rows(stations: &[Station], plan: &WingPlan) -> Result<Vec<StringerRow>> {
    let flags = station_flags(stations);

    let mut rows = Vec::with_capacity(plan.num_points());
    for index in 0..plan.num_points() {
        let mut points = Vec::with_capacity(stations.len());
        for station in stations {
            points.push(station.point_at(index, plan)?);
        }
        rows.push(StringerRow {
            points,
            flags: flags.clone(),
        });
    }
    Ok(rows)
}

fn station_flags(stations: &[Station]) -> Vec<TangencyFlag> {
    let n = stations.len();
    let mut flags: Vec<TangencyFlag> = stations
        .iter()
        .map(|s| {
            if s.smooth && s.cap == CapKind::None {
                TangencyFlag::Smooth
            } else {
                TangencyFlag::Sharp
            }
        })
        .collect();

    if n >= 2 && stations[n - 1].cap == CapKind::Rounded {
        flags[n - 1] = TangencyFlag::MirroredEnd;
        flags[n - 2] = TangencyFlag::OneSided;
    }
    flags
}

/// Fits every stringer row with the collaborator, returning the handles in
/// sample-index order.
///
/// # Errors
///
/// Returns an error when a station references a missing airfoil.
pub fn fit_stringers<C: CurveFit>(
    fitter: &mut C,
    stations: &[Station],
    plan: &WingPlan,
    tension: f64,
) -> Result<Vec<C::Handle>> {
    let rows = stringer_rows(stations, plan)?;
    Ok(rows
        .iter()
        .map(|row| fitter.build_curve(&row.points, &row.flags, tension))
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::loft::sequence;
    use crate::section::DriverMode;

    fn flat_plan() -> WingPlan {
        let mut plan = WingPlan::new();
        let sect = plan.section_mut(0).unwrap();
        sect.set_driver(DriverMode::SpanTipRoot);
        sect.set_span(10.0);
        sect.set_root_chord(4.0);
        sect.set_tip_chord(4.0);
        sect.set_sweep(0.0);
        plan
    }

    #[test]
    fn one_row_per_sample_index() {
        let plan = flat_plan();
        let stations = sequence(&plan).unwrap();
        let rows = stringer_rows(&stations, &plan).unwrap();

        assert_eq!(rows.len(), plan.num_points());
        for row in &rows {
            assert_eq!(row.points.len(), stations.len());
            assert_eq!(row.flags.len(), stations.len());
        }
    }

    #[test]
    fn default_flags_are_sharp() {
        let plan = flat_plan();
        let stations = sequence(&plan).unwrap();
        let rows = stringer_rows(&stations, &plan).unwrap();
        assert!(rows[0].flags.iter().all(|f| *f == TangencyFlag::Sharp));
    }

    #[test]
    fn smooth_blend_marks_stations() {
        let mut plan = flat_plan();
        plan.section_mut(0).unwrap().smooth_blend = true;
        let stations = sequence(&plan).unwrap();
        let rows = stringer_rows(&stations, &plan).unwrap();

        let flags = &rows[0].flags;
        // Caps stay sharp, mainline stations go smooth.
        assert_eq!(flags[0], TangencyFlag::Sharp);
        assert_eq!(flags[1], TangencyFlag::Smooth);
        assert_eq!(flags[2], TangencyFlag::Smooth);
        assert_eq!(flags[3], TangencyFlag::Sharp);
    }

    #[test]
    fn rounded_cap_gets_mirrored_end_condition() {
        let mut plan = flat_plan();
        plan.rounded_tip_cap = true;
        let stations = sequence(&plan).unwrap();
        let rows = stringer_rows(&stations, &plan).unwrap();

        let flags = &rows[0].flags;
        let n = flags.len();
        assert_eq!(flags[n - 1], TangencyFlag::MirroredEnd);
        assert_eq!(flags[n - 2], TangencyFlag::OneSided);
    }

    struct Polyline {
        curves: Vec<Vec<Point3>>,
    }

    impl CurveFit for Polyline {
        type Handle = usize;

        fn build_curve(
            &mut self,
            points: &[Point3],
            _flags: &[TangencyFlag],
            _tension: f64,
        ) -> usize {
            self.curves.push(points.to_vec());
            self.curves.len() - 1
        }

        fn evaluate(&self, handle: &usize, u: f64) -> Point3 {
            let curve = &self.curves[*handle];
            let n = curve.len() - 1;
            #[allow(clippy::cast_precision_loss)]
            let t = u.clamp(0.0, 1.0) * n as f64;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let i = (t.floor() as usize).min(n - 1);
            let f = t - t.floor();
            Point3::from(curve[i].coords.lerp(&curve[i + 1].coords, f))
        }
    }

    #[test]
    fn fitter_receives_every_row() {
        let plan = flat_plan();
        let stations = sequence(&plan).unwrap();
        let mut fitter = Polyline { curves: Vec::new() };

        let handles = fit_stringers(&mut fitter, &stations, &plan, 0.5).unwrap();
        assert_eq!(handles.len(), plan.num_points());

        // The fitted leading-edge stringer spans root to tip.
        let le = plan.num_points() / 2;
        let start = fitter.evaluate(&handles[le], 0.0);
        let end = fitter.evaluate(&handles[le], 1.0);
        assert!(start.y.abs() < 1e-9);
        assert!((end.y - 10.0).abs() < 1e-9);
    }
}
