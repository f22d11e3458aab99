//! External six-series ordinate table collaborator.

use crate::math::Point2;

/// Supplies raw six-series upper/lower ordinate tables.
///
/// The tables historically come from a Fortran generation routine; this
/// core only consumes the resulting point lists. Both returned curves must
/// run leading edge to trailing edge.
pub trait SixSeriesTable {
    /// Looks up the ordinates for a series id (63..=67), a thickness
    /// ratio, an ideal lift coefficient, and the mean-line loading
    /// parameter `a`.
    fn lookup(
        &self,
        series: u32,
        thickness: f64,
        ideal_cl: f64,
        a_loading: f64,
    ) -> (Vec<Point2>, Vec<Point2>);
}
