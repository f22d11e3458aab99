//! Per-edge-family fillet geometry at a section joint.
//!
//! A joint is viewed in three 2D planes, one per edge family: the
//! leading-edge sweep line and trailing-edge sweep line live in the
//! (span, chordwise-offset) plane, the dihedral line in the (span, height)
//! plane. In each plane the two section edges meet at the joint vertex and
//! the fillet replaces the corner with a circular arc tangent to both.

use crate::math::fillet_2d::TangentArc;
use crate::math::{Point2, Vector2, ANGLE_TOLERANCE};

/// Which joint edge a fillet applies to.
///
/// The ordering is the documented tie-break when fillets are ranked by
/// first-subdivision spanwise length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EdgeFamily {
    LeadingSweep,
    TrailingSweep,
    Dihedral,
}

/// Fillet sizing for one edge family at one joint.
#[derive(Debug, Clone, Copy)]
pub struct FilletConfig {
    extent: f64,
    deg_per_seg: f64,
}

impl FilletConfig {
    /// Creates a config from an extent (fraction of adjacent span consumed
    /// on each side of the joint) and a subdivision limit in degrees of
    /// arc per segment.
    ///
    /// Extents outside `[0, 0.5]` disable the fillet rather than failing;
    /// the degrees-per-segment limit clamps to `[1, 30]`.
    #[must_use]
    pub fn new(extent: f64, deg_per_seg: f64) -> Self {
        let mut config = Self {
            extent: 0.0,
            deg_per_seg: 9.0,
        };
        config.set_extent(extent);
        config.set_deg_per_seg(deg_per_seg);
        config
    }

    /// Fraction of each adjacent section's span consumed by the fillet.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.extent
    }

    pub fn set_extent(&mut self, extent: f64) {
        self.extent = if (0.0..=0.5).contains(&extent) {
            extent
        } else {
            0.0
        };
    }

    /// Maximum degrees of arc swept by one subdivision.
    #[must_use]
    pub fn deg_per_seg(&self) -> f64 {
        self.deg_per_seg
    }

    pub fn set_deg_per_seg(&mut self, deg_per_seg: f64) {
        self.deg_per_seg = deg_per_seg.clamp(1.0, 30.0);
    }

    /// Whether this config produces any fillet at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.extent > 0.0
    }
}

impl Default for FilletConfig {
    fn default() -> Self {
        Self {
            extent: 0.0,
            deg_per_seg: 9.0,
        }
    }
}

/// Fillet configuration for all three edge families at a joint.
#[derive(Debug, Clone, Copy, Default)]
pub struct JointFillet {
    pub sweep: FilletConfig,
    pub te_sweep: FilletConfig,
    pub dihedral: FilletConfig,
}

impl JointFillet {
    #[must_use]
    pub fn config(&self, family: EdgeFamily) -> &FilletConfig {
        match family {
            EdgeFamily::LeadingSweep => &self.sweep,
            EdgeFamily::TrailingSweep => &self.te_sweep,
            EdgeFamily::Dihedral => &self.dihedral,
        }
    }
}

/// The computed fillet for one edge family at one joint.
#[derive(Debug, Clone)]
pub struct EdgeFillet {
    pub family: EdgeFamily,
    /// The tangent arc in the family's joint plane (abscissa = span).
    pub arc: TangentArc,
    /// Number of arc subdivisions, `ceil(|turn degrees| / deg_per_seg)`.
    pub segments: usize,
    /// Sweep fraction where the arc crosses the joint span ordinate.
    pub split: f64,
    /// Spanwise length of the first subdivision (edge ranking key).
    pub first_seg_span: f64,
    /// Spanwise extent of the fillet before the joint.
    pub root_span: f64,
    /// Spanwise extent of the fillet after the joint.
    pub tip_span: f64,
}

impl EdgeFillet {
    /// Computes the fillet for one edge family.
    ///
    /// `vertex` is the joint point in the family's plane, `dir_in` /
    /// `dir_out` the travel directions of the root-side and tip-side edges
    /// (spanwise component positive), and `span_in` / `span_out` the spans
    /// of the adjacent sections.
    ///
    /// Returns `None` when the config is disabled, the edges are collinear
    /// (no corner to round), or either edge direction is degenerate.
    #[must_use]
    pub fn compute(
        family: EdgeFamily,
        vertex: Point2,
        dir_in: Vector2,
        dir_out: Vector2,
        span_in: f64,
        span_out: f64,
        config: &FilletConfig,
    ) -> Option<Self> {
        if !config.is_enabled() {
            return None;
        }
        let len_in = dir_in.norm();
        let len_out = dir_out.norm();
        if len_in < ANGLE_TOLERANCE || len_out < ANGLE_TOLERANCE {
            return None;
        }
        let da = dir_in / len_in;
        let db = dir_out / len_out;
        // Edges must advance in span for the arc abscissa to stay monotone.
        if da.x < ANGLE_TOLERANCE || db.x < ANGLE_TOLERANCE {
            return None;
        }

        // Boundary points sit extent * span back / forward along each edge;
        // the tangent length is the shorter of the two boundary distances.
        let dist_in = config.extent() * span_in / da.x;
        let dist_out = config.extent() * span_out / db.x;
        let tangent_len = dist_in.min(dist_out);

        let arc = TangentArc::from_corner(vertex, da, db, tangent_len)?;

        let turn_deg = arc.sweep.to_degrees().abs();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let segments = ((turn_deg / config.deg_per_seg()).ceil() as usize).max(1);

        #[allow(clippy::cast_precision_loss)]
        let first_seg_span = arc.abscissa_span(0.0, 1.0 / segments as f64);
        let split = arc.split_at_abscissa(vertex.x);
        let root_span = vertex.x - arc.point_at(0.0).x;
        let tip_span = arc.point_at(1.0).x - vertex.x;

        Some(Self {
            family,
            arc,
            segments,
            split,
            first_seg_span,
            root_span,
            tip_span,
        })
    }

    /// Span abscissas of the subdivision boundaries, root to tip
    /// (`segments + 1` values, strictly increasing).
    #[must_use]
    pub fn breakpoints(&self) -> Vec<f64> {
        #[allow(clippy::cast_precision_loss)]
        (0..=self.segments)
            .map(|i| self.arc.point_at(i as f64 / self.segments as f64).x)
            .collect()
    }

    /// Sweep fraction where the arc crosses span abscissa `s`, clamped to
    /// the arc's extent.
    #[must_use]
    pub fn fraction_at_span(&self, s: f64) -> f64 {
        self.arc.split_at_abscissa(s)
    }
}
