//! Section-joint blending: expands filleted joints into virtual sections.
//!
//! Each joint is viewed in three 2D planes (leading-edge sweep,
//! trailing-edge sweep, dihedral) sharing the cumulative span as abscissa.
//! The enabled edge fillets are computed, ranked, and their subdivision
//! breakpoints merged with the section boundaries into one spanwise
//! breakpoint set. Every interval between consecutive breakpoints becomes
//! a virtual sub-section: inside a family's fillet zone that family's
//! value follows the arc chord, outside it holds the owning section's
//! value.

use crate::airfoil::{Airfoil, AirfoilId};
use crate::error::PlanError;
use crate::fillet::{EdgeFamily, EdgeFillet};
use crate::math::{Point2, Vector2};
use crate::wing::WingPlan;
use crate::Result;

const SPAN_TOLERANCE: f64 = 1e-9;

/// The airfoil bounding a virtual sub-section at its tip.
#[derive(Debug, Clone)]
pub enum SubFoil {
    /// A real section boundary: the shared store entry is reused.
    Real(AirfoilId),
    /// An interior breakpoint: a freshly interpolated airfoil.
    Interp(Box<Airfoil>),
}

/// One spanwise panel of the blended plan.
///
/// Carries the effective per-family values for the panel itself plus the
/// station data at its tip breakpoint. The root station of panel `i + 1`
/// is the tip station of panel `i`.
#[derive(Debug, Clone)]
pub struct SubSection {
    /// Cumulative span at the panel root.
    pub root_span: f64,
    /// Cumulative span at the panel tip.
    pub tip_span: f64,

    /// Effective dihedral of this panel in degrees.
    pub dihedral: f64,
    /// Effective leading-edge sweep tangent.
    pub sweep_tan: f64,
    /// Effective trailing-edge sweep tangent.
    pub te_sweep_tan: f64,

    pub tip_chord: f64,
    pub tip_twist: f64,
    pub tip_twist_loc: f64,
    pub tip_foil: SubFoil,

    /// Index of the source section containing this panel.
    pub section: usize,
    /// Fraction within the source section at the panel tip.
    pub tip_fract: f64,

    pub smooth: bool,
    pub dihedral_rot: bool,
}

impl SubSection {
    /// Spanwise length of the panel.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.tip_span - self.root_span
    }
}

/// Cumulative span at every section boundary (`num_sections + 1` values).
#[must_use]
pub fn boundary_spans(plan: &WingPlan) -> Vec<f64> {
    let mut spans = Vec::with_capacity(plan.num_sections() + 1);
    let mut s = 0.0;
    spans.push(s);
    for sect in plan.sections() {
        s += sect.span();
        spans.push(s);
    }
    spans
}

/// Computes the enabled edge fillets at joint `joint` (between sections
/// `joint` and `joint + 1`), ranked by first-subdivision spanwise length
/// with the edge-family order as tie-break.
#[must_use]
pub fn joint_fillets(plan: &WingPlan, joint: usize) -> Vec<EdgeFillet> {
    let sections = plan.sections();
    if joint + 1 >= sections.len() {
        return Vec::new();
    }
    let inboard = &sections[joint];
    let outboard = &sections[joint + 1];
    let vertex = Point2::new(boundary_spans(plan)[joint + 1], 0.0);
    let config = &inboard.fillet;

    let mut fillets = Vec::new();

    let families = [
        (
            EdgeFamily::LeadingSweep,
            sweep_dir(inboard.tan_sweep_at(0.0)),
            sweep_dir(outboard.tan_sweep_at(0.0)),
            &config.sweep,
        ),
        (
            EdgeFamily::TrailingSweep,
            sweep_dir(inboard.tan_sweep_te()),
            sweep_dir(outboard.tan_sweep_te()),
            &config.te_sweep,
        ),
        (
            EdgeFamily::Dihedral,
            dihedral_dir(plan.sum_dihedral(joint)),
            dihedral_dir(plan.sum_dihedral(joint + 1)),
            &config.dihedral,
        ),
    ];

    for (family, dir_in, dir_out, cfg) in families {
        if let Some(fillet) = EdgeFillet::compute(
            family,
            vertex,
            dir_in,
            dir_out,
            inboard.span(),
            outboard.span(),
            cfg,
        ) {
            fillets.push(fillet);
        }
    }

    fillets.sort_by(|a, b| {
        a.first_seg_span
            .partial_cmp(&b.first_seg_span)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.family.cmp(&b.family))
    });
    fillets
}

/// Expands the whole plan into virtual sub-sections.
///
/// Every section boundary is a breakpoint; each enabled fillet contributes
/// its subdivision breakpoints. Panels never invert travel direction: the
/// breakpoint set is strictly increasing along span.
///
/// # Errors
///
/// Returns an error when the plan has no sections or a section references
/// a missing airfoil.
pub fn blend_plan(plan: &WingPlan) -> Result<Vec<SubSection>> {
    if plan.num_sections() == 0 {
        return Err(PlanError::EmptyPlan.into());
    }
    let boundaries = boundary_spans(plan);

    let mut fillets: Vec<EdgeFillet> = Vec::new();
    for joint in 0..plan.num_sections().saturating_sub(1) {
        fillets.extend(joint_fillets(plan, joint));
    }

    let mut breakpoints = boundaries.clone();
    for fillet in &fillets {
        breakpoints.extend(fillet.breakpoints());
    }
    breakpoints.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    breakpoints.dedup_by(|a, b| (*a - *b).abs() < SPAN_TOLERANCE);

    let mut panels = Vec::with_capacity(breakpoints.len() - 1);
    for pair in breakpoints.windows(2) {
        let (s0, s1) = (pair[0], pair[1]);
        let mid = 0.5 * (s0 + s1);
        let sect_index = section_at(&boundaries, mid);
        let sect = &plan.sections()[sect_index];

        let dihedral = family_angle(&fillets, EdgeFamily::Dihedral, s0, s1, mid)
            .unwrap_or_else(|| plan.sum_dihedral(sect_index));
        let sweep_tan = family_slope(&fillets, EdgeFamily::LeadingSweep, s0, s1, mid)
            .unwrap_or_else(|| sect.tan_sweep_at(0.0));
        let te_sweep_tan = family_slope(&fillets, EdgeFamily::TrailingSweep, s0, s1, mid)
            .unwrap_or_else(|| sect.tan_sweep_te());

        let tip = station_data(plan, &boundaries, s1)?;

        panels.push(SubSection {
            root_span: s0,
            tip_span: s1,
            dihedral,
            sweep_tan,
            te_sweep_tan,
            tip_chord: tip.chord,
            tip_twist: tip.twist,
            tip_twist_loc: tip.twist_loc,
            tip_foil: tip.foil,
            section: sect_index,
            tip_fract: tip.fract,
            smooth: sect.smooth_blend,
            dihedral_rot: sect.dihedral_rot,
        });
    }

    Ok(panels)
}

fn sweep_dir(tan: f64) -> Vector2 {
    Vector2::new(1.0, tan)
}

fn dihedral_dir(angle_deg: f64) -> Vector2 {
    let a = angle_deg.to_radians();
    Vector2::new(a.cos(), a.sin())
}

/// Index of the section containing cumulative span `s`.
fn section_at(boundaries: &[f64], s: f64) -> usize {
    for (i, pair) in boundaries.windows(2).enumerate() {
        if s < pair[1] {
            return i;
        }
    }
    boundaries.len().saturating_sub(2)
}

/// Arc-chord angle in degrees for `family` over `[s0, s1]`, when the
/// interval lies inside that family's fillet zone.
fn family_angle(
    fillets: &[EdgeFillet],
    family: EdgeFamily,
    s0: f64,
    s1: f64,
    mid: f64,
) -> Option<f64> {
    let (p0, p1) = chord_points(fillets, family, s0, s1, mid)?;
    Some((p1.y - p0.y).atan2(p1.x - p0.x).to_degrees())
}

/// Arc-chord slope (ordinate per span) for `family` over `[s0, s1]`.
fn family_slope(
    fillets: &[EdgeFillet],
    family: EdgeFamily,
    s0: f64,
    s1: f64,
    mid: f64,
) -> Option<f64> {
    let (p0, p1) = chord_points(fillets, family, s0, s1, mid)?;
    let ds = p1.x - p0.x;
    if ds.abs() < SPAN_TOLERANCE {
        return None;
    }
    Some((p1.y - p0.y) / ds)
}

fn chord_points(
    fillets: &[EdgeFillet],
    family: EdgeFamily,
    s0: f64,
    s1: f64,
    mid: f64,
) -> Option<(Point2, Point2)> {
    let fillet = fillets.iter().find(|f| {
        f.family == family
            && mid > f.arc.point_at(0.0).x + SPAN_TOLERANCE
            && mid < f.arc.point_at(1.0).x - SPAN_TOLERANCE
    })?;
    let p0 = fillet.arc.point_at(fillet.fraction_at_span(s0));
    let p1 = fillet.arc.point_at(fillet.fraction_at_span(s1));
    Some((p0, p1))
}

struct StationData {
    chord: f64,
    twist: f64,
    twist_loc: f64,
    fract: f64,
    foil: SubFoil,
}

/// Station quantities at cumulative span `s`, linearly interpolated within
/// the owning section; real section boundaries reuse the shared foil id.
fn station_data(plan: &WingPlan, boundaries: &[f64], s: f64) -> Result<StationData> {
    // Boundary coincidence: reuse the real foil.
    for (i, &b) in boundaries.iter().enumerate() {
        if (s - b).abs() < SPAN_TOLERANCE {
            let (sect_index, fract, id) = if i == 0 {
                (0, 0.0, plan.sections()[0].root_foil)
            } else {
                (i - 1, 1.0, plan.sections()[i - 1].tip_foil)
            };
            let sect = &plan.sections()[sect_index];
            return Ok(StationData {
                chord: lerp(sect.root_chord(), sect.tip_chord(), fract),
                twist: boundary_twist(plan, i),
                twist_loc: sect.twist_loc(),
                fract,
                foil: SubFoil::Real(id),
            });
        }
    }

    let sect_index = section_at(boundaries, s);
    let sect = &plan.sections()[sect_index];
    let fract = ((s - boundaries[sect_index]) / sect.span()).clamp(0.0, 1.0);

    let root = plan
        .foil(sect.root_foil)
        .ok_or(PlanError::FoilNotFound)?;
    let tip = plan.foil(sect.tip_foil).ok_or(PlanError::FoilNotFound)?;
    let foil = SubFoil::Interp(Box::new(Airfoil::interpolated(root, tip, fract)));

    Ok(StationData {
        chord: lerp(sect.root_chord(), sect.tip_chord(), fract),
        twist: lerp(
            boundary_twist(plan, sect_index),
            boundary_twist(plan, sect_index + 1),
            fract,
        ),
        twist_loc: sect.twist_loc(),
        fract,
        foil,
    })
}

/// Twist at section boundary `index` in degrees (0 at the wing root).
fn boundary_twist(plan: &WingPlan, index: usize) -> f64 {
    if index == 0 {
        return 0.0;
    }
    plan.sum_twist(index - 1)
}

fn lerp(a: f64, b: f64, f: f64) -> f64 {
    a + (b - a) * f
}
