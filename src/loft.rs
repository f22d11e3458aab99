//! Station sequencing: turns the blended plan into ordered 3D stations.
//!
//! The wing is lofted root to tip. Each blended panel advances the running
//! leading-edge offset by its span folded through the effective dihedral
//! and sweep, and deposits a station at its tip breakpoint. The first and
//! last stations are duplicated as end caps.

use crate::blend::{blend_plan, SubFoil};
use crate::error::PlanError;
use crate::math::{Point3, Vector3};
use crate::wing::WingPlan;
use crate::Result;

/// End-cap role of a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapKind {
    /// A regular lofted cross section.
    None,
    /// A degenerate cap collapsed onto the section mean line.
    Flat,
    /// A hemispherical cap bulging spanwise.
    Rounded,
}

/// One lofted cross section.
///
/// Stations are strictly ordered root to tip; `offset` is the absolute
/// position of the section's leading edge.
#[derive(Debug, Clone)]
pub struct Station {
    pub offset: Vector3,
    pub chord: f64,
    /// Twist in degrees, positive leading edge up.
    pub twist: f64,
    /// Chordwise fraction the twist rotates about.
    pub twist_loc: f64,
    /// Roll in degrees from dihedral rotation.
    pub roll: f64,
    pub foil: SubFoil,
    /// Source section index.
    pub section: usize,
    /// Fraction within the source section.
    pub fract: f64,
    /// Smooth-blend continuity request from the source section.
    pub smooth: bool,
    pub cap: CapKind,
}

impl Station {
    /// Evaluates surface point `index` of this station in absolute
    /// coordinates: the foil sample scaled by chord, twisted about the
    /// twist pivot, rolled, and offset.
    ///
    /// # Errors
    ///
    /// Returns an error when a referenced airfoil is missing from the
    /// plan's store.
    pub fn point_at(&self, index: usize, plan: &WingPlan) -> Result<Point3> {
        let base = match &self.foil {
            SubFoil::Real(id) => {
                let foil = plan.foil(*id).ok_or(PlanError::FoilNotFound)?;
                self.base_point(foil, index)
            }
            SubFoil::Interp(foil) => self.base_point(foil, index),
        };

        // Chord scale.
        let mut p = Point3::from(base.coords * self.chord);

        // Twist about the pivot on the chord line.
        let pivot = self.twist_loc * self.chord;
        let t = self.twist.to_radians();
        let (x, z) = (p.x - pivot, p.z);
        p.x = pivot + x * t.cos() + z * t.sin();
        p.z = -x * t.sin() + z * t.cos();

        // Roll about the chordwise axis.
        let r = self.roll.to_radians();
        let (y, z) = (p.y, p.z);
        p.y = y * r.cos() - z * r.sin();
        p.z = y * r.sin() + z * r.cos();

        Ok(p + self.offset)
    }

    fn base_point(&self, foil: &crate::airfoil::Airfoil, index: usize) -> Point3 {
        match self.cap {
            CapKind::None => {
                let p2 = foil.point_at(index);
                Point3::new(p2.x, 0.0, p2.y)
            }
            CapKind::Flat => foil.end_cap_point(index),
            CapKind::Rounded => foil.rounded_end_cap_point(index),
        }
    }
}

/// Sequences the full plan into ordered stations, end caps included.
///
/// Each panel contributes `dy = span cos(dihedral)`, `dz = span
/// sin(dihedral)`, `dx = span * leading-edge sweep tangent` to the running
/// offset. Twist and dihedral accumulation follow the plan's relative
/// modes through the blended panel values.
///
/// # Errors
///
/// Returns an error when the plan is empty or references a missing foil.
pub fn sequence(plan: &WingPlan) -> Result<Vec<Station>> {
    let panels = blend_plan(plan)?;
    let sect0 = &plan.sections()[0];

    let mut stations = Vec::with_capacity(panels.len() + 3);

    let root = Station {
        offset: Vector3::zeros(),
        chord: sect0.root_chord(),
        twist: 0.0,
        twist_loc: sect0.twist_loc(),
        roll: if sect0.dihedral_rot {
            panels[0].dihedral
        } else {
            0.0
        },
        foil: SubFoil::Real(sect0.root_foil),
        section: 0,
        fract: 0.0,
        smooth: sect0.smooth_blend,
        cap: CapKind::None,
    };

    let mut root_cap = root.clone();
    root_cap.cap = CapKind::Flat;
    stations.push(root_cap);
    stations.push(root);

    let mut offset = Vector3::zeros();
    for (i, panel) in panels.iter().enumerate() {
        let w = panel.span();
        let d = panel.dihedral.to_radians();
        offset += Vector3::new(w * panel.sweep_tan, w * d.cos(), w * d.sin());

        stations.push(Station {
            offset,
            chord: panel.tip_chord,
            twist: panel.tip_twist,
            twist_loc: panel.tip_twist_loc,
            roll: station_roll(&panels, i),
            foil: panel.tip_foil.clone(),
            section: panel.section,
            fract: panel.tip_fract,
            smooth: panel.smooth,
            cap: CapKind::None,
        });
    }

    let last = stations
        .last()
        .cloned()
        .ok_or(PlanError::EmptyPlan)?;
    let mut tip_cap = last;
    tip_cap.cap = if plan.rounded_tip_cap {
        CapKind::Rounded
    } else {
        CapKind::Flat
    };
    stations.push(tip_cap);

    Ok(stations)
}

/// Roll for the station at the tip of panel `i`: the local dihedral when
/// dihedral rotation is on, averaged with the next panel at interior
/// boundaries.
fn station_roll(panels: &[crate::blend::SubSection], i: usize) -> f64 {
    if !panels[i].dihedral_rot {
        return 0.0;
    }
    match panels.get(i + 1) {
        Some(next) => 0.5 * (panels[i].dihedral + next.dihedral),
        None => panels[i].dihedral,
    }
}
