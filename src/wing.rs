//! The wing plan: an airfoil store plus the chained section list.

use slotmap::SlotMap;

use crate::airfoil::{Airfoil, AirfoilId};
use crate::error::PlanError;
use crate::section::{DriverMode, Section};

/// A multi-section wing planform.
///
/// Owns every airfoil in a slotmap arena and the ordered section chain.
/// Adjacent sections share their boundary airfoil by id: the tip foil of
/// section `i` is the same arena entry as the root foil of section `i + 1`,
/// so editing it affects both panels.
#[derive(Debug, Clone)]
pub struct WingPlan {
    foils: SlotMap<AirfoilId, Airfoil>,
    sections: Vec<Section>,

    /// Twist values are increments over the inboard section.
    pub relative_twist: bool,
    /// Dihedral values are increments over the inboard section.
    pub relative_dihedral: bool,
    /// Cap the tip with a rounded (hemispherical) cap instead of a flat one.
    pub rounded_tip_cap: bool,
    /// Mirror the planform across the root plane for totals.
    pub symmetric: bool,

    num_points: usize,
}

impl Default for WingPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl WingPlan {
    /// Creates a plan with a single default section.
    #[must_use]
    pub fn new() -> Self {
        let mut foils = SlotMap::with_key();
        let root = foils.insert(Airfoil::default());
        let tip = foils.insert(Airfoil::default());
        Self {
            foils,
            sections: vec![Section::new(root, tip)],
            relative_twist: false,
            relative_dihedral: false,
            rounded_tip_cap: false,
            symmetric: true,
            num_points: Airfoil::DEFAULT_NUM_POINTS,
        }
    }

    // --- Store access ---

    #[must_use]
    pub fn foil(&self, id: AirfoilId) -> Option<&Airfoil> {
        self.foils.get(id)
    }

    pub fn foil_mut(&mut self, id: AirfoilId) -> Option<&mut Airfoil> {
        self.foils.get_mut(id)
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn section_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(index)
    }

    #[must_use]
    pub fn num_sections(&self) -> usize {
        self.sections.len()
    }

    /// Uniform sampled point count across every airfoil (always odd).
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Sets the point count on every airfoil in the plan, forcing it odd.
    pub fn set_num_points(&mut self, num_points: usize) {
        let n = if num_points % 2 == 0 {
            num_points + 1
        } else {
            num_points
        };
        self.num_points = n;
        for foil in self.foils.values_mut() {
            foil.set_num_points(n);
        }
    }

    // --- Section chain editing ---

    /// Appends a copy of the outboard section at the tip.
    ///
    /// The new section shares the old tip foil as its root and gets a fresh
    /// copy of it as its own tip.
    pub fn add_section(&mut self) -> usize {
        let last = self.sections.len() - 1;
        let mut sect = self.sections[last].clone();
        let shared = self.sections[last].tip_foil;

        let tip_copy = self
            .foils
            .get(shared)
            .cloned()
            .unwrap_or_default();
        let new_tip = self.foils.insert(tip_copy);

        sect.root_foil = shared;
        sect.tip_foil = new_tip;
        self.sections.push(sect);
        self.sections.len() - 1
    }

    /// Inserts a copy of section `index` immediately after it, introducing
    /// a new shared boundary foil cloned from the joint foil.
    ///
    /// # Errors
    ///
    /// Returns an error when `index` is out of range.
    pub fn insert_section(&mut self, index: usize) -> Result<usize, PlanError> {
        if index >= self.sections.len() {
            return Err(PlanError::SectionOutOfRange {
                index,
                len: self.sections.len(),
            });
        }

        let mut sect = self.sections[index].clone();
        let joint = self.sections[index].tip_foil;
        let boundary_copy = self
            .foils
            .get(joint)
            .cloned()
            .unwrap_or_default();
        let boundary = self.foils.insert(boundary_copy);

        // The original keeps its root, ends at the new boundary; the copy
        // runs from the new boundary to the original joint.
        self.sections[index].tip_foil = boundary;
        sect.root_foil = boundary;
        sect.tip_foil = joint;
        self.sections.insert(index + 1, sect);
        Ok(index + 1)
    }

    /// Removes section `index`, re-joining its neighbors on a shared
    /// boundary foil and dropping foils no longer referenced.
    ///
    /// # Errors
    ///
    /// Returns an error when `index` is out of range or when the plan would
    /// be left without any section.
    pub fn remove_section(&mut self, index: usize) -> Result<(), PlanError> {
        if index >= self.sections.len() {
            return Err(PlanError::SectionOutOfRange {
                index,
                len: self.sections.len(),
            });
        }
        if self.sections.len() == 1 {
            return Err(PlanError::EmptyPlan);
        }

        self.sections.remove(index);
        if index > 0 && index < self.sections.len() {
            // Interior removal: the outboard neighbor inherits the inboard
            // neighbor's tip foil as its root.
            self.sections[index].root_foil = self.sections[index - 1].tip_foil;
        }

        self.collect_unreferenced_foils();
        Ok(())
    }

    fn collect_unreferenced_foils(&mut self) {
        let referenced: Vec<AirfoilId> = self
            .sections
            .iter()
            .flat_map(|s| [s.root_foil, s.tip_foil])
            .collect();
        self.foils.retain(|id, _| referenced.contains(&id));
    }

    /// Propagates chords across every boundary, inboard to outboard: each
    /// section's root chord is forced to match its inboard neighbor's tip
    /// chord.
    ///
    /// The section is re-solved with the chord as a driving value and its
    /// original driver mode restored afterwards, so the declared driver is
    /// unchanged while the planform stays consistent.
    pub fn match_sections(&mut self) {
        for i in 1..self.sections.len() {
            let chord = self.sections[i - 1].tip_chord();
            let sect = &mut self.sections[i];
            let driver = sect.driver();
            sect.set_driver(DriverMode::SpanTipRoot);
            sect.set_root_chord(chord);
            sect.set_driver(driver);
        }
    }

    // --- Accumulated orientation ---

    /// Effective dihedral of section `index` in degrees, accumulated when
    /// the relative-dihedral mode is on.
    #[must_use]
    pub fn sum_dihedral(&self, index: usize) -> f64 {
        if self.relative_dihedral {
            self.sections[..=index.min(self.sections.len() - 1)]
                .iter()
                .map(Section::dihedral)
                .sum()
        } else {
            self.sections
                .get(index)
                .map_or(0.0, Section::dihedral)
        }
    }

    /// Effective twist at the tip of section `index` in degrees,
    /// accumulated when the relative-twist mode is on.
    #[must_use]
    pub fn sum_twist(&self, index: usize) -> f64 {
        if self.relative_twist {
            self.sections[..=index.min(self.sections.len() - 1)]
                .iter()
                .map(Section::twist)
                .sum()
        } else {
            self.sections.get(index).map_or(0.0, Section::twist)
        }
    }

    // --- Planform totals ---

    /// Total span along the section chain (both halves when symmetric).
    #[must_use]
    pub fn total_span(&self) -> f64 {
        let half: f64 = self.sections.iter().map(Section::span).sum();
        if self.symmetric {
            2.0 * half
        } else {
            half
        }
    }

    /// Span projected onto the horizontal plane, folding each panel by its
    /// effective dihedral.
    #[must_use]
    pub fn total_projected_span(&self) -> f64 {
        let half: f64 = self
            .sections
            .iter()
            .enumerate()
            .map(|(i, s)| s.span() * self.sum_dihedral(i).to_radians().cos())
            .sum();
        if self.symmetric {
            2.0 * half
        } else {
            half
        }
    }

    /// Total planform area (both halves when symmetric).
    #[must_use]
    pub fn total_area(&self) -> f64 {
        let half: f64 = self.sections.iter().map(Section::area).sum();
        if self.symmetric {
            2.0 * half
        } else {
            half
        }
    }

    /// Area-averaged chord.
    #[must_use]
    pub fn avg_chord(&self) -> f64 {
        let span = self.total_span();
        if span <= 0.0 {
            return 0.0;
        }
        self.total_area() / span
    }

    /// Overall aspect ratio, `span^2 / area`.
    #[must_use]
    pub fn total_aspect(&self) -> f64 {
        let area = self.total_area();
        if area <= 0.0 {
            return 0.0;
        }
        let span = self.total_span();
        span * span / area
    }

    /// Mean aerodynamic chord: the area-weighted average of each panel's
    /// trapezoidal MAC.
    #[must_use]
    pub fn mean_aero_chord(&self) -> f64 {
        let mut weighted = 0.0;
        let mut area = 0.0;
        for sect in &self.sections {
            let taper = sect.taper();
            let mac = (2.0 / 3.0) * sect.root_chord() * (1.0 + taper + taper * taper)
                / (1.0 + taper);
            weighted += mac * sect.area();
            area += sect.area();
        }
        if area <= 0.0 {
            return 0.0;
        }
        weighted / area
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::section::DriverMode;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-9;

    fn two_section_plan() -> WingPlan {
        let mut plan = WingPlan::new();
        plan.add_section();
        for sect in &mut plan.sections {
            sect.set_driver(DriverMode::SpanTipRoot);
        }
        plan
    }

    #[test]
    fn sections_share_boundary_foils() {
        let plan = two_section_plan();
        assert_eq!(plan.num_sections(), 2);
        assert_eq!(
            plan.sections()[0].tip_foil,
            plan.sections()[1].root_foil,
            "joint foil must be shared by id"
        );
        assert_eq!(plan.foils.len(), 3);
    }

    #[test]
    fn insert_splits_at_a_new_boundary() {
        let mut plan = two_section_plan();
        let old_joint = plan.sections()[0].tip_foil;

        let idx = plan.insert_section(0).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(plan.num_sections(), 3);
        assert_eq!(plan.sections()[1].tip_foil, old_joint);
        assert_eq!(plan.sections()[0].tip_foil, plan.sections()[1].root_foil);
        assert_ne!(plan.sections()[0].tip_foil, old_joint);
    }

    #[test]
    fn remove_rejoins_neighbors() {
        let mut plan = two_section_plan();
        plan.add_section();
        assert_eq!(plan.num_sections(), 3);

        plan.remove_section(1).unwrap();
        assert_eq!(plan.num_sections(), 2);
        assert_eq!(plan.sections()[0].tip_foil, plan.sections()[1].root_foil);
        // Orphaned boundary foils are dropped from the store.
        assert_eq!(plan.foils.len(), 3);
    }

    #[test]
    fn cannot_remove_last_section() {
        let mut plan = WingPlan::new();
        assert!(matches!(plan.remove_section(0), Err(PlanError::EmptyPlan)));
    }

    #[test]
    fn remove_out_of_range_is_reported() {
        let mut plan = two_section_plan();
        let err = plan.remove_section(7).unwrap_err();
        assert!(matches!(
            err,
            PlanError::SectionOutOfRange { index: 7, len: 2 }
        ));
    }

    #[test]
    fn match_sections_propagates_chords() {
        let mut plan = two_section_plan();
        plan.section_mut(0).unwrap().set_tip_chord(7.5);
        plan.match_sections();

        let sect = plan.section(1).unwrap();
        assert!((sect.root_chord() - 7.5).abs() < TOL);
        // The declared driver survives the propagation.
        assert_eq!(sect.driver(), DriverMode::SpanTipRoot);
        let taper = sect.tip_chord() / sect.root_chord();
        assert!((sect.taper() - taper).abs() < TOL, "identities hold");
    }

    #[test]
    fn symmetric_projected_span_folds_dihedral() {
        let mut plan = two_section_plan();
        for i in 0..2 {
            let sect = plan.section_mut(i).unwrap();
            sect.set_span(10.0);
            sect.set_dihedral(60.0);
        }

        // Each half: 10*cos(60) + 10*cos(60) = 10.
        let projected = plan.total_projected_span();
        assert!((projected - 20.0).abs() < 1e-9, "projected={projected}");
        assert!((plan.total_span() - 40.0).abs() < TOL);
    }

    #[test]
    fn relative_dihedral_accumulates() {
        let mut plan = two_section_plan();
        plan.relative_dihedral = true;
        plan.section_mut(0).unwrap().set_dihedral(10.0);
        plan.section_mut(1).unwrap().set_dihedral(15.0);

        assert!((plan.sum_dihedral(0) - 10.0).abs() < TOL);
        assert!((plan.sum_dihedral(1) - 25.0).abs() < TOL);

        plan.relative_dihedral = false;
        assert!((plan.sum_dihedral(1) - 15.0).abs() < TOL);
    }

    #[test]
    fn totals_are_consistent() {
        let mut plan = WingPlan::new();
        let sect = plan.section_mut(0).unwrap();
        sect.set_driver(DriverMode::SpanTipRoot);
        sect.set_span(10.0);
        sect.set_root_chord(5.0);
        sect.set_tip_chord(3.0);

        assert_relative_eq!(plan.total_area(), 80.0, epsilon = TOL);
        assert_relative_eq!(plan.total_span(), 20.0, epsilon = TOL);
        assert_relative_eq!(plan.avg_chord(), 4.0, epsilon = TOL);
        assert_relative_eq!(plan.total_aspect(), 5.0, epsilon = TOL);

        // Trapezoid MAC with taper 0.6.
        let taper: f64 = 0.6;
        let mac = (2.0 / 3.0) * 5.0 * (1.0 + taper + taper * taper) / (1.0 + taper);
        assert_relative_eq!(plan.mean_aero_chord(), mac, epsilon = TOL);
    }

    #[test]
    fn point_count_applies_to_all_foils() {
        let mut plan = two_section_plan();
        plan.set_num_points(40);
        assert_eq!(plan.num_points(), 41);
        for foil in plan.foils.values() {
            assert_eq!(foil.point_count(), 41);
        }
    }
}
