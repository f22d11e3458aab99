//! Trapezoidal wing sections and the driver-mode parameter solver.

use crate::airfoil::AirfoilId;
use crate::fillet::JointFillet;
use crate::param::Param;

/// The triple of planform quantities treated as independent drivers.
///
/// Two identities bind the six planform quantities (`taper = tip/root`,
/// `aspect = 2 span / (root (1 + taper))`, `area = span^2 / aspect`), so
/// choosing three independent values determines the rest in closed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverMode {
    /// Aspect ratio, taper ratio, area.
    ArTrArea,
    /// Aspect ratio, taper ratio, span.
    ArTrSpan,
    /// Aspect ratio, taper ratio, tip chord.
    ArTrTipChord,
    /// Aspect ratio, taper ratio, root chord.
    ArTrRootChord,
    /// Span, tip chord, root chord.
    SpanTipRoot,
    /// Area, tip chord, root chord.
    AreaTipRoot,
    /// Taper ratio, span, area.
    TrSpanArea,
}

/// One trapezoidal wing panel between two stations.
///
/// Owns its planform and orientation parameters plus the ids of its
/// bounding airfoils; the tip airfoil of section `i` is the same store
/// entry as the root airfoil of section `i + 1`.
#[derive(Debug, Clone)]
pub struct Section {
    driver: DriverMode,

    span: Param,
    tip_chord: Param,
    root_chord: Param,
    aspect: Param,
    taper: Param,
    area: Param,

    sweep: Param,
    sweep_loc: Param,
    twist: Param,
    twist_loc: Param,
    dihedral: Param,

    /// Roll the stations of this section by the local dihedral.
    pub dihedral_rot: bool,
    /// Request smooth (tangent-free) stringer continuity across this
    /// section's stations.
    pub smooth_blend: bool,

    /// Fillet configuration for the joint at this section's tip.
    pub fillet: JointFillet,

    pub root_foil: AirfoilId,
    pub tip_foil: AirfoilId,
}

impl Section {
    /// Creates a section with default planform values, bounded by the
    /// given root and tip airfoils.
    #[must_use]
    pub fn new(root_foil: AirfoilId, tip_foil: AirfoilId) -> Self {
        let mut sect = Self {
            driver: DriverMode::SpanTipRoot,
            span: Param::new(30.0, 1e-4, 1e6),
            tip_chord: Param::new(10.0, 1e-4, 1e6),
            root_chord: Param::new(20.0, 1e-4, 1e6),
            aspect: Param::new(1.0, 0.001, 1000.0),
            taper: Param::new(1.0, 0.001, 1000.0),
            area: Param::new(1.0, 1e-4, 1e6),
            sweep: Param::new(10.0, -85.0, 85.0),
            sweep_loc: Param::new(0.0, 0.0, 1.0),
            twist: Param::new(0.0, -45.0, 45.0),
            twist_loc: Param::new(0.0, 0.0, 1.0),
            dihedral: Param::new(0.0, -360.0, 360.0),
            dihedral_rot: false,
            smooth_blend: false,
            fillet: JointFillet::default(),
            root_foil,
            tip_foil,
        };
        sect.set_driver(DriverMode::SpanTipRoot);
        sect.solve();
        sect
    }

    /// Selects which three planform quantities are independent.
    pub fn set_driver(&mut self, driver: DriverMode) {
        self.driver = driver;

        self.aspect.deactivate();
        self.taper.deactivate();
        self.area.deactivate();
        self.span.deactivate();
        self.tip_chord.deactivate();
        self.root_chord.deactivate();

        match driver {
            DriverMode::ArTrArea => {
                self.aspect.activate();
                self.taper.activate();
                self.area.activate();
            }
            DriverMode::ArTrSpan => {
                self.aspect.activate();
                self.taper.activate();
                self.span.activate();
            }
            DriverMode::ArTrTipChord => {
                self.aspect.activate();
                self.taper.activate();
                self.tip_chord.activate();
            }
            DriverMode::ArTrRootChord => {
                self.aspect.activate();
                self.taper.activate();
                self.root_chord.activate();
            }
            DriverMode::SpanTipRoot => {
                self.span.activate();
                self.tip_chord.activate();
                self.root_chord.activate();
            }
            DriverMode::AreaTipRoot => {
                self.area.activate();
                self.tip_chord.activate();
                self.root_chord.activate();
            }
            DriverMode::TrSpanArea => {
                self.taper.activate();
                self.span.activate();
                self.area.activate();
            }
        }
    }

    /// Current driver mode.
    #[must_use]
    pub fn driver(&self) -> DriverMode {
        self.driver
    }

    /// Recomputes the dependent planform quantities from the independent
    /// triple. Exact and total: no search or iteration; positive lower
    /// bounds on every parameter keep all divisors non-zero.
    pub fn solve(&mut self) {
        match self.driver {
            DriverMode::ArTrArea => {
                self.span.set((self.aspect.get() * self.area.get()).sqrt());
                self.root_chord.set(
                    2.0 * self.span.get() / (self.aspect.get() * (1.0 + self.taper.get())),
                );
                self.tip_chord.set(self.taper.get() * self.root_chord.get());
            }
            DriverMode::ArTrSpan => {
                self.area
                    .set(self.span.get() * self.span.get() / self.aspect.get());
                self.root_chord.set(
                    2.0 * self.span.get() / (self.aspect.get() * (1.0 + self.taper.get())),
                );
                self.tip_chord.set(self.taper.get() * self.root_chord.get());
            }
            DriverMode::ArTrTipChord => {
                self.root_chord.set(self.tip_chord.get() / self.taper.get());
                self.span.set(
                    0.5 * self.aspect.get() * self.root_chord.get() * (1.0 + self.taper.get()),
                );
                self.area
                    .set(self.span.get() * self.span.get() / self.aspect.get());
            }
            DriverMode::ArTrRootChord => {
                self.tip_chord.set(self.taper.get() * self.root_chord.get());
                self.span.set(
                    0.5 * self.aspect.get() * self.root_chord.get() * (1.0 + self.taper.get()),
                );
                self.area
                    .set(self.span.get() * self.span.get() / self.aspect.get());
            }
            DriverMode::SpanTipRoot => {
                self.taper.set(self.tip_chord.get() / self.root_chord.get());
                self.aspect.set(
                    2.0 * self.span.get() / (self.root_chord.get() * (1.0 + self.taper.get())),
                );
                self.area
                    .set(self.span.get() * self.span.get() / self.aspect.get());
            }
            DriverMode::AreaTipRoot => {
                self.taper.set(self.tip_chord.get() / self.root_chord.get());
                self.span.set(
                    2.0 * self.area.get() / (self.root_chord.get() + self.tip_chord.get()),
                );
                self.aspect
                    .set(self.span.get() * self.span.get() / self.area.get());
            }
            DriverMode::TrSpanArea => {
                self.aspect
                    .set(self.span.get() * self.span.get() / self.area.get());
                self.root_chord.set(
                    2.0 * self.span.get() / (self.aspect.get() * (1.0 + self.taper.get())),
                );
                self.tip_chord.set(self.taper.get() * self.root_chord.get());
            }
        }
    }

    /// Tangent of the sweep angle at chordwise location `loc`, derived
    /// from the stored sweep at its reference location via the
    /// taper/aspect relation. Moving the reference does not change the
    /// physical geometry.
    #[must_use]
    pub fn tan_sweep_at(&self, loc: f64) -> f64 {
        self.tan_sweep_at_with(loc, self.sweep.get())
    }

    /// Same as [`Self::tan_sweep_at`] with an explicit sweep angle in
    /// degrees (used to apply a global sweep offset).
    #[must_use]
    pub fn tan_sweep_at_with(&self, loc: f64, sweep_deg: f64) -> f64 {
        sweep_deg.to_radians().tan()
            - (2.0 / self.aspect.get())
                * ((loc - self.sweep_loc.get()) * (1.0 - self.taper.get())
                    / (1.0 + self.taper.get()))
    }

    /// Tangent of the trailing-edge sweep angle.
    #[must_use]
    pub fn tan_sweep_te(&self) -> f64 {
        self.tan_sweep_at(1.0)
    }

    // --- Planform accessors (setters re-solve the dependent set) ---

    #[must_use]
    pub fn span(&self) -> f64 {
        self.span.get()
    }

    pub fn set_span(&mut self, value: f64) {
        self.span.set(value);
        self.solve();
    }

    #[must_use]
    pub fn tip_chord(&self) -> f64 {
        self.tip_chord.get()
    }

    pub fn set_tip_chord(&mut self, value: f64) {
        self.tip_chord.set(value);
        self.solve();
    }

    #[must_use]
    pub fn root_chord(&self) -> f64 {
        self.root_chord.get()
    }

    pub fn set_root_chord(&mut self, value: f64) {
        self.root_chord.set(value);
        self.solve();
    }

    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.aspect.get()
    }

    pub fn set_aspect(&mut self, value: f64) {
        self.aspect.set(value);
        self.solve();
    }

    #[must_use]
    pub fn taper(&self) -> f64 {
        self.taper.get()
    }

    pub fn set_taper(&mut self, value: f64) {
        self.taper.set(value);
        self.solve();
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.area.get()
    }

    pub fn set_area(&mut self, value: f64) {
        self.area.set(value);
        self.solve();
    }

    // --- Orientation accessors ---

    /// Sweep angle in degrees at the sweep reference location.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.sweep.get()
    }

    pub fn set_sweep(&mut self, value: f64) {
        self.sweep.set(value);
    }

    /// Chordwise fraction where the sweep angle is measured.
    #[must_use]
    pub fn sweep_loc(&self) -> f64 {
        self.sweep_loc.get()
    }

    /// Moves the sweep reference location, adjusting the stored sweep so
    /// the physical geometry is unchanged.
    pub fn set_sweep_loc(&mut self, loc: f64) {
        let loc = loc.clamp(0.0, 1.0);
        let tan_here = self.tan_sweep_at(loc);
        self.sweep.set(tan_here.atan().to_degrees());
        self.sweep_loc.set(loc);
    }

    /// Twist angle in degrees.
    #[must_use]
    pub fn twist(&self) -> f64 {
        self.twist.get()
    }

    pub fn set_twist(&mut self, value: f64) {
        self.twist.set(value);
    }

    /// Chordwise fraction the twist rotates about.
    #[must_use]
    pub fn twist_loc(&self) -> f64 {
        self.twist_loc.get()
    }

    pub fn set_twist_loc(&mut self, value: f64) {
        self.twist_loc.set(value);
    }

    /// Dihedral angle in degrees.
    #[must_use]
    pub fn dihedral(&self) -> f64 {
        self.dihedral.get()
    }

    pub fn set_dihedral(&mut self, value: f64) {
        self.dihedral.set(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airfoil::AirfoilId;

    const TOL: f64 = 1e-9;

    fn section() -> Section {
        Section::new(AirfoilId::default(), AirfoilId::default())
    }

    #[test]
    fn span_tip_root_solves_dependents() {
        let mut s = section();
        s.set_driver(DriverMode::SpanTipRoot);
        s.set_span(10.0);
        s.set_root_chord(5.0);
        s.set_tip_chord(3.0);

        assert!((s.taper() - 0.6).abs() < TOL);
        assert!((s.aspect() - 2.5).abs() < TOL);
        assert!((s.area() - 40.0).abs() < TOL);
    }

    #[test]
    fn driver_round_trip_ar_tr_area() {
        let mut s = section();
        s.set_driver(DriverMode::ArTrArea);
        s.set_aspect(6.0);
        s.set_taper(0.4);
        s.set_area(120.0);

        // Re-derive the driver triple from the solved quantities.
        let span = s.span();
        let rc = s.root_chord();
        let tc = s.tip_chord();
        let taper = tc / rc;
        let aspect = 2.0 * span / (rc * (1.0 + taper));
        let area = span * span / aspect;

        assert!((taper - 0.4).abs() < 1e-9, "taper={taper}");
        assert!((aspect - 6.0).abs() < 1e-9, "aspect={aspect}");
        assert!((area - 120.0).abs() < 1e-9, "area={area}");
    }

    #[test]
    fn area_tip_root_is_consistent() {
        let mut s = section();
        s.set_driver(DriverMode::AreaTipRoot);
        s.set_area(40.0);
        s.set_root_chord(5.0);
        s.set_tip_chord(3.0);

        assert!((s.span() - 10.0).abs() < TOL, "span={}", s.span());
        assert!((s.aspect() - 2.5).abs() < TOL);
    }

    #[test]
    fn all_drivers_satisfy_identities() {
        for driver in [
            DriverMode::ArTrArea,
            DriverMode::ArTrSpan,
            DriverMode::ArTrTipChord,
            DriverMode::ArTrRootChord,
            DriverMode::SpanTipRoot,
            DriverMode::AreaTipRoot,
            DriverMode::TrSpanArea,
        ] {
            let mut s = section();
            s.set_driver(driver);
            s.solve();

            let taper = s.tip_chord() / s.root_chord();
            let aspect = 2.0 * s.span() / (s.root_chord() * (1.0 + taper));
            let area = s.span() * s.span() / aspect;
            assert!((s.taper() - taper).abs() < 1e-9, "{driver:?} taper");
            assert!((s.aspect() - aspect).abs() < 1e-9, "{driver:?} aspect");
            assert!((s.area() - area).abs() < 1e-6, "{driver:?} area");
        }
    }

    #[test]
    fn sweep_reference_move_preserves_geometry() {
        let mut s = section();
        s.set_driver(DriverMode::SpanTipRoot);
        s.set_span(10.0);
        s.set_root_chord(5.0);
        s.set_tip_chord(3.0);
        s.set_sweep(30.0);

        let le_before = s.tan_sweep_at(0.0);
        let te_before = s.tan_sweep_te();

        s.set_sweep_loc(0.5);
        assert!((s.tan_sweep_at(0.0) - le_before).abs() < 1e-9);
        assert!((s.tan_sweep_te() - te_before).abs() < 1e-9);
    }

    #[test]
    fn untapered_section_sweep_is_uniform() {
        let mut s = section();
        s.set_driver(DriverMode::SpanTipRoot);
        s.set_span(10.0);
        s.set_root_chord(4.0);
        s.set_tip_chord(4.0);
        s.set_sweep(20.0);

        let le = s.tan_sweep_at(0.0);
        let te = s.tan_sweep_te();
        assert!((le - te).abs() < 1e-9, "le={le} te={te}");
    }
}
