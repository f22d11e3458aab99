pub mod import;
pub mod naca;
pub mod resample;
pub mod six_series;

pub use import::RawSurfaces;
pub use six_series::SixSeriesTable;

use crate::error::AirfoilError;
use crate::math::{Point2, Point3};
use crate::param::Param;

slotmap::new_key_type! {
    /// Unique identifier for an airfoil in the wing plan store.
    pub struct AirfoilId;
}

/// Airfoil shape family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirfoilFamily {
    /// Parametric four-digit-style section (camber + thickness laws).
    FourSeries,
    /// Parabolic-arc biconvex section.
    Biconvex,
    /// Double-wedge section with a configurable apex location.
    Wedge,
    /// Six-series section from an external ordinate table.
    SixSeries,
    /// Discrete section imported from a coordinate file.
    File,
}

/// Slat or flap deflection applied as post-processing shear/rotation.
#[derive(Debug, Clone)]
pub struct HighLiftDevice {
    pub enabled: bool,
    /// Shear points vertically instead of rotating them rigidly.
    pub shear: bool,
    /// Device chord as a fraction of the section chord.
    pub chord: Param,
    /// Deflection angle in degrees.
    pub angle: Param,
}

impl Default for HighLiftDevice {
    fn default() -> Self {
        Self {
            enabled: false,
            shear: false,
            chord: Param::new(0.25, 0.0, 1.0),
            angle: Param::new(10.0, -45.0, 45.0),
        }
    }
}

/// A normalized 2D airfoil section.
///
/// The sampled point sequence runs trailing edge -> upper surface ->
/// leading edge -> lower surface -> trailing edge; the count is always odd
/// so the exact leading edge sits at the middle index. Any parameter
/// change regenerates the whole point set; there is no incremental update.
#[derive(Debug, Clone)]
pub struct Airfoil {
    family: AirfoilFamily,
    num_points: usize,
    points: Vec<Point2>,

    camber: Param,
    camber_loc: Param,
    thickness: Param,
    thickness_loc: Param,
    ideal_cl: Param,
    a_loading: Param,
    radius_le: Param,
    radius_te: Param,
    series: u32,
    inverted: bool,

    slat: HighLiftDevice,
    flap: HighLiftDevice,

    raw: Option<RawSurfaces>,
    /// Thickness of the imported curves before any rescaling.
    base_thickness: f64,
}

impl Default for Airfoil {
    fn default() -> Self {
        Self::new(AirfoilFamily::FourSeries)
    }
}

impl Airfoil {
    /// Default sampled point count (odd; leading edge at index 11).
    pub const DEFAULT_NUM_POINTS: usize = 23;

    /// Creates an airfoil of the given family with default parameters and
    /// generates its point set.
    #[must_use]
    pub fn new(family: AirfoilFamily) -> Self {
        let mut af = Self {
            family,
            num_points: Self::DEFAULT_NUM_POINTS,
            points: Vec::new(),
            camber: Param::new(0.0, 0.0, 0.5),
            camber_loc: Param::new(0.5, 0.01, 0.99),
            thickness: Param::new(0.10, 0.001, 0.5),
            thickness_loc: Param::new(0.3, 0.01, 0.99),
            ideal_cl: Param::new(0.0, 0.0, 1.0),
            a_loading: Param::new(0.0, 0.0, 1.0),
            radius_le: Param::new(0.01, 0.0, 1.0e6),
            radius_te: Param::new(0.0, 0.0, 1.0e6),
            series: 63,
            inverted: false,
            slat: HighLiftDevice::default(),
            flap: HighLiftDevice::default(),
            raw: None,
            base_thickness: 0.10,
        };
        af.apply_family_activation();
        af.regenerate();
        af
    }

    /// Switches the shape family and regenerates.
    pub fn set_family(&mut self, family: AirfoilFamily) {
        self.family = family;
        self.apply_family_activation();
        self.regenerate();
    }

    fn apply_family_activation(&mut self) {
        self.camber.deactivate();
        self.camber_loc.deactivate();
        self.thickness_loc.deactivate();
        self.ideal_cl.deactivate();
        self.a_loading.deactivate();

        match self.family {
            AirfoilFamily::FourSeries => {
                self.camber.activate();
                self.camber_loc.activate();
            }
            AirfoilFamily::Wedge => self.thickness_loc.activate(),
            AirfoilFamily::SixSeries => {
                self.ideal_cl.activate();
                self.a_loading.activate();
            }
            AirfoilFamily::Biconvex | AirfoilFamily::File => {}
        }
    }

    /// Regenerates the full point set from the current parameters.
    ///
    /// Table-backed families reuse their stored raw curves; if none have
    /// been loaded yet the previous points are kept.
    pub fn regenerate(&mut self) {
        match self.family {
            AirfoilFamily::FourSeries => {
                self.points = naca::four_series(
                    self.num_points,
                    self.camber.get(),
                    self.camber_loc.get(),
                    self.thickness.get(),
                );
            }
            AirfoilFamily::Biconvex => {
                self.points = naca::biconvex(self.num_points, self.thickness.get());
            }
            AirfoilFamily::Wedge => {
                self.points = naca::wedge(
                    self.num_points,
                    self.thickness.get(),
                    self.thickness_loc.get(),
                );
            }
            AirfoilFamily::SixSeries | AirfoilFamily::File => {
                let Some(raw) = &self.raw else {
                    return;
                };
                self.points =
                    resample::resample_surfaces(&raw.upper, &raw.lower, self.num_points);
                if self.family == AirfoilFamily::File {
                    self.rescale_thickness();
                }
            }
        }

        self.radius_le.set(self.estimate_leading_edge_radius());

        if self.inverted {
            self.invert_points();
        }
        self.apply_high_lift_devices();
    }

    /// Rescales the point set thickness about the local mean line by the
    /// ratio of the requested to the imported thickness.
    fn rescale_thickness(&mut self) {
        if self.base_thickness <= 0.0 {
            return;
        }
        let scale = self.thickness.get() / self.base_thickness;
        let half = self.num_points / 2;
        for i in 0..=half {
            let upper = self.points[half - i].y;
            let lower = self.points[half + i].y;
            let mean = 0.5 * (upper + lower);
            self.points[half - i].y = (upper - mean) * scale + mean;
            self.points[half + i].y = (lower - mean) * scale + mean;
        }
    }

    fn estimate_leading_edge_radius(&self) -> f64 {
        match self.family {
            AirfoilFamily::FourSeries | AirfoilFamily::SixSeries => {
                1.1019 * self.thickness.get() * self.thickness.get()
            }
            AirfoilFamily::Biconvex | AirfoilFamily::Wedge => 0.0,
            AirfoilFamily::File => self
                .raw
                .as_ref()
                .map_or(0.0, import::leading_edge_radius),
        }
    }

    fn invert_points(&mut self) {
        let n = self.points.len();
        let z: Vec<f64> = self.points.iter().map(|p| p.y).collect();
        for (i, zi) in z.iter().enumerate() {
            self.points[n - 1 - i].y = -zi;
        }
    }

    fn apply_high_lift_devices(&mut self) {
        if self.slat.enabled {
            let break_x = self.slat.chord.get();
            let angle = self.slat.angle.get().to_radians();
            for p in &mut self.points {
                if p.x < break_x {
                    if self.slat.shear {
                        p.y += (break_x - p.x) * angle.tan();
                    } else {
                        let r = break_x - p.x;
                        p.x += r - r * angle.cos();
                        p.y += r * angle.sin();
                    }
                }
            }
        }
        if self.flap.enabled {
            let break_x = 1.0 - self.flap.chord.get();
            let angle = self.flap.angle.get().to_radians();
            for p in &mut self.points {
                if p.x > break_x {
                    if self.flap.shear {
                        p.y += (p.x - break_x) * angle.tan();
                    } else {
                        let r = p.x - break_x;
                        p.x += r * angle.cos() - r;
                        p.y += r * angle.sin();
                    }
                }
            }
        }
    }

    /// Imports a Selig-format coordinate file.
    ///
    /// On success the airfoil switches to the `File` family and
    /// regenerates. On failure the previous state is fully preserved.
    ///
    /// # Errors
    ///
    /// Returns an error when the text holds too few usable points on
    /// either surface.
    pub fn import_points(&mut self, text: &str) -> Result<(), AirfoilError> {
        let raw = import::parse_selig(text)?;
        self.base_thickness = import::max_thickness(&raw);
        self.thickness.set(self.base_thickness);
        self.raw = Some(raw);
        self.family = AirfoilFamily::File;
        self.apply_family_activation();
        self.regenerate();
        Ok(())
    }

    /// Loads six-series ordinates from the external table collaborator and
    /// regenerates.
    pub fn load_six_series(&mut self, table: &dyn SixSeriesTable) {
        let (mut upper, mut lower) = table.lookup(
            self.series,
            self.thickness.get(),
            self.ideal_cl.get(),
            self.a_loading.get(),
        );
        if upper.len() >= 2 && lower.len() >= 2 {
            // Close the trailing edge at the midpoint of the two tables.
            let nu = upper.len() - 1;
            let nl = lower.len() - 1;
            let te = Point2::from((upper[nu].coords + lower[nl].coords) * 0.5);
            upper[nu] = te;
            lower[nl] = te;
        }
        self.raw = Some(RawSurfaces { upper, lower });
        self.family = AirfoilFamily::SixSeries;
        self.apply_family_activation();
        self.regenerate();
    }

    // --- Accessors ---

    /// Shape family tag.
    #[must_use]
    pub fn family(&self) -> AirfoilFamily {
        self.family
    }

    /// Number of sampled surface points (always odd).
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Sampled surface point at `index` (chordwise x, height z).
    #[must_use]
    pub fn point_at(&self, index: usize) -> Point2 {
        self.points[index]
    }

    /// All sampled surface points.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Sets the sampled point count, forcing it odd, and regenerates.
    pub fn set_num_points(&mut self, num_points: usize) {
        let n = if num_points % 2 == 0 {
            num_points + 1
        } else {
            num_points
        };
        if n != self.num_points {
            self.num_points = n;
            self.regenerate();
        }
    }

    #[must_use]
    pub fn camber(&self) -> f64 {
        self.camber.get()
    }

    pub fn set_camber(&mut self, value: f64) {
        self.camber.set(value);
        self.regenerate();
    }

    #[must_use]
    pub fn camber_loc(&self) -> f64 {
        self.camber_loc.get()
    }

    pub fn set_camber_loc(&mut self, value: f64) {
        self.camber_loc.set(value);
        self.regenerate();
    }

    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness.get()
    }

    pub fn set_thickness(&mut self, value: f64) {
        self.thickness.set(value);
        self.regenerate();
    }

    #[must_use]
    pub fn thickness_loc(&self) -> f64 {
        self.thickness_loc.get()
    }

    pub fn set_thickness_loc(&mut self, value: f64) {
        self.thickness_loc.set(value);
        self.regenerate();
    }

    #[must_use]
    pub fn ideal_cl(&self) -> f64 {
        self.ideal_cl.get()
    }

    #[must_use]
    pub fn a_loading(&self) -> f64 {
        self.a_loading.get()
    }

    /// Six-series family id (63..=67).
    #[must_use]
    pub fn series(&self) -> u32 {
        self.series
    }

    pub fn set_series(&mut self, series: u32) {
        self.series = series;
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Flips the section upside down (upper and lower surfaces swap).
    pub fn set_inverted(&mut self, inverted: bool) {
        if self.inverted != inverted {
            self.inverted = inverted;
            self.regenerate();
        }
    }

    /// Configures the leading-edge slat and regenerates.
    pub fn configure_slat(&mut self, enabled: bool, shear: bool, chord: f64, angle: f64) {
        self.slat.enabled = enabled;
        self.slat.shear = shear;
        self.slat.chord.set(chord);
        self.slat.angle.set(angle);
        self.regenerate();
    }

    /// Configures the trailing-edge flap and regenerates.
    pub fn configure_flap(&mut self, enabled: bool, shear: bool, chord: f64, angle: f64) {
        self.flap.enabled = enabled;
        self.flap.shear = shear;
        self.flap.chord.set(chord);
        self.flap.angle.set(angle);
        self.regenerate();
    }

    /// Leading-edge radius estimate for the current shape.
    #[must_use]
    pub fn leading_edge_radius(&self) -> f64 {
        self.radius_le.get()
    }

    /// Half-thickness growth between 0.15%c and 6%c, a bluntness measure.
    #[must_use]
    pub fn delta_y_le(&self) -> f64 {
        let t = self.thickness.get();
        match self.family {
            AirfoilFamily::FourSeries | AirfoilFamily::SixSeries => {
                2.0 * (naca::half_thickness(0.06, t) - naca::half_thickness(0.0015, t))
            }
            AirfoilFamily::Biconvex => {
                4.0 * t * 0.06 * (1.0 - 0.06) - 4.0 * t * 0.0015 * (1.0 - 0.0015)
            }
            AirfoilFamily::Wedge => t / self.thickness_loc.get() * (0.06 - 0.0015),
            AirfoilFamily::File => self.raw.as_ref().map_or(0.0, |raw| {
                let up6 = height_at_x(&raw.upper, 0.06);
                let lo6 = height_at_x(&raw.lower, 0.06);
                let up0 = height_at_x(&raw.upper, 0.0015);
                let lo0 = height_at_x(&raw.lower, 0.0015);
                (up6 - lo6) - (up0 - lo0)
            }),
        }
    }

    /// Degenerate end-cap point: the section collapsed onto its mean line.
    #[must_use]
    pub fn end_cap_point(&self, index: usize) -> Point3 {
        let mirror = self.points.len() - 1 - index;
        let p = (self.points[index].coords + self.points[mirror].coords) * 0.5;
        Point3::new(p.x, 0.0, p.y)
    }

    /// Rounded end-cap point: a hemispherical cap whose spanwise bulge is
    /// half the distance between the true upper and lower surface points.
    #[must_use]
    pub fn rounded_end_cap_point(&self, index: usize) -> Point3 {
        let n = self.points.len();
        let half = n / 2;
        if index == 0 || index == n - 1 {
            return Point3::new(1.0, 0.0, 0.0);
        }
        if index == half {
            return Point3::new(0.0, 0.0, 0.0);
        }

        let mirror = n - 1 - index;
        let p = (self.points[index].coords + self.points[mirror].coords) * 0.5;
        let bulge = (self.points[index] - self.points[mirror]).norm() * 0.5;
        Point3::new(p.x, bulge, p.y)
    }

    /// Builds a fresh airfoil interpolated between two bounding sections
    /// at fraction `f` (0 at `root`, 1 at `tip`).
    ///
    /// Parametric sections of the same family interpolate their shape
    /// parameters and regenerate; anything else blends the two point sets
    /// directly.
    #[must_use]
    pub fn interpolated(root: &Self, tip: &Self, f: f64) -> Self {
        let f = f.clamp(0.0, 1.0);
        let parametric = matches!(
            root.family,
            AirfoilFamily::FourSeries | AirfoilFamily::Biconvex | AirfoilFamily::Wedge
        );
        if parametric && root.family == tip.family && root.inverted == tip.inverted {
            let mut af = root.clone();
            af.camber.set(lerp(root.camber(), tip.camber(), f));
            af.camber_loc.set(lerp(root.camber_loc(), tip.camber_loc(), f));
            af.thickness.set(lerp(root.thickness(), tip.thickness(), f));
            af.thickness_loc
                .set(lerp(root.thickness_loc(), tip.thickness_loc(), f));
            af.regenerate();
            return af;
        }

        let mut af = root.clone();
        let n = root.points.len().min(tip.points.len());
        af.points = (0..n)
            .map(|i| Point2::from(root.points[i].coords.lerp(&tip.points[i].coords, f)))
            .collect();
        af.thickness.set(lerp(root.thickness(), tip.thickness(), f));
        af.raw = None;
        af
    }
}

fn lerp(a: f64, b: f64, f: f64) -> f64 {
    a + (b - a) * f
}

/// Linear height interpolation on a LE -> TE curve at chordwise `x`.
fn height_at_x(curve: &[Point2], x: f64) -> f64 {
    for pair in curve.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if (a.x <= x && x <= b.x) || (b.x <= x && x <= a.x) {
            let denom = b.x - a.x;
            if denom.abs() < f64::EPSILON {
                return a.y;
            }
            return a.y + (b.y - a.y) * (x - a.x) / denom;
        }
    }
    curve.first().map_or(0.0, |p| p.y)
}
