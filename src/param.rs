//! Bounded design parameters.
//!
//! Every scalar driving the geometry carries a declared `[lower, upper]`
//! range and an active flag. Out-of-range writes clamp to the bound rather
//! than rejecting, so a parameter value is valid by construction.

/// A bounded scalar design parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param {
    value: f64,
    lower: f64,
    upper: f64,
    active: bool,
}

impl Param {
    /// Creates a parameter with an initial value and its declared bounds.
    ///
    /// The initial value is clamped into `[lower, upper]`.
    #[must_use]
    pub fn new(value: f64, lower: f64, upper: f64) -> Self {
        Self {
            value: value.clamp(lower, upper),
            lower,
            upper,
            active: true,
        }
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> f64 {
        self.value
    }

    /// Sets the value, clamping it into the declared bounds.
    pub fn set(&mut self, value: f64) {
        self.value = value.clamp(self.lower, self.upper);
    }

    /// Declared `[lower, upper]` bounds.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    /// Whether the parameter currently drives the geometry.
    ///
    /// Inactive parameters are dependent quantities: their value is
    /// computed from the active set and writing them has no lasting effect
    /// past the next solve.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Marks the parameter as independently driven.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Marks the parameter as dependent.
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clamps_to_bounds() {
        let mut p = Param::new(0.1, 0.001, 0.5);
        p.set(0.75);
        assert!((p.get() - 0.5).abs() < f64::EPSILON);
        p.set(-3.0);
        assert!((p.get() - 0.001).abs() < f64::EPSILON);
    }

    #[test]
    fn initial_value_clamped() {
        let p = Param::new(9.0, 0.0, 1.0);
        assert!((p.get() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn active_flag_toggles() {
        let mut p = Param::new(0.5, 0.0, 1.0);
        assert!(p.is_active());
        p.deactivate();
        assert!(!p.is_active());
        p.activate();
        assert!(p.is_active());
    }
}
