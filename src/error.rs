use thiserror::Error;

/// Top-level error type for the aeroloft geometry kernel.
#[derive(Debug, Error)]
pub enum AeroloftError {
    #[error(transparent)]
    Airfoil(#[from] AirfoilError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Errors related to airfoil generation and import.
///
/// Only imports can fail: parametric generation clamps its inputs and
/// degenerate geometry degrades rather than erroring. A failed import
/// leaves the airfoil at its last valid generated state.
#[derive(Debug, Error)]
pub enum AirfoilError {
    #[error("airfoil file has no usable coordinate data")]
    NoUsableData,

    #[error("airfoil {side} surface has {count} points, need at least 3")]
    TooFewPoints { side: &'static str, count: usize },
}

/// Errors related to the wing plan and its section chain.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("airfoil not found in plan store")]
    FoilNotFound,

    #[error("section index {index} out of range (plan has {len} sections)")]
    SectionOutOfRange { index: usize, len: usize },

    #[error("wing plan has no sections")]
    EmptyPlan,
}

/// Convenience type alias for results using [`AeroloftError`].
pub type Result<T> = std::result::Result<T, AeroloftError>;
