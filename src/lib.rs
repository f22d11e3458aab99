//! Parametric wing lofting geometry kernel.
//!
//! Builds multi-section wing geometry from design parameters: airfoil
//! cross-section generation, trapezoidal section solving, circular-arc
//! fillet blending at section joints, and station sequencing for an
//! external surface fitter.

pub mod airfoil;
pub mod blend;
pub mod curve;
pub mod error;
pub mod fillet;
pub mod loft;
pub mod math;
pub mod param;
pub mod section;
pub mod wing;

pub use error::{AeroloftError, Result};
