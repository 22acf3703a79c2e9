//! Building physics calculations that go beyond evaluating a formula.
//!
//! * [`discretization`] reduces a layered wall into an RC lattice with the
//!   Miura method, for use in finite difference conduction models.
//! * [`wbgt`] and [`pmv`] solve the implicit energy balances behind the
//!   WBGT heat-stress index and the PMV/PPD comfort indices.
//! * [`ventilation`] calculates stack (i.e., temperature-difference) ventilation.

/// The floating point type used throughout the crate
pub type Float = f64;

/// Offset between Celsius and Kelvin
pub(crate) const KELVIN: Float = 273.15;

pub mod convection;
pub mod discretization;
pub mod environment;
pub mod error;
pub mod interpolation;
pub mod pmv;
pub mod psychrometrics;
pub mod solver;
pub mod ventilation;
pub mod wbgt;

pub use discretization::{discretize_wall, LayerProfile, ReducedLattice};
pub use environment::{IndoorConditions, OutdoorConditions};
pub use error::{Error, Result};
pub use pmv::{compute_ppd, solve_pmv, ComfortIndices, PmvConfig};
pub use psychrometrics::saturation_vapor_pressure;
pub use wbgt::{compute_wbgt, solve_wet_bulb, Wbgt, WbgtConfig};
