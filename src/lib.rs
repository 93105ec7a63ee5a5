//! Post-processing for measured spectra and tabulated functions.
//!
//! The two core pieces are the `x y z` grid loader ([`load_grid`]), which
//! infers the file's loop order and exposes `z(xs[i], ys[j])`, and the
//! cubic spline in [`spline`] used to resample two-column curves.

pub mod config;
pub mod data;
pub mod error;
pub mod runner;
pub mod spline;

pub use data::grid::{GridParser, ParseState, parse_grid};
pub use data::loader::{load_curve, load_grid};
pub use data::model::{Axis, Curve, Grid2D};
pub use error::{GridError, SplineError};
pub use spline::{SplineState, build as build_spline, evaluate as evaluate_spline};
