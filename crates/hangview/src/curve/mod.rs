//! Curve numerics for hanging cables.
//!
//! - `catenary`: closed-form `y = a·cosh((x−b)/a) + c` through two points with a
//!   target arc length (y-up frame).
//! - `arc`: cumulative arc-length tables and sampling on polylines.
//! - `rope`: discrete rope relaxation, the fallback when the closed form is
//!   singular, and a cheap bounds estimator (y-down frame).
//!
//! No rendering dependencies; everything is plain `f64` and `Vector2`.

mod arc;
mod catenary;
mod rope;

pub use arc::{build_cumulative, sample_at, Polyline};
pub use catenary::{point_at_arc_length, solve, CatenaryParams};
pub use rope::{estimate_lowest_y, relax};

#[cfg(test)]
mod tests;
