//! Rotation/parallax projection of plan anchors into the front elevation.
//!
//! - `project`: rotate an anchor about the plan center; x is blended by
//!   `strength`, depth is always the fully rotated value.
//! - `compute_y_shift`: parallax lift for near elements, scaled by the plan's
//!   half-diagonal and the signed perspective factor.
//!
//! Plan y grows toward the viewer, so depth is the negated rotated y offset.

use nalgebra::Vector2;
use serde::Serialize;

use crate::cfg::{DIST_EPS, VERTICAL_RAISE_IN};

/// Plan boundary reduced to what the projector needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanFrame {
    pub center: Vector2<f64>,
    pub half_diagonal: f64,
}

impl PlanFrame {
    /// Boundary rectangle `[0, width] × [0, height]`.
    pub fn from_boundary(width_in: f64, height_in: f64) -> Self {
        Self {
            center: Vector2::new(0.5 * width_in, 0.5 * height_in),
            half_diagonal: 0.5 * width_in.hypot(height_in),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Projected {
    pub x_in: f64,
    /// Larger is farther from the viewer.
    pub depth_key: f64,
}

/// Project `anchor` (plan inches) rotated by `rotation_deg` about `center`.
///
/// Post: `rotation_deg == 0` or `strength == 0` returns `x_in == anchor.x` exactly.
pub fn project(
    center: Vector2<f64>,
    anchor: Vector2<f64>,
    rotation_deg: f64,
    strength: f64,
) -> Projected {
    let d = anchor - center;
    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    // rot_x − d.x, written so that the identity rotation contributes exactly 0.
    let dx_rot = d.x * (cos - 1.0) - d.y * sin;
    let rot_y = d.x * sin + d.y * cos;
    Projected {
        x_in: anchor.x + dx_rot * strength,
        depth_key: -rot_y,
    }
}

/// Parallax shift to subtract from an element's y.
///
/// Post: zero depth gives zero shift for any factor.
pub fn compute_y_shift(depth_key: f64, perspective_factor: f64, half_diagonal: f64) -> f64 {
    let norm = depth_key / half_diagonal.max(DIST_EPS);
    let magnitude = perspective_factor.abs().min(1.0);
    let sign = if perspective_factor < 0.0 { -1.0 } else { 1.0 };
    -norm * VERTICAL_RAISE_IN * magnitude * sign
}
