//! Discrete rope relaxation (y-down frame).
//!
//! Fixed iteration budget, no convergence check: the result only has to look
//! like a hanging rope in a preview.

use nalgebra::Vector2;

use super::arc::Polyline;
use crate::cfg::{
    DIST_EPS, RELAX_BOUNDS_POINTS, RELAX_BULGE_FRAC, RELAX_GRAVITY_FRAC, RELAX_ITERATIONS,
    RELAX_PASSES,
};

/// Relax `point_count` points of a rope of `total_length` pinned at `p0` and `p1`.
///
/// Post: `points[0] == p0` and `points[last] == p1` exactly.
pub fn relax(
    p0: Vector2<f64>,
    p1: Vector2<f64>,
    total_length: f64,
    point_count: usize,
    iterations: usize,
) -> Polyline {
    let n = point_count.max(2);
    let last = n - 1;
    let seg_len = (total_length / last as f64).max(0.0);
    let gravity = RELAX_GRAVITY_FRAC * seg_len;

    // Seed with a small bulge so the first passes are not degenerate.
    let mut pts: Vec<Vector2<f64>> = (0..n)
        .map(|i| {
            let t = i as f64 / last as f64;
            let mut p = p0 + (p1 - p0) * t;
            p.y += RELAX_BULGE_FRAC * seg_len * (std::f64::consts::PI * t).sin();
            p
        })
        .collect();
    pts[0] = p0;
    pts[last] = p1;

    for _ in 0..iterations {
        for p in &mut pts[1..last] {
            p.y += gravity;
        }
        for _ in 0..RELAX_PASSES {
            for i in 0..last {
                let delta = pts[i + 1] - pts[i];
                let dist = delta.norm().max(DIST_EPS);
                let corr = delta * ((dist - seg_len) / dist);
                match (i == 0, i + 1 == last) {
                    (true, true) => {}
                    (true, false) => pts[i + 1] -= corr,
                    (false, true) => pts[i] += corr,
                    (false, false) => {
                        pts[i] += corr * 0.5;
                        pts[i + 1] -= corr * 0.5;
                    }
                }
            }
            pts[0] = p0;
            pts[last] = p1;
        }
    }
    Polyline::new(pts)
}

/// Lowest y reached by a relaxed rope; cheaper than an exact solve when only
/// the vertical envelope is needed.
pub fn estimate_lowest_y(p0: Vector2<f64>, p1: Vector2<f64>, total_length: f64) -> f64 {
    relax(p0, p1, total_length, RELAX_BOUNDS_POINTS, RELAX_ITERATIONS)
        .max_y()
        .unwrap_or(p0.y.max(p1.y))
}
