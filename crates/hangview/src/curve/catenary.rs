//! Closed-form catenary through two points with a prescribed arc length.
//!
//! Frame: y-up. Callers in the y-down preview frame negate y before `solve`
//! and again after `point_at_arc_length`.
//!
//! With `u = (x − b)/a`, the arc length from `u0` is `a·(sinh u − sinh u0)`.
//! Writing `u0 = m − d`, `u1 = m + d` gives `Δy/L = tanh m` and
//! `Δx/√(L² − Δy²) = d / sinh d`; the latter has no closed form in `d` and is
//! solved by bisection.

use nalgebra::Vector2;

use crate::cfg::{
    CATENARY_BISECT_ITERS, CATENARY_BRACKET_CAP, CATENARY_BRACKET_LO, CATENARY_MIN_SPAN,
};

/// Solved curve `y = a·cosh((x − b)/a) + c`, parametrized from `u0`.
///
/// Invariants: `a > 0`; `length` is the full arc length between the endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CatenaryParams {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub u0: f64,
    pub length: f64,
    /// The span was solved right-to-left; arc length 0 is still the caller's first point.
    pub reversed: bool,
}

/// Solve for the catenary from `(x0, y0)` to `(x1, y1)` with arc length `l`.
///
/// Returns `None` when there is nothing to solve for or the y(x) form is
/// singular: `l` not finite, `l <= chord`, `|x1 − x0| < 1e-6`, `|y1 − y0| >= l`.
pub fn solve(x0: f64, y0: f64, x1: f64, y1: f64, l: f64) -> Option<CatenaryParams> {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let chord = dx.hypot(dy);
    if !l.is_finite() || l <= chord {
        return None;
    }
    if dx.abs() < CATENARY_MIN_SPAN {
        return None;
    }
    if dy.abs() >= l {
        return None;
    }
    if dx < 0.0 {
        let mut p = solve_left_to_right(x1, y1, x0, y0, l)?;
        p.reversed = true;
        return Some(p);
    }
    solve_left_to_right(x0, y0, x1, y1, l)
}

fn solve_left_to_right(x0: f64, y0: f64, x1: f64, y1: f64, l: f64) -> Option<CatenaryParams> {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let m = (dy / l).atanh();
    let r = dx / (l * l - dy * dy).sqrt();
    let d = solve_d(r)?;
    let u0 = m - d;
    let u1 = m + d;
    let a = dx / (u1 - u0);
    let b = x0 - a * u0;
    let c = y0 - a * u0.cosh();
    if !(a.is_finite() && b.is_finite() && c.is_finite()) {
        return None;
    }
    Some(CatenaryParams {
        a,
        b,
        c,
        u0,
        length: l,
        reversed: false,
    })
}

/// Root of `d / sinh(d) = r` for `r ∈ (0, 1)`.
fn solve_d(r: f64) -> Option<f64> {
    if !(r.is_finite() && r > 0.0 && r < 1.0) {
        return None;
    }
    let residual = |d: f64| d / d.sinh() - r;
    let mut lo = CATENARY_BRACKET_LO;
    let mut hi = 1.0;
    while residual(hi) > 0.0 && hi < CATENARY_BRACKET_CAP {
        hi *= 2.0;
    }
    hi = hi.min(CATENARY_BRACKET_CAP);
    for _ in 0..CATENARY_BISECT_ITERS {
        let mid = 0.5 * (lo + hi);
        if residual(mid) > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Some(0.5 * (lo + hi))
}

/// Point at arc length `s` from the first endpoint (clamped to `[0, length]`).
pub fn point_at_arc_length(p: &CatenaryParams, s: f64) -> Vector2<f64> {
    let s = s.clamp(0.0, p.length);
    let s = if p.reversed { p.length - s } else { s };
    let u = (s / p.a + p.u0.sinh()).asinh();
    Vector2::new(p.a * u + p.b, p.a * u.cosh() + p.c)
}
