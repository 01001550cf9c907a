//! Swoop: a sagging cable of spheres between two anchors.
//!
//! Pipeline
//! 1. Cable length from the sphere run plus one sphere of breathing room plus
//!    sag, never shorter than the chord between the two chain ends.
//! 2. Curve: a straight vertical run for a near-zero span, else the catenary
//!    (solved in the y-up frame), else rope relaxation when slack remains, else
//!    the chord.
//! 3. Spheres at a fixed arc-length pitch, centered within the free slack.
//! 4. Clasps between neighbours; end chains from each anchor to its sphere.

use nalgebra::Vector2;
use serde::Serialize;

use super::clasp::clasp_between;
use crate::cfg::{
    DIST_EPS, RELAX_ITERATIONS, SWOOP_MAX_STEPS, SWOOP_MIN_STEPS, SWOOP_STEPS_PER_SPHERE,
    SWOOP_VERTICAL_SPAN,
};
use crate::curve::{
    estimate_lowest_y, point_at_arc_length, relax, solve, CatenaryParams, Polyline,
};
use crate::model::{ChainSegment, ClaspConnector, Sphere, SwoopSpec};

/// Anchor in preview space: ceiling point `(x, y)` and its depth key.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ProjectedEnd {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

impl ProjectedEnd {
    #[inline]
    fn ceiling(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
    /// Where the cable starts after the chain drop.
    #[inline]
    fn cable_end(&self, chain_in: f64) -> Vector2<f64> {
        Vector2::new(self.x, self.y + chain_in)
    }
}

/// Item tagged with the depth key it is composited at.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Placed<T> {
    pub item: T,
    pub depth: f64,
}

#[derive(Clone, Debug, Default)]
pub struct SwoopPreview {
    pub spheres: Vec<Placed<Sphere>>,
    pub clasps: Vec<Placed<ClaspConnector>>,
    pub end_chains: Vec<Placed<ChainSegment>>,
    /// Sampled cable from A's chain end to B's.
    pub cable: Polyline,
}

impl SwoopPreview {
    /// Lowest point reached by the cable or a sphere (y-down).
    pub fn lowest_y(&self) -> Option<f64> {
        let spheres = self
            .spheres
            .iter()
            .map(|s| s.item.center.y + 0.5 * s.item.diameter);
        self.cable.points.iter().map(|p| p.y).chain(spheres).reduce(f64::max)
    }
}

struct CableLen {
    base_len: f64,
    total_len: f64,
}

fn cable_len(
    end_a: Vector2<f64>,
    end_b: Vector2<f64>,
    spec: &SwoopSpec,
    sphere_diameter: f64,
    gap: f64,
) -> CableLen {
    let pitch = sphere_diameter + gap;
    let base_len = if spec.sphere_count > 1 {
        (spec.sphere_count - 1) as f64 * pitch
    } else {
        0.0
    };
    let desired = base_len + sphere_diameter + spec.sag_in;
    let chord = (end_b - end_a).norm();
    CableLen {
        base_len,
        total_len: chord.max(desired),
    }
}

/// Lay out a swoop between projected anchors `a` and `b`.
pub fn compute_swoop(
    a: ProjectedEnd,
    b: ProjectedEnd,
    spec: &SwoopSpec,
    sphere_diameter: f64,
    gap: f64,
) -> SwoopPreview {
    let r = 0.5 * sphere_diameter;
    let pitch = sphere_diameter + gap;
    let end_a = a.cable_end(spec.chain_a_in);
    let end_b = b.cable_end(spec.chain_b_in);
    let len = cable_len(end_a, end_b, spec, sphere_diameter, gap);
    let span = end_b.x - end_a.x;
    let vertical = span.abs() < SWOOP_VERTICAL_SPAN;
    let steps = (spec.sphere_count * SWOOP_STEPS_PER_SPHERE).clamp(SWOOP_MIN_STEPS, SWOOP_MAX_STEPS);

    // A vertical run starts at the upper cable end; `from`/`to` are the depths
    // at the cable's start and end.
    let b_on_top = vertical && end_b.y < end_a.y;
    let (from, to) = if b_on_top { (b, a) } else { (a, b) };
    let cable = if vertical {
        vertical_run(end_a, end_b, len.total_len)
    } else {
        let params = solve(end_a.x, -end_a.y, end_b.x, -end_b.y, len.total_len);
        fit_cable(end_a, end_b, len.total_len, steps, params)
    };

    // Spheres along the cable, centered within the free slack.
    let total = cable.total();
    let start_s = 0.5 * (total - len.base_len);
    let depth_at = |c: Vector2<f64>, s: f64| {
        let t = if !vertical {
            (c.x - end_a.x) / span
        } else if total > 0.0 {
            s / total
        } else {
            0.5
        };
        from.depth + (to.depth - from.depth) * t.clamp(0.0, 1.0)
    };
    let spheres: Vec<Placed<Sphere>> = (0..spec.sphere_count)
        .map(|i| {
            let s = (start_s + i as f64 * pitch).clamp(0.0, total);
            let center = cable.sample(s);
            Placed {
                item: Sphere {
                    center,
                    diameter: sphere_diameter,
                },
                depth: depth_at(center, s),
            }
        })
        .collect();

    let key = format!("swoop:{}-{}", spec.a_hole_id, spec.b_hole_id);
    let clasps = spheres
        .windows(2)
        .enumerate()
        .map(|(i, w)| Placed {
            item: clasp_between(
                w[0].item.center,
                r,
                w[1].item.center,
                r,
                gap,
                &format!("{key}/{i}"),
            ),
            depth: 0.5 * (w[0].depth + w[1].depth),
        })
        .collect();

    let mut end_chains = Vec::new();
    let mut push_chain = |p1: Vector2<f64>, p2: Vector2<f64>, depth: f64| {
        if (p2 - p1).norm() > DIST_EPS {
            end_chains.push(Placed {
                item: ChainSegment::new(p1, p2),
                depth,
            });
        }
    };
    push_chain(a.ceiling(), end_a, a.depth);
    push_chain(b.ceiling(), end_b, b.depth);
    // On a vertical run the lower end may sit beside the run, not past it.
    let (top, bottom) = if b_on_top { (end_b, end_a) } else { (end_a, end_b) };
    let last = if vertical {
        nearest_to(&spheres, bottom)
    } else {
        spheres.last()
    };
    match (spheres.first(), last) {
        (Some(first), Some(last)) => {
            if let Some(p) = surface_toward(top, first.item.center, r) {
                push_chain(top, p, from.depth);
            }
            if let Some(p) = surface_toward(bottom, last.item.center, r) {
                push_chain(bottom, p, to.depth);
            }
        }
        _ => {
            // No spheres: the bare cable is all chain.
            let n = cable.points.len();
            for (k, w) in cable.points.windows(2).enumerate() {
                let t = if n > 1 { k as f64 / (n - 1) as f64 } else { 0.0 };
                push_chain(w[0], w[1], from.depth + (to.depth - from.depth) * t);
            }
        }
    }

    SwoopPreview {
        spheres,
        clasps,
        end_chains,
        cable,
    }
}

/// Lowest y of the swoop via rope relaxation, without laying out spheres.
pub fn estimate_swoop_drop(
    a: ProjectedEnd,
    b: ProjectedEnd,
    spec: &SwoopSpec,
    sphere_diameter: f64,
    gap: f64,
) -> f64 {
    let end_a = a.cable_end(spec.chain_a_in);
    let end_b = b.cable_end(spec.chain_b_in);
    let len = cable_len(end_a, end_b, spec, sphere_diameter, gap);
    let lowest = if (end_b.x - end_a.x).abs() < SWOOP_VERTICAL_SPAN {
        end_a.y.min(end_b.y) + len.total_len
    } else {
        estimate_lowest_y(end_a, end_b, len.total_len)
    };
    lowest + if spec.sphere_count > 0 { 0.5 * sphere_diameter } else { 0.0 }
}

/// Cable between chain ends `end_a` and `end_b` (y-down) for a non-vertical span.
///
/// `params` is the catenary solved in the y-up frame. Without it the rope is
/// relaxed when there is slack, and drawn as the chord when there is none.
pub(super) fn fit_cable(
    end_a: Vector2<f64>,
    end_b: Vector2<f64>,
    total_len: f64,
    steps: usize,
    params: Option<CatenaryParams>,
) -> Polyline {
    match params {
        Some(p) => {
            let mut pts: Vec<Vector2<f64>> = (0..=steps)
                .map(|i| {
                    let q = point_at_arc_length(&p, p.length * i as f64 / steps as f64);
                    Vector2::new(q.x, -q.y)
                })
                .collect();
            pts[0] = end_a;
            pts[steps] = end_b;
            Polyline::new(pts)
        }
        None if total_len > (end_b - end_a).norm() + DIST_EPS => {
            tracing::debug!(total_len, "catenary unsolved; relaxing rope");
            relax(end_a, end_b, total_len, steps + 1, RELAX_ITERATIONS)
        }
        None => {
            let pts = (0..=steps)
                .map(|i| end_a + (end_b - end_a) * (i as f64 / steps as f64))
                .collect();
            Polyline::new(pts)
        }
    }
}

/// Straight run hanging `total_len` down from the upper of two stacked ends.
fn vertical_run(end_a: Vector2<f64>, end_b: Vector2<f64>, total_len: f64) -> Polyline {
    let top = if end_b.y < end_a.y { end_b } else { end_a };
    Polyline::new(vec![top, Vector2::new(top.x, top.y + total_len.max(0.0))])
}

/// Sphere whose center is closest to `p`.
fn nearest_to(spheres: &[Placed<Sphere>], p: Vector2<f64>) -> Option<&Placed<Sphere>> {
    spheres
        .iter()
        .min_by(|x, y| (x.item.center - p).norm().total_cmp(&(y.item.center - p).norm()))
}

/// Point on the sphere surface at `center` facing `from`; `None` if `from` is inside.
fn surface_toward(from: Vector2<f64>, center: Vector2<f64>, r: f64) -> Option<Vector2<f64>> {
    let delta = center - from;
    let dist = delta.norm();
    if dist <= r {
        return None;
    }
    Some(center - delta * (r / dist.max(DIST_EPS)))
}
