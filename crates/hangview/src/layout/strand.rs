//! Vertical hang: chain – spheres – chain.
//!
//! Distances are measured downward from the ceiling. Sphere `i` is centered at
//! `top + r + i·pitch`; the top chain ends at the first sphere's top and the
//! bottom chain starts at the last sphere's bottom.

use nalgebra::Vector2;
use serde::Serialize;

use super::clasp::clasp_between;
use crate::model::{ChainSegment, ClaspConnector, MoundPreset, Sphere, StrandSpec};

/// Interval `[start, end]` measured downward from the ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    #[inline]
    pub fn len(&self) -> f64 {
        self.end - self.start
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }
}

/// 1-D layout of a vertical hang.
///
/// Invariants
/// - `sphere_centers` is increasing; `sphere_diameters` has the same length.
/// - `clasps` holds indices `i` with a clasp between sphere `i` and `i + 1`.
/// - `chains` are listed top to bottom; a plain strand has exactly two (top, bottom).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StrandPreview {
    pub sphere_centers: Vec<f64>,
    pub sphere_diameters: Vec<f64>,
    pub chains: Vec<Span>,
    pub clasps: Vec<usize>,
    pub gap: f64,
    pub total_drop_in: f64,
    /// Advisory: the hang reaches past the ceiling height.
    pub over_ceiling: bool,
    pub mound: MoundPreset,
}

/// Lay out a strand.
pub fn compute(
    ceiling_height_in: f64,
    spec: &StrandSpec,
    sphere_diameter: f64,
    gap: f64,
) -> StrandPreview {
    let mut out = uniform_run(
        spec.sphere_count,
        spec.top_chain_length_in,
        sphere_diameter,
        gap,
        spec.mound,
    );
    let last_bottom = out.chains[0].end + run_length(spec.sphere_count, sphere_diameter, gap);
    let bottom = Span {
        start: last_bottom,
        end: last_bottom + spec.bottom_chain_length_in,
    };
    out.chains.push(bottom);
    out.total_drop_in = bottom.end;
    out.over_ceiling = out.total_drop_in > ceiling_height_in;
    out
}

/// Top chain plus `n` spheres at a fixed pitch; no bottom chain.
pub(crate) fn uniform_run(
    n: usize,
    top_chain_length_in: f64,
    sphere_diameter: f64,
    gap: f64,
    mound: MoundPreset,
) -> StrandPreview {
    let r = 0.5 * sphere_diameter;
    let pitch = sphere_diameter + gap;
    let sphere_centers: Vec<f64> = (0..n)
        .map(|i| top_chain_length_in + r + i as f64 * pitch)
        .collect();
    let total = top_chain_length_in + run_length(n, sphere_diameter, gap);
    StrandPreview {
        sphere_centers,
        sphere_diameters: vec![sphere_diameter; n],
        chains: vec![Span {
            start: 0.0,
            end: top_chain_length_in,
        }],
        clasps: (0..n.saturating_sub(1)).collect(),
        gap,
        total_drop_in: total,
        over_ceiling: false,
        mound,
    }
}

/// Length from the first sphere's top to the last sphere's bottom.
#[inline]
fn run_length(n: usize, d: f64, gap: f64) -> f64 {
    if n == 0 {
        0.0
    } else {
        n as f64 * d + (n - 1) as f64 * gap
    }
}

/// Mound of slack chain drawn at the anchor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MoundShape {
    pub center: Vector2<f64>,
    pub width: f64,
    pub height: f64,
}

/// A hang turned into 2-D primitives.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlacedHang {
    pub spheres: Vec<Sphere>,
    pub chains: Vec<ChainSegment>,
    pub clasps: Vec<ClaspConnector>,
    pub mound: Option<MoundShape>,
}

impl StrandPreview {
    pub fn top_chain(&self) -> Option<Span> {
        self.chains.first().copied()
    }
    /// Last chain of a strand with more than one chain.
    pub fn bottom_chain(&self) -> Option<Span> {
        if self.chains.len() < 2 {
            return None;
        }
        self.chains.last().copied()
    }

    /// Place the hang with its ceiling point at `origin` (preview space, y-down).
    pub fn place(&self, origin: Vector2<f64>, key: &str) -> PlacedHang {
        let at = |d: f64| Vector2::new(origin.x, origin.y + d);
        let spheres: Vec<Sphere> = self
            .sphere_centers
            .iter()
            .zip(&self.sphere_diameters)
            .map(|(&cy, &diameter)| Sphere {
                center: at(cy),
                diameter,
            })
            .collect();
        let chains = self
            .chains
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| ChainSegment::new(at(s.start), at(s.end)))
            .collect();
        let clasps = self
            .clasps
            .iter()
            .filter(|&&i| i + 1 < spheres.len())
            .map(|&i| {
                let (a, b) = (&spheres[i], &spheres[i + 1]);
                clasp_between(
                    a.center,
                    0.5 * a.diameter,
                    b.center,
                    0.5 * b.diameter,
                    self.gap,
                    &format!("{key}/{i}"),
                )
            })
            .collect();
        let mound = self.mound.footprint_in().map(|(width, height)| MoundShape {
            center: at(0.5 * height),
            width,
            height,
        });
        PlacedHang {
            spheres,
            chains,
            clasps,
            mound,
        }
    }
}
