//! Scene assembly: anchors and elements → depth-ordered primitives.
//!
//! Data flow
//! - Project each anchor (rotation about the plan center, layer spread on the
//!   depth key, parallax lift on the ceiling y).
//! - Run the element's builder in preview space.
//! - Push everything into a `DepthCompositor` and order it for the view.
//!
//! Export layers replay `build_preview` with the on-screen inputs; animated
//! exports iterate `rotation_frames`, one frame after another.

use nalgebra::Vector2;
use serde::Serialize;

use crate::compose::{DepthCompositor, Primitive};
use crate::layout::{
    compute, compute_custom, compute_stack, compute_swoop, estimate_swoop_drop, member_offsets,
    PlacedHang, ProjectedEnd, StrandPreview,
};
use crate::model::{Anchor, DepthLayer, Element, Scene, ViewParams};
use crate::projection::{compute_y_shift, project, PlanFrame};

/// Ordered primitives plus the advisory roll-ups the editor shows.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Preview {
    pub primitives: Vec<Primitive>,
    /// Deepest drop below the ceiling over all elements.
    pub max_drop_in: f64,
    /// Indices into `scene.elements` whose geometry passes the ceiling height.
    pub over_ceiling: Vec<usize>,
    /// Indices of elements skipped for referencing unknown anchors.
    pub skipped: Vec<usize>,
}

struct Projector {
    frame: PlanFrame,
    rotation_deg: f64,
    strength: f64,
    perspective: f64,
    layer_spread_in: f64,
}

impl Projector {
    fn new(scene: &Scene, view: &ViewParams) -> Self {
        let p = &scene.project;
        let (strength, perspective) = if p.preview_depth {
            (view.rotation_strength.clamp(0.0, 1.0), view.perspective_factor)
        } else {
            (0.0, 0.0)
        };
        Self {
            frame: PlanFrame::from_boundary(p.boundary_width_in, p.boundary_height_in),
            rotation_deg: view.rotation_deg,
            strength,
            perspective,
            layer_spread_in: view.layer_spread_in,
        }
    }

    fn end(&self, pos: Vector2<f64>, layer: DepthLayer) -> ProjectedEnd {
        let p = project(self.frame.center, pos, self.rotation_deg, self.strength);
        let depth = p.depth_key + layer.spread_sign() * self.layer_spread_in;
        ProjectedEnd {
            x: p.x_in,
            y: -compute_y_shift(depth, self.perspective, self.frame.half_diagonal),
            depth,
        }
    }
}

/// Build the preview for `scene` under `view`.
pub fn build_preview(scene: &Scene, view: &ViewParams) -> Preview {
    let proj = Projector::new(scene, view);
    let ceiling = scene.project.ceiling_height_in;
    let hw = scene.project.hardware;
    let (d, gap) = (hw.sphere_diameter_in, hw.gap_in);

    let mut comp = DepthCompositor::new();
    let mut out = Preview::default();

    for (idx, element) in scene.elements.iter().enumerate() {
        match element {
            Element::Strand { anchor_id, spec } => {
                let Some(anchor) = lookup(scene, idx, anchor_id, &mut out) else {
                    continue;
                };
                let end = proj.end(anchor.pos, spec.layer);
                let preview = compute(ceiling, spec, d, gap);
                let placed = preview.place(Vector2::new(end.x, end.y), &format!("strand{idx}"));
                push_hang(&mut comp, placed, end.depth, spec.layer, &spec.color_id);
                note(&mut out, idx, &preview);
            }
            Element::Stack { anchor_id, spec } => {
                let Some(anchor) = lookup(scene, idx, anchor_id, &mut out) else {
                    continue;
                };
                let end = proj.end(anchor.pos, spec.layer);
                let preview = compute_stack(ceiling, spec, d);
                let placed = preview.place(Vector2::new(end.x, end.y), &format!("stack{idx}"));
                push_hang(&mut comp, placed, end.depth, spec.layer, &spec.color_id);
                note(&mut out, idx, &preview);
            }
            Element::Custom { anchor_id, spec } => {
                let Some(anchor) = lookup(scene, idx, anchor_id, &mut out) else {
                    continue;
                };
                let end = proj.end(anchor.pos, spec.layer);
                let preview = compute_custom(ceiling, spec, gap);
                let placed = preview.place(Vector2::new(end.x, end.y), &format!("custom{idx}"));
                push_hang(&mut comp, placed, end.depth, spec.layer, &spec.color_id);
                note(&mut out, idx, &preview);
            }
            Element::Cluster { anchor_id, spec } => {
                let Some(anchor) = lookup(scene, idx, anchor_id, &mut out) else {
                    continue;
                };
                let offsets = member_offsets(spec);
                for (k, (member, offset)) in spec.members.iter().zip(offsets).enumerate() {
                    let end = proj.end(anchor.pos + offset, member.layer);
                    let preview = compute(ceiling, member, d, gap);
                    let placed =
                        preview.place(Vector2::new(end.x, end.y), &format!("cluster{idx}.{k}"));
                    push_hang(&mut comp, placed, end.depth, member.layer, &member.color_id);
                    note(&mut out, idx, &preview);
                }
            }
            Element::Swoop { spec } => {
                let (Some(a), Some(b)) = (
                    lookup(scene, idx, &spec.a_hole_id, &mut out),
                    lookup(scene, idx, &spec.b_hole_id, &mut out),
                ) else {
                    continue;
                };
                let (ea, eb) = (proj.end(a.pos, spec.layer), proj.end(b.pos, spec.layer));
                let swoop = compute_swoop(ea, eb, spec, d, gap);
                if let Some(low) = swoop.lowest_y() {
                    let drop = low - ea.y.min(eb.y);
                    out.max_drop_in = out.max_drop_in.max(drop);
                    if drop > ceiling {
                        out.over_ceiling.push(idx);
                    }
                }
                for c in swoop.end_chains {
                    comp.push(c.depth, spec.layer, Primitive::Chain { segment: c.item });
                }
                for c in swoop.clasps {
                    comp.push(c.depth, spec.layer, Primitive::Clasp { clasp: c.item });
                }
                for s in swoop.spheres {
                    comp.push(
                        s.depth,
                        spec.layer,
                        Primitive::Sphere {
                            sphere: s.item,
                            color_id: spec.color_id.clone(),
                        },
                    );
                }
            }
        }
    }

    tracing::debug!(
        primitives = comp.len(),
        skipped = out.skipped.len(),
        "preview built"
    );
    out.primitives = comp.finish(scene.project.preview_view);
    out
}

/// Deepest drop below the ceiling, estimated without laying out swoop spheres.
pub fn estimate_max_drop(scene: &Scene, view: &ViewParams) -> f64 {
    let proj = Projector::new(scene, view);
    let ceiling = scene.project.ceiling_height_in;
    let hw = scene.project.hardware;
    let (d, gap) = (hw.sphere_diameter_in, hw.gap_in);
    let mut max_drop: f64 = 0.0;
    for element in &scene.elements {
        let drop = match element {
            Element::Strand { spec, .. } => compute(ceiling, spec, d, gap).total_drop_in,
            Element::Stack { spec, .. } => compute_stack(ceiling, spec, d).total_drop_in,
            Element::Custom { spec, .. } => compute_custom(ceiling, spec, gap).total_drop_in,
            Element::Cluster { spec, .. } => spec
                .members
                .iter()
                .map(|m| compute(ceiling, m, d, gap).total_drop_in)
                .fold(0.0, f64::max),
            Element::Swoop { spec } => {
                let a = scene.anchor(&spec.a_hole_id);
                let b = scene.anchor(&spec.b_hole_id);
                let (Some(a), Some(b)) = (a, b) else {
                    continue;
                };
                let (ea, eb) = (proj.end(a.pos, spec.layer), proj.end(b.pos, spec.layer));
                estimate_swoop_drop(ea, eb, spec, d, gap) - ea.y.min(eb.y)
            }
        };
        max_drop = max_drop.max(drop);
    }
    max_drop
}

/// Previews for `frames` evenly spaced rotations starting at `view.rotation_deg`.
///
/// Frames are computed lazily and strictly in order.
pub fn rotation_frames(
    scene: &Scene,
    view: ViewParams,
    frames: usize,
) -> impl Iterator<Item = Preview> + '_ {
    (0..frames).map(move |i| {
        let mut v = view;
        v.rotation_deg = (view.rotation_deg + 360.0 * i as f64 / frames as f64).rem_euclid(360.0);
        build_preview(scene, &v)
    })
}

fn lookup<'a>(
    scene: &'a Scene,
    idx: usize,
    anchor_id: &str,
    out: &mut Preview,
) -> Option<&'a Anchor> {
    let anchor = scene.anchor(anchor_id);
    if anchor.is_none() {
        tracing::warn!(element = idx, anchor_id, "element references unknown anchor; skipped");
        if out.skipped.last() != Some(&idx) {
            out.skipped.push(idx);
        }
    }
    anchor
}

fn note(out: &mut Preview, idx: usize, preview: &StrandPreview) {
    out.max_drop_in = out.max_drop_in.max(preview.total_drop_in);
    if preview.over_ceiling && out.over_ceiling.last() != Some(&idx) {
        out.over_ceiling.push(idx);
    }
}

fn push_hang(
    comp: &mut DepthCompositor,
    hang: PlacedHang,
    depth: f64,
    layer: DepthLayer,
    color_id: &str,
) {
    if let Some(mound) = hang.mound {
        comp.push(depth, layer, Primitive::Mound { mound });
    }
    for segment in hang.chains {
        comp.push(depth, layer, Primitive::Chain { segment });
    }
    for clasp in hang.clasps {
        comp.push(depth, layer, Primitive::Clasp { clasp });
    }
    for sphere in hang.spheres {
        comp.push(
            depth,
            layer,
            Primitive::Sphere {
                sphere,
                color_id: color_id.to_string(),
            },
        );
    }
}

#[cfg(test)]
mod tests;
