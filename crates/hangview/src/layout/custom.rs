//! Custom strand: an arbitrary top-to-bottom sequence of chains and spheres.

use super::strand::{Span, StrandPreview};
use crate::model::{CustomItem, CustomStrandSpec, MoundPreset};

/// Lay out a custom strand. Consecutive spheres are joined by a clasp `gap` apart.
pub fn compute_custom(ceiling_height_in: f64, spec: &CustomStrandSpec, gap: f64) -> StrandPreview {
    let mut y = 0.0;
    let mut prev_sphere = false;
    let mut out = StrandPreview {
        sphere_centers: Vec::new(),
        sphere_diameters: Vec::new(),
        chains: Vec::new(),
        clasps: Vec::new(),
        gap,
        total_drop_in: 0.0,
        over_ceiling: false,
        mound: MoundPreset::None,
    };
    for item in &spec.items {
        match *item {
            CustomItem::Chain { length_in } => {
                out.chains.push(Span {
                    start: y,
                    end: y + length_in,
                });
                y += length_in;
                prev_sphere = false;
            }
            CustomItem::Sphere { diameter_in } => {
                if prev_sphere {
                    y += gap;
                    out.clasps.push(out.sphere_centers.len() - 1);
                }
                out.sphere_centers.push(y + 0.5 * diameter_in);
                out.sphere_diameters.push(diameter_in);
                y += diameter_in;
                prev_sphere = true;
            }
        }
    }
    out.total_drop_in = y;
    out.over_ceiling = y > ceiling_height_in;
    out
}
