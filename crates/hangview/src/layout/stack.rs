//! Stack: spheres joined directly by clasps under a top chain.

use super::strand::{uniform_run, StrandPreview};
use crate::cfg::STACK_GAP_IN;
use crate::model::StackSpec;

/// Lay out a stack; the gap between spheres is the clasp alone (`STACK_GAP_IN`).
pub fn compute_stack(ceiling_height_in: f64, spec: &StackSpec, sphere_diameter: f64) -> StrandPreview {
    let mut out = uniform_run(
        spec.sphere_count,
        spec.top_chain_length_in,
        sphere_diameter,
        STACK_GAP_IN,
        spec.mound,
    );
    out.over_ceiling = out.total_drop_in > ceiling_height_in;
    out
}
