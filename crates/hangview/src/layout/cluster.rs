//! Cluster: several strands fanned on the plan around one anchor.

use nalgebra::Vector2;

use crate::model::ClusterSpec;

/// Plan offset of each member; member `k` of `n` sits at angle `2πk/n` on
/// `radius_in`. A single member hangs at the anchor itself.
pub fn member_offsets(spec: &ClusterSpec) -> Vec<Vector2<f64>> {
    let n = spec.members.len();
    if n <= 1 {
        return vec![Vector2::zeros(); n];
    }
    (0..n)
        .map(|k| {
            let th = std::f64::consts::TAU * k as f64 / n as f64;
            Vector2::new(th.cos(), th.sin()) * spec.radius_in
        })
        .collect()
}
