//! Element builders: abstract specs → preview geometry.
//!
//! - `strand`, `stack`, `custom`: vertical hangs measured downward from the
//!   ceiling (`StrandPreview`), placed in 2D with `StrandPreview::place`.
//! - `cluster`: plan offsets for several strands on one anchor.
//! - `swoop`: two-point sagging cable with evenly pitched spheres.
//! - `clasp`: eye/link connector between two spheres (shared by all builders).

mod clasp;
mod cluster;
mod custom;
mod stack;
mod strand;
mod swoop;

pub use clasp::clasp_between;
pub use cluster::member_offsets;
pub use custom::compute_custom;
pub use stack::compute_stack;
pub use strand::{compute, MoundShape, PlacedHang, Span, StrandPreview};
pub use swoop::{compute_swoop, estimate_swoop_drop, Placed, ProjectedEnd, SwoopPreview};
