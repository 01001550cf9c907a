//! Preview geometry for hanging-sphere installations.
//!
//! Converts placement specs (sphere counts, chain lengths, sag, anchors on a
//! ceiling plan) into front-elevation geometry: sphere centers, chain
//! segments, clasp connectors, and a depth-ordered primitive list.
//!
//! Conventions
//! - Units are inches.
//! - Preview space is y-down: `y = 0` is the ceiling line.
//! - Larger depth means farther from the viewer; the compositor draws the
//!   largest depth first.
//!
//! Everything here is a pure function over immutable inputs. Rendering and
//! export layers call `scene::build_preview` with the same inputs they show
//! on screen.

pub mod cfg;
pub mod compose;
pub mod curve;
pub mod layout;
pub mod model;
pub mod projection;
pub mod scene;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common exports for callers.
pub mod prelude {
    pub use crate::compose::{DepthCompositor, Primitive};
    pub use crate::curve::{build_cumulative, point_at_arc_length, relax, sample_at, solve};
    pub use crate::curve::{CatenaryParams, Polyline};
    pub use crate::layout::{ProjectedEnd, StrandPreview, SwoopPreview};
    pub use crate::model::{
        Anchor, AnchorRole, ClusterSpec, CustomItem, CustomStrandSpec, DepthLayer, Element,
        Hardware, MoundPreset, PreviewView, ProjectSpecs, Scene, StackSpec, StrandSpec, SwoopSpec,
        ViewParams,
    };
    pub use crate::projection::{compute_y_shift, project, PlanFrame, Projected};
    pub use crate::scene::{build_preview, estimate_max_drop, rotation_frames, Preview};
    pub use nalgebra::Vector2 as Vec2;
}
