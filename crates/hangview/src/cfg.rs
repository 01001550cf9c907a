//! Tolerances and tuning constants (internal).
//!
//! Policy
//! - Fixed constants; per-project tunables (sphere size, gap, view) travel in
//!   `model::ProjectSpecs` and `model::ViewParams` instead.

/// Division guard for distances (`d.max(DIST_EPS)`).
pub(crate) const DIST_EPS: f64 = 1e-9;

/// Spans narrower than this are treated as vertical by the catenary solver.
pub(crate) const CATENARY_MIN_SPAN: f64 = 1e-6;
/// Spans narrower than this are hung as a straight vertical run by the swoop builder.
pub(crate) const SWOOP_VERTICAL_SPAN: f64 = 1e-3;
/// Bisection steps for `d / sinh(d) = R`.
pub(crate) const CATENARY_BISECT_ITERS: usize = 80;
/// Upper cap on the doubled bracket for `d`.
pub(crate) const CATENARY_BRACKET_CAP: f64 = 60.0;
/// Lower end of the bracket for `d` (`d / sinh(d)` is 0/0 at zero).
pub(crate) const CATENARY_BRACKET_LO: f64 = 1e-12;

/// Default relaxation iterations.
pub const RELAX_ITERATIONS: usize = 80;
/// Constraint passes per relaxation iteration.
pub(crate) const RELAX_PASSES: usize = 6;
/// Gravity increment per iteration, as a fraction of the segment length.
pub(crate) const RELAX_GRAVITY_FRAC: f64 = 0.15;
/// Seed bulge amplitude, as a fraction of the segment length.
pub(crate) const RELAX_BULGE_FRAC: f64 = 0.25;
/// Point count for bounds estimation.
pub(crate) const RELAX_BOUNDS_POINTS: usize = 24;

/// Arc-length steps for sampling a swoop cable (clamped per sphere count).
pub(crate) const SWOOP_MIN_STEPS: usize = 60;
pub(crate) const SWOOP_MAX_STEPS: usize = 240;
pub(crate) const SWOOP_STEPS_PER_SPHERE: usize = 20;

/// Eye ring radius of a clasp connector.
pub const CLASP_EYE_RADIUS: f64 = 0.3;
/// Allowed divergence between realized and nominal eye-to-eye gap.
pub(crate) const CLASP_GAP_TOLERANCE: f64 = 0.25;

/// Vertical lift (inches) applied to an element at a full half-diagonal of depth.
pub const VERTICAL_RAISE_IN: f64 = 24.0;

/// Surface gap between stacked spheres: the eye rings of a clasp touch.
pub const STACK_GAP_IN: f64 = 4.0 * CLASP_EYE_RADIUS;
