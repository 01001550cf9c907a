//! Plain data exchanged with the editor and export layers.
//!
//! - Inputs: `Scene` (project, anchors, elements) and `ViewParams`.
//! - Derived outputs: `Sphere`, `ChainSegment`, `ClaspConnector`.
//!
//! Nothing here is validated; counts and lengths arrive sanitized.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Role of a ceiling hole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorRole {
    StrandHole,
    FastenerHole,
}

/// A point on the ceiling plan where an element attaches.
///
/// `grid_col`/`grid_row` are kept so re-gridding reprojects deterministically.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub id: String,
    /// Plan position in inches; plan y grows toward the viewer.
    pub pos: Vector2<f64>,
    pub role: AnchorRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_col: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_row: Option<u32>,
}

impl Anchor {
    pub fn new(id: impl Into<String>, x: f64, y: f64, role: AnchorRole) -> Self {
        Self {
            id: id.into(),
            pos: Vector2::new(x, y),
            role,
            grid_col: None,
            grid_row: None,
        }
    }
}

/// Depth layer an element is pushed into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthLayer {
    Front,
    #[default]
    Mid,
    Back,
}

impl DepthLayer {
    /// Signed multiple of `layer_spread_in` added to the depth key.
    #[inline]
    pub fn spread_sign(self) -> f64 {
        match self {
            DepthLayer::Front => -1.0,
            DepthLayer::Mid => 0.0,
            DepthLayer::Back => 1.0,
        }
    }
    /// Tie-break priority for the rear view (higher draws later).
    #[inline]
    pub fn rear_priority(self) -> u8 {
        match self {
            DepthLayer::Front => 0,
            DepthLayer::Mid => 1,
            DepthLayer::Back => 2,
        }
    }
}

/// Cosmetic pile of slack chain at an anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoundPreset {
    #[default]
    None,
    Small,
    Medium,
    Large,
}

impl MoundPreset {
    /// Slack chain length piled in the mound.
    pub fn slack_in(self) -> f64 {
        match self {
            MoundPreset::None => 0.0,
            MoundPreset::Small => 6.0,
            MoundPreset::Medium => 12.0,
            MoundPreset::Large => 24.0,
        }
    }
    /// Footprint `(width, height)` of the rendered pile.
    pub fn footprint_in(self) -> Option<(f64, f64)> {
        let slack = self.slack_in();
        if slack <= 0.0 {
            return None;
        }
        let h = slack.sqrt() * 0.6;
        Some((h * 2.5, h))
    }
}

/// Chain – spheres – chain from a single anchor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrandSpec {
    pub sphere_count: usize,
    pub top_chain_length_in: f64,
    pub bottom_chain_length_in: f64,
    pub mound: MoundPreset,
    pub color_id: String,
    pub layer: DepthLayer,
}

/// Spheres joined directly by clasps under a top chain.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackSpec {
    pub sphere_count: usize,
    pub top_chain_length_in: f64,
    pub mound: MoundPreset,
    pub color_id: String,
    pub layer: DepthLayer,
}

/// One piece of a custom strand, listed top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CustomItem {
    Chain { length_in: f64 },
    Sphere { diameter_in: f64 },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomStrandSpec {
    pub items: Vec<CustomItem>,
    pub color_id: String,
    pub layer: DepthLayer,
}

/// Several strands fanned around one anchor at `radius_in`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterSpec {
    pub members: Vec<StrandSpec>,
    pub radius_in: f64,
}

/// Sagging two-point cable of spheres between anchors `a_hole_id` and `b_hole_id`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwoopSpec {
    pub a_hole_id: String,
    pub b_hole_id: String,
    pub sphere_count: usize,
    /// Vertical chain drop at anchor A before the cable begins.
    pub chain_a_in: f64,
    pub chain_b_in: f64,
    /// Extra slack beyond the sphere run.
    pub sag_in: f64,
    pub color_id: String,
    pub layer: DepthLayer,
}

/// Element placed on the plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Element {
    Strand { anchor_id: String, spec: StrandSpec },
    Stack { anchor_id: String, spec: StackSpec },
    Cluster { anchor_id: String, spec: ClusterSpec },
    Custom { anchor_id: String, spec: CustomStrandSpec },
    Swoop { spec: SwoopSpec },
}

/// Sphere and clasp hardware shared by all elements of a project.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hardware {
    pub sphere_diameter_in: f64,
    pub gap_in: f64,
}

impl Default for Hardware {
    fn default() -> Self {
        Self {
            sphere_diameter_in: 4.5,
            gap_in: 2.5,
        }
    }
}

impl Hardware {
    /// Center-to-center spacing of adjacent spheres.
    #[inline]
    pub fn pitch(&self) -> f64 {
        self.sphere_diameter_in + self.gap_in
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewView {
    #[default]
    Front,
    Rear,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSpecs {
    pub ceiling_height_in: f64,
    pub boundary_width_in: f64,
    pub boundary_height_in: f64,
    pub hardware: Hardware,
    /// Pseudo-3D preview; when off, x is unrotated and there is no parallax.
    pub preview_depth: bool,
    pub preview_view: PreviewView,
}

impl Default for ProjectSpecs {
    fn default() -> Self {
        Self {
            ceiling_height_in: 120.0,
            boundary_width_in: 120.0,
            boundary_height_in: 120.0,
            hardware: Hardware::default(),
            preview_depth: true,
            preview_view: PreviewView::Front,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewParams {
    /// Plan rotation in degrees, 0..360.
    pub rotation_deg: f64,
    /// Blend 0..1 between unrotated and rotated x.
    pub rotation_strength: f64,
    /// Parallax strength −1..1; the sign flips below/above framing.
    pub perspective_factor: f64,
    /// Extra depth per layer step.
    pub layer_spread_in: f64,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            rotation_deg: 0.0,
            rotation_strength: 1.0,
            perspective_factor: 0.0,
            layer_spread_in: 0.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub project: ProjectSpecs,
    pub anchors: Vec<Anchor>,
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn anchor(&self, id: &str) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.id == id)
    }
}

/// Sphere in preview space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vector2<f64>,
    pub diameter: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainSegment {
    pub p1: Vector2<f64>,
    pub p2: Vector2<f64>,
}

impl ChainSegment {
    #[inline]
    pub fn new(p1: Vector2<f64>, p2: Vector2<f64>) -> Self {
        Self { p1, p2 }
    }
    #[inline]
    pub fn length(&self) -> f64 {
        (self.p2 - self.p1).norm()
    }
}

/// Eye rings just outside two spheres plus the link between them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClaspConnector {
    pub eye_top: Vector2<f64>,
    pub eye_bottom: Vector2<f64>,
    pub link_center: Vector2<f64>,
    /// Link rotation in radians (direction from the upper to the lower sphere).
    pub angle: f64,
}
