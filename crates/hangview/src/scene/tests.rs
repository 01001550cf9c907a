use super::*;
use crate::model::{
    Anchor, AnchorRole, ClusterSpec, PreviewView, ProjectSpecs, StrandSpec, SwoopSpec,
};

fn strand_spec(n: usize, top: f64) -> StrandSpec {
    StrandSpec {
        sphere_count: n,
        top_chain_length_in: top,
        bottom_chain_length_in: 4.0,
        color_id: "gold".into(),
        ..Default::default()
    }
}

fn scene_with(anchors: Vec<Anchor>, elements: Vec<Element>) -> Scene {
    Scene {
        project: ProjectSpecs::default(),
        anchors,
        elements,
    }
}

fn strand_at(id: &str, n: usize) -> Element {
    Element::Strand {
        anchor_id: id.into(),
        spec: strand_spec(n, 10.0),
    }
}

fn sphere_xs(p: &Preview) -> Vec<f64> {
    p.primitives
        .iter()
        .filter_map(|p| match p {
            Primitive::Sphere { sphere, .. } => Some(sphere.center.x),
            _ => None,
        })
        .collect()
}

fn two_depth_scene() -> Scene {
    // boundary 120×120, center (60, 60); plan y grows toward the viewer
    scene_with(
        vec![
            Anchor::new("near", 30.0, 110.0, AnchorRole::StrandHole),
            Anchor::new("far", 90.0, 10.0, AnchorRole::StrandHole),
        ],
        vec![strand_at("near", 2), strand_at("far", 2)],
    )
}

#[test]
fn front_view_draws_far_strand_first() {
    let p = build_preview(&two_depth_scene(), &ViewParams::default());
    assert_eq!(sphere_xs(&p), vec![90.0, 90.0, 30.0, 30.0]);
    assert!(p.skipped.is_empty());
    assert!(p.over_ceiling.is_empty());
    assert_eq!(p.max_drop_in, 10.0 + 2.0 * 4.5 + 2.5 + 4.0);
}

#[test]
fn rear_view_reverses_depth_order() {
    let mut scene = two_depth_scene();
    scene.project.preview_view = PreviewView::Rear;
    let p = build_preview(&scene, &ViewParams::default());
    assert_eq!(sphere_xs(&p), vec![30.0, 30.0, 90.0, 90.0]);
}

#[test]
fn half_turn_swaps_near_and_far() {
    let view = ViewParams {
        rotation_deg: 180.0,
        ..Default::default()
    };
    let xs = sphere_xs(&build_preview(&two_depth_scene(), &view));
    // "near" rotates to the back and to x = 90; "far" to the front at x = 30
    assert_eq!(xs.len(), 4);
    assert!((xs[0] - 90.0).abs() < 1e-9);
    assert!((xs[3] - 30.0).abs() < 1e-9);
}

#[test]
fn flat_preview_ignores_rotation_for_x() {
    let mut scene = two_depth_scene();
    scene.project.preview_depth = false;
    let view = ViewParams {
        rotation_deg: 73.0,
        perspective_factor: 1.0,
        ..Default::default()
    };
    let p = build_preview(&scene, &view);
    let mut xs = sphere_xs(&p);
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(xs, vec![30.0, 30.0, 90.0, 90.0]);
}

#[test]
fn perspective_lifts_near_elements() {
    let view = ViewParams {
        perspective_factor: 1.0,
        ..Default::default()
    };
    let p = build_preview(&two_depth_scene(), &view);
    let ys: Vec<(f64, f64)> = p
        .primitives
        .iter()
        .filter_map(|p| match p {
            Primitive::Sphere { sphere, .. } => Some((sphere.center.x, sphere.center.y)),
            _ => None,
        })
        .collect();
    let near_y = ys.iter().find(|(x, _)| *x == 30.0).unwrap().1;
    let far_y = ys.iter().find(|(x, _)| *x == 90.0).unwrap().1;
    assert!(near_y < far_y);
}

#[test]
fn layer_spread_reorders_equal_depths() {
    let mut front = strand_spec(1, 10.0);
    front.layer = DepthLayer::Front;
    let mut back = strand_spec(1, 10.0);
    back.layer = DepthLayer::Back;
    let scene = scene_with(
        vec![
            Anchor::new("l", 20.0, 60.0, AnchorRole::StrandHole),
            Anchor::new("r", 100.0, 60.0, AnchorRole::StrandHole),
        ],
        vec![
            Element::Strand { anchor_id: "l".into(), spec: front },
            Element::Strand { anchor_id: "r".into(), spec: back },
        ],
    );
    let view = ViewParams {
        layer_spread_in: 6.0,
        ..Default::default()
    };
    assert_eq!(sphere_xs(&build_preview(&scene, &view)), vec![100.0, 20.0]);
}

#[test]
fn single_member_cluster_matches_strand() {
    let anchors = vec![Anchor::new("h", 40.0, 50.0, AnchorRole::StrandHole)];
    let as_strand = scene_with(anchors.clone(), vec![strand_at("h", 3)]);
    let as_cluster = scene_with(
        anchors,
        vec![Element::Cluster {
            anchor_id: "h".into(),
            spec: ClusterSpec {
                members: vec![strand_spec(3, 10.0)],
                radius_in: 12.0,
            },
        }],
    );
    let view = ViewParams {
        rotation_deg: 30.0,
        perspective_factor: 0.5,
        ..Default::default()
    };
    assert_eq!(
        build_preview(&as_strand, &view).primitives,
        build_preview(&as_cluster, &view).primitives
    );
}

#[test]
fn unknown_anchor_is_skipped() {
    let scene = scene_with(
        vec![Anchor::new("h", 40.0, 50.0, AnchorRole::StrandHole)],
        vec![
            strand_at("missing", 2),
            strand_at("h", 2),
            Element::Swoop {
                spec: SwoopSpec {
                    a_hole_id: "h".into(),
                    b_hole_id: "gone".into(),
                    sphere_count: 3,
                    ..Default::default()
                },
            },
        ],
    );
    let p = build_preview(&scene, &ViewParams::default());
    assert_eq!(p.skipped, vec![0, 2]);
    assert_eq!(sphere_xs(&p).len(), 2);
}

#[test]
fn over_ceiling_flags_long_elements() {
    let mut scene = two_depth_scene();
    scene.project.ceiling_height_in = 20.0;
    scene.elements.push(strand_at("near", 0));
    let p = build_preview(&scene, &ViewParams::default());
    assert_eq!(p.over_ceiling, vec![0, 1]);
}

#[test]
fn swoop_between_stacked_anchors_is_vertical() {
    for sag in [0.0, 5.0, 50.0] {
        let scene = scene_with(
            vec![
                Anchor::new("a", 50.0, 20.0, AnchorRole::FastenerHole),
                Anchor::new("b", 50.0, 80.0, AnchorRole::FastenerHole),
            ],
            vec![Element::Swoop {
                spec: SwoopSpec {
                    a_hole_id: "a".into(),
                    b_hole_id: "b".into(),
                    sphere_count: 4,
                    chain_a_in: 6.0,
                    chain_b_in: 6.0,
                    sag_in: sag,
                    ..Default::default()
                },
            }],
        );
        let p = build_preview(&scene, &ViewParams::default());
        assert_eq!(sphere_xs(&p), vec![50.0; 4]);
        let mut ys: Vec<f64> = p
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Sphere { sphere, .. } => Some(sphere.center.y),
                _ => None,
            })
            .collect();
        ys.sort_by(f64::total_cmp);
        for w in ys.windows(2) {
            assert!((w[1] - w[0] - 7.0).abs() < 1e-9, "sag {sag}: {ys:?}");
        }
        // cable of 3·7 + 4.5 + sag hangs from y = 6
        assert!((p.max_drop_in - (6.0 + 25.5 + sag)).abs() < 1e-9);
        assert!(estimate_max_drop(&scene, &ViewParams::default()) >= p.max_drop_in);
    }
}

#[test]
fn drop_estimate_bounds_strands_exactly() {
    let scene = two_depth_scene();
    let view = ViewParams::default();
    let exact = build_preview(&scene, &view).max_drop_in;
    assert_eq!(estimate_max_drop(&scene, &view), exact);
}

#[test]
fn rotation_frames_are_sequential_and_complete() {
    let scene = two_depth_scene();
    let frames: Vec<Preview> = rotation_frames(&scene, ViewParams::default(), 4).collect();
    assert_eq!(frames.len(), 4);
    assert_eq!(sphere_xs(&frames[0]), sphere_xs(&build_preview(&scene, &ViewParams::default())));
    let half = ViewParams {
        rotation_deg: 180.0,
        ..Default::default()
    };
    assert_eq!(frames[2].primitives, build_preview(&scene, &half).primitives);
    assert_eq!(rotation_frames(&scene, ViewParams::default(), 0).count(), 0);
}

#[test]
fn preview_serializes_to_json() {
    let p = build_preview(&two_depth_scene(), &ViewParams::default());
    let v = serde_json::to_value(&p).unwrap();
    assert_eq!(v["primitives"][0]["type"], "chain");
    assert!(v["primitives"].as_array().unwrap().len() > 4);
}
