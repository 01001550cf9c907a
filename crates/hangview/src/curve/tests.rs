use super::*;
use nalgebra::Vector2;
use proptest::prelude::*;

fn close(a: Vector2<f64>, b: Vector2<f64>, tol: f64) -> bool {
    (a - b).norm() < tol
}

#[test]
fn catenary_hits_both_endpoints() {
    let p = solve(0.0, 0.0, 40.0, -6.0, 55.0).expect("solvable span");
    assert!(p.a > 0.0);
    assert!(close(point_at_arc_length(&p, 0.0), Vector2::new(0.0, 0.0), 1e-6));
    assert!(close(point_at_arc_length(&p, p.length), Vector2::new(40.0, -6.0), 1e-6));
    // The lowest point of a slack level cable sits below both ends (y-up frame).
    let level = solve(0.0, 0.0, 40.0, 0.0, 60.0).unwrap();
    let mid = point_at_arc_length(&level, 30.0);
    assert!((mid.x - 20.0).abs() < 1e-9);
    assert!(mid.y < -5.0);
}

#[test]
fn catenary_right_to_left_keeps_start_point() {
    let p = solve(30.0, 2.0, -10.0, -3.0, 50.0).unwrap();
    assert!(p.reversed);
    assert!(close(point_at_arc_length(&p, 0.0), Vector2::new(30.0, 2.0), 1e-6));
    assert!(close(point_at_arc_length(&p, 50.0), Vector2::new(-10.0, -3.0), 1e-6));
}

#[test]
fn catenary_rejects_degenerate_inputs() {
    // taut or too short
    assert!(solve(0.0, 0.0, 10.0, 0.0, 10.0).is_none());
    assert!(solve(0.0, 0.0, 10.0, 0.0, 9.0).is_none());
    // vertical span
    assert!(solve(5.0, 0.0, 5.0 + 1e-7, -3.0, 20.0).is_none());
    // non-finite length
    assert!(solve(0.0, 0.0, 10.0, 0.0, f64::NAN).is_none());
    assert!(solve(0.0, 0.0, 10.0, 0.0, f64::INFINITY).is_none());
}

#[test]
fn catenary_arc_length_parameter_is_distance_along_curve() {
    let p = solve(0.0, 10.0, 50.0, 4.0, 70.0).unwrap();
    let pts: Vec<_> = (0..=2000)
        .map(|i| point_at_arc_length(&p, p.length * i as f64 / 2000.0))
        .collect();
    let cum = build_cumulative(&pts);
    for (k, s) in [(500usize, 17.5), (1000, 35.0), (1500, 52.5)] {
        assert!((cum[k] - s).abs() < 1e-3, "cum[{k}]={} vs {s}", cum[k]);
    }
    assert!((cum[2000] - 70.0).abs() < 1e-3);
}

#[test]
fn sampler_interpolates_and_clamps() {
    let pts = vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(3.0, 4.0),
        Vector2::new(3.0, 10.0),
    ];
    let cum = build_cumulative(&pts);
    assert_eq!(cum, vec![0.0, 5.0, 11.0]);
    assert!(close(sample_at(&pts, &cum, 2.5), Vector2::new(1.5, 2.0), 1e-12));
    assert!(close(sample_at(&pts, &cum, 8.0), Vector2::new(3.0, 7.0), 1e-12));
    assert_eq!(sample_at(&pts, &cum, -4.0), pts[0]);
    assert_eq!(sample_at(&pts, &cum, 99.0), pts[2]);
    let line = Polyline::new(pts);
    assert_eq!(line.total(), 11.0);
    assert_eq!(line.max_y(), Some(10.0));
}

#[test]
fn sampler_handles_tiny_inputs() {
    assert_eq!(build_cumulative(&[]), Vec::<f64>::new());
    let one = [Vector2::new(2.0, 3.0)];
    assert_eq!(sample_at(&one, &build_cumulative(&one), 1.0), one[0]);
    let dup = [Vector2::new(1.0, 1.0), Vector2::new(1.0, 1.0)];
    assert_eq!(sample_at(&dup, &build_cumulative(&dup), 0.5), dup[0]);
}

#[test]
fn relaxed_rope_sags_below_its_pins() {
    let p0 = Vector2::new(0.0, 10.0);
    let p1 = Vector2::new(40.0, 14.0);
    let rope = relax(p0, p1, 60.0, 32, 80);
    assert_eq!(rope.points.len(), 32);
    assert_eq!(rope.cum.len(), 32);
    assert!(rope.max_y().unwrap() > 20.0);
    let low = estimate_lowest_y(p0, p1, 60.0);
    assert!(low > 14.0);
}

#[test]
fn relax_clamps_point_count() {
    let p0 = Vector2::new(0.0, 0.0);
    let p1 = Vector2::new(5.0, 0.0);
    let rope = relax(p0, p1, 8.0, 0, 3);
    assert_eq!(rope.points, vec![p0, p1]);
}

proptest! {
    #[test]
    fn prop_catenary_endpoints(
        x0 in -50.0f64..50.0,
        y0 in -50.0f64..50.0,
        dx in prop_oneof![-100.0f64..-1.0, 1.0f64..100.0],
        dy in -40.0f64..40.0,
        slack in 1.05f64..3.0,
    ) {
        let (x1, y1) = (x0 + dx, y0 + dy);
        let l = dx.hypot(dy) * slack;
        let p = solve(x0, y0, x1, y1, l).expect("non-degenerate span");
        prop_assert!(close(point_at_arc_length(&p, 0.0), Vector2::new(x0, y0), 1e-3));
        prop_assert!(close(point_at_arc_length(&p, p.length), Vector2::new(x1, y1), 1e-3));
    }

    #[test]
    fn prop_catenary_none_when_not_slack(
        dx in 0.5f64..50.0,
        dy in -20.0f64..20.0,
        shrink in 0.5f64..=1.0,
    ) {
        let l = dx.hypot(dy) * shrink;
        prop_assert!(solve(0.0, 0.0, dx, dy, l).is_none());
    }

    #[test]
    fn prop_relax_pins_endpoints(
        ax in -20.0f64..20.0, ay in -20.0f64..20.0,
        bx in -20.0f64..20.0, by in -20.0f64..20.0,
        extra in 0.0f64..30.0,
        count in 2usize..40,
        iters in 1usize..30,
    ) {
        let p0 = Vector2::new(ax, ay);
        let p1 = Vector2::new(bx, by);
        let rope = relax(p0, p1, (p1 - p0).norm() + extra, count, iters);
        prop_assert_eq!(rope.points[0], p0);
        prop_assert_eq!(*rope.points.last().unwrap(), p1);
    }
}
