//! Property tests for boundary geometry and contact response

use glam::Vec2;
use hexspin::consts::TICK_DT;
use hexspin::sim::{
    Ball, PolygonBoundary, closest_point_on_segment, contact_response, integrate,
    resolve_collisions, step,
};
use hexspin::SimulationConfig;
use proptest::prelude::*;

fn vec2(range: f32) -> impl Strategy<Value = Vec2> {
    (-range..range, -range..range).prop_map(|(x, y)| Vec2::new(x, y))
}

proptest! {
    #[test]
    fn vertices_are_rigid_and_repeatable(
        sides in 3u32..12,
        radius in 10.0f32..500.0,
        angle in -10.0f32..10.0,
        spin in -0.5f32..0.5,
        ticks in 0u32..50,
    ) {
        let mut boundary = PolygonBoundary::new(Vec2::new(3.0, -7.0), radius, sides, angle, spin).unwrap();
        for _ in 0..ticks {
            boundary.advance(TICK_DT);
        }
        let first = boundary.vertices();
        prop_assert_eq!(&first, &boundary.vertices());
        prop_assert_eq!(first.len(), sides as usize);
        for v in &first {
            let d = (*v - boundary.center()).length();
            prop_assert!((d - radius).abs() < radius * 1e-4);
        }
    }

    #[test]
    fn closest_point_lies_on_segment(p in vec2(100.0), a in vec2(100.0), b in vec2(100.0)) {
        let c = closest_point_on_segment(p, a, b);
        let ab = b - a;
        if ab.length_squared() > 1e-3 {
            // Collinear with ab and between the endpoints
            let t = (c - a).dot(ab) / ab.length_squared();
            prop_assert!((-1e-4..=1.0 + 1e-4).contains(&t));
            prop_assert!(ab.perp_dot(c - a).abs() < 1e-2 * ab.length().max(1.0));
            // No endpoint is closer
            let d = (p - c).length();
            prop_assert!(d <= (p - a).length() + 1e-3);
            prop_assert!(d <= (p - b).length() + 1e-3);
        }
    }

    #[test]
    fn static_bounce_never_gains_normal_speed(
        v in vec2(30.0),
        angle in 0.0f32..std::f32::consts::TAU,
        restitution in 0.0f32..=1.0,
        friction in 0.0f32..=1.0,
    ) {
        let n = Vec2::new(angle.cos(), angle.sin());
        let after = contact_response(v, n, Vec2::ZERO, restitution, friction);
        prop_assert!(after.dot(n).abs() <= v.dot(n).abs() + 1e-4);
        prop_assert!(after.length() <= v.length() + 1e-4);
    }

    #[test]
    fn single_edge_correction_clears_overlap(
        edge in 0usize..6,
        depth in 0.01f32..14.0,
        along in -0.3f32..0.3,
        v in vec2(5.0),
        spin in -0.05f32..0.05,
    ) {
        let boundary = PolygonBoundary::hexagon(Vec2::ZERO, 250.0, spin).unwrap();
        let (a, b) = boundary.edges()[edge];
        let mid = (a + b) * 0.5;
        let inward = -mid.normalize();
        let tangent = (b - a).normalize();
        let radius = 15.0;
        let start = mid + tangent * (along * (b - a).length()) + inward * (radius - depth);
        let mut ball = Ball::new(start, v, radius, 0.8).unwrap();

        let events = resolve_collisions(&mut ball, &boundary, 0.9, 0.5);
        prop_assert_eq!(events.len(), 1);
        prop_assert_eq!(events[0].edge_index, edge);
        let d = (ball.position - closest_point_on_segment(ball.position, a, b)).length();
        prop_assert!(d >= radius - 0.5);
    }

    #[test]
    fn far_boundary_step_is_free_motion(
        p in vec2(100.0),
        v in vec2(20.0),
        g in vec2(1.0),
        drag in 0.5f32..=1.0,
    ) {
        let config = SimulationConfig {
            gravity: g,
            drag_coefficient: drag,
            ..Default::default()
        };
        let boundary = PolygonBoundary::hexagon(Vec2::new(1.0e5, 1.0e5), 100.0, 0.3).unwrap();

        let mut stepped = Ball::new(p, v, 15.0, 0.8).unwrap();
        let mut free = stepped.clone();
        let events = step(&mut stepped, &boundary, &config, TICK_DT);
        integrate(&mut free, &config, TICK_DT);

        prop_assert!(events.is_empty());
        prop_assert_eq!(stepped.position, free.position);
        prop_assert_eq!(stepped.velocity, free.velocity);
    }
}
