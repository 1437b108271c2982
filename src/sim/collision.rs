//! Collision detection and response against a moving polygon boundary
//!
//! The boundary is a spinning rigid body, so the walls themselves move. The
//! response is computed in the frame of the wall at the contact point: take the
//! ball velocity relative to the wall, bounce it there, then add the wall
//! velocity back. That last step is what lets a spinning polygon fling the ball.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::polygon::PolygonBoundary;
use super::state::Ball;
use crate::consts::FALLBACK_NORMAL;

/// A single ball/edge overlap found during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    /// Index of the edge in `PolygonBoundary::edges()`
    pub edge_index: usize,
    /// Closest point on the edge to the ball center
    pub point: Vec2,
    /// Unit normal pointing from the wall toward the ball center
    pub normal: Vec2,
    /// Ball center to contact point distance at detection
    pub distance: f32,
    /// How far the ball surface crossed the edge (radius - distance)
    pub penetration: f32,
}

/// Closest point to `p` on segment `ab`
///
/// A zero-length segment returns its shared endpoint.
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Check a ball against one edge
pub fn ball_edge_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    edge_index: usize,
    a: Vec2,
    b: Vec2,
) -> Option<CollisionEvent> {
    let closest = closest_point_on_segment(ball_pos, a, b);
    let offset = ball_pos - closest;
    let distance = offset.length();

    if distance >= ball_radius {
        return None;
    }

    // Center exactly on the edge: no direction to push along
    let normal = if distance == 0.0 {
        FALLBACK_NORMAL
    } else {
        offset / distance
    };

    Some(CollisionEvent {
        edge_index,
        point: closest,
        normal,
        distance,
        penetration: ball_radius - distance,
    })
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Bounce `velocity` off a wall moving at `wall_velocity`
///
/// In the wall frame the normal component is reversed and scaled by
/// `restitution`, and the tangential component becomes the incoming
/// tangential component scaled by `wall_friction`.
pub fn contact_response(
    velocity: Vec2,
    normal: Vec2,
    wall_velocity: Vec2,
    restitution: f32,
    wall_friction: f32,
) -> Vec2 {
    let v_rel = velocity - wall_velocity;
    let reflected = reflect_velocity(v_rel, normal) * restitution;

    let tangent = normal.perp();
    let target_tangential = v_rel.dot(tangent) * wall_friction;
    let current_tangential = reflected.dot(tangent);
    let adjusted = reflected + tangent * (target_tangential - current_tangential);

    adjusted + wall_velocity
}

/// Resolve every edge the ball overlaps, in ascending edge order
///
/// Each edge is tested against the ball as left by the previous correction, so
/// a ball wedged into a corner may be pushed back into an earlier edge. That is
/// accepted; there is no simultaneous multi-contact solve.
pub fn resolve_collisions(
    ball: &mut Ball,
    boundary: &PolygonBoundary,
    wall_friction: f32,
    epsilon: f32,
) -> Vec<CollisionEvent> {
    let mut events = Vec::new();

    for (i, (a, b)) in boundary.edges().into_iter().enumerate() {
        let Some(event) = ball_edge_collision(ball.position, ball.radius(), i, a, b) else {
            continue;
        };

        let wall_velocity = boundary.point_velocity(event.point);
        ball.velocity = contact_response(
            ball.velocity,
            event.normal,
            wall_velocity,
            ball.restitution(),
            wall_friction,
        );
        ball.position += event.normal * (event.penetration + epsilon);

        log::trace!(
            "edge {} hit: depth {:.3}, normal ({:.3}, {:.3})",
            i,
            event.penetration,
            event.normal.x,
            event.normal.y
        );
        events.push(event);
    }

    events
}
