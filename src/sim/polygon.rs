//! Rotating regular polygon boundary
//!
//! The polygon is a rigid body spinning about its center. Only the pose is
//! stored; vertices and edges are recomputed from it on every call:
//! - center, circumradius: fixed for the lifetime of the boundary
//! - rotation: current angle (radians, wrapped to [-π, π))
//! - angular_velocity: radians per tick

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::{ConfigError, ensure_finite, ensure_positive};
use crate::{normalize_angle, polar_to_cartesian};

/// Distance from the center of a regular polygon to the midpoint of an edge
#[inline]
pub fn regular_apothem(circumradius: f32, sides: u32) -> f32 {
    circumradius * (std::f32::consts::PI / sides as f32).cos()
}

/// A regular convex polygon rotating about its center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoundaryData")]
pub struct PolygonBoundary {
    center: Vec2,
    circumradius: f32,
    sides: u32,
    /// Current rotation angle (radians)
    pub rotation: f32,
    /// Spin rate (radians per tick)
    pub angular_velocity: f32,
}

/// Serialized form, checked by `PolygonBoundary::new` on the way in
#[derive(Deserialize)]
struct BoundaryData {
    center: Vec2,
    circumradius: f32,
    sides: u32,
    rotation: f32,
    angular_velocity: f32,
}

impl TryFrom<BoundaryData> for PolygonBoundary {
    type Error = ConfigError;

    fn try_from(data: BoundaryData) -> Result<Self, Self::Error> {
        Self::new(
            data.center,
            data.circumradius,
            data.sides,
            data.rotation,
            data.angular_velocity,
        )
    }
}

impl PolygonBoundary {
    pub fn new(
        center: Vec2,
        circumradius: f32,
        sides: u32,
        rotation: f32,
        angular_velocity: f32,
    ) -> Result<Self, ConfigError> {
        if !center.is_finite() {
            return Err(ConfigError::NonFinite { name: "center" });
        }
        ensure_positive("circumradius", circumradius)?;
        if sides < 3 {
            return Err(ConfigError::TooFewSides(sides));
        }
        ensure_finite("initial_angle", rotation)?;
        ensure_finite("angular_velocity", angular_velocity)?;

        Ok(Self {
            center,
            circumradius,
            sides,
            rotation: normalize_angle(rotation),
            angular_velocity,
        })
    }

    /// A regular hexagon
    pub fn hexagon(center: Vec2, circumradius: f32, angular_velocity: f32) -> Result<Self, ConfigError> {
        Self::new(center, circumradius, 6, 0.0, angular_velocity)
    }

    /// Build the boundary described by a config
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.center,
            config.circumradius,
            config.polygon_sides,
            config.initial_angle,
            config.angular_velocity,
        )
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn circumradius(&self) -> f32 {
        self.circumradius
    }

    #[inline]
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Distance from center to the midpoint of any edge
    pub fn apothem(&self) -> f32 {
        regular_apothem(self.circumradius, self.sides)
    }

    /// Rotate by `angular_velocity * dt` ticks
    pub fn advance(&mut self, dt: f32) {
        if self.angular_velocity != 0.0 {
            self.rotation = normalize_angle(self.rotation + self.angular_velocity * dt);
        }
    }

    /// Current vertices in order of increasing angle
    pub fn vertices(&self) -> Vec<Vec2> {
        let step = std::f32::consts::TAU / self.sides as f32;
        (0..self.sides)
            .map(|i| polar_to_cartesian(self.center, self.circumradius, self.rotation + i as f32 * step))
            .collect()
    }

    /// Current edges, `edge[i] = (vertex[i], vertex[i + 1 mod n])`
    pub fn edges(&self) -> Vec<(Vec2, Vec2)> {
        let vertices = self.vertices();
        let n = vertices.len();
        (0..n).map(|i| (vertices[i], vertices[(i + 1) % n])).collect()
    }

    /// Instantaneous velocity of the material point at `point` on the spinning body
    #[inline]
    pub fn point_velocity(&self, point: Vec2) -> Vec2 {
        self.angular_velocity * (point - self.center).perp()
    }

    /// Reverse the spin direction
    pub fn reverse(&mut self) {
        self.angular_velocity = -self.angular_velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn hex() -> PolygonBoundary {
        PolygonBoundary::hexagon(Vec2::new(250.0, 250.0), 250.0, 0.02).unwrap()
    }

    #[test]
    fn test_vertices_equidistant_from_center() {
        let mut boundary = hex();
        for _ in 0..100 {
            boundary.advance(1.0);
            for v in boundary.vertices() {
                assert!(((v - boundary.center()).length() - 250.0).abs() < 1e-2);
            }
        }
    }

    #[test]
    fn test_first_vertex_follows_rotation() {
        let boundary = PolygonBoundary::new(Vec2::ZERO, 10.0, 4, FRAC_PI_2, 0.0).unwrap();
        let vertices = boundary.vertices();
        assert_eq!(vertices.len(), 4);
        assert!((vertices[0] - Vec2::new(0.0, 10.0)).length() < 1e-4);
        assert!((vertices[1] - Vec2::new(-10.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_vertices_idempotent_between_advances() {
        let mut boundary = hex();
        boundary.advance(3.0);
        assert_eq!(boundary.vertices(), boundary.vertices());
    }

    #[test]
    fn test_edges_wrap_around() {
        let boundary = hex();
        let vertices = boundary.vertices();
        let edges = boundary.edges();
        assert_eq!(edges.len(), 6);
        assert_eq!(edges[5], (vertices[5], vertices[0]));
        for (i, (a, _)) in edges.iter().enumerate() {
            assert_eq!(*a, vertices[i]);
        }
    }

    #[test]
    fn test_advance_accumulates_and_wraps() {
        let mut boundary = PolygonBoundary::new(Vec2::ZERO, 1.0, 6, 0.0, 0.5).unwrap();
        for _ in 0..20 {
            boundary.advance(1.0);
        }
        assert!(boundary.rotation >= -PI && boundary.rotation < PI);
        assert!((boundary.rotation - normalize_angle(10.0)).abs() < 1e-4);
    }

    #[test]
    fn test_static_boundary_does_not_move() {
        let mut boundary = PolygonBoundary::hexagon(Vec2::ZERO, 100.0, 0.0).unwrap();
        let before = boundary.vertices();
        boundary.advance(10.0);
        assert_eq!(before, boundary.vertices());
    }

    #[test]
    fn test_point_velocity_is_tangential() {
        let boundary = hex();
        let point = Vec2::new(450.0, 250.0);
        let w = boundary.point_velocity(point);
        // 200 units out along +x, spinning at 0.02 rad/tick
        assert!((w - Vec2::new(0.0, 4.0)).length() < 1e-4);
        assert!(w.dot(point - boundary.center()).abs() < 1e-4);

        let mut reversed = boundary.clone();
        reversed.reverse();
        assert!((reversed.point_velocity(point) + w).length() < 1e-5);
    }

    #[test]
    fn test_apothem_of_hexagon() {
        let boundary = hex();
        assert!((boundary.apothem() - 250.0 * (PI / 6.0).cos()).abs() < 1e-3);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut boundary = hex();
        boundary.advance(7.0);
        let json = serde_json::to_string(&boundary).unwrap();
        let back: PolygonBoundary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.center(), boundary.center());
        assert_eq!(back.sides(), boundary.sides());
        assert_eq!(back.angular_velocity, boundary.angular_velocity);
        assert!((back.rotation - boundary.rotation).abs() < 1e-6);
    }

    #[test]
    fn test_deserialize_validates() {
        let mut value = serde_json::to_value(hex()).unwrap();
        value["circumradius"] = serde_json::json!(-3.0);
        assert!(serde_json::from_value::<PolygonBoundary>(value).is_err());

        let mut value = serde_json::to_value(hex()).unwrap();
        value["sides"] = serde_json::json!(2);
        assert!(serde_json::from_value::<PolygonBoundary>(value).is_err());
    }

    #[test]
    fn test_rejects_bad_geometry() {
        assert!(PolygonBoundary::new(Vec2::ZERO, 0.0, 6, 0.0, 0.0).is_err());
        assert!(PolygonBoundary::new(Vec2::ZERO, 10.0, 2, 0.0, 0.0).is_err());
        assert!(PolygonBoundary::new(Vec2::ZERO, 10.0, 6, 0.0, f32::NAN).is_err());
    }
}
