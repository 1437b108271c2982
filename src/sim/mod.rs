//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable edge iteration order (ascending index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod polygon;
pub mod state;
pub mod tick;

pub use collision::{
    CollisionEvent, ball_edge_collision, closest_point_on_segment, contact_response,
    reflect_velocity, resolve_collisions,
};
pub use polygon::PolygonBoundary;
pub use state::{Ball, SimulationState, Snapshot, TRAIL_LENGTH, TrailPoint};
pub use tick::{TickInput, integrate, step, tick, wrap_position};
