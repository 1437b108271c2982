//! Hexspin - a ball bouncing inside a spinning polygon
//!
//! Core modules:
//! - `sim`: Deterministic simulation (boundary geometry, collisions, per-tick state)
//! - `config`: Validated, JSON-loadable simulation configuration
//! - `error`: Configuration error type
//! - `runner`: Fixed-timestep driver turning frame time into ticks

pub mod config;
pub mod error;
pub mod runner;
pub mod sim;

pub use config::{DragModel, SimulationConfig};
pub use error::ConfigError;
pub use runner::FixedStepRunner;

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Nominal tick rate (ticks per real second)
    pub const TICK_RATE: f32 = 60.0;
    /// Real-time length of one tick in seconds
    pub const TICK_SECONDS: f32 = 1.0 / TICK_RATE;
    /// Length of one tick in simulation time units
    pub const TICK_DT: f32 = 1.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the runner will account for (seconds); covers more than
    /// `MAX_SUBSTEPS` ticks so a long stall hits the substep cap
    pub const MAX_FRAME_SECONDS: f32 = 0.25;

    /// Extra push applied after penetration correction so the ball does not
    /// re-collide with the same edge on the next tick
    pub const PENETRATION_EPSILON: f32 = 0.5;
    /// Collision normal used when the ball center lies exactly on an edge
    /// (straight up in screen coordinates)
    pub const FALLBACK_NORMAL: glam::Vec2 = glam::Vec2::new(0.0, -1.0);

    /// Runtime spin adjustment per nudge (radians/tick)
    pub const SPIN_NUDGE: f32 = 0.005;
    /// Runtime elasticity adjustment per step
    pub const ELASTICITY_STEP: f32 = 0.05;
    /// Elasticity range reachable through runtime adjustment
    pub const ELASTICITY_MIN: f32 = 0.5;
    pub const ELASTICITY_MAX: f32 = 1.0;
}

/// Normalize angle to [-π, π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid can round up to exactly TAU
    if wrapped >= PI { wrapped - TAU } else { wrapped }
}

/// Convert polar (r, theta) around `center` to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}
