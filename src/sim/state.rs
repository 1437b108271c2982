//! Simulation state and core types
//!
//! Everything the tick loop mutates lives here. Rendering only ever sees a
//! `Snapshot`, an owned copy taken after a tick completes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::CollisionEvent;
use super::polygon::PolygonBoundary;
use crate::config::SimulationConfig;
use crate::consts::{ELASTICITY_MAX, ELASTICITY_MIN};
use crate::error::{ConfigError, ensure_positive, ensure_unit};

/// Trail point for ball rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub speed: f32,
}

/// Maximum number of trail points to store
pub const TRAIL_LENGTH: usize = 15;

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "BallData")]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
    radius: f32,
    restitution: f32,
    /// Trail history for rendering (newest first)
    #[serde(skip)]
    pub trail: Vec<TrailPoint>,
}

/// Serialized form, checked by `Ball::new` on the way in
#[derive(Deserialize)]
struct BallData {
    position: Vec2,
    velocity: Vec2,
    radius: f32,
    restitution: f32,
}

impl TryFrom<BallData> for Ball {
    type Error = ConfigError;

    fn try_from(data: BallData) -> Result<Self, Self::Error> {
        Self::new(data.position, data.velocity, data.radius, data.restitution)
    }
}

impl Ball {
    pub fn new(
        position: Vec2,
        velocity: Vec2,
        radius: f32,
        restitution: f32,
    ) -> Result<Self, ConfigError> {
        if !position.is_finite() {
            return Err(ConfigError::NonFinite { name: "position" });
        }
        if !velocity.is_finite() {
            return Err(ConfigError::NonFinite { name: "velocity" });
        }
        ensure_positive("ball_radius", radius)?;
        ensure_unit("restitution", restitution)?;

        Ok(Self {
            position,
            velocity,
            radius,
            restitution,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        })
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    /// Replace restitution, rejecting values outside [0, 1]
    pub fn set_restitution(&mut self, restitution: f32) -> Result<(), ConfigError> {
        self.restitution = ensure_unit("restitution", restitution)?;
        Ok(())
    }

    /// Nudge restitution by `delta`, staying within the runtime elasticity range
    ///
    /// A step never moves the value against the direction of `delta`, so a
    /// ball configured below the range is not bumped up by a decrease.
    pub fn adjust_restitution(&mut self, delta: f32) -> f32 {
        let current = self.restitution;
        let next = if delta >= 0.0 {
            (current + delta).min(ELASTICITY_MAX.max(current))
        } else {
            (current + delta).max(ELASTICITY_MIN.min(current))
        };
        if next != current + delta {
            log::debug!("Elasticity clamped to {:.2}", next);
        }
        self.restitution = next;
        next
    }

    /// Move the ball, zero its velocity and drop its trail
    pub fn reset(&mut self, position: Vec2, velocity: Vec2) {
        self.position = position;
        self.velocity = velocity;
        self.clear_trail();
    }

    /// Record current position to trail (call once per tick)
    pub fn record_trail(&mut self) {
        let speed = self.velocity.length();
        self.trail.insert(
            0,
            TrailPoint {
                pos: self.position,
                speed,
            },
        );
        self.trail.truncate(TRAIL_LENGTH);
    }

    /// Clear trail (on reset/grab)
    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }
}

/// Read-only view of one completed tick, for renderers and cosmetic effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub ball_position: Vec2,
    pub ball_velocity: Vec2,
    pub ball_radius: f32,
    pub restitution: f32,
    pub vertices: Vec<Vec2>,
    pub angular_velocity: f32,
    pub gravity_enabled: bool,
    /// Whether any edge was hit during this tick
    pub collided: bool,
    /// Recent ball positions, newest first
    pub trail: Vec<Vec2>,
}

/// Complete simulation state (deterministic, single writer)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "StateData")]
pub struct SimulationState {
    pub config: SimulationConfig,
    pub ball: Ball,
    pub boundary: PolygonBoundary,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ball is being held by the user (free motion suspended)
    pub held: bool,
    /// Collisions resolved during the last tick
    #[serde(skip)]
    pub last_collisions: Vec<CollisionEvent>,
}

/// Serialized form; ball and boundary validate themselves, the config here
#[derive(Deserialize)]
struct StateData {
    config: SimulationConfig,
    ball: Ball,
    boundary: PolygonBoundary,
    time_ticks: u64,
    held: bool,
}

impl TryFrom<StateData> for SimulationState {
    type Error = ConfigError;

    fn try_from(data: StateData) -> Result<Self, Self::Error> {
        data.config.validate()?;
        Ok(Self {
            config: data.config,
            ball: data.ball,
            boundary: data.boundary,
            time_ticks: data.time_ticks,
            held: data.held,
            last_collisions: Vec::new(),
        })
    }
}

impl SimulationState {
    /// Build a validated simulation from a config
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let boundary = PolygonBoundary::from_config(&config)?;
        let ball = Ball::new(
            config.center + config.spawn_offset,
            config.spawn_velocity,
            config.ball_radius,
            config.restitution,
        )?;

        log::debug!(
            "Simulation ready: {} sides, R = {}, ball r = {}",
            config.polygon_sides,
            config.circumradius,
            config.ball_radius
        );

        Ok(Self {
            config,
            ball,
            boundary,
            time_ticks: 0,
            held: false,
            last_collisions: Vec::new(),
        })
    }

    /// Where a reset puts the ball
    pub fn spawn_position(&self) -> Vec2 {
        self.boundary.center() + self.config.spawn_offset
    }

    /// Put the ball back at its spawn pose
    pub fn reset_ball(&mut self) {
        let spawn = self.spawn_position();
        self.ball.reset(spawn, self.config.spawn_velocity);
        self.held = false;
    }

    /// Whether the last tick resolved any collision
    pub fn collided(&self) -> bool {
        !self.last_collisions.is_empty()
    }

    /// Copy out everything a renderer needs for the current tick
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            ball_position: self.ball.position,
            ball_velocity: self.ball.velocity,
            ball_radius: self.ball.radius(),
            restitution: self.ball.restitution(),
            vertices: self.boundary.vertices(),
            angular_velocity: self.boundary.angular_velocity,
            gravity_enabled: self.config.gravity_enabled,
            collided: self.collided(),
            trail: self.ball.trail.iter().map(|p| p.pos).collect(),
        }
    }
}
