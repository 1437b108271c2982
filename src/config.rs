//! Simulation configuration
//!
//! Loaded from JSON; any key missing from the file falls back to the default,
//! so a minimal file can override just the values you care about. Every value
//! is validated before a simulation is built from it.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PENETRATION_EPSILON;
use crate::error::{ConfigError, ensure_finite, ensure_positive, ensure_unit};
use crate::sim::polygon::regular_apothem;

/// How the per-tick drag coefficient is applied when `dt` differs from one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DragModel {
    /// `velocity *= drag` once per step, whatever `dt` is
    #[default]
    PerTick,
    /// `velocity *= drag.powf(dt)`, identical to `PerTick` at `dt == 1`
    Exponential,
}

impl DragModel {
    /// Velocity multiplier for a step of length `dt` ticks
    #[inline]
    pub fn factor(&self, drag: f32, dt: f32) -> f32 {
        match self {
            DragModel::PerTick => drag,
            DragModel::Exponential => drag.powf(dt),
        }
    }
}

/// Named starting configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Steady spin, gravity always on, ball dropped from above center
    #[default]
    Classic,
    /// Slower spin, stronger drag, grippier walls, screen wrap
    Arcade,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "classic",
            Preset::Arcade => "arcade",
        }
    }
}

/// Complete simulation configuration
///
/// Velocities are in length units per tick and angles in radians per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === Forces ===
    /// Gravity acceleration (per tick², +y is down on screen)
    pub gravity: Vec2,
    /// Gravity switch (toggled at runtime)
    pub gravity_enabled: bool,
    /// Velocity retained per tick, in (0, 1]
    pub drag_coefficient: f32,
    pub drag_model: DragModel,

    // === Contact ===
    /// Tangential relative speed retained on impact, in [0, 1]
    pub wall_friction: f32,
    /// Initial ball restitution, in [0, 1]
    pub restitution: f32,
    /// Extra push-out after penetration correction
    pub penetration_epsilon: f32,

    // === Boundary ===
    pub polygon_sides: u32,
    pub circumradius: f32,
    pub center: Vec2,
    /// Rotation angle at tick zero
    pub initial_angle: f32,
    /// Spin rate (radians per tick, negative spins the other way)
    pub angular_velocity: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Spawn position relative to `center`
    pub spawn_offset: Vec2,
    pub spawn_velocity: Vec2,

    /// Screen size; when set the ball wraps to the opposite edge on leaving it
    pub wrap_bounds: Option<Vec2>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 0.5),
            gravity_enabled: true,
            drag_coefficient: 0.995,
            drag_model: DragModel::PerTick,

            wall_friction: 0.9,
            restitution: 0.8,
            penetration_epsilon: PENETRATION_EPSILON,

            polygon_sides: 6,
            circumradius: 250.0,
            center: Vec2::new(400.0, 300.0),
            initial_angle: 0.0,
            angular_velocity: 0.02,

            ball_radius: 15.0,
            spawn_offset: Vec2::new(0.0, -100.0),
            spawn_velocity: Vec2::new(5.0, 0.0),

            wrap_bounds: None,
        }
    }
}

impl SimulationConfig {
    /// Create a config from a preset
    pub fn from_preset(preset: Preset) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Apply a preset (overwrites the values the preset defines)
    pub fn apply_preset(&mut self, preset: Preset) {
        match preset {
            Preset::Classic => {
                let defaults = Self::default();
                self.drag_coefficient = defaults.drag_coefficient;
                self.wall_friction = defaults.wall_friction;
                self.angular_velocity = defaults.angular_velocity;
                self.spawn_offset = defaults.spawn_offset;
                self.spawn_velocity = defaults.spawn_velocity;
                self.wrap_bounds = None;
            }
            Preset::Arcade => {
                self.drag_coefficient = 0.99;
                self.wall_friction = 0.98;
                self.angular_velocity = 0.01;
                self.spawn_offset = Vec2::ZERO;
                self.spawn_velocity = Vec2::new(3.0, -2.0);
                self.wrap_bounds = Some(Vec2::new(800.0, 600.0));
            }
        }
    }

    /// Distance from the polygon center to the middle of an edge
    pub fn apothem(&self) -> f32 {
        regular_apothem(self.circumradius, self.polygon_sides)
    }

    /// Validate every field, returning the first violation found
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_vec("gravity", self.gravity)?;
        ensure_positive("drag_coefficient", self.drag_coefficient)?;
        if self.drag_coefficient > 1.0 {
            return Err(ConfigError::OutOfRange {
                name: "drag_coefficient",
                value: self.drag_coefficient,
                expected: "(0, 1]",
            });
        }
        ensure_unit("wall_friction", self.wall_friction)?;
        ensure_unit("restitution", self.restitution)?;
        ensure_finite("penetration_epsilon", self.penetration_epsilon)?;
        if self.penetration_epsilon < 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "penetration_epsilon",
                value: self.penetration_epsilon,
                expected: ">= 0",
            });
        }

        if self.polygon_sides < 3 {
            return Err(ConfigError::TooFewSides(self.polygon_sides));
        }
        ensure_positive("circumradius", self.circumradius)?;
        ensure_vec("center", self.center)?;
        ensure_finite("initial_angle", self.initial_angle)?;
        ensure_finite("angular_velocity", self.angular_velocity)?;

        ensure_positive("ball_radius", self.ball_radius)?;
        if self.ball_radius >= self.apothem() {
            return Err(ConfigError::OutOfRange {
                name: "ball_radius",
                value: self.ball_radius,
                expected: "< polygon apothem",
            });
        }
        ensure_vec("spawn_offset", self.spawn_offset)?;
        ensure_vec("spawn_velocity", self.spawn_velocity)?;

        if let Some(bounds) = self.wrap_bounds {
            ensure_positive("wrap_bounds.x", bounds.x)?;
            ensure_positive("wrap_bounds.y", bounds.y)?;
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn ensure_vec(name: &'static str, v: Vec2) -> Result<Vec2, ConfigError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ConfigError::NonFinite { name })
    }
}
