//! Fixed timestep simulation tick
//!
//! `step` is the physics core: free motion, then collision response against the
//! boundary. `tick` wraps it with the between-tick events an input layer can
//! raise (spin changes, gravity toggle, reset, grabbing the ball).

use glam::Vec2;

use super::collision::{CollisionEvent, resolve_collisions};
use super::polygon::PolygonBoundary;
use super::state::{Ball, SimulationState};
use crate::config::SimulationConfig;
use crate::consts::{ELASTICITY_STEP, SPIN_NUDGE};

/// Input events for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Spin adjustment in nudges (positive speeds up counter-clockwise spin)
    pub spin_nudges: i32,
    /// Flip the spin direction
    pub reverse_spin: bool,
    /// Toggle gravity on/off
    pub toggle_gravity: bool,
    /// Put the ball back at its spawn pose
    pub reset: bool,
    /// Hold the ball at this position (velocity zeroed, no free motion)
    pub grab: Option<Vec2>,
    /// Elasticity adjustment in steps
    pub elasticity_steps: i32,
}

impl TickInput {
    /// True when the input carries only held state (no one-shot events)
    pub fn is_idle(&self) -> bool {
        self.spin_nudges == 0
            && !self.reverse_spin
            && !self.toggle_gravity
            && !self.reset
            && self.elasticity_steps == 0
    }

    /// Drop the one-shot events, keeping the grab
    pub fn clear_one_shots(&mut self) {
        *self = TickInput {
            grab: self.grab,
            ..Default::default()
        };
    }
}

/// Free-motion integration: gravity, drag, then position
pub fn integrate(ball: &mut Ball, config: &SimulationConfig, dt: f32) {
    if config.gravity_enabled {
        ball.velocity += config.gravity * dt;
    }
    ball.velocity *= config.drag_model.factor(config.drag_coefficient, dt);
    ball.position += ball.velocity * dt;
}

/// Advance the ball by one tick inside `boundary`
///
/// The boundary should already have been advanced for this tick. Returns the
/// collisions resolved, in edge order; an empty list means the tick was pure
/// free motion.
pub fn step(
    ball: &mut Ball,
    boundary: &PolygonBoundary,
    config: &SimulationConfig,
    dt: f32,
) -> Vec<CollisionEvent> {
    integrate(ball, config, dt);
    resolve_collisions(ball, boundary, config.wall_friction, config.penetration_epsilon)
}

/// Wrap a position that left the `[0, w] × [0, h]` screen to the opposite edge
pub fn wrap_position(pos: Vec2, bounds: Vec2) -> Vec2 {
    let mut p = pos;
    if p.x < 0.0 {
        p.x = bounds.x;
    } else if p.x > bounds.x {
        p.x = 0.0;
    }
    if p.y < 0.0 {
        p.y = bounds.y;
    } else if p.y > bounds.y {
        p.y = 0.0;
    }
    p
}

/// Apply between-tick events to the state
fn apply_input(state: &mut SimulationState, input: &TickInput) {
    if input.reset {
        state.reset_ball();
        log::debug!("Ball reset at tick {}", state.time_ticks);
    }

    if input.spin_nudges != 0 {
        state.boundary.angular_velocity += input.spin_nudges as f32 * SPIN_NUDGE;
        log::debug!("Spin now {:.3} rad/tick", state.boundary.angular_velocity);
    }

    if input.reverse_spin {
        state.boundary.reverse();
        log::debug!("Spin reversed: {:.3} rad/tick", state.boundary.angular_velocity);
    }

    if input.toggle_gravity {
        state.config.gravity_enabled = !state.config.gravity_enabled;
        log::debug!(
            "Gravity {}",
            if state.config.gravity_enabled { "on" } else { "off" }
        );
    }

    if input.elasticity_steps != 0 {
        let delta = input.elasticity_steps as f32 * ELASTICITY_STEP;
        let e = state.ball.adjust_restitution(delta);
        log::debug!("Elasticity now {:.2}", e);
    }

    match input.grab {
        Some(pos) => {
            if !state.held {
                state.ball.clear_trail();
            }
            state.ball.position = pos;
            state.ball.velocity = Vec2::ZERO;
            state.held = true;
        }
        None => state.held = false,
    }
}

/// Advance the simulation state by one fixed timestep
pub fn tick(state: &mut SimulationState, input: &TickInput, dt: f32) {
    apply_input(state, input);

    state.time_ticks += 1;
    state.boundary.advance(dt);

    let events = if state.held {
        // Held ball: walls still push it, but it does not fall or drift
        resolve_collisions(
            &mut state.ball,
            &state.boundary,
            state.config.wall_friction,
            state.config.penetration_epsilon,
        )
    } else {
        step(&mut state.ball, &state.boundary, &state.config, dt)
    };

    if let Some(bounds) = state.config.wrap_bounds {
        state.ball.position = wrap_position(state.ball.position, bounds);
    }

    state.ball.record_trail();
    state.last_collisions = events;
}
