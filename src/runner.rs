//! Fixed-timestep driver
//!
//! Converts variable frame times into whole simulation ticks. Leftover time is
//! carried in an accumulator; at most `MAX_SUBSTEPS` ticks run per frame, and
//! any backlog beyond that is dropped.

use crate::config::SimulationConfig;
use crate::consts::{MAX_FRAME_SECONDS, MAX_SUBSTEPS, TICK_DT, TICK_SECONDS};
use crate::error::ConfigError;
use crate::sim::{SimulationState, Snapshot, TickInput, tick};

pub struct FixedStepRunner {
    pub state: SimulationState,
    /// Pending input; one-shot events are consumed by the next tick
    pub input: TickInput,
    accumulator: f32,
}

impl FixedStepRunner {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_state(SimulationState::new(config)?))
    }

    pub fn from_state(state: SimulationState) -> Self {
        Self {
            state,
            input: TickInput::default(),
            accumulator: 0.0,
        }
    }

    /// Seconds of simulated time not yet turned into a tick
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Run one tick immediately, regardless of the accumulator
    pub fn tick_once(&mut self) {
        tick(&mut self.state, &self.input, TICK_DT);
        self.input.clear_one_shots();
    }

    /// Account for `frame_seconds` of wall-clock time and run the ticks it covers
    ///
    /// Returns the number of ticks run.
    pub fn update(&mut self, frame_seconds: f32) -> u32 {
        if !frame_seconds.is_finite() {
            log::warn!("Ignoring non-finite frame time {}", frame_seconds);
            return 0;
        }
        let dt = frame_seconds.clamp(0.0, MAX_FRAME_SECONDS);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= TICK_SECONDS && substeps < MAX_SUBSTEPS {
            self.tick_once();
            self.accumulator -= TICK_SECONDS;
            substeps += 1;
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= TICK_SECONDS {
            log::warn!(
                "Dropping {:.1} ms of backlog after {} substeps",
                self.accumulator * 1000.0,
                MAX_SUBSTEPS
            );
            self.accumulator = 0.0;
        }

        substeps
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> FixedStepRunner {
        FixedStepRunner::new(SimulationConfig::default()).unwrap()
    }

    #[test]
    fn test_update_accumulates_partial_frames() {
        let mut r = runner();
        assert_eq!(r.update(TICK_SECONDS * 0.5), 0);
        assert_eq!(r.update(TICK_SECONDS * 0.6), 1);
        assert_eq!(r.state.time_ticks, 1);
        assert!(r.accumulator() < TICK_SECONDS);
    }

    #[test]
    fn test_update_caps_substeps() {
        let mut r = runner();
        // A long stall is clamped, capped, and its backlog dropped
        assert_eq!(r.update(5.0), MAX_SUBSTEPS);
        assert_eq!(r.accumulator(), 0.0);
        assert_eq!(r.state.time_ticks, MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_non_finite_frame_time_is_ignored() {
        let mut r = runner();
        assert_eq!(r.update(f32::NAN), 0);
        assert_eq!(r.update(f32::INFINITY), 0);
        assert_eq!(r.accumulator(), 0.0);
        // Later frames still tick
        assert_eq!(r.update(TICK_SECONDS * 1.5), 1);
    }

    #[test]
    fn test_negative_frame_time_runs_nothing() {
        let mut r = runner();
        assert_eq!(r.update(-1.0), 0);
        assert_eq!(r.accumulator(), 0.0);
    }

    #[test]
    fn test_one_shot_input_consumed_once() {
        let mut r = runner();
        r.input.spin_nudges = 1;
        r.update(TICK_SECONDS * 3.5);
        // Three ticks ran but the nudge applied once
        assert_eq!(r.state.time_ticks, 3);
        assert!((r.state.boundary.angular_velocity - 0.025).abs() < 1e-6);
        assert!(r.input.is_idle());
    }

    #[test]
    fn test_snapshot_tracks_ticks() {
        let mut r = runner();
        r.tick_once();
        r.tick_once();
        let snap = r.snapshot();
        assert_eq!(snap.tick, 2);
        assert_eq!(snap.trail.len(), 2);
    }
}
