//! Game state and the event channel
//!
//! The presentation layer never reaches into the simulation to update the
//! HUD. It reads the public state and drains [`GameEvent`]s instead.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::course::Course;
use super::stroke::{DEFAULT_AIM_ANGLE, ShotCharge};
use crate::error::CourseError;
use crate::settings::Settings;
use crate::tuning::PhysicsTuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball idle, player may aim and shoot
    Aiming,
    /// Ball in motion
    Rolling,
    /// Ball in the cup; waiting for the next hole
    HoleComplete,
}

/// Things the view needs to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    HoleStarted { seed: u64 },
    ShotTaken { shots: u32, power: f32 },
    /// Fire while the ball was still moving or the hole was done
    ShotRejected,
    PowerChanged { power: f32 },
    BallStopped { position: Vec3 },
    /// Ball left the course and went back to the tee
    OutOfBounds { shots: u32 },
    BallReset,
    HoleComplete { shots: u32 },
}

/// Complete state of one hole in progress
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: PhysicsTuning,
    /// Power meter fill rate (per second)
    pub charge_rate: f32,
    pub course: Course,
    pub ball: Ball,
    /// Shots taken this hole, including ones that went out of bounds
    pub shots: u32,
    pub phase: GamePhase,
    /// Radians, see [`super::stroke::aim_direction`]
    pub aim_angle: f32,
    pub charge: ShotCharge,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Build the configured hole and place the ball on the tee
    pub fn new(settings: &Settings) -> Result<Self, CourseError> {
        let course = Course::build(&settings.course, &settings.tuning)?;
        let ball = Ball::for_course(&course, &settings.tuning);
        let mut state = Self {
            tuning: settings.tuning,
            charge_rate: settings.charge_rate,
            course,
            ball,
            shots: 0,
            phase: GamePhase::Aiming,
            aim_angle: DEFAULT_AIM_ANGLE,
            charge: ShotCharge::default(),
            events: Vec::new(),
        };
        state.push_event(GameEvent::HoleStarted {
            seed: state.course.config.seed,
        });
        log::info!("Hole started (seed {})", state.course.config.seed);
        Ok(state)
    }

    /// Rebuild the hole from its config and start over
    pub fn restart_hole(&mut self) -> Result<(), CourseError> {
        self.course = Course::build(&self.course.config, &self.tuning)?;
        self.ball = Ball::for_course(&self.course, &self.tuning);
        self.shots = 0;
        self.phase = GamePhase::Aiming;
        self.aim_angle = DEFAULT_AIM_ANGLE;
        self.charge.cancel();
        self.push_event(GameEvent::HoleStarted {
            seed: self.course.config.seed,
        });
        log::info!("Hole restarted (seed {})", self.course.config.seed);
        Ok(())
    }

    /// Put the ball back on the tee without touching the shot count
    pub fn reset_ball(&mut self) {
        self.ball.reset();
        self.charge.cancel();
        if self.phase != GamePhase::HoleComplete {
            self.phase = GamePhase::Aiming;
        }
        self.push_event(GameEvent::BallReset);
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending events without consuming them
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_announces_hole() {
        let mut state = GameState::new(&Settings::default()).unwrap();
        assert_eq!(state.phase, GamePhase::Aiming);
        assert_eq!(state.shots, 0);
        assert_eq!(state.drain_events(), vec![GameEvent::HoleStarted { seed: 42 }]);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_restart_clears_shots() {
        let mut state = GameState::new(&Settings::default()).unwrap();
        state.shots = 4;
        state.phase = GamePhase::HoleComplete;
        state.restart_hole().unwrap();
        assert_eq!(state.shots, 0);
        assert_eq!(state.phase, GamePhase::Aiming);
        assert_eq!(state.ball.position, state.course.start_position());
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&GameEvent::ShotTaken {
            shots: 2,
            power: 0.5,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"shot_taken","shots":2,"power":0.5}"#);
    }
}
