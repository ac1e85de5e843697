//! Per-frame simulation tick
//!
//! Applies one frame of player commands, advances the ball, then settles the
//! consequences: out of bounds, coming to rest, dropping into the cup.

use glam::Vec3;

use super::state::{GameEvent, GamePhase, GameState};
use super::stroke::aim_direction;

/// Player commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New aim angle (ignored while the ball moves)
    pub aim_angle: Option<f32>,
    /// Start filling the power meter
    pub begin_charge: bool,
    /// Fire with the current meter power
    pub release_charge: bool,
    /// Drop the charge without shooting
    pub cancel_charge: bool,
    /// Put the ball back on the tee
    pub reset: bool,
    /// Rebuild the hole and zero the shot count
    pub next_hole: bool,
}

/// Advance the game by one frame of `dt` seconds
///
/// `dt` is clamped to `[0, max_frame_dt]`; a long pause turns into one
/// bounded step rather than a leap through the walls.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() {
        dt.clamp(0.0, state.tuning.max_frame_dt)
    } else {
        0.0
    };

    if input.next_hole {
        if let Err(e) = state.restart_hole() {
            log::error!("Could not rebuild hole: {e}");
        }
        return;
    }

    if input.reset {
        state.reset_ball();
    }

    if state.phase == GamePhase::HoleComplete {
        if input.release_charge || input.begin_charge {
            state.push_event(GameEvent::ShotRejected);
        }
        return;
    }

    update_charge(state, input, dt);

    let was_moving = state.ball.moving;
    state
        .ball
        .step(dt, &state.course.terrain, &state.course.walls, &state.tuning);

    if state.ball.is_out_of_bounds(&state.course) {
        log::info!(
            "Out of bounds at {:?} after {} shots",
            state.ball.position,
            state.shots
        );
        // The shot that went out was already counted at launch
        state.reset_ball();
        let shots = state.shots;
        state.push_event(GameEvent::OutOfBounds { shots });
        return;
    }

    if was_moving && !state.ball.moving {
        state.phase = GamePhase::Aiming;
        let position = state.ball.position;
        state.push_event(GameEvent::BallStopped { position });
    }

    if state.ball.check_hole(&state.course) {
        state.phase = GamePhase::HoleComplete;
        state.charge.cancel();
        let shots = state.shots;
        log::info!("Hole complete in {shots} shots");
        state.push_event(GameEvent::HoleComplete { shots });
    }
}

/// Shoot the ball and count the stroke. Returns false (and emits
/// `ShotRejected`) if the ball is still moving or the hole is done.
pub fn take_shot(state: &mut GameState, direction: Vec3, power: f32) -> bool {
    if state.phase == GamePhase::HoleComplete
        || !state.ball.shoot(direction, power, &state.tuning)
    {
        log::warn!("Shot rejected: ball not ready");
        state.push_event(GameEvent::ShotRejected);
        return false;
    }
    state.shots += 1;
    state.phase = GamePhase::Rolling;
    log::info!("Shot {} at power {:.2}", state.shots, power);
    let shots = state.shots;
    state.push_event(GameEvent::ShotTaken { shots, power });
    true
}

fn update_charge(state: &mut GameState, input: &TickInput, dt: f32) {
    if let Some(angle) = input.aim_angle {
        if !state.ball.moving {
            state.aim_angle = angle;
        }
    }

    if input.cancel_charge && state.charge.charging {
        state.charge.cancel();
        state.push_event(GameEvent::PowerChanged { power: 0.0 });
    }

    if input.begin_charge && !state.ball.moving && state.charge.begin() {
        state.push_event(GameEvent::PowerChanged { power: 0.0 });
    } else if state.charge.charging && !state.ball.moving {
        let before = state.charge.power;
        state.charge.update(dt, state.charge_rate);
        let power = state.charge.power;
        if power != before {
            state.push_event(GameEvent::PowerChanged { power });
        }
    }

    if !input.release_charge {
        return;
    }
    if let Some(power) = state.charge.release() {
        state.push_event(GameEvent::PowerChanged { power: 0.0 });
        let direction = aim_direction(state.aim_angle);
        take_shot(state, direction, power);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::course::{Course, CourseConfig};
    use crate::sim::terrain::Terrain;

    const DT: f32 = 0.016;

    /// Default hole with every wall removed
    fn open_state() -> GameState {
        let mut state = GameState::new(&Settings::default()).unwrap();
        let config = CourseConfig::default();
        let terrain = Terrain::flat(config.width, config.depth, config.out_of_bounds_height);
        state.course = Course::with_walls(config, terrain, Vec::new(), &state.tuning).unwrap();
        state.drain_events();
        state
    }

    fn run_until_idle(state: &mut GameState) {
        for _ in 0..10_000 {
            tick(state, &TickInput::default(), DT);
            if !state.ball.moving {
                return;
            }
        }
        panic!("ball never stopped");
    }

    #[test]
    fn test_charge_and_release_fires_shot() {
        let mut state = open_state();
        tick(
            &mut state,
            &TickInput {
                begin_charge: true,
                ..Default::default()
            },
            DT,
        );
        assert!(state.charge.charging);
        for _ in 0..20 {
            tick(&mut state, &TickInput::default(), DT);
        }
        let charged = state.charge.power;
        assert!((charged - 20.0 * DT * 0.8).abs() < 1e-4);

        tick(
            &mut state,
            &TickInput {
                release_charge: true,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(state.shots, 1);
        assert_eq!(state.phase, GamePhase::Rolling);
        assert!(state.ball.moving);
        // Default aim is down the fairway
        assert!(state.ball.velocity.z < 0.0);
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::ShotTaken { shots: 1, .. }))
        );
    }

    #[test]
    fn test_release_while_moving_is_rejected() {
        let mut state = open_state();
        assert!(take_shot(&mut state, Vec3::NEG_Z, 0.3));
        tick(
            &mut state,
            &TickInput {
                begin_charge: true,
                release_charge: true,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(state.shots, 1);
        assert!(!state.charge.charging);
    }

    #[test]
    fn test_direct_shot_while_moving_is_rejected() {
        let mut state = open_state();
        assert!(take_shot(&mut state, Vec3::NEG_Z, 0.3));
        let vel = state.ball.velocity;
        assert!(!take_shot(&mut state, Vec3::X, 1.0));
        assert_eq!(state.ball.velocity, vel);
        assert_eq!(state.shots, 1);
        assert!(state.events().contains(&GameEvent::ShotRejected));
    }

    #[test]
    fn test_ball_stops_and_returns_to_aiming() {
        let mut state = open_state();
        take_shot(&mut state, Vec3::NEG_Z, 0.2);
        run_until_idle(&mut state);
        assert_eq!(state.phase, GamePhase::Aiming);
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::BallStopped { .. }))
        );
    }

    #[test]
    fn test_out_of_bounds_resets_but_keeps_shots() {
        let mut state = open_state();
        // Straight off the near edge: the tee is 15 units from it
        take_shot(&mut state, Vec3::Z, 1.0);
        run_until_idle(&mut state);

        assert_eq!(state.shots, 1);
        assert_eq!(state.ball.position, state.course.start_position());
        assert_eq!(state.phase, GamePhase::Aiming);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::OutOfBounds { shots: 1 })
        );
    }

    #[test]
    fn test_ball_resting_in_cup_completes_hole() {
        let mut state = open_state();
        let hole = state.course.hole_center();
        state.ball.position = Vec3::new(hole.x, 0.25, hole.y);
        state.ball.moving = true;
        state.shots = 3;

        run_until_idle(&mut state);
        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.phase, GamePhase::HoleComplete);
        let events = state.drain_events();
        let completions = events
            .iter()
            .filter(|e| matches!(e, GameEvent::HoleComplete { shots: 3 }))
            .count();
        assert_eq!(completions, 1);

        // No more shots until the next hole
        assert!(!take_shot(&mut state, Vec3::NEG_Z, 1.0));
        tick(
            &mut state,
            &TickInput {
                next_hole: true,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(state.phase, GamePhase::Aiming);
        assert_eq!(state.shots, 0);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut a = open_state();
        let mut b = open_state();
        take_shot(&mut a, Vec3::NEG_Z, 0.5);
        take_shot(&mut b, Vec3::NEG_Z, 0.5);

        tick(&mut a, &TickInput::default(), 2.0);
        tick(&mut b, &TickInput::default(), 0.05);
        assert_eq!(a.ball.position, b.ball.position);

        let before = a.ball.position;
        tick(&mut a, &TickInput::default(), f32::NAN);
        assert_eq!(a.ball.position.x, before.x);
        assert_eq!(a.ball.position.z, before.z);
    }

    #[test]
    fn test_reset_input() {
        let mut state = open_state();
        take_shot(&mut state, Vec3::NEG_Z, 0.5);
        tick(&mut state, &TickInput::default(), DT);
        tick(
            &mut state,
            &TickInput {
                reset: true,
                ..Default::default()
            },
            DT,
        );
        assert!(!state.ball.moving);
        assert_eq!(state.ball.position, state.course.start_position());
        assert_eq!(state.shots, 1);
    }

    #[test]
    fn test_aim_ignored_while_moving() {
        let mut state = open_state();
        take_shot(&mut state, Vec3::NEG_Z, 0.5);
        let angle = state.aim_angle;
        tick(
            &mut state,
            &TickInput {
                aim_angle: Some(0.3),
                ..Default::default()
            },
            DT,
        );
        assert_eq!(state.aim_angle, angle);
    }
}
