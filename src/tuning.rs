//! Data-driven physics tuning
//!
//! Every constant that shapes the feel of the ball lives in one struct so
//! it can be overridden from JSON without touching the integrator.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Physical constants for the ball simulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Vertical acceleration (negative)
    pub gravity: f32,
    /// Horizontal velocity retained per step while airborne
    pub air_friction: f32,
    /// Horizontal velocity retained per step while grounded
    pub roll_friction: f32,
    /// Vertical velocity retained on a bounce
    pub bounce_damping: f32,
    /// Landings slower than this stick instead of bouncing
    pub bounce_threshold: f32,
    /// Speed below which the ball may come to rest
    pub min_rest_speed: f32,
    /// Height tolerance above ground for rest detection
    pub rest_tolerance: f32,
    pub ball_radius: f32,
    /// Horizontal speed at full power
    pub launch_force: f32,
    /// Upward speed added to every shot
    pub launch_boost: f32,
    /// Speed multiplier applied after a wall reflection
    pub wall_restitution: f32,
    /// Push-out distance along the wall normal
    pub penetration_correction: f32,
    /// Largest dt a single step may integrate
    pub max_frame_dt: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            air_friction: AIR_FRICTION,
            roll_friction: ROLL_FRICTION,
            bounce_damping: BOUNCE_DAMPING,
            bounce_threshold: BOUNCE_THRESHOLD,
            min_rest_speed: MIN_REST_SPEED,
            rest_tolerance: REST_TOLERANCE,
            ball_radius: BALL_RADIUS,
            launch_force: LAUNCH_FORCE,
            launch_boost: LAUNCH_BOOST,
            wall_restitution: WALL_RESTITUTION,
            penetration_correction: PENETRATION_CORRECTION,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl PhysicsTuning {
    /// Parse tuning overrides; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check every constant is finite and inside the range that keeps the
    /// integrator stable and the ball able to come to rest
    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("gravity", self.gravity),
            ("air_friction", self.air_friction),
            ("roll_friction", self.roll_friction),
            ("bounce_damping", self.bounce_damping),
            ("bounce_threshold", self.bounce_threshold),
            ("min_rest_speed", self.min_rest_speed),
            ("rest_tolerance", self.rest_tolerance),
            ("ball_radius", self.ball_radius),
            ("launch_force", self.launch_force),
            ("launch_boost", self.launch_boost),
            ("wall_restitution", self.wall_restitution),
            ("penetration_correction", self.penetration_correction),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(TuningError::NonFinite { name });
            }
        }

        if self.gravity >= 0.0 {
            return Err(out_of_range("gravity", self.gravity, "< 0"));
        }
        // A factor of exactly 1 would let the ball roll or bounce forever
        for (name, value) in [
            ("air_friction", self.air_friction),
            ("roll_friction", self.roll_friction),
            ("bounce_damping", self.bounce_damping),
        ] {
            if value <= 0.0 || value >= 1.0 {
                return Err(out_of_range(name, value, "(0, 1)"));
            }
        }
        if self.wall_restitution <= 0.0 || self.wall_restitution > 1.0 {
            return Err(out_of_range(
                "wall_restitution",
                self.wall_restitution,
                "(0, 1]",
            ));
        }
        for (name, value) in [
            ("min_rest_speed", self.min_rest_speed),
            ("rest_tolerance", self.rest_tolerance),
            ("ball_radius", self.ball_radius),
            ("launch_force", self.launch_force),
            ("max_frame_dt", self.max_frame_dt),
        ] {
            if value <= 0.0 {
                return Err(out_of_range(name, value, "> 0"));
            }
        }
        for (name, value) in [
            ("bounce_threshold", self.bounce_threshold),
            ("launch_boost", self.launch_boost),
            ("penetration_correction", self.penetration_correction),
        ] {
            if value < 0.0 {
                return Err(out_of_range(name, value, ">= 0"));
            }
        }
        Ok(())
    }
}

fn out_of_range(name: &'static str, value: f32, expected: &'static str) -> TuningError {
    TuningError::OutOfRange {
        name,
        value,
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(PhysicsTuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = PhysicsTuning::from_json(r#"{ "gravity": -9.8 }"#).unwrap();
        assert_eq!(tuning.gravity, -9.8);
        assert_eq!(tuning.roll_friction, ROLL_FRICTION);
        assert_eq!(tuning.wall_restitution, WALL_RESTITUTION);
    }

    #[test]
    fn test_rejects_upward_gravity() {
        let tuning = PhysicsTuning {
            gravity: 5.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::OutOfRange { name: "gravity", .. })
        ));
    }

    #[test]
    fn test_rejects_friction_above_one() {
        let tuning = PhysicsTuning {
            roll_friction: 1.2,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::OutOfRange {
                name: "roll_friction",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_lossless_friction_and_damping() {
        for tuning in [
            PhysicsTuning {
                roll_friction: 1.0,
                ..Default::default()
            },
            PhysicsTuning {
                air_friction: 1.0,
                ..Default::default()
            },
            PhysicsTuning {
                bounce_damping: 1.0,
                ..Default::default()
            },
        ] {
            assert!(
                matches!(
                    tuning.validate(),
                    Err(TuningError::OutOfRange {
                        expected: "(0, 1)",
                        ..
                    })
                ),
                "{tuning:?}"
            );
        }
    }

    #[test]
    fn test_elastic_walls_allowed() {
        let tuning = PhysicsTuning {
            wall_restitution: 1.0,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_nan() {
        let tuning = PhysicsTuning {
            bounce_damping: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NonFinite {
                name: "bounce_damping"
            })
        );
    }
}
