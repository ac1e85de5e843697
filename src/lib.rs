//! Mini Golf - a browser mini-golf game
//!
//! Core modules:
//! - `sim`: Ball physics, course geometry, frame driver and game events
//! - `tuning`: Data-driven physics constants
//! - `settings`: Persisted configuration
//! - `scorecard`: Best completed holes
//! - `platform`: Browser/native frame timing

pub mod error;
pub mod platform;
pub mod scorecard;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{CourseError, TuningError};
pub use scorecard::Scorecard;
pub use settings::Settings;
pub use tuning::PhysicsTuning;

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Gravity (units/s², negative is down)
    pub const GRAVITY: f32 = -20.0;
    /// Horizontal velocity retained per step while airborne
    pub const AIR_FRICTION: f32 = 0.98;
    /// Horizontal velocity retained per step while on the ground
    pub const ROLL_FRICTION: f32 = 0.985;
    /// Vertical velocity retained on a ground bounce
    pub const BOUNCE_DAMPING: f32 = 0.4;
    /// Impact speed below which a landing does not bounce
    pub const BOUNCE_THRESHOLD: f32 = 0.5;
    /// Speed below which a grounded ball comes to rest
    pub const MIN_REST_SPEED: f32 = 0.05;
    /// Max distance from the ground for rest detection
    pub const REST_TOLERANCE: f32 = 0.01;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.2;
    /// Horizontal launch speed at full power
    pub const LAUNCH_FORCE: f32 = 60.0;
    /// Fixed upward launch speed added to every shot
    pub const LAUNCH_BOOST: f32 = 3.0;

    /// Speed multiplier after a wall bounce
    pub const WALL_RESTITUTION: f32 = 0.75;
    /// Distance the ball is pushed out of a wall on contact
    pub const PENETRATION_CORRECTION: f32 = 0.3;

    /// Frame delta clamp (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;
    /// Power meter fill rate (full scale per second)
    pub const CHARGE_RATE: f32 = 0.8;

    /// Course dimensions
    pub const COURSE_WIDTH: f32 = 200.0;
    pub const COURSE_DEPTH: f32 = 200.0;
    pub const HOLE_RADIUS: f32 = 0.25;
    pub const WALL_HEIGHT: f32 = 3.0;
    /// Ball below this height is out of bounds
    pub const MIN_Y: f32 = -10.0;
    /// Ground height reported outside the course (a deep pit)
    pub const OUT_OF_BOUNDS_HEIGHT: f32 = -10.0;
    /// Drop height of the ball at the tee
    pub const START_HEIGHT: f32 = 1.0;
}

/// Project onto the ground plane (x, z)
#[inline]
pub fn planar(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Planar distance between two points, ignoring height
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    planar(a).distance(planar(b))
}
