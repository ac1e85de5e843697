//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform code:
//! - One clamped step per frame
//! - Walls checked in course order
//! - Output goes through `GameEvent`s, never straight to the DOM

pub mod ball;
pub mod collision;
pub mod course;
pub mod state;
pub mod stroke;
pub mod terrain;
pub mod tick;

pub use ball::Ball;
pub use collision::{CollisionResult, Wall, ball_wall_collision, reflect_velocity};
pub use course::{Course, CourseConfig, default_layout, fairway_route};
pub use state::{GameEvent, GamePhase, GameState};
pub use stroke::{DEFAULT_AIM_ANGLE, ShotCharge, aim_direction};
pub use terrain::{HeightField, Terrain, TerrainKind};
pub use tick::{TickInput, take_shot, tick};
