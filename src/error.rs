//! Load-time validation errors
//!
//! The per-frame simulation never fails; everything that can go wrong is
//! caught when tuning or a course is loaded.

use thiserror::Error;

/// Invalid physics tuning value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    #[error("tuning value `{name}` is not finite")]
    NonFinite { name: &'static str },

    #[error("tuning value `{name}` = {value} is out of range (expected {expected})")]
    OutOfRange {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },
}

/// Course failed validation at load
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CourseError {
    #[error("course bounds must be positive, got {width} x {depth}")]
    InvalidBounds { width: f32, depth: f32 },

    #[error("hole radius must be positive, got {0}")]
    InvalidHoleRadius(f32),

    #[error("start position ({x}, {z}) lies outside the course")]
    StartOutOfBounds { x: f32, z: f32 },

    #[error("terrain height at ({x}, {z}) is not finite")]
    NonFiniteHeight { x: f32, z: f32 },

    #[error(transparent)]
    Tuning(#[from] TuningError),
}
