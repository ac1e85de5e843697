//! The ball and its integrator
//!
//! One explicit Euler step per frame: gravity, move, walls, ground, then rest
//! detection. Order matters, each check sees the position produced by the
//! previous one. Walls are resolved greedily, one pass per wall per step, so
//! overlapping walls may take a few frames to push the ball clear.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::{Wall, ball_wall_collision, reflect_velocity};
use super::course::Course;
use super::terrain::HeightField;
use crate::planar_distance;
use crate::tuning::PhysicsTuning;

/// The simulated ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    /// True from a shot until rest detection (or a reset)
    pub moving: bool,
    /// Where `reset` puts the ball
    pub start: Vec3,
}

impl Ball {
    pub fn new(start: Vec3, radius: f32) -> Self {
        Self {
            position: start,
            velocity: Vec3::ZERO,
            radius,
            moving: false,
            start,
        }
    }

    /// Ball sitting on the tee of `course`
    pub fn for_course(course: &Course, tuning: &PhysicsTuning) -> Self {
        Self::new(course.start_position(), tuning.ball_radius)
    }

    /// Back to the tee, idle
    pub fn reset(&mut self) {
        self.position = self.start;
        self.velocity = Vec3::ZERO;
        self.moving = false;
    }

    /// Hit the ball. Ignored while it is still moving.
    ///
    /// `direction` should be unit length; only its horizontal part is used.
    /// `power` is expected in [0, 1] and is not clamped here.
    /// Returns whether the shot was applied.
    pub fn shoot(&mut self, direction: Vec3, power: f32, tuning: &PhysicsTuning) -> bool {
        if self.moving {
            return false;
        }
        let force = tuning.launch_force * power;
        self.velocity = Vec3::new(
            direction.x * force,
            tuning.launch_boost,
            direction.z * force,
        );
        self.moving = true;
        true
    }

    /// Advance one frame. No-op while idle.
    pub fn step<H: HeightField + ?Sized>(
        &mut self,
        dt: f32,
        ground: &H,
        walls: &[Wall],
        tuning: &PhysicsTuning,
    ) {
        if !self.moving {
            return;
        }

        self.velocity.y += tuning.gravity * dt;
        self.position += self.velocity * dt;

        for wall in walls {
            let hit = ball_wall_collision(self.position, self.radius, wall);
            if !hit.hit {
                continue;
            }
            self.velocity = reflect_velocity(self.velocity, hit.normal) * tuning.wall_restitution;
            self.position += hit.normal * tuning.penetration_correction;
            log::debug!("Wall hit at {:?}, vel now {:?}", self.position, self.velocity);
        }

        let ground_y = ground.height(self.position.x, self.position.z) + self.radius;
        if self.position.y <= ground_y {
            self.position.y = ground_y;
            if self.velocity.y.abs() > tuning.bounce_threshold {
                self.velocity.y *= -tuning.bounce_damping;
            } else {
                self.velocity.y = 0.0;
            }
            self.velocity.x *= tuning.roll_friction;
            self.velocity.z *= tuning.roll_friction;
        } else {
            self.velocity.x *= tuning.air_friction;
            self.velocity.z *= tuning.air_friction;
        }

        if self.velocity.length() < tuning.min_rest_speed
            && (self.position.y - ground_y).abs() < tuning.rest_tolerance
        {
            self.velocity = Vec3::ZERO;
            self.position.y = ground_y;
            self.moving = false;
            log::debug!("Ball at rest at {:?}", self.position);
        }
    }

    /// Idle and close enough to the cup to drop in
    pub fn check_hole(&self, course: &Course) -> bool {
        let hole = course.hole_center();
        let cup = Vec3::new(hole.x, self.position.y, hole.y);
        !self.moving
            && planar_distance(self.position, cup) <= course.config.hole_radius + self.radius * 0.5
    }

    /// Off the edge of the course or fallen below the floor
    pub fn is_out_of_bounds(&self, course: &Course) -> bool {
        let p = self.position;
        let (hw, hd) = (course.half_width(), course.half_depth());
        p.x < -hw || p.x > hw || p.z < -hd || p.z > hd || p.y < course.config.min_y
    }
}
