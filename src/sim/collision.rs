//! Wall geometry and collision response
//!
//! Walls are axis-aligned boxes. The ball is tested as its own bounding box,
//! and the response normal is the horizontal direction from the wall's center
//! to the ball. That approximation is what gives the course its feel, so it
//! is kept even though it is not the true contact normal.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A static axis-aligned wall volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Wall {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    /// Box standing on y = 0 with the given footprint (centered at x, z)
    pub fn from_footprint(x: f32, z: f32, width: f32, depth: f32, height: f32) -> Self {
        Self::new(
            Vec3::new(x, height / 2.0, z),
            Vec3::new(width / 2.0, height / 2.0, depth / 2.0),
        )
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Whether the cube of half-size `radius` around `pos` touches this wall
    ///
    /// Touching faces count as overlap.
    #[inline]
    pub fn intersects_sphere_bounds(&self, pos: Vec3, radius: f32) -> bool {
        let d = (pos - self.center).abs();
        let reach = self.half_extents + Vec3::splat(radius);
        d.x <= reach.x && d.y <= reach.y && d.z <= reach.z
    }

    /// Whether a ball of `radius` rolling along the ground from `from` to
    /// `to` (both x, z) would touch this wall's footprint
    pub fn blocks_path(&self, from: Vec2, to: Vec2, radius: f32) -> bool {
        let min = Vec2::new(self.min().x, self.min().z) - Vec2::splat(radius);
        let max = Vec2::new(self.max().x, self.max().z) + Vec2::splat(radius);
        let d = to - from;
        let (mut enter, mut exit) = (0.0f32, 1.0f32);
        for (o, dir, lo, hi) in [(from.x, d.x, min.x, max.x), (from.y, d.y, min.y, max.y)] {
            if dir.abs() < f32::EPSILON {
                if o < lo || o > hi {
                    return false;
                }
                continue;
            }
            let (a, b) = ((lo - o) / dir, (hi - o) / dir);
            enter = enter.max(a.min(b));
            exit = exit.min(a.max(b));
            if enter > exit {
                return false;
            }
        }
        true
    }
}

/// Result of a wall check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Horizontal unit normal pointing from the wall toward the ball
    /// (zero when the ball sits exactly over the wall's center)
    pub normal: Vec3,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec3::ZERO,
        }
    }
}

/// Check a ball against a single wall
pub fn ball_wall_collision(ball_pos: Vec3, ball_radius: f32, wall: &Wall) -> CollisionResult {
    if !wall.intersects_sphere_bounds(ball_pos, ball_radius) {
        return CollisionResult::miss();
    }

    let mut away = ball_pos - wall.center;
    away.y = 0.0;
    CollisionResult {
        hit: true,
        normal: away.normalize_or_zero(),
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec3, normal: Vec3) -> Vec3 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprint_rests_on_ground() {
        let wall = Wall::from_footprint(10.0, -5.0, 4.0, 2.0, 3.0);
        assert_eq!(wall.min(), Vec3::new(8.0, 0.0, -6.0));
        assert_eq!(wall.max(), Vec3::new(12.0, 3.0, -4.0));
    }

    #[test]
    fn test_overlap_includes_radius() {
        let wall = Wall::from_footprint(0.0, 0.0, 2.0, 2.0, 3.0);
        // Face at x = 1.0, ball radius 0.2
        assert!(wall.intersects_sphere_bounds(Vec3::new(1.15, 0.2, 0.0), 0.2));
        assert!(wall.intersects_sphere_bounds(Vec3::new(1.2, 0.2, 0.0), 0.2));
        assert!(!wall.intersects_sphere_bounds(Vec3::new(1.25, 0.2, 0.0), 0.2));
    }

    #[test]
    fn test_ball_above_wall_misses() {
        let wall = Wall::from_footprint(0.0, 0.0, 2.0, 2.0, 3.0);
        assert!(!ball_wall_collision(Vec3::new(0.0, 3.5, 0.0), 0.2, &wall).hit);
    }

    #[test]
    fn test_normal_is_horizontal_from_center() {
        let wall = Wall::from_footprint(0.0, 0.0, 2.0, 2.0, 3.0);
        let result = ball_wall_collision(Vec3::new(1.1, 2.9, 0.0), 0.2, &wall);
        assert!(result.hit);
        assert!((result.normal - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_centered_ball_has_zero_normal() {
        let wall = Wall::from_footprint(0.0, 0.0, 2.0, 2.0, 3.0);
        let result = ball_wall_collision(Vec3::new(0.0, 1.0, 0.0), 0.2, &wall);
        assert!(result.hit);
        assert_eq!(result.normal, Vec3::ZERO);
    }

    #[test]
    fn test_blocks_path() {
        let wall = Wall::from_footprint(0.0, 0.0, 4.0, 2.0, 3.0);
        // Straight through
        assert!(wall.blocks_path(Vec2::new(0.0, 10.0), Vec2::new(0.0, -10.0), 0.2));
        // Passes beside it
        assert!(!wall.blocks_path(Vec2::new(3.0, 10.0), Vec2::new(3.0, -10.0), 0.2));
        // Grazes the corner only once the radius is counted
        assert!(wall.blocks_path(Vec2::new(2.1, 10.0), Vec2::new(2.1, -10.0), 0.2));
        assert!(!wall.blocks_path(Vec2::new(2.1, 10.0), Vec2::new(2.1, -10.0), 0.0));
        // Stops short of it
        assert!(!wall.blocks_path(Vec2::new(0.0, 10.0), Vec2::new(0.0, 5.0), 0.2));
        // Diagonal crossing
        assert!(wall.blocks_path(Vec2::new(-5.0, 5.0), Vec2::new(5.0, -5.0), 0.2));
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits wall whose normal points left
        let velocity = Vec3::new(10.0, 1.0, 0.0);
        let reflected = reflect_velocity(velocity, Vec3::NEG_X);
        assert!((reflected.x + 10.0).abs() < 1e-6);
        assert!((reflected.y - 1.0).abs() < 1e-6);
        assert!(reflected.z.abs() < 1e-6);
    }
}
