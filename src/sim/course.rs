//! Course layout: ground, walls, the cup and the out-of-bounds region

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::collision::Wall;
use super::terrain::{HeightField, Terrain, TerrainKind};
use crate::consts::*;
use crate::error::CourseError;
use crate::tuning::PhysicsTuning;

/// Data describing one hole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseConfig {
    pub width: f32,
    pub depth: f32,
    pub hole_radius: f32,
    /// Tee position (x, z)
    pub start: Vec2,
    /// Cup position (x, z)
    pub hole: Vec2,
    /// Height the ball is dropped from at the tee
    pub start_height: f32,
    /// Ball below this y is out of bounds
    pub min_y: f32,
    /// Ground height reported outside the course
    pub out_of_bounds_height: f32,
    pub wall_height: f32,
    pub seed: u64,
    pub terrain: TerrainKind,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            width: COURSE_WIDTH,
            depth: COURSE_DEPTH,
            hole_radius: HOLE_RADIUS,
            start: Vec2::new(0.0, 85.0),
            hole: Vec2::new(0.0, -80.0),
            start_height: START_HEIGHT,
            min_y: MIN_Y,
            out_of_bounds_height: OUT_OF_BOUNDS_HEIGHT,
            wall_height: WALL_HEIGHT,
            seed: 42,
            terrain: TerrainKind::Flat,
        }
    }
}

/// A built, validated hole
#[derive(Debug, Clone)]
pub struct Course {
    pub config: CourseConfig,
    pub terrain: Terrain,
    /// Static for the lifetime of the hole, checked in order
    pub walls: Vec<Wall>,
}

impl Course {
    /// Build the hole described by `config` and validate it against `tuning`
    pub fn build(config: &CourseConfig, tuning: &PhysicsTuning) -> Result<Self, CourseError> {
        let terrain = Terrain::new(
            config.terrain,
            config.width,
            config.depth,
            config.out_of_bounds_height,
            config.seed,
            &[
                (config.start.x, config.start.y),
                (config.hole.x, config.hole.y),
            ],
        );
        let walls = default_layout(config);
        Self::with_walls(config.clone(), terrain, walls, tuning)
    }

    /// Assemble a course from explicit parts, running the same validation
    /// as [`Course::build`]
    pub fn with_walls(
        config: CourseConfig,
        terrain: Terrain,
        walls: Vec<Wall>,
        tuning: &PhysicsTuning,
    ) -> Result<Self, CourseError> {
        tuning.validate()?;
        validate_config(&config)?;
        validate_heights(&config, &terrain)?;

        log::info!(
            "Course built: seed={} walls={} terrain={:?}",
            config.seed,
            walls.len(),
            config.terrain
        );
        Ok(Self {
            config,
            terrain,
            walls,
        })
    }

    /// Where a fresh ball is placed
    pub fn start_position(&self) -> Vec3 {
        Vec3::new(
            self.config.start.x,
            self.config.start_height,
            self.config.start.y,
        )
    }

    pub fn hole_center(&self) -> Vec2 {
        self.config.hole
    }

    pub fn half_width(&self) -> f32 {
        self.config.width / 2.0
    }

    pub fn half_depth(&self) -> f32 {
        self.config.depth / 2.0
    }
}

fn validate_config(config: &CourseConfig) -> Result<(), CourseError> {
    if !config.width.is_finite() || !config.depth.is_finite() || config.width <= 0.0 || config.depth <= 0.0 {
        return Err(CourseError::InvalidBounds {
            width: config.width,
            depth: config.depth,
        });
    }
    if !config.hole_radius.is_finite() || config.hole_radius <= 0.0 {
        return Err(CourseError::InvalidHoleRadius(config.hole_radius));
    }
    let (hw, hd) = (config.width / 2.0, config.depth / 2.0);
    if config.start.x.is_nan() || config.start.y.is_nan() || config.start.x.abs() > hw || config.start.y.abs() > hd {
        return Err(CourseError::StartOutOfBounds {
            x: config.start.x,
            z: config.start.y,
        });
    }
    Ok(())
}

/// Sample the whole course on a 1-unit grid; a single non-finite height is
/// fatal here so the integrator never sees one.
fn validate_heights<H: HeightField + ?Sized>(
    config: &CourseConfig,
    terrain: &H,
) -> Result<(), CourseError> {
    let (hw, hd) = (config.width / 2.0, config.depth / 2.0);
    let nx = config.width.ceil() as u32;
    let nz = config.depth.ceil() as u32;
    for i in 0..=nx {
        let x = (-hw + i as f32).min(hw);
        for j in 0..=nz {
            let z = (-hd + j as f32).min(hd);
            if !terrain.height(x, z).is_finite() {
                return Err(CourseError::NonFiniteHeight { x, z });
            }
        }
    }
    let (sx, sz) = (config.start.x, config.start.y);
    if !terrain.height(sx, sz).is_finite() {
        return Err(CourseError::NonFiniteHeight { x: sx, z: sz });
    }
    Ok(())
}

/// The standard hole: a long fairway from the tee down to a walled-in green
///
/// Footprints are (x, z, width, depth) and are mirrored onto the configured
/// tee/cup so custom start and hole positions keep their rails.
pub fn default_layout(config: &CourseConfig) -> Vec<Wall> {
    let h = config.wall_height;
    let (tx, tz) = (config.start.x, config.start.y);
    let (hx, hz) = (config.hole.x, config.hole.y);
    let mid_z = (tz + hz) / 2.0;
    let length = (tz - hz).abs();
    let toward_hole = if hz < tz { -1.0 } else { 1.0 };

    let footprints = [
        // Tee box: back wall and short side walls
        (tx, tz - toward_hole * 6.0, 16.0, 2.0),
        (tx - 8.0, tz - toward_hole * 2.0, 2.0, 10.0),
        (tx + 8.0, tz - toward_hole * 2.0, 2.0, 10.0),
        // Fairway rails
        (tx - 12.0, mid_z, 2.0, length),
        (tx + 12.0, mid_z, 2.0, length),
        // Chicane blocks along the fairway
        (tx - 5.0, tz + toward_hole * 30.0, 12.0, 2.0),
        (tx + 5.0, tz + toward_hole * 60.0, 12.0, 2.0),
        (tx - 5.0, tz + toward_hole * 90.0, 12.0, 2.0),
        (tx + 5.0, tz + toward_hole * 120.0, 12.0, 2.0),
        // Bumper square in the middle
        (tx, mid_z, 4.0, 4.0),
        // Green enclosure behind and beside the cup
        (hx, hz + toward_hole * 10.0, 24.0, 2.0),
        (hx - 8.0, hz + toward_hole * 5.0, 2.0, 8.0),
        (hx + 8.0, hz + toward_hole * 5.0, 2.0, 8.0),
    ];

    footprints
        .iter()
        .map(|&(x, z, w, d)| Wall::from_footprint(x, z, w, d, h))
        .collect()
}

/// Points a ball can roll between to get from the tee to the cup of
/// [`default_layout`]: one through each chicane gap, then the cup
pub fn fairway_route(config: &CourseConfig) -> Vec<Vec2> {
    let (tx, tz) = (config.start.x, config.start.y);
    let toward_hole = if config.hole.y < config.start.y { -1.0 } else { 1.0 };
    // Gap centers sit wide of the bumper so each leg clears it
    let mut route: Vec<Vec2> = [(7.0, 30.0), (-7.0, 60.0), (7.0, 90.0), (-7.0, 120.0)]
        .iter()
        .map(|&(dx, dz)| Vec2::new(tx + dx, tz + toward_hole * dz))
        .collect();
    route.push(config.hole);
    route
}
