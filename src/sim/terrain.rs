//! Ground height queries
//!
//! The simulator only ever asks "how high is the ground at (x, z)?". Anything
//! implementing [`HeightField`] can answer, including plain closures.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Ground elevation lookup
pub trait HeightField {
    fn height(&self, x: f32, z: f32) -> f32;
}

impl<F> HeightField for F
where
    F: Fn(f32, f32) -> f32,
{
    #[inline]
    fn height(&self, x: f32, z: f32) -> f32 {
        self(x, z)
    }
}

/// How a course's ground is shaped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerrainKind {
    #[default]
    Flat,
    /// Rolling hills from seeded value noise
    Noise {
        /// Peak hill height
        max_height: f32,
        /// Ground is level within this distance of the tee and the cup
        green_radius: f32,
        /// Distance between noise lattice points
        cell_size: f32,
    },
}

/// Number of lattice cells per side kept by the noise terrain
const LATTICE: usize = 64;

/// Course ground inside a rectangular area; a deep pit outside it
#[derive(Debug, Clone)]
pub struct Terrain {
    half_width: f32,
    half_depth: f32,
    out_of_bounds_height: f32,
    shape: Shape,
}

#[derive(Debug, Clone)]
enum Shape {
    Flat,
    Noise {
        lattice: Vec<f32>,
        max_height: f32,
        cell_size: f32,
        /// Level areas: (x, z, radius)
        greens: Vec<(f32, f32, f32)>,
    },
}

impl Terrain {
    pub fn flat(width: f32, depth: f32, out_of_bounds_height: f32) -> Self {
        Self {
            half_width: width / 2.0,
            half_depth: depth / 2.0,
            out_of_bounds_height,
            shape: Shape::Flat,
        }
    }

    /// Build terrain of the given kind. `greens` are the planar points
    /// (tee, cup) that must stay level.
    pub fn new(
        kind: TerrainKind,
        width: f32,
        depth: f32,
        out_of_bounds_height: f32,
        seed: u64,
        greens: &[(f32, f32)],
    ) -> Self {
        let mut terrain = Self::flat(width, depth, out_of_bounds_height);
        if let TerrainKind::Noise {
            max_height,
            green_radius,
            cell_size,
        } = kind
        {
            let mut rng = Pcg32::seed_from_u64(seed);
            let lattice = (0..LATTICE * LATTICE)
                .map(|_| rng.random::<f32>())
                .collect();
            terrain.shape = Shape::Noise {
                lattice,
                max_height,
                cell_size: cell_size.max(f32::EPSILON),
                greens: greens
                    .iter()
                    .map(|&(x, z)| (x, z, green_radius))
                    .collect(),
            };
        }
        terrain
    }

    /// Whether (x, z) lies on the course
    #[inline]
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= -self.half_width && x <= self.half_width && z >= -self.half_depth && z <= self.half_depth
    }
}

impl HeightField for Terrain {
    fn height(&self, x: f32, z: f32) -> f32 {
        if !self.contains(x, z) {
            return self.out_of_bounds_height;
        }
        match &self.shape {
            Shape::Flat => 0.0,
            Shape::Noise {
                lattice,
                max_height,
                cell_size,
                greens,
            } => {
                let h = value_noise(lattice, (x + self.half_width) / cell_size, (z + self.half_depth) / cell_size);
                // Blend to level ground near the greens
                let level = greens
                    .iter()
                    .map(|&(gx, gz, r)| {
                        let d = ((x - gx).powi(2) + (z - gz).powi(2)).sqrt();
                        if r <= 0.0 {
                            1.0
                        } else {
                            smoothstep(((d - r) / r).clamp(0.0, 1.0))
                        }
                    })
                    .fold(1.0_f32, f32::min);
                h * max_height * level
            }
        }
    }
}

#[inline]
fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn lattice_at(lattice: &[f32], ix: usize, iz: usize) -> f32 {
    lattice[(iz % LATTICE) * LATTICE + (ix % LATTICE)]
}

/// Smoothly interpolated lattice noise in [0, 1]
fn value_noise(lattice: &[f32], u: f32, v: f32) -> f32 {
    let u = u.max(0.0);
    let v = v.max(0.0);
    let (ix, iz) = (u.floor() as usize, v.floor() as usize);
    let (fx, fz) = (smoothstep(u.fract()), smoothstep(v.fract()));

    let a = lattice_at(lattice, ix, iz);
    let b = lattice_at(lattice, ix + 1, iz);
    let c = lattice_at(lattice, ix, iz + 1);
    let d = lattice_at(lattice, ix + 1, iz + 1);

    let top = a + (b - a) * fx;
    let bottom = c + (d - c) * fx;
    top + (bottom - top) * fz
}
