//! Coherent noise fields used to steer particle velocity.
//!
//! A [`NoiseField`] is a deterministic scalar function over 3 spatial
//! dimensions plus time. The simulation only needs smooth variation, not
//! any particular distribution, so the production implementation wraps
//! the `noise` crate's OpenSimplex generator rather than rolling its own
//! noise math. Tests substitute fixed fields for determinism.

use noise::{NoiseFn, OpenSimplex};

/// A 4-D coherent scalar field: 3 spatial axes plus time.
///
/// Implementations must be deterministic (same inputs, same output) and
/// return values in roughly `[-1, 1]`.
pub trait NoiseField: Send + Sync {
    /// Sample the field at position `(x, y, z)` at time `w`.
    fn sample4d(&self, x: f32, y: f32, z: f32, w: f32) -> f32;
}

/// OpenSimplex noise field, deterministic per seed.
pub struct SimplexField {
    noise: OpenSimplex,
}

impl SimplexField {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: OpenSimplex::new(seed),
        }
    }
}

impl NoiseField for SimplexField {
    fn sample4d(&self, x: f32, y: f32, z: f32, w: f32) -> f32 {
        self.noise.get([x as f64, y as f64, z as f64, w as f64]) as f32
    }
}

/// Field returning a fixed value everywhere.
///
/// Useful for deterministic tests and for freezing the flow while
/// debugging visuals.
pub struct ConstantField(pub f32);

impl NoiseField for ConstantField {
    fn sample4d(&self, _x: f32, _y: f32, _z: f32, _w: f32) -> f32 {
        self.0
    }
}
