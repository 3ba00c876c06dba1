//! Particle pool: parallel attribute stores plus spawn/respawn logic.
//!
//! A particle is not a struct anywhere in memory; it is a common index
//! into four index-aligned [`PackedStore`]s. The pool owns those stores
//! and the RNG that feeds the spawn generators, so that spawning and
//! respawning draw from one reproducible stream per seed.

use crate::store::PackedStore;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};
use std::ops::Range;

/// Ranges the spawn generators draw from.
///
/// Defaults reproduce the reference visual: particles born on a sphere
/// of radius 100, motionless, with a per-particle speed budget of 6-10
/// and a lifetime of 200-800 frames.
#[derive(Clone)]
pub struct SpawnParams {
    /// Radius of the spawn sphere; particles are born on its surface.
    pub radius: f32,
    /// Scalar speed budget, sampled once per spawn.
    pub speed: Range<f32>,
    /// Lifetime in frames, sampled once per spawn.
    pub life: Range<f32>,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            radius: 100.0,
            speed: 6.0..10.0,
            life: 200.0..800.0,
        }
    }
}

/// Fixed pool of N particles stored as four parallel attribute stores.
pub struct ParticlePool {
    positions: PackedStore,  // x, y, z
    velocities: PackedStore, // vx, vy, vz, speed
    ages: PackedStore,       // age, life
    colors: PackedStore,     // r, g, b
    params: SpawnParams,
    rng: SmallRng,
}

impl ParticlePool {
    /// Allocate stores for `count` particles and spawn them all.
    pub fn new(count: usize, params: SpawnParams, seed: u64) -> Self {
        let mut pool = Self {
            positions: PackedStore::new(count, 3),
            velocities: PackedStore::new(count, 4),
            ages: PackedStore::new(count, 2),
            colors: PackedStore::new(count, 3),
            params,
            rng: SmallRng::seed_from_u64(seed),
        };
        pool.spawn_all();
        pool
    }

    /// Number of particles; fixed for the lifetime of the pool.
    #[inline]
    pub fn count(&self) -> usize {
        self.positions.count()
    }

    /// Fully (re)initialize every particle.
    pub fn spawn_all(&mut self) {
        let Self {
            positions,
            velocities,
            ages,
            colors,
            params,
            rng,
        } = self;

        positions.map(|tuple, _| tuple.copy_from_slice(&spawn_position(rng, params)));
        velocities.map(|tuple, _| tuple.copy_from_slice(&spawn_velocity(rng, params)));
        ages.map(|tuple, _| tuple.copy_from_slice(&spawn_age(rng, params)));
        colors.map(|tuple, _| tuple.copy_from_slice(&spawn_color(rng)));
    }

    /// Regenerate particle `i` in every store, same generators as spawn.
    pub fn reset_one(&mut self, i: usize) {
        let position = spawn_position(&mut self.rng, &self.params);
        let velocity = spawn_velocity(&mut self.rng, &self.params);
        let age = spawn_age(&mut self.rng, &self.params);
        let color = spawn_color(&mut self.rng);

        self.positions.set(&position, self.positions.offset(i));
        self.velocities.set(&velocity, self.velocities.offset(i));
        self.ages.set(&age, self.ages.offset(i));
        self.colors.set(&color, self.colors.offset(i));
    }

    #[inline]
    pub fn positions(&self) -> &PackedStore {
        &self.positions
    }

    #[inline]
    pub fn positions_mut(&mut self) -> &mut PackedStore {
        &mut self.positions
    }

    #[inline]
    pub fn velocities(&self) -> &PackedStore {
        &self.velocities
    }

    #[inline]
    pub fn velocities_mut(&mut self) -> &mut PackedStore {
        &mut self.velocities
    }

    #[inline]
    pub fn ages(&self) -> &PackedStore {
        &self.ages
    }

    #[inline]
    pub fn ages_mut(&mut self) -> &mut PackedStore {
        &mut self.ages
    }

    #[inline]
    pub fn colors(&self) -> &PackedStore {
        &self.colors
    }
}

/// Random point on the spawn sphere, in spherical coordinates.
fn spawn_position(rng: &mut SmallRng, params: &SpawnParams) -> [f32; 3] {
    let r = params.radius;
    let p = rng.gen_range(0.0..TAU);
    let t = rng.gen_range(0.0..PI);

    [
        r * p.sin() * t.cos(),
        r * p.sin() * t.sin(),
        r * p.cos(),
    ]
}

/// Particles start motionless with a randomized scalar speed budget.
///
/// The 4th component is not a spatial velocity axis: it is the magnitude
/// the steering field scales its target direction by, carried through
/// the smoothing step untouched.
fn spawn_velocity(rng: &mut SmallRng, params: &SpawnParams) -> [f32; 4] {
    [0.0, 0.0, 0.0, rng.gen_range(params.speed.clone())]
}

fn spawn_age(rng: &mut SmallRng, params: &SpawnParams) -> [f32; 2] {
    [0.0, rng.gen_range(params.life.clone())]
}

/// Color is fixed at spawn: each channel ramps in from a random base.
fn spawn_color(rng: &mut SmallRng) -> [f32; 3] {
    [
        crate::math::fade_in(60.0 + rng.gen_range(0.0..40.0), 360.0),
        crate::math::fade_in(60.0 + rng.gen_range(0.0..60.0), 360.0),
        crate::math::fade_in(100.0 + rng.gen_range(0.0..120.0), 360.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(count: usize) -> ParticlePool {
        ParticlePool::new(count, SpawnParams::default(), 42)
    }

    #[test]
    fn test_spawn_positions_on_sphere() {
        let pool = pool(256);
        for i in 0..pool.count() {
            let p = pool.positions().get(pool.positions().offset(i));
            let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((len - 100.0).abs() < 1e-3, "|position| = {len}");
        }
    }

    #[test]
    fn test_spawn_velocity_motionless_with_speed_budget() {
        let pool = pool(256);
        for i in 0..pool.count() {
            let v = pool.velocities().get(pool.velocities().offset(i));
            assert_eq!(&v[..3], &[0.0, 0.0, 0.0]);
            assert!((6.0..10.0).contains(&v[3]), "speed = {}", v[3]);
        }
    }

    #[test]
    fn test_spawn_age_and_life_ranges() {
        let pool = pool(256);
        for i in 0..pool.count() {
            let a = pool.ages().get(pool.ages().offset(i));
            assert_eq!(a[0], 0.0);
            assert!((200.0..800.0).contains(&a[1]), "life = {}", a[1]);
        }
    }

    #[test]
    fn test_spawn_colors_bounded() {
        let pool = pool(256);
        for i in 0..pool.count() {
            let c = pool.colors().get(pool.colors().offset(i));
            for channel in c {
                assert!((0.0..=1.0).contains(channel));
            }
        }
    }

    #[test]
    fn test_reset_one_touches_only_that_index() {
        let mut pool = pool(8);
        let before_pos: Vec<f32> = pool.positions().as_slice().to_vec();
        let before_life = pool.ages().get(pool.ages().offset(5))[1];

        // Age particle 3 so a reset is observable.
        let offset = pool.ages().offset(3);
        pool.ages_mut().set(&[900.0], offset);
        pool.reset_one(3);

        let a = pool.ages().get(pool.ages().offset(3));
        assert_eq!(a[0], 0.0);
        assert!((200.0..800.0).contains(&a[1]));

        let p = pool.positions().get(pool.positions().offset(3));
        let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
        assert!((len - 100.0).abs() < 1e-3);

        // Neighbors are byte-for-byte unchanged.
        for i in 0..8 {
            if i == 3 {
                continue;
            }
            let offset = pool.positions().offset(i);
            assert_eq!(
                pool.positions().get(offset),
                &before_pos[offset..offset + 3]
            );
        }
        assert_eq!(pool.ages().get(pool.ages().offset(5))[1], before_life);
    }

    #[test]
    fn test_same_seed_same_spawn() {
        let a = ParticlePool::new(64, SpawnParams::default(), 7);
        let b = ParticlePool::new(64, SpawnParams::default(), 7);
        assert_eq!(a.positions().as_slice(), b.positions().as_slice());
        assert_eq!(a.colors().as_slice(), b.colors().as_slice());
    }
}
