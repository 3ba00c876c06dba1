//! The per-frame particle update.
//!
//! [`ParticleFlow`] owns the pool, the steering noise field and the
//! frame counter, and advances every particle once per [`tick`]. The
//! renderer reads the pool's packed buffers only after a tick has fully
//! completed, so there is no partial-frame state to worry about.
//!
//! [`tick`]: ParticleFlow::tick

use crate::field::{NoiseField, SimplexField};
use crate::math::lerp;
use crate::pool::{ParticlePool, SpawnParams};
use std::f32::consts::TAU;

/// Constants shaping the steering field and motion smoothing.
#[derive(Clone, Copy)]
pub struct SteerParams {
    /// Spatial frequency of the noise field.
    pub noise_scale: f32,
    /// Temporal frequency: how fast the field itself drifts.
    pub time_scale: f32,
    /// Per-frame interpolation factor pulling velocity toward the
    /// field's target direction.
    pub velocity_smoothing: f32,
    /// Per-frame interpolation factor pulling position toward
    /// `position + velocity`. Deliberately not a plain integration;
    /// the small factor is what gives the motion its trailing feel.
    pub drift: f32,
}

impl Default for SteerParams {
    fn default() -> Self {
        Self {
            noise_scale: 0.005,
            time_scale: 0.0005,
            velocity_smoothing: 0.125,
            drift: 0.05,
        }
    }
}

/// A particle pool plus the rule that advances it one frame at a time.
pub struct ParticleFlow {
    pool: ParticlePool,
    noise: Box<dyn NoiseField>,
    steer: SteerParams,
    frame: u64,
}

impl ParticleFlow {
    /// Create a flow of `count` particles steered by OpenSimplex noise.
    ///
    /// The seed drives both the spawn RNG and the noise field, so equal
    /// seeds reproduce the same run exactly.
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            pool: ParticlePool::new(count, SpawnParams::default(), seed),
            noise: Box::new(SimplexField::new(seed as u32)),
            steer: SteerParams::default(),
            frame: 0,
        }
    }

    /// Replace the steering field (e.g. with a fixed field in tests).
    pub fn with_noise(self, noise: impl NoiseField + 'static) -> Self {
        self.with_boxed_noise(Box::new(noise))
    }

    /// Replace the steering field with an already-boxed one.
    pub fn with_boxed_noise(mut self, noise: Box<dyn NoiseField>) -> Self {
        self.noise = noise;
        self
    }

    /// Override the steering constants.
    pub fn with_steer(mut self, steer: SteerParams) -> Self {
        self.steer = steer;
        self
    }

    /// Rebuild the pool with different spawn ranges.
    pub fn with_spawn(mut self, params: SpawnParams, seed: u64) -> Self {
        self.pool = ParticlePool::new(self.pool.count(), params, seed);
        self
    }

    /// Frames advanced so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    #[inline]
    pub fn pool_mut(&mut self) -> &mut ParticlePool {
        &mut self.pool
    }

    /// Advance every particle by one frame.
    ///
    /// Expired particles respawn and sit the rest of the frame out;
    /// everyone else is steered by the noise field and aged by one.
    /// Runs synchronously with no allocation; particles are independent,
    /// so iteration order does not matter.
    pub fn tick(&mut self) {
        self.frame += 1;
        let w = self.frame as f32 * self.steer.time_scale;
        let steer = self.steer;

        for i in 0..self.pool.count() {
            let age_offset = self.pool.ages().offset(i);
            let [age, life] = {
                let a = self.pool.ages().get(age_offset);
                [a[0], a[1]]
            };

            if age > life {
                self.pool.reset_one(i);
                continue;
            }

            let pos_offset = self.pool.positions().offset(i);
            let vel_offset = self.pool.velocities().offset(i);
            let [x, y, z] = {
                let p = self.pool.positions().get(pos_offset);
                [p[0], p[1], p[2]]
            };
            let [vx, vy, vz, speed] = {
                let v = self.pool.velocities().get(vel_offset);
                [v[0], v[1], v[2], v[3]]
            };

            // One noise sample bent twice: the scalar becomes a wide
            // angle, and its cosine a second angle. The re-projection is
            // what produces the swirling flow; do not simplify it away.
            let n = self.noise.sample4d(
                x * steer.noise_scale,
                y * steer.noise_scale,
                z * steer.noise_scale,
                w,
            );
            let t_ang = n * 4.0 * TAU;
            let p_ang = t_ang.cos() * 2.0 * TAU;

            let nvx = lerp(
                vx,
                p_ang.sin() * t_ang.cos() * speed,
                steer.velocity_smoothing,
            );
            let nvy = lerp(
                vy,
                p_ang.sin() * t_ang.sin() * speed,
                steer.velocity_smoothing,
            );
            let nvz = lerp(vz, p_ang.cos() * speed, steer.velocity_smoothing);

            let nx = lerp(x, x + nvx, steer.drift);
            let ny = lerp(y, y + nvy, steer.drift);
            let nz = lerp(z, z + nvz, steer.drift);

            // A non-finite noise or generator value must not reach the
            // render buffer; the particle simply keeps last frame's
            // position and velocity and ages normally.
            let finite = nx.is_finite()
                && ny.is_finite()
                && nz.is_finite()
                && nvx.is_finite()
                && nvy.is_finite()
                && nvz.is_finite();
            if finite {
                self.pool.positions_mut().set(&[nx, ny, nz], pos_offset);
                self.pool
                    .velocities_mut()
                    .set(&[nvx, nvy, nvz, speed], vel_offset);
            }

            // Partial write: life stays untouched until respawn.
            self.pool.ages_mut().set(&[age + 1.0], age_offset);
        }
    }
}
