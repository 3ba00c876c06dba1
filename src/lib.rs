//! # driftfield
//!
//! Noise-steered particle flow fields rendered as additive point clouds.
//!
//! A fixed pool of particles lives in flat, interleaved attribute
//! buffers (position, velocity, age/life, color). Every frame each
//! particle samples a 4-D coherent noise field at its own position and
//! the current frame time; the sample is bent into a steering direction,
//! the velocity eases toward it, and the position drifts after the
//! velocity. Particles age, expire and respawn on a sphere forever. The
//! same packed buffers are uploaded to the GPU each frame and drawn as
//! additively-blended soft points.
//!
//! ## Quick Start
//!
//! ```ignore
//! use driftfield::Simulation;
//!
//! fn main() -> Result<(), driftfield::SimulationError> {
//!     Simulation::new()
//!         .with_particle_count(20_000)
//!         .run()
//! }
//! ```
//!
//! ## Headless use
//!
//! The update loop is independent of the window and GPU; a
//! [`ParticleFlow`] can be ticked directly, which is how the tests and
//! benches drive it:
//!
//! ```ignore
//! use driftfield::ParticleFlow;
//!
//! let mut flow = ParticleFlow::new(1_000, 42);
//! flow.tick();
//! let positions = flow.pool().positions().as_slice();
//! ```

mod error;
pub mod field;
mod flow;
mod gpu;
pub mod math;
mod pool;
mod simulation;
mod store;
pub mod time;

pub use error::{GpuError, SimulationError};
pub use field::{ConstantField, NoiseField, SimplexField};
pub use flow::{ParticleFlow, SteerParams};
pub use pool::{ParticlePool, SpawnParams};
pub use simulation::Simulation;
pub use store::PackedStore;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::field::{ConstantField, NoiseField, SimplexField};
    pub use crate::flow::{ParticleFlow, SteerParams};
    pub use crate::pool::{ParticlePool, SpawnParams};
    pub use crate::simulation::Simulation;
    pub use crate::store::PackedStore;
    pub use crate::time::Time;
}
