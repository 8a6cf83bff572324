//! # Spark Emitter
//!
//! Randomized particle state sampling for decorative 2D emitters.
//!
//! An emitter spawns a fixed number of particles. Each particle gets a
//! randomized start and end state for position, opacity, scale and rotation,
//! sampled once when the particle instance is created. A presentation layer
//! then interpolates linearly from start to end over one cycle and loops
//! without reversing.
//!
//! ## Features
//!
//! - **Stateless sampling**: `ParticleSampler` works with any `rand::Rng`, one generator per thread
//! - **Configuration**: TOML/JSON config files, environment overrides, validation at construction
//! - **Reproducibility**: seeded spawning for deterministic particle sets
//! - **Interpolation helpers**: looping frame snapshots for the presentation layer
//!
//! ### Example
//!
//! ```
//! use spark_emitter::config::EmitterConfig;
//! use spark_emitter::particles::{ParticleEmitter, ViewportSize};
//!
//! let config = EmitterConfig::new(50)
//!     .unwrap()
//!     .with_angle_degrees(0.0, 360.0)
//!     .with_speed(120.0, 40.0)
//!     .with_opacity(1.0, 0.2, -1.0);
//! let emitter = ParticleEmitter::new(config).unwrap();
//! let particles = emitter.spawn_with_seed(ViewportSize::new(1280.0, 720.0), 7);
//! assert_eq!(particles.len(), 50);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Error types and shared macros
//! - [`config`]: Emitter configuration
//! - [`particles`]: Particle sampling and emitter

/// Error types and shared macros
pub mod core;
/// Emitter configuration loading and validation
pub mod config;
/// Particle state sampling
pub mod particles;

pub use crate::config::{CreationRangePolicy, EmitterConfig};
pub use crate::core::{EmitterError, EmitterResult};
pub use particles::{
    Particle, ParticleEmitter, ParticleFrame, ParticleSampler, ParticleState, ViewportSize,
};
