//! 粒子采样模块
//!
//! 为装饰性发射器生成每个粒子的起止状态（位置、不透明度、缩放、旋转）。
//! 本模块只负责数据采样，显示、插值驱动和帧调度由表现层负责。
//!
//! ## 架构设计
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  Particle Emitter                     │
//! ├──────────────────────────────────────────────────────┤
//! │  1. EmitterConfig（配置，构造时校验）                  │
//! │                                                       │
//! │  2. ParticleSampler（无状态采样服务）                  │
//! │     - 位置：创建范围偏移 + 速度/方向                    │
//! │     - 不透明度/缩放/旋转：共享随机偏移                  │
//! │                                                       │
//! │  3. ParticleEmitter（按数量生成、单个重采样）           │
//! │     - Particle::frame_at 循环线性插值                  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## 使用示例
//!
//! ```
//! use spark_emitter::config::EmitterConfig;
//! use spark_emitter::particles::{ParticleEmitter, ViewportSize};
//!
//! let emitter = ParticleEmitter::new(EmitterConfig::spark_burst()).unwrap();
//! let particles = emitter.spawn(ViewportSize::new(800.0, 600.0), &mut rand::thread_rng());
//! assert_eq!(particles.len(), 200);
//!
//! let frame = particles[0].frame_at(0.5);
//! assert!(frame.clamped_opacity() <= 1.0);
//! ```

pub mod emitter;
pub mod sampler;
pub mod state;


pub use emitter::{Particle, ParticleEmitter, ParticleFrame};
pub use sampler::{direction_vector, ParticleSampler};
pub use state::{ParticleState, ViewportSize};
