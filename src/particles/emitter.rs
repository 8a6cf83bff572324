//! 粒子发射器
//!
//! 发射器在创建时为每个粒子实例采样一次起止状态，之后由表现层在每个
//! 周期内做线性插值，周期结束后从起点重新开始（不往返）。

use crate::config::EmitterConfig;
use crate::core::error::EmitterResult;
use crate::particles::sampler::ParticleSampler;
use crate::particles::state::{ParticleState, ViewportSize};
use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

// ============================================================================
// 粒子
// ============================================================================

/// 单个粒子实例的全部起止状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// 位置（像素）
    pub position: ParticleState<DVec2>,
    /// 不透明度
    pub opacity: ParticleState<f64>,
    /// 缩放
    pub scale: ParticleState<f64>,
    /// 旋转（弧度）
    pub rotation: ParticleState<f64>,
}

impl Particle {
    /// 采样一个新粒子
    pub fn sample<R: Rng + ?Sized>(
        config: &EmitterConfig,
        viewport: ViewportSize,
        rng: &mut R,
    ) -> Self {
        Self {
            position: ParticleSampler::sample_position(config, viewport, rng),
            opacity: ParticleSampler::sample_opacity(config, rng),
            scale: ParticleSampler::sample_scale(config, rng),
            rotation: ParticleSampler::sample_rotation(config, rng),
        }
    }

    /// 周期进度处的插值帧
    ///
    /// 进度按 1 取模，超过一个周期后从起点重新开始。
    pub fn frame_at(&self, progress: f64) -> ParticleFrame {
        let t = progress.rem_euclid(1.0);
        ParticleFrame {
            position: self.position.lerp(t),
            opacity: self.opacity.lerp(t),
            scale: self.scale.lerp(t),
            rotation: self.rotation.lerp(t),
        }
    }

    /// 经过 `elapsed` 秒后的插值帧
    ///
    /// 时间不是有限数或周期不是有限正数时直接返回终点状态。
    pub fn frame_at_time(&self, elapsed: f64, cycle_duration: f64) -> ParticleFrame {
        if !elapsed.is_finite() || !(cycle_duration.is_finite() && cycle_duration > 0.0) {
            return self.end_frame();
        }
        self.frame_at(elapsed / cycle_duration)
    }

    /// 起点帧
    pub fn start_frame(&self) -> ParticleFrame {
        ParticleFrame {
            position: self.position.start,
            opacity: self.opacity.start,
            scale: self.scale.start,
            rotation: self.rotation.start,
        }
    }

    /// 终点帧
    pub fn end_frame(&self) -> ParticleFrame {
        ParticleFrame {
            position: self.position.end,
            opacity: self.opacity.end,
            scale: self.scale.end,
            rotation: self.rotation.end,
        }
    }
}

/// 插值后的粒子快照
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleFrame {
    pub position: DVec2,
    pub opacity: f64,
    pub scale: f64,
    pub rotation: f64,
}

impl ParticleFrame {
    /// 截断到 [0, 1] 的不透明度，供显示使用
    pub fn clamped_opacity(&self) -> f64 {
        self.opacity.clamp(0.0, 1.0)
    }

    /// 是否可见
    pub fn is_visible(&self) -> bool {
        self.clamped_opacity() > 0.0 && self.scale > 0.0
    }
}

// ============================================================================
// 发射器
// ============================================================================

/// 粒子发射器
///
/// 持有校验过的配置，负责按数量生成粒子。
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    config: EmitterConfig,
    particle_count: usize,
}

impl ParticleEmitter {
    /// 创建发射器（粒子数量为负时返回 `InvalidConfig`）
    pub fn new(config: EmitterConfig) -> EmitterResult<Self> {
        let particle_count = config.checked_particle_count()?;
        tracing::debug!(
            target: "particles",
            particle_count,
            policy = ?config.creation_range_policy,
            "Emitter created"
        );
        Ok(Self {
            config,
            particle_count,
        })
    }

    /// 配置
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// 粒子数量
    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    /// 生成全部粒子
    ///
    /// 每个粒子独立采样，数量为 0 时返回空列表。
    pub fn spawn<R: Rng + ?Sized>(&self, viewport: ViewportSize, rng: &mut R) -> Vec<Particle> {
        let particles: Vec<Particle> = (0..self.particle_count)
            .map(|_| Particle::sample(&self.config, viewport, rng))
            .collect();
        tracing::debug!(
            target: "particles",
            count = particles.len(),
            width = viewport.width,
            height = viewport.height,
            "Spawned particles"
        );
        particles
    }

    /// 使用固定种子生成全部粒子（结果可复现）
    pub fn spawn_with_seed(&self, viewport: ViewportSize, seed: u64) -> Vec<Particle> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.spawn(viewport, &mut rng)
    }

    /// 重新采样单个粒子（实例重新出现时调用）
    ///
    /// 索引越界时返回 `false`。
    pub fn respawn<R: Rng + ?Sized>(
        &self,
        particles: &mut [Particle],
        index: usize,
        viewport: ViewportSize,
        rng: &mut R,
    ) -> bool {
        match particles.get_mut(index) {
            Some(particle) => {
                *particle = Particle::sample(&self.config, viewport, rng);
                true
            }
            None => {
                tracing::warn!(target: "particles", index, "Respawn index out of bounds");
                false
            }
        }
    }

    /// 所有粒子在 `elapsed` 秒时的插值帧
    pub fn frames_at_time(&self, particles: &[Particle], elapsed: f64) -> Vec<ParticleFrame> {
        particles
            .iter()
            .map(|p| p.frame_at_time(elapsed, self.config.cycle_duration))
            .collect()
    }
}

// ============================================================================
// 测试
// ============================================================================
