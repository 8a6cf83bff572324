//! 粒子状态采样服务
//!
//! 根据发射器配置生成单个粒子的起止状态。每次调用只依赖输入参数和
//! 调用方提供的随机源，服务本身不持有任何状态，可以在多个线程中
//! 各自配合自己的随机源并发使用。

use crate::config::{CreationRangePolicy, EmitterConfig};
use crate::particles::state::{ParticleState, ViewportSize};
use glam::DVec2;
use rand::Rng;
use std::f64::consts::FRAC_PI_2;

/// 粒子采样服务 - 封装采样逻辑
pub struct ParticleSampler;

impl ParticleSampler {
    /// 采样位置
    ///
    /// 起点为创建点加上创建范围内的随机偏移，再按视口缩放到像素。
    /// 终点沿 `angle - π/2` 方向移动 `speed` 像素，因此角度 0 指向屏幕上方
    /// （y 轴向下）。
    pub fn sample_position<R: Rng + ?Sized>(
        config: &EmitterConfig,
        viewport: ViewportSize,
        rng: &mut R,
    ) -> ParticleState<DVec2> {
        let half_width = config.creation_range.x / 2.0;
        let half_height = config.creation_range.y / 2.0;

        let (offset_x, offset_y) = match config.creation_range_policy {
            CreationRangePolicy::Symmetric => (
                uniform(rng, -half_width, half_width),
                uniform(rng, -half_height, half_height),
            ),
            CreationRangePolicy::CrossWired => (
                uniform(rng, -half_width, half_height),
                uniform(rng, -half_height, half_width),
            ),
        };

        let start = viewport.to_dvec2() * (config.creation_point + DVec2::new(offset_x, offset_y));

        let half_speed_range = config.speed_range / 2.0;
        let actual_speed = config.speed + uniform(rng, -half_speed_range, half_speed_range);

        let half_angle_range = config.angle_range / 2.0;
        let direction = config.angle + uniform(rng, -half_angle_range, half_angle_range);

        let end = start + direction_vector(direction) * actual_speed;
        ParticleState::new(start, end)
    }

    /// 采样不透明度
    ///
    /// 起点和终点共用同一个随机偏移，`end - start` 恒等于 `opacity_speed`。
    /// 不截断到 [0, 1]。
    pub fn sample_opacity<R: Rng + ?Sized>(
        config: &EmitterConfig,
        rng: &mut R,
    ) -> ParticleState<f64> {
        jittered(
            config.opacity,
            config.opacity_range,
            config.opacity_speed,
            rng,
        )
    }

    /// 采样缩放
    pub fn sample_scale<R: Rng + ?Sized>(config: &EmitterConfig, rng: &mut R) -> ParticleState<f64> {
        jittered(config.scale, config.scale_range, config.scale_speed, rng)
    }

    /// 采样旋转（弧度）
    pub fn sample_rotation<R: Rng + ?Sized>(
        config: &EmitterConfig,
        rng: &mut R,
    ) -> ParticleState<f64> {
        jittered(
            config.rotation,
            config.rotation_range,
            config.rotation_speed,
            rng,
        )
    }
}

/// 方向向量（角度 0 对应 (0, -1)）
pub fn direction_vector(angle: f64) -> DVec2 {
    let (sin, cos) = (angle - FRAC_PI_2).sin_cos();
    DVec2::new(cos, sin)
}

/// `[lo, hi)` 上的均匀采样
///
/// `lo > hi` 时结果落在 `(hi, lo]`，不会 panic。
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * rng.gen::<f64>()
}

/// 基准值 + 共享随机偏移
fn jittered<R: Rng + ?Sized>(base: f64, range: f64, speed: f64, rng: &mut R) -> ParticleState<f64> {
    let half_range = range / 2.0;
    let delta = uniform(rng, -half_range, half_range);
    ParticleState::new(base + delta, base + speed + delta)
}
