//! 粒子状态与视口

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 粒子插值端点
///
/// 表现层在一个周期内从 `start` 线性插值到 `end`。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleState<T> {
    /// 周期起点
    pub start: T,
    /// 周期终点
    pub end: T,
}

impl<T> ParticleState<T> {
    pub fn new(start: T, end: T) -> Self {
        Self { start, end }
    }
}

impl ParticleState<f64> {
    /// 线性插值（`t` 不做截断）
    pub fn lerp(&self, t: f64) -> f64 {
        self.start + (self.end - self.start) * t
    }

    /// 终点与起点之差
    pub fn delta(&self) -> f64 {
        self.end - self.start
    }
}

impl ParticleState<DVec2> {
    /// 线性插值（`t` 不做截断）
    pub fn lerp(&self, t: f64) -> DVec2 {
        self.start.lerp(self.end, t)
    }

    /// 位移向量
    pub fn delta(&self) -> DVec2 {
        self.end - self.start
    }

    /// 位移长度
    pub fn distance(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// 视口尺寸（像素），采样时由外部提供
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// 转换为DVec2
    pub fn to_dvec2(self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

impl From<(f64, f64)> for ViewportSize {
    fn from((width, height): (f64, f64)) -> Self {
        Self::new(width, height)
    }
}
