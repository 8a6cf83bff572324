//! 统一错误处理模块
//!
//! 发射器配置、配置文件读写共用同一个错误类型。
//! 采样本身不会失败，唯一的语义校验是粒子数量不能为负。

use thiserror::Error;

/// 发射器错误类型
#[derive(Error, Debug)]
pub enum EmitterError {
    /// 配置无效（目前仅在粒子数量为负时产生）
    #[error("Invalid emitter configuration: {0}")]
    InvalidConfig(String),

    /// 配置文件读写错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML/JSON 解析或序列化错误
    #[error("Config parse error: {0}")]
    Parse(String),
}

impl EmitterError {
    /// 粒子数量为负
    pub fn negative_particle_count(count: i64) -> Self {
        Self::InvalidConfig(format!(
            "particle_count must be >= 0, got {}",
            count
        ))
    }

    /// 是否为配置校验错误
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }
}

pub type EmitterResult<T> = Result<T, EmitterError>;
