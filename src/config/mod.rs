//! 发射器配置系统
//!
//! 提供TOML/JSON配置文件、环境变量覆盖和构造时校验

use crate::core::error::{EmitterError, EmitterResult};
use crate::impl_default;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::env;
use std::f64::consts::TAU;
use std::fs;
use std::path::{Path, PathBuf};

/// 创建范围的采样策略
///
/// 旧版发射器把宽高的半范围交叉使用：X 偏移取 `[-w/2, h/2]`，
/// Y 偏移取 `[-h/2, w/2]`。只有需要逐位复现旧行为时才使用 `CrossWired`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationRangePolicy {
    /// X 使用宽度，Y 使用高度
    #[default]
    Symmetric,
    /// 复现旧版的宽高交叉
    CrossWired,
}

/// 发射器配置
///
/// 构造一次后不再修改。所有 `*_range` 字段会被减半后作为对称随机边界，
/// 负值只会让边界反转，不会报错。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// 粒子数量（必须 >= 0）
    pub particle_count: i64,

    /// 创建点（单位正方形坐标）
    pub creation_point: DVec2,
    /// 创建范围（x = 宽，y = 高）
    pub creation_range: DVec2,
    /// 创建范围采样策略
    pub creation_range_policy: CreationRangePolicy,

    /// 发射方向（弧度，0 指向屏幕上方）
    pub angle: f64,
    /// 方向随机范围（弧度）
    pub angle_range: f64,

    /// 初始不透明度
    pub opacity: f64,
    pub opacity_range: f64,
    /// 每个周期的不透明度变化量
    pub opacity_speed: f64,

    /// 初始旋转（弧度）
    pub rotation: f64,
    pub rotation_range: f64,
    /// 每个周期的旋转量（弧度）
    pub rotation_speed: f64,

    /// 初始缩放
    pub scale: f64,
    pub scale_range: f64,
    /// 每个周期的缩放变化量
    pub scale_speed: f64,

    /// 速度（像素/周期）
    pub speed: f64,
    pub speed_range: f64,

    /// 动画周期（秒）
    pub cycle_duration: f64,
}

impl_default!(EmitterConfig {
    particle_count: 0,
    creation_point: DVec2::new(0.5, 0.5),
    creation_range: DVec2::ZERO,
    creation_range_policy: CreationRangePolicy::Symmetric,
    angle: 0.0,
    angle_range: 0.0,
    opacity: 1.0,
    opacity_range: 0.0,
    opacity_speed: 0.0,
    rotation: 0.0,
    rotation_range: 0.0,
    rotation_speed: 0.0,
    scale: 1.0,
    scale_range: 0.0,
    scale_speed: 0.0,
    speed: 50.0,
    speed_range: 0.0,
    cycle_duration: 1.0,
});

impl EmitterConfig {
    /// 创建指定粒子数量的配置，其余字段取默认值
    pub fn new(particle_count: i64) -> EmitterResult<Self> {
        let config = Self {
            particle_count,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// 火花爆发预设
    ///
    /// 200 个粒子向四周散开，同时淡出并放大。
    pub fn spark_burst() -> Self {
        Self {
            particle_count: 200,
            angle_range: TAU,
            opacity_speed: -1.0,
            scale: 0.4,
            scale_range: 0.1,
            scale_speed: 0.4,
            speed_range: 80.0,
            ..Default::default()
        }
    }

    /// 校验配置
    pub fn validate(&self) -> EmitterResult<()> {
        if self.particle_count < 0 {
            return Err(EmitterError::negative_particle_count(self.particle_count));
        }
        Ok(())
    }

    /// 校验后的粒子数量
    pub fn checked_particle_count(&self) -> EmitterResult<usize> {
        usize::try_from(self.particle_count)
            .map_err(|_| EmitterError::negative_particle_count(self.particle_count))
    }

    // ------------------------------------------------------------------
    // 构建器
    // ------------------------------------------------------------------

    /// 设置创建点
    pub fn with_creation_point(mut self, x: f64, y: f64) -> Self {
        self.creation_point = DVec2::new(x, y);
        self
    }

    /// 设置创建范围
    pub fn with_creation_range(mut self, width: f64, height: f64) -> Self {
        self.creation_range = DVec2::new(width, height);
        self
    }

    /// 设置创建范围采样策略
    pub fn with_creation_range_policy(mut self, policy: CreationRangePolicy) -> Self {
        self.creation_range_policy = policy;
        self
    }

    /// 设置方向（弧度）
    pub fn with_angle(mut self, angle: f64, range: f64) -> Self {
        self.angle = angle;
        self.angle_range = range;
        self
    }

    /// 设置方向（角度）
    pub fn with_angle_degrees(self, angle: f64, range: f64) -> Self {
        self.with_angle(angle.to_radians(), range.to_radians())
    }

    /// 设置不透明度
    pub fn with_opacity(mut self, opacity: f64, range: f64, speed: f64) -> Self {
        self.opacity = opacity;
        self.opacity_range = range;
        self.opacity_speed = speed;
        self
    }

    /// 设置旋转（弧度）
    pub fn with_rotation(mut self, rotation: f64, range: f64, speed: f64) -> Self {
        self.rotation = rotation;
        self.rotation_range = range;
        self.rotation_speed = speed;
        self
    }

    /// 设置缩放
    pub fn with_scale(mut self, scale: f64, range: f64, speed: f64) -> Self {
        self.scale = scale;
        self.scale_range = range;
        self.scale_speed = speed;
        self
    }

    /// 设置速度
    pub fn with_speed(mut self, speed: f64, range: f64) -> Self {
        self.speed = speed;
        self.speed_range = range;
        self
    }

    /// 设置动画周期
    pub fn with_cycle_duration(mut self, seconds: f64) -> Self {
        self.cycle_duration = seconds;
        self
    }

    // ------------------------------------------------------------------
    // 文件读写
    // ------------------------------------------------------------------

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> EmitterResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> EmitterResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| EmitterError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> EmitterResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> EmitterResult<Self> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| EmitterError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 按扩展名加载（`.json` 走 JSON，其余按 TOML）
    pub fn from_file<P: AsRef<Path>>(path: P) -> EmitterResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> EmitterResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| EmitterError::Parse(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 保存为JSON文件
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> EmitterResult<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| EmitterError::Parse(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 从环境变量覆盖配置
    ///
    /// 无法解析的值会被忽略，覆盖后重新校验。
    pub fn apply_env_overrides(&mut self) -> EmitterResult<()> {
        self.apply_overrides_from(|key| env::var(key).ok())
    }

    /// 按键名查找覆盖值
    ///
    /// 支持的键：`EMITTER_PARTICLE_COUNT`、`EMITTER_SPEED`、
    /// `EMITTER_SPEED_RANGE`、`EMITTER_CYCLE_DURATION`。
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> EmitterResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(count) = parse_override(&lookup, "EMITTER_PARTICLE_COUNT") {
            self.particle_count = count;
        }
        if let Some(speed) = parse_override(&lookup, "EMITTER_SPEED") {
            self.speed = speed;
        }
        if let Some(range) = parse_override(&lookup, "EMITTER_SPEED_RANGE") {
            self.speed_range = range;
        }
        if let Some(seconds) = parse_override(&lookup, "EMITTER_CYCLE_DURATION") {
            self.cycle_duration = seconds;
        }
        self.validate()
    }

    /// 用户配置目录下的默认配置路径
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("spark_emitter").join("emitter.toml"))
    }

    /// 自动查找并加载配置文件
    ///
    /// 按以下顺序查找：
    /// 1. ./emitter.toml
    /// 2. ./emitter.json
    /// 3. <用户配置目录>/spark_emitter/emitter.toml
    /// 4. 使用火花爆发预设
    pub fn load_or_default() -> Self {
        let mut candidates = vec![PathBuf::from("emitter.toml"), PathBuf::from("emitter.json")];
        candidates.extend(Self::user_config_path());
        Self::load_from_candidates(&candidates)
    }

    /// 依次尝试候选路径，返回第一个成功加载的配置
    ///
    /// 文件不存在时静默跳过，其余错误记录警告后跳过。全部失败时使用火花爆发预设。
    pub fn load_from_candidates(candidates: &[PathBuf]) -> Self {
        for path in candidates {
            match Self::from_file(path) {
                Ok(config) => {
                    tracing::info!(target: "config", "Loaded emitter config from {:?}", path);
                    return config;
                }
                Err(EmitterError::Io(_)) => {}
                Err(e) => {
                    tracing::warn!(target: "config", "Ignoring {:?}: {}", path, e);
                }
            }
        }

        tracing::info!(target: "config", "Using spark burst preset");
        Self::spark_burst()
    }
}

fn parse_override<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key).and_then(|val| val.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmitterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.creation_point, DVec2::new(0.5, 0.5));
        assert_eq!(config.creation_range, DVec2::ZERO);
        assert_eq!(config.opacity, 1.0);
        assert_eq!(config.scale, 1.0);
        assert_eq!(config.speed, 50.0);
        assert_eq!(config.cycle_duration, 1.0);
        assert_eq!(config.creation_range_policy, CreationRangePolicy::Symmetric);
    }

    #[test]
    fn test_negative_particle_count_rejected() {
        let err = EmitterConfig::new(-1).unwrap_err();
        assert!(err.is_invalid_config());
        assert!(EmitterConfig::new(0).is_ok());
    }

    #[test]
    fn test_negative_ranges_are_accepted() {
        let config = EmitterConfig::new(4)
            .unwrap()
            .with_speed(10.0, -5.0)
            .with_opacity(1.0, -0.5, 0.0)
            .with_creation_range(-0.2, -0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_spark_burst_preset() {
        let config = EmitterConfig::spark_burst();
        assert_eq!(config.particle_count, 200);
        assert!((config.angle_range - TAU).abs() < 1e-12);
        assert_eq!(config.opacity_speed, -1.0);
        assert_eq!(config.scale, 0.4);
        assert_eq!(config.scale_range, 0.1);
        assert_eq!(config.scale_speed, 0.4);
        assert_eq!(config.speed, 50.0);
        assert_eq!(config.speed_range, 80.0);
    }

    #[test]
    fn test_angle_degrees_builder() {
        let config = EmitterConfig::default().with_angle_degrees(90.0, 360.0);
        assert!((config.angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((config.angle_range - TAU).abs() < 1e-12);
    }

    #[test]
    fn test_toml_serialization() {
        let config = EmitterConfig::spark_burst()
            .with_creation_range_policy(CreationRangePolicy::CrossWired);
        let toml_str = toml::to_string(&config).unwrap();
        let parsed = EmitterConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_json_serialization() {
        let config = EmitterConfig::spark_burst().with_creation_range(0.2, 0.4);
        let json_str = serde_json::to_string(&config).unwrap();
        let parsed = EmitterConfig::from_json_str(&json_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EmitterConfig::from_toml_str(
            r#"
            particle_count = 12
            creation_range = [0.25, 0.5]
            creation_range_policy = "cross_wired"
            "#,
        )
        .unwrap();
        assert_eq!(config.particle_count, 12);
        assert_eq!(config.creation_range, DVec2::new(0.25, 0.5));
        assert_eq!(config.creation_range_policy, CreationRangePolicy::CrossWired);
        assert_eq!(config.speed, 50.0);
    }

    #[test]
    fn test_parsed_negative_count_rejected() {
        let err = EmitterConfig::from_toml_str("particle_count = -5").unwrap_err();
        assert!(err.is_invalid_config());

        let err = EmitterConfig::from_json_str(r#"{"particle_count": -1}"#).unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn test_malformed_input_is_parse_error() {
        let err = EmitterConfig::from_toml_str("particle_count = \"many\"").unwrap_err();
        assert!(matches!(err, EmitterError::Parse(_)));
    }

    #[test]
    fn test_checked_particle_count() {
        let config = EmitterConfig {
            particle_count: 7,
            ..Default::default()
        };
        assert_eq!(config.checked_particle_count().unwrap(), 7);

        let config = EmitterConfig {
            particle_count: -7,
            ..Default::default()
        };
        assert!(config.checked_particle_count().is_err());
    }

    fn overrides(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = EmitterConfig::spark_burst();
        config
            .apply_overrides_from(overrides(&[
                ("EMITTER_PARTICLE_COUNT", "12"),
                ("EMITTER_SPEED", "75.5"),
                ("EMITTER_SPEED_RANGE", "10"),
                ("EMITTER_CYCLE_DURATION", "2.5"),
            ]))
            .unwrap();
        assert_eq!(config.particle_count, 12);
        assert_eq!(config.speed, 75.5);
        assert_eq!(config.speed_range, 10.0);
        assert_eq!(config.cycle_duration, 2.5);
        assert_eq!(config.scale, 0.4);
    }

    #[test]
    fn test_unparsable_override_ignored() {
        let mut config = EmitterConfig::spark_burst();
        config
            .apply_overrides_from(overrides(&[
                ("EMITTER_PARTICLE_COUNT", "lots"),
                ("EMITTER_SPEED", ""),
            ]))
            .unwrap();
        assert_eq!(config.particle_count, 200);
        assert_eq!(config.speed, 50.0);
    }

    #[test]
    fn test_negative_count_override_rejected() {
        let mut config = EmitterConfig::spark_burst();
        let err = config
            .apply_overrides_from(overrides(&[("EMITTER_PARTICLE_COUNT", "-4")]))
            .unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn test_toml_candidate_wins_over_json() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("emitter.toml");
        let json_path = dir.path().join("emitter.json");
        EmitterConfig::new(11).unwrap().save_toml(&toml_path).unwrap();
        EmitterConfig::new(22).unwrap().save_json(&json_path).unwrap();

        let config = EmitterConfig::load_from_candidates(&[toml_path, json_path.clone()]);
        assert_eq!(config.particle_count, 11);

        let missing = dir.path().join("missing.toml");
        let config = EmitterConfig::load_from_candidates(&[missing, json_path]);
        assert_eq!(config.particle_count, 22);
    }

    #[test]
    fn test_invalid_candidate_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let bad_path = dir.path().join("emitter.toml");
        let json_path = dir.path().join("emitter.json");
        fs::write(&bad_path, "particle_count = -1\n").unwrap();
        EmitterConfig::new(5).unwrap().save_json(&json_path).unwrap();

        let config = EmitterConfig::load_from_candidates(&[bad_path, json_path]);
        assert_eq!(config.particle_count, 5);
    }

    #[test]
    fn test_preset_fallback_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = [dir.path().join("emitter.toml"), dir.path().join("emitter.json")];
        assert_eq!(
            EmitterConfig::load_from_candidates(&candidates),
            EmitterConfig::spark_burst()
        );
        assert_eq!(
            EmitterConfig::load_from_candidates(&[]),
            EmitterConfig::spark_burst()
        );
    }
}
