// crates/gf_config/src/forward_config.rs

//! ForwardConfig - 正演配置
//!
//! 汇总模型选择、色标策略、密度策略、观测网格与并行参数，
//! 使用 JSON 序列化，所有字段都有默认值。

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::color::ColorPolicy;
use crate::density::DensityPolicy;
use crate::error::ConfigError;
use crate::model::ModelKind;

/// SI 万有引力常数 [m³ kg⁻¹ s⁻²]
pub const DEFAULT_GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;

/// 正演配置
///
/// ```rust
/// use gf_config::{ForwardConfig, ModelKind};
///
/// let mut config = ForwardConfig::default();
/// config.model = ModelKind::Sphere;
/// config.grid.resolution = 101;
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForwardConfig {
    /// 核函数模型
    #[serde(default)]
    pub model: ModelKind,

    /// 色标策略
    #[serde(default)]
    pub color: ColorPolicy,

    /// 密度验证策略
    #[serde(default)]
    pub density: DensityPolicy,

    /// 观测网格
    #[serde(default)]
    pub grid: GridConfig,

    /// 万有引力常数 [m³ kg⁻¹ s⁻²]
    ///
    /// 仅在显式配置时偏离 SI 值。
    #[serde(default = "default_gravitational_constant")]
    pub gravitational_constant: f64,

    /// 并行参数
    #[serde(default)]
    pub parallel: ParallelConfig,
}

fn default_gravitational_constant() -> f64 {
    DEFAULT_GRAVITATIONAL_CONSTANT
}

/// 观测网格配置（X/Y 对称）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// 半宽 [m]，网格覆盖 `[-extent, extent]²`
    #[serde(default = "default_extent")]
    pub extent: f64,

    /// 每个轴的采样点数
    #[serde(default = "default_resolution")]
    pub resolution: usize,
}

fn default_extent() -> f64 { 200.0 }
fn default_resolution() -> usize { 400 }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            extent: default_extent(),
            resolution: default_resolution(),
        }
    }
}

/// 并行计算配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// 是否允许并行
    #[serde(default = "default_parallel_enabled")]
    pub enabled: bool,

    /// 最小并行网格点数（低于此值串行计算）
    #[serde(default = "default_min_points")]
    pub min_points: usize,
}

fn default_parallel_enabled() -> bool { true }
fn default_min_points() -> usize { 4096 }

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_parallel_enabled(),
            min_points: default_min_points(),
        }
    }
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::default(),
            color: ColorPolicy::default(),
            density: DensityPolicy::default(),
            grid: GridConfig::default(),
            gravitational_constant: default_gravitational_constant(),
            parallel: ParallelConfig::default(),
        }
    }
}

impl ForwardConfig {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析并验证配置
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: ForwardConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.grid.extent.is_finite() || self.grid.extent <= 0.0 {
            return Err(ConfigError::invalid(
                "grid.extent",
                self.grid.extent,
                "网格半宽必须为正的有限值",
            ));
        }

        if self.grid.resolution < 2 {
            return Err(ConfigError::invalid(
                "grid.resolution",
                self.grid.resolution,
                "每轴采样点数必须 >= 2",
            ));
        }

        if !self.gravitational_constant.is_finite() || self.gravitational_constant <= 0.0 {
            return Err(ConfigError::invalid(
                "gravitational_constant",
                self.gravitational_constant,
                "万有引力常数必须为正",
            ));
        }

        if let ColorPolicy::Fixed { vmin, vmax } = self.color {
            if !vmin.is_finite() || !vmax.is_finite() {
                return Err(ConfigError::invalid(
                    "color",
                    format!("[{vmin}, {vmax}]"),
                    "固定色标上下界必须为有限值",
                ));
            }
            if vmin >= vmax {
                return Err(ConfigError::invalid(
                    "color",
                    format!("[{vmin}, {vmax}]"),
                    "固定色标要求 vmin < vmax",
                ));
            }
        }

        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        Ok(())
    }

    /// 是否使用非 SI 的万有引力常数
    pub fn has_custom_constant(&self) -> bool {
        self.gravitational_constant != DEFAULT_GRAVITATIONAL_CONSTANT
    }
}
