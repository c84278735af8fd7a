// crates/gf_config/src/model.rs

//! 正演模型选择
//!
//! 点质量模型与均匀球体模型是两个**不可互换**的近似：
//!
//! - `PointMass`: 直接把 `rho` 当作质量类比量代入核函数（无体积因子）
//! - `Sphere`: 先由半径计算等效质量 `(4/3)·π·r³·ρ`，再代入同一核函数
//!
//! 两者的量纲并不一致，这是已知的建模近似，这里不做静默修正，
//! 而是作为两个显式命名、可单独选择的变体暴露给调用方。

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 异常核函数模型
///
/// # 示例
///
/// ```rust
/// use gf_config::ModelKind;
///
/// let model: ModelKind = "sphere".parse().unwrap();
/// assert!(model.requires_radius());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// 点质量 / 点密度模型
    #[default]
    PointMass,
    /// 均匀球体模型（需要半径）
    Sphere,
}

impl ModelKind {
    /// 模型名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::PointMass => "point-mass",
            Self::Sphere => "sphere",
        }
    }

    /// 是否要求场源提供半径
    #[inline]
    pub fn requires_radius(&self) -> bool {
        matches!(self, Self::Sphere)
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 模型解析错误
#[derive(Debug, Clone, thiserror::Error)]
#[error("无效的模型: '{0}', 期望 'point-mass' 或 'sphere'")]
pub struct ModelParseError(String);

impl FromStr for ModelKind {
    type Err = ModelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "point" | "point-mass" | "pointmass" | "point_mass" => Ok(Self::PointMass),
            "sphere" | "ball" => Ok(Self::Sphere),
            _ => Err(ModelParseError(s.to_string())),
        }
    }
}
