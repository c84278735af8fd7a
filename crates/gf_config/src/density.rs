// crates/gf_config/src/density.rs

//! 密度验证策略

use serde::{Deserialize, Serialize};

/// 场源密度验证策略
///
/// 默认采用宽松的 `NonZero`：负密度差（亏损体）在物理上是合法的。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DensityPolicy {
    /// 仅要求 `rho != 0`
    #[default]
    NonZero,
    /// 要求 `rho > 0`
    StrictlyPositive,
}

impl DensityPolicy {
    /// 检查密度是否满足策略
    #[inline]
    pub fn accepts(&self, rho: f64) -> bool {
        match self {
            Self::NonZero => rho != 0.0 && rho.is_finite(),
            Self::StrictlyPositive => rho > 0.0 && rho.is_finite(),
        }
    }

    /// 是否为严格正密度
    #[inline]
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::StrictlyPositive)
    }
}
