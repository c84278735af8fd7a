// crates/gf_config/src/color.rs

//! 色标范围策略
//!
//! 色标上下界只用于展示，不属于物理计算结果。

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 色标范围推导策略
///
/// 显式给定的 `Fixed` 上下界总是优先于自动缩放。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum ColorPolicy {
    /// 非对称自动缩放：`[min, max]`
    AsymmetricAutoscale,
    /// 对称自动缩放：`[-max|v|, max|v|]`，用于发散色带
    #[default]
    SymmetricAutoscale,
    /// 固定上下界
    Fixed {
        /// 下界 [mGal]
        vmin: f64,
        /// 上界 [mGal]
        vmax: f64,
    },
}

impl ColorPolicy {
    /// 策略名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::AsymmetricAutoscale => "asymmetric",
            Self::SymmetricAutoscale => "symmetric",
            Self::Fixed { .. } => "fixed",
        }
    }

    /// 由可选的固定上下界覆盖自动策略
    ///
    /// 两个界都给出时返回 `Fixed`，否则保持 `self`。
    pub fn with_override(self, vmin: Option<f64>, vmax: Option<f64>) -> Self {
        match (vmin, vmax) {
            (Some(vmin), Some(vmax)) => Self::Fixed { vmin, vmax },
            _ => self,
        }
    }
}

impl std::fmt::Display for ColorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed { vmin, vmax } => write!(f, "fixed[{vmin}, {vmax}]"),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// 色标策略解析错误
#[derive(Debug, Clone, thiserror::Error)]
#[error("无效的色标策略: '{0}', 期望 'symmetric' 或 'asymmetric'")]
pub struct ColorPolicyParseError(String);

impl FromStr for ColorPolicy {
    type Err = ColorPolicyParseError;

    /// 仅解析自动策略；固定上下界通过 [`ColorPolicy::with_override`] 设置
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "symmetric" | "sym" | "diverging" => Ok(Self::SymmetricAutoscale),
            "asymmetric" | "asym" | "minmax" => Ok(Self::AsymmetricAutoscale),
            _ => Err(ColorPolicyParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_takes_precedence() {
        let policy = ColorPolicy::SymmetricAutoscale.with_override(Some(-1.0), Some(2.0));
        assert_eq!(policy, ColorPolicy::Fixed { vmin: -1.0, vmax: 2.0 });

        let partial = ColorPolicy::AsymmetricAutoscale.with_override(Some(-1.0), None);
        assert_eq!(partial, ColorPolicy::AsymmetricAutoscale);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "Symmetric".parse::<ColorPolicy>().unwrap(),
            ColorPolicy::SymmetricAutoscale
        );
        assert_eq!(
            "minmax".parse::<ColorPolicy>().unwrap(),
            ColorPolicy::AsymmetricAutoscale
        );
        assert!("fixed".parse::<ColorPolicy>().is_err());
    }

    #[test]
    fn test_serde_fixed() {
        let json = r#"{"policy":"fixed","vmin":-0.5,"vmax":0.5}"#;
        let parsed: ColorPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, ColorPolicy::Fixed { vmin: -0.5, vmax: 0.5 });
        assert_eq!(parsed.to_string(), "fixed[-0.5, 0.5]");
    }
}
