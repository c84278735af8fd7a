// crates/gf_physics/src/color.rs

//! 色标上下界推导
//!
//! 只影响展示，不改变场值。NaN 等非有限值在自动缩放时被忽略。

use serde::{Deserialize, Serialize};

use gf_config::ColorPolicy;
use gf_foundation::float::is_valid_f64;

use crate::constants::COLOR_RANGE_EPSILON;

/// 色标上下界 [mGal]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorBounds {
    /// 下界
    pub vmin: f64,
    /// 上界
    pub vmax: f64,
}

impl ColorBounds {
    /// 创建
    pub const fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// 是否关于 0 对称
    pub fn is_symmetric(&self) -> bool {
        self.vmin == -self.vmax
    }
}

/// 按策略推导色标上下界
///
/// - 非对称：`[min, max]`，两者相等时各展宽 `max(1e-12, 4·ε·|v|)`
/// - 对称：`[-M, M]`，`M = max|v|`，`M == 0` 时取 `1e-12`
/// - 固定：直接使用给定值
///
/// 没有有限值时按全零场处理。
pub fn derive_color_bounds(values: &[f64], policy: &ColorPolicy) -> ColorBounds {
    match *policy {
        ColorPolicy::Fixed { vmin, vmax } => ColorBounds::new(vmin, vmax),
        ColorPolicy::AsymmetricAutoscale => {
            let (lo, hi) = finite_extrema(values).unwrap_or((0.0, 0.0));
            if lo == hi {
                // 大数值下绝对展宽不足一个 ulp
                let eps = COLOR_RANGE_EPSILON.max(lo.abs() * f64::EPSILON * 4.0);
                ColorBounds::new(lo - eps, hi + eps)
            } else {
                ColorBounds::new(lo, hi)
            }
        }
        ColorPolicy::SymmetricAutoscale => {
            let m = finite_extrema(values)
                .map(|(lo, hi)| lo.abs().max(hi.abs()))
                .unwrap_or(0.0);
            let m = if m == 0.0 { COLOR_RANGE_EPSILON } else { m };
            ColorBounds::new(-m, m)
        }
    }
}

fn finite_extrema(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| is_valid_f64(*v))
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
