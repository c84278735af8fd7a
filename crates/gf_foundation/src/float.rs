// crates/gf_foundation/src/float.rs

//! 浮点数工具
//!
//! 提供相对容差比较、严格数值解析以及 Kahan 求和。
//!
//! # 示例
//!
//! ```
//! use gf_foundation::float::{approx_eq_rel, parse_f64};
//!
//! let v = parse_f64("rho", " 2000 ").unwrap();
//! assert!(approx_eq_rel(v, 2000.0, 1e-12));
//! assert!(parse_f64("rho", "abc").is_err());
//! ```

use crate::error::{GfError, GfResult};

// ============================================================================
// 辅助函数
// ============================================================================

/// 检查浮点数是否有效（有限）
#[inline]
pub fn is_valid_f64(x: f64) -> bool {
    x.is_finite()
}

/// 相对容差比较
///
/// `|a - b| <= rel_tol * max(|a|, |b|)`；两者均为 0 时视为相等。
#[inline]
pub fn approx_eq_rel(a: f64, b: f64, rel_tol: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= rel_tol * scale
}

/// 严格解析数值文本
///
/// 去除首尾空白后解析；空串、非数字文本与非有限值（`NaN`、`inf`）都被拒绝。
pub fn parse_f64(field: &'static str, text: &str) -> GfResult<f64> {
    let trimmed = text.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| GfError::malformed_number(field, trimmed))?;
    if !value.is_finite() {
        return Err(GfError::non_finite(field, value));
    }
    Ok(value)
}

// ============================================================================
// Kahan 求和算法
// ============================================================================

/// Kahan 求和器
///
/// 维护补偿项以减少大量累加时的舍入误差，用于场统计量。
///
/// ```
/// use gf_foundation::float::KahanSum;
///
/// let mut sum = KahanSum::new();
/// for _ in 0..10000 {
///     sum.add(0.1);
/// }
/// assert!((sum.value() - 1000.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KahanSum {
    sum: f64,
    compensation: f64,
}

impl KahanSum {
    /// 创建零值求和器
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加一个值
    #[inline]
    pub fn add(&mut self, value: f64) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    /// 当前累加值
    #[inline]
    pub fn value(&self) -> f64 {
        self.sum
    }
}

impl FromIterator<f64> for KahanSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut sum = Self::new();
        for v in iter {
            sum.add(v);
        }
        sum
    }
}
