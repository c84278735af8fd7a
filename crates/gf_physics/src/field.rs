// crates/gf_physics/src/field.rs

//! 正演结果
//!
//! - [`FieldMap`]: 行优先的二维异常数组 [mGal]
//! - [`FieldResult`]: 平面图 + 剖面 + 色标上下界
//! - [`Computation`]: 区分“没有场源”与“场处处为零”

use serde::{Deserialize, Serialize};

use gf_foundation::error::{GfError, GfResult};
use gf_foundation::ensure;

use crate::color::ColorBounds;

/// 二维异常数组
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMap {
    nx: usize,
    ny: usize,
    values: Vec<f64>,
}

impl FieldMap {
    /// 全零数组
    pub(crate) fn zeros(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            values: vec![0.0; nx * ny],
        }
    }

    /// 由行优先数据创建
    pub fn from_values(nx: usize, ny: usize, values: Vec<f64>) -> GfResult<Self> {
        ensure!(
            values.len() == nx * ny,
            GfError::invalid_input(format!(
                "场数组大小不匹配: 期望 {}x{}={}, 实际 {}",
                nx,
                ny,
                nx * ny,
                values.len()
            ))
        );
        Ok(Self { nx, ny, values })
    }

    /// 列数（X 方向）
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// 行数（Y 方向）
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// 行优先的全部数值
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// 第 `(ix, iy)` 个值
    #[inline]
    pub fn get(&self, ix: usize, iy: usize) -> Option<f64> {
        if ix < self.nx && iy < self.ny {
            Some(self.values[iy * self.nx + ix])
        } else {
            None
        }
    }

    /// 第 `iy` 行
    pub fn row(&self, iy: usize) -> Option<&[f64]> {
        if iy < self.ny {
            Some(&self.values[iy * self.nx..(iy + 1) * self.nx])
        } else {
            None
        }
    }

    /// 最小值（忽略非有限值）
    pub fn min(&self) -> Option<f64> {
        self.finite().reduce(f64::min)
    }

    /// 最大值（忽略非有限值）
    pub fn max(&self) -> Option<f64> {
        self.finite().reduce(f64::max)
    }

    /// 最大绝对值（忽略非有限值）
    pub fn max_abs(&self) -> Option<f64> {
        self.finite().map(f64::abs).reduce(f64::max)
    }

    fn finite(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied().filter(|v| v.is_finite())
    }
}

/// 完整正演结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldResult {
    /// 平面异常 [mGal]
    pub map: FieldMap,
    /// 剖面异常 [mGal]
    pub profile: Vec<f64>,
    /// 色标上下界（仅用于展示）
    pub bounds: ColorBounds,
}

/// 正演计算结果
///
/// 没有场源时返回 `Empty` 而不是全零数组，以区分“无数据”与“场恰好为零”。
#[derive(Debug, Clone, PartialEq)]
pub enum Computation {
    /// 没有场源，未进行计算
    Empty,
    /// 计算完成
    Computed(FieldResult),
}

impl Computation {
    /// 是否为空结果
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// 引用计算结果
    pub fn result(&self) -> Option<&FieldResult> {
        match self {
            Self::Empty => None,
            Self::Computed(r) => Some(r),
        }
    }

    /// 取出计算结果
    pub fn into_result(self) -> Option<FieldResult> {
        match self {
            Self::Empty => None,
            Self::Computed(r) => Some(r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_checks_size() {
        assert!(FieldMap::from_values(2, 2, vec![0.0; 3]).is_err());
        let map = FieldMap::from_values(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(map.get(1, 0), Some(2.0));
        assert_eq!(map.get(0, 1), Some(3.0));
        assert_eq!(map.get(2, 0), None);
        assert_eq!(map.row(1), Some(&[3.0, 4.0][..]));
        assert_eq!(map.row(2), None);
    }

    #[test]
    fn test_extrema_skip_non_finite() {
        let map = FieldMap::from_values(2, 2, vec![-3.0, f64::NAN, 2.0, 1.0]).unwrap();
        assert_eq!(map.min(), Some(-3.0));
        assert_eq!(map.max(), Some(2.0));
        assert_eq!(map.max_abs(), Some(3.0));
    }

    #[test]
    fn test_empty_vs_zero() {
        let empty = Computation::Empty;
        assert!(empty.is_empty());
        assert!(empty.result().is_none());

        let zero = Computation::Computed(FieldResult {
            map: FieldMap::zeros(2, 2),
            profile: vec![0.0; 2],
            bounds: ColorBounds::new(-1e-12, 1e-12),
        });
        assert!(!zero.is_empty());
        assert_eq!(zero.into_result().unwrap().map.max(), Some(0.0));
    }
}
