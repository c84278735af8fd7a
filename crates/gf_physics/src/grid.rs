// crates/gf_physics/src/grid.rs

//! 观测网格与观测剖面
//!
//! 网格各轴均匀采样且包含两端点（与 `linspace` 一致）。网格值按行优先存储：
//! 第 `iy` 行对应 `y_axis[iy]`，行内第 `ix` 个值对应 `x_axis[ix]`。
//!
//! # 示例
//!
//! ```
//! use gf_physics::grid::ObservationGrid;
//!
//! let grid = ObservationGrid::symmetric(100.0, 3).unwrap();
//! assert_eq!(grid.x_axis(), vec![-100.0, 0.0, 100.0]);
//! assert_eq!(grid.len(), 9);
//! ```

use serde::{Deserialize, Serialize};

use gf_config::GridConfig;
use gf_foundation::error::{GfError, GfResult};

/// 等间距采样，包含两端点
///
/// `n == 1` 时返回 `[start]`，`n == 0` 时返回空数组。
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + i as f64 * step })
                .collect()
        }
    }
}

/// 二维观测网格
///
/// 反序列化同样经过 [`ObservationGrid::with_bounds`] 校验。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridBounds")]
pub struct ObservationGrid {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    nx: usize,
    ny: usize,
}

impl ObservationGrid {
    /// 关于原点对称的方形网格 `[-extent, extent]²`
    pub fn symmetric(extent: f64, resolution: usize) -> GfResult<Self> {
        if !extent.is_finite() || extent <= 0.0 {
            return Err(GfError::invalid_grid(format!(
                "半宽必须为正的有限值，实际 {extent}"
            )));
        }
        Self::with_bounds((-extent, extent), (-extent, extent), resolution, resolution)
    }

    /// 任意矩形网格
    pub fn with_bounds(
        x_range: (f64, f64),
        y_range: (f64, f64),
        nx: usize,
        ny: usize,
    ) -> GfResult<Self> {
        if nx < 2 || ny < 2 {
            return Err(GfError::invalid_grid(format!(
                "每轴采样点数必须 >= 2，实际 nx={nx}, ny={ny}"
            )));
        }
        for (axis, (lo, hi)) in [("x", x_range), ("y", y_range)] {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(GfError::invalid_grid(format!("{axis} 轴范围必须为有限值")));
            }
            if lo >= hi {
                return Err(GfError::invalid_grid(format!(
                    "{axis} 轴范围无效: [{lo}, {hi}]"
                )));
            }
        }
        Ok(Self {
            x_min: x_range.0,
            x_max: x_range.1,
            y_min: y_range.0,
            y_max: y_range.1,
            nx,
            ny,
        })
    }

    /// 从配置创建
    pub fn from_config(config: &GridConfig) -> GfResult<Self> {
        Self::symmetric(config.extent, config.resolution)
    }

    /// X 方向采样点数
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Y 方向采样点数
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// 网格点总数
    #[inline]
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    /// 网格是否为空（构造保证非空）
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 显示范围 `[x_min, x_max, y_min, y_max]`
    pub fn bounds(&self) -> [f64; 4] {
        [self.x_min, self.x_max, self.y_min, self.y_max]
    }

    /// X 轴坐标
    pub fn x_axis(&self) -> Vec<f64> {
        linspace(self.x_min, self.x_max, self.nx)
    }

    /// Y 轴坐标
    pub fn y_axis(&self) -> Vec<f64> {
        linspace(self.y_min, self.y_max, self.ny)
    }

    /// 采样间距 `(dx, dy)`
    pub fn spacing(&self) -> (f64, f64) {
        (
            (self.x_max - self.x_min) / (self.nx - 1) as f64,
            (self.y_max - self.y_min) / (self.ny - 1) as f64,
        )
    }

    /// 网格坐标矩阵 `(X, Y)`，行优先，各 `nx * ny` 个值
    pub fn meshgrid(&self) -> (Vec<f64>, Vec<f64>) {
        let xs = self.x_axis();
        let ys = self.y_axis();
        let mut gx = Vec::with_capacity(self.len());
        let mut gy = Vec::with_capacity(self.len());
        for &y in &ys {
            gx.extend_from_slice(&xs);
            gy.extend(std::iter::repeat(y).take(self.nx));
        }
        (gx, gy)
    }

    /// 第 `(ix, iy)` 个网格点的坐标
    pub fn point(&self, ix: usize, iy: usize) -> Option<(f64, f64)> {
        if ix >= self.nx || iy >= self.ny {
            return None;
        }
        let (dx, dy) = self.spacing();
        let x = if ix == self.nx - 1 { self.x_max } else { self.x_min + ix as f64 * dx };
        let y = if iy == self.ny - 1 { self.y_max } else { self.y_min + iy as f64 * dy };
        Some((x, y))
    }

    /// 水平位置是否位于网格范围内（含边界）
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

/// 未校验的网格参数
#[derive(Deserialize)]
struct GridBounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    nx: usize,
    ny: usize,
}

impl TryFrom<GridBounds> for ObservationGrid {
    type Error = GfError;

    fn try_from(raw: GridBounds) -> GfResult<Self> {
        Self::with_bounds((raw.x_min, raw.x_max), (raw.y_min, raw.y_max), raw.nx, raw.ny)
    }
}

/// 一维观测剖面
///
/// 约定沿 X 轴、位于固定横向坐标 `y` 上，通常与网格共用 X 轴。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationProfile {
    x: Vec<f64>,
    y: f64,
}

impl ObservationProfile {
    /// 与网格共用 X 轴，位于 `y = 0`
    pub fn along_x(grid: &ObservationGrid) -> Self {
        Self::at_y(grid, 0.0)
    }

    /// 与网格共用 X 轴，位于给定 `y`
    pub fn at_y(grid: &ObservationGrid, y: f64) -> Self {
        Self {
            x: grid.x_axis(),
            y,
        }
    }

    /// X 坐标
    #[inline]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// 横向坐标
    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// 采样点数
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(-200.0, 200.0, 7);
        assert_eq!(v.len(), 7);
        assert_eq!(v[0], -200.0);
        assert_eq!(v[6], 200.0);
        assert!((v[3]).abs() < 1e-12);
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
        assert!(linspace(1.0, 2.0, 0).is_empty());
    }

    #[test]
    fn test_symmetric_grid() {
        let grid = ObservationGrid::symmetric(100.0, 3).unwrap();
        assert_eq!(grid.x_axis(), vec![-100.0, 0.0, 100.0]);
        assert_eq!(grid.y_axis(), vec![-100.0, 0.0, 100.0]);
        assert_eq!(grid.spacing(), (100.0, 100.0));
        assert_eq!(grid.bounds(), [-100.0, 100.0, -100.0, 100.0]);
    }

    #[test]
    fn test_rejects_degenerate_grid() {
        assert!(ObservationGrid::symmetric(100.0, 1).is_err());
        assert!(ObservationGrid::symmetric(0.0, 10).is_err());
        assert!(ObservationGrid::symmetric(-5.0, 10).is_err());
        assert!(ObservationGrid::symmetric(f64::NAN, 10).is_err());
        assert!(ObservationGrid::with_bounds((1.0, 0.0), (0.0, 1.0), 3, 3).is_err());
    }

    #[test]
    fn test_meshgrid_row_major() {
        let grid = ObservationGrid::with_bounds((0.0, 2.0), (10.0, 11.0), 3, 2).unwrap();
        let (gx, gy) = grid.meshgrid();
        assert_eq!(gx, vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
        assert_eq!(gy, vec![10.0, 10.0, 10.0, 11.0, 11.0, 11.0]);
        assert_eq!(grid.point(2, 1), Some((2.0, 11.0)));
        assert_eq!(grid.point(3, 0), None);
    }

    #[test]
    fn test_contains() {
        let grid = ObservationGrid::symmetric(50.0, 5).unwrap();
        assert!(grid.contains(50.0, -50.0));
        assert!(!grid.contains(50.1, 0.0));
    }

    #[test]
    fn test_profile_shares_x_axis() {
        let grid = ObservationGrid::symmetric(100.0, 5).unwrap();
        let profile = ObservationProfile::along_x(&grid);
        assert_eq!(profile.x(), grid.x_axis().as_slice());
        assert_eq!(profile.y(), 0.0);
        assert_eq!(profile.len(), 5);

        let shifted = ObservationProfile::at_y(&grid, 25.0);
        assert_eq!(shifted.y(), 25.0);
    }

    #[test]
    fn test_deserialize_validates() {
        let grid = ObservationGrid::with_bounds((-10.0, 10.0), (0.0, 5.0), 4, 3).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: ObservationGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);

        let bad = r#"{"x_min":0,"x_max":1,"y_min":0,"y_max":1,"nx":0,"ny":3}"#;
        assert!(serde_json::from_str::<ObservationGrid>(bad).is_err());
        let inverted = r#"{"x_min":1,"x_max":0,"y_min":0,"y_max":1,"nx":3,"ny":3}"#;
        assert!(serde_json::from_str::<ObservationGrid>(inverted).is_err());
    }
}
