// crates/gf_physics/src/analysis.rs

//! 异常场分析：阈值检测与统计摘要

use serde::Serialize;

use gf_foundation::float::KahanSum;

use crate::field::FieldMap;
use crate::grid::ObservationGrid;

/// 超过阈值的网格点
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Detection {
    /// 列索引
    pub ix: usize,
    /// 行索引
    pub iy: usize,
    /// X 坐标 [m]
    pub x: f64,
    /// Y 坐标 [m]
    pub y: f64,
    /// 异常值 [mGal]
    pub value: f64,
}

/// 返回所有 `value >= threshold` 的网格点，按行优先顺序
///
/// `map` 与 `grid` 形状不一致时多余部分被忽略。
pub fn detect_peaks(map: &FieldMap, grid: &ObservationGrid, threshold: f64) -> Vec<Detection> {
    let mut hits = Vec::new();
    for iy in 0..map.ny() {
        let Some(row) = map.row(iy) else { break };
        for (ix, &value) in row.iter().enumerate() {
            if value < threshold || value.is_nan() {
                continue;
            }
            if let Some((x, y)) = grid.point(ix, iy) {
                hits.push(Detection { ix, iy, x, y, value });
            }
        }
    }
    hits
}

/// 场统计摘要
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldStats {
    /// 最小值 [mGal]
    pub min: f64,
    /// 最大值 [mGal]
    pub max: f64,
    /// 平均值 [mGal]
    pub mean: f64,
    /// 最大值所在位置 `(x, y)` [m]
    pub peak: (f64, f64),
    /// 参与统计的有限值个数
    pub count: usize,
}

impl FieldStats {
    /// 统计有限值；没有有限值时返回 `None`
    pub fn of(map: &FieldMap, grid: &ObservationGrid) -> Option<Self> {
        let mut sum = KahanSum::new();
        let mut count = 0usize;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut argmax = (0, 0);

        for iy in 0..map.ny() {
            let row = map.row(iy)?;
            for (ix, &v) in row.iter().enumerate() {
                if !v.is_finite() {
                    continue;
                }
                sum.add(v);
                count += 1;
                min = min.min(v);
                if v > max {
                    max = v;
                    argmax = (ix, iy);
                }
            }
        }

        if count == 0 {
            return None;
        }
        let peak = grid.point(argmax.0, argmax.1)?;
        Some(Self {
            min,
            max,
            mean: sum.value() / count as f64,
            peak,
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (FieldMap, ObservationGrid) {
        let grid = ObservationGrid::symmetric(10.0, 3).unwrap();
        let map = FieldMap::from_values(
            3,
            3,
            vec![0.0, 1.0, 0.0, 1.0, 4.0, 2.0, 0.0, 3.0, f64::NAN],
        )
        .unwrap();
        (map, grid)
    }

    #[test]
    fn test_detect_peaks_threshold_inclusive() {
        let (map, grid) = sample();
        let hits = detect_peaks(&map, &grid, 2.0);
        assert_eq!(hits.len(), 3);
        assert_eq!((hits[0].ix, hits[0].iy), (1, 1));
        assert_eq!((hits[0].x, hits[0].y), (0.0, 0.0));
        assert_eq!(hits[1].value, 2.0);
        assert_eq!((hits[2].x, hits[2].y), (0.0, 10.0));
    }

    #[test]
    fn test_detect_peaks_none_above() {
        let (map, grid) = sample();
        assert!(detect_peaks(&map, &grid, 100.0).is_empty());
    }

    #[test]
    fn test_stats() {
        let (map, grid) = sample();
        let stats = FieldStats::of(&map, &grid).unwrap();
        assert_eq!(stats.count, 8);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 4.0);
        assert!((stats.mean - 11.0 / 8.0).abs() < 1e-15);
        assert_eq!(stats.peak, (0.0, 0.0));
    }

    #[test]
    fn test_stats_all_nan() {
        let grid = ObservationGrid::symmetric(1.0, 2).unwrap();
        let map = FieldMap::from_values(2, 2, vec![f64::NAN; 4]).unwrap();
        assert!(FieldStats::of(&map, &grid).is_none());
    }
}
