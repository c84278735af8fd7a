// crates/gf_physics/src/lib.rs

//! 重力正演核心
//!
//! 提供点质量 / 均匀球体场源的垂向重力异常计算，包括：
//! - 核函数 (kernel) - 单源异常公式与向量化求值
//! - 场源管理 (source) - 场源定义、边界校验、有序集合
//! - 观测几何 (grid) - 观测网格与剖面
//! - 场叠加 (aggregator) - 多源线性叠加，可按行并行
//! - 结果与色标 (field, color)
//! - 分析 (analysis) - 阈值检测、统计摘要
//!
//! # 示例
//!
//! ```
//! use gf_physics::prelude::*;
//!
//! let mut sources = SourceCollection::new(SourceRules::default());
//! sources.add(Source::new("p1", 0.0, 10.0, 2000.0)).unwrap();
//!
//! let grid = ObservationGrid::symmetric(100.0, 3).unwrap();
//! let result = FieldAggregator::default().compute(&sources, &grid).unwrap();
//! assert!(!result.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregator;
pub mod analysis;
pub mod color;
pub mod constants;
pub mod field;
pub mod grid;
pub mod kernel;
pub mod source;

/// 层级标识
pub const LAYER: u8 = 2;

// 重导出常用类型
pub use aggregator::FieldAggregator;
pub use analysis::{detect_peaks, Detection, FieldStats};
pub use color::{derive_color_bounds, ColorBounds};
pub use field::{Computation, FieldMap, FieldResult};
pub use grid::{linspace, ObservationGrid, ObservationProfile};
pub use kernel::AnomalyKernel;
pub use source::{inspect_sources, Source, SourceCollection, SourceInput, SourceRules};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::aggregator::FieldAggregator;
    pub use crate::field::{Computation, FieldMap, FieldResult};
    pub use crate::grid::{ObservationGrid, ObservationProfile};
    pub use crate::kernel::AnomalyKernel;
    pub use crate::source::{Source, SourceCollection, SourceRules};
    pub use gf_config::{ColorPolicy, DensityPolicy, ModelKind};
}
