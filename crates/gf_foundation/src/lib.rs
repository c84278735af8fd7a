// crates/gf_foundation/src/lib.rs

//! GravForward Foundation Layer
//!
//! 基础层，提供整个项目的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型
//! - [`float`]: 浮点工具与严格数值解析
//! - [`validation`]: 批量验证报告
//!
//! # 设计原则
//!
//! 1. **最少依赖**: 仅依赖 serde 和 thiserror
//! 2. **边界验证**: 所有输入在进入计算核心前完成验证
//!
//! # 示例
//!
//! ```
//! use gf_foundation::{GfError, GfResult};
//!
//! fn density(rho: f64) -> GfResult<f64> {
//!     gf_foundation::ensure!(rho != 0.0, GfError::invalid_density("p1", rho, false));
//!     Ok(rho)
//! }
//! assert!(density(0.0).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod float;
pub mod validation;

// 重导出常用类型
pub use error::{GfError, GfResult};
pub use float::KahanSum;
pub use validation::{ValidationError, ValidationReport, ValidationWarning};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{GfError, GfResult};
    pub use crate::float::{approx_eq_rel, parse_f64, KahanSum};
    pub use crate::validation::{ValidationError, ValidationReport, ValidationWarning};
    pub use crate::ensure;
}
