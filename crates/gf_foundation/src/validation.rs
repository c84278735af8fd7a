// crates/gf_foundation/src/validation.rs

//! 运行时验证工具
//!
//! 提供验证报告和错误/警告类型，用于场源列表与配置的批量检查。
//! 与 [`GfError`](crate::error::GfError) 的区别：报告会收集全部问题，
//! 而不是在第一个错误处返回。
//!
//! # 示例
//!
//! ```
//! use gf_foundation::validation::{ValidationReport, ValidationError};
//!
//! let depth = -1.0f64;
//! let mut report = ValidationReport::new();
//! if depth <= 0.0 {
//!     report.add_error(ValidationError::OutOfRange {
//!         field: "z",
//!         source_id: 0,
//!         value: depth,
//!         min: 0.0,
//!         max: f64::INFINITY,
//!     });
//! }
//!
//! assert!(report.has_errors());
//! ```

use serde::Serialize;
use std::fmt;

/// 验证报告
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    /// 错误列表
    pub errors: Vec<ValidationError>,
    /// 警告列表
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// 创建空的验证报告
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加错误
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 是否有警告
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// 错误数量
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// 警告数量
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// 是否通过（无错误）
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// 严格模式是否通过（无错误且无警告）
    pub fn is_valid_strict(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    /// 合并另一个报告
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "验证报告:")?;
        writeln!(f, "  错误: {} 个", self.error_count())?;
        writeln!(f, "  警告: {} 个", self.warning_count())?;

        if self.has_errors() {
            writeln!(f, "\n错误详情:")?;
            for (i, err) in self.errors.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, err)?;
            }
        }

        if self.has_warnings() {
            writeln!(f, "\n警告详情:")?;
            for (i, warn) in self.warnings.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, warn)?;
            }
        }

        Ok(())
    }
}

/// 验证错误类型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// 非有限值
    NonFinite {
        /// 字段名称
        field: &'static str,
        /// 场源序号
        source_id: usize,
        /// 非有限的数值
        value: f64,
    },
    /// 数据超出范围
    OutOfRange {
        /// 字段名称
        field: &'static str,
        /// 场源序号
        source_id: usize,
        /// 实际值
        value: f64,
        /// 下界（不含）
        min: f64,
        /// 上界
        max: f64,
    },
    /// 行级解析错误
    Parse {
        /// 行号（从 1 开始）
        line: usize,
        /// 错误描述
        message: String,
    },
    /// 自定义错误
    Custom {
        /// 自定义消息
        message: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite {
                field,
                source_id,
                value,
            } => {
                write!(f, "场源{}: 字段{}={} (非有限值)", source_id, field, value)
            }
            Self::OutOfRange {
                field,
                source_id,
                value,
                min,
                max,
            } => {
                write!(
                    f,
                    "场源{}: 字段{}={} 超出范围({}, {}]",
                    source_id, field, value, min, max
                )
            }
            Self::Parse { line, message } => write!(f, "第{}行: {}", line, message),
            Self::Custom { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ValidationError {}

/// 验证警告类型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationWarning {
    /// 负密度差（物理上合法的亏损体）
    NegativeDensity {
        /// 场源序号
        source_id: usize,
        /// 密度差 [kg/m³]
        rho: f64,
    },
    /// 场源过浅（深度小于网格间距，异常会被网格欠采样）
    Shallow {
        /// 场源序号
        source_id: usize,
        /// 深度 [m]
        z: f64,
        /// 网格间距 [m]
        spacing: f64,
    },
    /// 场源位于观测范围之外
    OutsideGrid {
        /// 场源序号
        source_id: usize,
        /// 水平位置 [m]
        x: f64,
        /// 水平位置 [m]
        y: f64,
    },
    /// 名称重复
    DuplicateName {
        /// 场源序号
        source_id: usize,
        /// 重复的名称
        name: String,
    },
    /// 自定义警告
    Custom {
        /// 自定义消息
        message: String,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeDensity { source_id, rho } => {
                write!(f, "场源{}: 负密度差 rho={} (亏损体)", source_id, rho)
            }
            Self::Shallow {
                source_id,
                z,
                spacing,
            } => {
                write!(
                    f,
                    "场源{}: 深度 z={} 小于网格间距 {}，峰值可能欠采样",
                    source_id, z, spacing
                )
            }
            Self::OutsideGrid { source_id, x, y } => {
                write!(f, "场源{}: 位置 ({}, {}) 位于观测网格之外", source_id, x, y)
            }
            Self::DuplicateName { source_id, name } => {
                write!(f, "场源{}: 名称 '{}' 重复", source_id, name)
            }
            Self::Custom { message } => write!(f, "{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = ValidationReport::new();
        assert!(report.is_valid());
        assert!(report.is_valid_strict());
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn test_warning_only_report() {
        let mut report = ValidationReport::new();
        report.add_warning(ValidationWarning::NegativeDensity {
            source_id: 1,
            rho: -300.0,
        });
        assert!(report.is_valid());
        assert!(!report.is_valid_strict());
        assert!(report.to_string().contains("负密度差"));
    }

    #[test]
    fn test_merge() {
        let mut a = ValidationReport::new();
        a.add_error(ValidationError::Parse {
            line: 3,
            message: "列数不足".into(),
        });
        let mut b = ValidationReport::new();
        b.add_error(ValidationError::Custom {
            message: "x".into(),
        });
        b.add_warning(ValidationWarning::Custom {
            message: "w".into(),
        });
        a.merge(b);
        assert_eq!(a.error_count(), 2);
        assert_eq!(a.warning_count(), 1);
        assert!(a.to_string().contains("第3行"));
    }
}
