// crates/gf_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `GfError` 枚举和 `GfResult` 类型别名，用于整个项目的错误处理。
//!
//! # 设计原则
//!
//! 1. **边界验证**: 场源与网格在进入正演核心之前完成全部验证；
//!    叠加器只在模型与场源不匹配（球体缺半径）时报错
//! 2. **易用性**: 提供便捷的构造方法
//! 3. **可追溯**: 支持错误链
//!
//! # 示例
//!
//! ```
//! use gf_foundation::error::{GfError, GfResult};
//!
//! fn check_depth(z: f64) -> GfResult<()> {
//!     if z <= 0.0 {
//!         return Err(GfError::invalid_depth("p1", z));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_depth(10.0).is_ok());
//! assert!(check_depth(0.0).is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// 统一结果类型
pub type GfResult<T> = Result<T, GfError>;

/// GravForward 错误类型
#[derive(Error, Debug)]
pub enum GfError {
    // ========================================================================
    // 场源验证错误
    // ========================================================================
    /// 深度无效（z <= 0）
    #[error("场源 '{name}' 深度无效: z={z}，深度必须 > 0（向下为正）")]
    InvalidDepth {
        /// 场源名称
        name: String,
        /// 输入深度 [m]
        z: f64,
    },

    /// 密度无效（rho == 0，严格模式下 rho <= 0）
    #[error("场源 '{name}' 密度无效: rho={rho}，{}", density_hint(.strict))]
    InvalidDensity {
        /// 场源名称
        name: String,
        /// 输入密度 [kg/m³]
        rho: f64,
        /// 是否为严格正密度策略
        strict: bool,
    },

    /// 半径无效（球体模型要求 radius > 0）
    #[error("场源 '{name}' 半径无效: {}", radius_hint(.radius))]
    InvalidRadius {
        /// 场源名称
        name: String,
        /// 输入半径 [m]，None 表示缺失
        radius: Option<f64>,
    },

    /// 非有限数值
    #[error("字段 {field} 不是有限数值: {value}")]
    NonFinite {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: f64,
    },

    /// 数值文本格式错误
    #[error("字段 {field} 需要数值，实际输入: '{text}'")]
    MalformedNumber {
        /// 字段名
        field: &'static str,
        /// 原始文本
        text: String,
    },

    // ========================================================================
    // 网格与索引错误
    // ========================================================================
    /// 观测网格无效
    #[error("观测网格无效: {message}")]
    InvalidGrid {
        /// 具体错误信息
        message: String,
    },

    /// 索引越界
    #[error("索引越界: {index_type} 索引 {index} 超出范围 0..{len}")]
    IndexOutOfBounds {
        /// 索引类别描述
        index_type: &'static str,
        /// 访问的索引
        index: usize,
        /// 上界（长度）
        len: usize,
    },

    // ========================================================================
    // IO 与解析错误
    // ========================================================================
    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 文件解析错误
    #[error("文件解析错误: {file} 第{line}行: {message}")]
    ParseError {
        /// 文件路径
        file: PathBuf,
        /// 行号
        line: usize,
        /// 错误信息
        message: String,
    },

    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },
}

fn density_hint(strict: &bool) -> &'static str {
    if *strict {
        "严格模式要求 rho > 0"
    } else {
        "rho 不能为 0"
    }
}

fn radius_hint(radius: &Option<f64>) -> String {
    match radius {
        Some(r) => format!("radius={r}，半径必须 > 0"),
        None => "球体模型需要提供半径".to_string(),
    }
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl GfError {
    /// 深度无效
    pub fn invalid_depth(name: impl Into<String>, z: f64) -> Self {
        Self::InvalidDepth {
            name: name.into(),
            z,
        }
    }

    /// 密度无效
    pub fn invalid_density(name: impl Into<String>, rho: f64, strict: bool) -> Self {
        Self::InvalidDensity {
            name: name.into(),
            rho,
            strict,
        }
    }

    /// 半径无效或缺失
    pub fn invalid_radius(name: impl Into<String>, radius: Option<f64>) -> Self {
        Self::InvalidRadius {
            name: name.into(),
            radius,
        }
    }

    /// 非有限数值
    pub fn non_finite(field: &'static str, value: f64) -> Self {
        Self::NonFinite { field, value }
    }

    /// 数值文本格式错误
    pub fn malformed_number(field: &'static str, text: impl Into<String>) -> Self {
        Self::MalformedNumber {
            field,
            text: text.into(),
        }
    }

    /// 网格无效
    pub fn invalid_grid(message: impl Into<String>) -> Self {
        Self::InvalidGrid {
            message: message.into(),
        }
    }

    /// 索引越界
    pub fn index_out_of_bounds(index_type: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            index_type,
            index,
            len,
        }
    }

    /// IO 错误（带源）
    pub fn io_with_source(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(source),
        }
    }

    /// 解析错误
    pub fn parse(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl GfError {
    /// 检查索引是否在范围内
    #[inline]
    pub fn check_index(index_type: &'static str, index: usize, len: usize) -> GfResult<()> {
        if index >= len {
            Err(Self::index_out_of_bounds(index_type, index, len))
        } else {
            Ok(())
        }
    }

    /// 检查数值是否有限
    #[inline]
    pub fn check_finite(field: &'static str, value: f64) -> GfResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::non_finite(field, value))
        }
    }
}

impl From<std::io::Error> for GfError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

// ========================================================================
// 验证宏
// ========================================================================

/// 条件不满足时提前返回错误
///
/// ```
/// use gf_foundation::{ensure, GfError, GfResult};
///
/// fn positive(v: f64) -> GfResult<f64> {
///     ensure!(v > 0.0, GfError::invalid_input("必须为正"));
///     Ok(v)
/// }
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_depth_display() {
        let err = GfError::invalid_depth("p1", -5.0);
        let msg = err.to_string();
        assert!(msg.contains("p1"));
        assert!(msg.contains("-5"));
    }

    #[test]
    fn test_invalid_density_display() {
        let lenient = GfError::invalid_density("a", 0.0, false);
        assert!(lenient.to_string().contains("不能为 0"));

        let strict = GfError::invalid_density("a", -200.0, true);
        assert!(strict.to_string().contains("rho > 0"));
    }

    #[test]
    fn test_invalid_radius_display() {
        let missing = GfError::invalid_radius("s", None);
        assert!(missing.to_string().contains("需要提供半径"));
        let negative = GfError::invalid_radius("s", Some(-1.0));
        assert!(negative.to_string().contains("-1"));
    }

    #[test]
    fn test_check_index() {
        assert!(GfError::check_index("source", 2, 3).is_ok());
        assert!(GfError::check_index("source", 3, 3).is_err());
    }

    #[test]
    fn test_check_finite() {
        assert!(GfError::check_finite("x", 1.0).is_ok());
        assert!(GfError::check_finite("x", f64::NAN).is_err());
        assert!(GfError::check_finite("x", f64::INFINITY).is_err());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: GfError = io_err.into();
        assert!(matches!(err, GfError::Io { .. }));
    }

    #[test]
    fn test_ensure_macro() {
        fn check(value: i32) -> GfResult<()> {
            ensure!(value > 0, GfError::invalid_input("value must be positive"));
            Ok(())
        }

        assert!(check(1).is_ok());
        assert!(check(-1).is_err());
    }
}
