// crates/gf_io/src/error.rs
//! IO 错误类型定义
//!
//! 所有错误最终可转换为 GfError 以实现跨层错误传递。

use thiserror::Error;
use gf_foundation::GfError;

/// IO 模块结果类型别名
pub type IoResult<T> = Result<T, IoError>;

/// IO 错误枚举
#[derive(Error, Debug)]
pub enum IoError {
    /// 读取文件失败
    #[error("无法读取文件 {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// 写入文件失败
    #[error("无法写入文件 {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    /// 写出流失败
    #[error("写出失败: {0}")]
    Stream(#[from] std::io::Error),

    /// CSV 读写失败
    #[error("CSV 错误: {0}")]
    Csv(#[from] csv::Error),

    /// 表头缺少必需列
    #[error("缺少必需列 '{column}'，表头: {header}")]
    MissingColumn {
        column: &'static str,
        header: String,
    },

    /// 解析错误
    #[error("文件解析错误: {file}:{line} - {message}")]
    ParseError {
        file: String,
        line: usize,
        message: String,
    },

    /// 基础层错误转换
    #[error("基础层错误: {0}")]
    Foundation(#[from] GfError),
}

impl IoError {
    pub(crate) fn read(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn write(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Write {
            path: path.display().to_string(),
            source,
        }
    }
}

impl From<IoError> for GfError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::Read { path, source } => {
                GfError::io_with_source(format!("无法读取文件 {path}"), source)
            }
            IoError::Write { path, source } => {
                GfError::io_with_source(format!("无法写入文件 {path}"), source)
            }
            IoError::Stream(source) => GfError::io_with_source("写出失败", source),
            IoError::Csv(e) => GfError::invalid_input(format!("CSV 错误: {e}")),
            IoError::MissingColumn { column, header } => {
                GfError::invalid_input(format!("缺少必需列 '{column}'，表头: {header}"))
            }
            IoError::ParseError { file, line, message } => GfError::parse(file, line, message),
            IoError::Foundation(gf_err) => gf_err,
        }
    }
}
