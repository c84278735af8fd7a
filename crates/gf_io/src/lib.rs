// crates/gf_io/src/lib.rs

//! GravForward IO 模块
//!
//! 提供场源表与计算结果的文件读写。
//!
//! # 模块
//!
//! - [`sources_csv`]: 场源表导入导出（CSV / TXT）
//! - [`grid_export`]: 网格 XYZ 与剖面 CSV 导出
//! - [`error`]: IO 错误类型
//!
//! # 使用示例
//!
//! ```rust,ignore
//! use gf_io::sources_csv::{load_sources, CsvOptions};
//!
//! let report = load_sources(Path::new("sources.csv"), &CsvOptions::default())?;
//! collection.extend_validated(report.sources)?;
//! ```

pub mod error;
pub mod grid_export;
pub mod sources_csv;

// 重导出常用类型
pub use error::{IoError, IoResult};
pub use grid_export::{save_grid_xyz, save_profile, write_grid_xyz, write_profile};
pub use sources_csv::{
    load_sources, parse_sources, save_sources, write_sources, CsvOptions, Delimiter, ImportReport,
    SkippedRow,
};
