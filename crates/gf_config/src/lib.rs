// crates/gf_config/src/lib.rs

//! GravForward Config Layer (Layer 1)
//!
//! 配置层，提供正演模型、色标策略、密度策略和观测网格参数。
//!
//! # 模块概览
//!
//! - [`model`]: ModelKind 枚举（点质量 / 球体）
//! - [`color`]: ColorPolicy 色标范围策略
//! - [`density`]: DensityPolicy 密度验证策略
//! - [`forward_config`]: ForwardConfig 正演配置
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! Layer 4: gf_cli        ─> uses ForwardConfig
//! Layer 3: gf_io         ─> CSV import/export
//! Layer 2: gf_physics    ─> AnomalyKernel, FieldAggregator
//! Layer 1: gf_config     ─> ModelKind, ColorPolicy, ForwardConfig (本层)
//! Layer 0: gf_foundation
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod color;
pub mod density;
pub mod error;
pub mod forward_config;
pub mod model;

/// 层级标识
pub const LAYER: u8 = 1;

// 重导出核心类型
pub use color::ColorPolicy;
pub use density::DensityPolicy;
pub use error::ConfigError;
pub use forward_config::{
    ForwardConfig, GridConfig, ParallelConfig, DEFAULT_GRAVITATIONAL_CONSTANT,
};
pub use model::ModelKind;
