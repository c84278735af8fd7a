// apps/gf_cli/src/commands/mod.rs

//! 子命令实现

pub mod info;
pub mod run;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use gf_config::ForwardConfig;
use tracing::info;

/// 读取配置文件；未给出时使用默认配置
pub(crate) fn load_config(path: Option<&Path>) -> Result<ForwardConfig> {
    match path {
        Some(path) => {
            let config = ForwardConfig::from_file(path)
                .with_context(|| format!("无法加载配置文件 {}", path.display()))?;
            info!("已加载配置: {}", path.display());
            Ok(config)
        }
        None => Ok(ForwardConfig::default()),
    }
}
