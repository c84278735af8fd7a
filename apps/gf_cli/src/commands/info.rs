// apps/gf_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示版本、常量和配置信息。

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use gf_config::ForwardConfig;
use gf_physics::constants::{COLOR_RANGE_EPSILON, DENOMINATOR_EPSILON, G_SI, SI_TO_MGAL};

use super::load_config;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 配置文件路径（显示其生效值）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 显示默认配置
    #[arg(long)]
    pub defaults: bool,

    /// 以 JSON 输出配置
    #[arg(long)]
    pub json: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== GravForward 信息 ===");

    if args.config.is_none() && !args.defaults {
        print_version();
        println!();
    }

    let config = if args.defaults {
        ForwardConfig::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print_config(&config);
    }

    Ok(())
}

fn print_version() {
    println!("=== 版本信息 ===");
    println!("GravForward CLI 版本: {}", env!("CARGO_PKG_VERSION"));
    println!("目标平台: {}", std::env::consts::ARCH);
    println!("操作系统: {}", std::env::consts::OS);
    println!("可用线程: {}", available_threads());

    println!("\n常量:");
    println!("  G = {:e} m³ kg⁻¹ s⁻²", G_SI);
    println!("  m/s² → mGal: ×{:e}", SI_TO_MGAL);
    println!("  分母钳位: {:e}", DENOMINATOR_EPSILON);
    println!("  色标展宽: {:e} mGal", COLOR_RANGE_EPSILON);
}

fn available_threads() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

fn print_config(config: &ForwardConfig) {
    println!("=== 配置 ===");
    println!("模型: {}", config.model);
    println!("色标策略: {}", config.color);
    println!("密度策略: {:?}", config.density);
    println!(
        "网格: 半宽 {} m, {}x{} 点",
        config.grid.extent, config.grid.resolution, config.grid.resolution
    );
    println!("万有引力常数: {:e}", config.gravitational_constant);
    println!(
        "并行: {} (阈值 {} 点)",
        if config.parallel.enabled { "启用" } else { "禁用" },
        config.parallel.min_points
    );
}
