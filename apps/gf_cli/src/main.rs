// apps/gf_cli/src/main.rs

//! GravForward 命令行界面
//!
//! 从场源表计算点质量 / 球体模型的垂向重力异常，并导出网格与剖面。
//!
//! # 架构层级
//!
//! 本模块属于 **Layer 4: Application**，只负责参数解析、日志初始化和文件读写，
//! 计算全部委托给 `gf_physics`。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// GravForward 重力正演命令行工具
#[derive(Parser)]
#[command(name = "gf_cli")]
#[command(author = "GravForward Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Forward gravity modelling for point-mass and sphere sources", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 计算重力异常
    Run(commands::run::RunArgs),
    /// 检查配置与场源表
    Validate(commands::validate::ValidateArgs),
    /// 显示版本与默认配置
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Info(args) => commands::info::execute(args),
    }
}
