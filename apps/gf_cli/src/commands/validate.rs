// apps/gf_cli/src/commands/validate.rs

//! 检查命令
//!
//! 检查配置文件与场源表，输出验证报告。

use anyhow::{bail, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use gf_config::ForwardConfig;
use gf_foundation::{ValidationError, ValidationReport};
use gf_io::{load_sources, CsvOptions};
use gf_physics::{inspect_sources, ObservationGrid, SourceRules};

/// 检查参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 场源表路径
    #[arg(short, long)]
    pub sources: Option<PathBuf>,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,

    /// 以 JSON 输出报告
    #[arg(long)]
    pub json: bool,
}

/// 执行检查命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== GravForward 输入检查 ===");

    if args.config.is_none() && args.sources.is_none() {
        println!("用法: gf_cli validate --sources <场源表> [--config <配置文件>]");
        println!("      gf_cli validate --config <配置文件>");
        return Ok(());
    }

    let mut report = ValidationReport::new();
    let config = check_config(args.config.as_deref(), &mut report);

    if let Some(path) = &args.sources {
        check_sources(path, &config, &mut report);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    let success = if args.strict {
        report.is_valid_strict()
    } else {
        report.is_valid()
    };
    if success {
        if !args.json {
            println!("\n✓ 检查通过");
        }
        Ok(())
    } else {
        bail!(
            "检查失败：发现 {} 个错误，{} 个警告",
            report.error_count(),
            report.warning_count()
        )
    }
}

/// 配置无法加载时记录错误并回退到默认配置，以便继续检查场源表
fn check_config(path: Option<&Path>, report: &mut ValidationReport) -> ForwardConfig {
    let Some(path) = path else {
        return ForwardConfig::default();
    };
    match ForwardConfig::from_file(path) {
        Ok(config) => {
            info!("配置文件有效: {}", path.display());
            config
        }
        Err(e) => {
            report.add_error(ValidationError::Custom {
                message: format!("配置文件 {}: {}", path.display(), e),
            });
            ForwardConfig::default()
        }
    }
}

fn check_sources(path: &Path, config: &ForwardConfig, report: &mut ValidationReport) {
    let rules = SourceRules::from_config(config);

    // 无效行按行号报告，其余场源再检查警告项
    let options = CsvOptions::default().with_rules(rules);
    let imported = match load_sources(path, &options) {
        Ok(imported) => imported,
        Err(e) => {
            report.add_error(ValidationError::Custom {
                message: e.to_string(),
            });
            return;
        }
    };

    for row in &imported.skipped {
        report.add_error(ValidationError::Parse {
            line: row.line,
            message: row.reason.clone(),
        });
    }

    let grid = ObservationGrid::from_config(&config.grid).ok();
    report.merge(inspect_sources(&imported.sources, &rules, grid.as_ref()));
    info!("场源表 {}: {} 个场源", path.display(), imported.sources.len());
}

fn print_report(report: &ValidationReport) {
    println!("\n=== 检查结果 ===");

    if report.has_errors() {
        println!("\n错误 ({}):", report.error_count());
        for err in &report.errors {
            error!("  ✗ {}", err);
            println!("  ✗ {}", err);
        }
    }

    if report.has_warnings() {
        println!("\n警告 ({}):", report.warning_count());
        for warning in &report.warnings {
            warn!("  ⚠ {}", warning);
            println!("  ⚠ {}", warning);
        }
    }
}
