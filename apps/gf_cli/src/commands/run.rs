// apps/gf_cli/src/commands/run.rs

//! 正演计算命令
//!
//! 读取场源表，在对称观测网格上计算垂向重力异常，输出统计摘要并按需导出。

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use gf_config::{ColorPolicy, DensityPolicy, ForwardConfig, ModelKind};
use gf_io::{load_sources, save_grid_xyz, save_profile, CsvOptions};
use gf_physics::{
    detect_peaks, Computation, FieldAggregator, FieldStats, ObservationGrid, SourceCollection,
    SourceRules,
};

use super::load_config;

/// 正演计算参数
#[derive(Args)]
pub struct RunArgs {
    /// 场源表路径 (CSV / TXT)
    #[arg(short, long)]
    pub sources: PathBuf,

    /// 配置文件路径 (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 场源模型 (point | sphere)
    #[arg(short, long)]
    pub model: Option<ModelKind>,

    /// 网格半宽 [m]
    #[arg(long)]
    pub extent: Option<f64>,

    /// 每轴采样点数
    #[arg(long)]
    pub resolution: Option<usize>,

    /// 色标策略 (symmetric | asymmetric)
    #[arg(long)]
    pub color: Option<ColorPolicy>,

    /// 固定色标下界 [mGal]（需同时给出 --vmax）
    #[arg(long, requires = "vmax", allow_negative_numbers = true)]
    pub vmin: Option<f64>,

    /// 固定色标上界 [mGal]（需同时给出 --vmin）
    #[arg(long, requires = "vmin", allow_negative_numbers = true)]
    pub vmax: Option<f64>,

    /// 只接受正密度
    #[arg(long)]
    pub strict_density: bool,

    /// 场源表中任一无效行即失败
    #[arg(long)]
    pub strict_import: bool,

    /// 强制串行计算
    #[arg(long)]
    pub sequential: bool,

    /// 网格结果输出路径 (x y g_z)
    #[arg(long)]
    pub grid_out: Option<PathBuf>,

    /// 剖面输出路径 (x,g_z)
    #[arg(long)]
    pub profile_out: Option<PathBuf>,

    /// 异常检测阈值 [mGal]
    #[arg(long, allow_negative_numbers = true)]
    pub threshold: Option<f64>,
}

impl RunArgs {
    fn apply(&self, config: &mut ForwardConfig) {
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(extent) = self.extent {
            config.grid.extent = extent;
        }
        if let Some(resolution) = self.resolution {
            config.grid.resolution = resolution;
        }
        if let Some(color) = self.color {
            config.color = color;
        }
        config.color = config.color.with_override(self.vmin, self.vmax);
        if self.strict_density {
            config.density = DensityPolicy::StrictlyPositive;
        }
        if self.sequential {
            config.parallel.enabled = false;
        }
    }
}

/// 执行正演计算命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== GravForward 正演计算 ===");

    let mut config = load_config(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate().context("配置无效")?;

    info!(
        "模型: {}, 色标: {}, 密度策略: {:?}",
        config.model, config.color, config.density
    );
    if config.has_custom_constant() {
        warn!("使用非标准万有引力常数 G={}", config.gravitational_constant);
    }

    let grid = ObservationGrid::from_config(&config.grid)?;
    info!(
        "网格: [-{e}, {e}]², {n}x{n} 点",
        e = config.grid.extent,
        n = config.grid.resolution
    );

    // 加载场源
    let rules = SourceRules::from_config(&config);
    let options = CsvOptions {
        strict: args.strict_import,
        ..CsvOptions::default().with_rules(rules)
    };
    let report = load_sources(&args.sources, &options)
        .with_context(|| format!("无法加载场源表 {}", args.sources.display()))?;
    if !report.is_clean() {
        warn!("跳过 {} 行无效场源", report.skipped.len());
    }

    let mut sources = SourceCollection::new(rules);
    sources.extend_validated(report.sources)?;
    info!("场源: {} 个", sources.len());

    let inspection = sources.inspect(Some(&grid));
    for warning in &inspection.warnings {
        warn!("{}", warning);
    }

    // 计算
    let start = Instant::now();
    let aggregator = FieldAggregator::from_config(&config);
    let result = match aggregator.compute(&sources, &grid)? {
        Computation::Empty => {
            warn!("没有有效场源，未进行计算");
            return Ok(());
        }
        Computation::Computed(result) => result,
    };
    let elapsed = start.elapsed();

    if let Some(stats) = FieldStats::of(&result.map, &grid) {
        info!(
            "g_z: min={:.6e} mGal, max={:.6e} mGal, mean={:.6e} mGal",
            stats.min, stats.max, stats.mean
        );
        info!("峰值位置: x={:.2} m, y={:.2} m", stats.peak.0, stats.peak.1);
    }
    info!(
        "色标范围: [{:.6e}, {:.6e}] mGal",
        result.bounds.vmin, result.bounds.vmax
    );
    info!("计算时间: {:.3} s", elapsed.as_secs_f64());

    if let Some(threshold) = args.threshold {
        let hits = detect_peaks(&result.map, &grid, threshold);
        info!("g_z >= {} mGal 的网格点: {} 个", threshold, hits.len());
        for hit in hits.iter().take(10) {
            info!("  x={:.2}, y={:.2}, g_z={:.6e}", hit.x, hit.y, hit.value);
        }
    }

    // 导出
    if let Some(path) = &args.grid_out {
        save_grid_xyz(path, &grid, &result.map)
            .with_context(|| format!("无法导出网格 {}", path.display()))?;
        info!("网格已导出: {}", path.display());
    }
    if let Some(path) = &args.profile_out {
        save_profile(path, &grid.x_axis(), &result.profile)
            .with_context(|| format!("无法导出剖面 {}", path.display()))?;
        info!("剖面已导出: {}", path.display());
    }

    info!("=== 计算完成 ===");
    Ok(())
}
