// crates/gf_physics/src/aggregator.rs

//! 场叠加器
//!
//! 将场源集合的贡献线性叠加到观测网格与剖面上，并推导色标范围。
//!
//! 网格按行求值；启用并行且网格点数不小于阈值时使用 rayon 按行分块。
//! 每个网格点上场源总按集合顺序累加，因此串行与并行结果逐位一致。

use rayon::prelude::*;
use tracing::{debug, instrument};

use gf_config::{ColorPolicy, ForwardConfig, ParallelConfig};
use gf_foundation::error::GfResult;

use crate::color::derive_color_bounds;
use crate::field::{Computation, FieldMap, FieldResult};
use crate::grid::{ObservationGrid, ObservationProfile};
use crate::kernel::AnomalyKernel;
use crate::source::{Source, SourceCollection};

/// 场叠加器
#[derive(Debug, Clone)]
pub struct FieldAggregator {
    kernel: AnomalyKernel,
    color: ColorPolicy,
    parallel: ParallelConfig,
}

impl FieldAggregator {
    /// 使用默认色标与并行配置
    pub fn new(kernel: AnomalyKernel) -> Self {
        Self {
            kernel,
            color: ColorPolicy::default(),
            parallel: ParallelConfig::default(),
        }
    }

    /// 从配置创建
    pub fn from_config(config: &ForwardConfig) -> Self {
        Self {
            kernel: AnomalyKernel::from_config(config),
            color: config.color,
            parallel: config.parallel.clone(),
        }
    }

    /// 设置色标策略
    pub fn with_color(mut self, color: ColorPolicy) -> Self {
        self.color = color;
        self
    }

    /// 设置并行配置
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// 强制串行
    pub fn sequential(self) -> Self {
        self.with_parallel(ParallelConfig {
            enabled: false,
            ..ParallelConfig::default()
        })
    }

    /// 核函数
    #[inline]
    pub fn kernel(&self) -> &AnomalyKernel {
        &self.kernel
    }

    /// 色标策略
    #[inline]
    pub fn color(&self) -> &ColorPolicy {
        &self.color
    }

    fn use_parallel(&self, points: usize) -> bool {
        self.parallel.enabled && points >= self.parallel.min_points
    }

    /// 各场源的等效质量；球体模型下缺少半径时报错
    fn strengths(&self, sources: &[Source]) -> GfResult<Vec<f64>> {
        sources.iter().map(|s| self.kernel.strength(s)).collect()
    }

    /// 计算平面异常；没有场源时返回 `None`
    pub fn compute_map(
        &self,
        sources: &[Source],
        grid: &ObservationGrid,
    ) -> GfResult<Option<FieldMap>> {
        if sources.is_empty() {
            return Ok(None);
        }
        let strengths = self.strengths(sources)?;

        let xs = grid.x_axis();
        let ys = grid.y_axis();
        let nx = grid.nx();
        let mut map = FieldMap::zeros(nx, grid.ny());

        let fill = |(iy, row): (usize, &mut [f64])| {
            self.fill_row(sources, &strengths, &xs, ys[iy], row);
        };

        if self.use_parallel(grid.len()) {
            debug!(points = grid.len(), rows = grid.ny(), "并行计算平面异常");
            map.values_mut().par_chunks_mut(nx).enumerate().for_each(fill);
        } else {
            debug!(points = grid.len(), "串行计算平面异常");
            map.values_mut().chunks_mut(nx).enumerate().for_each(fill);
        }

        Ok(Some(map))
    }

    /// 计算剖面异常；没有场源时返回 `None`
    pub fn compute_profile(
        &self,
        sources: &[Source],
        profile: &ObservationProfile,
    ) -> GfResult<Option<Vec<f64>>> {
        if sources.is_empty() {
            return Ok(None);
        }
        let strengths = self.strengths(sources)?;
        let mut out = vec![0.0; profile.len()];
        self.fill_row(sources, &strengths, profile.x(), profile.y(), &mut out);
        Ok(Some(out))
    }

    /// 计算平面图、`y = 0` 剖面与色标范围
    #[instrument(skip_all, fields(sources = sources.len(), points = grid.len()))]
    pub fn compute_sources(
        &self,
        sources: &[Source],
        grid: &ObservationGrid,
    ) -> GfResult<Computation> {
        let Some(map) = self.compute_map(sources, grid)? else {
            debug!("没有场源，跳过计算");
            return Ok(Computation::Empty);
        };
        let profile = ObservationProfile::along_x(grid);
        let profile = self
            .compute_profile(sources, &profile)?
            .unwrap_or_default();
        let bounds = derive_color_bounds(map.values(), &self.color);
        debug!(vmin = bounds.vmin, vmax = bounds.vmax, "色标范围");

        Ok(Computation::Computed(FieldResult { map, profile, bounds }))
    }

    /// 对已校验的场源集合求值
    ///
    /// 集合的验证规则不要求半径而核函数为球体模型时，
    /// 缺少半径的场源使计算返回 [`GfError::InvalidRadius`]。
    pub fn compute(
        &self,
        sources: &SourceCollection,
        grid: &ObservationGrid,
    ) -> GfResult<Computation> {
        self.compute_sources(sources.as_slice(), grid)
    }

    /// 一行观测点：`row[ix] += Σ g_z(xs[ix] - x_s, y - y_s)`，按场源顺序
    fn fill_row(&self, sources: &[Source], strengths: &[f64], xs: &[f64], y: f64, row: &mut [f64]) {
        let mut dx = vec![0.0; xs.len()];
        let mut dy = vec![0.0; xs.len()];
        for (source, &strength) in sources.iter().zip(strengths) {
            let origin = source.horizontal();
            for (d, &x) in dx.iter_mut().zip(xs) {
                *d = x - origin.x;
            }
            dy.fill(y - origin.y);
            self.kernel.evaluate_into(&dx, &dy, source.z, strength, row);
        }
    }
}

impl Default for FieldAggregator {
    fn default() -> Self {
        Self::new(AnomalyKernel::default())
    }
}
