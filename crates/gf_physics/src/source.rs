// crates/gf_physics/src/source.rs

//! 场源定义与场源集合
//!
//! 场源是地下的质量异常体，由水平位置、深度（向下为正）、密度（差）
//! 以及可选的球体半径描述。
//!
//! [`SourceCollection`] 是场源的唯一所有者：所有写操作（添加、替换、删除、清空）
//! 都在集合上显式进行，并在写入前完成验证，无效场源永远不会进入集合。
//!
//! # 示例
//!
//! ```
//! use gf_physics::source::{Source, SourceCollection, SourceRules};
//!
//! let mut sources = SourceCollection::new(SourceRules::default());
//! sources.add(Source::new("", 0.0, 10.0, 2000.0)).unwrap();
//! assert_eq!(sources.get(0).unwrap().name, "p1");
//!
//! // 深度 <= 0 被拒绝，集合不变
//! assert!(sources.add(Source::new("bad", 0.0, 0.0, 2000.0)).is_err());
//! assert_eq!(sources.len(), 1);
//! ```

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use gf_config::{DensityPolicy, ForwardConfig, ModelKind};
use gf_foundation::error::{GfError, GfResult};
use gf_foundation::float::parse_f64;
use gf_foundation::validation::{ValidationError, ValidationReport, ValidationWarning};

use crate::grid::ObservationGrid;

// ============================================================
// 场源
// ============================================================

/// 地下质量异常体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// 名称（为空时由集合自动生成）
    pub name: String,
    /// 水平位置 X [m]
    pub x: f64,
    /// 水平位置 Y [m]
    #[serde(default)]
    pub y: f64,
    /// 深度 [m]，向下为正，必须 > 0
    pub z: f64,
    /// 密度或密度差 [kg/m³]
    pub rho: f64,
    /// 球体半径 [m]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl Source {
    /// 创建位于 `y = 0` 剖面上的点源
    pub fn new(name: impl Into<String>, x: f64, z: f64, rho: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y: 0.0,
            z,
            rho,
            radius: None,
        }
    }

    /// 设置水平位置 Y
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// 设置球体半径
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// 水平位置
    #[inline]
    pub fn horizontal(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// 按规则验证场源
    pub fn validate(&self, rules: &SourceRules) -> GfResult<()> {
        GfError::check_finite("x", self.x)?;
        GfError::check_finite("y", self.y)?;

        if !self.z.is_finite() || self.z <= 0.0 {
            return Err(GfError::invalid_depth(&self.name, self.z));
        }

        if !rules.density.accepts(self.rho) {
            return Err(GfError::invalid_density(
                &self.name,
                self.rho,
                rules.density.is_strict(),
            ));
        }

        match self.radius {
            Some(r) if !r.is_finite() || r <= 0.0 => {
                return Err(GfError::invalid_radius(&self.name, Some(r)));
            }
            None if rules.require_radius => {
                return Err(GfError::invalid_radius(&self.name, None));
            }
            _ => {}
        }

        Ok(())
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: x={:.1}, y={:.1}, z={:.1}, ρ={:.0}",
            self.name, self.x, self.y, self.z, self.rho
        )?;
        if let Some(r) = self.radius {
            write!(f, ", r={:.1}", r)?;
        }
        Ok(())
    }
}

// ============================================================
// 原始文本输入
// ============================================================

/// 未经解析的场源文本记录
///
/// 表单或文件中的各字段以文本形式给出，解析失败时报告
/// [`GfError::MalformedNumber`]，不产生场源。
#[derive(Debug, Clone, Default)]
pub struct SourceInput {
    /// 名称
    pub name: String,
    /// X 文本
    pub x: String,
    /// 深度文本
    pub z: String,
    /// 密度文本
    pub rho: String,
    /// Y 文本（缺省或空为 0）
    pub y: Option<String>,
    /// 半径文本（缺省或空为无半径）
    pub radius: Option<String>,
}

impl SourceInput {
    /// 由必需字段创建
    pub fn new(name: &str, x: &str, z: &str, rho: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            x: x.to_string(),
            z: z.to_string(),
            rho: rho.to_string(),
            y: None,
            radius: None,
        }
    }

    /// 解析为场源（只做数值解析，不做物理验证）
    pub fn parse(&self) -> GfResult<Source> {
        let x = parse_f64("x", &self.x)?;
        let z = parse_f64("z", &self.z)?;
        let rho = parse_f64("rho", &self.rho)?;
        let y = optional_field("y", self.y.as_deref())?.unwrap_or(0.0);
        let radius = optional_field("radius", self.radius.as_deref())?;

        Ok(Source {
            name: self.name.clone(),
            x,
            y,
            z,
            rho,
            radius,
        })
    }
}

fn optional_field(field: &'static str, text: Option<&str>) -> GfResult<Option<f64>> {
    match text.map(str::trim) {
        None | Some("") => Ok(None),
        Some(t) => parse_f64(field, t).map(Some),
    }
}

// ============================================================
// 验证规则
// ============================================================

/// 场源验证规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceRules {
    /// 密度策略
    pub density: DensityPolicy,
    /// 是否要求半径（球体模型）
    pub require_radius: bool,
}

impl SourceRules {
    /// 由模型和密度策略推导
    pub fn new(model: ModelKind, density: DensityPolicy) -> Self {
        Self {
            density,
            require_radius: model.requires_radius(),
        }
    }

    /// 从配置推导
    pub fn from_config(config: &ForwardConfig) -> Self {
        Self::new(config.model, config.density)
    }
}

// ============================================================
// 场源集合
// ============================================================

/// 有序场源集合
///
/// 插入顺序即显示顺序，不具有物理意义。
#[derive(Debug, Clone, Default)]
pub struct SourceCollection {
    sources: Vec<Source>,
    rules: SourceRules,
}

impl SourceCollection {
    /// 创建空集合
    pub fn new(rules: SourceRules) -> Self {
        Self {
            sources: Vec::new(),
            rules,
        }
    }

    /// 当前验证规则
    pub fn rules(&self) -> SourceRules {
        self.rules
    }

    /// 场源数量
    #[inline]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// 按序号访问
    pub fn get(&self, index: usize) -> Option<&Source> {
        self.sources.get(index)
    }

    /// 迭代所有场源
    pub fn iter(&self) -> std::slice::Iter<'_, Source> {
        self.sources.iter()
    }

    /// 以切片形式访问
    pub fn as_slice(&self) -> &[Source] {
        &self.sources
    }

    /// 添加场源，返回其序号
    ///
    /// 名称为空时自动命名为 `p{n}`（n 为添加后的数量）。
    pub fn add(&mut self, mut source: Source) -> GfResult<usize> {
        source.validate(&self.rules)?;
        if source.name.trim().is_empty() {
            source.name = format!("p{}", self.sources.len() + 1);
        }
        if source.rho < 0.0 {
            tracing::debug!("场源 {} 为负密度差 rho={}", source.name, source.rho);
        }
        self.sources.push(source);
        Ok(self.sources.len() - 1)
    }

    /// 删除指定序号的场源
    pub fn remove_at(&mut self, index: usize) -> GfResult<Source> {
        GfError::check_index("source", index, self.sources.len())?;
        Ok(self.sources.remove(index))
    }

    /// 替换指定序号的场源，返回旧值
    ///
    /// 名称为空时命名为 `p{index+1}`。验证失败时集合不变。
    pub fn replace_at(&mut self, index: usize, mut source: Source) -> GfResult<Source> {
        GfError::check_index("source", index, self.sources.len())?;
        source.validate(&self.rules)?;
        if source.name.trim().is_empty() {
            source.name = format!("p{}", index + 1);
        }
        Ok(std::mem::replace(&mut self.sources[index], source))
    }

    /// 清空集合，返回删除的数量
    pub fn clear(&mut self) -> usize {
        let n = self.sources.len();
        self.sources.clear();
        n
    }

    /// 批量添加（全有或全无）
    ///
    /// 任一场源验证失败时不添加任何场源。
    pub fn extend_validated<I>(&mut self, sources: I) -> GfResult<usize>
    where
        I: IntoIterator<Item = Source>,
    {
        let batch: Vec<Source> = sources.into_iter().collect();
        for source in &batch {
            source.validate(&self.rules)?;
        }
        let n = batch.len();
        for source in batch {
            self.add(source)?;
        }
        Ok(n)
    }

    /// 检查整个集合并生成报告
    ///
    /// 除硬性规则外，还会报告负密度差、重复名称，以及（给出网格时）
    /// 位于网格外或深度小于网格间距的场源。
    pub fn inspect(&self, grid: Option<&ObservationGrid>) -> ValidationReport {
        inspect_sources(&self.sources, &self.rules, grid)
    }
}

impl<'a> IntoIterator for &'a SourceCollection {
    type Item = &'a Source;
    type IntoIter = std::slice::Iter<'a, Source>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.iter()
    }
}

/// 检查一组尚未入集合的场源
pub fn inspect_sources(
    sources: &[Source],
    rules: &SourceRules,
    grid: Option<&ObservationGrid>,
) -> ValidationReport {
    let mut report = ValidationReport::new();
    let mut names = HashSet::new();

    for (id, source) in sources.iter().enumerate() {
        if let Err(err) = source.validate(rules) {
            report.add_error(to_validation_error(id, source, err));
            continue;
        }

        if source.rho < 0.0 {
            report.add_warning(ValidationWarning::NegativeDensity {
                source_id: id,
                rho: source.rho,
            });
        }

        if !source.name.is_empty() && !names.insert(source.name.as_str()) {
            report.add_warning(ValidationWarning::DuplicateName {
                source_id: id,
                name: source.name.clone(),
            });
        }

        if let Some(grid) = grid {
            if !grid.contains(source.x, source.y) {
                report.add_warning(ValidationWarning::OutsideGrid {
                    source_id: id,
                    x: source.x,
                    y: source.y,
                });
            }
            let (dx, dy) = grid.spacing();
            let spacing = dx.max(dy);
            if source.z < spacing {
                report.add_warning(ValidationWarning::Shallow {
                    source_id: id,
                    z: source.z,
                    spacing,
                });
            }
        }
    }

    report
}

fn to_validation_error(id: usize, source: &Source, err: GfError) -> ValidationError {
    match err {
        GfError::InvalidDepth { z, .. } => ValidationError::OutOfRange {
            field: "z",
            source_id: id,
            value: z,
            min: 0.0,
            max: f64::INFINITY,
        },
        GfError::NonFinite { field, value } => ValidationError::NonFinite {
            field,
            source_id: id,
            value,
        },
        other => ValidationError::Custom {
            message: format!("场源{} ({}): {}", id, source.name, other),
        },
    }
}
