// crates/gf_physics/src/kernel.rs

//! 重力异常核函数
//!
//! 计算单个场源在观测偏移处产生的垂向重力异常 g_z [mGal]：
//!
//! $$
//! g_z = \frac{G \cdot m \cdot z}{(dx^2 + dy^2 + z^2)^{3/2}} \cdot 10^5
//! $$
//!
//! 其中 `dx = x_obs - x_src`，`dy = y_obs - y_src`，`z` 为场源深度（向下为正）。
//! 等效质量 `m` 由模型决定：
//!
//! - [`ModelKind::PointMass`]: `m = rho`
//! - [`ModelKind::Sphere`]: `m = (4/3)·π·r³·rho`
//!
//! 核函数是纯函数，既可逐点调用，也可对整组偏移数组求值。
//!
//! # 示例
//!
//! ```
//! use gf_config::ModelKind;
//! use gf_physics::kernel::AnomalyKernel;
//!
//! let kernel = AnomalyKernel::new(ModelKind::PointMass);
//! let gz = kernel.gz(0.0, 0.0, 10.0, 2000.0);
//! assert!((gz - 1.33486e-4).abs() < 1e-9);
//! ```

use gf_config::{ForwardConfig, ModelKind};
use gf_foundation::error::{GfError, GfResult};

use crate::constants::{DENOMINATOR_EPSILON, G_SI, SI_TO_MGAL};
use crate::source::Source;

/// 点质量公式的原始形式
///
/// `strength` 为等效质量（点质量模型下即 `rho`）。
#[inline]
pub fn point_gz(g: f64, dx: f64, dy: f64, z: f64, strength: f64) -> f64 {
    let mut r3 = (dx * dx + dy * dy + z * z).powf(1.5);
    if r3 == 0.0 {
        r3 = DENOMINATOR_EPSILON;
    }
    g * strength * z / r3 * SI_TO_MGAL
}

/// 均匀球体的等效质量 `(4/3)·π·r³·ρ`
#[inline]
pub fn sphere_mass(radius: f64, rho: f64) -> f64 {
    4.0 / 3.0 * std::f64::consts::PI * radius.powi(3) * rho
}

/// 异常核函数
///
/// 不持有可变状态，可在线程间自由复制。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyKernel {
    model: ModelKind,
    gravitational_constant: f64,
}

impl AnomalyKernel {
    /// 使用 SI 万有引力常数创建核函数
    pub fn new(model: ModelKind) -> Self {
        Self {
            model,
            gravitational_constant: G_SI,
        }
    }

    /// 点质量核函数
    pub fn point_mass() -> Self {
        Self::new(ModelKind::PointMass)
    }

    /// 球体核函数
    pub fn sphere() -> Self {
        Self::new(ModelKind::Sphere)
    }

    /// 从配置创建
    pub fn from_config(config: &ForwardConfig) -> Self {
        Self::new(config.model).with_constant(config.gravitational_constant)
    }

    /// 设置万有引力常数
    pub fn with_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    /// 当前模型
    #[inline]
    pub fn model(&self) -> ModelKind {
        self.model
    }

    /// 当前万有引力常数
    #[inline]
    pub fn gravitational_constant(&self) -> f64 {
        self.gravitational_constant
    }

    /// 场源的等效质量
    ///
    /// 球体模型下缺少半径的场源返回 [`GfError::InvalidRadius`]。
    #[inline]
    pub fn strength(&self, source: &Source) -> GfResult<f64> {
        match (self.model, source.radius) {
            (ModelKind::PointMass, _) => Ok(source.rho),
            (ModelKind::Sphere, Some(r)) => Ok(sphere_mass(r, source.rho)),
            (ModelKind::Sphere, None) => Err(GfError::invalid_radius(&source.name, None)),
        }
    }

    /// 单点求值
    #[inline]
    pub fn gz(&self, dx: f64, dy: f64, z: f64, strength: f64) -> f64 {
        point_gz(self.gravitational_constant, dx, dy, z, strength)
    }

    /// 对整组偏移求值并累加到 `out`
    ///
    /// `out[i] += g_z(dx[i], dy[i], z, strength)`；三个切片长度必须相同。
    pub fn evaluate_into(&self, dx: &[f64], dy: &[f64], z: f64, strength: f64, out: &mut [f64]) {
        debug_assert_eq!(dx.len(), out.len());
        debug_assert_eq!(dy.len(), out.len());
        for ((o, &dx), &dy) in out.iter_mut().zip(dx).zip(dy) {
            *o += self.gz(dx, dy, z, strength);
        }
    }
}

impl Default for AnomalyKernel {
    fn default() -> Self {
        Self::point_mass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(dx: f64, dy: f64, z: f64, m: f64) -> f64 {
        6.67430e-11 * m * z / (dx * dx + dy * dy + z * z).powf(1.5) * 1e5
    }

    #[test]
    fn test_point_mass_directly_above() {
        let kernel = AnomalyKernel::point_mass();
        let gz = kernel.gz(0.0, 0.0, 10.0, 2000.0);
        let expected = 6.67430e-11 * 2000.0 * 10.0 / 1000.0 * 1e5;
        assert!((gz - expected).abs() / expected < 1e-12);
        assert!(gz > 0.0);
    }

    #[test]
    fn test_sphere_scales_by_volume() {
        let point = AnomalyKernel::point_mass();
        let sphere = AnomalyKernel::sphere();
        let radius: f64 = 5.0;
        let volume = 4.0 / 3.0 * std::f64::consts::PI * radius.powi(3);

        let source = Source::new("s", 0.0, 10.0, 2000.0).with_radius(radius);
        let m = sphere.strength(&source).unwrap();
        assert!((m - volume * 2000.0).abs() < 1e-6);

        let gp = point.gz(3.0, 4.0, 10.0, point.strength(&source).unwrap());
        let gs = sphere.gz(3.0, 4.0, 10.0, m);
        assert!((gs / gp - volume).abs() < 1e-9);
    }

    #[test]
    fn test_point_mass_ignores_radius() {
        let kernel = AnomalyKernel::point_mass();
        let with_radius = Source::new("a", 0.0, 10.0, 2500.0).with_radius(5.0);
        let without = Source::new("b", 0.0, 10.0, 2500.0);
        assert_eq!(kernel.strength(&with_radius).unwrap(), 2500.0);
        assert_eq!(kernel.strength(&without).unwrap(), 2500.0);
    }

    #[test]
    fn test_sphere_without_radius_is_error() {
        let err = AnomalyKernel::sphere()
            .strength(&Source::new("p1", 0.0, 10.0, 2000.0))
            .unwrap_err();
        assert!(matches!(err, GfError::InvalidRadius { radius: None, .. }));
    }

    #[test]
    fn test_singularity_clamp() {
        let kernel = AnomalyKernel::point_mass();
        let gz = kernel.gz(0.0, 0.0, 0.0, 2000.0);
        assert!(gz.is_finite());
        assert_eq!(gz, 0.0);
    }

    #[test]
    fn test_negative_density_flips_sign() {
        let kernel = AnomalyKernel::point_mass();
        let pos = kernel.gz(5.0, 0.0, 10.0, 300.0);
        let neg = kernel.gz(5.0, 0.0, 10.0, -300.0);
        assert_eq!(pos, -neg);
    }

    #[test]
    fn test_evaluate_into_accumulates() {
        let kernel = AnomalyKernel::point_mass();
        let dx = [0.0, 10.0];
        let dy = [0.0, 0.0];
        let mut out = vec![1.0, 1.0];
        kernel.evaluate_into(&dx, &dy, 10.0, 2000.0, &mut out);
        assert!((out[0] - 1.0 - reference(0.0, 0.0, 10.0, 2000.0)).abs() < 1e-15);
        assert!(out[1] > 1.0);
    }

    #[test]
    fn test_custom_constant() {
        let kernel = AnomalyKernel::point_mass().with_constant(1.0);
        assert_eq!(kernel.gz(0.0, 0.0, 1.0, 1.0), 1e5);
    }
}
