// crates/gf_physics/src/constants.rs

//! 物理与数值常量

/// SI 万有引力常数 [m³ kg⁻¹ s⁻²]
pub const G_SI: f64 = gf_config::DEFAULT_GRAVITATIONAL_CONSTANT;

/// m/s² → mGal 换算系数（1 mGal = 1e-5 m/s²）
pub const SI_TO_MGAL: f64 = 1e5;

/// 分母恰为 0 时的替代值
///
/// 仅在 `z = 0` 且观测点与场源水平重合时触发。这是数值稳定性钳位，
/// 不是有物理意义的正则化。
pub const DENOMINATOR_EPSILON: f64 = 1e-20;

/// 色标范围退化（上下界相等或为 0）时的展宽量 [mGal]
pub const COLOR_RANGE_EPSILON: f64 = 1e-12;
