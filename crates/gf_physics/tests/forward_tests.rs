// crates/gf_physics/tests/forward_tests.rs

//! 正演物理性质测试
//! 叠加、对称、衰减、符号与奇点等性质

use gf_config::{ColorPolicy, ForwardConfig, ModelKind, ParallelConfig};
use gf_foundation::float::approx_eq_rel;
use gf_foundation::GfError;
use gf_physics::prelude::*;
use gf_physics::{ColorBounds, FieldStats};

const G: f64 = 6.67430e-11;

fn reference(dx: f64, dy: f64, z: f64, m: f64) -> f64 {
    G * m * z / (dx * dx + dy * dy + z * z).powf(1.5) * 1e5
}

fn collection(sources: &[Source]) -> SourceCollection {
    let mut c = SourceCollection::new(SourceRules::default());
    for s in sources {
        c.add(s.clone()).unwrap();
    }
    c
}

/// 单源、3x3 网格的具体数值
#[test]
fn test_concrete_single_source() {
    let grid = ObservationGrid::symmetric(100.0, 3).unwrap();
    let sources = collection(&[Source::new("p1", 0.0, 10.0, 2000.0)]);
    let result = FieldAggregator::default()
        .compute(&sources, &grid)
        .unwrap()
        .into_result()
        .unwrap();

    let center = result.map.get(1, 1).unwrap();
    assert!(approx_eq_rel(center, 1.33486e-4, 1e-6));

    for (ix, iy) in [(0, 0), (2, 0), (0, 2), (2, 2)] {
        let v = result.map.get(ix, iy).unwrap();
        assert!(approx_eq_rel(v, reference(100.0, 100.0, 10.0, 2000.0), 1e-12));
    }
    for (ix, iy) in [(1, 0), (0, 1), (2, 1), (1, 2)] {
        let v = result.map.get(ix, iy).unwrap();
        assert!(approx_eq_rel(v, reference(100.0, 0.0, 10.0, 2000.0), 1e-12));
    }

    // 默认对称色标
    assert_eq!(result.bounds, ColorBounds::new(-center, center));
    assert_eq!(result.profile.len(), 3);
    assert_eq!(result.profile[1], center);
}

/// 多源结果等于单源结果之和
#[test]
fn test_superposition() {
    let grid = ObservationGrid::symmetric(120.0, 21).unwrap();
    let a = Source::new("a", -30.0, 12.0, 2500.0).with_y(10.0);
    let b = Source::new("b", 45.0, 20.0, -900.0);
    let agg = FieldAggregator::default().sequential();

    let both = agg.compute_map(&[a.clone(), b.clone()], &grid).unwrap().unwrap();
    let only_a = agg.compute_map(&[a], &grid).unwrap().unwrap();
    let only_b = agg.compute_map(&[b], &grid).unwrap().unwrap();

    for ((&ab, &va), &vb) in both.values().iter().zip(only_a.values()).zip(only_b.values()) {
        assert!((ab - (va + vb)).abs() <= 1e-15 * ab.abs().max(1e-12));
    }
}

/// 原点处单源的场关于两轴对称
#[test]
fn test_symmetry_about_source() {
    let grid = ObservationGrid::symmetric(80.0, 17).unwrap();
    let map = FieldAggregator::default()
        .compute_map(&[Source::new("p", 0.0, 15.0, 2000.0)], &grid)
        .unwrap()
        .unwrap();
    let n = grid.nx();
    for iy in 0..n {
        for ix in 0..n {
            let v = map.get(ix, iy).unwrap();
            assert!(approx_eq_rel(map.get(n - 1 - ix, iy).unwrap(), v, 1e-12));
            assert!(approx_eq_rel(map.get(ix, n - 1 - iy).unwrap(), v, 1e-12));
            assert!(approx_eq_rel(map.get(iy, ix).unwrap(), v, 1e-12));
        }
    }
}

/// 没有场源时返回空结果，与全零场区分
#[test]
fn test_empty_sentinel() {
    let grid = ObservationGrid::symmetric(100.0, 11).unwrap();
    let empty = SourceCollection::new(SourceRules::default());
    assert!(FieldAggregator::default().compute(&empty, &grid).unwrap().is_empty());
}

/// 负密度差产生负异常
#[test]
fn test_negative_density_gives_negative_field() {
    let grid = ObservationGrid::symmetric(50.0, 9).unwrap();
    let sources = collection(&[Source::new("cavity", 0.0, 8.0, -1500.0)]);
    let result = FieldAggregator::default()
        .compute(&sources, &grid)
        .unwrap()
        .into_result()
        .unwrap();
    assert!(result.map.values().iter().all(|&v| v < 0.0));
    assert!(result.bounds.is_symmetric());
    assert_eq!(result.bounds.vmin, result.map.min().unwrap());
}

/// 沿剖面远离场源单调衰减
#[test]
fn test_monotonic_decay_along_profile() {
    let grid = ObservationGrid::symmetric(200.0, 41).unwrap();
    let agg = FieldAggregator::default();
    let profile = ObservationProfile::along_x(&grid);
    let values = agg
        .compute_profile(&[Source::new("p", 0.0, 20.0, 2000.0)], &profile)
        .unwrap()
        .unwrap();
    let mid = values.len() / 2;
    for i in mid..values.len() - 1 {
        assert!(values[i] > values[i + 1]);
    }
    for i in 1..=mid {
        assert!(values[i - 1] < values[i]);
    }
}

/// 球体模型等于点质量乘以体积
#[test]
fn test_sphere_matches_scaled_point_mass() {
    let grid = ObservationGrid::symmetric(60.0, 13).unwrap();
    let radius = 4.0;
    let volume = 4.0 / 3.0 * std::f64::consts::PI * radius * radius * radius;
    let source = Source::new("s", 5.0, 12.0, 2200.0).with_radius(radius);

    let point = FieldAggregator::new(AnomalyKernel::point_mass())
        .compute_map(std::slice::from_ref(&source), &grid)
        .unwrap()
        .unwrap();
    let sphere = FieldAggregator::new(AnomalyKernel::sphere())
        .compute_map(std::slice::from_ref(&source), &grid)
        .unwrap()
        .unwrap();

    for (&p, &s) in point.values().iter().zip(sphere.values()) {
        assert!(approx_eq_rel(s, p * volume, 1e-12));
    }
}

/// 源位于观测面且水平重合时结果有限
#[test]
fn test_singularity_stays_finite() {
    let grid = ObservationGrid::symmetric(10.0, 3).unwrap();
    let map = FieldAggregator::default()
        .compute_map(&[Source::new("surface", 0.0, 0.0, 2000.0)], &grid)
        .unwrap()
        .unwrap();
    assert!(map.values().iter().all(|v| v.is_finite()));
    assert_eq!(map.get(1, 1), Some(0.0));
}

/// 串行与并行逐位一致
#[test]
fn test_parallel_bitwise_identical() {
    let grid = ObservationGrid::with_bounds((-300.0, 250.0), (-120.0, 180.0), 97, 61).unwrap();
    let sources: Vec<Source> = (0..12)
        .map(|i| {
            let t = i as f64;
            Source::new(format!("p{i}"), 40.0 * t - 220.0, 6.0 + 3.0 * t, 2600.0 - 450.0 * t)
                .with_y(15.0 * t - 80.0)
        })
        .collect();

    let seq = FieldAggregator::default().sequential();
    let par = FieldAggregator::default().with_parallel(ParallelConfig {
        enabled: true,
        min_points: 1,
    });
    let a = seq.compute_sources(&sources, &grid).unwrap().into_result().unwrap();
    let b = par.compute_sources(&sources, &grid).unwrap().into_result().unwrap();
    assert_eq!(a, b);
}

/// 配置驱动的完整流程
#[test]
fn test_from_config_pipeline() {
    let config = ForwardConfig {
        model: ModelKind::Sphere,
        color: ColorPolicy::Fixed {
            vmin: -0.5,
            vmax: 0.5,
        },
        ..ForwardConfig::default()
    };
    let grid = ObservationGrid::symmetric(50.0, 11).unwrap();

    let mut sources = SourceCollection::new(SourceRules::from_config(&config));
    assert!(sources.add(Source::new("no_radius", 0.0, 10.0, 2000.0)).is_err());
    sources
        .add(Source::new("ball", 0.0, 10.0, 2000.0).with_radius(3.0))
        .unwrap();

    let result = FieldAggregator::from_config(&config)
        .compute(&sources, &grid)
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(result.bounds, ColorBounds::new(-0.5, 0.5));

    let stats = FieldStats::of(&result.map, &grid).unwrap();
    assert_eq!(stats.peak, (0.0, 0.0));
    assert!(stats.max > stats.mean);
}

/// 球体核函数遇到无半径场源时报错，而不是返回全零场
#[test]
fn test_sphere_kernel_with_point_mass_rules() {
    let grid = ObservationGrid::symmetric(100.0, 5).unwrap();
    let sources = collection(&[Source::new("p1", 0.0, 10.0, 2000.0)]);

    let err = FieldAggregator::new(AnomalyKernel::sphere())
        .compute(&sources, &grid)
        .unwrap_err();
    assert!(matches!(err, GfError::InvalidRadius { radius: None, .. }));
}
