// crates/gf_io/src/grid_export.rs

//! 计算结果导出
//!
//! - 网格：文本 XYZ，首行为以 `#` 开头的网格描述，其后每个网格点一行 `x y g_z`
//! - 剖面：CSV，表头 `x,g_z`

use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use gf_foundation::GfError;
use gf_physics::field::FieldMap;
use gf_physics::grid::ObservationGrid;

use crate::error::{IoError, IoResult};

/// 网格描述行
pub fn grid_header(grid: &ObservationGrid) -> String {
    let [x0, x1, y0, y1] = grid.bounds();
    format!(
        "# x_start={} x_end={} y_start={} y_end={} nx={} ny={}",
        x0,
        x1,
        y0,
        y1,
        grid.nx(),
        grid.ny()
    )
}

/// 写出网格结果（行优先）
pub fn write_grid_xyz<W: Write>(grid: &ObservationGrid, map: &FieldMap, writer: W) -> IoResult<()> {
    if map.nx() != grid.nx() || map.ny() != grid.ny() {
        return Err(GfError::invalid_input(format!(
            "网格形状 {}x{} 与结果形状 {}x{} 不一致",
            grid.nx(),
            grid.ny(),
            map.nx(),
            map.ny()
        ))
        .into());
    }

    let mut w = BufWriter::new(writer);
    writeln!(w, "{}", grid_header(grid))?;
    let (gx, gy) = grid.meshgrid();
    for ((x, y), g) in gx.iter().zip(&gy).zip(map.values()) {
        writeln!(w, "{x} {y} {g:e}")?;
    }
    w.flush()?;
    Ok(())
}

/// 保存网格结果到文件
pub fn save_grid_xyz(path: &Path, grid: &ObservationGrid, map: &FieldMap) -> IoResult<()> {
    let file = std::fs::File::create(path).map_err(|e| IoError::write(path, e))?;
    write_grid_xyz(grid, map, file)?;
    debug!("已导出 {} 个网格点到 {}", grid.len(), path.display());
    Ok(())
}

/// 写出剖面
pub fn write_profile<W: Write>(x: &[f64], values: &[f64], writer: W) -> IoResult<()> {
    if x.len() != values.len() {
        return Err(GfError::invalid_input(format!(
            "剖面坐标数 {} 与数值数 {} 不一致",
            x.len(),
            values.len()
        ))
        .into());
    }

    let mut w = BufWriter::new(writer);
    writeln!(w, "x,g_z")?;
    for (x, g) in x.iter().zip(values) {
        writeln!(w, "{x},{g:e}")?;
    }
    w.flush()?;
    Ok(())
}

/// 保存剖面到文件
pub fn save_profile(path: &Path, x: &[f64], values: &[f64]) -> IoResult<()> {
    let file = std::fs::File::create(path).map_err(|e| IoError::write(path, e))?;
    write_profile(x, values, file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_xyz_layout() {
        let grid = ObservationGrid::symmetric(10.0, 2).unwrap();
        let map = FieldMap::from_values(2, 2, vec![1.0, 2.0, 3.0, 4.5]).unwrap();
        let mut buf = Vec::new();
        write_grid_xyz(&grid, &map, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# x_start=-10 x_end=10 y_start=-10 y_end=10 nx=2 ny=2");
        assert_eq!(lines[1], "-10 -10 1e0");
        assert_eq!(lines[2], "10 -10 2e0");
        assert_eq!(lines[3], "-10 10 3e0");
        assert_eq!(lines[4], "10 10 4.5e0");
    }

    #[test]
    fn test_shape_mismatch() {
        let grid = ObservationGrid::symmetric(10.0, 3).unwrap();
        let map = FieldMap::from_values(2, 2, vec![0.0; 4]).unwrap();
        assert!(write_grid_xyz(&grid, &map, Vec::<u8>::new()).is_err());
    }

    #[test]
    fn test_profile_csv() {
        let mut buf = Vec::new();
        write_profile(&[-1.0, 0.0, 1.0], &[0.5, 1.0, 0.5], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "x,g_z\n-1,5e-1\n0,1e0\n1,5e-1\n");
        assert!(write_profile(&[0.0], &[], Vec::<u8>::new()).is_err());
    }
}
