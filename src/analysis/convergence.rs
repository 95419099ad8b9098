//! # 收敛性扫描
//!
//! 从一组 SCF 输出的文件名中读取扫描参数，并计算各自的 Γ 点带隙。
//!
//! ## 文件名约定
//! ```text
//! k 网格:   <prefix>.<n1>.<n2>.<n3>.<rest>        e.g. PbI4.4.4.2.scf.out
//! 截断能:   <prefix>.<tag>.<int>.<frac>.<rest>    e.g. PbI4.ecut_wfc.40.0.scf.out
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/gamma.rs` 调用
//! - 使用 `parsers/scf_out.rs`, `analysis/gamma.rs`

use crate::analysis::gamma_gap;
use crate::error::{BandsError, Result};
use crate::parsers::{read_fermi_energy, read_gamma_eigenvalues};

use serde::Serialize;
use std::path::Path;

/// 扫描参数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepKind {
    /// k 点网格
    KGrid,
    /// 平面波截断能
    Ecut,
}

impl std::fmt::Display for SweepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SweepKind::KGrid => write!(f, "k-grid"),
            SweepKind::Ecut => write!(f, "ecut"),
        }
    }
}

/// 单个文件的扫描参数
#[derive(Debug, Clone, PartialEq)]
pub struct SweepParameter {
    /// 显示标签（"4x4x2" 或 "40.0"）
    pub label: String,
    /// 参数值（n_k 或 ecut）
    pub value: f64,
}

impl SweepParameter {
    /// 横坐标 1/n_k 或 1/ecut
    pub fn inverse(&self) -> f64 {
        1.0 / self.value
    }
}

/// 收敛曲线上的一个点
#[derive(Debug, Clone, Serialize)]
pub struct ConvergencePoint {
    pub file: String,
    pub label: String,
    pub parameter: f64,
    pub inverse_parameter: f64,
    pub fermi_energy_ev: f64,
    pub gamma_gap_ev: f64,
}

/// 从文件名解析扫描参数
pub fn sweep_parameter(path: &Path, kind: SweepKind) -> Result<SweepParameter> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| bad_name(path, kind))?;
    let parts: Vec<&str> = name.split('.').collect();

    match kind {
        SweepKind::KGrid => {
            if parts.len() < 4 {
                return Err(bad_name(path, kind));
            }
            let grid: Vec<usize> = parts[1..4]
                .iter()
                .map(|p| p.parse::<usize>())
                .collect::<std::result::Result<_, _>>()
                .map_err(|_| bad_name(path, kind))?;
            let nk: usize = grid.iter().product();
            if nk == 0 {
                return Err(bad_name(path, kind));
            }
            Ok(SweepParameter {
                label: parts[1..4].join("x"),
                value: nk as f64,
            })
        }
        SweepKind::Ecut => {
            if parts.len() < 4 {
                return Err(bad_name(path, kind));
            }
            let label = parts[2..4].join(".");
            let value: f64 = label.parse().map_err(|_| bad_name(path, kind))?;
            if value <= 0.0 {
                return Err(bad_name(path, kind));
            }
            Ok(SweepParameter { label, value })
        }
    }
}

fn bad_name(path: &Path, kind: SweepKind) -> BandsError {
    BandsError::InvalidArgument(format!(
        "Cannot read {} parameter from file name: {}",
        kind,
        path.display()
    ))
}

/// 解析单个 SCF 输出，得到收敛点
pub fn convergence_point(path: &Path, kind: SweepKind) -> Result<ConvergencePoint> {
    let parameter = sweep_parameter(path, kind)?;
    let fermi_energy = read_fermi_energy(path)?;
    let eigenvalues = read_gamma_eigenvalues(path)?;

    Ok(ConvergencePoint {
        file: path.display().to_string(),
        inverse_parameter: parameter.inverse(),
        parameter: parameter.value,
        label: parameter.label,
        fermi_energy_ev: fermi_energy,
        gamma_gap_ev: gamma_gap(&eigenvalues, fermi_energy)?,
    })
}

/// 是否满足最小参数要求（含边界）；未设置下限时总是满足
pub fn meets_min_parameter(point: &ConvergencePoint, min_parameter: Option<f64>) -> bool {
    min_parameter.map_or(true, |min| point.parameter >= min)
}

/// 按横坐标 (1/参数) 升序排列
pub fn sort_points(points: &mut [ConvergencePoint]) {
    points.sort_by(|a, b| a.inverse_parameter.total_cmp(&b.inverse_parameter));
}
