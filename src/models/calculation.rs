//! # SCF 计算结果数据模型
//!
//! 存储从 pw.x SCF 输出中提取的信息。
//!
//! ## 依赖关系
//! - 被 `parsers/scf_out.rs` 填充
//! - 被 `commands/bands.rs` 及 `parsers/scf_out.rs` 的读取函数使用

use crate::error::{BandsError, Result};
use crate::parsers::scf_out::{ELECTRONS_MARKER, FERMI_MARKER, GAMMA_MARKER};

/// SCF 计算结果
#[derive(Debug, Clone, Default)]
pub struct ScfResult {
    /// 来源（文件路径或名称）
    pub source_name: String,

    /// 电子数
    pub num_electrons: Option<f64>,

    /// 费米能 (eV)
    pub fermi_energy: Option<f64>,

    /// Γ 点本征值 (eV)，升序
    pub gamma_eigenvalues: Option<Vec<f64>>,
}

impl ScfResult {
    pub fn new(source_name: impl Into<String>) -> Self {
        ScfResult {
            source_name: source_name.into(),
            ..Default::default()
        }
    }

    pub fn num_electrons(&self) -> Result<f64> {
        self.num_electrons
            .ok_or_else(|| self.missing(ELECTRONS_MARKER))
    }

    /// 电子数（必须为非负整数）
    pub fn electron_count(&self) -> Result<usize> {
        let n = self.num_electrons()?;
        if n < 0.0 || n.fract() != 0.0 {
            return Err(BandsError::NonIntegralElectronCount(n));
        }
        Ok(n as usize)
    }

    pub fn fermi_energy(&self) -> Result<f64> {
        self.fermi_energy.ok_or_else(|| self.missing(FERMI_MARKER))
    }

    pub fn gamma_eigenvalues(&self) -> Result<&[f64]> {
        self.gamma_eigenvalues
            .as_deref()
            .ok_or_else(|| self.missing(GAMMA_MARKER))
    }

    fn missing(&self, marker: &str) -> BandsError {
        BandsError::MissingSentinel {
            marker: marker.to_string(),
            source_name: self.source_name.clone(),
        }
    }
}
