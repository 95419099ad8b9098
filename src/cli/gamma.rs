//! # gamma-gap 子命令 CLI 定义
//!
//! 批量计算 Γ 点带隙，分析 k 网格或截断能收敛性
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/gamma.rs`

use crate::analysis::SweepKind;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 扫描参数类型
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SweepMode {
    /// k-point grid (file names like prefix.4.4.2.scf.out)
    Kgrid,
    /// Wavefunction cutoff (file names like prefix.ecut_wfc.40.0.scf.out)
    Ecut,
}

impl From<SweepMode> for SweepKind {
    fn from(mode: SweepMode) -> Self {
        match mode {
            SweepMode::Kgrid => SweepKind::KGrid,
            SweepMode::Ecut => SweepKind::Ecut,
        }
    }
}

/// gamma-gap 子命令参数
#[derive(Args, Debug)]
pub struct GammaGapArgs {
    /// Glob pattern(s) for SCF output files, comma-separated
    pub pattern: String,

    /// Which parameter the file names encode
    #[arg(long, value_enum, default_value = "kgrid")]
    pub sweep: SweepMode,

    /// Only keep points whose parameter (n_k or ecut) is at least this value
    #[arg(long)]
    pub min_parameter: Option<f64>,

    /// Filename for the CSV output
    #[arg(long, default_value = "gamma_gap_convergence.csv")]
    pub output_csv: PathBuf,

    /// Filename for the convergence plot (.png or .svg)
    #[arg(long, default_value = "gamma_gap_convergence.png")]
    pub output_plot: PathBuf,

    /// Skip plot generation
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0, env = "QEBANDS_JOBS")]
    pub jobs: usize,
}
