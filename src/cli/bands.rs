//! # bands 子命令 CLI 定义
//!
//! 解析 bands.x 能带数据并绘图
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/bands.rs`

use crate::models::Spin;

use clap::{ArgGroup, Args, ValueEnum};
use std::path::PathBuf;

/// 自旋通道（对应 bands.x 的 `spin_component`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpinChannel {
    /// spin_component = 1
    Up,
    /// spin_component = 2
    Down,
}

impl From<SpinChannel> for Spin {
    fn from(channel: SpinChannel) -> Self {
        match channel {
            SpinChannel::Up => Spin::Up,
            SpinChannel::Down => Spin::Down,
        }
    }
}

/// bands 子命令参数
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("electrons")
        .required(true)
        .args(["scf", "n_electrons"])
))]
pub struct BandsArgs {
    /// Band data file written by bands.x (e.g. prefix.bands.dat.gnu)
    pub bands_file: PathBuf,

    /// pw.x SCF output to read the number of electrons from
    #[arg(long)]
    pub scf: Option<PathBuf>,

    /// Number of electrons (must be even)
    #[arg(long)]
    pub n_electrons: Option<usize>,

    /// Spin channel of a spin-polarized bands.x run (tags every sample)
    #[arg(long, value_enum)]
    pub spin: Option<SpinChannel>,

    /// bands.x standard output with the high-symmetry point positions
    #[arg(long)]
    pub bands_out: Option<PathBuf>,

    /// Lower bound of the energy window relative to the reference (eV)
    #[arg(long, default_value_t = -2.0, allow_hyphen_values = true)]
    pub emin: f64,

    /// Upper bound of the energy window relative to the reference (eV)
    #[arg(long, default_value_t = 4.0, allow_hyphen_values = true)]
    pub emax: f64,

    /// Energy reference in eV (default: valence band maximum)
    #[arg(long, allow_hyphen_values = true)]
    pub e_ref: Option<f64>,

    /// Comma-separated labels for the high-symmetry points (e.g. "G,M,K,G")
    #[arg(long, value_delimiter = ',')]
    pub labels: Vec<String>,

    /// Output plot path (.png or .svg)
    #[arg(short, long, default_value = "band_structure.png")]
    pub output: PathBuf,

    /// Title for the plot (default: band file name)
    #[arg(long)]
    pub title: Option<String>,

    /// Figure width in pixels
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Figure height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Skip plot generation
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,
}
