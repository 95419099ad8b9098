//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `bands`: 解析 bands.x 输出，报告带隙并绘制能带图
//! - `gamma-gap`: 批量计算 Γ 点带隙并分析收敛性
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: bands, gamma

pub mod bands;
pub mod gamma;

use clap::{Parser, Subcommand};

/// qebands - Quantum ESPRESSO 能带后处理工具
#[derive(Parser)]
#[command(name = "qebands")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Band structure and band gap analysis for Quantum ESPRESSO outputs",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Parse a bands.x data file, report the band gap and plot the band structure
    Bands(bands::BandsArgs),

    /// Compute Γ-point gaps over a parameter sweep of SCF outputs
    GammaGap(gamma::GammaGapArgs),
}
