//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `analysis/`, `plot/`, `utils/`
//! - 子模块: bands, gamma

pub mod bands;
pub mod gamma;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Bands(args) => bands::execute(args),
        Commands::GammaGap(args) => gamma::execute(args),
    }
}
