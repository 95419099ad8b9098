//! # qebands - Quantum ESPRESSO 能带后处理工具
//!
//! 从 bands.x / pw.x 输出中提取能带结构，计算带隙与 Γ 点带隙。
//!
//! ## 子命令
//! - `bands`     - 能带结构解析、带隙报告与绘图
//! - `gamma-gap` - Γ 点带隙批量计算与收敛分析
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (状态机行读取器与格式解析器)
//!   │     ├── models/    (能带数据模型)
//!   │     ├── analysis/  (Γ 点带隙、收敛扫描)
//!   │     ├── plot/      (图表生成)
//!   │     └── batch/     (并行批处理)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod analysis;
mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod plot;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
