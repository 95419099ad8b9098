//! # 解析器模块
//!
//! 基于状态机行读取器的 Quantum ESPRESSO 输出解析器。
//!
//! ## 依赖关系
//! - 被 `commands/`, `analysis/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: reader, bands_data, bands_out, scf_out

pub mod bands_data;
pub mod bands_out;
pub mod reader;
pub mod scf_out;

pub use bands_data::BandsDataReader;
pub use bands_out::{parse_high_symmetry_points, BandsOutputReader};
pub use reader::{ParserState, StatefulReader, Transition};
pub use scf_out::{parse_scf_output, read_fermi_energy, read_gamma_eigenvalues};
