//! # 分析模块
//!
//! 基于解析结果的数值分析。
//!
//! ## 子模块
//! - `gamma`: Γ 点带隙
//! - `convergence`: 参数扫描（k 网格 / 截断能）下的 Γ 点带隙收敛
//!
//! ## 依赖关系
//! - 被 `commands/gamma.rs`, `models/calculation.rs` 使用
//! - 使用 `parsers/scf_out.rs`

pub mod convergence;
pub mod gamma;

pub use convergence::{ConvergencePoint, SweepKind, SweepParameter};
pub use gamma::{gamma_band_edges, gamma_gap, GammaEdges};
