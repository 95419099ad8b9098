//! # 数据模型模块
//!
//! 定义能带、能带结构与 SCF 计算结果数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `plot/` 和 `commands/` 使用
//! - 子模块: band, band_structure, calculation

pub mod band;
pub mod band_structure;
pub mod calculation;

pub use band::{EnergyBand, Spin};
pub use band_structure::BandStructure;
pub use calculation::ScfResult;
