//! # 批量处理模块
//!
//! 对多个输出文件并行执行同一解析/分析流程。
//!
//! ## 功能
//! - glob 模式收集文件列表
//! - 并行处理，单个文件失败互不影响
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/gamma.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchResult, BatchRunner, ProcessResult};
