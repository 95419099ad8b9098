//! # 文件收集器
//!
//! 根据 glob 模式收集待处理文件列表。
//!
//! ## 功能
//! - 逗号分隔的多个 glob 模式
//! - 结果去重并排序
//!
//! ## 依赖关系
//! - 被 `commands/gamma.rs` 调用
//! - 使用 `glob` 展开模式

use crate::error::{BandsError, Result};
use std::path::PathBuf;

/// 文件收集器
pub struct FileCollector {
    /// 匹配模式列表
    patterns: Vec<String>,
}

impl FileCollector {
    /// 由逗号分隔的模式串创建
    pub fn new(pattern: &str) -> Self {
        Self {
            patterns: split_patterns(pattern),
        }
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for pattern in &self.patterns {
            let paths = glob::glob(pattern).map_err(|e| {
                BandsError::InvalidArgument(format!("Invalid glob pattern '{}': {}", pattern, e))
            })?;
            files.extend(paths.filter_map(|p| p.ok()).filter(|p| p.is_file()));
        }

        files.sort();
        files.dedup();
        Ok(files)
    }
}

fn split_patterns(pattern: &str) -> Vec<String> {
    pattern
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
