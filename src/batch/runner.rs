//! # 批量执行器
//!
//! 并行执行批量处理任务。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代
//! - 进度条显示
//! - 成功结果收集与失败汇总
//!
//! ## 依赖关系
//! - 被 `commands/gamma.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{BandsError, Result};
use crate::utils::progress;

use rayon::prelude::*;
use std::path::PathBuf;

/// 单个文件处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult<T> {
    /// 处理成功
    Success(T),
    /// 跳过
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (文件路径, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug)]
pub struct BatchResult<T> {
    /// 成功结果（与输入顺序一致）
    pub outputs: Vec<T>,
    /// 跳过数量
    pub skipped: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl<T> Default for BatchResult<T> {
    fn default() -> Self {
        BatchResult {
            outputs: Vec::new(),
            skipped: 0,
            failures: Vec::new(),
        }
    }
}

impl<T> BatchResult<T> {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult<T>) {
        match result {
            ProcessResult::Success(output) => self.outputs.push(output),
            ProcessResult::Skipped(_) => self.skipped += 1,
            ProcessResult::Failed(path, err) => self.failures.push((path, err)),
        }
    }

    pub fn success(&self) -> usize {
        self.outputs.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success() + self.skipped + self.failed()
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器（0 表示按 CPU 数）
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理文件列表
    pub fn run<T, F>(&self, files: Vec<PathBuf>, processor: F) -> Result<BatchResult<T>>
    where
        T: Send,
        F: Fn(&PathBuf) -> ProcessResult<T> + Sync + Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, "Processing");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| BandsError::Other(format!("Failed to build thread pool: {}", e)))?;

        let results: Vec<ProcessResult<T>> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let result = processor(file);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}
