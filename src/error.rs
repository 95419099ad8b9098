//! # 统一错误处理模块
//!
//! 定义 qebands 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// qebands 统一错误类型
#[derive(Error, Debug)]
pub enum BandsError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid number '{token}'")]
    InvalidNumber { token: String },

    #[error("Missing token #{index} in line: {line}")]
    MissingToken { index: usize, line: String },

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<BandsError>,
    },

    #[error("Marker '{marker}' not found in {source_name}")]
    MissingSentinel { marker: String, source_name: String },

    #[error("Unknown parser state: {0}")]
    UnknownState(String),

    // ─────────────────────────────────────────────────────────────
    // 结构校验错误
    // ─────────────────────────────────────────────────────────────
    #[error(
        "Input lengths of k_points_x, eigv, spins are not the same: {k_points}, {eigv}, {spins}"
    )]
    BandShapeMismatch {
        k_points: usize,
        eigv: usize,
        spins: usize,
    },

    #[error("Energy band has no samples")]
    EmptyBand,

    #[error("Number of electrons must be even and positive, got {0}")]
    InvalidElectronCount(usize),

    #[error("Number of electrons is not a whole number: {0}")]
    NonIntegralElectronCount(f64),

    #[error("Band index {index} out of range ({n_bands} bands parsed)")]
    BandIndexOutOfRange { index: usize, n_bands: usize },

    #[error("{0} accessed before it was read")]
    NotYetRead(&'static str),

    // ─────────────────────────────────────────────────────────────
    // 分析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Gamma-point band index {index} out of range for {len} eigenvalues (E_F = {fermi_energy})")]
    GammaIndexOutOfRange {
        index: isize,
        len: usize,
        fermi_energy: f64,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("{0}")]
    Other(String),
}

impl BandsError {
    /// 去掉 `AtLine` 包装，返回最内层错误
    pub fn root(&self) -> &BandsError {
        match self {
            BandsError::AtLine { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, BandsError>;
