//! # 能带数据模型
//!
//! 单条能带沿 k 路径的采样：k 坐标、本征值、可选自旋标记。
//!
//! ## 依赖关系
//! - 被 `parsers/bands_data.rs` 构造
//! - 被 `models/band_structure.rs`, `plot/bands.rs` 使用

use crate::error::{BandsError, Result};
use serde::Serialize;

/// 自旋通道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Spin {
    Up,
    Down,
}

impl std::fmt::Display for Spin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Spin::Up => write!(f, "up"),
            Spin::Down => write!(f, "down"),
        }
    }
}

/// 单条能带
///
/// 三个序列等长且非空，构造后不可变。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyBand {
    k_points_x: Vec<f64>,
    eigv: Vec<f64>,
    spins: Vec<Option<Spin>>,
}

impl EnergyBand {
    pub fn new(k_points_x: Vec<f64>, eigv: Vec<f64>, spins: Vec<Option<Spin>>) -> Result<Self> {
        if k_points_x.len() != eigv.len() || spins.len() != eigv.len() {
            return Err(BandsError::BandShapeMismatch {
                k_points: k_points_x.len(),
                eigv: eigv.len(),
                spins: spins.len(),
            });
        }
        if eigv.is_empty() {
            return Err(BandsError::EmptyBand);
        }

        Ok(EnergyBand {
            k_points_x,
            eigv,
            spins,
        })
    }

    /// 无自旋信息的能带
    pub fn without_spin(k_points_x: Vec<f64>, eigv: Vec<f64>) -> Result<Self> {
        let spins = vec![None; eigv.len()];
        Self::new(k_points_x, eigv, spins)
    }

    pub fn k_points_x(&self) -> &[f64] {
        &self.k_points_x
    }

    pub fn eigv(&self) -> &[f64] {
        &self.eigv
    }

    pub fn spins(&self) -> &[Option<Spin>] {
        &self.spins
    }

    /// k 点数目
    pub fn k_count(&self) -> usize {
        self.eigv.len()
    }

    // ─────────────────────────────────────────────────────────────
    // 极值查询（并列时返回全部位置）
    // ─────────────────────────────────────────────────────────────

    pub fn max_eigv(&self) -> f64 {
        self.eigv.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min_eigv(&self) -> f64 {
        self.eigv.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max_k_index(&self) -> Vec<usize> {
        self.indices_of(self.max_eigv())
    }

    pub fn min_k_index(&self) -> Vec<usize> {
        self.indices_of(self.min_eigv())
    }

    pub fn max_k_points_x(&self) -> Vec<f64> {
        self.max_k_index()
            .into_iter()
            .map(|i| self.k_points_x[i])
            .collect()
    }

    pub fn min_k_points_x(&self) -> Vec<f64> {
        self.min_k_index()
            .into_iter()
            .map(|i| self.k_points_x[i])
            .collect()
    }

    fn indices_of(&self, value: f64) -> Vec<usize> {
        self.eigv
            .iter()
            .enumerate()
            .filter(|(_, &e)| e == value)
            .map(|(i, _)| i)
            .collect()
    }
}
