//! # 能带结构数据模型
//!
//! 按能量顺序排列的能带集合，依据电子数划分价带/导带并计算带隙。
//!
//! ## 依赖关系
//! - 被 `parsers/bands_data.rs` 构造
//! - 被 `commands/bands.rs`, `plot/bands.rs` 使用
//! - 使用 `models/band.rs`

use crate::error::{BandsError, Result};
use crate::models::EnergyBand;

/// 能带结构
///
/// 每条能带容纳一个电子，价带下标为 `n_electrons - 1`，导带为 `n_electrons`。
#[derive(Debug, Clone)]
pub struct BandStructure {
    bands: Vec<EnergyBand>,
    n_electrons: usize,
    band_gap: f64,
}

impl BandStructure {
    pub fn new(bands: Vec<EnergyBand>, n_electrons: usize) -> Result<Self> {
        if n_electrons == 0 || n_electrons % 2 != 0 {
            return Err(BandsError::InvalidElectronCount(n_electrons));
        }
        if n_electrons >= bands.len() {
            return Err(BandsError::BandIndexOutOfRange {
                index: n_electrons,
                n_bands: bands.len(),
            });
        }

        let band_gap = bands[n_electrons].min_eigv() - bands[n_electrons - 1].max_eigv();

        Ok(BandStructure {
            bands,
            n_electrons,
            band_gap,
        })
    }

    pub fn bands(&self) -> &[EnergyBand] {
        &self.bands
    }

    pub fn valence_index(&self) -> usize {
        self.n_electrons - 1
    }

    pub fn conduction_index(&self) -> usize {
        self.n_electrons
    }

    pub fn valence_band(&self) -> &EnergyBand {
        &self.bands[self.valence_index()]
    }

    pub fn conduction_band(&self) -> &EnergyBand {
        &self.bands[self.conduction_index()]
    }

    /// 带隙 = CBM - VBM（负值表示能带交叠）
    pub fn band_gap(&self) -> f64 {
        self.band_gap
    }

    pub fn has_band_overlap(&self) -> bool {
        self.band_gap < 0.0
    }
}
